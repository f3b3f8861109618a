use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unified error type for the refuel workspace.
///
/// The band transforms are total wherever an empty or absent result makes
/// sense, so this enum is small: invalid grid steps and conversion factors,
/// malformed input detected by boundary validation, and configuration errors.
#[derive(Debug, Error, Serialize, Deserialize, Clone, PartialEq)]
#[non_exhaustive]
pub enum RefuelError {
    /// The step width cannot produce a terminating grid.
    #[error("invalid step width: {step}")]
    InvalidStep {
        /// Offending step width.
        step: f64,
    },

    /// The conversion factor is not a positive finite number.
    #[error("invalid conversion factor: {factor}")]
    InvalidFactor {
        /// Offending factor.
        factor: f64,
    },

    /// A band interval is malformed (`lower >= upper` or non-finite).
    #[error("invalid band interval: [{lower}, {upper})")]
    InvalidBand {
        /// Lower bound of the rejected band.
        lower: f64,
        /// Upper bound of the rejected band.
        upper: f64,
    },

    /// A view name did not match any known view (strict parsing only).
    #[error("unknown view: {0}")]
    UnknownView(String),

    /// Invalid input argument or configuration value.
    #[error("invalid argument: {0}")]
    InvalidArg(String),
}

impl RefuelError {
    /// Helper: build an `InvalidStep` error.
    #[must_use]
    pub const fn invalid_step(step: f64) -> Self {
        Self::InvalidStep { step }
    }

    /// Helper: build an `InvalidFactor` error.
    #[must_use]
    pub const fn invalid_factor(factor: f64) -> Self {
        Self::InvalidFactor { factor }
    }

    /// Helper: build an `InvalidBand` error.
    #[must_use]
    pub const fn invalid_band(lower: f64, upper: f64) -> Self {
        Self::InvalidBand { lower, upper }
    }

    /// Returns true if the error points at caller-supplied data rather than
    /// engine configuration.
    #[must_use]
    pub const fn is_input_error(&self) -> bool {
        matches!(self, Self::InvalidBand { .. } | Self::UnknownView(_))
    }
}
