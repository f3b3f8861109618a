//! Configuration types shared by the engine and the orchestrator.

use serde::{Deserialize, Serialize};

use crate::units::UnitTable;

/// Global configuration for the `Refuel` orchestrator and the band engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RefuelConfig {
    /// Coverage difference under which two candidate bands count as tied.
    pub tie_tolerance: f64,
    /// Fixed number of decimal places for grid boundaries and unit conversion.
    pub decimals: u32,
    /// Minimum number of present curves an interval needs to survive the overlap filter.
    pub min_overlap_curves: usize,
    /// Display-unit conversions keyed by market, carrier and category.
    pub units: UnitTable,
}

impl RefuelConfig {
    /// Default coverage tie tolerance.
    pub const DEFAULT_TIE_TOLERANCE: f64 = 1e-4;
    /// Default fixed precision.
    pub const DEFAULT_DECIMALS: u32 = 2;
    /// Default overlap threshold.
    pub const DEFAULT_MIN_OVERLAP_CURVES: usize = 2;
}

impl Default for RefuelConfig {
    fn default() -> Self {
        Self {
            tie_tolerance: Self::DEFAULT_TIE_TOLERANCE,
            decimals: Self::DEFAULT_DECIMALS,
            min_overlap_curves: Self::DEFAULT_MIN_OVERLAP_CURVES,
            units: UnitTable::new(),
        }
    }
}

/// Like-for-like comparison context of a request: which market and fuel
/// category the band set was fetched for. Used to resolve unit conversions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ComparisonContext {
    /// Market/country code.
    pub market: String,
    /// Fuel category.
    pub category: String,
}

impl ComparisonContext {
    /// Build a context.
    pub fn new(market: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            market: market.into(),
            category: category.into(),
        }
    }
}
