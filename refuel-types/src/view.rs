//! Named display transforms.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::RefuelError;

/// A named, stateless transform configuration: a step width for re-bucketing
/// and an optional overlap filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum View {
    /// Identity: the input as published.
    #[default]
    #[serde(rename = "raw")]
    Raw,
    /// Coarse uniform grid (0.10).
    #[serde(rename = "normalized@0.10", alias = "normalized")]
    Normalized,
    /// Fine uniform grid (0.02).
    #[serde(rename = "normalized@0.02", alias = "normalized_fine")]
    NormalizedFine,
    /// Only intervals where at least two curves have data; no re-bucketing.
    #[serde(rename = "overlap")]
    Overlap,
    /// Finest uniform grid (0.01).
    #[serde(rename = "complete@0.01", alias = "complete")]
    Complete,
    /// Uniform grid at 0.05 followed by the overlap filter.
    #[serde(rename = "comparable")]
    Comparable,
}

impl View {
    /// Every view, in menu order.
    pub const ALL: [Self; 6] = [
        Self::Raw,
        Self::Normalized,
        Self::NormalizedFine,
        Self::Overlap,
        Self::Complete,
        Self::Comparable,
    ];

    /// Canonical name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Raw => "raw",
            Self::Normalized => "normalized@0.10",
            Self::NormalizedFine => "normalized@0.02",
            Self::Overlap => "overlap",
            Self::Complete => "complete@0.01",
            Self::Comparable => "comparable",
        }
    }

    /// Grid step width used by this view, or `None` when it does not re-bucket.
    #[must_use]
    pub const fn step_width(self) -> Option<f64> {
        match self {
            Self::Raw | Self::Overlap => None,
            Self::Normalized => Some(0.10),
            Self::NormalizedFine => Some(0.02),
            Self::Complete => Some(0.01),
            Self::Comparable => Some(0.05),
        }
    }

    /// True when the view drops intervals with fewer than two present curves.
    #[must_use]
    pub const fn filters_overlap(self) -> bool {
        matches!(self, Self::Overlap | Self::Comparable)
    }

    /// Lenient lookup used by display-mode selectors: unknown names fall back to `Raw`.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        name.parse().unwrap_or(Self::Raw)
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for View {
    type Err = RefuelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "raw" => Ok(Self::Raw),
            "normalized" | "normalized@0.10" | "normalized@0.1" => Ok(Self::Normalized),
            "normalized_fine" | "normalized@0.02" => Ok(Self::NormalizedFine),
            "overlap" => Ok(Self::Overlap),
            "complete" | "complete@0.01" => Ok(Self::Complete),
            "comparable" => Ok(Self::Comparable),
            _ => Err(RefuelError::UnknownView(s.to_string())),
        }
    }
}
