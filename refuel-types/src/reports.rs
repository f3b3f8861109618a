//! Report envelopes produced by the orchestrator.

use serde::{Deserialize, Serialize};

use crate::band::BandSet;
use crate::curve::CurveKey;
use crate::view::View;

/// Result of applying a view (and display-unit conversion) to a band set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comparison {
    /// View that produced `bands`.
    pub view: View,
    /// Output bands, ready for rendering.
    pub bands: BandSet,
    /// Curves present in the output, in registry order.
    pub curves: Vec<CurveKey>,
    /// Number of output bands.
    pub total_rows: usize,
}

/// Price ranges where one curve is the cheapest (ties included).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarrierFocus {
    /// Focused curve.
    pub curve: CurveKey,
    /// Bands where `curve` is at or below every other present curve.
    pub competitive: BandSet,
    /// Number of competitive bands.
    pub total_competitive: usize,
}
