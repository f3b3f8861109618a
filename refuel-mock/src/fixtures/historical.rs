//! UPS curve revisions side by side with the current curve.

use refuel_types::{CurveKey, SurchargeRow};

use super::{ladder, linear};

pub const PREVIOUS_VERSION: &str = "2024-06";

pub fn current() -> Vec<SurchargeRow> {
    ladder(&CurveKey::carrier("UPS"), 200, 25, &linear(14.5, 0.5, 8), false)
}

/// Older revision: narrower published range, coarser bands.
pub fn previous() -> Vec<SurchargeRow> {
    ladder(
        &CurveKey::versioned("UPS", PREVIOUS_VERSION),
        225,
        50,
        &linear(13.0, 0.75, 3),
        false,
    )
}

pub fn all() -> Vec<SurchargeRow> {
    let mut rows = current();
    rows.extend(previous());
    rows
}
