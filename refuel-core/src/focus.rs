//! Price ranges where one curve is the cheapest.

use refuel_types::{BandSet, CurveKey};

/// Bands where `curve` has a value at or below every other present curve.
///
/// A band only qualifies when at least one other curve has a value to compare
/// against; ties count as competitive.
#[must_use]
pub fn competitive_ranges(bands: &BandSet, curve: &CurveKey) -> BandSet {
    bands
        .iter()
        .filter(|b| {
            let Some(own) = b.value(curve) else {
                return false;
            };
            b.curves
                .iter()
                .filter(|(k, _)| *k != curve)
                .filter_map(|(_, p)| p.value)
                .fold(None, |acc: Option<f64>, v| Some(acc.map_or(v, |m| m.min(v))))
                .is_some_and(|cheapest_other| own <= cheapest_other)
        })
        .cloned()
        .collect()
}
