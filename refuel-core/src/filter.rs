//! Overlap filter.

use refuel_types::BandSet;

/// Keep only bands where at least `min_curves` curves have a non-absent value.
///
/// Independent of any grid: it works on raw and re-bucketed band sets alike.
#[must_use]
pub fn overlap_filter(bands: &BandSet, min_curves: usize) -> BandSet {
    bands
        .iter()
        .filter(|b| b.present_count() >= min_curves)
        .cloned()
        .collect()
}
