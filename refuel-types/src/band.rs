//! Bands, band sets and long-format surcharge rows.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use serde::{Deserialize, Serialize};

use crate::curve::{CurveKey, CurvePoint};
use crate::error::RefuelError;

/// The value of zero or more curves over the half-open price interval `[lower, upper)`.
///
/// Curves are a dynamic column set: any `CurveKey` can be added without changing
/// this type, and different bands of the same dataset may carry different keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Band {
    /// Inclusive lower bound of the price interval.
    pub lower: f64,
    /// Exclusive upper bound of the price interval.
    pub upper: f64,
    /// Per-curve readings for this interval.
    #[serde(default)]
    pub curves: BTreeMap<CurveKey, CurvePoint>,
}

impl Band {
    /// Create a band with no curve columns.
    #[must_use]
    pub const fn new(lower: f64, upper: f64) -> Self {
        Self {
            lower,
            upper,
            curves: BTreeMap::new(),
        }
    }

    /// Builder-style helper to attach a curve reading.
    #[must_use]
    pub fn with_curve(mut self, key: CurveKey, point: CurvePoint) -> Self {
        self.curves.insert(key, point);
        self
    }

    /// Builder-style helper to attach a measured value.
    #[must_use]
    pub fn with_value(self, key: CurveKey, value: f64) -> Self {
        self.with_curve(key, CurvePoint::measured(value))
    }

    /// Insert or replace a curve reading.
    pub fn set(&mut self, key: CurveKey, point: CurvePoint) {
        self.curves.insert(key, point);
    }

    /// Reading for a curve, if the column exists in this band.
    #[must_use]
    pub fn point(&self, key: &CurveKey) -> Option<&CurvePoint> {
        self.curves.get(key)
    }

    /// Value for a curve; `None` when the column is missing or absent.
    #[must_use]
    pub fn value(&self, key: &CurveKey) -> Option<f64> {
        self.curves.get(key).and_then(|p| p.value)
    }

    /// True when the band defines a (non-absent) value for `key`.
    #[must_use]
    pub fn defines(&self, key: &CurveKey) -> bool {
        self.value(key).is_some()
    }

    /// Number of curves with a non-absent value.
    #[must_use]
    pub fn present_count(&self) -> usize {
        self.curves.values().filter(|p| p.is_present()).count()
    }

    /// Interval width.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }

    /// Half-open containment: `lower <= x < upper`.
    #[must_use]
    pub fn contains(&self, x: f64) -> bool {
        self.lower <= x && x < self.upper
    }

    /// Length of the intersection with `[start, end)`, clamped at zero.
    #[must_use]
    pub fn overlap(&self, start: f64, end: f64) -> f64 {
        (end.min(self.upper) - start.max(self.lower)).max(0.0)
    }

    /// True when the interval is finite and non-empty.
    #[must_use]
    pub fn is_well_formed(&self) -> bool {
        self.lower.is_finite() && self.upper.is_finite() && self.lower < self.upper
    }

    /// Human-readable price range, e.g. `"$2.00-$2.25"`.
    #[must_use]
    pub fn range_label(&self, symbol: &str) -> String {
        format!("{symbol}{:.2}-{symbol}{:.2}", self.lower, self.upper)
    }
}

/// One dataset snapshot: an unordered collection of bands.
///
/// Transforms never mutate a `BandSet` in place; each produces a new one so the
/// caller keeps the input for comparison or caching.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BandSet {
    bands: Vec<Band>,
}

impl BandSet {
    /// Wrap a vector of bands without validation.
    #[must_use]
    pub const fn new(bands: Vec<Band>) -> Self {
        Self { bands }
    }

    /// Empty snapshot.
    #[must_use]
    pub const fn empty() -> Self {
        Self { bands: Vec::new() }
    }

    /// Borrow the bands in storage order.
    #[must_use]
    pub fn bands(&self) -> &[Band] {
        &self.bands
    }

    /// Consume into the underlying vector.
    #[must_use]
    pub fn into_bands(self) -> Vec<Band> {
        self.bands
    }

    /// Iterate bands in storage order.
    pub fn iter(&self) -> std::slice::Iter<'_, Band> {
        self.bands.iter()
    }

    /// Number of bands.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bands.len()
    }

    /// True when there are no bands.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bands.is_empty()
    }

    /// Minimum lower bound and maximum upper bound across every band and curve.
    #[must_use]
    pub fn price_range(&self) -> Option<(f64, f64)> {
        let mut it = self.bands.iter();
        let first = it.next()?;
        Some(it.fold((first.lower, first.upper), |(lo, hi), b| {
            (lo.min(b.lower), hi.max(b.upper))
        }))
    }

    /// Reject malformed intervals.
    ///
    /// Intended for the data-source boundary; the transforms themselves assume
    /// well-formed input.
    ///
    /// # Errors
    /// Returns `RefuelError::InvalidBand` for the first band whose bounds are
    /// non-finite or not strictly increasing.
    pub fn validate(&self) -> Result<(), RefuelError> {
        match self.bands.iter().find(|b| !b.is_well_formed()) {
            Some(b) => Err(RefuelError::invalid_band(b.lower, b.upper)),
            None => Ok(()),
        }
    }

    /// Pivot long-format rows into wide bands.
    ///
    /// Rows sharing the exact same interval become one band with one column per
    /// curve. The output is sorted by `(lower, upper)`. If the same curve appears
    /// twice for one interval, the first row wins.
    pub fn from_rows<I>(rows: I) -> Self
    where
        I: IntoIterator<Item = SurchargeRow>,
    {
        let mut bands: Vec<Band> = Vec::new();
        let mut rows: Vec<SurchargeRow> = rows.into_iter().collect();
        // stable: keeps first-row-wins for duplicates
        rows.sort_by(|a, b| {
            a.lower
                .total_cmp(&b.lower)
                .then(a.upper.total_cmp(&b.upper))
        });
        for row in rows {
            let same_interval = bands
                .last()
                .is_some_and(|b| b.lower == row.lower && b.upper == row.upper);
            if !same_interval {
                bands.push(Band::new(row.lower, row.upper));
            }
            if let Some(band) = bands.last_mut()
                && let Entry::Vacant(v) = band.curves.entry(row.curve)
            {
                v.insert(CurvePoint {
                    value: Some(row.value),
                    extrapolated: row.extrapolated,
                });
            }
        }
        Self { bands }
    }
}

impl From<Vec<Band>> for BandSet {
    fn from(bands: Vec<Band>) -> Self {
        Self::new(bands)
    }
}

impl FromIterator<Band> for BandSet {
    fn from_iter<T: IntoIterator<Item = Band>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl IntoIterator for BandSet {
    type Item = Band;
    type IntoIter = std::vec::IntoIter<Band>;

    fn into_iter(self) -> Self::IntoIter {
        self.bands.into_iter()
    }
}

impl<'a> IntoIterator for &'a BandSet {
    type Item = &'a Band;
    type IntoIter = std::slice::Iter<'a, Band>;

    fn into_iter(self) -> Self::IntoIter {
        self.bands.iter()
    }
}

/// One long-format surcharge row as persisted by the data source:
/// a single curve's value over one interval.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurchargeRow {
    /// Curve the value belongs to.
    pub curve: CurveKey,
    /// Inclusive lower price bound ("at least").
    pub lower: f64,
    /// Exclusive upper price bound ("but less than").
    pub upper: f64,
    /// Surcharge percentage.
    pub value: f64,
    /// Whether the row was synthetically derived.
    #[serde(default)]
    pub extrapolated: bool,
}

impl SurchargeRow {
    /// A measured row.
    #[must_use]
    pub const fn measured(curve: CurveKey, lower: f64, upper: f64, value: f64) -> Self {
        Self {
            curve,
            lower,
            upper,
            value,
            extrapolated: false,
        }
    }

    /// A synthetically derived row.
    #[must_use]
    pub const fn extrapolated(curve: CurveKey, lower: f64, upper: f64, value: f64) -> Self {
        Self {
            curve,
            lower,
            upper,
            value,
            extrapolated: true,
        }
    }
}
