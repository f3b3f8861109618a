//! Display-unit conversion of band sets.
//!
//! Conversion scales boundaries and values by a factor and rounds both to a
//! fixed precision. The rounding is lossy on purpose: converting forward and
//! back through the inverse factor may drift by a unit in the last place.
//!
//! Conversion must run on the output of a view, never before it: rounding can
//! move boundaries across a coverage tie threshold, which would change which
//! source band the resolver picks.

use std::collections::BTreeSet;

use refuel_types::{Band, BandSet, ConversionFactor, CurveKey, CurvePoint, RefuelConfig};

use crate::numeric::round_dp;
use crate::observer::{ConversionEvent, NoopObserver, RebucketObserver};

/// Applies one conversion factor at a fixed precision.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitConverter {
    factor: ConversionFactor,
    decimals: u32,
}

impl UnitConverter {
    /// Converter at the default precision.
    #[must_use]
    pub const fn new(factor: ConversionFactor) -> Self {
        Self {
            factor,
            decimals: RefuelConfig::DEFAULT_DECIMALS,
        }
    }

    /// Override the precision.
    #[must_use]
    pub const fn decimals(mut self, decimals: u32) -> Self {
        self.decimals = decimals;
        self
    }

    /// Factor applied.
    #[must_use]
    pub const fn factor(&self) -> ConversionFactor {
        self.factor
    }

    /// `round(x * factor)`.
    #[must_use]
    pub fn convert_value(&self, x: f64) -> f64 {
        round_dp(x * self.factor.get(), self.decimals)
    }

    /// Convert a reading; absent values stay absent, flags are preserved.
    #[must_use]
    pub fn convert_point(&self, p: CurvePoint) -> CurvePoint {
        CurvePoint {
            value: p.value.map(|v| self.convert_value(v)),
            extrapolated: p.extrapolated,
        }
    }

    /// Convert every curve of every band.
    ///
    /// Bands whose interval rounds to empty are dropped.
    #[must_use]
    pub fn convert_all(&self, bands: &BandSet) -> BandSet {
        bands
            .iter()
            .filter_map(|b| self.rescale(b, |_| true))
            .collect()
    }

    /// Convert only `curves`, leaving every other curve on its native interval.
    ///
    /// - Bands whose present curves are all in `curves` are rescaled whole.
    /// - Bands that also carry present unconverted curves are split: the
    ///   unconverted curves keep the native interval, the converted ones move
    ///   to a new band right after it.
    /// - Bands without a present value for any of `curves` pass through
    ///   unchanged, absent columns included.
    ///
    /// A converted band whose interval rounds to empty is dropped.
    #[must_use]
    pub fn convert_curves(&self, bands: &BandSet, curves: &[CurveKey]) -> BandSet {
        self.convert_curves_observed(bands, curves, &NoopObserver)
    }

    /// [`UnitConverter::convert_curves`] with telemetry.
    #[must_use]
    pub fn convert_curves_observed(
        &self,
        bands: &BandSet,
        curves: &[CurveKey],
        observer: &dyn RebucketObserver,
    ) -> BandSet {
        let targets: BTreeSet<&CurveKey> = curves.iter().collect();
        let mut out: Vec<Band> = Vec::with_capacity(bands.len());
        let (mut converted, mut split, mut collapsed) = (0usize, 0usize, 0usize);

        for band in bands {
            let target_present = band
                .curves
                .iter()
                .any(|(k, p)| p.is_present() && targets.contains(k));
            let mixed = band
                .curves
                .iter()
                .any(|(k, p)| p.is_present() && !targets.contains(k));
            if !target_present {
                out.push(band.clone());
                continue;
            }
            if mixed {
                split += 1;
                let mut native = Band::new(band.lower, band.upper);
                native.curves = band
                    .curves
                    .iter()
                    .filter(|(k, _)| !targets.contains(k))
                    .map(|(k, p)| (k.clone(), *p))
                    .collect();
                out.push(native);
            }
            match self.rescale(band, |k| targets.contains(k)) {
                Some(c) => {
                    if !mixed {
                        converted += 1;
                    }
                    out.push(c);
                }
                None => collapsed += 1,
            }
        }

        observer.on_conversion(&ConversionEvent {
            curves,
            factor: self.factor.get(),
            converted,
            split,
            collapsed,
        });
        BandSet::new(out)
    }

    /// Rescaled copy of `band` holding the curves selected by `keep`, or `None`
    /// if the rounded interval is empty.
    fn rescale(&self, band: &Band, keep: impl Fn(&CurveKey) -> bool) -> Option<Band> {
        let lower = self.convert_value(band.lower);
        let upper = self.convert_value(band.upper);
        if lower >= upper {
            return None;
        }
        let mut out = Band::new(lower, upper);
        out.curves = band
            .curves
            .iter()
            .filter(|(k, _)| keep(k))
            .map(|(k, p)| (k.clone(), self.convert_point(*p)))
            .collect();
        Some(out)
    }
}
