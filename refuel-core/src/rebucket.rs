//! Re-bucketing of band sets onto a uniform grid.

use refuel_types::{Band, BandSet, CurvePoint, RefuelConfig, RefuelError};

use crate::numeric::{GRID_EPSILON, grid_floor, round_dp};
use crate::observer::{CellResolution, NoopObserver, RebucketObserver};
use crate::registry::CurveColumnRegistry;
use crate::resolve::OverlapResolver;

/// Uniform grid cells `[start, end)` covering `[floor(min/step)*step, max)`.
///
/// Boundaries are generated by repeated addition of `step`, rounding each new
/// boundary to `decimals` places so cell widths stay uniform over long ranges.
/// The last cell may extend past `max` when the range is not a multiple of `step`.
///
/// # Errors
/// Returns `RefuelError::InvalidStep` if `step` is not positive and finite, or if
/// it is not exactly representable at `decimals` places (the rounded grid would
/// advance by a different width, or not at all).
/// Returns `RefuelError::InvalidBand` if the range itself is not finite.
pub fn grid_cells(
    min: f64,
    max: f64,
    step: f64,
    decimals: u32,
) -> Result<Vec<(f64, f64)>, RefuelError> {
    if !(step.is_finite() && step > 0.0)
        || round_dp(step, decimals) <= 0.0
        || (round_dp(step, decimals) - step).abs() > GRID_EPSILON
    {
        return Err(RefuelError::invalid_step(step));
    }
    if !(min.is_finite() && max.is_finite()) {
        return Err(RefuelError::invalid_band(min, max));
    }

    let mut cells = Vec::new();
    let mut current = grid_floor(min, step, decimals);
    while current < max - GRID_EPSILON {
        let next = round_dp(current + step, decimals);
        if next <= current {
            return Err(RefuelError::invalid_step(step));
        }
        cells.push((current, next));
        current = next;
    }
    Ok(cells)
}

/// Rebuilds a band set on a uniform grid of a fixed step width.
///
/// The grid spans the range of the whole input (all curves together), so every
/// curve lands on the same cells even if its own published range is narrower.
/// Each cell takes, per curve, the value and extrapolation flag of exactly one
/// source band chosen by [`OverlapResolver`]; values are copied verbatim, never
/// interpolated or averaged. Curves without an overlapping source band are kept
/// as absent columns.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rebucketer {
    step: f64,
    decimals: u32,
    resolver: OverlapResolver,
}

impl Rebucketer {
    /// Rebucketer with default precision and tie tolerance.
    #[must_use]
    pub fn new(step: f64) -> Self {
        Self {
            step,
            decimals: RefuelConfig::DEFAULT_DECIMALS,
            resolver: OverlapResolver::default(),
        }
    }

    /// Override the boundary precision.
    #[must_use]
    pub const fn decimals(mut self, decimals: u32) -> Self {
        self.decimals = decimals;
        self
    }

    /// Override the resolver (tie tolerance).
    #[must_use]
    pub const fn resolver(mut self, resolver: OverlapResolver) -> Self {
        self.resolver = resolver;
        self
    }

    /// Configured step width.
    #[must_use]
    pub const fn step(&self) -> f64 {
        self.step
    }

    /// Re-bucket without telemetry.
    ///
    /// # Errors
    /// See [`grid_cells`].
    pub fn rebucket(&self, bands: &BandSet) -> Result<BandSet, RefuelError> {
        self.rebucket_observed(bands, &NoopObserver)
    }

    /// Re-bucket, reporting every cell resolution to `observer`.
    ///
    /// An empty input yields an empty output.
    ///
    /// # Errors
    /// See [`grid_cells`].
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "refuel_core::rebucket",
            skip(self, bands, observer),
            fields(step = self.step, input_bands = bands.len()),
        )
    )]
    pub fn rebucket_observed(
        &self,
        bands: &BandSet,
        observer: &dyn RebucketObserver,
    ) -> Result<BandSet, RefuelError> {
        if !(self.step.is_finite() && self.step > 0.0) {
            return Err(RefuelError::invalid_step(self.step));
        }
        let Some((min, max)) = bands.price_range() else {
            return Ok(BandSet::empty());
        };
        let cells = grid_cells(min, max, self.step, self.decimals)?;
        let registry = CurveColumnRegistry::from_bands(bands);

        let mut out: Vec<Band> = Vec::with_capacity(cells.len());
        for (start, end) in cells {
            let mut cell = Band::new(start, end);
            for key in &registry {
                let winner = self.resolver.resolve(bands, key, start, end);
                observer.on_cell_resolved(&CellResolution {
                    curve: key,
                    cell: (start, end),
                    source: winner.map(|w| (w.band.lower, w.band.upper)),
                    overlap: winner.map_or(0.0, |w| w.overlap),
                });
                let point = winner
                    .and_then(|w| w.band.point(key).copied())
                    .unwrap_or_else(CurvePoint::absent);
                cell.set(key.clone(), point);
            }
            out.push(cell);
        }
        Ok(BandSet::new(out))
    }
}

/// Re-bucket `bands` at `step` with default precision and tolerance.
///
/// # Errors
/// Returns `RefuelError::InvalidStep` for a non-positive or sub-resolution step.
pub fn rebucket(bands: &BandSet, step: f64) -> Result<BandSet, RefuelError> {
    Rebucketer::new(step).rebucket(bands)
}
