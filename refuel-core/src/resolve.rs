//! Best-coverage source band selection.

use refuel_types::{Band, BandSet, CurveKey, RefuelConfig};

/// A source band selected for a target interval, with its overlap.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resolved<'a> {
    /// Winning source band.
    pub band: &'a Band,
    /// Length of its intersection with the target interval.
    pub overlap: f64,
    /// Whether the band contains the target's start.
    pub contains_start: bool,
}

/// Picks the single source band that best represents a curve over a target
/// interval.
///
/// Ranking, for bands that define the curve and overlap `[start, end)` by a
/// positive length:
/// 1. larger overlap wins; differences within `tolerance` count as ties,
/// 2. then a band containing `start` beats one that does not,
/// 3. then the band with the larger lower bound wins.
///
/// If a tie survives all three rules the band seen first is kept, so the result
/// only depends on the input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlapResolver {
    tolerance: f64,
}

impl Default for OverlapResolver {
    fn default() -> Self {
        Self::new(RefuelConfig::DEFAULT_TIE_TOLERANCE)
    }
}

impl OverlapResolver {
    /// Resolver with an explicit coverage tie tolerance.
    #[must_use]
    pub const fn new(tolerance: f64) -> Self {
        Self { tolerance }
    }

    /// Configured tie tolerance.
    #[must_use]
    pub const fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Best source band for `key` over `[start, end)`, or `None` when no band
    /// defining the curve overlaps the target.
    #[must_use]
    pub fn resolve<'a>(
        &self,
        bands: &'a BandSet,
        key: &CurveKey,
        start: f64,
        end: f64,
    ) -> Option<Resolved<'a>> {
        bands
            .iter()
            .filter(|b| b.defines(key))
            .filter_map(|band| {
                let overlap = band.overlap(start, end);
                (overlap > 0.0).then(|| Resolved {
                    band,
                    overlap,
                    contains_start: band.contains(start),
                })
            })
            .fold(None, |best, cand| match best {
                Some(cur) if !self.prefers(&cand, &cur) => Some(cur),
                _ => Some(cand),
            })
    }

    /// True when `a` ranks strictly ahead of `b`.
    #[must_use]
    pub fn prefers(&self, a: &Resolved<'_>, b: &Resolved<'_>) -> bool {
        let diff = a.overlap - b.overlap;
        if diff > self.tolerance {
            return true;
        }
        if diff < -self.tolerance {
            return false;
        }
        if a.contains_start != b.contains_start {
            return a.contains_start;
        }
        a.band.lower > b.band.lower
    }
}
