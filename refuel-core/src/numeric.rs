//! Fixed-precision rounding and tolerance helpers.

use rust_decimal::prelude::{Decimal, FromPrimitive, RoundingStrategy, ToPrimitive};

/// Slack applied when flooring `min / step` and when comparing grid lines
/// against the upper end of the input range.
pub const GRID_EPSILON: f64 = 1e-9;

/// Round `x` to `decimals` places on its decimal representation, midpoint away from zero.
///
/// `1.005` rounds to `1.01` here, whereas `(1.005 * 100.0).round() / 100.0`
/// yields `1.0`. Non-finite inputs are returned unchanged.
#[must_use]
pub fn round_dp(x: f64, decimals: u32) -> f64 {
    Decimal::from_f64(x)
        .map(|d| d.round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero))
        .and_then(|d| d.to_f64())
        .unwrap_or(x)
}

/// `floor(min / step) * step`, rounded to `decimals`.
#[must_use]
pub fn grid_floor(min: f64, step: f64, decimals: u32) -> f64 {
    round_dp((min / step + GRID_EPSILON).floor() * step, decimals)
}
