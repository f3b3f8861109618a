pub mod de_ground;
pub mod historical;
pub mod us_ground;

use refuel_types::{CurveKey, SurchargeRow};

/// Contiguous rows of width `width_cents`, starting at `start_cents`, one per value.
///
/// Bounds are built from integer cents so every boundary is the closest double
/// to its two-decimal literal.
pub fn ladder(
    curve: &CurveKey,
    start_cents: i64,
    width_cents: i64,
    values: &[f64],
    extrapolated: bool,
) -> Vec<SurchargeRow> {
    values
        .iter()
        .zip(0_i64..)
        .map(|(&value, i)| {
            let lower = cents(start_cents + i * width_cents);
            let upper = cents(start_cents + (i + 1) * width_cents);
            if extrapolated {
                SurchargeRow::extrapolated(curve.clone(), lower, upper, value)
            } else {
                SurchargeRow::measured(curve.clone(), lower, upper, value)
            }
        })
        .collect()
}

/// Evenly increasing values `first, first + inc, ...`, `n` of them, on a 0.01 grid.
pub fn linear(first: f64, inc: f64, n: usize) -> Vec<f64> {
    (0..n)
        .map(|i| {
            #[allow(clippy::cast_precision_loss)]
            let v = first + inc * i as f64;
            (v * 100.0).round() / 100.0
        })
        .collect()
}

#[allow(clippy::cast_precision_loss)]
fn cents(c: i64) -> f64 {
    c as f64 / 100.0
}
