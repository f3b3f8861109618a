//! Priority merge of long-format rows.

use std::collections::HashMap;

use refuel_types::{BandSet, CurveKey, SurchargeRow};

/// Merge several row series in priority order (first is highest) into one band set.
///
/// Typical input is `[measured_rows, extrapolated_rows]`.
///
/// - A row is kept unless a higher-priority row of the same curve already covers
///   part of its interval; lower-priority series therefore only backfill gaps.
/// - Within one series the same rule applies in iteration order.
/// - Surviving rows are pivoted with [`BandSet::from_rows`], so the output is
///   sorted by interval and each curve stays free of overlapping intervals.
pub fn merge_rows_by_priority<I, S>(series: I) -> BandSet
where
    I: IntoIterator<Item = S>,
    S: IntoIterator<Item = SurchargeRow>,
{
    let mut accepted: HashMap<CurveKey, Vec<(f64, f64)>> = HashMap::new();
    let mut kept: Vec<SurchargeRow> = Vec::new();
    for rows in series {
        for row in rows {
            let taken = accepted.entry(row.curve.clone()).or_default();
            let collides = taken
                .iter()
                .any(|&(lo, hi)| row.upper.min(hi) - row.lower.max(lo) > 0.0);
            if collides {
                continue;
            }
            taken.push((row.lower, row.upper));
            kept.push(row);
        }
    }
    BandSet::from_rows(kept)
}
