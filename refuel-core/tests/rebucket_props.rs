use proptest::prelude::*;
use refuel_core::numeric::grid_floor;
use refuel_core::{Rebucketer, ViewPipeline, overlap_filter};
use refuel_types::{BandSet, CurveKey, SurchargeRow, View};

// One contiguous ladder of cent-aligned rows for a curve.
fn arb_ladder(curve: &'static str) -> impl Strategy<Value = Vec<SurchargeRow>> {
    (
        100i64..300,
        proptest::collection::vec((3i64..40, 0i64..5_000, any::<bool>()), 1..8),
    )
        .prop_map(move |(start, steps)| {
            let mut lower = start;
            steps
                .into_iter()
                .map(|(w, v, extrapolated)| {
                    let upper = lower + w;
                    let row = SurchargeRow {
                        curve: CurveKey::carrier(curve),
                        lower: lower as f64 / 100.0,
                        upper: upper as f64 / 100.0,
                        value: v as f64 / 100.0,
                        extrapolated,
                    };
                    lower = upper;
                    row
                })
                .collect()
        })
}

fn arb_bandset() -> impl Strategy<Value = BandSet> {
    (
        arb_ladder("UPS"),
        proptest::option::of(arb_ladder("FedEx")),
        proptest::option::of(arb_ladder("DHL")),
    )
        .prop_map(|(a, b, c)| {
            let mut rows = a;
            rows.extend(b.into_iter().flatten());
            rows.extend(c.into_iter().flatten());
            BandSet::from_rows(rows)
        })
}

fn arb_step() -> impl Strategy<Value = f64> {
    prop_oneof![Just(0.10), Just(0.05), Just(0.02), Just(0.01)]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn renormalizing_is_a_no_op(bands in arb_bandset(), step in arb_step()) {
        let r = Rebucketer::new(step);
        let once = r.rebucket(&bands).unwrap();
        let twice = r.rebucket(&once).unwrap();
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn cells_tile_the_input_range(bands in arb_bandset(), step in arb_step()) {
        let (min, max) = bands.price_range().unwrap();
        let out = Rebucketer::new(step).rebucket(&bands).unwrap();
        let first = out.bands().first().unwrap();
        let last = out.bands().last().unwrap();
        prop_assert_eq!(first.lower, grid_floor(min, step, 2));
        prop_assert!(first.lower <= min);
        prop_assert!(last.lower < max);
        prop_assert!(last.upper >= max - 1e-9);
        for w in out.bands().windows(2) {
            prop_assert_eq!(w[0].upper, w[1].lower);
        }
        for cell in &out {
            prop_assert!((cell.width() - step).abs() < 1e-6);
        }
    }

    #[test]
    fn values_are_copied_from_an_intersecting_source(bands in arb_bandset(), step in arb_step()) {
        let out = Rebucketer::new(step).rebucket(&bands).unwrap();
        for cell in &out {
            for (key, point) in &cell.curves {
                if !point.is_present() {
                    continue;
                }
                let found = bands.iter().any(|src| {
                    src.point(key) == Some(point)
                        && src.overlap(cell.lower, cell.upper) > 0.0
                });
                prop_assert!(found, "{key} at [{}, {}) has no source", cell.lower, cell.upper);
            }
        }
    }

    #[test]
    fn covered_cells_never_lose_a_curve(bands in arb_bandset(), step in arb_step()) {
        let out = Rebucketer::new(step).rebucket(&bands).unwrap();
        for src in &bands {
            for key in src.curves.keys().filter(|k| src.defines(k)) {
                for cell in out.iter().filter(|c| src.overlap(c.lower, c.upper) > 0.0) {
                    prop_assert!(cell.defines(key));
                }
            }
        }
    }

    #[test]
    fn source_order_does_not_change_the_result(bands in arb_bandset(), step in arb_step()) {
        let reversed: BandSet = bands.iter().rev().cloned().collect();
        let r = Rebucketer::new(step);
        prop_assert_eq!(r.rebucket(&bands).unwrap(), r.rebucket(&reversed).unwrap());
    }

    #[test]
    fn finer_views_have_at_least_as_many_cells(bands in arb_bandset()) {
        let p = ViewPipeline::new();
        let coarse = p.apply(View::Normalized, &bands).unwrap();
        let complete = p.apply(View::Complete, &bands).unwrap();
        prop_assert!(complete.len() >= coarse.len());
    }

    #[test]
    fn overlap_filter_splits_on_present_count(bands in arb_bandset()) {
        let unfiltered = Rebucketer::new(0.05).rebucket(&bands).unwrap();
        let kept = overlap_filter(&unfiltered, 2);
        for b in &kept {
            prop_assert!(b.present_count() >= 2);
        }
        let removed = unfiltered.iter().filter(|b| !kept.bands().contains(b));
        for b in removed {
            prop_assert!(b.present_count() < 2);
        }
        prop_assert_eq!(
            kept.len(),
            unfiltered.iter().filter(|b| b.present_count() >= 2).count()
        );
    }
}
