use std::collections::BTreeMap;

use refuel_mock::{DE, GROUND, GROUND_DOMESTIC, GROUND_HISTORY, MockSource, US};
use refuel_types::{CurveKey, SurchargeRow};

fn by_curve(rows: &[SurchargeRow]) -> BTreeMap<CurveKey, Vec<&SurchargeRow>> {
    let mut out: BTreeMap<CurveKey, Vec<&SurchargeRow>> = BTreeMap::new();
    for r in rows {
        out.entry(r.curve.clone()).or_default().push(r);
    }
    out
}

#[test]
fn every_series_is_contiguous_per_curve() {
    let src = MockSource::new();
    for (market, category) in [(US, GROUND), (US, GROUND_HISTORY), (DE, GROUND_DOMESTIC)] {
        for series in src.row_series(market, category).unwrap() {
            for (curve, rows) in by_curve(&series) {
                for w in rows.windows(2) {
                    assert_eq!(w[0].upper, w[1].lower, "{market}/{category} {curve}");
                }
                assert!(rows.iter().all(|r| r.lower < r.upper));
            }
        }
    }
}

#[test]
fn measured_bands_validate() {
    let src = MockSource::new();
    let us = src.measured(US, GROUND).unwrap();
    assert!(us.validate().is_ok());
    assert_eq!(us.price_range(), Some((2.0, 4.0)));
    assert!(src.measured(US, "air").is_none());
}

#[test]
fn extrapolated_rows_are_flagged() {
    let rows = MockSource::new().curve_rows(US, GROUND, &CurveKey::carrier("DHL"));
    assert_eq!(rows.iter().filter(|r| r.extrapolated).count(), 5);
    assert!(rows.iter().take(8).all(|r| !r.extrapolated));
}

#[test]
fn unit_table_covers_german_dhl_only() {
    let t = MockSource::new().unit_table();
    assert_eq!(t.len(), 1);
    assert!(t.factor_for(DE, "DHL", GROUND_DOMESTIC).is_some());
    assert!(t.factor_for(DE, "UPS", GROUND_DOMESTIC).is_none());
    assert!(t.factor_for(US, "DHL", GROUND).is_none());
}
