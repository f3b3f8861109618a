use std::sync::Arc;

use refuel_core::{ObservedEvent, RecordingObserver, Rebucketer, UnitConverter};
use refuel_types::{Band, BandSet, ConversionFactor, CurveKey, CurvePoint};

fn factor(f: f64) -> UnitConverter {
    UnitConverter::new(ConversionFactor::new(f).unwrap())
}

#[test]
fn boundaries_and_values_round_to_two_decimals() {
    let a = CurveKey::carrier("A");
    let input: BandSet = vec![Band::new(1.0, 2.0).with_value(a.clone(), 10.0)].into();
    let out = factor(0.243).convert_all(&input);
    let band = &out.bands()[0];
    assert_eq!((band.lower, band.upper), (0.24, 0.49));
    assert_eq!(band.value(&a), Some(2.43));
}

#[test]
fn flags_and_absent_values_survive() {
    let a = CurveKey::carrier("A");
    let b = CurveKey::carrier("B");
    let input: BandSet = vec![
        Band::new(2.0, 3.0)
            .with_curve(a.clone(), CurvePoint::extrapolated(10.0))
            .with_curve(b.clone(), CurvePoint::absent()),
    ]
    .into();
    let out = factor(2.0).convert_all(&input);
    assert_eq!(out.bands()[0].point(&a), Some(&CurvePoint::extrapolated(20.0)));
    assert_eq!(out.bands()[0].point(&b), Some(&CurvePoint::absent()));
}

#[test]
fn round_trip_through_inverse_is_lossy() {
    let a = CurveKey::carrier("A");
    let input: BandSet = vec![Band::new(1.0, 2.0).with_value(a, 10.0)].into();
    let f = ConversionFactor::new(0.243).unwrap();
    let there = UnitConverter::new(f).convert_all(&input);
    let back = UnitConverter::new(f.inverse()).convert_all(&there);
    assert_ne!(back, input);
    let band = &back.bands()[0];
    assert!((band.lower - 1.0).abs() <= 0.05);
    assert!((band.upper - 2.0).abs() <= 0.05);
}

#[test]
fn collapsed_intervals_are_dropped() {
    let a = CurveKey::carrier("A");
    let input: BandSet = vec![
        Band::new(1.0, 1.01).with_value(a.clone(), 1.0),
        Band::new(1.01, 2.0).with_value(a, 2.0),
    ]
    .into();
    // 1.0 * 0.1 and 1.01 * 0.1 both round to 0.10
    let out = factor(0.1).convert_all(&input);
    assert_eq!(out.len(), 1);
    assert_eq!((out.bands()[0].lower, out.bands()[0].upper), (0.1, 0.2));
}

#[test]
fn only_selected_curves_are_converted() {
    let dhl = CurveKey::carrier("DHL");
    let ups = CurveKey::carrier("UPS");
    let input: BandSet = vec![
        Band::new(5.0, 5.2).with_value(dhl.clone(), 15.5),
        Band::new(1.2, 1.25)
            .with_value(ups.clone(), 16.0)
            .with_curve(dhl.clone(), CurvePoint::absent()),
        Band::new(5.2, 5.4)
            .with_value(dhl.clone(), 15.8)
            .with_value(ups.clone(), 17.0),
    ]
    .into();
    let rec = RecordingObserver::new();
    let out = factor(0.5).convert_curves_observed(&input, std::slice::from_ref(&dhl), &rec);

    assert_eq!(out.len(), 4);
    // whole band rescaled
    assert_eq!((out.bands()[0].lower, out.bands()[0].upper), (2.5, 2.6));
    assert_eq!(out.bands()[0].value(&dhl), Some(7.75));
    // only an absent converted column: untouched
    assert_eq!(out.bands()[1], input.bands()[1]);
    // mixed band split: native part first, converted part after it
    assert_eq!((out.bands()[2].lower, out.bands()[2].upper), (5.2, 5.4));
    assert_eq!(out.bands()[2].value(&ups), Some(17.0));
    assert!(out.bands()[2].point(&dhl).is_none());
    assert_eq!((out.bands()[3].lower, out.bands()[3].upper), (2.6, 2.7));
    assert_eq!(out.bands()[3].value(&dhl), Some(7.9));
    assert!(out.bands()[3].point(&ups).is_none());

    assert_eq!(
        rec.events(),
        vec![ObservedEvent::Conversion {
            curves: vec![dhl],
            factor: 0.5,
            converted: 1,
            split: 1,
            collapsed: 0,
        }]
    );
}

#[test]
fn bands_with_only_absent_columns_keep_every_column() {
    let dhl = CurveKey::carrier("DHL");
    let ups = CurveKey::carrier("UPS");
    let input: BandSet = vec![
        Band::new(3.0, 3.2)
            .with_curve(dhl.clone(), CurvePoint::absent())
            .with_curve(ups.clone(), CurvePoint::absent()),
        Band::new(3.2, 3.4).with_value(dhl.clone(), 12.0),
    ]
    .into();
    let rec = RecordingObserver::new();
    let out = factor(0.5).convert_curves_observed(&input, std::slice::from_ref(&dhl), &rec);

    assert_eq!(out.len(), 2);
    assert_eq!(out.bands()[0], input.bands()[0]);
    assert_eq!(out.bands()[0].point(&ups), Some(&CurvePoint::absent()));
    assert_eq!((out.bands()[1].lower, out.bands()[1].upper), (1.6, 1.7));
    assert!(matches!(
        rec.events().as_slice(),
        [ObservedEvent::Conversion { converted: 1, split: 0, collapsed: 0, .. }]
    ));
}

#[test]
fn converting_before_rebucketing_changes_the_winner() {
    let a = CurveKey::carrier("A");
    // two halves of the same 0.10 cell: a coverage tie
    let input: BandSet = vec![
        Band::new(1.0, 1.05).with_value(a.clone(), 10.0),
        Band::new(1.05, 1.1).with_value(a.clone(), 20.0),
    ]
    .into();
    let usd_to_eur = UnitConverter::new(ConversionFactor::usd_to_eur());
    let grid = Rebucketer::new(0.1);

    let after = usd_to_eur.convert_all(&grid.rebucket(&input).unwrap());
    let before = grid.rebucket(&usd_to_eur.convert_all(&input)).unwrap();

    // tie resolved on the cell start: the first half wins everywhere
    assert_eq!(after.len(), 1);
    assert_eq!(after.bands()[0].value(&a), Some(8.7));
    // 1.05 * 0.87 rounds down to 0.91, so the second half now dominates a cell
    assert_ne!(after, before);
    assert!(before.iter().any(|b| b.value(&a) == Some(17.4)));
}

#[test]
fn observer_is_optional() {
    let a = CurveKey::carrier("A");
    let input: BandSet = vec![Band::new(1.0, 2.0).with_value(a.clone(), 10.0)].into();
    let rec = Arc::new(RecordingObserver::new());
    let observed =
        factor(0.5).convert_curves_observed(&input, std::slice::from_ref(&a), rec.as_ref());
    assert_eq!(observed, factor(0.5).convert_curves(&input, &[a]));
    assert_eq!(rec.events().len(), 1);
}
