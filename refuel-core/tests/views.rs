use std::sync::Arc;

use refuel_core::{ObservedEvent, RecordingObserver, ViewPipeline};
use refuel_mock::MockSource;
use refuel_types::{Band, BandSet, CurveKey, RefuelConfig, View};

fn us_measured() -> BandSet {
    MockSource::new()
        .measured(refuel_mock::US, refuel_mock::GROUND)
        .unwrap()
}

#[test]
fn raw_is_identity() {
    let input = us_measured();
    let out = ViewPipeline::new().apply(View::Raw, &input).unwrap();
    assert_eq!(out, input);
}

#[test]
fn unknown_names_fall_back_to_raw() {
    let input = us_measured();
    let p = ViewPipeline::new();
    assert_eq!(p.apply_named("sideways", &input).unwrap(), input);
    assert_eq!(p.apply_named("", &input).unwrap(), input);
    assert_eq!(
        p.apply_named("normalized@0.10", &input).unwrap(),
        p.apply(View::Normalized, &input).unwrap()
    );
}

#[test]
fn every_view_maps_empty_to_empty() {
    let p = ViewPipeline::new();
    for view in View::ALL {
        assert!(p.apply(view, &BandSet::empty()).unwrap().is_empty(), "{view}");
    }
}

#[test]
fn normalized_views_use_their_step_width() {
    let input = us_measured();
    let p = ViewPipeline::new();
    for (view, step) in [
        (View::Normalized, 0.10),
        (View::NormalizedFine, 0.02),
        (View::Complete, 0.01),
    ] {
        let out = p.apply(view, &input).unwrap();
        assert!(!out.is_empty());
        for cell in &out {
            assert!((cell.width() - step).abs() < 1e-9, "{view}: {}", cell.width());
        }
    }
}

#[test]
fn overlap_view_keeps_only_shared_intervals() {
    let a = CurveKey::carrier("A");
    let b = CurveKey::carrier("B");
    let input: BandSet = vec![
        Band::new(1.0, 1.5).with_value(a.clone(), 1.0),
        Band::new(1.5, 2.0)
            .with_value(a.clone(), 2.0)
            .with_value(b.clone(), 3.0),
        Band::new(2.0, 2.5).with_value(b, 4.0),
    ]
    .into();
    let out = ViewPipeline::new().apply(View::Overlap, &input).unwrap();
    assert_eq!(out.len(), 1);
    assert_eq!((out.bands()[0].lower, out.bands()[0].upper), (1.5, 2.0));
}

#[test]
fn comparable_is_a_filtered_five_cent_grid() {
    let input = us_measured();
    let p = ViewPipeline::new();
    let grid = p.rebucketer(0.05).rebucket(&input).unwrap();
    let out = p.apply(View::Comparable, &input).unwrap();
    assert!(out.len() < grid.len());
    assert!(out.iter().all(|b| b.present_count() >= 2));
    assert!(out.iter().all(|b| grid.bands().contains(b)));
}

#[test]
fn overlap_threshold_is_configurable() {
    let input = us_measured();
    let cfg = RefuelConfig {
        min_overlap_curves: 3,
        ..RefuelConfig::default()
    };
    let out = ViewPipeline::from_config(&cfg)
        .apply(View::Comparable, &input)
        .unwrap();
    assert!(!out.is_empty());
    assert!(out.iter().all(|b| b.present_count() == 3));
}

#[test]
fn observer_sees_every_cell_and_dispatch() {
    let rec = Arc::new(RecordingObserver::new());
    let p = ViewPipeline::new().with_observer(rec.clone());
    let input = us_measured();
    let out = p.apply(View::Normalized, &input).unwrap();

    let events = rec.events();
    let cells = events
        .iter()
        .filter(|e| matches!(e, ObservedEvent::Cell { .. }))
        .count();
    assert_eq!(cells, out.len() * 3);
    assert_eq!(
        events.last(),
        Some(&ObservedEvent::View(refuel_core::ViewDispatch {
            view: View::Normalized,
            input_bands: input.len(),
            output_bands: out.len(),
        }))
    );

    rec.clear();
    let _ = p.apply(View::Raw, &input).unwrap();
    assert_eq!(rec.events().len(), 1);
}

#[test]
fn pipeline_is_deterministic() {
    let input = us_measured();
    let p = ViewPipeline::new();
    for view in View::ALL {
        assert_eq!(p.apply(view, &input).unwrap(), p.apply(view, &input).unwrap());
    }
}
