use std::sync::Arc;

use refuel::{CurveKey, Refuel, TracingObserver, View};
use refuel_mock::MockSource;
use tracing_subscriber::fmt::format::FmtSpan;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Suggested: RUST_LOG=info,refuel=debug,refuel_core=debug
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .with_span_events(FmtSpan::ENTER | FmtSpan::EXIT)
        .try_init();

    let source = MockSource::new();
    let refuel = Refuel::builder()
        .units(source.unit_table())
        .observer(Arc::new(TracingObserver))
        .build()?;

    // US: three carriers on misaligned bands, DHL with an extrapolated tail
    let us = refuel_mock::us_ground();
    let series = source
        .row_series(&us.market, &us.category)
        .ok_or("no US fixtures")?;
    for view in View::ALL {
        let report = refuel.compare_rows(series.clone(), view, &us)?;
        println!(
            "{:<16} {:>4} rows, curves: {}",
            view.name(),
            report.total_rows,
            report
                .curves
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ")
        );
    }

    // Where is FedEx the cheapest carrier?
    let bands = refuel::merge_rows_by_priority(series);
    let fedex = CurveKey::carrier("FedEx");
    let focus = refuel.carrier_focus(&bands, &fedex, &us)?;
    println!("{fedex} cheapest in {} cells:", focus.total_competitive);
    for band in &focus.competitive {
        println!("  {}", band.range_label("$"));
    }

    // DE: DHL publishes in USD/gallon and is shown in EUR/liter
    let de = refuel_mock::de_ground_domestic();
    let bands = source
        .measured(&de.market, &de.category)
        .ok_or("no DE fixtures")?;
    let report = refuel.compare(&bands, View::Raw, &de)?;
    for band in &report.bands {
        let values: Vec<String> = band
            .curves
            .iter()
            .filter_map(|(k, p)| p.value.map(|v| format!("{k}={v:.2}%")))
            .collect();
        println!("  {:<14} {}", band.range_label("€"), values.join(" "));
    }

    Ok(())
}
