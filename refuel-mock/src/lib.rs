//! Deterministic surcharge datasets for tests and examples.
//!
//! Datasets are addressed like the production data source: by market and fuel
//! category. Unknown combinations return `None`.

use refuel_types::{
    BandSet, ComparisonContext, ConversionFactor, CurveKey, SurchargeRow, UnitScope, UnitTable,
};

mod fixtures;

pub use fixtures::historical::PREVIOUS_VERSION;

/// Market of the US fixtures.
pub const US: &str = "US";
/// Market of the German fixtures.
pub const DE: &str = "DE";
/// Fuel category of the US fixtures.
pub const GROUND: &str = "ground";
/// Fuel category of the German fixtures.
pub const GROUND_DOMESTIC: &str = "ground_domestic";
/// Category holding UPS curve revisions.
pub const GROUND_HISTORY: &str = "ground_history";

/// Mock data source serving static fixtures.
#[derive(Debug, Clone, Copy, Default)]
pub struct MockSource;

impl MockSource {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Long-format rows in priority order: measured first, extrapolated after.
    #[must_use]
    pub fn row_series(&self, market: &str, category: &str) -> Option<Vec<Vec<SurchargeRow>>> {
        match (market, category) {
            (US, GROUND) => Some(vec![
                fixtures::us_ground::measured(),
                fixtures::us_ground::dhl_extrapolated(),
            ]),
            (US, GROUND_HISTORY) => Some(vec![fixtures::historical::all()]),
            (DE, GROUND_DOMESTIC) => Some(vec![fixtures::de_ground::measured()]),
            _ => None,
        }
    }

    /// Measured rows only, pivoted into bands.
    #[must_use]
    pub fn measured(&self, market: &str, category: &str) -> Option<BandSet> {
        self.row_series(market, category)
            .and_then(|series| series.into_iter().next())
            .map(BandSet::from_rows)
    }

    /// Rows of one curve, measured and extrapolated, in that order.
    #[must_use]
    pub fn curve_rows(&self, market: &str, category: &str, curve: &CurveKey) -> Vec<SurchargeRow> {
        self.row_series(market, category)
            .into_iter()
            .flatten()
            .flatten()
            .filter(|r| &r.curve == curve)
            .collect()
    }

    /// Unit table matching the fixtures: German DHL rows are USD/gallon and
    /// display as EUR/liter.
    #[must_use]
    pub fn unit_table(&self) -> UnitTable {
        UnitTable::new().with(
            UnitScope::new(DE, "DHL", GROUND_DOMESTIC),
            ConversionFactor::usd_per_gallon_to_eur_per_liter(),
        )
    }
}

/// Request context of the US fixtures.
#[must_use]
pub fn us_ground() -> ComparisonContext {
    ComparisonContext::new(US, GROUND)
}

/// Request context of the German fixtures.
#[must_use]
pub fn de_ground_domestic() -> ComparisonContext {
    ComparisonContext::new(DE, GROUND_DOMESTIC)
}
