//! Display-unit conversion factors and the per-scope unit table.

use serde::{Deserialize, Serialize};

use crate::error::RefuelError;

/// A positive, finite scale applied to band boundaries and values.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct ConversionFactor(f64);

impl ConversionFactor {
    /// Fixed USD → EUR rate.
    pub const USD_TO_EUR_RATE: f64 = 0.87;
    /// Fixed EUR → USD rate.
    pub const EUR_TO_USD_RATE: f64 = 1.0 / Self::USD_TO_EUR_RATE;
    /// Liters per US gallon.
    pub const GALLON_TO_LITER: f64 = 3.785_41;

    /// Identity factor.
    pub const IDENTITY: Self = Self(1.0);

    /// Validate and wrap a factor.
    ///
    /// # Errors
    /// Returns `RefuelError::InvalidFactor` unless `factor` is finite and `> 0`.
    pub fn new(factor: f64) -> Result<Self, RefuelError> {
        if factor.is_finite() && factor > 0.0 {
            Ok(Self(factor))
        } else {
            Err(RefuelError::invalid_factor(factor))
        }
    }

    /// USD amounts displayed as EUR.
    #[must_use]
    pub const fn usd_to_eur() -> Self {
        Self(Self::USD_TO_EUR_RATE)
    }

    /// EUR amounts displayed as USD.
    #[must_use]
    pub const fn eur_to_usd() -> Self {
        Self(Self::EUR_TO_USD_RATE)
    }

    /// Per-gallon prices displayed per liter.
    #[must_use]
    pub const fn per_gallon_to_per_liter() -> Self {
        Self(1.0 / Self::GALLON_TO_LITER)
    }

    /// USD/gallon prices displayed as EUR/liter.
    #[must_use]
    pub const fn usd_per_gallon_to_eur_per_liter() -> Self {
        Self(Self::USD_TO_EUR_RATE / Self::GALLON_TO_LITER)
    }

    /// Raw factor.
    #[must_use]
    pub const fn get(self) -> f64 {
        self.0
    }

    /// Factor undoing this one.
    #[must_use]
    pub fn inverse(self) -> Self {
        Self(1.0 / self.0)
    }

    /// True for the exact identity factor.
    #[must_use]
    pub fn is_identity(self) -> bool {
        self.0 == 1.0
    }
}

impl TryFrom<f64> for ConversionFactor {
    type Error = RefuelError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ConversionFactor> for f64 {
    fn from(f: ConversionFactor) -> Self {
        f.0
    }
}

/// Lookup key for a conversion: market, carrier and fuel category.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UnitScope {
    /// Market/country code, e.g. `"DE"`.
    pub market: String,
    /// Carrier identifier, matched against `CurveKey::carrier_name`.
    pub carrier: String,
    /// Fuel category, e.g. `"ground_domestic"`.
    pub category: String,
}

impl UnitScope {
    /// Build a scope from its three parts.
    pub fn new(
        market: impl Into<String>,
        carrier: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            market: market.into(),
            carrier: carrier.into(),
            category: category.into(),
        }
    }
}

/// One `(scope, factor)` mapping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct UnitEntry {
    scope: UnitScope,
    factor: ConversionFactor,
}

/// `(market, carrier, category) → factor` mappings supplied by configuration.
///
/// The table does no unit reasoning of its own: a missing entry means the curve
/// is already in the display unit.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UnitTable {
    entries: Vec<UnitEntry>,
}

impl UnitTable {
    /// Empty table.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Insert or replace the factor for a scope.
    pub fn insert(&mut self, scope: UnitScope, factor: ConversionFactor) {
        if let Some(e) = self.entries.iter_mut().find(|e| e.scope == scope) {
            e.factor = factor;
        } else {
            self.entries.push(UnitEntry { scope, factor });
        }
    }

    /// Builder-style insert.
    #[must_use]
    pub fn with(mut self, scope: UnitScope, factor: ConversionFactor) -> Self {
        self.insert(scope, factor);
        self
    }

    /// Factor registered for the exact scope, if any.
    #[must_use]
    pub fn factor_for(
        &self,
        market: &str,
        carrier: &str,
        category: &str,
    ) -> Option<ConversionFactor> {
        self.entries
            .iter()
            .map(|e| (&e.scope, e.factor))
            .find(|(s, _)| s.market == market && s.carrier == carrier && s.category == category)
            .map(|(_, factor)| factor)
    }

    /// Number of mappings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no mappings are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
