//! Curve identifiers and per-curve readings.

use std::fmt;
use std::str::FromStr;

use serde::de::{self, Visitor};
use serde::{Deserialize, Serialize};

use crate::error::RefuelError;

/// Identifies one named step function: a carrier plus an optional version.
///
/// The version discriminates historical curves of the same carrier (for example
/// a curve-version id or an effective-date label). Keys order by carrier first,
/// with the unversioned (current) curve before any versioned one, which gives
/// registries and reports a stable column order.
///
/// The textual form is `carrier` or `carrier:version`; it is also the serde
/// representation so keys can be used as JSON object keys. The first `:`
/// separates the version, so a carrier must not contain one. Use
/// [`CurveKey::try_carrier`] or [`CurveKey::try_versioned`] for untrusted input.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CurveKey {
    carrier: String,
    version: Option<String>,
}

impl CurveKey {
    /// Key for the current curve of a carrier.
    ///
    /// `carrier` must not contain `:`; such a key does not survive a
    /// text or serde round trip and fails to serialize.
    pub fn carrier(carrier: impl Into<String>) -> Self {
        Self {
            carrier: carrier.into(),
            version: None,
        }
    }

    /// Key for a historical (or otherwise discriminated) curve of a carrier.
    pub fn versioned(carrier: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            carrier: carrier.into(),
            version: Some(version.into()),
        }
    }

    /// Checked form of [`CurveKey::carrier`].
    ///
    /// # Errors
    /// Returns `InvalidArg` if the carrier is empty or contains `:`.
    pub fn try_carrier(carrier: impl Into<String>) -> Result<Self, RefuelError> {
        let carrier = carrier.into();
        check_carrier(&carrier)?;
        Ok(Self::carrier(carrier))
    }

    /// Checked form of [`CurveKey::versioned`].
    ///
    /// # Errors
    /// Returns `InvalidArg` if the carrier is empty or contains `:`, or if the
    /// version is empty.
    pub fn try_versioned(
        carrier: impl Into<String>,
        version: impl Into<String>,
    ) -> Result<Self, RefuelError> {
        let (carrier, version) = (carrier.into(), version.into());
        check_carrier(&carrier)?;
        if version.trim().is_empty() {
            return Err(RefuelError::InvalidArg(format!(
                "curve key for '{carrier}' has an empty version"
            )));
        }
        Ok(Self::versioned(carrier, version))
    }

    /// Carrier identifier.
    #[must_use]
    pub fn carrier_name(&self) -> &str {
        &self.carrier
    }

    /// Version discriminator, if any.
    #[must_use]
    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }
}

fn check_carrier(carrier: &str) -> Result<(), RefuelError> {
    if carrier.trim().is_empty() {
        return Err(RefuelError::InvalidArg(
            "curve key has an empty carrier".to_string(),
        ));
    }
    if carrier.contains(':') {
        return Err(RefuelError::InvalidArg(format!(
            "carrier '{carrier}' must not contain ':'"
        )));
    }
    Ok(())
}

impl fmt::Display for CurveKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.version {
            Some(v) => write!(f, "{}:{v}", self.carrier),
            None => f.write_str(&self.carrier),
        }
    }
}

impl FromStr for CurveKey {
    type Err = RefuelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (carrier, version) = match s.split_once(':') {
            Some((c, v)) => (c.trim(), Some(v.trim())),
            None => (s, None),
        };
        match version {
            Some(v) => Self::try_versioned(carrier, v),
            None => Self::try_carrier(carrier),
        }
    }
}

impl Serialize for CurveKey {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        check_carrier(&self.carrier).map_err(serde::ser::Error::custom)?;
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for CurveKey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct KeyVisitor;
        impl Visitor<'_> for KeyVisitor {
            type Value = CurveKey;
            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                write!(f, "a curve key string such as \"UPS\" or \"UPS:2025-06-15\"")
            }
            fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                v.parse().map_err(E::custom)
            }
        }
        deserializer.deserialize_str(KeyVisitor)
    }
}

/// The reading of one curve inside one band.
///
/// `value` is `None` when the carrier published nothing for the interval.
/// `extrapolated` marks values that were synthetically derived rather than
/// scraped; it is independent of whether a value is present.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CurvePoint {
    /// Surcharge percentage, if published.
    pub value: Option<f64>,
    /// Whether the value was synthetically derived.
    #[serde(default)]
    pub extrapolated: bool,
}

impl CurvePoint {
    /// A measured (scraped) value.
    #[must_use]
    pub const fn measured(value: f64) -> Self {
        Self {
            value: Some(value),
            extrapolated: false,
        }
    }

    /// A synthetically derived value.
    #[must_use]
    pub const fn extrapolated(value: f64) -> Self {
        Self {
            value: Some(value),
            extrapolated: true,
        }
    }

    /// No published value.
    #[must_use]
    pub const fn absent() -> Self {
        Self {
            value: None,
            extrapolated: false,
        }
    }

    /// True when a value is present.
    #[must_use]
    pub const fn is_present(&self) -> bool {
        self.value.is_some()
    }
}
