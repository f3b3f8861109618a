//! Discovery of the curve columns present in a band set.

use std::collections::BTreeSet;

use refuel_types::{BandSet, CurveKey};

/// Ordered, de-duplicated set of curve keys found anywhere in a band set.
///
/// Every band is scanned because sparse curves (historical versions, carriers
/// with a narrow published range) may be missing from the first intervals.
/// A key counts as present when its column exists, even if every value is absent.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CurveColumnRegistry {
    keys: Vec<CurveKey>,
}

impl CurveColumnRegistry {
    /// Scan `bands` and collect their curve keys in `CurveKey` order.
    #[must_use]
    pub fn from_bands(bands: &BandSet) -> Self {
        let keys: BTreeSet<&CurveKey> = bands.iter().flat_map(|b| b.curves.keys()).collect();
        Self {
            keys: keys.into_iter().cloned().collect(),
        }
    }

    /// Keys in stable order.
    #[must_use]
    pub fn keys(&self) -> &[CurveKey] {
        &self.keys
    }

    /// Iterate keys in stable order.
    pub fn iter(&self) -> std::slice::Iter<'_, CurveKey> {
        self.keys.iter()
    }

    /// True when `key` was found.
    #[must_use]
    pub fn contains(&self, key: &CurveKey) -> bool {
        self.keys.binary_search(key).is_ok()
    }

    /// Number of distinct keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// True when no curve was found.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Consume into the ordered key list.
    #[must_use]
    pub fn into_keys(self) -> Vec<CurveKey> {
        self.keys
    }
}

impl<'a> IntoIterator for &'a CurveColumnRegistry {
    type Item = &'a CurveKey;
    type IntoIter = std::slice::Iter<'a, CurveKey>;

    fn into_iter(self) -> Self::IntoIter {
        self.keys.iter()
    }
}
