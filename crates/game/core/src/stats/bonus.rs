//! Labelled bonus sources and their totals.
//!
//! A [`BonusSource`] is one contributor (a tag, a cyber-mod) with the amounts
//! it adds per stat. The character sheet lists sources individually and shows
//! their sum from [`sum_sources`].

use std::collections::BTreeMap;

/// One named contributor and the amounts it adds.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BonusSource<K: Ord> {
    pub label: String,
    pub values: BTreeMap<K, f64>,
}

impl<K: Ord> BonusSource<K> {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            values: BTreeMap::new(),
        }
    }

    /// Adds `amount` to `key`. Zero and non-finite amounts are ignored.
    pub fn add(&mut self, key: K, amount: f64) {
        if amount.is_finite() && amount != 0.0 {
            *self.values.entry(key).or_insert(0.0) += amount;
        }
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, key: &K) -> f64 {
        self.values.get(key).copied().unwrap_or(0.0)
    }
}

/// Per-stat totals across sources.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatTotals<K: Ord> {
    values: BTreeMap<K, f64>,
}

impl<K: Ord> StatTotals<K> {
    pub fn get(&self, key: &K) -> f64 {
        self.values.get(key).copied().unwrap_or(0.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, f64)> {
        self.values.iter().map(|(k, v)| (k, *v))
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K: Ord> Default for StatTotals<K> {
    fn default() -> Self {
        Self {
            values: BTreeMap::new(),
        }
    }
}

/// Sums every finite value across `sources`.
pub fn sum_sources<K: Ord + Copy>(sources: &[BonusSource<K>]) -> StatTotals<K> {
    let mut totals = StatTotals::default();
    for (key, value) in sources.iter().flat_map(|s| s.values.iter()) {
        if value.is_finite() {
            *totals.values.entry(*key).or_insert(0.0) += value;
        }
    }
    totals
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::Attribute;

    #[test]
    fn add_skips_zero_and_non_finite() {
        let mut source = BonusSource::new("Gorilla Arms");
        source.add(Attribute::Body, 0.0);
        source.add(Attribute::Body, f64::NAN);
        assert!(source.is_empty());
        source.add(Attribute::Body, 2.0);
        source.add(Attribute::Body, 1.0);
        assert_eq!(source.get(&Attribute::Body), 3.0);
    }

    #[test]
    fn sum_skips_non_finite_entries() {
        let mut a = BonusSource::new("a");
        a.add(Attribute::Cool, 2.0);
        let mut b = BonusSource::new("b");
        b.add(Attribute::Cool, 3.0);
        b.values.insert(Attribute::Skill, f64::INFINITY);

        let totals = sum_sources(&[a, b]);
        assert_eq!(totals.get(&Attribute::Cool), 5.0);
        assert_eq!(totals.get(&Attribute::Skill), 0.0);
    }
}
