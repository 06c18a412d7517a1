//! Cyber-mod catalog entries.

use std::collections::BTreeMap;

use super::effect::{EffectSet, RawEffects};
use crate::character::system_key;

/// One installable modification.
///
/// `effects` and `base_effects` are always active once installed. A tier entry
/// is active only when the installed tier label matches it.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CyberMod {
    pub id: String,
    pub name: String,
    pub desc: Option<String>,
    pub effects: RawEffects,
    pub base_effects: RawEffects,
    pub tiers: BTreeMap<String, RawEffects>,
}

impl CyberMod {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_effects(mut self, effects: RawEffects) -> Self {
        self.effects = effects;
        self
    }

    #[must_use]
    pub fn with_base_effects(mut self, effects: RawEffects) -> Self {
        self.base_effects = effects;
        self
    }

    #[must_use]
    pub fn with_tier(mut self, label: impl Into<String>, effects: RawEffects) -> Self {
        self.tiers.insert(label.into(), effects);
        self
    }

    /// Display name, falling back to the id.
    pub fn label(&self) -> &str {
        if self.name.trim().is_empty() {
            &self.id
        } else {
            &self.name
        }
    }

    /// True when `ident` names this modification by id or name, exactly or
    /// after normalization.
    pub fn matches(&self, ident: &str) -> bool {
        if ident == self.id || ident == self.name {
            return true;
        }
        let wanted = system_key(ident);
        !wanted.is_empty() && (wanted == system_key(&self.id) || wanted == system_key(&self.name))
    }

    /// Tier entry for `label`, trying the exact label then its canonical
    /// numeric form (`"03"` finds `"3"`).
    pub fn tier(&self, label: &str) -> Option<&RawEffects> {
        let label = label.trim();
        if label.is_empty() {
            return None;
        }
        self.tiers
            .get(label)
            .or_else(|| canonical_tier(label).and_then(|canonical| self.tiers.get(&canonical)))
    }

    /// Merged effect bag: `effects`, then `base_effects`, then the matching
    /// tier. Later layers override earlier keys.
    pub fn resolve_raw(&self, tier: Option<&str>) -> RawEffects {
        let mut merged = self.effects.clone();
        merged.extend(
            self.base_effects
                .iter()
                .map(|(k, v)| (k.clone(), v.clone())),
        );
        if let Some(tier_effects) = tier.and_then(|label| self.tier(label)) {
            merged.extend(tier_effects.iter().map(|(k, v)| (k.clone(), v.clone())));
        }
        merged
    }

    pub fn resolve_effects(&self, tier: Option<&str>) -> EffectSet {
        EffectSet::from_raw(&self.resolve_raw(tier))
    }
}

/// Numeric canonical form of a tier label, if it is a number.
fn canonical_tier(label: &str) -> Option<String> {
    let value = label.parse::<f64>().ok().filter(|v| v.is_finite())?;
    let canonical = if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    };
    (canonical != label).then_some(canonical)
}

/// A body system and the modifications that fit it.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CyberSystem {
    pub system: String,
    pub slots: u32,
    pub mods: Vec<CyberMod>,
}

impl CyberSystem {
    pub const DEFAULT_SLOTS: u32 = 1;

    pub fn new(system: impl Into<String>) -> Self {
        Self {
            system: system.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_slots(mut self, slots: u32) -> Self {
        self.slots = slots;
        self
    }

    #[must_use]
    pub fn with_mod(mut self, cyber_mod: CyberMod) -> Self {
        self.mods.push(cyber_mod);
        self
    }

    pub fn key(&self) -> String {
        system_key(&self.system)
    }

    pub fn find(&self, ident: &str) -> Option<&CyberMod> {
        self.mods.iter().find(|m| m.matches(ident))
    }
}

impl Default for CyberSystem {
    fn default() -> Self {
        Self {
            system: String::new(),
            slots: Self::DEFAULT_SLOTS,
            mods: Vec::new(),
        }
    }
}

/// All body systems, indexed by normalized system key.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CyberCatalog {
    systems: Vec<CyberSystem>,
    index: BTreeMap<String, usize>,
}

impl CyberCatalog {
    pub fn new(systems: impl IntoIterator<Item = CyberSystem>) -> Self {
        let mut catalog = Self::default();
        for system in systems {
            catalog.insert(system);
        }
        catalog
    }

    /// Adds a system. A system with the same key replaces the earlier one.
    pub fn insert(&mut self, system: CyberSystem) {
        let key = system.key();
        match self.index.get(&key) {
            Some(&slot) => self.systems[slot] = system,
            None => {
                self.index.insert(key, self.systems.len());
                self.systems.push(system);
            }
        }
    }

    /// Looks a system up by any spelling that normalizes to its key.
    pub fn system(&self, name: &str) -> Option<&CyberSystem> {
        self.index
            .get(&system_key(name))
            .map(|&slot| &self.systems[slot])
    }

    pub fn find(&self, system: &str, ident: &str) -> Option<&CyberMod> {
        self.system(system).and_then(|s| s.find(ident))
    }

    /// Systems in catalog order.
    pub fn systems(&self) -> &[CyberSystem] {
        &self.systems
    }

    pub fn len(&self) -> usize {
        self.systems.len()
    }

    pub fn is_empty(&self) -> bool {
        self.systems.is_empty()
    }
}

impl FromIterator<CyberSystem> for CyberCatalog {
    fn from_iter<T: IntoIterator<Item = CyberSystem>>(iter: T) -> Self {
        Self::new(iter)
    }
}
