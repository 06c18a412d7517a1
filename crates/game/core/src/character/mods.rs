//! Cyber-mod installation state and its serialized form.
//!
//! The character sheet keeps an ordered slot list per body system. Before a
//! calculation that state is flattened into [`SerializedCyberMods`]: empty slots
//! are dropped, the tier becomes a `tier:<value>` pseudo-slot, and systems with
//! nothing installed disappear.

use std::collections::BTreeMap;

use crate::env::CatalogOracle;

pub const OPERATING_SYSTEM: &str = "Operating System";
pub const TIER_PREFIX: &str = "tier:";
pub const EMPTY_SLOT: &str = "None";

const HANDS: &str = "hands";

/// Normalized lookup key: trimmed, lowercased, whitespace runs become `_`.
pub fn system_key(name: &str) -> String {
    name.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("_")
}

pub fn is_operating_system(system: &str) -> bool {
    system_key(system) == system_key(OPERATING_SYSTEM)
}

/// Slots and tier for one body system.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SystemInstall {
    pub slots: Vec<String>,
    pub tier: Option<String>,
}

impl SystemInstall {
    pub fn empty(slot_count: usize) -> Self {
        Self {
            slots: vec![EMPTY_SLOT.to_owned(); slot_count],
            tier: None,
        }
    }

    /// Installed identifiers, skipping empty slots.
    pub fn installed(&self) -> impl Iterator<Item = &str> {
        self.slots
            .iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty() && *s != EMPTY_SLOT)
    }
}

/// Installation state: body-system name to slots.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct CyberModsState {
    systems: BTreeMap<String, SystemInstall>,
}

impl CyberModsState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty installation for every catalog system: all slots `None`, one
    /// extra slot on Hands, and an empty tier on the operating system.
    pub fn from_catalog(catalog: &(impl CatalogOracle + ?Sized)) -> Self {
        let mut state = Self::new();
        for system in catalog.systems() {
            let key = system_key(&system.system);
            let mut slot_count = system.slots.max(1) as usize;
            if key == HANDS {
                slot_count += 1;
            }
            let mut install = SystemInstall::empty(slot_count);
            if is_operating_system(&system.system) {
                install.tier = Some(String::new());
            }
            state.systems.insert(system.system.clone(), install);
        }
        state
    }

    pub fn system(&self, name: &str) -> Option<&SystemInstall> {
        self.systems.get(name).or_else(|| {
            let key = system_key(name);
            self.systems
                .iter()
                .find(|(system, _)| system_key(system) == key)
                .map(|(_, install)| install)
        })
    }

    fn system_mut(&mut self, name: &str) -> &mut SystemInstall {
        let key = system_key(name);
        let existing = self
            .systems
            .keys()
            .find(|system| system_key(system) == key)
            .cloned();
        self.systems
            .entry(existing.unwrap_or_else(|| name.to_owned()))
            .or_default()
    }

    /// Puts `ident` into `slot`, growing the slot list with empty slots if
    /// needed.
    pub fn install(&mut self, system: &str, slot: usize, ident: impl Into<String>) {
        let install = self.system_mut(system);
        if install.slots.len() <= slot {
            install.slots.resize(slot + 1, EMPTY_SLOT.to_owned());
        }
        install.slots[slot] = ident.into();
    }

    /// Builder-style install into the first free slot (or a new one).
    #[must_use]
    pub fn with_mod(mut self, system: &str, ident: impl Into<String>) -> Self {
        let slot = {
            let install = self.system_mut(system);
            install
                .slots
                .iter()
                .position(|s| s.trim().is_empty() || s == EMPTY_SLOT)
                .unwrap_or(install.slots.len())
        };
        self.install(system, slot, ident);
        self
    }

    pub fn set_tier(&mut self, system: &str, tier: impl Into<String>) {
        self.system_mut(system).tier = Some(tier.into());
    }

    #[must_use]
    pub fn with_tier(mut self, system: &str, tier: impl Into<String>) -> Self {
        self.set_tier(system, tier);
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SystemInstall)> {
        self.systems.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// Flattened installation: normalized system key to installed identifiers,
/// with an optional trailing `tier:<value>` entry.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct SerializedCyberMods {
    entries: BTreeMap<String, Vec<String>>,
}

/// The operating system picked in a serialized installation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OsSelection<'a> {
    pub id: &'a str,
    pub tier: Option<&'a str>,
}

impl SerializedCyberMods {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds entries under `system`. Keys are normalized on insert.
    #[must_use]
    pub fn with_entries<S: Into<String>>(
        mut self,
        system: &str,
        values: impl IntoIterator<Item = S>,
    ) -> Self {
        self.entries
            .entry(system_key(system))
            .or_default()
            .extend(values.into_iter().map(Into::into));
        self
    }

    /// Entries in key order. Keys are re-normalized here so hand-built or
    /// deserialized maps behave the same as serialized ones.
    pub fn systems(&self) -> impl Iterator<Item = (String, &[String])> {
        self.entries
            .iter()
            .map(|(k, v)| (system_key(k), v.as_slice()))
    }

    /// Non-OS systems in key order.
    pub fn non_os_systems(&self) -> impl Iterator<Item = (String, &[String])> {
        self.systems().filter(|(key, _)| !is_operating_system(key))
    }

    /// Tier recorded for `system`, if any.
    pub fn tier(&self, system: &str) -> Option<&str> {
        let key = system_key(system);
        self.systems()
            .filter(|(k, _)| *k == key)
            .flat_map(|(_, values)| values.iter())
            .filter_map(|v| v.strip_prefix(TIER_PREFIX))
            .last()
    }

    /// The last non-tier OS entry and the last tier entry.
    pub fn os_selection(&self) -> Option<OsSelection<'_>> {
        let mut id = None;
        let mut tier = None;
        for (_, values) in self.systems().filter(|(k, _)| is_operating_system(k)) {
            for value in values {
                match value.strip_prefix(TIER_PREFIX) {
                    Some(t) => tier = Some(t),
                    None if value.trim().is_empty() || value == EMPTY_SLOT => {}
                    None => id = Some(value.as_str()),
                }
            }
        }
        id.map(|id| OsSelection { id, tier })
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Flattens an installation, dropping empty slots and empty systems.
pub fn serialize_cyber_mods(state: &CyberModsState) -> SerializedCyberMods {
    let mut out = SerializedCyberMods::new();
    for (system, install) in state.iter() {
        let mut values: Vec<String> = install.installed().map(str::to_owned).collect();
        if let Some(tier) = install.tier.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
            values.push(format!("{TIER_PREFIX}{tier}"));
        }
        if !values.is_empty() {
            out.entries
                .entry(system_key(system))
                .or_default()
                .extend(values);
        }
    }
    out
}
