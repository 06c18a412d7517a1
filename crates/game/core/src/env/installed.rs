//! Resolves a serialized installation against the catalog.
//!
//! Both the attribute resolver and the modifier stack walk installed mods the
//! same way: non-OS systems in key order, then the operating system once.
//! Entries the catalog does not know are collected as [`SkippedEntry`] values
//! and contribute nothing.

use super::catalog::CatalogOracle;
use super::cyber::CyberMod;
use super::effect::EffectSet;
use crate::character::{OPERATING_SYSTEM, SerializedCyberMods, TIER_PREFIX};

/// An installed modification found in the catalog.
#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedMod<'a> {
    pub system: String,
    pub cyber_mod: &'a CyberMod,
    pub tier: Option<String>,
    pub effects: EffectSet,
}

impl ResolvedMod<'_> {
    pub fn name(&self) -> &str {
        self.cyber_mod.label()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum SkipReason {
    UnknownSystem,
    UnknownModification,
}

/// An installed entry that contributed nothing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SkippedEntry {
    pub system: String,
    pub ident: String,
    pub reason: SkipReason,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct InstalledMods<'a> {
    /// Non-OS modifications in application order.
    pub mods: Vec<ResolvedMod<'a>>,
    pub operating_system: Option<ResolvedMod<'a>>,
    pub skipped: Vec<SkippedEntry>,
}

impl<'a> InstalledMods<'a> {
    /// Every resolved modification, OS last.
    pub fn iter(&self) -> impl Iterator<Item = &ResolvedMod<'a>> {
        self.mods.iter().chain(self.operating_system.iter())
    }
}

pub fn resolve_installed<'a>(
    serialized: &SerializedCyberMods,
    catalog: &'a (impl CatalogOracle + ?Sized),
) -> InstalledMods<'a> {
    let mut out = InstalledMods::default();

    for (system, values) in serialized.non_os_systems() {
        let tier = serialized.tier(&system).map(str::to_owned);
        for ident in values.iter().filter(|v| !v.starts_with(TIER_PREFIX)) {
            match lookup(catalog, &system, ident) {
                Ok(cyber_mod) => out.mods.push(ResolvedMod {
                    system: system.clone(),
                    effects: cyber_mod.resolve_effects(tier.as_deref()),
                    cyber_mod,
                    tier: tier.clone(),
                }),
                Err(reason) => out.skipped.push(SkippedEntry {
                    system: system.clone(),
                    ident: ident.clone(),
                    reason,
                }),
            }
        }
    }

    if let Some(os) = serialized.os_selection() {
        match lookup(catalog, OPERATING_SYSTEM, os.id) {
            Ok(cyber_mod) => {
                out.operating_system = Some(ResolvedMod {
                    system: OPERATING_SYSTEM.to_owned(),
                    effects: cyber_mod.resolve_effects(os.tier),
                    cyber_mod,
                    tier: os.tier.map(str::to_owned),
                });
            }
            Err(reason) => out.skipped.push(SkippedEntry {
                system: OPERATING_SYSTEM.to_owned(),
                ident: os.id.to_owned(),
                reason,
            }),
        }
    }

    out
}

fn lookup<'a>(
    catalog: &'a (impl CatalogOracle + ?Sized),
    system: &str,
    ident: &str,
) -> Result<&'a CyberMod, SkipReason> {
    let entry = catalog
        .cyber_system(system)
        .ok_or(SkipReason::UnknownSystem)?;
    entry.find(ident).ok_or(SkipReason::UnknownModification)
}
