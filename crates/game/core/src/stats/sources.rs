//! Bonus breakdowns for the character sheet.
//!
//! Tag sources come from additive stat records on active tags (and their chosen
//! option). Cyber sources come from each installed modification's resolved
//! effect set. The attack pipeline does not use tag stat records; it reads
//! cyber attribute bonuses through [`super::resolve_effective_attributes`].

use super::attributes::Attribute;
use super::bonus::BonusSource;
use super::civil::CivilStat;
use crate::character::{CyberModsState, TagSelections, serialize_cyber_mods};
use crate::env::{CatalogOracle, EffectSet, StatEffect, StatTarget, resolve_installed};

pub fn tag_attribute_sources(
    selections: &TagSelections,
    catalog: &(impl CatalogOracle + ?Sized),
) -> Vec<BonusSource<Attribute>> {
    tag_sources(selections, catalog, |target| match target {
        StatTarget::Attribute(attr) => Some(attr),
        StatTarget::Civil(_) => None,
    })
}

pub fn tag_civil_sources(
    selections: &TagSelections,
    catalog: &(impl CatalogOracle + ?Sized),
) -> Vec<BonusSource<CivilStat>> {
    tag_sources(selections, catalog, |target| match target {
        StatTarget::Civil(stat) => Some(stat),
        StatTarget::Attribute(_) => None,
    })
}

fn tag_sources<K: Ord>(
    selections: &TagSelections,
    catalog: &(impl CatalogOracle + ?Sized),
    pick: impl Fn(StatTarget) -> Option<K>,
) -> Vec<BonusSource<K>> {
    let mut sources = Vec::new();
    for name in selections.active_names() {
        let Some(tag) = catalog.tag(name) else {
            continue;
        };
        let mut source = BonusSource::new(tag.name.clone());
        let chosen = selections
            .choice(name)
            .and_then(|ident| tag.choice(ident))
            .map(|choice| choice.effects.as_slice())
            .unwrap_or_default();
        for effect in tag.effects.iter().chain(chosen) {
            apply_stat_effect(&mut source, effect, &pick);
        }
        if !source.is_empty() {
            sources.push(source);
        }
    }
    sources
}

fn apply_stat_effect<K: Ord>(
    source: &mut BonusSource<K>,
    effect: &StatEffect,
    pick: &impl Fn(StatTarget) -> Option<K>,
) {
    let Some((target, amount)) = effect.contribution() else {
        return;
    };
    if let Some(key) = pick(target) {
        source.add(key, amount);
    }
}

pub fn cyber_attribute_sources(
    state: &CyberModsState,
    catalog: &(impl CatalogOracle + ?Sized),
) -> Vec<BonusSource<Attribute>> {
    cyber_sources(state, catalog, |effects, source| {
        for (attr, amount) in &effects.attributes {
            source.add(*attr, *amount);
        }
    })
}

pub fn cyber_civil_sources(
    state: &CyberModsState,
    catalog: &(impl CatalogOracle + ?Sized),
) -> Vec<BonusSource<CivilStat>> {
    cyber_sources(state, catalog, |effects, source| {
        for (stat, amount) in &effects.civil {
            source.add(*stat, *amount);
        }
    })
}

fn cyber_sources<K: Ord>(
    state: &CyberModsState,
    catalog: &(impl CatalogOracle + ?Sized),
    collect: impl Fn(&EffectSet, &mut BonusSource<K>),
) -> Vec<BonusSource<K>> {
    let serialized = serialize_cyber_mods(state);
    resolve_installed(&serialized, catalog)
        .iter()
        .filter_map(|resolved| {
            let mut source = BonusSource::new(resolved.name());
            collect(&resolved.effects, &mut source);
            (!source.is_empty()).then_some(source)
        })
        .collect()
}
