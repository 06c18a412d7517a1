//! Read-only rule data and the randomness capability.
//!
//! The catalog (tags and cyber-mods) is loaded elsewhere and handed to the
//! engine through [`CatalogOracle`]. Randomness arrives through
//! [`RandomSource`]. The engine owns neither.
mod catalog;
mod cyber;
mod effect;
mod installed;
mod rng;
mod tags;

pub use catalog::{CatalogOracle, RuleCatalog};
pub use cyber::{CyberCatalog, CyberMod, CyberSystem};
pub use effect::{
    ATTRIBUTE_EFFECT_KEYS, CIVIL_EFFECT_KEYS, EffectCondition, EffectFlags, EffectSet,
    EffectValue, RawEffects, attribute_for_key, civil_for_key,
};
pub use installed::{InstalledMods, ResolvedMod, SkipReason, SkippedEntry, resolve_installed};
pub use rng::{PcgRng, RandomSource, SequenceRng};
pub use tags::{StatEffect, StatTarget, TagChoice, TagDefinition};
