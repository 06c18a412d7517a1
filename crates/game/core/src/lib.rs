//! Attack-resolution rules for a tabletop character builder.
//!
//! `rules-core` turns a character (attributes, tags, installed cyber-mods), a
//! weapon and a status snapshot into hit chance, crit chance, crit multiplier,
//! final damage and a readable trace. It performs no I/O: the catalog arrives
//! through [`CatalogOracle`] and randomness through [`RandomSource`].
//! All calculations flow through [`engine::AttackEngine`].
pub mod character;
pub mod combat;
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod stats;

pub use character::{
    CombatTag, CyberModsState, SerializedCyberMods, StatusContext, StatusFlags, SystemInstall,
    TagSelections, WeaponConfig, WeaponFlags, WeaponType, serialize_cyber_mods, system_key,
};
pub use combat::{
    AttackCategory, AttackKind, AttackOutcome, AttackSubtype, CalculationResult, Proc, classify,
};
pub use config::RulesConfig;
pub use engine::{AttackEngine, CalculationRequest};
pub use env::{
    CatalogOracle, CyberCatalog, CyberMod, CyberSystem, EffectSet, EffectValue, PcgRng,
    RandomSource, RawEffects, RuleCatalog, SequenceRng, StatEffect, TagChoice, TagDefinition,
};
pub use error::{CalculationError, CalculationStage, ErrorSeverity, RulesError};
pub use stats::{
    Attribute, Attributes, BonusSource, CivilStat, StatTotals, resolve_effective_attributes,
    sum_sources,
};
