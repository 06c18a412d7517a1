//! Caller-owned character state consumed by a calculation.
//!
//! Nothing here is mutated by the engine. The runtime or UI owns these values
//! and passes them in by reference.

mod mods;
mod status;
mod tags;
mod weapon;

pub use mods::{
    CyberModsState, EMPTY_SLOT, OPERATING_SYSTEM, OsSelection, SerializedCyberMods,
    SystemInstall, TIER_PREFIX, is_operating_system, serialize_cyber_mods, system_key,
};
pub use status::{StatusContext, StatusFlags};
pub use tags::{CombatTag, TagSelections};
pub use weapon::{WeaponConfig, WeaponFlags, WeaponType};
