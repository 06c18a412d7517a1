use super::attributes::Attributes;
use crate::character::SerializedCyberMods;
use crate::env::{CatalogOracle, InstalledMods, resolve_installed};

/// Effective attributes: base plus every attribute bonus from installed
/// modifications (non-OS mods, then the OS with its tier).
///
/// Pure. Calling it twice with the same inputs gives the same result.
pub fn resolve_effective_attributes(
    base: &Attributes,
    serialized: &SerializedCyberMods,
    catalog: &(impl CatalogOracle + ?Sized),
) -> Attributes {
    apply_installed(base, &resolve_installed(serialized, catalog))
}

/// Same as [`resolve_effective_attributes`] for an already resolved
/// installation.
pub fn apply_installed(base: &Attributes, installed: &InstalledMods<'_>) -> Attributes {
    let mut effective = *base;
    for resolved in installed.iter() {
        for (attr, amount) in &resolved.effects.attributes {
            effective.add(*attr, *amount);
        }
    }
    effective
}
