//! Data-driven rule content and loaders.
//!
//! This crate reads the cyber-mod and tag catalogs the attack engine consults:
//! - Body systems and their mods (RON or JSON, one file per system)
//! - Narrative tags with stat effects and choices (RON or JSON)
//! - Balance constants (TOML)
//!
//! A stock copy of the data directory is embedded via [`BuiltinCatalog`].
//! Content is handed to the engine through `rules_core::CatalogOracle` and
//! never mutated by it.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{
    BuiltinCatalog, ConfigLoader, ContentFactory, CyberSystemLoader, DataFormat, LoadResult,
    TagCatalog, TagLoader,
};
