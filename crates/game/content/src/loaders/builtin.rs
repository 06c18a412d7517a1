//! Built-in rule catalog.
//!
//! The stock data files are embedded at compile time so a calculator can run
//! without a data directory on disk.

use rules_core::{CyberCatalog, RuleCatalog, RulesConfig};

use crate::loaders::{ConfigLoader, CyberSystemLoader, DataFormat, LoadResult, TagLoader};

const SYSTEM_FILES: &[(&str, &str)] = &[
    ("arms.ron", include_str!("../../data/systems/arms.ron")),
    ("hands.ron", include_str!("../../data/systems/hands.ron")),
    ("legs.ron", include_str!("../../data/systems/legs.ron")),
    (
        "nervous_system.ron",
        include_str!("../../data/systems/nervous_system.ron"),
    ),
    (
        "ocular_system.ron",
        include_str!("../../data/systems/ocular_system.ron"),
    ),
    (
        "operating_system.ron",
        include_str!("../../data/systems/operating_system.ron"),
    ),
];

const TAGS_RON: &str = include_str!("../../data/tags.ron");
const RULES_TOML: &str = include_str!("../../data/rules.toml");

/// Stock catalog shipped with the crate.
pub struct BuiltinCatalog;

impl BuiltinCatalog {
    /// Parses the embedded body systems and tag table.
    pub fn load() -> LoadResult<RuleCatalog> {
        let mut systems = Vec::with_capacity(SYSTEM_FILES.len());
        for (file, content) in SYSTEM_FILES {
            let system = CyberSystemLoader::parse(content, DataFormat::Ron)
                .map_err(|e| anyhow::anyhow!("{} ({})", e, file))?;
            systems.push(system);
        }

        let tags = TagLoader::parse(TAGS_RON, DataFormat::Ron)
            .map_err(|e| anyhow::anyhow!("{} (tags.ron)", e))?;

        Ok(RuleCatalog::new(CyberCatalog::new(systems), tags))
    }

    /// Parses the embedded `rules.toml`.
    pub fn config() -> LoadResult<RulesConfig> {
        ConfigLoader::parse(RULES_TOML)
    }
}
