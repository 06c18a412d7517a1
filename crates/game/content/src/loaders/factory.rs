//! Content factory for building a rule catalog from data files.

use std::path::{Path, PathBuf};

use rules_core::{CyberCatalog, CyberSystem, RuleCatalog, RulesConfig, TagDefinition};

use crate::loaders::{ConfigLoader, CyberSystemLoader, LoadResult, TagLoader};

/// Loads rule content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── rules.toml        (optional)
/// ├── tags.ron | tags.json
/// └── systems/
///     ├── arms.ron
///     ├── operating_system.json
///     └── ...
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load rules configuration from `rules.toml`, or defaults if absent.
    pub fn load_config(&self) -> LoadResult<RulesConfig> {
        let path = self.data_dir.join("rules.toml");
        if path.exists() {
            ConfigLoader::load(&path)
        } else {
            Ok(RulesConfig::default())
        }
    }

    /// Load every body system under `systems/`.
    pub fn load_systems(&self) -> LoadResult<Vec<CyberSystem>> {
        CyberSystemLoader::load_dir(&self.data_dir.join("systems"))
    }

    /// Load the tag table from `tags.ron` or `tags.json`.
    pub fn load_tags(&self) -> LoadResult<Vec<TagDefinition>> {
        let ron = self.data_dir.join("tags.ron");
        let json = self.data_dir.join("tags.json");
        if ron.exists() {
            TagLoader::load(&ron)
        } else if json.exists() {
            TagLoader::load(&json)
        } else {
            Err(anyhow::anyhow!(
                "No tag table (tags.ron or tags.json) in {}",
                self.data_dir.display()
            ))
        }
    }

    /// Load systems and tags into one catalog.
    pub fn load_catalog(&self) -> LoadResult<RuleCatalog> {
        let systems = self.load_systems()?;
        let tags = self.load_tags()?;
        Ok(RuleCatalog::new(CyberCatalog::new(systems), tags))
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
