//! Rules configuration loader.

use std::path::Path;

use rules_core::RulesConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for rules configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file. Missing keys keep their defaults.
    pub fn load(path: &Path) -> LoadResult<RulesConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<RulesConfig> {
        let config: RulesConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;
        config
            .validate()
            .map_err(|e| anyhow::anyhow!("Invalid rules config: {}", e))?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let config = ConfigLoader::parse("crit_base = 0.05\nlow_hp_crit_threshold = 25\n").unwrap();
        assert_eq!(config.crit_base, 0.05);
        assert_eq!(config.low_hp_crit_threshold, 25.0);
        assert_eq!(config.ranged_hit_base, RulesConfig::DEFAULT_RANGED_HIT_BASE);
    }

    #[test]
    fn non_finite_constant_is_rejected() {
        let err = ConfigLoader::parse("crit_base = nan\n").unwrap_err();
        assert!(err.to_string().contains("crit_base"));
    }

    #[test]
    fn empty_file_is_default() {
        assert_eq!(ConfigLoader::parse("").unwrap(), RulesConfig::default());
    }
}
