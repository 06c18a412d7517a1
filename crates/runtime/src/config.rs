//! Calculator configuration loaded from the process environment.
use std::env;
use std::path::PathBuf;

/// Where the calculator reads its catalog and balance constants from.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CalculatorConfig {
    /// Catalog directory (`systems/`, `tags.ron`, optional `rules.toml`).
    /// `None` uses the embedded catalog.
    pub data_dir: Option<PathBuf>,
    /// Explicit rules TOML. Takes precedence over `rules.toml` in `data_dir`.
    pub rules_path: Option<PathBuf>,
}

impl CalculatorConfig {
    pub const DATA_DIR_VAR: &'static str = "CONTENT_DATA_DIR";
    pub const RULES_VAR: &'static str = "RULES_CONFIG";

    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `CONTENT_DATA_DIR` - Catalog directory (default: embedded catalog)
    /// - `RULES_CONFIG` - Rules TOML file (default: catalog's rules or built-in constants)
    pub fn from_env() -> Self {
        Self {
            data_dir: read_env::<PathBuf>(Self::DATA_DIR_VAR),
            rules_path: read_env::<PathBuf>(Self::RULES_VAR),
        }
    }

    #[must_use]
    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = Some(dir.into());
        self
    }

    #[must_use]
    pub fn with_rules_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.rules_path = Some(path.into());
        self
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    let value = env::var(key).ok()?;
    if value.trim().is_empty() {
        return None;
    }
    value.parse().ok()
}
