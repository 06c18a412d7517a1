//! Content loaders for reading rule data from files.
//!
//! Catalog files may be RON or JSON (picked by extension). The rules
//! configuration is TOML.

pub mod builtin;
pub mod config;
pub mod factory;
pub mod systems;
pub mod tags;

pub use builtin::BuiltinCatalog;
pub use config::ConfigLoader;
pub use factory::ContentFactory;
pub use systems::CyberSystemLoader;
pub use tags::{TagCatalog, TagLoader};

use std::path::Path;

use serde::de::DeserializeOwned;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}

/// Catalog file encodings.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DataFormat {
    Ron,
    Json,
}

impl DataFormat {
    /// Format from the file extension. Anything but `.json` is read as RON.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => DataFormat::Json,
            _ => DataFormat::Ron,
        }
    }

    pub(crate) fn parse<T: DeserializeOwned>(self, content: &str, what: &str) -> LoadResult<T> {
        match self {
            DataFormat::Ron => ron::from_str(content)
                .map_err(|e| anyhow::anyhow!("Failed to parse {} RON: {}", what, e)),
            DataFormat::Json => serde_json::from_str(content)
                .map_err(|e| anyhow::anyhow!("Failed to parse {} JSON: {}", what, e)),
        }
    }
}

/// Reads and parses a catalog file in the format its extension names.
pub(crate) fn load_data<T: DeserializeOwned>(path: &Path, what: &str) -> LoadResult<T> {
    let content = read_file(path)?;
    DataFormat::from_path(path)
        .parse(&content, what)
        .map_err(|e| anyhow::anyhow!("{} ({})", e, path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_follows_extension() {
        assert_eq!(DataFormat::from_path(Path::new("a/arms.json")), DataFormat::Json);
        assert_eq!(DataFormat::from_path(Path::new("a/arms.JSON")), DataFormat::Json);
        assert_eq!(DataFormat::from_path(Path::new("a/arms.ron")), DataFormat::Ron);
        assert_eq!(DataFormat::from_path(Path::new("a/arms")), DataFormat::Ron);
    }

    #[test]
    fn missing_file_names_the_path() {
        let err = read_file(Path::new("/definitely/not/here.ron")).unwrap_err();
        assert!(err.to_string().contains("/definitely/not/here.ron"));
    }
}
