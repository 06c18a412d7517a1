//! Body-system catalog loader.
//!
//! One file per body system:
//!
//! ```ron
//! (
//!     system: "Arms",
//!     slots: 2,
//!     mods: [
//!         (id: "gorilla_arms", name: "Gorilla Arms", effects: { "body_add": 2 }),
//!     ],
//! )
//! ```

use std::path::{Path, PathBuf};

use rules_core::CyberSystem;

use crate::loaders::{DataFormat, LoadResult, load_data};

/// Loader for body-system files (RON or JSON).
pub struct CyberSystemLoader;

impl CyberSystemLoader {
    /// Load a single body system.
    pub fn load(path: &Path) -> LoadResult<CyberSystem> {
        load_data(path, "body system")
    }

    /// Parse a body system from text already in memory.
    pub fn parse(content: &str, format: DataFormat) -> LoadResult<CyberSystem> {
        format.parse(content, "body system")
    }

    /// Load every `.ron` and `.json` file in `dir`, ordered by file name.
    pub fn load_dir(dir: &Path) -> LoadResult<Vec<CyberSystem>> {
        let entries = std::fs::read_dir(dir).map_err(|e| {
            anyhow::anyhow!("Failed to read systems directory {}: {}", dir.display(), e)
        })?;

        let mut paths: Vec<PathBuf> = Vec::new();
        for entry in entries {
            let path = entry
                .map_err(|e| anyhow::anyhow!("Failed to read entry in {}: {}", dir.display(), e))?
                .path();
            let is_data = path
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| ext.eq_ignore_ascii_case("ron") || ext.eq_ignore_ascii_case("json"));
            if path.is_file() && is_data {
                paths.push(path);
            }
        }
        paths.sort();

        paths.iter().map(|path| Self::load(path)).collect()
    }
}
