//! Tag table loader.

use std::collections::BTreeMap;
use std::path::Path;

use rules_core::TagDefinition;
use serde::{Deserialize, Serialize};

use crate::loaders::{DataFormat, LoadResult, load_data};

/// Tag table file: tag key to definition.
///
/// A definition without a `name` takes its key as name.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TagCatalog {
    #[serde(default)]
    pub items: BTreeMap<String, TagDefinition>,
}

impl TagCatalog {
    pub fn into_definitions(self) -> Vec<TagDefinition> {
        self.items
            .into_iter()
            .map(|(key, mut tag)| {
                if tag.name.trim().is_empty() {
                    tag.name = key;
                }
                tag
            })
            .collect()
    }
}

/// Loader for tag tables (RON or JSON).
pub struct TagLoader;

impl TagLoader {
    pub fn load(path: &Path) -> LoadResult<Vec<TagDefinition>> {
        let catalog: TagCatalog = load_data(path, "tag table")?;
        Ok(catalog.into_definitions())
    }

    pub fn parse(content: &str, format: DataFormat) -> LoadResult<Vec<TagDefinition>> {
        let catalog: TagCatalog = format.parse(content, "tag table")?;
        Ok(catalog.into_definitions())
    }
}
