use std::collections::BTreeMap;

use super::cyber::{CyberCatalog, CyberMod, CyberSystem};
use super::tags::TagDefinition;

/// Read-only access to the rule catalog.
///
/// The engine reads tags and cyber-mods through this trait and never writes
/// back. Lookups are by any spelling that normalizes to the catalog key.
pub trait CatalogOracle: Send + Sync {
    fn cyber_system(&self, system: &str) -> Option<&CyberSystem>;

    fn tag(&self, name: &str) -> Option<&TagDefinition>;

    /// All body systems in catalog order.
    fn systems(&self) -> &[CyberSystem];

    fn cyber_mod(&self, system: &str, ident: &str) -> Option<&CyberMod> {
        self.cyber_system(system).and_then(|s| s.find(ident))
    }
}

/// In-memory catalog: body systems plus tags keyed by name.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RuleCatalog {
    cyber: CyberCatalog,
    tags: BTreeMap<String, TagDefinition>,
}

impl RuleCatalog {
    pub fn new(cyber: CyberCatalog, tags: impl IntoIterator<Item = TagDefinition>) -> Self {
        Self {
            cyber,
            tags: tags.into_iter().map(|t| (t.name.clone(), t)).collect(),
        }
    }

    pub fn cyber(&self) -> &CyberCatalog {
        &self.cyber
    }

    pub fn tags(&self) -> impl Iterator<Item = &TagDefinition> {
        self.tags.values()
    }

    pub fn insert_tag(&mut self, tag: TagDefinition) {
        self.tags.insert(tag.name.clone(), tag);
    }

    pub fn insert_system(&mut self, system: CyberSystem) {
        self.cyber.insert(system);
    }
}

impl CatalogOracle for RuleCatalog {
    fn cyber_system(&self, system: &str) -> Option<&CyberSystem> {
        self.cyber.system(system)
    }

    fn tag(&self, name: &str) -> Option<&TagDefinition> {
        self.tags.get(name).or_else(|| {
            let wanted = name.trim();
            self.tags
                .values()
                .find(|t| t.name.trim().eq_ignore_ascii_case(wanted))
        })
    }

    fn systems(&self) -> &[CyberSystem] {
        self.cyber.systems()
    }
}
