use std::collections::BTreeMap;

/// Tags the attack pipeline checks by name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CombatTag {
    MeleeTraining,
    Fencing,
    Aikido,
    Archery,
    ThaiKickBoxing,
    Boxing,
    Brawling,
}

impl CombatTag {
    pub const fn label(self) -> &'static str {
        match self {
            CombatTag::MeleeTraining => "Melee Training",
            CombatTag::Fencing => "Fencing",
            CombatTag::Aikido => "Aikido",
            CombatTag::Archery => "Archery",
            CombatTag::ThaiKickBoxing => "Thai Kick Boxing",
            CombatTag::Boxing => "Boxing",
            CombatTag::Brawling => "Brawling",
        }
    }
}

/// Tag name to active flag, plus an optional choice per tag.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TagSelections {
    pub active: BTreeMap<String, bool>,
    pub choices: BTreeMap<String, String>,
}

impl TagSelections {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_tag(mut self, name: impl Into<String>) -> Self {
        self.active.insert(name.into(), true);
        self
    }

    #[must_use]
    pub fn with_choice(mut self, tag: impl Into<String>, choice: impl Into<String>) -> Self {
        self.choices.insert(tag.into(), choice.into());
        self
    }

    pub fn set(&mut self, name: impl Into<String>, active: bool) {
        self.active.insert(name.into(), active);
    }

    /// Names of active tags.
    pub fn active_names(&self) -> impl Iterator<Item = &str> {
        self.active
            .iter()
            .filter(|(_, on)| **on)
            .map(|(name, _)| name.as_str())
    }

    /// Whether a tag with this name is active, ignoring case and padding.
    pub fn is_active(&self, name: &str) -> bool {
        let wanted = name.trim();
        self.active_names()
            .any(|n| n.trim().eq_ignore_ascii_case(wanted))
    }

    pub fn has(&self, tag: CombatTag) -> bool {
        self.is_active(tag.label())
    }

    /// The non-blank choice recorded for `tag`.
    pub fn choice(&self, tag: &str) -> Option<&str> {
        self.choices
            .get(tag)
            .map(String::as_str)
            .filter(|c| !c.trim().is_empty())
    }
}
