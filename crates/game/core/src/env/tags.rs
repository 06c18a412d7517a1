//! Narrative tag catalog entries.

use super::effect::EffectValue;
use crate::stats::{Attribute, CivilStat};

/// A stat effect record attached to a tag or tag choice.
///
/// Only `kind = "stat"` records with an `add` (or absent) op and a recognized
/// dotted target contribute. Everything else is descriptive.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct StatEffect {
    pub kind: String,
    pub target: String,
    pub op: String,
    pub value: EffectValue,
}

/// Where a stat effect lands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatTarget {
    Attribute(Attribute),
    Civil(CivilStat),
}

impl StatTarget {
    /// Parses `attributes.<name>` or `civil.<name>`.
    pub fn parse(target: &str) -> Option<Self> {
        let (group, name) = target.trim().split_once('.')?;
        match group {
            "attributes" => {
                let attribute = match name {
                    "technical_ability" => Attribute::Technical,
                    other => other.parse().ok()?,
                };
                Some(StatTarget::Attribute(attribute))
            }
            "civil" => name.parse().ok().map(StatTarget::Civil),
            _ => None,
        }
    }
}

impl StatEffect {
    pub fn add(target: impl Into<String>, value: f64) -> Self {
        Self {
            kind: "stat".into(),
            target: target.into(),
            op: "add".into(),
            value: EffectValue::Number(value),
        }
    }

    /// Target and amount, if this record is a usable nonzero stat bonus.
    pub fn contribution(&self) -> Option<(StatTarget, f64)> {
        if self.kind != "stat" {
            return None;
        }
        if !self.op.is_empty() && self.op != "add" {
            return None;
        }
        let amount = self.value.as_number().filter(|v| *v != 0.0)?;
        let target = StatTarget::parse(&self.target)?;
        Some((target, amount))
    }
}

/// A selectable option under a tag.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TagChoice {
    pub id: String,
    pub label: String,
    pub effects: Vec<StatEffect>,
}

#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TagDefinition {
    pub name: String,
    pub description: Option<String>,
    pub effects: Vec<StatEffect>,
    pub choices: Vec<TagChoice>,
}

impl TagDefinition {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_effect(mut self, effect: StatEffect) -> Self {
        self.effects.push(effect);
        self
    }

    #[must_use]
    pub fn with_choice(mut self, choice: TagChoice) -> Self {
        self.choices.push(choice);
        self
    }

    /// Finds a choice by id, then by label.
    pub fn choice(&self, ident: &str) -> Option<&TagChoice> {
        self.choices
            .iter()
            .find(|c| c.id == ident)
            .or_else(|| self.choices.iter().find(|c| c.label == ident))
    }
}
