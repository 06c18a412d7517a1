//! Combat result types.

use super::classify::AttackKind;
use super::modifiers::Proc;
use crate::env::SkippedEntry;
use crate::stats::Attributes;

/// Outcome of an attack attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum AttackOutcome {
    Miss,
    Hit,
    Critical,
}

impl AttackOutcome {
    pub const fn is_hit(self) -> bool {
        !matches!(self, AttackOutcome::Miss)
    }

    pub const fn is_critical(self) -> bool {
        matches!(self, AttackOutcome::Critical)
    }
}

/// Everything a calculation produced. Returned to the caller, never stored.
#[derive(Clone, Debug, PartialEq)]
pub struct CalculationResult {
    pub kind: AttackKind,
    pub outcome: AttackOutcome,
    /// Final damage, a multiple of 0.1. Zero on a miss.
    pub damage: f64,
    /// Damage after the base formula, before modifiers.
    pub base_damage: f64,
    pub hit_chance: f64,
    pub crit_chance: f64,
    pub crit_mult: f64,
    pub skill_roll: i64,
    pub effective_attributes: Attributes,
    pub formula: String,
    pub notes: Vec<String>,
    /// Procs recorded by the modifier stack, whether or not they fired.
    pub procs: Vec<Proc>,
    /// Installed entries the catalog did not recognize.
    pub skipped: Vec<SkippedEntry>,
    pub trace: String,
}

impl CalculationResult {
    /// Procs that fired: all of them on a critical hit, none otherwise.
    pub fn triggered_procs(&self) -> &[Proc] {
        if self.outcome.is_critical() {
            &self.procs
        } else {
            &[]
        }
    }
}
