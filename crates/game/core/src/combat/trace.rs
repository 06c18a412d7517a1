//! Human-readable calculation report.
//!
//! ```text
//! Attack: UNARMED (melee)
//! Formula: ((Body 10) / 10) + ...
//! Random roll: 34
//! Bonuses:
//!   • First Strike bonus: +10% damage from cyberware
//! Hit Chance: 100%  |  Crit Chance: 13%  |  Crit Mult: x1.30
//! Result: CRITICAL HIT - Damage 9.3
//! Base Damage: 7.1
//! Proc: Feedback Circuit - Heal +5 HP
//! ```

use super::formula::BaseEvaluation;
use super::math::percent;
use super::modifiers::{Proc, ResolutionState};
use super::resolve::Resolution;
use super::result::AttackOutcome;

pub fn format_trace(
    base: &BaseEvaluation,
    state: &ResolutionState,
    resolution: &Resolution,
) -> String {
    let mut lines = vec![
        format!(
            "Attack: {} ({})",
            base.kind.subtype.as_ref().to_uppercase(),
            base.kind.category
        ),
        format!("Formula: {}", base.formula),
        format!("Random roll: {}", base.skill_roll),
    ];

    if !state.notes.is_empty() {
        lines.push("Bonuses:".to_owned());
        lines.extend(state.notes.iter().map(|note| format!("  • {note}")));
    }

    lines.push(format!(
        "Hit Chance: {}%  |  Crit Chance: {}%  |  Crit Mult: x{:.2}",
        percent(state.hit_chance),
        percent(state.crit_chance),
        state.crit_mult
    ));

    match resolution.outcome {
        AttackOutcome::Miss => lines.push("Result: MISS".to_owned()),
        AttackOutcome::Hit => lines.push(format!("Result: HIT - Damage {}", resolution.damage)),
        AttackOutcome::Critical => {
            lines.push(format!(
                "Result: CRITICAL HIT - Damage {}",
                resolution.damage
            ));
            lines.push(format!("Base Damage: {}", base.damage));
            lines.extend(state.procs.iter().map(|proc| match proc {
                Proc::HealOnCrit { source, amount } => {
                    format!("Proc: {source} - Heal +{amount} HP")
                }
            }));
        }
    }

    lines.join("\n")
}
