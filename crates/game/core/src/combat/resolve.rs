//! Hit and crit rolls.

use super::math::ceil_tenth;
use super::modifiers::{ResolutionFlags, ResolutionState};
use super::result::AttackOutcome;
use crate::env::RandomSource;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Resolution {
    pub outcome: AttackOutcome,
    pub damage: f64,
}

/// Rolls hit, then crit, then computes final damage.
///
/// Draws one value for the hit roll and a second only when a hit is neither
/// forced to crit nor barred from it.
pub fn resolve<R: RandomSource + ?Sized>(state: &ResolutionState, rng: &mut R) -> Resolution {
    let hit = rng.next_unit() <= state.hit_chance;
    let outcome = if !hit {
        AttackOutcome::Miss
    } else if state.has(ResolutionFlags::FORCE_CRIT) {
        AttackOutcome::Critical
    } else if state.has(ResolutionFlags::DISABLE_CRIT) {
        AttackOutcome::Hit
    } else if rng.next_unit() <= state.crit_chance {
        AttackOutcome::Critical
    } else {
        AttackOutcome::Hit
    };
    Resolution {
        outcome,
        damage: final_damage(state, outcome),
    }
}

/// Zero on a miss. Otherwise: ceil to whole if force-max-roll, then times the
/// crit multiplier on a crit, then ceil to one decimal.
pub fn final_damage(state: &ResolutionState, outcome: AttackOutcome) -> f64 {
    if !outcome.is_hit() {
        return 0.0;
    }
    let mut damage = state.damage;
    if state.has(ResolutionFlags::FORCE_MAX_ROLL) {
        damage = damage.ceil();
    }
    if outcome.is_critical() {
        damage *= state.crit_mult;
    }
    ceil_tenth(damage)
}
