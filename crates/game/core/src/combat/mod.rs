//! Attack resolution pipeline.
//!
//! All functions are pure apart from draws on the injected random source.
//!
//! # Stages
//!
//! - `classify`: weapon type string to category and subtype
//! - `evaluate_base`: base hit, crit, multiplier, damage and formula text
//! - `apply_modifiers`: cyber-mod and tag adjustments folded over a
//!   [`ResolutionState`]
//! - `resolve`: hit and crit rolls, final damage
//! - `format_trace`: the human-readable report

mod classify;
mod formula;
mod math;
mod modifiers;
mod resolve;
mod result;
mod trace;

pub use classify::{AttackCategory, AttackKind, AttackSubtype, classify};
pub use formula::{BaseEvaluation, evaluate_base, skill_roll};
pub use math::{ceil_tenth, clamp01, percent};
pub use modifiers::{
    ModifierContext, ModifierStep, Proc, ResolutionFlags, ResolutionState, apply_effect_set,
    apply_modifiers, apply_step, apply_tag_rules, finalize, plan_steps,
};
pub use resolve::{Resolution, final_damage, resolve};
pub use result::{AttackOutcome, CalculationResult};
pub use trace::format_trace;
