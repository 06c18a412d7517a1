//! Modifier stack: conditional adjustments applied after the base formulas.
//!
//! Application is a fold over [`ModifierStep`]s. Each step takes the current
//! [`ResolutionState`] by value and returns the next one:
//!
//! 1. each installed non-OS modification, in system key order
//! 2. the operating system, once, with `base_effects` and its tier merged
//! 3. the fixed tag rules
//! 4. clamping
//!
//! Percent fields on effect sets are whole percents (`15` means +0.15).

use super::classify::{AttackKind, AttackSubtype};
use super::formula::BaseEvaluation;
use super::math::clamp01;
use crate::character::{CombatTag, StatusContext, StatusFlags, TagSelections};
use crate::config::RulesConfig;
use crate::env::{EffectCondition, EffectFlags, EffectSet, InstalledMods, ResolvedMod};

bitflags::bitflags! {
    /// Switches the resolution engine honors.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct ResolutionFlags: u8 {
        /// Every hit is a critical hit.
        const FORCE_CRIT = 1 << 0;
        /// No critical hits. Force-crit still wins.
        const DISABLE_CRIT = 1 << 1;
        /// Damage is rounded up to a whole number before crit.
        const FORCE_MAX_ROLL = 1 << 2;
    }
}

/// Deferred effect that fires on a critical hit.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Proc {
    HealOnCrit { source: String, amount: f64 },
}

/// Numbers flowing through the modifier stack.
#[derive(Clone, Debug, PartialEq)]
pub struct ResolutionState {
    pub hit_chance: f64,
    pub crit_chance: f64,
    pub crit_mult: f64,
    pub damage: f64,
    pub flags: ResolutionFlags,
    pub notes: Vec<String>,
    pub procs: Vec<Proc>,
}

impl ResolutionState {
    /// Starting state from the base stage. An always-crit weapon starts with
    /// force-crit set.
    pub fn from_base(base: &BaseEvaluation, status: &StatusContext) -> Self {
        let mut flags = ResolutionFlags::empty();
        if status.has(StatusFlags::FORCE_CRIT) {
            flags |= ResolutionFlags::FORCE_CRIT;
        }
        Self {
            hit_chance: base.hit_chance,
            crit_chance: base.crit_chance,
            crit_mult: base.crit_mult,
            damage: base.damage,
            flags,
            notes: Vec::new(),
            procs: Vec::new(),
        }
    }

    pub fn has(&self, flag: ResolutionFlags) -> bool {
        self.flags.contains(flag)
    }

    fn scale_damage(mut self, percent: f64) -> Self {
        self.damage *= 1.0 + percent / 100.0;
        self
    }

    fn note(mut self, note: String) -> Self {
        self.notes.push(note);
        self
    }
}

/// Read-only facts every step consults.
#[derive(Clone, Copy, Debug)]
pub struct ModifierContext<'a> {
    pub kind: AttackKind,
    pub status: &'a StatusContext,
    pub tags: &'a TagSelections,
    pub config: &'a RulesConfig,
}

impl ModifierContext<'_> {
    fn first_strike(&self) -> bool {
        self.status.has(StatusFlags::FIRST_TURN) && self.status.has(StatusFlags::ATTACKING_FIRST)
    }

    fn is_unarmed(&self) -> bool {
        self.kind.subtype.is_unarmed()
    }

    /// Gate for `crit_chance_add`.
    fn allows_crit_bonus(&self, condition: Option<&EffectCondition>) -> bool {
        match condition {
            Some(EffectCondition::StartOfBattle) => self.status.has(StatusFlags::FIRST_TURN),
            Some(EffectCondition::SharpWeapon) => self.kind.subtype.is_blade(),
            Some(EffectCondition::FirstStrike) => self.first_strike(),
            _ => true,
        }
    }
}

/// One entry in the ordered modifier plan.
#[derive(Clone, Debug)]
pub enum ModifierStep<'m, 'c> {
    CyberMod(&'m ResolvedMod<'c>),
    OperatingSystem(&'m ResolvedMod<'c>),
    TagRules,
    Clamp,
}

/// Orders the steps for an installation: non-OS mods, OS, tags, clamp.
pub fn plan_steps<'m, 'c>(installed: &'m InstalledMods<'c>) -> Vec<ModifierStep<'m, 'c>> {
    installed
        .mods
        .iter()
        .map(ModifierStep::CyberMod)
        .chain(installed.operating_system.iter().map(ModifierStep::OperatingSystem))
        .chain([ModifierStep::TagRules, ModifierStep::Clamp])
        .collect()
}

/// Folds every planned step over `state`.
pub fn apply_modifiers(
    state: ResolutionState,
    installed: &InstalledMods<'_>,
    ctx: &ModifierContext<'_>,
) -> ResolutionState {
    plan_steps(installed)
        .into_iter()
        .fold(state, |state, step| apply_step(state, &step, ctx))
}

pub fn apply_step(
    state: ResolutionState,
    step: &ModifierStep<'_, '_>,
    ctx: &ModifierContext<'_>,
) -> ResolutionState {
    match step {
        ModifierStep::CyberMod(resolved) | ModifierStep::OperatingSystem(resolved) => {
            apply_effect_set(state, &resolved.effects, resolved.name(), ctx)
        }
        ModifierStep::TagRules => apply_tag_rules(state, ctx),
        ModifierStep::Clamp => finalize(state),
    }
}

/// Applies one modification's effect set. `source` names the modification in
/// notes and procs.
pub fn apply_effect_set(
    mut state: ResolutionState,
    effects: &EffectSet,
    source: &str,
    ctx: &ModifierContext<'_>,
) -> ResolutionState {
    let kind = ctx.kind;
    let status = ctx.status;
    let condition = effects.condition.as_ref();
    let nonzero = |v: Option<f64>| v.filter(|n| *n != 0.0);

    // Hit chance.
    if kind.is_ranged() {
        if let Some(v) = nonzero(effects.ranged_accuracy_add) {
            state.hit_chance += v / 100.0;
        }
    }
    if let Some(v) = effects.accuracy_set {
        state.hit_chance = v / 100.0;
    }
    if let Some(v) = effects.attack_chance {
        state.hit_chance = state.hit_chance.max(v / 100.0);
    }
    if condition == Some(&EffectCondition::SmartWeapon) && status.has(StatusFlags::SMART_WEAPON) {
        if let Some(v) = effects.accuracy_set {
            state.hit_chance = v / 100.0;
        }
        if let Some(v) = effects.crit_rate_set {
            state.crit_chance = v / 100.0;
        }
    }

    // Damage.
    if kind.is_melee() {
        if let Some(v) = nonzero(effects.melee_damage_add) {
            state = state.scale_damage(v);
        }
    }
    if kind.is_ranged() {
        if let Some(v) = nonzero(effects.ranged_damage_add) {
            state = state.scale_damage(v);
        }
    }
    if ctx.is_unarmed() {
        if let Some(v) = nonzero(effects.unarmed_damage_add) {
            state = state.scale_damage(v);
        }
    }
    if condition == Some(&EffectCondition::FirstStrike) && ctx.first_strike() {
        let pct = effects.damage_add_percent.unwrap_or(0.0);
        state = state
            .scale_damage(pct)
            .note(format!("First Strike bonus: +{pct}% damage from cyberware"));
    }
    if let Some(v) = nonzero(effects.first_attack_add) {
        if ctx.first_strike() {
            state = state
                .scale_damage(v)
                .note(format!("First Attack bonus: +{v}% damage from cyberware"));
        }
    }
    let melee_pct = effects.melee_damage_add.unwrap_or(0.0);
    if condition == Some(&EffectCondition::HpBelow50)
        && status.hp() < ctx.config.half_hp_threshold
        && kind.is_melee()
    {
        state = state.scale_damage(melee_pct);
    }
    if condition == Some(&EffectCondition::BurnInflicted)
        && status.has(StatusFlags::BURN)
        && kind.is_melee()
    {
        state = state.scale_damage(melee_pct);
    }
    if status.has(StatusFlags::BERSERK) {
        state = state.scale_damage(effects.damage_add_percent.unwrap_or(0.0));
        if effects.has_flag(EffectFlags::CRIT_REROLL_ONCE_PER_BATTLE) {
            state.flags |= ResolutionFlags::FORCE_CRIT;
        }
    }

    // Crit chance and multiplier.
    if let Some(v) = nonzero(effects.crit_rate_add) {
        state.crit_chance += v / 100.0;
    }
    if let Some(v) = nonzero(effects.crit_chance_add) {
        if ctx.allows_crit_bonus(condition) {
            state.crit_chance += v / 100.0;
            let note = match condition {
                Some(c) => format!("Critical chance +{v}% (condition: {c})"),
                None => format!("Critical chance +{v}%"),
            };
            state = state.note(note);
        }
    }
    if ctx.is_unarmed() {
        if let Some(v) = nonzero(effects.unarmed_crit_rate_add) {
            state.crit_chance += v / 100.0;
        }
        if let Some(v) = effects.unarmed_crit_rate_set {
            state.crit_chance = v / 100.0;
        }
        if let Some(v) = nonzero(effects.unarmed_crit_damage_add) {
            state.crit_mult *= 1.0 + v / 100.0;
        }
    }

    // Flags and procs.
    if ctx.is_unarmed() && effects.has_flag(EffectFlags::UNARMED_DISABLE_CRIT) {
        state.flags |= ResolutionFlags::DISABLE_CRIT;
    }
    if effects.has_flag(EffectFlags::CRIT_AUTO_ON_LOW_HP)
        && status.hp() <= ctx.config.low_hp_crit_threshold
    {
        state.flags |= ResolutionFlags::FORCE_CRIT;
    }
    if ctx.is_unarmed() && effects.has_flag(EffectFlags::UNARMED_SCALE_TO_CEILING) {
        state.flags |= ResolutionFlags::FORCE_MAX_ROLL;
    }
    if let Some(amount) = effects.health_points_on_crit {
        state.procs.push(Proc::HealOnCrit {
            source: source.to_owned(),
            amount,
        });
    }

    state
}

/// Fixed tag rules.
pub fn apply_tag_rules(mut state: ResolutionState, ctx: &ModifierContext<'_>) -> ResolutionState {
    let tags = ctx.tags;
    let kind = ctx.kind;

    if kind.is_melee() && tags.has(CombatTag::MeleeTraining) {
        state.crit_chance += 0.05;
    }
    if kind.subtype.is_blade() && tags.has(CombatTag::Fencing) {
        state.crit_chance += 0.15;
    }
    if kind.subtype.is_unarmed() && tags.has(CombatTag::Aikido) {
        state.damage *= 1.25;
    }
    if kind.is_ranged() && tags.has(CombatTag::Archery) && ctx.status.has(StatusFlags::ARROWS) {
        state.hit_chance += 0.15;
        state.crit_chance += 0.15;
    }
    if kind.subtype == AttackSubtype::Kick && tags.has(CombatTag::ThaiKickBoxing) {
        state.damage *= 1.5;
    }
    state
}

/// Clamps probabilities into `[0, 1]`. Disable-crit zeroes the crit chance.
pub fn finalize(mut state: ResolutionState) -> ResolutionState {
    state.hit_chance = clamp01(state.hit_chance);
    state.crit_chance = if state.has(ResolutionFlags::DISABLE_CRIT) {
        0.0
    } else {
        clamp01(state.crit_chance)
    };
    state
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::classify;
    use crate::env::{EffectValue, RawEffects};

    fn base_state() -> ResolutionState {
        ResolutionState {
            hit_chance: 0.5,
            crit_chance: 0.1,
            crit_mult: 1.3,
            damage: 10.0,
            flags: ResolutionFlags::empty(),
            notes: Vec::new(),
            procs: Vec::new(),
        }
    }

    fn effects(entries: &[(&str, EffectValue)]) -> EffectSet {
        let raw: RawEffects = entries
            .iter()
            .map(|(k, v)| ((*k).to_owned(), v.clone()))
            .collect();
        EffectSet::from_raw(&raw)
    }

    fn run(weapon: &str, status: StatusContext, tags: &TagSelections, set: &EffectSet) -> ResolutionState {
        let config = RulesConfig::default();
        let ctx = ModifierContext {
            kind: classify(weapon),
            status: &status,
            tags,
            config: &config,
        };
        apply_effect_set(base_state(), set, "Test Mod", &ctx)
    }

    fn n(v: f64) -> EffectValue {
        EffectValue::Number(v)
    }

    #[test]
    fn accuracy_set_overrides_and_attack_chance_only_raises() {
        let set = effects(&[("accuracy_set", n(30.0)), ("attack_chance", n(40.0))]);
        let state = run("Ranged", StatusContext::default(), &TagSelections::new(), &set);
        assert!((state.hit_chance - 0.4).abs() < 1e-12);

        let floor = effects(&[("attack_chance", n(20.0))]);
        let state = run("Ranged", StatusContext::default(), &TagSelections::new(), &floor);
        assert_eq!(state.hit_chance, 0.5);
    }

    #[test]
    fn ranged_accuracy_ignored_for_melee() {
        let set = effects(&[("ranged_accuracy_add", n(20.0))]);
        let melee = run("Sharp", StatusContext::default(), &TagSelections::new(), &set);
        assert_eq!(melee.hit_chance, 0.5);
        let ranged = run("Ranged", StatusContext::default(), &TagSelections::new(), &set);
        assert!((ranged.hit_chance - 0.7).abs() < 1e-12);
    }

    #[test]
    fn smart_condition_needs_smart_status() {
        let set = effects(&[
            ("condition", "smart_weapon".into()),
            ("crit_rate_set", n(50.0)),
        ]);
        let dumb = run("Ranged", StatusContext::default(), &TagSelections::new(), &set);
        assert_eq!(dumb.crit_chance, 0.1);

        let smart_status = StatusContext::default().with_flags(StatusFlags::SMART_WEAPON);
        let smart = run("Ranged", smart_status, &TagSelections::new(), &set);
        assert_eq!(smart.crit_chance, 0.5);
    }

    #[test]
    fn first_strike_and_first_attack_both_fire() {
        let set = effects(&[
            ("condition", "first_strike".into()),
            ("damage_add_percent", n(10.0)),
            ("first_attack_add", n(20.0)),
        ]);
        let status = StatusContext::default()
            .with_flags(StatusFlags::FIRST_TURN | StatusFlags::ATTACKING_FIRST);
        let state = run("Blunt", status, &TagSelections::new(), &set);

        assert!((state.damage - 10.0 * 1.1 * 1.2).abs() < 1e-9);
        assert_eq!(
            state.notes,
            vec![
                "First Strike bonus: +10% damage from cyberware".to_owned(),
                "First Attack bonus: +20% damage from cyberware".to_owned(),
            ]
        );
    }

    #[test]
    fn first_strike_needs_both_flags() {
        let set = effects(&[
            ("condition", "first_strike".into()),
            ("damage_add_percent", n(10.0)),
        ]);
        let status = StatusContext::default().with_flags(StatusFlags::FIRST_TURN);
        let state = run("Blunt", status, &TagSelections::new(), &set);
        assert_eq!(state.damage, 10.0);
        assert!(state.notes.is_empty());
    }

    #[test]
    fn low_hp_condition_reapplies_melee_bonus() {
        let set = effects(&[
            ("condition", "hp_below_50".into()),
            ("melee_damage_add", n(10.0)),
        ]);
        let hurt = run("Blunt", StatusContext::new(30.0), &TagSelections::new(), &set);
        assert!((hurt.damage - 10.0 * 1.1 * 1.1).abs() < 1e-9);

        let healthy = run("Blunt", StatusContext::new(80.0), &TagSelections::new(), &set);
        assert!((healthy.damage - 11.0).abs() < 1e-9);
    }

    #[test]
    fn berserk_scales_and_can_force_crit() {
        let set = effects(&[
            ("damage_add_percent", n(50.0)),
            ("crit_reroll_once_per_battle", true.into()),
        ]);
        let status = StatusContext::default().with_flags(StatusFlags::BERSERK);
        let state = run("Slice", status, &TagSelections::new(), &set);
        assert_eq!(state.damage, 15.0);
        assert!(state.has(ResolutionFlags::FORCE_CRIT));
    }

    #[test]
    fn crit_chance_bonus_respects_condition_and_notes_it() {
        let set = effects(&[
            ("condition", "sharp_weapon".into()),
            ("crit_chance_add", n(10.0)),
        ]);
        let sharp = run("Sharp", StatusContext::default(), &TagSelections::new(), &set);
        assert!((sharp.crit_chance - 0.2).abs() < 1e-12);
        assert_eq!(
            sharp.notes,
            vec!["Critical chance +10% (condition: sharp_weapon)".to_owned()]
        );

        let blunt = run("Blunt", StatusContext::default(), &TagSelections::new(), &set);
        assert_eq!(blunt.crit_chance, 0.1);
        assert!(blunt.notes.is_empty());
    }

    #[test]
    fn unarmed_only_effects() {
        let set = effects(&[
            ("unarmed_crit_rate_set", n(40.0)),
            ("unarmed_crit_damage_add", n(50.0)),
            ("unarmed_disable_crit", true.into()),
            ("unarmed_scale_to_ceiling", true.into()),
        ]);
        let kick = run("Kick", StatusContext::default(), &TagSelections::new(), &set);
        assert_eq!(kick.crit_chance, 0.4);
        assert!((kick.crit_mult - 1.95).abs() < 1e-12);
        assert!(kick.has(ResolutionFlags::DISABLE_CRIT | ResolutionFlags::FORCE_MAX_ROLL));

        let whip = run("Whip", StatusContext::default(), &TagSelections::new(), &set);
        assert_eq!(whip.crit_chance, 0.1);
        assert!(whip.flags.is_empty());
    }

    #[test]
    fn heal_proc_records_source() {
        let set = effects(&[("health_points_on_crit", n(5.0))]);
        let state = run("Blunt", StatusContext::default(), &TagSelections::new(), &set);
        assert_eq!(
            state.procs,
            vec![Proc::HealOnCrit {
                source: "Test Mod".into(),
                amount: 5.0,
            }]
        );
    }

    #[test]
    fn tag_rules_follow_subtype() {
        let config = RulesConfig::default();
        let status = StatusContext::default().with_flags(StatusFlags::ARROWS);
        let tags = TagSelections::new()
            .with_tag("Melee Training")
            .with_tag("Fencing")
            .with_tag("Archery")
            .with_tag("Thai Kick Boxing")
            .with_tag("Aikido");

        let ctx = |weapon: &str| ModifierContext {
            kind: classify(weapon),
            status: &status,
            tags: &tags,
            config: &config,
        };

        let slice = apply_tag_rules(base_state(), &ctx("Slice"));
        assert!((slice.crit_chance - 0.3).abs() < 1e-12);

        let kick = apply_tag_rules(base_state(), &ctx("Kick"));
        assert!((kick.damage - 10.0 * 1.25 * 1.5).abs() < 1e-9);

        let ranged = apply_tag_rules(base_state(), &ctx("Ranged"));
        assert!((ranged.hit_chance - 0.65).abs() < 1e-12);
        assert!((ranged.crit_chance - 0.25).abs() < 1e-12);
    }

    #[test]
    fn finalize_clamps_and_disables() {
        let mut state = base_state();
        state.hit_chance = 1.4;
        state.crit_chance = -0.2;
        let clamped = finalize(state);
        assert_eq!(clamped.hit_chance, 1.0);
        assert_eq!(clamped.crit_chance, 0.0);

        let mut disabled = base_state();
        disabled.flags |= ResolutionFlags::DISABLE_CRIT;
        assert_eq!(finalize(disabled).crit_chance, 0.0);
    }

    #[test]
    fn low_hp_forces_crit_at_threshold_only() {
        let set = effects(&[("crit_auto_on_low_hp", EffectValue::Flag(true))]);
        let at = run("Unarmed", StatusContext::new(20.0), &TagSelections::new(), &set);
        assert!(at.has(ResolutionFlags::FORCE_CRIT));

        let above = run("Unarmed", StatusContext::new(20.1), &TagSelections::new(), &set);
        assert!(!above.has(ResolutionFlags::FORCE_CRIT));
    }

    #[test]
    fn burn_condition_reapplies_melee_bonus_for_melee_only() {
        let set = effects(&[
            ("condition", "burn_inflicted".into()),
            ("melee_damage_add", n(20.0)),
        ]);
        let burning = StatusContext::default().with_flags(StatusFlags::BURN);

        let melee = run("Blunt", burning, &TagSelections::new(), &set);
        assert!((melee.damage - 10.0 * 1.2 * 1.2).abs() < 1e-9);

        let no_burn = run("Blunt", StatusContext::default(), &TagSelections::new(), &set);
        assert!((no_burn.damage - 12.0).abs() < 1e-9);

        let ranged = run("Ranged", burning, &TagSelections::new(), &set);
        assert_eq!(ranged.damage, 10.0);
    }

    #[test]
    fn start_of_battle_gates_crit_chance_bonus() {
        let set = effects(&[
            ("condition", "start_of_battle".into()),
            ("crit_chance_add", n(5.0)),
        ]);
        let later = run("Ranged", StatusContext::default(), &TagSelections::new(), &set);
        assert_eq!(later.crit_chance, 0.1);
        assert!(later.notes.is_empty());

        let opening = StatusContext::default().with_flags(StatusFlags::FIRST_TURN);
        let first = run("Ranged", opening, &TagSelections::new(), &set);
        assert!((first.crit_chance - 0.15).abs() < 1e-12);
        assert_eq!(
            first.notes,
            vec!["Critical chance +5% (condition: start_of_battle)".to_owned()]
        );
    }
}
