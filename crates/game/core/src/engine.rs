//! Attack calculation pipeline.
//!
//! [`AttackEngine`] is the single entry point that runs every stage in order:
//! classify, resolve effective attributes, evaluate base formulas, fold the
//! modifier stack, roll, and render the trace. Every number handed from one
//! stage to the next is checked for finiteness; a failure becomes a
//! [`CalculationError`] instead of a zero-damage result.

use crate::character::{SerializedCyberMods, StatusContext, TagSelections, WeaponConfig};
use crate::combat::{
    BaseEvaluation, CalculationResult, ModifierContext, Resolution, ResolutionState,
    apply_modifiers, classify, evaluate_base, format_trace, resolve,
};
use crate::config::RulesConfig;
use crate::env::{CatalogOracle, RandomSource, resolve_installed};
use crate::error::{CalculationError, CalculationStage, ensure_finite};
use crate::stats::{Attributes, apply_installed};

/// Inputs for one calculation. Everything is borrowed and left untouched.
#[derive(Clone, Copy, Debug)]
pub struct CalculationRequest<'a> {
    pub attributes: &'a Attributes,
    pub tags: &'a TagSelections,
    pub cyber_mods: &'a SerializedCyberMods,
    pub weapon: &'a WeaponConfig,
    pub status: StatusContext,
}

impl<'a> CalculationRequest<'a> {
    pub fn new(
        attributes: &'a Attributes,
        tags: &'a TagSelections,
        cyber_mods: &'a SerializedCyberMods,
        weapon: &'a WeaponConfig,
    ) -> Self {
        Self {
            attributes,
            tags,
            cyber_mods,
            weapon,
            status: StatusContext::default(),
        }
    }

    #[must_use]
    pub fn with_status(mut self, status: StatusContext) -> Self {
        self.status = status;
        self
    }
}

/// Runs attack calculations against a catalog and rules configuration.
pub struct AttackEngine<'a, C: CatalogOracle + ?Sized> {
    catalog: &'a C,
    config: &'a RulesConfig,
}

impl<'a, C: CatalogOracle + ?Sized> AttackEngine<'a, C> {
    pub fn new(catalog: &'a C, config: &'a RulesConfig) -> Self {
        Self { catalog, config }
    }

    /// Runs one calculation, drawing from `rng` in the order documented on
    /// [`RandomSource`].
    ///
    /// # Errors
    ///
    /// - [`CalculationError::InvalidConfig`] if a rules constant is not finite
    /// - [`CalculationError::NonFinite`] if any stage produces NaN or infinity
    pub fn calculate<R: RandomSource + ?Sized>(
        &self,
        request: &CalculationRequest<'_>,
        rng: &mut R,
    ) -> Result<CalculationResult, CalculationError> {
        self.config.validate()?;

        let kind = classify(&request.weapon.kind);
        let installed = resolve_installed(request.cyber_mods, self.catalog);
        let base_attributes = request.attributes.sanitized(self.config.attribute_baseline);
        let effective = apply_installed(&base_attributes, &installed);
        let status = request.status.seeded_from(request.weapon);

        let base = evaluate_base(
            kind,
            &effective,
            request.tags,
            request.weapon,
            self.config,
            rng,
        );
        check_base(&base)?;

        let ctx = ModifierContext {
            kind,
            status: &status,
            tags: request.tags,
            config: self.config,
        };
        let state = apply_modifiers(ResolutionState::from_base(&base, &status), &installed, &ctx);
        check_state(&state)?;

        let resolution = resolve(&state, rng);
        check_resolution(&resolution)?;

        let trace = format_trace(&base, &state, &resolution);
        Ok(CalculationResult {
            kind,
            outcome: resolution.outcome,
            damage: resolution.damage,
            base_damage: base.damage,
            hit_chance: state.hit_chance,
            crit_chance: state.crit_chance,
            crit_mult: state.crit_mult,
            skill_roll: base.skill_roll,
            effective_attributes: effective,
            formula: base.formula,
            notes: state.notes,
            procs: state.procs,
            skipped: installed.skipped,
            trace,
        })
    }

    /// Runs one calculation and returns only the trace.
    pub fn compute_damage<R: RandomSource + ?Sized>(
        &self,
        request: &CalculationRequest<'_>,
        rng: &mut R,
    ) -> Result<String, CalculationError> {
        self.calculate(request, rng).map(|result| result.trace)
    }
}

fn check_base(base: &BaseEvaluation) -> Result<(), CalculationError> {
    let stage = CalculationStage::BaseFormula;
    ensure_finite(base.hit_chance, stage, "hit_chance")?;
    ensure_finite(base.crit_chance, stage, "crit_chance")?;
    ensure_finite(base.crit_mult, stage, "crit_mult")?;
    ensure_finite(base.damage, stage, "damage")?;
    Ok(())
}

fn check_state(state: &ResolutionState) -> Result<(), CalculationError> {
    let stage = CalculationStage::Modifiers;
    ensure_finite(state.hit_chance, stage, "hit_chance")?;
    ensure_finite(state.crit_chance, stage, "crit_chance")?;
    ensure_finite(state.crit_mult, stage, "crit_mult")?;
    ensure_finite(state.damage, stage, "damage")?;
    Ok(())
}

fn check_resolution(resolution: &Resolution) -> Result<(), CalculationError> {
    ensure_finite(resolution.damage, CalculationStage::Resolution, "damage")?;
    Ok(())
}
