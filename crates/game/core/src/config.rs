use crate::error::CalculationError;

/// Balance constants for attack calculation.
///
/// Every field has a default, so a partial `rules.toml` only overrides what it
/// names.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RulesConfig {
    /// Value read for any missing or non-finite attribute.
    pub attribute_baseline: f64,
    /// Ranged hit chance before attributes.
    pub ranged_hit_base: f64,
    /// Ranged hit chance gained per point of technical and skill.
    pub ranged_hit_per_point: f64,
    pub crit_base: f64,
    pub crit_per_skill: f64,
    /// Crit multiplier base for melee and blast attacks (plus skill / 100).
    pub melee_crit_mult_base: f64,
    /// Crit multiplier base for other ranged attacks (plus technical / 100).
    pub ranged_crit_mult_base: f64,
    /// Upper skill-roll bound is cool plus this offset.
    pub skill_roll_cool_offset: f64,
    /// HP percent at or below which `crit_auto_on_low_hp` fires.
    pub low_hp_crit_threshold: f64,
    /// HP percent below which `hp_below_50` effects fire.
    pub half_hp_threshold: f64,
    /// Attribute bonus granted by Boxing and Brawling on unarmed attacks.
    pub unarmed_training_bonus: f64,
}

impl RulesConfig {
    pub const DEFAULT_ATTRIBUTE_BASELINE: f64 = 10.0;
    pub const DEFAULT_RANGED_HIT_BASE: f64 = 0.47;
    pub const DEFAULT_RANGED_HIT_PER_POINT: f64 = 0.005;
    pub const DEFAULT_CRIT_BASE: f64 = 0.03;
    pub const DEFAULT_CRIT_PER_SKILL: f64 = 0.01;
    pub const DEFAULT_MELEE_CRIT_MULT_BASE: f64 = 1.2;
    pub const DEFAULT_RANGED_CRIT_MULT_BASE: f64 = 1.35;
    pub const DEFAULT_SKILL_ROLL_COOL_OFFSET: f64 = 50.0;
    pub const DEFAULT_LOW_HP_CRIT_THRESHOLD: f64 = 20.0;
    pub const DEFAULT_HALF_HP_THRESHOLD: f64 = 50.0;
    pub const DEFAULT_UNARMED_TRAINING_BONUS: f64 = 10.0;

    pub fn new() -> Self {
        Self {
            attribute_baseline: Self::DEFAULT_ATTRIBUTE_BASELINE,
            ranged_hit_base: Self::DEFAULT_RANGED_HIT_BASE,
            ranged_hit_per_point: Self::DEFAULT_RANGED_HIT_PER_POINT,
            crit_base: Self::DEFAULT_CRIT_BASE,
            crit_per_skill: Self::DEFAULT_CRIT_PER_SKILL,
            melee_crit_mult_base: Self::DEFAULT_MELEE_CRIT_MULT_BASE,
            ranged_crit_mult_base: Self::DEFAULT_RANGED_CRIT_MULT_BASE,
            skill_roll_cool_offset: Self::DEFAULT_SKILL_ROLL_COOL_OFFSET,
            low_hp_crit_threshold: Self::DEFAULT_LOW_HP_CRIT_THRESHOLD,
            half_hp_threshold: Self::DEFAULT_HALF_HP_THRESHOLD,
            unarmed_training_bonus: Self::DEFAULT_UNARMED_TRAINING_BONUS,
        }
    }

    /// Rejects configurations containing NaN or infinite constants.
    pub fn validate(&self) -> Result<(), CalculationError> {
        let fields = [
            ("attribute_baseline", self.attribute_baseline),
            ("ranged_hit_base", self.ranged_hit_base),
            ("ranged_hit_per_point", self.ranged_hit_per_point),
            ("crit_base", self.crit_base),
            ("crit_per_skill", self.crit_per_skill),
            ("melee_crit_mult_base", self.melee_crit_mult_base),
            ("ranged_crit_mult_base", self.ranged_crit_mult_base),
            ("skill_roll_cool_offset", self.skill_roll_cool_offset),
            ("low_hp_crit_threshold", self.low_hp_crit_threshold),
            ("half_hp_threshold", self.half_hp_threshold),
            ("unarmed_training_bonus", self.unarmed_training_bonus),
        ];
        match fields.iter().find(|(_, value)| !value.is_finite()) {
            Some((name, _)) => Err(CalculationError::InvalidConfig(name)),
            None => Ok(()),
        }
    }
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self::new()
    }
}
