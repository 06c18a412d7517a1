//! Base hit, crit and damage from attributes.
//!
//! # Damage formulas
//!
//! With `R = reflexes * 0.01 * roll` and `W = weapon_base * 0.01` (zero when
//! the weapon has no positive base):
//!
//! ```text
//! unarmed  body/10 + cool/5 + R + 0.75
//! kick     2 * (body/10 + cool/5 + R + 0.75)
//! blunt    (body/8 + cool/5 + R + 0.75) * W
//! sharp    (body/10 + cool/4 + R + 0.75) * W
//! whip     1.5 * (intelligence/8 + cool/4 + R + 0.75)
//! slice    1.5 * (body/10 + cool/3 + R + 0.75)
//! blast    1.5 * (technical/8 + cool/4 + R + 0.75)
//! ranged   intelligence/2 + reflexes/10 + W * roll
//! ```

use super::classify::{AttackCategory, AttackKind, AttackSubtype};
use super::math::{ceil_tenth, clamp01};
use crate::character::{CombatTag, TagSelections, WeaponConfig};
use crate::config::RulesConfig;
use crate::env::RandomSource;
use crate::stats::{Attribute, Attributes};

const FLAT_BONUS: f64 = 0.75;

/// Output of the base formula stage.
#[derive(Clone, Debug, PartialEq)]
pub struct BaseEvaluation {
    pub kind: AttackKind,
    /// Attributes after tag pre-adjustments.
    pub attributes: Attributes,
    pub hit_chance: f64,
    pub crit_chance: f64,
    pub crit_mult: f64,
    /// Damage before modifiers, rounded up to one decimal.
    pub damage: f64,
    pub skill_roll: i64,
    pub formula: String,
}

/// Evaluates the base stage. Draws exactly one value (the skill roll).
pub fn evaluate_base<R: RandomSource + ?Sized>(
    kind: AttackKind,
    effective: &Attributes,
    tags: &TagSelections,
    weapon: &WeaponConfig,
    config: &RulesConfig,
    rng: &mut R,
) -> BaseEvaluation {
    let attrs = effective.sanitized(config.attribute_baseline);
    let skill = attrs.get(Attribute::Skill);
    let technical = attrs.get(Attribute::Technical);

    let hit_chance = match kind.category {
        AttackCategory::Melee => 1.0,
        AttackCategory::Ranged => {
            clamp01(config.ranged_hit_base + config.ranged_hit_per_point * (technical + skill))
        }
    };
    let crit_chance = clamp01(config.crit_base + config.crit_per_skill * skill);
    let crit_mult = base_crit_mult(kind, &attrs, config);

    let cool = attrs.get(Attribute::Cool);
    let roll_ceiling = cool + config.skill_roll_cool_offset;
    let skill_roll = skill_roll(skill, roll_ceiling, rng);

    let adjusted = tag_adjusted(kind, attrs, tags, config);
    let inputs = FormulaInputs {
        attrs: &adjusted,
        weapon_base: weapon.base(),
        roll: skill_roll as f64,
        roll_floor: skill,
        roll_ceiling,
    };

    BaseEvaluation {
        kind,
        attributes: adjusted,
        hit_chance,
        crit_chance,
        crit_mult,
        damage: ceil_tenth(inputs.damage(kind.subtype)),
        skill_roll,
        formula: inputs.describe(kind.subtype),
    }
}

fn base_crit_mult(kind: AttackKind, attrs: &Attributes, config: &RulesConfig) -> f64 {
    if kind.is_melee() || kind.subtype == AttackSubtype::Blast {
        config.melee_crit_mult_base + attrs.get(Attribute::Skill) / 100.0
    } else {
        config.ranged_crit_mult_base + attrs.get(Attribute::Technical) / 100.0
    }
}

/// Boxing and Brawling train unarmed and kick attacks only.
fn tag_adjusted(
    kind: AttackKind,
    mut attrs: Attributes,
    tags: &TagSelections,
    config: &RulesConfig,
) -> Attributes {
    if kind.subtype.is_unarmed() {
        if tags.has(CombatTag::Boxing) {
            attrs.add(Attribute::Body, config.unarmed_training_bonus);
        }
        if tags.has(CombatTag::Brawling) {
            attrs.add(Attribute::Reflexes, config.unarmed_training_bonus);
        }
    }
    attrs
}

/// Uniform integer between the two bounds, inclusive, in either order.
///
/// Non-finite bounds roll 0. A range holding no integer (e.g. `10.2..10.8`)
/// rolls the rounded lower bound.
pub fn skill_roll<R: RandomSource + ?Sized>(a: f64, b: f64, rng: &mut R) -> i64 {
    if !a.is_finite() || !b.is_finite() {
        return 0;
    }
    let (low, high) = if a <= b { (a, b) } else { (b, a) };
    let min = low.ceil();
    let max = high.floor();
    if max < min {
        return low.round() as i64;
    }
    rng.range_inclusive(min as i64, max as i64)
}

struct FormulaInputs<'a> {
    attrs: &'a Attributes,
    weapon_base: f64,
    roll: f64,
    roll_floor: f64,
    roll_ceiling: f64,
}

impl FormulaInputs<'_> {
    fn get(&self, attribute: Attribute) -> f64 {
        self.attrs.get(attribute)
    }

    fn weapon_factor(&self) -> f64 {
        if self.weapon_base > 0.0 {
            self.weapon_base * 0.01
        } else {
            0.0
        }
    }

    fn reflex_term(&self) -> f64 {
        self.get(Attribute::Reflexes) * 0.01 * self.roll
    }

    fn damage(&self, subtype: AttackSubtype) -> f64 {
        let body = self.get(Attribute::Body);
        let cool = self.get(Attribute::Cool);
        let intelligence = self.get(Attribute::Intelligence);
        let technical = self.get(Attribute::Technical);
        let r = self.reflex_term();
        let w = self.weapon_factor();

        match subtype {
            AttackSubtype::Unarmed => body / 10.0 + cool / 5.0 + r + FLAT_BONUS,
            AttackSubtype::Kick => 2.0 * (body / 10.0 + cool / 5.0 + r + FLAT_BONUS),
            AttackSubtype::Blunt => (body / 8.0 + cool / 5.0 + r + FLAT_BONUS) * w,
            AttackSubtype::Sharp => (body / 10.0 + cool / 4.0 + r + FLAT_BONUS) * w,
            AttackSubtype::Whip => 1.5 * (intelligence / 8.0 + cool / 4.0 + r + FLAT_BONUS),
            AttackSubtype::Slice => 1.5 * (body / 10.0 + cool / 3.0 + r + FLAT_BONUS),
            AttackSubtype::Blast => 1.5 * (technical / 8.0 + cool / 4.0 + r + FLAT_BONUS),
            AttackSubtype::Ranged => {
                intelligence / 2.0 + self.get(Attribute::Reflexes) / 10.0 + w * self.roll
            }
        }
    }

    fn rand_text(&self) -> String {
        format!("RAND({}, {})", self.roll_floor, self.roll_ceiling)
    }

    fn weapon_text(&self) -> String {
        if self.weapon_base > 0.0 {
            format!("{} * 0.01", self.weapon_base)
        } else {
            "0".to_owned()
        }
    }

    fn reflex_text(&self) -> String {
        format!(
            "(Reflexes {}) * (0.01 * {})",
            self.get(Attribute::Reflexes),
            self.rand_text()
        )
    }

    fn describe(&self, subtype: AttackSubtype) -> String {
        let body = self.get(Attribute::Body);
        let cool = self.get(Attribute::Cool);
        let intelligence = self.get(Attribute::Intelligence);
        let technical = self.get(Attribute::Technical);
        let reflex = self.reflex_text();
        let unarmed =
            format!("((Body {body}) / 10) + ((Cool {cool}) / 5) + {reflex} + {FLAT_BONUS}");

        match subtype {
            AttackSubtype::Unarmed => unarmed,
            AttackSubtype::Kick => format!("2 * [ {unarmed} ]"),
            AttackSubtype::Blunt => format!(
                "(((Body {body}) / 8) + ((Cool {cool}) / 5) + {reflex} + {FLAT_BONUS}) * ({})",
                self.weapon_text()
            ),
            AttackSubtype::Sharp => format!(
                "(((Body {body}) / 10) + ((Cool {cool}) / 4) + {reflex} + {FLAT_BONUS}) * ({})",
                self.weapon_text()
            ),
            AttackSubtype::Whip => format!(
                "1.5 * [ (Intelligence {intelligence} / 8) + (Cool {cool} / 4) + {reflex} + {FLAT_BONUS} ]"
            ),
            AttackSubtype::Slice => format!(
                "1.5 * [ (Body {body} / 10) + (Cool {cool} / 3) + {reflex} + {FLAT_BONUS} ]"
            ),
            AttackSubtype::Blast => format!(
                "1.5 * [ (Technical {technical} / 8) + (Cool {cool} / 4) + {reflex} + {FLAT_BONUS} ]"
            ),
            AttackSubtype::Ranged => format!(
                "(Intelligence {intelligence} / 2) + (Reflexes {} / 10) + (({}) * {})",
                self.get(Attribute::Reflexes),
                self.weapon_text(),
                self.rand_text()
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::classify;
    use crate::env::{PcgRng, SequenceRng};

    fn evaluate(weapon: &WeaponConfig, attrs: &Attributes, tags: &TagSelections) -> BaseEvaluation {
        let mut rng = SequenceRng::new(vec![0.0]);
        evaluate_base(
            classify(&weapon.kind),
            attrs,
            tags,
            weapon,
            &RulesConfig::default(),
            &mut rng,
        )
    }

    #[test]
    fn melee_base_hit_is_certain() {
        for kind in ["Unarmed Melee", "Kick", "Blunt", "Sharp", "Whip", "Slice"] {
            let eval = evaluate(
                &WeaponConfig::new(kind, 50.0),
                &Attributes::default(),
                &TagSelections::new(),
            );
            assert_eq!(eval.hit_chance, 1.0, "{kind}");
        }
    }

    #[test]
    fn ranged_base_hit_from_technical_and_skill() {
        let eval = evaluate(
            &WeaponConfig::new("Ranged Attack", 40.0),
            &Attributes::default(),
            &TagSelections::new(),
        );
        assert!((eval.hit_chance - 0.57).abs() < 1e-12);
        assert!((eval.crit_chance - 0.13).abs() < 1e-12);
        assert!((eval.crit_mult - 1.45).abs() < 1e-12);
    }

    #[test]
    fn blast_uses_melee_crit_multiplier() {
        let eval = evaluate(
            &WeaponConfig::new("Blast", 0.0),
            &Attributes::default().with(Attribute::Skill, 30.0),
            &TagSelections::new(),
        );
        assert!((eval.crit_mult - 1.5).abs() < 1e-12);
    }

    #[test]
    fn unarmed_damage_and_formula_text() {
        // Roll draws 0.0, so the roll is the lower bound: skill 10.
        let eval = evaluate(
            &WeaponConfig::new("Unarmed Melee", 0.0),
            &Attributes::default(),
            &TagSelections::new(),
        );
        assert_eq!(eval.skill_roll, 10);
        // 10/10 + 10/5 + 10*0.01*10 + 0.75 = 4.75 -> 4.8
        assert_eq!(eval.damage, 4.8);
        assert_eq!(
            eval.formula,
            "((Body 10) / 10) + ((Cool 10) / 5) + (Reflexes 10) * (0.01 * RAND(10, 60)) + 0.75"
        );
    }

    #[test]
    fn boxing_and_brawling_only_train_unarmed() {
        let tags = TagSelections::new().with_tag("Boxing").with_tag("Brawling");
        let kick = evaluate(
            &WeaponConfig::new("Kick", 0.0),
            &Attributes::default(),
            &tags,
        );
        assert_eq!(kick.attributes.get(Attribute::Body), 20.0);
        assert_eq!(kick.attributes.get(Attribute::Reflexes), 20.0);
        assert!(kick.formula.starts_with("2 * [ ((Body 20) / 10)"));

        let sharp = evaluate(
            &WeaponConfig::new("Sharp", 50.0),
            &Attributes::default(),
            &tags,
        );
        assert_eq!(sharp.attributes.get(Attribute::Body), 10.0);
    }

    #[test]
    fn weaponless_blunt_deals_nothing() {
        let eval = evaluate(
            &WeaponConfig::new("Blunt", 0.0),
            &Attributes::default(),
            &TagSelections::new(),
        );
        assert_eq!(eval.damage, 0.0);
        assert!(eval.formula.ends_with("* (0)"));
    }

    #[test]
    fn ranged_formula_names_weapon_factor() {
        let eval = evaluate(
            &WeaponConfig::new("Ranged Attack", 40.0),
            &Attributes::default(),
            &TagSelections::new(),
        );
        // 10/2 + 10/10 + 0.4 * 10 = 10
        assert_eq!(eval.damage, 10.0);
        assert_eq!(
            eval.formula,
            "(Intelligence 10 / 2) + (Reflexes 10 / 10) + ((40 * 0.01) * RAND(10, 60))"
        );
    }

    #[test]
    fn skill_roll_edge_cases() {
        let mut rng = PcgRng::seeded(3);
        assert_eq!(skill_roll(f64::NAN, 60.0, &mut rng), 0);
        assert_eq!(skill_roll(10.2, 10.8, &mut rng), 10);
        assert_eq!(skill_roll(60.0, 60.0, &mut rng), 60);
        for _ in 0..200 {
            let roll = skill_roll(70.0, 15.5, &mut rng);
            assert!((16..=70).contains(&roll));
        }
    }

    #[test]
    fn skill_roll_survives_bounds_beyond_i64() {
        let mut rng = PcgRng::seeded(11);
        for _ in 0..200 {
            assert!(skill_roll(-1e19, 60.0, &mut rng) <= 60);
            skill_roll(-1e300, 1e300, &mut rng);
        }
    }
}
