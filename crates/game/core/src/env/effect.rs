//! Effect values and typed effect sets.
//!
//! Catalog files describe cyber-mod effects as loose key/value bags. The bag is
//! kept as [`RawEffects`] so tiers can override individual keys, then converted
//! once into an [`EffectSet`] whose fields are the only keys the engine knows.
//! Unknown keys and values of the wrong shape simply never reach a field.

use std::collections::BTreeMap;

use crate::stats::{Attribute, CivilStat};

/// A single loosely typed catalog value.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum EffectValue {
    Number(f64),
    Flag(bool),
    Text(String),
    /// Lists, maps, null. Kept so the bag round-trips without failing.
    #[default]
    Unsupported,
}

impl EffectValue {
    /// Finite number, or text that parses as one.
    pub fn as_number(&self) -> Option<f64> {
        let value = match self {
            EffectValue::Number(n) => *n,
            EffectValue::Text(text) => text.trim().parse::<f64>().ok()?,
            _ => return None,
        };
        value.is_finite().then_some(value)
    }

    /// Truthiness: `true`, any nonzero number, any non-empty text.
    pub fn as_flag(&self) -> bool {
        match self {
            EffectValue::Flag(flag) => *flag,
            EffectValue::Number(n) => n.is_finite() && *n != 0.0,
            EffectValue::Text(text) => !text.is_empty(),
            EffectValue::Unsupported => false,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            EffectValue::Text(text) => Some(text),
            _ => None,
        }
    }
}

impl From<f64> for EffectValue {
    fn from(value: f64) -> Self {
        EffectValue::Number(value)
    }
}

impl From<bool> for EffectValue {
    fn from(value: bool) -> Self {
        EffectValue::Flag(value)
    }
}

impl From<&str> for EffectValue {
    fn from(value: &str) -> Self {
        EffectValue::Text(value.to_owned())
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for EffectValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            EffectValue::Number(n) => serializer.serialize_f64(*n),
            EffectValue::Flag(flag) => serializer.serialize_bool(*flag),
            EffectValue::Text(text) => serializer.serialize_str(text),
            EffectValue::Unsupported => serializer.serialize_none(),
        }
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for EffectValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_any(EffectValueVisitor)
    }
}

#[cfg(feature = "serde")]
struct EffectValueVisitor;

#[cfg(feature = "serde")]
impl<'de> serde::de::Visitor<'de> for EffectValueVisitor {
    type Value = EffectValue;

    fn expecting(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("a number, boolean or string")
    }

    fn visit_bool<E>(self, v: bool) -> Result<Self::Value, E> {
        Ok(EffectValue::Flag(v))
    }

    fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E> {
        Ok(EffectValue::Number(v as f64))
    }

    fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E> {
        Ok(EffectValue::Number(v as f64))
    }

    fn visit_f64<E>(self, v: f64) -> Result<Self::Value, E> {
        Ok(EffectValue::Number(v))
    }

    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E> {
        Ok(EffectValue::Text(v.to_owned()))
    }

    fn visit_string<E>(self, v: String) -> Result<Self::Value, E> {
        Ok(EffectValue::Text(v))
    }

    fn visit_unit<E>(self) -> Result<Self::Value, E> {
        Ok(EffectValue::Unsupported)
    }

    fn visit_none<E>(self) -> Result<Self::Value, E> {
        Ok(EffectValue::Unsupported)
    }

    fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        serde::Deserialize::deserialize(deserializer)
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: serde::de::SeqAccess<'de>,
    {
        while seq.next_element::<serde::de::IgnoredAny>()?.is_some() {}
        Ok(EffectValue::Unsupported)
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: serde::de::MapAccess<'de>,
    {
        while map
            .next_entry::<serde::de::IgnoredAny, serde::de::IgnoredAny>()?
            .is_some()
        {}
        Ok(EffectValue::Unsupported)
    }
}

/// Key/value effect bag as it appears in catalog files.
pub type RawEffects = BTreeMap<String, EffectValue>;

/// Effect keys that add to a core attribute.
pub const ATTRIBUTE_EFFECT_KEYS: &[(&str, Attribute)] = &[
    ("body_add", Attribute::Body),
    ("strength_add", Attribute::Body),
    ("cool_add", Attribute::Cool),
    ("willpower_add", Attribute::Willpower),
    ("int_add", Attribute::Intelligence),
    ("intelligence_add", Attribute::Intelligence),
    ("reflex_add", Attribute::Reflexes),
    ("reflexes_add", Attribute::Reflexes),
    ("skill_add", Attribute::Skill),
    ("technical_add", Attribute::Technical),
    ("technical_ability_add", Attribute::Technical),
];

/// Effect keys that add to a civil stat.
pub const CIVIL_EFFECT_KEYS: &[(&str, CivilStat)] = &[
    ("appeal_add", CivilStat::Appeal),
    ("performance_add", CivilStat::Performance),
    ("crafting_add", CivilStat::Crafting),
    ("driving_add", CivilStat::Driving),
    ("evasion_add", CivilStat::Evasion),
    ("intimidation_add", CivilStat::Intimidation),
    ("luck_add", CivilStat::Luck),
    ("gambler_add", CivilStat::Luck),
    ("perception_add", CivilStat::Perception),
    ("persuasion_add", CivilStat::Persuasion),
    ("persuassion_add", CivilStat::Persuasion),
    ("tolerance_add", CivilStat::Tolerance),
];

pub fn attribute_for_key(key: &str) -> Option<Attribute> {
    ATTRIBUTE_EFFECT_KEYS
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, attr)| *attr)
}

pub fn civil_for_key(key: &str) -> Option<CivilStat> {
    CIVIL_EFFECT_KEYS
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, stat)| *stat)
}

/// Situational gate attached to an effect set.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EffectCondition {
    FirstStrike,
    SmartWeapon,
    HpBelow50,
    BurnInflicted,
    StartOfBattle,
    SharpWeapon,
    /// Any other label. Passes every gate that checks a condition.
    Other(String),
}

impl EffectCondition {
    /// Parses a condition label. Blank labels mean "no condition".
    pub fn parse(label: &str) -> Option<Self> {
        let trimmed = label.trim();
        if trimmed.is_empty() {
            return None;
        }
        let condition = match trimmed.to_ascii_lowercase().as_str() {
            "first_strike" => EffectCondition::FirstStrike,
            "smart_weapon" => EffectCondition::SmartWeapon,
            "hp_below_50" => EffectCondition::HpBelow50,
            "burn_inflicted" => EffectCondition::BurnInflicted,
            "start_of_battle" => EffectCondition::StartOfBattle,
            "sharp_weapon" => EffectCondition::SharpWeapon,
            _ => EffectCondition::Other(trimmed.to_owned()),
        };
        Some(condition)
    }

    pub fn as_str(&self) -> &str {
        match self {
            EffectCondition::FirstStrike => "first_strike",
            EffectCondition::SmartWeapon => "smart_weapon",
            EffectCondition::HpBelow50 => "hp_below_50",
            EffectCondition::BurnInflicted => "burn_inflicted",
            EffectCondition::StartOfBattle => "start_of_battle",
            EffectCondition::SharpWeapon => "sharp_weapon",
            EffectCondition::Other(label) => label,
        }
    }
}

impl core::fmt::Display for EffectCondition {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

bitflags::bitflags! {
    /// Boolean switches an effect set may carry.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct EffectFlags: u8 {
        const CRIT_REROLL_ONCE_PER_BATTLE = 1 << 0;
        const UNARMED_DISABLE_CRIT = 1 << 1;
        const CRIT_AUTO_ON_LOW_HP = 1 << 2;
        const UNARMED_SCALE_TO_CEILING = 1 << 3;
    }
}

const FLAG_KEYS: &[(&str, EffectFlags)] = &[
    (
        "crit_reroll_once_per_battle",
        EffectFlags::CRIT_REROLL_ONCE_PER_BATTLE,
    ),
    ("unarmed_disable_crit", EffectFlags::UNARMED_DISABLE_CRIT),
    ("crit_auto_on_low_hp", EffectFlags::CRIT_AUTO_ON_LOW_HP),
    (
        "unarmed_scale_to_ceiling",
        EffectFlags::UNARMED_SCALE_TO_CEILING,
    ),
];

/// Typed view of an effect bag. Percent fields hold whole percents.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EffectSet {
    pub condition: Option<EffectCondition>,
    pub ranged_accuracy_add: Option<f64>,
    pub accuracy_set: Option<f64>,
    pub attack_chance: Option<f64>,
    pub crit_rate_set: Option<f64>,
    pub melee_damage_add: Option<f64>,
    pub ranged_damage_add: Option<f64>,
    pub unarmed_damage_add: Option<f64>,
    pub damage_add_percent: Option<f64>,
    pub first_attack_add: Option<f64>,
    pub crit_rate_add: Option<f64>,
    pub crit_chance_add: Option<f64>,
    pub unarmed_crit_rate_add: Option<f64>,
    /// Only present when nonzero.
    pub unarmed_crit_rate_set: Option<f64>,
    pub unarmed_crit_damage_add: Option<f64>,
    /// Only present when nonzero.
    pub health_points_on_crit: Option<f64>,
    pub flags: EffectFlags,
    pub attributes: BTreeMap<Attribute, f64>,
    pub civil: BTreeMap<CivilStat, f64>,
}

impl EffectSet {
    pub fn from_raw(raw: &RawEffects) -> Self {
        let mut set = EffectSet::default();
        for (key, value) in raw {
            set.absorb(key, value);
        }
        set
    }

    fn absorb(&mut self, key: &str, value: &EffectValue) {
        if key == "condition" {
            self.condition = value.as_text().and_then(EffectCondition::parse);
            return;
        }
        if let Some((_, flag)) = FLAG_KEYS.iter().find(|(name, _)| *name == key) {
            self.flags.set(*flag, value.as_flag());
            return;
        }
        if let Some(attribute) = attribute_for_key(key) {
            if let Some(n) = value.as_number() {
                *self.attributes.entry(attribute).or_insert(0.0) += n;
            }
            return;
        }
        if let Some(stat) = civil_for_key(key) {
            if let Some(n) = value.as_number() {
                *self.civil.entry(stat).or_insert(0.0) += n;
            }
            return;
        }

        let number = value.as_number();
        let slot = match key {
            "ranged_accuracy_add" => &mut self.ranged_accuracy_add,
            "accuracy_set" => &mut self.accuracy_set,
            "attack_chance" => &mut self.attack_chance,
            "crit_rate_set" => &mut self.crit_rate_set,
            "melee_damage_add" => &mut self.melee_damage_add,
            "ranged_damage_add" => &mut self.ranged_damage_add,
            "unarmed_damage_add" => &mut self.unarmed_damage_add,
            "damage_add_percent" => &mut self.damage_add_percent,
            "first_attack_add" => &mut self.first_attack_add,
            "crit_rate_add" => &mut self.crit_rate_add,
            "crit_chance_add" => &mut self.crit_chance_add,
            "unarmed_crit_rate_add" => &mut self.unarmed_crit_rate_add,
            "unarmed_crit_damage_add" => &mut self.unarmed_crit_damage_add,
            "unarmed_crit_rate_set" => {
                self.unarmed_crit_rate_set = number.filter(|n| *n != 0.0);
                return;
            }
            "health_points_on_crit" => {
                self.health_points_on_crit = number.filter(|n| *n != 0.0);
                return;
            }
            _ => return,
        };
        *slot = number;
    }

    pub fn has_flag(&self, flag: EffectFlags) -> bool {
        self.flags.contains(flag)
    }

    /// Bonus for `attribute`, zero when absent.
    pub fn attribute_bonus(&self, attribute: Attribute) -> f64 {
        self.attributes.get(&attribute).copied().unwrap_or(0.0)
    }
}

impl From<&RawEffects> for EffectSet {
    fn from(raw: &RawEffects) -> Self {
        EffectSet::from_raw(raw)
    }
}
