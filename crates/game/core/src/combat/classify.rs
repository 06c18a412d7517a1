//! Weapon type string to attack category and subtype.

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum AttackCategory {
    Melee,
    Ranged,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum AttackSubtype {
    Unarmed,
    Kick,
    Blunt,
    Sharp,
    Whip,
    Slice,
    Blast,
    Ranged,
}

impl AttackSubtype {
    /// Unarmed and kick share the unarmed-only rules.
    pub const fn is_unarmed(self) -> bool {
        matches!(self, AttackSubtype::Unarmed | AttackSubtype::Kick)
    }

    /// Sharp and slice share the blade rules.
    pub const fn is_blade(self) -> bool {
        matches!(self, AttackSubtype::Sharp | AttackSubtype::Slice)
    }
}

/// Classified attack.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttackKind {
    pub category: AttackCategory,
    pub subtype: AttackSubtype,
}

impl AttackKind {
    pub const fn new(category: AttackCategory, subtype: AttackSubtype) -> Self {
        Self { category, subtype }
    }

    pub const fn is_melee(self) -> bool {
        matches!(self.category, AttackCategory::Melee)
    }

    pub const fn is_ranged(self) -> bool {
        matches!(self.category, AttackCategory::Ranged)
    }
}

const FALLBACK: AttackKind = AttackKind::new(AttackCategory::Ranged, AttackSubtype::Ranged);

const CLASSIFICATION: &[(&str, AttackKind)] = &[
    ("unarmed melee", melee(AttackSubtype::Unarmed)),
    ("unarmed", melee(AttackSubtype::Unarmed)),
    ("grappling", melee(AttackSubtype::Unarmed)),
    ("kick", melee(AttackSubtype::Kick)),
    ("blunt", melee(AttackSubtype::Blunt)),
    ("blunt weapon melee", melee(AttackSubtype::Blunt)),
    ("sharp", melee(AttackSubtype::Sharp)),
    ("sharp weapon melee", melee(AttackSubtype::Sharp)),
    ("blade", melee(AttackSubtype::Sharp)),
    ("bladed", melee(AttackSubtype::Sharp)),
    ("whip", melee(AttackSubtype::Whip)),
    ("slice", melee(AttackSubtype::Slice)),
    (
        "blast",
        AttackKind::new(AttackCategory::Ranged, AttackSubtype::Blast),
    ),
    ("ranged", FALLBACK),
    ("ranged attack", FALLBACK),
];

const fn melee(subtype: AttackSubtype) -> AttackKind {
    AttackKind::new(AttackCategory::Melee, subtype)
}

/// Classifies a weapon type. Total: unknown or empty input is ranged.
pub fn classify(weapon_type: &str) -> AttackKind {
    let wanted = weapon_type.trim().to_lowercase();
    CLASSIFICATION
        .iter()
        .find(|(label, _)| *label == wanted)
        .map(|(_, kind)| *kind)
        .unwrap_or(FALLBACK)
}
