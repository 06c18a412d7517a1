/// Weapon types offered by the character builder.
///
/// The declared type on a [`WeaponConfig`] stays a free string; the classifier
/// maps any string (including these labels) onto a category and subtype.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WeaponType {
    UnarmedMelee,
    BluntWeaponMelee,
    SharpWeaponMelee,
    RangedAttack,
    Kick,
    Grappling,
    Slice,
    Whip,
    Blast,
}

impl WeaponType {
    pub const ALL: [WeaponType; 9] = [
        WeaponType::UnarmedMelee,
        WeaponType::BluntWeaponMelee,
        WeaponType::SharpWeaponMelee,
        WeaponType::RangedAttack,
        WeaponType::Kick,
        WeaponType::Grappling,
        WeaponType::Slice,
        WeaponType::Whip,
        WeaponType::Blast,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            WeaponType::UnarmedMelee => "Unarmed Melee",
            WeaponType::BluntWeaponMelee => "Blunt Weapon Melee",
            WeaponType::SharpWeaponMelee => "Sharp Weapon Melee",
            WeaponType::RangedAttack => "Ranged Attack",
            WeaponType::Kick => "Kick",
            WeaponType::Grappling => "Grappling",
            WeaponType::Slice => "Slice",
            WeaponType::Whip => "Whip",
            WeaponType::Blast => "Blast",
        }
    }
}

impl core::fmt::Display for WeaponType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}

bitflags::bitflags! {
    /// Weapon properties that seed the status context.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct WeaponFlags: u8 {
        const SMART = 1 << 0;
        const ARROWS = 1 << 1;
        const ALWAYS_CRIT = 1 << 2;
        /// Counterattack after being hit.
        const RETURNED = 1 << 3;
        /// Attacker acts first this turn.
        const FIRST = 1 << 4;
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WeaponConfig {
    pub kind: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub base_damage: f64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub flags: WeaponFlags,
}

impl WeaponConfig {
    pub fn new(kind: impl Into<String>, base_damage: f64) -> Self {
        Self {
            kind: kind.into(),
            base_damage,
            flags: WeaponFlags::empty(),
        }
    }

    pub fn of(kind: WeaponType, base_damage: f64) -> Self {
        Self::new(kind.label(), base_damage)
    }

    #[must_use]
    pub fn with_flags(mut self, flags: WeaponFlags) -> Self {
        self.flags |= flags;
        self
    }

    /// Base damage, with non-finite values read as zero.
    pub fn base(&self) -> f64 {
        if self.base_damage.is_finite() {
            self.base_damage
        } else {
            0.0
        }
    }
}

impl Default for WeaponConfig {
    fn default() -> Self {
        Self::of(WeaponType::UnarmedMelee, 0.0)
    }
}
