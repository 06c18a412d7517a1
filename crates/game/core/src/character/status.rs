use super::weapon::{WeaponConfig, WeaponFlags};

bitflags::bitflags! {
    /// Situational facts for one calculation.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct StatusFlags: u16 {
        const FIRST_TURN = 1 << 0;
        const ATTACKING_FIRST = 1 << 1;
        const BERSERK = 1 << 2;
        const BURN = 1 << 3;
        const SMART_WEAPON = 1 << 4;
        const ARROWS = 1 << 5;
        const FORCE_CRIT = 1 << 6;
        const RETURNED_ATTACK = 1 << 7;
    }
}

/// Per-calculation status snapshot. Built fresh for every call.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusContext {
    pub hp_percent: f64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub flags: StatusFlags,
}

impl StatusContext {
    pub const FULL_HP: f64 = 100.0;

    pub fn new(hp_percent: f64) -> Self {
        Self {
            hp_percent,
            flags: StatusFlags::empty(),
        }
    }

    #[must_use]
    pub fn with_flags(mut self, flags: StatusFlags) -> Self {
        self.flags |= flags;
        self
    }

    /// HP percent, with non-finite values read as full health.
    pub fn hp(&self) -> f64 {
        if self.hp_percent.is_finite() {
            self.hp_percent
        } else {
            Self::FULL_HP
        }
    }

    pub fn has(&self, flag: StatusFlags) -> bool {
        self.flags.contains(flag)
    }

    /// Adds the weapon's flags on top of the caller's status. A flag already
    /// set by the caller stays set.
    #[must_use]
    pub fn seeded_from(self, weapon: &WeaponConfig) -> Self {
        let mut flags = self.flags;
        let w = weapon.flags;
        if w.contains(WeaponFlags::SMART) {
            flags |= StatusFlags::SMART_WEAPON;
        }
        if w.contains(WeaponFlags::ARROWS) {
            flags |= StatusFlags::ARROWS;
        }
        if w.contains(WeaponFlags::ALWAYS_CRIT) {
            flags |= StatusFlags::FORCE_CRIT;
        }
        if w.contains(WeaponFlags::RETURNED) {
            flags |= StatusFlags::RETURNED_ATTACK;
        }
        if w.contains(WeaponFlags::FIRST) {
            flags |= StatusFlags::FIRST_TURN | StatusFlags::ATTACKING_FIRST;
        }
        Self { flags, ..self }
    }

    /// Builds a status from named checkboxes. `berserk` and
    /// `burn`/`burning`/`burned` are recognized; other names are ignored.
    pub fn from_selections<S: AsRef<str>>(
        selections: impl IntoIterator<Item = (S, bool)>,
        hp_percent: f64,
    ) -> Self {
        let mut status = Self::new(hp_percent);
        for (name, on) in selections {
            if !on {
                continue;
            }
            match name.as_ref().trim().to_ascii_lowercase().as_str() {
                "berserk" => status.flags |= StatusFlags::BERSERK,
                "burn" | "burning" | "burned" => status.flags |= StatusFlags::BURN,
                _ => {}
            }
        }
        status
    }
}

impl Default for StatusContext {
    fn default() -> Self {
        Self::new(Self::FULL_HP)
    }
}
