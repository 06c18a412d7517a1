/// Non-combat stats shown on the character sheet.
///
/// The attack pipeline never reads these. They are summed for display from tag
/// and cyber-mod bonus sources.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum CivilStat {
    Reputation,
    Empathy,
    Appeal,
    Performance,
    Crafting,
    Driving,
    Evasion,
    Intimidation,
    Luck,
    Perception,
    Persuasion,
    Tolerance,
}

impl CivilStat {
    pub const ALL: [CivilStat; 12] = [
        CivilStat::Reputation,
        CivilStat::Empathy,
        CivilStat::Appeal,
        CivilStat::Performance,
        CivilStat::Crafting,
        CivilStat::Driving,
        CivilStat::Evasion,
        CivilStat::Intimidation,
        CivilStat::Luck,
        CivilStat::Perception,
        CivilStat::Persuasion,
        CivilStat::Tolerance,
    ];
}
