//! Attributes, civil stats and bonus breakdowns.
//!
//! Base values come from the character sheet. Effective values add cyber-mod
//! bonuses and are computed per call, never stored.

mod attributes;
mod bonus;
mod civil;
mod resolve;
mod sources;

pub use attributes::{Attribute, Attributes};
pub use bonus::{BonusSource, StatTotals, sum_sources};
pub use civil::CivilStat;
pub use resolve::{apply_installed, resolve_effective_attributes};
pub use sources::{
    cyber_attribute_sources, cyber_civil_sources, tag_attribute_sources, tag_civil_sources,
};
