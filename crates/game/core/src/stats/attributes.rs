//! Core attributes - the seven stats every combat formula reads.
//!
//! Base attributes are owned by the character sheet. Effective attributes are
//! derived per calculation (base + cyber-mod bonuses) and never stored.
//!
//! No attribute is ever undefined: a missing or non-finite value reads as the
//! neutral baseline [`Attributes::BASELINE`].

use core::fmt;

/// The seven core attributes.
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
pub enum Attribute {
    Body,
    Willpower,
    Cool,
    Intelligence,
    Reflexes,
    Skill,
    Technical,
}

impl Attribute {
    pub const COUNT: usize = 7;

    pub const ALL: [Attribute; Self::COUNT] = [
        Attribute::Body,
        Attribute::Willpower,
        Attribute::Cool,
        Attribute::Intelligence,
        Attribute::Reflexes,
        Attribute::Skill,
        Attribute::Technical,
    ];

    #[inline]
    pub const fn as_index(self) -> usize {
        self as usize
    }

    /// Capitalized name used in formula text ("Body", "Reflexes", ...).
    pub const fn label(self) -> &'static str {
        match self {
            Attribute::Body => "Body",
            Attribute::Willpower => "Willpower",
            Attribute::Cool => "Cool",
            Attribute::Intelligence => "Intelligence",
            Attribute::Reflexes => "Reflexes",
            Attribute::Skill => "Skill",
            Attribute::Technical => "Technical",
        }
    }
}

/// A full set of attribute values.
///
/// Reads go through [`Attributes::get`], which substitutes the baseline for
/// non-finite values so NaN never enters the formula chain.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(from = "AttributeRecord", into = "AttributeRecord")
)]
pub struct Attributes {
    values: [f64; Attribute::COUNT],
}

impl Attributes {
    /// Neutral value used wherever an attribute is absent or unusable.
    pub const BASELINE: f64 = 10.0;

    pub fn new(
        body: f64,
        willpower: f64,
        cool: f64,
        intelligence: f64,
        reflexes: f64,
        skill: f64,
        technical: f64,
    ) -> Self {
        Self {
            values: [
                body,
                willpower,
                cool,
                intelligence,
                reflexes,
                skill,
                technical,
            ],
        }
    }

    /// Every attribute at the same value.
    pub const fn uniform(value: f64) -> Self {
        Self {
            values: [value; Attribute::COUNT],
        }
    }

    /// Returns the attribute value, or the baseline if it is not finite.
    #[inline]
    pub fn get(&self, attribute: Attribute) -> f64 {
        let value = self.values[attribute.as_index()];
        if value.is_finite() {
            value
        } else {
            Self::BASELINE
        }
    }

    /// Returns the stored value without sanitizing.
    #[inline]
    pub fn raw(&self, attribute: Attribute) -> f64 {
        self.values[attribute.as_index()]
    }

    pub fn set(&mut self, attribute: Attribute, value: f64) {
        self.values[attribute.as_index()] = value;
    }

    /// Builder-style setter.
    #[must_use]
    pub fn with(mut self, attribute: Attribute, value: f64) -> Self {
        self.set(attribute, value);
        self
    }

    /// Adds `delta` to an attribute. Non-finite deltas are ignored.
    pub fn add(&mut self, attribute: Attribute, delta: f64) {
        if !delta.is_finite() {
            return;
        }
        let current = self.get(attribute);
        self.values[attribute.as_index()] = current + delta;
    }

    /// Replaces every non-finite value with `baseline`.
    #[must_use]
    pub fn sanitized(mut self, baseline: f64) -> Self {
        for value in &mut self.values {
            if !value.is_finite() {
                *value = baseline;
            }
        }
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (Attribute, f64)> + '_ {
        Attribute::ALL.into_iter().map(|attr| (attr, self.get(attr)))
    }
}

impl Default for Attributes {
    /// All attributes at the baseline.
    fn default() -> Self {
        Self::uniform(Self::BASELINE)
    }
}

impl fmt::Display for Attributes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (attr, value) in self.iter() {
            if !first {
                f.write_str(", ")?;
            }
            first = false;
            write!(f, "{} {}", attr.label(), value)?;
        }
        Ok(())
    }
}

/// Named-field mirror of [`Attributes`] for serialization.
///
/// Missing fields deserialize to the baseline.
#[cfg(feature = "serde")]
#[derive(Clone, Copy, Debug, serde::Serialize, serde::Deserialize)]
struct AttributeRecord {
    #[serde(default = "baseline")]
    body: f64,
    #[serde(default = "baseline")]
    willpower: f64,
    #[serde(default = "baseline")]
    cool: f64,
    #[serde(default = "baseline")]
    intelligence: f64,
    #[serde(default = "baseline")]
    reflexes: f64,
    #[serde(default = "baseline")]
    skill: f64,
    #[serde(default = "baseline")]
    technical: f64,
}

#[cfg(feature = "serde")]
fn baseline() -> f64 {
    Attributes::BASELINE
}

#[cfg(feature = "serde")]
impl From<AttributeRecord> for Attributes {
    fn from(record: AttributeRecord) -> Self {
        Attributes::new(
            record.body,
            record.willpower,
            record.cool,
            record.intelligence,
            record.reflexes,
            record.skill,
            record.technical,
        )
    }
}

#[cfg(feature = "serde")]
impl From<Attributes> for AttributeRecord {
    fn from(attrs: Attributes) -> Self {
        AttributeRecord {
            body: attrs.raw(Attribute::Body),
            willpower: attrs.raw(Attribute::Willpower),
            cool: attrs.raw(Attribute::Cool),
            intelligence: attrs.raw(Attribute::Intelligence),
            reflexes: attrs.raw(Attribute::Reflexes),
            skill: attrs.raw(Attribute::Skill),
            technical: attrs.raw(Attribute::Technical),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_baseline() {
        let attrs = Attributes::default();
        for (_, value) in attrs.iter() {
            assert_eq!(value, Attributes::BASELINE);
        }
    }

    #[test]
    fn non_finite_reads_as_baseline() {
        let attrs = Attributes::default()
            .with(Attribute::Body, f64::NAN)
            .with(Attribute::Cool, f64::INFINITY);
        assert_eq!(attrs.get(Attribute::Body), 10.0);
        assert_eq!(attrs.get(Attribute::Cool), 10.0);
    }

    #[test]
    fn add_ignores_non_finite_delta() {
        let mut attrs = Attributes::default();
        attrs.add(Attribute::Skill, 4.0);
        attrs.add(Attribute::Skill, f64::NAN);
        assert_eq!(attrs.get(Attribute::Skill), 14.0);
    }

    #[test]
    fn attribute_names_parse_case_insensitively() {
        assert_eq!("Reflexes".parse::<Attribute>(), Ok(Attribute::Reflexes));
        assert_eq!("technical".parse::<Attribute>(), Ok(Attribute::Technical));
        assert!("luck".parse::<Attribute>().is_err());
    }
}
