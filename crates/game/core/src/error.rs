//! Common error infrastructure for rules-core.
//!
//! Catalog problems never surface here: unknown systems, unknown
//! modifications and malformed effect values contribute nothing and are
//! skipped where they are read. Only calculation-level failures become errors.
//!
//! # Design Principles
//!
//! - **Distinct failures**: a failed calculation is never folded into a
//!   zero-damage result
//! - **Severity Classification**: bugs are told apart from unusable configuration
//! - **Stage context**: non-finite values report the pipeline stage and field

/// Severity level of an error.
///
/// - **Internal**: the engine produced a value it should never produce
/// - **Fatal**: configuration is unusable and no calculation can succeed
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    Internal,
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if this error indicates an internal bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all rules-core errors.
pub trait RulesError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// Default implementation uses the error type name.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

/// Pipeline stage at which a value was validated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum CalculationStage {
    /// Output of the base formula evaluator.
    BaseFormula,
    /// Output of the modifier stack, before any roll.
    Modifiers,
    /// Final numbers after hit and crit resolution.
    Resolution,
}

/// Errors produced by an attack calculation.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CalculationError {
    /// A number handed to the next stage was NaN or infinite.
    #[error("non-finite {field} after {stage} stage")]
    NonFinite {
        stage: CalculationStage,
        field: &'static str,
    },

    /// A rules constant is unusable.
    #[error("invalid rules configuration: {0} must be finite")]
    InvalidConfig(&'static str),
}

impl RulesError for CalculationError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::NonFinite { .. } => ErrorSeverity::Internal,
            Self::InvalidConfig(_) => ErrorSeverity::Fatal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NonFinite { .. } => "CALCULATION_NON_FINITE",
            Self::InvalidConfig(_) => "CALCULATION_INVALID_CONFIG",
        }
    }
}

/// Returns `value` unchanged if finite, otherwise a [`CalculationError::NonFinite`].
pub(crate) fn ensure_finite(
    value: f64,
    stage: CalculationStage,
    field: &'static str,
) -> Result<f64, CalculationError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(CalculationError::NonFinite { stage, field })
    }
}
