//! Errors surfaced by the calculator.
//!
//! Calculation failures keep their structured form so callers can inspect the
//! failing stage; content failures carry the loader's message chain.

use rules_core::{CalculationError, ErrorSeverity, RulesError};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Calculation(#[from] CalculationError),

    #[error("failed to load rule content")]
    Content(#[source] anyhow::Error),
}

impl RuntimeError {
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            RuntimeError::Calculation(err) => err.severity(),
            RuntimeError::Content(_) => ErrorSeverity::Fatal,
        }
    }

    /// The calculation error, if this is one.
    pub fn as_calculation(&self) -> Option<&CalculationError> {
        match self {
            RuntimeError::Calculation(err) => Some(err),
            RuntimeError::Content(_) => None,
        }
    }
}
