//! Domain-level error type used by the generator and the session state machine.
//!
//! This error type is runtime-agnostic. The async session driver and the
//! configuration layer return `Result<T, crate::error::AppError>` and convert
//! from `DomainError` using the provided `From<DomainError> for AppError`
//! implementation.

use std::error::Error;
use std::fmt::{Display, Formatter, Result as FmtResult};

/// Validation kinds for rejected events and malformed inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ValidationKind {
    /// A decision arrived while the previous one is still being presented.
    DecisionLocked,
    /// The cursor has passed the last ballot.
    SessionFinished,
    /// The clock has already reached zero.
    TimeExpired,
    /// Event does not apply to the current phase.
    PhaseMismatch,
    /// The session stats were already handed off.
    AlreadyFinalized,
    /// Generator asked for something it cannot build.
    InvalidGeneration,
}

/// Central domain error type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Rejected event or business rule violation
    Validation(ValidationKind, String),
    /// Malformed configuration (programmer error, caught at construction)
    Config(String),
}

impl Display for DomainError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            DomainError::Validation(kind, d) => write!(f, "validation error {kind:?}: {d}"),
            DomainError::Config(d) => write!(f, "config error: {d}"),
        }
    }
}

impl Error for DomainError {}

impl DomainError {
    pub fn validation(kind: ValidationKind, detail: impl Into<String>) -> Self {
        Self::Validation(kind, detail.into())
    }

    pub fn config(detail: impl Into<String>) -> Self {
        Self::Config(detail.into())
    }

    /// Validation kind, if this is a validation error.
    pub fn kind(&self) -> Option<ValidationKind> {
        match self {
            DomainError::Validation(kind, _) => Some(*kind),
            DomainError::Config(_) => None,
        }
    }

    /// True when the error is an out-of-window decision that callers drop silently.
    pub fn is_rejected_decision(&self) -> bool {
        matches!(
            self.kind(),
            Some(
                ValidationKind::DecisionLocked
                    | ValidationKind::SessionFinished
                    | ValidationKind::TimeExpired
                    | ValidationKind::PhaseMismatch
            )
        )
    }
}
