//! Automated inspector trait definition.

use std::fmt;
use std::time::Duration;

use crate::domain::ballot::BallotFace;
use crate::domain::ledger::Choice;
use crate::error::AppError;

/// Errors that can occur while a bot inspects a ballot.
#[derive(Debug)]
pub enum InspectorError {
    /// Inspector encountered an internal error
    Internal(String),
}

impl fmt::Display for InspectorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InspectorError::Internal(msg) => write!(f, "inspector internal error: {msg}"),
        }
    }
}

impl std::error::Error for InspectorError {}

impl From<InspectorError> for AppError {
    fn from(err: InspectorError) -> Self {
        AppError::internal(format!("Inspector error: {err}"))
    }
}

/// A call on one ballot and how long it took to make.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Verdict {
    pub choice: Choice,
    pub think_time: Duration,
}

/// Trait for automated inspectors.
///
/// Implementations see only the physical face, never the ground truth, plus
/// the seconds left on the clock.
pub trait Inspector: Send + Sync {
    fn inspect(&self, face: &BallotFace, time_left: u32) -> Result<Verdict, InspectorError>;
}
