#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod config;
pub mod domain;
pub mod error;
pub mod errors;
pub mod input;
pub mod inspectors;
pub mod services;
pub mod telemetry;

// Re-exports for public API
pub use config::game::{CategoryWeights, GameConfig};
pub use domain::ballot::{Ballot, BallotId, InvalidReason};
pub use domain::generator::{generate_queue, generate_queue_with_seed};
pub use domain::ledger::{Choice, Decision, GameStats};
pub use domain::report::{build_report, Grade, ShiftReport};
pub use domain::session::apply;
pub use domain::state::{EndTrigger, Phase, SessionEvent, SessionState, SessionTransition, SessionView};
pub use error::AppError;
pub use errors::domain::{DomainError, ValidationKind};
pub use inspectors::{Inspector, InspectorError, Verdict};
pub use services::shift::{run_session, SessionObserver, Shift, ShiftCommand, ShiftHandle};

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    inspector_test_support::logging::init();
}
