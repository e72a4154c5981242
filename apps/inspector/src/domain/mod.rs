//! Domain layer: pure ballot and session logic.

pub mod ballot;
pub mod generator;
pub mod grid;
pub mod ledger;
pub mod report;
pub mod rules;
pub mod scoring;
pub mod seed_derivation;
pub mod session;
pub mod state;
pub mod voter;

#[cfg(test)]
mod test_gens;
#[cfg(test)]
mod test_prelude;
#[cfg(test)]
mod tests_props_generation;
#[cfg(test)]
mod tests_props_session;
#[cfg(test)]
mod tests_report;
#[cfg(test)]
mod tests_session;

// Re-exports for ergonomics
pub use ballot::{Ballot, BallotCategory, BallotFace, BallotId, InvalidReason};
pub use generator::{generate_queue, generate_queue_with_seed};
pub use ledger::{Choice, Decision, GameStats};
pub use report::{build_report, Grade, ShiftReport};
pub use rules::classify;
pub use seed_derivation::{derive_ballot_seed, derive_plan_seed};
pub use session::apply;
pub use state::{EndTrigger, Phase, SessionEvent, SessionState, SessionTransition, SessionView};
