//! Automated inspectors used by the simulator and tests.
//!
//! - RandomInspector: coin flips (seedable)
//! - RulebookInspector: applies every rule, slowly
//! - HastyInspector: only counts marks

mod hasty;
mod random;
pub mod registry;
mod rulebook;
mod trait_def;

pub use hasty::HastyInspector;
pub use random::RandomInspector;
pub use rulebook::RulebookInspector;
pub use trait_def::{Inspector, InspectorError, Verdict};
