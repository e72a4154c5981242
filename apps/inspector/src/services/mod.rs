//! Runtime services built on the pure domain.

pub mod shift;

pub use shift::{run_session, SessionObserver, Shift, ShiftCommand, ShiftHandle};
