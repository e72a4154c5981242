//! Shared test helpers for the inspector workspace.

pub mod logging;
