//! Error types shared across the domain layer.

pub mod domain;
