use thiserror::Error;

use crate::errors::domain::DomainError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {detail}")]
    Config { detail: String },
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),
    #[error("Internal error: {detail}")]
    Internal { detail: String },
}

impl AppError {
    pub fn config(detail: impl Into<String>) -> Self {
        Self::Config {
            detail: detail.into(),
        }
    }

    pub fn internal(detail: impl Into<String>) -> Self {
        Self::Internal {
            detail: detail.into(),
        }
    }

    /// Short stable code for logs and simulator output.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Config { .. } => "CONFIG_ERROR",
            AppError::Domain(DomainError::Config(_)) => "CONFIG_ERROR",
            AppError::Domain(DomainError::Validation(..)) => "VALIDATION_ERROR",
            AppError::Internal { .. } => "INTERNAL",
        }
    }
}
