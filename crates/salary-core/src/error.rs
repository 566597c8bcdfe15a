//! Errors surfaced by the core service

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum CoreError {
    /// No usable model artifact was loaded at startup
    #[error("model unavailable: {0}")]
    ModelUnavailable(String),

    /// Request rejected before reaching the prediction engine
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl CoreError {
    /// Stable machine-readable code for API responses
    pub fn code(&self) -> &'static str {
        match self {
            CoreError::ModelUnavailable(_) => "model_unavailable",
            CoreError::InvalidInput(_) => "invalid_input",
        }
    }
}
