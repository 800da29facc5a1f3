//! Engine error types

use thiserror::Error;

/// Errors surfaced by the cleaner engine
#[derive(Error, Debug)]
pub enum CleanerError {
    /// The enumeration or deletion collaborator failed
    #[error("{0}")]
    Provider(String),

    /// Request rejected before any classification or deletion work
    #[error("{0}")]
    Validation(String),

    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CleanerError {
    pub fn provider(message: impl Into<String>) -> Self {
        Self::Provider(message.into())
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// JSON error payload returned to transport callers
    pub fn to_payload(&self) -> serde_json::Value {
        serde_json::json!({ "error": self.to_string() })
    }
}

pub type Result<T> = std::result::Result<T, CleanerError>;
