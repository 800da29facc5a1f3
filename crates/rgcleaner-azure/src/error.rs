//! Azure provider error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AzureError {
    #[error("az CLI not found. Please install: https://aka.ms/installazurecli")]
    AzNotFound,

    #[error("az command failed: {0}")]
    CommandFailed(String),

    #[error("az {command} timed out after {seconds}s")]
    Timeout { command: String, seconds: u64 },

    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl From<AzureError> for rgcleaner_core::CleanerError {
    fn from(e: AzureError) -> Self {
        rgcleaner_core::CleanerError::Provider(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AzureError>;
