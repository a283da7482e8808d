//! Error types for the settings core.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Failed to write settings store: {0}")]
    WriteError(std::io::Error),

    #[error("Failed to encode settings: {0}")]
    EncodeError(serde_json::Error),

    #[error("Failed to create config directory: {0}")]
    CreateDirError(std::io::Error),
}

pub type Result<T> = std::result::Result<T, SettingsError>;
