//! Utility Functions
//!
//! Common utilities used throughout the crate.

mod logging;

pub use logging::*;

use std::path::PathBuf;

/// Get the application data directory
pub fn get_app_data_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("stream-profiles")
}
