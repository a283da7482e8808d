//! Stream Profiles Library
//!
//! Settings core for a game-streaming client: per-host profiles with a global
//! fallback, bitrate defaults and the preference model.

pub mod app;
pub mod display;
pub mod error;
pub mod events;
pub mod hosts;
pub mod utils;

pub use app::{ProfileKey, ResolvedSettings, Settings, SettingsModel, SettingsResolver};
pub use error::{Result, SettingsError};
