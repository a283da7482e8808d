//! Settings Profiles
//!
//! Per-host settings snapshots, their defaults and the editable model.

pub mod bitrate;
pub mod config;
pub mod defaults;
pub mod model;
pub mod resolver;
pub mod store;
pub mod types;

pub use bitrate::{compute_default_bitrate_kbps, DEFAULT_BITRATE_KBPS};
pub use config::{
    AudioConfiguration, DisplayMode, FramePacing, InputDriver, MultiControllerMode, Settings,
    TouchscreenMode, UpscalingMode, VideoCodec,
};
pub use defaults::{DisplayDefaults, ResolvedSettings};
pub use model::SettingsModel;
pub use resolver::{apply_auto_bitrate, SettingsResolver, StreamConfig};
pub use store::{FileStore, MemoryStore, SettingsStore};
pub use types::{storage_key, Host, ProfileKey, Resolution, ResolutionChoice, SettingChange};
