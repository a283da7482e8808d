//! Settings Resolver
//!
//! Loads, resolves and persists per-profile settings snapshots.

use log::{debug, info, warn};
use std::sync::Arc;

use super::bitrate::{compute_default_bitrate_kbps, DEFAULT_BITRATE_KBPS};
use super::config::{AudioConfiguration, Settings};
use super::defaults::{DisplayDefaults, ResolvedSettings, DEFAULT_FPS, DEFAULT_RESOLUTION};
use super::store::{read_value, write_value, SettingsStore};
use super::types::{ProfileKey, Resolution};
use crate::display::DisplayProvider;
use crate::error::{Result, SettingsError};
use crate::events::{EventBus, SettingsEvent};

/// Store key remembering which profile the preference UI last edited
pub const SELECTED_PROFILE_KEY: &str = "selectedSettingsProfile";

/// Resolution the stream would use, with sentinels replaced by concrete sizes
pub fn effective_resolution(settings: &Settings, display: &dyn DisplayProvider) -> Resolution {
    if settings.match_display_resolution.unwrap_or(false) {
        return display
            .main_display_pixel_size()
            .filter(Resolution::is_valid)
            .unwrap_or(DEFAULT_RESOLUTION);
    }

    let resolution = settings.resolution.unwrap_or(DEFAULT_RESOLUTION);
    if resolution.is_valid() {
        resolution
    } else {
        settings
            .custom_resolution
            .filter(Resolution::is_valid)
            .unwrap_or(DEFAULT_RESOLUTION)
    }
}

/// Frame rate the stream would use, with the custom sentinel replaced
pub fn effective_fps(settings: &Settings) -> u32 {
    match settings.fps.unwrap_or(DEFAULT_FPS) {
        0 => settings
            .custom_fps
            .filter(|fps| *fps > 0.0)
            .map(|fps| (fps as u32).max(1))
            .unwrap_or(DEFAULT_FPS),
        fps => fps,
    }
}

/// Recompute the bitrate from the effective resolution and frame rate when
/// auto-adjust is on.
///
/// Without `forced`, a snapshot carrying a manual `custom_bitrate` is left as is.
pub fn apply_auto_bitrate(settings: &Settings, display: &dyn DisplayProvider, forced: bool) -> Settings {
    if !settings.auto_adjust_bitrate.unwrap_or(true) {
        return settings.clone();
    }
    if !forced && settings.custom_bitrate.is_some() {
        return settings.clone();
    }

    let resolution = effective_resolution(settings, display);
    let fps = effective_fps(settings);
    let kbps = compute_default_bitrate_kbps(
        resolution.width,
        resolution.height,
        fps,
        settings.enable_yuv444.unwrap_or(false),
    );

    Settings {
        bitrate: Some(kbps),
        custom_bitrate: None,
        ..settings.clone()
    }
}

/// Stream parameters handed to the streaming layer
#[derive(Debug, Clone, PartialEq)]
pub struct StreamConfig {
    pub width: u32,
    pub height: u32,
    pub fps: u32,
    pub bitrate_kbps: u32,
    pub allow_hevc: bool,
    pub enable_hdr: bool,
    pub play_audio_on_pc: bool,
    pub audio_configuration: AudioConfiguration,
    pub optimize_game_settings: bool,
    pub multi_controller: bool,
    pub enable_vsync: bool,
    pub show_performance_overlay: bool,
    /// Display mode requested from the host, if overridden
    pub remote_resolution: Option<Resolution>,
    pub remote_fps: Option<u32>,
    pub connection_method: String,
}

/// Reads and writes settings profiles in a [`SettingsStore`]
#[derive(Clone)]
pub struct SettingsResolver {
    store: Arc<dyn SettingsStore>,
    display: Arc<dyn DisplayProvider>,
    events: EventBus,
}

impl SettingsResolver {
    pub fn new(store: Arc<dyn SettingsStore>, display: Arc<dyn DisplayProvider>, events: EventBus) -> Self {
        Self {
            store,
            display,
            events,
        }
    }

    pub fn store(&self) -> &dyn SettingsStore {
        self.store.as_ref()
    }

    pub fn display(&self) -> &dyn DisplayProvider {
        self.display.as_ref()
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    fn decode(&self, key: &str) -> Option<Settings> {
        let data = self.store.get(key)?;
        match Settings::from_bytes(&data) {
            Ok(settings) => Some(settings),
            Err(e) => {
                warn!("Ignoring unreadable settings record {}: {}", key, e);
                None
            }
        }
    }

    /// Stored snapshot for `profile`, falling back to the global snapshot.
    ///
    /// Missing and undecodable records are both treated as absent.
    pub fn get_settings(&self, profile: &ProfileKey) -> Option<Settings> {
        if let Some(settings) = self.decode(&profile.storage_key()) {
            return Some(settings);
        }
        if profile.is_global() {
            return None;
        }

        let global = self.decode(&ProfileKey::global().storage_key());
        if global.is_some() {
            debug!("No settings for {}, using global profile", profile);
        }
        global
    }

    /// Write the whole snapshot under the profile's storage key
    pub fn save_settings(&self, profile: &ProfileKey, settings: &Settings) -> Result<()> {
        let data = settings.to_bytes().map_err(SettingsError::EncodeError)?;
        self.store.set(&profile.storage_key(), &data)?;
        debug!("Saved settings for {}", profile);
        Ok(())
    }

    /// Window defaults stored outside the profiles
    pub fn display_defaults(&self) -> DisplayDefaults {
        DisplayDefaults::from_store(self.store.as_ref())
    }

    /// Profile record, then global record, then compiled defaults
    pub fn resolve(&self, profile: &ProfileKey) -> ResolvedSettings {
        let settings = self.get_settings(profile).unwrap_or_default();
        ResolvedSettings::resolve(&settings, self.display_defaults())
    }

    /// [`apply_auto_bitrate`] against this resolver's display
    pub fn apply_auto_bitrate(&self, settings: &Settings, forced: bool) -> Settings {
        apply_auto_bitrate(settings, self.display.as_ref(), forced)
    }

    /// Parameters for starting a stream with `profile`, if any settings resolve
    pub fn stream_config(&self, profile: &ProfileKey) -> Option<StreamConfig> {
        let settings = self.get_settings(profile)?;
        let resolved = ResolvedSettings::resolve(&settings, self.display_defaults());
        let resolution = effective_resolution(&settings, self.display.as_ref());

        Some(StreamConfig {
            width: resolution.width,
            height: resolution.height,
            fps: effective_fps(&settings),
            bitrate_kbps: resolved.effective_bitrate_kbps(),
            allow_hevc: resolved.codec.is_hevc(),
            enable_hdr: resolved.hdr,
            play_audio_on_pc: resolved.audio_on_pc,
            audio_configuration: resolved.audio_configuration,
            optimize_game_settings: resolved.optimize,
            multi_controller: resolved.multi_controller.is_multi(),
            enable_vsync: resolved.enable_vsync,
            show_performance_overlay: resolved.show_performance_overlay,
            remote_resolution: resolved.remote_resolution,
            remote_fps: resolved.remote_fps,
            connection_method: resolved.connection_method,
        })
    }

    /// Profile the preference UI last selected
    pub fn selected_profile(&self) -> Option<ProfileKey> {
        read_value::<String>(self.store.as_ref(), SELECTED_PROFILE_KEY).map(ProfileKey::host)
    }

    pub fn set_selected_profile(&self, profile: &ProfileKey) -> Result<()> {
        write_value(self.store.as_ref(), SELECTED_PROFILE_KEY, &profile.as_str())
    }

    /// Profiles that have a stored record, including hosts no longer known
    pub fn stored_profiles(&self) -> Vec<ProfileKey> {
        let mut profiles: Vec<ProfileKey> = self
            .store
            .keys()
            .into_iter()
            .filter_map(|key| key.strip_suffix("-settings").map(ProfileKey::host))
            .collect();
        profiles.sort();
        profiles
    }

    /// Apply `change` to the resolved record of `profile` and persist the result.
    /// Does nothing when no record resolves or `change` declines.
    fn update<F>(&self, profile: &ProfileKey, change: F) -> Result<Option<Settings>>
    where
        F: FnOnce(Settings) -> Option<Settings>,
    {
        let Some(settings) = self.get_settings(profile) else {
            debug!("No settings to update for {}", profile);
            return Ok(None);
        };
        let Some(updated) = change(settings) else {
            return Ok(None);
        };
        self.save_settings(profile, &updated)?;
        Ok(Some(updated))
    }

    pub fn set_connection_method(&self, method: &str, profile: &ProfileKey) -> Result<()> {
        self.update(profile, |settings| {
            Some(Settings {
                connection_method: Some(method.to_string()),
                ..settings
            })
        })?;
        Ok(())
    }

    /// Switch between automatic and manual bitrate.
    ///
    /// Manual mode pins both the bitrate and the custom bitrate to
    /// `custom_kbps`, or to the stored bitrate when none is given.
    pub fn set_bitrate_mode(&self, auto_adjust: bool, custom_kbps: Option<u32>, profile: &ProfileKey) -> Result<()> {
        self.update(profile, |settings| {
            if auto_adjust {
                let settings = Settings {
                    auto_adjust_bitrate: Some(true),
                    custom_bitrate: None,
                    ..settings
                };
                return Some(self.apply_auto_bitrate(&settings, true));
            }

            let kbps = custom_kbps
                .or(settings.bitrate)
                .unwrap_or(DEFAULT_BITRATE_KBPS);
            Some(Settings {
                auto_adjust_bitrate: Some(false),
                bitrate: Some(kbps),
                custom_bitrate: Some(kbps),
                ..settings
            })
        })?;
        Ok(())
    }

    /// Select a preset resolution (or the local display) and frame rate
    pub fn set_resolution_and_fps(
        &self,
        width: u32,
        height: u32,
        fps: u32,
        match_display: bool,
        profile: &ProfileKey,
    ) -> Result<()> {
        if fps == 0 || (!match_display && (width == 0 || height == 0)) {
            debug!("Ignoring invalid stream mode {}x{}@{}", width, height, fps);
            return Ok(());
        }

        self.update(profile, |settings| {
            let resolution = if match_display {
                DEFAULT_RESOLUTION
            } else {
                Resolution::new(width, height)
            };
            let settings = Settings {
                resolution: Some(resolution),
                match_display_resolution: Some(match_display),
                fps: Some(fps),
                ..settings
            };
            Some(self.apply_auto_bitrate(&settings, true))
        })?;
        Ok(())
    }

    /// Select a custom resolution and frame rate
    pub fn set_custom_resolution(&self, width: u32, height: u32, fps: u32, profile: &ProfileKey) -> Result<()> {
        if width == 0 || height == 0 || fps == 0 {
            debug!("Ignoring invalid custom mode {}x{}@{}", width, height, fps);
            return Ok(());
        }

        self.update(profile, |settings| {
            let settings = Settings {
                resolution: Some(Resolution::CUSTOM),
                match_display_resolution: Some(false),
                custom_resolution: Some(Resolution::new(width, height)),
                fps: Some(0),
                custom_fps: Some(fps as f64),
                ..settings
            };
            Some(self.apply_auto_bitrate(&settings, true))
        })?;
        Ok(())
    }

    /// Persist the playback volume (clamped to 0..=1) and announce it
    pub fn set_volume_level(&self, level: f64, profile: &ProfileKey) -> Result<()> {
        let clamped = if level.is_nan() { 1.0 } else { level.clamp(0.0, 1.0) };
        let updated = self.update(profile, |settings| {
            Some(Settings {
                volume_level: Some(clamped),
                ..settings
            })
        })?;

        if updated.is_some() {
            info!("Volume for {} set to {:.2}", profile, clamped);
            self.events.publish(SettingsEvent::VolumeChanged(clamped));
        }
        Ok(())
    }
}
