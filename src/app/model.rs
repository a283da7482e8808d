//! Settings Model
//!
//! Editable state behind the preference window. Every edit is written through
//! to the selected profile.

use log::{debug, error, info, warn};
use std::sync::Arc;

use super::bitrate::{bitrate_steps, kbps_for_slider_index, slider_index_for_kbps};
use super::config::{DisplayMode, Settings, UpscalingMode};
use super::defaults::{
    ResolvedSettings, DEFAULT_APP_ARTWORK_DIMENSIONS, DEFAULT_CONNECTION_METHOD, DEFAULT_FPS,
    DEFAULT_RESOLUTION,
};
use super::resolver::{effective_fps, effective_resolution, SettingsResolver};
use super::types::{Host, ProfileKey, Resolution, ResolutionChoice, SettingChange};
use crate::error::Result;
use crate::events::{EventBus, SettingsEvent};
use crate::hosts::{profile_hosts, HostProvider};

/// Preference window state for one selected profile
pub struct SettingsModel {
    resolver: SettingsResolver,
    hosts: Arc<dyn HostProvider>,

    selected: Host,
    /// Set by an explicit selection; stops the profile following the active host
    locked: bool,

    current: ResolvedSettings,
    bitrate_slider: usize,
}

impl SettingsModel {
    /// Restore the last selected profile (or the global one) and load it
    pub fn new(resolver: SettingsResolver, hosts: Arc<dyn HostProvider>) -> Self {
        let known = profile_hosts(hosts.as_ref());
        let selected = resolver
            .selected_profile()
            .and_then(|profile| known.iter().find(|h| h.id == profile.as_str()).cloned())
            .unwrap_or_else(Host::global);

        let current = ResolvedSettings::defaults(resolver.display_defaults());
        let bitrate_slider = slider_index_for_kbps(current.effective_bitrate_kbps(), current.unlock_max_bitrate);

        let mut model = Self {
            resolver,
            hosts,
            selected,
            locked: false,
            current,
            bitrate_slider,
        };
        model.load_settings();
        model
    }

    pub fn events(&self) -> &EventBus {
        self.resolver.events()
    }

    pub fn resolver(&self) -> &SettingsResolver {
        &self.resolver
    }

    /// Global profile followed by every known host
    pub fn hosts(&self) -> Vec<Host> {
        profile_hosts(self.hosts.as_ref())
    }

    pub fn selected_host(&self) -> &Host {
        &self.selected
    }

    pub fn profile_key(&self) -> ProfileKey {
        self.selected.profile_key()
    }

    pub fn settings(&self) -> &ResolvedSettings {
        &self.current
    }

    pub fn bitrate_slider_index(&self) -> usize {
        self.bitrate_slider
    }

    /// Bitrate the stream will request, in kbps
    pub fn bitrate_kbps(&self) -> u32 {
        self.current.effective_bitrate_kbps()
    }

    pub fn resolution_choice(&self) -> ResolutionChoice {
        if self.current.match_display_resolution {
            ResolutionChoice::MatchDisplay
        } else if self.current.resolution.is_valid() {
            ResolutionChoice::Fixed(self.current.resolution)
        } else {
            ResolutionChoice::Custom
        }
    }

    /// Resolution the stream would use right now
    pub fn effective_resolution(&self) -> Resolution {
        effective_resolution(&self.current.to_settings(), self.resolver.display())
    }

    pub fn effective_fps(&self) -> u32 {
        effective_fps(&self.current.to_settings())
    }

    /// Upscaling modes worth offering on this machine
    pub fn available_upscaling_modes(&self) -> &'static [UpscalingMode] {
        UpscalingMode::available(self.resolver.display().supports_upscaling())
    }

    /// Explicitly pick a profile; `None` picks the global one.
    /// Locks the selection so it no longer follows the active host.
    pub fn select_host(&mut self, id: Option<&str>) {
        let id = id.unwrap_or(ProfileKey::GLOBAL_ID);
        let Some(host) = self.hosts().into_iter().find(|h| h.id == id) else {
            debug!("Ignoring selection of unknown host {}", id);
            return;
        };

        self.locked = true;
        self.switch_to(host);
    }

    /// Follow the host the user is interacting with, unless the selection is locked
    pub fn follow_host(&mut self, id: &str) {
        if self.locked {
            debug!("Profile locked to {}, not following {}", self.selected.id, id);
            return;
        }
        if self.selected.id == id {
            return;
        }
        if let Some(host) = self.hosts().into_iter().find(|h| h.id == id) {
            self.switch_to(host);
        }
    }

    pub fn unlock_profile(&mut self) {
        self.locked = false;
    }

    pub fn is_profile_locked(&self) -> bool {
        self.locked
    }

    /// Re-read the host list after discovery changed it.
    /// A selected host that disappeared falls back to the global profile.
    pub fn hosts_changed(&mut self) {
        self.events().publish(SettingsEvent::HostsUpdated);

        let known = self.hosts();
        if !known.iter().any(|h| h.id == self.selected.id) {
            info!("Host {} is gone, editing the global profile", self.selected.id);
            self.locked = false;
            self.switch_to(Host::global());
        }
    }

    fn switch_to(&mut self, host: Host) {
        info!("Editing settings profile {} ({})", host.name, host.id);
        self.selected = host;

        let profile = self.profile_key();
        if let Err(e) = self.resolver.set_selected_profile(&profile) {
            warn!("Failed to remember selected profile: {}", e);
        }

        self.events().publish(SettingsEvent::ProfileSelected(profile));
        self.load_settings();
    }

    /// Load the selected profile (or the global one), normalizing stale values.
    /// Without any record, defaults are loaded and saved.
    pub fn load_settings(&mut self) {
        let profile = self.profile_key();
        let Some(settings) = self.resolver.get_settings(&profile) else {
            debug!("No stored settings for {}, using defaults", profile);
            self.load_and_save_default_settings();
            return;
        };

        let mut current = ResolvedSettings::resolve(&settings, self.resolver.display_defaults());
        if current.custom_resolution.is_none() && !current.resolution.is_valid() {
            current.resolution = DEFAULT_RESOLUTION;
        }
        if current.custom_fps.is_none() && current.fps == 0 {
            current.fps = DEFAULT_FPS;
        }

        self.bitrate_slider = slider_index_for_kbps(current.effective_bitrate_kbps(), current.unlock_max_bitrate);
        self.current = current;
        self.refresh_auto_bitrate();

        self.events().publish(SettingsEvent::SettingsLoaded(profile));
    }

    /// Reset the editable state to the compiled defaults without saving
    pub fn load_default_settings(&mut self) {
        self.current = ResolvedSettings::defaults(self.resolver.display_defaults());
        self.bitrate_slider =
            slider_index_for_kbps(self.current.effective_bitrate_kbps(), self.current.unlock_max_bitrate);
        self.refresh_auto_bitrate();

        self.events().publish(SettingsEvent::SettingsLoaded(self.profile_key()));
    }

    pub fn load_and_save_default_settings(&mut self) {
        self.load_default_settings();
        self.save_settings();
    }

    /// Persist the current state, logging failures
    pub fn save_settings(&self) {
        if let Err(e) = self.try_save_settings() {
            error!("Failed to save settings for {}: {}", self.selected.id, e);
        }
    }

    pub fn try_save_settings(&self) -> Result<()> {
        let profile = self.profile_key();
        let settings = self.normalized();
        self.resolver.save_settings(&profile, &settings)?;
        self.events().publish(SettingsEvent::SettingsSaved(profile));
        Ok(())
    }

    /// Snapshot as it should be persisted
    fn normalized(&self) -> Settings {
        let mut current = self.current.clone();

        if !self.resolver.display().supports_upscaling() {
            current.upscaling_mode = UpscalingMode::Off;
        }

        let mut settings = current.to_settings();
        if current.auto_adjust_bitrate {
            settings = self.resolver.apply_auto_bitrate(&settings, true);
        }
        if current.match_display_resolution {
            settings.resolution = Some(DEFAULT_RESOLUTION);
            settings.custom_resolution = None;
        }
        settings
    }

    /// Recompute the bitrate when auto-adjust is on
    fn refresh_auto_bitrate(&mut self) {
        if !self.current.auto_adjust_bitrate {
            return;
        }

        let settings = self.resolver.apply_auto_bitrate(&self.current.to_settings(), true);
        if let Some(kbps) = settings.bitrate {
            self.current.bitrate = kbps;
            self.current.custom_bitrate = None;
            self.bitrate_slider = slider_index_for_kbps(kbps, self.current.unlock_max_bitrate);
        }
    }

    /// Pin a manual bitrate, turning auto-adjust off
    fn set_manual_bitrate(&mut self, kbps: u32) {
        self.current.auto_adjust_bitrate = false;
        self.current.bitrate = kbps;
        self.current.custom_bitrate = Some(kbps);
        self.bitrate_slider = slider_index_for_kbps(kbps, self.current.unlock_max_bitrate);
    }

    fn resolution_changed(&mut self) {
        self.refresh_auto_bitrate();
        let resolution = self.effective_resolution();
        self.events().publish(SettingsEvent::ResolutionChanged(resolution));
    }

    fn fps_changed(&mut self) {
        self.refresh_auto_bitrate();
        let fps = self.effective_fps();
        self.events().publish(SettingsEvent::FpsChanged(fps));
    }

    /// Apply one edit and save. Returns false when the input was rejected.
    pub fn apply(&mut self, change: SettingChange) -> bool {
        match change {
            SettingChange::Resolution(choice) => {
                match choice {
                    ResolutionChoice::MatchDisplay => {
                        self.current.match_display_resolution = true;
                    }
                    ResolutionChoice::Fixed(resolution) => {
                        if !resolution.is_valid() {
                            return false;
                        }
                        self.current.match_display_resolution = false;
                        self.current.resolution = resolution;
                    }
                    ResolutionChoice::Custom => {
                        self.current.match_display_resolution = false;
                        self.current.resolution = Resolution::CUSTOM;
                    }
                }
                self.resolution_changed();
            }
            SettingChange::CustomResolution(width, height) => {
                if width == 0 || height == 0 {
                    return false;
                }
                self.current.custom_resolution = Some(Resolution::new(width, height));
                self.resolution_changed();
            }
            SettingChange::Fps(fps) => {
                self.current.fps = fps;
                self.fps_changed();
            }
            SettingChange::CustomFps(fps) => {
                if !(fps > 0.0) {
                    return false;
                }
                self.current.custom_fps = Some(fps);
                self.fps_changed();
            }
            SettingChange::RemoteResolution(remote) => match remote {
                Some(resolution) if !resolution.is_valid() => return false,
                Some(resolution) => {
                    self.current.remote_resolution_enabled = true;
                    self.current.remote_resolution = Some(resolution);
                }
                None => {
                    self.current.remote_resolution_enabled = false;
                    self.current.remote_resolution = None;
                }
            },
            SettingChange::RemoteFps(remote) => match remote {
                Some(0) => return false,
                Some(fps) => {
                    self.current.remote_fps_enabled = true;
                    self.current.remote_fps = Some(fps);
                }
                None => {
                    self.current.remote_fps_enabled = false;
                    self.current.remote_fps = None;
                }
            },
            SettingChange::AutoAdjustBitrate(enabled) => {
                if enabled {
                    self.current.auto_adjust_bitrate = true;
                    self.refresh_auto_bitrate();
                } else {
                    let kbps = self.current.effective_bitrate_kbps();
                    self.set_manual_bitrate(kbps);
                }
            }
            SettingChange::EnableYuv444(enabled) => {
                self.current.enable_yuv444 = enabled;
                self.refresh_auto_bitrate();
            }
            SettingChange::Bitrate(kbps) => {
                if kbps == 0 {
                    return false;
                }
                self.set_manual_bitrate(kbps);
            }
            SettingChange::BitrateSlider(index) => {
                let kbps = kbps_for_slider_index(index, self.current.unlock_max_bitrate);
                self.set_manual_bitrate(kbps);
            }
            SettingChange::UnlockMaxBitrate(unlocked) => {
                self.current.unlock_max_bitrate = unlocked;
                let max_index = bitrate_steps(unlocked).len() - 1;
                self.bitrate_slider = self.bitrate_slider.min(max_index);
                if self.current.auto_adjust_bitrate {
                    self.refresh_auto_bitrate();
                } else {
                    let kbps = kbps_for_slider_index(self.bitrate_slider, unlocked);
                    self.set_manual_bitrate(kbps);
                }
            }
            SettingChange::IgnoreAspectRatio(v) => self.current.ignore_aspect_ratio = v,
            SettingChange::ShowLocalCursor(v) => self.current.show_local_cursor = v,
            SettingChange::EnableMicrophone(v) => self.current.enable_microphone = v,
            SettingChange::StreamResolutionScale(v) => self.current.stream_resolution_scale = v,
            SettingChange::StreamResolutionScaleRatio(ratio) => {
                if ratio == 0 {
                    return false;
                }
                self.current.stream_resolution_scale_ratio = ratio;
            }
            SettingChange::Codec(codec) => self.current.codec = codec,
            SettingChange::Hdr(v) => self.current.hdr = v,
            SettingChange::FramePacing(pacing) => self.current.frame_pacing = pacing,
            SettingChange::AudioOnPc(v) => self.current.audio_on_pc = v,
            SettingChange::AudioConfiguration(config) => self.current.audio_configuration = config,
            SettingChange::VSync(v) => self.current.enable_vsync = v,
            SettingChange::ShowPerformanceOverlay(v) => self.current.show_performance_overlay = v,
            SettingChange::ShowConnectionWarnings(v) => self.current.show_connection_warnings = v,
            SettingChange::CaptureSystemShortcuts(v) => self.current.capture_system_shortcuts = v,
            SettingChange::VolumeLevel(level) => {
                if level.is_nan() {
                    return false;
                }
                let level = level.clamp(0.0, 1.0);
                self.current.volume_level = level;
                self.events().publish(SettingsEvent::VolumeChanged(level));
            }
            SettingChange::MultiController(mode) => self.current.multi_controller = mode,
            SettingChange::SwapAbxyButtons(v) => self.current.swap_abxy_buttons = v,
            SettingChange::Optimize(v) => self.current.optimize = v,
            SettingChange::AutoFullscreen(fullscreen) => {
                self.current.auto_fullscreen = fullscreen;
                self.current.display_mode = if fullscreen {
                    DisplayMode::Fullscreen
                } else {
                    DisplayMode::Windowed
                };
            }
            SettingChange::DisplayMode(mode) => {
                self.current.display_mode = mode;
                self.current.auto_fullscreen = mode == DisplayMode::Fullscreen;
            }
            SettingChange::Rumble(v) => self.current.rumble = v,
            SettingChange::ControllerDriver(driver) => self.current.controller_driver = driver,
            SettingChange::MouseDriver(driver) => self.current.mouse_driver = driver,
            SettingChange::EmulateGuide(v) => self.current.emulate_guide = v,
            SettingChange::AppArtworkDimensions(dimensions) => match dimensions {
                Some(dimensions) if !dimensions.is_valid() => return false,
                Some(dimensions) => self.current.app_artwork_dimensions = dimensions,
                None => self.current.app_artwork_dimensions = DEFAULT_APP_ARTWORK_DIMENSIONS,
            },
            SettingChange::DimNonHoveredArtwork(v) => self.current.dim_non_hovered_artwork = v,
            SettingChange::QuitAppAfterStream(v) => self.current.quit_app_after_stream = v,
            SettingChange::AbsoluteMouseMode(v) => self.current.absolute_mouse_mode = v,
            SettingChange::SwapMouseButtons(v) => self.current.swap_mouse_buttons = v,
            SettingChange::ReverseScrollDirection(v) => self.current.reverse_scroll_direction = v,
            SettingChange::TouchscreenMode(mode) => self.current.touchscreen_mode = mode,
            SettingChange::GamepadMouseMode(v) => self.current.gamepad_mouse_mode = v,
            SettingChange::UpscalingMode(mode) => self.current.upscaling_mode = mode,
            SettingChange::ConnectionMethod(method) => {
                let method = method.trim();
                self.current.connection_method = if method.is_empty() {
                    DEFAULT_CONNECTION_METHOD.to_string()
                } else {
                    method.to_string()
                };
            }
        }

        self.save_settings();
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::bitrate::compute_default_bitrate_kbps;
    use crate::app::config::{VideoCodec, FPS_OPTIONS, RESOLUTIONS};
    use crate::app::store::{MemoryStore, SettingsStore};
    use crate::display::FixedDisplay;
    use crate::hosts::{HostInfo, StaticHostProvider};
    use parking_lot::Mutex;

    struct Fixture {
        store: Arc<MemoryStore>,
        display: Arc<FixedDisplay>,
        hosts: Arc<StaticHostProvider>,
        events: EventBus,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                store: Arc::new(MemoryStore::new()),
                display: Arc::new(FixedDisplay::new(Some(Resolution::new(2560, 1440)), false)),
                hosts: Arc::new(StaticHostProvider::new(vec![
                    HostInfo::new("A", "Desk"),
                    HostInfo::new("B", "Couch"),
                ])),
                events: EventBus::new(),
            }
        }

        fn resolver(&self) -> SettingsResolver {
            SettingsResolver::new(self.store.clone(), self.display.clone(), self.events.clone())
        }

        fn model(&self) -> SettingsModel {
            SettingsModel::new(self.resolver(), self.hosts.clone())
        }

        fn stored(&self, profile: &ProfileKey) -> Option<Settings> {
            self.store
                .get(&profile.storage_key())
                .and_then(|data| Settings::from_bytes(&data).ok())
        }
    }

    #[test]
    fn test_new_model_saves_defaults_for_global() {
        let fixture = Fixture::new();
        let model = fixture.model();

        assert_eq!(model.selected_host(), &Host::global());
        assert!(!model.is_profile_locked());
        let stored = fixture.stored(&ProfileKey::global()).unwrap();
        assert_eq!(stored.bitrate, Some(20_000));
        assert_eq!(stored.resolution, Some(DEFAULT_RESOLUTION));
    }

    #[test]
    fn test_new_model_restores_selected_profile() {
        let fixture = Fixture::new();
        fixture.resolver().set_selected_profile(&ProfileKey::host("B")).unwrap();
        assert_eq!(fixture.model().selected_host().id, "B");

        fixture.resolver().set_selected_profile(&ProfileKey::host("gone")).unwrap();
        assert_eq!(fixture.model().selected_host(), &Host::global());
    }

    #[test]
    fn test_hosts_lead_with_global() {
        let fixture = Fixture::new();
        let ids: Vec<String> = fixture.model().hosts().into_iter().map(|h| h.id).collect();
        assert_eq!(ids, vec![ProfileKey::GLOBAL_ID, "A", "B"]);
    }

    #[test]
    fn test_select_host_locks_and_persists() {
        let fixture = Fixture::new();
        let mut model = fixture.model();

        model.select_host(Some("A"));
        assert!(model.is_profile_locked());
        assert_eq!(model.selected_host().id, "A");
        assert_eq!(fixture.resolver().selected_profile(), Some(ProfileKey::host("A")));

        model.select_host(Some("nope"));
        assert_eq!(model.selected_host().id, "A");

        model.select_host(None);
        assert_eq!(model.selected_host(), &Host::global());
    }

    #[test]
    fn test_follow_host_respects_lock() {
        let fixture = Fixture::new();
        let mut model = fixture.model();

        model.follow_host("B");
        assert_eq!(model.selected_host().id, "B");
        assert!(!model.is_profile_locked());

        model.select_host(Some("A"));
        model.follow_host("B");
        assert_eq!(model.selected_host().id, "A");

        model.unlock_profile();
        model.follow_host("B");
        assert_eq!(model.selected_host().id, "B");
    }

    #[test]
    fn test_vanished_host_falls_back_to_global() {
        let fixture = Fixture::new();
        let mut model = fixture.model();
        model.select_host(Some("B"));

        fixture.hosts.replace(vec![HostInfo::new("A", "Desk")]);
        model.hosts_changed();
        assert_eq!(model.selected_host(), &Host::global());
        assert!(!model.is_profile_locked());
    }

    #[test]
    fn test_presets_drive_auto_bitrate() {
        let fixture = Fixture::new();
        let mut model = fixture.model();

        for (resolution, _) in RESOLUTIONS {
            for fps in FPS_OPTIONS.iter().filter(|fps| **fps > 0) {
                model.apply(SettingChange::Resolution(ResolutionChoice::Fixed(*resolution)));
                model.apply(SettingChange::Fps(*fps));
                assert_eq!(
                    model.bitrate_kbps(),
                    compute_default_bitrate_kbps(resolution.width, resolution.height, *fps, false)
                );
            }
        }
    }

    #[test]
    fn test_host_profile_starts_from_global_and_saves_separately() {
        let fixture = Fixture::new();
        let mut model = fixture.model();
        model.apply(SettingChange::Codec(VideoCodec::H265));

        model.select_host(Some("A"));
        assert_eq!(model.settings().codec, VideoCodec::H265);
        assert!(fixture.stored(&ProfileKey::host("A")).is_none());

        model.apply(SettingChange::Hdr(true));
        assert_eq!(fixture.stored(&ProfileKey::host("A")).unwrap().hdr, Some(true));
        assert_eq!(fixture.stored(&ProfileKey::global()).unwrap().hdr, Some(false));
    }

    #[test]
    fn test_resolution_change_recomputes_bitrate_and_notifies() {
        let fixture = Fixture::new();
        let mut model = fixture.model();

        let seen = Arc::new(Mutex::new(Vec::new()));
        let _sub = {
            let seen = seen.clone();
            fixture.events.subscribe(move |event| {
                if let SettingsEvent::ResolutionChanged(res) = event {
                    seen.lock().push(*res);
                }
            })
        };

        assert!(model.apply(SettingChange::Resolution(ResolutionChoice::Fixed(Resolution::new(3840, 2160)))));
        assert_eq!(model.bitrate_kbps(), 80_000);

        model.apply(SettingChange::Resolution(ResolutionChoice::MatchDisplay));
        assert_eq!(model.resolution_choice(), ResolutionChoice::MatchDisplay);
        assert_eq!(model.bitrate_kbps(), 40_000);

        assert_eq!(*seen.lock(), vec![Resolution::new(3840, 2160), Resolution::new(2560, 1440)]);

        let stored = fixture.stored(&ProfileKey::global()).unwrap();
        assert_eq!(stored.match_display_resolution, Some(true));
        assert_eq!(stored.resolution, Some(DEFAULT_RESOLUTION));
        assert_eq!(stored.bitrate, Some(40_000));
    }

    #[test]
    fn test_custom_resolution_and_fps() {
        let fixture = Fixture::new();
        let mut model = fixture.model();

        model.apply(SettingChange::Resolution(ResolutionChoice::Custom));
        // No custom size yet: the default stands in
        assert_eq!(model.effective_resolution(), DEFAULT_RESOLUTION);

        assert!(model.apply(SettingChange::CustomResolution(1280, 720)));
        assert!(!model.apply(SettingChange::CustomResolution(0, 720)));
        model.apply(SettingChange::Fps(0));
        assert!(model.apply(SettingChange::CustomFps(30.0)));
        assert!(!model.apply(SettingChange::CustomFps(-5.0)));

        assert_eq!(model.effective_resolution(), Resolution::new(1280, 720));
        assert_eq!(model.effective_fps(), 30);
        assert_eq!(model.bitrate_kbps(), 5_000);
    }

    #[test]
    fn test_load_normalizes_dangling_sentinels() {
        let fixture = Fixture::new();
        let stale = Settings {
            resolution: Some(Resolution::CUSTOM),
            custom_resolution: Some(Resolution::new(0, 0)),
            fps: Some(0),
            ..Default::default()
        };
        fixture.resolver().save_settings(&ProfileKey::global(), &stale).unwrap();

        let model = fixture.model();
        assert_eq!(model.settings().resolution, DEFAULT_RESOLUTION);
        assert_eq!(model.settings().custom_resolution, None);
        assert_eq!(model.settings().fps, DEFAULT_FPS);
    }

    #[test]
    fn test_manual_bitrate_turns_auto_off() {
        let fixture = Fixture::new();
        let mut model = fixture.model();

        model.apply(SettingChange::Bitrate(12_345));
        assert!(!model.settings().auto_adjust_bitrate);
        assert_eq!(model.bitrate_kbps(), 12_345);
        assert_eq!(model.bitrate_slider_index(), slider_index_for_kbps(12_345, false));

        // Resolution changes leave a manual bitrate alone
        model.apply(SettingChange::Resolution(ResolutionChoice::Fixed(Resolution::new(3840, 2160))));
        assert_eq!(model.bitrate_kbps(), 12_345);

        let stored = fixture.stored(&ProfileKey::global()).unwrap();
        assert_eq!(stored.auto_adjust_bitrate, Some(false));
        assert_eq!(stored.custom_bitrate, Some(12_345));

        model.apply(SettingChange::AutoAdjustBitrate(true));
        assert_eq!(model.bitrate_kbps(), 80_000);
        assert_eq!(fixture.stored(&ProfileKey::global()).unwrap().custom_bitrate, None);
    }

    #[test]
    fn test_slider_and_unlock() {
        let fixture = Fixture::new();
        let mut model = fixture.model();

        model.apply(SettingChange::UnlockMaxBitrate(true));
        let top = bitrate_steps(true).len() - 1;
        model.apply(SettingChange::BitrateSlider(top));
        assert_eq!(model.bitrate_kbps(), kbps_for_slider_index(top, true));

        model.apply(SettingChange::UnlockMaxBitrate(false));
        let locked_top = bitrate_steps(false).len() - 1;
        assert_eq!(model.bitrate_slider_index(), locked_top);
        assert_eq!(model.bitrate_kbps(), kbps_for_slider_index(locked_top, false));
    }

    #[test]
    fn test_unsupported_upscaling_saved_as_off() {
        let fixture = Fixture::new();
        let mut model = fixture.model();
        assert_eq!(model.available_upscaling_modes(), &[UpscalingMode::Off]);

        model.apply(SettingChange::UpscalingMode(UpscalingMode::MetalFxQuality));
        assert_eq!(model.settings().upscaling_mode, UpscalingMode::MetalFxQuality);
        assert_eq!(
            fixture.stored(&ProfileKey::global()).unwrap().upscaling_mode,
            Some(UpscalingMode::Off)
        );
    }

    #[test]
    fn test_volume_and_display_mode() {
        let fixture = Fixture::new();
        let mut model = fixture.model();

        model.apply(SettingChange::VolumeLevel(-1.0));
        assert_eq!(model.settings().volume_level, 0.0);
        assert!(!model.apply(SettingChange::VolumeLevel(f64::NAN)));

        model.apply(SettingChange::DisplayMode(DisplayMode::Fullscreen));
        assert!(model.settings().auto_fullscreen);
        model.apply(SettingChange::AutoFullscreen(false));
        assert_eq!(model.settings().display_mode, DisplayMode::Windowed);
    }

    #[test]
    fn test_load_default_settings_without_saving() {
        let fixture = Fixture::new();
        let mut model = fixture.model();
        model.apply(SettingChange::Hdr(true));

        model.load_default_settings();
        assert!(!model.settings().hdr);
        assert_eq!(fixture.stored(&ProfileKey::global()).unwrap().hdr, Some(true));

        model.load_and_save_default_settings();
        assert_eq!(fixture.stored(&ProfileKey::global()).unwrap().hdr, Some(false));
    }

    #[test]
    fn test_remote_overrides() {
        let fixture = Fixture::new();
        let mut model = fixture.model();

        assert!(!model.apply(SettingChange::RemoteFps(Some(0))));
        model.apply(SettingChange::RemoteResolution(Some(Resolution::new(1920, 1080))));
        model.apply(SettingChange::RemoteFps(Some(120)));

        let config = fixture.resolver().stream_config(&ProfileKey::global()).unwrap();
        assert_eq!(config.remote_resolution, Some(Resolution::new(1920, 1080)));
        assert_eq!(config.remote_fps, Some(120));

        model.apply(SettingChange::RemoteResolution(None));
        let stored = fixture.stored(&ProfileKey::global()).unwrap();
        assert_eq!(stored.remote_resolution, Some(false));
        assert_eq!(stored.remote_resolution_width, None);
    }
}
