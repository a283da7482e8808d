//! Settings Defaults
//!
//! Compiled defaults and the fully resolved view of a profile.

use super::bitrate::DEFAULT_BITRATE_KBPS;
use super::config::{
    AudioConfiguration, DisplayMode, FramePacing, InputDriver, MultiControllerMode, Settings,
    TouchscreenMode, UpscalingMode, VideoCodec,
};
use super::store::{read_value, SettingsStore};
use super::types::Resolution;

pub const DEFAULT_RESOLUTION: Resolution = Resolution::new(1920, 1080);
pub const DEFAULT_FPS: u32 = 60;
pub const DEFAULT_APP_ARTWORK_DIMENSIONS: Resolution = Resolution::new(300, 400);
pub const DEFAULT_STREAM_RESOLUTION_SCALE_RATIO: u32 = 100;
pub const DEFAULT_VOLUME_LEVEL: f64 = 1.0;
pub const DEFAULT_CONNECTION_METHOD: &str = "Auto";

/// Store key holding the default window mode index
pub const DEFAULT_DISPLAY_MODE_KEY: &str = "defaultDisplayMode";
/// Legacy store key for the fullscreen preference
pub const AUTO_FULLSCREEN_KEY: &str = "autoFullscreen";

/// Window defaults, which live in the store outside any profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DisplayDefaults {
    pub display_mode: DisplayMode,
    pub auto_fullscreen: bool,
}

impl DisplayDefaults {
    /// Read window defaults, honoring the legacy `autoFullscreen` flag
    pub fn from_store(store: &dyn SettingsStore) -> Self {
        Self {
            display_mode: default_display_mode(store),
            auto_fullscreen: default_auto_fullscreen(store),
        }
    }
}

/// Window mode for new windows: the stored index, else derived from `autoFullscreen`
pub fn default_display_mode(store: &dyn SettingsStore) -> DisplayMode {
    match read_value::<i64>(store, DEFAULT_DISPLAY_MODE_KEY) {
        Some(index) => DisplayMode::from_index(index),
        None if read_value::<bool>(store, AUTO_FULLSCREEN_KEY).unwrap_or(false) => DisplayMode::Fullscreen,
        None => DisplayMode::Windowed,
    }
}

pub fn default_auto_fullscreen(store: &dyn SettingsStore) -> bool {
    match read_value::<i64>(store, DEFAULT_DISPLAY_MODE_KEY) {
        Some(index) => DisplayMode::from_index(index) == DisplayMode::Fullscreen,
        None => read_value::<bool>(store, AUTO_FULLSCREEN_KEY).unwrap_or(false),
    }
}

/// Every profile field with defaults applied
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedSettings {
    /// Stored resolution, 0x0 when the custom resolution is selected
    pub resolution: Resolution,
    pub match_display_resolution: bool,
    pub custom_resolution: Option<Resolution>,
    /// Stored frame rate, 0 when the custom frame rate is selected
    pub fps: u32,
    pub custom_fps: Option<f64>,

    pub auto_adjust_bitrate: bool,
    pub enable_yuv444: bool,
    pub ignore_aspect_ratio: bool,
    pub show_local_cursor: bool,
    pub enable_microphone: bool,
    pub stream_resolution_scale: bool,
    pub stream_resolution_scale_ratio: u32,

    pub remote_resolution_enabled: bool,
    /// Remote display size, only when enabled and valid
    pub remote_resolution: Option<Resolution>,
    pub remote_fps_enabled: bool,
    /// Remote refresh rate, only when enabled and non-zero
    pub remote_fps: Option<u32>,

    pub bitrate: u32,
    pub custom_bitrate: Option<u32>,
    pub unlock_max_bitrate: bool,

    pub codec: VideoCodec,
    pub hdr: bool,
    pub frame_pacing: FramePacing,
    pub audio_on_pc: bool,
    pub audio_configuration: AudioConfiguration,
    pub enable_vsync: bool,
    pub show_performance_overlay: bool,
    pub show_connection_warnings: bool,
    pub capture_system_shortcuts: bool,
    pub volume_level: f64,

    pub multi_controller: MultiControllerMode,
    pub swap_abxy_buttons: bool,
    pub optimize: bool,

    pub auto_fullscreen: bool,
    pub display_mode: DisplayMode,
    pub rumble: bool,
    pub controller_driver: InputDriver,
    pub mouse_driver: InputDriver,
    pub emulate_guide: bool,

    pub app_artwork_dimensions: Resolution,
    pub dim_non_hovered_artwork: bool,

    pub quit_app_after_stream: bool,

    pub absolute_mouse_mode: bool,
    pub swap_mouse_buttons: bool,
    pub reverse_scroll_direction: bool,
    pub touchscreen_mode: TouchscreenMode,
    pub gamepad_mouse_mode: bool,
    pub upscaling_mode: UpscalingMode,
    pub connection_method: String,
}

impl ResolvedSettings {
    /// Compiled defaults
    pub fn defaults(display: DisplayDefaults) -> Self {
        Self::resolve(&Settings::default(), display)
    }

    /// Fill every unset field of `settings` from the compiled defaults
    pub fn resolve(settings: &Settings, display: DisplayDefaults) -> Self {
        let auto_fullscreen = settings.auto_fullscreen.unwrap_or(display.auto_fullscreen);
        let display_mode = settings.display_mode.unwrap_or_else(|| match settings.auto_fullscreen {
            Some(true) => DisplayMode::Fullscreen,
            Some(false) => DisplayMode::Windowed,
            None => display.display_mode,
        });

        let remote_resolution_enabled = settings.remote_resolution.unwrap_or(false);
        let remote_resolution = if remote_resolution_enabled {
            match (settings.remote_resolution_width, settings.remote_resolution_height) {
                (Some(w), Some(h)) if w > 0 && h > 0 => Some(Resolution::new(w, h)),
                _ => None,
            }
        } else {
            None
        };

        let remote_fps_enabled = settings.remote_fps.unwrap_or(false);
        let remote_fps = settings
            .remote_fps_rate
            .filter(|rate| remote_fps_enabled && *rate > 0);

        Self {
            resolution: settings.resolution.unwrap_or(DEFAULT_RESOLUTION),
            match_display_resolution: settings.match_display_resolution.unwrap_or(false),
            custom_resolution: settings.custom_resolution.filter(Resolution::is_valid),
            fps: settings.fps.unwrap_or(DEFAULT_FPS),
            custom_fps: settings.custom_fps.filter(|fps| *fps > 0.0),

            auto_adjust_bitrate: settings.auto_adjust_bitrate.unwrap_or(true),
            enable_yuv444: settings.enable_yuv444.unwrap_or(false),
            ignore_aspect_ratio: settings.ignore_aspect_ratio.unwrap_or(false),
            show_local_cursor: settings.show_local_cursor.unwrap_or(false),
            enable_microphone: settings.enable_microphone.unwrap_or(false),
            stream_resolution_scale: settings.stream_resolution_scale.unwrap_or(false),
            stream_resolution_scale_ratio: settings
                .stream_resolution_scale_ratio
                .unwrap_or(DEFAULT_STREAM_RESOLUTION_SCALE_RATIO),

            remote_resolution_enabled,
            remote_resolution,
            remote_fps_enabled,
            remote_fps,

            bitrate: settings.bitrate.unwrap_or(DEFAULT_BITRATE_KBPS),
            custom_bitrate: settings.custom_bitrate,
            unlock_max_bitrate: settings.unlock_max_bitrate.unwrap_or(false),

            codec: settings.codec.unwrap_or_default(),
            hdr: settings.hdr.unwrap_or(false),
            frame_pacing: settings.frame_pacing.unwrap_or_default(),
            audio_on_pc: settings.audio_on_pc.unwrap_or(false),
            audio_configuration: settings.audio_configuration.unwrap_or_default(),
            enable_vsync: settings.enable_vsync.unwrap_or(true),
            show_performance_overlay: settings.show_performance_overlay.unwrap_or(false),
            show_connection_warnings: settings.show_connection_warnings.unwrap_or(true),
            capture_system_shortcuts: settings.capture_system_shortcuts.unwrap_or(false),
            volume_level: settings
                .volume_level
                .unwrap_or(DEFAULT_VOLUME_LEVEL)
                .clamp(0.0, 1.0),

            multi_controller: settings.multi_controller.unwrap_or_default(),
            swap_abxy_buttons: settings.swap_abxy_buttons.unwrap_or(false),
            optimize: settings.optimize.unwrap_or(false),

            auto_fullscreen,
            display_mode,
            rumble: settings.rumble.unwrap_or(true),
            controller_driver: settings.controller_driver.unwrap_or_default(),
            mouse_driver: settings.mouse_driver.unwrap_or_default(),
            emulate_guide: settings.emulate_guide.unwrap_or(false),

            app_artwork_dimensions: settings
                .app_artwork_dimensions
                .filter(Resolution::is_valid)
                .unwrap_or(DEFAULT_APP_ARTWORK_DIMENSIONS),
            dim_non_hovered_artwork: settings.dim_non_hovered_artwork.unwrap_or(true),

            quit_app_after_stream: settings.quit_app_after_stream.unwrap_or(false),

            absolute_mouse_mode: settings.absolute_mouse_mode.unwrap_or(false),
            swap_mouse_buttons: settings.swap_mouse_buttons.unwrap_or(false),
            reverse_scroll_direction: settings.reverse_scroll_direction.unwrap_or(false),
            touchscreen_mode: settings.touchscreen_mode.unwrap_or_default(),
            gamepad_mouse_mode: settings.gamepad_mouse_mode.unwrap_or(false),
            upscaling_mode: settings.upscaling_mode.unwrap_or_default(),
            connection_method: settings
                .connection_method
                .clone()
                .unwrap_or_else(|| DEFAULT_CONNECTION_METHOD.to_string()),
        }
    }

    /// Bitrate actually requested: the manual value when present
    pub fn effective_bitrate_kbps(&self) -> u32 {
        self.custom_bitrate.unwrap_or(self.bitrate)
    }

    /// Fully populated snapshot carrying these values
    pub fn to_settings(&self) -> Settings {
        Settings {
            resolution: Some(self.resolution),
            match_display_resolution: Some(self.match_display_resolution),
            custom_resolution: self.custom_resolution,
            fps: Some(self.fps),
            custom_fps: self.custom_fps,
            auto_adjust_bitrate: Some(self.auto_adjust_bitrate),
            enable_yuv444: Some(self.enable_yuv444),
            ignore_aspect_ratio: Some(self.ignore_aspect_ratio),
            show_local_cursor: Some(self.show_local_cursor),
            enable_microphone: Some(self.enable_microphone),
            stream_resolution_scale: Some(self.stream_resolution_scale),
            stream_resolution_scale_ratio: Some(self.stream_resolution_scale_ratio),
            remote_resolution: Some(self.remote_resolution_enabled),
            remote_resolution_width: self.remote_resolution.map(|r| r.width),
            remote_resolution_height: self.remote_resolution.map(|r| r.height),
            remote_fps: Some(self.remote_fps_enabled),
            remote_fps_rate: self.remote_fps,
            bitrate: Some(self.bitrate),
            custom_bitrate: self.custom_bitrate,
            unlock_max_bitrate: Some(self.unlock_max_bitrate),
            codec: Some(self.codec),
            hdr: Some(self.hdr),
            frame_pacing: Some(self.frame_pacing),
            audio_on_pc: Some(self.audio_on_pc),
            audio_configuration: Some(self.audio_configuration),
            enable_vsync: Some(self.enable_vsync),
            show_performance_overlay: Some(self.show_performance_overlay),
            show_connection_warnings: Some(self.show_connection_warnings),
            capture_system_shortcuts: Some(self.capture_system_shortcuts),
            volume_level: Some(self.volume_level),
            multi_controller: Some(self.multi_controller),
            swap_abxy_buttons: Some(self.swap_abxy_buttons),
            optimize: Some(self.optimize),
            auto_fullscreen: Some(self.auto_fullscreen),
            display_mode: Some(self.display_mode),
            rumble: Some(self.rumble),
            controller_driver: Some(self.controller_driver),
            mouse_driver: Some(self.mouse_driver),
            emulate_guide: Some(self.emulate_guide),
            app_artwork_dimensions: Some(self.app_artwork_dimensions),
            dim_non_hovered_artwork: Some(self.dim_non_hovered_artwork),
            quit_app_after_stream: Some(self.quit_app_after_stream),
            absolute_mouse_mode: Some(self.absolute_mouse_mode),
            swap_mouse_buttons: Some(self.swap_mouse_buttons),
            reverse_scroll_direction: Some(self.reverse_scroll_direction),
            touchscreen_mode: Some(self.touchscreen_mode),
            gamepad_mouse_mode: Some(self.gamepad_mouse_mode),
            upscaling_mode: Some(self.upscaling_mode),
            connection_method: Some(self.connection_method.clone()),
        }
    }
}
