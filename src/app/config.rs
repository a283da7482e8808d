//! Profile Configuration
//!
//! The persisted settings snapshot for one profile and the option enums it uses.

use serde::{Deserialize, Serialize};

use super::types::Resolution;

/// Settings snapshot for one profile.
///
/// Every field is optional: `None` means "not set, use the compiled default".
/// See [`ResolvedSettings`](super::defaults::ResolvedSettings) for the read side.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    // === Resolution and FPS ===
    /// Stream resolution, 0x0 selects `custom_resolution`
    pub resolution: Option<Resolution>,

    /// Follow the local main display instead of `resolution`
    pub match_display_resolution: Option<bool>,

    pub custom_resolution: Option<Resolution>,

    /// Stream frame rate, 0 selects `custom_fps`
    pub fps: Option<u32>,

    pub custom_fps: Option<f64>,

    // === Streaming ===
    /// Derive the bitrate from resolution and frame rate
    pub auto_adjust_bitrate: Option<bool>,

    /// Request 4:4:4 chroma sampling (doubles the bitrate estimate)
    #[serde(rename = "enableYUV444")]
    pub enable_yuv444: Option<bool>,

    pub ignore_aspect_ratio: Option<bool>,

    pub show_local_cursor: Option<bool>,

    pub enable_microphone: Option<bool>,

    pub stream_resolution_scale: Option<bool>,

    /// Percent
    pub stream_resolution_scale_ratio: Option<u32>,

    // === Remote host display mode override ===
    pub remote_resolution: Option<bool>,

    pub remote_resolution_width: Option<u32>,

    pub remote_resolution_height: Option<u32>,

    pub remote_fps: Option<bool>,

    pub remote_fps_rate: Option<u32>,

    // === Bitrate ===
    /// Bitrate in kbps
    pub bitrate: Option<u32>,

    /// Manually entered bitrate in kbps
    pub custom_bitrate: Option<u32>,

    /// Extend the slider past 150 Mbps
    pub unlock_max_bitrate: Option<bool>,

    // === Video and Audio ===
    pub codec: Option<VideoCodec>,

    pub hdr: Option<bool>,

    pub frame_pacing: Option<FramePacing>,

    pub audio_on_pc: Option<bool>,

    pub audio_configuration: Option<AudioConfiguration>,

    pub enable_vsync: Option<bool>,

    pub show_performance_overlay: Option<bool>,

    pub show_connection_warnings: Option<bool>,

    pub capture_system_shortcuts: Option<bool>,

    /// Local playback volume, 0.0 to 1.0
    pub volume_level: Option<f64>,

    // === Controller ===
    pub multi_controller: Option<MultiControllerMode>,

    #[serde(rename = "swapABXYButtons")]
    pub swap_abxy_buttons: Option<bool>,

    /// Let the host adjust game settings for the stream
    pub optimize: Option<bool>,

    // === Window ===
    /// Legacy fullscreen flag, superseded by `display_mode`
    pub auto_fullscreen: Option<bool>,

    pub display_mode: Option<DisplayMode>,

    pub rumble: Option<bool>,

    pub controller_driver: Option<InputDriver>,

    pub mouse_driver: Option<InputDriver>,

    pub emulate_guide: Option<bool>,

    // === App grid ===
    pub app_artwork_dimensions: Option<Resolution>,

    pub dim_non_hovered_artwork: Option<bool>,

    // === Host ===
    pub quit_app_after_stream: Option<bool>,

    // === Input ===
    pub absolute_mouse_mode: Option<bool>,

    pub swap_mouse_buttons: Option<bool>,

    pub reverse_scroll_direction: Option<bool>,

    pub touchscreen_mode: Option<TouchscreenMode>,

    pub gamepad_mouse_mode: Option<bool>,

    pub upscaling_mode: Option<UpscalingMode>,

    /// "Auto" or a specific host address
    pub connection_method: Option<String>,
}

impl Settings {
    /// Encode for the settings store
    pub fn to_bytes(&self) -> serde_json::Result<Vec<u8>> {
        serde_json::to_vec(self)
    }

    /// Decode a stored snapshot
    pub fn from_bytes(data: &[u8]) -> serde_json::Result<Self> {
        serde_json::from_slice(data)
    }
}

/// Preset stream resolutions offered by the picker
pub const RESOLUTIONS: &[(Resolution, &str)] = &[
    (Resolution::new(1280, 720), "720p"),
    (Resolution::new(1920, 1080), "1080p"),
    (Resolution::new(2560, 1440), "1440p"),
    (Resolution::new(3840, 2160), "4K"),
];

/// Available FPS options (0 = custom)
pub const FPS_OPTIONS: &[u32] = &[30, 60, 90, 120, 144, 0];

/// Video codec options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum VideoCodec {
    /// H.264/AVC - widest compatibility
    #[default]
    H264,
    /// H.265/HEVC - better compression
    H265,
}

impl VideoCodec {
    pub fn as_str(&self) -> &'static str {
        match self {
            VideoCodec::H264 => "H.264",
            VideoCodec::H265 => "H.265",
        }
    }

    pub fn is_hevc(&self) -> bool {
        matches!(self, VideoCodec::H265)
    }
}

/// Frame pacing strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum FramePacing {
    LowestLatency,
    #[default]
    SmoothestVideo,
}

impl FramePacing {
    pub fn display_name(&self) -> &'static str {
        match self {
            FramePacing::LowestLatency => "Lowest Latency",
            FramePacing::SmoothestVideo => "Smoothest Video",
        }
    }
}

/// Audio channel layout requested from the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum AudioConfiguration {
    #[default]
    Stereo,
    #[serde(rename = "surround-5.1")]
    Surround51,
    #[serde(rename = "surround-7.1")]
    Surround71,
}

impl AudioConfiguration {
    pub fn display_name(&self) -> &'static str {
        match self {
            AudioConfiguration::Stereo => "Stereo",
            AudioConfiguration::Surround51 => "5.1 surround sound",
            AudioConfiguration::Surround71 => "7.1 surround sound",
        }
    }

    pub fn channel_count(&self) -> u32 {
        match self {
            AudioConfiguration::Stereo => 2,
            AudioConfiguration::Surround51 => 6,
            AudioConfiguration::Surround71 => 8,
        }
    }
}

/// Multiple controller handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MultiControllerMode {
    /// Always report a single controller
    Single,
    /// Report every connected controller
    #[default]
    Auto,
}

impl MultiControllerMode {
    pub fn is_multi(&self) -> bool {
        matches!(self, MultiControllerMode::Auto)
    }
}

/// Stream window mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum DisplayMode {
    #[default]
    Windowed,
    Fullscreen,
    BorderlessWindowed,
}

impl DisplayMode {
    /// Map a stored index, clamping out-of-range values
    pub fn from_index(index: i64) -> Self {
        match index.clamp(0, 2) {
            0 => DisplayMode::Windowed,
            1 => DisplayMode::Fullscreen,
            _ => DisplayMode::BorderlessWindowed,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            DisplayMode::Windowed => "Windowed",
            DisplayMode::Fullscreen => "Fullscreen",
            DisplayMode::BorderlessWindowed => "Borderless Windowed",
        }
    }
}

/// Controller and mouse driver backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum InputDriver {
    #[default]
    Hid,
    Mfi,
}

impl InputDriver {
    pub fn as_str(&self) -> &'static str {
        match self {
            InputDriver::Hid => "HID",
            InputDriver::Mfi => "MFi",
        }
    }
}

/// How touch input is translated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TouchscreenMode {
    #[default]
    Trackpad,
    Touchscreen,
}

/// Spatial upscaling applied to the decoded stream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum UpscalingMode {
    #[default]
    Off,
    MetalFxQuality,
    MetalFxPerformance,
}

impl UpscalingMode {
    pub fn display_name(&self) -> &'static str {
        match self {
            UpscalingMode::Off => "Off",
            UpscalingMode::MetalFxQuality => "MetalFX Spatial (Quality)",
            UpscalingMode::MetalFxPerformance => "MetalFX Spatial (Performance)",
        }
    }

    /// Modes selectable on this machine
    pub fn available(upscaling_supported: bool) -> &'static [UpscalingMode] {
        if upscaling_supported {
            &[
                UpscalingMode::Off,
                UpscalingMode::MetalFxQuality,
                UpscalingMode::MetalFxPerformance,
            ]
        } else {
            &[UpscalingMode::Off]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sparse_record_decodes() {
        let settings = Settings::from_bytes(br#"{"fps":120,"codec":"h265"}"#).unwrap();
        assert_eq!(settings.fps, Some(120));
        assert_eq!(settings.codec, Some(VideoCodec::H265));
        assert_eq!(settings.resolution, None);
        assert_eq!(settings.bitrate, None);
    }

    #[test]
    fn test_malformed_record_is_rejected() {
        assert!(Settings::from_bytes(b"not json").is_err());
        assert!(Settings::from_bytes(br#"{"fps":"sixty"}"#).is_err());
    }

    #[test]
    fn test_wire_names() {
        let settings = Settings {
            swap_abxy_buttons: Some(true),
            audio_configuration: Some(AudioConfiguration::Surround51),
            enable_yuv444: Some(false),
            ..Default::default()
        };
        let json = String::from_utf8(settings.to_bytes().unwrap()).unwrap();
        assert!(json.contains("\"swapABXYButtons\":true"));
        assert!(json.contains("\"audioConfiguration\":\"surround-5.1\""));
        assert!(json.contains("\"enableYUV444\":false"));

        let decoded = Settings::from_bytes(br#"{"enableYUV444":true}"#).unwrap();
        assert_eq!(decoded.enable_yuv444, Some(true));
    }

    #[test]
    fn test_display_mode_index_clamps() {
        assert_eq!(DisplayMode::from_index(-3), DisplayMode::Windowed);
        assert_eq!(DisplayMode::from_index(1), DisplayMode::Fullscreen);
        assert_eq!(DisplayMode::from_index(9), DisplayMode::BorderlessWindowed);
    }

    #[test]
    fn test_labels() {
        assert_eq!(VideoCodec::H265.as_str(), "H.265");
        assert_eq!(FramePacing::default().display_name(), "Smoothest Video");
        assert_eq!(AudioConfiguration::Surround71.channel_count(), 8);
        assert_eq!(AudioConfiguration::Surround51.display_name(), "5.1 surround sound");
        assert_eq!(DisplayMode::BorderlessWindowed.display_name(), "Borderless Windowed");
        assert_eq!(InputDriver::Mfi.as_str(), "MFi");
        assert_eq!(UpscalingMode::MetalFxQuality.display_name(), "MetalFX Spatial (Quality)");
    }

    #[test]
    fn test_upscaling_availability() {
        assert_eq!(UpscalingMode::available(false), &[UpscalingMode::Off]);
        assert_eq!(UpscalingMode::available(true).len(), 3);
    }
}
