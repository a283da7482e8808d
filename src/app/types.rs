//! Application Types
//!
//! Common types used across the settings core.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::config::{
    AudioConfiguration, DisplayMode, FramePacing, InputDriver, MultiControllerMode,
    TouchscreenMode, UpscalingMode, VideoCodec,
};

/// Pixel dimensions of a stream, display or artwork tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

impl Resolution {
    /// Sentinel meaning "use the custom resolution"
    pub const CUSTOM: Resolution = Resolution::new(0, 0);

    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// True for the 0x0 custom sentinel
    pub fn is_custom(&self) -> bool {
        *self == Self::CUSTOM
    }

    /// Both dimensions are non-zero
    pub fn is_valid(&self) -> bool {
        self.width > 0 && self.height > 0
    }

    pub fn pixels(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// Round both dimensions down to an even number of pixels
    pub fn even(&self) -> Self {
        Self::new(self.width - self.width % 2, self.height - self.height % 2)
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Identifies which settings profile is addressed: one host, or the shared global profile
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProfileKey(String);

impl ProfileKey {
    /// Identifier of the shared profile
    pub const GLOBAL_ID: &'static str = "__global__";

    pub fn global() -> Self {
        Self(Self::GLOBAL_ID.to_string())
    }

    pub fn host(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn is_global(&self) -> bool {
        self.0 == Self::GLOBAL_ID
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Key the profile's snapshot is stored under.
    /// Existing stores depend on this exact shape.
    pub fn storage_key(&self) -> String {
        storage_key(&self.0)
    }
}

impl fmt::Display for ProfileKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProfileKey {
    fn from(id: &str) -> Self {
        Self::host(id)
    }
}

/// Derive the store key for a profile identifier
pub fn storage_key(profile_id: &str) -> String {
    format!("{}-settings", profile_id)
}

/// Entry of the profile picker
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Host {
    pub id: String,
    pub name: String,
}

impl Host {
    pub fn global() -> Self {
        Self {
            id: ProfileKey::GLOBAL_ID.to_string(),
            name: "Global".to_string(),
        }
    }

    pub fn profile_key(&self) -> ProfileKey {
        ProfileKey::host(self.id.clone())
    }
}

/// Resolution choice as presented by the preference UI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionChoice {
    /// Follow the local main display
    MatchDisplay,
    /// One of the preset sizes
    Fixed(Resolution),
    /// Use the custom width/height fields
    Custom,
}

/// Setting changes
#[derive(Debug, Clone, PartialEq)]
pub enum SettingChange {
    Resolution(ResolutionChoice),
    /// Custom width and height, used with `ResolutionChoice::Custom`
    CustomResolution(u32, u32),
    /// Frame rate, 0 selects the custom value
    Fps(u32),
    CustomFps(f64),
    RemoteResolution(Option<Resolution>),
    RemoteFps(Option<u32>),
    AutoAdjustBitrate(bool),
    EnableYuv444(bool),
    /// Manual bitrate in kbps
    Bitrate(u32),
    /// Index into the bitrate slider steps
    BitrateSlider(usize),
    UnlockMaxBitrate(bool),
    IgnoreAspectRatio(bool),
    ShowLocalCursor(bool),
    EnableMicrophone(bool),
    StreamResolutionScale(bool),
    StreamResolutionScaleRatio(u32),
    Codec(VideoCodec),
    Hdr(bool),
    FramePacing(FramePacing),
    AudioOnPc(bool),
    AudioConfiguration(AudioConfiguration),
    VSync(bool),
    ShowPerformanceOverlay(bool),
    ShowConnectionWarnings(bool),
    CaptureSystemShortcuts(bool),
    VolumeLevel(f64),
    MultiController(MultiControllerMode),
    SwapAbxyButtons(bool),
    Optimize(bool),
    AutoFullscreen(bool),
    DisplayMode(DisplayMode),
    Rumble(bool),
    ControllerDriver(InputDriver),
    MouseDriver(InputDriver),
    EmulateGuide(bool),
    AppArtworkDimensions(Option<Resolution>),
    DimNonHoveredArtwork(bool),
    QuitAppAfterStream(bool),
    AbsoluteMouseMode(bool),
    SwapMouseButtons(bool),
    ReverseScrollDirection(bool),
    TouchscreenMode(TouchscreenMode),
    GamepadMouseMode(bool),
    UpscalingMode(UpscalingMode),
    ConnectionMethod(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_key_shape() {
        assert_eq!(ProfileKey::global().storage_key(), "__global__-settings");
        assert_eq!(
            ProfileKey::host("0F1E2D3C").storage_key(),
            "0F1E2D3C-settings"
        );
    }

    #[test]
    fn test_even_rounding() {
        assert_eq!(Resolution::new(3839, 2161).even(), Resolution::new(3838, 2160));
        assert!(Resolution::CUSTOM.is_custom());
        assert!(!Resolution::CUSTOM.is_valid());
    }
}
