//! Local display information used when a profile follows the main display.

use parking_lot::Mutex;

use crate::app::Resolution;

/// Source of local display facts
pub trait DisplayProvider: Send + Sync {
    /// Native pixel size of the main display, if one is attached
    fn main_display_pixel_size(&self) -> Option<Resolution>;

    /// Whether spatial upscaling modes can be offered
    fn supports_upscaling(&self) -> bool;
}

/// Display provider with fixed answers, for headless hosts and tests
#[derive(Debug, Default)]
pub struct FixedDisplay {
    size: Mutex<Option<Resolution>>,
    upscaling: bool,
}

impl FixedDisplay {
    pub fn new(size: Option<Resolution>, upscaling: bool) -> Self {
        Self {
            size: Mutex::new(size),
            upscaling,
        }
    }

    /// No display attached, no upscaling
    pub fn headless() -> Self {
        Self::default()
    }

    /// Simulate a display change
    pub fn set_size(&self, size: Option<Resolution>) {
        *self.size.lock() = size;
    }
}

impl DisplayProvider for FixedDisplay {
    fn main_display_pixel_size(&self) -> Option<Resolution> {
        // Streams need even dimensions
        (*self.size.lock()).map(|size| size.even())
    }

    fn supports_upscaling(&self) -> bool {
        self.upscaling
    }
}
