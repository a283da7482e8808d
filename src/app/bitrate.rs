//! Bitrate Defaults
//!
//! Default bitrate estimation and the bitrate slider steps.

use super::types::Resolution;

/// (pixel count, resolution factor) pairs, ordered by pixel count
const BITRATE_TABLE: &[(u64, f32)] = &[
    (640 * 360, 1.0),
    (854 * 480, 2.0),
    (1280 * 720, 5.0),
    (1920 * 1080, 10.0),
    (2560 * 1440, 20.0),
    (3840 * 2160, 40.0),
];

/// Slider steps in Mbps
const LOCKED_BITRATE_STEPS: &[f32] = &[
    0.5, 1.0, 1.5, 2.0, 2.5, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0, 12.0, 15.0, 18.0, 20.0,
    25.0, 30.0, 40.0, 50.0, 60.0, 70.0, 80.0, 90.0, 100.0, 120.0, 150.0,
];

/// Extra steps appended when the maximum bitrate is unlocked
const UNLOCKED_EXTRA_STEPS: &[f32] = &[200.0, 250.0, 300.0, 350.0, 400.0, 500.0, 600.0, 800.0, 1000.0];

/// Bitrate the slider starts at (kbps)
pub const DEFAULT_BITRATE_KBPS: u32 = 10_000;

/// Estimate a bitrate in kbps for the given stream mode.
///
/// Frame rates above 60 scale with the square root; pixel counts between table
/// entries are linearly interpolated and clamp at both ends. High chroma
/// sampling doubles the resolution factor.
pub fn compute_default_bitrate_kbps(width: u32, height: u32, fps: u32, yuv444: bool) -> u32 {
    let fpsf = fps.max(1) as f32;
    let frame_rate_factor = if fps <= 60 {
        fpsf / 30.0
    } else {
        (fpsf / 60.0).sqrt() * 60.0 / 30.0
    };

    let pixels = Resolution::new(width, height).pixels().max(1);
    let mut resolution_factor = resolution_factor(pixels);

    if yuv444 {
        resolution_factor *= 2.0;
    }

    (resolution_factor * frame_rate_factor).round() as u32 * 1000
}

fn resolution_factor(pixels: u64) -> f32 {
    let (first_pixels, first_factor) = BITRATE_TABLE[0];
    if pixels <= first_pixels {
        return first_factor;
    }

    for pair in BITRATE_TABLE.windows(2) {
        let (lo_pixels, lo_factor) = pair[0];
        let (hi_pixels, hi_factor) = pair[1];
        if pixels <= hi_pixels {
            let t = (pixels - lo_pixels) as f32 / (hi_pixels - lo_pixels) as f32;
            return t * (hi_factor - lo_factor) + lo_factor;
        }
    }

    BITRATE_TABLE[BITRATE_TABLE.len() - 1].1
}

/// Slider steps in Mbps
pub fn bitrate_steps(unlocked: bool) -> Vec<f32> {
    let mut steps = LOCKED_BITRATE_STEPS.to_vec();
    if unlocked {
        steps.extend_from_slice(UNLOCKED_EXTRA_STEPS);
    }
    steps
}

/// First slider step that can carry `kbps`; values above the top step map to it
pub fn slider_index_for_kbps(kbps: u32, unlocked: bool) -> usize {
    let steps = bitrate_steps(unlocked);
    steps
        .iter()
        .position(|step| kbps as f32 <= step * 1000.0)
        .unwrap_or(steps.len() - 1)
}

/// Bitrate in kbps for a slider position, clamping the index into range
pub fn kbps_for_slider_index(index: usize, unlocked: bool) -> u32 {
    let steps = bitrate_steps(unlocked);
    let index = index.min(steps.len() - 1);
    (steps[index] * 1000.0) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_points() {
        assert_eq!(compute_default_bitrate_kbps(1920, 1080, 60, false), 20_000);
        assert_eq!(compute_default_bitrate_kbps(3840, 2160, 60, false), 80_000);
        assert_eq!(compute_default_bitrate_kbps(1280, 720, 30, false), 5_000);
        assert_eq!(compute_default_bitrate_kbps(640, 360, 30, false), 1_000);
    }

    #[test]
    fn test_table_entries_scale_with_fps() {
        for &(pixels, factor) in BITRATE_TABLE {
            let (w, h) = match pixels {
                230_400 => (640, 360),
                409_920 => (854, 480),
                921_600 => (1280, 720),
                2_073_600 => (1920, 1080),
                3_686_400 => (2560, 1440),
                _ => (3840, 2160),
            };
            for fps in [15u32, 24, 30, 45, 60] {
                let expected = (factor * (fps as f32 / 30.0)).round() as u32 * 1000;
                assert_eq!(compute_default_bitrate_kbps(w, h, fps, false), expected);
            }
        }
    }

    #[test]
    fn test_interpolation_midpoint() {
        // 1560x960 sits exactly halfway between 720p and 1080p
        assert_eq!(1560 * 960, (1280 * 720 + 1920 * 1080) / 2);
        assert_eq!(compute_default_bitrate_kbps(1560, 960, 60, false), 15_000);
    }

    #[test]
    fn test_clamps_outside_table() {
        assert_eq!(compute_default_bitrate_kbps(320, 240, 30, false), 1_000);
        assert_eq!(compute_default_bitrate_kbps(7680, 4320, 30, false), 40_000);
        assert_eq!(compute_default_bitrate_kbps(0, 0, 30, false), 1_000);
    }

    #[test]
    fn test_high_fps_diminishing_returns() {
        // sqrt(2) * 2 * 10 = 28.28
        assert_eq!(compute_default_bitrate_kbps(1920, 1080, 120, false), 28_000);
        // fps 0 is treated as 1
        assert_eq!(compute_default_bitrate_kbps(1920, 1080, 0, false), 0);
    }

    #[test]
    fn test_yuv444_doubles() {
        for (w, h, fps) in [(1920, 1080, 60), (2560, 1440, 30), (1280, 720, 60)] {
            assert_eq!(
                compute_default_bitrate_kbps(w, h, fps, true),
                2 * compute_default_bitrate_kbps(w, h, fps, false)
            );
        }
    }

    #[test]
    fn test_slider_steps() {
        assert_eq!(bitrate_steps(false).len(), 28);
        assert_eq!(bitrate_steps(true).len(), 37);
        let default_index = slider_index_for_kbps(DEFAULT_BITRATE_KBPS, false);
        assert_eq!(kbps_for_slider_index(default_index, false), 10_000);
        assert_eq!(slider_index_for_kbps(11_000, false), 13);
        assert_eq!(slider_index_for_kbps(400_000, false), 27);
        assert_eq!(kbps_for_slider_index(500, true), 1_000_000);
    }
}
