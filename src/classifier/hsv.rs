//! BGR to HSV channel extraction.
//!
//! Trained probability tables index OpenCV's 8-bit HSV encoding, so the
//! conversion here reproduces that convention exactly:
//!
//! - **hue**: degrees halved, 0-179, wrapping at red
//! - **saturation**: `255 * (max - min) / max`, 0 when max is 0
//! - **value**: `max`, 0-255
//!
//! Tables trained against OpenCV-converted images therefore keep their
//! bin alignment. All outputs lie in 0-255; hue only ever occupies bins
//! 0-179, the remaining bins are simply never looked up.

use ndarray::{Array2, ArrayView3};

/// Channel names the classifier requires, in (hue, saturation, value) order.
pub const REQUIRED_CHANNELS: [&str; 3] = ["hue", "saturation", "value"];

/// Per-channel planes of an image projected into HSV space.
///
/// All three planes share the same (height, width) dimensions.
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelImage {
    pub hue: Array2<u8>,
    pub saturation: Array2<u8>,
    pub value: Array2<u8>,
}

impl ChannelImage {
    /// (height, width) shared by all three planes.
    pub fn dim(&self) -> (usize, usize) {
        self.hue.dim()
    }
}

/// Convert one BGR pixel to OpenCV-convention 8-bit HSV.
#[inline]
pub fn bgr_to_hsv(b: u8, g: u8, r: u8) -> (u8, u8, u8) {
    let rf = r as f32 / 255.0;
    let gf = g as f32 / 255.0;
    let bf = b as f32 / 255.0;

    let max = rf.max(gf).max(bf);
    let min = rf.min(gf).min(bf);
    let delta = max - min;

    let h_deg = if delta < 1e-6 {
        0.0
    } else if (max - rf).abs() < 1e-6 {
        let h = 60.0 * ((gf - bf) / delta);
        if h < 0.0 {
            h + 360.0
        } else {
            h
        }
    } else if (max - gf).abs() < 1e-6 {
        60.0 * ((bf - rf) / delta + 2.0)
    } else {
        60.0 * ((rf - gf) / delta + 4.0)
    };

    let s = if max < 1e-6 { 0.0 } else { delta / max };

    // 8-bit packing: hue halved into 0-179 (rounding at ~360 wraps to 0).
    let h = ((h_deg / 2.0).round() as u16 % 180) as u8;
    (h, (s * 255.0).round() as u8, (max * 255.0).round() as u8)
}

/// Project a BGR image into its three HSV channel planes.
///
/// # Arguments
/// * `image` - 3D array view of shape (height, width, 3) with BGR u8 values
///
/// # Returns
/// Hue, saturation, and value planes of shape (height, width)
pub fn extract_hsv(image: ArrayView3<u8>) -> ChannelImage {
    let (height, width, _) = image.dim();
    let mut hue = Array2::<u8>::zeros((height, width));
    let mut saturation = Array2::<u8>::zeros((height, width));
    let mut value = Array2::<u8>::zeros((height, width));

    for y in 0..height {
        for x in 0..width {
            let (h, s, v) = bgr_to_hsv(image[[y, x, 0]], image[[y, x, 1]], image[[y, x, 2]]);
            hue[[y, x]] = h;
            saturation[[y, x]] = s;
            value[[y, x]] = v;
        }
    }

    ChannelImage {
        hue,
        saturation,
        value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array3;

    #[test]
    fn primary_colors_match_opencv_bins() {
        // (b, g, r) -> (h, s, v)
        assert_eq!(bgr_to_hsv(0, 0, 255), (0, 255, 255)); // red
        assert_eq!(bgr_to_hsv(0, 255, 0), (60, 255, 255)); // green
        assert_eq!(bgr_to_hsv(255, 0, 0), (120, 255, 255)); // blue
        assert_eq!(bgr_to_hsv(0, 255, 255), (30, 255, 255)); // yellow
        assert_eq!(bgr_to_hsv(255, 255, 0), (90, 255, 255)); // cyan
        assert_eq!(bgr_to_hsv(255, 0, 255), (150, 255, 255)); // magenta
    }

    #[test]
    fn achromatic_pixels_have_zero_hue_and_saturation() {
        assert_eq!(bgr_to_hsv(0, 0, 0), (0, 0, 0));
        assert_eq!(bgr_to_hsv(128, 128, 128), (0, 0, 128));
        assert_eq!(bgr_to_hsv(255, 255, 255), (0, 0, 255));
    }

    #[test]
    fn hue_wraps_at_red() {
        // Just below 360 degrees: halves to ~180, which wraps to bin 0.
        let (h, _, _) = bgr_to_hsv(1, 0, 255);
        assert_eq!(h, 0);
    }

    #[test]
    fn hue_never_exceeds_179() {
        for r in (0u16..=255).step_by(17) {
            for g in (0u16..=255).step_by(17) {
                for b in (0u16..=255).step_by(17) {
                    let (h, _, _) = bgr_to_hsv(b as u8, g as u8, r as u8);
                    assert!(h < 180, "hue {h} out of range for bgr ({b}, {g}, {r})");
                }
            }
        }
    }

    #[test]
    fn extract_hsv_preserves_dimensions() {
        let mut image = Array3::<u8>::zeros((3, 5, 3));
        image[[1, 2, 1]] = 255; // one green pixel

        let channels = extract_hsv(image.view());
        assert_eq!(channels.dim(), (3, 5));
        assert_eq!(channels.hue[[1, 2]], 60);
        assert_eq!(channels.saturation[[1, 2]], 255);
        assert_eq!(channels.value[[1, 2]], 255);
        assert_eq!(channels.value[[0, 0]], 0);
    }
}
