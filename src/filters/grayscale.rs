//! Color to grayscale conversion for the decoder.
//!
//! Uses the ITU-R BT.601 luma weights (0.2989, 0.5870, 0.1140). The result is
//! kept as `f64` without rounding so the grid sees the exact weighted sum.

use ndarray::{Array2, ArrayView3};

/// BT.601 luma coefficients
pub const LUMA_R: f64 = 0.2989;
pub const LUMA_G: f64 = 0.5870;
pub const LUMA_B: f64 = 0.1140;

/// Weighted luma of one RGB pixel.
#[inline]
pub fn luma(r: f64, g: f64, b: f64) -> f64 {
    LUMA_R * r + LUMA_G * g + LUMA_B * b
}

/// Convert an RGB(A) u8 image to a grid of luma samples.
///
/// # Arguments
/// * `input` - 3D array view of shape (height, width, channels), channels >= 3.
///   A fourth (alpha) channel is ignored.
///
/// # Returns
/// Array of shape (height, width) with values in 0.0-255.0
///
/// # Panics
/// Panics if `input` has fewer than 3 channels. Convert gray or gray+alpha
/// images with `image::DynamicImage::to_luma8` instead.
pub fn rgb_to_luma_u8(input: ArrayView3<u8>) -> Array2<f64> {
    let (height, width, channels) = input.dim();
    debug_assert!(
        channels >= 3,
        "rgb_to_luma_u8 needs at least 3 channels, got {}",
        channels
    );

    Array2::from_shape_fn((height, width), |(y, x)| {
        luma(
            input[[y, x, 0]] as f64,
            input[[y, x, 1]] as f64,
            input[[y, x, 2]] as f64,
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array3;

    #[test]
    fn test_luma_red() {
        let mut img = Array3::<u8>::zeros((1, 1, 3));
        img[[0, 0, 0]] = 255; // R

        let result = rgb_to_luma_u8(img.view());

        // 0.2989 * 255 = 76.22
        assert!((result[[0, 0]] - 76.2195).abs() < 1e-9);
    }

    #[test]
    fn test_luma_white_is_nearly_full() {
        let img = Array3::<u8>::from_elem((2, 3, 3), 255);
        let result = rgb_to_luma_u8(img.view());

        assert_eq!(result.dim(), (2, 3));
        // Weights sum to 0.9999
        assert!(result.iter().all(|&v| (v - 254.9745).abs() < 1e-9));
    }

    #[test]
    fn test_luma_ignores_alpha() {
        let mut opaque = Array3::<u8>::zeros((1, 1, 4));
        opaque[[0, 0, 1]] = 200;
        opaque[[0, 0, 3]] = 255;
        let mut clear = opaque.clone();
        clear[[0, 0, 3]] = 0;

        assert_eq!(
            rgb_to_luma_u8(opaque.view()),
            rgb_to_luma_u8(clear.view())
        );
    }

    #[test]
    #[should_panic]
    fn test_luma_two_channels_panics() {
        let img = Array3::<u8>::zeros((1, 1, 2));
        rgb_to_luma_u8(img.view());
    }
}
