//! Exact 90-degree rotation.
//!
//! Rotation is clockwise: the sample at (y, x) moves to (x, H - 1 - y), which
//! is the same as reversing the row order and then transposing. Height and
//! width swap.

use ndarray::{Array2, ArrayView2};

use crate::grid::Grid;

/// Rotate 90 degrees clockwise.
///
/// # Arguments
/// * `input` - Samples (H, W)
///
/// # Returns
/// Rotated samples (W, H)
pub fn rotate_90_cw(input: ArrayView2<f64>) -> Array2<f64> {
    let (h, w) = input.dim();
    let mut result = Array2::<f64>::zeros((w, h));

    for y in 0..h {
        for x in 0..w {
            result[[x, h - 1 - y]] = input[[y, x]];
        }
    }

    result
}

impl Grid {
    /// Rotate the grid 90 degrees clockwise. Never fails.
    pub fn rotate(&mut self) {
        let rotated = rotate_90_cw(self.view());
        self.replace(rotated);
    }

    /// Apply `times` clockwise quarter turns; only `times % 4` are performed.
    pub fn rotate_times(&mut self, times: u32) {
        for _ in 0..times % 4 {
            self.rotate();
        }
    }
}
