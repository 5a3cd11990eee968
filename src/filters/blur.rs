//! Box blur over fully-contained square windows.
//!
//! Unlike a padded blur, windows never leave the grid: the output only has an
//! entry for every top-left position where a `k x k` window fits, so it shrinks
//! by `k - 1` in each dimension.

use ndarray::{s, Array2, ArrayView2};

use crate::error::{GridError, GridResult};
use crate::grid::Grid;

/// Average every `kernel_size x kernel_size` window that fits in `input`.
///
/// # Arguments
/// * `input` - Samples (height, width)
/// * `kernel_size` - Window side length, `1..=min(height, width)`
///
/// # Returns
/// Array of shape (height - k + 1, width - k + 1). Each entry is the window
/// sum divided by `k * k`, rounded down.
pub fn box_average(input: ArrayView2<f64>, kernel_size: usize) -> GridResult<Array2<f64>> {
    let (height, width) = input.dim();

    if kernel_size == 0 {
        return Err(GridError::InvalidParameter(
            "blur kernel size must be positive".to_string(),
        ));
    }
    if kernel_size > height || kernel_size > width {
        return Err(GridError::InvalidParameter(format!(
            "blur kernel size {} does not fit a {}x{} grid",
            kernel_size, height, width
        )));
    }

    let out_height = height - kernel_size + 1;
    let out_width = width - kernel_size + 1;
    let area = (kernel_size * kernel_size) as f64;
    let mut output = Array2::<f64>::zeros((out_height, out_width));

    for y in 0..out_height {
        for x in 0..out_width {
            let sum = input
                .slice(s![y..y + kernel_size, x..x + kernel_size])
                .sum();
            output[[y, x]] = (sum / area).floor();
        }
    }

    Ok(output)
}

impl Grid {
    /// Replace the grid with its box-averaged version (see [`box_average`]).
    pub fn blur(&mut self, kernel_size: usize) -> GridResult<()> {
        let blurred = box_average(self.view(), kernel_size)?;
        self.replace(blurred);
        Ok(())
    }
}
