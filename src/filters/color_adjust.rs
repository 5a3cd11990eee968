//! Tone adjustments: Brightness, Contrast.
//!
//! Both are enhancement-style blends: the grid is interpolated (or
//! extrapolated) between a degenerate image and itself by `factor`.
//! Brightness blends with black, contrast blends with a flat image at the
//! grid's mean intensity. A factor of 1.0 keeps in-range samples unchanged.
//! Output is clamped to 0-255.

use ndarray::{Array2, ArrayView2};

use crate::error::{GridError, GridResult};
use crate::grid::{clamp_intensity, Grid};

fn check_factor(name: &str, factor: f64) -> GridResult<()> {
    if factor.is_finite() && factor >= 0.0 {
        Ok(())
    } else {
        Err(GridError::InvalidParameter(format!(
            "{} factor must be a non-negative number, got {}",
            name, factor
        )))
    }
}

// ============================================================================
// Brightness
// ============================================================================

/// Scale intensities toward black (factor < 1) or white (factor > 1).
///
/// # Arguments
/// * `input` - Samples (height, width)
/// * `factor` - 0.0 gives black, 1.0 no change
///
/// # Returns
/// Adjusted samples clamped to 0-255
pub fn brightness(input: ArrayView2<f64>, factor: f64) -> GridResult<Array2<f64>> {
    check_factor("brightness", factor)?;
    Ok(input.mapv(|v| clamp_intensity(v * factor)))
}

// ============================================================================
// Contrast
// ============================================================================

/// Spread intensities away from (factor > 1) or toward (factor < 1) the mean.
///
/// # Arguments
/// * `input` - Samples (height, width)
/// * `factor` - 0.0 gives a flat image at the mean, 1.0 no change
///
/// # Returns
/// Adjusted samples clamped to 0-255. The mean is rounded to the nearest
/// integer before blending.
pub fn contrast(input: ArrayView2<f64>, factor: f64) -> GridResult<Array2<f64>> {
    check_factor("contrast", factor)?;

    let mean = match input.mean() {
        Some(mean) => (mean + 0.5).floor(),
        None => return Ok(input.to_owned()),
    };

    Ok(input.mapv(|v| clamp_intensity(mean + (v - mean) * factor)))
}

impl Grid {
    /// See [`brightness`].
    pub fn brightness(&mut self, factor: f64) -> GridResult<()> {
        let adjusted = brightness(self.view(), factor)?;
        self.replace(adjusted);
        Ok(())
    }

    /// See [`contrast`].
    pub fn contrast(&mut self, factor: f64) -> GridResult<()> {
        let adjusted = contrast(self.view(), factor)?;
        self.replace(adjusted);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_brightness_identity() {
        let original = Grid::from_rows(&[[0.0, 100.0], [200.0, 255.0]]).unwrap();
        let mut grid = original.clone();
        grid.brightness(1.0).unwrap();
        assert_eq!(grid, original);
    }

    #[test]
    fn test_brightness_scales_and_clamps() {
        let mut grid = Grid::from_rows(&[[10.0, 100.0, 200.0]]).unwrap();
        grid.brightness(1.5).unwrap();
        assert_eq!(grid.to_rows(), vec![vec![15.0, 150.0, 255.0]]);

        grid.brightness(0.0).unwrap();
        assert!(grid.view().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_brightness_rejects_negative() {
        let original = Grid::from_rows(&[[1.0, 2.0]]).unwrap();
        let mut grid = original.clone();
        assert!(matches!(
            grid.brightness(-0.5),
            Err(GridError::InvalidParameter(_))
        ));
        assert!(matches!(
            grid.brightness(f64::INFINITY),
            Err(GridError::InvalidParameter(_))
        ));
        assert_eq!(grid, original);
    }

    #[test]
    fn test_contrast_rejects_negative() {
        let original = Grid::from_rows(&[[10.0, 20.0]]).unwrap();
        let mut grid = original.clone();
        assert!(matches!(
            grid.contrast(-1.0),
            Err(GridError::InvalidParameter(_))
        ));
        assert!(matches!(
            grid.contrast(f64::NAN),
            Err(GridError::InvalidParameter(_))
        ));
        assert_eq!(grid, original);
    }

    #[test]
    fn test_contrast_zero_flattens_to_mean() {
        // mean = 50.5, rounded to 51
        let mut grid = Grid::from_rows(&[[0.0, 101.0]]).unwrap();
        grid.contrast(0.0).unwrap();
        assert_eq!(grid.to_rows(), vec![vec![51.0, 51.0]]);
    }

    #[test]
    fn test_contrast_stretches_around_mean() {
        let mut grid = Grid::from_rows(&[[90.0, 100.0, 110.0]]).unwrap();
        grid.contrast(2.0).unwrap();
        assert_eq!(grid.to_rows(), vec![vec![80.0, 100.0, 120.0]]);

        grid.contrast(100.0).unwrap();
        assert_eq!(grid.to_rows(), vec![vec![0.0, 100.0, 255.0]]);
    }

    #[test]
    fn test_contrast_empty_grid_is_noop() {
        let rows: Vec<Vec<f64>> = Vec::new();
        let mut grid = Grid::from_rows(&rows).unwrap();
        grid.contrast(2.0).unwrap();
        assert!(grid.is_empty());
    }
}
