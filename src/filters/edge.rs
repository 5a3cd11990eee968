//! Contour filter: horizontal gradient magnitude.
//!
//! Each output sample is the absolute difference between two horizontally
//! adjacent input samples. Rows are processed independently, so this only
//! responds to intensity changes along a row. Horizontal edges (changes
//! between rows) are invisible to it; it is not a 2-D edge detector.

use ndarray::{Array2, ArrayView2};

use crate::error::{GridError, GridResult};
use crate::grid::Grid;

/// Absolute difference of horizontal neighbours.
///
/// # Arguments
/// * `input` - Samples (height, width), width >= 2 unless height is 0
///
/// # Returns
/// Array of shape (height, width - 1) with `out[y][x] = |in[y][x+1] - in[y][x]|`
pub fn horizontal_gradient(input: ArrayView2<f64>) -> GridResult<Array2<f64>> {
    let (height, width) = input.dim();

    if height == 0 {
        return Ok(Array2::zeros((0, width.saturating_sub(1))));
    }
    if width < 2 {
        return Err(GridError::InvalidParameter(format!(
            "contour needs at least 2 samples per row, got {}",
            width
        )));
    }

    Ok(Array2::from_shape_fn((height, width - 1), |(y, x)| {
        (input[[y, x + 1]] - input[[y, x]]).abs()
    }))
}

impl Grid {
    /// Replace each row with its neighbour differences (see [`horizontal_gradient`]).
    pub fn contour(&mut self) -> GridResult<()> {
        let gradient = horizontal_gradient(self.view())?;
        self.replace(gradient);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contour_flat_is_zero() {
        let mut grid = Grid::from_rows(&[[0.0, 0.0, 0.0], [0.0, 0.0, 0.0]]).unwrap();
        grid.contour().unwrap();
        assert_eq!(grid.to_rows(), vec![vec![0.0, 0.0], vec![0.0, 0.0]]);
    }

    #[test]
    fn test_contour_constant_row() {
        let mut grid = Grid::from_rows(&[[77.0; 6]]).unwrap();
        grid.contour().unwrap();
        assert_eq!(grid.to_rows(), vec![vec![0.0; 5]]);
    }

    #[test]
    fn test_contour_absolute_difference() {
        let mut grid = Grid::from_rows(&[[10.0, 50.0, 20.0, 20.0]]).unwrap();
        grid.contour().unwrap();
        assert_eq!(grid.to_rows(), vec![vec![40.0, 30.0, 0.0]]);
    }

    #[test]
    fn test_contour_ignores_vertical_change() {
        // Rows differ from each other but are flat individually
        let mut grid = Grid::from_rows(&[[0.0, 0.0], [255.0, 255.0]]).unwrap();
        grid.contour().unwrap();
        assert_eq!(grid.to_rows(), vec![vec![0.0], vec![0.0]]);
    }

    #[test]
    fn test_contour_narrow_grid_rejected() {
        let original = Grid::from_rows(&[[1.0], [2.0]]).unwrap();
        let mut grid = original.clone();
        let err = grid.contour().unwrap_err();
        assert!(matches!(err, GridError::InvalidParameter(_)));
        assert_eq!(grid, original);
    }

    #[test]
    fn test_contour_empty_grid_is_noop() {
        let rows: Vec<Vec<f64>> = Vec::new();
        let mut grid = Grid::from_rows(&rows).unwrap();
        grid.contour().unwrap();
        assert!(grid.is_empty());
    }
}
