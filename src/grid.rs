//! The grid: a rectangular raster of grayscale intensity samples.
//!
//! Samples are stored as `f64` in an `ndarray::Array2` with shape
//! `(height, width)`. Values usually live in the 0-255 range of the decoded
//! image, but the grid itself does not enforce that; only filters that say so
//! clamp their output.

use ndarray::{Array2, ArrayView2};

use crate::error::{GridError, GridResult};

/// Brightest intensity a clamping filter may produce.
pub const MAX_INTENSITY: f64 = 255.0;

/// Darkest intensity a clamping filter may produce.
pub const MIN_INTENSITY: f64 = 0.0;

/// Clamp a sample into the 0-255 intensity range.
#[inline]
pub fn clamp_intensity(value: f64) -> f64 {
    value.clamp(MIN_INTENSITY, MAX_INTENSITY)
}

/// Rectangular grid of intensity samples.
///
/// Filters mutate the grid in place and may change its dimensions. Every row
/// always has the same width.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    pub(crate) data: Array2<f64>,
}

impl Grid {
    /// Build a grid from rows of samples.
    ///
    /// # Arguments
    /// * `rows` - Row-major samples; every row must have the same length
    ///
    /// # Returns
    /// The grid, or `DimensionMismatch` if the rows are ragged
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> GridResult<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, |row| row.as_ref().len());

        let mut samples = Vec::with_capacity(height * width);
        for (y, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != width {
                return Err(GridError::DimensionMismatch(format!(
                    "row {} has {} samples, expected {}",
                    y,
                    row.len(),
                    width
                )));
            }
            samples.extend_from_slice(row);
        }

        Self::from_shape_vec(height, width, samples)
    }

    /// Build a grid from a flat row-major buffer.
    pub fn from_shape_vec(height: usize, width: usize, samples: Vec<f64>) -> GridResult<Self> {
        Array2::from_shape_vec((height, width), samples)
            .map(Self::from_array)
            .map_err(|e| {
                GridError::DimensionMismatch(format!(
                    "buffer does not match a {}x{} grid: {}",
                    height, width, e
                ))
            })
    }

    /// Wrap an existing array. Any 2-D array is rectangular by construction.
    pub fn from_array(data: Array2<f64>) -> Self {
        Grid { data }
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.data.nrows()
    }

    /// Number of columns in every row.
    pub fn width(&self) -> usize {
        self.data.ncols()
    }

    /// `(height, width)`
    pub fn dim(&self) -> (usize, usize) {
        self.data.dim()
    }

    /// True when the grid has no rows.
    pub fn is_empty(&self) -> bool {
        self.height() == 0
    }

    /// Sample at `(row, col)`, if in bounds.
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        self.data.get([row, col]).copied()
    }

    pub fn view(&self) -> ArrayView2<'_, f64> {
        self.data.view()
    }

    pub fn into_array(self) -> Array2<f64> {
        self.data
    }

    /// Copy the samples out as nested rows.
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        self.data.rows().into_iter().map(|row| row.to_vec()).collect()
    }

    /// Flat row-major copy of the samples.
    pub fn to_flat_vec(&self) -> Vec<f64> {
        self.data.iter().copied().collect()
    }

    /// Replace the storage with a filter result.
    pub(crate) fn replace(&mut self, data: Array2<f64>) {
        self.data = data;
    }
}
