//! Side-by-side and stacked concatenation of two grids.

use std::fmt;
use std::str::FromStr;

use ndarray::{concatenate, Array2, ArrayView2, Axis};

use crate::error::{GridError, GridResult};
use crate::grid::Grid;

/// How two grids are joined.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Direction {
    /// Same height required; `other` goes to the right.
    #[default]
    Horizontal,
    /// Same width required; `other` goes below.
    Vertical,
}

impl FromStr for Direction {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "horizontal" => Ok(Direction::Horizontal),
            "vertical" => Ok(Direction::Vertical),
            other => Err(GridError::InvalidParameter(format!(
                "direction must be 'horizontal' or 'vertical', got '{}'",
                other
            ))),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Horizontal => f.write_str("horizontal"),
            Direction::Vertical => f.write_str("vertical"),
        }
    }
}

/// Join `first` and `second` into a new array.
///
/// # Arguments
/// * `first` - Left (horizontal) or top (vertical) samples
/// * `second` - Right or bottom samples
/// * `direction` - Which dimension must match and which one grows
///
/// # Returns
/// The joined samples, or `DimensionMismatch` if the shared dimension differs
pub fn join<'a>(
    first: ArrayView2<'a, f64>,
    second: ArrayView2<'a, f64>,
    direction: Direction,
) -> GridResult<Array2<f64>> {
    let (axis, shared, first_len, second_len) = match direction {
        Direction::Horizontal => (Axis(1), "height", first.nrows(), second.nrows()),
        Direction::Vertical => (Axis(0), "width", first.ncols(), second.ncols()),
    };

    if first_len != second_len {
        return Err(GridError::DimensionMismatch(format!(
            "{} concatenation needs equal {}, got {} and {}",
            direction, shared, first_len, second_len
        )));
    }

    concatenate(axis, &[first, second])
        .map_err(|e| GridError::DimensionMismatch(e.to_string()))
}

impl Grid {
    /// Append `other` to this grid (see [`join`]).
    ///
    /// `other` is only read; the result is built in a fresh buffer, so
    /// joining a grid with a clone of itself is fine.
    pub fn concat(&mut self, other: &Grid, direction: Direction) -> GridResult<()> {
        let joined = join(self.view(), other.view(), direction)?;
        self.replace(joined);
        Ok(())
    }
}
