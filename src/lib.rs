//! graygrid
//!
//! A small filter engine over a rectangular grid of grayscale intensities,
//! with an image-file boundary, a caption-style command parser and optional
//! Python (PyO3) and WASM bindings.
//!
//! ## Data Model
//! A [`Grid`] holds `f64` samples in an `ndarray::Array2` of shape
//! (height, width). Decoded images yield samples in 0-255; filters may leave
//! that range except where they clamp (salt-and-pepper, segment,
//! brightness, contrast).
//!
//! ## Filters
//! Every filter mutates the grid in place and may change its dimensions:
//! - **blur(k)**: truncated box average over windows that fit (shrinks by k-1)
//! - **contour()**: horizontal neighbour differences (width shrinks by one)
//! - **rotate()**: 90° clockwise (dimensions swap)
//! - **salt_and_pepper(s, p, rng)**: random 255/0 corruption
//! - **concat(other, direction)**: side-by-side or stacked join
//! - **segment()**: order-dependent seed-threshold segmentation to black/white
//! - **brightness(f)**, **contrast(f)**: enhancement blends
//!
//! A filter that fails returns a [`GridError`] and leaves the grid unchanged.
//!
//! ```
//! use graygrid::{Direction, Grid};
//!
//! let mut grid = Grid::from_rows(&[[1.0, 2.0], [3.0, 4.0]]).unwrap();
//! grid.rotate();
//! assert_eq!(grid.to_rows(), vec![vec![3.0, 1.0], vec![4.0, 2.0]]);
//!
//! let copy = grid.clone();
//! grid.concat(&copy, Direction::Vertical).unwrap();
//! assert_eq!(grid.dim(), (4, 2));
//! ```

pub mod cli;
pub mod command;
pub mod error;
pub mod filters;
pub mod grid;
pub mod io;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use command::FilterCommand;
pub use error::{Error, GridError, GridResult, Result};
pub use filters::concat::Direction;
pub use grid::Grid;

// Python bindings (only when python feature is enabled)
#[cfg(feature = "python")]
mod python {
    use numpy::{IntoPyArray, PyArray2, PyReadonlyArray2, PyReadonlyArray3};
    use pyo3::exceptions::PyValueError;
    use pyo3::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use crate::command::FilterCommand;
    use crate::error::GridError;
    use crate::filters::concat::Direction;
    use crate::filters::grayscale::rgb_to_luma_u8;
    use crate::grid::Grid;

    fn to_grid(image: &PyReadonlyArray2<'_, f64>) -> Grid {
        Grid::from_array(image.as_array().to_owned())
    }

    fn to_py_err(err: GridError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }

    fn make_rng(seed: Option<u64>) -> StdRng {
        match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }

    /// Run `op` on a grid built from `image` and hand the result back to numpy.
    fn with_grid<'py>(
        py: Python<'py>,
        image: PyReadonlyArray2<'py, f64>,
        op: impl FnOnce(&mut Grid) -> Result<(), GridError>,
    ) -> PyResult<Bound<'py, PyArray2<f64>>> {
        let mut grid = to_grid(&image);
        op(&mut grid).map_err(to_py_err)?;
        Ok(grid.into_array().into_pyarray(py))
    }

    // ========================================================================
    // Grid Filters
    // ========================================================================

    /// Box blur over windows that fit; output shrinks by kernel_size - 1.
    #[pyfunction]
    #[pyo3(signature = (image, kernel_size=16))]
    pub fn blur<'py>(
        py: Python<'py>,
        image: PyReadonlyArray2<'py, f64>,
        kernel_size: usize,
    ) -> PyResult<Bound<'py, PyArray2<f64>>> {
        with_grid(py, image, |grid| grid.blur(kernel_size))
    }

    /// Horizontal neighbour differences; width shrinks by one.
    #[pyfunction]
    pub fn contour<'py>(
        py: Python<'py>,
        image: PyReadonlyArray2<'py, f64>,
    ) -> PyResult<Bound<'py, PyArray2<f64>>> {
        with_grid(py, image, |grid| grid.contour())
    }

    /// Rotate 90 degrees clockwise `times` times.
    #[pyfunction]
    #[pyo3(signature = (image, times=1))]
    pub fn rotate<'py>(
        py: Python<'py>,
        image: PyReadonlyArray2<'py, f64>,
        times: u32,
    ) -> PyResult<Bound<'py, PyArray2<f64>>> {
        with_grid(py, image, |grid| {
            grid.rotate_times(times);
            Ok(())
        })
    }

    /// Salt-and-pepper noise. Pass `seed` for reproducible output.
    #[pyfunction]
    #[pyo3(signature = (image, salt_prob=0.01, pepper_prob=0.01, seed=None))]
    pub fn salt_and_pepper<'py>(
        py: Python<'py>,
        image: PyReadonlyArray2<'py, f64>,
        salt_prob: f64,
        pepper_prob: f64,
        seed: Option<u64>,
    ) -> PyResult<Bound<'py, PyArray2<f64>>> {
        let mut rng = make_rng(seed);
        with_grid(py, image, |grid| grid.salt_and_pepper(salt_prob, pepper_prob, &mut rng))
    }

    /// Join two images, `direction` is "horizontal" or "vertical".
    #[pyfunction]
    #[pyo3(signature = (image, other, direction="horizontal"))]
    pub fn concat<'py>(
        py: Python<'py>,
        image: PyReadonlyArray2<'py, f64>,
        other: PyReadonlyArray2<'py, f64>,
        direction: &str,
    ) -> PyResult<Bound<'py, PyArray2<f64>>> {
        let direction: Direction = direction.parse().map_err(to_py_err)?;
        let other = to_grid(&other);
        with_grid(py, image, |grid| grid.concat(&other, direction))
    }

    /// Seed-threshold segmentation to black and white.
    #[pyfunction]
    pub fn segment<'py>(
        py: Python<'py>,
        image: PyReadonlyArray2<'py, f64>,
    ) -> PyResult<Bound<'py, PyArray2<f64>>> {
        with_grid(py, image, |grid| grid.segment())
    }

    #[pyfunction]
    #[pyo3(signature = (image, factor=1.0))]
    pub fn brightness<'py>(
        py: Python<'py>,
        image: PyReadonlyArray2<'py, f64>,
        factor: f64,
    ) -> PyResult<Bound<'py, PyArray2<f64>>> {
        with_grid(py, image, |grid| grid.brightness(factor))
    }

    #[pyfunction]
    #[pyo3(signature = (image, factor=1.0))]
    pub fn contrast<'py>(
        py: Python<'py>,
        image: PyReadonlyArray2<'py, f64>,
        factor: f64,
    ) -> PyResult<Bound<'py, PyArray2<f64>>> {
        with_grid(py, image, |grid| grid.contrast(factor))
    }

    /// Parse a caption such as "blur 5" and apply it.
    #[pyfunction]
    #[pyo3(signature = (image, caption, seed=None))]
    pub fn apply_command<'py>(
        py: Python<'py>,
        image: PyReadonlyArray2<'py, f64>,
        caption: &str,
        seed: Option<u64>,
    ) -> PyResult<Bound<'py, PyArray2<f64>>> {
        let command = FilterCommand::parse(caption).map_err(to_py_err)?;
        let mut rng = make_rng(seed);
        with_grid(py, image, |grid| command.apply(grid, &mut rng))
    }

    // ========================================================================
    // Conversion
    // ========================================================================

    /// Convert an (H, W, 3|4) u8 image to (H, W) luma samples.
    #[pyfunction]
    pub fn rgb_to_gray<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
    ) -> PyResult<Bound<'py, PyArray2<f64>>> {
        let input = image.as_array();
        if input.shape()[2] < 3 {
            return Err(PyValueError::new_err("expected at least 3 channels"));
        }
        Ok(rgb_to_luma_u8(input).into_pyarray(py))
    }

    /// graygrid extension module
    #[pymodule]
    pub fn graygrid(m: &Bound<'_, PyModule>) -> PyResult<()> {
        m.add_function(wrap_pyfunction!(blur, m)?)?;
        m.add_function(wrap_pyfunction!(contour, m)?)?;
        m.add_function(wrap_pyfunction!(rotate, m)?)?;
        m.add_function(wrap_pyfunction!(salt_and_pepper, m)?)?;
        m.add_function(wrap_pyfunction!(concat, m)?)?;
        m.add_function(wrap_pyfunction!(segment, m)?)?;
        m.add_function(wrap_pyfunction!(brightness, m)?)?;
        m.add_function(wrap_pyfunction!(contrast, m)?)?;
        m.add_function(wrap_pyfunction!(apply_command, m)?)?;

        m.add_function(wrap_pyfunction!(rgb_to_gray, m)?)?;

        Ok(())
    }
}

#[cfg(feature = "python")]
pub use python::graygrid;
