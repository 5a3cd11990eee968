//! Image file boundary: decode files into grids and encode grids back.
//!
//! Decoding accepts anything the `image` crate can read. Grayscale images are
//! taken as is; color images go through [`rgb_to_luma_u8`]. Encoding always
//! writes 8-bit grayscale, with the format chosen from the file extension.

use std::path::{Path, PathBuf};

use image::{DynamicImage, GrayImage};
use ndarray::{Array2, Array3};
use tracing::{debug, info};

use crate::error::{GridError, GridResult, Result};
use crate::filters::grayscale::rgb_to_luma_u8;
use crate::grid::{clamp_intensity, Grid, MAX_INTENSITY};

/// Suffix added to the file stem of filtered output.
pub const FILTERED_SUFFIX: &str = "_filtered";

/// How grid samples are mapped onto 8-bit gray when encoding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum ToneMapping {
    /// Round and clamp each sample to 0-255.
    Clamp,
    /// Map the grid's minimum to 0 and maximum to 255. A constant grid is
    /// clamped instead.
    #[default]
    Stretch,
}

// ============================================================================
// Decode
// ============================================================================

/// Convert a decoded image into a grid of intensities in 0-255.
pub fn grid_from_image(image: &DynamicImage) -> GridResult<Grid> {
    if image.color().has_color() {
        let rgb = image.to_rgb8();
        let (width, height) = rgb.dimensions();
        let pixels = Array3::from_shape_vec((height as usize, width as usize, 3), rgb.into_raw())
            .map_err(|e| GridError::DimensionMismatch(e.to_string()))?;
        Ok(Grid::from_array(rgb_to_luma_u8(pixels.view())))
    } else {
        let gray = image.to_luma8();
        let (width, height) = gray.dimensions();
        let pixels = Array2::from_shape_vec((height as usize, width as usize), gray.into_raw())
            .map_err(|e| GridError::DimensionMismatch(e.to_string()))?;
        Ok(Grid::from_array(pixels.mapv(f64::from)))
    }
}

/// Decode an in-memory image file.
pub fn decode_bytes(bytes: &[u8]) -> Result<Grid> {
    let image = image::load_from_memory(bytes)?;
    Ok(grid_from_image(&image)?)
}

/// Decode the image file at `path`.
pub fn decode_path(path: &Path) -> Result<Grid> {
    let image = image::open(path)?;
    let grid = grid_from_image(&image)?;
    debug!(
        path = %path.display(),
        height = grid.height(),
        width = grid.width(),
        color = image.color().has_color(),
        "decoded image"
    );
    Ok(grid)
}

// ============================================================================
// Encode
// ============================================================================

/// Map a grid onto an 8-bit grayscale image.
///
/// Fails with `EmptyInput` if the grid has no rows or no columns.
pub fn grid_to_image(grid: &Grid, tone: ToneMapping) -> GridResult<GrayImage> {
    let (height, width) = grid.dim();
    if height == 0 || width == 0 {
        return Err(GridError::EmptyInput(format!(
            "cannot encode a {}x{} grid",
            height, width
        )));
    }

    let to_byte = |v: f64| clamp_intensity(v).round() as u8;

    let pixels: Vec<u8> = match tone {
        ToneMapping::Clamp => grid.view().iter().map(|&v| to_byte(v)).collect(),
        ToneMapping::Stretch => {
            let (min, max) = grid
                .view()
                .iter()
                .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                    (lo.min(v), hi.max(v))
                });
            let range = max - min;
            if range > f64::EPSILON {
                grid.view()
                    .iter()
                    .map(|&v| to_byte((v - min) / range * MAX_INTENSITY))
                    .collect()
            } else {
                grid.view().iter().map(|&v| to_byte(v)).collect()
            }
        }
    };

    GrayImage::from_raw(width as u32, height as u32, pixels).ok_or_else(|| {
        GridError::DimensionMismatch(format!(
            "pixel buffer does not match a {}x{} image",
            width, height
        ))
    })
}

/// Encode `grid` to `path`; the format follows the extension.
pub fn encode_path(grid: &Grid, path: &Path, tone: ToneMapping) -> Result<()> {
    let image = grid_to_image(grid, tone)?;
    image.save(path)?;
    info!(
        path = %path.display(),
        height = grid.height(),
        width = grid.width(),
        ?tone,
        "wrote image"
    );
    Ok(())
}

/// `dir/photo.jpg` -> `dir/photo_filtered.jpg`
pub fn filtered_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let mut name = format!("{}{}", stem, FILTERED_SUFFIX);
    if let Some(ext) = input.extension() {
        name.push('.');
        name.push_str(&ext.to_string_lossy());
    }
    input.with_file_name(name)
}
