//! WebAssembly exports for graygrid filters.
//!
//! Filters can change the grid's dimensions, so JavaScript holds a
//! [`WasmGrid`] handle and reads `width`/`height`/`data()` back after each
//! call instead of passing flat buffers in and out.
//!
//! Samples travel as `Float64Array` in row-major order.

use rand::rngs::StdRng;
use rand::SeedableRng;
use wasm_bindgen::prelude::*;

use crate::command::FilterCommand;
use crate::error::GridError;
use crate::filters::concat::Direction;
use crate::grid::Grid;

fn to_js(err: GridError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Grid of grayscale samples owned by the WASM side.
#[wasm_bindgen]
pub struct WasmGrid {
    inner: Grid,
}

#[wasm_bindgen]
impl WasmGrid {
    /// Build a grid from a flat row-major buffer of `width * height` samples.
    #[wasm_bindgen(constructor)]
    pub fn new(data: Vec<f64>, width: usize, height: usize) -> Result<WasmGrid, JsValue> {
        let inner = Grid::from_shape_vec(height, width, data).map_err(to_js)?;
        Ok(WasmGrid { inner })
    }

    /// Build a grid from RGBA bytes (e.g. canvas `ImageData.data`) using luma weights.
    pub fn from_rgba(data: &[u8], width: usize, height: usize) -> Result<WasmGrid, JsValue> {
        let pixels = ndarray::Array3::from_shape_vec((height, width, 4), data.to_vec())
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        let luma = crate::filters::grayscale::rgb_to_luma_u8(pixels.view());
        Ok(WasmGrid { inner: Grid::from_array(luma) })
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> usize {
        self.inner.width()
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> usize {
        self.inner.height()
    }

    /// Row-major copy of the samples.
    pub fn data(&self) -> Vec<f64> {
        self.inner.to_flat_vec()
    }

    pub fn blur(&mut self, kernel_size: usize) -> Result<(), JsValue> {
        self.inner.blur(kernel_size).map_err(to_js)
    }

    pub fn contour(&mut self) -> Result<(), JsValue> {
        self.inner.contour().map_err(to_js)
    }

    pub fn rotate(&mut self, times: u32) {
        self.inner.rotate_times(times);
    }

    pub fn salt_and_pepper(&mut self, salt: f64, pepper: f64, seed: u64) -> Result<(), JsValue> {
        let mut rng = StdRng::seed_from_u64(seed);
        self.inner
            .salt_and_pepper(salt, pepper, &mut rng)
            .map_err(to_js)
    }

    /// Append `other`; `direction` is "horizontal" or "vertical".
    pub fn concat(&mut self, other: &WasmGrid, direction: &str) -> Result<(), JsValue> {
        let direction: Direction = direction.parse().map_err(to_js)?;
        self.inner.concat(&other.inner, direction).map_err(to_js)
    }

    /// Append a copy of this grid to itself. JS cannot pass the same handle
    /// as both `self` and `other`.
    pub fn concat_self(&mut self, direction: &str) -> Result<(), JsValue> {
        let direction: Direction = direction.parse().map_err(to_js)?;
        let copy = self.inner.clone();
        self.inner.concat(&copy, direction).map_err(to_js)
    }

    pub fn segment(&mut self) -> Result<(), JsValue> {
        self.inner.segment().map_err(to_js)
    }

    pub fn brightness(&mut self, factor: f64) -> Result<(), JsValue> {
        self.inner.brightness(factor).map_err(to_js)
    }

    pub fn contrast(&mut self, factor: f64) -> Result<(), JsValue> {
        self.inner.contrast(factor).map_err(to_js)
    }

    /// Parse a caption such as "rotate 2" and apply it.
    pub fn apply_command(&mut self, caption: &str, seed: u64) -> Result<(), JsValue> {
        let command = FilterCommand::parse(caption).map_err(to_js)?;
        let mut rng = StdRng::seed_from_u64(seed);
        command.apply(&mut self.inner, &mut rng).map_err(to_js)
    }
}
