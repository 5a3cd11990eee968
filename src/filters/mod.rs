//! Filters over a [`Grid`](crate::grid::Grid) of grayscale samples.
//!
//! ## Operations
//!
//! | Filter | Module | Output shape | Fails with |
//! |--------|--------|--------------|------------|
//! | `blur(k)` | [`blur`] | (H-k+1, W-k+1) | `InvalidParameter` |
//! | `contour()` | [`edge`] | (H, W-1) | `InvalidParameter` |
//! | `rotate()` | [`rotate`] | (W, H) | - |
//! | `salt_and_pepper(s, p, rng)` | [`noise`] | (H, W) | `InvalidParameter` |
//! | `concat(other, dir)` | [`concat`] | (H, W+W') or (H+H', W) | `DimensionMismatch` |
//! | `segment()` | [`segment`] | (H, W) | `EmptyInput` |
//! | `brightness(f)`, `contrast(f)` | [`color_adjust`] | (H, W) | `InvalidParameter` |
//!
//! ## Architecture
//!
//! Each module exposes a pure function over an `ArrayView2<f64>` that returns
//! a new array, plus an in-place method on `Grid` that calls it. Arguments
//! are checked before any sample is written, so a filter that fails leaves
//! its grid exactly as it was.
//!
//! Filters are synchronous and hold no state between calls. Randomness is
//! injected by the caller.

pub mod blur;
pub mod color_adjust;
pub mod concat;
pub mod edge;
pub mod grayscale;
pub mod noise;
pub mod rotate;
pub mod segment;
