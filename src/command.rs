//! Filter commands parsed from free-text captions.
//!
//! A caption names one filter and optionally its numeric parameters, e.g.
//! `"blur 5"`, `"rotate 3"`, `"salt and pepper 0.05 0.02"`,
//! `"concat vertical"` or `"contrast 1.4"`. Parsing happens before any image
//! work so an unknown filter is rejected without touching a grid.

use std::fmt;
use std::str::FromStr;

use rand::Rng;

use crate::error::{GridError, GridResult};
use crate::filters::concat::Direction;
use crate::grid::Grid;

/// Filter names accepted in captions.
pub const SUPPORTED_FILTERS: [&str; 8] = [
    "blur",
    "contour",
    "rotate",
    "segment",
    "salt and pepper",
    "concat",
    "brightness",
    "contrast",
];

pub const DEFAULT_BLUR_KERNEL: usize = 16;
pub const DEFAULT_ROTATIONS: u32 = 1;
pub const DEFAULT_SALT_PROBABILITY: f64 = 0.01;
pub const DEFAULT_PEPPER_PROBABILITY: f64 = 0.01;
pub const DEFAULT_ENHANCE_FACTOR: f64 = 1.0;

/// One filter invocation with its parameters resolved.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FilterCommand {
    Blur { kernel_size: usize },
    Contour,
    Rotate { times: u32 },
    Segment,
    SaltAndPepper { salt: f64, pepper: f64 },
    /// Joins the image with a copy of itself
    Concat { direction: Direction },
    Brightness { factor: f64 },
    Contrast { factor: f64 },
}

/// Parse the parameter at `index`, or fall back to `default` when absent.
fn param<T: FromStr>(params: &[&str], index: usize, what: &str, default: T) -> GridResult<T> {
    match params.get(index) {
        None => Ok(default),
        Some(raw) => raw.parse().map_err(|_| {
            GridError::InvalidParameter(format!("{}: cannot parse '{}'", what, raw))
        }),
    }
}

impl FilterCommand {
    /// Parse a caption such as `"Blur 4"` (case-insensitive).
    ///
    /// Unknown or missing filter names give `UnsupportedOperation`; a
    /// parameter that is present but malformed gives `InvalidParameter`.
    /// Extra trailing words are ignored.
    pub fn parse(caption: &str) -> GridResult<Self> {
        let caption = caption.to_lowercase();
        let words: Vec<&str> = caption.split_whitespace().collect();

        let (name, params) = match words.as_slice() {
            [] => {
                return Err(GridError::UnsupportedOperation(
                    "no filter name given".to_string(),
                ))
            }
            ["salt", "and", "pepper", rest @ ..] => ("salt and pepper", rest),
            [name, rest @ ..] => (*name, rest),
        };

        let command = match name {
            "blur" => FilterCommand::Blur {
                kernel_size: param(params, 0, "blur kernel size", DEFAULT_BLUR_KERNEL)?,
            },
            "contour" => FilterCommand::Contour,
            "rotate" => FilterCommand::Rotate {
                times: param(params, 0, "rotation count", DEFAULT_ROTATIONS)?,
            },
            "segment" => FilterCommand::Segment,
            "salt and pepper" => FilterCommand::SaltAndPepper {
                salt: param(params, 0, "salt probability", DEFAULT_SALT_PROBABILITY)?,
                pepper: param(params, 1, "pepper probability", DEFAULT_PEPPER_PROBABILITY)?,
            },
            "concat" => FilterCommand::Concat {
                direction: param(params, 0, "concat direction", Direction::default())?,
            },
            "brightness" => FilterCommand::Brightness {
                factor: param(params, 0, "brightness factor", DEFAULT_ENHANCE_FACTOR)?,
            },
            "contrast" => FilterCommand::Contrast {
                factor: param(params, 0, "contrast factor", DEFAULT_ENHANCE_FACTOR)?,
            },
            other => {
                return Err(GridError::UnsupportedOperation(format!(
                    "'{}' is not a filter; supported filters are: {}",
                    other,
                    SUPPORTED_FILTERS.join(", ")
                )))
            }
        };

        Ok(command)
    }

    /// Filter name as it appears in captions.
    pub fn name(&self) -> &'static str {
        match self {
            FilterCommand::Blur { .. } => "blur",
            FilterCommand::Contour => "contour",
            FilterCommand::Rotate { .. } => "rotate",
            FilterCommand::Segment => "segment",
            FilterCommand::SaltAndPepper { .. } => "salt and pepper",
            FilterCommand::Concat { .. } => "concat",
            FilterCommand::Brightness { .. } => "brightness",
            FilterCommand::Contrast { .. } => "contrast",
        }
    }

    /// Run the filter on `grid`. `rng` is only consumed by salt and pepper.
    pub fn apply<R: Rng + ?Sized>(&self, grid: &mut Grid, rng: &mut R) -> GridResult<()> {
        match *self {
            FilterCommand::Blur { kernel_size } => grid.blur(kernel_size),
            FilterCommand::Contour => grid.contour(),
            FilterCommand::Rotate { times } => {
                grid.rotate_times(times);
                Ok(())
            }
            FilterCommand::Segment => grid.segment(),
            FilterCommand::SaltAndPepper { salt, pepper } => {
                grid.salt_and_pepper(salt, pepper, rng)
            }
            FilterCommand::Concat { direction } => {
                let copy = grid.clone();
                grid.concat(&copy, direction)
            }
            FilterCommand::Brightness { factor } => grid.brightness(factor),
            FilterCommand::Contrast { factor } => grid.contrast(factor),
        }
    }
}

impl FromStr for FilterCommand {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FilterCommand::parse(s)
    }
}

impl fmt::Display for FilterCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterCommand::Blur { kernel_size } => write!(f, "blur {}", kernel_size),
            FilterCommand::Rotate { times } => write!(f, "rotate {}", times),
            FilterCommand::SaltAndPepper { salt, pepper } => {
                write!(f, "salt and pepper {} {}", salt, pepper)
            }
            FilterCommand::Concat { direction } => write!(f, "concat {}", direction),
            FilterCommand::Brightness { factor } => write!(f, "brightness {}", factor),
            FilterCommand::Contrast { factor } => write!(f, "contrast {}", factor),
            FilterCommand::Contour | FilterCommand::Segment => f.write_str(self.name()),
        }
    }
}
