//! Salt-and-pepper noise.
//!
//! Every sample independently becomes white (salt), black (pepper) or stays
//! as it is. The random source is supplied by the caller so results can be
//! reproduced with a seeded generator.

use rand::Rng;

use crate::error::{GridError, GridResult};
use crate::grid::{Grid, MAX_INTENSITY, MIN_INTENSITY};

fn check_probability(name: &str, value: f64) -> GridResult<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(GridError::InvalidParameter(format!(
            "{} probability must be in [0, 1], got {}",
            name, value
        )))
    }
}

impl Grid {
    /// Corrupt samples with salt-and-pepper noise.
    ///
    /// Samples are visited in row-major order and each consumes one uniform
    /// draw `r` in `[0, 1)`: `r < salt` sets 255, otherwise
    /// `r < salt + pepper` sets 0, otherwise the sample is kept.
    ///
    /// # Arguments
    /// * `salt` - Probability of a sample becoming 255
    /// * `pepper` - Probability of a sample becoming 0
    /// * `rng` - Random source, e.g. `StdRng::seed_from_u64(seed)`
    ///
    /// Fails with `InvalidParameter` (grid untouched) if either probability is
    /// outside `[0, 1]` or their sum exceeds 1.
    pub fn salt_and_pepper<R: Rng + ?Sized>(
        &mut self,
        salt: f64,
        pepper: f64,
        rng: &mut R,
    ) -> GridResult<()> {
        check_probability("salt", salt)?;
        check_probability("pepper", pepper)?;
        if salt + pepper > 1.0 {
            return Err(GridError::InvalidParameter(format!(
                "salt + pepper probability must not exceed 1, got {}",
                salt + pepper
            )));
        }

        for sample in self.data.iter_mut() {
            let r: f64 = rng.gen();
            if r < salt {
                *sample = MAX_INTENSITY;
            } else if r < salt + pepper {
                *sample = MIN_INTENSITY;
            }
        }

        Ok(())
    }
}
