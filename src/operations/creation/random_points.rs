use rand::Rng;

use crate::error::{PreconditionError, Result};
use crate::math::Point3;

use crate::operations::seed::MIN_POINTS;

/// Generates points uniformly distributed in the cube `[-h, h]³`.
pub struct RandomPoints {
    count: usize,
    half_extent: f64,
}

impl RandomPoints {
    /// Creates a new `RandomPoints` operation in the default cube, `h = 5`.
    #[must_use]
    pub fn new(count: usize) -> Self {
        Self {
            count,
            half_extent: 5.0,
        }
    }

    /// Sets the half edge length `h` of the cube.
    #[must_use]
    pub fn with_half_extent(mut self, half_extent: f64) -> Self {
        self.half_extent = half_extent;
        self
    }

    /// Executes the operation, drawing every coordinate from `rng`.
    ///
    /// # Errors
    ///
    /// Returns [`PreconditionError::TooFewPoints`] if fewer than four points
    /// are requested, and [`PreconditionError::InvalidConfig`] if the half
    /// extent is not a positive finite number.
    pub fn execute<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Vec<Point3>> {
        if self.count < MIN_POINTS {
            return Err(PreconditionError::TooFewPoints(self.count).into());
        }
        let h = self.half_extent;
        if !(h.is_finite() && h > 0.0) {
            return Err(PreconditionError::InvalidConfig {
                parameter: "half_extent",
                value: h,
            }
            .into());
        }

        Ok((0..self.count)
            .map(|_| {
                Point3::new(
                    rng.random_range(-h..=h),
                    rng.random_range(-h..=h),
                    rng.random_range(-h..=h),
                )
            })
            .collect())
    }
}
