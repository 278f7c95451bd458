use crate::error::{PreconditionError, Result};
use crate::math::DEFAULT_EPSILON;

/// Parameters shared by every hull engine and the stepper.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HullConfig {
    /// Tolerance for the zero, orientation and visibility predicates.
    pub epsilon: f64,
    /// Seed for point generation and the randomized insertion order.
    /// `None` draws a fresh seed from the operating system.
    pub seed: Option<u64>,
    /// Half edge length of the cube random points are generated in.
    pub half_extent: f64,
    /// Re-checks convexity against the processed points after each step.
    pub verify_steps: bool,
}

impl Default for HullConfig {
    fn default() -> Self {
        Self {
            epsilon: DEFAULT_EPSILON,
            seed: None,
            half_extent: 5.0,
            verify_steps: cfg!(debug_assertions),
        }
    }
}

impl HullConfig {
    /// Creates the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the predicate tolerance.
    #[must_use]
    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Fixes the random seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the half extent of the generation cube.
    #[must_use]
    pub fn with_half_extent(mut self, half_extent: f64) -> Self {
        self.half_extent = half_extent;
        self
    }

    /// Enables or disables per-step convexity checks.
    #[must_use]
    pub fn with_verify_steps(mut self, verify_steps: bool) -> Self {
        self.verify_steps = verify_steps;
        self
    }

    /// Checks that the numeric parameters are usable.
    ///
    /// # Errors
    ///
    /// Returns [`PreconditionError::InvalidConfig`] if `epsilon` or
    /// `half_extent` is not a positive finite number.
    pub fn validate(&self) -> Result<()> {
        if !(self.epsilon.is_finite() && self.epsilon > 0.0) {
            return Err(PreconditionError::InvalidConfig {
                parameter: "epsilon",
                value: self.epsilon,
            }
            .into());
        }
        if !(self.half_extent.is_finite() && self.half_extent > 0.0) {
            return Err(PreconditionError::InvalidConfig {
                parameter: "half_extent",
                value: self.half_extent,
            }
            .into());
        }
        Ok(())
    }
}
