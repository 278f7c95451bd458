//! Step-by-step driver for animating a hull construction.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use crate::config::HullConfig;
use crate::error::{HullError, PreconditionError, Result};
use crate::math::Point3;
use crate::operations::creation::RandomPoints;
use crate::operations::seed::MIN_POINTS;
use crate::operations::{Algorithm, HullEngine};
use crate::tessellation::{HullMesh, TessellateHull};
use crate::topology::{ConvexHull, Face};

/// Runs one hull construction at a time, one step per [`advance`](Self::advance).
///
/// Between steps the current faces, the faces the last step removed and
/// created, and the progress cursor can be read for display.
pub struct HullStepper {
    config: HullConfig,
    rng: StdRng,
    algorithm: Option<Algorithm>,
    points: Vec<Point3>,
    /// `config` with the seed of the current run filled in.
    run_config: HullConfig,
    engine: Option<Box<dyn HullEngine>>,
}

impl HullStepper {
    /// Creates an idle stepper.
    ///
    /// Point generation and shuffle seeds come from `config.seed`, or from
    /// the operating system when no seed is set.
    ///
    /// # Errors
    ///
    /// Returns [`PreconditionError::InvalidConfig`] for an unusable
    /// configuration.
    pub fn new(config: HullConfig) -> Result<Self> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Ok(Self {
            config,
            rng,
            algorithm: None,
            points: Vec::new(),
            run_config: config,
            engine: None,
        })
    }

    /// Starts a run of `algorithm` over `count` random points in the
    /// configured cube.
    ///
    /// # Errors
    ///
    /// Returns [`PreconditionError::TooFewPoints`] if `count < 4`, and a
    /// [`DegenerateInputError`](crate::error::DegenerateInputError) if the
    /// generated points do not span a volume.
    pub fn reset(&mut self, algorithm: Algorithm, count: usize) -> Result<()> {
        if count < MIN_POINTS {
            return Err(PreconditionError::TooFewPoints(count).into());
        }
        let points = RandomPoints::new(count)
            .with_half_extent(self.config.half_extent)
            .execute(&mut self.rng)?;
        self.reset_with_points(algorithm, points)
    }

    /// Starts a run of `algorithm` over `points`.
    ///
    /// # Errors
    ///
    /// Returns [`PreconditionError::TooFewPoints`] for fewer than 4 points,
    /// and a [`DegenerateInputError`](crate::error::DegenerateInputError) if
    /// the points do not span a volume. The previous run is discarded either
    /// way.
    pub fn reset_with_points(&mut self, algorithm: Algorithm, points: Vec<Point3>) -> Result<()> {
        self.engine = None;
        self.algorithm = None;
        if points.len() < MIN_POINTS {
            return Err(PreconditionError::TooFewPoints(points.len()).into());
        }

        let seed = match self.config.seed {
            Some(seed) => seed,
            None => self.rng.random(),
        };
        self.run_config = HullConfig {
            seed: Some(seed),
            ..self.config
        };
        self.points = points;
        self.algorithm = Some(algorithm);
        self.rebuild()?;
        info!(%algorithm, points = self.points.len(), seed, "hull run reset");
        Ok(())
    }

    /// Returns to the seed configuration of the current run.
    ///
    /// The points, algorithm and shuffle seed are kept, so the replay
    /// repeats the same sequence of steps.
    ///
    /// # Errors
    ///
    /// Returns [`PreconditionError::NotInitialized`] before the first reset.
    pub fn restart(&mut self) -> Result<()> {
        self.rebuild()?;
        debug!("hull run restarted");
        Ok(())
    }

    fn rebuild(&mut self) -> Result<()> {
        let algorithm = self.algorithm.ok_or(PreconditionError::NotInitialized)?;
        self.engine = None;
        self.engine = Some(algorithm.build(self.points.clone(), &self.run_config)?);
        Ok(())
    }

    /// Performs one construction step and returns whether more remain.
    ///
    /// # Errors
    ///
    /// Returns [`PreconditionError::NotInitialized`] before the first reset,
    /// [`PreconditionError::Finished`] once the run is complete, and an
    /// [`InvariantViolation`](crate::error::InvariantViolation) if the
    /// construction breaks down, which also ends the run.
    pub fn advance(&mut self) -> Result<bool> {
        let engine = self
            .engine
            .as_mut()
            .ok_or(PreconditionError::NotInitialized)?;
        match engine.step() {
            Ok(()) => Ok(!engine.is_finished()),
            Err(err @ HullError::Precondition(_)) => Err(err),
            Err(err) => {
                self.engine = None;
                Err(err)
            }
        }
    }

    /// The algorithm of the current run.
    #[must_use]
    pub fn algorithm(&self) -> Option<Algorithm> {
        self.algorithm
    }

    /// The shuffle seed of the current run.
    #[must_use]
    pub fn seed(&self) -> Option<u64> {
        self.engine.as_ref().and(self.run_config.seed)
    }

    /// The points of the current run.
    #[must_use]
    pub fn points(&self) -> &[Point3] {
        match &self.engine {
            Some(engine) => engine.points(),
            None => &[],
        }
    }

    /// The usable point indices in processing order.
    #[must_use]
    pub fn order(&self) -> &[usize] {
        match &self.engine {
            Some(engine) => engine.order(),
            None => &[],
        }
    }

    /// The current hull faces.
    #[must_use]
    pub fn faces(&self) -> Vec<Face> {
        self.engine.as_ref().map(|e| e.faces()).unwrap_or_default()
    }

    /// Faces removed by the most recent step.
    #[must_use]
    pub fn removed_faces(&self) -> &[Face] {
        match &self.engine {
            Some(engine) => &engine.last_step().removed,
            None => &[],
        }
    }

    /// Faces created by the most recent step; the seed faces right after a
    /// reset.
    #[must_use]
    pub fn created_faces(&self) -> &[Face] {
        match &self.engine {
            Some(engine) => &engine.last_step().created,
            None => &[],
        }
    }

    /// Forgets the faces removed by the most recent step.
    pub fn clear_removed_faces(&mut self) {
        if let Some(engine) = self.engine.as_mut() {
            engine.clear_removed_faces();
        }
    }

    /// Number of current hull faces.
    #[must_use]
    pub fn face_count(&self) -> usize {
        self.engine.as_ref().map_or(0, |e| e.face_count())
    }

    /// Number of current faces that existed before the most recent step.
    #[must_use]
    pub fn surviving_face_count(&self) -> usize {
        self.face_count().saturating_sub(self.created_faces().len())
    }

    /// Progress of the current run; see [`HullEngine::cursor`].
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.engine.as_ref().map_or(0, |e| e.cursor())
    }

    /// Returns `true` when a run exists and has no steps left.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.engine.as_ref().is_some_and(|e| e.is_finished())
    }

    /// Snapshot of the current faces as a hull.
    #[must_use]
    pub fn hull(&self) -> Option<ConvexHull> {
        self.engine.as_ref().map(|e| e.hull())
    }

    /// Render buffers for the current state, with the faces the last step
    /// removed highlighted.
    #[must_use]
    pub fn mesh(&self) -> HullMesh {
        let faces = self.faces();
        TessellateHull::new(&faces)
            .with_highlighted(self.removed_faces())
            .execute(self.points())
    }
}
