pub mod creation;
pub mod gift_wrap;
pub(crate) mod hinge;
pub mod incremental;
pub mod query;
pub mod seed;

use std::fmt;

pub use gift_wrap::GiftWrap;
pub use incremental::{Incremental, RandomizedIncremental};

use crate::config::HullConfig;
use crate::error::Result;
use crate::math::Point3;
use crate::topology::{ConvexHull, Face};

/// The hull construction strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Algorithm {
    /// Edge rotation from a seed face, O(n·h).
    GiftWrapping,
    /// Point insertion into a seed tetrahedron in fixed order, O(n²).
    Incremental,
    /// Point insertion in shuffled order with conflict lists, expected O(n log n).
    RandomizedIncremental,
}

impl Algorithm {
    /// Every strategy, in declaration order.
    pub const ALL: [Algorithm; 3] = [
        Algorithm::GiftWrapping,
        Algorithm::Incremental,
        Algorithm::RandomizedIncremental,
    ];

    /// Builds an engine over `points`, positioned at its seed configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the points do not
    /// span a volume.
    pub fn build(self, points: Vec<Point3>, config: &HullConfig) -> Result<Box<dyn HullEngine>> {
        Ok(match self {
            Algorithm::GiftWrapping => Box::new(GiftWrap::new(points, config)?),
            Algorithm::Incremental => Box::new(Incremental::new(points, config)?),
            Algorithm::RandomizedIncremental => {
                Box::new(RandomizedIncremental::new(points, config)?)
            }
        })
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Algorithm::GiftWrapping => "gift wrapping",
            Algorithm::Incremental => "incremental",
            Algorithm::RandomizedIncremental => "randomized incremental",
        };
        f.write_str(name)
    }
}

/// Faces removed and created by the most recent step.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StepReport {
    pub removed: Vec<Face>,
    pub created: Vec<Face>,
}

impl StepReport {
    /// Forgets both face lists.
    pub fn clear(&mut self) {
        self.removed.clear();
        self.created.clear();
    }
}

/// A hull construction that advances in discrete steps.
///
/// A step is one processed face for gift wrapping and one inserted point
/// for the incremental engines. Every settled state between steps keeps
/// edge ownership unique and the faces outward oriented.
pub trait HullEngine {
    /// The strategy this engine implements.
    fn algorithm(&self) -> Algorithm;

    /// Performs one unit of construction.
    ///
    /// # Errors
    ///
    /// Returns [`PreconditionError::Finished`](crate::error::PreconditionError::Finished)
    /// in the terminal state, and an
    /// [`InvariantViolation`](crate::error::InvariantViolation) if the
    /// construction breaks down; the engine must then be discarded.
    fn step(&mut self) -> Result<()>;

    /// Returns `true` once no further step is possible.
    fn is_finished(&self) -> bool;

    /// All input points, indexed as the faces reference them.
    fn points(&self) -> &[Point3];

    /// The usable point indices in processing order.
    fn order(&self) -> &[usize];

    /// Progress: the processed face count for gift wrapping, the processed
    /// point count for the incremental engines.
    fn cursor(&self) -> usize;

    /// The current hull faces.
    fn faces(&self) -> Vec<Face>;

    /// Number of current hull faces.
    fn face_count(&self) -> usize;

    /// Faces removed and created by the most recent step.
    fn last_step(&self) -> &StepReport;

    /// Forgets the faces removed by the most recent step, once they have
    /// been shown.
    fn clear_removed_faces(&mut self);

    /// Steps until the terminal state.
    ///
    /// # Errors
    ///
    /// Propagates the first failing step.
    fn finish(&mut self) -> Result<()> {
        while !self.is_finished() {
            self.step()?;
        }
        Ok(())
    }

    /// Snapshot of the current face set as a hull.
    fn hull(&self) -> ConvexHull {
        ConvexHull::new(self.points().to_vec(), self.faces())
    }

    /// Consumes the engine, returning the current face set.
    fn into_hull(self) -> ConvexHull
    where
        Self: Sized;

    /// Drives the engine to completion and returns the hull.
    ///
    /// # Errors
    ///
    /// Propagates the first failing step.
    fn run(mut self) -> Result<ConvexHull>
    where
        Self: Sized,
    {
        self.finish()?;
        Ok(self.into_hull())
    }
}

/// Builds the convex hull of `points` with the chosen strategy.
///
/// # Errors
///
/// Returns a [`DegenerateInputError`](crate::error::DegenerateInputError)
/// for inputs without a 3D hull, and an
/// [`InvariantViolation`](crate::error::InvariantViolation) if construction
/// breaks down.
pub fn convex_hull(points: &[Point3], algorithm: Algorithm, config: &HullConfig) -> Result<ConvexHull> {
    let points = points.to_vec();
    match algorithm {
        Algorithm::GiftWrapping => GiftWrap::new(points, config)?.run(),
        Algorithm::Incremental => Incremental::new(points, config)?.run(),
        Algorithm::RandomizedIncremental => RandomizedIncremental::new(points, config)?.run(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::{DegenerateInputError, HullError, PreconditionError};
    use crate::operations::creation::RandomPoints;
    use crate::operations::query::{IsValid, Volume};
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::f64::consts::{FRAC_PI_2, PI};

    fn config() -> HullConfig {
        HullConfig::new().with_seed(11).with_verify_steps(true)
    }

    fn random_cloud(seed: u64, count: usize) -> Vec<Point3> {
        let mut rng = StdRng::seed_from_u64(seed);
        RandomPoints::new(count).execute(&mut rng).unwrap()
    }

    fn cube() -> Vec<Point3> {
        let mut points = Vec::new();
        for x in [-1.0, 1.0] {
            for y in [-1.0, 1.0] {
                for z in [-1.0, 1.0] {
                    points.push(Point3::new(x, y, z));
                }
            }
        }
        points
    }

    #[test]
    fn algorithms_agree_on_random_clouds() {
        for seed in 0..8 {
            let points = random_cloud(seed, 60);
            let hulls: Vec<ConvexHull> = Algorithm::ALL
                .iter()
                .map(|&alg| convex_hull(&points, alg, &config()).unwrap())
                .collect();
            for hull in &hulls {
                assert!(IsValid::new(hull.points(), hull.faces()).execute().is_ok());
                assert_eq!(hull.euler_characteristic(), 2);
            }
            assert_eq!(hulls[0].canonical_faces(), hulls[1].canonical_faces());
            assert_eq!(hulls[1].canonical_faces(), hulls[2].canonical_faces());
        }
    }

    #[test]
    fn regular_tetrahedron() {
        let s = 1.0 / 2f64.sqrt();
        let points = vec![
            Point3::new(1.0, 0.0, -s),
            Point3::new(-1.0, 0.0, -s),
            Point3::new(0.0, 1.0, s),
            Point3::new(0.0, -1.0, s),
        ];
        for alg in Algorithm::ALL {
            let hull = convex_hull(&points, alg, &config()).unwrap();
            assert_eq!(hull.face_count(), 4, "{alg}");
            let faces = hull.faces();
            for (i, f) in faces.iter().enumerate() {
                for g in &faces[i + 1..] {
                    let shared = f
                        .undirected_edges()
                        .iter()
                        .filter(|e| g.undirected_edges().contains(e))
                        .count();
                    assert_eq!(shared, 1);
                }
            }
        }
    }

    #[test]
    fn coplanar_input_is_degenerate() {
        let points = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(0.5, 0.5, 0.0),
        ];
        for alg in Algorithm::ALL {
            let err = convex_hull(&points, alg, &config()).unwrap_err();
            assert!(matches!(
                err,
                HullError::Degenerate(DegenerateInputError::Coplanar)
            ));
        }
    }

    #[test]
    fn cube_corners() {
        let points = cube();
        for alg in Algorithm::ALL {
            let hull = convex_hull(&points, alg, &config()).unwrap();
            assert_eq!(hull.face_count(), 12, "{alg}");
            assert_eq!(hull.edge_count(), 18, "{alg}");
            assert_eq!(hull.vertex_count(), 8, "{alg}");
            assert!(IsValid::new(hull.points(), hull.faces()).execute().is_ok());
        }
    }

    #[test]
    fn cube_with_interior_and_duplicate_points() {
        let mut points = cube();
        points.push(Point3::new(0.0, 0.0, 0.0));
        points.push(Point3::new(0.2, -0.3, 0.5));
        points.push(Point3::new(1.0, 1.0, 1.0));
        for alg in Algorithm::ALL {
            let hull = convex_hull(&points, alg, &config()).unwrap();
            assert_eq!(hull.vertex_indices(), (0..8).collect::<Vec<_>>(), "{alg}");
            assert_eq!(hull.euler_characteristic(), 2);
        }
    }

    fn assert_closed(hull: &ConvexHull, alg: Algorithm) {
        let check = IsValid::new(hull.points(), hull.faces());
        assert!(check.execute().is_ok(), "{alg}");
        assert_eq!(check.euler_characteristic(), 2, "{alg}");
    }

    #[test]
    fn cube_with_points_on_faces_and_edges() {
        let mut points = cube();
        // On the bottom face.
        points.push(Point3::new(0.3, -0.4, -1.0));
        points.push(Point3::new(-0.5, 0.2, -1.0));
        points.push(Point3::new(0.7, 0.7, -1.0));
        // On the x = 1 face.
        points.push(Point3::new(1.0, 0.1, 0.4));
        points.push(Point3::new(1.0, -0.6, -0.2));
        // On edges.
        points.push(Point3::new(1.0, 0.0, 1.0));
        points.push(Point3::new(0.0, -1.0, -1.0));
        points.push(Point3::new(-1.0, -1.0, 0.5));

        let corners: Vec<usize> = (0..8).collect();
        for alg in Algorithm::ALL {
            let hull = convex_hull(&points, alg, &config()).unwrap();
            assert_closed(&hull, alg);
            let vertices = hull.vertex_indices();
            assert!(corners.iter().all(|c| vertices.contains(c)), "{alg}");
            assert_relative_eq!(Volume::new(&hull).execute(), 8.0, epsilon = 1e-9);
        }

        // Gift wrapping only ever uses the corners.
        let hull = convex_hull(&points, Algorithm::GiftWrapping, &config()).unwrap();
        assert_eq!(hull.vertex_indices(), corners);
        assert_eq!(hull.face_count(), 12);
    }

    #[test]
    fn integer_grid() {
        let mut points = Vec::new();
        let mut corners = Vec::new();
        for x in 0..4 {
            for y in 0..4 {
                for z in 0..4 {
                    if [x, y, z].iter().all(|&c| c == 0 || c == 3) {
                        corners.push(points.len());
                    }
                    points.push(Point3::new(f64::from(x), f64::from(y), f64::from(z)));
                }
            }
        }

        for alg in Algorithm::ALL {
            let hull = convex_hull(&points, alg, &config()).unwrap();
            assert_closed(&hull, alg);
            let vertices = hull.vertex_indices();
            assert!(corners.iter().all(|c| vertices.contains(c)), "{alg}");
            assert_relative_eq!(Volume::new(&hull).execute(), 27.0, epsilon = 1e-9);
        }

        let hull = convex_hull(&points, Algorithm::GiftWrapping, &config()).unwrap();
        assert_eq!(hull.vertex_indices(), corners);
        assert_eq!(hull.face_count(), 12);
    }

    #[test]
    fn latitude_longitude_sphere() {
        // Neighbouring rings bound planar trapezoids.
        let mut points = vec![Point3::new(0.0, 0.0, -1.0), Point3::new(0.0, 0.0, 1.0)];
        for i in 1..20 {
            let lat = -FRAC_PI_2 + PI * f64::from(i) / 20.0;
            for j in 0..20 {
                let lon = 2.0 * PI * f64::from(j) / 20.0;
                points.push(Point3::new(
                    lat.cos() * lon.cos(),
                    lat.cos() * lon.sin(),
                    lat.sin(),
                ));
            }
        }

        for alg in Algorithm::ALL {
            let hull = convex_hull(&points, alg, &config()).unwrap();
            assert_closed(&hull, alg);
        }

        // Every point is extreme; the trapezoids are split, never skipped.
        let hull = convex_hull(&points, Algorithm::GiftWrapping, &config()).unwrap();
        assert_eq!(hull.vertex_count(), points.len());
        assert_eq!(hull.face_count(), 2 * points.len() - 4);
    }

    #[test]
    fn stepping_matches_one_shot_run() {
        let points = random_cloud(3, 40);
        for alg in Algorithm::ALL {
            let mut engine = alg.build(points.clone(), &config()).unwrap();
            let mut steps = 0;
            while !engine.is_finished() {
                engine.step().unwrap();
                steps += 1;
            }
            assert!(steps > 0);
            assert!(matches!(
                engine.step(),
                Err(HullError::Precondition(PreconditionError::Finished))
            ));
            let one_shot = convex_hull(&points, alg, &config()).unwrap();
            assert_eq!(engine.hull().canonical_faces(), one_shot.canonical_faces());
        }
    }

    #[test]
    fn invalid_config_is_rejected() {
        let points = cube();
        let config = HullConfig::new().with_epsilon(-1.0);
        for alg in Algorithm::ALL {
            assert!(matches!(
                convex_hull(&points, alg, &config),
                Err(HullError::Precondition(PreconditionError::InvalidConfig { .. }))
            ));
        }
    }
}
