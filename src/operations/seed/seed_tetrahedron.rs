use crate::error::Result;
use crate::math::{signed_volume, Point3, DEFAULT_EPSILON};
use crate::topology::Face;

use super::span_tetrahedron;

/// Builds the seed tetrahedron for incremental insertion.
///
/// Moves four spanning points to the front of the insertion order and
/// returns the four outward faces over them.
pub struct InitialTetrahedron {
    epsilon: f64,
}

impl InitialTetrahedron {
    /// Creates the builder with the default tolerance.
    #[must_use]
    pub fn new() -> Self {
        Self {
            epsilon: DEFAULT_EPSILON,
        }
    }

    /// Sets the predicate tolerance.
    #[must_use]
    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Reorders `order` so its first four entries span a tetrahedron and
    /// returns that tetrahedron's faces, oriented outward.
    ///
    /// # Errors
    ///
    /// Returns a [`DegenerateInputError`](crate::error::DegenerateInputError)
    /// if all points are collinear or coplanar.
    pub fn execute(&self, points: &[Point3], order: &mut [usize]) -> Result<[Face; 4]> {
        span_tetrahedron(points, order, self.epsilon)?;
        let [o0, o1, o2, o3] = [order[0], order[1], order[2], order[3]];

        // Wind the base so the apex ends up on its inner side.
        let (b, c) = if signed_volume(&points[o0], &points[o1], &points[o2], &points[o3]) > 0.0 {
            (o1, o2)
        } else {
            (o2, o1)
        };
        Ok([
            Face::new(points, o0, c, b),
            Face::new(points, o0, b, o3),
            Face::new(points, b, c, o3),
            Face::new(points, o0, o3, c),
        ])
    }
}

impl Default for InitialTetrahedron {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::{DegenerateInputError, HullError};

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    fn assert_outward(points: &[Point3], faces: &[Face; 4]) {
        for face in faces {
            for (i, point) in points.iter().enumerate() {
                let d = face.signed_distance(points, point);
                assert!(d <= 1e-9, "point {i} outside face {:?} by {d}", face.vertices());
            }
        }
    }

    #[test]
    fn faces_point_outward_for_both_windings() {
        let positive = vec![
            p(0.0, 0.0, 0.0),
            p(1.0, 0.0, 0.0),
            p(0.0, 1.0, 0.0),
            p(0.0, 0.0, 1.0),
        ];
        let mut order = vec![0, 1, 2, 3];
        let faces = InitialTetrahedron::new().execute(&positive, &mut order).unwrap();
        assert_outward(&positive, &faces);

        let negative = vec![
            p(0.0, 0.0, 0.0),
            p(0.0, 1.0, 0.0),
            p(1.0, 0.0, 0.0),
            p(0.0, 0.0, 1.0),
        ];
        let mut order = vec![0, 1, 2, 3];
        let faces = InitialTetrahedron::new().execute(&negative, &mut order).unwrap();
        assert_outward(&negative, &faces);
    }

    #[test]
    fn seed_points_move_to_front() {
        let points = vec![
            p(0.0, 0.0, 0.0),
            p(1.0, 0.0, 0.0),
            p(2.0, 0.0, 0.0),
            p(0.0, 2.0, 0.0),
            p(0.3, 0.3, 0.0),
            p(0.1, 0.1, 1.0),
        ];
        let mut order: Vec<usize> = (0..points.len()).collect();
        let faces = InitialTetrahedron::new()
            .execute(&points, &mut order)
            .unwrap();
        assert_eq!(&order[..4], &[0, 1, 3, 5]);
        assert_outward(&points[..], &faces);
        for face in &faces {
            assert!(face.vertices().iter().all(|v| order[..4].contains(v)));
        }
    }

    #[test]
    fn coplanar_input_fails() {
        let points = vec![
            p(0.0, 0.0, 0.0),
            p(1.0, 0.0, 0.0),
            p(0.0, 1.0, 0.0),
            p(1.0, 1.0, 0.0),
            p(2.0, 5.0, 0.0),
        ];
        let mut order: Vec<usize> = (0..points.len()).collect();
        let err = InitialTetrahedron::new()
            .execute(&points, &mut order)
            .unwrap_err();
        assert!(matches!(
            err,
            HullError::Degenerate(DegenerateInputError::Coplanar)
        ));
    }
}
