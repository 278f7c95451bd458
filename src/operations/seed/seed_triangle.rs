use tracing::warn;

use crate::error::{DegenerateInputError, InvariantViolation, Result};
use crate::math::{cmp_zxy, is_zero, signed_distance, Point3, Vector3, DEFAULT_EPSILON};
use crate::operations::hinge::select_wrap_point;
use crate::topology::Face;

use super::span_tetrahedron;

/// Builds the first hull face for gift wrapping.
///
/// The lowest point in `(z, x, y)` order and a partner chosen in the `xz`
/// projection span a supporting plane parallel to the y axis. The partner
/// is then moved along that plane until the pair is a hull edge, and the
/// third vertex is found by rotating the plane around it.
pub struct InitialFace {
    epsilon: f64,
}

impl InitialFace {
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

    /// Sorts `order` by `(z, x, y)`, moves the seed face's vertices to its
    /// front and returns the outward-oriented face.
    ///
    /// # Errors
    ///
    /// Returns a [`DegenerateInputError`](crate::error::DegenerateInputError)
    /// if the points do not span a volume, and an [`InvariantViolation`] if
    /// no orientation of the face keeps every point behind it.
    pub fn execute(&self, points: &[Point3], order: &mut [usize]) -> Result<Face> {
        let eps = self.epsilon;
        span_tetrahedron(points, &mut order.to_vec(), eps)?;

        order.sort_by(|&i, &j| cmp_zxy(&points[i], &points[j]).then(i.cmp(&j)));
        let p0 = order[0];
        let o = points[p0];

        // Gift wrap in the xz projection: no point lies in front of the
        // plane through p0 parallel to the y axis.
        let mut j = order[1..]
            .iter()
            .copied()
            .find(|&k| {
                let d = points[k] - o;
                d.x.abs() > eps || d.z.abs() > eps
            })
            .ok_or(DegenerateInputError::Collinear)?;
        for &k in &order[1..] {
            let d = points[j] - o;
            if d.cross(&(points[k] - o)).y > eps {
                j = k;
            }
        }
        let d = points[j] - o;
        let support = Vector3::new(d.z, 0.0, -d.x);

        // Within that plane, walk to the neighbour of p0 on the boundary of
        // the points it touches, so p0 → p1 is an edge of the hull.
        let mut p1 = j;
        for &k in &order[1..] {
            let v = points[k] - o;
            if signed_distance(&points[k], &o, &support).abs() > eps || is_zero(&v, eps) {
                continue;
            }
            let u = points[p1] - o;
            let turn = u.cross(&v).dot(&support);
            if turn > eps
                || (turn.abs() <= eps && u.dot(&v) > 0.0 && v.norm_squared() > u.norm_squared())
            {
                p1 = k;
            }
        }
        if let Some(k) = order.iter().position(|&i| i == p1) {
            order.swap(1, k);
        }

        let c = select_wrap_point(points, order, p0, p1, &support, eps).ok_or_else(|| {
            warn!(from = p0, to = p1, "no third point for the seed face");
            InvariantViolation::NoWrapCandidate { from: p0, to: p1 }
        })?;

        let mut face = Face::new(points, p1, p0, c);
        if outside_point(points, order, &face, eps).is_some() {
            face = Face::new(points, p0, p1, c);
            if let Some((point, distance)) = outside_point(points, order, &face, eps) {
                warn!(point, ?face, distance, "seed face does not support the point set");
                return Err(InvariantViolation::PointOutsideFace {
                    point,
                    face: face.vertices(),
                    distance,
                }
                .into());
            }
        }

        if let Some(k) = order.iter().position(|&i| i == c) {
            order.swap(2, k);
        }
        Ok(face)
    }
}

impl Default for InitialFace {
    fn default() -> Self {
        Self::new()
    }
}

fn outside_point(points: &[Point3], order: &[usize], face: &Face, eps: f64) -> Option<(usize, f64)> {
    order.iter().find_map(|&i| {
        let distance = face.signed_distance(points, &points[i]);
        (distance > eps).then_some((i, distance))
    })
}
