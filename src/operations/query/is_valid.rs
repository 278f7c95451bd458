use std::collections::{HashMap, HashSet};

use crate::error::{InvariantViolation, Result};
use crate::math::{Point3, DEFAULT_EPSILON};
use crate::topology::{DirectedEdge, Face};

/// Validates the geometric and topological consistency of a face set.
///
/// Convexity: every checked point lies on or behind every face plane.
/// Closed manifold: every directed edge is used by exactly one face and its
/// reverse by exactly one other face.
pub struct IsValid<'a> {
    points: &'a [Point3],
    faces: &'a [Face],
    epsilon: f64,
}

impl<'a> IsValid<'a> {
    /// Creates a new `IsValid` query with the default tolerance.
    #[must_use]
    pub fn new(points: &'a [Point3], faces: &'a [Face]) -> Self {
        Self {
            points,
            faces,
            epsilon: DEFAULT_EPSILON,
        }
    }

    /// Sets the tolerance for the convexity test.
    #[must_use]
    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Checks that none of `candidates` lies outside any face.
    ///
    /// # Errors
    ///
    /// Returns [`InvariantViolation::PointOutsideFace`] for the first
    /// offending point.
    pub fn check_convexity(
        &self,
        candidates: impl IntoIterator<Item = usize>,
    ) -> std::result::Result<(), InvariantViolation> {
        for point in candidates {
            for face in self.faces {
                let distance = face.signed_distance(self.points, &self.points[point]);
                if distance > self.epsilon {
                    return Err(InvariantViolation::PointOutsideFace {
                        point,
                        face: face.vertices(),
                        distance,
                    });
                }
            }
        }
        Ok(())
    }

    /// Checks that the faces bound a closed, consistently oriented surface.
    ///
    /// # Errors
    ///
    /// Returns [`InvariantViolation::EdgeAlreadyOwned`] for a directed edge
    /// used twice and [`InvariantViolation::OpenEdge`] for one whose reverse
    /// is missing.
    pub fn check_manifold(&self) -> std::result::Result<(), InvariantViolation> {
        let mut uses: HashMap<DirectedEdge, usize> = HashMap::new();
        for edge in self.faces.iter().flat_map(Face::edges) {
            *uses.entry(edge).or_default() += 1;
        }
        let mut edges: Vec<(&DirectedEdge, &usize)> = uses.iter().collect();
        edges.sort_unstable();
        for (edge, &count) in edges {
            if count > 1 {
                return Err(InvariantViolation::EdgeAlreadyOwned {
                    from: edge.from,
                    to: edge.to,
                });
            }
            if !uses.contains_key(&edge.reversed()) {
                return Err(InvariantViolation::OpenEdge {
                    from: edge.from,
                    to: edge.to,
                });
            }
        }
        Ok(())
    }

    /// Returns `true` if every point lies on or behind every face.
    #[must_use]
    pub fn is_convex(&self) -> bool {
        self.check_convexity(0..self.points.len()).is_ok()
    }

    /// Returns `true` if the faces form a closed 2-manifold.
    #[must_use]
    pub fn is_closed_manifold(&self) -> bool {
        self.check_manifold().is_ok()
    }

    /// `V - E + F` over the vertices and undirected edges used by the faces.
    #[must_use]
    #[allow(clippy::cast_possible_wrap)]
    pub fn euler_characteristic(&self) -> i64 {
        let vertices: HashSet<usize> = self.faces.iter().flat_map(Face::vertices).collect();
        let edges: HashSet<(usize, usize)> =
            self.faces.iter().flat_map(Face::undirected_edges).collect();
        vertices.len() as i64 - edges.len() as i64 + self.faces.len() as i64
    }

    /// Runs the convexity check over all points and the manifold check.
    ///
    /// # Errors
    ///
    /// Returns the first [`InvariantViolation`] found.
    pub fn execute(&self) -> Result<()> {
        self.check_convexity(0..self.points.len())?;
        self.check_manifold()?;
        Ok(())
    }
}
