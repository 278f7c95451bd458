use crate::math::{signed_distance, triangle_normal, Point3, Vector3};

use super::edge::DirectedEdge;

slotmap::new_key_type! {
    /// Unique identifier for a face in a [`FaceStore`](super::FaceStore).
    pub struct FaceId;
}

/// An oriented triangular hull face.
///
/// The vertex order `(a, b, c)` is counter-clockwise when seen from
/// outside; the cached normal is `(b - a) x (c - a)` and is not normalized.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Face {
    vertices: [usize; 3],
    normal: Vector3,
}

impl Face {
    /// Creates the face `(a, b, c)` over `points`, deriving its normal.
    ///
    /// # Panics
    ///
    /// Panics if an index is out of bounds for `points`.
    #[must_use]
    pub fn new(points: &[Point3], a: usize, b: usize, c: usize) -> Self {
        Self {
            vertices: [a, b, c],
            normal: triangle_normal(&points[a], &points[b], &points[c]),
        }
    }

    /// The vertex indices in boundary order.
    #[must_use]
    pub fn vertices(&self) -> [usize; 3] {
        self.vertices
    }

    /// The unnormalized outward normal.
    #[must_use]
    pub fn normal(&self) -> &Vector3 {
        &self.normal
    }

    /// The three directed boundary edges `a→b`, `b→c`, `c→a`.
    #[must_use]
    pub fn edges(&self) -> [DirectedEdge; 3] {
        let [a, b, c] = self.vertices;
        [
            DirectedEdge::new(a, b),
            DirectedEdge::new(b, c),
            DirectedEdge::new(c, a),
        ]
    }

    /// The three undirected edges, each as `(min, max)`.
    #[must_use]
    pub fn undirected_edges(&self) -> [(usize, usize); 3] {
        self.edges().map(DirectedEdge::undirected)
    }

    /// Signed distance of `p` to this face's plane (scaled by the normal length).
    #[must_use]
    pub fn signed_distance(&self, points: &[Point3], p: &Point3) -> f64 {
        signed_distance(p, &points[self.vertices[0]], &self.normal)
    }

    /// Returns `true` when `p` lies strictly outside the face plane, beyond `eps`.
    #[must_use]
    pub fn is_visible_from(&self, points: &[Point3], p: &Point3, eps: f64) -> bool {
        self.signed_distance(points, p) > eps
    }

    /// The vertex triple rotated so the smallest index comes first.
    ///
    /// Orientation is preserved, so two faces are the same oriented triangle
    /// exactly when their canonical triples are equal.
    #[must_use]
    pub fn canonical(&self) -> [usize; 3] {
        let [a, b, c] = self.vertices;
        if a <= b && a <= c {
            [a, b, c]
        } else if b <= a && b <= c {
            [b, c, a]
        } else {
            [c, a, b]
        }
    }

    /// Returns `true` if `index` is one of the face's vertices.
    #[must_use]
    pub fn contains_vertex(&self, index: usize) -> bool {
        self.vertices.contains(&index)
    }
}
