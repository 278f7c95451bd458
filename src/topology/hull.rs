use std::collections::{BTreeSet, HashSet};

use crate::math::{Point3, Vector3};
use crate::tessellation::{HullMesh, TessellateHull};

use super::face::Face;

/// A finished convex hull: the input points and the outward-oriented faces
/// over them.
#[derive(Debug, Clone)]
pub struct ConvexHull {
    points: Vec<Point3>,
    faces: Vec<Face>,
}

impl ConvexHull {
    /// Wraps a finished face set.
    #[must_use]
    pub fn new(points: Vec<Point3>, faces: Vec<Face>) -> Self {
        Self { points, faces }
    }

    /// All input points, including those strictly inside the hull.
    #[must_use]
    pub fn points(&self) -> &[Point3] {
        &self.points
    }

    /// The hull faces.
    #[must_use]
    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    /// Face vertex triples as indices into [`points`](Self::points).
    #[must_use]
    pub fn indices(&self) -> Vec<[usize; 3]> {
        self.faces.iter().map(Face::vertices).collect()
    }

    /// Unnormalized outward face normals, parallel to [`faces`](Self::faces).
    #[must_use]
    pub fn normals(&self) -> Vec<Vector3> {
        self.faces.iter().map(|f| *f.normal()).collect()
    }

    /// Sorted indices of the points used by at least one face.
    #[must_use]
    pub fn vertex_indices(&self) -> Vec<usize> {
        let set: BTreeSet<usize> = self.faces.iter().flat_map(Face::vertices).collect();
        set.into_iter().collect()
    }

    /// Distinct undirected edges, each as `(min, max)`, sorted.
    #[must_use]
    pub fn undirected_edges(&self) -> Vec<(usize, usize)> {
        let set: BTreeSet<(usize, usize)> = self
            .faces
            .iter()
            .flat_map(Face::undirected_edges)
            .collect();
        set.into_iter().collect()
    }

    /// Canonical oriented triples (smallest index first), sorted.
    ///
    /// Two hulls over the same points have the same triangulation exactly
    /// when these are equal.
    #[must_use]
    pub fn canonical_faces(&self) -> Vec<[usize; 3]> {
        let mut faces: Vec<[usize; 3]> = self.faces.iter().map(Face::canonical).collect();
        faces.sort_unstable();
        faces
    }

    /// Number of hull vertices.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.faces
            .iter()
            .flat_map(Face::vertices)
            .collect::<HashSet<_>>()
            .len()
    }

    /// Number of undirected hull edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.faces
            .iter()
            .flat_map(Face::undirected_edges)
            .collect::<HashSet<_>>()
            .len()
    }

    /// Number of faces.
    #[must_use]
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Render buffers for the hull.
    #[must_use]
    pub fn mesh(&self) -> HullMesh {
        TessellateHull::new(&self.faces).execute(&self.points)
    }

    /// `V - E + F`; equals 2 for every closed hull.
    #[must_use]
    #[allow(clippy::cast_possible_wrap)]
    pub fn euler_characteristic(&self) -> i64 {
        self.vertex_count() as i64 - self.edge_count() as i64 + self.face_count() as i64
    }
}
