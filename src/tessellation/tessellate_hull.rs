use std::collections::BTreeSet;

use crate::math::{Point3, Vector3};
use crate::topology::Face;

use super::HullMesh;

/// Converts a face set into flat render buffers.
pub struct TessellateHull<'a> {
    faces: &'a [Face],
    highlighted: &'a [Face],
}

impl<'a> TessellateHull<'a> {
    /// Creates a new `TessellateHull` operation over `faces`.
    #[must_use]
    pub fn new(faces: &'a [Face]) -> Self {
        Self {
            faces,
            highlighted: &[],
        }
    }

    /// Sets faces to emit into the highlighted buffer.
    #[must_use]
    pub fn with_highlighted(mut self, highlighted: &'a [Face]) -> Self {
        self.highlighted = highlighted;
        self
    }

    /// Executes the tessellation against the points the faces index.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn execute(&self, points: &[Point3]) -> HullMesh {
        let positions = points
            .iter()
            .flat_map(|p| [p.x as f32, p.y as f32, p.z as f32])
            .collect();

        let face_normals = self
            .faces
            .iter()
            .map(|face| {
                let n = face.normal().try_normalize(0.0).unwrap_or_else(Vector3::zeros);
                [n.x as f32, n.y as f32, n.z as f32]
            })
            .collect();

        let edges: BTreeSet<(usize, usize)> =
            self.faces.iter().flat_map(Face::undirected_edges).collect();

        HullMesh {
            positions,
            triangles: triangles(self.faces),
            face_normals,
            edges: edges
                .into_iter()
                .map(|(a, b)| [a as u32, b as u32])
                .collect(),
            highlighted: triangles(self.highlighted),
        }
    }
}

#[allow(clippy::cast_possible_truncation)]
fn triangles(faces: &[Face]) -> Vec<[u32; 3]> {
    faces
        .iter()
        .map(|face| face.vertices().map(|i| i as u32))
        .collect()
}
