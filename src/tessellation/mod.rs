mod tessellate_hull;

pub use tessellate_hull::TessellateHull;

/// Flat render buffers for a hull snapshot.
///
/// Indices refer to points in `positions`, which holds every input point
/// so unprocessed points can be drawn as well.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HullMesh {
    /// Point coordinates, three floats per point.
    pub positions: Vec<f32>,
    /// Triangle indices (each triple is one outward-wound face).
    pub triangles: Vec<[u32; 3]>,
    /// Unit normal of each triangle, parallel to `triangles`.
    pub face_normals: Vec<[f32; 3]>,
    /// Distinct undirected wireframe edges.
    pub edges: Vec<[u32; 2]>,
    /// Triangles to draw highlighted, such as the faces just removed.
    pub highlighted: Vec<[u32; 3]>,
}

impl HullMesh {
    /// Number of points in `positions`.
    #[must_use]
    pub fn point_count(&self) -> usize {
        self.positions.len() / 3
    }

    /// The triangle indices as one flat buffer.
    #[must_use]
    pub fn triangle_indices(&self) -> Vec<u32> {
        self.triangles.iter().flatten().copied().collect()
    }

    /// The wireframe edge indices as one flat buffer.
    #[must_use]
    pub fn edge_indices(&self) -> Vec<u32> {
        self.edges.iter().flatten().copied().collect()
    }
}
