pub mod edge;
pub mod face;
pub mod hull;

pub use edge::{DirectedEdge, EdgeOwnership};
pub use face::{Face, FaceId};
pub use hull::ConvexHull;

use crate::error::InvariantViolation;
use slotmap::SlotMap;

/// Arena owning the live faces of a hull under construction, together
/// with the directed-edge ownership map.
///
/// Faces reference points by index and each other only through the edge
/// map, so there is no pointer graph to keep consistent.
#[derive(Debug, Default, Clone)]
pub struct FaceStore {
    faces: SlotMap<FaceId, Face>,
    edges: EdgeOwnership,
}

impl FaceStore {
    /// Creates a new, empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a face and claims its directed edges.
    ///
    /// # Errors
    ///
    /// Returns [`InvariantViolation::EdgeAlreadyOwned`] if another face
    /// already owns one of its edges; the store is left unchanged.
    pub fn add_face(&mut self, face: Face) -> Result<FaceId, InvariantViolation> {
        let id = self.faces.insert(face);
        if let Err(err) = self.edges.claim(id, &face) {
            self.faces.remove(id);
            return Err(err);
        }
        Ok(id)
    }

    /// Inserts a face, taking its directed edges over from their previous owners.
    pub fn add_face_replacing(&mut self, face: Face) -> FaceId {
        let id = self.faces.insert(face);
        self.edges.claim_replacing(id, &face);
        id
    }

    /// Removes a face and releases the edges it still owns.
    pub fn remove_face(&mut self, id: FaceId) -> Option<Face> {
        let face = self.faces.remove(id)?;
        self.edges.release(id, &face);
        Some(face)
    }

    /// Returns the face, or an error if it is not in the store.
    ///
    /// # Errors
    ///
    /// Returns [`InvariantViolation::FaceNotFound`] for unknown or removed ids.
    pub fn face(&self, id: FaceId) -> Result<&Face, InvariantViolation> {
        self.faces
            .get(id)
            .ok_or_else(|| InvariantViolation::FaceNotFound(format!("{id:?}")))
    }

    /// Returns `true` if the face is in the store.
    #[must_use]
    pub fn contains(&self, id: FaceId) -> bool {
        self.faces.contains_key(id)
    }

    /// The face owning `edge`, if any.
    #[must_use]
    pub fn edge_owner(&self, edge: DirectedEdge) -> Option<FaceId> {
        self.edges.owner(edge)
    }

    /// Returns `true` if some face owns `edge`.
    #[must_use]
    pub fn is_edge_owned(&self, edge: DirectedEdge) -> bool {
        self.edges.is_owned(edge)
    }

    /// Iterates over `(id, face)` pairs in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (FaceId, &Face)> {
        self.faces.iter()
    }

    /// The ids of all faces, in slot order.
    #[must_use]
    pub fn ids(&self) -> Vec<FaceId> {
        self.faces.keys().collect()
    }

    /// Copies of all faces, in slot order.
    #[must_use]
    pub fn faces(&self) -> Vec<Face> {
        self.faces.values().copied().collect()
    }

    /// Keeps only the faces for which `keep` returns `true`, releasing the
    /// edges of the others.
    pub fn retain(&mut self, mut keep: impl FnMut(FaceId, &Face) -> bool) {
        let doomed: Vec<FaceId> = self
            .faces
            .iter()
            .filter(|(id, face)| !keep(*id, *face))
            .map(|(id, _)| id)
            .collect();
        for id in doomed {
            self.remove_face(id);
        }
    }

    /// Number of faces.
    #[must_use]
    pub fn len(&self) -> usize {
        self.faces.len()
    }

    /// Returns `true` if the store holds no face.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// Number of owned directed edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Removes every face and edge.
    pub fn clear(&mut self) {
        self.faces.clear();
        self.edges.clear();
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::Point3;

    fn tetrahedron() -> Vec<Point3> {
        vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(0.0, 0.0, 1.0),
        ]
    }

    #[test]
    fn add_and_remove_faces() {
        let pts = tetrahedron();
        let mut store = FaceStore::new();
        let id = store.add_face(Face::new(&pts, 0, 2, 1)).unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store.edge_count(), 3);
        assert_eq!(store.edge_owner(DirectedEdge::new(2, 1)), Some(id));

        let removed = store.remove_face(id).unwrap();
        assert_eq!(removed.vertices(), [0, 2, 1]);
        assert!(store.is_empty());
        assert_eq!(store.edge_count(), 0);
        assert!(store.face(id).is_err());
        assert!(store.remove_face(id).is_none());
    }

    #[test]
    fn rejected_face_leaves_store_unchanged() {
        let pts = tetrahedron();
        let mut store = FaceStore::new();
        store.add_face(Face::new(&pts, 0, 2, 1)).unwrap();
        assert!(store.add_face(Face::new(&pts, 2, 1, 3)).is_err());
        assert_eq!(store.len(), 1);
        assert_eq!(store.edge_count(), 3);
    }

    #[test]
    fn retain_releases_dropped_faces() {
        let pts = tetrahedron();
        let mut store = FaceStore::new();
        store.add_face(Face::new(&pts, 0, 2, 1)).unwrap();
        store.add_face(Face::new(&pts, 0, 1, 3)).unwrap();
        store.add_face(Face::new(&pts, 1, 2, 3)).unwrap();
        store.add_face(Face::new(&pts, 0, 3, 2)).unwrap();
        assert_eq!(store.edge_count(), 12);

        store.retain(|_, face| !face.contains_vertex(3));
        assert_eq!(store.len(), 1);
        assert_eq!(store.edge_count(), 3);
        assert!(store.is_edge_owned(DirectedEdge::new(0, 2)));
        assert!(!store.is_edge_owned(DirectedEdge::new(1, 3)));
    }
}
