use std::collections::HashMap;

use crate::error::InvariantViolation;

use super::face::{Face, FaceId};

/// A directed edge `from → to` between two point indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DirectedEdge {
    pub from: usize,
    pub to: usize,
}

impl DirectedEdge {
    /// Creates the directed edge `from → to`.
    #[must_use]
    pub fn new(from: usize, to: usize) -> Self {
        Self { from, to }
    }

    /// The same edge walked the other way.
    #[must_use]
    pub fn reversed(self) -> Self {
        Self {
            from: self.to,
            to: self.from,
        }
    }

    /// The undirected edge as `(min, max)`.
    #[must_use]
    pub fn undirected(self) -> (usize, usize) {
        (self.from.min(self.to), self.from.max(self.to))
    }
}

/// Records which face currently owns each directed edge.
///
/// A face owns the three edges of its boundary walk. The face owning the
/// reverse of one of them is its neighbour across that edge.
#[derive(Debug, Default, Clone)]
pub struct EdgeOwnership {
    owners: HashMap<DirectedEdge, FaceId>,
}

impl EdgeOwnership {
    /// Creates an empty tracker.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The face owning `edge`, if any.
    #[must_use]
    pub fn owner(&self, edge: DirectedEdge) -> Option<FaceId> {
        self.owners.get(&edge).copied()
    }

    /// Returns `true` if some face owns `edge`.
    #[must_use]
    pub fn is_owned(&self, edge: DirectedEdge) -> bool {
        self.owners.contains_key(&edge)
    }

    /// Registers `id` as the owner of the edges of `face`.
    ///
    /// Nothing is registered when the claim fails.
    ///
    /// # Errors
    ///
    /// Returns [`InvariantViolation::EdgeAlreadyOwned`] if another face
    /// already owns one of the edges.
    pub fn claim(&mut self, id: FaceId, face: &Face) -> Result<(), InvariantViolation> {
        let edges = face.edges();
        if let Some(taken) = edges
            .iter()
            .find(|edge| self.owner(**edge).is_some_and(|owner| owner != id))
        {
            return Err(InvariantViolation::EdgeAlreadyOwned {
                from: taken.from,
                to: taken.to,
            });
        }
        for edge in edges {
            self.owners.insert(edge, id);
        }
        Ok(())
    }

    /// Registers `id` as the owner of the edges of `face`, taking them over
    /// from whichever faces held them before.
    ///
    /// Used where the previous owners have already been marked dead.
    pub fn claim_replacing(&mut self, id: FaceId, face: &Face) {
        for edge in face.edges() {
            self.owners.insert(edge, id);
        }
    }

    /// Drops the edges of `face` that are still owned by `id`.
    pub fn release(&mut self, id: FaceId, face: &Face) {
        for edge in face.edges() {
            if self.owner(edge) == Some(id) {
                self.owners.remove(&edge);
            }
        }
    }

    /// Number of owned directed edges.
    #[must_use]
    pub fn len(&self) -> usize {
        self.owners.len()
    }

    /// Returns `true` if no edge is owned.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.owners.is_empty()
    }

    /// Forgets every owner.
    pub fn clear(&mut self) {
        self.owners.clear();
    }
}
