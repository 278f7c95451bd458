use std::mem;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use slotmap::SecondaryMap;
use tracing::{debug, info, warn};

use crate::config::HullConfig;
use crate::error::{InvariantViolation, PreconditionError, Result};
use crate::math::Point3;
use crate::operations::query::IsValid;
use crate::operations::{Algorithm, HullEngine, StepReport};
use crate::topology::{ConvexHull, Face, FaceId, FaceStore};

use super::{seed, SEED_POINTS};

/// Lifecycle of a face in a randomized run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaceStatus {
    /// Part of the current hull.
    Alive,
    /// Seen by the point inserted at rank `at` and replaced.
    Removed { at: usize },
}

/// Randomized incremental hull construction with conflict lists.
///
/// Points after the seed tetrahedron are inserted in shuffled order. Each
/// live face knows the uninserted points that see it and each point the
/// faces it sees, so an insertion only visits the faces it replaces. A
/// replaced face is marked [`FaceStatus::Removed`] and stays in the store,
/// keeping its edges, until the run completes.
#[derive(Debug, Clone)]
pub struct RandomizedIncremental {
    points: Vec<Point3>,
    order: Vec<usize>,
    store: FaceStore,
    status: SecondaryMap<FaceId, FaceStatus>,
    /// Ranks of the pending points that see each face, ascending.
    face_conflicts: SecondaryMap<FaceId, Vec<usize>>,
    /// Faces seen by the point at each rank; may hold removed faces.
    point_conflicts: Vec<Vec<FaceId>>,
    alive: usize,
    cursor: usize,
    epsilon: f64,
    verify_steps: bool,
    last_step: StepReport,
}

impl RandomizedIncremental {
    /// Builds the seed tetrahedron, shuffles the remaining points and
    /// computes their initial conflicts.
    ///
    /// The shuffle draws from a [`StdRng`] seeded with `config.seed`, or
    /// from the operating system when no seed is set.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the points do not
    /// span a volume.
    pub fn new(points: Vec<Point3>, config: &HullConfig) -> Result<Self> {
        let (mut order, store, seeded) = seed(&points, config)?;
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        order[SEED_POINTS..].shuffle(&mut rng);

        let mut status = SecondaryMap::new();
        let mut face_conflicts = SecondaryMap::new();
        for &(id, _) in &seeded {
            status.insert(id, FaceStatus::Alive);
            face_conflicts.insert(id, Vec::new());
        }
        let mut point_conflicts = vec![Vec::new(); order.len()];
        for (rank, &index) in order.iter().enumerate().skip(SEED_POINTS) {
            for (id, face) in &seeded {
                if face.is_visible_from(&points, &points[index], config.epsilon) {
                    point_conflicts[rank].push(*id);
                    if let Some(list) = face_conflicts.get_mut(*id) {
                        list.push(rank);
                    }
                }
            }
        }

        let mut engine = Self {
            points,
            order,
            store,
            status,
            face_conflicts,
            point_conflicts,
            alive: seeded.len(),
            cursor: SEED_POINTS,
            epsilon: config.epsilon,
            verify_steps: config.verify_steps,
            last_step: StepReport {
                removed: Vec::new(),
                created: seeded.into_iter().map(|(_, face)| face).collect(),
            },
        };
        if engine.is_finished() {
            engine.compact();
        }
        Ok(engine)
    }

    /// The status of a face, or `None` once it has been compacted away.
    #[must_use]
    pub fn face_status(&self, id: FaceId) -> Option<FaceStatus> {
        self.status.get(id).copied()
    }

    fn is_alive(&self, id: FaceId) -> bool {
        self.status.get(id) == Some(&FaceStatus::Alive)
    }

    /// Creates the face bridging horizon `face` to the point at `rank`
    /// across the edge whose other side is `neighbour`.
    fn bridge(&mut self, face: FaceId, neighbour: FaceId, new_face: Face, rank: usize) {
        let id = self.store.add_face_replacing(new_face);
        self.status.insert(id, FaceStatus::Alive);
        self.alive += 1;

        let empty = Vec::new();
        let left = self.face_conflicts.get(face).unwrap_or(&empty);
        let right = self.face_conflicts.get(neighbour).unwrap_or(&empty);
        let conflicts: Vec<usize> = merge_sorted(left, right)
            .into_iter()
            .filter(|&r| {
                r > rank
                    && new_face.is_visible_from(&self.points, &self.points[self.order[r]], self.epsilon)
            })
            .collect();
        for &r in &conflicts {
            self.point_conflicts[r].push(id);
        }
        self.face_conflicts.insert(id, conflicts);
        self.last_step.created.push(new_face);
    }

    /// Drops every removed face from the store.
    fn compact(&mut self) {
        let status = &self.status;
        self.store
            .retain(|id, _| status.get(id) == Some(&FaceStatus::Alive));
        self.status.retain(|_, s| *s == FaceStatus::Alive);
        self.face_conflicts.clear();
        self.point_conflicts = Vec::new();
    }
}

impl HullEngine for RandomizedIncremental {
    fn algorithm(&self) -> Algorithm {
        Algorithm::RandomizedIncremental
    }

    fn step(&mut self) -> Result<()> {
        if self.is_finished() {
            return Err(PreconditionError::Finished.into());
        }
        self.last_step.clear();
        let rank = self.cursor;
        let point = self.order[rank];

        let visible: Vec<FaceId> = mem::take(&mut self.point_conflicts[rank])
            .into_iter()
            .filter(|&id| self.is_alive(id))
            .collect();
        for &id in &visible {
            self.status.insert(id, FaceStatus::Removed { at: rank });
            self.last_step.removed.push(*self.store.face(id)?);
        }
        self.alive -= visible.len();

        for &id in &visible {
            let face = *self.store.face(id)?;
            for edge in face.edges() {
                let Some(neighbour) = self.store.edge_owner(edge.reversed()) else {
                    warn!(from = edge.from, to = edge.to, point, "horizon edge has no neighbour");
                    return Err(InvariantViolation::OpenEdge {
                        from: edge.from,
                        to: edge.to,
                    }
                    .into());
                };
                // Both sides seen: the edge disappears with them.
                if !self.is_alive(neighbour) {
                    continue;
                }
                let new_face = Face::new(&self.points, edge.from, edge.to, point);
                self.bridge(id, neighbour, new_face, rank);
            }
        }
        for &id in &visible {
            self.face_conflicts.remove(id);
        }

        self.cursor += 1;
        if self.verify_steps {
            let faces = self.faces();
            IsValid::new(&self.points, &faces)
                .with_epsilon(self.epsilon)
                .check_convexity(self.order[..self.cursor].iter().copied())
                .inspect_err(|err| warn!(%err, point, "hull lost convexity"))?;
        }

        debug!(
            cursor = self.cursor,
            point,
            removed = self.last_step.removed.len(),
            created = self.last_step.created.len(),
            "randomized step"
        );
        if self.is_finished() {
            self.compact();
            info!(
                algorithm = %Algorithm::RandomizedIncremental,
                points = self.points.len(),
                faces = self.store.len(),
                "hull complete"
            );
        }
        Ok(())
    }

    fn is_finished(&self) -> bool {
        self.cursor >= self.order.len()
    }

    fn points(&self) -> &[Point3] {
        &self.points
    }

    fn order(&self) -> &[usize] {
        &self.order
    }

    fn cursor(&self) -> usize {
        self.cursor
    }

    fn faces(&self) -> Vec<Face> {
        self.store
            .iter()
            .filter(|(id, _)| self.is_alive(*id))
            .map(|(_, face)| *face)
            .collect()
    }

    fn face_count(&self) -> usize {
        self.alive
    }

    fn last_step(&self) -> &StepReport {
        &self.last_step
    }

    fn clear_removed_faces(&mut self) {
        self.last_step.removed.clear();
    }

    fn into_hull(self) -> ConvexHull {
        let faces = self.faces();
        ConvexHull::new(self.points, faces)
    }
}

/// Union of two ascending lists, ascending and without repeats.
fn merge_sorted(a: &[usize], b: &[usize]) -> Vec<usize> {
    let mut merged = Vec::with_capacity(a.len() + b.len());
    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        let next = a[i].min(b[j]);
        if a[i] == next {
            i += 1;
        }
        if b[j] == next {
            j += 1;
        }
        merged.push(next);
    }
    merged.extend_from_slice(&a[i..]);
    merged.extend_from_slice(&b[j..]);
    merged
}
