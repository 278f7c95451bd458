use tracing::{debug, info, warn};

use crate::config::HullConfig;
use crate::error::{PreconditionError, Result};
use crate::math::Point3;
use crate::operations::query::IsValid;
use crate::operations::{Algorithm, HullEngine, StepReport};
use crate::topology::{ConvexHull, Face, FaceId, FaceStore};

use super::{seed, SEED_POINTS};

/// Incremental hull construction in fixed insertion order.
///
/// Each step inserts the next point of the order: every face it sees is
/// removed, and every surviving edge left without a neighbour is joined to
/// the point by a new face. Visibility is tested against the whole hull,
/// so a run costs O(n²).
#[derive(Debug, Clone)]
pub struct Incremental {
    points: Vec<Point3>,
    order: Vec<usize>,
    store: FaceStore,
    cursor: usize,
    epsilon: f64,
    verify_steps: bool,
    last_step: StepReport,
}

impl Incremental {
    /// Builds the seed tetrahedron; the remaining points are inserted in
    /// input order.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the points do not
    /// span a volume.
    pub fn new(points: Vec<Point3>, config: &HullConfig) -> Result<Self> {
        let (order, store, seeded) = seed(&points, config)?;
        Ok(Self {
            points,
            order,
            store,
            cursor: SEED_POINTS,
            epsilon: config.epsilon,
            verify_steps: config.verify_steps,
            last_step: StepReport {
                removed: Vec::new(),
                created: seeded.into_iter().map(|(_, face)| face).collect(),
            },
        })
    }

    /// The point index inserted by the next step, if any.
    #[must_use]
    pub fn next_point(&self) -> Option<usize> {
        self.order.get(self.cursor).copied()
    }
}

impl HullEngine for Incremental {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Incremental
    }

    fn step(&mut self) -> Result<()> {
        let Some(point) = self.next_point() else {
            return Err(PreconditionError::Finished.into());
        };
        self.last_step.clear();
        let apex = self.points[point];

        let visible: Vec<FaceId> = self
            .store
            .iter()
            .filter(|(_, face)| face.is_visible_from(&self.points, &apex, self.epsilon))
            .map(|(id, _)| id)
            .collect();
        for id in visible {
            if let Some(face) = self.store.remove_face(id) {
                self.last_step.removed.push(face);
            }
        }

        // A point inside the hull sees nothing and leaves it untouched.
        if !self.last_step.removed.is_empty() {
            for id in self.store.ids() {
                let face = *self.store.face(id)?;
                for edge in face.edges() {
                    if self.store.is_edge_owned(edge.reversed()) {
                        continue;
                    }
                    let new_face = Face::new(&self.points, edge.to, edge.from, point);
                    self.store.add_face(new_face).inspect_err(|err| {
                        warn!(%err, point, "horizon face overlaps the hull");
                    })?;
                    self.last_step.created.push(new_face);
                }
            }
        }

        self.cursor += 1;
        if self.verify_steps {
            let faces = self.store.faces();
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
            "incremental step"
        );
        if self.is_finished() {
            info!(
                algorithm = %Algorithm::Incremental,
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
        self.store.faces()
    }

    fn face_count(&self) -> usize {
        self.store.len()
    }

    fn last_step(&self) -> &StepReport {
        &self.last_step
    }

    fn clear_removed_faces(&mut self) {
        self.last_step.removed.clear();
    }

    fn into_hull(self) -> ConvexHull {
        let faces = self.store.faces();
        ConvexHull::new(self.points, faces)
    }
}
