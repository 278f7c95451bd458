use tracing::{debug, info, trace, warn};

use crate::config::HullConfig;
use crate::error::{InvariantViolation, PreconditionError, Result};
use crate::math::Point3;
use crate::operations::hinge::select_wrap_point;
use crate::operations::query::IsValid;
use crate::operations::seed::{usable_order, InitialFace};
use crate::operations::{Algorithm, HullEngine, StepReport};
use crate::topology::{ConvexHull, Face, FaceId, FaceStore};

/// Gift-wrapping hull construction.
///
/// Starts from a single supporting face and repeatedly closes the open
/// edges of the oldest unprocessed face by rotating a plane around them.
/// Each step processes one face; the run ends when every face has been
/// processed, at which point no edge is open.
#[derive(Debug, Clone)]
pub struct GiftWrap {
    points: Vec<Point3>,
    order: Vec<usize>,
    store: FaceStore,
    worklist: Vec<FaceId>,
    cursor: usize,
    epsilon: f64,
    verify_steps: bool,
    last_step: StepReport,
}

impl GiftWrap {
    /// Builds the seed face over `points`.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the points do not
    /// span a volume.
    pub fn new(points: Vec<Point3>, config: &HullConfig) -> Result<Self> {
        config.validate()?;
        let epsilon = config.epsilon;
        let mut order = usable_order(&points, epsilon)?;
        let seed = InitialFace::new()
            .with_epsilon(epsilon)
            .execute(&points, &mut order)?;

        let mut store = FaceStore::new();
        let id = store.add_face(seed)?;
        debug!(face = ?seed.vertices(), points = order.len(), "gift wrap seeded");

        Ok(Self {
            points,
            order,
            store,
            worklist: vec![id],
            cursor: 0,
            epsilon,
            verify_steps: config.verify_steps,
            last_step: StepReport {
                removed: Vec::new(),
                created: vec![seed],
            },
        })
    }

    /// Finds the face closing the open edge `a → b` of `face`.
    fn wrap_edge(&self, face: &Face, a: usize, b: usize) -> Result<Face> {
        let chosen = select_wrap_point(
            &self.points,
            &self.order,
            a,
            b,
            face.normal(),
            self.epsilon,
        );
        let Some(c) = chosen else {
            warn!(from = a, to = b, "no wrap candidate");
            return Err(InvariantViolation::NoWrapCandidate { from: a, to: b }.into());
        };
        trace!(from = a, to = b, chosen = c, "wrapped edge");
        Ok(Face::new(&self.points, b, a, c))
    }
}

impl HullEngine for GiftWrap {
    fn algorithm(&self) -> Algorithm {
        Algorithm::GiftWrapping
    }

    fn step(&mut self) -> Result<()> {
        if self.is_finished() {
            return Err(PreconditionError::Finished.into());
        }
        self.last_step.clear();

        let face = *self.store.face(self.worklist[self.cursor])?;
        for edge in face.edges() {
            if self.store.is_edge_owned(edge.reversed()) {
                continue;
            }
            let new_face = self.wrap_edge(&face, edge.from, edge.to)?;
            let id = self.store.add_face(new_face).inspect_err(|err| {
                warn!(%err, face = ?new_face.vertices(), "wrapped face overlaps the hull");
            })?;
            self.worklist.push(id);
            self.last_step.created.push(new_face);
        }

        if self.verify_steps {
            IsValid::new(&self.points, &self.last_step.created)
                .with_epsilon(self.epsilon)
                .check_convexity(self.order.iter().copied())
                .inspect_err(|err| warn!(%err, "wrapped face is not supporting"))?;
        }

        self.cursor += 1;
        debug!(
            cursor = self.cursor,
            created = self.last_step.created.len(),
            faces = self.store.len(),
            "gift wrap step"
        );
        if self.is_finished() {
            info!(
                algorithm = %Algorithm::GiftWrapping,
                points = self.points.len(),
                faces = self.store.len(),
                "hull complete"
            );
        }
        Ok(())
    }

    fn is_finished(&self) -> bool {
        self.cursor == self.worklist.len()
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
        self.worklist
            .iter()
            .filter_map(|&id| self.store.face(id).ok().copied())
            .collect()
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
        let faces = self.faces();
        ConvexHull::new(self.points, faces)
    }
}
