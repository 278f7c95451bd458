//! Incremental insertion engines.
//!
//! Both engines start from a seed tetrahedron and insert one point per
//! step, replacing the faces the point sees by a fan of faces around the
//! horizon. [`Incremental`] finds the visible faces by scanning the whole
//! hull; [`RandomizedIncremental`] shuffles the insertion order and keeps
//! point/face conflict lists so each insertion only touches what it sees.

mod naive;
mod randomized;

pub use naive::Incremental;
pub use randomized::{FaceStatus, RandomizedIncremental};

use tracing::debug;

use crate::config::HullConfig;
use crate::error::Result;
use crate::math::Point3;
use crate::operations::seed::{usable_order, InitialTetrahedron};
use crate::topology::{Face, FaceId, FaceStore};

/// Number of points consumed by the seed tetrahedron.
const SEED_POINTS: usize = 4;

/// Validates `config`, orders the usable points with a spanning
/// tetrahedron in front and stores its four faces.
fn seed(points: &[Point3], config: &HullConfig) -> Result<(Vec<usize>, FaceStore, Vec<(FaceId, Face)>)> {
    config.validate()?;
    let mut order = usable_order(points, config.epsilon)?;
    let faces = InitialTetrahedron::new()
        .with_epsilon(config.epsilon)
        .execute(points, &mut order)?;

    let mut store = FaceStore::new();
    let mut seeded = Vec::with_capacity(faces.len());
    for face in faces {
        seeded.push((store.add_face(face)?, face));
    }
    debug!(seed = ?&order[..SEED_POINTS], points = order.len(), "tetrahedron seeded");
    Ok((order, store, seeded))
}
