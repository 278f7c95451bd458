//! Initial configurations: the seed face for gift wrapping and the seed
//! tetrahedron for incremental insertion.

mod seed_tetrahedron;
mod seed_triangle;

pub use seed_tetrahedron::InitialTetrahedron;
pub use seed_triangle::InitialFace;

use crate::error::{DegenerateInputError, Result};
use crate::math::{cmp_zxy, is_zero, signed_volume, Point3};

/// Minimum number of distinct points spanning a 3D hull.
pub const MIN_POINTS: usize = 4;

/// Returns the indices of the usable points in input order.
///
/// Points that coincide with an earlier point within `eps` (per coordinate)
/// are dropped; the lowest index of each cluster survives.
///
/// # Errors
///
/// Returns [`DegenerateInputError::NonFinite`] for a NaN or infinite
/// coordinate, and [`DegenerateInputError::TooFewPoints`] when fewer than
/// [`MIN_POINTS`] distinct points remain.
pub fn usable_order(points: &[Point3], eps: f64) -> Result<Vec<usize>> {
    if let Some(index) = points.iter().position(|p| !p.coords.iter().all(|c| c.is_finite())) {
        return Err(DegenerateInputError::NonFinite { index }.into());
    }

    let n = points.len();
    let mut sorted: Vec<usize> = (0..n).collect();
    sorted.sort_by(|&i, &j| cmp_zxy(&points[i], &points[j]).then(i.cmp(&j)));

    // Near-coincident points are within eps in z, so only a thin slab of
    // the sorted order has to be compared against each point.
    let mut duplicate = vec![false; n];
    for (s, &i) in sorted.iter().enumerate() {
        for &j in &sorted[s + 1..] {
            if points[j].z - points[i].z > eps {
                break;
            }
            if is_zero(&(points[j] - points[i]), eps) {
                duplicate[i.max(j)] = true;
            }
        }
    }

    let order: Vec<usize> = (0..n).filter(|&i| !duplicate[i]).collect();
    if order.len() < MIN_POINTS {
        return Err(DegenerateInputError::TooFewPoints {
            required: MIN_POINTS,
            found: order.len(),
        }
        .into());
    }
    Ok(order)
}

/// Swaps candidates forward until `order[..4]` spans a tetrahedron:
/// pairwise distinct, not collinear, not coplanar.
///
/// Only the first qualifying candidate is moved at each stage, so the rest
/// of the order keeps its relative sequence as far as possible.
///
/// # Errors
///
/// Returns [`DegenerateInputError`] when no such four points exist.
pub fn span_tetrahedron(points: &[Point3], order: &mut [usize], eps: f64) -> Result<()> {
    if order.len() < MIN_POINTS {
        return Err(DegenerateInputError::TooFewPoints {
            required: MIN_POINTS,
            found: order.len(),
        }
        .into());
    }
    let p0 = points[order[0]];

    let distinct = (1..order.len())
        .find(|&k| !is_zero(&(points[order[k]] - p0), eps))
        .ok_or(DegenerateInputError::TooFewPoints {
            required: MIN_POINTS,
            found: 1,
        })?;
    order.swap(1, distinct);
    let p1 = points[order[1]];

    let off_line = (2..order.len())
        .find(|&k| !is_zero(&(p1 - p0).cross(&(points[order[k]] - p0)), eps))
        .ok_or(DegenerateInputError::Collinear)?;
    order.swap(2, off_line);
    let p2 = points[order[2]];

    let off_plane = (3..order.len())
        .find(|&k| signed_volume(&p0, &p1, &p2, &points[order[k]]).abs() > eps)
        .ok_or(DegenerateInputError::Coplanar)?;
    order.swap(3, off_plane);
    Ok(())
}
