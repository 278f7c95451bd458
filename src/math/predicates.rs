use std::cmp::Ordering;

use super::{Point3, Vector3};

/// Returns `true` when every coordinate of `v` is within `eps` of zero.
///
/// This is a per-coordinate test, not a length threshold.
#[must_use]
pub fn is_zero(v: &Vector3, eps: f64) -> bool {
    v.x.abs() <= eps && v.y.abs() <= eps && v.z.abs() <= eps
}

/// Unnormalized normal of the triangle `(a, b, c)`: `(b - a) x (c - a)`.
///
/// Points towards the side from which the vertices appear counter-clockwise.
#[must_use]
pub fn triangle_normal(a: &Point3, b: &Point3, c: &Point3) -> Vector3 {
    (b - a).cross(&(c - a))
}

/// Signed distance of `p` to the plane through `origin` with (unnormalized)
/// `normal`. Positive on the side the normal points to.
#[must_use]
pub fn signed_distance(p: &Point3, origin: &Point3, normal: &Vector3) -> f64 {
    (p - origin).dot(normal)
}

/// Six times the signed volume of the tetrahedron `(a, b, c, d)`.
///
/// Positive when `d` lies on the normal side of triangle `(a, b, c)`.
#[must_use]
pub fn signed_volume(a: &Point3, b: &Point3, c: &Point3, d: &Point3) -> f64 {
    signed_distance(d, a, &triangle_normal(a, b, c))
}

/// Lexicographic comparison by `(z, x, y)`.
///
/// Uses [`f64::total_cmp`] so the order is total even for signed zeros.
#[must_use]
pub fn cmp_zxy(a: &Point3, b: &Point3) -> Ordering {
    a.z.total_cmp(&b.z)
        .then_with(|| a.x.total_cmp(&b.x))
        .then_with(|| a.y.total_cmp(&b.y))
}
