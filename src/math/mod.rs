pub mod predicates;

pub use predicates::{
    cmp_zxy, is_zero, signed_distance, signed_volume, triangle_normal,
};

/// 3D point type.
pub type Point3 = nalgebra::Point3<f64>;

/// 3D vector type.
pub type Vector3 = nalgebra::Vector3<f64>;

/// Default tolerance for the geometric predicates.
///
/// Normals are unnormalized cross products, so the tolerance is compared
/// against quantities that scale with the square (or cube) of the input
/// coordinates.
pub const DEFAULT_EPSILON: f64 = 1e-9;
