//! Convex hulls of 3D point sets, built by gift wrapping or by
//! incremental insertion, either in one call or one step at a time.
//!
//! ```no_run
//! use hullwright::{convex_hull, Algorithm, HullConfig, Point3};
//!
//! let points = vec![
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(1.0, 0.0, 0.0),
//!     Point3::new(0.0, 1.0, 0.0),
//!     Point3::new(0.0, 0.0, 1.0),
//!     Point3::new(0.2, 0.2, 0.2),
//! ];
//! let hull = convex_hull(&points, Algorithm::RandomizedIncremental, &HullConfig::default())?;
//! assert_eq!(hull.face_count(), 4);
//! # Ok::<(), hullwright::HullError>(())
//! ```

pub mod config;
pub mod error;
pub mod math;
pub mod operations;
pub mod stepper;
pub mod tessellation;
pub mod topology;

pub use config::HullConfig;
pub use error::{HullError, Result};
pub use math::Point3;
pub use operations::{convex_hull, Algorithm, HullEngine};
pub use stepper::HullStepper;
pub use topology::ConvexHull;
