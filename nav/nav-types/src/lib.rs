//! Core types for waypoint navigation in 3D world space.
//!
//! This crate provides the foundational value types for the navigation
//! domain, independent of any particular graph structure:
//!
//! - **Paths**: An immutable sequence of world positions produced by a
//!   pathfinding query ([`GridPath`])
//! - **Dimensions**: The axis-aligned spread of a set of waypoints
//!   ([`Dimensions`])
//! - **Tolerances**: The shared position-equality epsilon used for both
//!   nearest-point queries and coincident-point merging
//!   ([`POSITION_EPSILON`])
//!
//! # Example
//!
//! ```
//! use nav_types::{GridPath, Dimensions};
//! use nalgebra::Point3;
//!
//! let path = GridPath::new(vec![
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(3.0, 4.0, 0.0),
//! ]);
//! assert!((path.length() - 5.0).abs() < 1e-10);
//!
//! let bounds = Dimensions::from_points(path.points().iter().copied()).unwrap();
//! assert_eq!(bounds.size().x, 3.0);
//! ```
//!
//! # Feature Flags
//!
//! - `serde`: Enables serialization/deserialization for all types

#![doc(html_root_url = "https://docs.rs/nav-types/0.7.0")]
#![deny(clippy::unwrap_used, clippy::expect_used)]

pub mod dimensions;
pub mod path;

pub use dimensions::Dimensions;
pub use path::GridPath;

use nalgebra::Point3;

/// Tolerance for treating two world positions as the same point.
///
/// This single constant is used everywhere position identity matters:
/// merging coincident points when grids are combined, and position
/// equality checks in callers. Keeping one shared epsilon guarantees
/// that a point considered "coincident" by a merge is also considered
/// equal by any follow-up query.
pub const POSITION_EPSILON: f64 = 1e-4;

/// Returns `true` if two world positions coincide within [`POSITION_EPSILON`].
///
/// The comparison is componentwise, matching the tolerance used by
/// grid merging.
///
/// # Example
///
/// ```
/// use nav_types::positions_equal;
/// use nalgebra::Point3;
///
/// let a = Point3::new(1.0, 2.0, 3.0);
/// let b = Point3::new(1.0 + 1e-6, 2.0, 3.0);
/// assert!(positions_equal(&a, &b));
///
/// let c = Point3::new(1.1, 2.0, 3.0);
/// assert!(!positions_equal(&a, &c));
/// ```
#[must_use]
pub fn positions_equal(a: &Point3<f64>, b: &Point3<f64>) -> bool {
    (a.x - b.x).abs() <= POSITION_EPSILON
        && (a.y - b.y).abs() <= POSITION_EPSILON
        && (a.z - b.z).abs() <= POSITION_EPSILON
}
