//! Waypoint navigation grid for AI movement in 3D scenes.
//!
//! A [`NavGrid`] is a set of connected waypoints embedded in world
//! space. An agent picks a destination waypoint, asks the grid for a
//! path, and receives an ordered sequence of world positions
//! ([`nav_types::GridPath`]) to traverse.
//!
//! # Overview
//!
//! - **Connectivity**: symmetric, idempotent [`NavGrid::connect`] /
//!   [`NavGrid::disconnect`] edges between waypoints
//! - **Spatial queries**: [`NavGrid::nearest_point`],
//!   [`NavGrid::furthest_point`], [`NavGrid::random_point`], and
//!   [`NavGrid::nearest_position`] (projection onto connecting segments)
//! - **Pathfinding**: [`NavGrid::path`], an unweighted breadth-first
//!   search minimizing hop count
//! - **Merging**: [`NavGrid::combine`] absorbs another grid and unifies
//!   spatially coincident waypoints
//!
//! # Quick Start
//!
//! ```
//! use nav_grid::NavGrid;
//! use nalgebra::Point3;
//!
//! // Author a small network.
//! let mut grid = NavGrid::new();
//! let dock = grid.insert(Point3::new(0.0, 0.0, 0.0));
//! let gate = grid.insert(Point3::new(5.0, 0.0, 0.0));
//! let tower = grid.insert(Point3::new(5.0, 5.0, 0.0));
//! grid.connect(dock, gate).unwrap();
//! grid.connect(gate, tower).unwrap();
//!
//! // Route an agent from the dock to the tower.
//! let path = grid.path(dock, tower).unwrap();
//! assert_eq!(path.len(), 3);
//! assert!((path.length() - 10.0).abs() < 1e-10);
//!
//! // Snap an off-grid position onto the network.
//! let snapped = grid.nearest_position(Point3::new(2.0, 1.0, 0.0)).unwrap();
//! assert!((snapped - Point3::new(2.0, 0.0, 0.0)).norm() < 1e-10);
//! ```
//!
//! # Design Notes
//!
//! Waypoints are owned by their grid and addressed through [`PointId`]
//! handles; connections are id lists, never owning references, so the
//! cyclic connectivity structure cannot form ownership cycles. Paths
//! optimize hop count only — keep waypoint spacing roughly uniform if
//! shortest-distance behavior matters. All operations are synchronous
//! and single-threaded by design; there are no internal locks.
//!
//! # Feature Flags
//!
//! - `serde`: Enables serialization for the `nav-types` value types

#![doc(html_root_url = "https://docs.rs/nav-grid/0.7.0")]
#![deny(clippy::unwrap_used, clippy::expect_used)]

pub mod error;
pub mod grid;
pub mod pathfind;
pub mod point;

pub use error::NavError;
pub use grid::NavGrid;
pub use point::PointId;

// Re-export the value types produced and consumed by the grid.
pub use nav_types::{Dimensions, GridPath, POSITION_EPSILON};
