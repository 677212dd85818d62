//! Fewest-hop pathfinding between waypoints.
//!
//! Paths are found with an unweighted breadth-first search over the
//! connection lists, so the result minimizes the number of edges
//! traversed, not the Euclidean length. Grids meant for
//! shortest-distance travel should keep their waypoints roughly evenly
//! spaced. Traversal state lives entirely inside the call, so queries
//! are reentrant and leave no marks on the grid.

use nalgebra::Point3;
use nav_types::GridPath;
use pathfinding::prelude::bfs;
use tracing::debug;

use crate::error::NavError;
use crate::grid::NavGrid;
use crate::point::PointId;

impl NavGrid {
    /// Finds a fewest-hop path between two waypoints of this grid.
    ///
    /// The search is seeded at the destination and expands outward until
    /// it reaches the source, so the reconstructed position sequence is
    /// ordered from source to destination. Pathfinding from a waypoint
    /// to itself yields a single-point path of length zero. Stale
    /// connection entries (left by detached points) are skipped.
    ///
    /// The returned [`GridPath`] is a value snapshot: it stays valid and
    /// unchanged however the grid is mutated afterwards.
    ///
    /// # Errors
    ///
    /// - [`NavError::NotAttached`] if either endpoint does not resolve
    ///   in this grid (wrong grid, combined away, or detached).
    /// - [`NavError::Unreachable`] if the endpoints lie in disjoint
    ///   connected components.
    ///
    /// # Example
    ///
    /// ```
    /// use nav_grid::NavGrid;
    /// use nalgebra::Point3;
    ///
    /// let mut grid = NavGrid::new();
    /// let a = grid.insert(Point3::new(0.0, 0.0, 0.0));
    /// let b = grid.insert(Point3::new(1.0, 0.0, 0.0));
    /// let c = grid.insert(Point3::new(2.0, 0.0, 0.0));
    /// grid.connect(a, b).unwrap();
    /// grid.connect(b, c).unwrap();
    ///
    /// let path = grid.path(a, c).unwrap();
    /// assert_eq!(path.len(), 3);
    /// assert!((path.length() - 2.0).abs() < 1e-10);
    /// assert_eq!(path.first(), Some(&Point3::new(0.0, 0.0, 0.0)));
    /// assert_eq!(path.last(), Some(&Point3::new(2.0, 0.0, 0.0)));
    /// ```
    pub fn path(&self, from: PointId, to: PointId) -> Result<GridPath, NavError> {
        let source = self.point(from)?.position;
        self.point(to)?;

        if from == to {
            return Ok(GridPath::single(source));
        }

        let visited = bfs(&to, |id| self.live_connections(*id), |id| *id == from);

        match visited {
            Some(mut hops) => {
                hops.reverse();
                let points: Vec<Point3<f64>> = hops
                    .iter()
                    .filter_map(|id| self.point(*id).ok().map(|p| p.position))
                    .collect();
                debug!(hops = points.len(), "found fewest-hop path");
                Ok(GridPath::new(points))
            }
            None => Err(NavError::Unreachable { from, to }),
        }
    }

    /// Live (attached) neighbors of a waypoint, for traversal.
    fn live_connections(&self, id: PointId) -> Vec<PointId> {
        self.point(id).map_or_else(
            |_| Vec::new(),
            |point| {
                point
                    .connections
                    .iter()
                    .copied()
                    .filter(|conn| self.contains(*conn))
                    .collect()
            },
        )
    }
}
