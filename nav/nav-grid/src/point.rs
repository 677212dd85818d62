//! Waypoint identity and storage.

use nalgebra::Point3;

/// Handle to a waypoint attached to a [`NavGrid`](crate::NavGrid).
///
/// A `PointId` is issued by [`NavGrid::insert`](crate::NavGrid::insert)
/// and carries the identity of the grid that issued it, so an id can
/// never silently resolve against the wrong grid. Ids stay stable for
/// the lifetime of the grid; detaching a point invalidates its id
/// without disturbing any other.
///
/// Connections between waypoints are stored as `PointId`s rather than
/// references, which keeps the cyclic connectivity structure free of
/// ownership cycles: the grid owns the points, and edges are plain data.
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
///
/// assert!(a.same_grid(b));
/// assert_ne!(a, b);
///
/// let other = NavGrid::new();
/// assert!(other.points().all(|p| !p.same_grid(a)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PointId {
    pub(crate) grid: u32,
    pub(crate) index: u32,
}

impl PointId {
    pub(crate) const fn new(grid: u32, index: u32) -> Self {
        Self { grid, index }
    }

    /// Returns `true` if both ids were issued by the same grid.
    ///
    /// This is an identity check on the issuing grid, not a reachability
    /// check: two points of the same grid in disjoint components are
    /// still "same grid".
    #[must_use]
    pub const fn same_grid(self, other: Self) -> bool {
        self.grid == other.grid
    }
}

/// Waypoint storage: a world position plus its adjacency list.
///
/// Owned by the grid's slot arena; the public API works in terms of
/// [`PointId`].
#[derive(Debug, Clone)]
pub(crate) struct GridPoint {
    pub(crate) position: Point3<f64>,
    pub(crate) connections: Vec<PointId>,
}

impl GridPoint {
    pub(crate) const fn new(position: Point3<f64>) -> Self {
        Self {
            position,
            connections: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_grid() {
        let a = PointId::new(0, 0);
        let b = PointId::new(0, 7);
        let c = PointId::new(1, 0);

        assert!(a.same_grid(b));
        assert!(!a.same_grid(c));
    }

    #[test]
    fn test_id_equality_needs_grid_and_index() {
        let a = PointId::new(0, 3);
        let b = PointId::new(1, 3);
        assert_ne!(a, b);
        assert_eq!(a, PointId::new(0, 3));
    }

    #[test]
    fn test_new_point_has_no_connections() {
        let point = GridPoint::new(Point3::new(1.0, 2.0, 3.0));
        assert!(point.connections.is_empty());
    }
}
