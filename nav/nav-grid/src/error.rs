//! Error types for navigation grid operations.

use crate::PointId;

/// Errors that can occur during navigation grid operations.
///
/// Every failure mode of the grid is recoverable and surfaced as a value;
/// no operation panics on bad input. Idempotent no-ops (connecting an
/// already-connected pair, disconnecting a non-edge, self-connection) are
/// not errors and succeed silently.
///
/// # Example
///
/// ```
/// use nav_grid::{NavGrid, NavError};
///
/// let grid = NavGrid::new();
/// let result = grid.center();
/// assert!(matches!(result, Err(NavError::EmptyGrid)));
/// ```
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum NavError {
    /// A spatial query was made against a grid with no points.
    ///
    /// Nearest/furthest/random point selection, center, and dimensions
    /// all require at least one attached point.
    #[error("grid has no points")]
    EmptyGrid,

    /// The point id does not resolve in this grid.
    ///
    /// Either the id was issued by a different grid (including a grid
    /// that has since been combined away), or the point was detached.
    #[error("point {0:?} is not attached to this grid")]
    NotAttached(PointId),

    /// Source and destination are attached to this grid but lie in
    /// disjoint connected components.
    ///
    /// Recoverable by the caller, typically by picking a different
    /// destination.
    #[error("no connected route from {from:?} to {to:?}")]
    Unreachable {
        /// The source point of the failed query.
        from: PointId,
        /// The destination point of the failed query.
        to: PointId,
    },
}

impl NavError {
    /// Returns `true` if this is an unreachable-destination error.
    #[must_use]
    pub const fn is_unreachable(&self) -> bool {
        matches!(self, Self::Unreachable { .. })
    }

    /// Returns `true` if this is an empty-grid error.
    #[must_use]
    pub const fn is_empty_grid(&self) -> bool {
        matches!(self, Self::EmptyGrid)
    }
}
