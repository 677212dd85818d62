//! The navigation grid: waypoint ownership, connectivity, and spatial queries.

use std::sync::atomic::{AtomicU32, Ordering};

use nalgebra::{Point3, Vector3};
use nav_types::{positions_equal, Dimensions};
use tracing::debug;

use crate::error::NavError;
use crate::point::{GridPoint, PointId};

static NEXT_GRID_ID: AtomicU32 = AtomicU32::new(0);

/// A collection of waypoints in 3D world space and the connections
/// between them.
///
/// The grid owns its points in a slot arena and hands out [`PointId`]
/// handles; connections are symmetric, deduplicated edges stored as ids
/// on both endpoints. Slots are never reused, so a detached point's id
/// cannot come back to life as a different point.
///
/// Detaching a point ([`remove`](Self::remove)) does **not** sever its
/// edges: neighbors keep a stale id in their connection lists, which is
/// skipped by traversal and merging. Callers wanting a clean grid should
/// [`disconnect`](Self::disconnect) before removing.
///
/// All operations are synchronous and designed for single-threaded use
/// within a frame loop; Rust's borrow rules already serialize mutation
/// and queries on a single grid.
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
/// grid.connect(a, b).unwrap();
///
/// assert!(grid.is_connected(a, b).unwrap());
/// assert!(grid.is_connected(b, a).unwrap());
/// ```
#[derive(Debug)]
pub struct NavGrid {
    /// Identity of this grid, unique within the process.
    id: u32,
    /// Slot arena; `None` marks a detached point. Indices are never reused.
    slots: Vec<Option<GridPoint>>,
    /// Number of live slots.
    live: usize,
}

impl NavGrid {
    /// Creates an empty grid with a fresh identity.
    #[must_use]
    pub fn new() -> Self {
        Self {
            id: NEXT_GRID_ID.fetch_add(1, Ordering::Relaxed),
            slots: Vec::new(),
            live: 0,
        }
    }

    /// Attaches a new waypoint at the given world position.
    ///
    /// The point starts with no connections; edges are established
    /// afterwards with [`connect`](Self::connect). Points may be moved
    /// freely after creation with [`set_position`](Self::set_position)
    /// without disturbing connectivity.
    #[allow(clippy::cast_possible_truncation)]
    pub fn insert(&mut self, position: Point3<f64>) -> PointId {
        let id = PointId::new(self.id, self.slots.len() as u32);
        self.slots.push(Some(GridPoint::new(position)));
        self.live += 1;
        id
    }

    /// Detaches a waypoint, returning its world position.
    ///
    /// Neighbors keep a stale entry for the removed point in their
    /// connection lists; see the type-level docs.
    ///
    /// # Errors
    ///
    /// Returns [`NavError::NotAttached`] if the id does not resolve in
    /// this grid.
    pub fn remove(&mut self, id: PointId) -> Result<Point3<f64>, NavError> {
        if id.grid != self.id {
            return Err(NavError::NotAttached(id));
        }
        let slot = self
            .slots
            .get_mut(id.index as usize)
            .ok_or(NavError::NotAttached(id))?;
        let point = slot.take().ok_or(NavError::NotAttached(id))?;
        self.live -= 1;
        Ok(point.position)
    }

    /// Returns the number of attached waypoints.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.live
    }

    /// Returns `true` if the grid has no attached waypoints.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Returns `true` if the id resolves to an attached waypoint of this
    /// grid.
    #[must_use]
    pub fn contains(&self, id: PointId) -> bool {
        id.grid == self.id
            && self
                .slots
                .get(id.index as usize)
                .is_some_and(Option::is_some)
    }

    /// Returns all attached waypoints in attachment order.
    pub fn points(&self) -> impl Iterator<Item = PointId> + '_ {
        self.entries().map(|(id, _)| id)
    }

    /// Returns the first attached waypoint, if any.
    #[must_use]
    pub fn first_point(&self) -> Option<PointId> {
        self.points().next()
    }

    /// Returns the last attached waypoint, if any.
    #[must_use]
    pub fn last_point(&self) -> Option<PointId> {
        self.points().last()
    }

    /// Returns the world position of a waypoint.
    ///
    /// # Errors
    ///
    /// Returns [`NavError::NotAttached`] if the id does not resolve in
    /// this grid.
    pub fn position(&self, id: PointId) -> Result<Point3<f64>, NavError> {
        Ok(self.point(id)?.position)
    }

    /// Moves a waypoint to a new world position.
    ///
    /// Connections are unaffected.
    ///
    /// # Errors
    ///
    /// Returns [`NavError::NotAttached`] if the id does not resolve in
    /// this grid.
    pub fn set_position(&mut self, id: PointId, position: Point3<f64>) -> Result<(), NavError> {
        self.point_mut(id)?.position = position;
        Ok(())
    }

    /// Returns a waypoint's connection list as stored.
    ///
    /// The list may contain stale ids of points that were detached
    /// without being disconnected first.
    ///
    /// # Errors
    ///
    /// Returns [`NavError::NotAttached`] if the id does not resolve in
    /// this grid.
    pub fn connections(&self, id: PointId) -> Result<&[PointId], NavError> {
        Ok(&self.point(id)?.connections)
    }

    /// Connects two waypoints with a symmetric edge.
    ///
    /// Idempotent: connecting an already-connected pair changes nothing.
    /// Connecting a point to itself is a silent no-op.
    ///
    /// # Errors
    ///
    /// Returns [`NavError::NotAttached`] if either id does not resolve
    /// in this grid.
    pub fn connect(&mut self, a: PointId, b: PointId) -> Result<(), NavError> {
        self.point(a)?;
        self.point(b)?;
        self.link(a.index as usize, b.index as usize);
        Ok(())
    }

    /// Removes the edge between two waypoints, if present.
    ///
    /// Idempotent: disconnecting a non-edge or a point from itself is a
    /// silent no-op.
    ///
    /// # Errors
    ///
    /// Returns [`NavError::NotAttached`] if either id does not resolve
    /// in this grid.
    pub fn disconnect(&mut self, a: PointId, b: PointId) -> Result<(), NavError> {
        self.point(a)?;
        self.point(b)?;
        self.unlink(a.index as usize, b.index as usize);
        Ok(())
    }

    /// Returns `true` if `b` appears in `a`'s connection list.
    ///
    /// `b` does not need to be attached: a stale entry left by a detach
    /// still counts as listed.
    ///
    /// # Errors
    ///
    /// Returns [`NavError::NotAttached`] if `a` does not resolve in this
    /// grid.
    pub fn is_connected(&self, a: PointId, b: PointId) -> Result<bool, NavError> {
        Ok(self.point(a)?.connections.contains(&b))
    }

    /// Returns the attached waypoint nearest to the given world position.
    ///
    /// A single linear scan minimizing squared Euclidean distance; when
    /// several points are equidistant the winner is arbitrary and callers
    /// must not rely on the tie order.
    ///
    /// # Errors
    ///
    /// Returns [`NavError::EmptyGrid`] if the grid has no points.
    ///
    /// # Example
    ///
    /// ```
    /// use nav_grid::NavGrid;
    /// use nalgebra::Point3;
    ///
    /// let mut grid = NavGrid::new();
    /// let origin = grid.insert(Point3::new(0.0, 0.0, 0.0));
    /// grid.insert(Point3::new(10.0, 0.0, 0.0));
    /// grid.insert(Point3::new(0.0, 10.0, 0.0));
    ///
    /// assert_eq!(grid.nearest_point(Point3::new(1.0, 0.0, 0.0)).unwrap(), origin);
    /// ```
    pub fn nearest_point(&self, position: Point3<f64>) -> Result<PointId, NavError> {
        self.scan_points(position, |candidate, best| candidate < best)
    }

    /// Returns the attached waypoint furthest from the given world
    /// position.
    ///
    /// Same tie-break caveat as [`nearest_point`](Self::nearest_point).
    ///
    /// # Errors
    ///
    /// Returns [`NavError::EmptyGrid`] if the grid has no points.
    pub fn furthest_point(&self, position: Point3<f64>) -> Result<PointId, NavError> {
        self.scan_points(position, |candidate, best| candidate > best)
    }

    /// Returns a uniformly random attached waypoint.
    ///
    /// # Errors
    ///
    /// Returns [`NavError::EmptyGrid`] if the grid has no points.
    ///
    /// # Example
    ///
    /// ```
    /// use nav_grid::NavGrid;
    /// use nalgebra::Point3;
    /// use rand::rngs::StdRng;
    /// use rand::SeedableRng;
    ///
    /// let mut grid = NavGrid::new();
    /// grid.insert(Point3::new(0.0, 0.0, 0.0));
    /// grid.insert(Point3::new(1.0, 0.0, 0.0));
    ///
    /// let mut rng = StdRng::seed_from_u64(42);
    /// let id = grid.random_point(&mut rng).unwrap();
    /// assert!(grid.contains(id));
    /// ```
    pub fn random_point<R: rand::Rng>(&self, rng: &mut R) -> Result<PointId, NavError> {
        let ids: Vec<PointId> = self.points().collect();
        if ids.is_empty() {
            return Err(NavError::EmptyGrid);
        }
        Ok(ids[rng.gen_range(0..ids.len())])
    }

    /// Returns the world position on the grid nearest to the given
    /// position.
    ///
    /// The result can lie directly on a waypoint or anywhere along one
    /// of its connecting segments. Only segments incident to the single
    /// nearest waypoint are examined; if the true closest segment hangs
    /// off a different waypoint it is missed. This locality is a
    /// deliberate performance trade-off.
    ///
    /// A waypoint with no live connections yields its own position.
    ///
    /// # Errors
    ///
    /// Returns [`NavError::EmptyGrid`] if the grid has no points.
    ///
    /// # Example
    ///
    /// ```
    /// use nav_grid::NavGrid;
    /// use nalgebra::Point3;
    ///
    /// let mut grid = NavGrid::new();
    /// let a = grid.insert(Point3::new(0.0, 0.0, 0.0));
    /// let b = grid.insert(Point3::new(10.0, 0.0, 0.0));
    /// grid.connect(a, b).unwrap();
    ///
    /// let on_grid = grid.nearest_position(Point3::new(4.0, 3.0, 0.0)).unwrap();
    /// assert!((on_grid - Point3::new(4.0, 0.0, 0.0)).norm() < 1e-10);
    /// ```
    pub fn nearest_position(&self, position: Point3<f64>) -> Result<Point3<f64>, NavError> {
        let nearest = self.nearest_point(position)?;
        let start = self.point(nearest)?.position;

        let mut best = start;
        let mut best_dist = (start - position).norm_squared();

        for &conn in &self.point(nearest)?.connections {
            let Ok(end) = self.position(conn) else {
                continue; // stale entry
            };
            let segment = end - start;
            let denom = segment.dot(&segment);
            if denom <= f64::EPSILON {
                continue; // coincident endpoints, nothing to project onto
            }
            let t = ((position - start).dot(&segment) / denom).clamp(0.0, 1.0);
            let candidate = start + segment * t;
            let dist = (candidate - position).norm_squared();
            if dist < best_dist {
                best_dist = dist;
                best = candidate;
            }
        }

        Ok(best)
    }

    /// Returns the arithmetic mean of all waypoint positions.
    ///
    /// # Errors
    ///
    /// Returns [`NavError::EmptyGrid`] if the grid has no points.
    #[allow(clippy::cast_precision_loss)]
    pub fn center(&self) -> Result<Point3<f64>, NavError> {
        if self.is_empty() {
            return Err(NavError::EmptyGrid);
        }
        let sum = self
            .entries()
            .fold(Vector3::zeros(), |acc, (_, p)| acc + p.position.coords);
        Ok(Point3::from(sum / self.live as f64))
    }

    /// Returns the axis-aligned spread of all waypoint positions.
    ///
    /// # Errors
    ///
    /// Returns [`NavError::EmptyGrid`] if the grid has no points.
    pub fn dimensions(&self) -> Result<Dimensions, NavError> {
        Dimensions::from_points(self.entries().map(|(_, p)| p.position)).ok_or(NavError::EmptyGrid)
    }

    /// Absorbs all of `other`'s waypoints into this grid, merging
    /// coincident points.
    ///
    /// The other grid's points are transferred in their attachment order
    /// with world positions preserved, and their connections are remapped
    /// onto the new ids (stale entries are dropped). Afterwards every
    /// pair of attached points whose positions coincide within
    /// [`nav_types::POSITION_EPSILON`] is merged: the earlier-attached
    /// point survives, inherits the duplicate's connections, and the
    /// duplicate is detached. `other` is left empty, and all ids it
    /// issued stop resolving.
    ///
    /// Deduplication compares every pair of points, so combining is
    /// O(n²) in the combined point count — fine for the intended scale
    /// of tens to low hundreds of waypoints.
    ///
    /// # Example
    ///
    /// ```
    /// use nav_grid::NavGrid;
    /// use nalgebra::Point3;
    ///
    /// let mut west = NavGrid::new();
    /// let a = west.insert(Point3::new(0.0, 0.0, 0.0));
    /// let junction = west.insert(Point3::new(1.0, 0.0, 0.0));
    /// west.connect(a, junction).unwrap();
    ///
    /// let mut east = NavGrid::new();
    /// let dup = east.insert(Point3::new(1.0, 0.0, 0.0));
    /// let b = east.insert(Point3::new(2.0, 0.0, 0.0));
    /// east.connect(dup, b).unwrap();
    ///
    /// west.combine(&mut east);
    /// assert_eq!(west.len(), 3); // the two junction points merged
    /// assert!(east.is_empty());
    /// ```
    pub fn combine(&mut self, other: &mut Self) {
        let mut remap = std::collections::HashMap::new();
        let mut absorbed = Vec::new();

        for (index, slot) in other.slots.iter_mut().enumerate() {
            if let Some(point) = slot.take() {
                #[allow(clippy::cast_possible_truncation)]
                let old = PointId::new(other.id, index as u32);
                let new = self.insert(point.position);
                remap.insert(old, new);
                absorbed.push((new, point.connections));
            }
        }
        other.live = 0;

        // Rewrite the transferred adjacency through the id map. Entries
        // that were already stale in the source grid have no mapping and
        // are dropped here.
        for (new_id, connections) in absorbed {
            let rewritten: Vec<PointId> = connections
                .iter()
                .filter_map(|old| remap.get(old).copied())
                .collect();
            if let Some(point) = self.slots[new_id.index as usize].as_mut() {
                point.connections = rewritten;
            }
        }

        let before = self.live;
        self.merge_coincident();

        debug!(
            absorbed = remap.len(),
            merged = before - self.live,
            "combined grids"
        );
    }

    /// Merges every pair of attached points with coincident positions.
    ///
    /// The earlier-attached point survives and inherits the duplicate's
    /// connections; the duplicate is disconnected from its neighbors and
    /// detached.
    fn merge_coincident(&mut self) {
        let ids: Vec<PointId> = self.points().collect();

        for (i, &keep) in ids.iter().enumerate() {
            if !self.contains(keep) {
                continue;
            }
            for &dup in &ids[i + 1..] {
                if !self.contains(dup) {
                    continue;
                }
                let (a, b) = match (self.position(keep), self.position(dup)) {
                    (Ok(a), Ok(b)) => (a, b),
                    _ => continue,
                };
                if !positions_equal(&a, &b) {
                    continue;
                }

                let neighbors: Vec<PointId> = match self.connections(dup) {
                    Ok(list) => list.to_vec(),
                    Err(_) => continue,
                };
                for neighbor in neighbors {
                    if self.contains(neighbor) {
                        self.link(keep.index as usize, neighbor.index as usize);
                        self.unlink(neighbor.index as usize, dup.index as usize);
                    }
                }
                let _ = self.remove(dup);
            }
        }
    }

    #[allow(clippy::cast_possible_truncation)]
    fn entries(&self) -> impl Iterator<Item = (PointId, &GridPoint)> + '_ {
        self.slots.iter().enumerate().filter_map(|(index, slot)| {
            slot.as_ref()
                .map(|point| (PointId::new(self.id, index as u32), point))
        })
    }

    /// Linear scan for the best point under `better` on squared distance.
    fn scan_points<F>(&self, position: Point3<f64>, better: F) -> Result<PointId, NavError>
    where
        F: Fn(f64, f64) -> bool,
    {
        let mut best: Option<(PointId, f64)> = None;
        for (id, point) in self.entries() {
            let dist = (point.position - position).norm_squared();
            if best.map_or(true, |(_, best_dist)| better(dist, best_dist)) {
                best = Some((id, dist));
            }
        }
        best.map(|(id, _)| id).ok_or(NavError::EmptyGrid)
    }

    pub(crate) fn point(&self, id: PointId) -> Result<&GridPoint, NavError> {
        if id.grid != self.id {
            return Err(NavError::NotAttached(id));
        }
        self.slots
            .get(id.index as usize)
            .and_then(Option::as_ref)
            .ok_or(NavError::NotAttached(id))
    }

    fn point_mut(&mut self, id: PointId) -> Result<&mut GridPoint, NavError> {
        if id.grid != self.id {
            return Err(NavError::NotAttached(id));
        }
        self.slots
            .get_mut(id.index as usize)
            .and_then(Option::as_mut)
            .ok_or(NavError::NotAttached(id))
    }

    /// Adds the symmetric edge between two live slots, skipping
    /// self-edges and existing entries.
    #[allow(clippy::cast_possible_truncation)]
    fn link(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        let a_id = PointId::new(self.id, a as u32);
        let b_id = PointId::new(self.id, b as u32);
        if let Some(point) = self.slots[a].as_mut() {
            if !point.connections.contains(&b_id) {
                point.connections.push(b_id);
            }
        }
        if let Some(point) = self.slots[b].as_mut() {
            if !point.connections.contains(&a_id) {
                point.connections.push(a_id);
            }
        }
    }

    /// Removes the symmetric edge between two slots, if present.
    #[allow(clippy::cast_possible_truncation)]
    fn unlink(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        let a_id = PointId::new(self.id, a as u32);
        let b_id = PointId::new(self.id, b as u32);
        if let Some(point) = self.slots[a].as_mut() {
            point.connections.retain(|c| *c != b_id);
        }
        if let Some(point) = self.slots[b].as_mut() {
            point.connections.retain(|c| *c != a_id);
        }
    }
}

impl Default for NavGrid {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for NavGrid {
    /// Deep-duplicates the grid under a fresh identity.
    ///
    /// Points are duplicated in attachment order; connectivity is then
    /// rebuilt by matching each source edge endpoint to the *nearest*
    /// point of the clone rather than by index. The rebuild is exact
    /// when no two points share a position; under coincident points the
    /// nearest match is ambiguous and the rebuilt edges may differ from
    /// the source. Known fragility of the positional scheme.
    fn clone(&self) -> Self {
        let mut cloned = Self::new();
        for (_, point) in self.entries() {
            cloned.insert(point.position);
        }
        for point in self.slots.iter().flatten() {
            let Ok(start) = cloned.nearest_point(point.position) else {
                continue;
            };
            for &conn in &point.connections {
                let Ok(end_pos) = self.position(conn) else {
                    continue; // stale entry
                };
                let Ok(end) = cloned.nearest_point(end_pos) else {
                    continue;
                };
                cloned.link(start.index as usize, end.index as usize);
            }
        }
        cloned
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn line_grid(n: usize) -> (NavGrid, Vec<PointId>) {
        let mut grid = NavGrid::new();
        #[allow(clippy::cast_precision_loss)]
        let ids: Vec<PointId> = (0..n)
            .map(|i| grid.insert(Point3::new(i as f64, 0.0, 0.0)))
            .collect();
        for pair in ids.windows(2) {
            grid.connect(pair[0], pair[1]).unwrap();
        }
        (grid, ids)
    }

    #[test]
    fn test_connect_is_symmetric() {
        let mut grid = NavGrid::new();
        let a = grid.insert(Point3::origin());
        let b = grid.insert(Point3::new(1.0, 0.0, 0.0));

        grid.connect(a, b).unwrap();
        assert!(grid.is_connected(a, b).unwrap());
        assert!(grid.is_connected(b, a).unwrap());

        grid.disconnect(b, a).unwrap();
        assert!(!grid.is_connected(a, b).unwrap());
        assert!(!grid.is_connected(b, a).unwrap());
    }

    #[test]
    fn test_connect_idempotent() {
        let mut grid = NavGrid::new();
        let a = grid.insert(Point3::origin());
        let b = grid.insert(Point3::new(1.0, 0.0, 0.0));

        grid.connect(a, b).unwrap();
        grid.connect(a, b).unwrap();
        grid.connect(b, a).unwrap();

        assert_eq!(grid.connections(a).unwrap(), &[b]);
        assert_eq!(grid.connections(b).unwrap(), &[a]);
    }

    #[test]
    fn test_disconnect_non_edge_is_noop() {
        let mut grid = NavGrid::new();
        let a = grid.insert(Point3::origin());
        let b = grid.insert(Point3::new(1.0, 0.0, 0.0));

        grid.disconnect(a, b).unwrap();
        assert!(!grid.is_connected(a, b).unwrap());
    }

    #[test]
    fn test_self_connect_is_noop() {
        let mut grid = NavGrid::new();
        let a = grid.insert(Point3::origin());

        grid.connect(a, a).unwrap();
        assert!(grid.connections(a).unwrap().is_empty());

        grid.disconnect(a, a).unwrap();
        assert!(grid.connections(a).unwrap().is_empty());
    }

    #[test]
    fn test_connect_cross_grid_fails() {
        let mut grid = NavGrid::new();
        let mut other = NavGrid::new();
        let a = grid.insert(Point3::origin());
        let b = other.insert(Point3::new(1.0, 0.0, 0.0));

        assert!(matches!(
            grid.connect(a, b),
            Err(NavError::NotAttached(id)) if id == b
        ));
        assert!(!a.same_grid(b));
    }

    #[test]
    fn test_remove_keeps_stale_entries() {
        let mut grid = NavGrid::new();
        let a = grid.insert(Point3::origin());
        let b = grid.insert(Point3::new(1.0, 0.0, 0.0));
        grid.connect(a, b).unwrap();

        grid.remove(b).unwrap();

        // Detach does not sever: the stale id is still listed.
        assert!(grid.is_connected(a, b).unwrap());
        assert!(!grid.contains(b));
        assert!(matches!(grid.position(b), Err(NavError::NotAttached(_))));
    }

    #[test]
    fn test_points_in_attachment_order() {
        let (grid, ids) = line_grid(4);
        let listed: Vec<PointId> = grid.points().collect();
        assert_eq!(listed, ids);
        assert_eq!(grid.first_point(), Some(ids[0]));
        assert_eq!(grid.last_point(), Some(ids[3]));
    }

    #[test]
    fn test_len_tracks_removal() {
        let (mut grid, ids) = line_grid(3);
        assert_eq!(grid.len(), 3);
        grid.remove(ids[1]).unwrap();
        assert_eq!(grid.len(), 2);
        assert!(!grid.is_empty());
    }

    #[test]
    fn test_set_position_moves_point() {
        let mut grid = NavGrid::new();
        let a = grid.insert(Point3::origin());
        let b = grid.insert(Point3::new(10.0, 0.0, 0.0));

        grid.set_position(a, Point3::new(100.0, 0.0, 0.0)).unwrap();
        let nearest = grid.nearest_point(Point3::new(11.0, 0.0, 0.0)).unwrap();
        assert_eq!(nearest, b);
    }

    #[test]
    fn test_nearest_point() {
        let mut grid = NavGrid::new();
        let origin = grid.insert(Point3::new(0.0, 0.0, 0.0));
        grid.insert(Point3::new(10.0, 0.0, 0.0));
        grid.insert(Point3::new(0.0, 10.0, 0.0));

        let nearest = grid.nearest_point(Point3::new(1.0, 0.0, 0.0)).unwrap();
        assert_eq!(nearest, origin);
    }

    #[test]
    fn test_furthest_point() {
        let mut grid = NavGrid::new();
        grid.insert(Point3::new(0.0, 0.0, 0.0));
        let far = grid.insert(Point3::new(10.0, 0.0, 0.0));

        let furthest = grid.furthest_point(Point3::new(1.0, 0.0, 0.0)).unwrap();
        assert_eq!(furthest, far);
    }

    #[test]
    fn test_spatial_queries_on_empty_grid() {
        let grid = NavGrid::new();
        let mut rng = StdRng::seed_from_u64(42);

        assert!(matches!(
            grid.nearest_point(Point3::origin()),
            Err(NavError::EmptyGrid)
        ));
        assert!(matches!(
            grid.furthest_point(Point3::origin()),
            Err(NavError::EmptyGrid)
        ));
        assert!(matches!(
            grid.random_point(&mut rng),
            Err(NavError::EmptyGrid)
        ));
        assert!(matches!(grid.center(), Err(NavError::EmptyGrid)));
        assert!(matches!(grid.dimensions(), Err(NavError::EmptyGrid)));
        assert!(matches!(
            grid.nearest_position(Point3::origin()),
            Err(NavError::EmptyGrid)
        ));
        assert!(grid.first_point().is_none());
        assert!(grid.last_point().is_none());
    }

    #[test]
    fn test_random_point_is_member() {
        let (grid, _) = line_grid(5);
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            let id = grid.random_point(&mut rng).unwrap();
            assert!(grid.contains(id));
        }
    }

    #[test]
    fn test_nearest_position_projects_onto_segment() {
        let mut grid = NavGrid::new();
        let a = grid.insert(Point3::new(0.0, 0.0, 0.0));
        let b = grid.insert(Point3::new(10.0, 0.0, 0.0));
        grid.connect(a, b).unwrap();

        let on_grid = grid.nearest_position(Point3::new(5.0, 3.0, 0.0)).unwrap();
        assert_relative_eq!(on_grid.x, 5.0, epsilon = 1e-10);
        assert_relative_eq!(on_grid.y, 0.0, epsilon = 1e-10);
    }

    #[test]
    fn test_nearest_position_clamps_to_endpoint() {
        let mut grid = NavGrid::new();
        let a = grid.insert(Point3::new(0.0, 0.0, 0.0));
        let b = grid.insert(Point3::new(10.0, 0.0, 0.0));
        grid.connect(a, b).unwrap();

        // Beyond the far endpoint: projection clamps to t = 1.
        let on_grid = grid.nearest_position(Point3::new(12.0, 1.0, 0.0)).unwrap();
        assert_relative_eq!((on_grid - Point3::new(10.0, 0.0, 0.0)).norm(), 0.0, epsilon = 1e-10);
    }

    #[test]
    fn test_nearest_position_isolated_point() {
        let mut grid = NavGrid::new();
        grid.insert(Point3::new(3.0, 3.0, 3.0));

        let on_grid = grid.nearest_position(Point3::new(0.0, 0.0, 0.0)).unwrap();
        assert_eq!(on_grid, Point3::new(3.0, 3.0, 3.0));
    }

    #[test]
    fn test_nearest_position_is_local_to_nearest_point() {
        // The query is nearest to the isolated point c, so only c's
        // (empty) segment set is examined even though the a-b segment
        // passes closer. Documented approximation.
        let mut grid = NavGrid::new();
        let a = grid.insert(Point3::new(0.0, 1.0, 0.0));
        let b = grid.insert(Point3::new(10.0, 1.0, 0.0));
        grid.insert(Point3::new(5.0, -2.0, 0.0));
        grid.connect(a, b).unwrap();

        let on_grid = grid.nearest_position(Point3::new(5.0, -1.0, 0.0)).unwrap();
        assert_eq!(on_grid, Point3::new(5.0, -2.0, 0.0));
    }

    #[test]
    fn test_center() {
        let mut grid = NavGrid::new();
        grid.insert(Point3::new(0.0, 0.0, 0.0));
        grid.insert(Point3::new(2.0, 4.0, 6.0));

        let center = grid.center().unwrap();
        assert_eq!(center, Point3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_dimensions() {
        let mut grid = NavGrid::new();
        grid.insert(Point3::new(-1.0, 0.0, 2.0));
        grid.insert(Point3::new(3.0, -2.0, 0.0));

        let dims = grid.dimensions().unwrap();
        assert_eq!(dims.min, Point3::new(-1.0, -2.0, 0.0));
        assert_eq!(dims.max, Point3::new(3.0, 0.0, 2.0));
    }

    #[test]
    fn test_combine_merges_coincident_points() {
        let mut west = NavGrid::new();
        let a = west.insert(Point3::new(0.0, 0.0, 0.0));
        let junction = west.insert(Point3::new(1.0, 0.0, 0.0));
        west.connect(a, junction).unwrap();

        let mut east = NavGrid::new();
        let dup = east.insert(Point3::new(1.0, 0.0, 0.0));
        let b = east.insert(Point3::new(2.0, 0.0, 0.0));
        east.connect(dup, b).unwrap();

        west.combine(&mut east);

        // countA + countB - 1
        assert_eq!(west.len(), 3);
        assert!(east.is_empty());

        // The survivor inherited the union of both connection sets.
        let survivor = west.nearest_point(Point3::new(1.0, 0.0, 0.0)).unwrap();
        assert_eq!(survivor, junction);
        let neighbors = west.connections(survivor).unwrap();
        assert_eq!(neighbors.len(), 2);

        // And the absorbed far point is reachable through it.
        let far = west.nearest_point(Point3::new(2.0, 0.0, 0.0)).unwrap();
        assert!(west.is_connected(survivor, far).unwrap());
        assert!(west.is_connected(far, survivor).unwrap());
    }

    #[test]
    fn test_combine_invalidates_source_ids() {
        let mut grid = NavGrid::new();
        let mut other = NavGrid::new();
        let stale = other.insert(Point3::new(5.0, 0.0, 0.0));

        grid.combine(&mut other);

        assert_eq!(grid.len(), 1);
        assert!(!grid.contains(stale));
        assert!(matches!(other.position(stale), Err(NavError::NotAttached(_))));
    }

    #[test]
    fn test_combine_preserves_positions_and_order() {
        let mut grid = NavGrid::new();
        grid.insert(Point3::new(0.0, 0.0, 0.0));

        let mut other = NavGrid::new();
        other.insert(Point3::new(1.0, 0.0, 0.0));
        other.insert(Point3::new(2.0, 0.0, 0.0));

        grid.combine(&mut other);

        let positions: Vec<Point3<f64>> = grid
            .points()
            .map(|id| grid.position(id).unwrap())
            .collect();
        assert_eq!(
            positions,
            vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(2.0, 0.0, 0.0),
            ]
        );
    }

    #[test]
    fn test_combine_merges_within_epsilon() {
        let mut grid = NavGrid::new();
        grid.insert(Point3::new(0.0, 0.0, 0.0));

        let mut other = NavGrid::new();
        other.insert(Point3::new(nav_types::POSITION_EPSILON * 0.5, 0.0, 0.0));

        grid.combine(&mut other);
        assert_eq!(grid.len(), 1);
    }

    #[test]
    fn test_combine_remaps_connectivity() {
        let mut grid = NavGrid::new();
        grid.insert(Point3::new(-1.0, 0.0, 0.0));

        let mut other = NavGrid::new();
        let a = other.insert(Point3::new(1.0, 0.0, 0.0));
        let b = other.insert(Point3::new(2.0, 0.0, 0.0));
        other.connect(a, b).unwrap();

        grid.combine(&mut other);

        let new_a = grid.nearest_point(Point3::new(1.0, 0.0, 0.0)).unwrap();
        let new_b = grid.nearest_point(Point3::new(2.0, 0.0, 0.0)).unwrap();
        assert!(grid.is_connected(new_a, new_b).unwrap());
        assert!(grid.path(new_a, new_b).is_ok());
    }

    #[test]
    fn test_clone_duplicates_structure() {
        let (grid, _) = line_grid(4);
        let cloned = grid.clone();

        assert_eq!(cloned.len(), 4);
        let ids: Vec<PointId> = cloned.points().collect();
        for pair in ids.windows(2) {
            assert!(cloned.is_connected(pair[0], pair[1]).unwrap());
        }
        // Original ids do not resolve in the clone.
        assert!(grid.points().all(|id| !cloned.contains(id)));
    }

    #[test]
    fn test_clone_is_independent() {
        let (grid, ids) = line_grid(3);
        let mut cloned = grid.clone();

        let clone_first = cloned.first_point().unwrap();
        cloned.remove(clone_first).unwrap();

        assert_eq!(grid.len(), 3);
        assert!(grid.is_connected(ids[0], ids[1]).unwrap());
    }

    #[test]
    fn test_clone_empty_grid() {
        let grid = NavGrid::new();
        let cloned = grid.clone();
        assert!(cloned.is_empty());
    }
}
