//! Path produced by a navigation grid pathfinding query.
//!
//! A [`GridPath`] is a value snapshot: an ordered sequence of world
//! positions from the source waypoint to the destination waypoint. It
//! holds no reference back to the grid that produced it, so it remains
//! valid even if that grid is later mutated or dropped.

use nalgebra::Point3;

/// An ordered sequence of world positions from a source to a destination.
///
/// The first element is the source position and the last is the
/// destination (or the sole element if source and destination are the
/// same waypoint). The total polyline length is computed once at
/// construction and cached.
///
/// Consumers are expected to interpolate along consecutive segments over
/// time and detect arrival at the final element.
///
/// # Example
///
/// ```
/// use nav_types::GridPath;
/// use nalgebra::Point3;
///
/// let path = GridPath::new(vec![
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(1.0, 0.0, 0.0),
///     Point3::new(1.0, 1.0, 0.0),
/// ]);
///
/// assert_eq!(path.len(), 3);
/// assert!((path.length() - 2.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridPath {
    /// Ordered world positions, source first.
    points: Vec<Point3<f64>>,
    /// Cached polyline length (sum of segment norms).
    length: f64,
}

impl GridPath {
    /// Creates a path from an ordered sequence of world positions.
    ///
    /// The polyline length is computed automatically.
    #[must_use]
    pub fn new(points: Vec<Point3<f64>>) -> Self {
        let length = Self::compute_length(&points);
        Self { points, length }
    }

    /// Creates an empty path.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            points: Vec::new(),
            length: 0.0,
        }
    }

    /// Creates a path consisting of a single position.
    ///
    /// This is the result of pathfinding from a waypoint to itself.
    ///
    /// # Example
    ///
    /// ```
    /// use nav_types::GridPath;
    /// use nalgebra::Point3;
    ///
    /// let path = GridPath::single(Point3::new(1.0, 2.0, 3.0));
    /// assert_eq!(path.len(), 1);
    /// assert!((path.length() - 0.0).abs() < 1e-10);
    /// ```
    #[must_use]
    pub fn single(point: Point3<f64>) -> Self {
        Self {
            points: vec![point],
            length: 0.0,
        }
    }

    /// Returns the number of positions in the path.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns `true` if the path has no positions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Returns the total polyline length.
    #[must_use]
    pub const fn length(&self) -> f64 {
        self.length
    }

    /// Returns the positions as a slice.
    #[must_use]
    pub fn points(&self) -> &[Point3<f64>] {
        &self.points
    }

    /// Returns an independent copy of the position sequence.
    ///
    /// # Example
    ///
    /// ```
    /// use nav_types::GridPath;
    /// use nalgebra::Point3;
    ///
    /// let path = GridPath::new(vec![Point3::origin(), Point3::new(1.0, 0.0, 0.0)]);
    /// let copy = path.to_points();
    /// assert_eq!(copy.as_slice(), path.points());
    /// ```
    #[must_use]
    pub fn to_points(&self) -> Vec<Point3<f64>> {
        self.points.clone()
    }

    /// Returns the source position, if any.
    #[must_use]
    pub fn first(&self) -> Option<&Point3<f64>> {
        self.points.first()
    }

    /// Returns the destination position, if any.
    #[must_use]
    pub fn last(&self) -> Option<&Point3<f64>> {
        self.points.last()
    }

    /// Returns the position at the given index.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Point3<f64>> {
        self.points.get(index)
    }

    /// Returns an iterator over the positions.
    pub fn iter(&self) -> impl Iterator<Item = &Point3<f64>> {
        self.points.iter()
    }

    /// Returns an iterator over consecutive position pairs (segments).
    ///
    /// # Example
    ///
    /// ```
    /// use nav_types::GridPath;
    /// use nalgebra::Point3;
    ///
    /// let path = GridPath::new(vec![
    ///     Point3::new(0.0, 0.0, 0.0),
    ///     Point3::new(1.0, 0.0, 0.0),
    ///     Point3::new(2.0, 0.0, 0.0),
    /// ]);
    /// assert_eq!(path.segments().count(), 2);
    /// ```
    pub fn segments(&self) -> impl Iterator<Item = (&Point3<f64>, &Point3<f64>)> {
        self.points.windows(2).map(|w| (&w[0], &w[1]))
    }

    fn compute_length(points: &[Point3<f64>]) -> f64 {
        points
            .windows(2)
            .fold(0.0, |acc, w| acc + (w[1] - w[0]).norm())
    }
}

impl Default for GridPath {
    fn default() -> Self {
        Self::empty()
    }
}

impl FromIterator<Point3<f64>> for GridPath {
    fn from_iter<I: IntoIterator<Item = Point3<f64>>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl IntoIterator for GridPath {
    type Item = Point3<f64>;
    type IntoIter = std::vec::IntoIter<Point3<f64>>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.into_iter()
    }
}

impl<'a> IntoIterator for &'a GridPath {
    type Item = &'a Point3<f64>;
    type IntoIter = std::slice::Iter<'a, Point3<f64>>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}
