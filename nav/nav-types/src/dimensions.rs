//! Axis-aligned spread of a set of waypoint positions.

use nalgebra::{Point3, Vector3};

/// The axis-aligned bounding region of a set of world positions.
///
/// Used to report the overall spread of the waypoints composing a
/// navigation grid.
///
/// # Example
///
/// ```
/// use nav_types::Dimensions;
/// use nalgebra::Point3;
///
/// let dims = Dimensions::from_points([
///     Point3::new(-1.0, 0.0, 0.0),
///     Point3::new(2.0, 3.0, 0.5),
/// ])
/// .unwrap();
///
/// assert_eq!(dims.width(), 3.0);
/// assert_eq!(dims.depth(), 3.0);
/// assert_eq!(dims.height(), 0.5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Dimensions {
    /// Minimum corner.
    pub min: Point3<f64>,
    /// Maximum corner.
    pub max: Point3<f64>,
}

impl Dimensions {
    /// Creates dimensions from two corner points.
    ///
    /// The corners are automatically ordered.
    #[must_use]
    pub fn new(a: Point3<f64>, b: Point3<f64>) -> Self {
        Self {
            min: Point3::new(a.x.min(b.x), a.y.min(b.y), a.z.min(b.z)),
            max: Point3::new(a.x.max(b.x), a.y.max(b.y), a.z.max(b.z)),
        }
    }

    /// Computes the dimensions spanning all of the given points.
    ///
    /// Returns `None` if the iterator yields no points.
    #[must_use]
    pub fn from_points<I: IntoIterator<Item = Point3<f64>>>(points: I) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let mut dims = Self {
            min: first,
            max: first,
        };
        for p in iter {
            dims.expand(p);
        }
        Some(dims)
    }

    /// Grows the dimensions to include the given point.
    pub fn expand(&mut self, point: Point3<f64>) {
        self.min.x = self.min.x.min(point.x);
        self.min.y = self.min.y.min(point.y);
        self.min.z = self.min.z.min(point.z);
        self.max.x = self.max.x.max(point.x);
        self.max.y = self.max.y.max(point.y);
        self.max.z = self.max.z.max(point.z);
    }

    /// Returns the center of the region.
    #[must_use]
    pub fn center(&self) -> Point3<f64> {
        Point3::new(
            (self.min.x + self.max.x) * 0.5,
            (self.min.y + self.max.y) * 0.5,
            (self.min.z + self.max.z) * 0.5,
        )
    }

    /// Returns the extent along each axis.
    #[must_use]
    pub fn size(&self) -> Vector3<f64> {
        self.max - self.min
    }

    /// Returns the extent along the X axis.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    /// Returns the extent along the Y axis.
    #[must_use]
    pub fn depth(&self) -> f64 {
        self.max.y - self.min.y
    }

    /// Returns the extent along the Z axis.
    #[must_use]
    pub fn height(&self) -> f64 {
        self.max.z - self.min.z
    }

    /// Checks if a point lies inside the region (inclusive).
    #[must_use]
    pub fn contains(&self, point: &Point3<f64>) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
            && point.z >= self.min.z
            && point.z <= self.max.z
    }
}
