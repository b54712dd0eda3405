//! Axis-aligned bounds and their accumulation

use crate::foundation::math::{Mat4, Point3, Vec3};

/// Axis-aligned bounding box described by its two extreme corners
///
/// Every component of `min` is less than or equal to the matching component
/// of `max`. Bounds are immutable; grow them with a [`BoundsBuilder`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    min: Point3,
    max: Point3,
}

impl Bounds {
    /// Degenerate bounds collapsed onto the origin
    pub fn empty() -> Self {
        Self {
            min: Point3::origin(),
            max: Point3::origin(),
        }
    }

    /// Create bounds from two opposite corners, in any order
    pub fn new(a: Point3, b: Point3) -> Self {
        Self {
            min: a.inf(&b),
            max: a.sup(&b),
        }
    }

    /// Create bounds centred at a point with the given half-size
    pub fn from_center_extents(center: Point3, extents: Vec3) -> Self {
        let extents = extents.abs();
        Self {
            min: center - extents,
            max: center + extents,
        }
    }

    /// Union of a set of bounds, empty when the set is empty
    pub fn sum<'a>(bounds: impl IntoIterator<Item = &'a Bounds>) -> Self {
        bounds
            .into_iter()
            .fold(BoundsBuilder::new(), |builder, b| builder.with_bounds(b))
            .build()
    }

    /// Minimum corner
    pub fn min(&self) -> Point3 {
        self.min
    }

    /// Maximum corner
    pub fn max(&self) -> Point3 {
        self.max
    }

    /// Centre point
    pub fn center(&self) -> Point3 {
        nalgebra::center(&self.min, &self.max)
    }

    /// Full size along each axis
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Half-size along each axis
    pub fn extents(&self) -> Vec3 {
        self.size() * 0.5
    }

    /// Largest of the three axis sizes
    pub fn largest_extent(&self) -> f32 {
        self.size().max()
    }

    /// Whether the bounds cover a single point
    pub fn is_degenerate(&self) -> bool {
        self.min == self.max
    }

    /// Check if the point lies inside or on the surface
    pub fn contains(&self, point: &Point3) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
            && point.z >= self.min.z
            && point.z <= self.max.z
    }

    /// Check if this box overlaps another (touching faces count)
    pub fn intersects(&self, other: &Bounds) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
            && self.min.z <= other.max.z
            && self.max.z >= other.min.z
    }

    /// Closest point on or inside the bounds to an arbitrary point
    pub fn nearest(&self, point: &Point3) -> Point3 {
        Point3::new(
            point.x.clamp(self.min.x, self.max.x),
            point.y.clamp(self.min.y, self.max.y),
            point.z.clamp(self.min.z, self.max.z),
        )
    }

    /// Corner furthest along `direction`
    pub fn positive(&self, direction: &Vec3) -> Point3 {
        Point3::new(
            if direction.x >= 0.0 { self.max.x } else { self.min.x },
            if direction.y >= 0.0 { self.max.y } else { self.min.y },
            if direction.z >= 0.0 { self.max.z } else { self.min.z },
        )
    }

    /// Corner furthest against `direction`
    pub fn negative(&self, direction: &Vec3) -> Point3 {
        Point3::new(
            if direction.x >= 0.0 { self.min.x } else { self.max.x },
            if direction.y >= 0.0 { self.min.y } else { self.max.y },
            if direction.z >= 0.0 { self.min.z } else { self.max.z },
        )
    }

    /// The eight corners
    pub fn corners(&self) -> [Point3; 8] {
        let (lo, hi) = (self.min, self.max);
        [
            Point3::new(lo.x, lo.y, lo.z),
            Point3::new(hi.x, lo.y, lo.z),
            Point3::new(lo.x, hi.y, lo.z),
            Point3::new(hi.x, hi.y, lo.z),
            Point3::new(lo.x, lo.y, hi.z),
            Point3::new(hi.x, lo.y, hi.z),
            Point3::new(lo.x, hi.y, hi.z),
            Point3::new(hi.x, hi.y, hi.z),
        ]
    }

    /// Axis-aligned bounds of this box after an affine transform
    pub fn transformed(&self, matrix: &Mat4) -> Self {
        self.corners()
            .iter()
            .fold(BoundsBuilder::new(), |builder, corner| {
                builder.with_point(&matrix.transform_point(corner))
            })
            .build()
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self::empty()
    }
}

/// Accumulates points and bounds into their union
///
/// Folding order does not matter. A builder that saw nothing builds
/// [`Bounds::empty`].
#[derive(Debug, Clone, Copy, Default)]
pub struct BoundsBuilder {
    extremes: Option<(Point3, Point3)>,
}

impl BoundsBuilder {
    /// Create an empty builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold a point into the running bounds
    pub fn add_point(&mut self, point: &Point3) {
        self.extremes = Some(match self.extremes {
            Some((min, max)) => (min.inf(point), max.sup(point)),
            None => (*point, *point),
        });
    }

    /// Fold another box into the running bounds
    pub fn add_bounds(&mut self, bounds: &Bounds) {
        self.add_point(&bounds.min);
        self.add_point(&bounds.max);
    }

    /// Builder pattern: fold a point
    #[must_use]
    pub fn with_point(mut self, point: &Point3) -> Self {
        self.add_point(point);
        self
    }

    /// Builder pattern: fold a box
    #[must_use]
    pub fn with_bounds(mut self, bounds: &Bounds) -> Self {
        self.add_bounds(bounds);
        self
    }

    /// Whether nothing has been folded in yet
    pub fn is_empty(&self) -> bool {
        self.extremes.is_none()
    }

    /// The union of everything folded so far
    pub fn build(&self) -> Bounds {
        self.extremes
            .map_or(Bounds::empty(), |(min, max)| Bounds { min, max })
    }
}
