//! Bounding sphere volume

use crate::foundation::math::{max_axis_scale, Mat4, Point3, Vec3, EPSILON};
use crate::geometry::{Bounds, Plane, Ray, RayHits, RayIntersection};

/// A bounding sphere
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SphereVolume {
    /// Centre of the sphere
    pub center: Point3,
    /// Radius of the sphere
    pub radius: f32,
}

impl SphereVolume {
    /// Creates a new bounding sphere with the given center and radius
    pub fn new(center: Point3, radius: f32) -> Self {
        Self {
            center,
            radius: radius.abs(),
        }
    }

    /// Smallest sphere around the bounds' centre that encloses every corner
    pub fn enclosing(bounds: &Bounds) -> Self {
        Self::new(bounds.center(), bounds.size().norm() * 0.5)
    }

    /// Axis-aligned bounds of the sphere
    pub fn bounds(&self) -> Bounds {
        Bounds::from_center_extents(self.center, Vec3::repeat(self.radius))
    }

    /// Check if the point lies inside or on the sphere
    pub fn contains(&self, point: &Point3) -> bool {
        (point - self.center).norm_squared() <= self.radius * self.radius
    }

    /// Whether the sphere is not entirely behind the plane
    pub fn intersects_plane(&self, plane: &Plane) -> bool {
        let normal_length = plane.normal.norm();
        plane.distance_to_point(&self.center) >= -self.radius * normal_length - EPSILON
    }

    /// Check if this sphere intersects with another
    pub fn intersects_sphere(&self, other: &SphereVolume) -> bool {
        let radius_sum = self.radius + other.radius;
        (self.center - other.center).norm_squared() <= radius_sum * radius_sum
    }

    /// Check if this sphere overlaps a box
    pub fn intersects_bounds(&self, bounds: &Bounds) -> bool {
        self.contains(&bounds.nearest(&self.center))
    }

    /// Test ray intersection with this sphere
    ///
    /// Two distances when the ray enters and leaves ahead of its origin, one
    /// when the origin is inside or the ray is tangent.
    pub fn intersection(&self, ray: &Ray) -> Option<RayIntersection> {
        // Solve |origin + t*direction - center|^2 = radius^2 with a unit direction
        let oc = ray.origin - self.center;
        let b = oc.dot(&ray.direction);
        let c = oc.norm_squared() - self.radius * self.radius;
        let discriminant = b * b - c;

        if discriminant < 0.0 {
            return None;
        }

        let root = discriminant.sqrt();
        let near = -b - root;
        let far = -b + root;

        if far < 0.0 {
            return None;
        }

        let hits = if near < 0.0 || root < EPSILON {
            RayHits::Single(far)
        } else {
            RayHits::Pair(near, far)
        };
        Some(RayIntersection::new(*ray, hits, self.center))
    }

    /// Sphere after a transform; non-uniform scale grows it to the largest axis
    pub fn transformed(&self, matrix: &Mat4) -> Self {
        Self::new(
            matrix.transform_point(&self.center),
            self.radius * max_axis_scale(matrix),
        )
    }
}
