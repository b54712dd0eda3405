//! Axis-aligned box volume

use approx::abs_diff_eq;

use crate::foundation::math::{Mat4, Point3, EPSILON};
use crate::geometry::{Bounds, HalfSpace, Plane, Ray, RayHits, RayIntersection};

/// Volume adapter around a [`Bounds`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxVolume {
    bounds: Bounds,
}

impl BoxVolume {
    /// Wrap a set of bounds
    pub fn new(bounds: Bounds) -> Self {
        Self { bounds }
    }

    /// The wrapped bounds
    pub fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    /// Check if the point lies inside or on the box
    pub fn contains(&self, point: &Point3) -> bool {
        self.bounds.contains(point)
    }

    /// Whether the box is not entirely behind the plane
    ///
    /// Only the two extreme vertices along the plane normal need testing.
    pub fn intersects_plane(&self, plane: &Plane) -> bool {
        let negative = self.bounds.negative(&plane.normal);
        let positive = self.bounds.positive(&plane.normal);
        plane.classify(&negative) != HalfSpace::Negative
            || plane.classify(&positive) != HalfSpace::Negative
    }

    /// Slab-method ray intersection
    ///
    /// Narrows a `[near, far]` interval axis by axis. A ray that starts
    /// inside the box, or only grazes it, reports the single exit distance.
    pub fn intersection(&self, ray: &Ray) -> Option<RayIntersection> {
        let min = self.bounds.min();
        let max = self.bounds.max();
        let mut near = f32::NEG_INFINITY;
        let mut far = f32::INFINITY;

        for axis in 0..3 {
            let origin = ray.origin[axis];
            let direction = ray.direction[axis];

            if direction.abs() < EPSILON {
                // Parallel to this slab: miss unless already between its planes
                if origin < min[axis] || origin > max[axis] {
                    return None;
                }
                continue;
            }

            let a = (min[axis] - origin) / direction;
            let b = (max[axis] - origin) / direction;
            near = near.max(a.min(b));
            far = far.min(a.max(b));

            if near > far || far < 0.0 {
                return None;
            }
        }

        let hits = if near < 0.0 || abs_diff_eq!(near, far, epsilon = EPSILON) {
            RayHits::Single(far)
        } else {
            RayHits::Pair(near, far)
        };
        Some(RayIntersection::new(*ray, hits, self.bounds.center()))
    }

    /// World-space box enclosing this one after a transform
    pub fn transformed(&self, matrix: &Mat4) -> Self {
        Self::new(self.bounds.transformed(matrix))
    }
}

impl From<Bounds> for BoxVolume {
    fn from(bounds: Bounds) -> Self {
        Self::new(bounds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Vec3;
    use approx::assert_relative_eq;

    fn unit_box() -> BoxVolume {
        BoxVolume::new(Bounds::new(
            Point3::new(-1.0, -1.0, -1.0),
            Point3::new(1.0, 1.0, 1.0),
        ))
    }

    #[test]
    fn test_slab_entry_and_exit() {
        let ray = Ray::new(Point3::new(-5.0, 0.0, 0.0), Vec3::new(1.0, 0.0, 0.0));
        let hit = unit_box().intersection(&ray).expect("ray should hit the box");
        match hit.hits() {
            RayHits::Pair(near, far) => {
                assert_relative_eq!(near, 4.0);
                assert_relative_eq!(far, 6.0);
            }
            other => panic!("expected entry and exit, got {other:?}"),
        }
        assert_relative_eq!(hit.normal_at(4.0), Vec3::new(-1.0, 0.0, 0.0));
    }

    #[test]
    fn test_parallel_miss() {
        let ray = Ray::new(Point3::new(-5.0, 5.0, 0.0), Vec3::new(1.0, 0.0, 0.0));
        assert!(unit_box().intersection(&ray).is_none());
    }

    #[test]
    fn test_box_behind_ray() {
        let ray = Ray::new(Point3::new(5.0, 0.0, 0.0), Vec3::new(1.0, 0.0, 0.0));
        assert!(unit_box().intersection(&ray).is_none());
    }

    #[test]
    fn test_diagonal_miss() {
        let ray = Ray::new(Point3::new(-5.0, 0.0, 0.0), Vec3::new(1.0, 1.0, 0.0));
        assert!(unit_box().intersection(&ray).is_none());
    }

    #[test]
    fn test_origin_inside_reports_exit_only() {
        let ray = Ray::new(Point3::origin(), Vec3::new(0.0, 0.0, -1.0));
        let hit = unit_box().intersection(&ray).unwrap();
        assert_eq!(hit.hits(), RayHits::Single(1.0));
    }

    #[test]
    fn test_grazing_edge_reports_single_distance() {
        // Passes exactly through the (1, 1) edge along z
        let ray = Ray::new(Point3::new(0.0, 2.0, 0.0), Vec3::new(1.0, -1.0, 0.0));
        let hit = unit_box().intersection(&ray).unwrap();
        match hit.hits() {
            RayHits::Single(t) => assert_relative_eq!(t, 2.0_f32.sqrt(), epsilon = 1e-5),
            other => panic!("expected a single grazing hit, got {other:?}"),
        }
    }

    #[test]
    fn test_plane_intersection() {
        let plane = Plane::new(Vec3::new(1.0, 0.0, 0.0), -1.0);
        assert!(unit_box().intersects_plane(&plane)); // touches x = 1
        assert!(!unit_box().intersects_plane(&Plane::new(Vec3::new(1.0, 0.0, 0.0), -2.0)));
        assert!(unit_box().intersects_plane(&Plane::new(Vec3::new(-1.0, 0.0, 0.0), 0.0)));
    }
}
