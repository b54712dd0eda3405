//! Planes and half-space classification

use crate::foundation::math::{Point3, Vec3, EPSILON};

/// Side of a plane a point lies on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HalfSpace {
    /// In front of the plane, along its normal
    Positive,
    /// Behind the plane
    Negative,
    /// On the plane, within [`EPSILON`]
    On,
}

/// Plane defined by normal and signed distance, `normal · p + d = 0`
///
/// Points with `normal · p + d > 0` are in the positive half-space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    /// Normal vector
    pub normal: Vec3,
    /// Signed distance term
    pub d: f32,
}

impl Plane {
    /// Create a plane from a normal and signed distance, taken as given
    pub fn new(normal: Vec3, d: f32) -> Self {
        Self { normal, d }
    }

    /// Create a plane through `point` facing along `normal`
    pub fn from_point_normal(point: &Point3, normal: Vec3) -> Self {
        let normal = normal.normalize();
        Self {
            normal,
            d: -normal.dot(&point.coords),
        }
    }

    /// Create a plane from `ax + by + cz + d = 0`, scaled so the normal is unit length
    ///
    /// Returns `None` when `(a, b, c)` is too short to normalize.
    pub fn from_coefficients(a: f32, b: f32, c: f32, d: f32) -> Option<Self> {
        let normal = Vec3::new(a, b, c);
        let length = normal.norm();
        if length < EPSILON {
            return None;
        }
        Some(Self {
            normal: normal / length,
            d: d / length,
        })
    }

    /// Calculate signed distance from plane to point (scaled by the normal's length)
    pub fn distance_to_point(&self, point: &Point3) -> f32 {
        self.normal.dot(&point.coords) + self.d
    }

    /// Classify a point against the plane
    pub fn classify(&self, point: &Point3) -> HalfSpace {
        let distance = self.distance_to_point(point);
        if distance > EPSILON {
            HalfSpace::Positive
        } else if distance < -EPSILON {
            HalfSpace::Negative
        } else {
            HalfSpace::On
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_classify_half_spaces() {
        let plane = Plane::new(Vec3::new(1.0, 0.0, 0.0), -1.0);
        assert_eq!(plane.classify(&Point3::new(2.0, 0.0, 0.0)), HalfSpace::Positive);
        assert_eq!(plane.classify(&Point3::new(1.0, 0.0, 0.0)), HalfSpace::On);
        assert_eq!(plane.classify(&Point3::new(0.0, 0.0, 0.0)), HalfSpace::Negative);
    }

    #[test]
    fn test_from_point_normal() {
        let plane = Plane::from_point_normal(&Point3::new(0.0, 5.0, 0.0), Vec3::new(0.0, 2.0, 0.0));
        assert_relative_eq!(plane.normal, Vec3::new(0.0, 1.0, 0.0));
        assert_relative_eq!(plane.d, -5.0);
        assert_eq!(plane.classify(&Point3::new(10.0, 5.0, -3.0)), HalfSpace::On);
    }

    #[test]
    fn test_from_coefficients_normalizes() {
        let plane = Plane::from_coefficients(0.0, 0.0, 2.0, 4.0).unwrap();
        assert_relative_eq!(plane.normal, Vec3::new(0.0, 0.0, 1.0));
        assert_relative_eq!(plane.d, 2.0);
    }

    #[test]
    fn test_from_coefficients_rejects_degenerate_normal() {
        assert!(Plane::from_coefficients(0.0, 0.0, 0.0, 1.0).is_none());
    }
}
