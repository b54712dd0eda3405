//! View frustum as a conjunction of half-spaces

use crate::config::ClipDepth;
use crate::foundation::math::{Mat4, Point3, Vec3, Vec4};
use crate::geometry::{HalfSpace, Plane};
use crate::volume::Volume;

/// Frustum for visibility culling
///
/// An ordered, non-empty list of planes whose positive half-spaces all face
/// the inside. A point is inside when no plane classifies it as negative.
#[derive(Debug, Clone, PartialEq)]
pub struct Frustum {
    planes: Vec<Plane>,
}

impl Frustum {
    /// Create a frustum from an explicit plane list
    ///
    /// Returns `None` for an empty list.
    pub fn new(planes: Vec<Plane>) -> Option<Self> {
        if planes.is_empty() {
            return None;
        }
        Some(Self { planes })
    }

    /// Extract the six frustum planes from a view-projection matrix
    ///
    /// Gribb-Hartmann: each plane is the clip-space W row plus or minus one
    /// of the X, Y, Z rows, normalized. Planes come out in the order near,
    /// far, left, right, top, bottom, all facing inward.
    pub fn of(matrix: &Mat4, clip_depth: ClipDepth) -> Self {
        let row = |i: usize| -> Vec4 { matrix.row(i).transpose() };
        let (x, y, z, w) = (row(0), row(1), row(2), row(3));

        let near = match clip_depth {
            ClipDepth::NegativeOneToOne => w + z,
            ClipDepth::ZeroToOne => z,
        };

        let planes = [near, w - z, w + x, w - x, w - y, w + y]
            .iter()
            .map(plane_from_row)
            .collect();

        Self { planes }
    }

    /// The planes, in construction order
    pub fn planes(&self) -> &[Plane] {
        &self.planes
    }

    /// Check if a point is on the positive side of, or on, every plane
    pub fn contains(&self, point: &Point3) -> bool {
        self.planes
            .iter()
            .all(|plane| plane.classify(point) != HalfSpace::Negative)
    }

    /// Check if a volume is not entirely behind any single plane
    pub fn intersects(&self, volume: &Volume) -> bool {
        self.planes.iter().all(|plane| volume.intersects_plane(plane))
    }
}

fn plane_from_row(coefficients: &Vec4) -> Plane {
    let (a, b, c, d) = (coefficients.x, coefficients.y, coefficients.z, coefficients.w);
    // A zero-length normal leaves a plane that classifies by the sign of d alone
    Plane::from_coefficients(a, b, c, d).unwrap_or_else(|| Plane::new(Vec3::new(a, b, c), d))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Bounds;
    use crate::volume::{BoxVolume, SphereVolume};
    use approx::assert_relative_eq;

    fn half_space_frustum() -> Frustum {
        Frustum::new(vec![Plane::new(Vec3::new(1.0, 0.0, 0.0), -1.0)]).unwrap()
    }

    fn sorted_planes(frustum: &Frustum) -> Vec<(i32, i32, i32, i32)> {
        let mut planes: Vec<_> = frustum
            .planes()
            .iter()
            .map(|p| {
                (
                    p.normal.x.round() as i32,
                    p.normal.y.round() as i32,
                    p.normal.z.round() as i32,
                    p.d.round() as i32,
                )
            })
            .collect();
        planes.sort_unstable();
        planes
    }

    /// Vulkan-style perspective looking down +Z with depth mapped to [0, 1]
    fn zero_to_one_perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Mat4 {
        let tan_half_fovy = (fov_y * 0.5).tan();
        let mut result = Mat4::zeros();
        result[(0, 0)] = 1.0 / (aspect * tan_half_fovy);
        result[(1, 1)] = 1.0 / tan_half_fovy;
        result[(2, 2)] = far / (far - near);
        result[(2, 3)] = -(near * far) / (far - near);
        result[(3, 2)] = 1.0;
        result
    }

    #[test]
    fn test_empty_plane_list_rejected() {
        assert!(Frustum::new(Vec::new()).is_none());
    }

    #[test]
    fn test_contains_mirrors_plane_classification() {
        let frustum = half_space_frustum();
        assert!(frustum.contains(&Point3::new(2.0, 0.0, 0.0)));
        assert!(frustum.contains(&Point3::new(1.0, 0.0, 0.0)));
        assert!(!frustum.contains(&Point3::new(0.0, 0.0, 0.0)));
    }

    #[test]
    fn test_identity_extraction_is_unit_cube() {
        let frustum = Frustum::of(&Mat4::identity(), ClipDepth::NegativeOneToOne);
        assert_eq!(frustum.planes().len(), 6);
        for plane in frustum.planes() {
            assert_relative_eq!(plane.normal.norm(), 1.0);
            assert_relative_eq!(plane.d, 1.0);
            let axis_components = plane.normal.iter().filter(|c| c.abs() > 0.5).count();
            assert_eq!(axis_components, 1);
        }
        assert!(frustum.contains(&Point3::new(0.99, -0.99, 0.5)));
        assert!(!frustum.contains(&Point3::new(1.5, 0.0, 0.0)));
    }

    #[test]
    fn test_axis_row_permutation_has_same_structure() {
        let permuted = Mat4::new(
            0.0, 1.0, 0.0, 0.0, //
            0.0, 0.0, 1.0, 0.0, //
            1.0, 0.0, 0.0, 0.0, //
            0.0, 0.0, 0.0, 1.0,
        );
        let reference = Frustum::of(&Mat4::identity(), ClipDepth::NegativeOneToOne);
        let extracted = Frustum::of(&permuted, ClipDepth::NegativeOneToOne);
        assert_eq!(sorted_planes(&extracted), sorted_planes(&reference));
    }

    #[test]
    fn test_perspective_extraction() {
        let projection = Mat4::new_perspective(16.0 / 9.0, 1.0, 0.1, 100.0);
        let frustum = Frustum::of(&projection, ClipDepth::NegativeOneToOne);

        assert!(frustum.contains(&Point3::new(0.0, 0.0, -5.0)));
        assert!(!frustum.contains(&Point3::new(0.0, 0.0, 5.0)));
        assert!(!frustum.contains(&Point3::new(0.0, 0.0, -200.0)));
        assert!(!frustum.contains(&Point3::new(50.0, 0.0, -5.0)));
    }

    #[test]
    fn test_clip_depth_selects_near_plane() {
        let projection = zero_to_one_perspective(1.0, 1.0, 0.1, 100.0);
        let just_before_near = Point3::new(0.0, 0.0, 0.09);

        let vulkan = Frustum::of(&projection, ClipDepth::ZeroToOne);
        assert!(vulkan.contains(&Point3::new(0.0, 0.0, 5.0)));
        assert!(!vulkan.contains(&just_before_near));

        let gl = Frustum::of(&projection, ClipDepth::NegativeOneToOne);
        assert!(gl.contains(&just_before_near));
    }

    #[test]
    fn test_intersects_volumes() {
        let frustum = half_space_frustum();
        let straddling = Volume::from(BoxVolume::new(Bounds::new(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.5, 1.0, 1.0),
        )));
        let behind = Volume::from(BoxVolume::new(Bounds::new(
            Point3::new(-3.0, 0.0, 0.0),
            Point3::new(0.5, 1.0, 1.0),
        )));
        let sphere = Volume::from(SphereVolume::new(Point3::new(0.5, 0.0, 0.0), 0.6));

        assert!(frustum.intersects(&straddling));
        assert!(!frustum.intersects(&behind));
        assert!(frustum.intersects(&sphere));
        assert!(!frustum.intersects(&Volume::Empty));
    }

    #[test]
    fn test_structural_equality() {
        assert_eq!(half_space_frustum(), half_space_frustum());
        let a = Frustum::of(&Mat4::identity(), ClipDepth::NegativeOneToOne);
        let b = Frustum::of(&Mat4::identity(), ClipDepth::ZeroToOne);
        assert_ne!(a, b);
    }
}
