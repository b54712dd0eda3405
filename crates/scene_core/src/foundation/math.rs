//! Math utilities and types
//!
//! Provides the fundamental math types the scene graph is written against.
//! Matrices use column vectors, so a child's world matrix is composed as
//! `parent * local`.

pub use nalgebra::{Matrix3, Matrix4, Quaternion, Unit, Vector3, Vector4};

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4D vector type
pub type Vec4 = Vector4<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// 3D point type
pub type Point3 = nalgebra::Point3<f32>;

/// Quaternion type for rotations
pub type Quat = Unit<Quaternion<f32>>;

/// Tolerance used for "approximately zero" and "approximately equal" tests
pub const EPSILON: f32 = 1e-6;

/// Transform representing position, rotation, and scale
#[derive(Debug, Clone, PartialEq)]
pub struct Transform {
    /// Position in 3D space
    pub position: Vec3,

    /// Rotation quaternion
    pub rotation: Quat,

    /// Scale factors
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::zeros(),
            rotation: Quat::identity(),
            scale: Vec3::new(1.0, 1.0, 1.0),
        }
    }
}

impl Transform {
    /// Create a new identity transform
    pub fn identity() -> Self {
        Self::default()
    }

    /// Create a transform with only position
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Create a transform with position and rotation
    pub fn from_position_rotation(position: Vec3, rotation: Quat) -> Self {
        Self {
            position,
            rotation,
            ..Default::default()
        }
    }

    /// Builder pattern: Set scale (non-uniform)
    #[must_use]
    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    /// Builder pattern: Set scale (uniform)
    #[must_use]
    pub fn with_uniform_scale(mut self, scale: f32) -> Self {
        self.scale = Vec3::new(scale, scale, scale);
        self
    }

    /// Whether this transform is exactly the identity, with no tolerance
    pub fn is_identity(&self) -> bool {
        self.position == Vec3::zeros()
            && self.rotation == Quat::identity()
            && self.scale == Vec3::new(1.0, 1.0, 1.0)
    }

    /// Convert to a transformation matrix (translation * rotation * scale)
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::new_translation(&self.position)
            * self.rotation.to_homogeneous()
            * Mat4::new_nonuniform_scaling(&self.scale)
    }

    /// Apply this transform to a point
    pub fn transform_point(&self, point: Point3) -> Point3 {
        self.to_matrix().transform_point(&point)
    }
}

/// Largest per-axis scale factor encoded in the upper 3x3 of a matrix
pub fn max_axis_scale(matrix: &Mat4) -> f32 {
    let x = Vec3::new(matrix.m11, matrix.m21, matrix.m31).norm();
    let y = Vec3::new(matrix.m12, matrix.m22, matrix.m32).norm();
    let z = Vec3::new(matrix.m13, matrix.m23, matrix.m33).norm();
    x.max(y).max(z)
}

/// Math constants
pub mod constants {
    /// Pi constant
    pub const PI: f32 = std::f32::consts::PI;

    /// Pi / 2
    pub const HALF_PI: f32 = PI * 0.5;

    /// Degrees to radians conversion factor
    pub const DEG_TO_RAD: f32 = PI / 180.0;
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_identity_transform_is_identity() {
        assert!(Transform::identity().is_identity());
        assert_eq!(Transform::identity().to_matrix(), Mat4::identity());
    }

    #[test]
    fn test_translated_transform_is_not_identity() {
        let transform = Transform::from_position(Vec3::new(0.0, 1e-9, 0.0));
        assert!(!transform.is_identity());
    }

    #[test]
    fn test_trs_order() {
        let rotation = Quat::from_axis_angle(&Vec3::z_axis(), constants::HALF_PI);
        let transform = Transform::from_position_rotation(Vec3::new(10.0, 0.0, 0.0), rotation)
            .with_uniform_scale(2.0);

        // Scale first, then rotate +X onto +Y, then translate.
        let moved = transform.transform_point(Point3::new(1.0, 0.0, 0.0));
        assert_relative_eq!(moved, Point3::new(10.0, 2.0, 0.0), epsilon = 1e-5);
    }

    #[test]
    fn test_max_axis_scale() {
        let matrix = Transform::identity()
            .with_scale(Vec3::new(1.0, 3.0, 2.0))
            .to_matrix();
        assert_relative_eq!(max_axis_scale(&matrix), 3.0, epsilon = EPSILON);
    }
}
