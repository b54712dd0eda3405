//! Rays for casting and picking

use crate::foundation::math::{Point3, Vec3};

/// A ray for ray casting and picking
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// The origin point of the ray
    pub origin: Point3,
    /// The direction of the ray (normalized on construction)
    pub direction: Vec3,
}

impl Ray {
    /// Creates a new ray with the given origin and direction
    pub fn new(origin: Point3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize(),
        }
    }

    /// Creates a ray starting at `from` and passing through `to`
    pub fn through(from: Point3, to: Point3) -> Self {
        Self::new(from, to - from)
    }

    /// Get a point along the ray at distance t
    pub fn point_at(&self, t: f32) -> Point3 {
        self.origin + self.direction * t
    }
}

/// Distances along a ray at which it crosses a volume's surface
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RayHits {
    /// A single crossing: the ray starts inside the volume, or grazes it
    Single(f32),
    /// Entry and exit distances, entry first
    Pair(f32, f32),
}

impl RayHits {
    /// Distance of the first crossing
    pub fn nearest(&self) -> f32 {
        match *self {
            Self::Single(t) | Self::Pair(t, _) => t,
        }
    }

    /// Distance of the last crossing
    pub fn furthest(&self) -> f32 {
        match *self {
            Self::Single(t) | Self::Pair(_, t) => t,
        }
    }

    /// All crossing distances in ascending order
    pub fn distances(&self) -> Vec<f32> {
        match *self {
            Self::Single(t) => vec![t],
            Self::Pair(near, far) => vec![near, far],
        }
    }
}

/// Result of a ray hitting a volume
///
/// Carries the hit distances and enough of the volume to answer surface
/// normal queries at any of them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayIntersection {
    ray: Ray,
    hits: RayHits,
    center: Point3,
}

impl RayIntersection {
    /// Create an intersection whose surface normals radiate from `center`
    pub fn new(ray: Ray, hits: RayHits, center: Point3) -> Self {
        Self { ray, hits, center }
    }

    /// The ray that was cast
    pub fn ray(&self) -> &Ray {
        &self.ray
    }

    /// Hit distances
    pub fn hits(&self) -> RayHits {
        self.hits
    }

    /// Distance of the first crossing
    pub fn nearest(&self) -> f32 {
        self.hits.nearest()
    }

    /// Point on the ray at distance `t`
    pub fn point(&self, t: f32) -> Point3 {
        self.ray.point_at(t)
    }

    /// Approximate surface normal at distance `t`
    ///
    /// Normalized vector from the volume's centre to the hit point. Exact for
    /// spheres, an approximation near box edges and corners.
    pub fn normal_at(&self, t: f32) -> Vec3 {
        (self.point(t) - self.center).normalize()
    }
}
