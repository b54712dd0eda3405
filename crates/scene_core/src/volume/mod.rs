//! Bounding volumes
//!
//! [`Volume`] is a closed set of variants. Binary intersection tests match
//! on both operands at once, so every pairing is handled in one place and
//! the compiler enforces that none is missed.
//!
//! | variant     | contains / intersects                    | ray                    |
//! |-------------|------------------------------------------|------------------------|
//! | `Empty`     | always false                             | never hits             |
//! | `Box`       | bounds tests, slab method                | entry/exit distances   |
//! | `Sphere`    | distance tests                           | quadratic roots        |
//! | `Inverse`   | logical NOT of the wrapped volume        | unsupported            |
//! | `Aggregate` | whatever the resolved union answers      | resolved union         |

mod aggregate;
mod box_volume;
mod sphere;

pub use aggregate::AggregateVolume;
pub use box_volume::BoxVolume;
pub use sphere::SphereVolume;

use thiserror::Error;

use crate::foundation::math::{Mat4, Point3};
use crate::geometry::{Bounds, Plane, Ray, RayIntersection};

/// Discriminant of a [`Volume`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VolumeKind {
    /// [`Volume::Empty`]
    Empty,
    /// [`Volume::Box`]
    Box,
    /// [`Volume::Sphere`]
    Sphere,
    /// [`Volume::Inverse`]
    Inverse,
    /// [`Volume::Aggregate`]
    Aggregate,
}

/// Volume errors
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum VolumeError {
    /// An aggregate was asked to resolve to another aggregate
    #[error("an aggregate volume cannot aggregate into another aggregate")]
    NestedAggregate,

    /// The aggregate target cannot be built from bounds
    #[error("volume kind {0:?} cannot be built from bounds")]
    UnsupportedAggregateTarget(VolumeKind),

    /// An aggregate was nested inside another volume
    #[error("an aggregate volume must be a node's own volume, not wrapped in another")]
    WrappedAggregate,

    /// Ray casting is not defined for this volume kind
    #[error("ray intersection is not supported for {0:?} volumes")]
    UnsupportedRay(VolumeKind),
}

/// A bounding volume
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Volume {
    /// Contains nothing and intersects nothing
    #[default]
    Empty,
    /// Axis-aligned box
    Box(BoxVolume),
    /// Sphere
    Sphere(SphereVolume),
    /// Complement of the wrapped volume
    Inverse(Box<Volume>),
    /// Union of a set of child volumes
    Aggregate(AggregateVolume),
}

impl Volume {
    /// Box volume around the given bounds
    pub fn from_bounds(bounds: Bounds) -> Self {
        Self::Box(BoxVolume::new(bounds))
    }

    /// Wrap this volume in its complement
    #[must_use]
    pub fn inverse(self) -> Self {
        Self::Inverse(Box::new(self))
    }

    /// Which variant this is
    pub fn kind(&self) -> VolumeKind {
        match self {
            Self::Empty => VolumeKind::Empty,
            Self::Box(_) => VolumeKind::Box,
            Self::Sphere(_) => VolumeKind::Sphere,
            Self::Inverse(_) => VolumeKind::Inverse,
            Self::Aggregate(_) => VolumeKind::Aggregate,
        }
    }

    /// Whether this volume encloses nothing
    ///
    /// True for `Empty` and for an aggregate whose union is empty.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Aggregate(aggregate) => aggregate.resolved().is_empty(),
            _ => false,
        }
    }

    /// Whether an aggregate sits anywhere below the top of this volume
    pub fn wraps_aggregate(&self) -> bool {
        match self {
            Self::Inverse(inner) => inner.kind() == VolumeKind::Aggregate || inner.wraps_aggregate(),
            _ => false,
        }
    }

    /// Axis-aligned bounds of the volume
    ///
    /// `Empty` collapses onto the origin. The complement of a volume is
    /// unbounded, so `Inverse` reports the bounds of the volume it wraps.
    pub fn bounds(&self) -> Bounds {
        match self {
            Self::Empty => Bounds::empty(),
            Self::Box(b) => *b.bounds(),
            Self::Sphere(s) => s.bounds(),
            Self::Inverse(inner) => inner.bounds(),
            Self::Aggregate(aggregate) => aggregate.resolved().bounds(),
        }
    }

    /// Point containment
    pub fn contains(&self, point: &Point3) -> bool {
        match self {
            Self::Empty => false,
            Self::Box(b) => b.contains(point),
            Self::Sphere(s) => s.contains(point),
            Self::Inverse(inner) => !inner.contains(point),
            Self::Aggregate(aggregate) => aggregate.resolved().contains(point),
        }
    }

    /// Whether the volume is not entirely behind the plane
    pub fn intersects_plane(&self, plane: &Plane) -> bool {
        match self {
            Self::Empty => false,
            Self::Box(b) => b.intersects_plane(plane),
            Self::Sphere(s) => s.intersects_plane(plane),
            Self::Inverse(inner) => !inner.intersects_plane(plane),
            Self::Aggregate(aggregate) => aggregate.resolved().intersects_plane(plane),
        }
    }

    /// Volume-volume intersection
    ///
    /// Wrapper variants (`Inverse`, `Aggregate`) are unwrapped on either side
    /// before the concrete pairs are compared, so every recursive call works
    /// on a strictly smaller pair and the test always terminates.
    pub fn intersects(&self, other: &Volume) -> bool {
        match (self, other) {
            (Self::Empty, _) => false,
            (Self::Inverse(inner), _) => !inner.intersects(other),
            (Self::Aggregate(aggregate), _) => aggregate.resolved().intersects(other),
            (_, Self::Empty) => false,
            (_, Self::Inverse(inner)) => !inner.intersects(self),
            (_, Self::Aggregate(aggregate)) => self.intersects(aggregate.resolved()),
            (Self::Box(a), Self::Box(b)) => a.bounds().intersects(b.bounds()),
            (Self::Box(b), Self::Sphere(s)) | (Self::Sphere(s), Self::Box(b)) => {
                s.intersects_bounds(b.bounds())
            }
            (Self::Sphere(a), Self::Sphere(b)) => a.intersects_sphere(b),
        }
    }

    /// Cast a ray against the volume
    ///
    /// `Ok(None)` is a miss. Casting through an `Inverse` volume has no
    /// agreed meaning and is rejected rather than guessed at.
    pub fn intersection(&self, ray: &Ray) -> Result<Option<RayIntersection>, VolumeError> {
        match self {
            Self::Empty => Ok(None),
            Self::Box(b) => Ok(b.intersection(ray)),
            Self::Sphere(s) => Ok(s.intersection(ray)),
            Self::Inverse(_) => Err(VolumeError::UnsupportedRay(VolumeKind::Inverse)),
            Self::Aggregate(aggregate) => aggregate.resolved().intersection(ray),
        }
    }

    /// The volume carried through an affine transform
    #[must_use]
    pub fn transformed(&self, matrix: &Mat4) -> Self {
        match self {
            Self::Empty => Self::Empty,
            Self::Box(b) => Self::Box(b.transformed(matrix)),
            Self::Sphere(s) => Self::Sphere(s.transformed(matrix)),
            Self::Inverse(inner) => inner.transformed(matrix).inverse(),
            Self::Aggregate(aggregate) => {
                Self::Aggregate(aggregate.map_resolved(|resolved| resolved.transformed(matrix)))
            }
        }
    }
}

impl From<BoxVolume> for Volume {
    fn from(volume: BoxVolume) -> Self {
        Self::Box(volume)
    }
}

impl From<SphereVolume> for Volume {
    fn from(volume: SphereVolume) -> Self {
        Self::Sphere(volume)
    }
}

impl From<AggregateVolume> for Volume {
    fn from(volume: AggregateVolume) -> Self {
        Self::Aggregate(volume)
    }
}
