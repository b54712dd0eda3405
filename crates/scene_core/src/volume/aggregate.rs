//! Aggregate volume summarizing a set of child volumes

use super::{BoxVolume, SphereVolume, Volume, VolumeError, VolumeKind};
use crate::geometry::{Bounds, BoundsBuilder};

/// Union of a set of child volumes, expressed as one concrete volume kind
///
/// The target kind is fixed at creation and must be buildable from bounds,
/// so only [`VolumeKind::Box`] and [`VolumeKind::Sphere`] are accepted. The
/// resolved instance starts out [`Volume::Empty`] and is replaced on every
/// [`recompute`](Self::recompute).
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateVolume {
    target: VolumeKind,
    resolved: Box<Volume>,
}

impl AggregateVolume {
    /// Create an aggregate that resolves to the given kind
    pub fn new(target: VolumeKind) -> Result<Self, VolumeError> {
        match target {
            VolumeKind::Box | VolumeKind::Sphere => Ok(Self {
                target,
                resolved: Box::new(Volume::Empty),
            }),
            VolumeKind::Aggregate => Err(VolumeError::NestedAggregate),
            other => Err(VolumeError::UnsupportedAggregateTarget(other)),
        }
    }

    /// Aggregate resolving to a box, the common case for subtree culling
    pub fn boxed() -> Self {
        Self {
            target: VolumeKind::Box,
            resolved: Box::new(Volume::Empty),
        }
    }

    /// The concrete kind this aggregate resolves to
    pub fn target(&self) -> VolumeKind {
        self.target
    }

    /// The most recently computed union
    pub fn resolved(&self) -> &Volume {
        &self.resolved
    }

    /// Replace the resolved instance with the union of `children`
    ///
    /// Empty children are skipped; with nothing left the aggregate resolves
    /// to [`Volume::Empty`].
    pub fn recompute<'a>(&mut self, children: impl IntoIterator<Item = &'a Volume>) {
        let mut builder = BoundsBuilder::new();
        for child in children.into_iter().filter(|child| !child.is_empty()) {
            builder.add_bounds(&child.bounds());
        }

        let volume = if builder.is_empty() {
            Volume::Empty
        } else {
            self.build(builder.build())
        };
        *self.resolved = volume;
    }

    /// Builder pattern: aggregate already resolved over `children`
    #[must_use]
    pub fn over<'a>(mut self, children: impl IntoIterator<Item = &'a Volume>) -> Self {
        self.recompute(children);
        self
    }

    /// Copy of this aggregate with its resolved instance mapped through `f`
    pub(super) fn map_resolved(&self, f: impl FnOnce(&Volume) -> Volume) -> Self {
        Self {
            target: self.target,
            resolved: Box::new(f(&self.resolved)),
        }
    }

    fn build(&self, bounds: Bounds) -> Volume {
        match self.target {
            VolumeKind::Sphere => Volume::Sphere(SphereVolume::enclosing(&bounds)),
            _ => Volume::Box(BoxVolume::new(bounds)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Point3;

    fn cube(min: f32, max: f32) -> Volume {
        Volume::Box(BoxVolume::new(Bounds::new(
            Point3::new(min, min, min),
            Point3::new(max, max, max),
        )))
    }

    #[test]
    fn test_rejects_nested_and_unbuildable_targets() {
        assert_eq!(
            AggregateVolume::new(VolumeKind::Aggregate),
            Err(VolumeError::NestedAggregate)
        );
        assert_eq!(
            AggregateVolume::new(VolumeKind::Inverse),
            Err(VolumeError::UnsupportedAggregateTarget(VolumeKind::Inverse))
        );
        assert!(AggregateVolume::new(VolumeKind::Sphere).is_ok());
    }

    #[test]
    fn test_defaults_to_empty() {
        assert_eq!(AggregateVolume::boxed().resolved(), &Volume::Empty);
    }

    #[test]
    fn test_recompute_unions_children() {
        let children = [cube(1.0, 2.0), Volume::Empty, cube(3.0, 4.0)];
        let aggregate = AggregateVolume::boxed().over(&children);

        assert_eq!(aggregate.resolved().kind(), VolumeKind::Box);
        let bounds = aggregate.resolved().bounds();
        // The empty child must not drag the origin in
        assert_eq!(bounds.min(), Point3::new(1.0, 1.0, 1.0));
        assert_eq!(bounds.max(), Point3::new(4.0, 4.0, 4.0));
    }

    #[test]
    fn test_recompute_with_only_empty_children() {
        let mut aggregate = AggregateVolume::boxed().over(&[cube(0.0, 1.0)]);
        aggregate.recompute(&[Volume::Empty]);
        assert!(aggregate.resolved().is_empty());
    }

    #[test]
    fn test_sphere_target_encloses_children() {
        let children = [cube(0.0, 1.0), cube(5.0, 6.0)];
        let aggregate = AggregateVolume::new(VolumeKind::Sphere).unwrap().over(&children);

        let Volume::Sphere(sphere) = aggregate.resolved() else {
            panic!("expected a sphere, got {:?}", aggregate.resolved());
        };
        for child in &children {
            for corner in child.bounds().corners() {
                assert!((corner - sphere.center).norm() <= sphere.radius + 1e-4);
            }
        }
    }
}
