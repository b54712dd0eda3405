//! # Scene Core
//!
//! The spatial backbone of a real-time renderer: a scene graph that composes
//! local transforms into world matrices, keeps bounding volumes per node and
//! per subtree, and tests them against view frustums and rays.
//!
//! ## Features
//!
//! - **Bounding Volumes**: Boxes, spheres, complements and subtree aggregates
//! - **Frustum Culling**: Plane extraction from view-projection matrices
//! - **Ray Picking**: Slab and quadratic ray tests with hit normals
//! - **Scene Graph**: Arena-backed node tree with lazy world-matrix resolution
//! - **Render Batching**: Material-keyed index of mesh leaves
//!
//! ## Quick Start
//!
//! ```rust
//! use scene_core::prelude::*;
//!
//! fn main() -> Result<(), SceneError> {
//!     let mut scene = SceneGraph::new();
//!     let mesh = scene.create_mesh(RenderableHandle(1), MaterialId(0));
//!     scene.set_volume(mesh, Volume::from(SphereVolume::new(Point3::origin(), 0.5)))?;
//!     scene.attach(scene.root(), mesh)?;
//!
//!     let visible = scene.visible_meshes(&Mat4::identity());
//!     assert_eq!(visible, vec![mesh]);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod config;
pub mod foundation;
pub mod geometry;
pub mod scene;
pub mod volume;

/// Common imports for scene users
pub mod prelude {
    pub use crate::{
        config::{ClipDepth, Config, SceneConfig},
        foundation::{
            collections::NodeId,
            math::{Mat4, Point3, Transform, Vec3},
        },
        geometry::{Bounds, BoundsBuilder, Frustum, Plane, Ray, RayHits},
        scene::{
            CullMode, MaterialId, NodeVisit, PickHit, RenderableHandle, SceneError, SceneGraph,
        },
        volume::{AggregateVolume, BoxVolume, SphereVolume, Volume, VolumeError, VolumeKind},
    };
}
