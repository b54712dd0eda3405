//! Geometric primitives for spatial queries
//!
//! Bounds, planes, rays and frustums. Nothing in here knows about the node
//! tree; the scene graph depends on these to decide what to skip.

mod bounds;
mod frustum;
mod plane;
mod ray;

pub use bounds::{Bounds, BoundsBuilder};
pub use frustum::Frustum;
pub use plane::{HalfSpace, Plane};
pub use ray::{Ray, RayHits, RayIntersection};
