//! Scene graph
//!
//! Nodes live in a slot-map arena owned by [`SceneGraph`]. Groups own their
//! children by id, children point back at their group by id, and the
//! distinguished root group indexes every mesh leaf below it by material.
//!
//! ## Frame flow
//!
//! ```text
//! attach / detach / set_transform      (invalidate the touched subtree)
//!      ↓
//! resolve                              (world matrices, cull flags, volumes)
//!      ↓
//! traverse / pick / render_batches     (read resolved state)
//! ```
//!
//! Reading a world matrix or volume that a mutation invalidated is an error
//! until the next resolve, never a stale answer.

mod cull;
mod error;
mod graph;
mod material_index;
mod node;
mod transform;
mod traversal;


pub use cull::{CullMode, LocalCullState};
pub use error::{SceneError, SceneResult};
pub use graph::SceneGraph;
pub use material_index::{batch_by_material, MaterialIndex, RenderBatch};
pub use node::{MaterialId, Mesh, Node, NodeKind, RenderableHandle};
pub use transform::LocalTransform;
pub use traversal::{NodeVisit, PickHit, ResolveStats, TraverseStats};
