//! Scene nodes stored in the graph arena

use crate::foundation::collections::NodeId;
use crate::foundation::math::{Mat4, Transform};
use crate::volume::Volume;

use super::cull::{CullMode, LocalCullState};
use super::transform::LocalTransform;

/// Opaque material identity used to key render batches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MaterialId(pub u32);

/// Opaque handle to whatever the renderer draws for a mesh node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RenderableHandle(pub u64);

/// Renderable payload of a mesh leaf
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Mesh {
    /// What to draw
    pub renderable: RenderableHandle,
    /// Which material to draw it with
    pub material: MaterialId,
}

/// What a node carries besides its transform, cull state and volume
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// Plain leaf, useful as a pivot or a picking target
    Leaf,
    /// Leaf bearing a renderable
    Mesh(Mesh),
    /// Ordered list of owned children
    Group(Vec<NodeId>),
}

/// A node in the scene arena
///
/// The parent link is a plain handle and never owns anything; ownership runs
/// from a group to its children only.
#[derive(Debug, Clone)]
pub struct Node {
    pub(super) name: Option<String>,
    pub(super) parent: Option<NodeId>,
    pub(super) kind: NodeKind,
    pub(super) transform: LocalTransform,
    pub(super) cull: LocalCullState,
    pub(super) volume: Volume,
    pub(super) world_volume: Option<Volume>,
}

impl Node {
    pub(super) fn new(kind: NodeKind) -> Self {
        Self {
            name: None,
            parent: None,
            kind,
            transform: LocalTransform::default(),
            cull: LocalCullState::default(),
            volume: Volume::Empty,
            world_volume: None,
        }
    }

    /// Optional debug name
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Owning group, `None` while detached
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Whether the node has no parent
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// Node payload
    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    /// Children in insertion order; empty for leaves
    pub fn children(&self) -> &[NodeId] {
        match &self.kind {
            NodeKind::Group(children) => children,
            _ => &[],
        }
    }

    /// Whether the node can hold children
    pub fn is_group(&self) -> bool {
        matches!(self.kind, NodeKind::Group(_))
    }

    /// Mesh payload, if this is a mesh leaf
    pub fn mesh(&self) -> Option<&Mesh> {
        match &self.kind {
            NodeKind::Mesh(mesh) => Some(mesh),
            _ => None,
        }
    }

    /// Local transform relative to the parent
    pub fn transform(&self) -> &Transform {
        self.transform.local()
    }

    /// Cull mode as set by the user
    pub fn cull_mode(&self) -> CullMode {
        self.cull.mode()
    }

    /// Volume as set by the user; for an aggregate, only its declaration
    pub fn volume(&self) -> &Volume {
        &self.volume
    }

    /// World matrix from the last resolve pass
    pub fn world_matrix(&self) -> Option<&Mat4> {
        self.transform.matrix()
    }

    /// Culled flag from the last resolve pass
    pub fn culled(&self) -> Option<bool> {
        self.cull.culled()
    }

    /// World-space volume from the last resolve pass
    pub fn world_volume(&self) -> Option<&Volume> {
        self.world_volume.as_ref()
    }

    pub(super) fn children_mut(&mut self) -> Option<&mut Vec<NodeId>> {
        match &mut self.kind {
            NodeKind::Group(children) => Some(children),
            _ => None,
        }
    }

    /// Drop every resolved value of this node alone
    pub(super) fn invalidate(&mut self) {
        self.transform.invalidate();
        self.cull.invalidate();
        self.world_volume = None;
    }

    /// Unattached copy without children or resolved state
    pub(super) fn detached_copy(&self) -> Self {
        let kind = match &self.kind {
            NodeKind::Group(_) => NodeKind::Group(Vec::new()),
            other => other.clone(),
        };
        Self {
            name: self.name.clone(),
            parent: None,
            kind,
            transform: LocalTransform::new(self.transform.local().clone()),
            cull: LocalCullState::new(self.cull.mode()),
            volume: self.volume.clone(),
            world_volume: None,
        }
    }
}
