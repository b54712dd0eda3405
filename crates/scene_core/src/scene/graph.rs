//! Node arena and structural operations

use crate::config::SceneConfig;
use crate::foundation::collections::{NodeId, NodeMap};
use crate::foundation::math::{Mat4, Transform};
use crate::volume::{AggregateVolume, Volume, VolumeError};

use super::cull::CullMode;
use super::error::{SceneError, SceneResult};
use super::material_index::{batch_by_material, MaterialIndex, RenderBatch};
use super::node::{MaterialId, Mesh, Node, NodeKind, RenderableHandle};

/// Arena-backed scene graph with one distinguished root group
///
/// Nodes are addressed by [`NodeId`]. A group owns its children; a child
/// refers back to its group by id only. The root group also keeps a
/// [`MaterialIndex`] of every mesh leaf reachable from it.
#[derive(Debug)]
pub struct SceneGraph {
    pub(super) nodes: NodeMap<Node>,
    pub(super) root: NodeId,
    materials: MaterialIndex,
    pub(super) config: SceneConfig,
}

impl SceneGraph {
    /// Create a graph with the default configuration
    pub fn new() -> Self {
        Self::with_config(SceneConfig::default())
    }

    /// Create a graph with custom configuration
    pub fn with_config(config: SceneConfig) -> Self {
        let mut nodes = NodeMap::with_capacity_and_key(config.initial_capacity);
        let mut root = Node::new(NodeKind::Group(Vec::new()));
        root.name = Some("root".to_owned());
        if config.aggregate_groups {
            root.volume = AggregateVolume::boxed().into();
        }
        let root = nodes.insert(root);

        log::debug!("Created scene graph (root {:?}, {:?})", root, config);

        Self {
            nodes,
            root,
            materials: MaterialIndex::new(),
            config,
        }
    }

    /// Active configuration
    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    /// The root group
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Number of live nodes, the root included
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Whether `id` names a live node
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Look up a node
    pub fn node(&self, id: NodeId) -> SceneResult<&Node> {
        self.nodes.get(id).ok_or(SceneError::UnknownNode(id))
    }

    fn node_mut(&mut self, id: NodeId) -> SceneResult<&mut Node> {
        self.nodes.get_mut(id).ok_or(SceneError::UnknownNode(id))
    }

    /// Mesh leaves reachable from the root, keyed by material
    pub fn materials(&self) -> &MaterialIndex {
        &self.materials
    }

    /// Create a detached plain leaf
    pub fn create_leaf(&mut self) -> NodeId {
        self.nodes.insert(Node::new(NodeKind::Leaf))
    }

    /// Create a detached, empty group
    ///
    /// With `aggregate_groups` enabled the group gets an aggregate box volume.
    pub fn create_group(&mut self) -> NodeId {
        let mut node = Node::new(NodeKind::Group(Vec::new()));
        if self.config.aggregate_groups {
            node.volume = AggregateVolume::boxed().into();
        }
        self.nodes.insert(node)
    }

    /// Create a detached mesh leaf
    pub fn create_mesh(&mut self, renderable: RenderableHandle, material: MaterialId) -> NodeId {
        self.nodes.insert(Node::new(NodeKind::Mesh(Mesh {
            renderable,
            material,
        })))
    }

    /// Debug name of a node
    pub fn name(&self, id: NodeId) -> SceneResult<Option<&str>> {
        Ok(self.node(id)?.name())
    }

    /// Set the debug name of a node
    pub fn set_name(&mut self, id: NodeId, name: impl Into<String>) -> SceneResult<()> {
        self.node_mut(id)?.name = Some(name.into());
        Ok(())
    }

    /// Owning group of a node
    pub fn parent(&self, id: NodeId) -> SceneResult<Option<NodeId>> {
        Ok(self.node(id)?.parent())
    }

    /// Children of a node in insertion order
    pub fn children(&self, id: NodeId) -> SceneResult<&[NodeId]> {
        Ok(self.node(id)?.children())
    }

    /// Whether a node has no parent
    pub fn is_root(&self, id: NodeId) -> SceneResult<bool> {
        Ok(self.node(id)?.is_root())
    }

    /// Whether `ancestor` lies strictly above `id` on its parent chain
    pub fn is_ancestor_of(&self, ancestor: NodeId, id: NodeId) -> SceneResult<bool> {
        self.node(ancestor)?;
        let mut current = self.node(id)?.parent();
        while let Some(parent) = current {
            if parent == ancestor {
                return Ok(true);
            }
            current = self.node(parent)?.parent();
        }
        Ok(false)
    }

    /// Whether the node is the root group or hangs below it
    pub fn is_reachable(&self, id: NodeId) -> SceneResult<bool> {
        Ok(id == self.root || self.is_ancestor_of(self.root, id)?)
    }

    /// Attach a detached node as the last child of `parent`
    ///
    /// The child's whole subtree loses its resolved state. Mesh leaves in it
    /// enter the material index when `parent` is reachable from the root.
    pub fn attach(&mut self, parent: NodeId, child: NodeId) -> SceneResult<()> {
        self.link_checked(parent, child).map_err(|err| {
            log::warn!("Rejected attach of {:?} under {:?}: {}", child, parent, err);
            err
        })
    }

    fn link_checked(&mut self, parent: NodeId, child: NodeId) -> SceneResult<()> {
        if child == self.root {
            return Err(SceneError::RootNodeImmovable);
        }
        let child_parent = self.node(child)?.parent();
        let parent_node = self.node(parent)?;
        if !parent_node.is_group() {
            return Err(SceneError::NotAGroup(parent));
        }
        if parent_node.children().contains(&child) {
            return Err(SceneError::DuplicateChild { parent, child });
        }
        if child_parent.is_some() {
            return Err(SceneError::AlreadyAttached(child));
        }
        if parent == child || self.is_ancestor_of(child, parent)? {
            return Err(SceneError::CycleDetected { parent, child });
        }

        self.link(parent, child);
        self.invalidate_subtree(child);
        self.invalidate_ancestor_volumes(parent);

        if self.is_reachable(parent)? {
            for (material, id) in self.meshes_below(child) {
                self.materials.insert(material, id);
            }
        }

        log::debug!("Attached {:?} under {:?}", child, parent);
        Ok(())
    }

    /// Detach `child` from `parent`, leaving it a detached subtree
    pub fn detach(&mut self, parent: NodeId, child: NodeId) -> SceneResult<()> {
        self.unlink_checked(parent, child).map_err(|err| {
            log::warn!("Rejected detach of {:?} from {:?}: {}", child, parent, err);
            err
        })
    }

    fn unlink_checked(&mut self, parent: NodeId, child: NodeId) -> SceneResult<()> {
        if child == self.root {
            return Err(SceneError::RootNodeImmovable);
        }
        if !self.node(parent)?.is_group() {
            return Err(SceneError::NotAGroup(parent));
        }
        match self.node(child)?.parent() {
            None => return Err(SceneError::NotAttached(child)),
            Some(actual) if actual != parent => {
                return Err(SceneError::NotAChild { parent, child });
            }
            Some(_) => {}
        }

        if self.is_reachable(parent)? {
            for (material, id) in self.meshes_below(child) {
                self.materials.remove(material, id);
            }
        }

        if let Some(children) = self.node_mut(parent)?.children_mut() {
            children.retain(|&id| id != child);
        }
        self.node_mut(child)?.parent = None;
        self.invalidate_subtree(child);
        self.invalidate_ancestor_volumes(parent);

        log::debug!("Detached {:?} from {:?}", child, parent);
        Ok(())
    }

    /// Detach every child of a group
    pub fn clear(&mut self, group: NodeId) -> SceneResult<()> {
        let node = self.node(group)?;
        if !node.is_group() {
            return Err(SceneError::NotAGroup(group));
        }
        let children = node.children().to_vec();
        for child in children {
            self.detach(group, child)?;
        }
        log::debug!("Cleared group {:?}", group);
        Ok(())
    }

    /// Free a detached node and its whole subtree
    pub fn remove(&mut self, id: NodeId) -> SceneResult<()> {
        let rejection = if id == self.root {
            Some(SceneError::RootNodeImmovable)
        } else if self.node(id)?.parent().is_some() {
            Some(SceneError::AlreadyAttached(id))
        } else {
            None
        };
        if let Some(err) = rejection {
            log::warn!("Rejected removal of {:?}: {}", id, err);
            return Err(err);
        }

        let subtree = self.subtree(id);
        for node in &subtree {
            self.nodes.remove(*node);
        }
        log::debug!("Removed {:?} ({} nodes)", id, subtree.len());
        Ok(())
    }

    /// Deep-copy a subtree into a new detached subtree
    ///
    /// Transforms, cull modes, volumes and mesh handles are copied; resolved
    /// state is not.
    pub fn duplicate(&mut self, id: NodeId) -> SceneResult<NodeId> {
        let copy = self.node(id)?.detached_copy();
        let copy_id = self.nodes.insert(copy);

        let mut pending = vec![(id, copy_id)];
        while let Some((source, target)) = pending.pop() {
            let children = self.node(source)?.children().to_vec();
            for child in children {
                let child_copy = self.node(child)?.detached_copy();
                let child_copy = self.nodes.insert(child_copy);
                self.link(target, child_copy);
                pending.push((child, child_copy));
            }
        }
        Ok(copy_id)
    }

    /// Replace a node's local transform
    ///
    /// World matrices in the subtree are unavailable until the next resolve.
    pub fn set_transform(&mut self, id: NodeId, transform: Transform) -> SceneResult<()> {
        self.node_mut(id)?.transform.set(transform);
        self.invalidate_subtree(id);
        if let Some(parent) = self.node(id)?.parent() {
            self.invalidate_ancestor_volumes(parent);
        }
        Ok(())
    }

    /// Change a node's cull mode, effective from the next resolve
    pub fn set_cull_mode(&mut self, id: NodeId, mode: CullMode) -> SceneResult<()> {
        self.node_mut(id)?.cull.set(mode);
        Ok(())
    }

    /// Replace a node's local volume
    ///
    /// An aggregate is only rebuilt when it is the node's own volume, so one
    /// wrapped in an inverse is rejected.
    pub fn set_volume(&mut self, id: NodeId, volume: Volume) -> SceneResult<()> {
        if volume.wraps_aggregate() {
            return Err(VolumeError::WrappedAggregate.into());
        }
        self.node_mut(id)?.volume = volume;
        self.invalidate_ancestor_volumes(id);
        Ok(())
    }

    /// Resolved world matrix
    pub fn world_matrix(&self, id: NodeId) -> SceneResult<&Mat4> {
        self.node(id)?
            .world_matrix()
            .ok_or(SceneError::Unresolved(id))
    }

    /// Resolved culled flag
    pub fn is_culled(&self, id: NodeId) -> SceneResult<bool> {
        self.node(id)?.culled().ok_or(SceneError::Unresolved(id))
    }

    /// Resolved world-space volume
    pub fn world_volume(&self, id: NodeId) -> SceneResult<&Volume> {
        self.node(id)?
            .world_volume()
            .ok_or(SceneError::Unresolved(id))
    }

    /// Group the mesh leaves among `nodes` into per-material batches
    ///
    /// Non-mesh and unknown ids are skipped.
    pub fn render_batches(&self, nodes: &[NodeId]) -> Vec<RenderBatch> {
        batch_by_material(nodes.iter().filter_map(|&id| {
            self.nodes
                .get(id)
                .and_then(Node::mesh)
                .map(|mesh| (mesh.material, id))
        }))
    }

    /// Ids of `id` and everything below it, pre-order
    pub(super) fn subtree(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            let Some(node) = self.nodes.get(current) else {
                continue;
            };
            out.push(current);
            stack.extend(node.children().iter().rev());
        }
        out
    }

    fn meshes_below(&self, id: NodeId) -> Vec<(MaterialId, NodeId)> {
        self.subtree(id)
            .into_iter()
            .filter_map(|node| {
                self.nodes
                    .get(node)
                    .and_then(Node::mesh)
                    .map(|mesh| (mesh.material, node))
            })
            .collect()
    }

    fn link(&mut self, parent: NodeId, child: NodeId) {
        if let Some(children) = self.nodes.get_mut(parent).and_then(Node::children_mut) {
            children.push(child);
        }
        if let Some(node) = self.nodes.get_mut(child) {
            node.parent = Some(parent);
        }
    }

    fn invalidate_subtree(&mut self, id: NodeId) {
        for node in self.subtree(id) {
            if let Some(node) = self.nodes.get_mut(node) {
                node.invalidate();
            }
        }
    }

    /// Aggregates on the chain above a change no longer describe their subtree
    fn invalidate_ancestor_volumes(&mut self, id: NodeId) {
        let mut current = Some(id);
        while let Some(node) = current.and_then(|id| self.nodes.get_mut(id)) {
            node.world_volume = None;
            current = node.parent;
        }
    }
}

impl Default for SceneGraph {
    fn default() -> Self {
        Self::new()
    }
}
