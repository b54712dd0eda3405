//! Material-keyed index of mesh leaves and render batching
//!
//! Grouping draws by material keeps state changes down when the renderer
//! walks the batches.

use std::collections::HashMap;

use crate::foundation::collections::NodeId;

use super::node::MaterialId;

/// Mesh leaves reachable from the root, keyed by material
#[derive(Debug, Clone, Default)]
pub struct MaterialIndex {
    entries: HashMap<MaterialId, Vec<NodeId>>,
}

impl MaterialIndex {
    /// Create an empty index
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `node` under `material`; recording twice is a no-op
    pub fn insert(&mut self, material: MaterialId, node: NodeId) {
        let nodes = self.entries.entry(material).or_default();
        if !nodes.contains(&node) {
            nodes.push(node);
        }
    }

    /// Forget `node` under `material`, dropping the key once it is unused
    pub fn remove(&mut self, material: MaterialId, node: NodeId) {
        if let Some(nodes) = self.entries.get_mut(&material) {
            nodes.retain(|&id| id != node);
            if nodes.is_empty() {
                self.entries.remove(&material);
            }
        }
    }

    /// Nodes drawn with `material`
    pub fn get(&self, material: MaterialId) -> &[NodeId] {
        self.entries.get(&material).map_or(&[], Vec::as_slice)
    }

    /// Materials currently in use
    pub fn materials(&self) -> impl Iterator<Item = MaterialId> + '_ {
        self.entries.keys().copied()
    }

    /// Number of indexed nodes across all materials
    pub fn node_count(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    /// Number of distinct materials
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is indexed
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Forget everything
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

/// Nodes sharing one material
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderBatch {
    /// Material used by all nodes in this batch
    pub material: MaterialId,

    /// Nodes in this batch
    pub nodes: Vec<NodeId>,
}

impl RenderBatch {
    /// Create a new empty batch for a material
    pub fn new(material: MaterialId) -> Self {
        Self {
            material,
            nodes: Vec::new(),
        }
    }

    /// Number of nodes in the batch
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the batch has no nodes
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Batch `(material, node)` pairs by material, ordered by material id
pub fn batch_by_material(items: impl IntoIterator<Item = (MaterialId, NodeId)>) -> Vec<RenderBatch> {
    let mut batches: HashMap<MaterialId, RenderBatch> = HashMap::new();
    for (material, node) in items {
        batches
            .entry(material)
            .or_insert_with(|| RenderBatch::new(material))
            .nodes
            .push(node);
    }

    let mut batches: Vec<RenderBatch> = batches.into_values().collect();
    batches.sort_by_key(|batch| batch.material);
    batches
}
