//! Per-node local transform with a cached world matrix

use crate::foundation::math::{Mat4, Transform};

/// A node's local transform and its last resolved world matrix
///
/// The cache is the only dirty marker: a node is dirty exactly when no
/// world matrix is cached. Only the resolve pass fills the cache.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LocalTransform {
    local: Transform,
    world: Option<Mat4>,
}

impl LocalTransform {
    /// Unresolved transform holding `local`
    pub fn new(local: Transform) -> Self {
        Self { local, world: None }
    }

    /// The local transform relative to the parent
    pub fn local(&self) -> &Transform {
        &self.local
    }

    /// Replace the local transform; the node is dirty until the next resolve
    pub fn set(&mut self, local: Transform) {
        self.local = local;
        self.world = None;
    }

    /// Drop the cached world matrix
    pub fn invalidate(&mut self) {
        self.world = None;
    }

    /// Whether no world matrix is cached
    pub fn is_dirty(&self) -> bool {
        self.world.is_none()
    }

    /// Resolve the world matrix against the parent's resolved one
    ///
    /// Without a parent the world matrix is the local matrix. An identity
    /// local transform copies the parent's matrix unchanged.
    pub fn update(&mut self, parent: Option<&Mat4>) -> &Mat4 {
        let world = match parent {
            None => self.local.to_matrix(),
            Some(parent) if self.local.is_identity() => *parent,
            Some(parent) => parent * self.local.to_matrix(),
        };
        self.world.insert(world)
    }

    /// The resolved world matrix, `None` while dirty
    pub fn matrix(&self) -> Option<&Mat4> {
        self.world.as_ref()
    }
}
