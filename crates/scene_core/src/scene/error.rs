//! Scene graph errors

use thiserror::Error;

use crate::foundation::collections::NodeId;
use crate::volume::VolumeError;

/// Structural violations reported by [`SceneGraph`](super::SceneGraph) operations
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneError {
    /// The handle does not name a live node
    #[error("node {0:?} does not exist")]
    UnknownNode(NodeId),

    /// The node already has a parent
    #[error("node {0:?} is already attached to a group")]
    AlreadyAttached(NodeId),

    /// The node has no parent to detach from
    #[error("node {0:?} is not attached to any group")]
    NotAttached(NodeId),

    /// The node is attached, but to a different group
    #[error("node {child:?} is not a child of {parent:?}")]
    NotAChild {
        /// Group the caller named
        parent: NodeId,
        /// Node the caller tried to detach
        child: NodeId,
    },

    /// The group already holds this child
    #[error("node {child:?} is already a child of {parent:?}")]
    DuplicateChild {
        /// Group holding the child
        parent: NodeId,
        /// Child attached a second time
        child: NodeId,
    },

    /// A group operation was invoked on a node that holds no children
    #[error("node {0:?} is not a group")]
    NotAGroup(NodeId),

    /// Attaching would make a node its own ancestor
    #[error("attaching {child:?} under {parent:?} would create a cycle")]
    CycleDetected {
        /// Requested parent
        parent: NodeId,
        /// Requested child
        child: NodeId,
    },

    /// The root group cannot be attached, detached, or removed
    #[error("the root node cannot be moved or removed")]
    RootNodeImmovable,

    /// A resolved value was read before the resolve pass produced it
    #[error("node {0:?} has not been resolved since its last change")]
    Unresolved(NodeId),

    /// Volume construction or query failure
    #[error("volume error: {0}")]
    Volume(#[from] VolumeError),
}

/// Result alias for scene graph operations
pub type SceneResult<T> = Result<T, SceneError>;
