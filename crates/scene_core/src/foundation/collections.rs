//! Specialized collection types

pub use slotmap::SlotMap;

slotmap::new_key_type! {
    /// Stable handle to a node stored in the scene arena.
    ///
    /// Handles carry a generation, so a handle to a removed node never
    /// aliases a node created later in the same slot.
    pub struct NodeId;
}

/// Handle-based map keyed by [`NodeId`]
pub type NodeMap<T> = SlotMap<NodeId, T>;
