//! Resolve pass, frustum traversal and ray picking

use crate::foundation::collections::NodeId;
use crate::foundation::math::{Mat4, Point3, Vec3};
use crate::geometry::{Frustum, Ray};
use crate::volume::{Volume, VolumeKind};

use super::error::{SceneError, SceneResult};
use super::graph::SceneGraph;
use super::node::Node;

/// Counters from one resolve pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolveStats {
    /// Nodes whose transform and cull flag were resolved
    pub visited: usize,
    /// Nodes that resolved to culled
    pub culled: usize,
    /// Aggregate volumes rebuilt from their children
    pub aggregates: usize,
}

/// Counters from one frustum traversal
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TraverseStats {
    /// Counters of the resolve pass the traversal ran first
    pub resolve: ResolveStats,
    /// Nodes handed to the visitor
    pub visited: usize,
    /// Visited nodes that were both unculled and inside the frustum
    pub visible: usize,
    /// Subtrees skipped because their aggregate missed the frustum
    pub pruned: usize,
}

/// What the visitor sees for one node during [`SceneGraph::traverse`]
#[derive(Debug, Clone, Copy)]
pub struct NodeVisit<'a> {
    /// The node
    pub id: NodeId,
    /// Distance from the root, which is at depth 0
    pub depth: usize,
    /// Resolved world matrix
    pub world_matrix: &'a Mat4,
    /// Resolved culled flag
    pub culled: bool,
    /// Whether the world volume intersects the frustum
    pub in_frustum: bool,
    /// Not culled and inside the frustum
    pub visible: bool,
    /// Resolved world-space volume
    pub world_volume: &'a Volume,
}

/// Nearest hit found by [`SceneGraph::pick`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickHit {
    /// The node that was hit
    pub node: NodeId,
    /// Distance along the ray
    pub distance: f32,
    /// World-space hit point
    pub point: Point3,
    /// Approximate surface normal at the hit point
    pub normal: Vec3,
}

impl SceneGraph {
    /// Resolve transforms, cull flags and world volumes below the root
    ///
    /// Every node reachable from the root is revisited on every call, parent
    /// before children. World volumes are filled in post-order so that a
    /// group's aggregate sees its children's fresh volumes.
    pub fn resolve(&mut self) -> ResolveStats {
        let mut stats = ResolveStats::default();

        let mut order = Vec::with_capacity(self.nodes.len());
        let mut stack: Vec<(NodeId, Option<Mat4>, Option<bool>)> = vec![(self.root, None, None)];
        while let Some((id, parent_matrix, parent_culled)) = stack.pop() {
            let Some(node) = self.nodes.get_mut(id) else {
                log::warn!("Skipping dangling child {:?} during resolve", id);
                continue;
            };
            let world = *node.transform.update(parent_matrix.as_ref());
            let culled = node.cull.update(parent_culled);

            stats.visited += 1;
            if culled {
                stats.culled += 1;
            }

            stack.extend(
                node.children()
                    .iter()
                    .rev()
                    .map(|&child| (child, Some(world), Some(culled))),
            );
            order.push(id);
        }

        // Reversed pre-order puts every node after all of its descendants
        for &id in order.iter().rev() {
            self.resolve_volume(id, &mut stats);
        }

        log::trace!(
            "Resolved {} nodes ({} culled, {} aggregates)",
            stats.visited,
            stats.culled,
            stats.aggregates
        );
        stats
    }

    fn resolve_volume(&mut self, id: NodeId, stats: &mut ResolveStats) {
        let Some(node) = self.nodes.get(id) else {
            return;
        };
        // Aggregates are built from world-space children, so the group's own
        // matrix is already folded in
        let world_volume = match &node.volume {
            Volume::Aggregate(aggregate) => {
                stats.aggregates += 1;
                let child_volumes = node
                    .children()
                    .iter()
                    .filter_map(|&child| self.nodes.get(child))
                    .filter_map(|child| child.world_volume.as_ref());
                Volume::Aggregate(aggregate.clone().over(child_volumes))
            }
            other => match node.world_matrix() {
                Some(world) => other.transformed(world),
                None => return,
            },
        };

        if let Some(node) = self.nodes.get_mut(id) {
            node.world_volume = Some(world_volume);
        }
    }

    /// Resolve the graph, then walk it against a view-projection frustum
    ///
    /// The visitor is called in depth-first pre-order. A culled node is still
    /// visited, and so are its children, since a child set to show overrides
    /// a hidden parent. With `frustum_prune` enabled, the subtree below an
    /// aggregate volume that misses the frustum is skipped.
    pub fn traverse<F>(&mut self, view_projection: &Mat4, mut visitor: F) -> TraverseStats
    where
        F: FnMut(&NodeVisit<'_>),
    {
        let resolve = self.resolve();
        let frustum = Frustum::of(view_projection, self.config.clip_depth);
        let mut stats = TraverseStats {
            resolve,
            ..TraverseStats::default()
        };

        let mut stack = vec![(self.root, 0)];
        while let Some((id, depth)) = stack.pop() {
            let Some(node) = self.nodes.get(id) else {
                continue;
            };
            let (Some(world_matrix), Some(culled), Some(world_volume)) =
                (node.world_matrix(), node.culled(), node.world_volume())
            else {
                continue;
            };

            let in_frustum = frustum.intersects(world_volume);
            let visit = NodeVisit {
                id,
                depth,
                world_matrix,
                culled,
                in_frustum,
                visible: !culled && in_frustum,
                world_volume,
            };
            visitor(&visit);

            stats.visited += 1;
            if visit.visible {
                stats.visible += 1;
            }

            let prune = self.config.frustum_prune
                && !in_frustum
                && node.volume().kind() == VolumeKind::Aggregate;
            if prune {
                stats.pruned += 1;
                continue;
            }
            stack.extend(node.children().iter().rev().map(|&child| (child, depth + 1)));
        }

        stats
    }

    /// Ids of the visible mesh leaves for a view-projection matrix
    pub fn visible_meshes(&mut self, view_projection: &Mat4) -> Vec<NodeId> {
        let mut visible = Vec::new();
        self.traverse(view_projection, |visit| {
            if visit.visible {
                visible.push(visit.id);
            }
        });
        visible.retain(|&id| self.nodes.get(id).and_then(Node::mesh).is_some());
        visible
    }

    /// Nearest resolved volume hit by the ray
    ///
    /// Culled nodes and inverse volumes are never hit. An aggregate that
    /// the ray misses rules out its whole subtree. The graph must have been
    /// resolved since its last structural change.
    pub fn pick(&self, ray: &Ray) -> SceneResult<Option<PickHit>> {
        if self.node(self.root)?.world_volume().is_none() {
            return Err(SceneError::Unresolved(self.root));
        }

        let mut nearest: Option<PickHit> = None;
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            let node = self.node(id)?;
            let Some(world_volume) = node.world_volume() else {
                continue;
            };

            match world_volume.kind() {
                VolumeKind::Aggregate => {
                    if world_volume.intersection(ray)?.is_none() {
                        continue;
                    }
                }
                VolumeKind::Empty | VolumeKind::Inverse => {}
                VolumeKind::Box | VolumeKind::Sphere => {
                    if node.culled() == Some(false) {
                        if let Some(hit) = world_volume.intersection(ray)? {
                            let distance = hit.nearest();
                            if nearest.map_or(true, |best| distance < best.distance) {
                                nearest = Some(PickHit {
                                    node: id,
                                    distance,
                                    point: hit.point(distance),
                                    normal: hit.normal_at(distance),
                                });
                            }
                        }
                    }
                }
            }
            stack.extend(node.children().iter().copied());
        }

        Ok(nearest)
    }
}
