//! Point group scene graph
//!
//! The acupoint markers hang off a single group node that rotates with the
//! body. Each marker is a small composite: a core sphere (the node that
//! carries the point's identity) with a decorative glow sphere as its child.
//! Both are pickable, but only the core knows which point it belongs to, so
//! picking has to walk from whatever it hit up to the nearest identity.
//!
//! Nodes live in a flat arena; parents are always pushed before children.

use crate::data::PointRegistry;
use crate::rasterizer::Vec3;
use super::transform::{GlobalTransform, Transform};

pub type NodeId = usize;

#[derive(Debug, Clone)]
pub struct SceneNode {
    /// Point id, present only on identity-bearing nodes
    pub identity: Option<String>,
    pub parent: Option<NodeId>,
    pub local: Transform,
    /// Sphere radius in local units; 0 means not pickable
    pub hit_radius: f32,
}

/// One acupoint marker: its core and glow node ids
#[derive(Debug, Clone)]
pub struct Marker {
    pub id: String,
    pub core: NodeId,
    pub glow: NodeId,
}

/// A pickable sphere in world space
#[derive(Debug, Clone, Copy)]
pub struct HitVolume {
    pub node: NodeId,
    pub center: Vec3,
    pub radius: f32,
}

pub struct PointGroup {
    nodes: Vec<SceneNode>,
    markers: Vec<Marker>,
    root: NodeId,
}

impl PointGroup {
    pub fn build(registry: &PointRegistry, core_radius: f32, glow_radius: f32) -> Self {
        let mut group = Self {
            nodes: Vec::with_capacity(registry.len() * 2 + 1),
            markers: Vec::with_capacity(registry.len()),
            root: 0,
        };
        group.root = group.push(SceneNode {
            identity: None,
            parent: None,
            local: Transform::IDENTITY,
            hit_radius: 0.0,
        });

        for point in registry.iter() {
            let core = group.push(SceneNode {
                identity: Some(point.id.clone()),
                parent: Some(group.root),
                local: Transform::from_position(point.position),
                hit_radius: core_radius,
            });
            let glow = group.push(SceneNode {
                identity: None,
                parent: Some(core),
                local: Transform::IDENTITY,
                hit_radius: glow_radius,
            });
            group.markers.push(Marker { id: point.id.clone(), core, glow });
        }

        group
    }

    fn push(&mut self, node: SceneNode) -> NodeId {
        self.nodes.push(node);
        self.nodes.len() - 1
    }

    pub fn rotation(&self) -> f32 {
        self.nodes[self.root].local.rotation_y
    }

    pub fn rotate(&mut self, delta: f32) {
        self.nodes[self.root].local.rotation_y += delta;
    }

    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    #[cfg(test)]
    pub fn node(&self, id: NodeId) -> Option<&SceneNode> {
        self.nodes.get(id)
    }

    /// Current pulse scale of a marker's glow
    pub fn glow_scale(&self, marker: usize) -> f32 {
        self.markers
            .get(marker)
            .map(|m| self.nodes[m.glow].local.scale)
            .unwrap_or(1.0)
    }

    pub fn set_glow_scale(&mut self, marker: usize, scale: f32) {
        if let Some(m) = self.markers.get(marker) {
            self.nodes[m.glow].local.scale = scale;
        }
    }

    /// World transforms for every node, indexed like the arena
    pub fn world_transforms(&self) -> Vec<GlobalTransform> {
        let mut out: Vec<GlobalTransform> = Vec::with_capacity(self.nodes.len());
        for node in &self.nodes {
            let global = match node.parent {
                Some(p) => GlobalTransform::from_parent_and_local(&out[p], &node.local),
                None => GlobalTransform::from_transform(&node.local),
            };
            out.push(global);
        }
        out
    }

    /// World positions of each marker's core, in marker order
    pub fn marker_positions(&self) -> Vec<Vec3> {
        let world = self.world_transforms();
        self.markers.iter().map(|m| world[m.core].position()).collect()
    }

    /// Every pickable sphere at its current (rotated, pulsed) world placement
    pub fn hit_volumes(&self) -> Vec<HitVolume> {
        let world = self.world_transforms();
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, n)| n.hit_radius > 0.0)
            .map(|(i, n)| HitVolume {
                node: i,
                center: world[i].position(),
                radius: n.hit_radius * world[i].scale(),
            })
            .collect()
    }

    /// Nearest identity at or above `node`
    pub fn owner_identity(&self, node: NodeId) -> Option<&str> {
        let mut current = Some(node);
        while let Some(id) = current {
            let n = self.nodes.get(id)?;
            if let Some(identity) = &n.identity {
                return Some(identity.as_str());
            }
            current = n.parent;
        }
        None
    }
}
