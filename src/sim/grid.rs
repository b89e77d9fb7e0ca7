//! Logical node grid laid over the play plane
//!
//! Nodes sit on a regular lattice spanning a rectangle on the x/z plane,
//! generated row-major from the top-left corner.

use glam::{Vec3, Vec3Swizzles};
use serde::{Deserialize, Serialize};

use super::difficulty::DifficultyTier;

/// Index of a node inside its grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub usize);

/// Rectangle on the x/z plane the grid spans
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub center: Vec3,
    /// Extent along x
    pub width: f32,
    /// Extent along z
    pub depth: f32,
}

impl Bounds {
    pub fn new(center: Vec3, width: f32, depth: f32) -> Self {
        Self {
            center,
            width,
            depth,
        }
    }

    /// Corner the first node is placed at (min x, max z)
    pub fn top_left(&self) -> Vec3 {
        self.center + Vec3::new(-self.width / 2.0, 0.0, self.depth / 2.0)
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self::new(Vec3::ZERO, crate::consts::PLANE_WIDTH, crate::consts::PLANE_DEPTH)
    }
}

/// A single grid node
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    pub row: u32,
    pub col: u32,
    pub position: Vec3,
}

/// The node lattice for one session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Grid {
    pub cols: u32,
    pub rows: u32,
    pub bounds: Bounds,
    nodes: Vec<Node>,
}

impl Grid {
    /// Build the lattice for `tier` over `bounds`
    ///
    /// Degenerate bounds collapse the lattice but never fail.
    pub fn build(tier: DifficultyTier, bounds: Bounds) -> Self {
        let (cols, rows) = tier.dimensions();
        Self::with_dimensions(cols, rows, bounds)
    }

    /// Build a lattice of `cols` x `rows` cells
    pub fn with_dimensions(cols: u32, rows: u32, bounds: Bounds) -> Self {
        let offset_x = if cols > 0 { bounds.width / cols as f32 } else { 0.0 };
        let offset_z = if rows > 0 { bounds.depth / rows as f32 } else { 0.0 };
        let top_left = bounds.top_left();

        let mut nodes = Vec::with_capacity(((cols + 1) * (rows + 1)) as usize);
        for row in 0..=rows {
            for col in 0..=cols {
                let position =
                    top_left + Vec3::new(offset_x * col as f32, 0.0, -offset_z * row as f32);
                nodes.push(Node {
                    id: NodeId(nodes.len()),
                    row,
                    col,
                    position,
                });
            }
        }

        log::debug!(
            "Built {}x{} grid ({} nodes, cell {:.2}x{:.2})",
            cols,
            rows,
            nodes.len(),
            offset_x,
            offset_z
        );

        Self {
            cols,
            rows,
            bounds,
            nodes,
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    pub fn position(&self, id: NodeId) -> Option<Vec3> {
        self.node(id).map(|n| n.position)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        id.0 < self.nodes.len()
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn iter(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    /// Canonical start node of the first level (the midpoint index)
    pub fn center_node(&self) -> NodeId {
        NodeId(self.nodes.len() / 2)
    }

    /// A point past the top-left corner that resolves to no node at `radius`
    pub fn off_plane_point(&self, radius: f32) -> Vec3 {
        self.bounds.top_left() + Vec3::new(-2.0 * radius, 0.0, 2.0 * radius)
    }

    /// Resolve a point on the plane to the nearest node within `radius`
    ///
    /// Height (y) is ignored. Returns `None` when nothing is close enough.
    pub fn node_at(&self, point: Vec3, radius: f32) -> Option<NodeId> {
        let target = point.xz();
        self.nodes
            .iter()
            .map(|n| (n.id, n.position.xz().distance_squared(target)))
            .filter(|(_, d2)| *d2 <= radius * radius)
            .min_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
            .map(|(id, _)| id)
    }
}
