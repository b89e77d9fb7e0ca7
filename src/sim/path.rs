//! Goal path generation
//!
//! A goal path starts at the player's current node and appends uniformly
//! drawn nodes, never repeating the immediately preceding entry.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::difficulty::DifficultyTier;
use super::grid::{Grid, NodeId};

/// Redraws allowed before falling back to a linear scan
pub const MAX_REDRAWS: u32 = 16;

/// Ordered nodes the player must reproduce
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoalPath {
    nodes: Vec<NodeId>,
}

impl GoalPath {
    pub fn new(nodes: Vec<NodeId>) -> Self {
        Self { nodes }
    }

    /// Number of nodes, including the start
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of segments the player has to trace
    pub fn edges(&self) -> usize {
        self.nodes.len().saturating_sub(1)
    }

    pub fn get(&self, index: usize) -> Option<NodeId> {
        self.nodes.get(index).copied()
    }

    pub fn start(&self) -> Option<NodeId> {
        self.nodes.first().copied()
    }

    pub fn last(&self) -> Option<NodeId> {
        self.nodes.last().copied()
    }

    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    /// True when no two consecutive entries are the same node
    pub fn has_no_immediate_repeat(&self) -> bool {
        self.nodes.windows(2).all(|w| w[0] != w[1])
    }
}

/// Generate the goal path for `level` starting at `start`
///
/// Draws come from `0..grid.len() - 1`; the last grid index is never drawn.
pub fn generate_path<R: Rng>(
    grid: &Grid,
    level: u32,
    tier: DifficultyTier,
    start: NodeId,
    rng: &mut R,
) -> GoalPath {
    let length = tier.path_length(level);
    // Guard the single-node grid so the draw range is never empty
    let usable = grid.len().saturating_sub(1).max(1);

    let mut nodes = Vec::with_capacity(length + 1);
    nodes.push(start);

    for _ in 0..length {
        let prev = nodes[nodes.len() - 1];
        let next = draw_distinct(usable, prev, rng);
        nodes.push(next);
    }

    log::debug!(
        "Generated {:?} path for level {}: {} edges from node {}",
        tier,
        level,
        length,
        start.0
    );

    GoalPath::new(nodes)
}

/// Draw a node in `0..usable` different from `prev`
///
/// Bounded redraws, then the first differing node by linear scan. Only a
/// single usable node that equals `prev` yields a repeat.
fn draw_distinct<R: Rng>(usable: usize, prev: NodeId, rng: &mut R) -> NodeId {
    for _ in 0..=MAX_REDRAWS {
        let candidate = NodeId(rng.random_range(0..usable));
        if candidate != prev {
            return candidate;
        }
    }

    log::debug!("Redraw cap hit after node {}, scanning", prev.0);
    (0..usable)
        .map(NodeId)
        .find(|&n| n != prev)
        .unwrap_or(prev)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::grid::Bounds;
    use proptest::prelude::*;
    use rand::{RngCore, SeedableRng};
    use rand_pcg::Pcg32;

    /// Generator stuck on zero: every draw lands on node 0
    struct ZeroRng;

    impl RngCore for ZeroRng {
        fn next_u32(&mut self) -> u32 {
            0
        }

        fn next_u64(&mut self) -> u64 {
            0
        }

        fn fill_bytes(&mut self, dst: &mut [u8]) {
            dst.fill(0);
        }
    }

    fn grid(tier: DifficultyTier) -> Grid {
        Grid::build(tier, Bounds::default())
    }

    #[test]
    fn test_easy_level_one() {
        let grid = grid(DifficultyTier::Easy);
        let mut rng = Pcg32::seed_from_u64(7);
        let path = generate_path(&grid, 1, DifficultyTier::Easy, grid.center_node(), &mut rng);
        assert_eq!(path.len(), 3);
        assert_eq!(path.edges(), 2);
        assert_eq!(path.start(), Some(grid.center_node()));
        assert!(path.has_no_immediate_repeat());
    }

    #[test]
    fn test_medium_level_three() {
        let grid = grid(DifficultyTier::Medium);
        let mut rng = Pcg32::seed_from_u64(3);
        let path = generate_path(&grid, 3, DifficultyTier::Medium, NodeId(0), &mut rng);
        assert_eq!(path.len(), 8);
    }

    #[test]
    fn test_last_index_never_drawn() {
        let grid = grid(DifficultyTier::Easy);
        let last = NodeId(grid.len() - 1);
        let mut rng = Pcg32::seed_from_u64(42);
        for level in 1..50 {
            let path = generate_path(&grid, level, DifficultyTier::Easy, NodeId(0), &mut rng);
            assert!(path.nodes()[1..].iter().all(|&n| n != last));
        }
    }

    #[test]
    fn test_same_seed_same_path() {
        let grid = grid(DifficultyTier::Hard);
        let mut a = Pcg32::seed_from_u64(99999);
        let mut b = Pcg32::seed_from_u64(99999);
        let pa = generate_path(&grid, 6, DifficultyTier::Hard, NodeId(4), &mut a);
        let pb = generate_path(&grid, 6, DifficultyTier::Hard, NodeId(4), &mut b);
        assert_eq!(pa, pb);
    }

    #[test]
    fn test_two_usable_nodes_alternate() {
        // 2x0 lattice: three nodes, two drawable
        let grid = Grid::with_dimensions(2, 0, Bounds::default());
        let mut rng = Pcg32::seed_from_u64(1);
        let path = generate_path(&grid, 9, DifficultyTier::Easy, NodeId(0), &mut rng);
        assert!(path.has_no_immediate_repeat());
        let expected: Vec<NodeId> = (0..path.len()).map(|i| NodeId(i % 2)).collect();
        assert_eq!(path.nodes(), expected.as_slice());
    }

    #[test]
    fn test_redraw_cap_falls_back_to_scan() {
        let grid = grid(DifficultyTier::Easy);
        let path = generate_path(&grid, 3, DifficultyTier::Easy, NodeId(0), &mut ZeroRng);
        let expected: Vec<NodeId> = [0, 1, 0, 1, 0].into_iter().map(NodeId).collect();
        assert_eq!(path.nodes(), expected.as_slice());
    }

    #[test]
    fn test_single_usable_node_terminates() {
        // 1x0 lattice: two nodes, only node 0 drawable
        let grid = Grid::with_dimensions(1, 0, Bounds::default());
        let mut rng = Pcg32::seed_from_u64(1);
        let path = generate_path(&grid, 2, DifficultyTier::Easy, NodeId(0), &mut rng);
        assert_eq!(path.len(), 4);
        assert!(path.nodes().iter().all(|&n| n == NodeId(0)));
    }

    proptest! {
        #[test]
        fn prop_path_invariants(seed in any::<u64>(), level in 1u32..40, tier_ix in 0usize..4) {
            let tier = DifficultyTier::from_index(tier_ix).unwrap();
            let grid = grid(tier);
            let mut rng = Pcg32::seed_from_u64(seed);
            let start = grid.center_node();
            let path = generate_path(&grid, level, tier, start, &mut rng);

            let expected = ((level + 1) as f32 * tier.path_length_factor()) as usize + 1;
            prop_assert_eq!(path.len(), expected);
            prop_assert_eq!(path.start(), Some(start));
            prop_assert!(path.has_no_immediate_repeat());
            prop_assert!(path.nodes().iter().all(|&n| grid.contains(n)));
        }
    }
}
