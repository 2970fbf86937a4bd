//! A census of the tree's nodes, mostly useful for verifying that the
//! adaptive layout does what the workload suggests it should.

use std::collections::HashMap;

#[derive(Debug)]
pub struct NodeStats {
    /// Child capacity of the variant (4, 16, 48 or 256).
    pub width: usize,
    pub total_nodes: usize,
    pub total_children: usize,
    /// Fraction of the variant's slots actually in use.
    pub density: f64,
}

#[derive(Debug, Default)]
pub struct TreeStats {
    /// Per-variant statistics, keyed by the variant's width.
    pub node_stats: HashMap<usize, NodeStats>,
    pub num_leaves: usize,
    pub num_inner_nodes: usize,
    pub total_density: f64,
    pub max_height: usize,
}

pub(crate) fn update_tree_stats(tree_stats: &mut TreeStats, width: usize, num_children: usize) {
    tree_stats
        .node_stats
        .entry(width)
        .and_modify(|e| {
            e.total_nodes += 1;
            e.total_children += num_children;
        })
        .or_insert(NodeStats {
            width,
            total_nodes: 1,
            total_children: num_children,
            density: 0.0,
        });
}
