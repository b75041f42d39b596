//! Seeded subgraph extraction.
//!
//! Everything within `depth` hops of the seed set becomes the subgraph; all
//! other nodes (including those unreachable from the seeds) become the
//! remainder. Both outputs are independently renumbered.

use std::ops::ControlFlow;

use tracing::debug;

use super::bfs::bfs_levels;
use super::mask::{mask_with_config, MaskConfig, NodeMask};
use crate::models::{Graph, NodeId};
use crate::{GraphError, Result};

/// Extraction configuration.
#[derive(Debug, Clone, Default)]
pub struct ExtractConfig {
    /// Traversal radius; 0 keeps only the seeds.
    pub depth: u32,
    /// Compaction settings used for both outputs.
    pub mask: MaskConfig,
}

impl ExtractConfig {
    /// Create new extraction configuration.
    pub fn new(depth: u32) -> Self {
        Self {
            depth,
            mask: MaskConfig::default(),
        }
    }

    /// Set compaction settings.
    pub fn with_mask(mut self, mask: MaskConfig) -> Self {
        self.mask = mask;
        self
    }
}

/// Result of a seeded extraction.
#[derive(Debug, Clone)]
pub struct Extraction<L> {
    /// Nodes within the traversal radius of the seeds.
    pub subgraph: Graph<L>,
    /// Every other node.
    pub remainder: Graph<L>,
}

/// Mark every node within `depth` hops of `seeds`.
pub fn reach_mask<L>(graph: &Graph<L>, seeds: &[NodeId], depth: u32) -> Result<NodeMask> {
    if seeds.is_empty() {
        return Err(GraphError::InvalidSeed(u64::MAX));
    }
    let n = graph.node_count();
    if let Some(bad) = seeds.iter().find(|s| s.index() >= n) {
        return Err(GraphError::InvalidSeed(bad.0 as u64));
    }

    let mut keep = vec![false; n];
    for &seed in seeds {
        keep[seed.index()] = true;
    }

    if depth == 0 {
        return Ok(NodeMask::from(keep));
    }

    let reached = bfs_levels(graph.adjacency(), seeds, |level, level_depth| {
        for &node in level {
            keep[node.index()] = true;
        }
        if level_depth >= depth {
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        }
    })?;

    let keep = NodeMask::from(keep);
    debug!(
        "Seeded BFS from {} seed(s) reached depth {} ({} of {} nodes)",
        seeds.len(),
        reached,
        keep.count_kept(),
        n
    );
    Ok(keep)
}

/// Split `graph` into the `depth`-neighborhood of `seeds` and the rest.
pub fn extract<L: Clone>(graph: &Graph<L>, seeds: &[NodeId], depth: u32) -> Result<Extraction<L>> {
    extract_with_config(graph, seeds, &ExtractConfig::new(depth))
}

/// Seeded extraction with configuration.
pub fn extract_with_config<L: Clone>(
    graph: &Graph<L>,
    seeds: &[NodeId],
    config: &ExtractConfig,
) -> Result<Extraction<L>> {
    let keep = reach_mask(graph, seeds, config.depth)?;

    let subgraph = mask_with_config(graph, &keep, &config.mask).map_err(GraphError::compaction)?;
    let remainder = mask_with_config(graph, &keep.complement(), &config.mask)
        .map_err(GraphError::compaction)?;

    Ok(Extraction {
        subgraph,
        remainder,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::GraphBuilder;

    fn path(n: u32) -> Graph<()> {
        let edges: Vec<_> = (0..n - 1).map(|i| (i, i + 1)).collect();
        Graph::from_edges(n as usize, &edges)
    }

    #[test]
    fn test_depth_zero_keeps_seeds_only() {
        let g = path(5);
        let out = extract(&g, &[NodeId(2)], 0).unwrap();

        assert_eq!(out.subgraph.node_count(), 1);
        assert_eq!(out.subgraph.edge_count(), 0);
        assert_eq!(out.remainder.node_count(), 4);
        // 0-1 and 3-4 survive in the remainder
        assert_eq!(out.remainder.edge_count(), 2);
    }

    #[test]
    fn test_depth_one_on_path() {
        let g = path(5);
        let out = extract(&g, &[NodeId(1)], 1).unwrap();

        assert_eq!(out.subgraph.node_count(), 3);
        assert_eq!(out.subgraph.edge_count(), 2);
        assert_eq!(out.remainder.node_count(), 2);
        assert!(out.remainder.adjacent(NodeId(0), NodeId(1)));
    }

    #[test]
    fn test_depth_is_inclusive() {
        let g = path(6);
        let keep = reach_mask(&g, &[NodeId(0)], 3).unwrap();
        assert_eq!(keep.as_slice(), &[true, true, true, true, false, false]);
    }

    #[test]
    fn test_depth_beyond_diameter() {
        let g = path(4);
        let out = extract(&g, &[NodeId(0)], 100).unwrap();
        assert_eq!(out.subgraph.node_count(), 4);
        assert!(out.remainder.is_empty());
    }

    #[test]
    fn test_unreachable_nodes_go_to_remainder() {
        let g: Graph<()> = Graph::from_edges(5, &[(0, 1), (1, 2), (3, 4)]);
        let out = extract(&g, &[NodeId(0)], 10).unwrap();

        assert_eq!(out.subgraph.node_count(), 3);
        assert_eq!(out.remainder.node_count(), 2);
        assert_eq!(out.remainder.edge_count(), 1);
    }

    #[test]
    fn test_multiple_seeds() {
        let g = path(7);
        let keep = reach_mask(&g, &[NodeId(0), NodeId(6)], 1).unwrap();
        assert_eq!(
            keep.as_slice(),
            &[true, true, false, false, false, true, true]
        );
    }

    #[test]
    fn test_invalid_seed() {
        let g = path(3);
        assert!(matches!(
            extract(&g, &[NodeId(3)], 1),
            Err(GraphError::InvalidSeed(3))
        ));
        assert!(matches!(
            extract(&g, &[], 1),
            Err(GraphError::InvalidSeed(_))
        ));
    }

    #[test]
    fn test_label_missing_is_compaction_failure() {
        let mut builder: GraphBuilder<u8> = GraphBuilder::new(3);
        builder
            .add_edge(NodeId(0), NodeId(1))
            .set_label(NodeId(0), 0)
            .set_label(NodeId(1), 1);
        let g = builder.build();

        // Subgraph {0, 1} is fine, remainder {2} has no label.
        let result = extract(&g, &[NodeId(0)], 1);
        match result {
            Err(GraphError::CompactionFailure(inner)) => {
                assert!(matches!(*inner, GraphError::LabelMissing(2)));
            }
            other => panic!("unexpected result: {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_extract_is_deterministic() {
        let g: Graph<()> = Graph::from_edges(6, &[(0, 1), (0, 2), (2, 3), (3, 4), (1, 5)]);
        let a = extract(&g, &[NodeId(2)], 2).unwrap();
        let b = extract(&g, &[NodeId(2)], 2).unwrap();

        assert_eq!(a.subgraph, b.subgraph);
        assert_eq!(a.remainder, b.remainder);
    }
}
