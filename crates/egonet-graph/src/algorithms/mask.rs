//! Node masking and compaction.
//!
//! Given a graph and a keep/drop flag per node, [`mask`] builds a new graph
//! holding only the kept nodes. Kept nodes are renumbered densely in their
//! original order, so for kept `a < b` the new indices satisfy
//! `map(a) < map(b)`. Edges between kept nodes and their labels are carried
//! over; anything touching a dropped node is discarded.
//!
//! The input graph is only borrowed and never modified.

use tracing::debug;

use crate::models::{Graph, GraphBuilder, NodeId};
use crate::{GraphError, Result};

/// One keep/drop flag per node of some graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeMask {
    keep: Vec<bool>,
}

impl NodeMask {
    /// Mask of `len` nodes, all set to `keep`.
    pub fn all(len: usize, keep: bool) -> Self {
        Self {
            keep: vec![keep; len],
        }
    }

    /// Mask of `len` nodes keeping exactly `nodes`.
    pub fn from_nodes(len: usize, nodes: &[NodeId]) -> Result<Self> {
        let mut mask = Self::all(len, false);
        for &node in nodes {
            mask.keep(node)?;
        }
        Ok(mask)
    }

    /// Number of flags.
    pub fn len(&self) -> usize {
        self.keep.len()
    }

    /// True for a mask over an empty graph.
    pub fn is_empty(&self) -> bool {
        self.keep.is_empty()
    }

    /// Mark `node` as kept.
    pub fn keep(&mut self, node: NodeId) -> Result<()> {
        self.set(node, true)
    }

    /// Mark `node` as dropped.
    pub fn discard(&mut self, node: NodeId) -> Result<()> {
        self.set(node, false)
    }

    fn set(&mut self, node: NodeId, keep: bool) -> Result<()> {
        let slot = self
            .keep
            .get_mut(node.index())
            .ok_or(GraphError::InvalidNodeId(node.0 as u64))?;
        *slot = keep;
        Ok(())
    }

    /// Whether `node` is kept. Out-of-range nodes are never kept.
    pub fn is_kept(&self, node: NodeId) -> bool {
        self.keep.get(node.index()).copied().unwrap_or(false)
    }

    /// Number of kept nodes.
    pub fn count_kept(&self) -> usize {
        self.keep.iter().filter(|&&k| k).count()
    }

    /// Logical complement: kept becomes dropped and vice versa.
    pub fn complement(&self) -> Self {
        Self {
            keep: self.keep.iter().map(|&k| !k).collect(),
        }
    }

    /// Raw flags in node order.
    pub fn as_slice(&self) -> &[bool] {
        &self.keep
    }
}

impl From<Vec<bool>> for NodeMask {
    fn from(keep: Vec<bool>) -> Self {
        Self { keep }
    }
}

/// Order-preserving mapping from kept source nodes to output nodes.
///
/// `pairs()[k] == (source, NodeId(k))`, with sources strictly ascending.
#[derive(Debug, Clone)]
pub struct IndexMap {
    pairs: Vec<(NodeId, NodeId)>,
    forward: Vec<NodeId>,
}

impl IndexMap {
    /// Scan the mask in ascending node order, numbering kept nodes `0..k`.
    pub fn build(mask: &NodeMask) -> Result<Self> {
        let kept = mask.count_kept();

        let mut pairs = Vec::new();
        pairs
            .try_reserve_exact(kept)
            .map_err(|_| GraphError::AllocationFailure {
                what: "index map",
                requested: kept,
            })?;

        let mut forward = Vec::new();
        forward
            .try_reserve_exact(mask.len())
            .map_err(|_| GraphError::AllocationFailure {
                what: "forward index",
                requested: mask.len(),
            })?;

        let mut next = 0u32;
        for (i, &keep) in mask.as_slice().iter().enumerate() {
            if keep {
                pairs.push((NodeId(i as u32), NodeId(next)));
                forward.push(NodeId(next));
                next += 1;
            } else {
                forward.push(NodeId::INVALID);
            }
        }

        Ok(Self { pairs, forward })
    }

    /// Number of kept nodes.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// True if nothing was kept.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// `(source, target)` pairs in ascending order.
    pub fn pairs(&self) -> &[(NodeId, NodeId)] {
        &self.pairs
    }

    /// Output index of a source node, if it was kept.
    pub fn target(&self, source: NodeId) -> Option<NodeId> {
        self.forward
            .get(source.index())
            .copied()
            .filter(NodeId::is_valid)
    }

    /// Source index of an output node.
    pub fn source(&self, target: NodeId) -> Option<NodeId> {
        self.pairs.get(target.index()).map(|&(src, _)| src)
    }
}

/// How edges between kept nodes are discovered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EdgeScan {
    /// Walk each kept node's neighbor list (O(sum of kept degrees)).
    #[default]
    Neighbors,
    /// Test adjacency for every kept pair (O(k²)).
    AllPairs,
}

/// Compaction configuration.
#[derive(Debug, Clone, Default)]
pub struct MaskConfig {
    /// Edge discovery strategy.
    pub strategy: EdgeScan,
}

impl MaskConfig {
    /// Create new mask configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set edge discovery strategy.
    pub fn with_strategy(mut self, strategy: EdgeScan) -> Self {
        self.strategy = strategy;
        self
    }
}

/// Build the subgraph induced by the kept nodes of `keep`.
pub fn mask<L: Clone>(graph: &Graph<L>, keep: &NodeMask) -> Result<Graph<L>> {
    mask_with_config(graph, keep, &MaskConfig::default())
}

/// Build the induced subgraph with configuration.
pub fn mask_with_config<L: Clone>(
    graph: &Graph<L>,
    keep: &NodeMask,
    config: &MaskConfig,
) -> Result<Graph<L>> {
    if keep.len() != graph.node_count() {
        return Err(GraphError::DimensionMismatch {
            expected: graph.node_count(),
            actual: keep.len(),
        });
    }

    let map = IndexMap::build(keep)?;

    // Upper bound: every kept node's full neighbor list survives.
    let degree_sum: usize = map.pairs().iter().map(|&(src, _)| graph.degree(src)).sum();
    let mut builder = GraphBuilder::with_capacity(map.len(), degree_sum / 2)?;

    for &(src, dst) in map.pairs() {
        let label = graph.label(src).ok_or(GraphError::LabelMissing(src.0))?;
        builder.set_label(dst, label.clone());
    }

    match config.strategy {
        EdgeScan::Neighbors => {
            for &(src, dst) in map.pairs() {
                for &neighbor in graph.neighbors(src) {
                    if neighbor <= src.0 {
                        continue;
                    }
                    if let Some(other) = map.target(NodeId(neighbor)) {
                        builder.add_edge(dst, other);
                    }
                }
            }
        }
        EdgeScan::AllPairs => {
            let pairs = map.pairs();
            for (i, &(a_src, a_dst)) in pairs.iter().enumerate() {
                for &(b_src, b_dst) in &pairs[i + 1..] {
                    if graph.adjacent(a_src, b_src) {
                        builder.add_edge(a_dst, b_dst);
                    }
                }
            }
        }
    }

    let output = builder.build();
    debug!(
        "Compacted {} -> {} nodes ({} edges kept)",
        graph.node_count(),
        output.node_count(),
        output.edge_count()
    );
    Ok(output)
}

/// Build the graph with every node in `drop` removed.
pub fn remove_nodes<L: Clone>(graph: &Graph<L>, drop: &[NodeId]) -> Result<Graph<L>> {
    let mut keep = NodeMask::all(graph.node_count(), true);
    for &node in drop {
        keep.discard(node)?;
    }
    mask(graph, &keep)
}
