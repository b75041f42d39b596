//! Labelled undirected graph.
//!
//! A [`Graph`] owns a contiguous node arena: node `i` is row `i` of the CSR
//! adjacency and slot `i` of the label vector. Derived graphs are always
//! built fresh through [`GraphBuilder`]; nothing is shared between them.

use super::csr::{CsrMatrix, CsrMatrixBuilder};
use super::node::NodeId;
use crate::{GraphError, Result};

/// Undirected, unweighted graph with an optional label per node.
#[derive(Debug, Clone, PartialEq)]
pub struct Graph<L> {
    adjacency: CsrMatrix,
    labels: Vec<Option<L>>,
}

impl<L: Default> Graph<L> {
    /// Graph with `num_nodes` default-labelled nodes and no edges.
    pub fn empty(num_nodes: usize) -> Self {
        Self {
            adjacency: CsrMatrix::empty(num_nodes),
            labels: std::iter::repeat_with(|| Some(L::default()))
                .take(num_nodes)
                .collect(),
        }
    }

    /// Default-labelled graph from an undirected edge list.
    pub fn from_edges(num_nodes: usize, edges: &[(u32, u32)]) -> Self {
        Self {
            adjacency: CsrMatrix::from_edges(num_nodes, edges),
            labels: std::iter::repeat_with(|| Some(L::default()))
                .take(num_nodes)
                .collect(),
        }
    }
}

impl<L> Graph<L> {
    /// Assemble a graph from an adjacency and matching labels.
    ///
    /// The adjacency is checked with [`CsrMatrix::validate`].
    pub fn from_parts(adjacency: CsrMatrix, labels: Vec<Option<L>>) -> Result<Self> {
        if labels.len() != adjacency.num_rows {
            return Err(GraphError::DimensionMismatch {
                expected: adjacency.num_rows,
                actual: labels.len(),
            });
        }
        adjacency.validate()?;
        Ok(Self { adjacency, labels })
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.adjacency.num_rows
    }

    /// Number of undirected edges.
    pub fn edge_count(&self) -> usize {
        self.adjacency.num_edges()
    }

    /// True if the graph has no nodes.
    pub fn is_empty(&self) -> bool {
        self.node_count() == 0
    }

    /// True if `node` indexes into this graph.
    pub fn contains(&self, node: NodeId) -> bool {
        node.index() < self.node_count()
    }

    /// Neighbor count of `node` (0 for out-of-range nodes).
    pub fn degree(&self, node: NodeId) -> usize {
        self.adjacency.degree(node)
    }

    /// Neighbors of `node`, ascending.
    pub fn neighbors(&self, node: NodeId) -> &[u32] {
        self.adjacency.neighbors(node)
    }

    /// True if `a` and `b` share an edge.
    pub fn adjacent(&self, a: NodeId, b: NodeId) -> bool {
        self.adjacency.has_edge(a, b)
    }

    /// Underlying adjacency.
    pub fn adjacency(&self) -> &CsrMatrix {
        &self.adjacency
    }

    /// Label payload of `node`, if it has one.
    pub fn label(&self, node: NodeId) -> Option<&L> {
        self.labels.get(node.index()).and_then(Option::as_ref)
    }

    /// Replace the label of `node`.
    pub fn set_label(&mut self, node: NodeId, label: L) -> Result<()> {
        let slot = self
            .labels
            .get_mut(node.index())
            .ok_or(GraphError::InvalidNodeId(node.0 as u64))?;
        *slot = Some(label);
        Ok(())
    }

    /// All label slots in node order.
    pub fn labels(&self) -> &[Option<L>] {
        &self.labels
    }

    /// Iterate over undirected edges as `(a, b)` with `a < b`.
    pub fn edges(&self) -> impl Iterator<Item = (NodeId, NodeId)> + '_ {
        (0..self.node_count() as u32).flat_map(move |a| {
            self.neighbors(NodeId(a))
                .iter()
                .filter(move |&&b| b > a)
                .map(move |&b| (NodeId(a), NodeId(b)))
        })
    }
}

/// Incremental constructor for [`Graph`].
#[derive(Debug)]
pub struct GraphBuilder<L> {
    adjacency: CsrMatrixBuilder,
    labels: Vec<Option<L>>,
}

impl<L> GraphBuilder<L> {
    /// Builder for a graph with exactly `num_nodes` nodes.
    pub fn new(num_nodes: usize) -> Self {
        Self {
            adjacency: CsrMatrixBuilder::new(num_nodes),
            labels: std::iter::repeat_with(|| None).take(num_nodes).collect(),
        }
    }

    /// Builder that reserves its node and edge storage up front.
    ///
    /// Returns [`GraphError::AllocationFailure`] if the reservation fails.
    pub fn with_capacity(num_nodes: usize, edge_hint: usize) -> Result<Self> {
        let adjacency = CsrMatrixBuilder::try_with_capacity(num_nodes, edge_hint)?;
        let mut labels = Vec::new();
        labels
            .try_reserve_exact(num_nodes)
            .map_err(|_| GraphError::AllocationFailure {
                what: "node labels",
                requested: num_nodes,
            })?;
        labels.extend(std::iter::repeat_with(|| None).take(num_nodes));
        Ok(Self { adjacency, labels })
    }

    /// Number of nodes being built.
    pub fn num_nodes(&self) -> usize {
        self.labels.len()
    }

    /// Insert an undirected edge.
    pub fn add_edge(&mut self, a: NodeId, b: NodeId) -> &mut Self {
        self.adjacency.add_edge(a.0, b.0);
        self
    }

    /// Set the label of `node`. Out-of-range nodes are ignored.
    pub fn set_label(&mut self, node: NodeId, label: L) -> &mut Self {
        if let Some(slot) = self.labels.get_mut(node.index()) {
            *slot = Some(label);
        }
        self
    }

    /// Finish the graph.
    pub fn build(self) -> Graph<L> {
        Graph {
            adjacency: self.adjacency.build(),
            labels: self.labels,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_edges() {
        let g: Graph<()> = Graph::from_edges(4, &[(0, 1), (1, 2), (2, 3)]);

        assert_eq!(g.node_count(), 4);
        assert_eq!(g.edge_count(), 3);
        assert!(g.adjacent(NodeId(2), NodeId(1)));
        assert!(!g.adjacent(NodeId(0), NodeId(3)));
        assert_eq!(g.label(NodeId(0)), Some(&()));
    }

    #[test]
    fn test_builder_labels() {
        let mut builder = GraphBuilder::new(3);
        builder
            .add_edge(NodeId(0), NodeId(2))
            .set_label(NodeId(0), "a")
            .set_label(NodeId(2), "c");
        let g = builder.build();

        assert_eq!(g.label(NodeId(0)), Some(&"a"));
        assert_eq!(g.label(NodeId(1)), None);
        assert_eq!(g.label(NodeId(2)), Some(&"c"));
        assert_eq!(g.degree(NodeId(1)), 0);
    }

    #[test]
    fn test_set_label_out_of_range() {
        let mut g: Graph<u32> = Graph::empty(2);
        assert!(g.set_label(NodeId(1), 5).is_ok());
        assert!(matches!(
            g.set_label(NodeId(2), 5),
            Err(GraphError::InvalidNodeId(2))
        ));
    }

    #[test]
    fn test_edges_iterator() {
        let g: Graph<()> = Graph::from_edges(4, &[(3, 0), (1, 2), (0, 1)]);
        let edges: Vec<_> = g.edges().map(|(a, b)| (a.0, b.0)).collect();
        assert_eq!(edges, vec![(0, 1), (0, 3), (1, 2)]);
    }

    #[test]
    fn test_from_parts_mismatch() {
        let adj = CsrMatrix::empty(3);
        let result = Graph::<u8>::from_parts(adj, vec![None, None]);
        assert!(matches!(
            result,
            Err(GraphError::DimensionMismatch {
                expected: 3,
                actual: 2
            })
        ));
    }

    #[test]
    fn test_from_parts_rejects_bad_adjacency() {
        // 0 -> 1 without the reverse entry
        let adj = CsrMatrix {
            num_rows: 2,
            row_ptr: vec![0, 1, 1],
            col_idx: vec![1],
        };
        let result = Graph::<()>::from_parts(adj, vec![Some(()), Some(())]);
        assert!(matches!(result, Err(GraphError::InvalidCsr(_))));

        // row_ptr runs past col_idx
        let adj = CsrMatrix {
            num_rows: 1,
            row_ptr: vec![0, 4],
            col_idx: vec![],
        };
        assert!(Graph::<()>::from_parts(adj, vec![None]).is_err());

        let ok = Graph::<()>::from_parts(CsrMatrix::from_edges(2, &[(0, 1)]), vec![None, None]);
        assert_eq!(ok.unwrap().edge_count(), 1);
    }

    #[test]
    fn test_empty_graph() {
        let g: Graph<()> = Graph::empty(0);
        assert!(g.is_empty());
        assert_eq!(g.edges().count(), 0);
        assert!(!g.contains(NodeId(0)));
    }
}
