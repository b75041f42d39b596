//! Symmetric Compressed Sparse Row (CSR) adjacency.
//!
//! The graphs handled here are undirected and unweighted, so every edge
//! `{a, b}` is stored twice (`a -> b` and `b -> a`) and neighbor lists are
//! kept sorted and free of duplicates. That gives:
//! - O(1) degree queries
//! - O(log degree) adjacency tests via binary search
//! - ascending neighbor iteration, which keeps traversal deterministic
//!
//! Memory layout:
//! - `row_ptr[i]` = starting index in col_idx for row i
//! - `col_idx[row_ptr[i]..row_ptr[i+1]]` = neighbors of node i, ascending

use super::node::NodeId;
use crate::{GraphError, Result};

/// Compressed Sparse Row adjacency for an undirected graph.
///
/// For a graph with N nodes and M undirected edges:
/// - `row_ptr`: N+1 elements, where row_ptr[i] is the start of row i's edges
/// - `col_idx`: 2M elements, the neighbor node IDs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsrMatrix {
    /// Number of rows (nodes).
    pub num_rows: usize,
    /// Row pointers (length = num_rows + 1).
    pub row_ptr: Vec<u64>,
    /// Column indices (length = nnz).
    pub col_idx: Vec<u32>,
}

impl CsrMatrix {
    /// Create an adjacency with `num_nodes` nodes and no edges.
    pub fn empty(num_nodes: usize) -> Self {
        Self {
            num_rows: num_nodes,
            row_ptr: vec![0; num_nodes + 1],
            col_idx: Vec::new(),
        }
    }

    /// Create CSR from an undirected edge list.
    ///
    /// # Example
    ///
    /// ```
    /// use egonet_graph::CsrMatrix;
    ///
    /// // Graph: 0 - 1 - 2
    /// let csr = CsrMatrix::from_edges(3, &[(0, 1), (1, 2)]);
    /// assert_eq!(csr.num_edges(), 2);
    /// assert_eq!(csr.num_nonzeros(), 4);
    /// ```
    pub fn from_edges(num_nodes: usize, edges: &[(u32, u32)]) -> Self {
        CsrMatrixBuilder::new(num_nodes).with_edges(edges).build()
    }

    /// Number of stored directed entries (twice the edge count).
    pub fn num_nonzeros(&self) -> usize {
        self.col_idx.len()
    }

    /// Number of undirected edges.
    pub fn num_edges(&self) -> usize {
        self.col_idx.len() / 2
    }

    /// Check if the adjacency has no edges.
    pub fn is_empty(&self) -> bool {
        self.col_idx.is_empty()
    }

    /// Get the degree (number of neighbors) of a node.
    pub fn degree(&self, node: NodeId) -> usize {
        let i = node.index();
        if i >= self.num_rows {
            return 0;
        }
        (self.row_ptr[i + 1] - self.row_ptr[i]) as usize
    }

    /// Get neighbors of a node in ascending order.
    pub fn neighbors(&self, node: NodeId) -> &[u32] {
        let i = node.index();
        if i >= self.num_rows {
            return &[];
        }
        let start = self.row_ptr[i] as usize;
        let end = self.row_ptr[i + 1] as usize;
        &self.col_idx[start..end]
    }

    /// Check if `a` and `b` are adjacent.
    pub fn has_edge(&self, a: NodeId, b: NodeId) -> bool {
        self.neighbors(a).binary_search(&b.0).is_ok()
    }

    /// Validate CSR structure.
    pub fn validate(&self) -> Result<()> {
        if self.row_ptr.len() != self.num_rows + 1 {
            return Err(GraphError::InvalidCsr(format!(
                "row_ptr length {} != num_rows + 1 = {}",
                self.row_ptr.len(),
                self.num_rows + 1
            )));
        }

        if self.row_ptr.first().copied().unwrap_or(0) != 0 {
            return Err(GraphError::InvalidCsr("row_ptr[0] != 0".to_string()));
        }

        for i in 0..self.num_rows {
            if self.row_ptr[i] > self.row_ptr[i + 1] {
                return Err(GraphError::InvalidCsr(format!(
                    "row_ptr not monotonic at index {}",
                    i
                )));
            }
        }

        let nnz = *self.row_ptr.last().unwrap_or(&0) as usize;
        if nnz != self.col_idx.len() {
            return Err(GraphError::InvalidCsr(format!(
                "row_ptr[-1] = {} != col_idx.len() = {}",
                nnz,
                self.col_idx.len()
            )));
        }

        for row in 0..self.num_rows {
            let node = NodeId(row as u32);
            let neighbors = self.neighbors(node);
            for (k, &col) in neighbors.iter().enumerate() {
                if col as usize >= self.num_rows {
                    return Err(GraphError::InvalidCsr(format!(
                        "col_idx {} >= num_rows {}",
                        col, self.num_rows
                    )));
                }
                if col as usize == row {
                    return Err(GraphError::InvalidCsr(format!("self-loop on node {}", row)));
                }
                if k > 0 && neighbors[k - 1] >= col {
                    return Err(GraphError::InvalidCsr(format!(
                        "neighbors of node {} not strictly ascending",
                        row
                    )));
                }
            }
        }

        // Symmetry is checked after bounds so the lookups below stay in range.
        for row in 0..self.num_rows {
            let node = NodeId(row as u32);
            for &col in self.neighbors(node) {
                if !self.has_edge(NodeId(col), node) {
                    return Err(GraphError::InvalidCsr(format!(
                        "edge {} -> {} has no reverse entry",
                        row, col
                    )));
                }
            }
        }

        Ok(())
    }
}

/// Builder for symmetric CSR adjacency.
#[derive(Debug, Default)]
pub struct CsrMatrixBuilder {
    num_nodes: usize,
    entries: Vec<(u32, u32)>,
}

impl CsrMatrixBuilder {
    /// Create new builder with given number of nodes.
    pub fn new(num_nodes: usize) -> Self {
        Self {
            num_nodes,
            entries: Vec::new(),
        }
    }

    /// Create a builder with room for `edge_hint` undirected edges.
    ///
    /// Fails with [`GraphError::AllocationFailure`] instead of aborting when
    /// the entry buffer cannot be reserved.
    pub fn try_with_capacity(num_nodes: usize, edge_hint: usize) -> Result<Self> {
        let requested = edge_hint.saturating_mul(2);
        let mut entries = Vec::new();
        entries
            .try_reserve_exact(requested)
            .map_err(|_| GraphError::AllocationFailure {
                what: "adjacency entries",
                requested,
            })?;
        Ok(Self { num_nodes, entries })
    }

    /// Add edges from slice.
    pub fn with_edges(mut self, edges: &[(u32, u32)]) -> Self {
        for &(a, b) in edges {
            self.add_edge(a, b);
        }
        self
    }

    /// Add a single undirected edge. Self-loops are ignored.
    pub fn add_edge(&mut self, a: u32, b: u32) {
        if a == b {
            return;
        }
        self.entries.push((a, b));
        self.entries.push((b, a));
    }

    /// Number of nodes the built matrix will have.
    pub fn num_nodes(&self) -> usize {
        self.num_nodes
    }

    /// Build the CSR matrix. Entries referring to nodes out of range are dropped.
    pub fn build(mut self) -> CsrMatrix {
        let n = self.num_nodes;
        self.entries
            .retain(|&(a, b)| (a as usize) < n && (b as usize) < n);
        self.entries.sort_unstable();
        self.entries.dedup();

        let mut row_ptr = vec![0u64; n + 1];
        for &(src, _) in &self.entries {
            row_ptr[src as usize + 1] += 1;
        }

        // Cumulative sum
        for i in 1..=n {
            row_ptr[i] += row_ptr[i - 1];
        }

        let col_idx: Vec<u32> = self.entries.iter().map(|e| e.1).collect();

        CsrMatrix {
            num_rows: n,
            row_ptr,
            col_idx,
        }
    }
}
