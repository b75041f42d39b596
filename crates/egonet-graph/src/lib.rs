//! Ego-network decomposition of undirected graphs.
//!
//! This crate splits a graph into a sequence of bounded-radius components:
//! pick the highest-degree remaining node, take everything within a fixed
//! BFS depth of it, emit that subgraph and keep going on what is left.
//!
//! - **Graph**: arena of labelled nodes over a symmetric CSR adjacency
//! - **BFS**: level-synchronous traversal with per-level callbacks
//! - **Mask**: order-preserving node compaction into a fresh index space
//! - **Extract**: seeded subgraph plus its complement ("remainder")
//! - **Decompose**: the max-degree-seed driver feeding a [`ComponentSink`]
//!
//! # Example
//!
//! ```
//! use egonet_graph::{decompose, DecomposeConfig, Graph, MemorySink};
//!
//! // Path 0 - 1 - 2 - 3 - 4
//! let graph: Graph<()> = Graph::from_edges(5, &[(0, 1), (1, 2), (2, 3), (3, 4)]);
//!
//! let mut sink = MemorySink::new();
//! let config = DecomposeConfig::new().with_depth(1).with_max_components(10);
//! let summary = decompose(graph, &config, &mut sink).unwrap();
//!
//! assert_eq!(summary.components, 2);
//! assert_eq!(sink.components()[0].graph.node_count(), 3);
//! assert_eq!(sink.components()[1].graph.node_count(), 2);
//! ```

pub mod algorithms;
pub mod io;
pub mod models;

// Re-export main types
pub use algorithms::bfs::{bfs_levels, bfs_sequential, BfsConfig, LevelBfs};
pub use algorithms::decompose::{
    component_name, decompose, select_seed, Component, DecomposeConfig, DecomposeState,
    DecomposeSummary, Decomposer, DoneReason,
};
pub use algorithms::extract::{
    extract, extract_with_config, reach_mask, ExtractConfig, Extraction,
};
pub use algorithms::mask::{
    mask, mask_with_config, remove_nodes, EdgeScan, IndexMap, MaskConfig, NodeMask,
};
pub use io::format::{load, read_graph, save, write_graph, LabelCodec};
pub use io::sink::{ComponentSink, DirectorySink, MemorySink};
pub use models::csr::{CsrMatrix, CsrMatrixBuilder};
pub use models::graph::{Graph, GraphBuilder};
pub use models::node::{ComponentId, Distance, NodeId};

/// Graph algorithm error types.
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    /// Seed (or traversal source) outside the graph.
    #[error("Invalid seed node: {0}")]
    InvalidSeed(u64),

    /// Invalid node ID.
    #[error("Invalid node ID: {0}")]
    InvalidNodeId(u64),

    /// An output graph or intermediate mapping could not be sized.
    #[error("Allocation failure: could not reserve {requested} entries for {what}")]
    AllocationFailure {
        what: &'static str,
        requested: usize,
    },

    /// Input node has no label payload.
    #[error("Label missing on input node {0}")]
    LabelMissing(u32),

    /// Matrix or mask dimension mismatch.
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// Empty graph.
    #[error("Empty graph")]
    EmptyGraph,

    /// Invalid CSR format.
    #[error("Invalid CSR format: {0}")]
    InvalidCsr(String),

    /// Malformed binary graph file.
    #[error("Invalid graph file: {0}")]
    InvalidFormat(String),

    /// Building a masked subgraph failed.
    #[error("Compaction failed: {0}")]
    CompactionFailure(#[source] Box<GraphError>),

    /// Seeded extraction failed during a decomposition round.
    #[error("Extraction failed in round {round}: {source}")]
    ExtractionFailure {
        round: usize,
        #[source]
        source: Box<GraphError>,
    },

    /// The component sink could not store a component.
    #[error("Failed to persist component '{name}': {source}")]
    PersistFailure {
        name: String,
        #[source]
        source: Box<GraphError>,
    },

    /// IO error while reading or writing graph files.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl GraphError {
    /// Wrap an error raised while compacting a graph.
    pub fn compaction(err: GraphError) -> Self {
        GraphError::CompactionFailure(Box::new(err))
    }

    /// Short name of the stage that produced this error.
    pub fn stage(&self) -> &'static str {
        match self {
            GraphError::InvalidSeed(_) | GraphError::ExtractionFailure { .. } => "extract",
            GraphError::AllocationFailure { .. }
            | GraphError::LabelMissing(_)
            | GraphError::CompactionFailure(_) => "compact",
            GraphError::PersistFailure { .. } => "write",
            GraphError::InvalidFormat(_) | GraphError::Io(_) => "io",
            GraphError::InvalidNodeId(_)
            | GraphError::DimensionMismatch { .. }
            | GraphError::EmptyGraph
            | GraphError::InvalidCsr(_) => "graph",
        }
    }
}

/// Result type for graph operations.
pub type Result<T> = std::result::Result<T, GraphError>;
