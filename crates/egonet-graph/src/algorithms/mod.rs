//! Graph algorithms.
//!
//! - [`bfs`]: level-synchronous breadth-first search
//! - [`mask`]: node masking and index compaction
//! - [`extract`]: seeded subgraph + remainder extraction
//! - [`decompose`]: max-degree-seed component decomposition

pub mod bfs;
pub mod decompose;
pub mod extract;
pub mod mask;

pub use bfs::{bfs_levels, bfs_sequential, BfsConfig, LevelBfs};
pub use decompose::{decompose, select_seed, DecomposeConfig, Decomposer};
pub use extract::{extract, reach_mask, ExtractConfig, Extraction};
pub use mask::{mask, remove_nodes, EdgeScan, IndexMap, MaskConfig, NodeMask};
