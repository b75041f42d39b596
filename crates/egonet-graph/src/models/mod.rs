//! Graph data models.
//!
//! - [`CsrMatrix`]: symmetric CSR adjacency
//! - [`Graph`]: labelled node arena over a [`CsrMatrix`]
//! - [`NodeId`], [`Distance`], [`ComponentId`]: index newtypes

pub mod csr;
pub mod graph;
pub mod node;

pub use csr::{CsrMatrix, CsrMatrixBuilder};
pub use graph::{Graph, GraphBuilder};
pub use node::{ComponentId, Distance, NodeId};
