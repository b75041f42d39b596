//! Graph persistence.
//!
//! - [`format`]: the `.egr` binary graph format
//! - [`sink`]: destinations for extracted components

pub mod format;
pub mod sink;

pub use format::{load, read_graph, save, write_graph, LabelCodec};
pub use sink::{ComponentSink, DirectorySink, MemorySink};
