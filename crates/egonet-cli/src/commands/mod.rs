//! CLI command implementations.

pub mod decompose;
pub mod info;
pub mod init;

use egonet_graph::{load, Graph};

use crate::error::{CliError, CliResult};

/// Label payload carried through the CLI: opaque bytes.
pub type Label = Vec<u8>;

/// Read an input graph, attributing failures to the `read` stage.
pub fn read_input(path: &str) -> CliResult<Graph<Label>> {
    load(path).map_err(|e| CliError::stage("read", e))
}

/// Largest degree in `graph` (0 for an empty graph).
pub fn max_degree(graph: &Graph<Label>) -> usize {
    egonet_graph::select_seed(graph)
        .map(|seed| graph.degree(seed))
        .unwrap_or(0)
}

/// Reject a component budget that cannot produce output.
pub fn validate_budget(max_components: usize) -> CliResult<()> {
    if max_components == 0 {
        return Err(CliError::Config(
            "max_components must be at least 1".to_string(),
        ));
    }
    Ok(())
}
