//! `egonet info` command - Summarize a graph file.

use colored::Colorize;
use egonet_graph::NodeId;

use crate::error::CliResult;

use super::{max_degree, read_input};

/// Execute the `info` command.
pub fn execute(file: &str) -> CliResult<()> {
    let graph = read_input(file)?;

    let labelled = graph.labels().iter().filter(|l| l.is_some()).count();
    let isolated = (0..graph.node_count() as u32)
        .filter(|&i| graph.degree(NodeId(i)) == 0)
        .count();

    println!("{}:", file.bright_white().underline());
    println!("  {:<12} {}", "Nodes:", graph.node_count());
    println!("  {:<12} {}", "Edges:", graph.edge_count());
    println!("  {:<12} {}", "Max degree:", max_degree(&graph));
    println!("  {:<12} {}", "Isolated:", isolated);

    let label_status = if labelled == graph.node_count() {
        format!("{}/{}", labelled, graph.node_count()).bright_green()
    } else {
        format!("{}/{}", labelled, graph.node_count()).yellow()
    };
    println!("  {:<12} {}", "Labelled:", label_status);

    Ok(())
}
