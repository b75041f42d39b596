//! Fuzz target for seeded extraction and decomposition.
//!
//! Builds arbitrary small graphs and checks that extraction partitions the
//! node set and that decomposition never emits more than its budget.

#![no_main]

use arbitrary::Arbitrary;
use egonet_graph::{decompose, extract, DecomposeConfig, Graph, GraphBuilder, MemorySink, NodeId};
use libfuzzer_sys::fuzz_target;

/// Fuzz input: graph shape plus extraction parameters.
#[derive(Debug, Arbitrary)]
struct FuzzInput {
    /// Number of nodes (reduced modulo 64).
    nodes: u8,
    /// Edge endpoints (reduced modulo node count).
    edges: Vec<(u8, u8)>,
    /// Seed nodes (reduced modulo node count).
    seeds: Vec<u8>,
    /// BFS depth (reduced modulo 5).
    depth: u8,
    /// Component budget (reduced modulo 16).
    budget: u8,
}

fuzz_target!(|input: FuzzInput| {
    let n = (input.nodes % 64) as u32;
    if n == 0 || input.edges.len() > 512 {
        return;
    }

    let mut builder = GraphBuilder::new(n as usize);
    for i in 0..n {
        builder.set_label(NodeId(i), i);
    }
    for &(a, b) in &input.edges {
        builder.add_edge(NodeId(a as u32 % n), NodeId(b as u32 % n));
    }
    let graph: Graph<u32> = builder.build();
    assert!(graph.adjacency().validate().is_ok());

    let seeds: Vec<NodeId> = input.seeds.iter().map(|&s| NodeId(s as u32 % n)).collect();
    let depth = (input.depth % 5) as u32;

    match extract(&graph, &seeds, depth) {
        Ok(out) => {
            assert!(!seeds.is_empty());
            assert_eq!(
                out.subgraph.node_count() + out.remainder.node_count(),
                n as usize
            );
            assert!(out.subgraph.node_count() >= 1);
        }
        Err(_) => assert!(seeds.is_empty()),
    }

    let budget = (input.budget % 16) as usize;
    let mut sink: MemorySink<u32> = MemorySink::new();
    let config = DecomposeConfig::new()
        .with_depth(depth)
        .with_max_components(budget);
    let summary = decompose(graph, &config, &mut sink).expect("labelled graph decomposes");
    assert!(summary.components <= budget);
    assert_eq!(summary.nodes_emitted + summary.nodes_remaining, n as usize);
});
