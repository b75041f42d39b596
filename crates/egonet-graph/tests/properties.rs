//! Property checks for compaction, extraction and decomposition on seeded
//! random graphs.

use std::collections::BTreeSet;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use egonet_graph::{
    bfs_sequential, decompose, extract, mask, mask_with_config, DecomposeConfig, DoneReason,
    EdgeScan, Graph, GraphBuilder, MaskConfig, MemorySink, NodeId, NodeMask,
};

/// Random graph whose labels are the original node indices.
fn random_graph(rng: &mut StdRng, n: u32, p: f64) -> Graph<u32> {
    let mut builder = GraphBuilder::new(n as usize);
    for a in 0..n {
        builder.set_label(NodeId(a), a);
        for b in a + 1..n {
            if rng.gen_bool(p) {
                builder.add_edge(NodeId(a), NodeId(b));
            }
        }
    }
    builder.build()
}

fn random_mask(rng: &mut StdRng, n: usize) -> NodeMask {
    NodeMask::from((0..n).map(|_| rng.gen_bool(0.5)).collect::<Vec<_>>())
}

fn label_list(g: &Graph<u32>) -> Vec<u32> {
    (0..g.node_count() as u32)
        .map(|i| *g.label(NodeId(i)).unwrap())
        .collect()
}

/// Test mask and complement partition the node set.
#[test]
fn test_mask_partition() {
    let mut rng = StdRng::seed_from_u64(1);
    for _ in 0..50 {
        let n = rng.gen_range(0..40);
        let g = random_graph(&mut rng, n, 0.15);
        let m = random_mask(&mut rng, n as usize);

        let kept = mask(&g, &m).unwrap();
        let dropped = mask(&g, &m.complement()).unwrap();
        assert_eq!(kept.node_count() + dropped.node_count(), n as usize);

        let a: BTreeSet<u32> = label_list(&kept).into_iter().collect();
        let b: BTreeSet<u32> = label_list(&dropped).into_iter().collect();
        assert!(a.is_disjoint(&b));
        assert_eq!(a.union(&b).count(), n as usize);
    }
}

/// Test kept nodes keep their relative order.
#[test]
fn test_mask_order_preserved() {
    let mut rng = StdRng::seed_from_u64(2);
    for _ in 0..50 {
        let n = rng.gen_range(1..40);
        let g = random_graph(&mut rng, n, 0.1);
        let m = random_mask(&mut rng, n as usize);

        let labels = label_list(&mask(&g, &m).unwrap());
        assert!(labels.windows(2).all(|w| w[0] < w[1]));
    }
}

/// Test adjacency between kept nodes is reproduced exactly.
#[test]
fn test_mask_edge_fidelity() {
    let mut rng = StdRng::seed_from_u64(3);
    for _ in 0..30 {
        let n = rng.gen_range(1..30);
        let g = random_graph(&mut rng, n, 0.25);
        let m = random_mask(&mut rng, n as usize);

        let out = mask(&g, &m).unwrap();
        let labels = label_list(&out);
        for i in 0..out.node_count() {
            for j in 0..out.node_count() {
                let expected = g.adjacent(NodeId(labels[i]), NodeId(labels[j]));
                assert_eq!(out.adjacent(NodeId(i as u32), NodeId(j as u32)), expected);
            }
        }

        // Every surviving edge has both endpoints kept
        let kept_edges = g
            .edges()
            .filter(|&(a, b)| m.is_kept(a) && m.is_kept(b))
            .count();
        assert_eq!(out.edge_count(), kept_edges);
    }
}

/// Test the neighbor-driven and all-pairs edge scans agree.
#[test]
fn test_edge_scan_strategies_agree() {
    let mut rng = StdRng::seed_from_u64(4);
    let all_pairs = MaskConfig::new().with_strategy(EdgeScan::AllPairs);
    for _ in 0..30 {
        let n = rng.gen_range(0..35);
        let g = random_graph(&mut rng, n, 0.2);
        let m = random_mask(&mut rng, n as usize);

        assert_eq!(
            mask(&g, &m).unwrap(),
            mask_with_config(&g, &m, &all_pairs).unwrap()
        );
    }
}

/// Test the subgraph is exactly the depth-ball around the seeds.
#[test]
fn test_extract_depth_bound() {
    let mut rng = StdRng::seed_from_u64(5);
    for _ in 0..40 {
        let n = rng.gen_range(1..50);
        let g = random_graph(&mut rng, n, 0.06);
        let depth = rng.gen_range(0..4);
        let seeds: Vec<NodeId> = (0..rng.gen_range(1..3))
            .map(|_| NodeId(rng.gen_range(0..n)))
            .collect();

        let distances = bfs_sequential(g.adjacency(), &seeds).unwrap();
        let out = extract(&g, &seeds, depth).unwrap();

        let inside: BTreeSet<u32> = label_list(&out.subgraph).into_iter().collect();
        let outside: BTreeSet<u32> = label_list(&out.remainder).into_iter().collect();
        for v in 0..n {
            if distances[v as usize].within(depth) {
                assert!(inside.contains(&v), "node {} within depth {}", v, depth);
            } else {
                assert!(outside.contains(&v), "node {} beyond depth {}", v, depth);
            }
        }
        assert_eq!(inside.len() + outside.len(), n as usize);
    }
}

/// Test repeated extraction yields identical outputs.
#[test]
fn test_extract_deterministic() {
    let mut rng = StdRng::seed_from_u64(6);
    let g = random_graph(&mut rng, 60, 0.05);

    let a = extract(&g, &[NodeId(3), NodeId(40)], 2).unwrap();
    let b = extract(&g, &[NodeId(3), NodeId(40)], 2).unwrap();
    assert_eq!(a.subgraph, b.subgraph);
    assert_eq!(a.remainder, b.remainder);
}

/// Test decomposition respects the budget and removes at least one node per round.
#[test]
fn test_decomposition_terminates() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..20 {
        let n = rng.gen_range(0..60);
        let g = random_graph(&mut rng, n, 0.05);
        let max = rng.gen_range(1..15);
        let depth = rng.gen_range(0..3);

        let mut sink = MemorySink::new();
        let config = DecomposeConfig::new()
            .with_depth(depth)
            .with_max_components(max);
        let summary = decompose(g, &config, &mut sink).unwrap();

        assert!(summary.components <= max);
        assert_eq!(summary.components, sink.len());
        assert!(sink.components().iter().all(|c| c.graph.node_count() >= 1));
        assert_eq!(
            summary.nodes_emitted + summary.nodes_remaining,
            n as usize
        );
        match summary.reason {
            DoneReason::Exhausted => assert_eq!(summary.nodes_remaining, 0),
            DoneReason::BudgetReached => assert_eq!(summary.components, max),
            other => panic!("unexpected stop: {:?}", other),
        }
    }
}

/// Test components partition the original nodes when the budget is unlimited.
#[test]
fn test_decomposition_partitions_nodes() {
    let mut rng = StdRng::seed_from_u64(8);
    let n = 80;
    let g = random_graph(&mut rng, n, 0.03);

    let mut sink = MemorySink::new();
    let config = DecomposeConfig::new()
        .with_depth(1)
        .with_max_components(usize::MAX);
    let summary = decompose(g, &config, &mut sink).unwrap();

    assert_eq!(summary.reason, DoneReason::Exhausted);
    assert!(summary.components <= n as usize);

    let mut all: Vec<u32> = sink
        .components()
        .iter()
        .flat_map(|c| label_list(&c.graph))
        .collect();
    all.sort_unstable();
    assert_eq!(all, (0..n).collect::<Vec<_>>());
}

/// Test the 5-node path walkthrough.
#[test]
fn test_path_walkthrough() {
    let mut builder = GraphBuilder::new(5);
    for i in 0..5u32 {
        builder.set_label(NodeId(i), i);
        if i < 4 {
            builder.add_edge(NodeId(i), NodeId(i + 1));
        }
    }

    let mut sink = MemorySink::new();
    let config = DecomposeConfig::new().with_depth(1).with_max_components(10);
    let summary = decompose(builder.build(), &config, &mut sink).unwrap();

    assert_eq!(summary.components, 2);
    assert_eq!(summary.reason, DoneReason::Exhausted);

    let first = &sink.components()[0].graph;
    assert_eq!(label_list(first), vec![0, 1, 2]);
    assert_eq!(first.edge_count(), 2);

    let second = &sink.components()[1].graph;
    assert_eq!(label_list(second), vec![3, 4]);
    assert!(second.adjacent(NodeId(0), NodeId(1)));
}
