//! Integration tests for writing components to disk.

use egonet_graph::{
    decompose, load, save, DecomposeConfig, DirectorySink, Graph, GraphError, NodeId,
};
use tempfile::TempDir;

fn star_of_paths() -> Graph<String> {
    // Hub 0 with three arms of length 2: 0-1-2, 0-3-4, 0-5-6, plus a stray edge 7-8
    let edges = [(0, 1), (1, 2), (0, 3), (3, 4), (0, 5), (5, 6), (7, 8)];
    let mut g: Graph<String> = Graph::from_edges(9, &edges);
    for i in 0..9u32 {
        g.set_label(NodeId(i), format!("n{}", i)).unwrap();
    }
    g
}

/// Test a decomposition lands on disk as sequentially named files.
#[test]
fn test_decompose_to_directory() {
    let dir = TempDir::new().unwrap();
    let mut sink = DirectorySink::new(dir.path());

    let config = DecomposeConfig::new().with_depth(1).with_prefix("ego_");
    let summary = decompose(star_of_paths(), &config, &mut sink).unwrap();
    assert_eq!(summary.components, sink.written().len());

    let first: Graph<String> = load(dir.path().join("ego_0000.egr")).unwrap();
    // Hub plus its three neighbors
    assert_eq!(first.node_count(), 4);
    assert_eq!(first.edge_count(), 3);
    assert_eq!(first.label(NodeId(0)).map(String::as_str), Some("n0"));

    let total: usize = sink
        .written()
        .iter()
        .map(|p| load::<String>(p).unwrap().node_count())
        .sum();
    assert_eq!(total, 9);
}

/// Test a graph saved and loaded again is unchanged.
#[test]
fn test_save_load_roundtrip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("input.egr");

    let g = star_of_paths();
    save(&path, &g).unwrap();
    assert_eq!(load::<String>(&path).unwrap(), g);
}

/// Test a missing input file surfaces as an IO error.
#[test]
fn test_load_missing_file() {
    let dir = TempDir::new().unwrap();
    let result = load::<String>(dir.path().join("missing.egr"));
    assert!(matches!(result, Err(GraphError::Io(_))));
}

/// Test an unwritable output aborts the decomposition with a persist failure.
#[test]
fn test_unwritable_output() {
    let dir = TempDir::new().unwrap();
    let blocker = dir.path().join("out");
    std::fs::write(&blocker, b"not a directory").unwrap();

    let mut sink = DirectorySink::new(&blocker);
    let result = decompose(star_of_paths(), &DecomposeConfig::new(), &mut sink);

    let err = result.unwrap_err();
    assert_eq!(err.stage(), "write");
    assert!(matches!(err, GraphError::PersistFailure { .. }));
    assert!(sink.written().is_empty());
}
