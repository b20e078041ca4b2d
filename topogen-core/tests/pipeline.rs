//! End-to-end tests for the topology generation pipeline.

use std::collections::BTreeSet;
use std::fs;

use rand::{SeedableRng, rngs::SmallRng};
use rstest::{fixture, rstest};
use tempfile::TempDir;
use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;

use topogen_core::{
    AdjacencyMatrix, TopologyBuilder, TopologyError, find_components, render_graphml,
    repair_connectivity, sample_random_graph,
};
use topogen_test_support::graphml::parse_graphml;
use topogen_test_support::tracing::RecordingLayer;

#[fixture]
fn output_dir() -> TempDir {
    TempDir::new().expect("temp dir must be created")
}

fn render_to_string(graph: &AdjacencyMatrix) -> String {
    let mut buffer = Vec::new();
    render_graphml(graph, &mut buffer).expect("rendering into memory succeeds");
    String::from_utf8(buffer).expect("graph description is UTF-8")
}

#[rstest]
fn empty_graph_is_repaired_with_one_edge_per_merge() {
    let mut rng = SmallRng::seed_from_u64(17);
    let mut graph = sample_random_graph(4, 0.0, &mut rng).expect("parameters are valid");
    assert_eq!(graph, AdjacencyMatrix::new(4));

    let components = find_components(&graph);
    let members: Vec<Vec<usize>> = components.iter().map(|c| c.nodes().to_vec()).collect();
    assert_eq!(members, vec![vec![0], vec![1], vec![2], vec![3]]);

    let summary = repair_connectivity(&mut graph, components, &mut rng).expect("repair succeeds");
    assert_eq!(summary.merges, 3);
    assert_eq!(summary.sampled_edges, 3);
    assert_eq!(summary.new_edges, 3);
    assert_eq!(graph.edge_count(), 3);

    let after = find_components(&graph);
    assert_eq!(after.len(), 1);
    assert_eq!(after[0].len(), 4);
}

#[rstest]
#[case::sparse(0.0)]
#[case::dense(0.9)]
fn single_node_needs_no_repair(#[case] probability: f64) {
    let topology = TopologyBuilder::new()
        .with_node_count(1)
        .with_edge_probability(probability)
        .with_seed(1)
        .build()
        .expect("configuration is valid")
        .generate()
        .expect("generation succeeds");

    assert_eq!(topology.graph(), &AdjacencyMatrix::new(1));
    assert_eq!(topology.summary().initial_components, 1);
    assert_eq!(topology.summary().repair.merges, 0);

    let parsed = parse_graphml(&render_to_string(topology.graph())).expect("output parses");
    assert_eq!(parsed.nodes, vec![0]);
    assert!(parsed.edges.is_empty());
}

#[rstest]
fn complete_graph_needs_no_repair() {
    let topology = TopologyBuilder::new()
        .with_node_count(5)
        .with_edge_probability(1.0)
        .with_seed(9)
        .build()
        .expect("configuration is valid")
        .generate()
        .expect("generation succeeds");

    let summary = topology.summary();
    assert_eq!(summary.sampled_edges, 10);
    assert_eq!(summary.initial_components, 1);
    assert_eq!(summary.repair.merges, 0);
    assert_eq!(summary.edges, 10);

    let parsed = parse_graphml(&render_to_string(topology.graph())).expect("output parses");
    assert_eq!(parsed.nodes, vec![0, 1, 2, 3, 4]);
    assert_eq!(parsed.edges.len(), 10);
}

#[rstest]
#[case(30, 0.05, 11)]
#[case(60, 0.02, 12)]
#[case(120, 0.3, 13)]
fn generated_topologies_are_connected(
    #[case] nodes: usize,
    #[case] probability: f64,
    #[case] seed: u64,
) {
    let topology = TopologyBuilder::new()
        .with_node_count(nodes)
        .with_edge_probability(probability)
        .with_seed(seed)
        .build()
        .expect("configuration is valid")
        .generate()
        .expect("generation succeeds");

    let graph = topology.graph();
    assert!(graph.is_symmetric());
    assert!(!graph.has_self_loops());
    let components = find_components(graph);
    assert_eq!(components.len(), 1);
    let members: BTreeSet<usize> = components[0].nodes().iter().copied().collect();
    assert_eq!(members, (0..nodes).collect());
    assert_eq!(topology.summary().final_components, 1);
    assert_eq!(
        topology.summary().repair.merges,
        topology.summary().initial_components - 1
    );
}

#[rstest]
fn identical_seeds_write_identical_files(output_dir: TempDir) {
    let generator = TopologyBuilder::new()
        .with_node_count(80)
        .with_edge_probability(0.03)
        .with_seed(2024)
        .build()
        .expect("configuration is valid");

    let first_path = output_dir.path().join("first.graphml");
    let second_path = output_dir.path().join("second.graphml");
    generator
        .generate()
        .expect("generation succeeds")
        .write_graphml(&first_path)
        .expect("write succeeds");
    generator
        .generate()
        .expect("generation succeeds")
        .write_graphml(&second_path)
        .expect("write succeeds");

    let first = fs::read(&first_path).expect("first file readable");
    let second = fs::read(&second_path).expect("second file readable");
    assert_eq!(first, second);
}

#[rstest]
fn written_file_round_trips(output_dir: TempDir) {
    let topology = TopologyBuilder::new()
        .with_node_count(40)
        .with_edge_probability(0.08)
        .with_seed(5)
        .build()
        .expect("configuration is valid")
        .generate()
        .expect("generation succeeds");
    let path = output_dir.path().join("graph1.graphml");
    topology.write_graphml(&path).expect("write succeeds");

    let text = fs::read_to_string(&path).expect("file readable");
    let parsed = parse_graphml(&text).expect("output parses");
    assert_eq!(parsed.edge_default.as_deref(), Some("undirected"));
    assert_eq!(parsed.nodes, (0..40).collect::<Vec<_>>());
    assert_eq!(parsed.edges, topology.graph().edges().collect::<Vec<_>>());
    assert_eq!(parsed.edge_set().len(), parsed.edges.len());
}

#[rstest]
fn unwritable_destination_reports_io_error(output_dir: TempDir) {
    let topology = TopologyBuilder::new()
        .with_node_count(3)
        .with_seed(1)
        .build()
        .expect("configuration is valid")
        .generate()
        .expect("generation succeeds");
    let path = output_dir.path().join("absent").join("graph.graphml");

    let err = topology
        .write_graphml(&path)
        .expect_err("missing directory must fail");
    assert_eq!(err.code().as_str(), "TOPOGEN_IO");
    assert!(!path.exists());
    assert_eq!(topology.graph().node_count(), 3);
}

#[rstest]
#[case::zero_nodes(0, 0.5)]
#[case::negative_probability(5, -1.0)]
#[case::probability_above_one(5, 1.5)]
#[case::nan_probability(5, f64::NAN)]
#[case::oversized_node_count(usize::MAX, 0.5)]
fn invalid_parameters_are_rejected(#[case] nodes: usize, #[case] probability: f64) {
    let err = TopologyBuilder::new()
        .with_node_count(nodes)
        .with_edge_probability(probability)
        .build()
        .expect_err("configuration must be rejected");
    assert!(err.is_configuration());
    assert!(matches!(
        err,
        TopologyError::InvalidNodeCount { .. }
            | TopologyError::NodeCountTooLarge { .. }
            | TopologyError::InvalidEdgeProbability { .. }
    ));
}

#[rstest]
fn generation_emits_structured_events() {
    let layer = RecordingLayer::default();
    let subscriber = tracing_subscriber::registry().with(layer.clone());
    tracing::subscriber::with_default(subscriber, || {
        TopologyBuilder::new()
            .with_node_count(6)
            .with_edge_probability(0.0)
            .with_seed(3)
            .build()
            .expect("configuration is valid")
            .generate()
            .expect("generation succeeds");
    });

    let repaired = layer
        .event_with_message("connectivity repaired")
        .expect("repair summary event must be recorded");
    assert_eq!(repaired.level, Level::INFO);
    assert_eq!(repaired.field("merges"), Some("5"));

    let generated = layer
        .event_with_message("topology generated")
        .expect("generation event must be recorded");
    assert_eq!(generated.field("initial_components"), Some("6"));

    let spans = layer.closed_spans();
    for name in [
        "sample_random_graph",
        "find_components",
        "repair_connectivity",
        "generate",
    ] {
        assert!(spans.iter().any(|span| span == name), "missing span {name}");
    }
}
