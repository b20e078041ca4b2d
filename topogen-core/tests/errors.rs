//! Stable error code tests.

use std::io;
use std::path::PathBuf;

use rstest::rstest;
use topogen_core::{TopologyError, TopologyErrorCode};

#[rstest]
#[case(
    TopologyError::InvalidNodeCount { got: 0 },
    TopologyErrorCode::InvalidNodeCount,
    "TOPOGEN_INVALID_NODE_COUNT",
    true,
)]
#[case(
    TopologyError::NodeCountTooLarge { got: usize::MAX, max: 3 },
    TopologyErrorCode::NodeCountTooLarge,
    "TOPOGEN_NODE_COUNT_TOO_LARGE",
    true,
)]
#[case(
    TopologyError::InvalidEdgeProbability { got: 1.5 },
    TopologyErrorCode::InvalidEdgeProbability,
    "TOPOGEN_INVALID_EDGE_PROBABILITY",
    true,
)]
#[case(
    TopologyError::NodeOutOfBounds { index: 9, node_count: 3 },
    TopologyErrorCode::NodeOutOfBounds,
    "TOPOGEN_NODE_OUT_OF_BOUNDS",
    false,
)]
#[case(
    TopologyError::SelfLoop { node: 2 },
    TopologyErrorCode::SelfLoop,
    "TOPOGEN_SELF_LOOP",
    false,
)]
#[case(
    TopologyError::EmptyComponent { position: 0 },
    TopologyErrorCode::EmptyComponent,
    "TOPOGEN_EMPTY_COMPONENT",
    false,
)]
#[case(
    TopologyError::Io {
        path: PathBuf::from("graph1.graphml"),
        source: io::Error::from(io::ErrorKind::PermissionDenied),
    },
    TopologyErrorCode::Io,
    "TOPOGEN_IO",
    false,
)]
fn returns_expected_code(
    #[case] error: TopologyError,
    #[case] expected: TopologyErrorCode,
    #[case] code: &str,
    #[case] configuration: bool,
) {
    assert_eq!(error.code(), expected);
    assert_eq!(error.code().as_str(), code);
    assert_eq!(expected.to_string(), code);
    assert_eq!(error.is_configuration(), configuration);
}

#[rstest]
fn io_error_names_destination() {
    let error = TopologyError::Io {
        path: PathBuf::from("out/graph.graphml"),
        source: io::Error::from(io::ErrorKind::NotFound),
    };
    let message = error.to_string();
    assert!(message.contains("out/graph.graphml"));
    assert!(std::error::Error::source(&error).is_some());
}
