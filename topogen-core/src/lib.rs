//! Topogen core library.
//!
//! Synthesizes small random undirected topologies that are guaranteed to be
//! connected and serializes them as GraphML. A run samples edges, discovers
//! connected components, merges those components with random bridging edges,
//! and finally writes the graph.
//!
//! Given a seed, every random draw is reproducible: identical node counts,
//! edge probabilities, and seeds yield byte-identical output for the same
//! platform and `rand` release.
#![cfg_attr(docsrs, feature(doc_cfg))]

mod adjacency;
mod builder;
mod components;
mod error;
mod generator;
mod graphml;
mod repair;
mod sampling;

pub use crate::{
    adjacency::{AdjacencyMatrix, MAX_NODE_COUNT},
    builder::{DEFAULT_EDGE_PROBABILITY, DEFAULT_NODE_COUNT, TopologyBuilder},
    components::{Component, find_components},
    error::{Result, TopologyError, TopologyErrorCode},
    generator::{GenerationSummary, Topology, TopologyGenerator},
    graphml::{render_graphml, write_graphml},
    repair::{RepairSummary, repair_connectivity},
    sampling::sample_random_graph,
};
