//! Random edge sampling for the initial topology.

use rand::Rng;
use tracing::{debug, instrument};

use crate::{
    Result,
    adjacency::AdjacencyMatrix,
    builder::{validate_edge_probability, validate_node_count},
};

/// Samples a random undirected graph over `node_count` nodes.
///
/// Each unordered pair `{i, j}` with `i < j` is visited in row-major order and
/// connected after a single Bernoulli draw succeeding with probability
/// `edge_probability`. Parameters are validated before the first draw.
///
/// # Errors
/// Returns [`crate::TopologyError::InvalidNodeCount`] when `node_count` is zero,
/// [`crate::TopologyError::NodeCountTooLarge`] when its table cannot be
/// addressed, and [`crate::TopologyError::InvalidEdgeProbability`] when the probability is
/// outside `[0, 1]`.
///
/// # Examples
/// ```
/// use rand::{SeedableRng, rngs::SmallRng};
/// use topogen_core::sample_random_graph;
///
/// let mut rng = SmallRng::seed_from_u64(1);
/// let graph = sample_random_graph(5, 1.0, &mut rng)?;
/// assert_eq!(graph.edge_count(), 10);
/// # Ok::<(), topogen_core::TopologyError>(())
/// ```
#[instrument(name = "sample_random_graph", skip(rng))]
pub fn sample_random_graph<R: Rng + ?Sized>(
    node_count: usize,
    edge_probability: f64,
    rng: &mut R,
) -> Result<AdjacencyMatrix> {
    let node_count = validate_node_count(node_count)?.get();
    let edge_probability = validate_edge_probability(edge_probability)?;

    let mut graph = AdjacencyMatrix::try_new(node_count)?;
    for left in 0..node_count {
        for right in (left + 1)..node_count {
            if rng.gen_bool(edge_probability) {
                graph.connect(left, right)?;
            }
        }
    }

    debug!(
        nodes = node_count,
        edges = graph.edge_count(),
        "sampled initial graph"
    );
    Ok(graph)
}
