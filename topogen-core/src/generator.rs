//! Topology generation orchestration.
//!
//! Provides the [`TopologyGenerator`] entry point, which runs sampling,
//! component discovery, and connectivity repair in sequence, and the
//! [`Topology`] it produces.

use std::{num::NonZeroUsize, path::Path};

use rand::{Rng, SeedableRng, rngs::SmallRng};
use tracing::{info, instrument};

use crate::{
    Result,
    adjacency::AdjacencyMatrix,
    components::find_components,
    graphml::write_graphml,
    repair::{RepairSummary, repair_connectivity},
    sampling::sample_random_graph,
};

/// Entry point for generating connected random topologies.
///
/// Instances are built through [`crate::TopologyBuilder`], which validates the
/// parameters up front.
///
/// # Examples
/// ```
/// use topogen_core::TopologyBuilder;
///
/// let generator = TopologyBuilder::new()
///     .with_node_count(12)
///     .with_edge_probability(0.1)
///     .with_seed(42)
///     .build()
///     .expect("builder must succeed");
/// let topology = generator.generate().expect("generation must succeed");
/// assert_eq!(topology.graph().node_count(), 12);
/// assert_eq!(topology.summary().final_components, 1);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct TopologyGenerator {
    node_count: NonZeroUsize,
    edge_probability: f64,
    seed: Option<u64>,
}

/// Statistics gathered while generating a [`Topology`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationSummary {
    /// Number of nodes in the graph.
    pub nodes: usize,
    /// Edges produced by random sampling.
    pub sampled_edges: usize,
    /// Components present before repair.
    pub initial_components: usize,
    /// Components present after repair; always one.
    pub final_components: usize,
    /// Counters reported by the repair stage.
    pub repair: RepairSummary,
    /// Edges in the finished graph.
    pub edges: usize,
}

/// A generated, connected topology together with its generation statistics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Topology {
    graph: AdjacencyMatrix,
    summary: GenerationSummary,
}

impl TopologyGenerator {
    pub(crate) const fn new(
        node_count: NonZeroUsize,
        edge_probability: f64,
        seed: Option<u64>,
    ) -> Self {
        Self {
            node_count,
            edge_probability,
            seed,
        }
    }

    /// Returns the number of nodes generated per run.
    #[must_use]
    pub const fn node_count(&self) -> NonZeroUsize {
        self.node_count
    }

    /// Returns the per-pair edge probability.
    #[must_use]
    pub const fn edge_probability(&self) -> f64 {
        self.edge_probability
    }

    /// Returns the seed, if generation is reproducible.
    #[must_use]
    pub const fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Generates a topology, seeding the random source from the configured
    /// seed or from OS entropy when none is set.
    ///
    /// # Errors
    /// Propagates any [`crate::TopologyError`] raised by the pipeline stages.
    pub fn generate(&self) -> Result<Topology> {
        let mut rng = match self.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };
        self.generate_with_rng(&mut rng)
    }

    /// Generates a topology drawing every random choice from `rng`.
    ///
    /// # Errors
    /// Propagates any [`crate::TopologyError`] raised by the pipeline stages.
    ///
    /// # Examples
    /// ```
    /// use rand::{SeedableRng, rngs::SmallRng};
    /// use topogen_core::TopologyBuilder;
    ///
    /// let generator = TopologyBuilder::new()
    ///     .with_node_count(4)
    ///     .with_edge_probability(0.0)
    ///     .build()
    ///     .expect("builder must succeed");
    /// let topology = generator.generate_with_rng(&mut SmallRng::seed_from_u64(3))?;
    /// assert_eq!(topology.summary().repair.merges, 3);
    /// # Ok::<(), topogen_core::TopologyError>(())
    /// ```
    #[instrument(
        name = "generate",
        err,
        skip(self, rng),
        fields(
            nodes = self.node_count.get(),
            edge_probability = self.edge_probability,
            seed = ?self.seed,
        ),
    )]
    pub fn generate_with_rng<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Topology> {
        let mut graph = sample_random_graph(self.node_count.get(), self.edge_probability, rng)?;
        let sampled_edges = graph.edge_count();

        let components = find_components(&graph);
        let initial_components = components.len();
        let repair = repair_connectivity(&mut graph, components, rng)?;

        let summary = GenerationSummary {
            nodes: graph.node_count(),
            sampled_edges,
            initial_components,
            final_components: find_components(&graph).len(),
            repair,
            edges: graph.edge_count(),
        };
        info!(
            edges = summary.edges,
            initial_components,
            merges = repair.merges,
            "topology generated"
        );
        Ok(Topology { graph, summary })
    }
}

impl Topology {
    /// Returns the generated adjacency table.
    #[must_use]
    pub const fn graph(&self) -> &AdjacencyMatrix {
        &self.graph
    }

    /// Returns the statistics gathered during generation.
    #[must_use]
    pub const fn summary(&self) -> &GenerationSummary {
        &self.summary
    }

    /// Consumes the topology, returning the adjacency table.
    #[must_use]
    pub fn into_graph(self) -> AdjacencyMatrix {
        self.graph
    }

    /// Writes the topology as GraphML to `path`.
    ///
    /// # Errors
    /// Returns [`crate::TopologyError::Io`] when the file cannot be written.
    pub fn write_graphml(&self, path: &Path) -> Result<()> {
        write_graphml(&self.graph, path)
    }
}
