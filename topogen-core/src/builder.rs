//! Builder utilities for configuring topology generation.
//!
//! Collects the generation parameters and validates them before constructing
//! [`TopologyGenerator`] instances, so configuration errors surface before any
//! random draw is made.

use std::num::NonZeroUsize;

use crate::{
    Result,
    adjacency::{MAX_NODE_COUNT, table_len},
    error::TopologyError,
    generator::TopologyGenerator,
};

/// Node count used when none is configured.
pub const DEFAULT_NODE_COUNT: usize = 200;

/// Edge probability used when none is configured.
pub const DEFAULT_EDGE_PROBABILITY: f64 = 0.3;

/// Configures and constructs [`TopologyGenerator`] instances.
///
/// # Examples
/// ```
/// use topogen_core::TopologyBuilder;
///
/// let generator = TopologyBuilder::new()
///     .with_node_count(16)
///     .with_edge_probability(0.25)
///     .with_seed(7)
///     .build()
///     .expect("builder configuration is valid");
/// assert_eq!(generator.node_count().get(), 16);
/// assert_eq!(generator.seed(), Some(7));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct TopologyBuilder {
    node_count: usize,
    edge_probability: f64,
    seed: Option<u64>,
}

impl Default for TopologyBuilder {
    fn default() -> Self {
        Self {
            node_count: DEFAULT_NODE_COUNT,
            edge_probability: DEFAULT_EDGE_PROBABILITY,
            seed: None,
        }
    }
}

impl TopologyBuilder {
    /// Creates a builder populated with default parameters.
    ///
    /// # Examples
    /// ```
    /// use topogen_core::TopologyBuilder;
    ///
    /// let builder = TopologyBuilder::new();
    /// assert_eq!(builder.node_count(), 200);
    /// assert_eq!(builder.seed(), None);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the number of nodes to generate.
    #[must_use]
    pub const fn with_node_count(mut self, node_count: usize) -> Self {
        self.node_count = node_count;
        self
    }

    /// Returns the configured node count.
    #[must_use]
    pub const fn node_count(&self) -> usize {
        self.node_count
    }

    /// Overrides the probability with which each node pair is connected.
    ///
    /// # Examples
    /// ```
    /// use topogen_core::TopologyBuilder;
    ///
    /// let builder = TopologyBuilder::new().with_edge_probability(0.5);
    /// assert_eq!(builder.edge_probability(), 0.5);
    /// ```
    #[must_use]
    pub const fn with_edge_probability(mut self, edge_probability: f64) -> Self {
        self.edge_probability = edge_probability;
        self
    }

    /// Returns the configured edge probability.
    #[must_use]
    pub const fn edge_probability(&self) -> f64 {
        self.edge_probability
    }

    /// Fixes the seed so every random draw becomes reproducible.
    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Replaces the seed, clearing it when `seed` is `None`.
    #[must_use]
    pub const fn with_optional_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Returns the configured seed, if any.
    #[must_use]
    pub const fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Validates the configuration and constructs a [`TopologyGenerator`].
    ///
    /// # Errors
    /// Returns [`TopologyError::InvalidNodeCount`] when the node count is zero,
    /// [`TopologyError::NodeCountTooLarge`] when it exceeds
    /// [`crate::MAX_NODE_COUNT`], and [`TopologyError::InvalidEdgeProbability`]
    /// when the probability is outside `[0, 1]` or not a number.
    ///
    /// # Examples
    /// ```
    /// use topogen_core::{TopologyBuilder, TopologyError};
    ///
    /// let err = TopologyBuilder::new()
    ///     .with_edge_probability(1.5)
    ///     .build()
    ///     .expect_err("probability above one is rejected");
    /// assert!(matches!(err, TopologyError::InvalidEdgeProbability { .. }));
    /// ```
    pub fn build(self) -> Result<TopologyGenerator> {
        let node_count = validate_node_count(self.node_count)?;
        let edge_probability = validate_edge_probability(self.edge_probability)?;
        Ok(TopologyGenerator::new(
            node_count,
            edge_probability,
            self.seed,
        ))
    }
}

pub(crate) fn validate_node_count(node_count: usize) -> Result<NonZeroUsize> {
    let count =
        NonZeroUsize::new(node_count).ok_or(TopologyError::InvalidNodeCount { got: node_count })?;
    if table_len(node_count).is_none() {
        return Err(TopologyError::NodeCountTooLarge {
            got: node_count,
            max: MAX_NODE_COUNT,
        });
    }
    Ok(count)
}

pub(crate) fn validate_edge_probability(edge_probability: f64) -> Result<f64> {
    if (0.0..=1.0).contains(&edge_probability) {
        Ok(edge_probability)
    } else {
        Err(TopologyError::InvalidEdgeProbability {
            got: edge_probability,
        })
    }
}
