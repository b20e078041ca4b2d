//! Dense adjacency table backing every generated topology.
//!
//! Graphs produced by topogen are small (tens to a few hundred nodes), so the
//! table stores all `n × n` directional entries in a single row-major buffer.
//! This keeps symmetry and diagonal checks trivial at the cost of quadratic
//! memory; an adjacency-list form would only pay off for much larger graphs.

use crate::{Result, error::TopologyError};

/// Largest node count whose table fits in a single buffer.
///
/// `Vec` lengths are capped at `isize::MAX` bytes; a table needs one byte per
/// directional entry. Counts this large still exhaust memory long before
/// reaching the cap, so the bound only guards against arithmetic overflow.
pub const MAX_NODE_COUNT: usize = (usize::MAX >> 1).isqrt();

/// Number of entries in a table of `node_count` nodes, if addressable.
pub(crate) const fn table_len(node_count: usize) -> Option<usize> {
    if node_count > MAX_NODE_COUNT {
        return None;
    }
    node_count.checked_mul(node_count)
}

/// An `n × n` boolean adjacency table over nodes `0..n`.
///
/// Entry `(i, j)` records an arc from `i` to `j`. Undirected edges set both
/// entries through [`AdjacencyMatrix::connect`].
///
/// # Examples
/// ```
/// use topogen_core::AdjacencyMatrix;
///
/// let mut graph = AdjacencyMatrix::new(3);
/// assert!(graph.connect(0, 2)?);
/// assert!(graph.has_edge(2, 0));
/// assert_eq!(graph.edges().collect::<Vec<_>>(), vec![(0, 2)]);
/// # Ok::<(), topogen_core::TopologyError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdjacencyMatrix {
    node_count: usize,
    entries: Vec<bool>,
}

impl AdjacencyMatrix {
    /// Creates a table of `node_count` nodes with no edges.
    ///
    /// # Panics
    /// Panics when `node_count²` entries cannot be addressed; use
    /// [`AdjacencyMatrix::try_new`] for sizes taken from user input.
    #[must_use]
    pub fn new(node_count: usize) -> Self {
        match Self::try_new(node_count) {
            Ok(graph) => graph,
            Err(err) => panic!("{err}"),
        }
    }

    /// Creates a table of `node_count` nodes with no edges, rejecting sizes
    /// whose `node_count²` entries exceed the largest possible buffer.
    ///
    /// # Errors
    /// Returns [`TopologyError::NodeCountTooLarge`] when `node_count²`
    /// overflows `usize` or exceeds `isize::MAX`.
    ///
    /// # Examples
    /// ```
    /// use topogen_core::{AdjacencyMatrix, TopologyError};
    ///
    /// assert_eq!(AdjacencyMatrix::try_new(3)?.node_count(), 3);
    /// assert!(matches!(
    ///     AdjacencyMatrix::try_new(usize::MAX),
    ///     Err(TopologyError::NodeCountTooLarge { .. })
    /// ));
    /// # Ok::<(), TopologyError>(())
    /// ```
    pub fn try_new(node_count: usize) -> Result<Self> {
        let len = table_len(node_count).ok_or(TopologyError::NodeCountTooLarge {
            got: node_count,
            max: MAX_NODE_COUNT,
        })?;
        Ok(Self {
            node_count,
            entries: vec![false; len],
        })
    }

    /// Returns the number of nodes in the table.
    #[must_use]
    pub const fn node_count(&self) -> usize {
        self.node_count
    }

    /// Returns whether the directional entry `(from, to)` is set.
    ///
    /// Indices outside the table read as absent.
    #[must_use]
    pub fn has_edge(&self, from: usize, to: usize) -> bool {
        self.slot(from, to)
            .and_then(|slot| self.entries.get(slot))
            .copied()
            .unwrap_or(false)
    }

    /// Returns whether either directional entry between `left` and `right` is
    /// set.
    #[must_use]
    pub fn is_adjacent(&self, left: usize, right: usize) -> bool {
        self.has_edge(left, right) || self.has_edge(right, left)
    }

    /// Adds the undirected edge `{left, right}` by setting both directional
    /// entries.
    ///
    /// Returns `true` when the edge was not already present in both
    /// directions.
    ///
    /// # Errors
    /// Returns [`TopologyError::NodeOutOfBounds`] when either endpoint is not
    /// a node of the table and [`TopologyError::SelfLoop`] when both endpoints
    /// name the same node.
    pub fn connect(&mut self, left: usize, right: usize) -> Result<bool> {
        if left == right {
            return Err(TopologyError::SelfLoop { node: left });
        }
        let forward = self.checked_slot(left, right)?;
        let backward = self.checked_slot(right, left)?;
        let added = !(self.has_edge(left, right) && self.has_edge(right, left));
        for slot in [forward, backward] {
            if let Some(entry) = self.entries.get_mut(slot) {
                *entry = true;
            }
        }
        Ok(added)
    }

    /// Sets only the directional entry `(from, to)`.
    ///
    /// Tables built this way may be asymmetric; [`crate::find_components`]
    /// still treats such an entry as an undirected edge.
    ///
    /// # Errors
    /// Returns [`TopologyError::NodeOutOfBounds`] for indices outside the
    /// table and [`TopologyError::SelfLoop`] when `from == to`.
    pub fn insert_arc(&mut self, from: usize, to: usize) -> Result<()> {
        if from == to {
            return Err(TopologyError::SelfLoop { node: from });
        }
        let slot = self.checked_slot(from, to)?;
        if let Some(entry) = self.entries.get_mut(slot) {
            *entry = true;
        }
        Ok(())
    }

    /// Iterates the undirected edges `(i, j)` with `i < j` in row-major order.
    ///
    /// Only the upper triangle is consulted, matching how edges are written.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.node_count).flat_map(move |row| {
            (row.saturating_add(1)..self.node_count)
                .filter(move |&column| self.has_edge(row, column))
                .map(move |column| (row, column))
        })
    }

    /// Counts the undirected edges recorded in the upper triangle.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges().count()
    }

    /// Returns whether every entry `(i, j)` equals `(j, i)`.
    #[must_use]
    pub fn is_symmetric(&self) -> bool {
        (0..self.node_count).all(|row| {
            (row.saturating_add(1)..self.node_count)
                .all(|column| self.has_edge(row, column) == self.has_edge(column, row))
        })
    }

    /// Returns whether any diagonal entry is set.
    #[must_use]
    pub fn has_self_loops(&self) -> bool {
        (0..self.node_count).any(|node| self.has_edge(node, node))
    }

    pub(crate) fn neighbours(&self, node: usize) -> impl DoubleEndedIterator<Item = usize> + '_ {
        (0..self.node_count).filter(move |&other| self.is_adjacent(node, other))
    }

    fn slot(&self, from: usize, to: usize) -> Option<usize> {
        if from >= self.node_count || to >= self.node_count {
            return None;
        }
        from.checked_mul(self.node_count)?.checked_add(to)
    }

    fn checked_slot(&self, from: usize, to: usize) -> Result<usize> {
        self.slot(from, to).ok_or(TopologyError::NodeOutOfBounds {
            index: if from >= self.node_count { from } else { to },
            node_count: self.node_count,
        })
    }
}
