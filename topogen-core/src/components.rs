//! Connected-component discovery.
//!
//! Components are found with an iterative depth-first traversal so the
//! traversal depth never depends on the call stack.

use rand::{Rng, seq::SliceRandom};
use tracing::{debug, instrument};

use crate::adjacency::AdjacencyMatrix;

/// A set of mutually reachable nodes, kept in discovery order.
///
/// # Examples
/// ```
/// use topogen_core::Component;
///
/// let merged = Component::from_nodes(vec![0, 3]).merge(Component::from_nodes(vec![1]));
/// assert_eq!(merged.nodes(), &[0, 3, 1]);
/// assert_eq!(merged.len(), 3);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Component {
    nodes: Vec<usize>,
}

impl Component {
    /// Wraps an explicit node list.
    #[must_use]
    pub const fn from_nodes(nodes: Vec<usize>) -> Self {
        Self { nodes }
    }

    /// Returns the member nodes in discovery order.
    #[must_use]
    pub const fn nodes(&self) -> &[usize] {
        self.nodes.as_slice()
    }

    /// Returns the number of member nodes.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns whether the component has no members.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns whether `node` belongs to the component.
    #[must_use]
    pub fn contains(&self, node: usize) -> bool {
        self.nodes.contains(&node)
    }

    /// Combines two components into one holding every member of both.
    ///
    /// Members of `self` come first, followed by those of `other`.
    #[must_use]
    pub fn merge(mut self, other: Self) -> Self {
        self.nodes.extend(other.nodes);
        self
    }

    /// Draws one member uniformly at random, or `None` when empty.
    pub fn choose<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<usize> {
        self.nodes.choose(rng).copied()
    }

    /// Consumes the component, returning its members.
    #[must_use]
    pub fn into_nodes(self) -> Vec<usize> {
        self.nodes
    }
}

/// Partitions the nodes of `graph` into connected components.
///
/// Traversal starts from the lowest-indexed unvisited node and explores
/// neighbours in ascending order, so components appear ordered by their
/// smallest member. An edge counts as present when either directional entry
/// is set.
///
/// # Examples
/// ```
/// use topogen_core::{AdjacencyMatrix, find_components};
///
/// let mut graph = AdjacencyMatrix::new(4);
/// graph.connect(0, 2)?;
/// let components = find_components(&graph);
/// let members: Vec<_> = components.iter().map(|c| c.nodes().to_vec()).collect();
/// assert_eq!(members, vec![vec![0, 2], vec![1], vec![3]]);
/// # Ok::<(), topogen_core::TopologyError>(())
/// ```
#[must_use]
#[instrument(name = "find_components", skip(graph), fields(nodes = graph.node_count()))]
pub fn find_components(graph: &AdjacencyMatrix) -> Vec<Component> {
    let node_count = graph.node_count();
    let mut visited = vec![false; node_count];
    let mut frontier = Vec::new();
    let mut components = Vec::new();

    for start in 0..node_count {
        if is_visited(&visited, start) {
            continue;
        }
        let mut members = Vec::new();
        frontier.push(start);
        while let Some(node) = frontier.pop() {
            let Some(seen) = visited.get_mut(node) else {
                continue;
            };
            if *seen {
                continue;
            }
            *seen = true;
            members.push(node);
            // Reverse push so the lowest neighbour is explored first.
            frontier.extend(
                graph
                    .neighbours(node)
                    .rev()
                    .filter(|&next| !is_visited(&visited, next)),
            );
        }
        components.push(Component::from_nodes(members));
    }

    debug!(components = components.len(), "discovered components");
    components
}

fn is_visited(visited: &[bool], node: usize) -> bool {
    visited.get(node).copied().unwrap_or(true)
}
