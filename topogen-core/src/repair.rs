//! Connectivity repair by randomized component merging.
//!
//! Each round removes two components chosen uniformly at random, links them
//! with a handful of random edges, and returns their union to the pool. The
//! pool shrinks by exactly one per round, so a partition of `k` components
//! needs `k - 1` rounds to become a single component.

use rand::Rng;
use tracing::{debug, info, instrument};

use crate::{Result, adjacency::AdjacencyMatrix, components::Component, error::TopologyError};

/// Counters describing a completed repair.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RepairSummary {
    /// Number of component merges performed.
    pub merges: usize,
    /// Number of endpoint pairs drawn across all merges.
    pub sampled_edges: usize,
    /// Number of drawn pairs that were not already connected.
    pub new_edges: usize,
}

/// Merges `components` until one remains, adding edges to `graph` as it goes.
///
/// `components` must partition the nodes of `graph`, as produced by
/// [`crate::find_components`]. Every merge links the two chosen components
/// with `max(1, ⌊min(|A|, |B|) / 2⌋)` edges whose endpoints are drawn
/// uniformly from each side, then keeps the full union of both node sets.
///
/// # Errors
/// Returns [`TopologyError::EmptyComponent`] when the list contains an empty
/// component, and propagates [`TopologyError::NodeOutOfBounds`] when a
/// component names a node outside `graph`.
///
/// # Examples
/// ```
/// use rand::{SeedableRng, rngs::SmallRng};
/// use topogen_core::{AdjacencyMatrix, find_components, repair_connectivity};
///
/// let mut graph = AdjacencyMatrix::new(4);
/// let components = find_components(&graph);
/// let summary = repair_connectivity(&mut graph, components, &mut SmallRng::seed_from_u64(5))?;
/// assert_eq!(summary.merges, 3);
/// assert_eq!(find_components(&graph).len(), 1);
/// # Ok::<(), topogen_core::TopologyError>(())
/// ```
#[instrument(
    name = "repair_connectivity",
    skip(graph, components, rng),
    fields(nodes = graph.node_count(), components = components.len()),
)]
pub fn repair_connectivity<R: Rng + ?Sized>(
    graph: &mut AdjacencyMatrix,
    mut components: Vec<Component>,
    rng: &mut R,
) -> Result<RepairSummary> {
    if let Some(position) = components.iter().position(Component::is_empty) {
        return Err(TopologyError::EmptyComponent { position });
    }

    let mut summary = RepairSummary::default();
    while components.len() > 1 {
        let (Some(first), Some(second)) = (
            take_random(&mut components, rng),
            take_random(&mut components, rng),
        ) else {
            break;
        };

        let links = link_count(first.len(), second.len());
        for _ in 0..links {
            let (Some(left), Some(right)) = (first.choose(rng), second.choose(rng)) else {
                break;
            };
            summary.sampled_edges += 1;
            if graph.connect(left, right)? {
                summary.new_edges += 1;
            }
        }

        debug!(
            left = first.len(),
            right = second.len(),
            links,
            remaining = components.len() + 1,
            "merged components"
        );
        components.push(first.merge(second));
        summary.merges += 1;
    }

    info!(
        merges = summary.merges,
        new_edges = summary.new_edges,
        "connectivity repaired"
    );
    Ok(summary)
}

/// Number of edges used to join components of the given sizes.
fn link_count(left: usize, right: usize) -> usize {
    left.min(right).div_euclid(2).max(1)
}

fn take_random<R: Rng + ?Sized>(components: &mut Vec<Component>, rng: &mut R) -> Option<Component> {
    if components.is_empty() {
        return None;
    }
    let index = rng.gen_range(0..components.len());
    Some(components.remove(index))
}

#[cfg(test)]
mod tests {
    use super::*;

    use rand::{SeedableRng, rngs::SmallRng};
    use rstest::rstest;

    use crate::components::find_components;

    #[rstest]
    #[case(1, 1, 1)]
    #[case(1, 9, 1)]
    #[case(2, 2, 1)]
    #[case(3, 8, 1)]
    #[case(4, 5, 2)]
    #[case(11, 20, 5)]
    fn link_count_has_floor_of_one(
        #[case] left: usize,
        #[case] right: usize,
        #[case] expected: usize,
    ) {
        assert_eq!(link_count(left, right), expected);
        assert_eq!(link_count(right, left), expected);
    }

    #[rstest]
    fn connected_input_is_a_no_op() {
        let mut graph = AdjacencyMatrix::new(3);
        graph.connect(0, 1).expect("edge within bounds");
        graph.connect(1, 2).expect("edge within bounds");
        let before = graph.clone();
        let components = find_components(&graph);
        let summary = repair_connectivity(&mut graph, components, &mut SmallRng::seed_from_u64(0))
            .expect("repair succeeds");
        assert_eq!(summary, RepairSummary::default());
        assert_eq!(graph, before);
    }

    #[rstest]
    #[case::seed_a(1)]
    #[case::seed_b(2)]
    #[case::seed_c(3)]
    fn singletons_merge_into_one_component(#[case] seed: u64) {
        let mut graph = AdjacencyMatrix::new(6);
        let components = find_components(&graph);
        let summary =
            repair_connectivity(&mut graph, components, &mut SmallRng::seed_from_u64(seed))
                .expect("repair succeeds");
        assert_eq!(summary.merges, 5);
        let remaining = find_components(&graph);
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].len(), 6);
        assert!(graph.is_symmetric());
        assert!(!graph.has_self_loops());
    }

    #[rstest]
    fn rejects_empty_components() {
        let mut graph = AdjacencyMatrix::new(2);
        let components = vec![Component::from_nodes(vec![0, 1]), Component::default()];
        let err = repair_connectivity(&mut graph, components, &mut SmallRng::seed_from_u64(0))
            .expect_err("empty component must be rejected");
        assert!(matches!(err, TopologyError::EmptyComponent { position: 1 }));
    }

    #[rstest]
    fn rejects_nodes_outside_graph() {
        let mut graph = AdjacencyMatrix::new(2);
        let components = vec![Component::from_nodes(vec![0]), Component::from_nodes(vec![4])];
        let err = repair_connectivity(&mut graph, components, &mut SmallRng::seed_from_u64(0))
            .expect_err("foreign node must be rejected");
        assert!(matches!(err, TopologyError::NodeOutOfBounds { index: 4, .. }));
    }

    #[rstest]
    fn empty_partition_is_a_no_op() {
        let mut graph = AdjacencyMatrix::new(0);
        let summary = repair_connectivity(&mut graph, Vec::new(), &mut SmallRng::seed_from_u64(0))
            .expect("nothing to repair");
        assert_eq!(summary.merges, 0);
    }
}
