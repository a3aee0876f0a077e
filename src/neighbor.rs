//! Edge-swap proposal kernels.
//!
//! Both kernels take the current tree by reference and return a new tree;
//! the input is never touched, so a rejected candidate can simply be
//! dropped.

use rand::seq::IndexedRandom;
use rand::Rng;

use crate::error::{LdstError, LdstResult};
use crate::graph::{Graph, SpanningTree};

/// Neighbor-generation kernel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Transition {
    /// Insert a random non-tree graph edge, then delete a random edge of
    /// the cycle it closes. Always yields a spanning tree; deleting the
    /// inserted edge itself is a legal no-op.
    #[default]
    CycleSwap,

    /// Pick a random graph edge `e` and a random tree edge `f`. If `e` is
    /// already in the tree only `f` is dropped; otherwise `e` is added and
    /// `f` is dropped in the same move. Adding `e` alone could never leave
    /// a tree, so the swap is done in one step and undone if the result is
    /// not a tree. Frequently a no-op.
    RandomSwap,
}

impl Transition {
    /// Proposes one neighbor of `tree` within `graph`.
    ///
    /// Fails with [`LdstError::NoTransitionAvailable`] when the kernel has
    /// nothing to choose from: no graph edge outside the tree for
    /// `CycleSwap`, no graph or tree edge for `RandomSwap`.
    pub fn propose<R: Rng>(
        &self,
        graph: &Graph,
        tree: &SpanningTree,
        rng: &mut R,
    ) -> LdstResult<SpanningTree> {
        match self {
            Transition::CycleSwap => cycle_swap(graph, tree, rng),
            Transition::RandomSwap => random_swap(graph, tree, rng),
        }
    }
}

fn cycle_swap<R: Rng>(graph: &Graph, tree: &SpanningTree, rng: &mut R) -> LdstResult<SpanningTree> {
    let pool: Vec<(usize, usize)> = graph
        .edges()
        .filter(|&(a, b)| !tree.has_edge(a, b))
        .collect();
    let &(a, b) = pool.choose(rng).ok_or(LdstError::NoTransitionAvailable)?;

    let mut work = tree.as_subgraph().clone();
    work.add_edge(a, b);
    let cycle = work.find_cycle()?;
    let &(x, y) = cycle.choose(rng).ok_or(LdstError::NoCycle)?;
    work.remove_edge(x, y);

    Ok(SpanningTree::from_verified(work))
}

fn random_swap<R: Rng>(graph: &Graph, tree: &SpanningTree, rng: &mut R) -> LdstResult<SpanningTree> {
    let graph_edges: Vec<(usize, usize)> = graph.edges().collect();
    let tree_edges = tree.edge_list();
    let &(ea, eb) = graph_edges
        .choose(rng)
        .ok_or(LdstError::NoTransitionAvailable)?;
    let &(fa, fb) = tree_edges
        .choose(rng)
        .ok_or(LdstError::NoTransitionAvailable)?;

    let mut work = tree.as_subgraph().clone();
    let in_tree = work.has_edge(ea, eb);
    if !in_tree {
        work.add_edge(ea, eb);
    }
    work.remove_edge(fa, fb);

    if !work.is_tree() {
        work.add_edge(fa, fb);
        if !in_tree {
            work.remove_edge(ea, eb);
        }
    }

    Ok(SpanningTree::from_verified(work))
}
