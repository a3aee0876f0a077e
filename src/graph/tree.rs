//! Spanning tree value type.

use super::subgraph::Subgraph;
use super::weighted::Graph;
use crate::error::{LdstError, LdstResult};

/// A spanning tree of some [`Graph`].
///
/// Every constructor checks that the edges form a tree over all nodes of
/// the graph and that each edge exists in it. Kernels never mutate a tree
/// in place; they clone its [`Subgraph`], edit the copy and re-wrap it.
///
/// # Examples
///
/// ```
/// use u_ldst::graph::{Graph, SpanningTree};
///
/// let g = Graph::complete(4, |_, _| 1.0).unwrap();
/// let star = SpanningTree::from_edges(&g, &[(0, 1), (0, 2), (0, 3)]).unwrap();
/// assert_eq!(star.diameter(), 2);
///
/// // the edge list is enough to rebuild the tree
/// let again = SpanningTree::from_edges(&g, &star.edge_list()).unwrap();
/// assert_eq!(star, again);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpanningTree {
    inner: Subgraph,
}

impl SpanningTree {
    /// Rebuilds a tree from its edge list.
    ///
    /// Fails with `KeyNotFound` for an edge missing from `graph` and with
    /// `NotSpanningTree` if the edges are not a spanning tree.
    pub fn from_edges(graph: &Graph, edges: &[(usize, usize)]) -> LdstResult<Self> {
        let n = graph.node_count();
        for &(a, b) in edges {
            if !graph.has_edge(a, b) {
                return Err(LdstError::KeyNotFound { a, b });
            }
        }
        Self::from_subgraph(graph, Subgraph::from_edges(n, edges)?)
    }

    /// Wraps `subgraph` after checking it against `graph`.
    pub fn from_subgraph(graph: &Graph, subgraph: Subgraph) -> LdstResult<Self> {
        if subgraph.node_count() != graph.node_count() {
            return Err(LdstError::NotSpanningTree(format!(
                "{} nodes, graph has {}",
                subgraph.node_count(),
                graph.node_count()
            )));
        }
        if let Some((a, b)) = subgraph
            .edges()
            .into_iter()
            .find(|&(a, b)| !graph.has_edge(a, b))
        {
            return Err(LdstError::KeyNotFound { a, b });
        }
        if !subgraph.is_tree() {
            return Err(LdstError::NotSpanningTree(format!(
                "{} edges over {} nodes, connected: {}",
                subgraph.edge_count(),
                subgraph.node_count(),
                subgraph.is_connected()
            )));
        }
        Ok(Self { inner: subgraph })
    }

    /// Wraps a subgraph the caller has already verified with `is_tree`.
    pub(crate) fn from_verified(subgraph: Subgraph) -> Self {
        debug_assert!(subgraph.is_tree());
        Self { inner: subgraph }
    }

    pub fn as_subgraph(&self) -> &Subgraph {
        &self.inner
    }

    pub fn into_subgraph(self) -> Subgraph {
        self.inner
    }

    pub fn node_count(&self) -> usize {
        self.inner.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.inner.edge_count()
    }

    pub fn has_edge(&self, a: usize, b: usize) -> bool {
        self.inner.has_edge(a, b)
    }

    /// Sorted canonical edge list; feed it back to [`from_edges`](Self::from_edges).
    pub fn edge_list(&self) -> Vec<(usize, usize)> {
        self.inner.edges()
    }

    /// Tree diameter in hops, by two BFS sweeps (exact on trees).
    pub fn diameter(&self) -> usize {
        let first = self.inner.bfs(0);
        let far = farthest(&first);
        let second = self.inner.bfs(far);
        second[farthest(&second)]
    }

    /// Eccentricity of every node. A tree is connected, so this cannot fail.
    pub fn eccentricity(&self) -> Vec<usize> {
        (0..self.node_count())
            .map(|v| self.inner.bfs(v).into_iter().max().unwrap_or(0))
            .collect()
    }
}

fn farthest(dist: &[usize]) -> usize {
    dist.iter()
        .enumerate()
        .max_by_key(|&(_, d)| *d)
        .map_or(0, |(v, _)| v)
}
