//! Mutable edge set with structural queries.

use std::collections::{BTreeSet, VecDeque};

use crate::error::{LdstError, LdstResult};

const UNREACHED: usize = usize::MAX;

/// An undirected edge set over nodes `0..n`.
///
/// Adjacency is kept in ordered sets so that [`edges`](Self::edges) and
/// every traversal visit nodes in a fixed order. This is what makes a
/// seeded annealing run reproducible.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subgraph {
    adjacency: Vec<BTreeSet<usize>>,
    edge_count: usize,
}

impl Subgraph {
    /// Creates an edge-less subgraph over `n` nodes.
    pub fn new(n: usize) -> Self {
        Self {
            adjacency: vec![BTreeSet::new(); n],
            edge_count: 0,
        }
    }

    /// Builds a subgraph from an edge list. Duplicate edges are collapsed.
    pub fn from_edges(n: usize, edges: &[(usize, usize)]) -> LdstResult<Self> {
        let mut sub = Self::new(n);
        for &(a, b) in edges {
            if a >= n || b >= n || a == b {
                return Err(LdstError::InvalidGraph(format!(
                    "edge ({a}, {b}) is not valid over {n} nodes"
                )));
            }
            sub.add_edge(a, b);
        }
        Ok(sub)
    }

    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub fn has_edge(&self, a: usize, b: usize) -> bool {
        self.adjacency.get(a).is_some_and(|s| s.contains(&b))
    }

    /// Inserts `{a, b}`. Returns `false` if it was already present or is a
    /// self-loop.
    ///
    /// # Panics
    /// Panics if `a` or `b` is out of range.
    pub fn add_edge(&mut self, a: usize, b: usize) -> bool {
        if a == b || !self.adjacency[a].insert(b) {
            return false;
        }
        self.adjacency[b].insert(a);
        self.edge_count += 1;
        true
    }

    /// Removes `{a, b}`. Returns `false` if it was not present.
    pub fn remove_edge(&mut self, a: usize, b: usize) -> bool {
        let removed = self.adjacency.get_mut(a).is_some_and(|s| s.remove(&b));
        if removed {
            self.adjacency[b].remove(&a);
            self.edge_count -= 1;
        }
        removed
    }

    pub fn neighbors(&self, node: usize) -> impl Iterator<Item = usize> + '_ {
        self.adjacency.get(node).into_iter().flatten().copied()
    }

    /// Canonical `(a, b)` pairs with `a < b`, sorted.
    pub fn edges(&self) -> Vec<(usize, usize)> {
        let mut out = Vec::with_capacity(self.edge_count);
        for (a, nbrs) in self.adjacency.iter().enumerate() {
            out.extend(nbrs.range((a + 1)..).map(|&b| (a, b)));
        }
        out
    }

    /// True if all nodes are mutually reachable (vacuously for `n <= 1`).
    pub fn is_connected(&self) -> bool {
        self.node_count() <= 1 || self.bfs(0).iter().all(|&d| d != UNREACHED)
    }

    /// Connected, acyclic and with `n - 1` edges. The empty node set is
    /// not a tree.
    pub fn is_tree(&self) -> bool {
        let n = self.node_count();
        n > 0 && self.edge_count == n - 1 && self.is_connected()
    }

    /// Returns the edges of a cycle in traversal order.
    ///
    /// Consecutive edges share an endpoint and the last edge closes back to
    /// the first node. On a tree plus one edge this is the unique cycle.
    /// Fails with [`LdstError::NoCycle`] if the subgraph is acyclic.
    pub fn find_cycle(&self) -> LdstResult<Vec<(usize, usize)>> {
        const NONE: usize = usize::MAX;
        let n = self.node_count();
        let nbrs: Vec<Vec<usize>> = self
            .adjacency
            .iter()
            .map(|s| s.iter().copied().collect())
            .collect();
        let mut parent = vec![NONE; n];
        // 0 = unvisited, 1 = on the DFS stack, 2 = finished
        let mut state = vec![0u8; n];
        let mut stack: Vec<(usize, usize)> = Vec::new();

        for root in 0..n {
            if state[root] != 0 {
                continue;
            }
            state[root] = 1;
            stack.push((root, 0));

            while let Some(top) = stack.last_mut() {
                let u = top.0;
                if top.1 == nbrs[u].len() {
                    state[u] = 2;
                    stack.pop();
                    continue;
                }
                let w = nbrs[u][top.1];
                top.1 += 1;

                if w == parent[u] {
                    continue;
                }
                match state[w] {
                    0 => {
                        parent[w] = u;
                        state[w] = 1;
                        stack.push((w, 0));
                    }
                    1 => {
                        // Back edge u -> w: w is an ancestor of u.
                        let mut path = vec![u];
                        let mut x = u;
                        while x != w {
                            x = parent[x];
                            path.push(x);
                        }
                        path.reverse();
                        let mut cycle: Vec<(usize, usize)> =
                            path.windows(2).map(|p| (p[0], p[1])).collect();
                        cycle.push((u, w));
                        return Ok(cycle);
                    }
                    _ => {}
                }
            }
        }
        Err(LdstError::NoCycle)
    }

    /// Eccentricity of every node (index = node), in hops.
    ///
    /// Fails with [`LdstError::Disconnected`] if some pair is unreachable.
    pub fn eccentricity(&self) -> LdstResult<Vec<usize>> {
        (0..self.node_count())
            .map(|source| {
                self.bfs(source)
                    .into_iter()
                    .try_fold(0, |acc, d| {
                        (d != UNREACHED).then(|| acc.max(d))
                    })
                    .ok_or(LdstError::Disconnected)
            })
            .collect()
    }

    /// Maximum eccentricity; `0` for `n <= 1`.
    pub fn diameter(&self) -> LdstResult<usize> {
        Ok(self.eccentricity()?.into_iter().max().unwrap_or(0))
    }

    pub(crate) fn bfs(&self, source: usize) -> Vec<usize> {
        let mut dist = vec![UNREACHED; self.node_count()];
        if source >= dist.len() {
            return dist;
        }
        let mut queue = VecDeque::new();
        dist[source] = 0;
        queue.push_back(source);
        while let Some(u) = queue.pop_front() {
            for w in self.neighbors(u) {
                if dist[w] == UNREACHED {
                    dist[w] = dist[u] + 1;
                    queue.push_back(w);
                }
            }
        }
        dist
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(n: usize) -> Subgraph {
        let edges: Vec<_> = (1..n).map(|i| (i - 1, i)).collect();
        Subgraph::from_edges(n, &edges).unwrap()
    }

    #[test]
    fn test_add_remove_edges() {
        let mut s = Subgraph::new(3);
        assert!(s.add_edge(0, 1));
        assert!(!s.add_edge(1, 0));
        assert!(!s.add_edge(2, 2));
        assert_eq!(s.edge_count(), 1);
        assert!(s.has_edge(1, 0));
        assert!(s.remove_edge(1, 0));
        assert!(!s.remove_edge(0, 1));
        assert_eq!(s.edge_count(), 0);
    }

    #[test]
    fn test_edges_sorted_canonical() {
        let s = Subgraph::from_edges(4, &[(3, 0), (2, 1), (1, 0)]).unwrap();
        assert_eq!(s.edges(), vec![(0, 1), (0, 3), (1, 2)]);
    }

    #[test]
    fn test_is_tree() {
        assert!(path(5).is_tree());
        assert!(Subgraph::new(1).is_tree());
        assert!(!Subgraph::new(0).is_tree());

        // n - 1 edges but disconnected (triangle + isolated node)
        let s = Subgraph::from_edges(4, &[(0, 1), (1, 2), (2, 0)]).unwrap();
        assert!(!s.is_tree());
    }

    #[test]
    fn test_find_cycle_tree_plus_edge() {
        let mut s = path(5);
        s.add_edge(0, 3);
        let cycle = s.find_cycle().unwrap();
        assert_eq!(cycle.len(), 4);

        // consecutive edges share an endpoint and the walk closes
        for w in cycle.windows(2) {
            assert_eq!(w[0].1, w[1].0);
        }
        assert_eq!(cycle.last().unwrap().1, cycle[0].0);
        for &(a, b) in &cycle {
            assert!(s.has_edge(a, b));
        }
        assert!(!cycle.iter().any(|&(a, b)| (a, b) == (3, 4) || (a, b) == (4, 3)));
    }

    #[test]
    fn test_find_cycle_acyclic() {
        assert!(matches!(path(4).find_cycle(), Err(LdstError::NoCycle)));
        assert!(matches!(Subgraph::new(3).find_cycle(), Err(LdstError::NoCycle)));
    }

    #[test]
    fn test_find_cycle_in_second_component() {
        let s = Subgraph::from_edges(5, &[(0, 1), (2, 3), (3, 4), (4, 2)]).unwrap();
        let cycle = s.find_cycle().unwrap();
        assert_eq!(cycle.len(), 3);
    }

    #[test]
    fn test_eccentricity_and_diameter() {
        let s = path(4);
        assert_eq!(s.eccentricity().unwrap(), vec![3, 2, 2, 3]);
        assert_eq!(s.diameter().unwrap(), 3);
        assert_eq!(Subgraph::new(1).diameter().unwrap(), 0);
    }

    #[test]
    fn test_diameter_disconnected() {
        let s = Subgraph::from_edges(3, &[(0, 1)]).unwrap();
        assert!(matches!(s.diameter(), Err(LdstError::Disconnected)));
        assert!(matches!(s.eccentricity(), Err(LdstError::Disconnected)));
    }
}
