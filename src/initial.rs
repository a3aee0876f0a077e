//! Starting trees for the annealer.

use std::collections::VecDeque;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::{LdstError, LdstResult};
use crate::graph::{Graph, SpanningTree, Subgraph, UnionFind};

/// How the initial spanning tree is built.
///
/// Quality does not matter for a cold start; the choice only changes where
/// the chain begins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InitialTree {
    /// Edges in random order, inserted greedily while acyclic.
    #[default]
    RandomGreedy,
    /// BFS from a random root, neighbors visited in random order.
    RandomBfs,
    /// BFS from `root`, neighbors in insertion order.
    Bfs { root: usize },
    /// Kruskal minimum spanning tree.
    MinimumWeight,
}

impl InitialTree {
    /// Builds a spanning tree of `graph`.
    ///
    /// Fails with `Disconnected` if the graph has no spanning tree and with
    /// `InvalidGraph` for an empty graph or an out-of-range BFS root.
    pub fn build<R: Rng>(&self, graph: &Graph, rng: &mut R) -> LdstResult<SpanningTree> {
        let n = graph.node_count();
        if n == 0 {
            return Err(LdstError::InvalidGraph("graph has no nodes".into()));
        }

        let tree = match *self {
            InitialTree::RandomGreedy => {
                let mut edges: Vec<(usize, usize)> = graph.edges().collect();
                edges.shuffle(rng);
                kruskal(n, edges)
            }
            InitialTree::MinimumWeight => {
                let mut edges = graph.weighted_edges().to_vec();
                edges.sort_by(|x, y| x.weight.total_cmp(&y.weight));
                kruskal(n, edges.into_iter().map(|e| (e.a, e.b)))
            }
            InitialTree::RandomBfs => {
                let root = rng.random_range(0..n);
                bfs_tree(graph, root, Some(rng))
            }
            InitialTree::Bfs { root } => {
                if root >= n {
                    return Err(LdstError::InvalidGraph(format!(
                        "BFS root {root} out of range for {n} nodes"
                    )));
                }
                bfs_tree::<R>(graph, root, None)
            }
        };

        if !tree.is_tree() {
            return Err(LdstError::Disconnected);
        }
        Ok(SpanningTree::from_verified(tree))
    }
}

fn kruskal<I>(n: usize, edges: I) -> Subgraph
where
    I: IntoIterator<Item = (usize, usize)>,
{
    let mut uf = UnionFind::new(n);
    let mut tree = Subgraph::new(n);
    for (a, b) in edges {
        if tree.edge_count() + 1 == n {
            break;
        }
        if uf.union(a, b) {
            tree.add_edge(a, b);
        }
    }
    tree
}

fn bfs_tree<R: Rng>(graph: &Graph, root: usize, mut rng: Option<&mut R>) -> Subgraph {
    let n = graph.node_count();
    let mut tree = Subgraph::new(n);
    let mut seen = vec![false; n];
    let mut queue = VecDeque::new();
    seen[root] = true;
    queue.push_back(root);

    while let Some(u) = queue.pop_front() {
        let mut nbrs = graph.neighbors(u).to_vec();
        if let Some(rng) = rng.as_deref_mut() {
            nbrs.shuffle(rng);
        }
        for w in nbrs {
            if !seen[w] {
                seen[w] = true;
                tree.add_edge(u, w);
                queue.push_back(w);
            }
        }
    }
    tree
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const ALL: [InitialTree; 4] = [
        InitialTree::RandomGreedy,
        InitialTree::RandomBfs,
        InitialTree::Bfs { root: 2 },
        InitialTree::MinimumWeight,
    ];

    #[test]
    fn test_every_builder_spans() {
        let g = Graph::complete(8, |a, b| ((a * 7 + b * 3) % 5) as f64).unwrap();
        let mut rng = StdRng::seed_from_u64(42);
        for builder in ALL {
            let tree = builder.build(&g, &mut rng).unwrap();
            assert!(tree.as_subgraph().is_tree(), "{builder:?}");
            assert_eq!(tree.node_count(), 8);
            for (a, b) in tree.edge_list() {
                assert!(g.has_edge(a, b));
            }
        }
    }

    #[test]
    fn test_minimum_weight_is_minimal() {
        let mut g = Graph::new(4);
        g.add_edge(0, 1, 1.0).unwrap();
        g.add_edge(1, 2, 1.0).unwrap();
        g.add_edge(2, 3, 1.0).unwrap();
        g.add_edge(0, 3, 5.0).unwrap();
        g.add_edge(0, 2, 4.0).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        let tree = InitialTree::MinimumWeight.build(&g, &mut rng).unwrap();
        assert_eq!(g.tree_weight(&tree).unwrap(), 3.0);
    }

    #[test]
    fn test_bfs_from_root_is_star_on_complete_graph() {
        let g = Graph::complete(5, |_, _| 1.0).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        let tree = InitialTree::Bfs { root: 0 }.build(&g, &mut rng).unwrap();
        assert_eq!(tree.edge_list(), vec![(0, 1), (0, 2), (0, 3), (0, 4)]);
        assert_eq!(tree.diameter(), 2);
    }

    #[test]
    fn test_disconnected_graph_fails() {
        let mut g = Graph::new(4);
        g.add_edge(0, 1, 1.0).unwrap();
        g.add_edge(2, 3, 1.0).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        for builder in ALL {
            assert!(
                matches!(builder.build(&g, &mut rng), Err(LdstError::Disconnected)),
                "{builder:?}"
            );
        }
    }

    #[test]
    fn test_bad_inputs() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(matches!(
            InitialTree::RandomGreedy.build(&Graph::new(0), &mut rng),
            Err(LdstError::InvalidGraph(_))
        ));
        let g = Graph::complete(3, |_, _| 1.0).unwrap();
        assert!(matches!(
            InitialTree::Bfs { root: 3 }.build(&g, &mut rng),
            Err(LdstError::InvalidGraph(_))
        ));
    }

    #[test]
    fn test_seeded_build_is_reproducible() {
        let g = Graph::complete(10, |a, b| (a * b) as f64).unwrap();
        let a = InitialTree::RandomGreedy
            .build(&g, &mut StdRng::seed_from_u64(7))
            .unwrap();
        let b = InitialTree::RandomGreedy
            .build(&g, &mut StdRng::seed_from_u64(7))
            .unwrap();
        assert_eq!(a, b);
    }
}
