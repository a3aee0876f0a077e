//! Weighted undirected input graph.

use super::subgraph::Subgraph;
use super::tree::SpanningTree;
use crate::error::{LdstError, LdstResult};

/// An undirected weighted edge, stored with `a < b`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub a: usize,
    pub b: usize,
    pub weight: f64,
}

/// Weighted undirected graph over nodes `0..n`.
///
/// Weights live in a dense `n × n` matrix so `weight(i, j)` is O(1) and
/// symmetric by construction. The edge list keeps insertion order, which
/// makes seeded runs reproducible.
///
/// # Examples
///
/// ```
/// use u_ldst::graph::Graph;
///
/// let mut g = Graph::new(3);
/// g.add_edge(0, 1, 2.0).unwrap();
/// g.add_edge(2, 1, 1.5).unwrap();
/// assert_eq!(g.weight(1, 2).unwrap(), 1.5);
/// assert!(g.weight(0, 2).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct Graph {
    n: usize,
    weights: Vec<Option<f64>>,
    edges: Vec<Edge>,
    adjacency: Vec<Vec<usize>>,
}

impl Graph {
    /// Creates a graph with `n` nodes and no edges.
    ///
    /// # Panics
    ///
    /// Panics if `n * n` overflows `usize`; [`Graph::try_new`] reports
    /// that as an error instead.
    pub fn new(n: usize) -> Self {
        match Self::try_new(n) {
            Ok(graph) => graph,
            Err(e) => panic!("{e}"),
        }
    }

    /// Creates a graph with `n` nodes and no edges, checking that the
    /// weight matrix size fits in `usize`.
    pub fn try_new(n: usize) -> LdstResult<Self> {
        let cells = n
            .checked_mul(n)
            .ok_or_else(|| LdstError::InvalidGraph(format!("{n} nodes is too many")))?;
        Ok(Self {
            n,
            weights: vec![None; cells],
            edges: Vec::new(),
            adjacency: vec![Vec::new(); n],
        })
    }

    /// Builds a graph from a square cost matrix; `None` means "no edge".
    ///
    /// The diagonal is ignored. The matrix must be symmetric.
    pub fn from_matrix(matrix: &[Vec<Option<f64>>]) -> LdstResult<Self> {
        let n = matrix.len();
        if let Some(row) = matrix.iter().position(|r| r.len() != n) {
            return Err(LdstError::InvalidGraph(format!(
                "row {row} has {} entries, expected {n}",
                matrix[row].len()
            )));
        }

        let mut graph = Self::try_new(n)?;
        for i in 0..n {
            for j in (i + 1)..n {
                match (matrix[i][j], matrix[j][i]) {
                    (Some(w), Some(w2)) if w == w2 => graph.add_edge(i, j, w)?,
                    (None, None) => {}
                    _ => {
                        return Err(LdstError::InvalidGraph(format!(
                            "cost matrix is not symmetric at ({i}, {j})"
                        )))
                    }
                }
            }
        }
        Ok(graph)
    }

    /// Complete graph on `n` nodes with weights from `weight(a, b)`, `a < b`.
    pub fn complete<F>(n: usize, weight: F) -> LdstResult<Self>
    where
        F: Fn(usize, usize) -> f64,
    {
        let mut graph = Self::try_new(n)?;
        for a in 0..n {
            for b in (a + 1)..n {
                graph.add_edge(a, b, weight(a, b))?;
            }
        }
        Ok(graph)
    }

    /// Adds the undirected edge `{a, b}`.
    ///
    /// Rejects self-loops, out-of-range nodes, duplicates and weights that
    /// are negative or not finite.
    pub fn add_edge(&mut self, a: usize, b: usize, weight: f64) -> LdstResult<()> {
        if a >= self.n || b >= self.n {
            return Err(LdstError::InvalidGraph(format!(
                "edge ({a}, {b}) out of range for {} nodes",
                self.n
            )));
        }
        if a == b {
            return Err(LdstError::InvalidGraph(format!("self-loop on node {a}")));
        }
        if !weight.is_finite() || weight < 0.0 {
            return Err(LdstError::InvalidGraph(format!(
                "edge ({a}, {b}) has invalid weight {weight}"
            )));
        }
        if self.has_edge(a, b) {
            return Err(LdstError::InvalidGraph(format!(
                "duplicate edge ({a}, {b})"
            )));
        }

        let (a, b) = (a.min(b), a.max(b));
        self.weights[a * self.n + b] = Some(weight);
        self.weights[b * self.n + a] = Some(weight);
        self.adjacency[a].push(b);
        self.adjacency[b].push(a);
        self.edges.push(Edge { a, b, weight });
        Ok(())
    }

    pub fn node_count(&self) -> usize {
        self.n
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Canonical `(a, b)` pairs with `a < b`, in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.edges.iter().map(|e| (e.a, e.b))
    }

    pub fn weighted_edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Weight of edge `{a, b}`; `KeyNotFound` if it is not an edge.
    pub fn weight(&self, a: usize, b: usize) -> LdstResult<f64> {
        if a >= self.n || b >= self.n {
            return Err(LdstError::KeyNotFound { a, b });
        }
        self.weights[a * self.n + b].ok_or(LdstError::KeyNotFound { a, b })
    }

    pub fn has_edge(&self, a: usize, b: usize) -> bool {
        a < self.n && b < self.n && self.weights[a * self.n + b].is_some()
    }

    /// Neighbors of `node`; empty for out-of-range nodes.
    pub fn neighbors(&self, node: usize) -> &[usize] {
        self.adjacency.get(node).map(Vec::as_slice).unwrap_or(&[])
    }

    /// True if every node is reachable from node 0 (vacuously for `n <= 1`).
    pub fn is_connected(&self) -> bool {
        self.as_subgraph().is_connected()
    }

    /// Total edge weight of `tree`.
    pub fn tree_weight(&self, tree: &SpanningTree) -> LdstResult<f64> {
        self.subgraph_weight(tree.as_subgraph())
    }

    /// Total edge weight of any edge set over this graph's nodes.
    pub fn subgraph_weight(&self, subgraph: &Subgraph) -> LdstResult<f64> {
        subgraph
            .edges()
            .into_iter()
            .map(|(a, b)| self.weight(a, b))
            .sum()
    }

    /// The whole graph as an edge set.
    pub fn as_subgraph(&self) -> Subgraph {
        let mut sub = Subgraph::new(self.n);
        for e in &self.edges {
            sub.add_edge(e.a, e.b);
        }
        sub
    }
}
