//! Graph model.
//!
//! - [`Graph`]: the weighted input graph, immutable during a run, with
//!   O(1) weight lookup through a dense weight matrix.
//! - [`Subgraph`]: a mutable edge set over the same nodes. Carries the
//!   structural queries (cycle search, tree recognition, eccentricity,
//!   diameter) used on transient "tree plus one edge" states.
//! - [`SpanningTree`]: a `Subgraph` known to be a spanning tree of its
//!   graph. Value type; kernels clone it before mutating.
//!
//! Distances are always counted in edges (hops), never in weight.

mod subgraph;
mod tree;
mod union_find;
mod weighted;

pub use subgraph::Subgraph;
pub use tree::SpanningTree;
pub(crate) use union_find::UnionFind;
pub use weighted::{Edge, Graph};
