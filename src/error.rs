//! Error types shared by every module.

/// Failure kinds of the graph model, the move kernels and the annealer.
///
/// None of these are transient: each one means an invariant was broken
/// (or the input cannot support the requested operation), so callers
/// propagate them instead of retrying.
#[derive(Debug, thiserror::Error)]
pub enum LdstError {
    #[error("edge ({a}, {b}) is not in the graph")]
    KeyNotFound { a: usize, b: usize },

    #[error("subgraph is acyclic")]
    NoCycle,

    #[error("subgraph is disconnected")]
    Disconnected,

    #[error("no edge-swap transition is available")]
    NoTransitionAvailable,

    #[error("not a spanning tree: {0}")]
    NotSpanningTree(String),

    #[error("invalid graph: {0}")]
    InvalidGraph(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("instance parse error: {0}")]
    Parse(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Convenience alias for `Result<T, LdstError>`.
pub type LdstResult<T> = Result<T, LdstError>;
