//! Low-diameter, low-weight spanning trees by simulated annealing.
//!
//! - **Graph model** ([`graph`]): weighted input graph, edge-set views,
//!   cycle search, tree recognition, eccentricity and diameter.
//! - **Instances** ([`instance`]): cost-matrix text files.
//! - **Initial trees** ([`initial`]): randomized and deterministic
//!   starting points.
//! - **Edge-swap kernels** ([`neighbor`]): proposal moves that keep the
//!   spanning-tree invariant.
//! - **Annealer** ([`anneal`]): the dual-objective acceptance rule and
//!   cooling loop.
//! - **Reporting** ([`report`]): summaries and exportable history.
//! - **Portfolio** (`portfolio`, feature `parallel`): independent seeded
//!   runs on a rayon pool.
//!
//! # Example
//!
//! ```
//! use u_ldst::anneal::{AnnealConfig, AnnealRunner};
//! use u_ldst::instance::Instance;
//!
//! let instance = Instance::parse("4\n0 1 1 1\n1 0 2 2\n1 2 0 2\n1 2 2 0").unwrap();
//! let graph = instance.to_graph().unwrap();
//! let config = AnnealConfig::default().with_stopping_iteration(200).with_seed(1);
//! let result = AnnealRunner::run(&graph, &config).unwrap();
//! assert!(result.min_diameter <= result.initial_diameter);
//! ```

pub mod anneal;
pub mod error;
pub mod graph;
pub mod initial;
pub mod instance;
pub mod neighbor;
#[cfg(feature = "parallel")]
pub mod portfolio;
pub mod report;

pub use error::{LdstError, LdstResult};
