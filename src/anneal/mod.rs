//! Simulated annealing over spanning trees.
//!
//! A single-trajectory search that scores each candidate tree on two
//! objectives. Weight decides whether a diameter penalty applies;
//! diameter (in hops) decides acceptance, with a Boltzmann draw for
//! candidates that are not better.
//!
//! # References
//!
//! - Kirkpatrick, Gelatt & Vecchi (1983), "Optimization by Simulated Annealing"
//! - Lundy & Mees (1986), "Convergence of an Annealing Algorithm"

mod config;
mod runner;
mod types;

pub use config::{AnnealConfig, CoolingSchedule};
pub use runner::{acceptance_probability, AnnealResult, AnnealRunner, Annealer};
pub use types::{Bookkeeping, BudgetPolicy, Decision, Step};
