//! Independent annealing runs in parallel.
//!
//! Every run owns its trees, histories and RNG. Only the graph is shared,
//! and it is never mutated.

use rayon::prelude::*;
use tracing::info;

use crate::anneal::{AnnealConfig, AnnealResult, Annealer};
use crate::error::{LdstError, LdstResult};
use crate::graph::Graph;

/// Results of a portfolio, in seed order.
#[derive(Debug, Clone)]
pub struct PortfolioResult {
    pub runs: Vec<AnnealResult>,
    /// Index into `runs` of the best run.
    pub best_index: usize,
}

impl PortfolioResult {
    pub fn best(&self) -> &AnnealResult {
        &self.runs[self.best_index]
    }
}

/// Runs one annealer per seed and picks the lowest diameter, then the
/// lowest best-tree weight, then the earliest seed.
///
/// The first failing run's error is returned.
pub fn run_portfolio(graph: &Graph, config: &AnnealConfig, seeds: &[u64]) -> LdstResult<PortfolioResult> {
    if seeds.is_empty() {
        return Err(LdstError::InvalidConfig("portfolio needs at least one seed".into()));
    }
    config.validate()?;

    let runs: Vec<AnnealResult> = seeds
        .par_iter()
        .map(|&seed| Annealer::new(graph, config.clone().with_seed(seed))?.run())
        .collect::<LdstResult<_>>()?;

    let best_index = runs
        .iter()
        .enumerate()
        .min_by(|(_, x), (_, y)| {
            x.min_diameter
                .cmp(&y.min_diameter)
                .then(x.best_weight.total_cmp(&y.best_weight))
        })
        .map_or(0, |(i, _)| i);

    info!(
        runs = runs.len(),
        best_seed = runs[best_index].seed,
        min_diameter = runs[best_index].min_diameter,
        "portfolio finished"
    );
    Ok(PortfolioResult { runs, best_index })
}
