//! Annealing loop and the dual-objective acceptance rule.
//!
//! # Algorithm
//!
//! 1. Build (or receive) an initial spanning tree; its weight and diameter
//!    are the iteration-0 baseline and the first history entry.
//! 2. While `T >= stopping_temperature` and `iteration < stopping_iteration`:
//!    a. Propose a neighbor with the configured [`Transition`]
//!    b. Track the minimum weight seen, accepted or not
//!    c. Judge the candidate on diameter; candidates that do not lower
//!       the weight carry a diameter penalty
//!    d. Record the current diameter, cool, advance the counter
//!
//! [`Transition`]: crate::neighbor::Transition

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, trace};

use super::config::AnnealConfig;
use super::types::{Bookkeeping, Decision, Step};
use crate::error::{LdstError, LdstResult};
use crate::graph::{Graph, SpanningTree};
use crate::report::Summary;

/// Result of an annealing run.
#[derive(Debug, Clone)]
pub struct AnnealResult {
    /// Tree with the smallest diameter found.
    pub best: SpanningTree,
    pub min_diameter: usize,
    /// Weight of `best`.
    pub best_weight: f64,
    /// Smallest weight of any evaluated candidate (not necessarily `best`).
    pub min_weight: f64,

    pub initial_weight: f64,
    pub initial_diameter: usize,

    /// Current tree when the loop stopped.
    pub current: SpanningTree,
    pub current_weight: f64,
    pub current_diameter: usize,

    /// Completed iterations.
    pub iterations: usize,
    pub final_temperature: f64,
    /// Adopted candidates (including improvements).
    pub accepted_moves: usize,
    /// Candidates adopted because their (penalized) diameter was lower.
    pub improving_moves: usize,

    /// Current diameter before the first iteration and after each one.
    pub diameter_history: Vec<usize>,
    /// Tracked current weight, aligned with `diameter_history`.
    pub weight_history: Vec<f64>,

    /// Budget the run was configured with, if any.
    pub budget: Option<f64>,
    /// Seed the RNG was created from.
    pub seed: u64,
}

impl AnnealResult {
    pub fn summary(&self) -> Summary {
        Summary::from_result(self)
    }
}

/// Simulated annealing over spanning trees of one graph.
///
/// Owns the current and best trees, the histories and the RNG; nothing
/// else reads or writes them during a run.
///
/// # Examples
///
/// ```
/// use u_ldst::anneal::{AnnealConfig, Annealer};
/// use u_ldst::graph::Graph;
///
/// let graph = Graph::complete(8, |a, b| ((a * b) % 7 + 1) as f64).unwrap();
/// let config = AnnealConfig::default()
///     .with_stopping_iteration(500)
///     .with_seed(42);
/// let result = Annealer::new(&graph, config).unwrap().run().unwrap();
/// assert!(result.best.as_subgraph().is_tree());
/// assert_eq!(result.diameter_history.len(), result.iterations + 1);
/// ```
#[derive(Debug)]
pub struct Annealer<'g> {
    graph: &'g Graph,
    config: AnnealConfig,
    rng: StdRng,
    seed: u64,

    temperature: f64,
    iteration: usize,

    curr_solution: SpanningTree,
    curr_weight: f64,
    curr_diameter: usize,

    best_solution: SpanningTree,
    best_weight: f64,
    min_diameter: usize,
    min_weight: f64,

    initial_weight: f64,
    initial_diameter: usize,

    diameter_history: Vec<usize>,
    weight_history: Vec<f64>,
    accepted_moves: usize,
    improving_moves: usize,
}

impl<'g> Annealer<'g> {
    /// Creates an annealer starting from `config.initial`.
    pub fn new(graph: &'g Graph, config: AnnealConfig) -> LdstResult<Self> {
        config.validate()?;
        let seed = config.seed.unwrap_or_else(rand::random);
        let mut rng = StdRng::seed_from_u64(seed);
        let tree = config.initial.build(graph, &mut rng)?;
        Self::start(graph, config, rng, seed, tree)
    }

    /// Creates an annealer starting from a given tree of `graph`.
    pub fn with_tree(graph: &'g Graph, tree: SpanningTree, config: AnnealConfig) -> LdstResult<Self> {
        config.validate()?;
        let tree = SpanningTree::from_subgraph(graph, tree.into_subgraph())?;
        let seed = config.seed.unwrap_or_else(rand::random);
        let rng = StdRng::seed_from_u64(seed);
        Self::start(graph, config, rng, seed, tree)
    }

    fn start(
        graph: &'g Graph,
        config: AnnealConfig,
        rng: StdRng,
        seed: u64,
        tree: SpanningTree,
    ) -> LdstResult<Self> {
        let weight = graph.tree_weight(&tree)?;
        let diameter = tree.diameter();
        info!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            seed,
            initial_weight = weight,
            initial_diameter = diameter,
            "annealer initialized"
        );

        let mut diameter_history = Vec::with_capacity(config.stopping_iteration.min(1 << 20));
        diameter_history.push(diameter);
        let weight_history = vec![weight];

        Ok(Self {
            graph,
            temperature: config.initial_temperature,
            config,
            rng,
            seed,
            iteration: 1,
            best_solution: tree.clone(),
            curr_solution: tree,
            curr_weight: weight,
            curr_diameter: diameter,
            best_weight: weight,
            min_diameter: diameter,
            min_weight: weight,
            initial_weight: weight,
            initial_diameter: diameter,
            diameter_history,
            weight_history,
            accepted_moves: 0,
            improving_moves: 0,
        })
    }

    /// Loop guard, checked before every iteration.
    pub fn is_running(&self) -> bool {
        self.temperature >= self.config.stopping_temperature
            && self.iteration < self.config.stopping_iteration
    }

    /// Runs until the loop guard fails.
    ///
    /// Any error from the proposal kernel or the graph model aborts the run.
    pub fn run(mut self) -> LdstResult<AnnealResult> {
        while self.is_running() {
            self.step()?;
        }
        let result = self.finish();
        let summary = result.summary();
        info!(
            iterations = result.iterations,
            accepted = result.accepted_moves,
            final_temperature = result.final_temperature,
            min_weight = result.min_weight,
            weight_improvement_pct = summary.weight_improvement_pct(),
            min_diameter = result.min_diameter,
            diameter_improvement_pct = summary.diameter_improvement_pct(),
            "annealing finished"
        );
        Ok(result)
    }

    /// Executes one iteration: propose, judge, record, cool.
    pub fn step(&mut self) -> LdstResult<Step> {
        let candidate = self
            .config
            .transition
            .propose(self.graph, &self.curr_solution, &mut self.rng)?;
        let candidate_weight = self.graph.tree_weight(&candidate)?;
        let candidate_diameter = candidate.diameter();
        let previous_best = self.min_diameter;
        let temperature = self.temperature;

        let decision = self.judge(candidate, candidate_weight, candidate_diameter);
        let new_best = self.min_diameter < previous_best;
        if new_best {
            debug!(
                iteration = self.iteration,
                diameter = self.min_diameter,
                weight = self.best_weight,
                "new best tree"
            );
        }
        trace!(
            iteration = self.iteration,
            temperature,
            candidate_weight,
            candidate_diameter,
            ?decision,
            "step"
        );

        let step = Step {
            iteration: self.iteration,
            temperature,
            candidate_weight,
            candidate_diameter,
            decision,
            new_best,
        };

        self.diameter_history.push(self.curr_diameter);
        self.weight_history.push(self.curr_weight);
        self.temperature = self
            .config
            .cooling
            .next(self.temperature, self.iteration - 1, &self.config);
        self.iteration += 1;

        Ok(step)
    }

    /// Judges an externally built candidate against the current state
    /// without recording history or cooling.
    ///
    /// The candidate must be a tree over this annealer's graph.
    pub fn consider(&mut self, candidate: SpanningTree) -> LdstResult<Decision> {
        if candidate.node_count() != self.graph.node_count() {
            return Err(LdstError::NotSpanningTree(format!(
                "candidate has {} nodes, graph has {}",
                candidate.node_count(),
                self.graph.node_count()
            )));
        }
        let weight = self.graph.tree_weight(&candidate)?;
        let diameter = candidate.diameter();
        Ok(self.judge(candidate, weight, diameter))
    }

    fn judge(&mut self, candidate: SpanningTree, weight: f64, diameter: usize) -> Decision {
        if weight < self.min_weight {
            self.min_weight = weight;
        }
        if self.config.budget.rejects(weight) {
            return Decision::OverBudget;
        }

        let decision = match self.config.bookkeeping {
            Bookkeeping::Consistent | Bookkeeping::Legacy => self.judge_historical(candidate, weight, diameter),
            Bookkeeping::Tracked => self.judge_tracked(candidate, weight, diameter),
        };
        if decision.adopted() {
            self.accepted_moves += 1;
        }
        if decision == Decision::Improved {
            self.improving_moves += 1;
        }
        decision
    }

    /// `Consistent` differs from `Legacy` only in gating the
    /// weight-improving branch's best update on adoption.
    fn judge_historical(&mut self, candidate: SpanningTree, weight: f64, diameter: usize) -> Decision {
        if self.curr_weight <= weight {
            let penalized = diameter + self.config.penalty;
            if penalized < self.curr_diameter {
                if diameter < self.min_diameter {
                    self.record_best(&candidate, weight, diameter);
                }
                self.curr_solution = candidate;
                self.curr_diameter = diameter;
                Decision::Improved
            } else if self.metropolis(penalized) {
                self.curr_solution = candidate;
                self.curr_diameter = diameter;
                self.curr_weight = weight;
                Decision::Accepted
            } else {
                Decision::Rejected
            }
        } else {
            let gated = self.config.bookkeeping != Bookkeeping::Legacy;
            let record = diameter < self.min_diameter;
            if record && !gated {
                self.record_best(&candidate, weight, diameter);
            }
            let decision = if diameter < self.curr_diameter {
                Decision::Improved
            } else if (gated || !record) && self.metropolis(diameter) {
                Decision::Accepted
            } else {
                Decision::Rejected
            };
            if decision.adopted() {
                if record && gated {
                    self.record_best(&candidate, weight, diameter);
                }
                self.curr_solution = candidate;
                self.curr_diameter = diameter;
            }
            decision
        }
    }

    fn judge_tracked(&mut self, candidate: SpanningTree, weight: f64, diameter: usize) -> Decision {
        let penalty = if self.curr_weight <= weight {
            self.config.penalty
        } else {
            0
        };
        let penalized = diameter + penalty;

        let decision = if penalized < self.curr_diameter {
            Decision::Improved
        } else if self.metropolis(penalized) {
            Decision::Accepted
        } else {
            Decision::Rejected
        };

        if decision.adopted() {
            if diameter < self.min_diameter {
                self.record_best(&candidate, weight, diameter);
            }
            self.curr_solution = candidate;
            self.curr_diameter = diameter;
            self.curr_weight = weight;
        }
        decision
    }

    fn record_best(&mut self, candidate: &SpanningTree, weight: f64, diameter: usize) {
        self.best_solution = candidate.clone();
        self.best_weight = weight;
        self.min_diameter = diameter;
    }

    /// Boltzmann draw on the diameter gap: `exp(-|d - curr_diameter| / T)`.
    fn metropolis(&mut self, diameter: usize) -> bool {
        let probability = acceptance_probability(diameter.abs_diff(self.curr_diameter), self.temperature);
        probability > 0.0 && self.rng.random_range(0.0..1.0) < probability
    }

    fn finish(self) -> AnnealResult {
        AnnealResult {
            best: self.best_solution,
            min_diameter: self.min_diameter,
            best_weight: self.best_weight,
            min_weight: self.min_weight,
            initial_weight: self.initial_weight,
            initial_diameter: self.initial_diameter,
            current: self.curr_solution,
            current_weight: self.curr_weight,
            current_diameter: self.curr_diameter,
            iterations: self.iteration - 1,
            final_temperature: self.temperature,
            accepted_moves: self.accepted_moves,
            improving_moves: self.improving_moves,
            diameter_history: self.diameter_history,
            weight_history: self.weight_history,
            budget: self.config.budget.limit(),
            seed: self.seed,
        }
    }

    pub fn graph(&self) -> &'g Graph {
        self.graph
    }

    pub fn config(&self) -> &AnnealConfig {
        &self.config
    }

    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    /// Iteration counter; starts at 1 and grows by one per step.
    pub fn iteration(&self) -> usize {
        self.iteration
    }

    pub fn completed_iterations(&self) -> usize {
        self.iteration - 1
    }

    pub fn current(&self) -> &SpanningTree {
        &self.curr_solution
    }

    pub fn current_weight(&self) -> f64 {
        self.curr_weight
    }

    pub fn current_diameter(&self) -> usize {
        self.curr_diameter
    }

    pub fn best(&self) -> &SpanningTree {
        &self.best_solution
    }

    pub fn min_diameter(&self) -> usize {
        self.min_diameter
    }

    pub fn min_weight(&self) -> f64 {
        self.min_weight
    }

    pub fn diameter_history(&self) -> &[usize] {
        &self.diameter_history
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

/// `exp(-gap / T)`; zero when the temperature is not positive.
pub fn acceptance_probability(gap: usize, temperature: f64) -> f64 {
    if temperature <= 0.0 {
        return 0.0;
    }
    (-(gap as f64) / temperature).exp()
}

/// Framework-style entry point.
pub struct AnnealRunner;

impl AnnealRunner {
    /// Builds an [`Annealer`] from `config` and runs it to completion.
    pub fn run(graph: &Graph, config: &AnnealConfig) -> LdstResult<AnnealResult> {
        Annealer::new(graph, config.clone())?.run()
    }
}
