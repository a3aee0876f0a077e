//! Annealer configuration and cooling schedules.

use super::types::{Bookkeeping, BudgetPolicy};
use crate::error::{LdstError, LdstResult};
use crate::initial::InitialTree;
use crate::neighbor::Transition;

/// Cooling schedule for temperature reduction. Every variant is
/// non-increasing.
///
/// # References
///
/// - Geometric: standard textbook approach
/// - Linear: fixed-duration cooling
/// - LundyMees: Lundy & Mees (1986), with convergence proof
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CoolingSchedule {
    /// Geometric (exponential) cooling: `T_{k+1} = alpha * T_k`.
    Geometric {
        /// Cooling factor in (0, 1). Higher = slower cooling.
        alpha: f64,
    },

    /// Linear cooling from the initial to the stopping temperature over
    /// `stopping_iteration - 1` steps.
    Linear,

    /// Lundy-Mees cooling: `T_{k+1} = T_k / (1 + beta * T_k)`.
    LundyMees {
        /// Cooling parameter, positive.
        beta: f64,
    },
}

impl Default for CoolingSchedule {
    fn default() -> Self {
        CoolingSchedule::Geometric { alpha: 0.995 }
    }
}

impl CoolingSchedule {
    /// Temperature after cooling step `step` (0-based) from `temperature`.
    pub fn next(&self, temperature: f64, step: usize, config: &AnnealConfig) -> f64 {
        match *self {
            CoolingSchedule::Geometric { alpha } => temperature * alpha,
            CoolingSchedule::Linear => {
                let steps = config.stopping_iteration.saturating_sub(1).max(1);
                let t = config.initial_temperature
                    - (step + 1) as f64
                        * (config.initial_temperature - config.stopping_temperature)
                        / steps as f64;
                t.max(config.stopping_temperature).min(temperature)
            }
            CoolingSchedule::LundyMees { beta } => temperature / (1.0 + beta * temperature),
        }
    }
}

/// Configuration for the spanning-tree annealer.
///
/// # Examples
///
/// ```
/// use u_ldst::anneal::{AnnealConfig, BudgetPolicy, CoolingSchedule};
///
/// let config = AnnealConfig::default()
///     .with_initial_temperature(50.0)
///     .with_cooling(CoolingSchedule::Geometric { alpha: 0.99 })
///     .with_stopping_iteration(5_000)
///     .with_budget(BudgetPolicy::Enforce(120.0))
///     .with_seed(7);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AnnealConfig {
    /// Initial temperature. Higher values allow more exploration.
    pub initial_temperature: f64,

    /// The loop runs while `temperature >= stopping_temperature`.
    pub stopping_temperature: f64,

    /// The loop runs while the iteration counter (starting at 1) is below
    /// this value, so `1` means no iterations at all.
    pub stopping_iteration: usize,

    /// Cooling schedule.
    pub cooling: CoolingSchedule,

    /// Added to the diameter of a candidate that does not lower the weight.
    pub penalty: usize,

    /// Proposal kernel.
    pub transition: Transition,

    /// Starting tree builder.
    pub initial: InitialTree,

    /// How current weight and the best tree are maintained.
    pub bookkeeping: Bookkeeping,

    /// Weight budget handling.
    pub budget: BudgetPolicy,

    /// Random seed for reproducibility. `None` draws one from the OS.
    pub seed: Option<u64>,
}

impl Default for AnnealConfig {
    fn default() -> Self {
        Self {
            initial_temperature: 100.0,
            stopping_temperature: 1e-8,
            stopping_iteration: 100_000,
            cooling: CoolingSchedule::default(),
            penalty: 2,
            transition: Transition::default(),
            initial: InitialTree::default(),
            bookkeeping: Bookkeeping::default(),
            budget: BudgetPolicy::default(),
            seed: None,
        }
    }
}

impl AnnealConfig {
    pub fn with_initial_temperature(mut self, t: f64) -> Self {
        self.initial_temperature = t;
        self
    }

    pub fn with_stopping_temperature(mut self, t: f64) -> Self {
        self.stopping_temperature = t;
        self
    }

    pub fn with_stopping_iteration(mut self, n: usize) -> Self {
        self.stopping_iteration = n;
        self
    }

    pub fn with_cooling(mut self, cooling: CoolingSchedule) -> Self {
        self.cooling = cooling;
        self
    }

    /// Shorthand for `with_cooling(CoolingSchedule::Geometric { alpha })`.
    pub fn with_alpha(self, alpha: f64) -> Self {
        self.with_cooling(CoolingSchedule::Geometric { alpha })
    }

    pub fn with_penalty(mut self, penalty: usize) -> Self {
        self.penalty = penalty;
        self
    }

    pub fn with_transition(mut self, transition: Transition) -> Self {
        self.transition = transition;
        self
    }

    pub fn with_initial(mut self, initial: InitialTree) -> Self {
        self.initial = initial;
        self
    }

    pub fn with_bookkeeping(mut self, bookkeeping: Bookkeeping) -> Self {
        self.bookkeeping = bookkeeping;
        self
    }

    pub fn with_budget(mut self, budget: BudgetPolicy) -> Self {
        self.budget = budget;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> LdstResult<()> {
        let invalid = |msg: String| Err(LdstError::InvalidConfig(msg));

        if !self.initial_temperature.is_finite() || self.initial_temperature <= 0.0 {
            return invalid(format!(
                "initial_temperature must be positive, got {}",
                self.initial_temperature
            ));
        }
        if self.stopping_temperature.is_nan() || self.stopping_temperature < 0.0 {
            return invalid(format!(
                "stopping_temperature must be non-negative, got {}",
                self.stopping_temperature
            ));
        }
        if self.stopping_temperature > self.initial_temperature {
            return invalid("stopping_temperature must not exceed initial_temperature".into());
        }
        if self.stopping_iteration == 0 {
            return invalid("stopping_iteration must be positive".into());
        }
        match self.cooling {
            CoolingSchedule::Geometric { alpha } => {
                if alpha.is_nan() || alpha <= 0.0 || alpha >= 1.0 {
                    return invalid(format!("geometric alpha must be in (0, 1), got {alpha}"));
                }
            }
            CoolingSchedule::LundyMees { beta } => {
                if beta.is_nan() || beta <= 0.0 {
                    return invalid(format!("lundy-mees beta must be positive, got {beta}"));
                }
            }
            CoolingSchedule::Linear => {}
        }
        if let Some(b) = self.budget.limit() {
            if b.is_nan() || b < 0.0 {
                return invalid(format!("budget must be non-negative, got {b}"));
            }
        }
        Ok(())
    }
}
