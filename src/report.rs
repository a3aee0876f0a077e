//! Run summaries and exportable history.
//!
//! Rendering (plots, animations) is left to external tools; this module
//! only shapes what they consume.

use std::fmt;

use crate::anneal::AnnealResult;

/// Before/after figures of one run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Summary {
    pub initial_weight: f64,
    pub min_weight: f64,
    pub initial_diameter: usize,
    pub min_diameter: usize,
    pub best_weight: f64,
    pub iterations: usize,
    pub budget: Option<f64>,
}

impl Summary {
    pub fn from_result(result: &AnnealResult) -> Self {
        Self {
            initial_weight: result.initial_weight,
            min_weight: result.min_weight,
            initial_diameter: result.initial_diameter,
            min_diameter: result.min_diameter,
            best_weight: result.best_weight,
            iterations: result.iterations,
            budget: result.budget,
        }
    }

    /// Relative weight reduction in percent, two decimals.
    pub fn weight_improvement_pct(&self) -> f64 {
        improvement_pct(self.initial_weight, self.min_weight)
    }

    /// Relative diameter reduction in percent, two decimals.
    pub fn diameter_improvement_pct(&self) -> f64 {
        improvement_pct(self.initial_diameter as f64, self.min_diameter as f64)
    }

    /// Whether the lightest tree seen fits the budget. `None` without one.
    pub fn within_budget(&self) -> Option<bool> {
        self.budget.map(|b| self.min_weight <= b)
    }
}

fn improvement_pct(initial: f64, min: f64) -> f64 {
    if initial == 0.0 {
        return 0.0;
    }
    ((initial - min) / initial * 10_000.0).round() / 100.0
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "initial weight:   {}", self.initial_weight)?;
        writeln!(f, "initial diameter: {}", self.initial_diameter)?;
        writeln!(
            f,
            "minimum weight:   {}  improvement: {}%",
            self.min_weight,
            self.weight_improvement_pct()
        )?;
        writeln!(
            f,
            "minimum diameter: {}  improvement: {}%",
            self.min_diameter,
            self.diameter_improvement_pct()
        )?;
        write!(f, "best tree weight: {}", self.best_weight)?;
        if let (Some(budget), Some(ok)) = (self.budget, self.within_budget()) {
            write!(
                f,
                "\nbudget:           {budget} ({})",
                if ok { "met" } else { "exceeded" }
            )?;
        }
        Ok(())
    }
}

/// Everything a plotter needs from a run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HistoryRecord {
    pub summary: Summary,
    pub diameter_history: Vec<usize>,
    pub weight_history: Vec<f64>,
    /// Edge list of the best tree.
    pub best_edges: Vec<(usize, usize)>,
    pub seed: u64,
}

impl From<&AnnealResult> for HistoryRecord {
    fn from(result: &AnnealResult) -> Self {
        Self {
            summary: result.summary(),
            diameter_history: result.diameter_history.clone(),
            weight_history: result.weight_history.clone(),
            best_edges: result.best.edge_list(),
            seed: result.seed,
        }
    }
}
