//! Policies and per-step outcomes of the annealer.

/// How the annealer maintains `curr_weight` and the best tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Bookkeeping {
    /// The historical rule with one change: a weight-improving candidate
    /// with a record diameter only becomes the best tree if it is adopted.
    #[default]
    Consistent,

    /// Reproduces the historical rule exactly: the current weight only
    /// moves on a Boltzmann acceptance of a weight-worsening candidate,
    /// and a weight-improving candidate with a record diameter becomes the
    /// best tree even when it is not adopted.
    Legacy,

    /// The current weight always equals the weight of the current tree,
    /// and every adoption that beats the minimum diameter updates the
    /// best tree, Boltzmann acceptances included.
    Tracked,
}

/// Weight budget handling.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BudgetPolicy {
    /// No budget.
    #[default]
    Unbounded,
    /// Budget is reported against but never blocks a move.
    Track(f64),
    /// Candidates heavier than the budget are rejected.
    Enforce(f64),
}

impl BudgetPolicy {
    pub fn limit(&self) -> Option<f64> {
        match *self {
            BudgetPolicy::Unbounded => None,
            BudgetPolicy::Track(b) | BudgetPolicy::Enforce(b) => Some(b),
        }
    }

    /// True if the policy forbids a tree of this weight.
    pub fn rejects(&self, weight: f64) -> bool {
        matches!(*self, BudgetPolicy::Enforce(b) if weight > b)
    }
}

/// What happened to one candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Adopted because its (penalized) diameter beat the current one.
    Improved,
    /// Adopted by the Boltzmann draw.
    Accepted,
    /// Kept the current tree.
    Rejected,
    /// Rejected by an enforced budget before scoring.
    OverBudget,
}

impl Decision {
    pub fn adopted(&self) -> bool {
        matches!(self, Decision::Improved | Decision::Accepted)
    }
}

/// Record of one completed iteration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Step {
    /// Iteration number the step ran as (first step is 1).
    pub iteration: usize,
    /// Temperature the candidate was judged at.
    pub temperature: f64,
    pub candidate_weight: f64,
    pub candidate_diameter: usize,
    pub decision: Decision,
    /// Whether this step produced a new best tree.
    pub new_best: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_budget_policy() {
        assert_eq!(BudgetPolicy::Unbounded.limit(), None);
        assert_eq!(BudgetPolicy::Track(5.0).limit(), Some(5.0));
        assert!(!BudgetPolicy::Track(5.0).rejects(6.0));
        assert!(BudgetPolicy::Enforce(5.0).rejects(6.0));
        assert!(!BudgetPolicy::Enforce(5.0).rejects(5.0));
    }

    #[test]
    fn test_decision_adopted() {
        assert!(Decision::Improved.adopted());
        assert!(Decision::Accepted.adopted());
        assert!(!Decision::Rejected.adopted());
        assert!(!Decision::OverBudget.adopted());
    }
}
