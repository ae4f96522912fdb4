use crate::algebra::FloatT;
use crate::problem::ConvexityReport;
use crate::simplex::PivotTrace;
use crate::symbolic::{NumericMethod, Value};
use std::fmt;

/// Terminal status of a solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SolverStatus {
    /// Problem is not solved (solver hasn't run)
    #[default]
    Unsolved,
    /// KKT conditions hold at the returned point
    Solved,
    /// No verified point was found.  On the simplex path this means the
    /// constraint system has no feasible point; on the case solver path
    /// see the note on [`KktSolution`].
    Infeasible,
    /// The objective decreases without bound over the feasible set
    Unbounded,
    /// Wall-clock time limit reached before termination
    MaxTime,
    /// Pivot limit reached before termination
    MaxPivots,
}

impl SolverStatus {
    /// The solver returned a usable point.
    pub fn is_solved(&self) -> bool {
        matches!(self, SolverStatus::Solved)
    }
}

impl fmt::Display for SolverStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SolverStatus::Unsolved => "unsolved",
            SolverStatus::Solved => "solved",
            SolverStatus::Infeasible => "primal infeasible",
            SolverStatus::Unbounded => "unbounded",
            SolverStatus::MaxTime => "time limit reached",
            SolverStatus::MaxPivots => "pivot limit reached",
        };
        write!(f, "{}", s)
    }
}

/// Non-fatal condition attached to an otherwise usable result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Warning {
    /// The objective Hessian is not positive semidefinite; the point
    /// returned is only a stationary point, not a certified global
    /// optimum.
    NonConvex,
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::NonConvex => write!(f, "objective is not convex"),
        }
    }
}

/// Output of the analytical KKT case solver.
///
/// `x`, `lambda` and `mu` are populated only when `status` is
/// [`Solved`](SolverStatus::Solved); the candidate list is always
/// populated with every enumerated case whose algebraic system had a
/// solution, so callers can present the cases considered.
///
/// An [`Infeasible`](SolverStatus::Infeasible) status means no case
/// yielded a verified isolated KKT point.  Besides genuinely infeasible
/// constraints this also covers objectives whose minimizers form a
/// continuum (a singular stationarity system has no isolated solution
/// to report); inspect `candidates` to distinguish the two.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KktSolution<T> {
    pub status: SolverStatus,
    /// optimal point, one value per decision variable
    pub x: Vec<Value<T>>,
    /// inequality multipliers λ, in standardized constraint order
    pub lambda: Vec<Value<T>>,
    /// equality multipliers μ, in constraint order
    pub mu: Vec<Value<T>>,
    /// objective value in the problem's own direction
    pub objective: T,
    /// indices of inequalities binding at the optimum
    pub active_set: Vec<usize>,
    /// every retained candidate, in enumeration order
    pub candidates: Vec<crate::kkt::Candidate<T>>,
    /// number of active-set patterns explored
    pub cases_explored: u64,
    pub warnings: Vec<Warning>,
    /// total solve time in seconds
    pub solve_time: f64,
}

/// Output of the two-phase simplex engine.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QpSolution<T> {
    pub status: SolverStatus,
    /// optimal point
    pub x: Vec<T>,
    /// multipliers λ of the functional constraints, equality rows first
    pub lambda: Vec<T>,
    /// multipliers μ of the bounds x ≥ 0
    pub mu: Vec<T>,
    /// objective value in the problem's own direction
    pub objective: T,
    /// indices (equality rows first) of constraints binding at the optimum
    pub binding: Vec<usize>,
    /// Hessian eigenvalue report from the pre-solve convexity check
    pub convexity: ConvexityReport<T>,
    pub warnings: Vec<Warning>,
    /// ordered record of both phases, one entry per pivot
    pub trace: PivotTrace<T>,
    pub phase1_pivots: u32,
    pub phase2_pivots: u32,
    /// total solve time in seconds
    pub solve_time: f64,
}

impl<T> QpSolution<T>
where
    T: FloatT,
{
    /// The optimal point with numeric provenance attached.  Everything
    /// on this path went through floating point pivoting.
    pub fn values(&self) -> Vec<Value<T>> {
        self.x
            .iter()
            .map(|&v| Value::Approximate(v, NumericMethod::LinearSolve))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_display() {
        assert_eq!(SolverStatus::Solved.to_string(), "solved");
        assert_eq!(SolverStatus::Infeasible.to_string(), "primal infeasible");
        assert!(SolverStatus::Solved.is_solved());
        assert!(!SolverStatus::Unbounded.is_solved());
    }
}
