use super::{Candidate, KktSystem};
use crate::algebra::{FactorizationError, FloatT};
use crate::info_print;
use crate::problem::{hessian_matrix, ConvexityReport, Direction, Problem};
use crate::settings::{Settings, SettingsError};
use crate::solution::{KktSolution, SolverStatus, Warning};
use crate::symbolic::{solve_system, NewtonControls, Value};
use std::time::Instant;
use thiserror::Error;

/// Error type for the case solver entry points.
///
/// Infeasibility and budget exhaustion are statuses on the returned
/// [`KktSolution`], not errors.
#[derive(Error, Debug)]
pub enum KktError {
    #[error(transparent)]
    Settings(#[from] SettingsError),
    /// Enumerating 2^m cases past the configured limit is refused
    /// rather than attempted
    #[error("{0} inequality constraints exceed the case enumeration limit")]
    TooManyInequalities(usize),
    #[error(transparent)]
    Factorization(#[from] FactorizationError),
}

/// Analytical KKT solver by exhaustive active-set enumeration.
///
/// For m inequality constraints all 2^m active/inactive patterns are
/// enumerated in increasing bit order, each producing one square
/// algebraic system.  Systems without a solution contribute nothing;
/// solutions are verified against the four KKT conditions and the best
/// surviving candidate wins, first-found on ties.
pub struct KktSolver<T = f64>
where
    T: FloatT,
{
    settings: Settings<T>,
}

impl<T> KktSolver<T>
where
    T: FloatT,
{
    pub fn new(settings: Settings<T>) -> Result<Self, KktError> {
        settings.validate()?;
        Ok(Self { settings })
    }

    pub fn settings(&self) -> &Settings<T> {
        &self.settings
    }

    pub fn solve(&self, problem: &Problem) -> Result<KktSolution<T>, KktError> {
        let start = Instant::now();
        let set = &self.settings;

        let sys = KktSystem::new(problem);
        let m = sys.n_ineq();
        let k = sys.n_eq();
        if m as u32 > set.max_enumeration_ineqs {
            return Err(KktError::TooManyInequalities(m));
        }
        info_print::print_kkt_configuration(set, problem, m, k);

        // curvature is only constant (and checkable) up to degree two
        let mut warnings = Vec::new();
        let f = problem.minimized_objective();
        if f.is_quadratic() {
            let report =
                ConvexityReport::<T>::analyze(&hessian_matrix(&f), set.eps_convexity)?;
            if !report.is_convex() {
                warnings.push(Warning::NonConvex);
            }
        }

        let newton = NewtonControls {
            max_iter: set.newton_max_iter,
            tol: set.newton_tol,
            min_step: set.newton_min_step,
        };

        let mut candidates: Vec<Candidate<T>> = Vec::new();
        let mut best: Option<(usize, T)> = None;
        let mut cases_explored = 0u64;
        let mut timed_out = false;

        for mask in 0..(1u64 << m) {
            if start.elapsed().as_secs_f64() > set.time_limit {
                timed_out = true;
                break;
            }
            cases_explored += 1;

            let equations = sys.case_equations(mask);
            // a case without an algebraic solution contributes nothing
            let Some(values) = solve_system(&equations, &newton, set.zero_pivot_tol) else {
                info_print::print_case(set, mask, m, "no solution");
                continue;
            };

            let candidate = self.verify(&sys, problem, mask, values);
            info_print::print_case(
                set,
                mask,
                m,
                if candidate.is_valid() { "valid" } else { "rejected" },
            );

            let minimized = match problem.direction() {
                Direction::Minimize => candidate.objective,
                Direction::Maximize => -candidate.objective,
            };
            if candidate.is_valid() {
                match best {
                    Some((_, incumbent)) if minimized >= incumbent => {}
                    _ => best = Some((candidates.len(), minimized)),
                }
            }
            candidates.push(candidate);
        }

        let status = if timed_out {
            SolverStatus::MaxTime
        } else if best.is_some() {
            SolverStatus::Solved
        } else {
            SolverStatus::Infeasible
        };

        let mut solution = KktSolution {
            status,
            x: Vec::new(),
            lambda: Vec::new(),
            mu: Vec::new(),
            objective: T::nan(),
            active_set: Vec::new(),
            candidates,
            cases_explored,
            warnings,
            solve_time: start.elapsed().as_secs_f64(),
        };
        if let Some((idx, _)) = best {
            let winner = &solution.candidates[idx];
            solution.x = winner.x.clone();
            solution.lambda = winner.lambda.clone();
            solution.mu = winner.mu.clone();
            solution.objective = winner.objective;
            solution.active_set = winner.active_set();
        }
        info_print::print_footer(set, solution.status, solution.objective, solution.solve_time);
        Ok(solution)
    }

    // Verification of one solved case against the KKT conditions, each
    // with the feasibility tolerance.
    fn verify(
        &self,
        sys: &KktSystem,
        problem: &Problem,
        mask: u64,
        values: Vec<Value<T>>,
    ) -> Candidate<T> {
        let tol = self.settings.tol_feas;
        let n = sys.n_decision();
        let m = sys.n_ineq();

        let point: Vec<T> = values.iter().map(Value::to_float).collect();

        let mut primal_feasible = true;
        for (i, g) in sys.inequalities().iter().enumerate() {
            let gi = g.eval(&point);
            let active = mask & (1u64 << i) != 0;
            let ok = if active { gi.abs() <= tol } else { gi <= tol };
            primal_feasible = primal_feasible && ok;
        }
        for h in sys.equalities() {
            primal_feasible = primal_feasible && h.eval(&point).abs() <= tol;
        }

        let mut dual_feasible = true;
        let mut complementary = true;
        for (i, g) in sys.inequalities().iter().enumerate() {
            let li = point[n + i];
            dual_feasible = dual_feasible && li >= -tol;
            complementary = complementary && (li * g.eval(&point)).abs() <= tol;
        }

        let minimized = sys.objective().eval(&point);
        let objective = match problem.direction() {
            Direction::Minimize => minimized,
            Direction::Maximize => -minimized,
        };

        let mut values = values;
        let mu = values.split_off(n + m);
        let lambda = values.split_off(n);
        let x = values;

        Candidate {
            mask,
            x,
            lambda,
            mu,
            objective,
            primal_feasible,
            dual_feasible,
            complementary,
        }
    }
}
