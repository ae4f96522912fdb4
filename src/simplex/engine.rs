#![allow(non_snake_case)]
use super::{PivotRecord, PivotTrace, Tableau};
use crate::algebra::{FactorizationError, FloatT, VectorMath};
use crate::info_print;
use crate::problem::{
    ConvexityReport, Direction, ExtractionError, Problem, QpForm, VariableId,
};
use crate::settings::{Settings, SettingsError};
use crate::solution::{QpSolution, SolverStatus, Warning};
use std::time::Instant;
use thiserror::Error;

/// Error type for the simplex engine entry points.
///
/// Termination conditions found during pivoting (infeasible, unbounded,
/// budget exhaustion) are reported through
/// [`QpSolution::status`](crate::QpSolution), not through this type.
#[derive(Error, Debug)]
pub enum QpError {
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error(transparent)]
    Extraction(#[from] ExtractionError),
    #[error(transparent)]
    Factorization(#[from] FactorizationError),
}

/// Two-phase simplex engine on the augmented KKT system of a QP.
///
/// The quadratic program `min C·x + ½xᵀDx` over `A_eq x = b_eq`,
/// `A_ineq x ≤ b_ineq`, `x ≥ 0` is rewritten through its stationarity
/// condition into one linear tableau whose unknowns are the decision
/// variables, the constraint multipliers λ, the bound multipliers μ,
/// slacks and artificials.  Phase I drives the artificial sum to zero,
/// Phase II then pivots on the reduced linear cost.
pub struct QpSolver<T = f64>
where
    T: FloatT,
{
    settings: Settings<T>,
}

impl<T> QpSolver<T>
where
    T: FloatT,
{
    pub fn new(settings: Settings<T>) -> Result<Self, QpError> {
        settings.validate()?;
        Ok(Self { settings })
    }

    pub fn settings(&self) -> &Settings<T> {
        &self.settings
    }

    /// Solve a problem, extracting its matrix form first.
    pub fn solve(&self, problem: &Problem) -> Result<QpSolution<T>, QpError> {
        let qp = QpForm::from_problem(problem)?;
        self.solve_form(&qp, problem.direction())
    }

    /// Solve an already extracted quadratic program.
    ///
    /// `direction` only affects the sign of the reported objective; the
    /// form itself is always a minimization.
    pub fn solve_form(
        &self,
        qp: &QpForm<T>,
        direction: Direction,
    ) -> Result<QpSolution<T>, QpError> {
        let start = Instant::now();
        let set = &self.settings;

        let convexity = ConvexityReport::analyze(&qp.D, set.eps_convexity)?;
        let mut warnings = Vec::new();
        if !convexity.is_convex() {
            warnings.push(Warning::NonConvex);
        }
        info_print::print_qp_configuration(set, qp, &convexity);

        let mut tab = build_tableau(qp);
        let mut trace = PivotTrace::new();
        let mut phase1_pivots = 0u32;
        let mut phase2_pivots = 0u32;

        let finish = |status: SolverStatus,
                      tab: &Tableau<T>,
                      trace: PivotTrace<T>,
                      warnings: Vec<Warning>,
                      p1: u32,
                      p2: u32,
                      elapsed: f64| {
            let mut sol = QpSolution {
                status,
                x: Vec::new(),
                lambda: Vec::new(),
                mu: Vec::new(),
                objective: T::nan(),
                binding: Vec::new(),
                convexity: convexity.clone(),
                warnings,
                trace,
                phase1_pivots: p1,
                phase2_pivots: p2,
                solve_time: elapsed,
            };
            if status != SolverStatus::Infeasible && status != SolverStatus::Unbounded {
                extract_point(&mut sol, tab, qp, direction, set.tol_feas);
            }
            info_print::print_footer(set, sol.status, sol.objective, sol.solve_time);
            sol
        };

        // Phase I, skipped outright when construction found a natural
        // basis for every row
        let has_artificials = tab.columns.iter().any(VariableId::is_artificial);
        if has_artificials {
            trace.phase1_initial = Some(tab.snapshot());
            loop {
                if let Some(status) = self.budget_status(&start, phase1_pivots + phase2_pivots)
                {
                    return Ok(finish(
                        status,
                        &tab,
                        trace,
                        warnings,
                        phase1_pivots,
                        phase2_pivots,
                        start.elapsed().as_secs_f64(),
                    ));
                }
                let Some(col) = tab.find_entering(set.tol_feas) else {
                    break;
                };
                let Some(row) = tab.find_leaving(col, set.zero_pivot_tol) else {
                    // W is bounded below by zero, a ray here means the
                    // artificial objective cannot improve further
                    break;
                };
                self.pivot_and_record(&mut tab, &mut trace, 1, row, col);
                phase1_pivots += 1;
            }

            let w = -tab.objective_value;
            if w > set.tol_feas {
                return Ok(finish(
                    SolverStatus::Infeasible,
                    &tab,
                    trace,
                    warnings,
                    phase1_pivots,
                    phase2_pivots,
                    start.elapsed().as_secs_f64(),
                ));
            }
            drive_out_artificials(&mut tab, set.zero_pivot_tol);
            strip_artificial_columns(&mut tab);
        }

        // Phase II on the reduced linear cost
        init_phase2_objective(&mut tab, qp);
        trace.phase2_initial = Some(tab.snapshot());
        loop {
            if let Some(status) = self.budget_status(&start, phase1_pivots + phase2_pivots) {
                return Ok(finish(
                    status,
                    &tab,
                    trace,
                    warnings,
                    phase1_pivots,
                    phase2_pivots,
                    start.elapsed().as_secs_f64(),
                ));
            }
            let Some(col) = tab.find_entering(set.tol_feas) else {
                break;
            };
            let Some(row) = tab.find_leaving(col, set.zero_pivot_tol) else {
                return Ok(finish(
                    SolverStatus::Unbounded,
                    &tab,
                    trace,
                    warnings,
                    phase1_pivots,
                    phase2_pivots,
                    start.elapsed().as_secs_f64(),
                ));
            };
            self.pivot_and_record(&mut tab, &mut trace, 2, row, col);
            phase2_pivots += 1;
        }

        Ok(finish(
            SolverStatus::Solved,
            &tab,
            trace,
            warnings,
            phase1_pivots,
            phase2_pivots,
            start.elapsed().as_secs_f64(),
        ))
    }

    fn budget_status(&self, start: &Instant, pivots: u32) -> Option<SolverStatus> {
        if start.elapsed().as_secs_f64() > self.settings.time_limit {
            return Some(SolverStatus::MaxTime);
        }
        if pivots >= self.settings.max_pivots {
            return Some(SolverStatus::MaxPivots);
        }
        None
    }

    fn pivot_and_record(
        &self,
        tab: &mut Tableau<T>,
        trace: &mut PivotTrace<T>,
        phase: u8,
        row: usize,
        col: usize,
    ) {
        let entering = tab.columns[col];
        let leaving = tab.basis[row];
        let pivot = tab.rows[row][col];
        let ratio = tab.rhs[row] / pivot;
        info_print::print_pivot(&self.settings, phase, entering, leaving, pivot);
        tab.pivot(row, col);
        trace.records.push(PivotRecord {
            phase,
            entering,
            leaving,
            pivot,
            ratio,
            after: tab.snapshot(),
        });
    }
}

// Assemble the Phase I tableau of the augmented KKT system.
//
// Row layout: n stationarity rows, then equality rows, then inequality
// rows.  Column layout: x, λ (equality constraints first), μ, S, R.
// Stationarity rows are oriented so the μ column reads +1 and the RHS
// is C_i; a negative C_i flips the row and costs an artificial.
fn build_tableau<T: FloatT>(qp: &QpForm<T>) -> Tableau<T> {
    let n = qp.C.len();
    let k = qp.n_eq();
    let m = qp.n_ineq();
    let ncon = k + m;

    let needs_artificial = |r: usize| -> bool {
        if r < n {
            qp.C[r] < T::zero()
        } else if r < n + k {
            true
        } else {
            qp.b_ineq[r - n - k] < T::zero()
        }
    };
    let n_art: usize = (0..n + ncon).filter(|&r| needs_artificial(r)).count();

    let mut columns: Vec<VariableId> = Vec::with_capacity(n + ncon + n + m + n_art);
    columns.extend((0..n).map(VariableId::Decision));
    columns.extend((0..ncon).map(VariableId::ConstraintMultiplier));
    columns.extend((0..n).map(VariableId::BoundMultiplier));
    columns.extend((0..m).map(VariableId::Slack));
    columns.extend((0..n_art).map(VariableId::Artificial));

    let ncols = columns.len();
    let x_off = 0;
    let lam_off = n;
    let mu_off = n + ncon;
    let s_off = n + ncon + n;
    let art_off = n + ncon + n + m;

    // stacked constraint coefficient lookup, equality rows first
    let a_at = |c: usize, j: usize| -> T {
        if c < k {
            qp.A_eq[(c, j)]
        } else {
            qp.A_ineq[(c - k, j)]
        }
    };

    let mut rows: Vec<Vec<T>> = Vec::with_capacity(n + ncon);
    let mut rhs: Vec<T> = Vec::with_capacity(n + ncon);
    let mut basis: Vec<VariableId> = Vec::with_capacity(n + ncon);
    let mut next_art = 0usize;

    // stationarity rows: -Dx - Aᵀλ + μ = C
    for i in 0..n {
        let mut row = vec![T::zero(); ncols];
        for j in 0..n {
            row[x_off + j] = -qp.D[(i, j)];
        }
        for c in 0..ncon {
            row[lam_off + c] = -a_at(c, i);
        }
        row[mu_off + i] = T::one();
        let mut b = qp.C[i];
        if b < T::zero() {
            row.negate();
            b = -b;
            row[art_off + next_art] = T::one();
            basis.push(VariableId::Artificial(next_art));
            next_art += 1;
        } else {
            basis.push(VariableId::BoundMultiplier(i));
        }
        rows.push(row);
        rhs.push(b);
    }

    // equality rows, artificial basis
    for c in 0..k {
        let mut row = vec![T::zero(); ncols];
        for j in 0..n {
            row[x_off + j] = qp.A_eq[(c, j)];
        }
        let mut b = qp.b_eq[c];
        if b < T::zero() {
            row.negate();
            b = -b;
        }
        row[art_off + next_art] = T::one();
        basis.push(VariableId::Artificial(next_art));
        next_art += 1;
        rows.push(row);
        rhs.push(b);
    }

    // inequality rows, slack basis when the RHS starts non-negative
    for c in 0..m {
        let mut row = vec![T::zero(); ncols];
        for j in 0..n {
            row[x_off + j] = qp.A_ineq[(c, j)];
        }
        row[s_off + c] = T::one();
        let mut b = qp.b_ineq[c];
        if b < T::zero() {
            row.negate();
            b = -b;
            row[art_off + next_art] = T::one();
            basis.push(VariableId::Artificial(next_art));
            next_art += 1;
        } else {
            basis.push(VariableId::Slack(c));
        }
        rows.push(row);
        rhs.push(b);
    }

    // Phase I objective: reduced cost of W = ΣR under the initial basis
    let mut objective = vec![T::zero(); ncols];
    for j in art_off..ncols {
        objective[j] = T::one();
    }
    let mut objective_value = T::zero();
    for (r, b) in basis.iter().enumerate() {
        if b.is_artificial() {
            let row = rows[r].clone();
            objective.axpby(-T::one(), &row, T::one());
            objective_value -= rhs[r];
        }
    }

    Tableau {
        columns,
        basis,
        rows,
        rhs,
        objective,
        objective_value,
    }
}

// Pivot zero-level artificials out of the basis; a row offering no
// pivot column is redundant and dropped.
fn drive_out_artificials<T: FloatT>(tab: &mut Tableau<T>, zero_tol: T) {
    let mut r = 0;
    while r < tab.nrows() {
        if tab.basis[r].is_artificial() {
            let col = (0..tab.ncols()).find(|&j| {
                !tab.columns[j].is_artificial() && tab.rows[r][j].abs() > zero_tol
            });
            match col {
                Some(j) => tab.pivot(r, j),
                None => {
                    tab.rows.remove(r);
                    tab.rhs.remove(r);
                    tab.basis.remove(r);
                    continue;
                }
            }
        }
        r += 1;
    }
}

fn strip_artificial_columns<T: FloatT>(tab: &mut Tableau<T>) {
    let keep: Vec<usize> = (0..tab.ncols())
        .filter(|&j| !tab.columns[j].is_artificial())
        .collect();
    tab.columns = keep.iter().map(|&j| tab.columns[j]).collect();
    for row in &mut tab.rows {
        *row = keep.iter().map(|&j| row[j]).collect();
    }
    tab.objective = keep.iter().map(|&j| tab.objective[j]).collect();
}

// Reduced linear cost row: C over the decision columns, zero elsewhere,
// eliminated against the incoming basis.
fn init_phase2_objective<T: FloatT>(tab: &mut Tableau<T>, qp: &QpForm<T>) {
    let cost = |v: VariableId| -> T {
        match v {
            VariableId::Decision(i) => qp.C[i],
            _ => T::zero(),
        }
    };
    let mut objective: Vec<T> = tab.columns.iter().map(|&c| cost(c)).collect();
    let mut objective_value = T::zero();
    for r in 0..tab.nrows() {
        let cb = cost(tab.basis[r]);
        if cb != T::zero() {
            let row = tab.rows[r].clone();
            objective.axpby(-cb, &row, T::one());
            objective_value -= cb * tab.rhs[r];
        }
    }
    tab.objective = objective;
    tab.objective_value = objective_value;
}

fn extract_point<T: FloatT>(
    sol: &mut QpSolution<T>,
    tab: &Tableau<T>,
    qp: &QpForm<T>,
    direction: Direction,
    tol: T,
) {
    let n = qp.C.len();
    let ncon = qp.n_eq() + qp.n_ineq();
    sol.x = (0..n).map(|i| tab.value_of(VariableId::Decision(i))).collect();
    sol.lambda = (0..ncon)
        .map(|c| tab.value_of(VariableId::ConstraintMultiplier(c)))
        .collect();
    sol.mu = (0..n)
        .map(|i| tab.value_of(VariableId::BoundMultiplier(i)))
        .collect();

    sol.binding = (0..qp.n_eq()).collect();
    for c in 0..qp.n_ineq() {
        if tab.value_of(VariableId::Slack(c)) <= tol {
            sol.binding.push(qp.n_eq() + c);
        }
    }

    let value = qp.objective_value(&sol.x);
    sol.objective = match direction {
        Direction::Minimize => value,
        Direction::Maximize => -value,
    };
}
