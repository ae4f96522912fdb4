use karush::problem::VariableId;
use karush::*;

fn solver() -> QpSolver<f64> {
    QpSolver::new(Settings::default()).unwrap()
}

fn scenario_c_problem() -> Problem {
    // min x^2 + y^2 with x - y = 1 and x + y ≤ 3, x,y ≥ 0 implicit
    Problem::from_strings(
        &["x", "y"],
        "x^2 + y^2",
        Direction::Minimize,
        &[
            ("x - y - 1", ConstraintKind::Eq),
            ("x + y - 3", ConstraintKind::Le),
        ],
    )
    .unwrap()
}

#[test]
fn test_two_phase_solve() {
    let solution = solver().solve(&scenario_c_problem()).unwrap();

    assert_eq!(solution.status, SolverStatus::Solved);
    assert!(f64::abs(solution.x[0] - 1.0) <= 1e-6);
    assert!(f64::abs(solution.x[1]) <= 1e-6);
    assert!(f64::abs(solution.objective - 1.0) <= 1e-6);

    // the one artificial of the equality row leaves in a single pivot
    assert_eq!(solution.phase1_pivots, 1);
    assert_eq!(solution.phase2_pivots, 0);

    // equality row binds; the inequality has slack 2
    assert_eq!(solution.binding, vec![0]);
}

#[test]
fn test_pivot_trace_is_recorded() {
    let solution = solver().solve(&scenario_c_problem()).unwrap();

    assert!(solution.trace.phase1_initial.is_some());
    assert!(solution.trace.phase2_initial.is_some());
    assert_eq!(solution.trace.len(), 1);

    let record = &solution.trace.records[0];
    assert_eq!(record.phase, 1);
    assert_eq!(record.entering, VariableId::Decision(0));
    assert_eq!(record.leaving, VariableId::Artificial(0));
    assert!(f64::abs(record.pivot - 1.0) <= 1e-12);
    assert!(f64::abs(record.ratio - 1.0) <= 1e-12);

    // snapshots render for the presentation layer
    let rendered = record.after.to_string();
    assert!(rendered.contains("x1"));
    assert!(rendered.contains("rhs"));
}

#[test]
fn test_no_artificials_skips_phase1() {
    let problem = Problem::from_strings(
        &["x", "y"],
        "x^2 + y^2",
        Direction::Minimize,
        &[("x + y - 2", ConstraintKind::Le)],
    )
    .unwrap();
    let solution = solver().solve(&problem).unwrap();

    assert_eq!(solution.status, SolverStatus::Solved);
    assert!(solution.trace.phase1_initial.is_none());
    assert_eq!(solution.phase1_pivots, 0);
    // the origin is already optimal here
    assert!(f64::abs(solution.x[0]) <= 1e-6);
    assert!(f64::abs(solution.x[1]) <= 1e-6);
    assert!(f64::abs(solution.objective) <= 1e-6);
    assert!(solution.binding.is_empty());
}

#[test]
fn test_contradictory_equalities_are_infeasible() {
    let problem = Problem::from_strings(
        &["x", "y"],
        "x + y",
        Direction::Minimize,
        &[
            ("x + y - 1", ConstraintKind::Eq),
            ("x + y - 2", ConstraintKind::Eq),
        ],
    )
    .unwrap();
    let solution = solver().solve(&problem).unwrap();

    assert_eq!(solution.status, SolverStatus::Infeasible);
    assert!(solution.x.is_empty());
    assert!(solution.objective.is_nan());
}

#[test]
fn test_nonconvex_warning_is_attached() {
    let problem = Problem::from_strings(
        &["x", "y"],
        "x*y",
        Direction::Minimize,
        &[("x + y - 1", ConstraintKind::Le)],
    )
    .unwrap();
    let solution = solver().solve(&problem).unwrap();

    assert!(solution.warnings.contains(&Warning::NonConvex));
    assert_eq!(solution.convexity.convexity, Convexity::NonConvex);
    assert!(solution.convexity.eigenvalues[0] < 0.0);
}

#[test]
fn test_maximize_direction_reports_own_sign() {
    let problem = Problem::from_strings(
        &["x", "y"],
        "2 - x^2 - y^2",
        Direction::Maximize,
        &[],
    )
    .unwrap();
    let solution = solver().solve(&problem).unwrap();

    assert_eq!(solution.status, SolverStatus::Solved);
    assert!(f64::abs(solution.x[0]) <= 1e-6);
    assert!(f64::abs(solution.objective - 2.0) <= 1e-6);
}

#[test]
fn test_cubic_objective_is_rejected() {
    let problem = Problem::from_strings(&["x"], "x^3", Direction::Minimize, &[]).unwrap();
    assert!(matches!(
        solver().solve(&problem),
        Err(QpError::Extraction(_))
    ));
}

#[test]
fn test_pivot_budget() {
    let settings = SettingsBuilder::<f64>::default()
        .max_pivots(1)
        .build()
        .unwrap();
    let solver = QpSolver::new(settings).unwrap();

    // two equality rows need at least two Phase I pivots
    let problem = Problem::from_strings(
        &["x", "y"],
        "x^2 + y^2",
        Direction::Minimize,
        &[
            ("x + y - 2", ConstraintKind::Eq),
            ("x - y", ConstraintKind::Eq),
        ],
    )
    .unwrap();
    let solution = solver.solve(&problem).unwrap();
    assert_eq!(solution.status, SolverStatus::MaxPivots);
}
