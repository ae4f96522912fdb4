use karush::*;

fn solver() -> KktSolver<f64> {
    KktSolver::new(Settings::default()).unwrap()
}

fn scenario_b_problem() -> Problem {
    Problem::from_strings(
        &["x", "y"],
        "(x - 2)^2 + (y - 2)^2",
        Direction::Minimize,
        &[
            ("x + y - 2", ConstraintKind::Le),
            ("-x", ConstraintKind::Le),
            ("-y", ConstraintKind::Le),
        ],
    )
    .unwrap()
}

#[test]
fn test_equality_constrained_quadratic() {
    // min x^2 + y^2 with 1 - x - y = 0
    let problem = Problem::from_strings(
        &["x", "y"],
        "x^2 + y^2",
        Direction::Minimize,
        &[("1 - x - y", ConstraintKind::Eq)],
    )
    .unwrap();
    let solution = solver().solve(&problem).unwrap();

    assert_eq!(solution.status, SolverStatus::Solved);
    assert_eq!(solution.cases_explored, 1);
    assert!(f64::abs(solution.x[0].to_float() - 0.5) <= 1e-6);
    assert!(f64::abs(solution.x[1].to_float() - 0.5) <= 1e-6);
    assert!(f64::abs(solution.objective - 0.5) <= 1e-6);
    assert!(f64::abs(solution.mu[0].to_float() - 1.0) <= 1e-6);
    // affine systems are resolved exactly
    assert!(solution.x.iter().all(Value::is_exact));
    assert!(solution.mu[0].is_exact());
}

#[test]
fn test_equality_multiplier_sign_follows_orientation() {
    // the same constraint written as x + y - 1 = 0 flips μ
    let problem = Problem::from_strings(
        &["x", "y"],
        "x^2 + y^2",
        Direction::Minimize,
        &[("x + y - 1", ConstraintKind::Eq)],
    )
    .unwrap();
    let solution = solver().solve(&problem).unwrap();

    assert_eq!(solution.status, SolverStatus::Solved);
    assert!(f64::abs(solution.x[0].to_float() - 0.5) <= 1e-6);
    assert!(f64::abs(solution.mu[0].to_float() + 1.0) <= 1e-6);
}

#[test]
fn test_inequality_active_set() {
    let solution = solver().solve(&scenario_b_problem()).unwrap();

    assert_eq!(solution.status, SolverStatus::Solved);
    assert_eq!(solution.cases_explored, 8);
    assert!(f64::abs(solution.x[0].to_float() - 1.0) <= 1e-6);
    assert!(f64::abs(solution.x[1].to_float() - 1.0) <= 1e-6);
    assert!(f64::abs(solution.objective - 2.0) <= 1e-6);

    // x + y ≤ 2 binds with multiplier 2, the bounds stay inactive
    assert_eq!(solution.active_set, vec![0]);
    assert!(f64::abs(solution.lambda[0].to_float() - 2.0) <= 1e-6);
    assert!(f64::abs(solution.lambda[1].to_float()) <= 1e-6);
    assert!(f64::abs(solution.lambda[2].to_float()) <= 1e-6);
}

#[test]
fn test_maximize_direction() {
    let problem = Problem::from_strings(
        &["x"],
        "2*x - x^2",
        Direction::Maximize,
        &[],
    )
    .unwrap();
    let solution = solver().solve(&problem).unwrap();

    assert_eq!(solution.status, SolverStatus::Solved);
    assert!(f64::abs(solution.x[0].to_float() - 1.0) <= 1e-6);
    assert!(f64::abs(solution.objective - 1.0) <= 1e-6);
}

#[test]
fn test_nonlinear_case_uses_newton() {
    // quartic objective forces the numeric path
    let problem = Problem::from_strings(
        &["x"],
        "x^4",
        Direction::Minimize,
        &[("x - 1", ConstraintKind::Eq)],
    )
    .unwrap();
    let solution = solver().solve(&problem).unwrap();

    assert_eq!(solution.status, SolverStatus::Solved);
    assert!(f64::abs(solution.x[0].to_float() - 1.0) <= 1e-6);
    assert!(f64::abs(solution.objective - 1.0) <= 1e-6);
    assert_eq!(solution.x[0].method(), Some(NumericMethod::Newton));
    assert!(f64::abs(solution.mu[0].to_float() + 4.0) <= 1e-6);
}

#[test]
fn test_flat_valley_has_no_isolated_point() {
    // (x + y)^2 is minimized along a whole line; the singular
    // stationarity system yields no isolated candidate
    let problem =
        Problem::from_strings(&["x", "y"], "(x + y)^2", Direction::Minimize, &[]).unwrap();
    let solution = solver().solve(&problem).unwrap();

    assert_eq!(solution.status, SolverStatus::Infeasible);
    assert_eq!(solution.cases_explored, 1);
    assert!(solution.candidates.is_empty());
}

#[test]
fn test_nonconvex_quadratic_carries_warning() {
    let problem =
        Problem::from_strings(&["x", "y"], "x*y", Direction::Minimize, &[]).unwrap();
    let solution = solver().solve(&problem).unwrap();

    // the saddle at the origin is the only stationary point
    assert_eq!(solution.status, SolverStatus::Solved);
    assert!(f64::abs(solution.x[0].to_float()) <= 1e-6);
    assert!(solution.warnings.contains(&Warning::NonConvex));
}

#[test]
fn test_infeasible_problem() {
    // x ≤ -1 and x ≥ 1 cannot both hold
    let problem = Problem::from_strings(
        &["x"],
        "x^2",
        Direction::Minimize,
        &[("x + 1", ConstraintKind::Le), ("1 - x", ConstraintKind::Le)],
    )
    .unwrap();
    let solution = solver().solve(&problem).unwrap();

    assert_eq!(solution.status, SolverStatus::Infeasible);
    assert_eq!(solution.cases_explored, 4);
    assert!(solution.x.is_empty());
    assert!(solution.candidates.iter().all(|c| !c.is_valid()));
}

#[test]
fn test_candidates_are_reported_for_all_solved_cases() {
    let solution = solver().solve(&scenario_b_problem()).unwrap();
    // each retained candidate carries its own verification flags
    assert!(!solution.candidates.is_empty());
    let valid = solution
        .candidates
        .iter()
        .filter(|c| c.is_valid())
        .count();
    assert!(valid >= 1);
    for c in &solution.candidates {
        assert_eq!(c.lambda.len(), 3);
        assert_eq!(c.x.len(), 2);
    }
}
