#![cfg(feature = "serde")]
use karush::json;
use karush::*;
use std::io::Read;
use tempfile::NamedTempFile;

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
fn test_problem_round_trip() {
    let problem = scenario_b_problem();

    let mut tmp = NamedTempFile::new().unwrap();
    json::write_problem_to_file(&problem, tmp.as_file_mut()).unwrap();

    let mut file = tmp.reopen().unwrap();
    let read_back = json::read_problem_from_file(&mut file).unwrap();
    assert_eq!(read_back, problem);
}

#[test]
fn test_kkt_solution_serialization() {
    let problem = scenario_b_problem();
    let solver = KktSolver::<f64>::new(Settings::default()).unwrap();
    let solution = solver.solve(&problem).unwrap();
    assert!(solution.status.is_solved());

    let mut tmp = NamedTempFile::new().unwrap();
    json::write_kkt_solution_to_file(&solution, tmp.as_file_mut()).unwrap();

    let mut buffer = String::new();
    tmp.reopen().unwrap().read_to_string(&mut buffer).unwrap();
    assert!(buffer.contains("\"status\""));
    assert!(buffer.contains("\"Solved\""));
    assert!(buffer.contains("\"active_set\""));
    assert!(buffer.contains("\"candidates\""));
}

#[test]
fn test_qp_solution_serialization_includes_trace() {
    let problem = Problem::from_strings(
        &["x", "y"],
        "x^2 + y^2",
        Direction::Minimize,
        &[
            ("x - y - 1", ConstraintKind::Eq),
            ("x + y - 3", ConstraintKind::Le),
        ],
    )
    .unwrap();
    let solver = QpSolver::<f64>::new(Settings::default()).unwrap();
    let solution = solver.solve(&problem).unwrap();
    assert!(solution.status.is_solved());

    let mut tmp = NamedTempFile::new().unwrap();
    json::write_qp_solution_to_file(&solution, tmp.as_file_mut()).unwrap();

    let mut buffer = String::new();
    tmp.reopen().unwrap().read_to_string(&mut buffer).unwrap();
    assert!(buffer.contains("\"trace\""));
    assert!(buffer.contains("\"phase1_pivots\""));
    assert!(buffer.contains("\"convexity\""));
}
