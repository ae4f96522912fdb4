//! JSON read/write of problems and solutions, enabled by the `serde`
//! feature.

use crate::algebra::FloatT;
use crate::problem::Problem;
use crate::solution::{KktSolution, QpSolution};
use serde::Serialize;
use std::fs::File;
use std::io::{self, Read, Write};

/// Write a problem as JSON.
pub fn write_problem_to_file(problem: &Problem, file: &mut File) -> Result<(), io::Error> {
    let json = serde_json::to_string(problem)?;
    file.write_all(json.as_bytes())?;
    Ok(())
}

/// Read a problem back from JSON written by
/// [`write_problem_to_file`].
pub fn read_problem_from_file(file: &mut File) -> Result<Problem, io::Error> {
    let mut buffer = String::new();
    file.read_to_string(&mut buffer)?;
    let problem = serde_json::from_str(&buffer)?;
    Ok(problem)
}

/// Write a case solver solution as JSON.
pub fn write_kkt_solution_to_file<T>(
    solution: &KktSolution<T>,
    file: &mut File,
) -> Result<(), io::Error>
where
    T: FloatT + Serialize,
{
    let json = serde_json::to_string(solution)?;
    file.write_all(json.as_bytes())?;
    Ok(())
}

/// Write a simplex solution, including its pivot trace, as JSON.
pub fn write_qp_solution_to_file<T>(
    solution: &QpSolution<T>,
    file: &mut File,
) -> Result<(), io::Error>
where
    T: FloatT + Serialize,
{
    let json = serde_json::to_string(solution)?;
    file.write_all(json.as_bytes())?;
    Ok(())
}
