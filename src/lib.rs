//! <h1 align="center" margin=0px>
//! karush
//! </h1>
//! <p align="center">
//! Analytical KKT and tableau simplex engines for small constrained
//! optimization problems.
//! </p>
//!
//! The crate solves problems of the form
//!
//! minimize (or maximize) f(x)
//!
//! subject to gᵢ(x) ≤ 0, hⱼ(x) = 0
//!
//! with polynomial f, g, h, through two independent engines sharing one
//! problem model:
//!
//! - [`KktSolver`]: builds the Lagrangian symbolically, enumerates all
//!   2^m active-set patterns of the inequality constraints, solves each
//!   algebraic system (exactly over the rationals when affine), and
//!   verifies the Karush-Kuhn-Tucker conditions at every candidate.
//! - [`QpSolver`]: rewrites a quadratic program through its
//!   stationarity condition into an augmented linear tableau and runs a
//!   two-phase simplex over it, recording every pivot for audit.
//!
//! Infeasible, unbounded and budget-exhausted outcomes are reported as
//! statuses on the returned solution, never as panics or control-flow
//! errors.
//!
//! ```no_run
//! use karush::*;
//!
//! let problem = Problem::from_strings(
//!     &["x", "y"],
//!     "(x - 2)^2 + (y - 2)^2",
//!     Direction::Minimize,
//!     &[
//!         ("x + y - 2", ConstraintKind::Le),
//!         ("-x", ConstraintKind::Le),
//!         ("-y", ConstraintKind::Le),
//!     ],
//! )
//! .unwrap();
//!
//! let solver = KktSolver::<f64>::new(Settings::default()).unwrap();
//! let solution = solver.solve(&problem).unwrap();
//! assert!(solution.status.is_solved());
//! ```

pub mod algebra;
mod info_print;
pub mod kkt;
pub mod problem;
mod settings;
pub mod simplex;
mod solution;
pub mod symbolic;

#[cfg(feature = "serde")]
pub mod json;

pub use crate::settings::*;
pub use crate::solution::*;

// flattened names for the common entry points
pub use crate::kkt::{Candidate, KktError, KktSolver};
pub use crate::problem::{
    Constraint, ConstraintKind, Convexity, Direction, Problem, ProblemError, QpForm,
};
pub use crate::simplex::{PivotTrace, QpError, QpSolver};
pub use crate::symbolic::{NumericMethod, Value};
