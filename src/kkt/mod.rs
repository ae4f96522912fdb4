//! Analytical KKT solver: Lagrangian construction, active-set case
//! enumeration, and candidate verification.

mod candidate;
mod case_solver;
mod lagrangian;

pub use candidate::*;
pub use case_solver::*;
pub use lagrangian::*;
