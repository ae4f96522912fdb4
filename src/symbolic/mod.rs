//! Exact symbolic layer: sparse rational polynomials, an expression
//! parser, and a small algebraic system solver.
//!
//! Everything upstream of the numeric engines works on
//! [`Polynomial`] values so that differentiation and affine solves stay
//! exact; floating point enters only through [`Value::Approximate`].

pub mod parse;
pub mod polynomial;
pub mod sysolve;
pub mod value;

pub use parse::*;
pub use polynomial::*;
pub use sysolve::*;
pub use value::*;
