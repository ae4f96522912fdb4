//! Dense linear algebra support for the solver.
//!
//! All problem data is small and dense, so the routines here favour
//! simplicity over cache performance.  Matrices are stored column-major.

mod dense;
mod eigen;
mod error_types;
mod floats;
mod lu;
mod vecmath;

pub use dense::*;
pub use eigen::*;
pub use error_types::*;
pub use floats::*;
pub use lu::*;
pub use vecmath::*;
