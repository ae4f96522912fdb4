//! Two-phase simplex engine over the augmented KKT tableau of a
//! quadratic program, with a full pivot-by-pivot audit trail.

mod engine;
mod tableau;
mod trace;

pub use engine::*;
pub use tableau::*;
pub use trace::*;
