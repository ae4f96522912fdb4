//! Problem model shared by both solver paths: variable bookkeeping,
//! constraint standardization, matrix extraction, and convexity
//! analysis.

mod convexity;
mod core;
mod extractor;
mod variables;

pub use convexity::*;
pub use core::*;
pub use extractor::*;
pub use variables::*;
