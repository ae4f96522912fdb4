use thiserror::Error;

/// Error type returned by dense factorization routines.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FactorizationError {
    /// Matrix dimension fields and/or array lengths are incompatible
    #[error("Matrix dimension fields and/or array lengths are incompatible")]
    IncompatibleDimension,
    /// Pivot fell below the zero tolerance during elimination
    #[error("Matrix is singular to working precision")]
    Singular,
    /// Eigenvalue iteration failed to converge
    #[error("Eigendecomposition failed to converge")]
    EigenNonConvergence,
}
