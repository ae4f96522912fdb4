#![allow(non_snake_case)]
use crate::algebra::{symmetric_eigenvalues, FactorizationError, FloatT, Matrix};

/// Curvature classification of a quadratic objective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Convexity {
    /// all Hessian eigenvalues ≥ −ε, global optimality certificates hold
    Convex,
    /// some eigenvalue is negative, any point found is only stationary
    NonConvex,
}

/// Eigenvalue report for the Hessian `D` of a quadratic objective.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConvexityReport<T> {
    pub eigenvalues: Vec<T>,
    pub convexity: Convexity,
}

impl<T> ConvexityReport<T>
where
    T: FloatT,
{
    /// Classify `D` by its eigenvalue of smallest value.
    pub fn analyze(D: &Matrix<T>, eps: T) -> Result<Self, FactorizationError> {
        let eigenvalues = symmetric_eigenvalues(D)?;
        let min_ev = eigenvalues.first().copied().unwrap_or_else(T::zero);
        let convexity = if min_ev >= -eps {
            Convexity::Convex
        } else {
            Convexity::NonConvex
        };
        Ok(Self {
            eigenvalues,
            convexity,
        })
    }

    pub fn is_convex(&self) -> bool {
        self.convexity == Convexity::Convex
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convex_psd() {
        let D = Matrix::from_rows(&[&[2.0, 0.0], &[0.0, 0.0]]);
        let report = ConvexityReport::analyze(&D, 1e-9).unwrap();
        assert!(report.is_convex());
    }

    #[test]
    fn test_nonconvex_indefinite() {
        let D = Matrix::from_rows(&[&[0.0, 1.0], &[1.0, 0.0]]);
        let report = ConvexityReport::analyze(&D, 1e-9).unwrap();
        assert_eq!(report.convexity, Convexity::NonConvex);
        assert!(f64::abs(report.eigenvalues[0] + 1.0) <= 1e-9);
    }
}
