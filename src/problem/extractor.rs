#![allow(non_snake_case)]
use super::Problem;
use crate::algebra::{FloatT, Matrix, VectorMath};
use crate::symbolic::{rational_to_float, Polynomial};
use thiserror::Error;

/// Error type returned when a problem does not fit the quadratic form.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractionError {
    #[error("objective must be quadratic or lower degree")]
    NonQuadraticObjective,
    #[error("constraint {0} must be affine")]
    NonAffineConstraint(usize),
}

/// Matrix form of a quadratic program extracted from a [`Problem`]:
///
/// minimize `C·x + ½ xᵀDx + c₀`
/// subject to `A_eq x = b_eq`, `A_ineq x ≤ b_ineq`, `x ≥ 0`.
///
/// `D` is assembled symmetric by construction.  The `x ≥ 0` bounds are
/// implicit in this form and are not listed among the constraint rows.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QpForm<T> {
    pub C: Vec<T>,
    pub D: Matrix<T>,
    pub c0: T,
    pub A_eq: Matrix<T>,
    pub b_eq: Vec<T>,
    pub A_ineq: Matrix<T>,
    pub b_ineq: Vec<T>,
}

impl<T> QpForm<T>
where
    T: FloatT,
{
    /// Extract matrix data from a problem.
    ///
    /// A `Maximize` direction is folded into the objective here, so the
    /// engine downstream always minimizes.  Fails if the objective is
    /// not (at most) quadratic or any constraint is not affine.
    pub fn from_problem(problem: &Problem) -> Result<Self, ExtractionError> {
        let n = problem.nvars();
        let f = problem.minimized_objective();
        if !f.is_quadratic() {
            return Err(ExtractionError::NonQuadraticObjective);
        }

        for (idx, c) in problem.constraints().iter().enumerate() {
            if !c.expr.is_affine() {
                return Err(ExtractionError::NonAffineConstraint(idx));
            }
        }

        let C: Vec<T> = (0..n).map(|i| rational_to_float(&f.linear_coeff(i))).collect();
        let c0: T = rational_to_float(&f.constant_coeff());
        let D = hessian_matrix(&f);

        let (A_eq, b_eq) = affine_rows(&problem.equalities(), n);
        let (A_ineq, b_ineq) = affine_rows(&problem.inequalities(), n);

        Ok(Self {
            C,
            D,
            c0,
            A_eq,
            b_eq,
            A_ineq,
            b_ineq,
        })
    }

    /// Objective value `C·x + ½ xᵀDx + c₀` at a point.
    pub fn objective_value(&self, x: &[T]) -> T {
        let half = T::one() / (T::one() + T::one());
        self.C.dot(x) + half * self.D.quad_form(x) + self.c0
    }

    pub fn n_eq(&self) -> usize {
        self.A_eq.m
    }

    pub fn n_ineq(&self) -> usize {
        self.A_ineq.m
    }
}

/// Constant Hessian of a polynomial of degree at most two, assembled
/// symmetric.
pub fn hessian_matrix<T: FloatT>(f: &Polynomial) -> Matrix<T> {
    let n = f.nvars();
    let two = T::one() + T::one();
    let mut D = Matrix::<T>::zeros((n, n));
    for i in 0..n {
        D[(i, i)] = rational_to_float::<T>(&f.quad_coeff(i, i)) * two;
        for j in (i + 1)..n {
            let v = rational_to_float(&f.quad_coeff(i, j));
            D[(i, j)] = v;
            D[(j, i)] = v;
        }
    }
    D
}

// Rows `a·x ≤ b` (or `= b`) from standardized expressions `expr ⋛ 0`,
// i.e. `a` is the linear part and `b` the negated constant.
fn affine_rows<T: FloatT>(exprs: &[Polynomial], n: usize) -> (Matrix<T>, Vec<T>) {
    let m = exprs.len();
    let mut A = Matrix::<T>::zeros((m, n));
    let mut b = vec![T::zero(); m];
    for (i, g) in exprs.iter().enumerate() {
        for j in 0..n {
            A[(i, j)] = rational_to_float(&g.linear_coeff(j));
        }
        b[i] = -rational_to_float::<T>(&g.constant_coeff());
    }
    (A, b)
}
