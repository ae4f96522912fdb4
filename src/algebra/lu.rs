#![allow(non_snake_case)]
use super::{FactorizationError, FloatT, Matrix};

/// Dense LU factorization with partial pivoting.
///
/// Factors a square matrix in place as PA = LU and solves Ax = b by
/// forward/backward substitution.  Each Newton step goes through here.
pub struct LuFactors<T> {
    LU: Matrix<T>,
    perm: Vec<usize>,
}

impl<T> LuFactors<T>
where
    T: FloatT,
{
    pub fn new(A: &Matrix<T>, zero_tol: T) -> Result<Self, FactorizationError> {
        if !A.is_square() {
            return Err(FactorizationError::IncompatibleDimension);
        }
        let n = A.n;
        let mut LU = A.clone();
        let mut perm: Vec<usize> = (0..n).collect();

        for k in 0..n {
            // partial pivot: largest magnitude on or below the diagonal
            let mut p = k;
            let mut pmax = LU[(k, k)].abs();
            for i in (k + 1)..n {
                let v = LU[(i, k)].abs();
                if v > pmax {
                    pmax = v;
                    p = i;
                }
            }
            if pmax <= zero_tol {
                return Err(FactorizationError::Singular);
            }
            if p != k {
                for j in 0..n {
                    let tmp = LU[(k, j)];
                    LU[(k, j)] = LU[(p, j)];
                    LU[(p, j)] = tmp;
                }
                perm.swap(k, p);
            }
            for i in (k + 1)..n {
                let factor = LU[(i, k)] / LU[(k, k)];
                LU[(i, k)] = factor;
                for j in (k + 1)..n {
                    let upd = LU[(k, j)] * factor;
                    LU[(i, j)] -= upd;
                }
            }
        }
        Ok(Self { LU, perm })
    }

    pub fn solve(&self, b: &[T]) -> Vec<T> {
        let n = self.LU.n;
        assert_eq!(b.len(), n);

        // forward substitution on the permuted rhs
        let mut y: Vec<T> = self.perm.iter().map(|&pi| b[pi]).collect();
        for i in 1..n {
            for j in 0..i {
                let upd = self.LU[(i, j)] * y[j];
                y[i] -= upd;
            }
        }
        // backward substitution
        for i in (0..n).rev() {
            for j in (i + 1)..n {
                let upd = self.LU[(i, j)] * y[j];
                y[i] -= upd;
            }
            y[i] /= self.LU[(i, i)];
        }
        y
    }
}

/// One-shot dense solve of Ax = b.
pub fn lu_solve<T: FloatT>(
    A: &Matrix<T>,
    b: &[T],
    zero_tol: T,
) -> Result<Vec<T>, FactorizationError> {
    Ok(LuFactors::new(A, zero_tol)?.solve(b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algebra::VectorMath;

    #[test]
    fn test_lu_solve() {
        // zero leading entry forces a row swap on the first pivot
        let A = Matrix::from_rows(&[&[0.0, 2.0, 1.0], &[1.0, 1.0, 1.0], &[2.0, 0.0, -1.0]]);
        let b = [4.0, 3.5, 1.0];
        let x = lu_solve(&A, &b, 1e-12).unwrap();
        assert!(x.dist(&[1.0, 1.5, 1.0]) <= 1e-12);
    }

    #[test]
    fn test_lu_singular() {
        let A = Matrix::from_rows(&[&[1.0, 2.0], &[2.0, 4.0]]);
        assert_eq!(
            lu_solve(&A, &[1.0, 2.0], 1e-12),
            Err(FactorizationError::Singular)
        );
    }
}
