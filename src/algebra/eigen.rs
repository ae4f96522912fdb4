#![allow(non_snake_case)]
use super::{AsFloatT, FactorizationError, FloatT, Matrix};

// Cyclic Jacobi sweeps are plenty for the small symmetric matrices
// produced by Hessian extraction.  Convergence is quadratic once the
// off-diagonal mass is small.
const MAX_SWEEPS: usize = 50;

/// Eigenvalues of a symmetric matrix by the cyclic Jacobi method.
///
/// Returns eigenvalues sorted in ascending order.  The input is copied;
/// only the lower/upper symmetric part is assumed consistent.
pub fn symmetric_eigenvalues<T: FloatT>(A: &Matrix<T>) -> Result<Vec<T>, FactorizationError> {
    if !A.is_square() {
        return Err(FactorizationError::IncompatibleDimension);
    }
    let n = A.n;
    if n == 0 {
        return Ok(Vec::new());
    }
    debug_assert!(A.is_symmetric(T::epsilon().sqrt()));
    let mut W = A.clone();

    let tol = T::epsilon() * off_diagonal_norm(&W).max(diagonal_norm(&W)).max(T::one());

    for _sweep in 0..MAX_SWEEPS {
        if off_diagonal_norm(&W) <= tol {
            let mut evs: Vec<T> = (0..n).map(|i| W[(i, i)]).collect();
            evs.sort_by(|a, b| a.partial_cmp(b).unwrap());
            return Ok(evs);
        }
        for p in 0..n {
            for q in (p + 1)..n {
                jacobi_rotate(&mut W, p, q);
            }
        }
    }
    Err(FactorizationError::EigenNonConvergence)
}

fn diagonal_norm<T: FloatT>(W: &Matrix<T>) -> T {
    let mut s = T::zero();
    for i in 0..W.n {
        s += W[(i, i)] * W[(i, i)];
    }
    s.sqrt()
}

fn off_diagonal_norm<T: FloatT>(W: &Matrix<T>) -> T {
    let mut s = T::zero();
    for j in 0..W.n {
        for i in 0..j {
            s += W[(i, j)] * W[(i, j)];
        }
    }
    (s + s).sqrt()
}

// Annihilate W[p,q] with a Givens rotation applied symmetrically.
fn jacobi_rotate<T: FloatT>(W: &mut Matrix<T>, p: usize, q: usize) {
    let apq = W[(p, q)];
    if apq == T::zero() {
        return;
    }
    let app = W[(p, p)];
    let aqq = W[(q, q)];

    let two: T = (2.0).as_T();
    let theta = (aqq - app) / (two * apq);
    // stable tangent of the rotation angle
    let t = {
        let sign = if theta >= T::zero() { T::one() } else { -T::one() };
        sign / (theta.abs() + (T::one() + theta * theta).sqrt())
    };
    let c = T::one() / (T::one() + t * t).sqrt();
    let s = t * c;

    let n = W.n;
    for k in 0..n {
        let wkp = W[(k, p)];
        let wkq = W[(k, q)];
        W[(k, p)] = c * wkp - s * wkq;
        W[(k, q)] = s * wkp + c * wkq;
    }
    for k in 0..n {
        let wpk = W[(p, k)];
        let wqk = W[(q, k)];
        W[(p, k)] = c * wpk - s * wqk;
        W[(q, k)] = s * wpk + c * wqk;
    }
}
