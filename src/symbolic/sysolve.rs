#![allow(non_snake_case)]
use super::polynomial::Polynomial;
use super::value::{NumericMethod, Value};
use crate::algebra::{lu_solve, FloatT, Matrix, VectorMath};
use num_rational::BigRational;
use num_traits::Zero;

/// Controls for the damped Newton iteration used on nonlinear systems.
#[derive(Debug, Clone)]
pub struct NewtonControls<T> {
    /// iteration limit per starting point
    pub max_iter: u32,
    /// infinity-norm residual threshold for convergence
    pub tol: T,
    /// smallest damping factor tried before a step is abandoned
    pub min_step: T,
}

/// Solve a square system of polynomial equations `eqs = 0`.
///
/// Affine systems are eliminated exactly over the rationals and yield
/// [`Value::Exact`] components.  Anything nonlinear goes through a
/// damped Newton iteration from a few fixed starting points and yields
/// [`Value::Approximate`] components.  A system that is not square, is
/// singular, or fails to converge produces `None`; the caller treats
/// that as "no candidate here", not as an error.
pub fn solve_system<T>(
    eqs: &[Polynomial],
    newton: &NewtonControls<T>,
    zero_tol: T,
) -> Option<Vec<Value<T>>>
where
    T: FloatT,
{
    let n = match eqs.first() {
        Some(p) => p.nvars(),
        None => return Some(Vec::new()),
    };
    if eqs.len() != n || eqs.iter().any(|p| p.nvars() != n) {
        return None;
    }

    if eqs.iter().all(Polynomial::is_affine) {
        let sol = solve_affine_exact(eqs)?;
        return Some(sol.into_iter().map(Value::Exact).collect());
    }

    // nonlinear path: a handful of deterministic starting points
    let starts: [T; 3] = [T::zero(), T::one(), -T::one()];
    for s in starts {
        let x0 = vec![s; n];
        if let Some(x) = newton_from(eqs, x0, newton, zero_tol) {
            return Some(
                x.into_iter()
                    .map(|v| Value::Approximate(v, NumericMethod::Newton))
                    .collect(),
            );
        }
    }
    None
}

/// Exact Gaussian elimination of a square affine system over ℚ.
///
/// Returns `None` when the system is singular; an underdetermined
/// system has no isolated solution and is treated the same way.
pub fn solve_affine_exact(eqs: &[Polynomial]) -> Option<Vec<BigRational>> {
    let n = eqs.len();
    let mut A: Vec<Vec<BigRational>> = eqs
        .iter()
        .map(|p| (0..n).map(|j| p.linear_coeff(j)).collect())
        .collect();
    let mut b: Vec<BigRational> = eqs.iter().map(|p| -p.constant_coeff()).collect();

    for k in 0..n {
        // any nonzero pivot is exact; take the first for determinism
        let pivot_row = (k..n).find(|&r| !A[r][k].is_zero())?;
        A.swap(k, pivot_row);
        b.swap(k, pivot_row);
        for i in (k + 1)..n {
            if A[i][k].is_zero() {
                continue;
            }
            let factor = &A[i][k] / &A[k][k];
            for j in k..n {
                let upd = &factor * &A[k][j];
                A[i][j] -= upd;
            }
            let upd = &factor * &b[k];
            b[i] -= upd;
        }
    }

    let mut x = vec![BigRational::zero(); n];
    for i in (0..n).rev() {
        let mut acc = b[i].clone();
        for j in (i + 1)..n {
            acc -= &A[i][j] * &x[j];
        }
        x[i] = acc / &A[i][i];
    }
    Some(x)
}

fn newton_from<T>(
    eqs: &[Polynomial],
    mut x: Vec<T>,
    controls: &NewtonControls<T>,
    zero_tol: T,
) -> Option<Vec<T>>
where
    T: FloatT,
{
    let n = eqs.len();
    let jac: Vec<Vec<Polynomial>> = eqs.iter().map(Polynomial::gradient).collect();
    let half = T::one() / (T::one() + T::one());

    let mut fx: Vec<T> = eqs.iter().map(|p| p.eval(&x)).collect();
    for _ in 0..controls.max_iter {
        if fx.norm_inf() <= controls.tol {
            return Some(x);
        }
        let mut J = Matrix::<T>::zeros((n, n));
        for (i, row) in jac.iter().enumerate() {
            for (j, p) in row.iter().enumerate() {
                J[(i, j)] = p.eval(&x);
            }
        }
        let mut rhs = fx.clone();
        rhs.negate();
        let dx = lu_solve(&J, &rhs, zero_tol).ok()?;

        // backtracking line search on the residual norm
        let fnorm = fx.norm();
        let mut alpha = T::one();
        loop {
            let mut trial = x.clone();
            trial.axpby(alpha, &dx, T::one());
            let ftrial: Vec<T> = eqs.iter().map(|p| p.eval(&trial)).collect();
            if ftrial.norm() < fnorm {
                x = trial;
                fx = ftrial;
                break;
            }
            alpha *= half;
            if alpha < controls.min_step {
                return None;
            }
        }
    }
    if fx.norm_inf() <= controls.tol {
        Some(x)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbolic::parse_polynomial;
    use crate::symbolic::polynomial::rational_from_int;

    fn controls() -> NewtonControls<f64> {
        NewtonControls {
            max_iter: 50,
            tol: 1e-10,
            min_step: 1e-8,
        }
    }

    #[test]
    fn test_affine_exact() {
        let eqs = [
            parse_polynomial("x + y - 3", &["x", "y"]).unwrap(),
            parse_polynomial("x - y - 1", &["x", "y"]).unwrap(),
        ];
        let sol = solve_system::<f64>(&eqs, &controls(), 1e-12).unwrap();
        assert!(sol.iter().all(Value::is_exact));
        assert_eq!(sol[0], Value::Exact(rational_from_int(2)));
        assert_eq!(sol[1], Value::Exact(rational_from_int(1)));
    }

    #[test]
    fn test_affine_singular() {
        let eqs = [
            parse_polynomial("x + y - 1", &["x", "y"]).unwrap(),
            parse_polynomial("2*x + 2*y - 2", &["x", "y"]).unwrap(),
        ];
        assert!(solve_system::<f64>(&eqs, &controls(), 1e-12).is_none());
    }

    #[test]
    fn test_nonlinear_newton() {
        let eqs = [
            parse_polynomial("x^2 + y^2 - 4", &["x", "y"]).unwrap(),
            parse_polynomial("x - y", &["x", "y"]).unwrap(),
        ];
        let sol = solve_system::<f64>(&eqs, &controls(), 1e-12).unwrap();
        assert!(sol.iter().all(|v| !v.is_exact()));
        let x = sol[0].to_float();
        let y = sol[1].to_float();
        assert!(f64::abs(x - y) <= 1e-8);
        assert!(f64::abs(x * x + y * y - 4.0) <= 1e-8);
    }

    #[test]
    fn test_not_square_is_no_candidate() {
        let eqs = [parse_polynomial("x + y", &["x", "y"]).unwrap()];
        assert!(solve_system::<f64>(&eqs, &controls(), 1e-12).is_none());
    }
}
