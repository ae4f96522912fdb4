use super::polynomial::rational_to_float;
use crate::algebra::FloatT;
use num_rational::BigRational;
use std::fmt;

/// Numeric procedure that produced an approximate value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NumericMethod {
    /// Floating point elimination or pivoting on a linear system.
    LinearSolve,
    /// Damped Newton iteration on a nonlinear system.
    Newton,
}

/// A solver output value together with its provenance.
///
/// Values resolved by exact rational elimination are carried as
/// [`Exact`](Value::Exact) rationals; anything that passed through
/// floating point arithmetic is tagged [`Approximate`](Value::Approximate)
/// with the method that produced it.  Callers can therefore distinguish
/// a certified algebraic answer from a numerically converged one.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Value<T> {
    Exact(BigRational),
    Approximate(T, NumericMethod),
}

impl<T> Value<T>
where
    T: FloatT,
{
    pub fn exact_int(v: i64) -> Self {
        Value::Exact(BigRational::from_integer(v.into()))
    }

    pub fn to_float(&self) -> T {
        match self {
            Value::Exact(r) => rational_to_float(r),
            Value::Approximate(v, _) => *v,
        }
    }

    pub fn is_exact(&self) -> bool {
        matches!(self, Value::Exact(_))
    }

    pub fn method(&self) -> Option<NumericMethod> {
        match self {
            Value::Exact(_) => None,
            Value::Approximate(_, m) => Some(*m),
        }
    }
}

impl<T> fmt::Display for Value<T>
where
    T: FloatT,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Exact(r) => write!(f, "{}", r),
            Value::Approximate(v, _) => write!(f, "{}", v),
        }
    }
}
