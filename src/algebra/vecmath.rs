use super::FloatT;
use itertools::izip;
use std::iter::zip;

/// Math operations on slices of [`FloatT`](crate::algebra::FloatT) values.
pub trait VectorMath {
    type T;

    /// Apply an elementwise operation to a vector.
    fn scalarop(&mut self, op: impl Fn(Self::T) -> Self::T) -> &mut Self;

    /// Multiply all elements by a constant
    fn scale(&mut self, c: Self::T) -> &mut Self;

    /// Negate all elements
    fn negate(&mut self) -> &mut Self;

    /// Standard inner product
    fn dot(&self, y: &[Self::T]) -> Self::T;

    /// 2-norm of the vector distance to another vector
    fn dist(&self, y: &[Self::T]) -> Self::T;

    /// Euclidean norm
    fn norm(&self) -> Self::T;

    /// Infinity norm
    fn norm_inf(&self) -> Self::T;

    /// self = a*x + b*self
    fn axpby(&mut self, a: Self::T, x: &[Self::T], b: Self::T) -> &mut Self;
}

impl<T: FloatT> VectorMath for [T] {
    type T = T;

    fn scalarop(&mut self, op: impl Fn(T) -> T) -> &mut Self {
        for x in &mut *self {
            *x = op(*x);
        }
        self
    }

    fn scale(&mut self, c: T) -> &mut Self {
        self.scalarop(|x| x * c)
    }

    fn negate(&mut self) -> &mut Self {
        self.scalarop(|x| -x)
    }

    fn dot(&self, y: &[T]) -> T {
        assert_eq!(self.len(), y.len());
        zip(self, y).fold(T::zero(), |acc, (&x, &y)| acc + x * y)
    }

    fn dist(&self, y: &[T]) -> T {
        let dist2 = zip(self, y).fold(T::zero(), |acc, (&x, &y)| {
            let d = x - y;
            acc + d * d
        });
        T::sqrt(dist2)
    }

    fn norm(&self) -> T {
        T::sqrt(self.dot(self))
    }

    fn norm_inf(&self) -> T {
        let mut out = T::zero();
        for v in self.iter().map(|v| v.abs()) {
            out = if v > out { v } else { out };
        }
        out
    }

    fn axpby(&mut self, a: T, x: &[T], b: T) -> &mut Self {
        assert_eq!(self.len(), x.len());
        for (y, x) in izip!(&mut *self, x) {
            *y = a * *x + b * *y;
        }
        self
    }
}
