#![allow(non_snake_case)]
use super::{FloatT, VectorMath};
use std::ops::{Index, IndexMut};

/// Dense matrix in column-major format.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Matrix<T = f64> {
    /// number of rows
    pub m: usize,
    /// number of columns
    pub n: usize,
    /// vector of data in column major format
    pub data: Vec<T>,
}

impl<T> Matrix<T>
where
    T: FloatT,
{
    pub fn zeros(size: (usize, usize)) -> Self {
        let (m, n) = size;
        let data = vec![T::zero(); m * n];
        Self { m, n, data }
    }

    pub fn identity(n: usize) -> Self {
        let mut mat = Matrix::zeros((n, n));
        for i in 0..n {
            mat[(i, i)] = T::one();
        }
        mat
    }

    pub fn new_from_slice(size: (usize, usize), src: &[T]) -> Self {
        let (m, n) = size;
        assert!(m * n == src.len());
        Self {
            m,
            n,
            data: src.to_vec(),
        }
    }

    /// Build from row-major nested slices, e.g. `from_rows(&[&[1., 2.], &[3., 4.]])`.
    pub fn from_rows(rows: &[&[T]]) -> Self {
        let m = rows.len();
        let n = if m == 0 { 0 } else { rows[0].len() };
        let mut mat = Matrix::zeros((m, n));
        for (i, row) in rows.iter().enumerate() {
            assert!(row.len() == n);
            for (j, &v) in row.iter().enumerate() {
                mat[(i, j)] = v;
            }
        }
        mat
    }

    pub fn size(&self) -> (usize, usize) {
        (self.m, self.n)
    }

    pub fn is_square(&self) -> bool {
        self.m == self.n
    }

    #[inline]
    fn index_linear(&self, idx: (usize, usize)) -> usize {
        idx.0 + self.m * idx.1
    }

    /// Extract a single row as a vector
    pub fn row(&self, i: usize) -> Vec<T> {
        (0..self.n).map(|j| self[(i, j)]).collect()
    }

    /// y = A*x
    pub fn gemv(&self, x: &[T]) -> Vec<T> {
        assert_eq!(x.len(), self.n);
        let mut y = vec![T::zero(); self.m];
        for j in 0..self.n {
            for i in 0..self.m {
                y[i] += self[(i, j)] * x[j];
            }
        }
        y
    }

    /// xᵀ*A*x for square A
    pub fn quad_form(&self, x: &[T]) -> T {
        assert!(self.is_square());
        x.dot(&self.gemv(x))
    }

    /// Check symmetry to within an absolute tolerance
    pub fn is_symmetric(&self, tol: T) -> bool {
        if !self.is_square() {
            return false;
        }
        for j in 0..self.n {
            for i in 0..j {
                if (self[(i, j)] - self[(j, i)]).abs() > tol {
                    return false;
                }
            }
        }
        true
    }
}

impl<T: FloatT> Index<(usize, usize)> for Matrix<T> {
    type Output = T;
    fn index(&self, idx: (usize, usize)) -> &Self::Output {
        &self.data[self.index_linear(idx)]
    }
}

impl<T: FloatT> IndexMut<(usize, usize)> for Matrix<T> {
    fn index_mut(&mut self, idx: (usize, usize)) -> &mut Self::Output {
        let lidx = self.index_linear(idx);
        &mut self.data[lidx]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gemv() {
        let A = Matrix::from_rows(&[&[1.0, 2.0], &[3.0, 4.0], &[5.0, 6.0]]);
        assert_eq!(A.size(), (3, 2));
        assert_eq!(A.gemv(&[1.0, 1.0]), vec![3.0, 7.0, 11.0]);
    }

    #[test]
    fn test_quad_form() {
        let D = Matrix::from_rows(&[&[2.0, 0.0], &[0.0, 2.0]]);
        assert_eq!(D.quad_form(&[1.0, 2.0]), 10.0);
        assert!(D.is_symmetric(0.0));
    }
}
