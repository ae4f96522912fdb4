use crate::algebra::FloatT;
use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{Signed, ToPrimitive, Zero};
use std::collections::BTreeMap;
use std::fmt;
use std::fmt::Write;
use std::ops::{Add, Mul, Neg, Sub};

/// Convert an exact rational to a floating point value.
pub fn rational_to_float<T: FloatT>(r: &BigRational) -> T {
    T::from_f64(r.to_f64().unwrap_or(f64::NAN)).unwrap_or_else(T::nan)
}

/// Exact rational from an integer.
pub fn rational_from_int(v: i64) -> BigRational {
    BigRational::from_integer(BigInt::from(v))
}

/// A power product of the problem variables, e.g. x₀²x₂.
///
/// Monomials over the same variable count are totally ordered by their
/// exponent vectors, which fixes a deterministic term order for every
/// polynomial in the solver.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Monomial {
    exps: Vec<u32>,
}

impl Monomial {
    pub fn constant(nvars: usize) -> Self {
        Self {
            exps: vec![0; nvars],
        }
    }

    pub fn variable(nvars: usize, i: usize) -> Self {
        assert!(i < nvars);
        let mut exps = vec![0; nvars];
        exps[i] = 1;
        Self { exps }
    }

    pub fn exponent(&self, i: usize) -> u32 {
        self.exps[i]
    }

    /// Total degree.
    pub fn degree(&self) -> u32 {
        self.exps.iter().sum()
    }

    pub fn is_constant(&self) -> bool {
        self.degree() == 0
    }

    fn product(&self, other: &Self) -> Self {
        assert_eq!(self.exps.len(), other.exps.len());
        let exps = self
            .exps
            .iter()
            .zip(other.exps.iter())
            .map(|(a, b)| a + b)
            .collect();
        Self { exps }
    }
}

/// Sparse multivariate polynomial with exact rational coefficients.
///
/// This is the algebraic currency of the solver.  Objectives and
/// constraints are stored in this form, stationarity equations are
/// produced by [`diff`](Polynomial::diff), and the case solver hands
/// systems of these to the system solver.  Zero coefficients are never
/// stored, so `terms` is a canonical representation and equality of
/// polynomials is structural equality.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Polynomial {
    nvars: usize,
    // serialized as a pair list since JSON maps only take string keys
    #[cfg_attr(feature = "serde", serde(with = "terms_as_pairs"))]
    terms: BTreeMap<Monomial, BigRational>,
}

#[cfg(feature = "serde")]
mod terms_as_pairs {
    use super::Monomial;
    use num_rational::BigRational;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::collections::BTreeMap;

    pub fn serialize<S>(
        terms: &BTreeMap<Monomial, BigRational>,
        serializer: S,
    ) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        terms.iter().collect::<Vec<_>>().serialize(serializer)
    }

    pub fn deserialize<'de, D>(
        deserializer: D,
    ) -> Result<BTreeMap<Monomial, BigRational>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let pairs = Vec::<(Monomial, BigRational)>::deserialize(deserializer)?;
        Ok(pairs.into_iter().collect())
    }
}

impl Polynomial {
    pub fn zero(nvars: usize) -> Self {
        Self {
            nvars,
            terms: BTreeMap::new(),
        }
    }

    pub fn constant(nvars: usize, c: BigRational) -> Self {
        let mut p = Self::zero(nvars);
        p.add_term(Monomial::constant(nvars), c);
        p
    }

    pub fn from_int(nvars: usize, v: i64) -> Self {
        Self::constant(nvars, rational_from_int(v))
    }

    pub fn variable(nvars: usize, i: usize) -> Self {
        let mut p = Self::zero(nvars);
        p.add_term(Monomial::variable(nvars, i), rational_from_int(1));
        p
    }

    pub fn nvars(&self) -> usize {
        self.nvars
    }

    pub fn is_zero(&self) -> bool {
        self.terms.is_empty()
    }

    /// Total degree; zero for the zero polynomial.
    pub fn degree(&self) -> u32 {
        self.terms.keys().map(Monomial::degree).max().unwrap_or(0)
    }

    pub fn is_affine(&self) -> bool {
        self.degree() <= 1
    }

    pub fn is_quadratic(&self) -> bool {
        self.degree() <= 2
    }

    pub fn terms(&self) -> impl Iterator<Item = (&Monomial, &BigRational)> {
        self.terms.iter()
    }

    /// Coefficient of a monomial, zero if absent.
    pub fn coeff(&self, mono: &Monomial) -> BigRational {
        self.terms.get(mono).cloned().unwrap_or_else(BigRational::zero)
    }

    pub fn constant_coeff(&self) -> BigRational {
        self.coeff(&Monomial::constant(self.nvars))
    }

    pub fn linear_coeff(&self, i: usize) -> BigRational {
        self.coeff(&Monomial::variable(self.nvars, i))
    }

    /// Coefficient of the degree-two monomial xᵢxⱼ (or xᵢ² when `i == j`).
    pub fn quad_coeff(&self, i: usize, j: usize) -> BigRational {
        let mono =
            Monomial::variable(self.nvars, i).product(&Monomial::variable(self.nvars, j));
        self.coeff(&mono)
    }

    /// Add `coeff * mono` to the polynomial, keeping the zero-free invariant.
    pub fn add_term(&mut self, mono: Monomial, coeff: BigRational) {
        if coeff.is_zero() {
            return;
        }
        let sum = self.coeff(&mono) + coeff;
        if sum.is_zero() {
            self.terms.remove(&mono);
        } else {
            self.terms.insert(mono, sum);
        }
    }

    pub fn scale(&self, c: &BigRational) -> Self {
        let mut out = Self::zero(self.nvars);
        for (m, a) in &self.terms {
            out.add_term(m.clone(), a * c);
        }
        out
    }

    pub fn pow(&self, e: u32) -> Self {
        let mut out = Self::from_int(self.nvars, 1);
        for _ in 0..e {
            out = &out * self;
        }
        out
    }

    /// The same polynomial over a wider variable space; new variables
    /// are appended after the existing ones with zero exponents.
    pub fn lifted(&self, nvars: usize) -> Self {
        assert!(nvars >= self.nvars);
        let mut out = Self::zero(nvars);
        for (m, c) in &self.terms {
            let mut exps: Vec<u32> = (0..self.nvars).map(|k| m.exponent(k)).collect();
            exps.resize(nvars, 0);
            out.add_term(Monomial { exps }, c.clone());
        }
        out
    }

    /// Partial derivative with respect to variable `i`.
    pub fn diff(&self, i: usize) -> Self {
        let mut out = Self::zero(self.nvars);
        for (m, c) in &self.terms {
            let e = m.exponent(i);
            if e == 0 {
                continue;
            }
            let mut exps: Vec<u32> = (0..self.nvars).map(|k| m.exponent(k)).collect();
            exps[i] = e - 1;
            let dm = Monomial { exps };
            out.add_term(dm, c * rational_from_int(i64::from(e)));
        }
        out
    }

    /// Gradient as one polynomial per variable.
    pub fn gradient(&self) -> Vec<Polynomial> {
        (0..self.nvars).map(|i| self.diff(i)).collect()
    }

    /// Exact evaluation at a rational point.
    pub fn eval_exact(&self, point: &[BigRational]) -> BigRational {
        assert_eq!(point.len(), self.nvars);
        let mut acc = BigRational::zero();
        for (m, c) in &self.terms {
            let mut term = c.clone();
            for (i, v) in point.iter().enumerate() {
                for _ in 0..m.exponent(i) {
                    term *= v;
                }
            }
            acc += term;
        }
        acc
    }

    /// Floating point evaluation.
    pub fn eval<T: FloatT>(&self, point: &[T]) -> T {
        assert_eq!(point.len(), self.nvars);
        let mut acc = T::zero();
        for (m, c) in &self.terms {
            let mut term: T = rational_to_float(c);
            for (i, v) in point.iter().enumerate() {
                for _ in 0..m.exponent(i) {
                    term *= *v;
                }
            }
            acc += term;
        }
        acc
    }

    /// Render with caller-supplied variable names.
    pub fn display_with(&self, names: &[&str]) -> String {
        assert_eq!(names.len(), self.nvars);
        if self.terms.is_empty() {
            return "0".into();
        }
        let mut out = String::new();
        // highest monomials first reads more naturally
        for (idx, (m, c)) in self.terms.iter().rev().enumerate() {
            let neg = c.is_negative();
            if idx == 0 {
                if neg {
                    out.push('-');
                }
            } else if neg {
                out.push_str(" - ");
            } else {
                out.push_str(" + ");
            }
            let mag = c.abs();
            let unit_coeff = mag == rational_from_int(1);
            if !unit_coeff || m.is_constant() {
                let _ = write!(out, "{}", mag);
            }
            let mut first_var = !unit_coeff || m.is_constant();
            for i in 0..self.nvars {
                let e = m.exponent(i);
                if e == 0 {
                    continue;
                }
                if first_var {
                    out.push('*');
                }
                first_var = true;
                out.push_str(names[i]);
                if e > 1 {
                    let _ = write!(out, "^{}", e);
                }
            }
        }
        out
    }
}

impl fmt::Display for Polynomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<String> = (0..self.nvars).map(|i| format!("x{}", i)).collect();
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        write!(f, "{}", self.display_with(&refs))
    }
}

impl Add for &Polynomial {
    type Output = Polynomial;
    fn add(self, rhs: &Polynomial) -> Polynomial {
        assert_eq!(self.nvars, rhs.nvars);
        let mut out = self.clone();
        for (m, c) in &rhs.terms {
            out.add_term(m.clone(), c.clone());
        }
        out
    }
}

impl Sub for &Polynomial {
    type Output = Polynomial;
    fn sub(self, rhs: &Polynomial) -> Polynomial {
        assert_eq!(self.nvars, rhs.nvars);
        let mut out = self.clone();
        for (m, c) in &rhs.terms {
            out.add_term(m.clone(), -c);
        }
        out
    }
}

impl Mul for &Polynomial {
    type Output = Polynomial;
    fn mul(self, rhs: &Polynomial) -> Polynomial {
        assert_eq!(self.nvars, rhs.nvars);
        let mut out = Polynomial::zero(self.nvars);
        for (ma, ca) in &self.terms {
            for (mb, cb) in &rhs.terms {
                out.add_term(ma.product(mb), ca * cb);
            }
        }
        out
    }
}

impl Neg for &Polynomial {
    type Output = Polynomial;
    fn neg(self) -> Polynomial {
        self.scale(&rational_from_int(-1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn x(i: usize) -> Polynomial {
        Polynomial::variable(2, i)
    }

    #[test]
    fn test_arithmetic_and_degree() {
        // (x + y)^2 = x^2 + 2xy + y^2
        let s = &x(0) + &x(1);
        let sq = &s * &s;
        assert_eq!(sq.degree(), 2);
        assert_eq!(sq.quad_coeff(0, 0), rational_from_int(1));
        assert_eq!(sq.quad_coeff(0, 1), rational_from_int(2));
        assert_eq!(sq.quad_coeff(1, 1), rational_from_int(1));
        assert!(sq.is_quadratic());
        assert!(!sq.is_affine());
    }

    #[test]
    fn test_cancellation_keeps_terms_sparse() {
        let p = &x(0) - &x(0);
        assert!(p.is_zero());
        assert_eq!(p.degree(), 0);
    }

    #[test]
    fn test_diff() {
        // d/dx (x^2*y + 3x) = 2xy + 3
        let p = &(&x(0).pow(2) * &x(1)) + &x(0).scale(&rational_from_int(3));
        let d = p.diff(0);
        assert_eq!(d.quad_coeff(0, 1), rational_from_int(2));
        assert_eq!(d.constant_coeff(), rational_from_int(3));
        assert_eq!(d.degree(), 2);
    }

    #[test]
    fn test_eval() {
        // f = x^2 + y^2 - 2 at (1, 2) is 3
        let p = &(&x(0).pow(2) + &x(1).pow(2)) + &Polynomial::from_int(2, -2);
        let pt = [rational_from_int(1), rational_from_int(2)];
        assert_eq!(p.eval_exact(&pt), rational_from_int(3));
        assert!(f64::abs(p.eval(&[1.0, 2.0]) - 3.0) <= 1e-14);
    }

    #[test]
    fn test_display() {
        let p = &(&x(0).pow(2) - &x(1).scale(&rational_from_int(2)))
            + &Polynomial::from_int(2, 1);
        assert_eq!(p.display_with(&["x", "y"]), "x^2 - 2*y + 1");
    }
}
