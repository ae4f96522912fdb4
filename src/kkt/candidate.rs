use crate::algebra::FloatT;
use crate::symbolic::Value;

/// One enumerated active-set case that had an algebraic solution.
///
/// Candidates are immutable once created.  The verification flags are
/// recorded individually so callers can explain why a case was ruled
/// out, not just that it was.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Candidate<T> {
    /// active-set bit pattern, bit i set ⇔ inequality i active
    pub mask: u64,
    pub x: Vec<Value<T>>,
    /// inequality multipliers λ
    pub lambda: Vec<Value<T>>,
    /// equality multipliers μ
    pub mu: Vec<Value<T>>,
    /// objective value in the problem's own direction
    pub objective: T,
    pub primal_feasible: bool,
    pub dual_feasible: bool,
    pub complementary: bool,
}

impl<T> Candidate<T>
where
    T: FloatT,
{
    /// All four KKT conditions hold at this candidate.
    pub fn is_valid(&self) -> bool {
        self.primal_feasible && self.dual_feasible && self.complementary
    }

    /// Indices of the active inequalities.
    pub fn active_set(&self) -> Vec<usize> {
        (0..self.lambda.len())
            .filter(|i| self.mask & (1u64 << i) != 0)
            .collect()
    }

    /// Whether every component was resolved exactly.
    pub fn is_exact(&self) -> bool {
        self.x.iter().all(Value::is_exact)
            && self.lambda.iter().all(Value::is_exact)
            && self.mu.iter().all(Value::is_exact)
    }
}
