use super::TableauSnapshot;
use crate::algebra::{FloatT, VectorMath};
use crate::problem::VariableId;

/// Dense simplex tableau in row-reduced form.
///
/// Invariants: `basis` names exactly one variable per row, the column
/// of a basic variable is a unit column, and `rhs` stays non-negative
/// from the moment a phase starts.  `objective` is the reduced cost
/// row of whichever phase is running and `objective_value` tracks the
/// negated phase objective at the current basic solution, so pivots
/// update it with the same elimination rule as any other row.
#[derive(Debug, Clone)]
pub struct Tableau<T> {
    pub columns: Vec<VariableId>,
    pub basis: Vec<VariableId>,
    pub rows: Vec<Vec<T>>,
    pub rhs: Vec<T>,
    pub objective: Vec<T>,
    pub objective_value: T,
}

impl<T> Tableau<T>
where
    T: FloatT,
{
    pub fn nrows(&self) -> usize {
        self.rows.len()
    }

    pub fn ncols(&self) -> usize {
        self.columns.len()
    }

    /// Value of a variable at the current basic solution.
    pub fn value_of(&self, var: VariableId) -> T {
        match self.basis.iter().position(|&b| b == var) {
            Some(r) => self.rhs[r],
            None => T::zero(),
        }
    }

    /// Dantzig entering rule: most negative reduced cost below `-eps`,
    /// lowest column index on ties.  Artificial columns never re-enter.
    pub fn find_entering(&self, eps: T) -> Option<usize> {
        let mut best: Option<(usize, T)> = None;
        for (j, &c) in self.objective.iter().enumerate() {
            if self.columns[j].is_artificial() {
                continue;
            }
            if c < -eps {
                match best {
                    Some((_, bc)) if c >= bc => {}
                    _ => best = Some((j, c)),
                }
            }
        }
        best.map(|(j, _)| j)
    }

    /// Minimum-ratio leaving rule over rows with a positive entry in
    /// the entering column, lowest row index on ties.  `None` means the
    /// entering column is an unbounded ray.
    pub fn find_leaving(&self, col: usize, eps: T) -> Option<usize> {
        let mut best: Option<(usize, T)> = None;
        for r in 0..self.nrows() {
            let a = self.rows[r][col];
            if a <= eps {
                continue;
            }
            let ratio = self.rhs[r] / a;
            match best {
                Some((_, br)) if ratio >= br => {}
                _ => best = Some((r, ratio)),
            }
        }
        best.map(|(r, _)| r)
    }

    /// Gauss-Jordan pivot on `(row, col)`; the column's variable
    /// becomes basic in that row.
    pub fn pivot(&mut self, row: usize, col: usize) {
        let p = self.rows[row][col];
        let pinv = p.recip();
        self.rows[row].scale(pinv);
        self.rhs[row] *= pinv;

        for r in 0..self.nrows() {
            if r == row {
                continue;
            }
            let factor = self.rows[r][col];
            if factor == T::zero() {
                continue;
            }
            let prow = self.rows[row].clone();
            self.rows[r].axpby(-factor, &prow, T::one());
            let upd = factor * self.rhs[row];
            self.rhs[r] -= upd;
        }

        let factor = self.objective[col];
        if factor != T::zero() {
            let prow = self.rows[row].clone();
            self.objective.axpby(-factor, &prow, T::one());
            self.objective_value -= factor * self.rhs[row];
        }

        self.basis[row] = self.columns[col];
    }

    pub fn snapshot(&self) -> TableauSnapshot<T> {
        TableauSnapshot {
            columns: self.columns.clone(),
            basis: self.basis.clone(),
            rows: self.rows.clone(),
            rhs: self.rhs.clone(),
            objective: self.objective.clone(),
            objective_value: self.objective_value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lp_tableau() -> Tableau<f64> {
        // max x1 + x2 as min -x1 - x2 st x1 + 2x2 <= 4, 3x1 + 2x2 <= 6
        Tableau {
            columns: vec![
                VariableId::Decision(0),
                VariableId::Decision(1),
                VariableId::Slack(0),
                VariableId::Slack(1),
            ],
            basis: vec![VariableId::Slack(0), VariableId::Slack(1)],
            rows: vec![vec![1.0, 2.0, 1.0, 0.0], vec![3.0, 2.0, 0.0, 1.0]],
            rhs: vec![4.0, 6.0],
            objective: vec![-1.0, -1.0, 0.0, 0.0],
            objective_value: 0.0,
        }
    }

    #[test]
    fn test_entering_lowest_index_on_tie() {
        let t = lp_tableau();
        assert_eq!(t.find_entering(1e-9), Some(0));
    }

    #[test]
    fn test_leaving_min_ratio() {
        let t = lp_tableau();
        // ratios 4/1 and 6/3, row 1 wins
        assert_eq!(t.find_leaving(0, 1e-9), Some(1));
    }

    #[test]
    fn test_pivot_to_optimum() {
        let mut t = lp_tableau();
        while let Some(col) = t.find_entering(1e-9) {
            let row = t.find_leaving(col, 1e-9).unwrap();
            t.pivot(row, col);
        }
        // optimum at x = (1, 1.5), cost -2.5 stored negated
        assert!(f64::abs(t.value_of(VariableId::Decision(0)) - 1.0) <= 1e-12);
        assert!(f64::abs(t.value_of(VariableId::Decision(1)) - 1.5) <= 1e-12);
        assert!(f64::abs(t.objective_value - 2.5) <= 1e-12);
    }

    #[test]
    fn test_unbounded_column() {
        let mut t = lp_tableau();
        t.rows[0][0] = -1.0;
        t.rows[1][0] = 0.0;
        assert_eq!(t.find_leaving(0, 1e-9), None);
    }
}
