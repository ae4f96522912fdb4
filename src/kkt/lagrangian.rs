use crate::problem::Problem;
use crate::symbolic::Polynomial;

/// Stationarity system of a problem's Lagrangian.
///
/// The unknowns live in one extended variable space: the n decision
/// variables first, then one λ per standardized inequality, then one μ
/// per equality.  `L = f + Σ λᵢgᵢ + Σ μⱼhⱼ` is built on the minimized
/// objective, so multiplier signs refer to the minimization form.
#[derive(Debug, Clone)]
pub struct KktSystem {
    n: usize,
    /// objective over the extended space, minimization sense
    objective: Polynomial,
    /// standardized inequalities gᵢ ≤ 0 over the extended space
    ineqs: Vec<Polynomial>,
    /// equalities hⱼ = 0 over the extended space
    eqs: Vec<Polynomial>,
    /// ∂L/∂xᵢ for each decision variable
    stationarity: Vec<Polynomial>,
}

impl KktSystem {
    pub fn new(problem: &Problem) -> Self {
        let n = problem.nvars();
        let ineqs_n = problem.inequalities();
        let eqs_n = problem.equalities();
        let m = ineqs_n.len();
        let k = eqs_n.len();
        let total = n + m + k;

        let objective = problem.minimized_objective().lifted(total);
        let ineqs: Vec<Polynomial> = ineqs_n.iter().map(|g| g.lifted(total)).collect();
        let eqs: Vec<Polynomial> = eqs_n.iter().map(|h| h.lifted(total)).collect();

        let mut lagrangian = objective.clone();
        for (i, g) in ineqs.iter().enumerate() {
            lagrangian = &lagrangian + &(&Polynomial::variable(total, n + i) * g);
        }
        for (j, h) in eqs.iter().enumerate() {
            lagrangian = &lagrangian + &(&Polynomial::variable(total, n + m + j) * h);
        }
        let stationarity = (0..n).map(|i| lagrangian.diff(i)).collect();

        Self {
            n,
            objective,
            ineqs,
            eqs,
            stationarity,
        }
    }

    pub fn n_decision(&self) -> usize {
        self.n
    }

    pub fn n_ineq(&self) -> usize {
        self.ineqs.len()
    }

    pub fn n_eq(&self) -> usize {
        self.eqs.len()
    }

    pub fn n_unknowns(&self) -> usize {
        self.n + self.ineqs.len() + self.eqs.len()
    }

    pub fn objective(&self) -> &Polynomial {
        &self.objective
    }

    pub fn inequalities(&self) -> &[Polynomial] {
        &self.ineqs
    }

    pub fn equalities(&self) -> &[Polynomial] {
        &self.eqs
    }

    /// The square algebraic system of one active-set case: stationarity
    /// equations, `gᵢ = 0` for active i, `λᵢ = 0` for inactive i, and
    /// every equality.
    pub fn case_equations(&self, mask: u64) -> Vec<Polynomial> {
        let total = self.n_unknowns();
        let mut eqs = Vec::with_capacity(total);
        eqs.extend(self.stationarity.iter().cloned());
        for (i, g) in self.ineqs.iter().enumerate() {
            if mask & (1u64 << i) != 0 {
                eqs.push(g.clone());
            } else {
                eqs.push(Polynomial::variable(total, self.n + i));
            }
        }
        eqs.extend(self.eqs.iter().cloned());
        eqs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::problem::{ConstraintKind, Direction};
    use crate::symbolic::rational_from_int;

    #[test]
    fn test_stationarity_equations() {
        // L = x^2 + y^2 + μ(1 - x - y); unknowns (x, y, μ)
        let p = Problem::from_strings(
            &["x", "y"],
            "x^2 + y^2",
            Direction::Minimize,
            &[("1 - x - y", ConstraintKind::Eq)],
        )
        .unwrap();
        let sys = KktSystem::new(&p);
        assert_eq!(sys.n_unknowns(), 3);
        assert_eq!(sys.n_ineq(), 0);

        let eqs = sys.case_equations(0);
        assert_eq!(eqs.len(), 3);
        // ∂L/∂x = 2x - μ
        assert_eq!(eqs[0].linear_coeff(0), rational_from_int(2));
        assert_eq!(eqs[0].linear_coeff(2), rational_from_int(-1));
    }

    #[test]
    fn test_case_equations_toggle() {
        let p = Problem::from_strings(
            &["x"],
            "x^2",
            Direction::Minimize,
            &[("x - 1", ConstraintKind::Le)],
        )
        .unwrap();
        let sys = KktSystem::new(&p);

        // inactive case pins λ to zero
        let inactive = sys.case_equations(0);
        assert_eq!(inactive[1], Polynomial::variable(2, 1));

        // active case includes g = 0 instead
        let active = sys.case_equations(1);
        assert_eq!(active[1].linear_coeff(0), rational_from_int(1));
        assert_eq!(active[1].constant_coeff(), rational_from_int(-1));
    }
}
