use crate::symbolic::{parse_polynomial, ParseError, Polynomial};
use thiserror::Error;

/// Optimization sense of the objective.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    #[default]
    Minimize,
    Maximize,
}

/// Relation carried by a constraint expression against zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ConstraintKind {
    Eq,
    Le,
    Ge,
}

/// A single constraint `expr (=, ≤, ≥) 0`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Constraint {
    pub kind: ConstraintKind,
    pub expr: Polynomial,
}

impl Constraint {
    pub fn new(kind: ConstraintKind, expr: Polynomial) -> Self {
        Self { kind, expr }
    }

    pub fn is_equality(&self) -> bool {
        self.kind == ConstraintKind::Eq
    }

    /// Expression standardized so that inequalities read `g ≤ 0` and
    /// equalities `h = 0`.  A `≥` constraint is negated.
    pub fn standard_expr(&self) -> Polynomial {
        match self.kind {
            ConstraintKind::Ge => -&self.expr,
            _ => self.expr.clone(),
        }
    }
}

/// Error type returned when a [`Problem`] cannot be assembled.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProblemError {
    #[error("a problem needs at least one variable")]
    NoVariables,
    #[error("duplicate variable name '{0}'")]
    DuplicateVariable(String),
    #[error("expression does not match the problem's variable count")]
    DimensionMismatch,
    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// A constrained optimization problem in standard form.
///
/// Holds the ordered variable names, the objective, its direction, and
/// the ordered constraint list.  Construction validates the pieces
/// against each other; a `Problem` is immutable afterwards, so a single
/// instance can be shared across concurrent solves.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Problem {
    vars: Vec<String>,
    objective: Polynomial,
    direction: Direction,
    constraints: Vec<Constraint>,
}

impl Problem {
    pub fn new(
        vars: Vec<String>,
        objective: Polynomial,
        direction: Direction,
        constraints: Vec<Constraint>,
    ) -> Result<Self, ProblemError> {
        if vars.is_empty() {
            return Err(ProblemError::NoVariables);
        }
        for (i, v) in vars.iter().enumerate() {
            if vars[..i].contains(v) {
                return Err(ProblemError::DuplicateVariable(v.clone()));
            }
        }
        let n = vars.len();
        if objective.nvars() != n || constraints.iter().any(|c| c.expr.nvars() != n) {
            return Err(ProblemError::DimensionMismatch);
        }
        Ok(Self {
            vars,
            objective,
            direction,
            constraints,
        })
    }

    /// Assemble a problem from expression strings.
    pub fn from_strings(
        vars: &[&str],
        objective: &str,
        direction: Direction,
        constraints: &[(&str, ConstraintKind)],
    ) -> Result<Self, ProblemError> {
        let obj = parse_polynomial(objective, vars)?;
        let cons = constraints
            .iter()
            .map(|(src, kind)| Ok(Constraint::new(*kind, parse_polynomial(src, vars)?)))
            .collect::<Result<Vec<_>, ParseError>>()?;
        Self::new(
            vars.iter().map(|s| (*s).to_string()).collect(),
            obj,
            direction,
            cons,
        )
    }

    pub fn nvars(&self) -> usize {
        self.vars.len()
    }

    pub fn var_names(&self) -> &[String] {
        &self.vars
    }

    pub fn objective(&self) -> &Polynomial {
        &self.objective
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    /// Standardized inequality expressions `gᵢ ≤ 0`, in constraint order.
    pub fn inequalities(&self) -> Vec<Polynomial> {
        self.constraints
            .iter()
            .filter(|c| !c.is_equality())
            .map(Constraint::standard_expr)
            .collect()
    }

    /// Equality expressions `hⱼ = 0`, in constraint order.
    pub fn equalities(&self) -> Vec<Polynomial> {
        self.constraints
            .iter()
            .filter(|c| c.is_equality())
            .map(Constraint::standard_expr)
            .collect()
    }

    /// Objective with a `Maximize` direction folded into minimization.
    ///
    /// All internal machinery minimizes; reported objective values are
    /// mapped back by the caller.
    pub fn minimized_objective(&self) -> Polynomial {
        match self.direction {
            Direction::Minimize => self.objective.clone(),
            Direction::Maximize => -&self.objective,
        }
    }
}
