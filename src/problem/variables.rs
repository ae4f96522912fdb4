use std::fmt;

/// Identifier for every unknown handled by the solvers.
///
/// Both engines share this naming contract: λ always denotes the
/// multiplier of an ordered functional constraint and μ the multiplier
/// of a nonnegativity bound, while slack and artificial variables only
/// exist inside the simplex tableau.  Indices are zero-based
/// internally; rendering is one-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum VariableId {
    /// decision variable xᵢ
    Decision(usize),
    /// multiplier λᵢ of the i-th ordered functional constraint
    ConstraintMultiplier(usize),
    /// multiplier μᵢ of the bound xᵢ ≥ 0
    BoundMultiplier(usize),
    /// slack Sᵢ of the i-th inequality row
    Slack(usize),
    /// artificial Rᵢ of the i-th starting-basis row
    Artificial(usize),
}

impl VariableId {
    pub fn is_artificial(&self) -> bool {
        matches!(self, VariableId::Artificial(_))
    }
}

impl fmt::Display for VariableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VariableId::Decision(i) => write!(f, "x{}", i + 1),
            VariableId::ConstraintMultiplier(i) => write!(f, "λ{}", i + 1),
            VariableId::BoundMultiplier(i) => write!(f, "μ{}", i + 1),
            VariableId::Slack(i) => write!(f, "S{}", i + 1),
            VariableId::Artificial(i) => write!(f, "R{}", i + 1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_is_one_based() {
        assert_eq!(VariableId::Decision(0).to_string(), "x1");
        assert_eq!(VariableId::ConstraintMultiplier(1).to_string(), "λ2");
        assert_eq!(VariableId::BoundMultiplier(0).to_string(), "μ1");
        assert_eq!(VariableId::Slack(2).to_string(), "S3");
        assert_eq!(VariableId::Artificial(0).to_string(), "R1");
        assert!(VariableId::Artificial(0).is_artificial());
    }
}
