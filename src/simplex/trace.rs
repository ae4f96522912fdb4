use crate::algebra::FloatT;
use crate::problem::VariableId;
use std::fmt;

/// Frozen copy of a tableau at one point of the pivot sequence.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TableauSnapshot<T> {
    pub columns: Vec<VariableId>,
    pub basis: Vec<VariableId>,
    pub rows: Vec<Vec<T>>,
    pub rhs: Vec<T>,
    /// reduced cost row of the active phase objective
    pub objective: Vec<T>,
    /// negated phase objective at the current basic solution
    pub objective_value: T,
}

impl<T> fmt::Display for TableauSnapshot<T>
where
    T: FloatT,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:>6} |", "base")?;
        for c in &self.columns {
            write!(f, " {:>9}", c.to_string())?;
        }
        writeln!(f, " | {:>9}", "rhs")?;
        for (r, row) in self.rows.iter().enumerate() {
            write!(f, "{:>6} |", self.basis[r].to_string())?;
            for v in row {
                write!(f, " {:>9.3}", v)?;
            }
            writeln!(f, " | {:>9.3}", self.rhs[r])?;
        }
        write!(f, "{:>6} |", "obj")?;
        for v in &self.objective {
            write!(f, " {:>9.3}", v)?;
        }
        writeln!(f, " | {:>9.3}", self.objective_value)
    }
}

/// One pivot of either phase, with the tableau that resulted from it.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PivotRecord<T> {
    /// 1 or 2
    pub phase: u8,
    pub entering: VariableId,
    pub leaving: VariableId,
    /// pivot element value before normalization
    pub pivot: T,
    /// winning ratio rhs/pivot of the leaving row
    pub ratio: T,
    pub after: TableauSnapshot<T>,
}

/// Ordered audit trail of a two-phase solve.
///
/// The engine only records; rendering belongs to the caller.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PivotTrace<T> {
    /// starting tableau of Phase I, absent when no artificials exist
    pub phase1_initial: Option<TableauSnapshot<T>>,
    /// starting tableau of Phase II
    pub phase2_initial: Option<TableauSnapshot<T>>,
    pub records: Vec<PivotRecord<T>>,
}

impl<T> PivotTrace<T> {
    pub fn new() -> Self {
        Self {
            phase1_initial: None,
            phase2_initial: None,
            records: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
