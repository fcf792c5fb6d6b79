//! Efficiency expander.
//!
//! Copies base-operation efficiencies onto every chunk. Efficiency does not
//! vary by chunk: all chunks of one base operation share the value for a
//! given employee. Pairs the predictor did not cover fall back to a single
//! configured default.

use crate::models::{EfficiencyTable, Employee, ExpandedOperation};

/// Dense (expanded operation × employee) efficiency values.
#[derive(Debug, Clone)]
pub struct EfficiencyGrid {
    values: Vec<f64>,
    employee_count: usize,
    defaulted: usize,
}

impl EfficiencyGrid {
    /// Efficiency of employee `emp` on expanded operation `op`.
    #[inline]
    pub fn get(&self, op: usize, emp: usize) -> f64 {
        self.values[op * self.employee_count + emp]
    }

    /// Number of expanded operations (rows).
    pub fn op_count(&self) -> usize {
        if self.employee_count == 0 {
            0
        } else {
            self.values.len() / self.employee_count
        }
    }

    /// Number of employees (columns).
    pub fn employee_count(&self) -> usize {
        self.employee_count
    }

    /// Number of cells filled with the default efficiency.
    pub fn defaulted_count(&self) -> usize {
        self.defaulted
    }
}

/// Builds the efficiency grid for the expanded routing.
///
/// Lookups use each chunk's `base_id`, never the chunk id.
pub fn expand_efficiencies(
    expanded: &[ExpandedOperation],
    employees: &[Employee],
    table: &EfficiencyTable,
    default_efficiency: f64,
) -> EfficiencyGrid {
    let mut values = Vec::with_capacity(expanded.len() * employees.len());
    let mut defaulted = 0;

    for op in expanded {
        for emp in employees {
            match table.get(&emp.id, &op.base_id) {
                Some(ratio) => values.push(ratio),
                None => {
                    defaulted += 1;
                    values.push(default_efficiency);
                }
            }
        }
    }

    EfficiencyGrid {
        values,
        employee_count: employees.len(),
        defaulted,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expansion::expand_operations;
    use crate::models::Operation;

    #[test]
    fn test_chunks_inherit_base_efficiency() {
        let ops = vec![Operation::new("A", 0, 10.0), Operation::new("C", 1, 40.0)];
        let expanded = expand_operations(&ops, 20.0);
        assert_eq!(expanded.len(), 3); // A, C_1, C_2

        let employees = vec![Employee::new("E1"), Employee::new("E2")];
        let table = EfficiencyTable::new()
            .with_ratio("E1", "C", 0.8)
            .with_ratio("E2", "A", 1.2);

        let grid = expand_efficiencies(&expanded, &employees, &table, 1.0);
        assert_eq!(grid.op_count(), 3);
        assert_eq!(grid.employee_count(), 2);

        assert_eq!(grid.get(0, 0), 1.0); // E1 on A: defaulted
        assert_eq!(grid.get(0, 1), 1.2);
        assert_eq!(grid.get(1, 0), 0.8); // C_1
        assert_eq!(grid.get(2, 0), 0.8); // C_2
        assert_eq!(grid.get(1, 1), 1.0);
        assert_eq!(grid.get(2, 1), 1.0);
        assert_eq!(grid.defaulted_count(), 3);
    }

    #[test]
    fn test_default_is_configurable() {
        let ops = vec![Operation::new("A", 0, 10.0)];
        let expanded = expand_operations(&ops, 10.0);
        let employees = vec![Employee::new("E1")];

        let grid = expand_efficiencies(&expanded, &employees, &EfficiencyTable::new(), 0.85);
        assert!((grid.get(0, 0) - 0.85).abs() < 1e-10);
    }

    #[test]
    fn test_underscore_in_base_id() {
        // Base ids containing '_' still resolve, since the base id is stored.
        let ops = vec![Operation::new("CUT_SLEEVE", 0, 30.0)];
        let expanded = expand_operations(&ops, 10.0);
        assert!(expanded.len() > 1);
        let employees = vec![Employee::new("E1")];
        let table = EfficiencyTable::new().with_ratio("E1", "CUT_SLEEVE", 0.5);

        let grid = expand_efficiencies(&expanded, &employees, &table, 1.0);
        for op in 0..expanded.len() {
            assert_eq!(grid.get(op, 0), 0.5);
        }
    }
}
