//! Input validation for assignment requests.
//!
//! Checks structural integrity of operations, employees, efficiency
//! estimates and configuration before solving. Detects:
//! - Duplicate IDs
//! - Non-positive or non-finite base durations
//! - NaN efficiency ratios
//! - Out-of-range configuration values, including a splitting target small
//!   enough to explode the routing
//! - Chunk ids colliding with other operation ids (after splitting)
//! - Operations no employee can perform (after the time matrix is built)
//!
//! Two conditions abort a request immediately with
//! [`SolverError::InvalidInput`]: an empty employee list and a bad base
//! duration. Everything else is collected and reported together.

use std::collections::HashSet;

use crate::error::{SolverError, SolverResult};
use crate::expansion::{expanded_len_bound, MAX_EXPANDED_OPERATIONS};
use crate::matrix::TimeMatrix;
use crate::models::{EfficiencyEstimate, Employee, ExpandedOperation, Operation, SolverConfig};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two entities share the same ID.
    DuplicateId,
    /// A base duration is zero, negative or not finite.
    InvalidDuration,
    /// An efficiency ratio is NaN.
    InvalidRatio,
    /// A configuration value is out of range.
    InvalidConfig,
    /// Every employee has a non-positive efficiency on an operation.
    UnassignableOperation,
}

impl ValidationError {
    /// Creates a validation error.
    pub fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates the input data for an assignment problem.
///
/// Checks:
/// 1. No duplicate operation IDs
/// 2. No duplicate employee IDs
/// 3. All base durations are positive and finite
/// 4. No NaN efficiency ratios
/// 5. Configuration values are in range
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_input(
    operations: &[Operation],
    employees: &[Employee],
    estimates: &[EfficiencyEstimate],
    config: &SolverConfig,
) -> ValidationResult {
    let mut errors = Vec::new();

    let mut op_ids = HashSet::new();
    for op in operations {
        if !op_ids.insert(op.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate operation ID: {}", op.id),
            ));
        }
        if !(op.base_duration.is_finite() && op.base_duration > 0.0) {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidDuration,
                format!(
                    "Operation '{}' has invalid base duration {}",
                    op.id, op.base_duration
                ),
            ));
        }
    }

    let mut emp_ids = HashSet::new();
    for emp in employees {
        if !emp_ids.insert(emp.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate employee ID: {}", emp.id),
            ));
        }
    }

    for est in estimates {
        if est.ratio.is_nan() {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidRatio,
                format!(
                    "Efficiency for employee '{}' on operation '{}' is NaN",
                    est.employee_id, est.operation_id
                ),
            ));
        }
    }

    errors.extend(config.validate());

    if let Some(target) = config.target_duration.filter(|t| t.is_finite() && *t > 0.0) {
        let bound = expanded_len_bound(operations, target);
        if bound > MAX_EXPANDED_OPERATIONS as f64 {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidConfig,
                format!(
                    "targetDuration {target} would split the routing into more than {MAX_EXPANDED_OPERATIONS} operations"
                ),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Request-level gate used by the solve pipeline.
///
/// Fails fast on an empty employee list or a bad duration, then runs
/// [`validate_input`] and reports everything else at once.
pub fn check_request(
    operations: &[Operation],
    employees: &[Employee],
    estimates: &[EfficiencyEstimate],
    config: &SolverConfig,
) -> SolverResult<()> {
    if employees.is_empty() {
        return Err(SolverError::invalid_input("no employees provided"));
    }
    if let Some(op) = operations
        .iter()
        .find(|op| !(op.base_duration.is_finite() && op.base_duration > 0.0))
    {
        return Err(SolverError::invalid_input(format!(
            "operation '{}' has invalid base duration {}",
            op.id, op.base_duration
        )));
    }
    validate_input(operations, employees, estimates, config).map_err(SolverError::Validation)
}

/// Checks that chunk ids do not collide with each other or with input ids.
///
/// A split operation `C` yields `C_1`, `C_2`, … which may clash with an
/// operation the request already calls `C_1`.
pub fn validate_expansion(expanded: &[ExpandedOperation]) -> ValidationResult {
    let mut seen = HashSet::new();
    let errors: Vec<ValidationError> = expanded
        .iter()
        .filter(|op| !seen.insert(op.id.as_str()))
        .map(|op| {
            ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!(
                    "Expanded operation ID '{}' (from '{}') is not unique",
                    op.id, op.base_id
                ),
            )
        })
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Checks that every expanded operation has at least one finite time.
pub fn validate_matrix(matrix: &TimeMatrix) -> ValidationResult {
    let errors: Vec<ValidationError> = (0..matrix.op_count())
        .filter(|&op| !matrix.has_usable_employee(op))
        .map(|op| {
            ValidationError::new(
                ValidationErrorKind::UnassignableOperation,
                format!(
                    "Operation '{}' cannot be performed by any employee",
                    matrix.operation(op).id
                ),
            )
        })
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expansion::expand_operations;

    fn sample_operations() -> Vec<Operation> {
        vec![
            Operation::new("OP1", 0, 10.0),
            Operation::new("OP2", 1, 25.0),
            Operation::new("OP3", 2, 5.5),
        ]
    }

    fn sample_employees() -> Vec<Employee> {
        vec![Employee::new("E1"), Employee::new("E2")]
    }

    #[test]
    fn test_valid_input() {
        let estimates = vec![EfficiencyEstimate::new("E1", "OP1", 0.9)];
        let result = validate_input(
            &sample_operations(),
            &sample_employees(),
            &estimates,
            &SolverConfig::default(),
        );
        assert!(result.is_ok());
    }

    #[test]
    fn test_duplicate_ids() {
        let mut ops = sample_operations();
        ops.push(Operation::new("OP1", 3, 1.0));
        let mut emps = sample_employees();
        emps.push(Employee::new("E2"));

        let errors = validate_input(&ops, &emps, &[], &SolverConfig::default()).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors
            .iter()
            .all(|e| e.kind == ValidationErrorKind::DuplicateId));
        assert!(errors[0].message.contains("OP1"));
        assert!(errors[1].message.contains("E2"));
    }

    #[test]
    fn test_invalid_durations() {
        let ops = vec![
            Operation::new("Z", 0, 0.0),
            Operation::new("N", 1, -3.0),
            Operation::new("I", 2, f64::INFINITY),
            Operation::new("X", 3, f64::NAN),
        ];
        let errors =
            validate_input(&ops, &sample_employees(), &[], &SolverConfig::default()).unwrap_err();
        assert_eq!(errors.len(), 4);
        assert!(errors
            .iter()
            .all(|e| e.kind == ValidationErrorKind::InvalidDuration));
    }

    #[test]
    fn test_nan_ratio() {
        let estimates = vec![
            EfficiencyEstimate::new("E1", "OP1", f64::NAN),
            EfficiencyEstimate::new("E2", "OP1", 0.0),
        ];
        let errors = validate_input(
            &sample_operations(),
            &sample_employees(),
            &estimates,
            &SolverConfig::default(),
        )
        .unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ValidationErrorKind::InvalidRatio);
    }

    #[test]
    fn test_config_errors_are_collected() {
        let config = SolverConfig::default().with_restarts(0);
        let errors =
            validate_input(&sample_operations(), &sample_employees(), &[], &config).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ValidationErrorKind::InvalidConfig);
    }

    #[test]
    fn test_check_request_no_employees() {
        let err = check_request(&sample_operations(), &[], &[], &SolverConfig::default())
            .unwrap_err();
        assert!(matches!(err, SolverError::InvalidInput(ref m) if m == "no employees provided"));
    }

    #[test]
    fn test_check_request_bad_duration() {
        let ops = vec![Operation::new("OP1", 0, 0.0)];
        let err = check_request(&ops, &sample_employees(), &[], &SolverConfig::default())
            .unwrap_err();
        assert!(matches!(err, SolverError::InvalidInput(ref m) if m.contains("OP1")));
    }

    #[test]
    fn test_check_request_collects_the_rest() {
        let emps = vec![Employee::new("E1"), Employee::new("E1")];
        let err = check_request(&sample_operations(), &emps, &[], &SolverConfig::default())
            .unwrap_err();
        match err {
            SolverError::Validation(errors) => {
                assert_eq!(errors.len(), 1);
                assert_eq!(errors[0].kind, ValidationErrorKind::DuplicateId);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_check_request_empty_routing_is_fine() {
        assert!(check_request(&[], &sample_employees(), &[], &SolverConfig::default()).is_ok());
    }

    #[test]
    fn test_tiny_target_override_is_rejected() {
        let config = SolverConfig::default().with_target_duration(1e-6);
        let errors =
            validate_input(&sample_operations(), &sample_employees(), &[], &config).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ValidationErrorKind::InvalidConfig);
        assert!(errors[0].message.contains("targetDuration"));

        let config = SolverConfig::default().with_target_duration(5.0);
        assert!(validate_input(&sample_operations(), &sample_employees(), &[], &config).is_ok());
    }

    #[test]
    fn test_chunk_id_collides_with_input_id() {
        let ops = vec![
            Operation::new("C", 0, 40.0),
            Operation::new("C_1", 1, 10.0),
            Operation::new("A", 2, 10.0),
        ];
        let expanded = expand_operations(&ops, 20.0);
        let errors = validate_expansion(&expanded).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ValidationErrorKind::DuplicateId);
        assert!(errors[0].message.contains("C_1"));

        assert!(validate_expansion(&expand_operations(&sample_operations(), 10.0)).is_ok());
    }

    #[test]
    fn test_unassignable_operation() {
        let ops = vec![
            ExpandedOperation::whole(&Operation::new("OP1", 0, 10.0)),
            ExpandedOperation::whole(&Operation::new("OP2", 1, 10.0)),
        ];
        let matrix = TimeMatrix::from_times(
            ops,
            vec!["E1".into(), "E2".into()],
            vec![10.0, f64::INFINITY, f64::INFINITY, f64::INFINITY],
        );
        let errors = validate_matrix(&matrix).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ValidationErrorKind::UnassignableOperation);
        assert!(errors[0].message.contains("OP2"));
    }
}
