//! Request and response payloads.
//!
//! JSON wire types with camelCase fields, plus helpers to read a request
//! from a file or stream and write the response back.

use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, Read, Write};
use std::path::Path;

use crate::error::SolverResult;
use crate::metrics::{build_timeline, LoadMetrics, TimelineEntry, WorkloadSummary};
use crate::models::{EfficiencyEstimate, Employee, Operation, SolverConfig};
use crate::solver::{tally, ObjectiveBreakdown, SearchStats, Solver};

/// A solve request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SolveRequest {
    pub operations: Vec<Operation>,
    pub employees: Vec<Employee>,
    #[serde(default)]
    pub efficiency_estimates: Vec<EfficiencyEstimate>,
    #[serde(default)]
    pub config: SolverConfig,
}

/// One `(expanded operation, employee)` pair of the final plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentEntry {
    pub expanded_operation_id: String,
    pub employee_id: String,
    /// Execution time of the operation for this employee.
    pub time: f64,
}

/// A solve response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SolveResponse {
    /// Final plan in insertion order.
    pub assignments: Vec<AssignmentEntry>,
    pub metrics: LoadMetrics,
    pub target_duration: f64,
    /// Metrics of the greedy seed.
    pub initial_metrics: LoadMetrics,
    pub objective: ObjectiveBreakdown,
    pub search: SearchStats,
    /// Base RNG seed, for replaying the solve.
    pub seed: u64,
    pub timeline: Vec<TimelineEntry>,
    pub workload: WorkloadSummary,
}

/// Solves `request` and assembles the full response.
pub fn solve_request(request: &SolveRequest) -> SolverResult<SolveResponse> {
    let outcome = Solver::new(request.config.clone()).solve(
        &request.operations,
        &request.employees,
        &request.efficiency_estimates,
    )?;
    let matrix = &outcome.matrix;

    let assignments = outcome
        .assignment
        .iter()
        .map(|(op, emp)| AssignmentEntry {
            expanded_operation_id: matrix.operation(op).id.clone(),
            employee_id: matrix.employee_id(emp).to_string(),
            time: matrix.time(op, emp),
        })
        .collect();

    let (loads, counts) = tally(matrix, &outcome.assignment);

    Ok(SolveResponse {
        assignments,
        metrics: LoadMetrics::calculate(matrix, &outcome.assignment),
        target_duration: outcome.target_duration,
        initial_metrics: LoadMetrics::calculate(matrix, &outcome.initial),
        objective: outcome.objective.breakdown(&loads, &counts),
        search: outcome.stats,
        seed: outcome.seed,
        timeline: build_timeline(matrix, &outcome.assignment),
        workload: WorkloadSummary::summarize(matrix, &outcome.assignment),
    })
}

/// Parses a request from any reader.
pub fn from_reader<R: Read>(reader: R) -> SolverResult<SolveRequest> {
    Ok(serde_json::from_reader(reader)?)
}

/// Reads a request from a JSON file.
pub fn read_request(path: impl AsRef<Path>) -> SolverResult<SolveRequest> {
    let file = File::open(path)?;
    from_reader(BufReader::new(file))
}

/// Writes `response` as JSON followed by a newline.
pub fn write_response<W: Write>(
    mut writer: W,
    response: &SolveResponse,
    pretty: bool,
) -> SolverResult<()> {
    if pretty {
        serde_json::to_writer_pretty(&mut writer, response)?;
    } else {
        serde_json::to_writer(&mut writer, response)?;
    }
    writeln!(writer)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SolverError;
    use tempfile::NamedTempFile;

    const REQUEST: &str = r#"{
        "operations": [
            {"id": "A", "sequenceOrder": 1, "baseDuration": 10.0},
            {"id": "B", "sequenceOrder": 2, "baseDuration": 10.0},
            {"id": "C", "sequenceOrder": 3, "baseDuration": 40.0}
        ],
        "employees": [{"id": "E1"}, {"id": "E2"}, {"id": "E3"}],
        "efficiencyEstimates": [
            {"employeeId": "E1", "operationId": "C", "ratio": 1.25},
            {"employeeId": "E2", "operationId": "A", "ratio": 0.5}
        ],
        "config": {"seed": 7, "maxIterations": 500}
    }"#;

    #[test]
    fn test_parse_defaults() {
        let req: SolveRequest = serde_json::from_str(
            r#"{"operations": [], "employees": [{"id": "E1"}]}"#,
        )
        .unwrap();
        assert!(req.efficiency_estimates.is_empty());
        assert_eq!(req.config, SolverConfig::default());
    }

    #[test]
    fn test_solve_request() {
        let req: SolveRequest = serde_json::from_str(REQUEST).unwrap();
        let resp = solve_request(&req).unwrap();

        assert!((resp.target_duration - 20.0).abs() < 1e-10);
        assert_eq!(resp.seed, 7);
        assert_eq!(resp.assignments.len(), 4);
        assert_eq!(resp.timeline.len(), 4);

        let total: f64 = resp.assignments.iter().map(|a| a.time).sum();
        let loads: f64 = resp.metrics.per_employee_loads.values().sum();
        assert!((total - loads).abs() < 1e-9);
        assert_eq!(resp.metrics.per_employee_loads.len(), 3);
        assert!((resp.objective.score - resp.search.final_score).abs() < 1e-9);
        assert!(resp.search.final_score <= resp.search.initial_score);

        let workload_total: f64 = resp.workload.rows.iter().map(|r| r.total).sum();
        assert!((workload_total - total).abs() < 1e-9);
    }

    #[test]
    fn test_response_wire_names() {
        let req: SolveRequest = serde_json::from_str(REQUEST).unwrap();
        let resp = solve_request(&req).unwrap();
        let value = serde_json::to_value(&resp).unwrap();

        assert!(value["assignments"][0]["expandedOperationId"].is_string());
        assert!(value["metrics"]["balanceIndex"].is_number());
        assert!(value["metrics"]["perEmployeeOperations"]["E1"].is_array());
        assert!(value["initialMetrics"]["makespan"].is_number());
        assert!(value["targetDuration"].is_number());
        assert!(value["search"]["scoreHistory"].is_array());
    }

    #[test]
    fn test_file_round_trip() {
        let mut input = NamedTempFile::new().unwrap();
        input.write_all(REQUEST.as_bytes()).unwrap();

        let req = read_request(input.path()).unwrap();
        let resp = solve_request(&req).unwrap();

        let mut out = Vec::new();
        write_response(&mut out, &resp, true).unwrap();
        let back: SolveResponse = serde_json::from_slice(&out).unwrap();
        assert_eq!(back.assignments, resp.assignments);
        assert_eq!(back.seed, resp.seed);
    }

    #[test]
    fn test_io_and_json_errors() {
        let missing = read_request("/nonexistent/request.json");
        assert!(matches!(missing, Err(SolverError::Io(_))));

        let bad = from_reader("{not json".as_bytes());
        assert!(matches!(bad, Err(SolverError::Json(_))));
    }

    #[test]
    fn test_no_employees_error() {
        let req: SolveRequest =
            serde_json::from_str(r#"{"operations": [], "employees": []}"#).unwrap();
        let err = solve_request(&req).unwrap_err();
        assert!(matches!(err, SolverError::InvalidInput(_)));
    }
}
