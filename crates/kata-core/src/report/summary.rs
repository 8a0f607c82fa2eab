//! Machine-readable run summary and the exit code policy.
//!
//! Suite load failures take priority over case failures; downstream tooling
//! should branch on `reason_code` rather than the exit code.

use crate::report::{Counts, RunArtifacts};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const SCHEMA_VERSION: u32 = 1;

pub const EXIT_SUCCESS: i32 = 0;
/// At least one case failed or errored.
pub const EXIT_TEST_FAILURE: i32 = 1;
/// A suite could not load, or the run could not be set up.
pub const EXIT_CONFIG_ERROR: i32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReasonCode {
    Success,
    ETestFailed,
    ESuiteLoad,
    ENoProblems,
    EConfig,
}

impl ReasonCode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Success => "OK",
            Self::ETestFailed => "E_TEST_FAILED",
            Self::ESuiteLoad => "E_SUITE_LOAD",
            Self::ENoProblems => "E_NO_PROBLEMS",
            Self::EConfig => "E_CONFIG",
        }
    }

    pub fn exit_code(self) -> i32 {
        match self {
            Self::Success => EXIT_SUCCESS,
            Self::ETestFailed => EXIT_TEST_FAILURE,
            Self::ESuiteLoad | Self::ENoProblems | Self::EConfig => EXIT_CONFIG_ERROR,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Summary {
    pub schema_version: u32,
    pub run_id: String,
    /// 0=pass, 1=case failure, 2=suite load or setup error
    pub exit_code: i32,
    pub reason_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub counts: Counts,
}

impl Summary {
    /// Summary for a run that never got as far as discovery.
    pub fn setup_error(message: impl Into<String>) -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            run_id: uuid::Uuid::new_v4().to_string(),
            exit_code: ReasonCode::EConfig.exit_code(),
            reason_code: ReasonCode::EConfig.as_str().to_string(),
            message: Some(message.into()),
            counts: Counts::default(),
        }
    }
}

/// Decides the outcome of a run.
///
/// `require_problems` turns an empty discovery into an error, which catches a
/// mistyped filter or corpus path.
pub fn decide(artifacts: &RunArtifacts, require_problems: bool) -> Summary {
    let counts = artifacts.counts();
    let (reason, message) = if counts.suite_errors > 0 {
        let names: Vec<&str> = artifacts
            .suite_errors
            .iter()
            .map(|e| e.problem.as_str())
            .collect();
        (
            ReasonCode::ESuiteLoad,
            Some(format!("suites failed to load: {}", names.join(", "))),
        )
    } else if counts.failed + counts.errored > 0 {
        (
            ReasonCode::ETestFailed,
            Some(format!(
                "{} case(s) failed, {} errored",
                counts.failed, counts.errored
            )),
        )
    } else if require_problems && artifacts.problems.is_empty() {
        (
            ReasonCode::ENoProblems,
            Some(format!(
                "no problems discovered under {}",
                artifacts.problems_root.display()
            )),
        )
    } else {
        (ReasonCode::Success, None)
    };

    Summary {
        schema_version: SCHEMA_VERSION,
        run_id: artifacts.run_id.clone(),
        exit_code: reason.exit_code(),
        reason_code: reason.as_str().to_string(),
        message,
        counts,
    }
}

pub fn write_summary(summary: &Summary, out: &Path) -> anyhow::Result<()> {
    std::fs::write(out, serde_json::to_string_pretty(summary)?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CaseResultRow, CaseStatus, SuiteErrorRow};
    use serde_json::json;
    use std::path::Path;

    fn row(status: CaseStatus) -> CaseResultRow {
        CaseResultRow {
            problem: "p".into(),
            case_index: 0,
            label: "p/case_0".into(),
            status,
            input: vec![],
            expected: json!(null),
            actual: None,
            message: String::new(),
            error_kind: None,
            duration_ms: None,
        }
    }

    fn artifacts() -> RunArtifacts {
        let mut a = RunArtifacts::new(Path::new("problems"), &[]);
        a.problems.push("p".into());
        a
    }

    #[test]
    fn all_pass_is_success() {
        let mut a = artifacts();
        a.results.push(row(CaseStatus::Pass));
        let s = decide(&a, true);
        assert_eq!(s.exit_code, EXIT_SUCCESS);
        assert_eq!(s.reason_code, "OK");
        assert_eq!(s.counts.passed, 1);
    }

    #[test]
    fn failures_and_errors_exit_one() {
        let mut a = artifacts();
        a.results.push(row(CaseStatus::Pass));
        a.results.push(row(CaseStatus::Error));
        let s = decide(&a, true);
        assert_eq!(s.exit_code, EXIT_TEST_FAILURE);
        assert_eq!(s.reason_code, "E_TEST_FAILED");
    }

    #[test]
    fn suite_errors_take_priority() {
        let mut a = artifacts();
        a.results.push(row(CaseStatus::Fail));
        a.suite_errors.push(SuiteErrorRow {
            problem: "q".into(),
            kind: "function_not_found".into(),
            message: "function not found".into(),
        });
        let s = decide(&a, true);
        assert_eq!(s.exit_code, EXIT_CONFIG_ERROR);
        assert_eq!(s.reason_code, "E_SUITE_LOAD");
        assert!(s.message.unwrap().contains('q'));
    }

    #[test]
    fn empty_discovery_only_fails_when_required() {
        let a = RunArtifacts::new(Path::new("problems"), &[]);
        assert_eq!(decide(&a, false).exit_code, EXIT_SUCCESS);
        assert_eq!(decide(&a, true).reason_code, "E_NO_PROBLEMS");
    }

    #[test]
    fn setup_error_exits_two() {
        let s = Summary::setup_error("unsupported config version 2");
        assert_eq!(s.exit_code, EXIT_CONFIG_ERROR);
        assert_eq!(s.reason_code, "E_CONFIG");
        assert_eq!(s.counts, Counts::default());
    }
}
