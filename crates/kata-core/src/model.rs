use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::PathBuf;

/// A harness-eligible problem directory, produced by discovery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProblemDescriptor {
    /// Directory name; unique within a corpus.
    pub name: String,
    pub directory: PathBuf,
    pub solution_path: PathBuf,
    pub descriptor_path: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaseStatus {
    Pass,
    /// Result differed from the expected output.
    Fail,
    /// The case could not produce a result (marshalling, arity, panic).
    Error,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaseResultRow {
    pub problem: String,
    /// Zero-based position in the descriptor, independent of execution order.
    pub case_index: usize,
    pub label: String,
    pub status: CaseStatus,
    pub input: Vec<Value>,
    pub expected: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual: Option<Value>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<String>,
    pub duration_ms: Option<u64>,
}

impl CaseResultRow {
    pub fn test_id(&self) -> String {
        format!("{}/case_{}", self.problem, self.case_index)
    }
}

/// A problem whose suite could not run at all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuiteErrorRow {
    pub problem: String,
    pub kind: String,
    pub message: String,
}

/// Label used in reports: `<problem>/case_<i>: <input> -> <expected>`.
pub fn case_label(problem: &str, index: usize, input: &[Value], expected: &Value) -> String {
    let input = serde_json::to_string(input).unwrap_or_else(|_| "<unprintable>".into());
    let expected = serde_json::to_string(expected).unwrap_or_else(|_| "<unprintable>".into());
    format!("{problem}/case_{index}: {input} -> {expected}")
}
