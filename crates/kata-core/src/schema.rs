//! Descriptor (`testcases.json`) loading.
//!
//! This is a pure parse: type tags are not validated here, the runner resolves
//! them against the marshaller before the first case runs.

use crate::errors::HarnessError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestSuiteSpec {
    #[serde(rename = "function")]
    pub function_name: String,
    /// Informational only.
    #[serde(rename = "params", default)]
    pub param_names: Vec<String>,
    #[serde(rename = "paramTypes", default, skip_serializing_if = "Option::is_none")]
    pub param_types: Option<Vec<String>>,
    #[serde(rename = "returnType", default, skip_serializing_if = "Option::is_none")]
    pub return_type: Option<String>,
    pub cases: Vec<TestCase>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestCase {
    /// One value per positional argument.
    pub input: Vec<Value>,
    pub output: Value,
}

impl TestSuiteSpec {
    /// Tag for argument `index`; `None` when undeclared or empty.
    pub fn param_type(&self, index: usize) -> Option<&str> {
        self.param_types
            .as_ref()
            .and_then(|types| types.get(index))
            .map(String::as_str)
            .filter(|t| !t.is_empty())
    }

    pub fn return_type(&self) -> Option<&str> {
        self.return_type.as_deref().filter(|t| !t.is_empty())
    }

    /// Every declared tag, parameters first.
    pub fn declared_tags(&self) -> impl Iterator<Item = &str> {
        self.param_types
            .iter()
            .flatten()
            .map(String::as_str)
            .chain(self.return_type.as_deref())
            .filter(|t| !t.is_empty())
    }
}

pub fn load_suite(path: &Path) -> Result<TestSuiteSpec, HarnessError> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| HarnessError::malformed_schema(path, format!("failed to read: {e}")))?;
    parse_suite(&raw, path)
}

pub fn parse_suite(raw: &str, path: &Path) -> Result<TestSuiteSpec, HarnessError> {
    let spec: TestSuiteSpec =
        serde_json::from_str(raw).map_err(|e| HarnessError::malformed_schema(path, e.to_string()))?;
    if spec.function_name.trim().is_empty() {
        return Err(HarnessError::malformed_schema(
            path,
            "`function` must be a non-empty string",
        ));
    }
    Ok(spec)
}
