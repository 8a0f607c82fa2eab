//! Error taxonomy for the harness.
//!
//! Failures are scoped to the smallest unit possible. [`HarnessError`] fails one
//! problem's suite, [`InvokeError`] fails one case. Neither aborts the run; the
//! process exit code is the only global failure signal.

use std::fmt::{Display, Formatter};
use std::path::PathBuf;

/// Suite-scoped failures: the problem's cases are not attempted.
#[derive(Debug, thiserror::Error)]
pub enum HarnessError {
    /// Descriptor file is unreadable, not JSON, or lacks `function`/`cases`.
    #[error("malformed schema {path}: {detail}")]
    MalformedSchema { path: PathBuf, detail: String },

    /// The solution module does not export the declared function.
    #[error("function not found: module `{problem}` does not export `{function}`")]
    FunctionNotFound { problem: String, function: String },

    /// A discovered problem has no entry in the solution registry.
    #[error("module not registered: no solution module for `{problem}`")]
    ModuleNotRegistered { problem: String },

    /// The registry loader for a problem panicked.
    #[error("module load failed: loader for `{problem}` panicked: {message}")]
    ModuleLoad { problem: String, message: String },

    /// A `paramTypes`/`returnType` entry has no registered converter.
    #[error("unknown type tag: `{tag}` has no registered converter")]
    UnknownTypeTag { tag: String },

    #[error("io error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl HarnessError {
    pub fn malformed_schema(path: impl Into<PathBuf>, detail: impl Into<String>) -> Self {
        Self::MalformedSchema {
            path: path.into(),
            detail: detail.into(),
        }
    }

    pub fn function_not_found(problem: impl Into<String>, function: impl Into<String>) -> Self {
        Self::FunctionNotFound {
            problem: problem.into(),
            function: function.into(),
        }
    }

    pub fn unknown_type_tag(tag: impl Into<String>) -> Self {
        Self::UnknownTypeTag { tag: tag.into() }
    }

    /// Stable machine-readable kind used in reports.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MalformedSchema { .. } => "malformed_schema",
            Self::FunctionNotFound { .. } => "function_not_found",
            Self::ModuleNotRegistered { .. } => "module_not_registered",
            Self::ModuleLoad { .. } => "module_load_error",
            Self::UnknownTypeTag { .. } => "unknown_type_tag",
            Self::Io { .. } => "io",
        }
    }
}

/// Conversion failures between JSON and a domain representation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MarshalError {
    #[error("`{tag}` expects {expected}, got {found}")]
    Shape {
        tag: &'static str,
        expected: &'static str,
        found: String,
    },

    #[error("cannot decode {found} as {target}: {detail}")]
    Decode {
        target: &'static str,
        found: String,
        detail: String,
    },

    #[error("cannot encode result as JSON: {0}")]
    Encode(String),

    /// A domain structure came back where no `returnType` was declared.
    #[error("untagged domain value: declare a returnType to convert `{0}` results")]
    UntaggedDomainValue(&'static str),
}

/// Case-scoped failures raised while calling a solution.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvokeError {
    #[error("argument mismatch: {0}")]
    ArgumentMismatch(String),

    #[error("argument {index}: {source}")]
    Argument {
        index: usize,
        #[source]
        source: MarshalError,
    },

    #[error("result: {0}")]
    Result(#[source] MarshalError),

    /// The solution panicked; carries the panic message.
    #[error("solution panicked: {0}")]
    SolutionRuntimeError(String),
}

impl InvokeError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ArgumentMismatch(_) | Self::Argument { .. } => "argument_mismatch",
            Self::Result(_) => "marshal",
            Self::SolutionRuntimeError(_) => "solution_runtime_error",
        }
    }
}

#[derive(Debug)]
pub struct ConfigError(pub String);

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "ConfigError: {}", self.0)
    }
}
impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn function_not_found_names_missing_export() {
        let err = HarnessError::function_not_found("0001-two-sum", "doesNotExist");
        assert_eq!(err.kind(), "function_not_found");
        let msg = err.to_string();
        assert!(msg.contains("doesNotExist"), "got {msg}");
        assert!(msg.contains("0001-two-sum"), "got {msg}");
    }

    #[test]
    fn unknown_type_tag_names_offending_tag() {
        let err = HarnessError::unknown_type_tag("TreeNode");
        assert_eq!(err.kind(), "unknown_type_tag");
        assert!(err.to_string().contains("`TreeNode`"));
    }

    #[test]
    fn invoke_error_kinds_are_stable() {
        assert_eq!(
            InvokeError::SolutionRuntimeError("boom".into()).kind(),
            "solution_runtime_error"
        );
        assert_eq!(
            InvokeError::ArgumentMismatch("x".into()).kind(),
            "argument_mismatch"
        );
        assert_eq!(
            InvokeError::Argument {
                index: 1,
                source: MarshalError::Encode("nan".into()),
            }
            .kind(),
            "argument_mismatch"
        );
    }
}
