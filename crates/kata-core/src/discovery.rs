//! Problem discovery: scans the corpus root for harness-eligible directories.

use crate::errors::HarnessError;
use crate::model::ProblemDescriptor;
use std::path::Path;

pub const DEFAULT_SOLUTION_FILE: &str = "solution.rs";
pub const DEFAULT_DESCRIPTOR_FILE: &str = "testcases.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveryOptions {
    /// Keep only problems whose directory name contains this substring.
    /// `None` and the empty string both mean no filtering.
    pub filter: Option<String>,
    pub solution_file: String,
    pub descriptor_file: String,
}

impl Default for DiscoveryOptions {
    fn default() -> Self {
        Self {
            filter: None,
            solution_file: DEFAULT_SOLUTION_FILE.to_string(),
            descriptor_file: DEFAULT_DESCRIPTOR_FILE.to_string(),
        }
    }
}

impl DiscoveryOptions {
    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    fn matches(&self, name: &str) -> bool {
        match self.filter.as_deref() {
            None | Some("") => true,
            Some(f) => name.contains(f),
        }
    }
}

/// Lists eligible problems under `root`, sorted by directory name.
///
/// A directory qualifies only if it holds both the solution file and the
/// descriptor file; anything else is skipped silently.
pub fn discover(root: &Path, opts: &DiscoveryOptions) -> Result<Vec<ProblemDescriptor>, HarnessError> {
    let entries = std::fs::read_dir(root).map_err(|source| HarnessError::Io {
        path: root.to_path_buf(),
        source,
    })?;

    let mut problems = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| HarnessError::Io {
            path: root.to_path_buf(),
            source,
        })?;
        let directory = entry.path();
        if !directory.is_dir() {
            continue;
        }
        let Some(name) = entry.file_name().to_str().map(str::to_string) else {
            tracing::debug!(path = %directory.display(), "skipping non-utf8 directory name");
            continue;
        };
        let solution_path = directory.join(&opts.solution_file);
        let descriptor_path = directory.join(&opts.descriptor_file);
        if !solution_path.is_file() || !descriptor_path.is_file() {
            tracing::debug!(problem = %name, "skipping: missing solution or descriptor");
            continue;
        }
        if !opts.matches(&name) {
            continue;
        }
        problems.push(ProblemDescriptor {
            name,
            directory,
            solution_path,
            descriptor_path,
        });
    }

    problems.sort_by(|a, b| a.name.cmp(&b.name));
    tracing::info!(root = %root.display(), count = problems.len(), "discovered problems");
    Ok(problems)
}
