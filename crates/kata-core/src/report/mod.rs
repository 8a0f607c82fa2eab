pub mod console;
pub mod json;
pub mod junit;
pub mod progress;
pub mod summary;

use crate::model::{CaseResultRow, CaseStatus, ProblemDescriptor, SuiteErrorRow};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunArtifacts {
    pub run_id: String,
    pub started_at: DateTime<Utc>,
    pub problems_root: PathBuf,
    /// Discovered problem names, in discovery order.
    pub problems: Vec<String>,
    pub results: Vec<CaseResultRow>,
    pub suite_errors: Vec<SuiteErrorRow>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counts {
    pub passed: usize,
    pub failed: usize,
    pub errored: usize,
    pub suite_errors: usize,
}

impl RunArtifacts {
    pub fn new(root: &Path, problems: &[ProblemDescriptor]) -> Self {
        Self {
            run_id: uuid::Uuid::new_v4().to_string(),
            started_at: Utc::now(),
            problems_root: root.to_path_buf(),
            problems: problems.iter().map(|p| p.name.clone()).collect(),
            results: Vec::new(),
            suite_errors: Vec::new(),
        }
    }

    pub fn counts(&self) -> Counts {
        let mut c = Counts {
            suite_errors: self.suite_errors.len(),
            ..Counts::default()
        };
        for r in &self.results {
            match r.status {
                CaseStatus::Pass => c.passed += 1,
                CaseStatus::Fail => c.failed += 1,
                CaseStatus::Error => c.errored += 1,
            }
        }
        c
    }
}
