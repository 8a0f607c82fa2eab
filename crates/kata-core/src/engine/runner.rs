use crate::compare::json_eq;
use crate::errors::{HarnessError, InvokeError};
use crate::invoke::{quietly, ExportFn, Invoker, SolutionRegistry};
use crate::marshal::{release_all, Codec, Marshaller};
use crate::model::{case_label, CaseResultRow, CaseStatus, ProblemDescriptor, SuiteErrorRow};
use crate::report::progress::{ProgressEvent, ProgressSink};
use crate::report::RunArtifacts;
use crate::schema::{load_suite, TestCase, TestSuiteSpec};
use serde_json::Value;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

#[derive(Debug, Clone)]
pub struct RunPolicy {
    /// Maximum number of problems executing at once.
    pub parallel: usize,
}

impl Default for RunPolicy {
    fn default() -> Self {
        Self {
            parallel: crate::config::DEFAULT_PARALLEL,
        }
    }
}

/// Everything one problem produced: its case rows, or the reason its suite
/// could not run.
#[derive(Debug, Clone)]
pub struct ProblemOutcome {
    pub problem: String,
    pub cases: Vec<CaseResultRow>,
    pub error: Option<SuiteErrorRow>,
}

impl ProblemOutcome {
    fn suite_error(problem: &str, kind: &str, message: impl Into<String>) -> Self {
        Self {
            problem: problem.to_string(),
            cases: Vec::new(),
            error: Some(SuiteErrorRow {
                problem: problem.to_string(),
                kind: kind.to_string(),
                message: message.into(),
            }),
        }
    }
}

struct PreparedSuite {
    spec: TestSuiteSpec,
    export: ExportFn,
    params: Option<Vec<Codec>>,
    ret: Codec,
}

impl PreparedSuite {
    fn param_codec(&self, index: usize) -> Codec {
        self.params
            .as_ref()
            .and_then(|codecs| codecs.get(index).copied())
            .unwrap_or(Codec::PassThrough)
    }
}

#[derive(Clone)]
pub struct Runner {
    pub invoker: Arc<Invoker>,
    pub marshaller: Arc<Marshaller>,
    pub policy: RunPolicy,
}

impl Runner {
    pub fn new(registry: SolutionRegistry) -> Self {
        Self {
            invoker: Arc::new(Invoker::new(registry)),
            marshaller: Arc::new(Marshaller::default()),
            policy: RunPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: RunPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_marshaller(mut self, marshaller: Marshaller) -> Self {
        self.marshaller = Arc::new(marshaller);
        self
    }

    /// Runs every problem; problems execute concurrently on the blocking pool,
    /// results are returned sorted by problem name then case index.
    pub async fn run_suite(
        &self,
        root: &Path,
        problems: Vec<ProblemDescriptor>,
        progress: Option<ProgressSink>,
    ) -> anyhow::Result<RunArtifacts> {
        let mut artifacts = RunArtifacts::new(root, &problems);

        let sem = Arc::new(Semaphore::new(self.policy.parallel.max(1)));
        let mut join_set = JoinSet::new();
        let total = problems.len();

        for problem in problems {
            let permit = sem.clone().acquire_owned().await?;
            let this = self.clone();
            join_set.spawn_blocking(move || {
                let _permit = permit;
                quietly(|| this.run_problem(&problem)).unwrap_or_else(|message| {
                    tracing::warn!(problem = %problem.name, panic = %message, "harness panicked");
                    ProblemOutcome::suite_error(&problem.name, "harness_panic", message)
                })
            });
        }

        let mut done = 0;
        while let Some(res) = join_set.join_next().await {
            let outcome = match res {
                Ok(outcome) => outcome,
                // Panics are caught inside the task, so only cancellation lands here.
                Err(e) => ProblemOutcome::suite_error("unknown", "join", format!("join error: {}", e)),
            };
            artifacts.results.extend(outcome.cases);
            artifacts.suite_errors.extend(outcome.error);
            done += 1;
            if let Some(ref sink) = progress {
                sink(ProgressEvent { done, total });
            }
        }

        // Deterministic order regardless of completion order.
        artifacts.results.sort_by(|a, b| {
            a.problem
                .cmp(&b.problem)
                .then(a.case_index.cmp(&b.case_index))
        });
        artifacts.suite_errors.sort_by(|a, b| a.problem.cmp(&b.problem));
        Ok(artifacts)
    }

    /// Runs one problem's suite in declared case order. Never fails: suite-level
    /// problems are reported in [`ProblemOutcome::error`].
    pub fn run_problem(&self, problem: &ProblemDescriptor) -> ProblemOutcome {
        let span = tracing::info_span!("problem", name = %problem.name);
        let _guard = span.enter();

        let suite = match self.prepare(problem) {
            Ok(suite) => suite,
            Err(e) => {
                tracing::warn!(error = %e, "suite failed to load");
                return ProblemOutcome::suite_error(&problem.name, e.kind(), e.to_string());
            }
        };

        if suite.spec.cases.is_empty() {
            tracing::warn!("descriptor declares no cases");
        }
        tracing::info!(
            function = %suite.spec.function_name,
            cases = suite.spec.cases.len(),
            "running suite"
        );

        let cases = suite
            .spec
            .cases
            .iter()
            .enumerate()
            .map(|(index, case)| self.run_case(problem, &suite, index, case))
            .collect();

        ProblemOutcome {
            problem: problem.name.clone(),
            cases,
            error: None,
        }
    }

    fn prepare(&self, problem: &ProblemDescriptor) -> Result<PreparedSuite, HarnessError> {
        let spec = load_suite(&problem.descriptor_path)?;
        let export = self.invoker.resolve(problem, &spec.function_name)?;
        // Every tag is resolved before the first invocation.
        let params = spec
            .param_types
            .as_ref()
            .map(|types| {
                types
                    .iter()
                    .map(|t| self.marshaller.resolve(Some(t)))
                    .collect::<Result<Vec<_>, _>>()
            })
            .transpose()?;
        let ret = self.marshaller.resolve(spec.return_type())?;
        Ok(PreparedSuite {
            spec,
            export,
            params,
            ret,
        })
    }

    fn run_case(
        &self,
        problem: &ProblemDescriptor,
        suite: &PreparedSuite,
        index: usize,
        case: &TestCase,
    ) -> CaseResultRow {
        let started = Instant::now();
        let mut row = CaseResultRow {
            problem: problem.name.clone(),
            case_index: index,
            label: case_label(&problem.name, index, &case.input, &case.output),
            status: CaseStatus::Error,
            input: case.input.clone(),
            expected: case.output.clone(),
            actual: None,
            message: String::new(),
            error_kind: None,
            duration_ms: None,
        };

        match Self::execute_case(suite, case) {
            Ok(actual) => {
                if json_eq(&actual, &case.output) {
                    row.status = CaseStatus::Pass;
                } else {
                    row.status = CaseStatus::Fail;
                    row.message = format!("expected {}, got {}", case.output, actual);
                    row.error_kind = Some("assertion_mismatch".into());
                }
                row.actual = Some(actual);
            }
            Err(e) => {
                row.message = e.to_string();
                row.error_kind = Some(e.kind().to_string());
            }
        }
        row.duration_ms = Some(started.elapsed().as_millis().min(u128::from(u64::MAX)) as u64);

        tracing::debug!(case = %row.test_id(), status = ?row.status, "case finished");
        row
    }

    fn execute_case(suite: &PreparedSuite, case: &TestCase) -> Result<Value, InvokeError> {
        if let Some(codecs) = &suite.params {
            if codecs.len() != case.input.len() {
                return Err(InvokeError::ArgumentMismatch(format!(
                    "paramTypes declares {} type(s), case supplies {} input(s)",
                    codecs.len(),
                    case.input.len()
                )));
            }
        }

        let mut args = Vec::with_capacity(case.input.len());
        for (index, value) in case.input.iter().enumerate() {
            match suite.param_codec(index).to_domain(value) {
                Ok(arg) => args.push(arg),
                Err(source) => {
                    release_all(args);
                    return Err(InvokeError::Argument { index, source });
                }
            }
        }

        let result = Invoker::call(&suite.export, args)?;
        suite.ret.to_json(result).map_err(InvokeError::Result)
    }
}
