use crate::model::{CaseResultRow, CaseStatus, SuiteErrorRow};
use crate::report::progress::{ProgressEvent, ProgressSink};
use crate::report::RunArtifacts;
use std::sync::Arc;

/// Format a single progress line for display.
#[must_use]
pub fn format_progress_line(done: usize, total: usize) -> String {
    format!("Running problem {}/{}...", done, total)
}

/// Progress sink printing to stderr. `None` for runs of at most one problem.
pub fn default_progress_sink(total: usize) -> Option<ProgressSink> {
    if total <= 1 {
        return None;
    }
    Some(Arc::new(move |ev: ProgressEvent| {
        eprintln!("{}", format_progress_line(ev.done, ev.total));
    }))
}

/// Lines describing one case; the first line is the headline.
pub fn format_case(r: &CaseResultRow) -> Vec<String> {
    let duration = r
        .duration_ms
        .map(|d| format!("({}ms)", d))
        .unwrap_or_default();
    match r.status {
        CaseStatus::Pass => vec![format!("✅ {}  {}", r.label, duration)],
        CaseStatus::Fail => {
            let actual = r
                .actual
                .as_ref()
                .map(|v| v.to_string())
                .unwrap_or_else(|| "-".into());
            vec![
                format!("❌ {}  {}", r.label, duration),
                format!("      expected: {}", r.expected),
                format!("      actual:   {}", actual),
            ]
        }
        CaseStatus::Error => vec![format!(
            "💥 {}  ERROR [{}]: {}",
            r.label,
            r.error_kind.as_deref().unwrap_or("other"),
            r.message
        )],
    }
}

pub fn format_suite_error(e: &SuiteErrorRow) -> String {
    format!("💥 {:<20} SUITE ERROR [{}]: {}", e.problem, e.kind, e.message)
}

pub fn print_summary(artifacts: &RunArtifacts, verbose: bool) {
    eprintln!();
    for r in &artifacts.results {
        if r.status == CaseStatus::Pass && !verbose {
            continue;
        }
        for line in format_case(r) {
            eprintln!("{}", line);
        }
    }
    for e in &artifacts.suite_errors {
        eprintln!("{}", format_suite_error(e));
    }

    let c = artifacts.counts();
    eprintln!("\n━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    eprintln!(
        "Summary: {} problems, {} passed, {} failed, {} error, {} suite errors",
        artifacts.problems.len(),
        c.passed,
        c.failed,
        c.errored,
        c.suite_errors
    );
}
