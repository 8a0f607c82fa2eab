use crate::model::CaseStatus;
use crate::report::RunArtifacts;
use std::path::Path;

/// Renders one `<testsuite>`; each case is a `<testcase>` named by its label and
/// classed by its problem. Suites that failed to load appear as errored cases.
pub fn render_junit(suite: &str, artifacts: &RunArtifacts) -> String {
    let c = artifacts.counts();
    let mut xml = String::new();
    xml.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
    xml.push('\n');
    xml.push_str(&format!(
        r#"<testsuite name="{}" tests="{}" failures="{}" errors="{}">"#,
        escape(suite),
        artifacts.results.len() + c.suite_errors,
        c.failed,
        c.errored + c.suite_errors
    ));
    xml.push('\n');

    for r in &artifacts.results {
        xml.push_str(&format!(
            r#"  <testcase classname="{}" name="{}">"#,
            escape(&r.problem),
            escape(&r.label)
        ));
        match r.status {
            CaseStatus::Pass => {}
            CaseStatus::Fail => {
                xml.push_str(&format!(r#"<failure message="{}"/>"#, escape(&r.message)))
            }
            CaseStatus::Error => {
                xml.push_str(&format!(r#"<error message="{}"/>"#, escape(&r.message)))
            }
        }
        xml.push_str("</testcase>\n");
    }

    for e in &artifacts.suite_errors {
        xml.push_str(&format!(
            r#"  <testcase classname="{}" name="{}"><error type="{}" message="{}"/></testcase>"#,
            escape(&e.problem),
            escape(&e.problem),
            escape(&e.kind),
            escape(&e.message)
        ));
        xml.push('\n');
    }

    xml.push_str("</testsuite>\n");
    xml
}

pub fn write_junit(suite: &str, artifacts: &RunArtifacts, out: &Path) -> anyhow::Result<()> {
    std::fs::write(out, render_junit(suite, artifacts))?;
    Ok(())
}

fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
