use super::settings;
use crate::cli::args::RunArgs;
use kata_core::discovery::discover;
use kata_core::engine::{RunPolicy, Runner};
use kata_core::report::console::{default_progress_sink, print_summary};
use kata_core::report::json::write_json;
use kata_core::report::junit::write_junit;
use kata_core::report::summary::{decide, write_summary, Summary};
use kata_problems::default_registry;

const JUNIT_SUITE_NAME: &str = "kata";

pub async fn run(args: RunArgs) -> anyhow::Result<i32> {
    let mut cfg = match settings::resolve(&args.corpus) {
        Ok(cfg) => cfg,
        Err(e) => return setup_error(&args, e.to_string()),
    };
    if let Some(parallel) = args.parallel {
        cfg.parallel = Some(parallel);
    }

    let root = cfg.problems_dir.clone();
    let problems = match discover(&root, &cfg.discovery_options()) {
        Ok(p) => p,
        Err(e) => return setup_error(&args, e.to_string()),
    };

    tracing::info!(root = %root.display(), problems = problems.len(), "starting run");
    let progress = default_progress_sink(problems.len());
    let runner = Runner::new(default_registry()).with_policy(RunPolicy {
        parallel: cfg.parallel(),
    });
    let artifacts = match runner.run_suite(&root, problems, progress).await {
        Ok(a) => a,
        Err(e) => return setup_error(&args, format!("run failed: {e}")),
    };

    print_summary(&artifacts, args.verbose);

    if let Some(path) = &args.json {
        if let Err(e) = write_json(&artifacts, path) {
            return setup_error(&args, format!("failed to write {}: {e}", path.display()));
        }
    }
    if let Some(path) = &args.junit {
        if let Err(e) = write_junit(JUNIT_SUITE_NAME, &artifacts, path) {
            return setup_error(&args, format!("failed to write {}: {e}", path.display()));
        }
    }

    let summary = decide(&artifacts, !args.allow_empty);
    if let Some(message) = &summary.message {
        eprintln!("{}: {}", summary.reason_code, message);
    }
    if let Some(path) = &args.summary {
        write_summary(&summary, path)?;
    }
    Ok(summary.exit_code)
}

fn setup_error(args: &RunArgs, message: String) -> anyhow::Result<i32> {
    eprintln!("config error: {}", message);
    let summary = Summary::setup_error(message);
    if let Some(path) = &args.summary {
        if let Err(e) = write_summary(&summary, path) {
            eprintln!("WARNING: failed to write summary: {}", e);
        }
    }
    Ok(summary.exit_code)
}
