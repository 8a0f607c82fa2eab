use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "kata",
    version,
    about = "Data-driven test harness for a corpus of algorithm exercises"
)]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run every discovered problem against its test cases
    Run(RunArgs),
    /// List the problems discovery would run
    List(CorpusArgs),
    Version,
}

/// Where the corpus lives and which problems to pick from it.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct CorpusArgs {
    /// Config file (defaults to ./kata.yaml when it exists)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Corpus root; overrides `problems_dir` from the config file
    #[arg(long)]
    pub problems: Option<PathBuf>,

    /// Only problems whose directory name contains this substring
    #[arg(long, env = "KATA_FILTER")]
    pub filter: Option<String>,
}

#[derive(clap::Args, Debug, Clone, Default)]
pub struct RunArgs {
    #[command(flatten)]
    pub corpus: CorpusArgs,

    /// Maximum number of problems running at once
    #[arg(long)]
    pub parallel: Option<usize>,

    /// Write run artifacts as JSON
    #[arg(long)]
    pub json: Option<PathBuf>,

    /// Write a JUnit XML report
    #[arg(long)]
    pub junit: Option<PathBuf>,

    /// Write the machine-readable summary (exit code and reason code)
    #[arg(long)]
    pub summary: Option<PathBuf>,

    /// Print passing cases too
    #[arg(long, short)]
    pub verbose: bool,

    /// Succeed when discovery finds no problems
    #[arg(long)]
    pub allow_empty: bool,
}
