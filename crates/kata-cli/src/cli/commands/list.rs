use super::settings;
use crate::cli::args::CorpusArgs;
use kata_core::discovery::discover;
use kata_core::report::summary::EXIT_SUCCESS;

pub fn run(args: &CorpusArgs) -> anyhow::Result<i32> {
    let cfg = settings::resolve(args)?;
    for problem in discover(&cfg.problems_dir, &cfg.discovery_options())? {
        println!("{}", problem.name);
    }
    Ok(EXIT_SUCCESS)
}
