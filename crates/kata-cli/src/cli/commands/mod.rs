use super::args::*;

pub mod list;
pub mod run;
pub mod settings;

use kata_core::report::summary::EXIT_SUCCESS;

pub async fn dispatch(cli: Cli) -> anyhow::Result<i32> {
    match cli.cmd {
        Command::Run(args) => run::run(args).await,
        Command::List(args) => list::run(&args),
        Command::Version => {
            println!("kata {}", env!("CARGO_PKG_VERSION"));
            Ok(EXIT_SUCCESS)
        }
    }
}
