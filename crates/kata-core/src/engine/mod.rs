pub mod runner;

pub use runner::{ProblemOutcome, RunPolicy, Runner};
