//! Command-line orchestration for strata.
//!
//! The `run` command loads a Parquet dense matrix, indexes it exhaustively
//! under the chosen metric and prints the HDBSCAN clusters and outliers.

mod commands;

pub use commands::{
    Cli, CliError, Command, ExecutionSummary, MstArg, ParquetArgs, RunCommand, RunSource,
    render_summary, run_cli,
};

#[cfg(test)]
mod test_fixtures;
#[cfg(test)]
mod test_helpers;
