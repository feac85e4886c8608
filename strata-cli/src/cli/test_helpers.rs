//! Small helpers shared across CLI tests.

use std::path::PathBuf;

use tempfile::TempDir;

use super::commands::run_command;
use super::{CliError, MstArg, ParquetArgs, RunCommand, RunSource};
use strata_core::Metric;

pub(super) fn temp_dir() -> TempDir {
    match TempDir::new() {
        Ok(dir) => dir,
        Err(err) => panic!("failed to create temp dir: {err}"),
    }
}

/// A `run parquet` command over `path` with small cluster parameters.
pub(super) fn parquet_command(path: PathBuf, column: &str, name: Option<&str>) -> RunCommand {
    RunCommand {
        min_cluster_size: 3,
        min_neighbours: 2,
        metric: Metric::Euclidean,
        mst: MstArg::Boruvka,
        workers: Some(2),
        seed: 0,
        source: RunSource::Parquet(ParquetArgs {
            path,
            column: column.to_owned(),
            name: name.map(ToOwned::to_owned),
        }),
    }
}

pub(super) fn run_command_expecting_error(cmd: RunCommand, panic_msg: &str) -> CliError {
    match run_command(cmd) {
        Ok(_) => panic!("{panic_msg}"),
        Err(err) => err,
    }
}
