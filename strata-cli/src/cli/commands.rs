//! Argument parsing and command execution for the `strata` binary.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use strata_core::{
    ClusteringError, ClusteringResult, DataSource, DataSourceError, ExactIndex, HdbscanBuilder,
    Metric, MstStrategy,
};
use strata_providers_dense::{DenseMatrixProvider, DenseMatrixProviderError};
use thiserror::Error;
use tracing::{Span, field, info, instrument};

const DEFAULT_MIN_CLUSTER_SIZE: usize = 5;
const DEFAULT_MIN_NEIGHBOURS: usize = 5;

/// Top-level options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(name = "strata", about = "Density-based hierarchical clustering.")]
pub struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported commands.
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Cluster a data source with HDBSCAN.
    Run(RunCommand),
}

/// Options accepted by the `run` command.
#[derive(Debug, Args, Clone)]
pub struct RunCommand {
    /// Smallest group reported as a cluster.
    #[arg(long = "min-cluster-size", default_value_t = DEFAULT_MIN_CLUSTER_SIZE)]
    pub min_cluster_size: usize,

    /// Neighbour count used for core distances, the point itself included.
    #[arg(long = "min-neighbours", default_value_t = DEFAULT_MIN_NEIGHBOURS)]
    pub min_neighbours: usize,

    /// Distance metric: euclidean, squared-euclidean, cosine or angular.
    #[arg(long, default_value_t = Metric::Euclidean)]
    pub metric: Metric,

    /// Spanning tree construction strategy.
    #[arg(long = "mst", value_enum, default_value_t = MstArg::Boruvka)]
    pub mst: MstArg,

    /// Worker threads for Borůvka rounds (defaults to the core count less two).
    #[arg(long)]
    pub workers: Option<usize>,

    /// Seed for the Prim start vertex.
    #[arg(long, default_value_t = 0)]
    pub seed: u64,

    /// Data source configuration.
    #[command(subcommand)]
    pub source: RunSource,
}

/// Spanning tree strategies selectable on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MstArg {
    /// Parallel Borůvka rounds.
    Boruvka,
    /// Sequential Prim growth.
    Prim,
}

impl From<MstArg> for MstStrategy {
    fn from(value: MstArg) -> Self {
        match value {
            MstArg::Boruvka => Self::Boruvka,
            MstArg::Prim => Self::Prim,
        }
    }
}

/// Input data sources.
#[derive(Debug, Subcommand, Clone)]
pub enum RunSource {
    /// Read a Parquet file containing a `FixedSizeList<Float32, D>` column.
    Parquet(ParquetArgs),
}

/// Parquet ingestion arguments.
#[derive(Debug, Args, Clone)]
pub struct ParquetArgs {
    /// Path to the Parquet file containing feature vectors.
    pub path: PathBuf,

    /// Column containing `FixedSizeList<Float32, D>` rows.
    #[arg(long)]
    pub column: String,

    /// Override name for the data source (defaults to the file stem).
    #[arg(long)]
    pub name: Option<String>,
}

/// Errors surfaced while executing commands.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CliError {
    /// Dense matrix ingestion failed.
    #[error(transparent)]
    Dense(#[from] DenseMatrixProviderError),
    /// The nearest-neighbour index could not read the source.
    #[error("failed to index `{data_source}`: {source}")]
    Index {
        /// Name of the data source being indexed.
        data_source: String,
        /// Underlying read failure.
        #[source]
        source: DataSourceError,
    },
    /// Clustering failed.
    #[error(transparent)]
    Core(#[from] ClusteringError),
}

/// Outcome of executing a command.
#[derive(Debug, Clone)]
pub struct ExecutionSummary {
    /// Name reported by the data source.
    pub data_source: String,
    /// Metric the run used.
    pub metric: Metric,
    /// Spanning tree strategy the run used.
    pub strategy: MstStrategy,
    /// Clusters and outliers.
    pub result: ClusteringResult,
}

/// Executes the command represented by `cli`.
///
/// # Errors
/// Returns [`CliError`] when loading, indexing or clustering fails.
#[instrument(name = "cli.run", err, skip(cli), fields(command = field::Empty))]
pub fn run_cli(cli: Cli) -> Result<ExecutionSummary, CliError> {
    match cli.command {
        Command::Run(run) => {
            Span::current().record("command", field::display("run"));
            run_command(run)
        }
    }
}

#[instrument(
    name = "cli.execute",
    err,
    skip(command),
    fields(
        min_cluster_size = command.min_cluster_size,
        min_neighbours = command.min_neighbours,
        metric = %command.metric,
        source = field::Empty,
    ),
)]
pub(super) fn run_command(command: RunCommand) -> Result<ExecutionSummary, CliError> {
    let RunCommand {
        min_cluster_size,
        min_neighbours,
        metric,
        mst,
        workers,
        seed,
        source,
    } = command;
    let mut builder = HdbscanBuilder::new()
        .with_min_cluster_size(min_cluster_size)
        .with_min_neighbours(min_neighbours)
        .with_strategy(mst.into())
        .with_seed(seed);
    if let Some(workers) = workers {
        builder = builder.with_max_workers(workers);
    }

    let provider = match source {
        RunSource::Parquet(args) => {
            Span::current().record("source", field::display("parquet"));
            load_parquet(args)?
        }
    };
    let summary = cluster_provider(&builder, metric, &provider)?;
    info!(
        data_source = summary.data_source.as_str(),
        clusters = summary.result.cluster_count(),
        outliers = summary.result.outliers().len(),
        "command completed"
    );
    Ok(summary)
}

#[instrument(
    name = "cli.load_parquet",
    err,
    skip(args),
    fields(path = %args.path.display(), column = %args.column, override_name = field::Empty),
)]
pub(super) fn load_parquet(args: ParquetArgs) -> Result<DenseMatrixProvider, CliError> {
    let ParquetArgs { path, column, name } = args;
    Span::current().record(
        "override_name",
        field::display(name.as_deref().unwrap_or("<derived>")),
    );
    let chosen_name = derive_data_source_name(&path, name.as_deref());
    Ok(DenseMatrixProvider::try_from_parquet_path(
        chosen_name,
        &path,
        &column,
    )?)
}

#[instrument(
    name = "cli.cluster",
    err,
    skip(builder, provider),
    fields(data_source = provider.name(), items = provider.len(), strategy = %builder.strategy()),
)]
pub(super) fn cluster_provider(
    builder: &HdbscanBuilder,
    metric: Metric,
    provider: &DenseMatrixProvider,
) -> Result<ExecutionSummary, CliError> {
    let index = ExactIndex::from_source(provider, metric).map_err(|source| CliError::Index {
        data_source: provider.name().to_owned(),
        source,
    })?;
    let hdbscan = builder.clone().build(index, metric)?;
    let result = hdbscan.cluster(provider)?;
    Ok(ExecutionSummary {
        data_source: provider.name().to_owned(),
        metric,
        strategy: hdbscan.strategy(),
        result,
    })
}

pub(super) fn derive_data_source_name(path: &Path, override_name: Option<&str>) -> String {
    if let Some(name) = override_name {
        return name.to_owned();
    }

    path.file_stem()
        .and_then(|value| value.to_str())
        .map_or_else(|| "data_source".to_owned(), ToOwned::to_owned)
}

/// Renders `summary` to `writer`: a header, one line per cluster listing its
/// member indices and a final line with the outliers.
///
/// # Errors
/// Returns [`io::Error`] if writing to `writer` fails.
///
/// # Examples
/// ```
/// use strata_cli::cli::{ExecutionSummary, render_summary};
/// use strata_core::{ClusteringResult, Metric, MstStrategy};
///
/// let summary = ExecutionSummary {
///     data_source: "demo".into(),
///     metric: Metric::Euclidean,
///     strategy: MstStrategy::Boruvka,
///     result: ClusteringResult::try_from_clusters(3, vec![vec![0, 1]])?,
/// };
/// let mut buffer = Vec::new();
/// render_summary(&summary, &mut buffer)?;
/// let text = String::from_utf8(buffer)?;
/// assert!(text.contains("cluster 0\t0 1"));
/// assert!(text.ends_with("outliers\t2\n"));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn render_summary(summary: &ExecutionSummary, mut writer: impl Write) -> io::Result<()> {
    let result = &summary.result;
    writeln!(writer, "data source: {}", summary.data_source)?;
    writeln!(
        writer,
        "metric: {}, strategy: {}",
        summary.metric, summary.strategy
    )?;
    writeln!(
        writer,
        "points: {}, clusters: {}, outliers: {}",
        result.point_count(),
        result.cluster_count(),
        result.outliers().len()
    )?;
    for (id, members) in result.clusters().iter().enumerate() {
        writeln!(writer, "cluster {id}\t{}", join_indices(members))?;
    }
    writeln!(writer, "outliers\t{}", join_indices(result.outliers()))
}

fn join_indices(indices: &[usize]) -> String {
    indices
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}
