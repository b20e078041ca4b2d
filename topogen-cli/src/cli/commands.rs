//! Command implementations and argument parsing for the topogen CLI.

use std::io::{self, Write};
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use thiserror::Error;
use topogen_core::{
    DEFAULT_EDGE_PROBABILITY, DEFAULT_NODE_COUNT, GenerationSummary, TopologyBuilder,
    TopologyError,
};
use tracing::{Span, field, info, instrument};

/// Destination written when `--output` is not supplied.
pub const DEFAULT_OUTPUT: &str = "graph1.graphml";

/// Top-level CLI options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(
    name = "topogen",
    about = "Generate connected random network topologies as GraphML."
)]
pub struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported CLI commands.
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Generate a connected random topology and write it as GraphML.
    Generate(GenerateCommand),
}

/// Options accepted by the `generate` command.
#[derive(Debug, Args, Clone)]
pub struct GenerateCommand {
    /// Number of nodes in the topology.
    ///
    /// The dense table needs `nodes²` bytes, so counts in the tens of
    /// thousands already exhaust typical memory. Counts whose table cannot be
    /// addressed at all are rejected before anything is allocated.
    #[arg(
        long = "nodes",
        short = 'n',
        default_value_t = DEFAULT_NODE_COUNT,
        value_parser = clap::value_parser!(usize),
    )]
    pub nodes: usize,

    /// Probability of connecting each pair of nodes, within `[0, 1]`.
    #[arg(long = "edge-probability", short = 'p', default_value_t = DEFAULT_EDGE_PROBABILITY)]
    pub edge_probability: f64,

    /// Seed making the topology reproducible; drawn from OS entropy when absent.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Destination of the GraphML document.
    #[arg(long, short = 'o', default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,
}

/// Errors surfaced while executing CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// The output path names an existing directory.
    #[error("output path `{path}` is a directory")]
    OutputIsDirectory {
        /// Path supplied by the user.
        path: PathBuf,
    },
    /// Topology generation or writing failed.
    #[error(transparent)]
    Core(#[from] TopologyError),
}

/// Summarises the outcome of executing a CLI command.
#[derive(Debug, Clone)]
pub struct ExecutionSummary {
    /// Path the GraphML document was written to.
    pub output: PathBuf,
    /// Seed used for generation, if one was supplied.
    pub seed: Option<u64>,
    /// Statistics reported by the generator.
    pub generation: GenerationSummary,
}

/// Executes the CLI command represented by `cli`.
///
/// # Errors
/// Returns [`CliError`] when validation, generation, or writing fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use topogen_cli::cli::{Cli, Command, GenerateCommand, run_cli};
/// # use tempfile::TempDir;
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let dir = TempDir::new()?;
/// let cli = Cli {
///     command: Command::Generate(GenerateCommand {
///         nodes: 8,
///         edge_probability: 0.2,
///         seed: Some(1),
///         output: dir.path().join("graph.graphml"),
///     }),
/// };
/// let summary = run_cli(cli)?;
/// assert_eq!(summary.generation.nodes, 8);
/// assert_eq!(summary.generation.final_components, 1);
/// # Ok(())
/// # }
/// ```
#[instrument(
    name = "cli.run",
    err,
    skip(cli),
    fields(command = field::Empty),
)]
pub fn run_cli(cli: Cli) -> Result<ExecutionSummary, CliError> {
    match cli.command {
        Command::Generate(generate) => {
            Span::current().record("command", field::display("generate"));
            run_generate(generate)
        }
    }
}

#[instrument(
    name = "cli.generate",
    err,
    skip(command),
    fields(nodes = command.nodes, output = %command.output.display()),
)]
pub(super) fn run_generate(command: GenerateCommand) -> Result<ExecutionSummary, CliError> {
    let GenerateCommand {
        nodes,
        edge_probability,
        seed,
        output,
    } = command;

    let generator = TopologyBuilder::new()
        .with_node_count(nodes)
        .with_edge_probability(edge_probability)
        .with_optional_seed(seed)
        .build()?;

    if output.is_dir() {
        return Err(CliError::OutputIsDirectory { path: output });
    }

    let topology = generator.generate()?;
    topology.write_graphml(&output)?;

    let generation = *topology.summary();
    info!(
        output = %output.display(),
        edges = generation.edges,
        "command completed"
    );
    Ok(ExecutionSummary {
        output,
        seed,
        generation,
    })
}

/// Renders `summary` to `writer` in a human-readable text format.
///
/// # Errors
/// Returns [`io::Error`] if writing to the supplied writer fails.
pub fn render_summary(summary: &ExecutionSummary, mut writer: impl Write) -> io::Result<()> {
    let generation = &summary.generation;
    writeln!(writer, "output: {}", summary.output.display())?;
    match summary.seed {
        Some(seed) => writeln!(writer, "seed: {seed}")?,
        None => writeln!(writer, "seed: <entropy>")?,
    }
    writeln!(writer, "nodes: {}", generation.nodes)?;
    writeln!(writer, "edges: {}", generation.edges)?;
    writeln!(writer, "sampled edges: {}", generation.sampled_edges)?;
    writeln!(
        writer,
        "initial components: {}",
        generation.initial_components
    )?;
    writeln!(writer, "merges: {}", generation.repair.merges)?;
    writeln!(writer, "bridging edges: {}", generation.repair.new_edges)?;
    Ok(())
}
