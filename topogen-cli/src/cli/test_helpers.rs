//! Small helpers shared across CLI tests.

use std::path::PathBuf;

use tempfile::TempDir;

use super::commands::run_generate;
use super::{Cli, CliError, Command, GenerateCommand, run_cli};

pub(super) fn temp_dir() -> TempDir {
    match TempDir::new() {
        Ok(dir) => dir,
        Err(err) => panic!("failed to create temp dir: {err}"),
    }
}

pub(super) fn generate(
    nodes: usize,
    edge_probability: f64,
    seed: Option<u64>,
    output: PathBuf,
) -> GenerateCommand {
    GenerateCommand {
        nodes,
        edge_probability,
        seed,
        output,
    }
}

pub(super) fn run_cli_expecting_error(command: GenerateCommand, panic_msg: &str) -> CliError {
    let cli = Cli {
        command: Command::Generate(command),
    };
    match run_cli(cli) {
        Ok(_) => panic!("{panic_msg}"),
        Err(err) => err,
    }
}

pub(super) fn run_generate_expecting_error(command: GenerateCommand, panic_msg: &str) -> CliError {
    match run_generate(command) {
        Ok(_) => panic!("{panic_msg}"),
        Err(err) => err,
    }
}
