//! Command-line interface orchestration for topogen.
//!
//! The CLI offers a `generate` command that synthesizes a connected random
//! topology and writes it as GraphML.

mod commands;

pub use commands::{
    Cli, CliError, Command, DEFAULT_OUTPUT, ExecutionSummary, GenerateCommand, render_summary,
    run_cli,
};

#[cfg(test)]
mod test_helpers;
