//! CLI command implementations

mod label;
mod quantize;
mod range;
mod wilson;


use crate::cli::LogLevel;
use crate::config::{load_config, Cli, Command, ToolboxConfig};

/// Execute a CLI command based on the parsed arguments
pub fn run_command(cli: Cli) -> Result<(), String> {
    let log_level = LogLevel::from_flags(cli.quiet, cli.verbose);

    let config = match &cli.config {
        Some(path) => load_config(path).map_err(|e| e.to_string())?,
        None => ToolboxConfig::default(),
    };
    tracing::debug!(command = ?cli.command, config = ?cli.config, "running command");

    match cli.command {
        Command::Quantize(args) => quantize::run_quantize(args, &config, log_level),
        Command::Wilson(args) => wilson::run_wilson(args, log_level),
        Command::Label(args) => label::run_label(args, log_level),
        Command::Range(args) => range::run_range(args, log_level),
    }
}
