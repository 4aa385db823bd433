//! Configuration: YAML toolbox settings and command-line arguments

pub mod cli;
mod loader;
mod schema;

pub use cli::{
    parse_args, Cli, Command, LabelArgs, QuantizeArgs, RangeArgs, WilsonArgs,
};
pub use loader::{load_config, should_write, should_write_with, validate_config};
pub use schema::{OutputConfig, PathsConfig, QuantSpec, ToolboxConfig};

#[cfg(test)]
mod tests;
