//! CLI surface for the codecull binary.

mod args;
mod commands;
mod output;

pub use args::{Cli, Commands};
pub use commands::{curate_command, init_config, print_default_config, validate_config};
