//! CLI layer: argument parsing, command dispatch and the interactive menu

pub mod args;
pub mod commands;
pub mod error;
pub mod input;
pub mod output;
pub mod session;

pub use args::{Cli, Commands, ConfigCommands};
pub use error::{CliError, CliResult};
pub use session::{Flow, MenuSession};
