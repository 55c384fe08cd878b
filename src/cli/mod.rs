pub mod commands;
pub mod core;
pub mod formatting;
mod help;
mod io;
pub mod output;
pub mod registry;
mod shell;
mod shell_context;

pub use self::core::{CliError, CliMode, CommandError, ShellContext};
pub use shell::{run_cli, SCRIPT_ENV};
