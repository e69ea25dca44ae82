//! One module per subcommand; each exposes an `execute` function.

pub mod completions;
pub mod config;
pub mod generate;
pub mod init;
pub mod list;
pub mod setup;
