//! Global arguments that apply to every subcommand.
//!
//! Flattened into [`super::Cli`]; every flag is `global`, so it may appear
//! before or after the subcommand name.

use clap::Args;
use std::path::PathBuf;

/// Global arguments for all commands.
#[derive(Debug, Args)]
pub struct GlobalArgs {
    /// Model version to use.
    ///
    /// A tag or branch of the model repository; `latest` resolves to the
    /// newest release.
    #[arg(
        short = 't',
        long = "tag",
        global = true,
        value_name = "TAG",
        default_value = "latest",
        help = "Tag or branch of the model (default: latest)"
    )]
    pub tag: String,

    /// Re-download the artifact even when it is cached.
    #[arg(
        short = 'f',
        long = "force",
        global = true,
        help = "Force a fresh download of the model"
    )]
    pub force: bool,

    /// Owner of the model repository; overrides `source.owner`.
    #[arg(long = "owner", global = true, value_name = "OWNER")]
    pub owner: Option<String>,

    /// Name of the model repository; overrides `source.repository`.
    #[arg(long = "repo", global = true, value_name = "REPO")]
    pub repo: Option<String>,

    /// Log level on stderr: warn by default, then info, debug, trace.
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        global = true,
        help = "More log output (-v info, -vv debug, -vvv trace)"
    )]
    pub verbose: u8,

    /// Only errors are printed.
    #[arg(short = 'q', long = "quiet", global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Plain output without ANSI codes; `NO_COLOR` sets it too.
    #[arg(long = "no-color", global = true, env = "NO_COLOR")]
    pub no_color: bool,

    /// Configuration file to read instead of the user config file.
    ///
    /// Long form only: `-c` belongs to `setup --component`.
    #[arg(long = "config", global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[arg(long = "output-format", global = true, value_enum, default_value = "auto")]
    pub output_format: OutputFormat,
}

/// How results are rendered on stdout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human on a terminal, plain otherwise.
    #[default]
    Auto,
    /// Colours, symbols and a progress spinner.
    Human,
    /// No colours, no spinner.
    Plain,
    /// List results as a JSON array.
    Json,
}

#[cfg(test)]
impl GlobalArgs {
    /// Defaults as clap would produce them for a bare invocation.
    pub(crate) fn for_tests() -> Self {
        Self {
            tag: "latest".into(),
            force: false,
            owner: None,
            repo: None,
            verbose: 0,
            quiet: false,
            no_color: true,
            config: None,
            output_format: OutputFormat::Plain,
        }
    }
}
