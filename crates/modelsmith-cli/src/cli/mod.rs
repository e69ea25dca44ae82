//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "modelsmith",
    bin_name = "modelsmith",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Generate model classes and consumer projects from a versioned information model",
    long_about = "modelsmith downloads a versioned XMI information model, generates \
                  resource classes for every model class, and scaffolds consumer \
                  projects wired to a chosen component and package.",
    after_help = "EXAMPLES:\n\
        \x20 modelsmith listTags\n\
        \x20 modelsmith --tag v3.1.0 listPackages\n\
        \x20 modelsmith generate --force\n\
        \x20 modelsmith setup -n elev -c utdanning -p elev\n\
        \x20 modelsmith completions bash > /usr/share/bash-completion/completions/modelsmith",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Generate resource classes for the whole model.
    #[command(
        about = "Generate model classes into the generated area",
        after_help = "EXAMPLES:\n\
            \x20 modelsmith generate\n\
            \x20 modelsmith --tag v3.1.0 generate --force"
    )]
    Generate,

    /// List the model's packages.
    #[command(
        name = "listPackages",
        visible_alias = "list-packages",
        about = "List the distinct packages of the model"
    )]
    ListPackages,

    /// List the tags of the model repository.
    #[command(
        name = "listTags",
        visible_alias = "list-tags",
        about = "List tags of the model repository"
    )]
    ListTags,

    /// List the branches of the model repository.
    #[command(
        name = "listBranches",
        visible_alias = "list-branches",
        about = "List branches of the model repository"
    )]
    ListBranches,

    /// Create a consumer project for one component and package.
    #[command(
        about = "Create a consumer project",
        after_help = "EXAMPLES:\n\
            \x20 modelsmith setup --name elev --component utdanning --package elev\n\
            \x20 modelsmith setup -n test -c felles -p kodeverk --includePerson\n\
            \x20 modelsmith --tag v3.1.0 setup -n arkiv -c arkiv"
    )]
    Setup(SetupArgs),

    /// Write a default configuration file.
    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 modelsmith init           # user config location\n\
            \x20 modelsmith init --local   # .modelsmith.toml in CWD\n\
            \x20 modelsmith init --force   # overwrite an existing file"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 modelsmith completions bash > ~/.local/share/bash-completion/completions/modelsmith\n\
            \x20 modelsmith completions zsh  > ~/.zfunc/_modelsmith\n\
            \x20 modelsmith completions fish > ~/.config/fish/completions/modelsmith.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the effective configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 modelsmith config get source.owner\n\
            \x20 modelsmith config list\n\
            \x20 modelsmith config path"
    )]
    Config(ConfigCommands),
}

// ── setup ─────────────────────────────────────────────────────────────────────

/// Arguments for `modelsmith setup`.
///
/// `name` and `component` are optional at the parser level so that a missing
/// value is reported by the scaffolder's own validation.
#[derive(Debug, Args)]
pub struct SetupArgs {
    /// Consumer name; the project directory is `<prefix><name>`.
    #[arg(short = 'n', long = "name", value_name = "NAME", help = "Consumer name")]
    pub name: Option<String>,

    /// Model component, e.g. `utdanning`.
    #[arg(
        short = 'c',
        long = "component",
        value_name = "COMPONENT",
        help = "Model component"
    )]
    pub component: Option<String>,

    /// Package inside the component; empty selects the whole component.
    #[arg(
        short = 'p',
        long = "package",
        value_name = "PACKAGE",
        default_value = "",
        hide_default_value = true,
        help = "Package inside the component"
    )]
    pub package: String,

    /// Also copy the shared `felles/person` model.
    #[arg(
        long = "includePerson",
        visible_alias = "include-person",
        help = "Include the person model"
    )]
    pub include_person: bool,
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `modelsmith init`.
///
/// Overwriting uses the global `--force` flag.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Write to `.modelsmith.toml` in the current directory.
    #[arg(
        long = "local",
        help = "Create local configuration in current directory"
    )]
    pub local: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `modelsmith completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `modelsmith config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `source.owner`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the active configuration file.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────
