//! Output management and formatting.
//!
//! Status lines go through [`OutputManager`] so `--quiet`, `--no-color` and
//! `--output-format` are honoured in one place. Data printed by the list
//! commands is never suppressed.

use std::io::{self, IsTerminal};
use std::time::Duration;

use console::Term;
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::{AnsiColors, OwoColorize};

use crate::cli::global::{GlobalArgs, OutputFormat};
use crate::config::AppConfig;

const SUCCESS: &str = "\u{2713}";
const WARNING: &str = "\u{26a0}";
const INFO: &str = "\u{2139}";

/// Writes user-facing output to stdout.
pub struct OutputManager {
    resolved_format: OutputFormat,
    quiet: bool,
    no_color: bool,
    term: Term,
}

impl OutputManager {
    /// Build from parsed CLI flags and loaded config.
    ///
    /// `--output-format` wins over `output.format`; `auto` picks human output
    /// on a terminal and plain output otherwise.
    pub fn new(args: &GlobalArgs, config: &AppConfig) -> Self {
        let requested = match args.output_format {
            OutputFormat::Auto => parse_format(&config.output.format),
            explicit => explicit,
        };
        let resolved_format = match requested {
            OutputFormat::Auto if io::stdout().is_terminal() => OutputFormat::Human,
            OutputFormat::Auto => OutputFormat::Plain,
            other => other,
        };

        Self {
            resolved_format,
            quiet: args.quiet,
            no_color: args.no_color
                || config.output.no_color
                || resolved_format != OutputFormat::Human,
            term: Term::stdout(),
        }
    }

    /// Plain message; suppressed in quiet mode.
    pub fn print(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.term.write_line(msg)
    }

    pub fn success(&self, msg: &str) -> io::Result<()> {
        self.status(SUCCESS, msg, AnsiColors::Green)
    }

    pub fn warning(&self, msg: &str) -> io::Result<()> {
        self.status(WARNING, msg, AnsiColors::Yellow)
    }

    pub fn info(&self, msg: &str) -> io::Result<()> {
        self.status(INFO, msg, AnsiColors::Blue)
    }

    /// Bold section header.
    pub fn header(&self, text: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        if self.no_color {
            self.term.write_line(text)
        } else {
            self.term.write_line(&text.cyan().bold().to_string())
        }
    }

    /// Data lines for the list commands.
    ///
    /// Printed even in quiet mode; a JSON array in `--output-format json`.
    pub fn list(&self, items: &[String]) -> io::Result<()> {
        if self.format() == OutputFormat::Json {
            let json = serde_json::to_string_pretty(items).map_err(io::Error::other)?;
            return self.term.write_line(&json);
        }
        for item in items {
            self.term.write_line(item)?;
        }
        Ok(())
    }

    /// Spinner on stderr while a slow step runs.
    ///
    /// Hidden unless the output is human-readable and not quiet.
    pub fn spinner(&self, msg: &str) -> ProgressBar {
        if self.quiet || self.format() != OutputFormat::Human {
            return ProgressBar::hidden();
        }
        let spinner = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} {msg}") {
            spinner.set_style(style);
        }
        spinner.set_message(msg.to_owned());
        spinner.enable_steady_tick(Duration::from_millis(100));
        spinner
    }

    /// The resolved (non-Auto) output format.
    pub fn format(&self) -> OutputFormat {
        self.resolved_format
    }

    fn status(&self, symbol: &str, msg: &str, color: AnsiColors) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            format!("{symbol} {msg}")
        } else {
            format!("{} {}", symbol.color(color).bold(), msg.color(color))
        };
        self.term.write_line(&line)
    }
}

fn parse_format(value: &str) -> OutputFormat {
    match value.trim().to_ascii_lowercase().as_str() {
        "human" => OutputFormat::Human,
        "plain" => OutputFormat::Plain,
        "json" => OutputFormat::Json,
        _ => OutputFormat::Auto,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manager(quiet: bool, format: OutputFormat) -> OutputManager {
        let args = GlobalArgs {
            quiet,
            output_format: format,
            ..GlobalArgs::for_tests()
        };
        OutputManager::new(&args, &AppConfig::default())
    }

    #[test]
    fn quiet_print_is_ok() {
        assert!(manager(true, OutputFormat::Plain).print("hello").is_ok());
    }

    #[test]
    fn list_prints_in_quiet_mode() {
        let out = manager(true, OutputFormat::Plain);
        assert!(out.list(&["v3.1.0".to_string()]).is_ok());
    }

    #[test]
    fn spinner_hidden_outside_human_format() {
        assert!(manager(false, OutputFormat::Plain).spinner("Loading").is_hidden());
        assert!(manager(true, OutputFormat::Human).spinner("Loading").is_hidden());
    }

    #[test]
    fn explicit_format_is_kept() {
        assert_eq!(manager(false, OutputFormat::Json).format(), OutputFormat::Json);
        assert_eq!(manager(false, OutputFormat::Plain).format(), OutputFormat::Plain);
    }

    #[test]
    fn config_format_applies_when_flag_is_auto() {
        let mut config = AppConfig::default();
        config.output.format = "json".into();
        let args = GlobalArgs {
            output_format: OutputFormat::Auto,
            ..GlobalArgs::for_tests()
        };
        assert_eq!(OutputManager::new(&args, &config).format(), OutputFormat::Json);
    }

    #[test]
    fn unknown_format_string_means_auto() {
        assert_eq!(parse_format("fancy"), OutputFormat::Auto);
        assert_eq!(parse_format(" JSON "), OutputFormat::Json);
    }
}
