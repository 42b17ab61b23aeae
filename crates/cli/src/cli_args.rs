//! Command-line argument parsing.
//!
//! This module defines the command-line interface of the `argui` binary using
//! the `clap` crate.

use clap::{Parser, ValueEnum};

/// How the workflow is printed.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Coloured preview of the form for a terminal
    #[default]
    Text,
    /// The workflow model as YAML
    Yaml,
}

/// Command-line arguments for the argui CLI tool.
///
/// # Examples
///
/// ```rust
/// use clap::Parser;
/// use argui_cli::cli_args::Args;
///
/// let args = Args::parse_from(["argui", "--root", "deploy"]);
/// assert_eq!(args.root.as_deref(), Some("deploy"));
/// ```
#[derive(Parser, Debug)]
#[command(term_width = 0)] // Just to make testing across clap features easier
pub struct Args {
    /// Path to the command definitions YAML file.
    ///
    /// If not provided, defaults to `~/.argui/commands.yml`.
    #[arg(long, short = 'p')]
    pub definition_path: Option<String>,

    /// Id of the command to build the workflow for.
    ///
    /// If not provided, the first command in the file is used.
    #[arg(long, short = 'r')]
    pub root: Option<String>,

    /// Sub-command whose form is shown, e.g. `remote.add`.
    ///
    /// Matched fuzzily against the sub-command paths of the root command.
    #[arg(long, short = 'c')]
    pub command: Option<String>,

    /// Output format of the workflow.
    #[arg(long, short = 'f', value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Show the built-in demo program instead of a definition file.
    #[arg(long, conflicts_with_all = ["definition_path", "root"])]
    pub demo: bool,
}
