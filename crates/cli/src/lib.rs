//! argui CLI Library
//!
//! This crate provides the command-line front end of argui. It loads command
//! definitions, builds their workflow tree and prints the form of a chosen
//! workflow, either as a coloured terminal preview or as YAML.
//!
//! # Architecture
//!
//! - [`cli_args`]: Command-line argument parsing
//! - [`selection`]: Fuzzy selection of a sub-workflow by its command path
//! - [`preview`]: A `crossterm` renderer for workflow elements
//! - [`demo`]: A built-in `clap` program to try argui without a definition file
//!
//! # Examples
//!
//! ```bash
//! # Preview the first command of ~/.argui/commands.yml
//! argui
//!
//! # Preview the `remote add` form of the `git` command as YAML
//! argui --root git --command remote.add --format yaml
//!
//! # Preview the demo program
//! argui --demo --command list
//! ```

pub mod cli_args;
pub mod demo;
pub mod preview;
pub mod selection;
