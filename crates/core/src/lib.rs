//! argui Core Library
//!
//! This crate turns the command tree of an argument parser into a tree of
//! interactive form descriptions, so a command line program can offer a
//! screen for filling in its arguments.
//!
//! # Key Features
//!
//! - **Command Definitions**: Describe parsers in YAML or read them from `clap`
//! - **Symbol Registry**: Resolve dotted type and widget names without reflection
//! - **Widget Selection**: Pick an input widget from a parameter's action and type
//! - **Workflows**: Walk sub-commands into a tree of [`model::Workflow`]s
//! - **Elements**: Describe labels, widgets and containers for any front end
//!
//! # Examples
//!
//! Building the workflow tree of a definition file:
//!
//! ```no_run
//! use argui_core::file_handling::get_command_definitions;
//! use argui_core::model::Workflow;
//! use argui_core::registry::Registry;
//!
//! let library = get_command_definitions("/home/me/.argui/commands.yml")?;
//! let registry = Registry::standard();
//!
//! if let Some(root) = library.first() {
//!     let workflow = Workflow::from_definition(root, &library, &registry)?;
//!     println!("{workflow}");
//! }
//! # Ok::<(), argui_core::error::Error>(())
//! ```

pub mod clap_adapter;
pub mod command_definitions;
pub mod config;
pub mod element;
pub mod error;
pub mod file_handling;
pub mod model;
pub mod registry;
pub mod sanitize;
pub mod types;
pub mod walker;
pub mod widgets;
