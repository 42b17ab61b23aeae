use std::io::{stdout, Write};
use std::process::ExitCode;

use clap::Parser;
use log::{debug, info};

use argui_cli::cli_args::{Args, OutputFormat};
use argui_cli::demo::demo_definition;
use argui_cli::preview::print_workflow;
use argui_cli::selection::select_subworkflow;
use argui_core::command_definitions::{CommandDefinition, CommandLibrary};
use argui_core::error::{Error, Result};
use argui_core::model::Workflow;
use argui_core::registry::Registry;
use argui_core::{config, file_handling};

/// Loads the library and picks the root command from it
fn load_definitions(args: &Args) -> Result<(CommandLibrary, CommandDefinition)> {
    if args.demo {
        return Ok((CommandLibrary::default(), demo_definition()));
    }

    let definition_path = config::get_definition_path(&args.definition_path);
    debug!("Definition path: `{definition_path}`");

    let library = file_handling::get_command_definitions(&definition_path)?;
    let root = match &args.root {
        Some(id) => library.get(id).ok_or_else(|| Error::symbol_not_found(id))?,
        None => library
            .first()
            .ok_or_else(|| Error::empty_command_definition(definition_path.clone()))?,
    }
    .clone();

    Ok((library, root))
}

fn execute() -> Result<()> {
    let args = Args::parse();
    let registry = Registry::standard();

    let (library, root) = load_definitions(&args)?;
    let workflow = Workflow::from_definition(&root, &library, &registry)?;
    info!("Built {workflow}");

    let (path, workflow) = match &args.command {
        Some(query) => {
            let (path, subworkflow) = select_subworkflow(&workflow, query)?;
            (Some(path), subworkflow)
        }
        None => (None, &workflow),
    };

    match args.format {
        OutputFormat::Text => {
            print_workflow(stdout(), path.as_deref(), workflow, &registry)?;
        }
        OutputFormat::Yaml => {
            let yaml = serde_yaml::to_string(workflow).map_err(|e| {
                Error::yaml_error(
                    "writing".to_string(),
                    "workflow".to_string(),
                    "<stdout>".to_string(),
                    e,
                )
            })?;
            let mut stdout = stdout();
            stdout.write_all(yaml.as_bytes())?;
            stdout.flush()?;
        }
    }

    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();

    match execute() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
