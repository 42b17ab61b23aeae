//! Reads command definitions out of `clap` commands.
//!
//! clap does not expose the Rust type behind a value parser, so only types
//! it can tell apart (flags, counters, paths) are recorded. Anything else is
//! a string unless a type hint names it.

use clap::builder::ValueRange;
use clap::{Arg, ArgAction, Command, ValueHint};
use indexmap::IndexMap;
use log::debug;
use serde_yaml::Value;

use crate::command_definitions::{
    ActionKind, CommandDefinition, CommandLibrary, Nargs, OptionValue, ParameterDefinition,
    SelectionOption, SubcommandDefinition,
};
use crate::config::INTERACTIVE_FLAG_DEST;
use crate::error::Result;
use crate::model::Workflow;
use crate::registry::Registry;
use crate::walker::Walker;

/// Destination given to the parameter that dispatches to sub-commands.
pub const SUBCOMMAND_DEST: &str = "command";

/// Name of the sub-command clap generates to print help.
const HELP_SUBCOMMAND: &str = "help";

/// Type names by argument id, for arguments whose type clap cannot report.
pub type TypeHints = IndexMap<String, String>;

/// Adds the `-i/--interactive` flag that asks a program to show its form.
#[must_use]
pub fn with_interactive_flag(command: Command) -> Command {
    command.arg(
        Arg::new(INTERACTIVE_FLAG_DEST)
            .short('i')
            .long("interactive")
            .action(ArgAction::SetTrue)
            .help("Launch the application in an interactive mode"),
    )
}

/// Converts `command` and its sub-commands into a [`CommandDefinition`].
#[must_use]
pub fn definition_from_command(command: &Command) -> CommandDefinition {
    definition_from_command_with_hints(command, &TypeHints::new())
}

/// Converts `command` like [`definition_from_command`], taking value types
/// for the arguments named in `hints`.
///
/// # Arguments
///
/// * `command` - The command to convert. It is built on a clone, so the
///   caller's copy is left as it was
/// * `hints` - Type names keyed by argument id, for types clap cannot report
#[must_use]
pub fn definition_from_command_with_hints(
    command: &Command,
    hints: &TypeHints,
) -> CommandDefinition {
    // Building fills in what clap infers: defaults, value counts, path hints
    let mut command = command.clone();
    command.build();

    convert_command(&command, hints)
}

fn convert_command(command: &Command, hints: &TypeHints) -> CommandDefinition {
    let mut definition = CommandDefinition::named(command.get_name());
    definition.description = command
        .get_about()
        .or_else(|| command.get_long_about())
        .map(ToString::to_string);
    definition.epilog = command.get_after_help().map(ToString::to_string);
    definition.parameters = command
        .get_arguments()
        .map(|arg| convert_arg(arg, hints))
        .collect();

    let mut dispatcher = ParameterDefinition::new(SUBCOMMAND_DEST, ActionKind::Subcommands);
    dispatcher.required = command.is_subcommand_required_set();

    for subcommand in command.get_subcommands() {
        if subcommand.get_name() == HELP_SUBCOMMAND {
            debug!("Skipping the help sub-command of `{}`", command.get_name());
            continue;
        }

        dispatcher.subcommands.insert(
            subcommand.get_name().to_string(),
            SubcommandDefinition::Inline(convert_command(subcommand, hints)),
        );
    }

    if !dispatcher.subcommands.is_empty() {
        definition.parameters.push(dispatcher);
    }

    definition
}

fn convert_action(action: &ArgAction) -> ActionKind {
    match action {
        ArgAction::SetTrue => ActionKind::StoreTrue,
        ArgAction::SetFalse => ActionKind::StoreFalse,
        ArgAction::Count => ActionKind::Count,
        ArgAction::Help | ArgAction::HelpShort | ArgAction::HelpLong => ActionKind::Help,
        ArgAction::Version => ActionKind::Version,
        // Set, and Append whose values `convert_arg` stores as one list
        _ => ActionKind::Store,
    }
}

fn convert_nargs(range: &ValueRange) -> Option<Nargs> {
    let (min, max) = (range.min_values(), range.max_values());

    match (min, max) {
        (0, 0) => None,
        (min, max) if min == max => Some(Nargs::Exactly(min)),
        (0, 1) => Some(Nargs::Optional),
        (0, _) => Some(Nargs::ZeroOrMore),
        _ => Some(Nargs::OneOrMore),
    }
}

fn value_type_of(arg: &Arg, action: ActionKind, hints: &TypeHints) -> Option<String> {
    if let Some(hint) = hints.get(arg.get_id().as_str()) {
        return Some(hint.clone());
    }

    match action {
        ActionKind::StoreTrue | ActionKind::StoreFalse => return Some("bool".to_string()),
        ActionKind::Count => return Some("int".to_string()),
        _ => {}
    }

    match arg.get_value_hint() {
        ValueHint::AnyPath
        | ValueHint::FilePath
        | ValueHint::DirPath
        | ValueHint::ExecutablePath => Some("path".to_string()),
        _ => None,
    }
}

fn default_of(arg: &Arg, action: ActionKind) -> Option<Value> {
    let defaults: Vec<String> = arg
        .get_default_values()
        .iter()
        .map(|value| value.to_string_lossy().to_string())
        .collect();

    match defaults.as_slice() {
        [] => None,
        [single] if action.is_toggle() => match single.parse::<bool>() {
            Ok(flag) => Some(Value::Bool(flag)),
            Err(_) => Some(Value::from(single.as_str())),
        },
        [single] => Some(Value::from(single.as_str())),
        many => Some(Value::Sequence(
            many.iter().map(|value| Value::from(value.as_str())).collect(),
        )),
    }
}

fn convert_arg(arg: &Arg, hints: &TypeHints) -> ParameterDefinition {
    let action = convert_action(arg.get_action());
    let mut parameter = ParameterDefinition::new(arg.get_id().as_str(), action);

    if let Some(short) = arg.get_short() {
        parameter.flags.push(format!("-{short}"));
    }
    if let Some(long) = arg.get_long() {
        parameter.flags.push(format!("--{long}"));
    }

    parameter.help = arg.get_help().map(ToString::to_string);
    parameter.required = arg.is_required_set();
    parameter.default = default_of(arg, action);
    parameter.value_type = value_type_of(arg, action, hints);
    parameter.nargs = if matches!(arg.get_action(), ArgAction::Append) {
        // Each occurrence adds a value, so the parameter holds a list
        Some(if parameter.required {
            Nargs::OneOrMore
        } else {
            Nargs::ZeroOrMore
        })
    } else {
        arg.get_num_args().as_ref().and_then(convert_nargs)
    };

    let choices: Vec<SelectionOption> = arg
        .get_possible_values()
        .iter()
        .filter(|value| !value.is_hide_set())
        .map(|value| SelectionOption::Value(OptionValue::Text(value.get_name().to_string())))
        .collect();
    if !choices.is_empty() && !action.is_toggle() {
        parameter.choices = Some(choices);
    }

    parameter
}

impl Workflow {
    /// Builds the workflow tree of a clap command.
    ///
    /// # Errors
    ///
    /// See [`Walker::walk`].
    pub fn from_command(command: &Command, registry: &Registry) -> Result<Workflow> {
        let definition = definition_from_command(command);
        let library = CommandLibrary::default();
        Walker::new(registry, &library).walk(&definition)
    }
}
