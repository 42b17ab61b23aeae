//! Reading and validation of command definition files.
//!
//! A definition file is a YAML list of commands. Commands with an `id` can be
//! used as sub-commands of others through `ref:` entries.

use std::collections::HashSet;
use std::fs::File;

use log::debug;

use crate::command_definitions::{CommandDefinition, CommandLibrary, SubcommandDefinition};
use crate::error::Error::{EmptyId, IdWithSpace, NonUniqueCommandId, NonUniqueParameterDest};
use crate::error::{Error, Result};

fn get_reader(file_description: &str, path: &str) -> Result<File> {
    match File::open(path) {
        Ok(reader) => Ok(reader),
        Err(e) => Err(Error::io_error(
            file_description.to_string(),
            path.to_string(),
            e,
        )),
    }
}

fn validate_id(id: &str) -> Result<()> {
    if id.is_empty() {
        return Err(EmptyId);
    }

    if id.contains(' ') {
        return Err(IdWithSpace(id.to_string()));
    }

    Ok(())
}

/// Checks parameter destinations of `command` and of its inline sub-commands.
fn validate_parameters(command: &CommandDefinition) -> Result<()> {
    let mut dests = HashSet::new();

    for parameter in &command.parameters {
        if !dests.insert(parameter.dest.as_str()) {
            return Err(NonUniqueParameterDest(
                format!("{command}"),
                parameter.dest.clone(),
            ));
        }

        for subcommand in parameter.subcommands.values() {
            if let SubcommandDefinition::Inline(definition) = subcommand {
                validate_parameters(definition)?;
            }
        }
    }

    Ok(())
}

fn validate_command_definitions(commands: &[CommandDefinition]) -> Result<()> {
    let mut ids = HashSet::new();

    for cmd in commands {
        if let Some(id) = &cmd.id {
            validate_id(id)?;

            if !ids.insert(id.as_str()) {
                return Err(NonUniqueCommandId(id.clone()));
            }
        }

        validate_parameters(cmd)?;
    }

    Ok(())
}

/// Loads and validates command definitions from a YAML file.
///
/// # Arguments
///
/// * `definition_path` - Path to the YAML file, already expanded
///
/// # Returns
///
/// The commands in the order they appear in the file
///
/// # Errors
///
/// Returns an error if:
/// - The file cannot be read
/// - The YAML is malformed or doesn't match the expected structure
/// - The file holds no commands
/// - A command id is empty, contains a space, or is used twice
/// - A command has two parameters with the same destination
///
/// # Examples
///
/// ```no_run
/// use argui_core::file_handling::get_command_definitions;
///
/// let library = get_command_definitions("/home/me/.argui/commands.yml")?;
/// println!("Loaded {} commands", library.len());
/// # Ok::<(), argui_core::error::Error>(())
/// ```
pub fn get_command_definitions(definition_path: &str) -> Result<CommandLibrary> {
    let reader = get_reader("command definitions", definition_path)?;

    let definitions: Vec<CommandDefinition> = serde_yaml::from_reader(reader).map_err(|e| {
        Error::yaml_error(
            "reading".to_string(),
            "command definitions".to_string(),
            definition_path.to_string(),
            e,
        )
    })?;

    if definitions.is_empty() {
        return Err(Error::empty_command_definition(definition_path.to_string()));
    }

    validate_command_definitions(&definitions)?;
    debug!(
        "Loaded {} command definitions from {definition_path}",
        definitions.len()
    );

    Ok(CommandLibrary::new(definitions))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command_definitions::{ActionKind, ParameterDefinition};
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn command_with_id(id: &str) -> CommandDefinition {
        CommandDefinition {
            id: Some(id.to_string()),
            ..CommandDefinition::default()
        }
    }

    fn write_definitions(content: &str) -> NamedTempFile {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "{content}").unwrap();
        temp_file
    }

    #[test]
    fn test_validate_id_valid() {
        assert!(validate_id("valid_id").is_ok());
        assert!(validate_id("my-command").is_ok());
        assert!(validate_id("123").is_ok());
    }

    #[test]
    fn test_validate_id_empty() {
        assert!(matches!(validate_id(""), Err(EmptyId)));
    }

    #[test]
    fn test_validate_id_with_space() {
        assert!(matches!(validate_id("has space"), Err(IdWithSpace(_))));
    }

    #[test]
    fn test_validate_command_ids_duplicate() {
        let commands = vec![
            command_with_id("cmd1"),
            command_with_id("cmd2"),
            command_with_id("cmd1"),
        ];

        let result = validate_command_definitions(&commands);
        assert!(matches!(result, Err(NonUniqueCommandId(id)) if id == "cmd1"));
    }

    #[test]
    fn test_validate_parameters_duplicate_dest() {
        let command = command_with_id("copy")
            .with_parameter(ParameterDefinition::new("target", ActionKind::Store))
            .with_parameter(ParameterDefinition::new("target", ActionKind::Store));

        let result = validate_parameters(&command);
        assert!(matches!(result, Err(NonUniqueParameterDest(_, dest)) if dest == "target"));
    }

    #[test]
    fn test_validate_parameters_in_inline_subcommands() {
        let yaml = r"
id: root
parameters:
  - dest: command
    action: subcommands
    subcommands:
      list:
        parameters:
          - dest: kind
          - dest: kind
";
        let command: CommandDefinition = serde_yaml::from_str(yaml).unwrap();

        let result = validate_parameters(&command);
        assert!(matches!(result, Err(NonUniqueParameterDest(_, dest)) if dest == "kind"));
    }

    #[test]
    fn test_get_command_definitions() {
        let temp_file = write_definitions(
            r"
- id: greet
  description: Greet someone
  parameters:
    - dest: name
      default: World
- id: shout
  parameters:
    - dest: loud
      action: store_true
",
        );
        let temp_path = temp_file.path().to_str().unwrap();

        let library = get_command_definitions(temp_path).unwrap();
        assert_eq!(library.len(), 2);
        assert_eq!(library.first().and_then(|c| c.id.as_deref()), Some("greet"));
        assert!(library.get("shout").is_some());
    }

    #[test]
    fn test_get_command_definitions_empty() {
        let temp_file = write_definitions("[]");
        let temp_path = temp_file.path().to_str().unwrap();

        let result = get_command_definitions(temp_path);
        assert!(matches!(result, Err(Error::EmptyCommandDefinition { .. })));
    }

    #[test]
    fn test_get_command_definitions_malformed() {
        let temp_file = write_definitions("- id: [not, a, string]");
        let temp_path = temp_file.path().to_str().unwrap();

        let result = get_command_definitions(temp_path);
        assert!(matches!(result, Err(Error::Yaml { .. })));
    }

    #[test]
    fn test_get_command_definitions_missing_file() {
        let result = get_command_definitions("/definitely/not/here.yml");
        assert!(matches!(result, Err(Error::Io { .. })));
    }
}
