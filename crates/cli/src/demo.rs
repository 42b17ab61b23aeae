//! A small file manager command line, used to show what argui builds.

use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use indexmap::IndexMap;

use argui_core::clap_adapter::{
    definition_from_command_with_hints, with_interactive_flag, TypeHints,
};
use argui_core::command_definitions::CommandDefinition;

/// Manage files and folders
#[derive(Parser, Debug)]
#[command(name = "files", after_help = "Run with -i to fill in the arguments on screen")]
pub struct Files {
    #[command(subcommand)]
    pub command: FilesCommand,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum EntryKind {
    File,
    Dir,
}

#[derive(Subcommand, Debug)]
pub enum FilesCommand {
    /// Create a file
    Create {
        /// Name of the new file
        name: String,
        /// Size in bytes
        #[arg(long, default_value_t = 0)]
        size: u64,
        /// Make the file executable
        #[arg(long, short = 'x')]
        executable: bool,
    },
    /// Delete a file
    Delete {
        /// Name of the file to delete
        name: String,
        /// Do not ask before deleting
        #[arg(long, short)]
        force: bool,
    },
    /// List the contents of a folder
    List {
        /// What to show
        #[arg(long, value_enum, default_value_t = EntryKind::File)]
        kind: EntryKind,
        /// Keep hidden entries out of the listing
        #[arg(long = "no-hidden", action = clap::ArgAction::SetFalse)]
        hidden: bool,
    },
}

/// The definition of the demo program, as read from its `clap` command.
#[must_use]
pub fn demo_definition() -> CommandDefinition {
    let hints: TypeHints = IndexMap::from([("size".to_string(), "std.primitive.u64".to_string())]);
    definition_from_command_with_hints(&with_interactive_flag(Files::command()), &hints)
}

#[cfg(test)]
mod tests {
    use super::*;
    use argui_core::model::Workflow;
    use argui_core::registry::Registry;
    use argui_core::types::Primitive;

    #[test]
    fn test_demo_parses() {
        let files = Files::parse_from(["files", "delete", "notes.txt", "--force"]);
        assert!(matches!(
            files.command,
            FilesCommand::Delete { ref name, force: true } if name == "notes.txt"
        ));
    }

    #[test]
    fn test_demo_workflow() {
        let definition = demo_definition();
        let workflow =
            Workflow::from_definition(&definition, &Default::default(), &Registry::standard())
                .unwrap();

        assert!(workflow.fields().is_empty());
        assert_eq!(workflow.subworkflow_paths(), vec!["create", "delete", "list"]);

        let create = workflow.subworkflow("create").unwrap();
        let size = &create.fields()[1];
        assert_eq!(size.name, "size");
        assert_eq!(size.value_type.primitive(), Some(Primitive::Int));

        let list = workflow.subworkflow("list").unwrap();
        assert!(list.fields()[0].selection_options().is_some());
    }
}
