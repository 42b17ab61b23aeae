//! Turns command definitions into workflows.
//!
//! The walk is depth first: every sub-command is turned into a workflow
//! before the workflow of the command dispatching to it is put together.

use indexmap::IndexMap;
use log::debug;

use crate::command_definitions::{
    ActionKind, CommandDefinition, CommandLibrary, ParameterDefinition, SubcommandDefinition,
};
use crate::config::INTERACTIVE_FLAG_DEST;
use crate::error::{Error, Result};
use crate::model::{Field, Workflow};
use crate::registry::Registry;
use crate::types::{Primitive, TypeRef, DEFAULT_TYPE_NAME};
use crate::widgets::{resolve_type_ref, select_by_action, WidgetRef};

/// Whether `parameter` is the flag that starts a program in interactive mode.
///
/// That flag makes no sense on the interactive screen itself.
#[must_use]
pub fn is_interactive_flag(parameter: &ParameterDefinition) -> bool {
    parameter.action.is_toggle()
        && !parameter.required
        && parameter.dest.eq_ignore_ascii_case(INTERACTIVE_FLAG_DEST)
}

/// Builds the field shown for a value storing parameter.
///
/// # Errors
///
/// Returns the errors of [`select_by_action`], and lookup errors for an
/// unknown value type.
pub fn build_field(
    index: usize,
    parameter: &ParameterDefinition,
    registry: &Registry,
) -> Result<Field> {
    let spec = select_by_action(parameter, registry)?;

    let mut field = match &parameter.choices {
        Some(choices) if !choices.is_empty() => Field::selection(
            index,
            parameter.dest.as_str(),
            choices.clone(),
            !parameter.accepts_many(),
        )?,
        _ => Field::new(index, parameter.dest.as_str())?,
    };

    field.value_type = if parameter.action.is_toggle() {
        TypeRef::from(Primitive::Bool)
    } else {
        let name = parameter.value_type.as_deref().unwrap_or(DEFAULT_TYPE_NAME);
        TypeRef::Type(resolve_type_ref(&TypeRef::named(name), registry)?)
    };
    field.widget = WidgetRef::Kind(spec.kind);
    field.widget_parameters = spec.parameters;
    field.help.clone_from(&parameter.help);
    field.default.clone_from(&parameter.default);
    field.flags.clone_from(&parameter.flags);
    field.required = parameter.required;

    Ok(field)
}

/// Walks command definitions, following sub-command references through a
/// [`CommandLibrary`].
pub struct Walker<'a> {
    registry: &'a Registry,
    library: &'a CommandLibrary,
}

impl<'a> Walker<'a> {
    /// Creates a walker.
    ///
    /// # Arguments
    ///
    /// * `registry` - Names available to type and widget references
    /// * `library` - Definitions that `ref:` sub-commands are looked up in
    #[must_use]
    pub fn new(registry: &'a Registry, library: &'a CommandLibrary) -> Self {
        Self { registry, library }
    }

    /// Builds the workflow tree for `definition`.
    ///
    /// # Returns
    ///
    /// The workflow for `definition`, with one sub-workflow per sub-command
    /// and its fields in declaration order
    ///
    /// # Errors
    ///
    /// Any error raised for a parameter is returned wrapped in
    /// [`Error::Parameter`], naming the command and parameter it came from.
    /// A definition that contains itself through its sub-commands fails with
    /// [`Error::CyclicDefinition`], and one with nothing to show with
    /// [`Error::EmptyWorkflow`].
    pub fn walk(&self, definition: &'a CommandDefinition) -> Result<Workflow> {
        let mut path = Vec::new();
        self.walk_definition(definition, &mut path)
    }

    fn walk_definition(
        &self,
        definition: &'a CommandDefinition,
        path: &mut Vec<&'a CommandDefinition>,
    ) -> Result<Workflow> {
        if path.iter().any(|visited| std::ptr::eq(*visited, definition)) {
            return Err(Error::CyclicDefinition(definition.to_string()));
        }

        path.push(definition);
        let workflow = self.build_workflow(definition, path);
        path.pop();

        workflow
    }

    fn build_workflow(
        &self,
        definition: &'a CommandDefinition,
        path: &mut Vec<&'a CommandDefinition>,
    ) -> Result<Workflow> {
        let command = definition.to_string();
        let mut fields = Vec::new();
        let mut subworkflows = IndexMap::new();

        for parameter in &definition.parameters {
            if is_interactive_flag(parameter) {
                debug!("Skipping the interactive flag {parameter} of `{command}`");
                continue;
            }

            match parameter.action {
                ActionKind::Help | ActionKind::Version => {
                    debug!("Skipping {} parameter {parameter} of `{command}`", parameter.action);
                }
                ActionKind::Subcommands => {
                    for (token, subcommand) in &parameter.subcommands {
                        let subworkflow = self
                            .subcommand_definition(subcommand)
                            .and_then(|child| self.walk_definition(child, path))
                            .map_err(|e| Error::parameter(&command, &parameter.dest, e))?;

                        subworkflows.insert(token.clone(), subworkflow);
                    }
                }
                _ => {
                    let field = build_field(fields.len(), parameter, self.registry)
                        .map_err(|e| Error::parameter(&command, &parameter.dest, e))?;

                    debug!("Field {parameter} of `{command}` takes {}", field.value_type);
                    fields.push(field);
                }
            }
        }

        debug!(
            "Built `{command}` with {} fields and {} sub-workflows",
            fields.len(),
            subworkflows.len()
        );

        Ok(Workflow::new(definition.name.clone(), fields, subworkflows)?
            .with_description(definition.description.clone())
            .with_epilog(definition.epilog.clone())
            .with_action(definition.action.clone()))
    }

    fn subcommand_definition(
        &self,
        subcommand: &'a SubcommandDefinition,
    ) -> Result<&'a CommandDefinition> {
        match subcommand {
            SubcommandDefinition::Inline(definition) => Ok(definition),
            SubcommandDefinition::Reference(reference) => self
                .library
                .get(&reference.reference)
                .ok_or_else(|| Error::symbol_not_found(&reference.reference)),
        }
    }
}

impl Workflow {
    /// Builds the workflow tree for `definition`, resolving sub-command
    /// references in `library`.
    ///
    /// # Errors
    ///
    /// See [`Walker::walk`].
    pub fn from_definition(
        definition: &CommandDefinition,
        library: &CommandLibrary,
        registry: &Registry,
    ) -> Result<Workflow> {
        Walker::new(registry, library).walk(definition)
    }
}
