//! The presentation model: what a command looks like as a form.
//!
//! A [`Workflow`] is one command (the root program or a sub-command) and the
//! [`Field`]s shown for it. Workflows own their sub-workflows, keyed by the
//! token a user would type to run them.

use std::collections::HashSet;
use std::fmt::{Display, Formatter};

use indexmap::IndexMap;
use serde::Serialize;
use serde_yaml::Value;

use crate::command_definitions::{OptionValue, SelectionOption};
use crate::element::{Element, LABEL_SUFFIX, WIDGET_SUFFIX};
use crate::error::{Error, Result};
use crate::registry::Registry;
use crate::sanitize::sanitize_default;
use crate::types::{Primitive, TypeRef};
use crate::widgets::{resolve_type_ref, select_by_value_type, WidgetKind, WidgetRef, WidgetSpec};

/// Widget parameter holding the options of a selection field.
pub const OPTIONS_PARAMETER: &str = "options";

const UNTITLED: &str = "Untitled";

/// Extra attributes of a field that picks from a fixed set of options.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Selection {
    /// Only one of the options may be selected
    pub exclusive: bool,
    pub options: Vec<SelectionOption>,
}

impl Default for Selection {
    fn default() -> Self {
        Self {
            exclusive: true,
            options: Vec::new(),
        }
    }
}

#[derive(Serialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    #[default]
    Plain,
    Selection(Selection),
}

/// A single value to collect on screen.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Field {
    /// Position on the screen, unique within a workflow
    pub index: usize,
    pub name: String,
    pub help: Option<String>,
    pub default: Option<Value>,
    /// Command line spellings of this field, empty for positionals
    pub flags: Vec<String>,
    #[serde(rename = "type")]
    pub value_type: TypeRef,
    pub required: bool,
    pub widget: WidgetRef,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub widget_parameters: IndexMap<String, Value>,
    pub kind: FieldKind,
}

impl Field {
    /// Creates a plain text field.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if `name` is empty.
    pub fn new(index: usize, name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(Error::invalid_argument(format!(
                "The field at index {index} needs a name"
            )));
        }

        Ok(Self {
            index,
            name,
            help: None,
            default: None,
            flags: Vec::new(),
            value_type: TypeRef::default(),
            required: false,
            widget: WidgetRef::default(),
            widget_parameters: IndexMap::new(),
            kind: FieldKind::Plain,
        })
    }

    /// Creates a field that picks from `options`.
    ///
    /// Exclusive selections use a [`WidgetKind::Select`], others a
    /// [`WidgetKind::SelectionList`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if `name` is empty.
    pub fn selection(
        index: usize,
        name: impl Into<String>,
        options: Vec<SelectionOption>,
        exclusive: bool,
    ) -> Result<Self> {
        let widget = if exclusive {
            WidgetKind::Select
        } else {
            WidgetKind::SelectionList
        };

        let mut field = Self::new(index, name)?.with_widget(widget);
        field.kind = FieldKind::Selection(Selection { exclusive, options });
        Ok(field)
    }

    #[must_use]
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    #[must_use]
    pub fn with_default(mut self, default: impl Into<Value>) -> Self {
        self.default = Some(default.into());
        self
    }

    #[must_use]
    pub fn with_flags(mut self, flags: Vec<String>) -> Self {
        self.flags = flags;
        self
    }

    #[must_use]
    pub fn with_type(mut self, value_type: impl Into<TypeRef>) -> Self {
        self.value_type = value_type.into();
        self
    }

    #[must_use]
    pub fn with_required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    #[must_use]
    pub fn with_widget(mut self, widget: impl Into<WidgetRef>) -> Self {
        self.widget = widget.into();
        self
    }

    #[must_use]
    pub fn with_widget_parameter(
        mut self,
        name: impl Into<String>,
        value: impl Into<Value>,
    ) -> Self {
        self.widget_parameters.insert(name.into(), value.into());
        self
    }

    #[must_use]
    pub fn selection_options(&self) -> Option<&Selection> {
        match &self.kind {
            FieldKind::Plain => None,
            FieldKind::Selection(selection) => Some(selection),
        }
    }

    /// The address of the container built for this field, `{index}_{name}`
    /// with the name sanitized.
    ///
    /// # Errors
    ///
    /// Returns an error if the name cannot be sanitized.
    pub fn address(&self) -> Result<String> {
        Ok(format!("{}_{}", self.index, sanitize_default(&self.name)?))
    }

    /// Looks up the type and widget names of this field in `registry`.
    ///
    /// # Errors
    ///
    /// Returns lookup errors for unknown names, and
    /// [`Error::UnexpectedSymbol`] for names pointing at the wrong kind of
    /// symbol.
    pub fn resolve(mut self, registry: &Registry) -> Result<Self> {
        if let TypeRef::Name(_) = &self.value_type {
            self.value_type = TypeRef::Type(resolve_type_ref(&self.value_type, registry)?);
        }

        if let WidgetRef::Name(name) = &self.widget {
            self.widget = WidgetRef::Kind(registry.resolve_widget(name)?);
        }

        Ok(self)
    }

    /// Describes the elements that show this field: a container holding a
    /// label with the field's name and the widget used to enter its value.
    ///
    /// A widget other than the default input (a select for a selection
    /// field, or anything set with [`Field::with_widget`]) is used as
    /// declared. Otherwise the widget is picked from the value type.
    ///
    /// # Returns
    ///
    /// An [`Element::Container`] with id `{index}_{name}`, holding the
    /// `_label` and `_widget` children
    ///
    /// # Errors
    ///
    /// - [`Error::NotImplemented`] for path typed fields
    /// - lookup and type errors from resolving the type or widget names
    pub fn build_widget(&self, registry: &Registry) -> Result<Element> {
        let address = self.address()?;
        let label = Element::Label {
            id: format!("{address}_{LABEL_SUFFIX}"),
            text: self.name.clone(),
        };
        let widget_id = format!("{address}_{WIDGET_SUFFIX}");

        let value_type = resolve_type_ref(&self.value_type, registry)?;
        if value_type.is_compatible_with(Primitive::Path) {
            // Needs a text box combined with a file picker
            return Err(Error::NotImplemented(format!(
                "path fields such as `{}` cannot be shown yet",
                self.name
            )));
        }

        let widget = match &self.widget {
            WidgetRef::Compound(compound) => Element::Compound {
                id: widget_id,
                widget: compound.clone(),
            },
            WidgetRef::Name(_) | WidgetRef::Kind(_) if self.widget.is_default() => {
                let mut spec = select_by_value_type(&TypeRef::Type(value_type), registry)?;
                spec.parameters.extend(self.widget_parameters.clone());
                Element::Widget {
                    id: widget_id,
                    spec,
                }
            }
            WidgetRef::Name(name) => Element::Widget {
                id: widget_id,
                spec: self.declared_widget(registry.resolve_widget(name)?),
            },
            WidgetRef::Kind(kind) => Element::Widget {
                id: widget_id,
                spec: self.declared_widget(*kind),
            },
        };

        Ok(Element::Container {
            id: address,
            children: vec![label, widget],
        })
    }

    fn declared_widget(&self, kind: WidgetKind) -> WidgetSpec {
        let mut spec = WidgetSpec::new(kind);
        spec.parameters = self.widget_parameters.clone();

        if let Some(selection) = self.selection_options() {
            let options = selection
                .options
                .iter()
                .map(|option| {
                    Value::Sequence(vec![
                        Value::from(option.label()),
                        option_to_yaml(option.value()),
                    ])
                })
                .collect();
            spec.parameters
                .entry(OPTIONS_PARAMETER.to_string())
                .or_insert(Value::Sequence(options));
        }

        spec
    }
}

fn option_to_yaml(value: &OptionValue) -> Value {
    match value {
        OptionValue::Integer(number) => Value::from(*number),
        OptionValue::Text(text) => Value::from(text.as_str()),
    }
}

/// One command and the screen presented for it.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Workflow {
    /// Usually the program name of the command
    pub name: Option<String>,
    pub description: Option<String>,
    pub epilog: Option<String>,
    /// Checked by [`Workflow::new`], so only readable afterwards
    fields: Vec<Field>,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    subworkflows: IndexMap<String, Workflow>,
    /// What submitting the workflow should do
    pub action: Option<String>,
}

impl Workflow {
    /// Creates a workflow, checking that it has something to show.
    ///
    /// A workflow needs at least one field or one sub-workflow, and its field
    /// indices must be unique.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyWorkflow`] or [`Error::DuplicateFieldIndex`].
    pub fn new(
        name: Option<String>,
        fields: Vec<Field>,
        subworkflows: IndexMap<String, Workflow>,
    ) -> Result<Self> {
        let title = name.as_deref().unwrap_or(UNTITLED);

        if fields.is_empty() && subworkflows.is_empty() {
            return Err(Error::EmptyWorkflow(title.to_string()));
        }

        let mut indices = HashSet::new();
        for field in &fields {
            if !indices.insert(field.index) {
                return Err(Error::DuplicateFieldIndex(title.to_string(), field.index));
            }
        }

        Ok(Self {
            name,
            description: None,
            epilog: None,
            fields,
            subworkflows,
            action: None,
        })
    }

    #[must_use]
    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = description;
        self
    }

    #[must_use]
    pub fn with_epilog(mut self, epilog: Option<String>) -> Self {
        self.epilog = epilog;
        self
    }

    #[must_use]
    pub fn with_action(mut self, action: Option<String>) -> Self {
        self.action = action;
        self
    }

    /// The fields of this workflow, in display order.
    #[must_use]
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Sub-workflows keyed by the token that runs them.
    #[must_use]
    pub fn subworkflows(&self) -> &IndexMap<String, Workflow> {
        &self.subworkflows
    }

    /// The name of the workflow, or `Untitled` when it has none.
    #[must_use]
    pub fn title(&self) -> &str {
        self.name.as_deref().unwrap_or(UNTITLED)
    }

    /// Finds a nested workflow by its command tokens, e.g. `remote.add`.
    #[must_use]
    pub fn subworkflow(&self, path: &str) -> Option<&Workflow> {
        path.split('.')
            .try_fold(self, |workflow, token| workflow.subworkflows.get(token))
    }

    /// Every sub-workflow path below this workflow, parents before children.
    #[must_use]
    pub fn subworkflow_paths(&self) -> Vec<String> {
        let mut paths = Vec::new();
        for (token, subworkflow) in &self.subworkflows {
            paths.push(token.clone());
            paths.extend(
                subworkflow
                    .subworkflow_paths()
                    .into_iter()
                    .map(|path| format!("{token}.{path}")),
            );
        }
        paths
    }

    /// Builds the elements of every field, in field order.
    ///
    /// # Errors
    ///
    /// Returns the first error raised by [`Field::build_widget`].
    pub fn build_elements(&self, registry: &Registry) -> Result<Vec<Element>> {
        self.fields
            .iter()
            .map(|field| field.build_widget(registry))
            .collect()
    }
}

impl Display for Workflow {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "Workflow: {}", self.title())?;

        if let Some(description) = &self.description {
            write!(formatter, ": {description}")?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ValueType;
    use crate::widgets::CompoundWidget;

    fn widget_of(element: &Element) -> &Element {
        match element {
            Element::Container { children, .. } => &children[1],
            other => panic!("Expected a container, got {other:?}"),
        }
    }

    #[test]
    fn test_field_requires_name() {
        assert!(matches!(Field::new(0, ""), Err(Error::InvalidArgument(_))));
        assert!(Field::new(0, "name").is_ok());
    }

    #[test]
    fn test_field_defaults() {
        let field = Field::new(3, "name").unwrap();
        assert_eq!(field.value_type, TypeRef::named("str"));
        assert!(field.widget.is_default());
        assert!(!field.required);
        assert!(field.flags.is_empty());
        assert_eq!(field.kind, FieldKind::Plain);
    }

    #[test]
    fn test_field_builders() {
        let field = Field::new(1, "port")
            .unwrap()
            .with_help("Port to listen on")
            .with_default(8080)
            .with_flags(vec!["-p".to_string(), "--port".to_string()])
            .with_required(true);

        assert_eq!(field.help.as_deref(), Some("Port to listen on"));
        assert_eq!(field.default, Some(Value::from(8080)));
        assert_eq!(field.flags, vec!["-p", "--port"]);
        assert!(field.required);
        assert_eq!(field.address().unwrap(), "1_port");
    }

    #[test]
    fn test_build_widget_addresses() {
        let registry = Registry::standard();
        let field = Field::new(2, "Output file?").unwrap();

        let element = field.build_widget(&registry).unwrap();
        assert_eq!(element.id(), "2_Output_file_");

        match &element {
            Element::Container { children, .. } => {
                assert_eq!(children.len(), 2);
                assert_eq!(
                    children[0],
                    Element::Label {
                        id: "2_Output_file__label".to_string(),
                        text: "Output file?".to_string(),
                    }
                );
                assert_eq!(children[1].id(), "2_Output_file__widget");
            }
            other => panic!("Expected a container, got {other:?}"),
        }
    }

    #[test]
    fn test_build_widget_uses_value_type() {
        let registry = Registry::standard();

        let field = Field::new(0, "verbose").unwrap().with_type(Primitive::Bool);
        let element = field.build_widget(&registry).unwrap();
        assert!(matches!(
            widget_of(&element),
            Element::Widget { spec, .. } if spec.kind == WidgetKind::Switch
        ));

        let field = Field::new(1, "retries")
            .unwrap()
            .with_type(TypeRef::named("int"))
            .with_widget_parameter("placeholder", "3");
        let element = field.build_widget(&registry).unwrap();
        match widget_of(&element) {
            Element::Widget { spec, .. } => {
                assert_eq!(spec.kind, WidgetKind::Input);
                assert_eq!(spec.parameters.get("type"), Some(&Value::from("integer")));
                assert_eq!(spec.parameters.get("placeholder"), Some(&Value::from("3")));
            }
            other => panic!("Expected a widget, got {other:?}"),
        }
    }

    #[test]
    fn test_build_widget_path_not_implemented() {
        let registry = Registry::standard();
        let field = Field::new(0, "source").unwrap().with_type(TypeRef::named("path"));
        assert!(matches!(field.build_widget(&registry), Err(Error::NotImplemented(_))));
    }

    #[test]
    fn test_build_widget_selection() {
        let registry = Registry::standard();
        let field = Field::selection(
            0,
            "type",
            vec![SelectionOption::from("file"), SelectionOption::from("dir")],
            true,
        )
        .unwrap();

        let element = field.build_widget(&registry).unwrap();
        match widget_of(&element) {
            Element::Widget { spec, .. } => {
                assert_eq!(spec.kind, WidgetKind::Select);
                let Some(Value::Sequence(options)) = spec.parameters.get(OPTIONS_PARAMETER) else {
                    panic!("Expected options on the select widget");
                };
                assert_eq!(options.len(), 2);
            }
            other => panic!("Expected a widget, got {other:?}"),
        }
    }

    #[test]
    fn test_build_widget_named_and_compound() {
        let registry = Registry::standard();

        let field = Field::new(0, "toggle")
            .unwrap()
            .with_widget(WidgetRef::named("widgets.Switch"));
        let element = field.build_widget(&registry).unwrap();
        assert!(matches!(
            widget_of(&element),
            Element::Widget { spec, .. } if spec.kind == WidgetKind::Switch
        ));

        let field = Field::new(1, "range")
            .unwrap()
            .with_widget(WidgetRef::Compound(CompoundWidget {
                hint: Some("min/max".to_string()),
            }));
        let element = field.build_widget(&registry).unwrap();
        assert!(matches!(widget_of(&element), Element::Compound { .. }));

        let field = Field::new(2, "broken")
            .unwrap()
            .with_widget(WidgetRef::named("widgets.Missing"));
        assert!(matches!(
            field.build_widget(&registry),
            Err(Error::SymbolNotFound { .. })
        ));
    }

    #[test]
    fn test_field_resolve() {
        let registry = Registry::standard();
        let field = Field::new(0, "count")
            .unwrap()
            .with_type(TypeRef::named("int"))
            .resolve(&registry)
            .unwrap();

        assert_eq!(field.value_type, TypeRef::Type(ValueType::primitive(Primitive::Int)));
        assert_eq!(field.widget, WidgetRef::Kind(WidgetKind::Input));

        let result = Field::new(0, "bad")
            .unwrap()
            .with_type(TypeRef::named("widgets.Input"))
            .resolve(&registry);
        assert!(matches!(result, Err(Error::UnexpectedSymbol { .. })));
    }

    #[test]
    fn test_workflow_needs_content() {
        let result = Workflow::new(Some("empty".to_string()), Vec::new(), IndexMap::new());
        assert!(matches!(result, Err(Error::EmptyWorkflow(name)) if name == "empty"));
    }

    #[test]
    fn test_workflow_dispatcher_only_is_valid() {
        let fields = vec![Field::new(0, "name").unwrap()];
        let child = Workflow::new(None, fields, IndexMap::new()).unwrap();
        let mut subworkflows = IndexMap::new();
        subworkflows.insert("create".to_string(), child);

        let parent = Workflow::new(Some("prog".to_string()), Vec::new(), subworkflows).unwrap();
        assert!(parent.fields().is_empty());
        assert!(parent.subworkflow("create").is_some());
    }

    #[test]
    fn test_workflow_rejects_duplicate_indices() {
        let fields = vec![Field::new(0, "a").unwrap(), Field::new(0, "b").unwrap()];
        let result = Workflow::new(None, fields, IndexMap::new());
        assert!(matches!(result, Err(Error::DuplicateFieldIndex(_, 0))));
    }

    #[test]
    fn test_workflow_display() {
        let fields = vec![Field::new(0, "a").unwrap()];
        let workflow = Workflow::new(Some("prog".to_string()), fields, IndexMap::new()).unwrap();
        assert_eq!(workflow.to_string(), "Workflow: prog");

        let workflow = workflow.with_description(Some("Does things".to_string()));
        assert_eq!(workflow.to_string(), "Workflow: prog: Does things");

        let mut unnamed = workflow.clone();
        unnamed.name = None;
        assert_eq!(unnamed.to_string(), "Workflow: Untitled: Does things");
    }

    #[test]
    fn test_subworkflow_paths() {
        let fields = vec![Field::new(0, "url").unwrap()];
        let leaf = Workflow::new(None, fields, IndexMap::new()).unwrap();
        let mut remote_children = IndexMap::new();
        remote_children.insert("add".to_string(), leaf.clone());
        let remote = Workflow::new(None, Vec::new(), remote_children).unwrap();

        let mut root_children = IndexMap::new();
        root_children.insert("remote".to_string(), remote);
        root_children.insert("init".to_string(), leaf);
        let root = Workflow::new(Some("git".to_string()), Vec::new(), root_children).unwrap();

        assert_eq!(root.subworkflow_paths(), vec!["remote", "remote.add", "init"]);
        assert!(root.subworkflow("remote.add").is_some());
        assert!(root.subworkflow("remote.remove").is_none());
    }
}
