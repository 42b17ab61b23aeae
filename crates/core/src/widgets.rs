//! Widget kinds and the policy that picks one for a parameter.
//!
//! A widget is chosen either from a value type ([`select_by_value_type`]) or
//! from a parameter definition ([`select_by_action`]). Both end up in the same
//! decision table so a field built by hand and a field walked out of a
//! command definition look the same.

use std::fmt::{Display, Formatter};

use indexmap::IndexMap;
use serde::Serialize;
use serde_yaml::Value;

use crate::command_definitions::{ActionKind, ParameterDefinition};
use crate::error::{Error, Result};
use crate::registry::Registry;
use crate::types::{Primitive, TypeRef, ValueType, DEFAULT_TYPE_NAME};

/// Name the default single line input is registered under.
pub const DEFAULT_WIDGET_NAME: &str = "widgets.Input";

/// Widget parameter holding the kind of value an input accepts.
pub const INPUT_TYPE_PARAMETER: &str = "type";

/// The widgets a renderer is expected to provide.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WidgetKind {
    /// Single line text input
    Input,
    /// On/off toggle
    Switch,
    /// Pick one of a fixed set of options
    Select,
    /// Pick any number of a fixed set of options
    SelectionList,
}

impl WidgetKind {
    pub const ALL: [WidgetKind; 4] = [
        WidgetKind::Input,
        WidgetKind::Switch,
        WidgetKind::Select,
        WidgetKind::SelectionList,
    ];

    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            WidgetKind::Input => "Input",
            WidgetKind::Switch => "Switch",
            WidgetKind::Select => "Select",
            WidgetKind::SelectionList => "SelectionList",
        }
    }
}

impl Display for WidgetKind {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.name())
    }
}

/// Marks a field that is drawn by combining several primitive widgets.
///
/// How the pieces are put together is up to the renderer.
#[derive(Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct CompoundWidget {
    pub hint: Option<String>,
}

/// What a field asks to be drawn with.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum WidgetRef {
    Name(String),
    Kind(WidgetKind),
    Compound(CompoundWidget),
}

impl WidgetRef {
    pub fn named(name: impl Into<String>) -> Self {
        Self::Name(name.into())
    }

    /// Whether this is the plain input every field starts out with.
    #[must_use]
    pub fn is_default(&self) -> bool {
        match self {
            WidgetRef::Name(name) => name == DEFAULT_WIDGET_NAME,
            WidgetRef::Kind(kind) => *kind == WidgetKind::Input,
            WidgetRef::Compound(_) => false,
        }
    }
}

impl Default for WidgetRef {
    fn default() -> Self {
        Self::named(DEFAULT_WIDGET_NAME)
    }
}

impl From<WidgetKind> for WidgetRef {
    fn from(value: WidgetKind) -> Self {
        Self::Kind(value)
    }
}

/// A widget kind together with the arguments it should be built with.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct WidgetSpec {
    pub kind: WidgetKind,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub parameters: IndexMap<String, Value>,
}

impl WidgetSpec {
    #[must_use]
    pub fn new(kind: WidgetKind) -> Self {
        Self {
            kind,
            parameters: IndexMap::new(),
        }
    }

    #[must_use]
    pub fn with_parameter(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.parameters.insert(name.into(), value.into());
        self
    }
}

impl Display for WidgetSpec {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.kind)?;

        if let Some(Value::String(input_type)) = self.parameters.get(INPUT_TYPE_PARAMETER) {
            write!(formatter, "<{input_type}>")?;
        }

        Ok(())
    }
}

/// Resolves a type reference through the registry.
///
/// # Errors
///
/// Propagates lookup failures, and returns [`Error::UnexpectedSymbol`] when
/// the name points at something that is not a type.
pub fn resolve_type_ref(value_type: &TypeRef, registry: &Registry) -> Result<ValueType> {
    match value_type {
        TypeRef::Name(name) => registry.resolve_type(name).cloned(),
        TypeRef::Type(resolved) => Ok(resolved.clone()),
    }
}

/// Picks the widget used to enter a value of `value_type`.
///
/// # Arguments
///
/// * `value_type` - The type, either by name or already resolved
/// * `registry` - Where named types are looked up
///
/// # Returns
///
/// A switch for booleans, a typed input for numbers and a plain input for
/// anything else
///
/// # Errors
///
/// - lookup errors when `value_type` names something unknown
/// - [`Error::UnexpectedSymbol`] when it names something that is not a type
/// - [`Error::NotImplemented`] for path types, which need a file picker
///
/// # Examples
///
/// ```
/// use argui_core::registry::Registry;
/// use argui_core::types::TypeRef;
/// use argui_core::widgets::{select_by_value_type, WidgetKind};
///
/// let registry = Registry::standard();
/// let spec = select_by_value_type(&TypeRef::named("bool"), &registry).unwrap();
/// assert_eq!(spec.kind, WidgetKind::Switch);
/// ```
pub fn select_by_value_type(value_type: &TypeRef, registry: &Registry) -> Result<WidgetSpec> {
    let value_type = resolve_type_ref(value_type, registry)?;

    if value_type.is_compatible_with(Primitive::Bool) {
        return Ok(WidgetSpec::new(WidgetKind::Switch));
    }

    if value_type.is_compatible_with(Primitive::Int) {
        return Ok(
            WidgetSpec::new(WidgetKind::Input).with_parameter(INPUT_TYPE_PARAMETER, "integer")
        );
    }

    if value_type.is_compatible_with(Primitive::Float) {
        return Ok(
            WidgetSpec::new(WidgetKind::Input).with_parameter(INPUT_TYPE_PARAMETER, "number")
        );
    }

    if value_type.is_compatible_with(Primitive::Path) {
        // A text box paired with a file or directory picker
        return Err(Error::NotImplemented(format!(
            "there is no widget for path values yet (type {value_type})"
        )));
    }

    Ok(WidgetSpec::new(WidgetKind::Input))
}

/// Picks the widget for a parameter taken from a command definition.
///
/// Toggles become switches. Parameters with choices become a select, or a
/// selection list when they take more than one value.
///
/// # Errors
///
/// - [`Error::UnpresentableAction`] for help actions and for anything that
///   does not store a value
/// - anything [`select_by_value_type`] returns for the declared type
pub fn select_by_action(
    parameter: &ParameterDefinition,
    registry: &Registry,
) -> Result<WidgetSpec> {
    match parameter.action {
        ActionKind::Help => return Err(Error::UnpresentableAction(parameter.action.to_string())),
        ActionKind::Store | ActionKind::StoreTrue | ActionKind::StoreFalse => {}
        _ => {
            return Err(Error::UnpresentableAction(format!(
                "{} (only actions that store a value may be represented on the screen)",
                parameter.action
            )))
        }
    }

    if parameter.action.is_toggle() {
        return Ok(WidgetSpec::new(WidgetKind::Switch));
    }

    if parameter.has_choices() {
        return if parameter.accepts_many() {
            Ok(WidgetSpec::new(WidgetKind::SelectionList))
        } else {
            Ok(WidgetSpec::new(WidgetKind::Select))
        };
    }

    let value_type = parameter
        .value_type
        .as_deref()
        .map_or_else(|| TypeRef::named(DEFAULT_TYPE_NAME), TypeRef::named);

    select_by_value_type(&value_type, registry)
}
