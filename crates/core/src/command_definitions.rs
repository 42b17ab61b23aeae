use std::fmt::{Display, Formatter};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_yaml::Value;

/// What a parameter does when it is given on the command line.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    /// Stores the value(s) that follow the flag
    #[default]
    Store,
    StoreTrue,
    StoreFalse,
    /// Stores every occurrence in a list
    Append,
    /// Counts occurrences, e.g. `-vvv`
    Count,
    Help,
    Version,
    /// Dispatches to one of several sub-commands
    Subcommands,
}

impl ActionKind {
    #[must_use]
    pub fn is_toggle(&self) -> bool {
        matches!(self, ActionKind::StoreTrue | ActionKind::StoreFalse)
    }
}

impl Display for ActionKind {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(match self {
            ActionKind::Store => "store",
            ActionKind::StoreTrue => "store_true",
            ActionKind::StoreFalse => "store_false",
            ActionKind::Append => "append",
            ActionKind::Count => "count",
            ActionKind::Help => "help",
            ActionKind::Version => "version",
            ActionKind::Subcommands => "subcommands",
        })
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NargsRepr {
    Count(usize),
    Marker(String),
}

/// How many values a parameter takes.
///
/// Written in definitions as a number or as one of `?`, `*` and `+`.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(try_from = "NargsRepr")]
pub enum Nargs {
    Exactly(usize),
    /// `?`
    Optional,
    /// `*`
    ZeroOrMore,
    /// `+`
    OneOrMore,
}

impl TryFrom<NargsRepr> for Nargs {
    type Error = String;

    fn try_from(value: NargsRepr) -> Result<Self, Self::Error> {
        match value {
            NargsRepr::Count(count) => Ok(Nargs::Exactly(count)),
            NargsRepr::Marker(marker) => match marker.as_str() {
                "?" => Ok(Nargs::Optional),
                "*" => Ok(Nargs::ZeroOrMore),
                "+" => Ok(Nargs::OneOrMore),
                other => Err(format!(
                    "`{other}` is not a valid nargs value, expected a number, `?`, `*` or `+`"
                )),
            },
        }
    }
}

impl Nargs {
    /// Whether more than one value may be given.
    #[must_use]
    pub fn is_multiple(&self) -> bool {
        match self {
            Nargs::Exactly(count) => *count > 1,
            Nargs::ZeroOrMore | Nargs::OneOrMore => true,
            Nargs::Optional => false,
        }
    }
}

/// A selectable value.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum OptionValue {
    Integer(i64),
    Text(String),
}

impl Display for OptionValue {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            OptionValue::Integer(value) => write!(formatter, "{value}"),
            OptionValue::Text(value) => formatter.write_str(value),
        }
    }
}

/// One entry of a fixed choice set, optionally with a display label.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum SelectionOption {
    Value(OptionValue),
    Labeled(String, OptionValue),
}

impl SelectionOption {
    #[must_use]
    pub fn value(&self) -> &OptionValue {
        match self {
            SelectionOption::Value(value) | SelectionOption::Labeled(_, value) => value,
        }
    }

    #[must_use]
    pub fn label(&self) -> String {
        match self {
            SelectionOption::Value(value) => value.to_string(),
            SelectionOption::Labeled(label, _) => label.clone(),
        }
    }
}

impl From<&str> for SelectionOption {
    fn from(value: &str) -> Self {
        SelectionOption::Value(OptionValue::Text(value.to_string()))
    }
}

impl From<i64> for SelectionOption {
    fn from(value: i64) -> Self {
        SelectionOption::Value(OptionValue::Integer(value))
    }
}

/// A parameter of a command, as the argument parser declares it.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct ParameterDefinition {
    /// Name the parsed value is stored under
    pub dest: String,
    #[serde(default)]
    pub action: ActionKind,
    /// Flag spellings, empty for positional parameters
    #[serde(default)]
    pub flags: Vec<String>,
    pub help: Option<String>,
    #[serde(default)]
    pub required: bool,
    pub default: Option<Value>,
    /// Name of the value type, looked up in the registry
    #[serde(rename = "type")]
    pub value_type: Option<String>,
    pub choices: Option<Vec<SelectionOption>>,
    pub nargs: Option<Nargs>,
    /// Sub-commands by the token used to call them, for `subcommands` actions
    #[serde(default)]
    pub subcommands: IndexMap<String, SubcommandDefinition>,
}

impl ParameterDefinition {
    pub fn new(dest: impl Into<String>, action: ActionKind) -> Self {
        Self {
            dest: dest.into(),
            action,
            flags: Vec::new(),
            help: None,
            required: false,
            default: None,
            value_type: None,
            choices: None,
            nargs: None,
            subcommands: IndexMap::new(),
        }
    }

    /// Whether more than one value may be given for this parameter.
    #[must_use]
    pub fn accepts_many(&self) -> bool {
        self.nargs.as_ref().is_some_and(Nargs::is_multiple)
    }

    #[must_use]
    pub fn has_choices(&self) -> bool {
        self.choices.as_ref().is_some_and(|choices| !choices.is_empty())
    }
}

impl Display for ParameterDefinition {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "`{}`", self.dest)?;

        if !self.flags.is_empty() {
            write!(formatter, " ({})", self.flags.join(", "))?;
        }

        Ok(())
    }
}

/// Points at a command defined elsewhere in the same file by its `id`.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct CommandReference {
    #[serde(rename = "ref")]
    pub reference: String,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum SubcommandDefinition {
    Reference(CommandReference),
    Inline(CommandDefinition),
}

impl SubcommandDefinition {
    pub fn reference(id: impl Into<String>) -> Self {
        SubcommandDefinition::Reference(CommandReference {
            reference: id.into(),
        })
    }
}

impl From<CommandDefinition> for SubcommandDefinition {
    fn from(value: CommandDefinition) -> Self {
        SubcommandDefinition::Inline(value)
    }
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
pub struct CommandDefinition {
    pub id: Option<String>,
    /// Program name, as shown in usage lines
    pub name: Option<String>,
    pub description: Option<String>,
    pub epilog: Option<String>,
    /// What submitting this command should do; carried along, never invoked
    pub action: Option<String>,
    #[serde(default)]
    pub parameters: Vec<ParameterDefinition>,
}

impl CommandDefinition {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_parameter(mut self, parameter: ParameterDefinition) -> Self {
        self.parameters.push(parameter);
        self
    }
}

impl Display for CommandDefinition {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        match (&self.id, &self.name) {
            (Some(id), Some(name)) if id != name => write!(formatter, "{id} ({name})"),
            (Some(id), _) => formatter.write_str(id),
            (None, Some(name)) => formatter.write_str(name),
            (None, None) => formatter.write_str("<unnamed command>"),
        }
    }
}

/// All command definitions loaded together, addressable by id.
#[derive(Debug, Clone, Default)]
pub struct CommandLibrary {
    definitions: Vec<CommandDefinition>,
}

impl CommandLibrary {
    #[must_use]
    pub fn new(definitions: Vec<CommandDefinition>) -> Self {
        Self { definitions }
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&CommandDefinition> {
        self.definitions
            .iter()
            .find(|definition| definition.id.as_deref() == Some(id))
    }

    #[must_use]
    pub fn first(&self) -> Option<&CommandDefinition> {
        self.definitions.first()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CommandDefinition> {
        self.definitions.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parameter_definition_from_yaml() {
        let yaml = r#"
dest: kind
flags: ["-t", "--type"]
help: "Filter by type"
choices: ["file", "dir", ["Everything", 0]]
nargs: "+"
"#;
        let parameter: ParameterDefinition = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(parameter.action, ActionKind::Store);
        assert_eq!(parameter.flags, vec!["-t", "--type"]);
        assert_eq!(parameter.nargs, Some(Nargs::OneOrMore));
        assert!(parameter.accepts_many());

        let choices = parameter.choices.unwrap();
        assert_eq!(choices[0], SelectionOption::from("file"));
        assert_eq!(
            choices[2],
            SelectionOption::Labeled("Everything".to_string(), OptionValue::Integer(0))
        );
        assert_eq!(choices[2].label(), "Everything");
    }

    #[test]
    fn test_nargs_from_yaml() {
        let nargs: Nargs = serde_yaml::from_str("3").unwrap();
        assert_eq!(nargs, Nargs::Exactly(3));
        let nargs: Nargs = serde_yaml::from_str("'?'").unwrap();
        assert_eq!(nargs, Nargs::Optional);
        let nargs: Nargs = serde_yaml::from_str("'*'").unwrap();
        assert_eq!(nargs, Nargs::ZeroOrMore);

        let result: Result<Nargs, _> = serde_yaml::from_str("'many'");
        assert!(result.is_err());
    }

    #[test]
    fn test_nargs_is_multiple() {
        assert!(!Nargs::Exactly(1).is_multiple());
        assert!(Nargs::Exactly(2).is_multiple());
        assert!(!Nargs::Optional.is_multiple());
        assert!(Nargs::ZeroOrMore.is_multiple());
    }

    #[test]
    fn test_subcommand_reference_or_inline() {
        let yaml = r#"
dest: command
action: subcommands
subcommands:
  list:
    ref: list_command
  delete:
    parameters:
      - dest: name
"#;
        let parameter: ParameterDefinition = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(parameter.action, ActionKind::Subcommands);
        assert_eq!(
            parameter.subcommands.get("list"),
            Some(&SubcommandDefinition::reference("list_command"))
        );
        match parameter.subcommands.get("delete") {
            Some(SubcommandDefinition::Inline(definition)) => {
                assert_eq!(definition.parameters.len(), 1);
                assert_eq!(definition.parameters[0].dest, "name");
            }
            other => panic!("Expected an inline definition, got {other:?}"),
        }
    }

    #[test]
    fn test_command_definition_display() {
        let mut definition = CommandDefinition::named("prog");
        assert_eq!(definition.to_string(), "prog");

        definition.id = Some("root".to_string());
        assert_eq!(definition.to_string(), "root (prog)");

        assert_eq!(CommandDefinition::default().to_string(), "<unnamed command>");
    }

    #[test]
    fn test_command_library_lookup() {
        let mut first = CommandDefinition::named("first");
        first.id = Some("one".to_string());
        let mut second = CommandDefinition::named("second");
        second.id = Some("two".to_string());

        let library = CommandLibrary::new(vec![first, second]);

        assert_eq!(library.len(), 2);
        assert_eq!(library.first().and_then(|d| d.name.as_deref()), Some("first"));
        assert_eq!(library.get("two").and_then(|d| d.name.as_deref()), Some("second"));
        assert!(library.get("three").is_none());
    }
}
