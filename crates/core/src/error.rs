use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid argument: {}", .0)]
    InvalidArgument(String),

    #[error("There are no elements found via `{}` in the given context", .path)]
    SymbolNotFound { path: String },

    #[error(
        "Cannot search for `{}` inside `{}`: only namespaces may be traversed, found a {}",
        .segment,
        .parent,
        .found
    )]
    NotTraversable {
        parent: String,
        segment: String,
        found: &'static str,
    },

    #[error("Expected `{}` to name a {}, but it names a {}", .path, .expected, .found)]
    UnexpectedSymbol {
        path: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("The {} action is not an appropriate screen element", .0)]
    UnpresentableAction(String),

    #[error("Not implemented: {}", .0)]
    NotImplemented(String),

    #[error("Workflow `{}` has no fields or sub-workflows to present", .0)]
    EmptyWorkflow(String),

    #[error("Workflow `{}` has more than one field with index {}", .0, .1)]
    DuplicateFieldIndex(String, usize),

    #[error("Command definition `{}` refers back to itself through its sub-commands", .0)]
    CyclicDefinition(String),

    #[error("Invalid parameter `{}` on command `{}`: {}", .parameter, .command, .source)]
    Parameter {
        command: String,
        parameter: String,
        source: Box<Error>,
    },

    #[error("Error {} {} file at `{}`: {}", .action, .file_description, .path, .original)]
    Yaml {
        action: String,
        file_description: String,
        path: String,
        original: serde_yaml::Error,
    },

    #[error("IO error with {} file at path `{}`: {}", .file_description, .path, .original)]
    Io {
        file_description: String,
        path: String,
        original: std::io::Error,
    },

    #[error("STDIO error: {}", .0)]
    Stdio(#[from] std::io::Error),

    #[error("No command definitions were found. Is `{}` empty?", .path)]
    EmptyCommandDefinition { path: String },

    #[error("Found a non-unique command ID: `{}`", .0)]
    NonUniqueCommandId(String),

    #[error("Found a non-unique parameter destination on command {}: `{}`", .0, .1)]
    NonUniqueParameterDest(String, String),

    #[error("Invalid ID: ID may not be empty")]
    EmptyId,

    #[error("Invalid ID `{}`: ID may not contain spaces", .0)]
    IdWithSpace(String),
}

impl Error {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    pub fn symbol_not_found(path: &str) -> Self {
        Self::SymbolNotFound {
            path: path.to_string(),
        }
    }

    pub fn not_traversable(parent: &str, segment: &str, found: &'static str) -> Self {
        Self::NotTraversable {
            parent: parent.to_string(),
            segment: segment.to_string(),
            found,
        }
    }

    pub fn unexpected_symbol(path: &str, expected: &'static str, found: &'static str) -> Self {
        Self::UnexpectedSymbol {
            path: path.to_string(),
            expected,
            found,
        }
    }

    pub fn parameter(command: &str, parameter: &str, source: Error) -> Self {
        Self::Parameter {
            command: command.to_string(),
            parameter: parameter.to_string(),
            source: Box::new(source),
        }
    }

    pub fn empty_command_definition(path: String) -> Self {
        Self::EmptyCommandDefinition { path }
    }

    pub fn yaml_error(
        action: String,
        file_description: String,
        path: String,
        original: serde_yaml::Error,
    ) -> Self {
        Self::Yaml {
            action,
            file_description,
            path,
            original,
        }
    }

    pub fn io_error(file_description: String, path: String, original: std::io::Error) -> Self {
        Self::Io {
            file_description,
            path,
            original,
        }
    }

    /// Follows `Parameter` wrappers down to the error that caused them.
    #[must_use]
    pub fn root_cause(&self) -> &Error {
        match self {
            Self::Parameter { source, .. } => source.root_cause(),
            other => other,
        }
    }
}
