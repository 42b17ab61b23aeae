//! Value types that parameters can declare.

use std::fmt::{Display, Formatter};

use serde::Serialize;

/// Name of the type used when a parameter does not declare one.
pub const DEFAULT_TYPE_NAME: &str = "str";

/// The primitive kinds every value type derives from.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Primitive {
    Bool,
    Int,
    Float,
    Path,
    Str,
}

impl Display for Primitive {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(match self {
            Primitive::Bool => "bool",
            Primitive::Int => "int",
            Primitive::Float => "float",
            Primitive::Path => "path",
            Primitive::Str => "str",
        })
    }
}

/// A named value type.
///
/// Custom types such as `port` or `config_file` are declared with the
/// primitive they derive from, which is what widget selection looks at.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ValueType {
    pub name: String,
    pub primitive: Primitive,
}

impl ValueType {
    pub fn new(name: impl Into<String>, primitive: Primitive) -> Self {
        Self {
            name: name.into(),
            primitive,
        }
    }

    /// A type named after its own primitive, e.g. `int`.
    #[must_use]
    pub fn primitive(primitive: Primitive) -> Self {
        Self::new(primitive.to_string(), primitive)
    }

    /// Exact match or declared sub-type of `expected`.
    #[must_use]
    pub fn is_compatible_with(&self, expected: Primitive) -> bool {
        self.primitive == expected
    }
}

impl Display for ValueType {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        if self.name == self.primitive.to_string() {
            formatter.write_str(&self.name)
        } else {
            write!(formatter, "{} ({})", self.name, self.primitive)
        }
    }
}

/// A reference to a value type that may not have been looked up yet.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum TypeRef {
    Name(String),
    Type(ValueType),
}

impl TypeRef {
    pub fn named(name: impl Into<String>) -> Self {
        Self::Name(name.into())
    }

    /// The resolved primitive, if this reference has been resolved.
    #[must_use]
    pub fn primitive(&self) -> Option<Primitive> {
        match self {
            TypeRef::Name(_) => None,
            TypeRef::Type(value_type) => Some(value_type.primitive),
        }
    }
}

impl Default for TypeRef {
    fn default() -> Self {
        Self::named(DEFAULT_TYPE_NAME)
    }
}

impl From<ValueType> for TypeRef {
    fn from(value: ValueType) -> Self {
        Self::Type(value)
    }
}

impl From<Primitive> for TypeRef {
    fn from(value: Primitive) -> Self {
        Self::Type(ValueType::primitive(value))
    }
}

impl Display for TypeRef {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            TypeRef::Name(name) => write!(formatter, "`{name}`"),
            TypeRef::Type(value_type) => write!(formatter, "{value_type}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_type_compatibility() {
        let port = ValueType::new("port", Primitive::Int);
        assert!(port.is_compatible_with(Primitive::Int));
        assert!(!port.is_compatible_with(Primitive::Bool));
        assert!(!port.is_compatible_with(Primitive::Float));
    }

    #[test]
    fn test_value_type_display() {
        assert_eq!(ValueType::primitive(Primitive::Float).to_string(), "float");
        assert_eq!(ValueType::new("port", Primitive::Int).to_string(), "port (int)");
    }

    #[test]
    fn test_type_ref_display() {
        assert_eq!(TypeRef::named("std.path.PathBuf").to_string(), "`std.path.PathBuf`");
        assert_eq!(TypeRef::from(ValueType::new("port", Primitive::Int)).to_string(), "port (int)");
    }

    #[test]
    fn test_type_ref_default_is_unresolved_string() {
        let type_ref = TypeRef::default();
        assert_eq!(type_ref, TypeRef::Name("str".to_string()));
        assert!(type_ref.primitive().is_none());
        assert_eq!(TypeRef::from(Primitive::Bool).primitive(), Some(Primitive::Bool));
    }
}
