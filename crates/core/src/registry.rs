//! Name registry used to turn string references into value types and widgets.
//!
//! Definitions refer to types and widgets by dotted names (`int`,
//! `widgets.Switch`, `std.path.PathBuf`). Names are looked up in an explicit
//! tree of [`Namespace`]s that is populated up front; nothing outside of it
//! can be reached.

use indexmap::IndexMap;
use log::debug;

use crate::error::{Error, Result};
use crate::types::{Primitive, ValueType};
use crate::widgets::WidgetKind;

/// Something a dotted name can point at.
#[derive(Debug, Clone, PartialEq)]
pub enum Symbol {
    Type(ValueType),
    Widget(WidgetKind),
    Namespace(Namespace),
}

impl Symbol {
    /// Short description of what kind of symbol this is, for error messages.
    #[must_use]
    pub fn kind_name(&self) -> &'static str {
        match self {
            Symbol::Type(_) => "type",
            Symbol::Widget(_) => "widget",
            Symbol::Namespace(_) => "namespace",
        }
    }
}

impl From<ValueType> for Symbol {
    fn from(value: ValueType) -> Self {
        Symbol::Type(value)
    }
}

impl From<WidgetKind> for Symbol {
    fn from(value: WidgetKind) -> Self {
        Symbol::Widget(value)
    }
}

impl From<Namespace> for Symbol {
    fn from(value: Namespace) -> Self {
        Symbol::Namespace(value)
    }
}

/// An ordered set of named symbols, optionally backed by a builtins namespace.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Namespace {
    symbols: IndexMap<String, Symbol>,
    builtins: Option<Box<Namespace>>,
}

impl Namespace {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_symbol(mut self, name: impl Into<String>, symbol: impl Into<Symbol>) -> Self {
        self.insert(name, symbol);
        self
    }

    /// Attaches the namespace consulted when a top level name is missing.
    #[must_use]
    pub fn with_builtins(mut self, builtins: Namespace) -> Self {
        self.builtins = Some(Box::new(builtins));
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, symbol: impl Into<Symbol>) -> Option<Symbol> {
        self.symbols.insert(name.into(), symbol.into())
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Symbol> {
        self.symbols.get(name)
    }

    #[must_use]
    pub fn builtins(&self) -> Option<&Namespace> {
        self.builtins.as_deref()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Symbol)> {
        self.symbols.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

fn split_path(path: &str) -> Result<Vec<&str>> {
    if path.is_empty() {
        return Err(Error::invalid_argument(
            "Cannot find an element if its name was not supplied",
        ));
    }

    let segments: Vec<&str> = path.split('.').collect();
    if segments.iter().any(|segment| segment.is_empty()) {
        return Err(Error::invalid_argument(format!(
            "`{path}` contains an empty segment"
        )));
    }

    Ok(segments)
}

/// Finds the symbol named by the dotted `path` inside `context`.
///
/// The first segment falls back to the builtins attached to `context` when
/// `context` itself does not define it. Later segments are only looked up in
/// the namespace found by the previous segment.
///
/// # Arguments
///
/// * `path` - Dot separated name, such as `std.path.PathBuf`
/// * `context` - Namespace the first segment is looked up in
///
/// # Returns
///
/// The symbol bound to the last segment of `path`
///
/// # Errors
///
/// - [`Error::InvalidArgument`] if `path` is empty or has an empty segment
/// - [`Error::SymbolNotFound`] if a segment does not exist
/// - [`Error::NotTraversable`] if a segment other than the last names a type
///   or a widget
///
/// # Examples
///
/// ```
/// use argui_core::registry::{resolve, Namespace, Symbol};
/// use argui_core::types::{Primitive, ValueType};
///
/// let port = ValueType::new("port", Primitive::Int);
/// let context = Namespace::new().with_symbol(
///     "network",
///     Namespace::new().with_symbol("port", port.clone()),
/// );
///
/// assert_eq!(resolve("network.port", &context).unwrap(), &Symbol::Type(port));
/// assert!(resolve("network.host", &context).is_err());
/// ```
pub fn resolve<'a>(path: &str, context: &'a Namespace) -> Result<&'a Symbol> {
    let segments = split_path(path)?;
    let head = segments[0];

    let mut current = context
        .get(head)
        .or_else(|| context.builtins().and_then(|builtins| builtins.get(head)))
        .ok_or_else(|| Error::symbol_not_found(path))?;

    for (position, segment) in segments.iter().enumerate().skip(1) {
        let Symbol::Namespace(namespace) = current else {
            return Err(Error::not_traversable(
                &segments[..position].join("."),
                segment,
                current.kind_name(),
            ));
        };

        current = namespace
            .get(segment)
            .ok_or_else(|| Error::symbol_not_found(path))?;
    }

    Ok(current)
}

/// The set of names available to definitions.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    global: Namespace,
}

impl Registry {
    #[must_use]
    pub fn new(global: Namespace) -> Self {
        Self { global }
    }

    /// A registry with the primitive types, the widget kinds and the common
    /// Rust spellings of both.
    #[must_use]
    pub fn standard() -> Self {
        let builtins = Namespace::new()
            .with_symbol("str", ValueType::primitive(Primitive::Str))
            .with_symbol("string", ValueType::new("string", Primitive::Str))
            .with_symbol("int", ValueType::primitive(Primitive::Int))
            .with_symbol("integer", ValueType::new("integer", Primitive::Int))
            .with_symbol("float", ValueType::primitive(Primitive::Float))
            .with_symbol("bool", ValueType::primitive(Primitive::Bool))
            .with_symbol("path", ValueType::primitive(Primitive::Path));

        let mut widgets = Namespace::new();
        for kind in WidgetKind::ALL {
            widgets.insert(kind.name(), kind);
        }

        let mut primitives =
            Namespace::new().with_symbol("bool", ValueType::new("bool", Primitive::Bool));
        for name in ["i8", "i16", "i32", "i64", "isize", "u8", "u16", "u32", "u64", "usize"] {
            primitives.insert(name, ValueType::new(name, Primitive::Int));
        }
        for name in ["f32", "f64"] {
            primitives.insert(name, ValueType::new(name, Primitive::Float));
        }
        primitives.insert("str", ValueType::new("str", Primitive::Str));

        let std = Namespace::new()
            .with_symbol("primitive", primitives)
            .with_symbol(
                "string",
                Namespace::new().with_symbol("String", ValueType::new("String", Primitive::Str)),
            )
            .with_symbol(
                "path",
                Namespace::new()
                    .with_symbol("PathBuf", ValueType::new("PathBuf", Primitive::Path))
                    .with_symbol("Path", ValueType::new("Path", Primitive::Path)),
            );

        let global = Namespace::new()
            .with_symbol("widgets", widgets)
            .with_symbol("std", std)
            .with_builtins(builtins);

        Self::new(global)
    }

    #[must_use]
    pub fn global(&self) -> &Namespace {
        &self.global
    }

    /// Adds `symbol` under the dotted `path`, creating namespaces on the way.
    ///
    /// # Errors
    ///
    /// Returns an error if `path` is malformed or passes through a name that
    /// is already bound to something other than a namespace.
    pub fn register(&mut self, path: &str, symbol: impl Into<Symbol>) -> Result<()> {
        let segments = split_path(path)?;
        let (last, parents) = segments
            .split_last()
            .ok_or_else(|| Error::invalid_argument("Cannot register a symbol without a name"))?;

        let mut namespace = &mut self.global;
        for (position, segment) in parents.iter().enumerate() {
            let entry = namespace
                .symbols
                .entry((*segment).to_string())
                .or_insert_with(|| Symbol::Namespace(Namespace::new()));

            namespace = match entry {
                Symbol::Namespace(inner) => inner,
                other => {
                    return Err(Error::not_traversable(
                        &segments[..=position].join("."),
                        segments[position + 1],
                        other.kind_name(),
                    ))
                }
            };
        }

        if namespace.insert(*last, symbol).is_some() {
            debug!("Replaced the symbol registered as `{path}`");
        }

        Ok(())
    }

    /// Registers a custom value type, e.g. `network.port` deriving from `int`.
    ///
    /// # Errors
    ///
    /// See [`Registry::register`].
    pub fn register_type(&mut self, path: &str, value_type: ValueType) -> Result<()> {
        self.register(path, value_type)
    }

    /// Looks up `path` in `context`, or in the global namespace when no
    /// context is given.
    ///
    /// # Arguments
    ///
    /// * `path` - Dot separated name to look up
    /// * `context` - Optional namespace to search instead of the global one
    ///
    /// # Errors
    ///
    /// See [`resolve`].
    pub fn resolve<'a>(&'a self, path: &str, context: Option<&'a Namespace>) -> Result<&'a Symbol> {
        resolve(path, context.unwrap_or(&self.global))
    }

    /// Looks up a value type by name.
    ///
    /// # Errors
    ///
    /// Fails like [`resolve`], or with [`Error::UnexpectedSymbol`] when the
    /// name does not point at a type.
    pub fn resolve_type(&self, path: &str) -> Result<&ValueType> {
        match self.resolve(path, None)? {
            Symbol::Type(value_type) => Ok(value_type),
            other => Err(Error::unexpected_symbol(path, "type", other.kind_name())),
        }
    }

    /// Looks up a widget kind by name.
    ///
    /// # Errors
    ///
    /// Fails like [`resolve`], or with [`Error::UnexpectedSymbol`] when the
    /// name does not point at a widget.
    pub fn resolve_widget(&self, path: &str) -> Result<WidgetKind> {
        match self.resolve(path, None)? {
            Symbol::Widget(kind) => Ok(*kind),
            other => Err(Error::unexpected_symbol(path, "widget", other.kind_name())),
        }
    }
}
