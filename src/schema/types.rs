//! Schema type definitions
//!
//! Supported schema kinds:
//! - string: optional full-match pattern and length bounds
//! - number: optional decimal bounds and enumeration
//! - bool: no constraints
//! - object: ordered attributes with child schemas, required names, description
//! - array: one element schema applied to every element
//!
//! Nodes are pure declarations. Setters consume and return the node so trees
//! can be built in one expression; validation lives in the validator.

use std::collections::BTreeMap;

use indexmap::IndexMap;
use regex::Regex;
use rust_decimal::Decimal;

use super::errors::{ErrorKind, SchemaError, SchemaResult};

/// Per-node message overrides, keyed by failure kind
pub type MessageOverrides = BTreeMap<ErrorKind, String>;

/// Tag of a schema node's variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SchemaKind {
    String,
    Number,
    Bool,
    Object,
    Array,
}

impl SchemaKind {
    /// Returns the kind name for error messages
    pub fn name(&self) -> &'static str {
        match self {
            SchemaKind::String => "string",
            SchemaKind::Number => "number",
            SchemaKind::Bool => "bool",
            SchemaKind::Object => "object",
            SchemaKind::Array => "array",
        }
    }
}

/// A regular expression that must match the whole input.
#[derive(Debug, Clone)]
pub struct Pattern {
    source: String,
    regex: Regex,
}

impl Pattern {
    /// Compiles `source`, anchored at both ends.
    pub fn new(source: impl Into<String>) -> SchemaResult<Self> {
        let source = source.into();
        let regex = Regex::new(&format!("^(?:{})$", source)).map_err(|e| {
            SchemaError::InvalidPattern {
                pattern: source.clone(),
                reason: e.to_string(),
            }
        })?;
        Ok(Self { source, regex })
    }

    /// Returns the pattern as written by the caller
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// True when the entire `text` matches
    pub fn is_full_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }
}

/// String constraints
#[derive(Debug, Clone, Default)]
pub struct StringSchema {
    pattern: Option<Pattern>,
    min_length: Option<usize>,
    max_length: Option<usize>,
    messages: MessageOverrides,
}

impl StringSchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requires the whole string to match `pattern`.
    ///
    /// Fails when the pattern does not compile.
    pub fn pattern(mut self, pattern: impl Into<String>) -> SchemaResult<Self> {
        self.pattern = Some(Pattern::new(pattern)?);
        Ok(self)
    }

    /// Minimum length in characters (inclusive)
    pub fn min_length(mut self, min: usize) -> Self {
        self.min_length = Some(min);
        self
    }

    /// Maximum length in characters (inclusive)
    pub fn max_length(mut self, max: usize) -> Self {
        self.max_length = Some(max);
        self
    }

    /// Overrides the message reported for `kind`
    pub fn error(mut self, kind: ErrorKind, message: impl Into<String>) -> Self {
        self.messages.insert(kind, message.into());
        self
    }

    pub fn get_pattern(&self) -> Option<&Pattern> {
        self.pattern.as_ref()
    }

    pub fn get_min_length(&self) -> Option<usize> {
        self.min_length
    }

    pub fn get_max_length(&self) -> Option<usize> {
        self.max_length
    }
}

/// Numeric constraints, compared as exact decimals
#[derive(Debug, Clone, Default)]
pub struct NumberSchema {
    minimum: Option<Decimal>,
    maximum: Option<Decimal>,
    enumeration: Option<Vec<Decimal>>,
    messages: MessageOverrides,
}

impl NumberSchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inclusive lower bound
    pub fn minimum(mut self, min: impl Into<Decimal>) -> Self {
        self.minimum = Some(min.into());
        self
    }

    /// Inclusive upper bound
    pub fn maximum(mut self, max: impl Into<Decimal>) -> Self {
        self.maximum = Some(max.into());
        self
    }

    /// The value must equal one of `values`
    pub fn enumeration<I, D>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = D>,
        D: Into<Decimal>,
    {
        self.enumeration = Some(values.into_iter().map(Into::into).collect());
        self
    }

    /// Overrides the message reported for `kind`
    pub fn error(mut self, kind: ErrorKind, message: impl Into<String>) -> Self {
        self.messages.insert(kind, message.into());
        self
    }

    pub fn get_minimum(&self) -> Option<Decimal> {
        self.minimum
    }

    pub fn get_maximum(&self) -> Option<Decimal> {
        self.maximum
    }

    pub fn get_enumeration(&self) -> Option<&[Decimal]> {
        self.enumeration.as_deref()
    }
}

/// Boolean schema; only the data kind is checked
#[derive(Debug, Clone, Default)]
pub struct BoolSchema {
    messages: MessageOverrides,
}

impl BoolSchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the message reported for `kind`
    pub fn error(mut self, kind: ErrorKind, message: impl Into<String>) -> Self {
        self.messages.insert(kind, message.into());
        self
    }
}

/// Keyed mapping with per-attribute child schemas
#[derive(Debug, Clone, Default)]
pub struct ObjectSchema {
    attributes: IndexMap<String, Schema>,
    required: Vec<String>,
    description: Option<String>,
    messages: MessageOverrides,
}

impl ObjectSchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares attribute `name`.
    ///
    /// Declaring the same name twice replaces the schema but keeps the
    /// attribute's original position.
    pub fn attr(mut self, name: impl Into<String>, schema: impl Into<Schema>) -> Self {
        self.attributes.insert(name.into(), schema.into());
        self
    }

    /// Declares attribute names that must be present.
    ///
    /// Only enforced when the validator runs with `enforce_required`.
    pub fn require<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for name in names {
            let name = name.into();
            if !self.required.contains(&name) {
                self.required.push(name);
            }
        }
        self
    }

    /// Describes this object
    pub fn desc(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Overrides the message reported for `kind`
    pub fn error(mut self, kind: ErrorKind, message: impl Into<String>) -> Self {
        self.messages.insert(kind, message.into());
        self
    }

    /// Attributes in declaration order
    pub fn attributes(&self) -> &IndexMap<String, Schema> {
        &self.attributes
    }

    pub fn required(&self) -> &[String] {
        &self.required
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

/// Homogeneous sequence
#[derive(Debug, Clone)]
pub struct ArraySchema {
    element: Box<Schema>,
    messages: MessageOverrides,
}

impl ArraySchema {
    /// Creates an array schema whose elements must match `element`
    pub fn new(element: impl Into<Schema>) -> Self {
        Self {
            element: Box::new(element.into()),
            messages: MessageOverrides::new(),
        }
    }

    /// Overrides the message reported for `kind`
    pub fn error(mut self, kind: ErrorKind, message: impl Into<String>) -> Self {
        self.messages.insert(kind, message.into());
        self
    }

    pub fn element(&self) -> &Schema {
        &self.element
    }
}

/// A schema node. The variant is fixed once the node is built.
#[derive(Debug, Clone)]
pub enum Schema {
    String(StringSchema),
    Number(NumberSchema),
    Bool(BoolSchema),
    Object(ObjectSchema),
    Array(ArraySchema),
}

impl Schema {
    /// Returns the variant tag
    pub fn kind(&self) -> SchemaKind {
        match self {
            Schema::String(_) => SchemaKind::String,
            Schema::Number(_) => SchemaKind::Number,
            Schema::Bool(_) => SchemaKind::Bool,
            Schema::Object(_) => SchemaKind::Object,
            Schema::Array(_) => SchemaKind::Array,
        }
    }

    /// Returns the message overrides declared on this node
    pub fn messages(&self) -> &MessageOverrides {
        match self {
            Schema::String(s) => &s.messages,
            Schema::Number(s) => &s.messages,
            Schema::Bool(s) => &s.messages,
            Schema::Object(s) => &s.messages,
            Schema::Array(s) => &s.messages,
        }
    }

    /// Returns the override for `kind`, if declared
    pub fn message_for(&self, kind: ErrorKind) -> Option<&str> {
        self.messages().get(&kind).map(String::as_str)
    }

    /// Nesting depth of the tree rooted here; scalars have depth 1
    pub fn depth(&self) -> usize {
        match self {
            Schema::String(_) | Schema::Number(_) | Schema::Bool(_) => 1,
            Schema::Object(obj) => {
                1 + obj
                    .attributes
                    .values()
                    .map(Schema::depth)
                    .max()
                    .unwrap_or(0)
            }
            Schema::Array(arr) => 1 + arr.element.depth(),
        }
    }
}

impl From<StringSchema> for Schema {
    fn from(schema: StringSchema) -> Self {
        Schema::String(schema)
    }
}

impl From<NumberSchema> for Schema {
    fn from(schema: NumberSchema) -> Self {
        Schema::Number(schema)
    }
}

impl From<BoolSchema> for Schema {
    fn from(schema: BoolSchema) -> Self {
        Schema::Bool(schema)
    }
}

impl From<ObjectSchema> for Schema {
    fn from(schema: ObjectSchema) -> Self {
        Schema::Object(schema)
    }
}

impl From<ArraySchema> for Schema {
    fn from(schema: ArraySchema) -> Self {
        Schema::Array(schema)
    }
}
