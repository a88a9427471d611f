//! # Swagger Models
//!
//! Canonical, already-normalized representation of a Swagger document.
//!
//! Everything downstream of the normalizer reads these types only; the
//! "whichever key exists" lookups of the raw formats live in
//! [`crate::oas::normalization`].

use indexmap::IndexMap;
use serde_json::Value;

/// Keys under a path item that are structural rather than HTTP operations.
pub const PSEUDO_PATH_KEYS: [&str; 2] = ["$ref", "parameters"];

/// A parsed Swagger document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpecDocument {
    /// Top-level tag declarations, in source order.
    pub tags: Vec<TagDeclaration>,
    /// Operations keyed by path, then by lower-case method, in source order.
    pub paths: IndexMap<String, IndexMap<String, Operation>>,
    /// Shared responses; `None` when the document has no `responses` key.
    pub responses: Option<IndexMap<String, SchemaObject>>,
    /// Shared schemas; `None` when the document has no `definitions` key.
    pub definitions: Option<IndexMap<String, SchemaObject>>,
}

impl SpecDocument {
    /// Whether `name` exists under `definitions`.
    pub fn has_definition(&self, name: &str) -> bool {
        self.definitions
            .as_ref()
            .is_some_and(|defs| defs.contains_key(name))
    }

    /// Whether `name` exists under `responses`.
    pub fn has_response(&self, name: &str) -> bool {
        self.responses
            .as_ref()
            .is_some_and(|resps| resps.contains_key(name))
    }

    /// Total number of operations, pseudo entries excluded.
    pub fn operation_count(&self) -> usize {
        self.paths.values().map(IndexMap::len).sum()
    }
}

/// A declared tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagDeclaration {
    /// Tag name, matched case-sensitively.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
}

/// One HTTP method bound to one path.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Operation {
    /// Short summary shown as the block's body text.
    pub summary: Option<String>,
    /// Long description (`notes` in Swagger 1.2).
    pub description: Option<String>,
    /// Accepted media types.
    pub consumes: Option<Vec<String>>,
    /// Produced media types.
    pub produces: Option<Vec<String>>,
    /// Tags; `None` when the operation carries no `tags` key.
    pub tags: Option<Vec<String>>,
    /// Parameters in source order; `None` when the key is absent.
    pub parameters: Option<Vec<Parameter>>,
    /// Responses keyed by status code (or `default`); `None` when absent.
    pub responses: Option<IndexMap<String, SchemaObject>>,
}

/// A single operation parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    /// Parameter name.
    pub name: String,
    /// Location (`query`, `path`, `body`, ...).
    pub location: String,
    /// Optional description.
    pub description: Option<String>,
    /// Whether the parameter must be supplied.
    pub required: bool,
    /// Declared type of the parameter.
    pub kind: ParameterType,
}

/// How a parameter declares its type.
#[derive(Debug, Clone, PartialEq)]
pub enum ParameterType {
    /// A primitive `type` value such as `string`.
    Primitive(String),
    /// A `schema` (body parameters).
    Schema(SchemaObject),
    /// Neither `type` nor `schema` was given.
    Unspecified,
}

/// A schema fragment with lenient accessors.
///
/// Malformed fields are dropped to `None` instead of failing; the raw value is
/// kept for diagnostics.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SchemaObject {
    /// `$ref` pointer, verbatim.
    pub reference: Option<String>,
    /// The `type` keyword; `None` when absent.
    pub schema_type: Option<SchemaType>,
    /// The `items` schema of an array.
    pub items: Option<Box<SchemaObject>>,
    /// Properties in source order.
    pub properties: Option<IndexMap<String, SchemaObject>>,
    /// Value schema of a map-like object.
    pub additional_properties: Option<Box<SchemaObject>>,
    /// Names of required properties.
    pub required: Vec<String>,
    /// Short summary.
    pub summary: Option<String>,
    /// Long description.
    pub description: Option<String>,
    /// Accepted media types (rare on schemas, shown when present).
    pub consumes: Option<Vec<String>>,
    /// Produced media types (rare on schemas, shown when present).
    pub produces: Option<Vec<String>>,
    /// The fragment as it appeared in the source.
    pub raw: Value,
}

impl SchemaObject {
    /// Compact JSON of the source fragment.
    pub fn raw_dump(&self) -> String {
        self.raw.to_string()
    }
}

/// Value of a schema's `type` keyword.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaType {
    /// `boolean`
    Boolean,
    /// `string`
    String,
    /// `integer`
    Integer,
    /// `number`
    Number,
    /// `file` (form uploads)
    File,
    /// `array`
    Array,
    /// `object`
    Object,
    /// Anything else, including non-string `type` values.
    Other(String),
}

impl SchemaType {
    /// Parses a `type` value.
    pub fn from_value(value: &Value) -> Self {
        match value.as_str() {
            Some("boolean") => SchemaType::Boolean,
            Some("string") => SchemaType::String,
            Some("integer") => SchemaType::Integer,
            Some("number") => SchemaType::Number,
            Some("file") => SchemaType::File,
            Some("array") => SchemaType::Array,
            Some("object") => SchemaType::Object,
            Some(other) => SchemaType::Other(other.to_string()),
            None => SchemaType::Other(value.to_string()),
        }
    }

    /// Name of a primitive type, `None` for containers and unknown types.
    pub fn primitive_name(&self) -> Option<&'static str> {
        match self {
            SchemaType::Boolean => Some("boolean"),
            SchemaType::String => Some("string"),
            SchemaType::Integer => Some("integer"),
            SchemaType::Number => Some("number"),
            SchemaType::File => Some("file"),
            _ => None,
        }
    }
}
