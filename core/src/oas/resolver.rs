//! # Resolver Module
//!
//! Describes schema fragments as [`SchemaNode`] trees ready for tabulation.
//!
//! Handles:
//! - `$ref` classification. References become cross-reference nodes and are
//!   never substituted inline, so reference cycles cannot recurse.
//! - Recursive description of arrays, objects and maps.
//! - Inline placeholders for unresolved references and unknown types.

use crate::error::AppError;
use crate::oas::models::{SchemaObject, SchemaType, SpecDocument};
use crate::oas::ref_utils::{parse_local_ref, RefSection};

/// Marker appended to the displayed name of required properties and parameters.
pub const REQUIRED_MARKER: &str = "*";

/// Deepest inline nesting described before giving up.
pub const MAX_SCHEMA_DEPTH: usize = 32;

/// Resolved, rendering-ready description of a schema fragment.
///
/// `label` fields hold the accumulated prefix (e.g. `"array of "`) that is
/// printed in front of the node's own text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaNode {
    /// Cross-reference to a definition or shared response.
    Reference {
        /// Section the target lives in.
        section: RefSection,
        /// Target name.
        name: String,
        /// Prefix of the link text.
        label: String,
    },
    /// A `$ref` that could not be resolved.
    Unresolved {
        /// The pointer as written.
        pointer: String,
    },
    /// Primitive type; holds the complete text, prefix included.
    Primitive(String),
    /// Array with described items.
    Array {
        /// Prefix of this array (without `"array of "`).
        label: String,
        /// Item description, already carrying `label + "array of "`.
        inner: Box<SchemaNode>,
    },
    /// Array without `items`.
    UnknownArray {
        /// Prefix.
        label: String,
    },
    /// Object with properties, one row each, in source order.
    Properties(Vec<PropertyRow>),
    /// Object with `additionalProperties` only.
    Map {
        /// Prefix.
        label: String,
        /// Name of the value type.
        value_type: String,
    },
    /// Object without any structure.
    OctetStream {
        /// Prefix.
        label: String,
    },
    /// Schema without a `type`.
    Empty {
        /// Prefix.
        label: String,
    },
    /// Unrecognized `type`; embeds the raw fragment.
    Unknown {
        /// Prefix.
        label: String,
        /// Compact JSON of the fragment.
        raw: String,
    },
}

impl SchemaNode {
    /// Single-line text for leaf nodes; `None` for property tables and links.
    pub fn text(&self) -> Option<String> {
        match self {
            SchemaNode::Reference { .. } | SchemaNode::Properties(_) => None,
            SchemaNode::Unresolved { pointer } => Some(format!("unresolved reference {}", pointer)),
            SchemaNode::Primitive(text) => Some(text.clone()),
            SchemaNode::Array { inner, .. } => inner.text(),
            SchemaNode::UnknownArray { label } => Some(format!("{}array of unknown type", label)),
            SchemaNode::Map { label, value_type } => {
                Some(format!("{}map of strings to {}", label, value_type))
            }
            SchemaNode::OctetStream { label } => Some(format!("{}Raw Octet Stream", label)),
            SchemaNode::Empty { label } => Some(format!("{}No Data Returned", label)),
            SchemaNode::Unknown { label, raw } => Some(format!("{}unknown type - {}", label, raw)),
        }
    }
}

/// One row of a properties table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyRow {
    /// Property name as declared.
    pub name: String,
    /// Whether the name is listed in the parent's `required`.
    pub required: bool,
    /// Property description, empty when absent.
    pub description: String,
    /// Description of the property's type.
    pub node: SchemaNode,
}

impl PropertyRow {
    /// Name with the required marker applied.
    pub fn display_name(&self) -> String {
        display_name(&self.name, self.required)
    }
}

/// Applies the required marker to a property or parameter name.
pub fn display_name(name: &str, required: bool) -> String {
    if required {
        format!("{}{}", name, REQUIRED_MARKER)
    } else {
        name.to_string()
    }
}

/// Describes schema fragments of one document.
///
/// Reference targets are checked by name lookup, so forward references resolve
/// like any other.
#[derive(Debug, Clone, Copy, Default)]
pub struct SchemaResolver<'a> {
    document: Option<&'a SpecDocument>,
}

impl<'a> SchemaResolver<'a> {
    /// Resolver checking reference targets against `document`.
    pub fn new(document: &'a SpecDocument) -> Self {
        Self {
            document: Some(document),
        }
    }

    /// Describes `schema`, prefixing leaf text with `label`.
    pub fn describe(&self, label: &str, schema: &SchemaObject) -> SchemaNode {
        self.describe_at(label, schema, 0)
    }

    fn describe_at(&self, label: &str, schema: &SchemaObject, depth: usize) -> SchemaNode {
        if let Some(pointer) = &schema.reference {
            return self.describe_reference(label, pointer);
        }
        if depth >= MAX_SCHEMA_DEPTH {
            tracing::warn!(depth, "schema nesting too deep, truncating");
            return SchemaNode::Unknown {
                label: label.to_string(),
                raw: "nesting too deep".to_string(),
            };
        }

        let Some(schema_type) = &schema.schema_type else {
            return SchemaNode::Empty {
                label: label.to_string(),
            };
        };

        if let Some(primitive) = schema_type.primitive_name() {
            return SchemaNode::Primitive(format!("{}{}", label, primitive));
        }

        match schema_type {
            SchemaType::Array => match &schema.items {
                Some(items) => SchemaNode::Array {
                    label: label.to_string(),
                    inner: Box::new(self.describe_at(
                        &format!("{}array of ", label),
                        items,
                        depth + 1,
                    )),
                },
                None => SchemaNode::UnknownArray {
                    label: label.to_string(),
                },
            },
            SchemaType::Object => self.describe_object(label, schema, depth),
            other => {
                let name = match other {
                    SchemaType::Other(name) => name.clone(),
                    _ => format!("{:?}", other),
                };
                let err = AppError::UnknownSchemaType(name);
                tracing::warn!(error = %err, "rendering schema as unknown type");
                SchemaNode::Unknown {
                    label: label.to_string(),
                    raw: schema.raw_dump(),
                }
            }
        }
    }

    fn describe_object(&self, label: &str, schema: &SchemaObject, depth: usize) -> SchemaNode {
        if let Some(properties) = &schema.properties {
            let rows = properties
                .iter()
                .map(|(name, prop)| PropertyRow {
                    name: name.clone(),
                    required: schema.required.iter().any(|r| r == name),
                    description: prop.description.clone().unwrap_or_default(),
                    node: self.describe_at("", prop, depth + 1),
                })
                .collect();
            return SchemaNode::Properties(rows);
        }

        match &schema.additional_properties {
            Some(values) => SchemaNode::Map {
                label: label.to_string(),
                value_type: value_type_name(values),
            },
            None => SchemaNode::OctetStream {
                label: label.to_string(),
            },
        }
    }

    fn describe_reference(&self, label: &str, pointer: &str) -> SchemaNode {
        let resolved = parse_local_ref(pointer).filter(|target| match self.document {
            None => true,
            Some(doc) => match target.section {
                RefSection::Definitions => doc.has_definition(&target.name),
                RefSection::Responses => doc.has_response(&target.name),
            },
        });

        match resolved {
            Some(target) => SchemaNode::Reference {
                section: target.section,
                name: target.name,
                label: label.to_string(),
            },
            None => {
                let err = AppError::ReferenceResolution(pointer.to_string());
                tracing::warn!(error = %err, "rendering reference as placeholder");
                SchemaNode::Unresolved {
                    pointer: pointer.to_string(),
                }
            }
        }
    }
}

/// Describes `schema` without checking reference targets.
///
/// Pure and deterministic: equal input always yields an equal node.
pub fn describe_schema(label: &str, schema: &SchemaObject) -> SchemaNode {
    SchemaResolver::default().describe(label, schema)
}

fn value_type_name(values: &SchemaObject) -> String {
    if let Some(target) = values.reference.as_deref().and_then(parse_local_ref) {
        return target.name;
    }
    match &values.schema_type {
        Some(SchemaType::Other(name)) => name.clone(),
        Some(SchemaType::Array) => "array".to_string(),
        Some(SchemaType::Object) => "object".to_string(),
        Some(t) => t.primitive_name().unwrap_or("Unknown").to_string(),
        None => "Unknown".to_string(),
    }
}
