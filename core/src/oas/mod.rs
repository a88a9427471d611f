//! # Swagger Module
//!
//! - **models**: Canonical document representation.
//! - **normalization**: Raw mapping to canonical document, Swagger 1.2 and 2.0.
//! - **ref_utils**: `$ref` classification.
//! - **resolver**: Schema fragments to `SchemaNode` trees.
//! - **grouping**: Operations by tag, tag filter validation.

pub mod grouping;
pub mod models;
pub mod normalization;
pub mod ref_utils;
pub mod resolver;

pub use grouping::{group_by_tag, validate_tag_filter, GroupedOperation, TagGroups, DEFAULT_GROUP};
pub use models::{
    Operation, Parameter, ParameterType, SchemaObject, SchemaType, SpecDocument, TagDeclaration,
};
pub use normalization::{normalize_document, normalize_schema};
pub use resolver::{describe_schema, PropertyRow, SchemaNode, SchemaResolver};
