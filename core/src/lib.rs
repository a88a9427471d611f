#![deny(missing_docs)]

//! # Swaggerdoc Core
//!
//! Turns Swagger 1.2 / 2.0 documents into a generic, hyperlinked documentation
//! tree. Fetching bytes and producing final markup are left to the host.

/// Shared error types.
pub mod error;

/// Document tree primitives.
pub mod tree;

/// Source loading and decoding.
pub mod loader;

/// Swagger parsing, resolution and grouping.
pub mod oas;

/// Parameter, property and response tables.
pub mod tables;

/// Section assembly and the run boundary.
pub mod assembler;

pub use assembler::{assemble, render, try_render, RenderRequest};
pub use error::{AppError, AppResult};
pub use loader::{decode_document, FsLoader, SourceLoader, SourceLocator};
pub use oas::{describe_schema, group_by_tag, normalize_document, SchemaNode, SpecDocument};
pub use tree::{DocNode, DocumentTree, Inline};
