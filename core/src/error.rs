//! # Error Handling
//!
//! Provides the `AppError` taxonomy shared by the loader, the normalizer and the
//! assembler.
//!
//! Two kinds never escape a run: `ReferenceResolution` and `UnknownSchemaType`
//! are degraded to inline placeholders by the resolver. Every other kind aborts
//! the run and is turned into a single error block at the run boundary.

use derive_more::{Display, From};

/// The Global Error Enum.
#[derive(Debug, Display, From)]
pub enum AppError {
    /// The source bytes could not be fetched (missing file, HTTP failure).
    #[from(ignore)]
    #[display("Failed to fetch '{locator}': {reason}")]
    SourceFetch {
        /// Locator as given by the invoking document.
        locator: String,
        /// Underlying failure.
        reason: String,
    },

    /// Bytes were fetched but are neither JSON nor YAML.
    #[from(ignore)]
    #[display("Failed to parse Swagger document: {_0}")]
    Parse(String),

    /// A key the document must carry is missing or has the wrong shape.
    #[from(ignore)]
    #[display("Invalid document structure: {_0}")]
    Structure(String),

    /// A requested tag filter is not among the discovered tags.
    #[from(ignore)]
    #[display("Tag '{tag}' not found in Swagger URL {locator}")]
    UnknownTag {
        /// The first offending tag.
        tag: String,
        /// Source the tags were discovered in.
        locator: String,
    },

    /// A `$ref` outside `#/definitions/` and `#/responses/`, or to a missing name.
    #[from(ignore)]
    #[display("Unresolved reference '{_0}'")]
    ReferenceResolution(String),

    /// A schema `type` value the resolver does not understand.
    #[from(ignore)]
    #[display("Unknown schema type '{_0}'")]
    UnknownSchemaType(String),

    /// Wrapper for standard IO errors.
    #[display("IO Error: {_0}")]
    Io(std::io::Error),
}

impl AppError {
    /// Whether the error stops the run (as opposed to degrading to a placeholder).
    pub fn is_abort(&self) -> bool {
        !matches!(
            self,
            AppError::ReferenceResolution(_) | AppError::UnknownSchemaType(_)
        )
    }

    /// Short reason that is safe to show in the rendered document.
    ///
    /// Only tag filter mistakes are actionable by the document author; all
    /// other details stay in the operational log.
    pub fn user_message(&self) -> Option<String> {
        match self {
            AppError::UnknownTag { .. } => Some(format!("Error. {}.", self)),
            _ => None,
        }
    }
}

/// Manual implementation of the standard Error trait.
impl std::error::Error for AppError {}

/// Helper type alias for Result using AppError.
pub type AppResult<T> = Result<T, AppError>;
