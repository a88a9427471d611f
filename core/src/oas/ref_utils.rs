//! # Reference Utilities
//!
//! Shared helpers for classifying `$ref` targets.
//!
//! Only two local sections are addressable: `#/definitions/{name}` and
//! `#/responses/{name}`. External documents are never fetched.

use percent_encoding::percent_decode_str;

const DEFINITIONS_PREFIX: &str = "#/definitions/";
const RESPONSES_PREFIX: &str = "#/responses/";

/// Section of the document a reference points into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefSection {
    /// `#/definitions/...`
    Definitions,
    /// `#/responses/...`
    Responses,
}

impl RefSection {
    /// Anchor id of the section rendered for `name`.
    ///
    /// Responses and definitions may share a name, so each gets its own prefix.
    pub fn anchor(self, name: &str) -> String {
        match self {
            RefSection::Definitions => format!("definition-{}", name),
            RefSection::Responses => format!("response-{}", name),
        }
    }
}

/// A parsed local reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefTarget {
    /// Which top-level map the name lives in.
    pub section: RefSection,
    /// Decoded name, as declared in its section.
    pub name: String,
}

/// Splits a `$ref` into its section and decoded name.
///
/// Returns `None` for any prefix other than the two known sections, for
/// nested pointers (`#/definitions/Pet/properties/id`) and for empty names.
pub fn parse_local_ref(ref_str: &str) -> Option<RefTarget> {
    let (section, rest) = if let Some(rest) = ref_str.strip_prefix(DEFINITIONS_PREFIX) {
        (RefSection::Definitions, rest)
    } else if let Some(rest) = ref_str.strip_prefix(RESPONSES_PREFIX) {
        (RefSection::Responses, rest)
    } else {
        return None;
    };

    if rest.is_empty() || rest.contains('/') {
        return None;
    }

    let name = decode_pointer_segment(rest);
    if name.is_empty() {
        None
    } else {
        Some(RefTarget { section, name })
    }
}

/// Decodes a JSON Pointer segment (handles `~1` and `~0`).
pub fn decode_pointer_segment(segment: &str) -> String {
    let decoded = segment.replace("~1", "/").replace("~0", "~");
    percent_decode_str(&decoded)
        .decode_utf8_lossy()
        .into_owned()
}
