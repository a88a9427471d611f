//! # Operation Grouping
//!
//! Groups operations by tag and validates tag filters.

use crate::error::{AppError, AppResult};
use crate::oas::models::{Operation, SpecDocument, PSEUDO_PATH_KEYS};
use indexmap::IndexMap;

/// Key of the unnamed group collecting untagged operations.
pub const DEFAULT_GROUP: &str = "";

/// An operation placed in a group.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroupedOperation<'a> {
    /// Path template.
    pub path: &'a str,
    /// Lower-case HTTP method.
    pub method: &'a str,
    /// The operation itself.
    pub operation: &'a Operation,
}

/// Tag name to operations, in display order.
pub type TagGroups<'a> = IndexMap<String, Vec<GroupedOperation<'a>>>;

/// Groups every operation of `spec` by tag.
///
/// Without top-level tag declarations there is a single [`DEFAULT_GROUP`]
/// holding every operation, whatever its own `tags` say. Otherwise:
/// - Declared tags are seeded first, in declaration order, and kept even when empty.
/// - Tags used by operations but never declared get a group on first use.
/// - Operations without tags go to [`DEFAULT_GROUP`].
pub fn group_by_tag(spec: &SpecDocument) -> TagGroups<'_> {
    let declared = !spec.tags.is_empty();
    let mut groups: TagGroups<'_> = spec
        .tags
        .iter()
        .map(|tag| (tag.name.clone(), Vec::new()))
        .collect();

    for (path, methods) in &spec.paths {
        for (method, operation) in methods {
            if PSEUDO_PATH_KEYS.contains(&method.as_str()) {
                continue;
            }
            let entry = GroupedOperation {
                path,
                method,
                operation,
            };
            match operation.tags.as_deref() {
                Some(tags) if declared && !tags.is_empty() => {
                    for tag in tags {
                        groups.entry(tag.clone()).or_default().push(entry);
                    }
                }
                _ => groups
                    .entry(DEFAULT_GROUP.to_string())
                    .or_default()
                    .push(entry),
            }
        }
    }

    if groups.is_empty() {
        groups.insert(DEFAULT_GROUP.to_string(), Vec::new());
    }
    groups
}

/// Checks that every selected tag is available.
///
/// Matching is exact and case-sensitive; the first missing tag, in request
/// order, is reported.
pub fn validate_tag_filter<S: AsRef<str>>(
    selected: &[S],
    available: &[&str],
    locator: &str,
) -> AppResult<()> {
    match selected
        .iter()
        .map(AsRef::as_ref)
        .find(|tag| !available.contains(tag))
    {
        Some(tag) => Err(AppError::UnknownTag {
            tag: tag.to_string(),
            locator: locator.to_string(),
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oas::normalization::normalize_document;
    use serde_json::json;

    fn spec(value: serde_json::Value) -> SpecDocument {
        normalize_document(&value).unwrap()
    }

    fn summary(groups: &TagGroups<'_>) -> Vec<(String, Vec<String>)> {
        groups
            .iter()
            .map(|(tag, ops)| {
                (
                    tag.clone(),
                    ops.iter()
                        .map(|op| format!("{} {}", op.method, op.path))
                        .collect(),
                )
            })
            .collect()
    }

    #[test]
    fn test_declared_tags_are_seeded_even_if_empty() {
        let doc = spec(json!({
            "tags": [{"name": "pets"}, {"name": "store"}],
            "paths": {"/pets": {"get": {"tags": ["pets"]}}}
        }));
        assert_eq!(
            summary(&group_by_tag(&doc)),
            vec![
                ("pets".to_string(), vec!["get /pets".to_string()]),
                ("store".to_string(), vec![]),
            ]
        );
    }

    #[test]
    fn test_no_tags_anywhere_uses_default_group() {
        let doc = spec(json!({
            "paths": {
                "/a": {"get": {}, "post": {}},
                "/b": {"delete": {}}
            }
        }));
        let groups = group_by_tag(&doc);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[DEFAULT_GROUP].len(), 3);
    }

    #[test]
    fn test_operation_tags_ignored_without_declarations() {
        let doc = spec(json!({
            "paths": {
                "/pets": {"get": {"tags": ["pets"]}},
                "/store": {"get": {"tags": ["store"]}, "post": {}}
            }
        }));
        assert_eq!(
            summary(&group_by_tag(&doc)),
            vec![(
                DEFAULT_GROUP.to_string(),
                vec![
                    "get /pets".to_string(),
                    "get /store".to_string(),
                    "post /store".to_string()
                ]
            )]
        );
    }

    #[test]
    fn test_empty_document_still_has_default_group() {
        let doc = spec(json!({"paths": {}}));
        let groups = group_by_tag(&doc);
        assert_eq!(groups.len(), 1);
        assert!(groups[DEFAULT_GROUP].is_empty());
    }

    #[test]
    fn test_operation_in_every_named_group() {
        let doc = spec(json!({
            "tags": [{"name": "pets"}, {"name": "store"}],
            "paths": {"/orders": {"post": {"tags": ["store", "pets"]}}}
        }));
        let groups = group_by_tag(&doc);
        assert_eq!(groups["pets"].len(), 1);
        assert_eq!(groups["store"].len(), 1);
    }

    #[test]
    fn test_untagged_and_undeclared() {
        let doc = spec(json!({
            "tags": [{"name": "pets"}],
            "paths": {
                "/pets": {"get": {"tags": ["pets"]}, "post": {}},
                "/users": {"get": {"tags": ["users"]}}
            }
        }));
        assert_eq!(
            summary(&group_by_tag(&doc)),
            vec![
                ("pets".to_string(), vec!["get /pets".to_string()]),
                (DEFAULT_GROUP.to_string(), vec!["post /pets".to_string()]),
                ("users".to_string(), vec!["get /users".to_string()]),
            ]
        );
    }

    #[test]
    fn test_pseudo_entries_are_skipped() {
        let doc = spec(json!({
            "paths": {
                "/pets": {
                    "parameters": [{"name": "id", "in": "path"}],
                    "$ref": "#/x",
                    "get": {}
                }
            }
        }));
        assert_eq!(group_by_tag(&doc)[DEFAULT_GROUP].len(), 1);
    }

    #[test]
    fn test_validate_reports_first_missing() {
        let err = validate_tag_filter(&["pets", "Store", "users"], &["pets", "store"], "api.json")
            .unwrap_err();
        match err {
            AppError::UnknownTag { tag, locator } => {
                assert_eq!(tag, "Store");
                assert_eq!(locator, "api.json");
            }
            other => panic!("unexpected error {}", other),
        }
    }

    #[test]
    fn test_validate_accepts_known_and_empty() {
        assert!(validate_tag_filter(&["pets"], &["pets", "store"], "api.json").is_ok());
        let none: [&str; 0] = [];
        assert!(validate_tag_filter(&none, &["pets"], "api.json").is_ok());
    }
}
