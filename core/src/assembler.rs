//! # Document Tree Assembly
//!
//! Composes method, response and definition blocks into the `Methods`,
//! `Responses` and `Definitions` sections, and owns the run boundary that turns
//! aborting errors into a single error block.

use crate::error::{AppError, AppResult};
use crate::loader::{decode_document, SourceLoader};
use crate::oas::grouping::{group_by_tag, validate_tag_filter, GroupedOperation, DEFAULT_GROUP};
use crate::oas::models::{Operation, Parameter, ParameterType, SchemaObject, SpecDocument};
use crate::oas::normalization::normalize_document;
use crate::oas::ref_utils::RefSection;
use crate::oas::resolver::SchemaResolver;
use crate::tables::{build_parameter_table, build_response_table, schema_content};
use crate::tree::{DocNode, DocumentTree, Inline};

/// Title and id of the subsection holding untagged operations.
pub const UNTAGGED_TITLE: &str = "Untagged";

/// Input of one run, as given by the invoking document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderRequest {
    /// URL or path of the Swagger document.
    pub locator: String,
    /// Tags to render; empty renders every group.
    pub tags: Vec<String>,
}

impl RenderRequest {
    /// Request rendering every tag of `locator`.
    pub fn new(locator: impl Into<String>) -> Self {
        Self {
            locator: locator.into(),
            tags: Vec::new(),
        }
    }

    /// Restricts the `Methods` section to `tags`.
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }
}

/// Runs the whole pipeline and converts any aborting error into one error block.
///
/// The result is either the three sections of a [`DocumentTree`] or exactly one
/// [`DocNode::Error`]; never a mix.
pub fn render(loader: &impl SourceLoader, request: &RenderRequest) -> Vec<DocNode> {
    match try_render(loader, request) {
        Ok(tree) => tree.into_nodes(),
        Err(err) => {
            tracing::error!(locator = %request.locator, error = %err, "unable to process Swagger document");
            vec![error_block(&request.locator, &err)]
        }
    }
}

/// Runs the whole pipeline, returning typed errors.
///
/// # Errors
///
/// * `AppError::SourceFetch` / `AppError::Parse` from loading.
/// * `AppError::Structure` from normalization or missing top-level sections.
/// * `AppError::UnknownTag` when a requested tag does not exist.
pub fn try_render(loader: &impl SourceLoader, request: &RenderRequest) -> AppResult<DocumentTree> {
    let bytes = loader.fetch(&request.locator)?;
    let raw = decode_document(&bytes)?;
    let spec = normalize_document(&raw)?;
    assemble(&spec, request)
}

/// Builds the document tree of an already normalized document.
///
/// # Errors
///
/// * `AppError::UnknownTag` when a requested tag does not exist.
/// * `AppError::Structure` when `responses` or `definitions` is missing.
pub fn assemble(spec: &SpecDocument, request: &RenderRequest) -> AppResult<DocumentTree> {
    let resolver = SchemaResolver::new(spec);

    let groups = group_by_tag(spec);
    tracing::debug!(
        groups = groups.len(),
        operations = spec.operation_count(),
        "grouped operations"
    );

    let available: Vec<&str> = groups.keys().map(String::as_str).collect();
    validate_tag_filter(request.tags.as_slice(), &available, &request.locator)?;

    let subsections = groups
        .iter()
        .filter(|(tag, _)| request.tags.is_empty() || request.tags.contains(tag))
        .map(|(tag, operations)| make_group(tag, operations, &resolver))
        .collect();
    let methods = DocNode::section("Methods", subsections);

    let responses = spec
        .responses
        .as_ref()
        .ok_or_else(|| AppError::Structure("document has no 'responses' mapping".into()))?;
    let responses = DocNode::section(
        "Responses",
        responses
            .iter()
            .map(|(name, schema)| make_response(name, schema, &resolver))
            .collect(),
    );

    let definitions = spec
        .definitions
        .as_ref()
        .ok_or_else(|| AppError::Structure("document has no 'definitions' mapping".into()))?;
    let definitions = DocNode::section(
        "Definitions",
        definitions
            .iter()
            .map(|(name, schema)| make_definition(name, schema, &resolver))
            .collect(),
    );

    tracing::debug!(locator = %request.locator, "assembled document tree");
    Ok(DocumentTree {
        methods,
        responses,
        definitions,
    })
}

fn make_group(tag: &str, operations: &[GroupedOperation<'_>], resolver: &SchemaResolver<'_>) -> DocNode {
    let (id, title) = if tag == DEFAULT_GROUP {
        (UNTAGGED_TITLE.to_lowercase(), UNTAGGED_TITLE.to_string())
    } else {
        (format!("tag-{}", tag), tag.to_string())
    };
    DocNode::Section {
        id,
        title,
        children: operations
            .iter()
            .map(|op| make_method(op.path, op.method, op.operation, resolver))
            .collect(),
    }
}

/// Block for one operation, titled `METHOD /path`.
pub fn make_method(
    path: &str,
    method: &str,
    operation: &Operation,
    resolver: &SchemaResolver<'_>,
) -> DocNode {
    let mut children = entity_header(
        operation.summary.as_deref(),
        &Metadata {
            description: operation.description.as_deref(),
            consumes: operation.consumes.as_deref(),
            produces: operation.produces.as_deref(),
        },
    );

    if let Some(parameters) = &operation.parameters {
        children.extend(build_parameter_table(parameters, resolver));
    }
    if let Some(responses) = &operation.responses {
        children.extend(build_response_table(responses, resolver));
    }

    DocNode::Block {
        title: format!("{} {}", method.to_uppercase(), path),
        children,
    }
}

/// Section for one entry of `definitions`.
pub fn make_definition(name: &str, schema: &SchemaObject, resolver: &SchemaResolver<'_>) -> DocNode {
    let mut children = entity_header(schema.summary.as_deref(), &Metadata::of_schema(schema));
    children.extend(schema_content(&resolver.describe("", schema)));
    entity_section(RefSection::Definitions, name, children)
}

/// Section for one entry of the top-level `responses`.
///
/// The payload is shown as a single `Body` parameter.
pub fn make_response(name: &str, schema: &SchemaObject, resolver: &SchemaResolver<'_>) -> DocNode {
    let mut children = entity_header(schema.summary.as_deref(), &Metadata::of_schema(schema));
    let payload = Parameter {
        name: "Payload".to_string(),
        location: "Body".to_string(),
        description: None,
        required: false,
        kind: ParameterType::Schema(schema.clone()),
    };
    children.extend(build_parameter_table(&[payload], resolver));
    entity_section(RefSection::Responses, name, children)
}

/// Optional metadata shown as a bullet list under the summary.
struct Metadata<'a> {
    description: Option<&'a str>,
    consumes: Option<&'a [String]>,
    produces: Option<&'a [String]>,
}

impl<'a> Metadata<'a> {
    fn of_schema(schema: &'a SchemaObject) -> Self {
        Self {
            description: schema.description.as_deref(),
            consumes: schema.consumes.as_deref(),
            produces: schema.produces.as_deref(),
        }
    }

    /// Only the fields that are present, in display order.
    fn items(&self) -> Vec<(&'static str, String)> {
        let mut items = Vec::new();
        if let Some(description) = self.description {
            items.push(("Description", description.to_string()));
        }
        if let Some(consumes) = self.consumes {
            items.push(("Consumes", consumes.join(" ")));
        }
        if let Some(produces) = self.produces {
            items.push(("Produces", produces.join(" ")));
        }
        items
    }
}

fn entity_header(summary: Option<&str>, metadata: &Metadata<'_>) -> Vec<DocNode> {
    let mut nodes = vec![DocNode::text(summary.unwrap_or_default())];

    let items: Vec<Vec<DocNode>> = metadata
        .items()
        .into_iter()
        .map(|(title, value)| {
            vec![DocNode::Paragraph {
                inlines: vec![Inline::Strong(format!("{}: ", title)), Inline::Text(value)],
            }]
        })
        .collect();
    if !items.is_empty() {
        nodes.push(DocNode::BulletList { items });
    }
    nodes
}

fn entity_section(section: RefSection, name: &str, children: Vec<DocNode>) -> DocNode {
    DocNode::Section {
        id: section.anchor(name),
        title: name.to_string(),
        children: vec![DocNode::Block {
            title: name.to_string(),
            children,
        }],
    }
}

fn error_block(locator: &str, err: &AppError) -> DocNode {
    let reason = err.user_message().unwrap_or_else(|| {
        "Processing error. See the operational log for a more detailed error.".to_string()
    });
    DocNode::Error {
        children: vec![
            DocNode::Paragraph {
                inlines: vec![
                    Inline::Text("Unable to process URL: ".to_string()),
                    Inline::Strong(locator.to_string()),
                    Inline::Text(
                        ". Please check that the URL is a valid Swagger api-docs URL and it is accessible."
                            .to_string(),
                    ),
                ],
            },
            DocNode::heading(reason),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oas::normalization::normalize_document;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn spec(value: serde_json::Value) -> SpecDocument {
        normalize_document(&value).unwrap()
    }

    fn children(node: &DocNode) -> &[DocNode] {
        match node {
            DocNode::Section { children, .. } | DocNode::Block { children, .. } => children,
            other => panic!("node has no children: {:?}", other),
        }
    }

    #[test]
    fn test_method_block_lists_only_present_metadata() {
        let doc = spec(json!({"paths": {}}));
        let op = Operation {
            summary: Some("Add pet".into()),
            produces: Some(vec!["application/json".into(), "application/xml".into()]),
            ..Default::default()
        };
        let block = make_method("/pets", "post", &op, &SchemaResolver::new(&doc));

        let DocNode::Block { title, children } = &block else {
            panic!("expected block");
        };
        assert_eq!(title, "POST /pets");
        assert_eq!(children[0], DocNode::text("Add pet"));
        assert_eq!(
            children[1],
            DocNode::BulletList {
                items: vec![vec![DocNode::Paragraph {
                    inlines: vec![
                        Inline::Strong("Produces: ".into()),
                        Inline::Text("application/json application/xml".into())
                    ]
                }]]
            }
        );
        assert_eq!(children.len(), 2);
    }

    #[test]
    fn test_method_without_metadata_has_no_list() {
        let doc = spec(json!({"paths": {}}));
        let block = make_method("/pets", "get", &Operation::default(), &SchemaResolver::new(&doc));
        assert_eq!(children(&block), &[DocNode::text("")]);
    }

    #[test]
    fn test_definition_section() {
        let doc = spec(json!({
            "paths": {},
            "definitions": {"Pet": {
                "type": "object",
                "description": "A pet",
                "properties": {"name": {"type": "string"}},
                "required": ["name"]
            }}
        }));
        let resolver = SchemaResolver::new(&doc);
        let section = make_definition("Pet", &doc.definitions.as_ref().unwrap()["Pet"], &resolver);
        let DocNode::Section { id, .. } = &section else {
            panic!("expected section");
        };
        assert_eq!(id, "definition-Pet");
        assert_eq!(
            section.plain_text(),
            "Pet Pet Description: A pet Fields Name Description Type name* string"
        );
    }

    #[test]
    fn test_response_section_shows_payload() {
        let doc = spec(json!({
            "paths": {},
            "responses": {"NotFound": {
                "description": "Entity not found",
                "schema": {"$ref": "#/definitions/Error"}
            }},
            "definitions": {"Error": {"type": "object"}}
        }));
        let resolver = SchemaResolver::new(&doc);
        let section = make_response(
            "NotFound",
            &doc.responses.as_ref().unwrap()["NotFound"],
            &resolver,
        );
        assert_eq!(
            section.plain_text(),
            "NotFound NotFound Description: Entity not found Parameters Name Position Description Type Payload Body Error"
        );
    }

    #[test]
    fn test_filter_selects_groups() {
        let doc = spec(json!({
            "tags": [{"name": "pets"}, {"name": "store"}],
            "paths": {
                "/pets": {"get": {"tags": ["pets"]}},
                "/orders": {"get": {"tags": ["store"]}}
            },
            "responses": {},
            "definitions": {}
        }));
        let tree = assemble(&doc, &RenderRequest::new("api.json").with_tags(["store"])).unwrap();
        let groups = children(&tree.methods);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].plain_text(), "store GET /orders");
    }

    #[test]
    fn test_unknown_tag_aborts() {
        let doc = spec(json!({
            "tags": [{"name": "pets"}],
            "paths": {},
            "responses": {},
            "definitions": {}
        }));
        let err = assemble(&doc, &RenderRequest::new("api.json").with_tags(["cats"])).unwrap_err();
        assert!(matches!(err, AppError::UnknownTag { ref tag, .. } if tag == "cats"));
    }

    #[test]
    fn test_missing_sections_are_structure_errors() {
        let no_responses = spec(json!({"paths": {}, "definitions": {}}));
        let err = assemble(&no_responses, &RenderRequest::new("a")).unwrap_err();
        assert!(format!("{}", err).contains("'responses'"));

        let no_definitions = spec(json!({"paths": {}, "responses": {}}));
        let err = assemble(&no_definitions, &RenderRequest::new("a")).unwrap_err();
        assert!(format!("{}", err).contains("'definitions'"));
    }

    #[test]
    fn test_untagged_group_title() {
        let doc = spec(json!({
            "paths": {"/ping": {"get": {}}},
            "responses": {},
            "definitions": {}
        }));
        let tree = assemble(&doc, &RenderRequest::new("a")).unwrap();
        let DocNode::Section { id, title, .. } = &children(&tree.methods)[0] else {
            panic!("expected section");
        };
        assert_eq!(id, "untagged");
        assert_eq!(title, "Untagged");
    }

    #[test]
    fn test_error_block_for_fetch_failure() {
        let loader = |locator: &str| -> AppResult<Vec<u8>> {
            Err(AppError::SourceFetch {
                locator: locator.to_string(),
                reason: "connection refused".into(),
            })
        };
        let nodes = render(&loader, &RenderRequest::new("http://localhost/api"));
        assert_eq!(nodes.len(), 1);
        let text = nodes[0].plain_text();
        assert!(text.contains("http://localhost/api"));
        assert!(!text.contains("connection refused"));
    }
}
