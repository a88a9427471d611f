//! # Table Builder
//!
//! Turns resolved schema nodes into parameter, property and response tables.
//! Every builder returns a bold heading paragraph followed by the table, or
//! nothing at all when the table would be omitted.

use crate::oas::models::{Parameter, ParameterType, SchemaObject};
use crate::oas::resolver::{display_name, PropertyRow, SchemaNode, SchemaResolver};
use crate::tree::{Cell, DocNode, Inline};
use indexmap::IndexMap;

const PARAMETER_COLUMNS: [&str; 4] = ["Name", "Position", "Description", "Type"];
const PROPERTY_COLUMNS: [&str; 3] = ["Name", "Description", "Type"];
const RESPONSE_COLUMNS: [&str; 2] = ["Code", "Type"];

/// Sub-document describing a schema node.
///
/// References become a link paragraph, property objects a `Fields` table and
/// everything else a single text paragraph. Arrays of property objects keep
/// their `array of` text above the table.
pub fn schema_content(node: &SchemaNode) -> Vec<DocNode> {
    match node {
        SchemaNode::Reference {
            section,
            name,
            label,
        } => vec![DocNode::Paragraph {
            inlines: vec![Inline::Reference {
                refid: section.anchor(name),
                text: format!("{}{}", label, name),
            }],
        }],
        SchemaNode::Properties(rows) => build_property_table(rows),
        SchemaNode::Array { label, inner } if matches!(**inner, SchemaNode::Properties(_)) => {
            let mut nodes = vec![DocNode::text(format!("{}array of", label))];
            nodes.extend(schema_content(inner));
            nodes
        }
        SchemaNode::Array { inner, .. } => schema_content(inner),
        leaf => vec![DocNode::text(leaf.text().unwrap_or_default())],
    }
}

/// `Parameters` table: name (with required marker), position, description, type.
pub fn build_parameter_table(params: &[Parameter], resolver: &SchemaResolver<'_>) -> Vec<DocNode> {
    let rows = params
        .iter()
        .map(|param| {
            let type_cell = match &param.kind {
                ParameterType::Primitive(name) => text_cell(name),
                ParameterType::Schema(schema) => schema_content(&resolver.describe("", schema)),
                ParameterType::Unspecified => text_cell(""),
            };
            vec![
                text_cell(&display_name(&param.name, param.required)),
                text_cell(&param.location),
                text_cell(param.description.as_deref().unwrap_or_default()),
                type_cell,
            ]
        })
        .collect();

    titled_table("Parameters", &PARAMETER_COLUMNS, rows)
}

/// `Fields` table: name (with required marker), description, type.
pub fn build_property_table(rows: &[PropertyRow]) -> Vec<DocNode> {
    let rows = rows
        .iter()
        .map(|row| {
            vec![
                text_cell(&row.display_name()),
                text_cell(&row.description),
                schema_content(&row.node),
            ]
        })
        .collect();

    titled_table("Fields", &PROPERTY_COLUMNS, rows)
}

/// `Responses` table: status code and type. Empty when there are no responses.
pub fn build_response_table(
    responses: &IndexMap<String, SchemaObject>,
    resolver: &SchemaResolver<'_>,
) -> Vec<DocNode> {
    if responses.is_empty() {
        return Vec::new();
    }

    let rows = responses
        .iter()
        .map(|(code, schema)| vec![text_cell(code), schema_content(&resolver.describe("", schema))])
        .collect();

    titled_table("Responses", &RESPONSE_COLUMNS, rows)
}

fn titled_table(title: &str, columns: &[&str], rows: Vec<Vec<Cell>>) -> Vec<DocNode> {
    vec![
        DocNode::heading(title),
        DocNode::Table {
            head: columns.iter().map(|c| c.to_string()).collect(),
            rows,
        },
    ]
}

fn text_cell(value: &str) -> Cell {
    vec![DocNode::text(value)]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oas::normalization::{normalize_document, normalize_schema};
    use crate::oas::resolver::describe_schema;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn cell_texts(node: &DocNode) -> Vec<Vec<String>> {
        let DocNode::Table { rows, .. } = node else {
            panic!("expected table, got {:?}", node);
        };
        rows.iter()
            .map(|row| {
                row.iter()
                    .map(|cell| {
                        cell.iter()
                            .map(DocNode::plain_text)
                            .collect::<Vec<_>>()
                            .join(" ")
                    })
                    .collect()
            })
            .collect()
    }

    #[test]
    fn test_fields_table_single_required_row() {
        let schema = normalize_schema(&json!({
            "type": "object",
            "properties": {"id": {"type": "integer"}},
            "required": ["id"]
        }));
        let content = schema_content(&describe_schema("", &schema));
        assert_eq!(content[0], DocNode::heading("Fields"));
        assert_eq!(
            cell_texts(&content[1]),
            vec![vec!["id*".to_string(), "".to_string(), "integer".to_string()]]
        );
    }

    #[test]
    fn test_parameter_table_columns_and_types() {
        let doc = normalize_document(&json!({
            "paths": {
                "/pets": {
                    "post": {
                        "parameters": [
                            {"name": "limit", "in": "query", "type": "integer", "description": "max"},
                            {"name": "body", "in": "body", "required": true,
                             "schema": {"$ref": "#/definitions/Pet"}},
                            {"name": "ids", "in": "query", "type": "array", "items": {"type": "string"}},
                            {"name": "opaque", "in": "header"}
                        ]
                    }
                }
            },
            "definitions": {"Pet": {"type": "object"}}
        }))
        .unwrap();
        let resolver = SchemaResolver::new(&doc);
        let params = doc.paths["/pets"]["post"].parameters.as_ref().unwrap();
        let table = build_parameter_table(params, &resolver);

        let DocNode::Table { head, .. } = &table[1] else {
            panic!("expected table");
        };
        assert_eq!(head, &vec!["Name", "Position", "Description", "Type"]);
        assert_eq!(
            cell_texts(&table[1]),
            vec![
                vec!["limit", "query", "max", "integer"],
                vec!["body*", "body", "", "Pet"],
                vec!["ids", "query", "", "array of string"],
                vec!["opaque", "header", "", ""],
            ]
        );
    }

    #[test]
    fn test_nested_object_embeds_table_in_cell() {
        let schema = normalize_schema(&json!({
            "type": "object",
            "properties": {
                "owner": {"type": "object", "properties": {"name": {"type": "string"}}}
            }
        }));
        let content = schema_content(&describe_schema("", &schema));
        let DocNode::Table { rows, .. } = &content[1] else {
            panic!("expected table");
        };
        let type_cell = &rows[0][2];
        assert_eq!(type_cell[0], DocNode::heading("Fields"));
        assert!(matches!(type_cell[1], DocNode::Table { .. }));
    }

    #[test]
    fn test_array_of_objects_keeps_label() {
        let schema = normalize_schema(&json!({
            "type": "array",
            "items": {
                "type": "array",
                "items": {"type": "object", "properties": {"id": {"type": "integer"}}}
            }
        }));
        let content = schema_content(&describe_schema("", &schema));
        assert_eq!(content[0], DocNode::text("array of array of"));
        assert_eq!(content[1], DocNode::heading("Fields"));
        assert_eq!(cell_texts(&content[2]), vec![vec!["id", "", "integer"]]);
    }

    #[test]
    fn test_empty_responses_are_omitted() {
        let doc = normalize_document(&json!({"paths": {}})).unwrap();
        let resolver = SchemaResolver::new(&doc);
        assert!(build_response_table(&IndexMap::new(), &resolver).is_empty());
    }

    #[test]
    fn test_response_reference_links() {
        let doc = normalize_document(&json!({
            "paths": {"/pets": {"get": {"responses": {
                "200": {"description": "ok", "schema": {"$ref": "#/definitions/Pet"}},
                "404": {"$ref": "#/responses/NotFound"}
            }}}},
            "responses": {"NotFound": {"description": "missing"}},
            "definitions": {"Pet": {"type": "object"}}
        }))
        .unwrap();
        let resolver = SchemaResolver::new(&doc);
        let responses = doc.paths["/pets"]["get"].responses.as_ref().unwrap();
        let table = build_response_table(responses, &resolver);
        let DocNode::Table { rows, .. } = &table[1] else {
            panic!("expected table");
        };
        assert_eq!(
            rows[1][1][0],
            DocNode::Paragraph {
                inlines: vec![Inline::Reference {
                    refid: "response-NotFound".into(),
                    text: "NotFound".into()
                }]
            }
        );
        assert_eq!(cell_texts(&table[1])[0], vec!["200", "Pet"]);
    }
}
