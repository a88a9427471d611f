//! # Swagger Normalization
//!
//! Converts the generic mapping produced by the loader into a [`SpecDocument`].
//!
//! This is the only place that knows about alternative spellings of the same
//! concept across Swagger 1.2 and 2.0 (`method` / `httpMethod`, `in` /
//! `paramType`, `type` / `dataType`, response objects vs bare schemas). Optional
//! fields with the wrong shape are dropped rather than rejected; only the
//! top-level layout is enforced.

use crate::error::{AppError, AppResult};
use crate::oas::models::{
    Operation, Parameter, ParameterType, SchemaObject, SchemaType, SpecDocument, TagDeclaration,
    PSEUDO_PATH_KEYS,
};
use indexmap::IndexMap;
use serde_json::{Map, Value};

/// Swagger layout the document was written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Dialect {
    /// `apis` + `models` layout.
    V12,
    /// `paths` + `definitions` layout.
    V20,
}

/// Normalizes a decoded Swagger document.
///
/// # Errors
///
/// * `AppError::Structure` when the root is not a mapping, when the document
///   declares OpenAPI 3.x, when neither `paths` nor `apis` is present, or when
///   `paths`, `responses` or `definitions` is present but not a mapping.
pub fn normalize_document(value: &Value) -> AppResult<SpecDocument> {
    let root = value
        .as_object()
        .ok_or_else(|| AppError::Structure("document root must be a mapping".into()))?;

    if let Some(version) = root.get("openapi") {
        let version = version
            .as_str()
            .map(str::to_string)
            .unwrap_or_else(|| version.to_string());
        return Err(AppError::Structure(format!(
            "OpenAPI {} documents are not supported, expected Swagger 1.2 or 2.0",
            version
        )));
    }

    if !root.contains_key("paths") && root.get("apis").is_some_and(Value::is_array) {
        return Ok(normalize_v12(root));
    }

    let paths = match root.get("paths") {
        Some(Value::Object(paths)) => normalize_paths(paths, root.get("parameters")),
        Some(_) => return Err(AppError::Structure("'paths' must be a mapping".into())),
        None => {
            return Err(AppError::Structure(
                "document has neither 'paths' nor 'apis'".into(),
            ))
        }
    };

    Ok(SpecDocument {
        tags: normalize_tags(root.get("tags")),
        paths,
        responses: optional_section(root, "responses", normalize_response)?,
        definitions: optional_section(root, "definitions", |v| {
            normalize_schema_in(v, Dialect::V20)
        })?,
    })
}

/// Normalizes a Swagger 2.0 schema fragment.
///
/// Never fails: a non-mapping fragment yields a schema with no `type`, which
/// the resolver renders as "No Data Returned".
pub fn normalize_schema(value: &Value) -> SchemaObject {
    normalize_schema_in(value, Dialect::V20)
}

fn normalize_schema_in(value: &Value, dialect: Dialect) -> SchemaObject {
    let Some(map) = value.as_object() else {
        return SchemaObject {
            raw: value.clone(),
            ..Default::default()
        };
    };

    let properties = map.get("properties").and_then(Value::as_object).map(|props| {
        props
            .iter()
            .map(|(name, prop)| (name.clone(), normalize_schema_in(prop, dialect)))
            .collect::<IndexMap<_, _>>()
    });

    let mut schema_type = map.get("type").map(SchemaType::from_value);
    // Swagger 1.2 models omit `type: object`.
    if dialect == Dialect::V12 && schema_type.is_none() && properties.is_some() {
        schema_type = Some(SchemaType::Object);
    }

    SchemaObject {
        reference: map
            .get("$ref")
            .and_then(Value::as_str)
            .map(|r| qualify_reference(r, dialect)),
        schema_type,
        items: map
            .get("items")
            .filter(|v| v.is_object())
            .map(|v| Box::new(normalize_schema_in(v, dialect))),
        properties,
        additional_properties: map
            .get("additionalProperties")
            // `false` closes the object; it does not declare a map.
            .filter(|v| !matches!(v, Value::Bool(false)))
            .map(|v| Box::new(normalize_schema_in(v, dialect))),
        required: string_list(map.get("required")).unwrap_or_default(),
        summary: string_field(map, "summary"),
        description: string_field(map, "description"),
        consumes: string_list(map.get("consumes")),
        produces: string_list(map.get("produces")),
        raw: value.clone(),
    }
}

/// Swagger 1.2 refers to models by bare name.
fn qualify_reference(reference: &str, dialect: Dialect) -> String {
    if dialect == Dialect::V12 && !reference.contains('#') {
        format!("#/definitions/{}", reference)
    } else {
        reference.to_string()
    }
}

/// Normalizes a Response Object into the schema shown in a `Type` cell.
///
/// The response `description` is folded into the schema; a response without a
/// `schema` becomes a type-less schema, or a reference when it is a `$ref`.
fn normalize_response(value: &Value) -> SchemaObject {
    let Some(map) = value.as_object() else {
        return normalize_schema(value);
    };
    let description = string_field(map, "description");

    let mut schema = match map.get("schema") {
        Some(schema) => normalize_schema(schema),
        None if map.contains_key("$ref") => normalize_schema(value),
        None => SchemaObject {
            raw: value.clone(),
            ..Default::default()
        },
    };
    if description.is_some() {
        schema.description = description;
    }
    schema
}

fn normalize_tags(value: Option<&Value>) -> Vec<TagDeclaration> {
    let Some(tags) = value.and_then(Value::as_array) else {
        return Vec::new();
    };
    tags.iter()
        .filter_map(|tag| {
            let map = tag.as_object()?;
            let name = map.get("name")?.as_str()?;
            Some(TagDeclaration {
                name: name.to_string(),
                description: string_field(map, "description"),
            })
        })
        .collect()
}

fn normalize_paths(
    paths: &Map<String, Value>,
    shared_params: Option<&Value>,
) -> IndexMap<String, IndexMap<String, Operation>> {
    let shared_params = shared_params.and_then(Value::as_object);
    let mut out = IndexMap::new();

    for (path, item) in paths {
        if path.starts_with("x-") {
            continue;
        }
        let Some(item) = item.as_object() else {
            tracing::warn!(path = %path, "skipping path item that is not a mapping");
            continue;
        };

        let mut methods = IndexMap::new();
        for (method, op) in item {
            if PSEUDO_PATH_KEYS.contains(&method.as_str()) || method.starts_with("x-") {
                continue;
            }
            let Some(op) = op.as_object() else {
                tracing::warn!(path = %path, method = %method, "skipping operation that is not a mapping");
                continue;
            };
            methods.insert(method.to_lowercase(), normalize_operation(op, shared_params));
        }
        out.insert(path.clone(), methods);
    }
    out
}

fn normalize_operation(op: &Map<String, Value>, shared: Option<&Map<String, Value>>) -> Operation {
    Operation {
        summary: string_field(op, "summary"),
        description: string_field(op, "description").or_else(|| string_field(op, "notes")),
        consumes: string_list(op.get("consumes")),
        produces: string_list(op.get("produces")),
        tags: string_list(op.get("tags")),
        parameters: op.get("parameters").and_then(Value::as_array).map(|params| {
            params
                .iter()
                .filter_map(|p| normalize_parameter(p, shared, Dialect::V20))
                .collect()
        }),
        responses: op.get("responses").and_then(Value::as_object).map(|resps| {
            resps
                .iter()
                .map(|(code, resp)| (code.clone(), normalize_response(resp)))
                .collect()
        }),
    }
}

fn normalize_parameter<'a>(
    value: &'a Value,
    shared: Option<&'a Map<String, Value>>,
    dialect: Dialect,
) -> Option<Parameter> {
    let mut map = value.as_object()?;

    if let Some(reference) = map.get("$ref").and_then(Value::as_str) {
        let target = reference
            .strip_prefix("#/parameters/")
            .and_then(|name| shared?.get(name))
            .and_then(Value::as_object);
        match target {
            Some(target) => map = target,
            None => tracing::warn!(reference = %reference, "parameter reference not found"),
        }
    }

    let declared_type = map
        .get("type")
        .or_else(|| map.get("dataType"))
        .and_then(Value::as_str);
    let kind = match (declared_type, map.get("schema")) {
        (Some("array"), _) => {
            ParameterType::Schema(normalize_schema_in(&Value::Object(map.clone()), dialect))
        }
        (Some(t), _) => ParameterType::Primitive(t.to_string()),
        (None, Some(schema)) => ParameterType::Schema(normalize_schema_in(schema, dialect)),
        (None, None) => ParameterType::Unspecified,
    };

    Some(Parameter {
        name: string_field(map, "name").unwrap_or_default(),
        location: string_field(map, "in")
            .or_else(|| string_field(map, "paramType"))
            .unwrap_or_default(),
        description: string_field(map, "description"),
        required: bool_field(map, "required"),
        kind,
    })
}

fn optional_section(
    root: &Map<String, Value>,
    key: &str,
    normalize: impl Fn(&Value) -> SchemaObject,
) -> AppResult<Option<IndexMap<String, SchemaObject>>> {
    match root.get(key) {
        None => Ok(None),
        Some(Value::Object(entries)) => Ok(Some(
            entries
                .iter()
                .map(|(name, v)| (name.clone(), normalize(v)))
                .collect(),
        )),
        Some(_) => Err(AppError::Structure(format!("'{}' must be a mapping", key))),
    }
}

fn normalize_v12(root: &Map<String, Value>) -> SpecDocument {
    let mut paths: IndexMap<String, IndexMap<String, Operation>> = IndexMap::new();

    for api in root.get("apis").and_then(Value::as_array).into_iter().flatten() {
        let Some(api) = api.as_object() else { continue };
        let Some(path) = api.get("path").and_then(Value::as_str) else {
            continue;
        };
        let operations = api.get("operations").and_then(Value::as_array);

        for op in operations.into_iter().flatten() {
            let Some(op) = op.as_object() else { continue };
            let Some(method) = string_field(op, "method").or_else(|| string_field(op, "httpMethod"))
            else {
                tracing::warn!(path = %path, "skipping Swagger 1.2 operation without a method");
                continue;
            };
            paths
                .entry(path.to_string())
                .or_default()
                .insert(method.to_lowercase(), normalize_v12_operation(op));
        }
    }

    let definitions: IndexMap<String, SchemaObject> = root
        .get("models")
        .and_then(Value::as_object)
        .map(|models| {
            models
                .iter()
                .map(|(name, m)| (name.clone(), normalize_schema_in(m, Dialect::V12)))
                .collect()
        })
        .unwrap_or_default();

    SpecDocument {
        tags: Vec::new(),
        paths,
        responses: Some(IndexMap::new()),
        definitions: Some(definitions),
    }
}

fn normalize_v12_operation(op: &Map<String, Value>) -> Operation {
    let responses: Option<IndexMap<String, SchemaObject>> = op
        .get("responseMessages")
        .and_then(Value::as_array)
        .map(|messages| {
            messages
                .iter()
                .filter_map(Value::as_object)
                .filter_map(|msg| {
                    let code = match msg.get("code")? {
                        Value::String(s) => s.clone(),
                        other => other.to_string(),
                    };
                    let reference = string_field(msg, "responseModel")
                        .map(|model| qualify_reference(&model, Dialect::V12));
                    let schema = SchemaObject {
                        reference,
                        description: string_field(msg, "message"),
                        raw: Value::Object(msg.clone()),
                        ..Default::default()
                    };
                    Some((code, schema))
                })
                .collect()
        });

    Operation {
        summary: string_field(op, "summary"),
        description: string_field(op, "notes").or_else(|| string_field(op, "description")),
        consumes: string_list(op.get("consumes")),
        produces: string_list(op.get("produces")),
        tags: None,
        parameters: op.get("parameters").and_then(Value::as_array).map(|params| {
            params
                .iter()
                .filter_map(|p| normalize_parameter(p, None, Dialect::V12))
                .collect()
        }),
        responses,
    }
}

fn string_field(map: &Map<String, Value>, key: &str) -> Option<String> {
    map.get(key).and_then(Value::as_str).map(str::to_string)
}

fn bool_field(map: &Map<String, Value>, key: &str) -> bool {
    match map.get(key) {
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => s.eq_ignore_ascii_case("true"),
        _ => false,
    }
}

/// Accepts a list of strings, or a single string as a one-element list.
fn string_list(value: Option<&Value>) -> Option<Vec<String>> {
    match value? {
        Value::Array(items) => Some(
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect(),
        ),
        Value::String(s) => Some(vec![s.clone()]),
        _ => None,
    }
}
