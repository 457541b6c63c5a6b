//! Operation normalization and response unit composition.
//!
//! Every operation of the bundled document is normalized into an [`Operation`], whose JSON
//! responses are classified into [`ResponseSchema`] variants. The [`ResponseComposer`] then
//! turns each classified response into a [`ResponseUnit`]: a named TypeScript function returning
//! a generated sample body.

use crate::classifier::classify;
use crate::generator::Generator;
use crate::serializer::serialize;
use crate::value::GeneratedValue;
use indexmap::IndexMap;
use log::{debug, warn};
use serde_json::{Map, Value};

pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Tag used for operations that declare none.
pub const DEFAULT_TAG: &str = "default";

/// Looks up referenced schemas on behalf of the composer.
pub trait ReferenceResolver {
    /// Resolves a `$ref` to the PascalCase name of its target and the dereferenced target schema.
    fn resolve_reference(&self, reference: &str) -> Option<(String, Value)>;

    /// Replaces every resolvable reference inside `schema`.
    fn dereference(&self, schema: &Value) -> Value;
}

/// HTTP methods an OpenAPI path item can declare, in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Put,
    Post,
    Delete,
    Options,
    Head,
    Patch,
    Trace,
}

impl HttpMethod {
    pub const ALL: [HttpMethod; 8] = [
        HttpMethod::Get,
        HttpMethod::Put,
        HttpMethod::Post,
        HttpMethod::Delete,
        HttpMethod::Options,
        HttpMethod::Head,
        HttpMethod::Patch,
        HttpMethod::Trace,
    ];

    /// Lowercase name, as used for path item keys and MSW `http.<method>` calls.
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "get",
            HttpMethod::Put => "put",
            HttpMethod::Post => "post",
            HttpMethod::Delete => "delete",
            HttpMethod::Options => "options",
            HttpMethod::Head => "head",
            HttpMethod::Patch => "patch",
            HttpMethod::Trace => "trace",
        }
    }
}

/// Shape of one response body schema.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseSchema {
    /// The body is a `$ref` to a named schema.
    Ref { reference: String },
    /// The body is an array; `items` may itself be a `$ref`.
    ArrayOf { items: Value },
    AnyOf { branches: Vec<Value> },
    OneOf { branches: Vec<Value> },
    /// Anything else, generated once at classification time.
    Plain { value: GeneratedValue },
}

impl ResponseSchema {
    /// Classifies a bundled response schema.
    ///
    /// Returns `None` for an empty schema, which means "no body" rather than "a null body".
    /// `Plain` schemas are dereferenced and generated immediately.
    pub fn classify(
        schema: &Value,
        generator: &mut Generator,
        resolver: &dyn ReferenceResolver,
    ) -> Option<Self> {
        let obj = schema.as_object()?;

        if let Some(branches) = obj.get("oneOf").and_then(Value::as_array) {
            return Some(ResponseSchema::OneOf {
                branches: branches.clone(),
            });
        }
        if let Some(branches) = obj.get("anyOf").and_then(Value::as_array) {
            return Some(ResponseSchema::AnyOf {
                branches: branches.clone(),
            });
        }
        if obj.get("type").and_then(Value::as_str) == Some("array") {
            if let Some(items) = obj.get("items") {
                return Some(ResponseSchema::ArrayOf {
                    items: items.clone(),
                });
            }
        }
        if let Some(reference) = ref_of(schema) {
            return Some(ResponseSchema::Ref {
                reference: reference.to_string(),
            });
        }
        if obj.is_empty() {
            return None;
        }

        let value = generator.generate_raw(&resolver.dereference(schema))?;
        Some(ResponseSchema::Plain { value })
    }

    /// The reference the body points at directly, if any.
    pub fn reference(&self) -> Option<&str> {
        match self {
            ResponseSchema::Ref { reference } => Some(reference),
            _ => None,
        }
    }
}

/// One status code of an operation.
#[derive(Debug, Clone, PartialEq)]
pub struct OperationResponse {
    pub status_code: u16,
    /// `None` when the response carries no JSON body
    pub schema: Option<ResponseSchema>,
}

/// A normalized path + method pair.
#[derive(Debug, Clone, PartialEq)]
pub struct Operation {
    /// Path with `{param}` segments rewritten to `:param`
    pub pathname: String,
    pub operation_id: String,
    pub tags: Vec<String>,
    pub method: HttpMethod,
    pub responses: Vec<OperationResponse>,
}

impl Operation {
    /// The tag output files are grouped by.
    pub fn primary_tag(&self) -> &str {
        self.tags.first().map(String::as_str).unwrap_or(DEFAULT_TAG)
    }

    /// Name of the response unit for one status code, e.g. `getListPets200`.
    pub fn unit_name(&self, status_code: u16) -> String {
        format!("get{}{}", pascal_case(&self.operation_id), status_code)
    }
}

/// Normalizes every operation under `paths`.
///
/// `$ref` response objects and non-numeric status codes (such as `default`) are skipped. When
/// `include_codes` is given, only those status codes are kept.
pub fn normalize_operations(
    paths: &Map<String, Value>,
    include_codes: Option<&[u16]>,
    generator: &mut Generator,
    resolver: &dyn ReferenceResolver,
) -> Vec<Operation> {
    let mut operations = Vec::new();

    for (path, item) in paths {
        for method in HttpMethod::ALL {
            let Some(operation) = item.get(method.as_str()).filter(|o| o.is_object()) else {
                continue;
            };
            debug!("Normalizing {} {}", method.as_str().to_uppercase(), path);

            let responses = operation
                .get("responses")
                .and_then(Value::as_object)
                .map(|responses| {
                    normalize_responses(responses, include_codes, generator, resolver)
                })
                .unwrap_or_default();

            let tags = operation
                .get("tags")
                .and_then(Value::as_array)
                .map(|tags| {
                    tags.iter()
                        .filter_map(Value::as_str)
                        .map(str::to_string)
                        .collect::<Vec<_>>()
                })
                .filter(|tags| !tags.is_empty())
                .unwrap_or_else(|| vec![DEFAULT_TAG.to_string()]);

            operations.push(Operation {
                pathname: path.replace('{', ":").replace('}', ""),
                operation_id: string_field(operation, "operationId"),
                tags,
                method,
                responses,
            });
        }
    }

    debug!("Normalized {} operations", operations.len());
    operations
}

fn normalize_responses(
    responses: &Map<String, Value>,
    include_codes: Option<&[u16]>,
    generator: &mut Generator,
    resolver: &dyn ReferenceResolver,
) -> Vec<OperationResponse> {
    let mut normalized = Vec::new();

    for (code, response) in responses {
        if ref_of(response).is_some() {
            debug!("Skipping referenced response {}", code);
            continue;
        }
        let Ok(status_code) = code.parse::<u16>() else {
            debug!("Skipping non-numeric status code {}", code);
            continue;
        };
        if include_codes.is_some_and(|codes| !codes.contains(&status_code)) {
            continue;
        }

        let schema = response
            .get("content")
            .and_then(|content| content.get(JSON_CONTENT_TYPE))
            .and_then(|media| media.get("schema"))
            .and_then(|schema| ResponseSchema::classify(schema, generator, resolver));

        normalized.push(OperationResponse {
            status_code,
            schema,
        });
    }

    normalized
}

fn string_field(value: &Value, key: &str) -> String {
    value
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

fn ref_of(value: &Value) -> Option<&str> {
    value.get("$ref").and_then(Value::as_str)
}

/// A generated function producing one sample body.
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseUnit {
    pub name: String,
    pub status_code: u16,
    /// Name of the schema the body was generated from, when it came through a reference
    pub schema_comment: Option<String>,
    /// Serialized return expression
    pub body: String,
    /// Whether the body calls into the faker instance when it runs
    pub uses_faker: bool,
}

impl ResponseUnit {
    /// Renders the unit as an exported TypeScript arrow function.
    pub fn render(&self) -> String {
        let mut lines = vec![format!("export const {} = () => {{", self.name)];
        if let Some(comment) = &self.schema_comment {
            lines.push(format!("  // Schema is {}", comment));
        }
        lines.push(format!("  return {}", self.body));
        lines.push("}".to_string());
        lines.join("\n")
    }
}

/// An operation together with the units built for it.
#[derive(Debug, Clone, PartialEq)]
pub struct ComposedOperation {
    pub operation: Operation,
    pub units: Vec<ResponseUnit>,
}

impl ComposedOperation {
    /// The unit built for a status code, if that response had a body.
    pub fn unit_for(&self, status_code: u16) -> Option<&ResponseUnit> {
        self.units.iter().find(|unit| unit.status_code == status_code)
    }
}

/// Builds response units from classified responses.
pub struct ResponseComposer<'a> {
    generator: &'a mut Generator,
    resolver: &'a dyn ReferenceResolver,
}

impl<'a> ResponseComposer<'a> {
    pub fn new(generator: &'a mut Generator, resolver: &'a dyn ReferenceResolver) -> Self {
        Self {
            generator,
            resolver,
        }
    }

    /// Composes every operation and groups the results by primary tag.
    pub fn compose_all(&mut self, operations: Vec<Operation>) -> IndexMap<String, Vec<ComposedOperation>> {
        group_by_tag(operations.into_iter().map(|operation| {
            let units = self.compose_operation(&operation);
            (
                operation.primary_tag().to_string(),
                ComposedOperation { operation, units },
            )
        }))
    }

    /// Units for every response of an operation that has a body.
    pub fn compose_operation(&mut self, operation: &Operation) -> Vec<ResponseUnit> {
        operation
            .responses
            .iter()
            .filter_map(|response| self.compose(operation, response))
            .collect()
    }

    /// Builds the unit for one response, or `None` when there is no body to produce.
    ///
    /// `anyOf`/`oneOf` bodies only use their first branch.
    pub fn compose(
        &mut self,
        operation: &Operation,
        response: &OperationResponse,
    ) -> Option<ResponseUnit> {
        let schema = response.schema.as_ref()?;

        let (value, schema_comment) = match schema {
            ResponseSchema::Ref { reference } => {
                let (name, value) = self.generate_reference(reference)?;
                (value, Some(name))
            }
            ResponseSchema::ArrayOf { items } => {
                let len = self.generator.array_length();
                match ref_of(items) {
                    Some(reference) => {
                        let (name, target) = self.resolve(reference)?;
                        let node = classify(&target);
                        let values = (0..len).filter_map(|_| self.generator.generate(&node)).collect();
                        (GeneratedValue::List(values), Some(format!("{} array", name)))
                    }
                    None => {
                        let node = classify(&self.resolver.dereference(items));
                        let values = (0..len).filter_map(|_| self.generator.generate(&node)).collect();
                        (GeneratedValue::List(values), None)
                    }
                }
            }
            ResponseSchema::AnyOf { branches } | ResponseSchema::OneOf { branches } => {
                let first = branches.first()?;
                match ref_of(first) {
                    Some(reference) => {
                        let (name, value) = self.generate_reference(reference)?;
                        (value, Some(name))
                    }
                    None => (GeneratedValue::from(first), None),
                }
            }
            ResponseSchema::Plain { value } => (value.clone(), None),
        };

        let name = operation.unit_name(response.status_code);
        debug!("Composed response unit {}", name);
        Some(ResponseUnit {
            name,
            status_code: response.status_code,
            schema_comment,
            body: serialize(&value, 1, self.generator.options()),
            uses_faker: value.contains_code(),
        })
    }

    fn resolve(&self, reference: &str) -> Option<(String, Value)> {
        let resolved = self.resolver.resolve_reference(reference);
        if resolved.is_none() {
            warn!("Can't resolve response reference {}", reference);
        }
        resolved
    }

    fn generate_reference(&mut self, reference: &str) -> Option<(String, GeneratedValue)> {
        let (name, target) = self.resolve(reference)?;
        let value = self.generator.generate_raw(&target)?;
        Some((name, value))
    }
}

/// Groups items by key, keeping groups in first-seen order.
pub fn group_by_tag<T>(items: impl IntoIterator<Item = (String, T)>) -> IndexMap<String, Vec<T>> {
    let mut groups: IndexMap<String, Vec<T>> = IndexMap::new();
    for (tag, item) in items {
        groups.entry(tag).or_default().push(item);
    }
    groups
}

/// PascalCase name of the last segment of a reference, e.g. `#/components/schemas/pet_tag` → `PetTag`.
pub fn reference_name(reference: &str) -> String {
    let segment = reference.rsplit('/').next().unwrap_or(reference);
    pascal_case(segment)
}

/// Splits an identifier into words at separators and case boundaries.
fn split_words(input: &str) -> Vec<String> {
    let mut words = Vec::new();

    for chunk in input.split(|c: char| !c.is_ascii_alphanumeric()) {
        let chars: Vec<char> = chunk.chars().collect();
        let mut current = String::new();
        for (i, &c) in chars.iter().enumerate() {
            let boundary = i > 0 && c.is_ascii_uppercase() && {
                let prev = chars[i - 1];
                let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_ascii_lowercase());
                prev.is_ascii_lowercase()
                    || prev.is_ascii_digit()
                    || (prev.is_ascii_uppercase() && next_is_lower)
            };
            if boundary && !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            current.push(c);
        }
        if !current.is_empty() {
            words.push(current);
        }
    }

    words
}

fn capitalize(word: &str, index: usize) -> String {
    let mut chars = word.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };
    let rest = chars.as_str().to_ascii_lowercase();
    if index > 0 && first.is_ascii_digit() {
        format!("_{}{}", first, rest)
    } else {
        format!("{}{}", first.to_ascii_uppercase(), rest)
    }
}

/// `list_pets`, `list-pets` and `listPets` all become `ListPets`.
pub fn pascal_case(input: &str) -> String {
    split_words(input)
        .iter()
        .enumerate()
        .map(|(i, word)| capitalize(word, i))
        .collect()
}

/// Like [`pascal_case`] with a lowercase first word.
pub fn camel_case(input: &str) -> String {
    split_words(input)
        .iter()
        .enumerate()
        .map(|(i, word)| {
            if i == 0 {
                word.to_ascii_lowercase()
            } else {
                capitalize(word, i)
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::{GenerationOptions, Mode};
    use crate::special_rules::SpecialRules;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    /// Resolves `#/components/schemas/<name>` against an inline map.
    struct MapResolver(Value);

    impl ReferenceResolver for MapResolver {
        fn resolve_reference(&self, reference: &str) -> Option<(String, Value)> {
            let name = reference.strip_prefix("#/components/schemas/")?;
            let schema = self.0.get(name)?.clone();
            Some((reference_name(reference), schema))
        }

        fn dereference(&self, schema: &Value) -> Value {
            match ref_of(schema).and_then(|r| self.resolve_reference(r)) {
                Some((_, target)) => target,
                None => schema.clone(),
            }
        }
    }

    fn resolver() -> MapResolver {
        MapResolver(json!({
            "Pet": {
                "type": "object",
                "properties": {"id": {"type": "integer", "minimum": 1, "maximum": 1}}
            },
            "Flag": {"type": "boolean"}
        }))
    }

    fn generator(mode: Mode) -> Generator {
        Generator::new(
            GenerationOptions {
                mode,
                single_line: true,
                array_length_range: (2, 2),
                ..Default::default()
            },
            SpecialRules::default(),
        )
    }

    fn operation(responses: Value) -> Operation {
        let mut generator = generator(Mode::Static);
        let paths = json!({"/pets/{petId}": {"get": {"operationId": "show_pet", "responses": responses}}});
        normalize_operations(paths.as_object().unwrap(), None, &mut generator, &resolver())
            .remove(0)
    }

    #[test]
    fn test_classify_order() {
        let mut generator = generator(Mode::Static);
        let resolver = resolver();
        let classify = |schema: Value, generator: &mut Generator| {
            ResponseSchema::classify(&schema, generator, &resolver)
        };

        assert!(matches!(
            classify(json!({"oneOf": [{}], "anyOf": [{}]}), &mut generator),
            Some(ResponseSchema::OneOf { .. })
        ));
        assert!(matches!(
            classify(json!({"anyOf": [{}], "type": "array", "items": {}}), &mut generator),
            Some(ResponseSchema::AnyOf { .. })
        ));
        assert_eq!(
            classify(json!({"type": "array", "items": {"$ref": "#/components/schemas/Pet"}}), &mut generator),
            Some(ResponseSchema::ArrayOf {
                items: json!({"$ref": "#/components/schemas/Pet"})
            })
        );
        assert_eq!(
            classify(json!({"$ref": "#/components/schemas/Pet"}), &mut generator),
            Some(ResponseSchema::Ref {
                reference: "#/components/schemas/Pet".to_string()
            })
        );
        assert_eq!(classify(json!({}), &mut generator), None);
        assert_eq!(
            classify(json!({"type": "null"}), &mut generator),
            Some(ResponseSchema::Plain {
                value: GeneratedValue::Null
            })
        );
    }

    #[test]
    fn test_normalize_operations() {
        let mut generator = generator(Mode::Static);
        let paths = json!({
            "/pets/{petId}/toys/{toyId}": {
                "parameters": [],
                "get": {
                    "operationId": "getToy",
                    "summary": "Get a toy",
                    "tags": ["toys", "pets"],
                    "responses": {
                        "200": {"description": "ok", "content": {"application/json": {"schema": {"$ref": "#/components/schemas/Pet"}}}},
                        "204": {"description": "empty"},
                        "404": {"$ref": "#/components/responses/NotFound"},
                        "default": {"description": "error"}
                    }
                },
                "delete": {"responses": {}}
            }
        });

        let operations =
            normalize_operations(paths.as_object().unwrap(), None, &mut generator, &resolver());
        assert_eq!(operations.len(), 2);

        let get = &operations[0];
        assert_eq!(get.pathname, "/pets/:petId/toys/:toyId");
        assert_eq!(get.method, HttpMethod::Get);
        assert_eq!(get.operation_id, "getToy");
        assert_eq!(get.primary_tag(), "toys");
        let codes: Vec<u16> = get.responses.iter().map(|r| r.status_code).collect();
        assert_eq!(codes, vec![200, 204]);
        assert_eq!(get.responses[1].schema, None);

        let delete = &operations[1];
        assert_eq!(delete.method, HttpMethod::Delete);
        assert_eq!(delete.operation_id, "");
        assert_eq!(delete.tags, vec!["default".to_string()]);
        assert!(delete.responses.is_empty());
    }

    #[test]
    fn test_include_codes_filter() {
        let mut generator = generator(Mode::Static);
        let paths = json!({"/a": {"post": {"responses": {
            "200": {"description": "ok"},
            "201": {"description": "created"},
            "400": {"description": "bad"}
        }}}});
        let operations = normalize_operations(
            paths.as_object().unwrap(),
            Some(&[201u16, 400][..]),
            &mut generator,
            &resolver(),
        );
        let codes: Vec<u16> = operations[0]
            .responses
            .iter()
            .map(|r| r.status_code)
            .collect();
        assert_eq!(codes, vec![201, 400]);
    }

    #[test]
    fn test_compose_ref_unit() {
        let op = operation(json!({
            "200": {"description": "ok", "content": {"application/json": {"schema": {"$ref": "#/components/schemas/Pet"}}}}
        }));
        let mut generator = generator(Mode::Static);
        let resolver = resolver();
        let units = ResponseComposer::new(&mut generator, &resolver).compose_operation(&op);

        assert_eq!(units.len(), 1);
        assert_eq!(
            units[0].render(),
            "export const getShowPet200 = () => {\n  // Schema is Pet\n  return { id: 1 }\n}"
        );
    }

    #[test]
    fn test_compose_array_of_ref() {
        let op = operation(json!({
            "200": {"description": "ok", "content": {"application/json": {"schema": {
                "type": "array", "items": {"$ref": "#/components/schemas/Pet"}
            }}}}
        }));
        let mut generator = generator(Mode::Static);
        let resolver = resolver();
        let unit = ResponseComposer::new(&mut generator, &resolver)
            .compose(&op, &op.responses[0])
            .unwrap();
        assert_eq!(unit.schema_comment.as_deref(), Some("Pet array"));
        assert_eq!(unit.body, "[{ id: 1 }, { id: 1 }]");
    }

    #[test]
    fn test_compose_inline_array() {
        let op = operation(json!({
            "200": {"description": "ok", "content": {"application/json": {"schema": {
                "type": "array", "items": {"type": "null"}
            }}}}
        }));
        let mut generator = generator(Mode::Static);
        let resolver = resolver();
        let unit = ResponseComposer::new(&mut generator, &resolver)
            .compose(&op, &op.responses[0])
            .unwrap();
        assert_eq!(unit.schema_comment, None);
        assert_eq!(unit.body, "[null, null]");
    }

    #[test]
    fn test_compose_union_uses_first_branch() {
        let op = operation(json!({
            "200": {"description": "ok", "content": {"application/json": {"schema": {
                "oneOf": [{"$ref": "#/components/schemas/Flag"}, {"$ref": "#/components/schemas/Pet"}]
            }}}},
            "201": {"description": "ok", "content": {"application/json": {"schema": {
                "anyOf": [{"type": "string"}, {"$ref": "#/components/schemas/Pet"}]
            }}}}
        }));
        let mut generator = generator(Mode::Dynamic);
        let resolver = resolver();
        let units = ResponseComposer::new(&mut generator, &resolver).compose_operation(&op);

        assert_eq!(units[0].schema_comment.as_deref(), Some("Flag"));
        assert_eq!(units[0].body, "faker.datatype.boolean()");
        assert_eq!(units[1].name, "getShowPet201");
        assert_eq!(units[1].body, r#"{ type: "string" }"#);
    }

    #[test]
    fn test_compose_skips_bodiless_and_unresolvable() {
        let op = operation(json!({
            "204": {"description": "empty"},
            "200": {"description": "ok", "content": {"application/json": {"schema": {"$ref": "#/components/schemas/Missing"}}}}
        }));
        let mut generator = generator(Mode::Static);
        let resolver = resolver();
        assert!(ResponseComposer::new(&mut generator, &resolver)
            .compose_operation(&op)
            .is_empty());
    }

    #[test]
    fn test_compose_all_groups_by_primary_tag() {
        let mut generator = generator(Mode::Static);
        let resolver = resolver();
        let paths = json!({
            "/pets": {"get": {"operationId": "listPets", "tags": ["pets"], "responses": {
                "200": {"description": "ok", "content": {"application/json": {"schema": {"$ref": "#/components/schemas/Flag"}}}}
            }}},
            "/health": {"get": {"operationId": "health", "responses": {"204": {"description": "up"}}}},
            "/pets/{id}": {"delete": {"operationId": "deletePet", "tags": ["pets", "admin"], "responses": {}}}
        });
        let operations =
            normalize_operations(paths.as_object().unwrap(), None, &mut generator, &resolver);
        let groups = ResponseComposer::new(&mut generator, &resolver).compose_all(operations);

        let keys: Vec<&str> = groups.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["pets", "default"]);
        assert_eq!(groups["pets"].len(), 2);
        assert!(groups["pets"][0].unit_for(200).is_some());
        assert!(!groups["pets"][0].units[0].uses_faker);
        assert!(groups["default"][0].unit_for(204).is_none());
    }

    #[test]
    fn test_group_by_tag_keeps_first_seen_order() {
        let groups = group_by_tag(vec![
            ("pets".to_string(), 1),
            ("store".to_string(), 2),
            ("pets".to_string(), 3),
        ]);
        let keys: Vec<&str> = groups.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["pets", "store"]);
        assert_eq!(groups["pets"], vec![1, 3]);
    }

    #[test]
    fn test_case_conversion() {
        assert_eq!(pascal_case("listPets"), "ListPets");
        assert_eq!(pascal_case("list_pets"), "ListPets");
        assert_eq!(pascal_case("get-user-by-id"), "GetUserById");
        assert_eq!(pascal_case("HTTPServer"), "HttpServer");
        assert_eq!(pascal_case("pet_2"), "Pet_2");
        assert_eq!(pascal_case(""), "");
        assert_eq!(camel_case("Pet Store"), "petStore");
        assert_eq!(camel_case("user-accounts"), "userAccounts");
        assert_eq!(reference_name("#/components/schemas/pet_tag"), "PetTag");
    }
}
