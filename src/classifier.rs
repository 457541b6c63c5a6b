//! Schema classification.
//!
//! Raw OpenAPI schema objects are shape-tested exactly once here and turned into a tagged
//! [`SchemaNode`] tree, so the generator can dispatch with a plain `match`. A schema may satisfy
//! several predicates at once (`type: string` together with `enum`, for instance); the order of
//! the checks in [`classify`] decides which variant wins:
//!
//! `$ref` → object → enum → allOf → anyOf → oneOf → array/tuple → string → integer → number →
//! boolean → null → free-form.

use indexmap::IndexMap;
use log::debug;
use serde_json::{Map, Value};

/// Classified schema node.
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaNode {
    /// Unresolved `$ref`. Resolution belongs to the document loader.
    Reference { reference: String },
    Object { properties: IndexMap<String, SchemaNode> },
    Array { items: Box<SchemaNode> },
    Tuple {
        prefix_items: Vec<SchemaNode>,
        min_items: usize,
        max_items: usize,
    },
    Enum { values: Vec<Value> },
    Composition {
        kind: CompositionKind,
        branches: Vec<SchemaNode>,
    },
    String(StringSchema),
    Numeric(NumericSchema),
    Boolean(LeafMeta),
    Null(LeafMeta),
    /// No recognized keys. `blank` is set when the schema has no keys at all.
    FreeForm { meta: LeafMeta, blank: bool },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompositionKind {
    AllOf,
    AnyOf,
    OneOf,
}

impl CompositionKind {
    pub fn keyword(&self) -> &'static str {
        match self {
            CompositionKind::AllOf => "allOf",
            CompositionKind::AnyOf => "anyOf",
            CompositionKind::OneOf => "oneOf",
        }
    }
}

/// `title` and `description` of a leaf, the keys of the special-rule lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeafMeta {
    pub title: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct StringSchema {
    pub meta: LeafMeta,
    pub format: Option<String>,
    pub pattern: Option<String>,
    pub min_length: Option<u64>,
    pub max_length: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericKind {
    Integer,
    Number,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NumericSchema {
    pub meta: LeafMeta,
    pub kind: NumericKind,
    pub minimum: Option<f64>,
    pub maximum: Option<f64>,
}

impl SchemaNode {
    /// Metadata of leaf variants; `None` for structural ones.
    pub fn leaf_meta(&self) -> Option<&LeafMeta> {
        match self {
            SchemaNode::String(s) => Some(&s.meta),
            SchemaNode::Numeric(n) => Some(&n.meta),
            SchemaNode::Boolean(meta) | SchemaNode::Null(meta) => Some(meta),
            SchemaNode::FreeForm { meta, .. } => Some(meta),
            _ => None,
        }
    }
}

/// Classifies a raw schema. Never fails: anything unrecognized becomes [`SchemaNode::FreeForm`].
pub fn classify(schema: &Value) -> SchemaNode {
    let Some(obj) = schema.as_object() else {
        // Boolean schemas (`true`) accept anything.
        return SchemaNode::FreeForm {
            meta: LeafMeta::default(),
            blank: true,
        };
    };

    if let Some(reference) = obj.get("$ref").and_then(Value::as_str) {
        return SchemaNode::Reference {
            reference: reference.to_string(),
        };
    }

    if let Some(types) = obj.get("type").and_then(Value::as_array) {
        return classify_type_list(obj, types);
    }

    let schema_type = obj.get("type").and_then(Value::as_str);
    let meta = leaf_meta(obj);

    if schema_type == Some("object") || (schema_type.is_none() && obj.contains_key("properties")) {
        let properties = obj
            .get("properties")
            .and_then(Value::as_object)
            .map(|props| {
                props
                    .iter()
                    .map(|(key, field)| (key.clone(), classify(field)))
                    .collect()
            })
            .unwrap_or_default();
        return SchemaNode::Object { properties };
    }

    if let Some(values) = obj.get("enum").and_then(Value::as_array) {
        return SchemaNode::Enum {
            values: values.clone(),
        };
    }

    for kind in [
        CompositionKind::AllOf,
        CompositionKind::AnyOf,
        CompositionKind::OneOf,
    ] {
        if let Some(branches) = obj.get(kind.keyword()).and_then(Value::as_array) {
            return SchemaNode::Composition {
                kind,
                branches: branches.iter().map(classify).collect(),
            };
        }
    }

    match schema_type {
        Some("array") => classify_array(obj),
        Some("string") => SchemaNode::String(StringSchema {
            meta,
            format: string_key(obj, "format"),
            pattern: string_key(obj, "pattern"),
            min_length: obj.get("minLength").and_then(Value::as_u64),
            max_length: obj.get("maxLength").and_then(Value::as_u64),
        }),
        Some("integer") => numeric(obj, meta, NumericKind::Integer),
        Some("number") => numeric(obj, meta, NumericKind::Number),
        Some("boolean") => SchemaNode::Boolean(meta),
        Some("null") => SchemaNode::Null(meta),
        _ => {
            if let Some(other) = schema_type {
                debug!("Unrecognized schema type '{}', treating as free-form", other);
            }
            SchemaNode::FreeForm {
                meta,
                blank: obj.is_empty(),
            }
        }
    }
}

/// `type: [a, b]` is an implicit anyOf over the same schema narrowed to each type.
fn classify_type_list(obj: &Map<String, Value>, types: &[Value]) -> SchemaNode {
    let narrowed: Vec<Value> = types
        .iter()
        .filter(|t| t.is_string())
        .map(|t| {
            let mut branch = obj.clone();
            branch.insert("type".to_string(), t.clone());
            Value::Object(branch)
        })
        .collect();

    match narrowed.as_slice() {
        [] => {
            let mut untyped = obj.clone();
            untyped.remove("type");
            classify(&Value::Object(untyped))
        }
        [single] => classify(single),
        _ => SchemaNode::Composition {
            kind: CompositionKind::AnyOf,
            branches: narrowed.iter().map(classify).collect(),
        },
    }
}

fn classify_array(obj: &Map<String, Value>) -> SchemaNode {
    if let Some(prefix) = obj.get("prefixItems").and_then(Value::as_array) {
        let len = prefix.len();
        let max_items = obj
            .get("maxItems")
            .and_then(Value::as_u64)
            .map_or(len, |max| (max as usize).min(len));
        let min_items = obj
            .get("minItems")
            .and_then(Value::as_u64)
            .map_or(0, |min| (min as usize).min(max_items));
        return SchemaNode::Tuple {
            prefix_items: prefix.iter().map(classify).collect(),
            min_items,
            max_items,
        };
    }

    let items = obj
        .get("items")
        .map(classify)
        .unwrap_or(SchemaNode::FreeForm {
            meta: LeafMeta::default(),
            blank: true,
        });
    SchemaNode::Array {
        items: Box::new(items),
    }
}

fn numeric(obj: &Map<String, Value>, meta: LeafMeta, kind: NumericKind) -> SchemaNode {
    SchemaNode::Numeric(NumericSchema {
        meta,
        kind,
        minimum: obj.get("minimum").and_then(Value::as_f64),
        maximum: obj.get("maximum").and_then(Value::as_f64),
    })
}

fn leaf_meta(obj: &Map<String, Value>) -> LeafMeta {
    LeafMeta {
        title: string_key(obj, "title"),
        description: string_key(obj, "description"),
    }
}

fn string_key(obj: &Map<String, Value>, key: &str) -> Option<String> {
    obj.get(key).and_then(Value::as_str).map(str::to_string)
}
