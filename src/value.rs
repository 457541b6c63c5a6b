//! Generated value tree.
//!
//! The generator produces a [`GeneratedValue`] for every schema position it can fill. Most
//! positions hold plain literal data; positions that must be re-evaluated by the generated code
//! at runtime hold a [`CodeExpression`], which the serializer emits verbatim.

use indexmap::IndexMap;
use serde_json::{Number, Value};

/// A node of generated sample data.
#[derive(Debug, Clone, PartialEq)]
pub enum GeneratedValue {
    Null,
    Bool(bool),
    Number(Number),
    /// Plain string, emitted as a JSON string literal.
    String(String),
    /// String emitted as a narrowed literal type (`"x" as const`).
    Const(String),
    List(Vec<GeneratedValue>),
    Map(IndexMap<String, GeneratedValue>),
    /// Source text evaluated when the generated code runs.
    Code(CodeExpression),
}

/// Source text that must be emitted as-is, never quoted or escaped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeExpression {
    text: String,
    /// The expression may evaluate to `null`.
    nullable: bool,
}

impl CodeExpression {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            nullable: false,
        }
    }

    pub fn nullable(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            nullable: true,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_nullable(&self) -> bool {
        self.nullable
    }
}

impl GeneratedValue {
    pub fn code(text: impl Into<String>) -> Self {
        GeneratedValue::Code(CodeExpression::new(text))
    }

    pub fn string(text: impl Into<String>) -> Self {
        GeneratedValue::String(text.into())
    }

    /// True when the value is `null` or a code expression that may produce `null`.
    pub fn may_be_null(&self) -> bool {
        match self {
            GeneratedValue::Null => true,
            GeneratedValue::Code(code) => code.is_nullable(),
            _ => false,
        }
    }

    /// Returns true when any node of the tree is a [`CodeExpression`].
    pub fn contains_code(&self) -> bool {
        match self {
            GeneratedValue::Code(_) => true,
            GeneratedValue::List(items) => items.iter().any(GeneratedValue::contains_code),
            GeneratedValue::Map(entries) => entries.values().any(GeneratedValue::contains_code),
            _ => false,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            GeneratedValue::String(s) | GeneratedValue::Const(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[GeneratedValue]> {
        match self {
            GeneratedValue::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&IndexMap<String, GeneratedValue>> {
        match self {
            GeneratedValue::Map(entries) => Some(entries),
            _ => None,
        }
    }
}

impl From<&Value> for GeneratedValue {
    /// Converts raw JSON into plain literal data. Strings never become code.
    fn from(value: &Value) -> Self {
        match value {
            Value::Null => GeneratedValue::Null,
            Value::Bool(b) => GeneratedValue::Bool(*b),
            Value::Number(n) => GeneratedValue::Number(n.clone()),
            Value::String(s) => GeneratedValue::String(s.clone()),
            Value::Array(items) => GeneratedValue::List(items.iter().map(Self::from).collect()),
            Value::Object(entries) => GeneratedValue::Map(
                entries
                    .iter()
                    .map(|(key, value)| (key.clone(), Self::from(value)))
                    .collect(),
            ),
        }
    }
}

impl From<Value> for GeneratedValue {
    fn from(value: Value) -> Self {
        GeneratedValue::from(&value)
    }
}
