//! Mock value generation.
//!
//! [`Generator`] walks a classified [`SchemaNode`] tree and produces a [`GeneratedValue`] for it.
//! It works in one of two modes:
//!
//! - **Static**: every random draw happens now, from a seeded [`RandomSource`], and the result is
//!   plain literal data.
//! - **Dynamic**: leaves become faker.js call expressions with their bounds embedded, so the draw
//!   happens each time the generated TypeScript runs. Structure (object keys, array lengths) is
//!   still fixed at generation time.
//!
//! Special rules are consulted before any structural logic on leaf nodes. Unresolved references
//! produce no value, which removes the key from the enclosing object.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use chrono::{DateTime, SecondsFormat, Utc};
use indexmap::IndexMap;
use log::{debug, warn};
use serde_json::{Number, Value};

use crate::classifier::{
    classify, CompositionKind, NumericKind, NumericSchema, SchemaNode, StringSchema,
};
use crate::random::{FakeResolver, FakerResolver, RandomSource, SeededRandom, DEFAULT_SEED};
use crate::serializer::{json_literal, serialize_inline};
use crate::special_rules::{SpecialRule, SpecialRules};
use crate::value::{CodeExpression, GeneratedValue};

pub const ARRAY_MIN_LENGTH: usize = 1;
pub const ARRAY_MAX_LENGTH: usize = 3;

pub const MIN_STRING_LENGTH: u64 = 3;
pub const MAX_STRING_LENGTH: u64 = 20;

pub const MIN_INTEGER: i64 = 1;
pub const MAX_INTEGER: i64 = 100_000;

pub const MIN_NUMBER: f64 = 0.0;
pub const MAX_NUMBER: f64 = 100.0;

pub const MIN_WORD_COUNT: usize = 0;
pub const MAX_WORD_COUNT: usize = 3;

/// Title marking a string as a base64url-encoded UUID (matched case-insensitively).
pub const B64UUID_TITLE: &str = "b64uuid";

pub const DEFAULT_LOCALE: &str = "ko";

/// 2020-01-01T00:00:00.000Z
const TIMESTAMP_FROM_MILLIS: i64 = 1_577_836_800_000;
/// 2030-12-31T23:59:59.999Z
const TIMESTAMP_TO_MILLIS: i64 = 1_924_991_999_999;

const DATE_TIME_EXPR: &str = r#"faker.date.between({ from: "2020-01-01T00:00:00.000Z", to: "2030-12-31T23:59:59.999Z" }).toISOString()"#;
const B64UUID_EXPR: &str = r#"Buffer.from(faker.string.uuid().replace(/-/g, ""), "hex").toString("base64").replace(/\+/g, "-").replace(/\//g, "_").replace(/=/g, "")"#;
const BOOLEAN_EXPR: &str = "faker.datatype.boolean()";
const ADJECTIVE_EXPR: &str = "faker.word.adjective()";

/// Whether values are evaluated now or emitted as code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Static,
    Dynamic,
}

/// Options of one generation pass. Never mutated once the pass starts.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationOptions {
    pub mode: Mode,
    /// Inclusive bounds for generated array lengths.
    pub array_length_range: (usize, usize),
    /// Wrap nullable object properties so they are randomly omitted (dynamic mode only).
    pub nullable_optional: bool,
    pub single_line: bool,
    /// Comma-separated faker.js locale names for the generated faker instance.
    pub locale: String,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            mode: Mode::Static,
            array_length_range: (ARRAY_MIN_LENGTH, ARRAY_MAX_LENGTH),
            nullable_optional: false,
            single_line: false,
            locale: DEFAULT_LOCALE.to_string(),
        }
    }
}

impl GenerationOptions {
    pub fn is_static(&self) -> bool {
        self.mode == Mode::Static
    }
}

/// Schema-to-mock generator.
pub struct Generator {
    options: GenerationOptions,
    rules: SpecialRules,
    random: Box<dyn RandomSource>,
    resolver: Box<dyn FakerResolver>,
}

impl Generator {
    /// Creates a generator seeded with [`DEFAULT_SEED`] and resolving faker calls with
    /// [`FakeResolver`].
    pub fn new(options: GenerationOptions, rules: SpecialRules) -> Self {
        debug!("Initializing Generator in {:?} mode", options.mode);
        Self {
            options,
            rules,
            random: Box::new(SeededRandom::new(DEFAULT_SEED)),
            resolver: Box::new(FakeResolver),
        }
    }

    pub fn with_random(mut self, random: impl RandomSource + 'static) -> Self {
        self.random = Box::new(random);
        self
    }

    pub fn with_resolver(mut self, resolver: impl FakerResolver + 'static) -> Self {
        self.resolver = Box::new(resolver);
        self
    }

    pub fn options(&self) -> &GenerationOptions {
        &self.options
    }

    /// Classifies and generates a raw schema in one step.
    pub fn generate_raw(&mut self, schema: &Value) -> Option<GeneratedValue> {
        self.generate(&classify(schema))
    }

    /// Generates every schema of a `components.schemas` map, skipping those without a value.
    pub fn generate_schemas(
        &mut self,
        schemas: &serde_json::Map<String, Value>,
    ) -> IndexMap<String, GeneratedValue> {
        schemas
            .iter()
            .filter_map(|(name, schema)| {
                debug!("Generating mock for schema: {}", name);
                self.generate_raw(schema).map(|value| (name.clone(), value))
            })
            .collect()
    }

    /// Draws a length in the configured array range.
    pub fn array_length(&mut self) -> usize {
        let (min, max) = self.options.array_length_range;
        self.random.int_in_range(min as i64, max as i64).max(0) as usize
    }

    /// Generates a value for a node. `None` means "no value for this position".
    pub fn generate(&mut self, node: &SchemaNode) -> Option<GeneratedValue> {
        match node {
            SchemaNode::Reference { reference } => {
                warn!("Can't generate a value for unresolved reference {}", reference);
                None
            }
            SchemaNode::Object { properties } => {
                let mut entries = IndexMap::with_capacity(properties.len());
                for (key, field) in properties {
                    if let Some(value) = self.generate(field) {
                        entries.insert(key.clone(), value);
                    }
                }
                Some(GeneratedValue::Map(entries))
            }
            SchemaNode::Enum { values } => self.generate_enum(values),
            SchemaNode::Composition { kind, branches } => self.generate_composition(*kind, branches),
            SchemaNode::Array { items } => {
                let len = self.array_length();
                let values = (0..len).filter_map(|_| self.generate(items)).collect();
                Some(GeneratedValue::List(values))
            }
            SchemaNode::Tuple {
                prefix_items,
                min_items,
                max_items,
            } => {
                let len = self
                    .random
                    .int_in_range(*min_items as i64, *max_items as i64)
                    .clamp(0, prefix_items.len() as i64) as usize;
                let values = prefix_items[..len]
                    .iter()
                    .filter_map(|item| self.generate(item))
                    .collect();
                Some(GeneratedValue::List(values))
            }
            leaf => {
                let rule = leaf
                    .leaf_meta()
                    .and_then(|meta| self.rules.lookup(meta))
                    .cloned();
                match rule {
                    Some(rule) => self.apply_rule(&rule),
                    None => self.generate_leaf(leaf),
                }
            }
        }
    }

    fn generate_enum(&mut self, values: &[Value]) -> Option<GeneratedValue> {
        if values.is_empty() {
            debug!("Empty enum, no value generated");
            return None;
        }

        if self.options.is_static() {
            let picked = &values[self.random.pick_index(values.len())];
            return Some(match picked {
                Value::String(s) => GeneratedValue::Const(s.clone()),
                other => GeneratedValue::from(other),
            });
        }

        let union = values.iter().map(json_literal).collect::<Vec<_>>().join(" | ");
        let list = GeneratedValue::List(values.iter().map(GeneratedValue::from).collect());
        let text = format!(
            "faker.helpers.arrayElement<{}>({})",
            union,
            serialize_inline(&list, &self.options)
        );
        Some(GeneratedValue::Code(if values.iter().any(Value::is_null) {
            CodeExpression::nullable(text)
        } else {
            CodeExpression::new(text)
        }))
    }

    /// Generates every branch, then picks one. `allOf` branches are not merged.
    fn generate_composition(
        &mut self,
        kind: CompositionKind,
        branches: &[SchemaNode],
    ) -> Option<GeneratedValue> {
        let mut candidates: Vec<GeneratedValue> =
            branches.iter().filter_map(|b| self.generate(b)).collect();
        if candidates.is_empty() {
            debug!("No branch of {} produced a value", kind.keyword());
            return None;
        }

        if self.options.is_static() {
            let index = self.random.pick_index(candidates.len());
            return Some(candidates.swap_remove(index));
        }

        let nullable = candidates.iter().any(GeneratedValue::may_be_null);
        let rendered = candidates
            .iter()
            .map(|c| serialize_inline(c, &self.options))
            .collect::<Vec<_>>()
            .join(", ");
        let text = format!("faker.helpers.arrayElement([{}])", rendered);
        Some(GeneratedValue::Code(if nullable {
            CodeExpression::nullable(text)
        } else {
            CodeExpression::new(text)
        }))
    }

    fn apply_rule(&mut self, rule: &SpecialRule) -> Option<GeneratedValue> {
        match rule {
            SpecialRule::DirectValue { value } => Some(GeneratedValue::from(value)),
            SpecialRule::ModuleFunctionRef {
                module,
                function,
                options,
            } => {
                if !self.options.is_static() {
                    let args = options.as_ref().map(json_literal).unwrap_or_default();
                    return Some(GeneratedValue::code(format!(
                        "faker.{}.{}({})",
                        module, function, args
                    )));
                }

                let value =
                    self.resolver
                        .resolve(module, function, options.as_ref(), self.random.as_mut());
                if value.is_none() {
                    warn!("Can't find faker function faker.{}.{}", module, function);
                }
                value
            }
        }
    }

    fn generate_leaf(&mut self, node: &SchemaNode) -> Option<GeneratedValue> {
        let is_static = self.options.is_static();
        let value = match node {
            SchemaNode::String(schema) => self.generate_string(schema),
            SchemaNode::Numeric(schema) => self.generate_numeric(schema),
            SchemaNode::Boolean(_) if is_static => GeneratedValue::Bool(self.random.boolean()),
            SchemaNode::Boolean(_) => GeneratedValue::code(BOOLEAN_EXPR),
            SchemaNode::Null(_) => GeneratedValue::Null,
            SchemaNode::FreeForm { blank: true, .. } if is_static => {
                GeneratedValue::String(self.random.words(MIN_WORD_COUNT, MAX_WORD_COUNT))
            }
            SchemaNode::FreeForm { blank: true, .. } => GeneratedValue::code(format!(
                "faker.word.words({{ count: {{ min: {}, max: {} }} }})",
                MIN_WORD_COUNT, MAX_WORD_COUNT
            )),
            SchemaNode::FreeForm { .. } if is_static => GeneratedValue::String(self.random.word()),
            SchemaNode::FreeForm { .. } => GeneratedValue::code(ADJECTIVE_EXPR),
            _ => return None,
        };
        Some(value)
    }

    fn generate_string(&mut self, schema: &StringSchema) -> GeneratedValue {
        let is_static = self.options.is_static();

        match schema.format.as_deref() {
            Some("date-time") if is_static => {
                return GeneratedValue::String(self.timestamp());
            }
            Some("date-time") => return GeneratedValue::code(DATE_TIME_EXPR),
            Some("date") if is_static => {
                let timestamp = self.timestamp();
                let date = timestamp.split('T').next().unwrap_or_default();
                return GeneratedValue::string(date);
            }
            Some("date") => return GeneratedValue::code(format!("{}.split(\"T\")[0]", DATE_TIME_EXPR)),
            _ => {}
        }

        let is_b64uuid = schema
            .meta
            .title
            .as_deref()
            .is_some_and(|title| title.eq_ignore_ascii_case(B64UUID_TITLE));
        if is_b64uuid {
            return if is_static {
                let uuid = self.random.uuid();
                GeneratedValue::String(URL_SAFE_NO_PAD.encode(uuid.as_bytes()))
            } else {
                GeneratedValue::code(B64UUID_EXPR)
            };
        }

        if let Some(pattern) = schema.pattern.as_deref() {
            if !is_static {
                return GeneratedValue::code(format!(
                    "faker.helpers.fromRegExp(/{}/)",
                    regex_literal_body(pattern)
                ));
            }
            if let Some(sample) = self.random.from_pattern(pattern) {
                return GeneratedValue::String(sample);
            }
        }

        let min_length = schema
            .min_length
            .unwrap_or_else(|| MIN_STRING_LENGTH.min(schema.max_length.unwrap_or(MAX_STRING_LENGTH)));
        let max_length = schema
            .max_length
            .unwrap_or_else(|| MAX_STRING_LENGTH.max(schema.min_length.unwrap_or(MIN_STRING_LENGTH)));

        if is_static {
            GeneratedValue::String(
                self.random
                    .alphanumeric(min_length as usize, max_length as usize),
            )
        } else {
            GeneratedValue::code(format!(
                "faker.string.alphanumeric({{ length: {{ min: {}, max: {} }} }})",
                min_length, max_length
            ))
        }
    }

    fn generate_numeric(&mut self, schema: &NumericSchema) -> GeneratedValue {
        match schema.kind {
            NumericKind::Integer => {
                let min = schema
                    .minimum
                    .map(|m| m.ceil() as i64)
                    .unwrap_or_else(|| {
                        MIN_INTEGER.min(schema.maximum.map_or(MAX_INTEGER, |m| m.floor() as i64))
                    });
                let max = schema
                    .maximum
                    .map(|m| m.floor() as i64)
                    .unwrap_or_else(|| {
                        MAX_INTEGER.max(schema.minimum.map_or(MIN_INTEGER, |m| m.ceil() as i64))
                    });

                if self.options.is_static() {
                    GeneratedValue::Number(self.random.int_in_range(min, max).into())
                } else {
                    GeneratedValue::code(format!("faker.number.int({{ min: {}, max: {} }})", min, max))
                }
            }
            NumericKind::Number => {
                let min = schema
                    .minimum
                    .unwrap_or_else(|| MIN_NUMBER.min(schema.maximum.unwrap_or(MAX_NUMBER)));
                let max = schema
                    .maximum
                    .unwrap_or_else(|| MAX_NUMBER.max(schema.minimum.unwrap_or(MIN_NUMBER)));

                if self.options.is_static() {
                    let drawn = self.random.float_in_range(min, max);
                    let rounded = ((drawn * 100.0).round() / 100.0).clamp(min.min(max), max.max(min));
                    Number::from_f64(rounded)
                        .map(GeneratedValue::Number)
                        .unwrap_or(GeneratedValue::Null)
                } else {
                    GeneratedValue::code(format!(
                        "faker.number.float({{ min: {}, max: {}, fractionDigits: 2 }})",
                        min, max
                    ))
                }
            }
        }
    }

    /// ISO-8601 timestamp with millisecond precision inside the fixed reference window.
    fn timestamp(&mut self) -> String {
        let millis = self
            .random
            .int_in_range(TIMESTAMP_FROM_MILLIS, TIMESTAMP_TO_MILLIS);
        DateTime::<Utc>::from_timestamp_millis(millis)
            .unwrap_or_default()
            .to_rfc3339_opts(SecondsFormat::Millis, true)
    }
}

/// Makes `pattern` safe between the slashes of a regex literal.
///
/// Unescaped `/` gets a backslash, already escaped `\/` is kept, and raw line terminators are
/// written as escapes.
fn regex_literal_body(pattern: &str) -> String {
    let mut body = String::with_capacity(pattern.len());
    let mut escaped = false;
    for c in pattern.chars() {
        let line_terminator = match c {
            '\n' => Some("n"),
            '\r' => Some("r"),
            '\u{2028}' => Some("u2028"),
            '\u{2029}' => Some("u2029"),
            _ => None,
        };
        match line_terminator {
            Some(name) if escaped => body.push_str(name),
            Some(name) => {
                body.push('\\');
                body.push_str(name);
            }
            None if c == '/' && !escaped => body.push_str("\\/"),
            None => body.push(c),
        }
        escaped = c == '\\' && !escaped;
    }
    body
}
