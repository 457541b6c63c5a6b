//! Serialization of generated values into TypeScript source text.
//!
//! Values render as object/array literals. Plain strings use JSON escaping, [`GeneratedValue::Const`]
//! strings get an `as const` suffix, and code expressions are written verbatim. Objects with
//! nullable properties can additionally be wrapped so the property is randomly omitted when the
//! generated code runs (see [`GenerationOptions::nullable_optional`]).

use crate::generator::{GenerationOptions, Mode};
use crate::value::GeneratedValue;
use anyhow::{Context, Result};
use log::debug;
use serde_json::Value;
use std::fs;
use std::path::Path;

const INDENT: &str = "  ";

/// Serializes a value tree at the given nesting depth.
///
/// `depth` is the indentation level of the line the value starts on; nested entries are indented
/// one level deeper and the closing bracket returns to `depth`.
///
/// # Example
///
/// ```
/// use openapi_mock_gen::generator::GenerationOptions;
/// use openapi_mock_gen::serializer::serialize;
/// use openapi_mock_gen::value::GeneratedValue;
///
/// let options = GenerationOptions { single_line: true, ..Default::default() };
/// let value = GeneratedValue::List(vec![GeneratedValue::Bool(true), GeneratedValue::Null]);
/// assert_eq!(serialize(&value, 0, &options), "[true, null]");
/// ```
pub fn serialize(value: &GeneratedValue, depth: usize, options: &GenerationOptions) -> String {
    match value {
        GeneratedValue::Null => "null".to_string(),
        GeneratedValue::Bool(b) => b.to_string(),
        GeneratedValue::Number(n) => n.to_string(),
        GeneratedValue::String(s) => quote(s),
        GeneratedValue::Const(s) => format!("{} as const", quote(s)),
        GeneratedValue::Code(code) => code.text().to_string(),
        GeneratedValue::List(items) => {
            let entries: Vec<String> = items
                .iter()
                .map(|item| serialize(item, depth + 1, options))
                .collect();
            layout('[', ']', entries, depth, options.single_line, false)
        }
        GeneratedValue::Map(properties) => {
            let entries: Vec<String> = properties
                .iter()
                .map(|(key, value)| property(key, value, depth, options))
                .collect();
            layout('{', '}', entries, depth, options.single_line, true)
        }
    }
}

/// Serializes on a single line regardless of the configured layout.
pub fn serialize_inline(value: &GeneratedValue, options: &GenerationOptions) -> String {
    let inline = GenerationOptions {
        single_line: true,
        ..options.clone()
    };
    serialize(value, 0, &inline)
}

/// Renders raw JSON as an inline TypeScript literal, used for faker call options.
pub fn json_literal(value: &Value) -> String {
    serialize_inline(&GeneratedValue::from(value), &GenerationOptions::default())
}

fn property(key: &str, value: &GeneratedValue, depth: usize, options: &GenerationOptions) -> String {
    let rendered = format!("{}: {}", property_key(key), serialize(value, depth + 1, options));
    if should_inject_optional(value, options) {
        format!("...(faker.datatype.boolean() ? {{ {} }} : {{}})", rendered)
    } else {
        rendered
    }
}

/// Randomized presence only makes sense when there is a later execution to randomize at.
fn should_inject_optional(value: &GeneratedValue, options: &GenerationOptions) -> bool {
    options.nullable_optional && options.mode == Mode::Dynamic && value.may_be_null()
}

fn layout(
    open: char,
    close: char,
    entries: Vec<String>,
    depth: usize,
    single_line: bool,
    padded: bool,
) -> String {
    if entries.is_empty() {
        return format!("{}{}", open, close);
    }

    if single_line {
        let body = entries.join(", ");
        return if padded {
            format!("{} {} {}", open, body, close)
        } else {
            format!("{}{}{}", open, body, close)
        };
    }

    let inner = INDENT.repeat(depth + 1);
    let mut out = String::new();
    out.push(open);
    out.push('\n');
    for entry in entries {
        out.push_str(&inner);
        out.push_str(&entry);
        out.push_str(",\n");
    }
    out.push_str(&INDENT.repeat(depth));
    out.push(close);
    out
}

fn property_key(key: &str) -> String {
    if is_identifier(key) {
        key.to_string()
    } else {
        quote(key)
    }
}

fn is_identifier(key: &str) -> bool {
    let mut chars = key.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' || first == '$' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
        }
        _ => false,
    }
}

fn quote(s: &str) -> String {
    Value::String(s.to_string()).to_string()
}

/// Writes string content to a file.
///
/// Creates the file if it doesn't exist, or overwrites it if it does. Parent directories are
/// created as needed.
///
/// # Errors
///
/// Returns an error if the file cannot be created or written to.
pub fn write_to_file(content: &str, path: &Path) -> Result<()> {
    debug!("Writing content to file: {}", path.display());

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    fs::write(path, content)
        .with_context(|| format!("Failed to write to file: {}", path.display()))?;

    debug!("Successfully wrote {} bytes to {}", content.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::CodeExpression;
    use indexmap::IndexMap;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use tempfile::TempDir;

    fn dynamic() -> GenerationOptions {
        GenerationOptions {
            mode: Mode::Dynamic,
            ..Default::default()
        }
    }

    fn map(entries: Vec<(&str, GeneratedValue)>) -> GeneratedValue {
        GeneratedValue::Map(
            entries
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect::<IndexMap<_, _>>(),
        )
    }

    #[test]
    fn test_scalars() {
        let options = GenerationOptions::default();
        assert_eq!(serialize(&GeneratedValue::Null, 0, &options), "null");
        assert_eq!(serialize(&GeneratedValue::Bool(false), 0, &options), "false");
        assert_eq!(
            serialize(
                &GeneratedValue::Number(serde_json::Number::from_f64(12.5).unwrap()),
                0,
                &options
            ),
            "12.5"
        );
        assert_eq!(
            serialize(&GeneratedValue::string("say \"hi\"\n"), 0, &options),
            r#""say \"hi\"\n""#
        );
    }

    #[test]
    fn test_const_and_code() {
        let options = GenerationOptions::default();
        assert_eq!(
            serialize(&GeneratedValue::Const("red".to_string()), 0, &options),
            r#""red" as const"#
        );
        assert_eq!(
            serialize(&GeneratedValue::code("faker.datatype.boolean()"), 0, &options),
            "faker.datatype.boolean()"
        );
    }

    #[test]
    fn test_multi_line_layout() {
        let value = map(vec![
            ("id", GeneratedValue::Number(7.into())),
            (
                "tags",
                GeneratedValue::List(vec![GeneratedValue::string("a"), GeneratedValue::string("b")]),
            ),
            ("meta", map(vec![])),
        ]);

        let expected = r#"{
  id: 7,
  tags: [
    "a",
    "b",
  ],
  meta: {},
}"#;
        assert_eq!(serialize(&value, 0, &GenerationOptions::default()), expected);
    }

    #[test]
    fn test_depth_offsets_indentation() {
        let value = map(vec![("ok", GeneratedValue::Bool(true))]);
        assert_eq!(
            serialize(&value, 1, &GenerationOptions::default()),
            "{\n    ok: true,\n  }"
        );
    }

    #[test]
    fn test_single_line_layout() {
        let options = GenerationOptions {
            single_line: true,
            ..Default::default()
        };
        let value = map(vec![
            ("a", GeneratedValue::Number(1.into())),
            ("b", GeneratedValue::List(vec![GeneratedValue::Null, GeneratedValue::Bool(true)])),
            ("c", GeneratedValue::List(vec![])),
        ]);
        assert_eq!(serialize(&value, 0, &options), "{ a: 1, b: [null, true], c: [] }");
    }

    #[test]
    fn test_non_identifier_keys_are_quoted() {
        let options = GenerationOptions {
            single_line: true,
            ..Default::default()
        };
        let value = map(vec![
            ("content-type", GeneratedValue::Null),
            ("_ok$", GeneratedValue::Null),
            ("1st", GeneratedValue::Null),
        ]);
        assert_eq!(
            serialize(&value, 0, &options),
            r#"{ "content-type": null, _ok$: null, "1st": null }"#
        );
    }

    #[test]
    fn test_nullable_optional_injection_dynamic_only() {
        let value = map(vec![
            ("gone", GeneratedValue::Null),
            (
                "maybe",
                GeneratedValue::Code(CodeExpression::nullable("faker.helpers.arrayElement([1, null])")),
            ),
            ("kept", GeneratedValue::Number(1.into())),
        ]);

        let options = GenerationOptions {
            nullable_optional: true,
            single_line: true,
            ..dynamic()
        };
        assert_eq!(
            serialize(&value, 0, &options),
            "{ ...(faker.datatype.boolean() ? { gone: null } : {}), \
             ...(faker.datatype.boolean() ? { maybe: faker.helpers.arrayElement([1, null]) } : {}), \
             kept: 1 }"
        );

        let static_options = GenerationOptions {
            nullable_optional: true,
            single_line: true,
            ..Default::default()
        };
        assert_eq!(
            serialize(&value, 0, &static_options),
            "{ gone: null, maybe: faker.helpers.arrayElement([1, null]), kept: 1 }"
        );
    }

    #[test]
    fn test_nullable_optional_injection_multi_line_nested() {
        let inner = map(vec![
            (
                "nickname",
                GeneratedValue::Code(CodeExpression::nullable(
                    "faker.helpers.arrayElement([\"a\", null])",
                )),
            ),
            ("id", GeneratedValue::Number(7.into())),
        ]);
        let value = map(vec![("owner", inner)]);
        let options = GenerationOptions {
            nullable_optional: true,
            ..dynamic()
        };
        assert_eq!(
            serialize(&value, 1, &options),
            "{\n    owner: {\n      \
             ...(faker.datatype.boolean() ? { nickname: faker.helpers.arrayElement([\"a\", null]) } : {}),\n      \
             id: 7,\n    },\n  }"
        );
    }

    #[test]
    fn test_injection_off_by_default() {
        let value = map(vec![("gone", GeneratedValue::Null)]);
        let options = GenerationOptions {
            single_line: true,
            ..dynamic()
        };
        assert_eq!(serialize(&value, 0, &options), "{ gone: null }");
    }

    #[test]
    fn test_static_list_is_json_compatible() {
        // Trailing commas are the only difference from JSON here.
        let value = GeneratedValue::List(vec![
            GeneratedValue::string("a\tb"),
            GeneratedValue::Number(3.into()),
            GeneratedValue::Null,
        ]);
        let text = serialize(&value, 0, &GenerationOptions::default());
        let parsed: Value = serde_json::from_str(&text.replace(",\n]", "\n]")).unwrap();
        assert_eq!(parsed, json!(["a\tb", 3, null]));
    }

    #[test]
    fn test_json_literal() {
        assert_eq!(
            json_literal(&json!({"length": {"min": 1, "max": 2}})),
            "{ length: { min: 1, max: 2 } }"
        );
    }

    #[test]
    fn test_write_to_file_creates_directories() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("subdir").join("nested").join("schemas.ts");

        write_to_file("export {}", &file_path).unwrap();
        assert_eq!(fs::read_to_string(&file_path).unwrap(), "export {}");

        write_to_file("export const a = 1", &file_path).unwrap();
        assert_eq!(fs::read_to_string(&file_path).unwrap(), "export const a = 1");
    }
}
