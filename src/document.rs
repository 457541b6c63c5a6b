//! OpenAPI document loading and local reference resolution.

use crate::error::{Error, Result};
use crate::response::{reference_name, ReferenceResolver};
use log::{debug, warn};
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};

/// A loaded OpenAPI 3.x document.
///
/// Keeps the document twice: as bundled (every `$ref` left in place, which is what operation
/// normalization reads) and dereferenced (every resolvable local `$ref` replaced by its target,
/// which is what schema generation reads).
///
/// # Example
///
/// ```no_run
/// use openapi_mock_gen::document::OpenApiDocument;
/// use std::path::Path;
///
/// let document = OpenApiDocument::load(Path::new("openapi.yaml")).unwrap();
/// println!("{} schemas", document.schemas().map_or(0, |s| s.len()));
/// ```
#[derive(Debug, Clone)]
pub struct OpenApiDocument {
    /// Where the document was read from
    pub source: PathBuf,
    bundled: Value,
    dereferenced: Value,
}

impl OpenApiDocument {
    /// Reads and parses a document from disk.
    ///
    /// `.json` files are parsed as JSON and `.yaml`/`.yml` files as YAML. Any other extension is
    /// tried as JSON first, then as YAML.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be read
    /// - The content is neither valid JSON nor valid YAML
    /// - The document is not OpenAPI 3.x
    pub fn load(path: &Path) -> Result<Self> {
        debug!("Loading OpenAPI document: {}", path.display());

        let content = fs::read_to_string(path)?;
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);

        let value = match extension.as_deref() {
            Some("json") => parse_json(&content, path)?,
            Some("yaml") | Some("yml") => parse_yaml(&content, path)?,
            _ => parse_json(&content, path).or_else(|_| parse_yaml(&content, path))?,
        };

        Self::from_value(value, path.to_path_buf())
    }

    /// Builds a document from an already parsed value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedVersion`] unless the `openapi` field starts with `3`.
    pub fn from_value(value: Value, source: PathBuf) -> Result<Self> {
        let version = value
            .get("openapi")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| {
                value
                    .get("swagger")
                    .and_then(Value::as_str)
                    .unwrap_or("unknown")
                    .to_string()
            });
        if !version.starts_with('3') || value.get("openapi").is_none() {
            return Err(Error::UnsupportedVersion(version));
        }

        debug!("Dereferencing OpenAPI {} document", version);
        let dereferenced = dereference(&value, &value, &mut Vec::new());

        Ok(Self {
            source,
            bundled: value,
            dereferenced,
        })
    }

    pub fn bundled(&self) -> &Value {
        &self.bundled
    }

    pub fn dereferenced(&self) -> &Value {
        &self.dereferenced
    }

    /// `components.schemas` of the dereferenced document.
    pub fn schemas(&self) -> Option<&Map<String, Value>> {
        let schemas = self
            .dereferenced
            .pointer("/components/schemas")
            .and_then(Value::as_object);
        if schemas.is_none() {
            warn!("No schemas found in {}", self.source.display());
        }
        schemas
    }

    /// `paths` of the bundled document.
    pub fn paths(&self) -> Option<&Map<String, Value>> {
        let paths = self.bundled.get("paths").and_then(Value::as_object);
        if paths.is_none() {
            warn!("No paths found in {}", self.source.display());
        }
        paths
    }
}

impl ReferenceResolver for OpenApiDocument {
    fn resolve_reference(&self, reference: &str) -> Option<(String, Value)> {
        let target = lookup(&self.dereferenced, reference)?;
        Some((reference_name(reference), target.clone()))
    }

    fn dereference(&self, schema: &Value) -> Value {
        dereference(&self.bundled, schema, &mut Vec::new())
    }
}

fn parse_json(content: &str, path: &Path) -> Result<Value> {
    serde_json::from_str(content).map_err(|e| Error::ParseError {
        file: path.to_path_buf(),
        message: e.to_string(),
    })
}

fn parse_yaml(content: &str, path: &Path) -> Result<Value> {
    serde_yaml::from_str(content).map_err(|e| Error::ParseError {
        file: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Follows a local `#/...` reference inside `root`.
pub fn lookup<'a>(root: &'a Value, reference: &str) -> Option<&'a Value> {
    let pointer = reference.strip_prefix('#')?;
    if pointer.is_empty() {
        return Some(root);
    }
    root.pointer(pointer)
}

/// Replaces every resolvable local `$ref` under `value` with its target.
///
/// References already being expanded higher up the current path are left in place, so a cyclic
/// schema ends in a `$ref` node instead of recursing forever. References that cannot be found
/// are left in place too.
fn dereference(root: &Value, value: &Value, stack: &mut Vec<String>) -> Value {
    match value {
        Value::Object(obj) => {
            if let Some(reference) = obj.get("$ref").and_then(Value::as_str) {
                if stack.iter().any(|r| r == reference) {
                    debug!("Leaving cyclic reference {} in place", reference);
                    return value.clone();
                }
                let Some(target) = lookup(root, reference) else {
                    warn!("Can't resolve reference {}", reference);
                    return value.clone();
                };
                stack.push(reference.to_string());
                let resolved = dereference(root, target, stack);
                stack.pop();
                return resolved;
            }

            Value::Object(
                obj.iter()
                    .map(|(key, child)| (key.clone(), dereference(root, child, stack)))
                    .collect(),
            )
        }
        Value::Array(items) => Value::Array(
            items
                .iter()
                .map(|item| dereference(root, item, stack))
                .collect(),
        ),
        other => other.clone(),
    }
}
