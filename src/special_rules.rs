//! User-supplied overrides for leaf values.
//!
//! Rules live in two optional JSON files inside the special directory: `titles.json`, keyed by a
//! schema's `title`, and `descriptions.json`, keyed by its `description`. Each entry is either a
//! fixed value or a faker call:
//!
//! ```json
//! {
//!   "Email": { "module": "internet", "type": "email" },
//!   "Country": { "value": "KR" }
//! }
//! ```
//!
//! A missing or malformed file contributes no rules; it is never an error.

use indexmap::IndexMap;
use log::{debug, warn};
use serde::Deserialize;
use serde_json::Value;
use std::fs;
use std::path::Path;

use crate::classifier::LeafMeta;

pub const TITLES_FILE: &str = "titles.json";
pub const DESCRIPTIONS_FILE: &str = "descriptions.json";

/// A single override.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum SpecialRule {
    /// Use this literal as-is.
    DirectValue { value: Value },
    /// Call `faker.<module>.<function>(options)`.
    ModuleFunctionRef {
        module: String,
        #[serde(rename = "type", alias = "function")]
        function: String,
        #[serde(default)]
        options: Option<Value>,
    },
}

/// Lookup table consulted by the generator at every leaf.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpecialRules {
    by_title: IndexMap<String, SpecialRule>,
    by_description: IndexMap<String, SpecialRule>,
}

impl SpecialRules {
    /// Loads `titles.json` and `descriptions.json` from `dir`.
    pub fn load(dir: &Path) -> Self {
        debug!("Loading special rules from {}", dir.display());
        let rules = Self {
            by_title: load_rule_file(&dir.join(TITLES_FILE)),
            by_description: load_rule_file(&dir.join(DESCRIPTIONS_FILE)),
        };
        debug!(
            "Loaded {} title rules and {} description rules",
            rules.by_title.len(),
            rules.by_description.len()
        );
        rules
    }

    pub fn with_title(mut self, title: impl Into<String>, rule: SpecialRule) -> Self {
        self.by_title.insert(title.into(), rule);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>, rule: SpecialRule) -> Self {
        self.by_description.insert(description.into(), rule);
        self
    }

    /// Title match wins over description match.
    pub fn lookup(&self, meta: &LeafMeta) -> Option<&SpecialRule> {
        meta.title
            .as_deref()
            .and_then(|title| self.by_title.get(title))
            .or_else(|| {
                meta.description
                    .as_deref()
                    .and_then(|description| self.by_description.get(description))
            })
    }

    pub fn is_empty(&self) -> bool {
        self.by_title.is_empty() && self.by_description.is_empty()
    }
}

fn load_rule_file(path: &Path) -> IndexMap<String, SpecialRule> {
    if !path.exists() {
        debug!("No special rule file at {}", path.display());
        return IndexMap::new();
    }

    let entries: IndexMap<String, Value> = match fs::read_to_string(path)
        .map_err(|e| e.to_string())
        .and_then(|content| serde_json::from_str(&content).map_err(|e| e.to_string()))
    {
        Ok(entries) => entries,
        Err(e) => {
            warn!("Failed to read special rule file {}: {}", path.display(), e);
            return IndexMap::new();
        }
    };

    entries
        .into_iter()
        .filter_map(|(key, raw)| match serde_json::from_value::<SpecialRule>(raw) {
            Ok(rule) => Some((key, rule)),
            Err(_) => {
                warn!(
                    "Ignoring special rule '{}' in {}: expected {{value}} or {{module, type}}",
                    key,
                    path.display()
                );
                None
            }
        })
        .collect()
}
