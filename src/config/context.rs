//! External canonical-context document (JSON-LD style `@context`)

use super::ConfigError;
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;

/// Key → canonical IRI entries merged over the static curie and vocabulary
/// tables at load time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CanonicalContext {
    entries: BTreeMap<String, String>,
}

impl CanonicalContext {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parse a context document.
    ///
    /// Uses the `@context` object when present, the top-level object
    /// otherwise. String values are IRIs; object values contribute their
    /// `@id`. Anything else is skipped.
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let document: Value = serde_json::from_str(s)?;
        Self::from_value(&document)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&content)
    }

    pub fn from_value(document: &Value) -> Result<Self, ConfigError> {
        let top = document.as_object().ok_or_else(|| {
            ConfigError::MalformedContext("document is not a JSON object".to_string())
        })?;

        let context = match top.get("@context") {
            Some(Value::Object(inner)) => inner,
            Some(_) => {
                return Err(ConfigError::MalformedContext(
                    "@context is not an object".to_string(),
                ))
            }
            None => top,
        };

        let mut entries = BTreeMap::new();
        for (key, value) in context {
            match value {
                Value::String(iri) => {
                    entries.insert(key.clone(), iri.clone());
                }
                Value::Object(def) => match def.get("@id").and_then(Value::as_str) {
                    Some(iri) => {
                        entries.insert(key.clone(), iri.to_string());
                    }
                    None => debug!(key = %key, "context term without @id skipped"),
                },
                _ => debug!(key = %key, "non-string context term skipped"),
            }
        }

        Ok(Self { entries })
    }

    /// Builder-style insertion, mostly for tests and embedding callers.
    pub fn with_entry(mut self, key: impl Into<String>, iri: impl Into<String>) -> Self {
        self.entries.insert(key.into(), iri.into());
        self
    }

    pub fn entries(&self) -> impl Iterator<Item = (&String, &String)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
