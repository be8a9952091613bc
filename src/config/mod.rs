//! Router configuration
//!
//! A router is configured from one document with four sections:
//!
//! ```yaml
//! "@concepts":    { D: [mesh_disease_id, doid] }
//! "@curie":       { DOID: doid }
//! "@vocab":       { doid: http://identifiers.org/doid }
//! "@transitions": { doid: { mesh_disease_id: { op: disease_ontology.doid_to_mesh } } }
//! ```
//!
//! Missing sections default to empty. The document may be YAML or JSON.

mod context;

pub use context::CanonicalContext;

use crate::registry::OperationName;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

const BUNDLED_CONFIG: &str = include_str!("default_router.yaml");

/// Fatal configuration errors raised while constructing a router.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid YAML configuration: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid JSON document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("malformed canonical context: {0}")]
    MalformedContext(String),
}

/// Edge payload of a transition declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionSpec {
    pub op: OperationName,
}

/// A declared direct conversion between two types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub source: String,
    pub target: String,
    pub operation: OperationName,
}

/// The static router configuration document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RouterConfig {
    #[serde(rename = "@concepts", default)]
    pub concepts: BTreeMap<String, Vec<String>>,

    #[serde(rename = "@curie", default)]
    pub curie: BTreeMap<String, String>,

    #[serde(rename = "@vocab", default)]
    pub vocab: BTreeMap<String, String>,

    #[serde(rename = "@transitions", default)]
    /// Kept in declaration order: it decides path enumeration order and
    /// which operation wins when a type pair is declared twice.
    pub transitions: IndexMap<String, IndexMap<String, TransitionSpec>>,
}

impl RouterConfig {
    /// The biomedical configuration shipped with the crate.
    pub fn bundled() -> Result<Self, ConfigError> {
        Self::from_yaml_str(BUNDLED_CONFIG)
    }

    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(s)?)
    }

    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(s)?)
    }

    /// Load from disk; `.json` files are parsed as JSON, anything else as YAML.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json_str(&content),
            _ => Self::from_yaml_str(&content),
        }
    }

    /// Flatten the nested transitions table into declared triples, in
    /// declaration order.
    pub fn transitions(&self) -> Vec<Transition> {
        self.transitions
            .iter()
            .flat_map(|(source, targets)| {
                targets.iter().map(move |(target, spec)| Transition {
                    source: source.clone(),
                    target: target.clone(),
                    operation: spec.op.clone(),
                })
            })
            .collect()
    }
}
