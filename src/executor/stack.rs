//! Values carried on the execution stack

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Opaque tag marking a value as a final translated result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeMarker {
    /// Relationship the producing operation asserts (e.g. "treats")
    pub predicate: String,
    /// Free-form properties supplied by the operation
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub properties: Map<String, Value>,
}

impl EdgeMarker {
    pub fn new(predicate: impl Into<String>) -> Self {
        Self {
            predicate: predicate.into(),
            properties: Map::new(),
        }
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }
}

/// A value paired with an optional edge marker.
///
/// Untagged values are carriers: they feed the next operation and are
/// never part of the result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tagged {
    pub edge: Option<EdgeMarker>,
    pub value: Value,
}

impl Tagged {
    pub fn carrier(value: impl Into<Value>) -> Self {
        Self {
            edge: None,
            value: value.into(),
        }
    }

    pub fn edge(edge: EdgeMarker, value: impl Into<Value>) -> Self {
        Self {
            edge: Some(edge),
            value: value.into(),
        }
    }

    pub fn is_edge(&self) -> bool {
        self.edge.is_some()
    }
}

/// One entry on the execution stack: the output of one invocation.
pub type Level = Vec<Tagged>;
