//! Concept registry: broad category codes to candidate concrete types

use crate::config::RouterConfig;
use crate::graph::TypeName;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default)]
pub struct ConceptRegistry {
    concepts: BTreeMap<String, Vec<TypeName>>,
}

impl ConceptRegistry {
    pub fn load(config: &RouterConfig) -> Self {
        let concepts = config
            .concepts
            .iter()
            .map(|(code, types)| {
                (
                    code.clone(),
                    types.iter().map(|t| TypeName::from(t.as_str())).collect(),
                )
            })
            .collect();
        Self { concepts }
    }

    /// Ordered candidate types for a concept code; empty if unknown.
    pub fn candidates(&self, concept_code: &str) -> &[TypeName] {
        self.concepts
            .get(concept_code)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.concepts.keys().map(|k| k.as_str())
    }
}
