//! Vocabulary and curie tables
//!
//! The vocabulary maps short type keys to canonical type strings; the curie
//! table maps identifier prefixes (`DOID`, `MESH`) to types. Both are seeded
//! from the router configuration and then overlaid with the entries of an
//! external canonical-context document, which win on key collision.

use crate::config::{CanonicalContext, RouterConfig};
use crate::graph::TypeName;
use std::collections::BTreeMap;
use tracing::debug;

#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    vocab: BTreeMap<String, TypeName>,
    curie: BTreeMap<String, TypeName>,
}

impl Vocabulary {
    /// Merge static configuration with an external canonical context.
    pub fn load(config: &RouterConfig, context: &CanonicalContext) -> Self {
        let mut vocab: BTreeMap<String, TypeName> = config
            .vocab
            .iter()
            .map(|(k, v)| (k.clone(), TypeName::from(v.as_str())))
            .collect();
        let mut curie: BTreeMap<String, TypeName> = config
            .curie
            .iter()
            .map(|(k, v)| (k.clone(), TypeName::from(v.as_str())))
            .collect();

        for (key, iri) in context.entries() {
            if let Some(previous) = vocab.insert(key.clone(), TypeName::from(iri.as_str())) {
                debug!(key = %key, previous = %previous, iri = %iri, "context overrides vocabulary entry");
            }
            curie.insert(key.clone(), TypeName::from(iri.as_str()));
        }

        Self { vocab, curie }
    }

    /// Canonical type registered under a short key.
    pub fn canonicalize(&self, short_key: &str) -> Option<&TypeName> {
        self.vocab.get(short_key)
    }

    /// Type registered under an (already upper-cased) curie prefix.
    pub fn resolve_curie(&self, prefix_upper: &str) -> Option<&TypeName> {
        self.curie.get(prefix_upper)
    }

    /// All vocabulary entries, ordered by key
    pub fn entries(&self) -> impl Iterator<Item = (&str, &TypeName)> {
        self.vocab.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// All curie entries, ordered by prefix
    pub fn curies(&self) -> impl Iterator<Item = (&str, &TypeName)> {
        self.curie.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.vocab.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vocab.is_empty()
    }
}
