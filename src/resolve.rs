//! Type resolution: guessing concrete types for identifiers and concepts
//!
//! A thing's identifier may be a curie (`DOID:0060728`), an IRI, a name or
//! a number. Resolution prefers the curie prefix because it narrows the type
//! to one candidate; concept codes only give a list of candidates, and
//! crossing two such lists multiplies spurious hypotheses.

use crate::config::{CanonicalContext, RouterConfig};
use crate::graph::{is_canonical, TypeName};
use crate::registry::{ConceptRegistry, Vocabulary};
use serde::{Deserialize, Serialize};
use serde_json::Value;

const CURIE_DELIMITER: char = ':';

/// A caller-supplied item to translate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thing {
    pub identifier: String,
}

impl Thing {
    pub fn new(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
        }
    }
}

/// Hypothesis that `thing` of `source_type` translates to `dest_type`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateTranslation {
    pub thing: Thing,
    pub source_type: TypeName,
    pub dest_type: TypeName,
    pub description: String,
}

impl CandidateTranslation {
    pub fn new(thing: Thing, source_type: TypeName, dest_type: TypeName) -> Self {
        Self {
            thing,
            source_type,
            dest_type,
            description: String::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// The identifier a JSON value stands for: the string itself, or the
/// `identifier` (falling back to `id`) field of an object.
pub fn identifier_of(value: &Value) -> Option<&str> {
    match value {
        Value::String(s) => Some(s),
        Value::Object(map) => map
            .get("identifier")
            .or_else(|| map.get("id"))
            .and_then(Value::as_str),
        _ => None,
    }
}

/// Resolves identifiers, hints and concept codes to concrete types.
#[derive(Debug, Clone, Default)]
pub struct TypeResolver {
    vocabulary: Vocabulary,
    concepts: ConceptRegistry,
}

impl TypeResolver {
    pub fn new(vocabulary: Vocabulary, concepts: ConceptRegistry) -> Self {
        Self {
            vocabulary,
            concepts,
        }
    }

    pub fn load(config: &RouterConfig, context: &CanonicalContext) -> Self {
        Self::new(Vocabulary::load(config, context), ConceptRegistry::load(config))
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    pub fn concepts(&self) -> &ConceptRegistry {
        &self.concepts
    }

    /// Guess the concrete type of `identifier`, or canonicalize `hint`.
    ///
    /// With no hint, a curie prefix is upper-cased and looked up in the
    /// curie table; its entry becomes the hint. A short hint is then mapped
    /// through the vocabulary; a canonical hint is returned as is.
    pub fn guess_type(&self, identifier: Option<&str>, hint: Option<&str>) -> Option<TypeName> {
        let mut hint: Option<TypeName> = hint.map(TypeName::from);

        if hint.is_none() {
            if let Some((prefix, _)) = identifier.and_then(|id| id.split_once(CURIE_DELIMITER)) {
                hint = self.vocabulary.resolve_curie(&prefix.to_uppercase()).cloned();
            }
        }

        let hint = hint?;
        if is_canonical(hint.as_str()) {
            return Some(hint);
        }
        self.vocabulary.canonicalize(hint.as_str()).cloned()
    }

    /// Candidate types for a thing (by its identifier) or, without one, for
    /// a concept code. An unresolved thing yields no candidates.
    pub fn map_concept_types(&self, thing: Option<&Thing>, concept_code: Option<&str>) -> Vec<TypeName> {
        if let Some(thing) = thing {
            return self
                .guess_type(Some(&thing.identifier), None)
                .into_iter()
                .collect();
        }
        concept_code
            .map(|code| self.concepts.candidates(code).to_vec())
            .unwrap_or_default()
    }

    /// Cross product of the thing's source types and the concept's
    /// destination candidates; empty if either side is.
    pub fn candidate_translations(&self, thing: &Thing, dest_concept: &str) -> Vec<CandidateTranslation> {
        let sources = self.map_concept_types(Some(thing), None);
        let dests = self.map_concept_types(None, Some(dest_concept));

        sources
            .iter()
            .flat_map(|source| {
                dests.iter().map(move |dest| {
                    CandidateTranslation::new(thing.clone(), source.clone(), dest.clone())
                        .with_description(format!("{} -> {}", source, dest))
                })
            })
            .collect()
    }
}
