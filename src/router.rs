//! Rosetta: the type-translation router
//!
//! Built once from configuration, then shared (behind an `Arc`) by every
//! caller. Registries and graph are read-only after [`RosettaBuilder::build`].

use crate::config::{CanonicalContext, ConfigError, RouterConfig};
use crate::executor::{
    TranslateOptions, TranslationExecutor, TranslationFailure, TranslationOutcome, TypeRole,
};
use crate::graph::{TransitionGraph, TypeName};
use crate::query::{PathQuery, TransitionPath};
use crate::registry::{ConceptRegistry, OperationRegistry, StaticOperationRegistry, Vocabulary};
use crate::resolve::{identifier_of, CandidateTranslation, Thing, TypeResolver};
use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

/// Errors raised while constructing a router.
#[derive(Debug, Error)]
pub enum RouterError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("transitions reference operations missing from the registry: {}", .0.join(", "))]
    UnresolvedOperations(Vec<String>),
}

/// Builder for [`Rosetta`].
pub struct RosettaBuilder {
    config: RouterConfig,
    context: CanonicalContext,
    operations: Arc<dyn OperationRegistry>,
    require_operations: bool,
}

impl RosettaBuilder {
    /// Overlay an external canonical-context document.
    pub fn canonical_context(mut self, context: CanonicalContext) -> Self {
        self.context = context;
        self
    }

    /// Registry the executor resolves operation names against.
    pub fn operations(mut self, operations: Arc<dyn OperationRegistry>) -> Self {
        self.operations = operations;
        self
    }

    /// Skip the build-time check that every transition's operation resolves.
    /// Missing operations are then skipped per call instead.
    pub fn allow_unresolved_operations(mut self) -> Self {
        self.require_operations = false;
        self
    }

    pub fn build(self) -> Result<Rosetta, RouterError> {
        let resolver = TypeResolver::load(&self.config, &self.context);
        let graph = TransitionGraph::build(&self.config.transitions(), resolver.vocabulary());

        if self.require_operations {
            let missing: Vec<String> = graph
                .operation_names()
                .into_iter()
                .filter(|name| self.operations.resolve(name.as_str()).is_none())
                .map(|name| name.to_string())
                .collect();
            if !missing.is_empty() {
                return Err(RouterError::UnresolvedOperations(missing));
            }
        }

        debug!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            vocabulary = resolver.vocabulary().len(),
            "router built"
        );

        Ok(Rosetta {
            resolver,
            graph,
            operations: self.operations,
        })
    }
}

/// The type-translation router.
pub struct Rosetta {
    resolver: TypeResolver,
    graph: TransitionGraph,
    operations: Arc<dyn OperationRegistry>,
}

impl Rosetta {
    /// Start building a router from a configuration document.
    ///
    /// Defaults: empty canonical context, empty operation registry, and
    /// operation validation on.
    pub fn builder(config: RouterConfig) -> RosettaBuilder {
        RosettaBuilder {
            config,
            context: CanonicalContext::empty(),
            operations: Arc::new(StaticOperationRegistry::new()),
            require_operations: true,
        }
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        self.resolver.vocabulary()
    }

    pub fn concepts(&self) -> &ConceptRegistry {
        self.resolver.concepts()
    }

    pub fn graph(&self) -> &TransitionGraph {
        &self.graph
    }

    /// See [`TypeResolver::guess_type`].
    pub fn guess_type(&self, identifier: Option<&str>, hint: Option<&str>) -> Option<TypeName> {
        self.resolver.guess_type(identifier, hint)
    }

    /// See [`TypeResolver::map_concept_types`].
    pub fn map_concept_types(&self, thing: Option<&Thing>, concept_code: Option<&str>) -> Vec<TypeName> {
        self.resolver.map_concept_types(thing, concept_code)
    }

    /// See [`TypeResolver::candidate_translations`].
    pub fn candidate_translations(&self, thing: &Thing, dest_concept: &str) -> Vec<CandidateTranslation> {
        self.resolver.candidate_translations(thing, dest_concept)
    }

    /// Operation names along every shortest path, concatenated.
    pub fn get_transitions(&self, source: &str, dest: &str) -> Vec<String> {
        PathQuery::between(source, dest)
            .execute(&self.graph)
            .operation_chain()
    }

    /// Every shortest path, each with its own chain.
    pub fn transition_paths(&self, source: &str, dest: &str) -> Vec<TransitionPath> {
        PathQuery::between(source, dest).execute(&self.graph).paths
    }

    /// Translate `thing` from `source` to `dest` with default options.
    ///
    /// Returns `None` only when `thing` is absent (missing, null or empty).
    pub async fn translate(
        &self,
        thing: Option<&Value>,
        source: Option<&str>,
        dest: Option<&str>,
    ) -> Option<TranslationOutcome> {
        self.translate_with(thing, source, dest, &TranslateOptions::default())
            .await
    }

    /// Translate with a per-invocation deadline and/or cancellation.
    pub async fn translate_with(
        &self,
        thing: Option<&Value>,
        source: Option<&str>,
        dest: Option<&str>,
        options: &TranslateOptions,
    ) -> Option<TranslationOutcome> {
        let thing = thing.filter(|t| !is_absent(t))?;

        let mut outcome = TranslationOutcome {
            source_type: self.guess_type(identifier_of(thing), source),
            dest_type: self.guess_type(None, dest),
            ..Default::default()
        };

        let (source_type, dest_type) = match (outcome.source_type.clone(), outcome.dest_type.clone()) {
            (Some(source_type), Some(dest_type)) => (source_type, dest_type),
            (source_type, dest_type) => {
                if source_type.is_none() {
                    outcome.failures.push(TranslationFailure::TypeResolution {
                        role: TypeRole::Source,
                        hint: source.map(str::to_string),
                    });
                }
                if dest_type.is_none() {
                    outcome.failures.push(TranslationFailure::TypeResolution {
                        role: TypeRole::Destination,
                        hint: dest.map(str::to_string),
                    });
                }
                return Some(outcome);
            }
        };

        outcome.chain = self.get_transitions(source_type.as_str(), dest_type.as_str());
        if outcome.chain.is_empty() {
            if source_type != dest_type {
                outcome.failures.push(TranslationFailure::PathNotFound {
                    from: source_type,
                    to: dest_type,
                });
            }
            return Some(outcome);
        }

        debug!(
            source = %source_type,
            dest = %dest_type,
            steps = outcome.chain.len(),
            chain = ?outcome.chain,
            "transitions"
        );

        let execution = TranslationExecutor::new(&*self.operations, options)
            .execute(&outcome.chain, thing.clone())
            .await;

        outcome.results = execution.results;
        outcome.failures.extend(execution.failures);
        outcome.invocations = execution.invocations;
        Some(outcome)
    }
}

impl std::fmt::Debug for Rosetta {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rosetta")
            .field("nodes", &self.graph.node_count())
            .field("edges", &self.graph.edge_count())
            .finish()
    }
}

fn is_absent(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}
