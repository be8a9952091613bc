//! TransitionGraph: directed graph of concrete types with operation-labeled edges
//!
//! Node identity is the canonical type string whenever the vocabulary knows
//! one. Short keys used in transition declarations are kept in an alias
//! table and resolved before any lookup, so an edge declared as
//! `mesh_disease_id → c2b2r_drug_id` is reachable by either spelling.

use super::edge::TransitionEdge;
use super::node::TypeName;
use crate::config::Transition;
use crate::registry::{OperationName, Vocabulary};
use indexmap::IndexMap;
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, warn};

#[derive(Debug, Clone, Default)]
pub struct TransitionGraph {
    nodes: BTreeSet<TypeName>,
    /// Short key → canonical node
    aliases: BTreeMap<String, TypeName>,
    /// source → target → edge; one edge per ordered pair, in declaration order
    outgoing: IndexMap<TypeName, IndexMap<TypeName, TransitionEdge>>,
}

impl TransitionGraph {
    /// Build the graph from declared transitions.
    ///
    /// Every canonical vocabulary type becomes a node. Each transition adds
    /// one edge between the canonical identities of its endpoints; an
    /// endpoint without a canonical mapping is its own identity.
    pub fn build(transitions: &[Transition], vocabulary: &Vocabulary) -> Self {
        let mut graph = Self::default();

        for (_, canonical) in vocabulary.entries() {
            graph.nodes.insert(canonical.clone());
        }

        for transition in transitions {
            let source = graph.intern(&transition.source, vocabulary);
            let target = graph.intern(&transition.target, vocabulary);
            debug!(
                source = %transition.source,
                target = %transition.target,
                op = %transition.operation,
                "+edge"
            );
            graph.add_edge(TransitionEdge::new(source, target, transition.operation.clone()));
        }

        graph
    }

    /// Map a declared type to its node identity, recording short-key aliases.
    fn intern(&mut self, declared: &str, vocabulary: &Vocabulary) -> TypeName {
        let node = match vocabulary.canonicalize(declared) {
            Some(canonical) => {
                self.aliases.insert(declared.to_string(), canonical.clone());
                canonical.clone()
            }
            None => TypeName::from(declared),
        };
        self.nodes.insert(node.clone());
        node
    }

    /// Add an edge. Re-adding an identical edge is a no-op; a different
    /// operation for the same node pair replaces the earlier one in place.
    fn add_edge(&mut self, edge: TransitionEdge) {
        let targets = self.outgoing.entry(edge.source.clone()).or_default();
        let previous = targets.get(&edge.target).map(|e| e.operation.clone());
        match previous {
            Some(op) if op == edge.operation => {}
            Some(op) => {
                warn!(
                    source = %edge.source,
                    target = %edge.target,
                    replaced = %op,
                    op = %edge.operation,
                    "transition replaces an earlier operation for the same type pair"
                );
                targets.insert(edge.target.clone(), edge);
            }
            None => {
                targets.insert(edge.target.clone(), edge);
            }
        }
    }

    /// Resolve a short or canonical type name to its node.
    pub fn resolve_node(&self, name: &str) -> Option<&TypeName> {
        if let Some(node) = self.nodes.get(name) {
            return Some(node);
        }
        self.aliases.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.resolve_node(name).is_some()
    }

    /// The edge between two types, if any.
    pub fn edge(&self, source: &str, target: &str) -> Option<&TransitionEdge> {
        let source = self.resolve_node(source)?;
        let target = self.resolve_node(target)?;
        self.outgoing.get(source)?.get(target)
    }

    /// True if `source → target` exists and is labeled `operation`.
    pub fn has_edge(&self, source: &str, target: &str, operation: &str) -> bool {
        self.edge(source, target)
            .map(|e| e.operation.as_str() == operation)
            .unwrap_or(false)
    }

    /// Outgoing edges of a node, in declaration order.
    pub fn successors<'a>(&'a self, node: &TypeName) -> impl Iterator<Item = &'a TransitionEdge> + 'a {
        self.outgoing.get(node).into_iter().flat_map(|targets| targets.values())
    }

    /// All edges, in declaration order.
    pub fn edges(&self) -> impl Iterator<Item = &TransitionEdge> {
        self.outgoing.values().flat_map(|targets| targets.values())
    }

    pub fn nodes(&self) -> impl Iterator<Item = &TypeName> {
        self.nodes.iter()
    }

    /// Distinct operation names referenced by any edge.
    pub fn operation_names(&self) -> BTreeSet<&OperationName> {
        self.edges().map(|e| &e.operation).collect()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.outgoing.values().map(|targets| targets.len()).sum()
    }
}
