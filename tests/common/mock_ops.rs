//! Recording mock operations
//!
//! Each mock records every input it is invoked with and answers from a
//! deterministic responder, so tests can assert both on what the router
//! returned and on exactly which calls it made.

use async_trait::async_trait;
use rosetta::{
    EdgeMarker, Operation, OperationError, OperationName, OperationOutput, StaticOperationRegistry,
    Tagged,
};
use serde_json::{json, Value};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

pub type Responder = Box<dyn Fn(&Value) -> Result<OperationOutput, OperationError> + Send + Sync>;

pub struct RecordingOperation {
    calls: Mutex<Vec<Value>>,
    respond: Responder,
}

impl RecordingOperation {
    pub fn new(respond: Responder) -> Arc<Self> {
        Arc::new(Self {
            calls: Mutex::new(Vec::new()),
            respond,
        })
    }

    /// Answers every input with one edge-tagged `"<predicate>:<input>"`.
    pub fn tagging(predicate: &'static str) -> Arc<Self> {
        Self::new(Box::new(move |input: &Value| {
            let value = format!("{}:{}", predicate, input.as_str().unwrap_or_default());
            Ok(Tagged::edge(EdgeMarker::new(predicate), json!(value)).into())
        }))
    }

    pub fn calls(&self) -> Vec<Value> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl Operation for RecordingOperation {
    async fn invoke(&self, input: &Value) -> Result<OperationOutput, OperationError> {
        self.calls.lock().unwrap().push(input.clone());
        (self.respond)(input)
    }
}

/// Mocks keyed by dotted operation name.
#[derive(Default)]
pub struct Mocks(BTreeMap<String, Arc<RecordingOperation>>);

impl Mocks {
    pub fn get(&self, name: &str) -> &Arc<RecordingOperation> {
        self.0
            .get(name)
            .unwrap_or_else(|| panic!("no mock registered for {name}"))
    }

    pub fn total_calls(&self) -> usize {
        self.0.values().map(|m| m.call_count()).sum()
    }

    pub fn insert(&mut self, name: &str, op: Arc<RecordingOperation>) {
        self.0.insert(name.to_string(), op);
    }

    pub fn registry(&self) -> StaticOperationRegistry {
        let mut registry = StaticOperationRegistry::new();
        for (name, op) in &self.0 {
            let op: Arc<dyn Operation> = op.clone();
            registry.register(OperationName::parse(name.clone()).unwrap(), op);
        }
        registry
    }
}

/// A registry with a mock for every operation in the bundled configuration.
///
/// `chembio.get_drugs_by_condition_graph` answers with two drugs, each
/// tagged with a `treats` edge; every other operation tags its input.
pub fn bundled_registry() -> (StaticOperationRegistry, Mocks) {
    let mut mocks = Mocks::default();
    mocks.insert(
        "chembio.get_drugs_by_condition_graph",
        RecordingOperation::new(Box::new(|_: &Value| {
            let treats = EdgeMarker::new("treats").with_property("source", "chembio");
            Ok(vec![
                Tagged::edge(treats.clone(), json!("DB00277")),
                Tagged::edge(treats, json!("DB01223")),
            ]
            .into())
        })),
    );

    for name in [
        "chemotext.disease_name_to_drug_name",
        "disease_ontology.doid_to_mesh",
        "disease_ontology.doid_to_pharos",
        "chembio.drug_name_to_gene_symbol",
        "chembio.gene_symbol_to_pathway",
        "pharos.target_to_disease",
        "hetio.gene_to_anatomy",
        "hetio.gene_to_cell",
        "biolink.gene_get_genetic_condition",
        "pharos.disease_get_gene",
        "oxo.mesh_to_other",
    ] {
        let predicate: &'static str = name.split('.').nth(1).unwrap_or(name);
        mocks.insert(name, RecordingOperation::tagging(predicate));
    }

    (mocks.registry(), mocks)
}
