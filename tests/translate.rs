//! End-to-end translation through the router
//!
//! Run with: `cargo test --test translate`

mod common;

use common::mock_ops::Mocks;
use common::{bundled_router, RecordingOperation};
use rosetta::{
    CancellationToken, EdgeMarker, OperationError, Rosetta, RouterConfig, Tagged, TranslateOptions,
    TranslationFailure,
};
use serde_json::{json, Value};
use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

const MESH_DISEASE_ID: &str = "http://identifiers.org/mesh/disease/id";
const C2B2R_DRUG_ID: &str = "http://chem2bio2rdf.org/drugbank/resource/drugbank_drug";

fn router_from_yaml(yaml: &str, mocks: &Mocks) -> Rosetta {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(yaml.as_bytes()).unwrap();
    let config = RouterConfig::from_path(file.path()).unwrap();
    Rosetta::builder(config)
        .operations(Arc::new(mocks.registry()))
        .build()
        .unwrap()
}

// ============================================================================
// Single transition
// ============================================================================

#[tokio::test]
async fn single_transition_invokes_operation_once() {
    let mut mocks = Mocks::default();
    mocks.insert(
        "chembio.get_drugs_by_condition_graph",
        RecordingOperation::new(Box::new(|_: &Value| {
            Ok(Tagged::edge(EdgeMarker::new("treats"), json!("DB00277")).into())
        })),
    );
    let rosetta = router_from_yaml(
        r#"
"@vocab":
  mesh_disease_id: http://identifiers.org/mesh/disease/id
  c2b2r_drug_id: http://chem2bio2rdf.org/drugbank/resource/drugbank_drug
"@transitions":
  mesh_disease_id:
    c2b2r_drug_id:
      op: chembio.get_drugs_by_condition_graph
"#,
        &mocks,
    );

    let outcome = rosetta
        .translate(Some(&json!("MESH:D001249")), Some(MESH_DISEASE_ID), Some(C2B2R_DRUG_ID))
        .await
        .expect("thing is present");

    let op = mocks.get("chembio.get_drugs_by_condition_graph");
    assert_eq!(op.calls(), vec![json!("MESH:D001249")]);
    assert_eq!(outcome.invocations, 1);
    assert_eq!(outcome.results.len(), 1);
    assert_eq!(outcome.results[0].edge, Some(EdgeMarker::new("treats")));
    assert_eq!(outcome.results[0].value, json!("DB00277"));
    assert!(outcome.is_complete());
}

#[tokio::test]
async fn bundled_config_translates_disease_to_drugs() {
    let (rosetta, mocks) = bundled_router();

    let outcome = rosetta
        .translate(Some(&json!("MESH:D001249")), Some("mesh_disease_id"), Some("c2b2r_drug_id"))
        .await
        .unwrap();

    assert_eq!(outcome.source_type.as_ref().map(|t| t.as_str()), Some(MESH_DISEASE_ID));
    assert_eq!(outcome.dest_type.as_ref().map(|t| t.as_str()), Some(C2B2R_DRUG_ID));
    assert_eq!(outcome.chain, vec!["chembio.get_drugs_by_condition_graph"]);

    let values: Vec<&Value> = outcome.values().collect();
    assert_eq!(values, vec![&json!("DB00277"), &json!("DB01223")]);
    assert!(outcome.results.iter().all(|r| r.edge.as_ref().unwrap().predicate == "treats"));
    assert_eq!(mocks.total_calls(), 1);
}

#[tokio::test]
async fn object_thing_uses_its_identifier() {
    let (rosetta, mocks) = bundled_router();

    let thing = json!({"identifier": "DOID:2841", "name": "asthma"});
    let outcome = rosetta
        .translate(Some(&thing), None, Some("hgnc_id"))
        .await
        .unwrap();

    assert_eq!(
        outcome.chain,
        vec!["disease_ontology.doid_to_pharos", "pharos.disease_get_gene"]
    );
    // The whole object is what the first operation receives
    assert_eq!(mocks.get("disease_ontology.doid_to_pharos").calls(), vec![thing]);
    assert_eq!(outcome.invocations, 2);
}

// ============================================================================
// Absent input and missing paths
// ============================================================================

#[tokio::test]
async fn absent_thing_invokes_nothing() {
    let (rosetta, mocks) = bundled_router();

    assert!(rosetta.translate(None, Some("doid"), Some("hgnc_id")).await.is_none());
    assert!(rosetta.translate(Some(&Value::Null), Some("doid"), Some("hgnc_id")).await.is_none());
    assert_eq!(mocks.total_calls(), 0);
}

#[tokio::test]
async fn no_path_invokes_nothing() {
    let (rosetta, mocks) = bundled_router();

    let outcome = rosetta
        .translate(Some(&json!("DOID:2841")), None, Some("c2b2r_gene"))
        .await
        .unwrap();

    assert!(outcome.is_empty());
    assert!(outcome.chain.is_empty());
    assert!(matches!(outcome.failures[..], [TranslationFailure::PathNotFound { .. }]));
    assert_eq!(mocks.total_calls(), 0);
}

#[tokio::test]
async fn same_source_and_dest_is_an_empty_success() {
    let (rosetta, mocks) = bundled_router();

    let outcome = rosetta
        .translate(Some(&json!("DOID:2841")), None, Some("doid"))
        .await
        .unwrap();

    assert!(outcome.is_empty());
    assert!(outcome.is_complete());
    assert_eq!(mocks.total_calls(), 0);
}

// ============================================================================
// Multi-step chains
// ============================================================================

#[tokio::test]
async fn two_step_chain_keeps_every_tagged_level() {
    let (rosetta, mocks) = bundled_router();

    let outcome = rosetta
        .translate(Some(&json!("DOID:2841")), None, Some("hgnc_id"))
        .await
        .unwrap();

    assert_eq!(
        mocks.get("pharos.disease_get_gene").calls(),
        vec![json!("doid_to_pharos:DOID:2841")]
    );
    let values: Vec<&Value> = outcome.values().collect();
    assert_eq!(
        values,
        vec![
            &json!("doid_to_pharos:DOID:2841"),
            &json!("disease_get_gene:doid_to_pharos:DOID:2841"),
        ]
    );
}

#[tokio::test]
async fn alternative_shortest_paths_run_as_one_chain() {
    let mut mocks = Mocks::default();
    for name in ["x.ab", "x.ac", "x.bd", "x.cd"] {
        mocks.insert(name, RecordingOperation::tagging(&name[2..4]));
    }
    let rosetta = router_from_yaml(
        r#"
"@vocab":
  a: http://types.test/a
  b: http://types.test/b
  c: http://types.test/c
  d: http://types.test/d
"@transitions":
  a:
    b: { op: x.ab }
    c: { op: x.ac }
  b:
    d: { op: x.bd }
  c:
    d: { op: x.cd }
"#,
        &mocks,
    );

    assert_eq!(rosetta.transition_paths("a", "d").len(), 2);

    let outcome = rosetta
        .translate(Some(&json!("A:1")), Some("a"), Some("d"))
        .await
        .unwrap();

    assert_eq!(outcome.chain, vec!["x.ab", "x.bd", "x.ac", "x.cd"]);
    assert_eq!(outcome.invocations, 4);
    assert_eq!(mocks.get("x.ac").calls(), vec![json!("bd:ab:A:1")]);
    assert_eq!(outcome.results.len(), 4);
}

#[tokio::test]
async fn declaration_order_decides_chain_order() {
    let mut mocks = Mocks::default();
    for name in ["x.ab", "x.ac", "x.bd", "x.cd"] {
        mocks.insert(name, RecordingOperation::tagging(&name[2..4]));
    }
    let rosetta = router_from_yaml(
        r#"
"@vocab":
  a: http://types.test/a
  b: http://types.test/b
  c: http://types.test/c
  d: http://types.test/d
"@transitions":
  a:
    c: { op: x.ac }
    b: { op: x.ab }
  c:
    d: { op: x.cd }
  b:
    d: { op: x.bd }
"#,
        &mocks,
    );

    let outcome = rosetta
        .translate(Some(&json!("A:1")), Some("a"), Some("d"))
        .await
        .unwrap();

    assert_eq!(outcome.chain, vec!["x.ac", "x.cd", "x.ab", "x.bd"]);
    // the first path's output is what feeds the second path's first step
    assert_eq!(mocks.get("x.ab").calls(), vec![json!("cd:ac:A:1")]);
}

// ============================================================================
// Failures, deadlines, cancellation
// ============================================================================

#[tokio::test]
async fn failing_input_does_not_stop_siblings() {
    let mut mocks = Mocks::default();
    mocks.insert(
        "chembio.get_drugs_by_condition_graph",
        RecordingOperation::new(Box::new(|_: &Value| {
            let e = EdgeMarker::new("treats");
            Ok(vec![Tagged::edge(e.clone(), json!("DB1")), Tagged::edge(e, json!("DB2"))].into())
        })),
    );
    mocks.insert(
        "chembio.drug_to_target",
        RecordingOperation::new(Box::new(|input: &Value| match input.as_str() {
            Some("DB1") => Err(OperationError::Unavailable("chembio down".into())),
            Some(id) => Ok(Tagged::edge(EdgeMarker::new("targets"), json!(format!("T-{id}"))).into()),
            None => Err(OperationError::InvalidInput(input.to_string())),
        })),
    );
    let rosetta = router_from_yaml(
        r#"
"@vocab":
  disease: http://types.test/disease
  drug: http://types.test/drug
  target: http://types.test/target
"@transitions":
  disease:
    drug: { op: chembio.get_drugs_by_condition_graph }
  drug:
    target: { op: chembio.drug_to_target }
"#,
        &mocks,
    );

    let outcome = rosetta
        .translate(Some(&json!("MESH:D001249")), Some("disease"), Some("target"))
        .await
        .unwrap();

    assert_eq!(mocks.get("chembio.drug_to_target").call_count(), 2);
    assert_eq!(outcome.failed_invocations(), 1);
    let values: Vec<&Value> = outcome.values().collect();
    assert_eq!(values, vec![&json!("DB1"), &json!("DB2"), &json!("T-DB2")]);
}

#[tokio::test]
async fn cancelled_translation_records_remaining_steps() {
    let (rosetta, mocks) = bundled_router();
    let token = CancellationToken::new();
    token.cancel();

    let outcome = rosetta
        .translate_with(
            Some(&json!("DOID:2841")),
            None,
            Some("hgnc_id"),
            &TranslateOptions::new().cancellation(token),
        )
        .await
        .unwrap();

    assert!(outcome.is_empty());
    assert!(matches!(
        outcome.failures[..],
        [TranslationFailure::Cancelled { remaining_steps: 2 }]
    ));
    assert_eq!(mocks.total_calls(), 0);
}

#[tokio::test]
async fn generous_deadline_does_not_interfere() {
    let (rosetta, _mocks) = bundled_router();

    let outcome = rosetta
        .translate_with(
            Some(&json!("DOID:2841")),
            None,
            Some("hgnc_id"),
            &TranslateOptions::new().step_timeout(Duration::from_secs(5)),
        )
        .await
        .unwrap();

    assert_eq!(outcome.results.len(), 2);
    assert!(outcome.is_complete());
}
