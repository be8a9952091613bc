//! Rosetta: Type-Translation Router
//!
//! Routes a biomedical identifier from one concrete data type to another by
//! planning the shortest chains of conversion operations through a directed
//! transition graph, then running those operations with fan-out.
//!
//! # Core Concepts
//!
//! - **Types**: concrete identifier types, known by a short key
//!   (`doid`) and a canonical IRI (`http://identifiers.org/doid`)
//! - **Transitions**: directed edges labeled with a `namespace.function`
//!   operation name
//! - **Operations**: external conversions supplied through an
//!   [`OperationRegistry`]; the router never calls data sources itself
//!
//! # Example
//!
//! ```
//! use rosetta::{Rosetta, RouterConfig};
//!
//! let config = RouterConfig::bundled().unwrap();
//! let rosetta = Rosetta::builder(config)
//!     .allow_unresolved_operations()
//!     .build()
//!     .unwrap();
//!
//! let chain = rosetta.get_transitions("doid", "hgnc_id");
//! assert_eq!(chain, vec!["disease_ontology.doid_to_pharos", "pharos.disease_get_gene"]);
//! ```

pub mod config;
pub mod executor;
pub mod graph;
pub mod query;
pub mod registry;
pub mod resolve;
pub mod router;

pub use config::{CanonicalContext, ConfigError, RouterConfig, Transition};
pub use executor::{
    CancellationToken, EdgeMarker, Tagged, TranslateOptions, TranslationFailure,
    TranslationOutcome, TypeRole,
};
pub use graph::{TransitionEdge, TransitionGraph, TypeName};
pub use query::{PathQuery, PathResult, TransitionPath};
pub use registry::{
    ConceptRegistry, FnOperation, Operation, OperationError, OperationName, OperationOutput,
    OperationRegistry, StaticOperationRegistry, Vocabulary,
};
pub use resolve::{CandidateTranslation, Thing, TypeResolver};
pub use router::{Rosetta, RosettaBuilder, RouterError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
