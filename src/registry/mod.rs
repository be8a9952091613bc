//! Registries built once from configuration and read-only afterwards

mod concept;
mod operation;
mod vocabulary;

pub use concept::ConceptRegistry;
pub use operation::{
    FnOperation, InvalidOperationName, Operation, OperationError, OperationName,
    OperationOutput, OperationRegistry, StaticOperationRegistry,
};
pub use vocabulary::Vocabulary;
