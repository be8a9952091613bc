//! Operation-labeled transition edges

use super::node::TypeName;
use crate::registry::OperationName;
use serde::{Deserialize, Serialize};

/// A directed edge: `operation` converts values of `source` into `target`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionEdge {
    /// Source node (canonical identity when one is known)
    pub source: TypeName,
    /// Target node
    pub target: TypeName,
    /// Operation that performs the conversion
    pub operation: OperationName,
}

impl TransitionEdge {
    pub fn new(source: TypeName, target: TypeName, operation: OperationName) -> Self {
        Self {
            source,
            target,
            operation,
        }
    }
}

impl std::fmt::Display for TransitionEdge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -[{}]-> {}", self.source, self.operation, self.target)
    }
}
