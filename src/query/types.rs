//! Query result structures

use crate::graph::TypeName;
use crate::registry::OperationName;

/// One shortest path through the transition graph
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionPath {
    /// Nodes from source to target (inclusive)
    pub nodes: Vec<TypeName>,
    /// Operation of each hop, in order
    pub operations: Vec<OperationName>,
}

impl TransitionPath {
    /// Path length (number of hops)
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }
}

/// Result of a path query: every minimum-hop path, or none.
#[derive(Debug, Clone, Default)]
pub struct PathResult {
    pub paths: Vec<TransitionPath>,
}

impl PathResult {
    pub fn not_found() -> Self {
        Self { paths: Vec::new() }
    }

    pub fn found(paths: Vec<TransitionPath>) -> Self {
        Self { paths }
    }

    pub fn is_found(&self) -> bool {
        !self.paths.is_empty()
    }

    /// Hop count shared by all returned paths
    pub fn length(&self) -> usize {
        self.paths.first().map(TransitionPath::len).unwrap_or(0)
    }

    /// Operation names of all paths concatenated into one flat chain.
    ///
    /// Alternative shortest paths are not kept apart: two 2-hop paths yield
    /// a 4-step chain. Use [`paths`](Self::paths) to keep them separate.
    pub fn operation_chain(&self) -> Vec<String> {
        self.paths
            .iter()
            .flat_map(|p| p.operations.iter().map(|op| op.as_str().to_string()))
            .collect()
    }
}
