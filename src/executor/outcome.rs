//! Translation outcome and the failures recorded along the way
//!
//! Nothing here is raised to the caller. Every failure is absorbed where it
//! happens and recorded so callers can still observe and count them.

use super::stack::Tagged;
use crate::graph::TypeName;
use crate::registry::OperationError;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// Which side of a translation a type hint belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeRole {
    Source,
    Destination,
}

impl std::fmt::Display for TypeRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Source => write!(f, "source"),
            Self::Destination => write!(f, "destination"),
        }
    }
}

/// A non-fatal failure recorded during one translation.
#[derive(Debug, Error)]
pub enum TranslationFailure {
    #[error("could not resolve {role} type (hint: {hint:?})")]
    TypeResolution { role: TypeRole, hint: Option<String> },

    #[error("no transition path from {from} to {to}")]
    PathNotFound { from: TypeName, to: TypeName },

    #[error("operation not found: {operation}")]
    OperationLookup { operation: String },

    #[error("operation {operation} failed on {input}: {error}")]
    OperationInvocation {
        operation: String,
        input: Value,
        #[source]
        error: OperationError,
    },

    #[error("operation {operation} timed out after {after:?} on {input}")]
    Timeout {
        operation: String,
        input: Value,
        after: Duration,
    },

    #[error("operation {operation} had no inputs to consume")]
    NoInputs { operation: String },

    #[error("translation cancelled with {remaining_steps} step(s) remaining")]
    Cancelled { remaining_steps: usize },
}

/// Everything one `translate` call produced.
#[derive(Debug, Default)]
pub struct TranslationOutcome {
    /// Resolved source type, if any
    pub source_type: Option<TypeName>,
    /// Resolved destination type, if any
    pub dest_type: Option<TypeName>,
    /// The operation chain that was planned
    pub chain: Vec<String>,
    /// Edge-tagged pairs collected from every level, in push order
    pub results: Vec<Tagged>,
    /// Failures absorbed along the way
    pub failures: Vec<TranslationFailure>,
    /// Number of operation invocations attempted
    pub invocations: usize,
}

impl TranslationOutcome {
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// True if nothing failed (an empty result may still be complete)
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    /// Result values without their edge markers
    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.results.iter().map(|r| &r.value)
    }

    /// Number of invocations that raised an error or timed out
    pub fn failed_invocations(&self) -> usize {
        self.failures
            .iter()
            .filter(|f| {
                matches!(
                    f,
                    TranslationFailure::OperationInvocation { .. } | TranslationFailure::Timeout { .. }
                )
            })
            .count()
    }
}
