//! Operation seam: the contract external conversion operations implement
//!
//! The router never performs data-source calls itself. Each transition names
//! an operation by a dotted `namespace.function` path; the registry resolves
//! that name to a typed operation the executor can invoke.

use crate::executor::{Level, Tagged};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;
use thiserror::Error;

/// A validated dotted operation name (`"namespace.function"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct OperationName(String);

/// Raised when an operation name is not of the form `namespace.function`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid operation name '{0}': expected 'namespace.function'")]
pub struct InvalidOperationName(pub String);

impl OperationName {
    /// Parse and validate a dotted operation name.
    pub fn parse(name: impl Into<String>) -> Result<Self, InvalidOperationName> {
        let name = name.into();
        match name.split_once('.') {
            Some((namespace, function)) if !namespace.is_empty() && !function.is_empty() => {
                Ok(Self(name))
            }
            _ => Err(InvalidOperationName(name)),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The part before the first dot (e.g. `"chembio"`)
    pub fn namespace(&self) -> &str {
        self.0.split_once('.').map(|(ns, _)| ns).unwrap_or(&self.0)
    }

    /// Everything after the first dot (e.g. `"get_drugs_by_condition_graph"`)
    pub fn function(&self) -> &str {
        self.0.split_once('.').map(|(_, f)| f).unwrap_or("")
    }
}

impl TryFrom<String> for OperationName {
    type Error = InvalidOperationName;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<OperationName> for String {
    fn from(name: OperationName) -> Self {
        name.0
    }
}

impl std::fmt::Display for OperationName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Errors an operation may raise while converting a value.
#[derive(Debug, Error)]
pub enum OperationError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("data source unavailable: {0}")]
    Unavailable(String),
    #[error("operation error: {0}")]
    Internal(String),
}

/// What one invocation produced: a single pair or many.
#[derive(Debug, Clone, PartialEq)]
pub enum OperationOutput {
    One(Tagged),
    Many(Vec<Tagged>),
}

impl OperationOutput {
    /// An output carrying no values.
    pub fn empty() -> Self {
        Self::Many(Vec::new())
    }

    /// Flatten into the level the executor pushes onto its stack.
    pub fn into_level(self) -> Level {
        match self {
            Self::One(pair) => vec![pair],
            Self::Many(pairs) => pairs,
        }
    }
}

impl From<Tagged> for OperationOutput {
    fn from(pair: Tagged) -> Self {
        Self::One(pair)
    }
}

impl From<Vec<Tagged>> for OperationOutput {
    fn from(pairs: Vec<Tagged>) -> Self {
        Self::Many(pairs)
    }
}

/// The contract external operations implement.
///
/// An operation converts one value of its source type into zero or more
/// values of its target type. Final results are tagged with an edge marker;
/// untagged values are only carried forward to the next step.
#[async_trait]
pub trait Operation: Send + Sync {
    async fn invoke(&self, input: &Value) -> Result<OperationOutput, OperationError>;
}

/// Adapts a plain closure into an [`Operation`].
pub struct FnOperation<F> {
    f: F,
}

impl<F> FnOperation<F>
where
    F: Fn(&Value) -> Result<OperationOutput, OperationError> + Send + Sync,
{
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

#[async_trait]
impl<F> Operation for FnOperation<F>
where
    F: Fn(&Value) -> Result<OperationOutput, OperationError> + Send + Sync,
{
    async fn invoke(&self, input: &Value) -> Result<OperationOutput, OperationError> {
        (self.f)(input)
    }
}

/// Resolves dotted operation names to callable operations.
pub trait OperationRegistry: Send + Sync {
    fn resolve(&self, name: &str) -> Option<Arc<dyn Operation>>;
}

/// In-memory registry keyed by dotted operation name.
#[derive(Default, Clone)]
pub struct StaticOperationRegistry {
    operations: BTreeMap<OperationName, Arc<dyn Operation>>,
}

impl StaticOperationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an operation under `name`, replacing any previous one.
    pub fn register(&mut self, name: OperationName, operation: Arc<dyn Operation>) {
        self.operations.insert(name, operation);
    }

    /// Register a closure under `name`.
    pub fn register_fn<F>(&mut self, name: OperationName, f: F)
    where
        F: Fn(&Value) -> Result<OperationOutput, OperationError> + Send + Sync + 'static,
    {
        self.register(name, Arc::new(FnOperation::new(f)));
    }

    /// Builder-style [`register`](Self::register).
    pub fn with(mut self, name: OperationName, operation: Arc<dyn Operation>) -> Self {
        self.register(name, operation);
        self
    }

    pub fn names(&self) -> impl Iterator<Item = &OperationName> {
        self.operations.keys()
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }
}

impl OperationRegistry for StaticOperationRegistry {
    fn resolve(&self, name: &str) -> Option<Arc<dyn Operation>> {
        self.operations.get(name).cloned()
    }
}

impl std::borrow::Borrow<str> for OperationName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for StaticOperationRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaticOperationRegistry")
            .field("operations", &self.operations.keys().collect::<Vec<_>>())
            .finish()
    }
}
