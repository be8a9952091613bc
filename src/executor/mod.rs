//! Translation executor: drives an operation chain over an input value
//!
//! Execution keeps a stack of levels. Each step feeds the top level into
//! the step's operation, one invocation per pair, and pushes each result as
//! a new level (fan-out). A top level whose first entry is an untagged
//! carrier is popped before it is consumed; edge-tagged levels stay.
//!
//! Failures never abort the call. A missing operation skips its step; a
//! failed invocation skips that one input. Every edge-tagged pair from every
//! level ever pushed is returned.

mod cancel;
mod outcome;
mod stack;

pub use cancel::CancellationToken;
pub use outcome::{TranslationFailure, TranslationOutcome, TypeRole};
pub use stack::{EdgeMarker, Level, Tagged};

use crate::registry::{Operation, OperationRegistry};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, error, warn};

/// Per-call execution controls.
#[derive(Debug, Clone, Default)]
pub struct TranslateOptions {
    /// Deadline applied to each individual invocation
    pub step_timeout: Option<Duration>,
    /// Cancellation checked between invocations and raced against each one
    pub cancellation: Option<CancellationToken>,
}

impl TranslateOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step_timeout(mut self, timeout: Duration) -> Self {
        self.step_timeout = Some(timeout);
        self
    }

    pub fn cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }

    fn is_cancelled(&self) -> bool {
        self.cancellation
            .as_ref()
            .map(CancellationToken::is_cancelled)
            .unwrap_or(false)
    }
}

/// What running a chain produced.
#[derive(Debug, Default)]
pub struct Execution {
    pub results: Vec<Tagged>,
    pub failures: Vec<TranslationFailure>,
    pub invocations: usize,
}

/// Runs operation chains against one registry.
pub struct TranslationExecutor<'a> {
    registry: &'a dyn OperationRegistry,
    options: &'a TranslateOptions,
}

impl<'a> TranslationExecutor<'a> {
    pub fn new(registry: &'a dyn OperationRegistry, options: &'a TranslateOptions) -> Self {
        Self { registry, options }
    }

    /// Run `chain` starting from `(none, thing)`.
    pub async fn execute(&self, chain: &[String], thing: Value) -> Execution {
        let mut execution = Execution::default();

        // Every level ever pushed, in push order; the stack indexes into it.
        let mut levels: Vec<Level> = vec![vec![Tagged::carrier(thing)]];
        let mut stack: Vec<usize> = vec![0];

        'chain: for (step, name) in chain.iter().enumerate() {
            if self.options.is_cancelled() {
                execution.failures.push(TranslationFailure::Cancelled {
                    remaining_steps: chain.len() - step,
                });
                break;
            }

            let Some(operation) = self.registry.resolve(name) else {
                warn!(op = %name, "operation not found in registry; skipping step");
                execution.failures.push(TranslationFailure::OperationLookup {
                    operation: name.clone(),
                });
                continue;
            };

            let top = match stack.last() {
                Some(&top) if !levels[top].is_empty() => top,
                _ => {
                    debug!(op = %name, "no inputs on the stack");
                    execution.failures.push(TranslationFailure::NoInputs {
                        operation: name.clone(),
                    });
                    continue;
                }
            };
            if !levels[top][0].is_edge() {
                stack.pop();
            }

            let inputs: Vec<Value> = levels[top].iter().map(|pair| pair.value.clone()).collect();
            for input in inputs {
                if self.options.is_cancelled() {
                    execution.failures.push(TranslationFailure::Cancelled {
                        remaining_steps: chain.len() - step,
                    });
                    break 'chain;
                }

                execution.invocations += 1;
                debug!(op = %name, input = %input, "invoke");
                match self.invoke(&*operation, name, input, chain.len() - step).await {
                    Ok(level) => {
                        debug!(op = %name, produced = level.len(), "invoke =>");
                        levels.push(level);
                        stack.push(levels.len() - 1);
                    }
                    Err(failure @ TranslationFailure::Cancelled { .. }) => {
                        execution.failures.push(failure);
                        break 'chain;
                    }
                    Err(failure) => execution.failures.push(failure),
                }
            }
        }

        execution.results = levels
            .into_iter()
            .flatten()
            .filter(Tagged::is_edge)
            .collect();
        execution
    }

    /// One invocation under the optional per-step deadline, interrupted
    /// if the translation is cancelled while it runs.
    async fn invoke(
        &self,
        operation: &dyn Operation,
        name: &str,
        input: Value,
        remaining_steps: usize,
    ) -> Result<Level, TranslationFailure> {
        let completed = {
            let call = async {
                let call = operation.invoke(&input);
                match self.options.step_timeout {
                    Some(after) => tokio::time::timeout(after, call).await.map_err(|_| after),
                    None => Ok(call.await),
                }
            };
            match &self.options.cancellation {
                Some(token) => tokio::select! {
                    biased;
                    completed = call => Some(completed),
                    _ = token.cancelled() => None,
                },
                None => Some(call.await),
            }
        };

        let Some(completed) = completed else {
            warn!(op = %name, input = %input, "translation cancelled during invocation");
            return Err(TranslationFailure::Cancelled { remaining_steps });
        };

        let result = match completed {
            Ok(result) => result,
            Err(after) => {
                warn!(op = %name, input = %input, ?after, "operation timed out");
                return Err(TranslationFailure::Timeout {
                    operation: name.to_string(),
                    input,
                    after,
                });
            }
        };

        result.map(|output| output.into_level()).map_err(|e| {
            error!(op = %name, input = %input, error = %e, error_debug = ?e, "operation failed");
            TranslationFailure::OperationInvocation {
                operation: name.to_string(),
                input,
                error: e,
            }
        })
    }
}
