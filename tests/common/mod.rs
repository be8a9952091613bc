//! Common test utilities for router integration tests
//!
//! Provides recording mock operations and a registry covering every
//! operation of the bundled configuration.

#![allow(dead_code)]

pub mod mock_ops;

pub use mock_ops::{bundled_registry, RecordingOperation, Responder};

use rosetta::{Rosetta, RouterConfig};
use std::sync::Arc;

/// Router over the bundled configuration with mocks registered for every
/// operation. Returns the mocks so tests can inspect their calls.
pub fn bundled_router() -> (Rosetta, mock_ops::Mocks) {
    let (registry, mocks) = bundled_registry();
    let rosetta = Rosetta::builder(RouterConfig::bundled().expect("bundled config parses"))
        .operations(Arc::new(registry))
        .build()
        .expect("every bundled operation has a mock");
    (rosetta, mocks)
}
