//! Path planning over the transition graph
//!
//! Computes operation chains between two concrete types from every
//! minimum-hop path in the graph.

mod path;
mod types;

pub use path::PathQuery;
pub use types::{PathResult, TransitionPath};
