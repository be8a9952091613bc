//! Transition graph over concrete semantic types

mod edge;
mod node;
mod transitions;


pub use edge::TransitionEdge;
pub use node::{is_canonical, TypeName};
pub use transitions::TransitionGraph;
