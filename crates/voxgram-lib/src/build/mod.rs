//! Grammar building: document tree → expansion graph.
//!
//! - `builder`: rule lowering, reference resolution and the recursion bound
//! - `repeat`: `item` attribute parsing
//! - `error`: `BuildError`

mod builder;
mod error;
mod repeat;

#[cfg(test)]
mod builder_tests;

pub use builder::{BuildLimits, CompiledGrammar, build_graph};
pub use error::BuildError;
pub use repeat::{parse_mode, parse_repeat, parse_weight};
