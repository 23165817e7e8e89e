//! Match enumeration over an expansion graph.
//!
//! A `Matcher` walks the graph depth-first with backtracking. Every node
//! answers `Next` with the remainder of the input after one more way of
//! matching it, so a parent can retry its children until the whole input
//! is consumed.

mod error;
mod matcher;
mod mode;
mod scorer;
mod trace;

#[cfg(test)]
mod matcher_tests;
#[cfg(test)]
mod trace_tests;

pub use error::MatchError;
pub use matcher::{MatchLimits, Matcher};
pub use mode::MatchMode;
pub use scorer::{Scorer, UniformScorer};
pub use trace::{NoopTracer, PrintTracer, Tracer, Verbosity};
