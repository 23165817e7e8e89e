//! Semantic interpretation of a match.
//!
//! A `Scanner` replays the matched path into a `Processor`. The
//! `SemanticProcessor` turns it into an interpretation (the matched words)
//! and a `Script`, which a `ScriptEvaluator` reduces to a `Value`.

mod evaluator;
mod processor;
mod scan;
mod script;
mod value;

#[cfg(test)]
mod value_tests;

pub use evaluator::{EvalError, RawEvaluator, ScriptEvaluator};
pub use processor::{Processor, SemanticProcessor};
pub use scan::Scanner;
pub use script::{Script, ScriptOp, WildcardKind};
pub use value::Value;
