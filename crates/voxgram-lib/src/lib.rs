//! voxgram: matching spoken-language utterances against SRGS grammars.
//!
//! A grammar document is built into an expansion graph (`build`), matched
//! by depth-first enumeration with backtracking (`engine`), and a match can
//! be replayed into a semantic interpretation (`semantics`). `Grammar` ties
//! these together.
//!
//! # Example
//!
//! ```
//! use voxgram_lib::{Grammar, MatchError, MatchMode, SemanticProcessor};
//!
//! let mut grammar = Grammar::from_xml(r##"
//!     <grammar root="intro">
//!       <rule id="intro">my name is <ruleref uri="#name"/></rule>
//!       <rule id="name"><one-of><item>rob</item><item>kaustav</item></one-of></rule>
//!     </grammar>
//! "##).expect("valid grammar");
//!
//! let mut processor = SemanticProcessor::default();
//! grammar.get_match("My name is Rob", &mut processor).expect("matches");
//! assert_eq!(processor.get_interpretation(), "my name is rob");
//!
//! assert_eq!(grammar.check("my name", MatchMode::Exact), Err(MatchError::PrefixOnly));
//! ```

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod build;
pub mod engine;
pub mod grammar;
pub mod graph;
pub mod semantics;

pub use build::BuildError;
pub use engine::{MatchError, MatchMode, PrintTracer, Scorer, Tracer, UniformScorer, Verbosity};
pub use grammar::{Grammar, GrammarBuilder, GrammarOptions};
pub use semantics::{
    EvalError, Processor, RawEvaluator, Script, ScriptEvaluator, ScriptOp, SemanticProcessor,
    Value, WildcardKind,
};
pub use voxgram_core::{Colors, DocumentError, Element, normalize};

/// Errors from loading a grammar or interpreting an utterance.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("cannot read grammar document: {0}")]
    Document(#[from] DocumentError),

    #[error("invalid grammar: {0}")]
    Build(#[from] BuildError),

    #[error(transparent)]
    Match(#[from] MatchError),

    #[error("semantic evaluation failed: {0}")]
    Eval(#[from] EvalError),
}

/// Result type for grammar operations.
pub type Result<T> = std::result::Result<T, Error>;
