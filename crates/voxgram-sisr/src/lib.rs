//! ECMAScript-style semantic tags for voxgram grammars.
//!
//! Tag bodies are parsed into a small statement language (`var`,
//! assignment, arithmetic, comparisons, member access and a handful of
//! conversion functions) and run against per-rule scopes. Plug
//! [`SisrEvaluator`] into a `SemanticProcessor` to get structured results:
//!
//! ```
//! use voxgram_lib::{Grammar, SemanticProcessor, Value};
//! use voxgram_sisr::SisrEvaluator;
//!
//! let mut grammar = Grammar::from_xml(r##"
//!     <grammar root="age">
//!       <rule id="age">i am <ruleref uri="#n"/> <tag>out = rules.n.out * 2</tag></rule>
//!       <rule id="n"><one-of><item>ten<tag>out = 10</tag></item></one-of></rule>
//!     </grammar>
//! "##).expect("valid grammar");
//!
//! let mut processor = SemanticProcessor::new(SisrEvaluator::new());
//! grammar.get_match("i am ten", &mut processor).expect("matches");
//! assert_eq!(processor.get_instance(), Ok(Value::Number(20.0)));
//! ```

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod ast;
mod evaluator;
mod interp;
pub mod lexer;
pub mod parser;


pub use evaluator::SisrEvaluator;
pub use parser::parse;
