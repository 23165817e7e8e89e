//! The grammar facade.
//!
//! A `Grammar` owns the expansion graph of one loaded document and answers
//! prefix, match and interpretation queries. Every entry point normalizes
//! its input first.
//!
//! ```
//! use voxgram_lib::Grammar;
//!
//! let mut grammar = Grammar::from_xml(r#"
//!     <grammar root="animal">
//!       <rule id="animal">i am an <one-of><item>antler</item><item>aardvark</item></one-of></rule>
//!     </grammar>
//! "#).expect("valid grammar");
//!
//! assert!(grammar.has_match("I am an Antler"));
//! assert!(grammar.has_prefix("i am an"));
//! assert!(!grammar.has_match("i am an"));
//! ```

mod options;


use std::fmt;
use std::sync::Arc;

use voxgram_core::{Element, Interner, normalize, parse_xml};

use crate::Result;
use crate::build::{BuildError, CompiledGrammar, build_graph};
use crate::engine::{MatchError, MatchMode, Matcher, NoopTracer, Scorer, Tracer, UniformScorer};
use crate::graph::{ExpansionGraph, GraphPrinter};
use crate::semantics::{Processor, Scanner};

pub use options::GrammarOptions;

/// A loaded grammar, ready for matching.
///
/// Matching mutates per-node state, so queries take `&mut self`. Clone the
/// grammar to match from several threads; clones share only the scorer.
#[derive(Clone)]
pub struct Grammar {
    compiled: CompiledGrammar,
    options: GrammarOptions,
    scorer: Arc<dyn Scorer>,
}

/// Configures options and the scorer before building a `Grammar`.
#[derive(Clone)]
pub struct GrammarBuilder {
    options: GrammarOptions,
    scorer: Arc<dyn Scorer>,
}

impl Default for GrammarBuilder {
    fn default() -> Self {
        Self {
            options: GrammarOptions::default(),
            scorer: Arc::new(UniformScorer::DEFAULT),
        }
    }
}

impl GrammarBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(mut self, options: GrammarOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_scorer(mut self, scorer: impl Scorer + 'static) -> Self {
        self.scorer = Arc::new(scorer);
        self
    }

    pub fn build(self, document: &Element) -> std::result::Result<Grammar, BuildError> {
        let compiled = build_graph(document, self.options.build_limits())?;
        Ok(Grammar {
            compiled,
            options: self.options,
            scorer: self.scorer,
        })
    }

    /// Read an XML grammar document and build it.
    pub fn build_xml(self, src: &str) -> Result<Grammar> {
        let document = parse_xml(src)?;
        Ok(self.build(&document)?)
    }
}

impl Grammar {
    pub fn builder() -> GrammarBuilder {
        GrammarBuilder::new()
    }

    /// Load an XML grammar with default options.
    pub fn from_xml(src: &str) -> Result<Self> {
        GrammarBuilder::new().build_xml(src)
    }

    pub fn from_document(document: &Element) -> std::result::Result<Self, BuildError> {
        GrammarBuilder::new().build(document)
    }

    /// True if `text` is a complete utterance or the start of one.
    pub fn has_prefix(&mut self, text: &str) -> bool {
        self.check(text, MatchMode::Prefix).is_ok()
    }

    /// True if `text` is a complete utterance.
    pub fn has_match(&mut self, text: &str) -> bool {
        self.check(text, MatchMode::Exact).is_ok()
    }

    /// Like `has_prefix`/`has_match`, but reports why `text` was rejected.
    pub fn check(&mut self, text: &str, mode: MatchMode) -> std::result::Result<(), MatchError> {
        let input = normalize(text);
        self.run(&input, mode, NoopTracer)
    }

    /// Match `text` exactly and replay the matched path into `processor`.
    pub fn get_match<P: Processor + ?Sized>(
        &mut self,
        text: &str,
        processor: &mut P,
    ) -> std::result::Result<(), MatchError> {
        let input = normalize(text);
        self.run(&input, MatchMode::Exact, NoopTracer)?;

        let root = self.compiled.root_node();
        let rule = self.compiled.interner.resolve(self.compiled.root);
        processor.begin_root();
        processor.push_scope();
        Scanner::new(&self.compiled.graph, &self.compiled.interner, &input).scan(root, processor);
        processor.pop_scope(rule);
        processor.bind_root(rule);
        Ok(())
    }

    /// Same enumeration as `check`, reporting every step to `tracer`.
    ///
    /// Remainder offsets refer to `normalize(text)`.
    pub fn trace<T: Tracer>(
        &mut self,
        text: &str,
        mode: MatchMode,
        tracer: T,
    ) -> std::result::Result<(), MatchError> {
        let input = normalize(text);
        self.run(&input, mode, tracer)
    }

    /// Root rule id.
    pub fn root(&self) -> &str {
        self.compiled.interner.resolve(self.compiled.root)
    }

    /// Rule ids in document order.
    pub fn rules(&self) -> impl Iterator<Item = &str> {
        self.compiled
            .rules
            .keys()
            .map(|rule| self.compiled.interner.resolve(*rule))
    }

    pub fn options(&self) -> &GrammarOptions {
        &self.options
    }

    pub fn graph(&self) -> &ExpansionGraph {
        &self.compiled.graph
    }

    pub fn interner(&self) -> &Interner {
        &self.compiled.interner
    }

    /// Expansion graph listing, rule entry points first.
    pub fn dump(&self) -> String {
        let rules = self.compiled.rules.iter().map(|(rule, node)| (*rule, *node));
        GraphPrinter::new(&self.compiled.graph, &self.compiled.interner)
            .with_rules(rules)
            .dump()
    }

    /// Enumerate until a path consumes all of `input`.
    fn run<T: Tracer>(
        &mut self,
        input: &str,
        mode: MatchMode,
        tracer: T,
    ) -> std::result::Result<(), MatchError> {
        let root = self.compiled.root_node();
        let mut matcher = Matcher::new(&mut self.compiled.graph, input, mode)
            .with_scorer(self.scorer.as_ref())
            .with_limits(self.options.match_limits())
            .with_tracer(tracer);

        matcher.begin(root);
        loop {
            if matcher.next(root)?.is_empty() {
                return Ok(());
            }
        }
    }
}

impl fmt::Debug for Grammar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Grammar")
            .field("root", &self.root())
            .field("nodes", &self.compiled.graph.len())
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}
