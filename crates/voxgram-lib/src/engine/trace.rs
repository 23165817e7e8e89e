//! Tracing infrastructure for debugging match enumeration.
//!
//! The tracer is a zero-cost abstraction. With `NoopTracer` every method is
//! an `#[inline(always)]` empty function and the calls compile away.
//! Tracing-only state (nesting, visibility) lives in the tracer itself, never
//! in the nodes.

use voxgram_core::{Colors, Interner};

use crate::graph::{Expansion, NodeId};

use super::MatchError;

/// Verbosity level for trace output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Verbosity {
    /// Terminals, wildcards and rule references: results only.
    #[default]
    Default,
    /// Every node, including `Match` resets and repetition copies.
    Verbose,
}

/// Hooks invoked by the matcher.
///
/// - `trace_match` - when a node is reset for an input offset
/// - `trace_next` - before a node computes its next remainder
/// - `trace_result` - after it did (remainder offset or error)
/// - `trace_repeat_copy` - when an item creates a copy for a new repetition
/// - `trace_rejected_span` - when a scored wildcard span falls below the floor
pub trait Tracer {
    fn trace_match(&mut self, id: NodeId, node: &Expansion, at: usize);

    fn trace_next(&mut self, id: NodeId, node: &Expansion);

    fn trace_result(&mut self, id: NodeId, node: &Expansion, result: Result<usize, MatchError>);

    fn trace_repeat_copy(&mut self, item: NodeId, repetition: usize, copy: NodeId);

    fn trace_rejected_span(&mut self, id: NodeId, span: &str, score: f64);
}

impl<T: Tracer + ?Sized> Tracer for &mut T {
    fn trace_match(&mut self, id: NodeId, node: &Expansion, at: usize) {
        (**self).trace_match(id, node, at)
    }

    fn trace_next(&mut self, id: NodeId, node: &Expansion) {
        (**self).trace_next(id, node)
    }

    fn trace_result(&mut self, id: NodeId, node: &Expansion, result: Result<usize, MatchError>) {
        (**self).trace_result(id, node, result)
    }

    fn trace_repeat_copy(&mut self, item: NodeId, repetition: usize, copy: NodeId) {
        (**self).trace_repeat_copy(item, repetition, copy)
    }

    fn trace_rejected_span(&mut self, id: NodeId, span: &str, score: f64) {
        (**self).trace_rejected_span(id, span, score)
    }
}

/// No-op tracer that gets optimized away completely.
pub struct NoopTracer;

impl Tracer for NoopTracer {
    #[inline(always)]
    fn trace_match(&mut self, _id: NodeId, _node: &Expansion, _at: usize) {}

    #[inline(always)]
    fn trace_next(&mut self, _id: NodeId, _node: &Expansion) {}

    #[inline(always)]
    fn trace_result(&mut self, _id: NodeId, _node: &Expansion, _r: Result<usize, MatchError>) {}

    #[inline(always)]
    fn trace_repeat_copy(&mut self, _item: NodeId, _repetition: usize, _copy: NodeId) {}

    #[inline(always)]
    fn trace_rejected_span(&mut self, _id: NodeId, _span: &str, _score: f64) {}
}

/// Tracer that collects indented trace lines.
pub struct PrintTracer<'a> {
    /// Normalized input, for showing remainders.
    input: &'a str,
    /// Resolves rule names.
    interner: &'a Interner,
    verbosity: Verbosity,
    lines: Vec<String>,
    /// One entry per `Next` in flight: whether its result line is shown.
    open: Vec<bool>,
    colors: Colors,
}

impl<'a> PrintTracer<'a> {
    pub fn new(
        input: &'a str,
        interner: &'a Interner,
        verbosity: Verbosity,
        colors: Colors,
    ) -> Self {
        Self {
            input,
            interner,
            verbosity,
            lines: Vec::new(),
            open: Vec::new(),
            colors,
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// All lines joined, one per line.
    pub fn dump(&self) -> String {
        let mut out = String::new();
        for line in &self.lines {
            out.push_str(line);
            out.push('\n');
        }
        out
    }

    fn is_visible(&self, node: &Expansion) -> bool {
        self.verbosity == Verbosity::Verbose
            || node.is_terminal()
            || matches!(node, Expansion::RuleRef(_))
    }

    fn indent(&self) -> String {
        "  ".repeat(self.open.iter().filter(|shown| **shown).count())
    }

    fn label(&self, id: NodeId, node: &Expansion) -> String {
        let c = &self.colors;
        let detail = match node {
            Expansion::Token(t) => format!(" {}{:?}{}", c.green, t.words, c.reset),
            Expansion::Tag(t) => format!(" {:?}", t.script),
            Expansion::RuleRef(r) => {
                format!(" {}#{}{}", c.blue, self.interner.resolve(r.rule), c.reset)
            }
            Expansion::Item(item) => format!(" {{{},{}}}", item.min, item.max),
            Expansion::Scored(s) => format!(" {:?}", s.model),
            _ => String::new(),
        };
        format!("{}N{}{} {}{}", c.dim, id, c.reset, node.kind(), detail)
    }
}

impl Tracer for PrintTracer<'_> {
    fn trace_match(&mut self, id: NodeId, node: &Expansion, at: usize) {
        if self.verbosity != Verbosity::Verbose {
            return;
        }
        let line = format!(
            "{}{} {}@{}{}",
            self.indent(),
            self.label(id, node),
            self.colors.dim,
            at,
            self.colors.reset
        );
        self.lines.push(line);
    }

    fn trace_next(&mut self, _id: NodeId, node: &Expansion) {
        let shown = self.is_visible(node);
        self.open.push(shown);
    }

    fn trace_result(&mut self, id: NodeId, node: &Expansion, result: Result<usize, MatchError>) {
        let shown = self.open.pop().unwrap_or(false);
        if !shown {
            return;
        }
        let c = self.colors;
        let outcome = match result {
            Ok(rest) => format!("{}→ {:?}{}", c.green, &self.input[rest..], c.reset),
            Err(e) => format!("{}✗ {}{}", c.red, e, c.reset),
        };
        let line = format!("{}{} {}", self.indent(), self.label(id, node), outcome);
        self.lines.push(line);
    }

    fn trace_repeat_copy(&mut self, item: NodeId, repetition: usize, copy: NodeId) {
        if self.verbosity != Verbosity::Verbose {
            return;
        }
        let c = self.colors;
        let line = format!(
            "{}{}N{} repetition {} → N{}{}",
            self.indent(),
            c.dim,
            item,
            repetition + 1,
            copy,
            c.reset
        );
        self.lines.push(line);
    }

    fn trace_rejected_span(&mut self, id: NodeId, span: &str, score: f64) {
        let c = self.colors;
        let line = format!(
            "{}{}N{}{} reject {:?} {}score {}{}",
            self.indent(),
            c.dim,
            id,
            c.reset,
            span,
            c.red,
            score,
            c.reset
        );
        self.lines.push(line);
    }
}
