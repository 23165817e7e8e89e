//! Dump helpers for graph inspection and testing.

use std::fmt::Write;

use voxgram_core::{Interner, Symbol};

use super::{Expansion, ExpansionGraph, NodeId, RepeatMode};

/// Printer for `ExpansionGraph`, one line per node.
pub struct GraphPrinter<'a> {
    graph: &'a ExpansionGraph,
    interner: &'a Interner,
    rules: Vec<(Symbol, NodeId)>,
}

impl<'a> GraphPrinter<'a> {
    pub fn new(graph: &'a ExpansionGraph, interner: &'a Interner) -> Self {
        Self {
            graph,
            interner,
            rules: Vec::new(),
        }
    }

    /// Print `name = N<id>` header lines for these rule definitions.
    pub fn with_rules(mut self, rules: impl IntoIterator<Item = (Symbol, NodeId)>) -> Self {
        self.rules = rules.into_iter().collect();
        self
    }

    pub fn dump(&self) -> String {
        let mut out = String::new();
        self.format(&mut out).expect("String write never fails");
        out
    }

    fn format(&self, w: &mut String) -> std::fmt::Result {
        for (rule, entry) in &self.rules {
            writeln!(w, "{} = N{}", self.interner.resolve(*rule), entry)?;
        }
        if !self.rules.is_empty() {
            writeln!(w)?;
        }

        for (id, node) in self.graph.iter() {
            write!(w, "N{}: ", id)?;
            self.format_node(w, node)?;
            writeln!(w)?;
        }
        Ok(())
    }

    fn format_node(&self, w: &mut String, node: &Expansion) -> std::fmt::Result {
        match node {
            Expansion::Token(t) if t.is_epsilon() => write!(w, "ε"),
            Expansion::Token(t) => write!(w, "token {:?}", t.words),
            Expansion::Tag(t) => write!(w, "tag {:?}", t.script),
            Expansion::Sequence(s) => {
                write!(w, "seq ")?;
                format_ids(w, &s.children)
            }
            Expansion::Alternative(a) => {
                write!(w, "alt ")?;
                format_ids(w, &a.items)
            }
            Expansion::Item(item) => {
                write!(w, "item N{} {{{},{}}}", item.child, item.min, item.max)?;
                if item.mode != RepeatMode::Normal {
                    write!(w, " {}", item.mode.as_str())?;
                }
                if let Some(weight) = item.weight {
                    write!(w, " weight={}", weight)?;
                }
                Ok(())
            }
            Expansion::RuleRef(r) => {
                write!(w, "ref #{}", self.interner.resolve(r.rule))?;
                match r.target {
                    Some(target) => write!(w, " → N{}", target),
                    None if r.truncated => write!(w, " ✗"),
                    None => write!(w, " → ?"),
                }
            }
            Expansion::Garbage(_) => write!(w, "garbage"),
            Expansion::Scored(s) => write!(w, "slm {:?}", s.model),
        }
    }
}

fn format_ids(w: &mut String, ids: &[NodeId]) -> std::fmt::Result {
    write!(w, "[")?;
    for (i, id) in ids.iter().enumerate() {
        if i > 0 {
            write!(w, ", ")?;
        }
        write!(w, "N{}", id)?;
    }
    write!(w, "]")
}
