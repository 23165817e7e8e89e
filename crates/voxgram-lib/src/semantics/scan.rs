//! Replay of the last successful match path.

use voxgram_core::Interner;

use crate::graph::{Expansion, ExpansionGraph, NodeId, Wildcard};

use super::{Processor, WildcardKind};

/// Walks the nodes of a finished match in input order.
///
/// Reads the enumeration state left behind by the last successful `Next`,
/// so it must run before the graph is matched again.
pub struct Scanner<'a> {
    graph: &'a ExpansionGraph,
    interner: &'a Interner,
    /// Normalized input of the match.
    input: &'a str,
}

impl<'a> Scanner<'a> {
    pub fn new(graph: &'a ExpansionGraph, interner: &'a Interner, input: &'a str) -> Self {
        Self {
            graph,
            interner,
            input,
        }
    }

    pub fn scan<P: Processor + ?Sized>(&self, id: NodeId, processor: &mut P) {
        match self.graph.node(id) {
            Expansion::Token(t) => {
                if !t.is_epsilon() {
                    processor.append_words(&t.words);
                }
            }
            Expansion::Tag(t) => processor.append_tag(&t.script),
            Expansion::Sequence(s) => {
                for &child in &s.children {
                    self.scan(child, processor);
                }
            }
            Expansion::Alternative(a) => {
                if let Some(&chosen) = a.items.get(a.current) {
                    self.scan(chosen, processor);
                }
            }
            Expansion::Item(item) => {
                for &rep in &item.reps[..item.ends.len()] {
                    self.scan(rep, processor);
                }
            }
            Expansion::RuleRef(r) => {
                if let Some(target) = r.target {
                    processor.push_scope();
                    self.scan(target, processor);
                    processor.pop_scope(self.interner.resolve(r.rule));
                }
            }
            Expansion::Garbage(span) => self.wildcard(WildcardKind::Garbage, span, processor),
            Expansion::Scored(s) => self.wildcard(WildcardKind::Scored, &s.span, processor),
        }
    }

    fn wildcard<P: Processor + ?Sized>(&self, kind: WildcardKind, span: &Wildcard, processor: &mut P) {
        let text = self.input[span.start..span.cursor].trim_end();
        processor.capture(kind, text);
        processor.append_words(text);
    }
}
