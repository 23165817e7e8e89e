//! Expansion graph: the in-memory form of a loaded grammar.
//!
//! Every grammar construct becomes an `Expansion` node in a flat arena,
//! referenced by `NodeId`. Nodes carry their topology (words, children, repeat
//! bounds) next to the enumeration state the matcher mutates, so each
//! reachable occurrence of a rule must be its own subtree. Copies are
//! index-based subtree clones.
//!
//! ```text
//! Element tree (document) → GrammarBuilder → ExpansionGraph → Matcher
//! ```

mod arena;
mod dump;
mod node;

#[cfg(test)]
mod arena_tests;

pub(crate) use node::ItemStep;
pub use arena::{ExpansionGraph, RefCopy};
pub use dump::GraphPrinter;
pub use node::{
    Alternative, Expansion, Item, NodeId, RepeatMode, RuleRef, ScoredWildcard, Sequence, Tag,
    Token, Wildcard,
};
