//! Arena storage and subtree copying.

use voxgram_core::Symbol;

use super::node::{
    Alternative, Expansion, Item, NodeId, RuleRef, ScoredWildcard, Sequence, Tag, Token,
    Wildcard,
};

/// How `copy_subtree` treats resolved rule references.
pub enum RefCopy<'a> {
    /// Copy each reference together with its resolved target.
    Deep,
    /// Copy references without their targets and collect them for resolution.
    Defer(&'a mut Vec<NodeId>),
}

/// Flat node storage, referenced by `NodeId`.
#[derive(Debug, Clone, Default)]
pub struct ExpansionGraph {
    nodes: Vec<Expansion>,
}

impl ExpansionGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node, returning its ID.
    pub fn add_node(&mut self, node: Expansion) -> NodeId {
        let id = self.nodes.len() as NodeId;
        self.nodes.push(node);
        id
    }

    pub fn add_token(&mut self, words: impl Into<String>) -> NodeId {
        self.add_node(Expansion::Token(Token::new(words)))
    }

    pub fn add_tag(&mut self, script: impl Into<String>) -> NodeId {
        self.add_node(Expansion::Tag(Tag::new(script)))
    }

    pub fn add_sequence(&mut self, children: Vec<NodeId>) -> NodeId {
        self.add_node(Expansion::Sequence(Sequence::new(children)))
    }

    pub fn add_alternative(&mut self, items: Vec<NodeId>) -> NodeId {
        self.add_node(Expansion::Alternative(Alternative::new(items)))
    }

    pub fn add_item(&mut self, item: Item) -> NodeId {
        self.add_node(Expansion::Item(item))
    }

    pub fn add_garbage(&mut self) -> NodeId {
        self.add_node(Expansion::Garbage(Wildcard::new()))
    }

    pub fn add_scored(&mut self, model: impl Into<String>) -> NodeId {
        self.add_node(Expansion::Scored(ScoredWildcard::new(model)))
    }

    /// Get node by ID.
    pub fn node(&self, id: NodeId) -> &Expansion {
        &self.nodes[id as usize]
    }

    /// Get mutable node by ID.
    pub fn node_mut(&mut self, id: NodeId) -> &mut Expansion {
        &mut self.nodes[id as usize]
    }

    /// The reference at `id`.
    ///
    /// # Panics
    /// Panics if the node is not a `RuleRef`.
    pub fn rule_ref(&self, id: NodeId) -> &RuleRef {
        match self.node(id) {
            Expansion::RuleRef(r) => r,
            other => mismatch(id, other, "ref"),
        }
    }

    pub fn rule_ref_mut(&mut self, id: NodeId) -> &mut RuleRef {
        match self.node_mut(id) {
            Expansion::RuleRef(r) => r,
            other => mismatch(id, other, "ref"),
        }
    }

    pub(crate) fn token_mut(&mut self, id: NodeId) -> &mut Token {
        match self.node_mut(id) {
            Expansion::Token(t) => t,
            other => mismatch(id, other, "token"),
        }
    }

    pub(crate) fn tag_mut(&mut self, id: NodeId) -> &mut Tag {
        match self.node_mut(id) {
            Expansion::Tag(t) => t,
            other => mismatch(id, other, "tag"),
        }
    }

    pub(crate) fn sequence_mut(&mut self, id: NodeId) -> &mut Sequence {
        match self.node_mut(id) {
            Expansion::Sequence(s) => s,
            other => mismatch(id, other, "seq"),
        }
    }

    pub(crate) fn alternative_mut(&mut self, id: NodeId) -> &mut Alternative {
        match self.node_mut(id) {
            Expansion::Alternative(a) => a,
            other => mismatch(id, other, "alt"),
        }
    }

    pub(crate) fn item_mut(&mut self, id: NodeId) -> &mut Item {
        match self.node_mut(id) {
            Expansion::Item(i) => i,
            other => mismatch(id, other, "item"),
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterate over all nodes with their IDs.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Expansion)> {
        self.nodes.iter().enumerate().map(|(i, n)| (i as NodeId, n))
    }

    /// Copy the subtree rooted at `id` with fresh enumeration state.
    ///
    /// Top-level references and items in the copy get `scope` as their
    /// enclosing reference.
    pub fn copy_subtree(
        &mut self,
        id: NodeId,
        scope: Option<NodeId>,
        refs: &mut RefCopy<'_>,
    ) -> NodeId {
        match self.node(id) {
            Expansion::Token(t) => {
                let words = t.words.clone();
                self.add_token(words)
            }
            Expansion::Tag(t) => {
                let script = t.script.clone();
                self.add_tag(script)
            }
            Expansion::Sequence(s) => {
                let children = s.children.clone();
                let copied = children
                    .into_iter()
                    .map(|c| self.copy_subtree(c, scope, refs))
                    .collect();
                self.add_sequence(copied)
            }
            Expansion::Alternative(a) => {
                let items = a.items.clone();
                let copied = items
                    .into_iter()
                    .map(|c| self.copy_subtree(c, scope, refs))
                    .collect();
                self.add_alternative(copied)
            }
            Expansion::Item(item) => {
                let (child, min, max, mode, weight) =
                    (item.child, item.min, item.max, item.mode, item.weight);
                let child = self.copy_subtree(child, scope, refs);
                self.add_item(
                    Item::new(child, min, max)
                        .with_mode(mode)
                        .with_weight(weight)
                        .with_scope(scope),
                )
            }
            Expansion::RuleRef(r) => {
                let source = r.clone();
                let copy = self.add_node(Expansion::RuleRef(RuleRef {
                    target: None,
                    parent: scope,
                    ..source.clone()
                }));
                if source.truncated {
                    return copy;
                }
                if let RefCopy::Defer(pending) = refs {
                    pending.push(copy);
                    return copy;
                }
                if let Some(target) = source.target {
                    let target = self.copy_subtree(target, Some(copy), refs);
                    self.rule_ref_mut(copy).target = Some(target);
                }
                copy
            }
            Expansion::Garbage(_) => self.add_garbage(),
            Expansion::Scored(s) => {
                let model = s.model.clone();
                self.add_scored(model)
            }
        }
    }

    /// Number of activations of `rule` on the reference chain ending at `id`.
    ///
    /// The chain runs through `parent` links up to a reference inside a rule
    /// definition; that definition's rule counts as one more activation.
    pub fn activations(&self, id: NodeId, rule: Symbol) -> usize {
        let mut count = 0;
        let mut current = Some(id);
        let mut origin = None;
        while let Some(at) = current {
            let r = self.rule_ref(at);
            if r.rule == rule {
                count += 1;
            }
            origin = Some(r.origin);
            current = r.parent;
        }
        if origin == Some(rule) {
            count += 1;
        }
        count
    }
}

fn mismatch(id: NodeId, found: &Expansion, expected: &str) -> ! {
    panic!("N{id} is a {}, expected {expected}", found.kind())
}
