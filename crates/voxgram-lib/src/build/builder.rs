//! Lowering of `<grammar>` documents into an expansion graph.
//!
//! Each rule body is lowered once into a definition subtree. Rule references
//! never share those definitions: every reference gets its own copy, made
//! either right away (rule already lowered) or after all rules are known
//! (forward references). Copies expose new references, which are resolved
//! the same way until none are left.

use indexmap::IndexMap;
use voxgram_core::{Content, Element, Interner, Symbol, normalize};

use crate::graph::{Expansion, ExpansionGraph, Item, NodeId, RefCopy, RuleRef};

use super::BuildError;
use super::repeat::{parse_mode, parse_repeat, parse_weight};

const DEFAULT_MAX_RULE_DEPTH: usize = 12;
const DEFAULT_MAX_NODES: usize = 1_000_000;

/// Expansion bounds applied while building.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BuildLimits {
    /// Maximum nested activations of one rule on a path (default: 12).
    pub max_rule_depth: usize,
    /// Maximum graph size (default: 1,000,000 nodes).
    pub max_nodes: usize,
}

impl Default for BuildLimits {
    fn default() -> Self {
        Self {
            max_rule_depth: DEFAULT_MAX_RULE_DEPTH,
            max_nodes: DEFAULT_MAX_NODES,
        }
    }
}

/// Result of building: the graph plus the rule table.
#[derive(Debug, Clone)]
pub struct CompiledGrammar {
    pub graph: ExpansionGraph,
    pub interner: Interner,
    /// Definition subtree of each rule, in document order.
    pub rules: IndexMap<Symbol, NodeId>,
    pub root: Symbol,
}

impl CompiledGrammar {
    /// Entry node for matching: the root rule's definition.
    pub fn root_node(&self) -> NodeId {
        self.rules[&self.root]
    }
}

/// Build an expansion graph from a `<grammar>` element.
pub fn build_graph(document: &Element, limits: BuildLimits) -> Result<CompiledGrammar, BuildError> {
    if document.name != "grammar" {
        return Err(BuildError::InvalidDocument(document.name.clone()));
    }
    let root_id = match document.attr("root").map(str::trim) {
        Some(id) if !id.is_empty() => id,
        _ => return Err(BuildError::NoRoot),
    };

    let mut builder = Builder::new(limits);
    for child in document.elements() {
        match child.name.as_str() {
            "rule" => builder.lower_rule(child)?,
            "meta" | "metadata" | "lexicon" | "tag" => {}
            other => return Err(BuildError::UnknownElement(other.to_owned())),
        }
    }
    builder.resolve_forward()?;

    let root = match builder.interner.get(root_id) {
        Some(sym) if builder.rules.contains_key(&sym) => sym,
        _ => return Err(BuildError::RootNotFound(root_id.to_owned())),
    };

    Ok(CompiledGrammar {
        graph: builder.graph,
        interner: builder.interner,
        rules: builder.rules,
        root,
    })
}

struct Builder {
    graph: ExpansionGraph,
    interner: Interner,
    rules: IndexMap<Symbol, NodeId>,
    /// References to rules not lowered yet, keyed by rule in first-use order.
    forward: IndexMap<Symbol, Vec<NodeId>>,
    limits: BuildLimits,
}

impl Builder {
    fn new(limits: BuildLimits) -> Self {
        Self {
            graph: ExpansionGraph::new(),
            interner: Interner::new(),
            rules: IndexMap::new(),
            forward: IndexMap::new(),
            limits,
        }
    }

    fn lower_rule(&mut self, rule: &Element) -> Result<(), BuildError> {
        let id = match rule.attr("id").map(str::trim) {
            Some(id) if !id.is_empty() => id,
            _ => return Err(BuildError::UnidentifiableRule),
        };
        let sym = self.interner.intern(id);
        if self.rules.contains_key(&sym) {
            return Err(BuildError::DuplicateRule(id.to_owned()));
        }

        let body = self.lower_body(rule, sym)?;
        self.rules.insert(sym, body);
        self.check_size()
    }

    /// Lower the children of `element` into a sequence.
    fn lower_body(&mut self, element: &Element, origin: Symbol) -> Result<NodeId, BuildError> {
        let mut children = Vec::new();
        for content in &element.children {
            let lowered = match content {
                Content::Text(text) => {
                    let words = normalize(text);
                    if words.is_empty() {
                        continue;
                    }
                    self.graph.add_token(words)
                }
                Content::Element(child) => match self.lower_element(child, origin)? {
                    Some(id) => id,
                    None => continue,
                },
            };
            children.push(lowered);
        }
        Ok(self.graph.add_sequence(children))
    }

    fn lower_element(
        &mut self,
        element: &Element,
        origin: Symbol,
    ) -> Result<Option<NodeId>, BuildError> {
        let id = match element.name.as_str() {
            "token" => self.graph.add_token(normalize(&element.text())),
            "item" => self.lower_item(element, origin)?,
            "one-of" => self.lower_choice(element, origin)?,
            "ruleref" => self.lower_ruleref(element, origin)?,
            "tag" => self.graph.add_tag(element.text()),
            "example" => return Ok(None),
            other => return Err(BuildError::UnknownElement(other.to_owned())),
        };
        Ok(Some(id))
    }

    fn lower_item(&mut self, element: &Element, origin: Symbol) -> Result<NodeId, BuildError> {
        let (min, max) = match element.attr("repeat") {
            Some(spec) => parse_repeat(spec)?,
            None => (1, 1),
        };
        let mode = parse_mode(element.attr("repeat-mode"))?;
        let weight = parse_weight(element.attr("weight"))?;

        let body = self.lower_body(element, origin)?;
        let item = Item::new(body, min, max)
            .with_mode(mode)
            .with_weight(weight);
        Ok(self.graph.add_item(item))
    }

    fn lower_choice(&mut self, element: &Element, origin: Symbol) -> Result<NodeId, BuildError> {
        let mut items = Vec::new();
        for content in &element.children {
            match content {
                Content::Text(text) if text.trim().is_empty() => {}
                Content::Text(_) => return Err(BuildError::ChoiceRequiresItems("text".into())),
                Content::Element(child) if child.name == "item" => {
                    items.push(self.lower_item(child, origin)?);
                }
                Content::Element(child) => {
                    return Err(BuildError::ChoiceRequiresItems(format!("<{}>", child.name)));
                }
            }
        }
        Ok(self.graph.add_alternative(items))
    }

    fn lower_ruleref(&mut self, element: &Element, origin: Symbol) -> Result<NodeId, BuildError> {
        if let Some(special) = element.attr("special") {
            return match special.trim() {
                "GARBAGE" => Ok(self.graph.add_garbage()),
                "NULL" => Ok(self.graph.add_token("")),
                "VOID" => Ok(self.graph.add_alternative(Vec::new())),
                "SLM" => Ok(self.graph.add_scored(element.attr("uri").unwrap_or_default())),
                other => Err(BuildError::UnknownSpecialRule(other.to_owned())),
            };
        }

        let uri = element.attr("uri").map(str::trim).unwrap_or_default();
        if uri.is_empty() {
            return Err(BuildError::EmptyRuleRef);
        }
        let target = match uri.strip_prefix('#') {
            Some(id) if !id.is_empty() => id,
            _ => return Err(BuildError::NonLocalRuleRef(uri.to_owned())),
        };

        let rule = self.interner.intern(target);
        let reference = self
            .graph
            .add_node(Expansion::RuleRef(RuleRef::new(rule, origin)));
        self.resolve(reference)?;
        Ok(reference)
    }

    /// Give `reference` its own copy of its rule, then do the same for every
    /// reference that copy contains. References to rules not lowered yet
    /// wait in the forward table.
    fn resolve(&mut self, reference: NodeId) -> Result<(), BuildError> {
        let mut pending = vec![reference];
        while let Some(at) = pending.pop() {
            let rule = self.graph.rule_ref(at).rule;
            let Some(&definition) = self.rules.get(&rule) else {
                self.forward.entry(rule).or_default().push(at);
                continue;
            };
            if self.graph.activations(at, rule) > self.limits.max_rule_depth {
                self.graph.rule_ref_mut(at).truncated = true;
                continue;
            }

            let body = self
                .graph
                .copy_subtree(definition, Some(at), &mut RefCopy::Defer(&mut pending));
            self.graph.rule_ref_mut(at).target = Some(body);
            self.check_size()?;
        }
        Ok(())
    }

    fn resolve_forward(&mut self) -> Result<(), BuildError> {
        let missing: Vec<String> = self
            .forward
            .keys()
            .filter(|rule| !self.rules.contains_key(*rule))
            .map(|rule| self.interner.resolve(*rule).to_owned())
            .collect();
        if !missing.is_empty() {
            return Err(BuildError::UnresolvedRuleRefs(missing));
        }

        // Every rule is known now, so resolving never re-queues.
        let waiting: Vec<NodeId> = std::mem::take(&mut self.forward)
            .into_values()
            .flatten()
            .collect();
        for reference in waiting {
            self.resolve(reference)?;
        }
        Ok(())
    }

    fn check_size(&self) -> Result<(), BuildError> {
        if self.graph.len() > self.limits.max_nodes {
            return Err(BuildError::GrammarTooLarge(self.limits.max_nodes));
        }
        Ok(())
    }
}
