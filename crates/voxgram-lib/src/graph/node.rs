//! Node kinds of the expansion graph.
//!
//! Public fields describe topology. Crate-private fields are enumeration
//! state owned by the matcher; `Match` resets them and `Next` walks them.

use voxgram_core::Symbol;

/// Index into `ExpansionGraph::nodes`.
pub type NodeId = u32;

/// A grammar sub-tree capable of matching part of an utterance.
#[derive(Debug, Clone)]
pub enum Expansion {
    Token(Token),
    Tag(Tag),
    Sequence(Sequence),
    Alternative(Alternative),
    Item(Item),
    RuleRef(RuleRef),
    Garbage(Wildcard),
    Scored(ScoredWildcard),
}

impl Expansion {
    /// Short kind name, used by dumps and traces.
    pub fn kind(&self) -> &'static str {
        match self {
            Expansion::Token(_) => "token",
            Expansion::Tag(_) => "tag",
            Expansion::Sequence(_) => "seq",
            Expansion::Alternative(_) => "alt",
            Expansion::Item(_) => "item",
            Expansion::RuleRef(_) => "ref",
            Expansion::Garbage(_) => "garbage",
            Expansion::Scored(_) => "slm",
        }
    }

    /// True for nodes that consume words directly (not composites).
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Expansion::Token(_) | Expansion::Garbage(_) | Expansion::Scored(_)
        )
    }
}

/// Literal word sequence, stored normalized. Empty means epsilon.
#[derive(Debug, Clone, Default)]
pub struct Token {
    pub words: String,
    pub(crate) start: usize,
    pub(crate) done: bool,
}

impl Token {
    pub fn new(words: impl Into<String>) -> Self {
        Self {
            words: words.into(),
            ..Self::default()
        }
    }

    pub fn is_epsilon(&self) -> bool {
        self.words.is_empty()
    }
}

/// Semantic-action script text. Matches without consuming input.
#[derive(Debug, Clone, Default)]
pub struct Tag {
    pub script: String,
    pub(crate) start: usize,
    pub(crate) done: bool,
}

impl Tag {
    pub fn new(script: impl Into<String>) -> Self {
        Self {
            script: script.into(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Sequence {
    pub children: Vec<NodeId>,
    pub(crate) start: usize,
    /// Index of the child currently being enumerated.
    pub(crate) cursor: usize,
    /// Empty sequences yield once.
    pub(crate) yielded: bool,
    pub(crate) prefix_seen: bool,
    pub(crate) done: bool,
}

impl Sequence {
    pub fn new(children: Vec<NodeId>) -> Self {
        Self {
            children,
            ..Self::default()
        }
    }
}

/// Ordered choice between `Item`s. Document order is priority.
#[derive(Debug, Clone, Default)]
pub struct Alternative {
    pub items: Vec<NodeId>,
    pub(crate) start: usize,
    pub(crate) current: usize,
    pub(crate) prefix_seen: bool,
}

impl Alternative {
    pub fn new(items: Vec<NodeId>) -> Self {
        Self {
            items,
            ..Self::default()
        }
    }
}

/// How an `Item` orders the repeat counts it enumerates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RepeatMode {
    /// Yield a count as soon as it reaches `min`, then try more.
    Lazy,
    /// Extend as far as possible, yield longest first, then shorter counts.
    #[default]
    Normal,
    /// Yield only counts whose next repetition failed.
    Greedy,
}

impl RepeatMode {
    pub fn as_str(self) -> &'static str {
        match self {
            RepeatMode::Lazy => "lazy",
            RepeatMode::Normal => "normal",
            RepeatMode::Greedy => "greedy",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum ItemStep {
    /// Reached a configuration that has not been looked at yet.
    #[default]
    Arrive,
    /// Try to add one more repetition.
    Extend,
    /// Ask the topmost repetition for its next alternative.
    Advance,
    Done,
}

/// Repeated child with inclusive bounds.
///
/// Repetition `k` (0-based) runs on `reps[k]`; `reps[0]` is `child` and the
/// rest are copies created on first use.
#[derive(Debug, Clone)]
pub struct Item {
    pub child: NodeId,
    pub min: u32,
    pub max: u32,
    pub mode: RepeatMode,
    pub weight: Option<f64>,
    /// Enclosing rule reference, inherited by copies of the child.
    pub scope: Option<NodeId>,
    pub(crate) reps: Vec<NodeId>,
    pub(crate) start: usize,
    /// Remainder offset after each successful repetition on the current path.
    pub(crate) ends: Vec<usize>,
    pub(crate) step: ItemStep,
    pub(crate) prefix_seen: bool,
    /// A repeating item reached `max` repetitions exactly at the end of input.
    pub(crate) covered: bool,
}

impl Item {
    pub fn new(child: NodeId, min: u32, max: u32) -> Self {
        Self {
            child,
            min,
            max,
            mode: RepeatMode::Normal,
            weight: None,
            scope: None,
            reps: vec![child],
            start: 0,
            ends: Vec::new(),
            step: ItemStep::Arrive,
            prefix_seen: false,
            covered: false,
        }
    }

    /// Single occurrence, the default for `<item>` without `repeat`.
    pub fn once(child: NodeId) -> Self {
        Self::new(child, 1, 1)
    }

    pub fn with_mode(mut self, mode: RepeatMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_weight(mut self, weight: Option<f64>) -> Self {
        self.weight = weight;
        self
    }

    pub fn with_scope(mut self, scope: Option<NodeId>) -> Self {
        self.scope = scope;
        self
    }

    /// Number of repetitions on the current path.
    pub fn depth(&self) -> usize {
        self.ends.len()
    }
}

/// Reference to a named rule.
///
/// After building, `target` is this occurrence's private copy of the rule
/// body, or `None` when the reference was cut off by the recursion bound.
#[derive(Debug, Clone)]
pub struct RuleRef {
    pub rule: Symbol,
    pub target: Option<NodeId>,
    /// Enclosing reference; `None` inside a rule definition.
    pub parent: Option<NodeId>,
    /// Rule whose definition this reference (or its original) appears in.
    pub origin: Symbol,
    pub truncated: bool,
}

impl RuleRef {
    pub fn new(rule: Symbol, origin: Symbol) -> Self {
        Self {
            rule,
            target: None,
            parent: None,
            origin,
            truncated: false,
        }
    }

    pub fn is_resolved(&self) -> bool {
        self.target.is_some()
    }
}

/// Unconstrained span of one or more words.
#[derive(Debug, Clone, Default)]
pub struct Wildcard {
    pub(crate) start: usize,
    /// End of the span offered by the last `Next` (`start` before the first).
    pub(crate) cursor: usize,
    pub(crate) offered: bool,
}

impl Wildcard {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Wildcard whose spans must score above a floor under a named model.
#[derive(Debug, Clone, Default)]
pub struct ScoredWildcard {
    pub model: String,
    pub(crate) span: Wildcard,
    /// Score of the span offered by the last `Next`.
    pub(crate) score: f64,
}

impl ScoredWildcard {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            ..Self::default()
        }
    }

    /// Score of the most recently accepted span.
    pub fn score(&self) -> f64 {
        self.score
    }
}
