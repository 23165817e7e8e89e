//! The `Match`/`Next` enumeration protocol.
//!
//! `begin` (Match) resets a node for the input; each `next` (Next) returns the
//! next distinct remainder, or the terminal error once every path is
//! exhausted. State lives on the nodes, so a matcher borrows the graph
//! mutably and one enumeration runs at a time per graph.
//!
//! Offsets are byte positions in the normalized input, which uses a single
//! space as the only word separator.

use crate::graph::{
    Expansion, ExpansionGraph, ItemStep, NodeId, RefCopy, RepeatMode, ScoredWildcard, Wildcard,
};

use super::scorer::{Scorer, UniformScorer};
use super::trace::{NoopTracer, Tracer};
use super::{MatchError, MatchMode};

static DEFAULT_SCORER: UniformScorer = UniformScorer::DEFAULT;

/// Runtime limits for one enumeration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MatchLimits {
    /// Maximum total `Next` steps across all nodes (default: 1,000,000).
    pub exec_fuel: u32,
    /// Scored wildcard spans must score strictly above this (default: -1000).
    pub score_floor: f64,
}

impl Default for MatchLimits {
    fn default() -> Self {
        Self {
            exec_fuel: 1_000_000,
            score_floor: -1000.0,
        }
    }
}

/// Drives enumeration over an `ExpansionGraph` for one input.
pub struct Matcher<'g, 'i, T: Tracer = NoopTracer> {
    graph: &'g mut ExpansionGraph,
    scorer: &'g dyn Scorer,
    input: &'i str,
    mode: MatchMode,
    limits: MatchLimits,
    fuel: u32,
    tracer: T,
}

impl<'g, 'i> Matcher<'g, 'i, NoopTracer> {
    /// `input` must already be normalized (see `voxgram_core::normalize`).
    pub fn new(graph: &'g mut ExpansionGraph, input: &'i str, mode: MatchMode) -> Self {
        let limits = MatchLimits::default();
        Self {
            graph,
            scorer: &DEFAULT_SCORER,
            input,
            mode,
            limits,
            fuel: limits.exec_fuel,
            tracer: NoopTracer,
        }
    }
}

impl<'g, 'i, T: Tracer> Matcher<'g, 'i, T> {
    pub fn with_tracer<U: Tracer>(self, tracer: U) -> Matcher<'g, 'i, U> {
        Matcher {
            graph: self.graph,
            scorer: self.scorer,
            input: self.input,
            mode: self.mode,
            limits: self.limits,
            fuel: self.fuel,
            tracer,
        }
    }

    pub fn with_scorer(mut self, scorer: &'g dyn Scorer) -> Self {
        self.scorer = scorer;
        self
    }

    pub fn with_limits(mut self, limits: MatchLimits) -> Self {
        self.limits = limits;
        self.fuel = limits.exec_fuel;
        self
    }

    pub fn input(&self) -> &'i str {
        self.input
    }

    pub fn mode(&self) -> MatchMode {
        self.mode
    }

    pub fn graph(&self) -> &ExpansionGraph {
        self.graph
    }

    pub fn into_tracer(self) -> T {
        self.tracer
    }

    /// Reset `node` to enumerate over the whole input.
    pub fn begin(&mut self, node: NodeId) {
        self.start(node, 0);
    }

    /// Next distinct remainder of the input after `node`, or the terminal error.
    pub fn next(&mut self, node: NodeId) -> Result<&'i str, MatchError> {
        let input = self.input;
        self.step(node).map(|rest| &input[rest..])
    }

    /// Reset `id` and everything it primes for the suffix starting at `at`.
    fn start(&mut self, id: NodeId, at: usize) {
        self.tracer.trace_match(id, self.graph.node(id), at);

        let follow = match self.graph.node_mut(id) {
            Expansion::Token(t) => {
                t.start = at;
                t.done = false;
                None
            }
            Expansion::Tag(t) => {
                t.start = at;
                t.done = false;
                None
            }
            Expansion::Sequence(s) => {
                s.start = at;
                s.cursor = 0;
                s.yielded = false;
                s.prefix_seen = false;
                s.done = false;
                s.children.first().copied()
            }
            Expansion::Alternative(a) => {
                a.start = at;
                a.current = 0;
                a.prefix_seen = false;
                a.items.first().copied()
            }
            Expansion::Item(item) => {
                item.start = at;
                item.ends.clear();
                item.step = ItemStep::Arrive;
                item.prefix_seen = false;
                item.covered = false;
                None
            }
            Expansion::RuleRef(r) => r.target,
            Expansion::Garbage(w) => {
                reset_span(w, at);
                None
            }
            Expansion::Scored(s) => {
                reset_span(&mut s.span, at);
                s.score = 0.0;
                None
            }
        };

        if let Some(child) = follow {
            self.start(child, at);
        }
    }

    fn step(&mut self, id: NodeId) -> Result<usize, MatchError> {
        if self.fuel == 0 {
            return Err(MatchError::FuelExhausted(self.limits.exec_fuel));
        }
        self.fuel -= 1;

        self.tracer.trace_next(id, self.graph.node(id));
        let result = match self.graph.node(id) {
            Expansion::Token(_) => self.next_token(id),
            Expansion::Tag(_) => self.next_tag(id),
            Expansion::Sequence(_) => self.next_sequence(id),
            Expansion::Alternative(_) => self.next_alternative(id),
            Expansion::Item(_) => self.next_item(id),
            Expansion::RuleRef(r) => {
                let target = r.target;
                match target {
                    Some(target) => self.step(target),
                    None => Err(MatchError::NoMatch),
                }
            }
            Expansion::Garbage(_) => self.next_garbage(id),
            Expansion::Scored(_) => self.next_scored(id),
        };
        self.tracer.trace_result(id, self.graph.node(id), result);
        result
    }

    fn next_token(&mut self, id: NodeId) -> Result<usize, MatchError> {
        let input = self.input;
        let mode = self.mode;
        let token = self.graph.token_mut(id);
        if token.done {
            return Err(MatchError::NoMatch);
        }
        token.done = true;

        let words = token.words.as_bytes();
        if words.is_empty() {
            return Ok(token.start);
        }
        let rest = &input.as_bytes()[token.start..];
        let shared = rest.len().min(words.len());
        if rest[..shared] != words[..shared] {
            return Err(MatchError::NoMatch);
        }

        if words.len() == rest.len() {
            return Ok(input.len());
        }
        if words.len() > rest.len() {
            return match mode {
                MatchMode::Prefix => Ok(input.len()),
                MatchMode::Exact => Err(MatchError::PrefixOnly),
            };
        }
        if rest[words.len()] == b' ' {
            Ok(token.start + words.len() + 1)
        } else {
            Err(MatchError::NoMatch)
        }
    }

    fn next_tag(&mut self, id: NodeId) -> Result<usize, MatchError> {
        let tag = self.graph.tag_mut(id);
        if tag.done {
            return Err(MatchError::NoMatch);
        }
        tag.done = true;
        Ok(tag.start)
    }

    /// Depth-first over children: advance the child at the cursor, move right
    /// on success, move left when it is exhausted.
    fn next_sequence(&mut self, id: NodeId) -> Result<usize, MatchError> {
        let seq = self.graph.sequence_mut(id);
        if seq.done {
            return Err(MatchError::exhausted(seq.prefix_seen));
        }
        if seq.children.is_empty() {
            if seq.yielded {
                return Err(MatchError::NoMatch);
            }
            seq.yielded = true;
            return Ok(seq.start);
        }

        loop {
            let seq = self.graph.sequence_mut(id);
            let cursor = seq.cursor;
            let child = seq.children[cursor];
            let last = seq.children.len() - 1;

            match self.step(child) {
                Ok(rest) if cursor == last => return Ok(rest),
                Ok(rest) => {
                    let seq = self.graph.sequence_mut(id);
                    seq.cursor += 1;
                    let following = seq.children[seq.cursor];
                    self.start(following, rest);
                }
                Err(e) if e.is_fatal() => return Err(e),
                Err(e) => {
                    let seq = self.graph.sequence_mut(id);
                    seq.prefix_seen |= e == MatchError::PrefixOnly;
                    if cursor == 0 {
                        seq.done = true;
                        return Err(MatchError::exhausted(seq.prefix_seen));
                    }
                    seq.cursor -= 1;
                }
            }
        }
    }

    fn next_alternative(&mut self, id: NodeId) -> Result<usize, MatchError> {
        loop {
            let alt = self.graph.alternative_mut(id);
            let Some(&child) = alt.items.get(alt.current) else {
                return Err(MatchError::exhausted(alt.prefix_seen));
            };

            match self.step(child) {
                Ok(rest) => return Ok(rest),
                Err(e) if e.is_fatal() => return Err(e),
                Err(e) => {
                    let alt = self.graph.alternative_mut(id);
                    alt.prefix_seen |= e == MatchError::PrefixOnly;
                    alt.current += 1;
                    let start = alt.start;
                    if let Some(&following) = alt.items.get(alt.current) {
                        self.start(following, start);
                    }
                }
            }
        }
    }

    /// Depth-first over repetition counts.
    ///
    /// A configuration is the stack of successful repetitions on the current
    /// path. `Lazy` yields a configuration when it is first reached, `Normal`
    /// and `Greedy` yield it once it cannot be extended, and `Normal` also
    /// yields it again after all of its extensions were exhausted.
    fn next_item(&mut self, id: NodeId) -> Result<usize, MatchError> {
        let exact = self.mode == MatchMode::Exact;
        let end = self.input.len();

        loop {
            let item = self.graph.item_mut(id);
            let depth = item.ends.len();
            let pos = item.ends.last().copied().unwrap_or(item.start);
            let min = item.min as usize;
            let max = item.max as usize;

            match item.step {
                ItemStep::Done => {
                    return Err(MatchError::exhausted(item.prefix_seen || item.covered));
                }
                ItemStep::Arrive => {
                    item.step = ItemStep::Extend;
                    item.covered |= exact && pos == end && max > 1 && depth == max;
                    if item.mode == RepeatMode::Lazy && depth >= min {
                        return Ok(pos);
                    }
                }
                ItemStep::Extend => {
                    if depth < max {
                        let rep = self.repetition(id, depth);
                        self.start(rep, pos);
                        match self.next_consuming(rep, pos, depth < min) {
                            Ok(rest) => {
                                let item = self.graph.item_mut(id);
                                item.ends.push(rest);
                                item.step = ItemStep::Arrive;
                                continue;
                            }
                            Err(e) if e.is_fatal() => return Err(e),
                            Err(e) => {
                                self.graph.item_mut(id).prefix_seen |= e == MatchError::PrefixOnly;
                            }
                        }
                    }

                    let item = self.graph.item_mut(id);
                    item.step = ItemStep::Advance;
                    if item.mode != RepeatMode::Lazy && depth >= min {
                        return Ok(pos);
                    }
                }
                ItemStep::Advance => {
                    if depth == 0 {
                        item.step = ItemStep::Done;
                        return Err(MatchError::exhausted(item.prefix_seen || item.covered));
                    }
                    let rep = item.reps[depth - 1];
                    let base = if depth == 1 {
                        item.start
                    } else {
                        item.ends[depth - 2]
                    };

                    match self.next_consuming(rep, base, depth <= min) {
                        Ok(rest) => {
                            let item = self.graph.item_mut(id);
                            item.ends[depth - 1] = rest;
                            item.step = ItemStep::Arrive;
                        }
                        Err(e) if e.is_fatal() => return Err(e),
                        Err(e) => {
                            let item = self.graph.item_mut(id);
                            item.prefix_seen |= e == MatchError::PrefixOnly;
                            item.ends.pop();
                            if item.mode == RepeatMode::Normal && depth > min {
                                return Ok(base);
                            }
                        }
                    }
                }
            }
        }
    }

    /// Node backing repetition `k`, copying the child on first use.
    fn repetition(&mut self, id: NodeId, k: usize) -> NodeId {
        let item = self.graph.item_mut(id);
        if let Some(&rep) = item.reps.get(k) {
            return rep;
        }
        debug_assert_eq!(item.reps.len(), k, "repetitions are created in order");
        let (child, scope) = (item.child, item.scope);
        let copy = self.graph.copy_subtree(child, scope, &mut RefCopy::Deep);
        self.graph.item_mut(id).reps.push(copy);
        self.tracer.trace_repeat_copy(id, k, copy);
        copy
    }

    /// Like `step`, but skips remainders that consumed nothing unless allowed.
    fn next_consuming(
        &mut self,
        id: NodeId,
        base: usize,
        allow_empty: bool,
    ) -> Result<usize, MatchError> {
        loop {
            let rest = self.step(id)?;
            if allow_empty || rest != base {
                return Ok(rest);
            }
        }
    }

    fn next_garbage(&mut self, id: NodeId) -> Result<usize, MatchError> {
        let (input, mode) = (self.input, self.mode);
        let Expansion::Garbage(span) = self.graph.node_mut(id) else {
            unreachable!("dispatched on node kind");
        };
        extend_span(span, input, mode)
    }

    fn next_scored(&mut self, id: NodeId) -> Result<usize, MatchError> {
        let (input, mode) = (self.input, self.mode);
        let floor = self.limits.score_floor;
        loop {
            let Expansion::Scored(wildcard) = self.graph.node_mut(id) else {
                unreachable!("dispatched on node kind");
            };
            let rest = extend_span(&mut wildcard.span, input, mode)?;
            let text = span_text(wildcard, input);
            if text.is_empty() {
                return Ok(rest);
            }
            let score = self.scorer.score(&wildcard.model, text);
            if score > floor {
                wildcard.score = score;
                return Ok(rest);
            }
            self.tracer.trace_rejected_span(id, text, score);
        }
    }
}

fn reset_span(span: &mut Wildcard, at: usize) {
    span.start = at;
    span.cursor = at;
    span.offered = false;
}

/// Offer one more word than last time.
fn extend_span(span: &mut Wildcard, input: &str, mode: MatchMode) -> Result<usize, MatchError> {
    if span.start == input.len() {
        if span.offered {
            return Err(MatchError::NoMatch);
        }
        span.offered = true;
        return match mode {
            MatchMode::Prefix => Ok(span.start),
            MatchMode::Exact => Err(MatchError::PrefixOnly),
        };
    }
    if span.offered && span.cursor == input.len() {
        return Err(MatchError::NoMatch);
    }
    span.offered = true;
    span.cursor = match input[span.cursor..].find(' ') {
        Some(i) => span.cursor + i + 1,
        None => input.len(),
    };
    Ok(span.cursor)
}

fn span_text<'i>(wildcard: &ScoredWildcard, input: &'i str) -> &'i str {
    input[wildcard.span.start..wildcard.span.cursor].trim_end()
}
