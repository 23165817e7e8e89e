//! Receivers for a replayed match path.

use super::{EvalError, RawEvaluator, Script, ScriptEvaluator, ScriptOp, Value, WildcardKind};

/// Receives the matched path, in match order, from a scan.
pub trait Processor {
    /// Outermost scope bootstrap. Called once, before anything else.
    fn begin_root(&mut self);

    /// A rule activation starts.
    fn push_scope(&mut self);

    /// Words consumed by a token or wildcard.
    fn append_words(&mut self, words: &str);

    /// Body of a matched `<tag>`.
    fn append_tag(&mut self, body: &str);

    /// Span consumed by a wildcard, before its words are appended.
    fn capture(&mut self, kind: WildcardKind, text: &str);

    /// The activation of `rule` ends.
    fn pop_scope(&mut self, rule: &str);

    /// Bind the root rule's result as the final value. Called once, last.
    fn bind_root(&mut self, rule: &str);
}

/// Collects the interpretation and the semantic script of a match.
pub struct SemanticProcessor<E = RawEvaluator> {
    evaluator: E,
    words: Vec<String>,
    script: Script,
}

impl Default for SemanticProcessor<RawEvaluator> {
    fn default() -> Self {
        Self::new(RawEvaluator)
    }
}

impl<E: ScriptEvaluator> SemanticProcessor<E> {
    pub fn new(evaluator: E) -> Self {
        Self {
            evaluator,
            words: Vec::new(),
            script: Script::new(),
        }
    }

    /// Matched words, space-joined.
    pub fn get_interpretation(&self) -> String {
        self.words.join(" ")
    }

    /// Evaluate the script and return the root rule's value.
    pub fn get_instance(&mut self) -> Result<Value, EvalError> {
        self.evaluator.evaluate(&self.script)
    }

    pub fn script(&self) -> &Script {
        &self.script
    }
}

impl<E: ScriptEvaluator> Processor for SemanticProcessor<E> {
    fn begin_root(&mut self) {
        self.words.clear();
        self.script.clear();
        self.script.push(ScriptOp::EnterRoot);
    }

    fn push_scope(&mut self) {
        self.script.push(ScriptOp::PushScope);
    }

    fn append_words(&mut self, words: &str) {
        if words.is_empty() {
            return;
        }
        self.words.push(words.to_owned());
        self.script.push(ScriptOp::Words(words.to_owned()));
    }

    fn append_tag(&mut self, body: &str) {
        self.script.push(ScriptOp::Tag(body.to_owned()));
    }

    fn capture(&mut self, kind: WildcardKind, text: &str) {
        self.script.push(ScriptOp::Capture {
            kind,
            text: text.to_owned(),
        });
    }

    fn pop_scope(&mut self, rule: &str) {
        self.script.push(ScriptOp::PopScope {
            rule: rule.to_owned(),
        });
    }

    fn bind_root(&mut self, rule: &str) {
        self.script.push(ScriptOp::BindRoot {
            rule: rule.to_owned(),
        });
    }
}
