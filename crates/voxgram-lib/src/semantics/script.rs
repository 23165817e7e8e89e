//! The semantic script: tag bodies and words in scope order.

use std::fmt;

/// Wildcard flavour behind a capture. Captures are published under the
/// special rule's name.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WildcardKind {
    Garbage,
    Scored,
}

impl WildcardKind {
    pub fn rule_name(self) -> &'static str {
        match self {
            WildcardKind::Garbage => "GARBAGE",
            WildcardKind::Scored => "SLM",
        }
    }
}

/// One step of a semantic script.
#[derive(Clone, Debug, PartialEq)]
pub enum ScriptOp {
    /// Outermost scope bootstrap, before anything else.
    EnterRoot,
    /// A rule activation starts a fresh scope.
    PushScope,
    /// Words matched in the current scope.
    Words(String),
    /// Tag body to run in the current scope.
    Tag(String),
    /// Span matched by a wildcard in the current scope.
    Capture { kind: WildcardKind, text: String },
    /// The current scope ends and is published to its parent as `rule`.
    PopScope { rule: String },
    /// `rules[rule].out` of the outermost scope becomes the result.
    BindRoot { rule: String },
}

/// Ordered script operations, as emitted by a scan.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Script {
    ops: Vec<ScriptOp>,
}

impl Script {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, op: ScriptOp) {
        self.ops.push(op);
    }

    pub fn ops(&self) -> &[ScriptOp] {
        &self.ops
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    pub fn clear(&mut self) {
        self.ops.clear();
    }
}

/// One op per line, indented by scope depth.
impl fmt::Display for Script {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut depth = 0usize;
        for op in &self.ops {
            if matches!(op, ScriptOp::PopScope { .. }) {
                depth = depth.saturating_sub(1);
            }
            write!(f, "{}", "  ".repeat(depth))?;
            match op {
                ScriptOp::EnterRoot => writeln!(f, "enter")?,
                ScriptOp::PushScope => writeln!(f, "push")?,
                ScriptOp::Words(words) => writeln!(f, "words {:?}", words)?,
                ScriptOp::Tag(body) => writeln!(f, "tag {:?}", body.trim())?,
                ScriptOp::Capture { kind, text } => {
                    writeln!(f, "capture {} {:?}", kind.rule_name(), text)?
                }
                ScriptOp::PopScope { rule } => writeln!(f, "pop {}", rule)?,
                ScriptOp::BindRoot { rule } => writeln!(f, "bind {}", rule)?,
            }
            if matches!(op, ScriptOp::PushScope) {
                depth += 1;
            }
        }
        Ok(())
    }
}
