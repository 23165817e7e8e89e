//! Script evaluation seam.

use super::{Script, ScriptOp, Value};

/// Errors surfaced by a script evaluator.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EvalError {
    #[error("syntax error: {0}")]
    Syntax(String),

    #[error("type error: {0}")]
    Type(String),

    #[error("`{0}` is not defined")]
    UnknownIdentifier(String),

    #[error("unsupported call to `{0}`")]
    UnsupportedCall(String),

    /// Scope operations do not nest (pop without push, or missing pops).
    #[error("unbalanced scopes in semantic script")]
    UnbalancedScopes,
}

/// Runs a semantic script and produces the final value.
///
/// Implementations decide how tag bodies are executed; the scope and
/// publication rules of `ScriptOp` are part of the contract.
pub trait ScriptEvaluator {
    fn evaluate(&mut self, script: &Script) -> Result<Value, EvalError>;
}

impl<E: ScriptEvaluator + ?Sized> ScriptEvaluator for &mut E {
    fn evaluate(&mut self, script: &Script) -> Result<Value, EvalError> {
        (**self).evaluate(script)
    }
}

/// Evaluator that ignores tags: every scope's value is its matched words.
#[derive(Clone, Copy, Debug, Default)]
pub struct RawEvaluator;

impl ScriptEvaluator for RawEvaluator {
    fn evaluate(&mut self, script: &Script) -> Result<Value, EvalError> {
        let mut raw: Vec<Vec<String>> = Vec::new();
        let mut root = Value::Undefined;
        for op in script.ops() {
            match op {
                ScriptOp::EnterRoot => raw.push(Vec::new()),
                ScriptOp::PushScope => raw.push(Vec::new()),
                ScriptOp::Words(words) => {
                    let scope = raw.last_mut().ok_or(EvalError::UnbalancedScopes)?;
                    scope.push(words.clone());
                }
                ScriptOp::Tag(_) | ScriptOp::Capture { .. } => {}
                ScriptOp::PopScope { .. } => {
                    let words = raw.pop().ok_or(EvalError::UnbalancedScopes)?;
                    let parent = raw.last_mut().ok_or(EvalError::UnbalancedScopes)?;
                    let text = words.join(" ");
                    root = Value::String(text.clone());
                    parent.push(text);
                }
                ScriptOp::BindRoot { .. } => {
                    if raw.len() != 1 {
                        return Err(EvalError::UnbalancedScopes);
                    }
                }
            }
        }
        Ok(root)
    }
}
