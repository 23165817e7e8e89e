use indexmap::IndexMap;
use voxgram_lib::{EvalError, Script, ScriptEvaluator, ScriptOp, Value};

use crate::ast::Stmt;
use crate::interp::Interpreter;
use crate::parser::parse;

/// Evaluates semantic scripts whose tags are ECMAScript-style statements.
///
/// Parsed tag bodies are cached, so one evaluator can be reused across
/// matches of the same grammar.
#[derive(Debug, Default)]
pub struct SisrEvaluator {
    interp: Interpreter,
    programs: IndexMap<String, Vec<Stmt>>,
}

impl SisrEvaluator {
    pub fn new() -> Self {
        Self::default()
    }

    fn run_tag(&mut self, body: &str) -> Result<(), EvalError> {
        if !self.programs.contains_key(body) {
            let program = parse(body)?;
            self.programs.insert(body.to_owned(), program);
        }
        let program = &self.programs[body];
        self.interp.run(program)
    }
}

impl ScriptEvaluator for SisrEvaluator {
    fn evaluate(&mut self, script: &Script) -> Result<Value, EvalError> {
        let mut result = Value::Undefined;
        for op in script.ops() {
            match op {
                ScriptOp::EnterRoot => self.interp.enter_root(),
                ScriptOp::PushScope => self.interp.push_scope(),
                ScriptOp::Words(words) => self.interp.append_words(words)?,
                ScriptOp::Tag(body) => self.run_tag(body)?,
                ScriptOp::Capture { kind, text } => self.interp.capture(kind.rule_name(), text)?,
                ScriptOp::PopScope { rule } => self.interp.pop_scope(rule)?,
                ScriptOp::BindRoot { rule } => result = self.interp.bind_root(rule)?,
            }
        }
        Ok(result)
    }
}

#[cfg(test)]
#[path = "evaluator_tests.rs"]
mod evaluator_tests;
