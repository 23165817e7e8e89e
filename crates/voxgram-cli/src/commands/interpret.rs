//! Match an utterance and print its semantic interpretation.

use std::path::PathBuf;

use voxgram_core::Colors;
use voxgram_lib::{GrammarOptions, SemanticProcessor, Value};
use voxgram_sisr::SisrEvaluator;

use super::grammar_loader::{load_or_exit, report_error};

pub struct InterpretArgs {
    pub grammar_path: PathBuf,
    pub utterance: String,
    pub script: bool,
    pub pretty: bool,
    pub options: GrammarOptions,
    pub color: bool,
}

pub fn run(args: InterpretArgs) {
    let mut grammar = load_or_exit(&args.grammar_path, args.options, args.color);
    let mut processor = SemanticProcessor::new(SisrEvaluator::new());

    if let Err(e) = grammar.get_match(&args.utterance, &mut processor) {
        report_error(&e.to_string(), args.color);
        std::process::exit(if e.is_fatal() { 2 } else { 1 });
    }

    if args.script {
        print!("{}", processor.script());
        return;
    }

    let value = match processor.get_instance() {
        Ok(value) => value,
        Err(e) => {
            report_error(&format!("semantic evaluation failed: {}", e), args.color);
            std::process::exit(2);
        }
    };

    let output = render(
        &processor.get_interpretation(),
        &value,
        args.pretty,
        Colors::new(args.color),
    );
    println!("{}", output);
}

/// Interpretation line, a dim separator, then the instance as JSON.
pub fn render(interpretation: &str, value: &Value, pretty: bool, colors: Colors) -> String {
    format!(
        "{}{}{}\n{}---{}\n{}",
        colors.green,
        interpretation,
        colors.reset,
        colors.dim,
        colors.reset,
        value.format(pretty, colors)
    )
}
