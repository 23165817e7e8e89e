//! Trace match enumeration for debugging.

use std::path::PathBuf;

use voxgram_core::Colors;
use voxgram_lib::{GrammarOptions, MatchMode, PrintTracer, Verbosity, normalize};

use super::grammar_loader::{load_or_exit, report_error};

pub struct TraceArgs {
    pub grammar_path: PathBuf,
    pub utterance: String,
    pub mode: MatchMode,
    pub verbosity: Verbosity,
    pub options: GrammarOptions,
    pub color: bool,
}

pub fn run(args: TraceArgs) {
    let mut grammar = load_or_exit(&args.grammar_path, args.options, args.color);
    let colors = Colors::new(args.color);

    let input = normalize(&args.utterance);
    let interner = grammar.interner().clone();
    let mut tracer = PrintTracer::new(&input, &interner, args.verbosity, colors);
    let result = grammar.trace(&input, args.mode, &mut tracer);

    print!("{}", tracer.dump());
    println!("{}---{}", colors.dim, colors.reset);
    match result {
        Ok(()) => println!("{}match{}", colors.green, colors.reset),
        Err(e) if e.is_fatal() => {
            report_error(&e.to_string(), args.color);
            std::process::exit(2);
        }
        Err(e) => {
            println!("{}{}{}", colors.red, e, colors.reset);
            std::process::exit(1);
        }
    }
}
