//! Decide whether an utterance matches a grammar.

use std::path::PathBuf;

use voxgram_core::Colors;
use voxgram_lib::{GrammarOptions, MatchError, MatchMode};

use super::grammar_loader::{load_or_exit, report_error};

pub struct MatchArgs {
    pub grammar_path: PathBuf,
    pub utterance: String,
    pub accept_prefix: bool,
    pub options: GrammarOptions,
    pub color: bool,
}

/// Outcome of an exact-mode check.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verdict {
    Match,
    Prefix,
    NoMatch,
}

impl Verdict {
    /// Fatal errors are passed through.
    pub fn classify(result: Result<(), MatchError>) -> Result<Self, MatchError> {
        match result {
            Ok(()) => Ok(Verdict::Match),
            Err(MatchError::PrefixOnly) => Ok(Verdict::Prefix),
            Err(MatchError::NoMatch) => Ok(Verdict::NoMatch),
            Err(e) => Err(e),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Verdict::Match => "match",
            Verdict::Prefix => "prefix",
            Verdict::NoMatch => "no match",
        }
    }

    pub fn exit_code(self, accept_prefix: bool) -> i32 {
        match self {
            Verdict::Match => 0,
            Verdict::Prefix if accept_prefix => 0,
            Verdict::Prefix | Verdict::NoMatch => 1,
        }
    }

    pub fn render(self, colors: Colors) -> String {
        let color = match self {
            Verdict::Match => colors.green,
            Verdict::Prefix => colors.blue,
            Verdict::NoMatch => colors.red,
        };
        format!("{}{}{}", color, self.label(), colors.reset)
    }
}

pub fn run(args: MatchArgs) {
    let mut grammar = load_or_exit(&args.grammar_path, args.options, args.color);

    let verdict = match Verdict::classify(grammar.check(&args.utterance, MatchMode::Exact)) {
        Ok(verdict) => verdict,
        Err(e) => {
            report_error(&e.to_string(), args.color);
            std::process::exit(2);
        }
    };

    println!("{}", verdict.render(Colors::new(args.color)));
    std::process::exit(verdict.exit_code(args.accept_prefix));
}
