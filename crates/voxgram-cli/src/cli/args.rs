//! Shared argument builders for CLI commands.
//!
//! Each function returns a `clap::Arg` that can be composed into commands.

use std::path::PathBuf;

use clap::{Arg, ArgAction, value_parser};

/// Grammar document (positional).
pub fn grammar_path_arg() -> Arg {
    Arg::new("grammar_path")
        .value_name("GRAMMAR")
        .required(true)
        .value_parser(value_parser!(PathBuf))
        .help("Grammar document (use \"-\" for stdin)")
}

/// Utterance words (positional, joined with spaces).
pub fn utterance_arg() -> Arg {
    Arg::new("utterance")
        .value_name("UTTERANCE")
        .required(true)
        .num_args(1..)
        .help("Utterance to match; multiple words are joined with spaces")
}

/// Color output control (--color).
pub fn color_arg() -> Arg {
    Arg::new("color")
        .long("color")
        .value_name("WHEN")
        .default_value("auto")
        .value_parser(["auto", "always", "never"])
        .help("Colorize output")
}

/// Accept incomplete utterances (--prefix).
pub fn prefix_arg() -> Arg {
    Arg::new("prefix")
        .long("prefix")
        .action(ArgAction::SetTrue)
        .help("Accept utterances that are a prefix of a valid one")
}

/// Print the semantic script instead of the result (--script).
pub fn script_arg() -> Arg {
    Arg::new("script")
        .long("script")
        .action(ArgAction::SetTrue)
        .help("Print the semantic script instead of evaluating it")
}

/// Output compact JSON (--compact).
pub fn compact_arg() -> Arg {
    Arg::new("compact")
        .long("compact")
        .action(ArgAction::SetTrue)
        .help("Output compact JSON (default: pretty when stdout is a TTY)")
}

/// Verbosity level (-v).
pub fn verbose_arg() -> Arg {
    Arg::new("verbose")
        .short('v')
        .action(ArgAction::Count)
        .help("Verbosity level (-v shows every node)")
}

/// Recursion expansion bound (--max-rule-depth).
pub fn max_rule_depth_arg() -> Arg {
    Arg::new("max_rule_depth")
        .long("max-rule-depth")
        .value_name("N")
        .default_value("12")
        .value_parser(value_parser!(usize))
        .help("Maximum nested activations of one rule")
}

/// Execution fuel limit (--fuel).
pub fn fuel_arg() -> Arg {
    Arg::new("fuel")
        .long("fuel")
        .value_name("N")
        .default_value("1000000")
        .value_parser(value_parser!(u32))
        .help("Execution fuel limit")
}

/// Scored wildcard acceptance floor (--score-floor).
pub fn score_floor_arg() -> Arg {
    Arg::new("score_floor")
        .long("score-floor")
        .value_name("SCORE")
        .default_value("-1000")
        .allow_negative_numbers(true)
        .value_parser(value_parser!(f64))
        .help("Spans scoring at or below this are rejected")
}
