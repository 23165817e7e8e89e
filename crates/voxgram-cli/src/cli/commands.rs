//! Command builders for the CLI.
//!
//! Each command is built using the shared arg builders from `args.rs`.
//! Every command accepts the grammar limit flags.

use clap::Command;

use super::args::*;

/// Add the options that shape how a grammar is built and matched.
fn with_limit_args(cmd: Command) -> Command {
    cmd.arg(max_rule_depth_arg())
        .arg(fuel_arg())
        .arg(score_floor_arg())
}

/// Build the complete CLI with all subcommands.
pub fn build_cli() -> Command {
    Command::new("voxgram")
        .about("Match and interpret utterances against SRGS grammars")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(check_command())
        .subcommand(match_command())
        .subcommand(interpret_command())
        .subcommand(trace_command())
        .subcommand(dump_command())
}

/// Load and build a grammar.
pub fn check_command() -> Command {
    let cmd = Command::new("check")
        .about("Validate a grammar")
        .after_help(
            r#"EXAMPLES:
  voxgram check names.grxml                    # silent on success
  voxgram check - < names.grxml                # from stdin
  voxgram check names.grxml --max-rule-depth 4"#,
        )
        .arg(grammar_path_arg())
        .arg(color_arg());

    with_limit_args(cmd)
}

/// Decide whether an utterance matches.
pub fn match_command() -> Command {
    let cmd = Command::new("match")
        .about("Check an utterance against a grammar")
        .after_help(
            r#"EXAMPLES:
  voxgram match names.grxml my name is rob     # match / prefix / no match
  voxgram match names.grxml my name --prefix   # exit 0 on a prefix too"#,
        )
        .arg(grammar_path_arg())
        .arg(utterance_arg())
        .arg(prefix_arg())
        .arg(color_arg());

    with_limit_args(cmd)
}

/// Match an utterance and evaluate its semantics.
pub fn interpret_command() -> Command {
    let cmd = Command::new("interpret")
        .about("Match an utterance and print its interpretation")
        .after_help(
            r#"EXAMPLES:
  voxgram interpret ages.grxml my age is fifteen
  voxgram interpret ages.grxml my age is fifteen --compact
  voxgram interpret ages.grxml my age is fifteen --script"#,
        )
        .arg(grammar_path_arg())
        .arg(utterance_arg())
        .arg(script_arg())
        .arg(compact_arg())
        .arg(color_arg());

    with_limit_args(cmd)
}

/// Trace match enumeration for debugging.
pub fn trace_command() -> Command {
    let cmd = Command::new("trace")
        .about("Trace match enumeration for debugging")
        .after_help(
            r#"EXAMPLES:
  voxgram trace names.grxml my name is rob
  voxgram trace names.grxml my name --prefix
  voxgram trace names.grxml my name is rob -v  # every node"#,
        )
        .arg(grammar_path_arg())
        .arg(utterance_arg())
        .arg(prefix_arg())
        .arg(verbose_arg())
        .arg(color_arg());

    with_limit_args(cmd)
}

/// Show the expansion graph.
pub fn dump_command() -> Command {
    let cmd = Command::new("dump")
        .about("Show the expansion graph of a grammar")
        .after_help(
            r#"EXAMPLES:
  voxgram dump names.grxml
  voxgram dump names.grxml --max-rule-depth 2"#,
        )
        .arg(grammar_path_arg());

    with_limit_args(cmd)
}
