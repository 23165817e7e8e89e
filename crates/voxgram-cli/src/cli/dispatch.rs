//! Dispatch logic: extract params from ArgMatches and convert to command args.
//!
//! This module contains:
//! - `*Params` structs populated from clap matches
//! - `from_matches()` extractors
//! - `Into<*Args>` impls to bridge dispatch → command handlers

use std::path::PathBuf;

use clap::ArgMatches;
use voxgram_lib::{GrammarOptions, MatchMode, Verbosity};

use super::ColorChoice;
use crate::commands::check::CheckArgs;
use crate::commands::dump::DumpArgs;
use crate::commands::interpret::InterpretArgs;
use crate::commands::matching::MatchArgs;
use crate::commands::trace::TraceArgs;

/// Grammar limits shared by every command.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LimitParams {
    pub max_rule_depth: usize,
    pub fuel: u32,
    pub score_floor: f64,
}

impl LimitParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            max_rule_depth: m.get_one::<usize>("max_rule_depth").copied().unwrap_or(12),
            fuel: m.get_one::<u32>("fuel").copied().unwrap_or(1_000_000),
            score_floor: m.get_one::<f64>("score_floor").copied().unwrap_or(-1000.0),
        }
    }

    pub fn options(self) -> GrammarOptions {
        GrammarOptions::new()
            .with_max_rule_depth(self.max_rule_depth)
            .with_exec_fuel(self.fuel)
            .with_score_floor(self.score_floor)
    }
}

pub struct CheckParams {
    pub grammar_path: PathBuf,
    pub limits: LimitParams,
    pub color: ColorChoice,
}

impl CheckParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            grammar_path: grammar_path(m),
            limits: LimitParams::from_matches(m),
            color: parse_color(m),
        }
    }
}

impl From<CheckParams> for CheckArgs {
    fn from(p: CheckParams) -> Self {
        Self {
            grammar_path: p.grammar_path,
            options: p.limits.options(),
            color: p.color.should_colorize(),
        }
    }
}

pub struct MatchParams {
    pub grammar_path: PathBuf,
    pub utterance: String,
    pub prefix: bool,
    pub limits: LimitParams,
    pub color: ColorChoice,
}

impl MatchParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            grammar_path: grammar_path(m),
            utterance: utterance(m),
            prefix: m.get_flag("prefix"),
            limits: LimitParams::from_matches(m),
            color: parse_color(m),
        }
    }
}

impl From<MatchParams> for MatchArgs {
    fn from(p: MatchParams) -> Self {
        Self {
            grammar_path: p.grammar_path,
            utterance: p.utterance,
            accept_prefix: p.prefix,
            options: p.limits.options(),
            color: p.color.should_colorize(),
        }
    }
}

pub struct InterpretParams {
    pub grammar_path: PathBuf,
    pub utterance: String,
    pub script: bool,
    pub compact: bool,
    pub limits: LimitParams,
    pub color: ColorChoice,
}

impl InterpretParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            grammar_path: grammar_path(m),
            utterance: utterance(m),
            script: m.get_flag("script"),
            compact: m.get_flag("compact"),
            limits: LimitParams::from_matches(m),
            color: parse_color(m),
        }
    }
}

impl From<InterpretParams> for InterpretArgs {
    fn from(p: InterpretParams) -> Self {
        // Pretty by default when stdout is a TTY, unless --compact is passed
        let pretty = !p.compact && std::io::IsTerminal::is_terminal(&std::io::stdout());

        Self {
            grammar_path: p.grammar_path,
            utterance: p.utterance,
            script: p.script,
            pretty,
            options: p.limits.options(),
            color: p.color.should_colorize(),
        }
    }
}

pub struct TraceParams {
    pub grammar_path: PathBuf,
    pub utterance: String,
    pub prefix: bool,
    pub verbose: u8,
    pub limits: LimitParams,
    pub color: ColorChoice,
}

impl TraceParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            grammar_path: grammar_path(m),
            utterance: utterance(m),
            prefix: m.get_flag("prefix"),
            verbose: m.get_count("verbose"),
            limits: LimitParams::from_matches(m),
            color: parse_color(m),
        }
    }
}

impl From<TraceParams> for TraceArgs {
    fn from(p: TraceParams) -> Self {
        let verbosity = match p.verbose {
            0 => Verbosity::Default,
            _ => Verbosity::Verbose,
        };
        let mode = if p.prefix {
            MatchMode::Prefix
        } else {
            MatchMode::Exact
        };

        Self {
            grammar_path: p.grammar_path,
            utterance: p.utterance,
            mode,
            verbosity,
            options: p.limits.options(),
            color: p.color.should_colorize(),
        }
    }
}

pub struct DumpParams {
    pub grammar_path: PathBuf,
    pub limits: LimitParams,
}

impl DumpParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            grammar_path: grammar_path(m),
            limits: LimitParams::from_matches(m),
        }
    }
}

impl From<DumpParams> for DumpArgs {
    fn from(p: DumpParams) -> Self {
        Self {
            grammar_path: p.grammar_path,
            options: p.limits.options(),
        }
    }
}

/// The grammar positional is required, so clap guarantees it is present.
fn grammar_path(m: &ArgMatches) -> PathBuf {
    m.get_one::<PathBuf>("grammar_path")
        .cloned()
        .unwrap_or_else(|| PathBuf::from("-"))
}

/// Utterance words joined with single spaces.
fn utterance(m: &ArgMatches) -> String {
    m.get_many::<String>("utterance")
        .map(|words| words.map(String::as_str).collect::<Vec<_>>().join(" "))
        .unwrap_or_default()
}

/// Parse --color flag into ColorChoice.
fn parse_color(m: &ArgMatches) -> ColorChoice {
    match m.get_one::<String>("color").map(|s| s.as_str()) {
        Some("always") => ColorChoice::Always,
        Some("never") => ColorChoice::Never,
        _ => ColorChoice::Auto,
    }
}
