use std::path::PathBuf;

use voxgram_lib::GrammarOptions;

use super::grammar_loader::load_or_exit;

pub struct CheckArgs {
    pub grammar_path: PathBuf,
    pub options: GrammarOptions,
    pub color: bool,
}

pub fn run(args: CheckArgs) {
    load_or_exit(&args.grammar_path, args.options, args.color);

    // Silent on success (like cargo check)
}
