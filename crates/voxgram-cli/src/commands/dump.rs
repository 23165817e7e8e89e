use std::path::PathBuf;

use voxgram_lib::GrammarOptions;

use super::grammar_loader::load_or_exit;

pub struct DumpArgs {
    pub grammar_path: PathBuf,
    pub options: GrammarOptions,
}

pub fn run(args: DumpArgs) {
    let grammar = load_or_exit(&args.grammar_path, args.options, false);
    print!("{}", grammar.dump());
}
