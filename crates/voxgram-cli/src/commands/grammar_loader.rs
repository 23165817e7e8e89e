//! Grammar loading shared by all commands.

use std::fs;
use std::io::{self, Read};
use std::path::Path;

use voxgram_core::Colors;
use voxgram_lib::{Grammar, GrammarOptions};

/// Read a grammar document from a file, or stdin for `-`.
pub fn read_document(path: &Path) -> Result<String, String> {
    if path.as_os_str() == "-" {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .map_err(|e| format!("failed to read stdin: {}", e))?;
        return Ok(buf);
    }
    fs::read_to_string(path).map_err(|e| format!("failed to read '{}': {}", path.display(), e))
}

/// Read and build a grammar.
pub fn load_grammar(path: &Path, options: GrammarOptions) -> Result<Grammar, String> {
    let src = read_document(path)?;
    Grammar::builder()
        .with_options(options)
        .build_xml(&src)
        .map_err(|e| e.to_string())
}

/// Like `load_grammar`, but reports the error and exits with status 1.
pub fn load_or_exit(path: &Path, options: GrammarOptions, color: bool) -> Grammar {
    load_grammar(path, options).unwrap_or_else(|msg| {
        report_error(&msg, color);
        std::process::exit(1);
    })
}

pub fn report_error(msg: &str, color: bool) {
    let colors = Colors::new(color);
    eprintln!("{}error{}: {}", colors.red, colors.reset, msg);
}
