use std::io::Write;
use std::path::Path;

use voxgram_lib::GrammarOptions;

use super::grammar_loader::load_grammar;

const NAMES: &str = r##"<grammar root="intro">
  <rule id="intro">my name is <ruleref uri="#name"/></rule>
  <rule id="name"><one-of><item>rob</item><item>kaustav</item></one-of></rule>
</grammar>"##;

#[test]
fn loads_grammar_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(NAMES.as_bytes()).unwrap();
    file.flush().unwrap();

    let mut grammar = load_grammar(file.path(), GrammarOptions::default()).unwrap();
    assert_eq!(grammar.root(), "intro");
    assert!(grammar.has_match("my name is rob"));
}

#[test]
fn options_reach_the_grammar() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(NAMES.as_bytes()).unwrap();
    file.flush().unwrap();

    let options = GrammarOptions::new().with_exec_fuel(7);
    let grammar = load_grammar(file.path(), options).unwrap();
    assert_eq!(grammar.options().exec_fuel(), 7);
}

#[test]
fn reports_build_errors() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(br#"<grammar root="missing"/>"#).unwrap();
    file.flush().unwrap();

    let err = load_grammar(file.path(), GrammarOptions::default()).unwrap_err();
    assert_eq!(err, "invalid grammar: root rule `missing` is not defined");
}

#[test]
fn reports_missing_files() {
    let err = load_grammar(
        Path::new("/nonexistent/voxgram/names.grxml"),
        GrammarOptions::default(),
    )
    .unwrap_err();
    assert!(err.starts_with("failed to read '/nonexistent/voxgram/names.grxml'"));
}
