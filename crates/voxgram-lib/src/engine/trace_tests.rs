use voxgram_core::{Colors, Interner};

use super::*;
use crate::graph::{Expansion, ExpansionGraph, RuleRef};

#[test]
fn default_verbosity_shows_terminals() {
    let interner = Interner::new();
    let mut g = ExpansionGraph::new();
    let a = g.add_token("i am");
    let b = g.add_token("rob");
    let seq = g.add_sequence(vec![a, b]);

    let input = "i am rob";
    let tracer = PrintTracer::new(input, &interner, Verbosity::Default, Colors::OFF);
    let mut matcher = Matcher::new(&mut g, input, MatchMode::Exact).with_tracer(tracer);
    matcher.begin(seq);
    assert_eq!(matcher.next(seq), Ok(""));
    assert_eq!(matcher.next(seq), Err(MatchError::NoMatch));
    let tracer = matcher.into_tracer();

    insta::assert_snapshot!(tracer.dump(), @r#"
    N0 token "i am" → "rob"
    N1 token "rob" → ""
    N1 token "rob" ✗ no match
    N0 token "i am" ✗ no match
    "#);
}

#[test]
fn verbose_shows_resets_and_nesting() {
    let mut interner = Interner::new();
    let greeting = interner.intern("greeting");
    let mut g = ExpansionGraph::new();
    let body = g.add_token("hello");
    let reference = g.add_node(Expansion::RuleRef(RuleRef::new(greeting, greeting)));
    g.rule_ref_mut(reference).target = Some(body);

    let input = "hello";
    let mut tracer = PrintTracer::new(input, &interner, Verbosity::Verbose, Colors::OFF);
    let mut matcher = Matcher::new(&mut g, input, MatchMode::Exact).with_tracer(&mut tracer);
    matcher.begin(reference);
    assert_eq!(matcher.next(reference), Ok(""));

    insta::assert_snapshot!(tracer.dump(), @r#"
    N1 ref #greeting @0
    N0 token "hello" @0
      N0 token "hello" → ""
    N1 ref #greeting → ""
    "#);
}

#[test]
fn rejected_spans_are_traced() {
    let interner = Interner::new();
    let mut g = ExpansionGraph::new();
    let scored = g.add_scored("names");
    let scorer = |_model: &str, _span: &str| -2000.0;

    let input = "rob";
    let mut tracer = PrintTracer::new(input, &interner, Verbosity::Default, Colors::OFF);
    let mut matcher = Matcher::new(&mut g, input, MatchMode::Exact)
        .with_scorer(&scorer)
        .with_tracer(&mut tracer);
    matcher.begin(scored);
    assert_eq!(matcher.next(scored), Err(MatchError::NoMatch));

    assert_eq!(
        tracer.lines(),
        [
            r#"  N0 reject "rob" score -2000"#,
            r#"N0 slm "names" ✗ no match"#,
        ]
    );
}

#[test]
fn noop_tracer_still_matches() {
    let mut g = ExpansionGraph::new();
    let token = g.add_token("rob");

    let mut matcher = Matcher::new(&mut g, "rob", MatchMode::Exact).with_tracer(NoopTracer);
    matcher.begin(token);
    assert_eq!(matcher.next(token), Ok(""));
}
