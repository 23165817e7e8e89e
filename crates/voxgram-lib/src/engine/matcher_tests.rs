use voxgram_core::Interner;

use super::*;
use crate::graph::{Expansion, ExpansionGraph, Item, NodeId, RepeatMode, RuleRef};

fn drain<T: Tracer>(matcher: &mut Matcher<'_, '_, T>, root: NodeId) -> String {
    let mut lines = Vec::new();
    loop {
        match matcher.next(root) {
            Ok(rest) => lines.push(format!("{:?}", rest)),
            Err(e) => {
                lines.push(format!("✗ {}", e));
                break;
            }
        }
        assert!(lines.len() < 64, "runaway enumeration");
    }
    lines.join("\n")
}

fn run(g: &mut ExpansionGraph, root: NodeId, input: &str, mode: MatchMode) -> String {
    let mut matcher = Matcher::new(g, input, mode);
    matcher.begin(root);
    drain(&mut matcher, root)
}

fn alternative(g: &mut ExpansionGraph, words: &[&str]) -> NodeId {
    let items = words
        .iter()
        .map(|w| {
            let token = g.add_token(*w);
            g.add_item(Item::once(token))
        })
        .collect();
    g.add_alternative(items)
}

fn repeated(g: &mut ExpansionGraph, words: &str, min: u32, max: u32, mode: RepeatMode) -> NodeId {
    let token = g.add_token(words);
    g.add_item(Item::new(token, min, max).with_mode(mode))
}

#[test]
fn token_matches_whole_input() {
    let mut g = ExpansionGraph::new();
    let token = g.add_token("antler");

    insta::assert_snapshot!(run(&mut g, token, "antler", MatchMode::Exact), @r#"
    ""
    ✗ no match
    "#);
}

#[test]
fn token_consumes_following_space() {
    let mut g = ExpansionGraph::new();
    let token = g.add_token("i am");

    insta::assert_snapshot!(run(&mut g, token, "i am rob", MatchMode::Exact), @r#"
    "rob"
    ✗ no match
    "#);
}

#[test]
fn token_respects_word_boundary() {
    let mut g = ExpansionGraph::new();
    let token = g.add_token("rob");

    insta::assert_snapshot!(run(&mut g, token, "robert", MatchMode::Exact), @"✗ no match");
}

#[test]
fn token_mismatch() {
    let mut g = ExpansionGraph::new();
    let token = g.add_token("antler");

    insta::assert_snapshot!(run(&mut g, token, "aardvark", MatchMode::Prefix), @"✗ no match");
}

#[test]
fn token_longer_than_input() {
    let mut g = ExpansionGraph::new();
    let token = g.add_token("antler");

    insta::assert_snapshot!(run(&mut g, token, "ant", MatchMode::Prefix), @r#"
    ""
    ✗ no match
    "#);
    insta::assert_snapshot!(
        run(&mut g, token, "ant", MatchMode::Exact),
        @"✗ input is an incomplete prefix of a valid utterance"
    );
}

#[test]
fn epsilon_token_consumes_nothing() {
    let mut g = ExpansionGraph::new();
    let token = g.add_token("");

    insta::assert_snapshot!(run(&mut g, token, "hello there", MatchMode::Exact), @r#"
    "hello there"
    ✗ no match
    "#);
}

#[test]
fn tag_matches_once_without_consuming() {
    let mut g = ExpansionGraph::new();
    let tag = g.add_tag("out = 1;");

    insta::assert_snapshot!(run(&mut g, tag, "rob", MatchMode::Exact), @r#"
    "rob"
    ✗ no match
    "#);
}

#[test]
fn sequence_of_tokens() {
    let mut g = ExpansionGraph::new();
    let a = g.add_token("i am");
    let b = g.add_token("rob");
    let seq = g.add_sequence(vec![a, b]);

    insta::assert_snapshot!(run(&mut g, seq, "i am rob", MatchMode::Exact), @r#"
    ""
    ✗ no match
    "#);
}

#[test]
fn sequence_prefix_input() {
    let mut g = ExpansionGraph::new();
    let a = g.add_token("i am");
    let b = g.add_token("rob");
    let seq = g.add_sequence(vec![a, b]);

    insta::assert_snapshot!(run(&mut g, seq, "i am", MatchMode::Prefix), @r#"
    ""
    ✗ no match
    "#);
    insta::assert_snapshot!(
        run(&mut g, seq, "i am", MatchMode::Exact),
        @"✗ input is an incomplete prefix of a valid utterance"
    );
}

#[test]
fn empty_sequence_yields_once() {
    let mut g = ExpansionGraph::new();
    let seq = g.add_sequence(vec![]);

    insta::assert_snapshot!(run(&mut g, seq, "rob", MatchMode::Exact), @r#"
    "rob"
    ✗ no match
    "#);
}

#[test]
fn sequence_backtracks_into_garbage() {
    let mut g = ExpansionGraph::new();
    let intro = g.add_token("my name is");
    let garbage = g.add_garbage();
    let seq = g.add_sequence(vec![intro, garbage]);

    insta::assert_snapshot!(run(&mut g, seq, "my name is rob old", MatchMode::Exact), @r#"
    "old"
    ""
    ✗ no match
    "#);
}

#[test]
fn sequence_garbage_at_end_of_input() {
    let mut g = ExpansionGraph::new();
    let intro = g.add_token("my name is");
    let garbage = g.add_garbage();
    let seq = g.add_sequence(vec![intro, garbage]);

    insta::assert_snapshot!(
        run(&mut g, seq, "my name is", MatchMode::Exact),
        @"✗ input is an incomplete prefix of a valid utterance"
    );
}

#[test]
fn alternative_in_document_order() {
    let mut g = ExpansionGraph::new();
    let greeting = alternative(&mut g, &["hi", "hi there"]);
    let rest = g.add_garbage();
    let seq = g.add_sequence(vec![greeting, rest]);

    insta::assert_snapshot!(run(&mut g, seq, "hi there kaustav", MatchMode::Exact), @r#"
    "kaustav"
    ""
    ""
    ✗ no match
    "#);
}

#[test]
fn alternative_reports_longer_choice_as_prefix() {
    let mut g = ExpansionGraph::new();
    let names = alternative(
        &mut g,
        &["rob", "rob", "ram", "ram malav", "kaustav", "kaustav datta"],
    );

    insta::assert_snapshot!(run(&mut g, names, "kaustav", MatchMode::Exact), @r#"
    ""
    ✗ input is an incomplete prefix of a valid utterance
    "#);
}

#[test]
fn alternative_exact_and_prefix() {
    let mut g = ExpansionGraph::new();
    let animals = alternative(&mut g, &["antler", "aardvark"]);

    insta::assert_snapshot!(run(&mut g, animals, "aardvark", MatchMode::Exact), @r#"
    ""
    ✗ no match
    "#);
    insta::assert_snapshot!(
        run(&mut g, animals, "aa", MatchMode::Exact),
        @"✗ input is an incomplete prefix of a valid utterance"
    );
    insta::assert_snapshot!(run(&mut g, animals, "aa", MatchMode::Prefix), @r#"
    ""
    ✗ no match
    "#);
    insta::assert_snapshot!(run(&mut g, animals, "zebra", MatchMode::Prefix), @"✗ no match");
}

#[test]
fn empty_alternative_never_matches() {
    let mut g = ExpansionGraph::new();
    let void = g.add_alternative(vec![]);

    insta::assert_snapshot!(run(&mut g, void, "", MatchMode::Prefix), @"✗ no match");
}

#[test]
fn item_normal_yields_longest_first() {
    let mut g = ExpansionGraph::new();
    let item = repeated(&mut g, "rob", 3, 5, RepeatMode::Normal);

    insta::assert_snapshot!(run(&mut g, item, "rob rob rob rob rob", MatchMode::Exact), @r#"
    ""
    "rob"
    "rob rob"
    ✗ input is an incomplete prefix of a valid utterance
    "#);
}

#[test]
fn item_lazy_yields_shortest_first() {
    let mut g = ExpansionGraph::new();
    let item = repeated(&mut g, "rob", 3, 5, RepeatMode::Lazy);

    insta::assert_snapshot!(run(&mut g, item, "rob rob rob rob rob", MatchMode::Exact), @r#"
    "rob rob"
    "rob"
    ""
    ✗ input is an incomplete prefix of a valid utterance
    "#);
}

#[test]
fn item_greedy_yields_only_longest() {
    let mut g = ExpansionGraph::new();
    let item = repeated(&mut g, "rob", 3, 5, RepeatMode::Greedy);

    insta::assert_snapshot!(run(&mut g, item, "rob rob rob rob rob", MatchMode::Exact), @r#"
    ""
    ✗ input is an incomplete prefix of a valid utterance
    "#);
}

#[test]
fn single_item_at_end_of_input_is_exhausted() {
    let mut g = ExpansionGraph::new();
    let once = repeated(&mut g, "rob", 1, 1, RepeatMode::Normal);
    let upto = repeated(&mut g, "rob", 1, 2, RepeatMode::Normal);

    insta::assert_snapshot!(run(&mut g, once, "rob", MatchMode::Exact), @r#"
    ""
    ✗ no match
    "#);
    insta::assert_snapshot!(run(&mut g, upto, "rob rob", MatchMode::Exact), @r#"
    ""
    "rob"
    ✗ input is an incomplete prefix of a valid utterance
    "#);
}

#[test]
fn item_below_minimum() {
    let mut g = ExpansionGraph::new();
    let item = repeated(&mut g, "rob", 3, 5, RepeatMode::Normal);

    insta::assert_snapshot!(
        run(&mut g, item, "rob rob", MatchMode::Exact),
        @"✗ input is an incomplete prefix of a valid utterance"
    );
    insta::assert_snapshot!(run(&mut g, item, "rob bob rob", MatchMode::Exact), @"✗ no match");
}

#[test]
fn optional_item_backtracks() {
    let mut g = ExpansionGraph::new();
    let please = repeated(&mut g, "please", 0, 1, RepeatMode::Normal);
    let stop = g.add_token("stop");
    let seq = g.add_sequence(vec![please, stop]);

    insta::assert_snapshot!(run(&mut g, seq, "stop", MatchMode::Exact), @r#"
    ""
    ✗ no match
    "#);
    insta::assert_snapshot!(run(&mut g, seq, "please stop", MatchMode::Exact), @r#"
    ""
    ✗ no match
    "#);
}

#[test]
fn zero_width_repetitions_are_skipped() {
    let mut g = ExpansionGraph::new();
    let item = repeated(&mut g, "", 0, 3, RepeatMode::Normal);

    insta::assert_snapshot!(run(&mut g, item, "abc", MatchMode::Exact), @r#"
    "abc"
    ✗ no match
    "#);
}

#[test]
fn repetitions_get_private_copies() {
    let mut g = ExpansionGraph::new();
    let item = repeated(&mut g, "rob", 1, 3, RepeatMode::Normal);
    let before = g.len();

    run(&mut g, item, "rob rob rob", MatchMode::Exact);

    assert_eq!(g.len(), before + 2);
    let Expansion::Item(item) = g.node(item) else {
        panic!("expected item");
    };
    assert_eq!(item.reps.len(), 3);
}

#[test]
fn garbage_offers_growing_spans() {
    let mut g = ExpansionGraph::new();
    let garbage = g.add_garbage();

    insta::assert_snapshot!(run(&mut g, garbage, "my name is rob", MatchMode::Exact), @r#"
    "name is rob"
    "is rob"
    "rob"
    ""
    ✗ no match
    "#);
}

#[test]
fn garbage_on_empty_input() {
    let mut g = ExpansionGraph::new();
    let garbage = g.add_garbage();

    insta::assert_snapshot!(run(&mut g, garbage, "", MatchMode::Prefix), @r#"
    ""
    ✗ no match
    "#);
    insta::assert_snapshot!(
        run(&mut g, garbage, "", MatchMode::Exact),
        @"✗ input is an incomplete prefix of a valid utterance"
    );
}

#[test]
fn scored_wildcard_skips_spans_below_floor() {
    let mut g = ExpansionGraph::new();
    let scored = g.add_scored("names");
    let scorer = |_model: &str, span: &str| {
        if span.contains("rob") { -2000.0 } else { -1.5 }
    };

    let mut matcher = Matcher::new(&mut g, "hi there rob", MatchMode::Exact).with_scorer(&scorer);
    matcher.begin(scored);
    let out = drain(&mut matcher, scored);

    insta::assert_snapshot!(out, @r#"
    "there rob"
    "rob"
    ✗ no match
    "#);
}

#[test]
fn scored_wildcard_records_score() {
    let mut g = ExpansionGraph::new();
    let scored = g.add_scored("names");

    let mut matcher = Matcher::new(&mut g, "rob", MatchMode::Exact);
    matcher.begin(scored);
    assert_eq!(matcher.next(scored), Ok(""));

    let Expansion::Scored(s) = matcher.graph().node(scored) else {
        panic!("expected scored wildcard");
    };
    assert_eq!(s.score(), UniformScorer::DEFAULT.0);
}

#[test]
fn score_floor_is_configurable() {
    let mut g = ExpansionGraph::new();
    let scored = g.add_scored("names");
    let limits = MatchLimits {
        score_floor: 0.0,
        ..MatchLimits::default()
    };

    let mut matcher = Matcher::new(&mut g, "rob", MatchMode::Exact).with_limits(limits);
    matcher.begin(scored);
    assert_eq!(matcher.next(scored), Err(MatchError::NoMatch));
}

#[test]
fn rule_ref_delegates_to_target() {
    let mut interner = Interner::new();
    let name = interner.intern("name");
    let mut g = ExpansionGraph::new();
    let body = g.add_token("rob");
    let reference = g.add_node(Expansion::RuleRef(RuleRef::new(name, name)));

    insta::assert_snapshot!(run(&mut g, reference, "rob", MatchMode::Exact), @"✗ no match");

    g.rule_ref_mut(reference).target = Some(body);
    insta::assert_snapshot!(run(&mut g, reference, "rob", MatchMode::Exact), @r#"
    ""
    ✗ no match
    "#);
}

#[test]
fn fuel_exhaustion_is_fatal() {
    let mut g = ExpansionGraph::new();
    let a = g.add_token("a");
    let b = g.add_token("b");
    let c = g.add_token("c");
    let seq = g.add_sequence(vec![a, b, c]);
    let limits = MatchLimits {
        exec_fuel: 3,
        ..MatchLimits::default()
    };

    let mut matcher = Matcher::new(&mut g, "a b c", MatchMode::Exact).with_limits(limits);
    matcher.begin(seq);
    let err = matcher.next(seq).unwrap_err();

    assert_eq!(err, MatchError::FuelExhausted(3));
    assert!(err.is_fatal());
}
