use indoc::indoc;
use voxgram_core::parse_xml;

use super::*;
use crate::graph::{Expansion, GraphPrinter};

fn build(src: &str) -> Result<CompiledGrammar, BuildError> {
    build_with(src, BuildLimits::default())
}

fn build_with(src: &str, limits: BuildLimits) -> Result<CompiledGrammar, BuildError> {
    let doc = parse_xml(src).expect("test grammar is well-formed XML");
    build_graph(&doc, limits)
}

fn dump(grammar: &CompiledGrammar) -> String {
    GraphPrinter::new(&grammar.graph, &grammar.interner)
        .with_rules(grammar.rules.iter().map(|(rule, node)| (*rule, *node)))
        .dump()
}

#[test]
fn lowers_text_and_choices() {
    let grammar = build(indoc! {r#"
        <grammar root="animal">
          <rule id="animal">
            I am an
            <one-of>
              <item>antler</item>
              <item>aardvark</item>
            </one-of>
          </rule>
        </grammar>
    "#})
    .unwrap();

    assert_eq!(grammar.root_node(), 8);
    insta::assert_snapshot!(dump(&grammar), @r#"
    animal = N8

    N0: token "i am an"
    N1: token "antler"
    N2: seq [N1]
    N3: item N2 {1,1}
    N4: token "aardvark"
    N5: seq [N4]
    N6: item N5 {1,1}
    N7: alt [N3, N6]
    N8: seq [N0, N7]
    "#);
}

#[test]
fn forward_reference_gets_a_copy() {
    let grammar = build(indoc! {r##"
        <grammar root="main">
          <rule id="main">hi <ruleref uri="#name"/></rule>
          <rule id="name">rob</rule>
        </grammar>
    "##})
    .unwrap();

    insta::assert_snapshot!(dump(&grammar), @r#"
    main = N2
    name = N4

    N0: token "hi"
    N1: ref #name → N6
    N2: seq [N0, N1]
    N3: token "rob"
    N4: seq [N3]
    N5: token "rob"
    N6: seq [N5]
    "#);
}

#[test]
fn repeated_references_do_not_share_nodes() {
    let grammar = build(indoc! {r##"
        <grammar root="main">
          <rule id="name">rob</rule>
          <rule id="main"><ruleref uri="#name"/> and <ruleref uri="#name"/></rule>
        </grammar>
    "##})
    .unwrap();

    let main = grammar.root_node();
    let Expansion::Sequence(seq) = grammar.graph.node(main) else {
        panic!("rule body is a sequence");
    };
    let targets: Vec<_> = [seq.children[0], seq.children[2]]
        .into_iter()
        .map(|r| grammar.graph.rule_ref(r).target)
        .collect();

    assert!(targets.iter().all(Option::is_some));
    assert_ne!(targets[0], targets[1]);
    assert_ne!(targets[0], Some(grammar.rules[0]));
}

#[test]
fn recursion_is_truncated_at_depth() {
    let limits = BuildLimits {
        max_rule_depth: 2,
        ..BuildLimits::default()
    };
    let grammar = build_with(
        indoc! {r##"
            <grammar root="digits">
              <rule id="digits">one<item repeat="0-1"><ruleref uri="#digits"/></item></rule>
            </grammar>
        "##},
        limits,
    )
    .unwrap();

    insta::assert_snapshot!(dump(&grammar), @r#"
    digits = N4

    N0: token "one"
    N1: ref #digits → N9
    N2: seq [N1]
    N3: item N2 {0,1}
    N4: seq [N0, N3]
    N5: token "one"
    N6: ref #digits ✗
    N7: seq [N6]
    N8: item N7 {0,1}
    N9: seq [N5, N8]
    "#);
}

#[test]
fn special_rules() {
    let grammar = build(indoc! {r#"
        <grammar root="r">
          <rule id="r">
            <ruleref special="GARBAGE"/>
            <ruleref special="NULL"/>
            <ruleref special="VOID"/>
            <ruleref special="SLM" uri="names"/>
          </rule>
        </grammar>
    "#})
    .unwrap();

    insta::assert_snapshot!(dump(&grammar), @r#"
    r = N4

    N0: garbage
    N1: ε
    N2: alt []
    N3: slm "names"
    N4: seq [N0, N1, N2, N3]
    "#);
}

#[test]
fn item_attributes_tags_and_ignored_elements() {
    let grammar = build(indoc! {r#"
        <grammar root="r" xmlns="http://www.w3.org/2001/06/grammar">
          <meta name="author" content="someone"/>
          <tag>ignored</tag>
          <rule id="r">
            <example>rob rob rob</example>
            <item repeat="3-5" repeat-mode="lazy" weight="0.5">rob</item>
            <tag>out = 15;</tag>
            <token>Fifteen</token>
          </rule>
        </grammar>
    "#})
    .unwrap();

    insta::assert_snapshot!(dump(&grammar), @r#"
    r = N5

    N0: token "rob"
    N1: seq [N0]
    N2: item N1 {3,5} lazy weight=0.5
    N3: tag "out = 15;"
    N4: token "fifteen"
    N5: seq [N2, N3, N4]
    "#);
}

#[test]
fn document_errors() {
    let cases = [
        (r#"<rules root="a"/>"#, BuildError::InvalidDocument("rules".into())),
        (r#"<grammar><rule id="a">x</rule></grammar>"#, BuildError::NoRoot),
        (
            r#"<grammar root="b"><rule id="a">x</rule></grammar>"#,
            BuildError::RootNotFound("b".into()),
        ),
        (
            r#"<grammar root="a"><rule>x</rule></grammar>"#,
            BuildError::UnidentifiableRule,
        ),
        (
            r#"<grammar root="a"><rule id="a">x</rule><rule id="a">y</rule></grammar>"#,
            BuildError::DuplicateRule("a".into()),
        ),
        (
            r#"<grammar root="a"><rule id="a"><ruleref/></rule></grammar>"#,
            BuildError::EmptyRuleRef,
        ),
        (
            r#"<grammar root="a"><rule id="a"><ruleref uri="other.grxml#b"/></rule></grammar>"#,
            BuildError::NonLocalRuleRef("other.grxml#b".into()),
        ),
        (
            r#"<grammar root="a"><rule id="a"><ruleref special="ANY"/></rule></grammar>"#,
            BuildError::UnknownSpecialRule("ANY".into()),
        ),
        (
            r#"<grammar root="a"><rule id="a"><item weight="x">b</item></rule></grammar>"#,
            BuildError::InvalidWeight("x".into()),
        ),
        (
            r#"<grammar root="a"><rule id="a"><one-of><token>b</token></one-of></rule></grammar>"#,
            BuildError::ChoiceRequiresItems("<token>".into()),
        ),
        (
            r#"<grammar root="a"><rule id="a"><one-of>b</one-of></rule></grammar>"#,
            BuildError::ChoiceRequiresItems("text".into()),
        ),
        (
            r#"<grammar root="a"><rule id="a"><para>b</para></rule></grammar>"#,
            BuildError::UnknownElement("para".into()),
        ),
    ];

    for (src, expected) in cases {
        assert_eq!(build(src).unwrap_err(), expected, "{src}");
    }
}

#[test]
fn open_repeat_is_rejected() {
    let err = build(r#"<grammar root="a"><rule id="a"><item repeat="2-">b</item></rule></grammar>"#)
        .unwrap_err();

    insta::assert_snapshot!(
        err.to_string(),
        @"invalid repeat specifier `2-`: repeat must have an explicit upper bound"
    );
}

#[test]
fn unresolved_references_are_reported_together() {
    let err = build(indoc! {r##"
        <grammar root="a">
          <rule id="a"><ruleref uri="#x"/> <ruleref uri="#y"/> <ruleref uri="#x"/></rule>
        </grammar>
    "##})
    .unwrap_err();

    assert_eq!(err, BuildError::UnresolvedRuleRefs(vec!["x".into(), "y".into()]));
    insta::assert_snapshot!(err.to_string(), @"unresolved rule references: x, y");
}

#[test]
fn expansion_is_capped() {
    let limits = BuildLimits {
        max_nodes: 20,
        ..BuildLimits::default()
    };
    let err = build_with(
        indoc! {r##"
            <grammar root="a">
              <rule id="a">x <ruleref uri="#a"/> <ruleref uri="#a"/></rule>
            </grammar>
        "##},
        limits,
    )
    .unwrap_err();

    assert_eq!(err, BuildError::GrammarTooLarge(20));
}
