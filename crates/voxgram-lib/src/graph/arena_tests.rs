use voxgram_core::Interner;

use super::*;

fn dump(g: &ExpansionGraph, interner: &Interner) -> String {
    GraphPrinter::new(g, interner).dump()
}

#[test]
fn add_nodes_and_dump() {
    let interner = Interner::new();
    let mut g = ExpansionGraph::new();

    let tok = g.add_token("i am an");
    let tag = g.add_tag("out = 1;");
    let eps = g.add_token("");
    g.add_sequence(vec![tok, tag, eps]);

    insta::assert_snapshot!(dump(&g, &interner), @r#"
    N0: token "i am an"
    N1: tag "out = 1;"
    N2: ε
    N3: seq [N0, N1, N2]
    "#);
}

#[test]
fn item_dump_shows_mode_and_weight() {
    let interner = Interner::new();
    let mut g = ExpansionGraph::new();

    let tok = g.add_token("rob");
    g.add_item(Item::new(tok, 3, 5));
    g.add_item(
        Item::new(tok, 0, 1)
            .with_mode(RepeatMode::Lazy)
            .with_weight(Some(0.5)),
    );

    insta::assert_snapshot!(dump(&g, &interner), @r#"
    N0: token "rob"
    N1: item N0 {3,5}
    N2: item N0 {0,1} lazy weight=0.5
    "#);
}

#[test]
fn rules_header_is_printed() {
    let mut interner = Interner::new();
    let example = interner.intern("example");
    let mut g = ExpansionGraph::new();

    let root = g.add_garbage();

    let out = GraphPrinter::new(&g, &interner)
        .with_rules([(example, root)])
        .dump();
    insta::assert_snapshot!(out, @r"
    example = N0

    N0: garbage
    ");
}

#[test]
fn copy_gives_fresh_nodes() {
    let interner = Interner::new();
    let mut g = ExpansionGraph::new();
    let a = g.add_token("antler");
    let b = g.add_token("aardvark");
    let ia = g.add_item(Item::once(a));
    let ib = g.add_item(Item::once(b));
    let alt = g.add_alternative(vec![ia, ib]);

    let copy = g.copy_subtree(alt, None, &mut RefCopy::Deep);

    assert_ne!(copy, alt);
    insta::assert_snapshot!(dump(&g, &interner), @r#"
    N0: token "antler"
    N1: token "aardvark"
    N2: item N0 {1,1}
    N3: item N1 {1,1}
    N4: alt [N2, N3]
    N5: token "antler"
    N6: item N5 {1,1}
    N7: token "aardvark"
    N8: item N7 {1,1}
    N9: alt [N6, N8]
    "#);
}

#[test]
fn deep_copy_follows_resolved_references() {
    let mut interner = Interner::new();
    let example = interner.intern("example");
    let animal = interner.intern("animal");
    let mut g = ExpansionGraph::new();

    let body = g.add_token("antler");
    let r = g.add_node(Expansion::RuleRef(RuleRef::new(animal, example)));
    g.rule_ref_mut(r).target = Some(body);

    let copy = g.copy_subtree(r, None, &mut RefCopy::Deep);

    let copied = g.rule_ref(copy);
    assert_eq!(copied.rule, animal);
    assert_eq!(copied.parent, None);
    assert!(copied.is_resolved());
    let target = copied.target.unwrap();
    assert_ne!(target, body);
    assert!(matches!(g.node(target), Expansion::Token(t) if t.words == "antler"));
}

#[test]
fn deferred_copy_collects_references() {
    let mut interner = Interner::new();
    let example = interner.intern("example");
    let animal = interner.intern("animal");
    let mut g = ExpansionGraph::new();

    let body = g.add_token("antler");
    let r = g.add_node(Expansion::RuleRef(RuleRef::new(animal, example)));
    g.rule_ref_mut(r).target = Some(body);
    let seq = g.add_sequence(vec![r]);
    let before = g.len();

    let mut pending = Vec::new();
    let copy = g.copy_subtree(seq, Some(r), &mut RefCopy::Defer(&mut pending));

    assert_eq!(g.len(), before + 2);
    assert_eq!(pending.len(), 1);
    let deferred = g.rule_ref(pending[0]);
    assert!(!deferred.is_resolved());
    assert_eq!(deferred.parent, Some(r));
    assert!(matches!(g.node(copy), Expansion::Sequence(s) if s.children == pending));
}

#[test]
fn truncated_references_are_not_collected() {
    let mut interner = Interner::new();
    let rule = interner.intern("loop");
    let mut g = ExpansionGraph::new();

    let r = g.add_node(Expansion::RuleRef(RuleRef::new(rule, rule)));
    g.rule_ref_mut(r).truncated = true;

    let mut pending = Vec::new();
    let copy = g.copy_subtree(r, None, &mut RefCopy::Defer(&mut pending));

    assert!(pending.is_empty());
    assert!(g.rule_ref(copy).truncated);
}

#[test]
fn activations_count_chain_and_origin() {
    let mut interner = Interner::new();
    let digits = interner.intern("digits");
    let digit = interner.intern("digit");
    let mut g = ExpansionGraph::new();

    // digits definition refers to itself, whose copy refers to digit
    let outer = g.add_node(Expansion::RuleRef(RuleRef::new(digits, digits)));
    let inner = g.add_node(Expansion::RuleRef(RuleRef {
        parent: Some(outer),
        ..RuleRef::new(digits, digits)
    }));
    let leaf = g.add_node(Expansion::RuleRef(RuleRef {
        parent: Some(inner),
        ..RuleRef::new(digit, digits)
    }));

    assert_eq!(g.activations(outer, digits), 2);
    assert_eq!(g.activations(inner, digits), 3);
    assert_eq!(g.activations(leaf, digit), 1);
    assert_eq!(g.activations(leaf, digits), 3);
}
