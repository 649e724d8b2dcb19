//! Serializer: canonical reconstruction, round-trip balance, reparse
//! stability, and terminal display.

use rstest::rstest;

use rsquery::domain::{display_tree, parse, render, Grammar};
use rsquery::util::testing;

#[ctor::ctor]
fn init() {
    testing::init_test_setup();
}

fn roundtrip(input: &str, grammar: &Grammar) -> String {
    render(&parse(input, grammar).expect("parse"), grammar)
}

#[rstest]
#[case("a & b", "a AND b")]
#[case("a | b", "a OR b")]
#[case("a - b", "a NOT b")]
#[case("(a & (b | c))", "(a AND (b OR c))")]
#[case("\"alpha\" | beta", "\"alpha\" OR beta")]
#[case("(a | b) & c", "(a OR b) AND c")]
#[case("alpha", "alpha")]
#[case("alpha   beta", "alpha beta")]
#[case("", "")]
#[case("   ", "")]
fn given_expression_when_rendering_then_canonical_form(
    #[case] input: &str,
    #[case] expected: &str,
) {
    assert_eq!(roundtrip(input, &Grammar::default()), expected);
}

#[test]
fn given_custom_operator_spelling_when_rendering_then_canonical_name() {
    let grammar = Grammar::default().with_operators("&&", "||", "!!");

    assert_eq!(roundtrip("a || b", &grammar), "a OR b");
    assert_eq!(roundtrip("a !! b", &grammar), "a NOT b");
}

#[rstest]
#[case("(a & (b | c))")]
#[case("((x))")]
#[case("\"q\" & (a | \"b c\")")]
fn given_balanced_input_when_round_tripping_then_delimiters_balanced(#[case] input: &str) {
    let rendered = roundtrip(input, &Grammar::default());

    let count = |s: &str, ch: char| s.chars().filter(|&c| c == ch).count();
    assert_eq!(count(&rendered, '('), count(input, '('));
    assert_eq!(count(&rendered, ')'), count(input, ')'));
    assert_eq!(count(&rendered, '"'), count(input, '"'));
}

#[test]
fn given_auto_closed_tree_when_rendering_then_output_balanced() {
    assert_eq!(roundtrip("(a & b", &Grammar::default()), "(a AND b)");
}

#[rstest]
#[case("a & b")]
#[case("(a & (b | c))")]
#[case("(a) (b)")]
#[case("- alpha")]
#[case("\"alpha beta\" & (g | d)")]
#[case("a&b c")]
fn given_rendered_output_when_reparsed_then_stable(#[case] input: &str) {
    let grammar = Grammar::default();

    let once = roundtrip(input, &grammar);
    let twice = roundtrip(&once, &grammar);
    let thrice = roundtrip(&twice, &grammar);

    // Reparsing a rendered tree is stable after one canonicalization
    assert_eq!(twice, thrice);
}

#[rstest]
#[case("a & b")]
#[case("(a & (b | c))")]
#[case("(a) (b)")]
#[case("alpha beta")]
fn given_canonical_text_when_reparsed_then_fixed_point(#[case] input: &str) {
    let grammar = Grammar::default();

    let once = roundtrip(input, &grammar);
    let twice = roundtrip(&once, &grammar);

    assert_eq!(once, twice);
}

#[test]
fn given_unmapped_delimiter_in_tree_when_rendering_then_opening_mirrored() {
    // Parse with angle brackets, render with the default grammar that does
    // not know them: reconstruction stays total
    let angled = Grammar::default().with_delimiters([('<', '>')]);
    let tree = parse("<a>", &angled).expect("parse");

    assert_eq!(render(&tree, &Grammar::default()), "<a<");
}

#[test]
fn given_expression_when_collecting_operands_then_preorder_texts() {
    let tree = parse("(a & (b | c)) - d", &Grammar::default()).expect("parse");

    assert_eq!(tree.operands(), ["a", "b", "c", "d"]);
}

#[test]
fn given_nested_expression_when_measuring_then_depth_matches_nesting() {
    let tree = parse("(a & (b | c))", &Grammar::default()).expect("parse");

    assert_eq!(tree.depth(), 3);
}

#[test]
fn given_tree_when_displaying_then_rows_labeled() {
    let grammar = Grammar::default();
    let tree = parse("(a & b) | c", &grammar).expect("parse");

    let rows = display_tree(&tree, &grammar);

    assert_eq!(rows.len(), 2);
    let first = rows[0].to_string();
    assert!(first.contains("()  [OR]"));
    assert!(first.contains("a  [AND]"));
    assert!(first.contains('b'));
    let second = rows[1].to_string();
    assert!(second.contains('c'));
}
