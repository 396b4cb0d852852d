// tests/parser_tests.rs

use intexpr::{
    build, parse, parse_tree, ErrorKind, Expr, Grammar, IntExprError, ParseOptions, ParseTree,
    Symbol,
};

fn additive() -> ParseOptions {
    ParseOptions::default().with_grammar(Grammar::Additive)
}

// ---
// Scenarios
// ---

#[test]
fn test_zero_builds_number() {
    let expr = parse("0", &additive()).unwrap();
    assert_eq!(expr, Expr::Number(0));
    assert_eq!(expr.value(), Ok(0));
}

#[test]
fn test_nested_sum_scenario() {
    let expr = parse("54+(2+89)", &additive()).unwrap();
    assert_eq!(
        expr,
        Expr::plus(Expr::number(54), Expr::plus(Expr::number(2), Expr::number(89)))
    );
    assert_eq!(expr.value(), Ok(145));
    assert_eq!(expr.render(), "(54)+((2)+(89))");
}

#[test]
fn test_sum_is_left_associative() {
    let expr = parse("1+2+3", &additive()).unwrap();
    assert_eq!(
        expr,
        Expr::plus(Expr::plus(Expr::number(1), Expr::number(2)), Expr::number(3))
    );
    assert_eq!(expr.value(), Ok(6));
}

#[test]
fn test_both_grammars_agree_on_sums() {
    for input in ["7", "1+2+3", "54+(2+89)", " ( 1 + ( 2 ) ) + 3 ", "((((4))))"] {
        let a = parse(input, &additive()).unwrap();
        let b = parse(input, &ParseOptions::default()).unwrap();
        assert_eq!(a, b, "input: {:?}", input);
    }
}

#[test]
fn test_multiplication_precedence() {
    let expr = parse("2+3*4", &ParseOptions::default()).unwrap();
    assert_eq!(
        expr,
        Expr::plus(Expr::number(2), Expr::times(Expr::number(3), Expr::number(4)))
    );
    assert_eq!(expr.value(), Ok(14));

    let grouped = parse("(2+3)*4", &ParseOptions::default()).unwrap();
    assert_eq!(grouped.value(), Ok(20));
    assert_eq!(grouped.render(), "((2)+(3))*(4)");
}

#[test]
fn test_products_are_left_associative() {
    let expr = parse("2*3*4", &ParseOptions::default()).unwrap();
    assert_eq!(
        expr,
        Expr::times(Expr::times(Expr::number(2), Expr::number(3)), Expr::number(4))
    );
}

#[test]
fn test_whitespace_is_skipped() {
    let expr = parse(" 1 +\t2\n", &additive()).unwrap();
    assert_eq!(expr.value(), Ok(3));
}

// ---
// Failures
// ---

#[test]
fn test_additive_grammar_rejects_times() {
    let err = parse("2*3", &additive()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ParseFailure);
}

#[test]
fn test_unclosed_paren_fails() {
    let err = parse("(1+2", &ParseOptions::default()).unwrap_err();
    assert!(matches!(err, IntExprError::ParseFailure { span: Some(_), .. }));
}

#[test]
fn test_literal_too_large_is_invalid() {
    let err = parse("99999999999", &ParseOptions::default()).unwrap_err();
    match err {
        IntExprError::InvalidLiteral { value, span: Some(span) } => {
            assert_eq!(value, "99999999999");
            assert_eq!(span.offset(), 0);
            assert_eq!(span.len(), 11);
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn test_deep_nesting_is_rejected() {
    let options = ParseOptions::default().with_max_depth(10);
    let input = format!("{}1{}", "(".repeat(11), ")".repeat(11));
    assert_eq!(parse(&input, &options).unwrap_err().kind(), ErrorKind::TooDeep);

    let within = format!("{}1{}", "(".repeat(10), ")".repeat(10));
    assert_eq!(parse(&within, &options).and_then(|e| e.value()), Ok(1));
}

#[test]
fn test_long_flat_sum_is_accepted() {
    let options = ParseOptions::default().with_max_depth(10);
    let long_sum = vec!["1"; 1_000].join("+");
    let expr = parse(&long_sum, &options).unwrap();
    assert_eq!(expr.value(), Ok(1_000));
    assert_eq!(expr.depth(), 1_000);

    let mixed = vec!["2*3"; 1_000].join(" + ");
    assert_eq!(
        parse(&mixed, &ParseOptions::default()).and_then(|e| e.value()),
        Ok(6_000)
    );
}

// ---
// Hand-built trees
// ---

#[test]
fn test_hand_built_empty_sum_is_invariant_violation() {
    let tree = ParseTree::node(Symbol::Sum, vec![]);
    assert_eq!(build(&tree).unwrap_err().kind(), ErrorKind::InvariantViolation);
}

#[test]
fn test_parsed_tree_builds_same_as_parse() {
    let tree = parse_tree("3 + (4 + 5)", &additive()).unwrap();
    assert_eq!(tree.symbol(), Symbol::Root);
    assert_eq!(build(&tree), parse("3 + (4 + 5)", &additive()));
}
