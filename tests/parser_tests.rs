// tests/parser_tests.rs

use sprig_lang::ast::{BinOp, Expr, NodeKind, Token, TokenKind, UnaryOp};
use sprig_lang::error::{Error, LexError, ParseError};
use sprig_lang::lexer::tokenize;
use sprig_lang::parser::{MAX_DEPTH, Parser, parse, parse_str};
use sprig_lang::value::Value;

fn shape(input: &str) -> String {
    parse_str(input)
        .unwrap_or_else(|e| panic!("parse error for {:?}: {}", input, e))
        .to_string()
}

fn parse_err(input: &str) -> ParseError {
    match parse_str(input) {
        Err(Error::Parse(e)) => e,
        other => panic!("Expected parse error for {:?}, got {:?}", input, other),
    }
}

// ============================================================================
// Primary expressions
// ============================================================================

#[test]
fn test_literals() {
    assert_eq!(parse_str("42").unwrap(), Expr::Literal(Value::Integer(42)));
    assert_eq!(parse_str("2.5").unwrap(), Expr::Literal(Value::Float(2.5)));
    assert_eq!(parse_str("'hi'").unwrap(), Expr::Literal(Value::from("hi")));
    assert_eq!(parse_str("true").unwrap(), Expr::Literal(Value::Boolean(true)));
    assert_eq!(parse_str("false").unwrap(), Expr::Literal(Value::Boolean(false)));
    assert_eq!(parse_str("null").unwrap(), Expr::Literal(Value::Null));
    assert_eq!(parse_str("undefined").unwrap(), Expr::Literal(Value::Undefined));
}

#[test]
fn test_identifier() {
    let expr = parse_str("carlos").unwrap();
    assert_eq!(expr, Expr::Identifier("carlos".to_string()));
    assert_eq!(expr.kind(), NodeKind::Identifier);
}

#[test]
fn test_grouping_is_recorded() {
    let expr = parse_str("(true)").unwrap();
    assert_eq!(expr, Expr::grouping(Expr::literal(true)));
    assert_eq!(expr.kind(), NodeKind::Grouping);
}

// ============================================================================
// Precedence and associativity
// ============================================================================

#[test]
fn test_and_binds_tighter_than_or() {
    assert_eq!(shape("a || b && c"), "(a || (b && c))");
    assert_eq!(shape("a && b || c"), "((a && b) || c)");
}

#[test]
fn test_equality_is_left_associative() {
    assert_eq!(shape("a = b = c"), "((a = b) = c)");
}

#[test]
fn test_or_and_is_left_associative() {
    assert_eq!(shape("a || b || c"), "((a || b) || c)");
    assert_eq!(shape("a && b && c"), "((a && b) && c)");
}

#[test]
fn test_not_binds_tighter_than_and() {
    assert_eq!(shape("!a && b"), "((!a) && b)");
}

#[test]
fn test_double_negation() {
    assert_eq!(shape("!!a"), "(!(!a))");
}

#[test]
fn test_coalescing_binds_tighter_than_equality() {
    assert_eq!(shape("a ?? b = c"), "((a ?? b) = c)");
    assert_eq!(shape("a ?? b ?? c"), "((a ?? b) ?? c)");
}

#[test]
fn test_not_binds_tighter_than_coalescing() {
    assert_eq!(shape("!a ?? b"), "((!a) ?? b)");
}

#[test]
fn test_field_access_binds_tightest() {
    assert_eq!(shape("!a.b"), "(!(a.b))");
    assert_eq!(shape("a.b = c?.d"), "((a.b) = (c?.d))");
}

#[test]
fn test_parentheses_override_precedence() {
    assert_eq!(shape("(a || b) && c"), "(((a || b)) && c)");
}

#[test]
fn test_access_on_grouping() {
    assert_eq!(shape("(a ?? b).c"), "(((a ?? b)).c)");
}

// ============================================================================
// Field access
// ============================================================================

#[test]
fn test_field_access_chain_grows_left() {
    let expr = parse_str("a.b.c").unwrap();
    let expected = Expr::binary(
        BinOp::FieldAccess,
        Expr::binary(
            BinOp::FieldAccess,
            Expr::identifier("a"),
            Expr::identifier("b"),
        ),
        Expr::identifier("c"),
    );
    assert_eq!(expr, expected);
}

#[test]
fn test_mixed_access_chain() {
    match parse_str("data.type?.name").unwrap() {
        Expr::Binary {
            op: BinOp::NullableFieldAccess,
            left,
            right,
        } => {
            assert!(matches!(
                *left,
                Expr::Binary {
                    op: BinOp::FieldAccess,
                    ..
                }
            ));
            assert_eq!(*right, Expr::identifier("name"));
        }
        other => panic!("Expected nullable field access, got {:?}", other),
    }
}

#[test]
fn test_field_access_right_side_is_identifier() {
    for input in ["a.b", "a?.b", "x.y.z", "(p).q?.r"] {
        let expr = parse_str(input).unwrap();
        let Expr::Binary { op, right, .. } = &expr else {
            panic!("Expected binary for {}", input);
        };
        assert!(op.is_field_access());
        assert_eq!(right.kind(), NodeKind::Identifier, "Failed for input: {}", input);
    }
}

#[test]
fn test_field_name_must_be_identifier() {
    for input in ["a.'b'", "a.1", "a?.(b)", "a.true"] {
        assert!(
            matches!(parse_err(input), ParseError::UnexpectedToken { .. }),
            "Failed for input: {}",
            input
        );
    }
}

#[test]
fn test_field_access_missing_name() {
    assert!(matches!(parse_err("a."), ParseError::UnexpectedEnd { .. }));
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn test_missing_closing_paren() {
    assert_eq!(
        parse_err("(a"),
        ParseError::UnexpectedEnd {
            expected: "')'".to_string()
        }
    );
}

#[test]
fn test_wrong_closing_token() {
    assert!(matches!(
        parse_err("(a b"),
        ParseError::UnexpectedToken { position: 3, .. }
    ));
}

#[test]
fn test_no_prefix_rule() {
    assert!(matches!(
        parse_err("&& a"),
        ParseError::ExpectedExpression { position: 0, .. }
    ));
    assert!(matches!(parse_err(")"), ParseError::ExpectedExpression { .. }));
    assert!(matches!(parse_err("a = = b"), ParseError::ExpectedExpression { position: 4, .. }));
}

#[test]
fn test_dangling_operator() {
    assert!(matches!(parse_err("a &&"), ParseError::UnexpectedEnd { .. }));
    assert!(matches!(parse_err("!"), ParseError::UnexpectedEnd { .. }));
}

#[test]
fn test_empty_input() {
    assert!(matches!(parse_err(""), ParseError::UnexpectedEnd { .. }));
    assert!(matches!(parse_err("   "), ParseError::UnexpectedEnd { .. }));
}

#[test]
fn test_trailing_input_rejected() {
    assert!(matches!(
        parse_err("a b"),
        ParseError::TrailingInput { position: 2, .. }
    ));
    assert!(matches!(parse_err("a )"), ParseError::TrailingInput { .. }));
    assert!(matches!(parse_err("a !b"), ParseError::TrailingInput { .. }));
}

#[test]
fn test_lex_errors_surface() {
    assert_eq!(
        parse_str("a # b"),
        Err(Error::Lex(LexError::UnexpectedCharacter {
            position: 2,
            character: '#'
        }))
    );
}

// ============================================================================
// Nesting limit
// ============================================================================

fn nested_parens(n: usize) -> String {
    format!("{}a{}", "(".repeat(n), ")".repeat(n))
}

#[test]
fn test_nesting_at_limit_parses() {
    // n groupings around a leaf make a tree of height n + 1.
    assert!(parse_str(&nested_parens(MAX_DEPTH - 1)).is_ok());
    assert!(parse_str(&format!("{}a", "!".repeat(MAX_DEPTH - 1))).is_ok());
    assert!(parse_str(&format!("a{}", ".b".repeat(MAX_DEPTH - 1))).is_ok());
}

#[test]
fn test_nesting_past_limit_rejected() {
    assert_eq!(
        parse_err(&nested_parens(MAX_DEPTH)),
        ParseError::TooDeep { position: MAX_DEPTH }
    );
    assert!(matches!(
        parse_err(&format!("a{}", ".b".repeat(MAX_DEPTH))),
        ParseError::TooDeep { .. }
    ));
}

#[test]
fn test_very_deep_input_is_an_error_not_a_crash() {
    assert!(matches!(parse_err(&nested_parens(5_000)), ParseError::TooDeep { .. }));
    assert!(matches!(
        parse_err(&format!("{}a", "!".repeat(200_000))),
        ParseError::TooDeep { .. }
    ));
    assert!(matches!(
        parse_err(&format!("a{}", " && a".repeat(50_000))),
        ParseError::TooDeep { .. }
    ));
}

// ============================================================================
// Token sources
// ============================================================================

#[test]
fn test_parse_from_token_vector() {
    let tokens = vec![
        Token::new(TokenKind::Not, 0),
        Token::new(TokenKind::Identifier("flag".to_string()), 1),
    ];
    let expr = parse(tokens.into_iter().map(Ok::<Token, LexError>)).unwrap();
    assert_eq!(expr, Expr::unary(UnaryOp::Not, Expr::identifier("flag")));
}

#[test]
fn test_parser_with_lexer() {
    let mut parser = Parser::new(tokenize("a = 'x'")).unwrap();
    let expr = parser.parse().unwrap();
    assert_eq!(
        expr,
        Expr::binary(BinOp::Equals, Expr::identifier("a"), Expr::literal("x"))
    );
}

#[test]
fn test_parse_is_deterministic() {
    let input = "data.type?.name = carlos || !(flag ?? false) && x.y";
    assert_eq!(parse_str(input).unwrap(), parse_str(input).unwrap());
}
