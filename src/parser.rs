//! Precedence-climbing (Pratt) parser.
//!
//! The parser owns the token stream for the duration of one parse and keeps a
//! single token of lookahead. Which tokens may start or continue an
//! expression, and how tightly they bind, is decided by [`rules::rule_for`].

pub mod rules;

use std::mem;

use tracing::debug;

use crate::{
    ast::{BinOp, Expr, Token, TokenKind, UnaryOp},
    error::{Error, LexError, ParseError},
    lexer::tokenize,
    value::Value,
};
use rules::{Precedence, rule_for};

/// Deepest syntax tree the parser will build.
///
/// Bounds parser recursion and the height of every returned tree, so
/// evaluating or dropping a parsed expression cannot exhaust the stack.
pub const MAX_DEPTH: usize = 256;

pub struct Parser<I> {
    tokens: I,
    current: Option<Token>,
    /// Nested `parse_precedence` calls currently active.
    depth: usize,
    /// Height of the tree most recently returned by `parse_precedence`.
    height: usize,
}

/// Parse a complete expression, taking ownership of the token stream.
///
/// Lexing errors raised while pulling tokens surface as [`Error::Lex`].
pub fn parse<I>(tokens: I) -> Result<Expr, Error>
where
    I: IntoIterator<Item = Result<Token, LexError>>,
{
    Parser::new(tokens.into_iter())?.parse()
}

/// Tokenize and parse `source` in one step.
///
/// # Examples
///
/// ```
/// use sprig_lang::parse_str;
///
/// let expr = parse_str("a || b && c").unwrap();
/// assert_eq!(expr.to_string(), "(a || (b && c))");
/// ```
pub fn parse_str(source: &str) -> Result<Expr, Error> {
    debug!(source, "parsing expression");
    parse(tokenize(source))
}

fn describe(kind: &TokenKind) -> String {
    match kind {
        TokenKind::Identifier(_) => "identifier".to_string(),
        TokenKind::Number(_) => "number".to_string(),
        TokenKind::String(_) => "string".to_string(),
        other => other.to_string(),
    }
}

impl<I> Parser<I>
where
    I: Iterator<Item = Result<Token, LexError>>,
{
    pub fn new(mut tokens: I) -> Result<Self, Error> {
        let current = tokens.next().transpose()?;
        Ok(Parser {
            tokens,
            current,
            depth: 0,
            height: 0,
        })
    }

    /// Consume the lookahead token and pull the next one from the stream.
    fn advance(&mut self) -> Result<Option<Token>, Error> {
        let next = self.tokens.next().transpose()?;
        Ok(mem::replace(&mut self.current, next))
    }

    fn expect(&mut self, expected: TokenKind) -> Result<Token, Error> {
        match &self.current {
            Some(token) if mem::discriminant(&token.kind) == mem::discriminant(&expected) => {}
            Some(token) => {
                return Err(ParseError::UnexpectedToken {
                    position: token.position,
                    expected: describe(&expected),
                    found: token.kind.to_string(),
                }
                .into());
            }
            None => {
                return Err(ParseError::UnexpectedEnd {
                    expected: describe(&expected),
                }
                .into());
            }
        }
        self.advance()?.ok_or_else(|| {
            ParseError::UnexpectedEnd {
                expected: describe(&expected),
            }
            .into()
        })
    }

    /// Precedence of the lookahead token, if it can continue an expression.
    fn infix_precedence(&self) -> Option<Precedence> {
        let token = self.current.as_ref()?;
        let rule = rule_for::<I>(&token.kind);
        rule.infix.map(|_| rule.precedence)
    }

    fn parse_precedence(&mut self, min: Precedence) -> Result<Expr, Error> {
        self.depth += 1;
        let result = self.parse_nested(min);
        self.depth -= 1;
        result
    }

    fn parse_nested(&mut self, min: Precedence) -> Result<Expr, Error> {
        let token = self.advance()?.ok_or_else(|| ParseError::UnexpectedEnd {
            expected: "expression".to_string(),
        })?;
        if self.depth > MAX_DEPTH {
            return Err(ParseError::TooDeep {
                position: token.position,
            }
            .into());
        }

        let Some(prefix) = rule_for::<I>(&token.kind).prefix else {
            return Err(ParseError::ExpectedExpression {
                position: token.position,
                found: token.kind.to_string(),
            }
            .into());
        };
        let position = token.position;
        self.height = 0;
        let mut left = prefix(self, token)?;
        let mut height = self.check_height(self.height + 1, position)?;

        while self.infix_precedence().is_some_and(|p| p >= min) {
            let Some(token) = self.advance()? else {
                break;
            };
            let position = token.position;
            if let Some(infix) = rule_for::<I>(&token.kind).infix {
                self.height = 0;
                left = infix(self, token, left)?;
                height = self.check_height(height.max(self.height) + 1, position)?;
            }
        }
        self.height = height;
        Ok(left)
    }

    fn check_height(&self, height: usize, position: usize) -> Result<usize, Error> {
        if height > MAX_DEPTH {
            return Err(ParseError::TooDeep { position }.into());
        }
        Ok(height)
    }

    pub fn parse_expression(&mut self) -> Result<Expr, Error> {
        self.parse_precedence(Precedence::Or)
    }

    /// Parse one expression and require the input to end after it.
    pub fn parse(&mut self) -> Result<Expr, Error> {
        let expr = self.parse_expression()?;
        if let Some(token) = self.current.take() {
            return Err(ParseError::TrailingInput {
                position: token.position,
                found: token.kind.to_string(),
            }
            .into());
        }
        debug!(%expr, "parsed expression");
        Ok(expr)
    }

    // Prefix rules

    fn literal(&mut self, token: Token) -> Result<Expr, Error> {
        match token.kind {
            TokenKind::Number(n) => Ok(Expr::Literal(n.into())),
            TokenKind::String(s) => Ok(Expr::Literal(Value::String(s))),
            kind => Err(ParseError::ExpectedExpression {
                position: token.position,
                found: kind.to_string(),
            }
            .into()),
        }
    }

    fn constant(&mut self, token: Token) -> Result<Expr, Error> {
        let value = match token.kind {
            TokenKind::True => Value::Boolean(true),
            TokenKind::False => Value::Boolean(false),
            TokenKind::Null => Value::Null,
            TokenKind::Undefined => Value::Undefined,
            kind => {
                return Err(ParseError::ExpectedExpression {
                    position: token.position,
                    found: kind.to_string(),
                }
                .into());
            }
        };
        Ok(Expr::Literal(value))
    }

    fn identifier(&mut self, token: Token) -> Result<Expr, Error> {
        match token.kind {
            TokenKind::Identifier(name) => Ok(Expr::Identifier(name)),
            kind => Err(ParseError::ExpectedExpression {
                position: token.position,
                found: kind.to_string(),
            }
            .into()),
        }
    }

    fn grouping(&mut self, _token: Token) -> Result<Expr, Error> {
        let inner = self.parse_expression()?;
        self.expect(TokenKind::RParen)?;
        Ok(Expr::grouping(inner))
    }

    fn unary(&mut self, _token: Token) -> Result<Expr, Error> {
        // Right-associative: the operand climbs at the operator's own level.
        let operand = self.parse_precedence(Precedence::Unary)?;
        Ok(Expr::unary(UnaryOp::Not, operand))
    }

    // Infix rules

    fn binary(&mut self, token: Token, left: Expr) -> Result<Expr, Error> {
        let op = match token.kind {
            TokenKind::Equals => BinOp::Equals,
            TokenKind::And => BinOp::And,
            TokenKind::Or => BinOp::Or,
            TokenKind::QuestionQuestion => BinOp::NullCoalescing,
            kind => {
                return Err(ParseError::UnexpectedToken {
                    position: token.position,
                    expected: "binary operator".to_string(),
                    found: kind.to_string(),
                }
                .into());
            }
        };
        let precedence = rule_for::<I>(&token.kind).precedence;
        let right = self.parse_precedence(precedence.next())?;
        Ok(Expr::binary(op, left, right))
    }

    fn field_access(&mut self, token: Token, left: Expr) -> Result<Expr, Error> {
        let op = match token.kind {
            TokenKind::QuestionDot => BinOp::NullableFieldAccess,
            _ => BinOp::FieldAccess,
        };
        let field = self.expect(TokenKind::Identifier(String::new()))?;
        let name = self.identifier(field)?;
        Ok(Expr::binary(op, left, name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_identifier() {
        assert_eq!(parse_str("carlos").unwrap(), Expr::identifier("carlos"));
    }

    #[test]
    fn test_unary_binds_tighter_than_and() {
        let expr = parse_str("!a && b").unwrap();
        assert_eq!(expr.to_string(), "((!a) && b)");
    }

    #[test]
    fn test_not_binds_looser_than_field_access() {
        let expr = parse_str("!a.b").unwrap();
        assert_eq!(expr.to_string(), "(!(a.b))");
    }

    #[test]
    fn test_empty_input() {
        assert!(matches!(
            parse_str(""),
            Err(Error::Parse(ParseError::UnexpectedEnd { .. }))
        ));
    }

    #[test]
    fn test_height_counts_left_chains() {
        let at_limit = format!("a{}", " || a".repeat(MAX_DEPTH - 1));
        assert!(parse_str(&at_limit).is_ok());

        let over = format!("a{}", " || a".repeat(MAX_DEPTH));
        assert!(matches!(
            parse_str(&over),
            Err(Error::Parse(ParseError::TooDeep { .. }))
        ));
    }

    #[test]
    fn test_lex_error_surfaces_through_parser() {
        assert!(matches!(
            parse_str("a = 'open"),
            Err(Error::Lex(LexError::UnterminatedString { position: 4 }))
        ));
    }
}
