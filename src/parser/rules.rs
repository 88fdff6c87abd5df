//! Parse-rule table driving the Pratt parser.
//!
//! Every token kind maps to an optional prefix rule, an optional infix rule
//! and a binding precedence. The table is an exhaustive `match`, so a new
//! token kind does not compile until its rule is decided.

use crate::ast::{Expr, Token, TokenKind};
use crate::error::{Error, LexError};

use super::Parser;

/// Binding power, loosest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
    None = 0,
    Or = 1,
    And = 2,
    Equality = 3,
    NullCoalescing = 4,
    Unary = 5,
    FieldAccess = 6,
    Primary = 7,
}

impl Precedence {
    /// The next-tighter level, used for the right operand of
    /// left-associative operators.
    pub fn next(self) -> Precedence {
        match self {
            Precedence::None => Precedence::Or,
            Precedence::Or => Precedence::And,
            Precedence::And => Precedence::Equality,
            Precedence::Equality => Precedence::NullCoalescing,
            Precedence::NullCoalescing => Precedence::Unary,
            Precedence::Unary => Precedence::FieldAccess,
            Precedence::FieldAccess | Precedence::Primary => Precedence::Primary,
        }
    }
}

/// Consumes the current token as the start of an expression.
pub type PrefixFn<I> = fn(&mut Parser<I>, Token) -> Result<Expr, Error>;

/// Consumes the current token as the continuation of an already-parsed
/// left operand.
pub type InfixFn<I> = fn(&mut Parser<I>, Token, Expr) -> Result<Expr, Error>;

pub struct ParseRule<I> {
    pub prefix: Option<PrefixFn<I>>,
    pub infix: Option<InfixFn<I>>,
    pub precedence: Precedence,
}

impl<I> ParseRule<I> {
    fn new(prefix: Option<PrefixFn<I>>, infix: Option<InfixFn<I>>, precedence: Precedence) -> Self {
        ParseRule {
            prefix,
            infix,
            precedence,
        }
    }
}

#[rustfmt::skip]
pub fn rule_for<I>(kind: &TokenKind) -> ParseRule<I>
where
    I: Iterator<Item = Result<Token, LexError>>,
{
    //                                                   Prefix                              Infix                                Precedence
    match kind {
        TokenKind::LParen => ParseRule::new(            Some(Parser::<I>::grouping),        None,                                Precedence::None),
        TokenKind::RParen => ParseRule::new(            None,                               None,                                Precedence::None),
        TokenKind::Number(_) => ParseRule::new(         Some(Parser::<I>::literal),         None,                                Precedence::None),
        TokenKind::String(_) => ParseRule::new(         Some(Parser::<I>::literal),         None,                                Precedence::None),
        TokenKind::Identifier(_) => ParseRule::new(     Some(Parser::<I>::identifier),      None,                                Precedence::None),
        TokenKind::Not => ParseRule::new(               Some(Parser::<I>::unary),           None,                                Precedence::Unary),
        TokenKind::Equals => ParseRule::new(            None,                               Some(Parser::<I>::binary),           Precedence::Equality),
        TokenKind::Or => ParseRule::new(                None,                               Some(Parser::<I>::binary),           Precedence::Or),
        TokenKind::And => ParseRule::new(               None,                               Some(Parser::<I>::binary),           Precedence::And),
        TokenKind::Dot => ParseRule::new(               None,                               Some(Parser::<I>::field_access),     Precedence::FieldAccess),
        TokenKind::QuestionDot => ParseRule::new(       None,                               Some(Parser::<I>::field_access),     Precedence::FieldAccess),
        TokenKind::QuestionQuestion => ParseRule::new(  None,                               Some(Parser::<I>::binary),           Precedence::NullCoalescing),
        TokenKind::True => ParseRule::new(              Some(Parser::<I>::constant),        None,                                Precedence::None),
        TokenKind::False => ParseRule::new(             Some(Parser::<I>::constant),        None,                                Precedence::None),
        TokenKind::Null => ParseRule::new(              Some(Parser::<I>::constant),        None,                                Precedence::None),
        TokenKind::Undefined => ParseRule::new(         Some(Parser::<I>::constant),        None,                                Precedence::None),
    }
}
