//! Lazy scanner turning source text into [`Token`]s.
//!
//! The lexer is an [`Iterator`] over `Result<Token, LexError>`, so the parser
//! pulls tokens on demand instead of tokenizing the whole input up front. The
//! sequence is single pass: after the input is exhausted or an error is
//! yielded, `next` keeps returning `None`.

use std::iter::FusedIterator;
use std::sync::LazyLock;

use regex::Regex;
use tracing::trace;

use crate::ast::{Number, Token, TokenKind};
use crate::error::LexError;

static WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z][a-zA-Z0-9_]*").expect("valid word pattern"));

static NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9][0-9.]*").expect("valid number pattern"));

pub struct Lexer<'a> {
    input: &'a str,
    position: usize,
    finished: bool,
}

/// Start scanning `source`. Nothing is read until the first token is pulled.
pub fn tokenize(source: &str) -> Lexer<'_> {
    Lexer::new(source)
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Lexer {
            input,
            position: 0,
            finished: false,
        }
    }

    /// Byte offset of the next unread character.
    pub fn position(&self) -> usize {
        self.position
    }

    fn current_char(&self) -> Option<char> {
        self.input[self.position..].chars().next()
    }

    fn peek_char(&self, offset: usize) -> Option<char> {
        self.input[self.position..].chars().nth(offset)
    }

    fn rest(&self) -> &'a str {
        &self.input[self.position..]
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.current_char() {
            if matches!(ch, ' ' | '\n' | '\t' | '\r') {
                self.position += 1;
            } else {
                break;
            }
        }
    }

    /// Emit a fixed-width token starting at the current position.
    fn punct(&mut self, kind: TokenKind, width: usize) -> Token {
        let token = Token::new(kind, self.position);
        self.position += width;
        token
    }

    fn read_word(&mut self) -> Token {
        let start = self.position;
        let word = WORD.find(self.rest()).map_or("", |m| m.as_str());
        self.position += word.len();

        // Keywords only match whole words, so `nullable` stays an identifier.
        let kind = match word {
            "true" => TokenKind::True,
            "false" => TokenKind::False,
            "null" => TokenKind::Null,
            "undefined" => TokenKind::Undefined,
            _ => TokenKind::Identifier(word.to_string()),
        };
        Token::new(kind, start)
    }

    fn read_string(&mut self) -> Result<Token, LexError> {
        let start = self.position;
        let mut result = String::new();
        let mut escape_next = false;
        self.position += 1; // opening quote

        while let Some(ch) = self.current_char() {
            self.position += ch.len_utf8();
            match ch {
                '\'' if !escape_next => return Ok(Token::new(TokenKind::String(result), start)),
                '\\' if !escape_next => escape_next = true,
                _ => {
                    escape_next = false;
                    result.push(ch);
                }
            }
        }

        Err(LexError::UnterminatedString { position: start })
    }

    fn read_number(&mut self) -> Result<Token, LexError> {
        let start = self.position;
        let digits = NUMBER.find(self.rest()).map_or("", |m| m.as_str());
        let dots = digits.matches('.').count();
        if dots > 1 {
            return Err(LexError::MalformedNumber { position: start });
        }
        self.position += digits.len();

        let number = if dots == 0
            && let Ok(n) = digits.parse::<i64>()
        {
            Number::Integer(n)
        } else {
            let text = if digits.ends_with('.') {
                format!("{}0", digits)
            } else {
                digits.to_string()
            };
            text.parse::<f64>()
                .map(Number::Float)
                .map_err(|_| LexError::MalformedNumber { position: start })?
        };

        Ok(Token::new(TokenKind::Number(number), start))
    }

    /// Scan the next token, or `Ok(None)` at end of input.
    pub fn next_token(&mut self) -> Result<Option<Token>, LexError> {
        self.skip_whitespace();

        let token = match (self.current_char(), self.peek_char(1)) {
            (None, _) => return Ok(None),
            (Some('('), _) => self.punct(TokenKind::LParen, 1),
            (Some(')'), _) => self.punct(TokenKind::RParen, 1),
            (Some('&'), Some('&')) => self.punct(TokenKind::And, 2),
            (Some('|'), Some('|')) => self.punct(TokenKind::Or, 2),
            (Some('!'), _) => self.punct(TokenKind::Not, 1),
            (Some('='), _) => self.punct(TokenKind::Equals, 1),
            (Some('.'), _) => self.punct(TokenKind::Dot, 1),
            (Some('?'), Some('.')) => self.punct(TokenKind::QuestionDot, 2),
            (Some('?'), Some('?')) => self.punct(TokenKind::QuestionQuestion, 2),
            (Some('\''), _) => self.read_string()?,
            (Some(ch), _) if ch.is_ascii_alphabetic() => self.read_word(),
            (Some(ch), _) if ch.is_ascii_digit() => self.read_number()?,
            (Some(ch), _) => {
                return Err(LexError::UnexpectedCharacter {
                    position: self.position,
                    character: ch,
                });
            }
        };

        trace!(kind = %token.kind, position = token.position, "scanned token");
        Ok(Some(token))
    }
}

impl Iterator for Lexer<'_> {
    type Item = Result<Token, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        match self.next_token() {
            Ok(Some(token)) => Some(Ok(token)),
            Ok(None) => {
                self.finished = true;
                None
            }
            Err(e) => {
                self.finished = true;
                Some(Err(e))
            }
        }
    }
}

impl FusedIterator for Lexer<'_> {}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<TokenKind> {
        tokenize(input).map(|t| t.unwrap().kind).collect()
    }

    #[test]
    fn test_keywords() {
        assert_eq!(
            kinds("true false null undefined"),
            vec![
                TokenKind::True,
                TokenKind::False,
                TokenKind::Null,
                TokenKind::Undefined
            ]
        );
    }

    #[test]
    fn test_keyword_prefixed_identifiers() {
        assert_eq!(
            kinds("nullable trueish undefined_x"),
            vec![
                TokenKind::Identifier("nullable".to_string()),
                TokenKind::Identifier("trueish".to_string()),
                TokenKind::Identifier("undefined_x".to_string()),
            ]
        );
    }

    #[test]
    fn test_fused_after_error() {
        let mut lexer = tokenize("# a");
        assert!(matches!(lexer.next(), Some(Err(_))));
        assert_eq!(lexer.next(), None);
        assert_eq!(lexer.next(), None);
    }
}
