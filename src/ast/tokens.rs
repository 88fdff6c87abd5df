use std::fmt;

/// A lexical unit together with the byte offset where it starts.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    /// Byte offset of the first character of the token in the source.
    pub position: usize,
}

impl Token {
    pub fn new(kind: TokenKind, position: usize) -> Self {
        Token { kind, position }
    }
}

/// Numeric literal payload.
///
/// A digit run without a decimal point that fits in an `i64` is an
/// `Integer`; anything else is a `Float`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Integer(i64),
    Float(f64),
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Integer(n) => write!(f, "{}", n),
            Number::Float(n) => write!(f, "{}", n),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    // Delimiters
    /// `(`
    LParen,

    /// `)`
    RParen,

    // Operators
    /// Field access
    ///
    /// # Examples
    /// ```text
    /// data.type
    /// ```
    Dot,

    /// Nullable field access, yields null instead of failing on a null base
    ///
    /// # Examples
    /// ```text
    /// data.type?.name
    /// ```
    QuestionDot,

    /// Strict equality (single `=`)
    ///
    /// # Examples
    /// ```text
    /// status = 'active'
    /// ```
    Equals,

    /// Logical AND (`&&`)
    And,

    /// Logical OR (`||`)
    Or,

    /// Logical NOT (`!`)
    Not,

    /// Null coalescing (`??`)
    ///
    /// # Examples
    /// ```text
    /// user.nickname ?? user.name
    /// ```
    QuestionQuestion,

    // Keyword literals
    Null,
    Undefined,
    True,
    False,

    // Literals
    /// Variable or field name
    ///
    /// Must start with an ASCII letter, followed by letters, digits, or underscores.
    ///
    /// # Examples
    /// ```text
    /// user
    /// item_count
    /// v2
    /// ```
    Identifier(String),

    /// Integer or real number
    ///
    /// # Examples
    /// ```text
    /// 42
    /// 3.14
    /// ```
    Number(Number),

    /// String literal enclosed in single quotes, with escapes already decoded
    ///
    /// # Examples
    /// ```text
    /// 'hello'
    /// 'it\'s'
    /// ```
    String(String),
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::LParen => write!(f, "'('"),
            TokenKind::RParen => write!(f, "')'"),
            TokenKind::Dot => write!(f, "'.'"),
            TokenKind::QuestionDot => write!(f, "'?.'"),
            TokenKind::Equals => write!(f, "'='"),
            TokenKind::And => write!(f, "'&&'"),
            TokenKind::Or => write!(f, "'||'"),
            TokenKind::Not => write!(f, "'!'"),
            TokenKind::QuestionQuestion => write!(f, "'??'"),
            TokenKind::Null => write!(f, "null"),
            TokenKind::Undefined => write!(f, "undefined"),
            TokenKind::True => write!(f, "true"),
            TokenKind::False => write!(f, "false"),
            TokenKind::Identifier(name) => write!(f, "identifier '{}'", name),
            TokenKind::Number(n) => write!(f, "number {}", n),
            TokenKind::String(s) => write!(f, "string '{}'", s),
        }
    }
}
