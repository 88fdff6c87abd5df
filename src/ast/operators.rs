use std::fmt;

/// Prefix operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    /// Logical NOT (`!`)
    Not,
}

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    // Comparison
    /// Strict equality (`=`)
    Equals,

    // Logical
    /// Logical AND (`&&`)
    And,
    /// Logical OR (`||`)
    Or,

    // Navigation
    /// Field access (`.`), fails on a null or undefined base
    FieldAccess,
    /// Nullable field access (`?.`), yields null on a null or undefined base
    NullableFieldAccess,

    // Null-coalescing
    /// Null-coalescing (`??`)
    NullCoalescing,
}

impl BinOp {
    /// Whether the right operand is a field name rather than an expression.
    pub fn is_field_access(self) -> bool {
        matches!(self, BinOp::FieldAccess | BinOp::NullableFieldAccess)
    }

    pub fn symbol(self) -> &'static str {
        match self {
            BinOp::Equals => "=",
            BinOp::And => "&&",
            BinOp::Or => "||",
            BinOp::FieldAccess => ".",
            BinOp::NullableFieldAccess => "?.",
            BinOp::NullCoalescing => "??",
        }
    }
}

impl fmt::Display for UnaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnaryOp::Not => write!(f, "!"),
        }
    }
}

impl fmt::Display for BinOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}
