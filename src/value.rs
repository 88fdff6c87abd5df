use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;

use rust_decimal::{Decimal, prelude::FromPrimitive};

use crate::ast::Number;
use crate::convert::value_to_json;

/// A dynamic value seen by the evaluator.
///
/// Covers the JSON types plus `Undefined`, the value of a missing variable or
/// field. Integers and floats are two representations of the single
/// "number" type and compare numerically under [`Value::strict_equals`].
///
/// # Examples
///
/// ```
/// use sprig_lang::Value;
/// use std::collections::HashMap;
///
/// let name = Value::from("carlos");
/// let count = Value::Integer(3);
///
/// let mut obj = HashMap::new();
/// obj.insert("name".to_string(), name.clone());
/// let object = Value::Object(obj);
///
/// assert_eq!(object.field("name"), name);
/// assert_eq!(object.field("missing"), Value::Undefined);
/// assert!(count.is_truthy());
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// Missing variable or field
    #[default]
    Undefined,

    /// Explicit null
    Null,

    Boolean(bool),

    /// Floating-point number
    Float(f64),

    /// Integer number (preserved separately from floats)
    Integer(i64),

    String(String),

    Array(Vec<Value>),

    /// Object with string keys
    Object(HashMap<String, Value>),
}

impl Value {
    /// `true` for `Null` and `Undefined`.
    pub fn is_nullish(&self) -> bool {
        matches!(self, Value::Null | Value::Undefined)
    }

    /// Check if the value is truthy (for conditions)
    ///
    /// `undefined`, `null`, `false`, `0`, `NaN` and the empty string are
    /// falsy. Everything else is truthy, including empty arrays and objects.
    pub fn is_truthy(&self) -> bool {
        use Value::*;
        match self {
            Undefined | Null => false,
            Boolean(b) => *b,
            Float(n) => *n != 0.0 && !n.is_nan(),
            Integer(n) => *n != 0,
            String(s) => !s.is_empty(),
            Array(_) | Object(_) => true,
        }
    }

    /// Strict equality: both sides must have the same type.
    ///
    /// Numbers compare by numeric value regardless of integer/float
    /// representation, and `NaN` equals nothing. Arrays and objects compare
    /// element by element.
    pub fn strict_equals(&self, other: &Value) -> bool {
        use Value::*;
        match (self, other) {
            (Undefined, Undefined) | (Null, Null) => true,
            (Boolean(a), Boolean(b)) => a == b,
            (String(a), String(b)) => a == b,
            (Integer(a), Integer(b)) => a == b,
            (Float(a), Float(b)) => a == b,
            (Integer(a), Float(b)) | (Float(b), Integer(a)) => int_equals_float(*a, *b),
            (Array(a), Array(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.strict_equals(y))
            }
            (Object(a), Object(b)) => {
                a.len() == b.len()
                    && a
                        .iter()
                        .all(|(k, v)| b.get(k).is_some_and(|w| v.strict_equals(w)))
            }
            _ => false,
        }
    }

    /// Look up a named field.
    ///
    /// Objects yield the member, arrays and strings answer `length`; any
    /// other lookup yields `Undefined`.
    pub fn field(&self, name: &str) -> Value {
        self.lookup(name).into_owned()
    }

    /// Like [`Value::field`], but borrows object members instead of cloning them.
    pub fn lookup(&self, name: &str) -> Cow<'_, Value> {
        match (self, name) {
            (Value::Object(map), _) => map
                .get(name)
                .map_or(Cow::Owned(Value::Undefined), Cow::Borrowed),
            (Value::Array(arr), "length") => Cow::Owned(Value::Integer(arr.len() as i64)),
            (Value::String(s), "length") => Cow::Owned(Value::Integer(s.chars().count() as i64)),
            _ => Cow::Owned(Value::Undefined),
        }
    }

    /// Returns a human-readable type name
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Undefined => "undefined",
            Value::Null => "null",
            Value::Boolean(_) => "boolean",
            Value::Integer(_) | Value::Float(_) => "number",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
        }
    }
}

fn int_equals_float(a: i64, b: f64) -> bool {
    if b.is_nan() {
        return false;
    }
    match (Decimal::from_i64(a), Decimal::from_f64(b)) {
        (Some(ad), Some(bd)) => ad == bd,
        _ => a as f64 == b,
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Undefined => write!(f, "undefined"),
            Value::Null => write!(f, "null"),
            Value::Boolean(b) => write!(f, "{}", b),
            Value::Integer(n) => write!(f, "{}", n),
            Value::Float(n) => write!(f, "{}", n),
            Value::String(s) => write!(f, "{}", s),
            Value::Array(_) | Value::Object(_) => write!(f, "{}", value_to_json(self.clone())),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Integer(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Integer(n.into())
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Float(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Number> for Value {
    fn from(n: Number) -> Self {
        match n {
            Number::Integer(i) => Value::Integer(i),
            Number::Float(x) => Value::Float(x),
        }
    }
}
