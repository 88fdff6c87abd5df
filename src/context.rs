//! Execution context: the caller-owned variables an expression reads.

use std::collections::HashMap;

use thiserror::Error;

use crate::convert::json_to_value;
use crate::value::Value;

/// A read-only `name -> value` mapping resolved by identifiers.
///
/// Looking up a name that is not present yields [`Value::Undefined`].
///
/// # Examples
///
/// ```
/// use sprig_lang::{Context, Value};
///
/// let mut ctx = Context::new();
/// ctx.insert("carlos", "carlos1");
///
/// assert_eq!(ctx.get("carlos"), Value::from("carlos1"));
/// assert_eq!(ctx.get("nobody"), Value::Undefined);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Context {
    variables: HashMap<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContextError {
    #[error("Context must be a JSON object, got {0}")]
    NotAnObject(&'static str),
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a context from a JSON object; each top-level key becomes a variable.
    pub fn from_json(document: serde_json::Value) -> Result<Self, ContextError> {
        match json_to_value(document) {
            Value::Object(variables) => Ok(Context { variables }),
            other => Err(ContextError::NotAnObject(other.type_name())),
        }
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.variables.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Value {
        self.lookup(name).cloned().unwrap_or_default()
    }

    /// Borrow a variable, or `None` if it is not defined.
    pub fn lookup(&self, name: &str) -> Option<&Value> {
        self.variables.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.variables.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }
}

impl From<HashMap<String, Value>> for Context {
    fn from(variables: HashMap<String, Value>) -> Self {
        Context { variables }
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Context {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Context {
            variables: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
