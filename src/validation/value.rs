use std::{collections::HashMap, fmt};

use serde::Serialize;

/// A typed value produced by coercing a raw token.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ParsedValue {
    /// Text, passed through unchanged.
    String(String),
    /// A finite number.
    Number(f64),
    /// `true` or `false`.
    Boolean(bool),
    /// Comma-separated items, each trimmed.
    Array(Vec<String>),
}

impl ParsedValue {
    /// The text, if this is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ParsedValue::String(text) => Some(text),
            _ => None,
        }
    }

    /// The number, if this is a number.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ParsedValue::Number(number) => Some(*number),
            _ => None,
        }
    }

    /// The flag, if this is a boolean.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ParsedValue::Boolean(flag) => Some(*flag),
            _ => None,
        }
    }

    /// The items, if this is an array.
    pub fn as_array(&self) -> Option<&[String]> {
        match self {
            ParsedValue::Array(items) => Some(items),
            _ => None,
        }
    }
}

impl fmt::Display for ParsedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParsedValue::String(text) => f.write_str(text),
            ParsedValue::Number(number) => write!(f, "{number}"),
            ParsedValue::Boolean(flag) => write!(f, "{flag}"),
            ParsedValue::Array(items) => f.write_str(&items.join(",")),
        }
    }
}

impl From<&str> for ParsedValue {
    fn from(value: &str) -> Self {
        ParsedValue::String(value.to_string())
    }
}

impl From<String> for ParsedValue {
    fn from(value: String) -> Self {
        ParsedValue::String(value)
    }
}

impl From<f64> for ParsedValue {
    fn from(value: f64) -> Self {
        ParsedValue::Number(value)
    }
}

impl From<i32> for ParsedValue {
    fn from(value: i32) -> Self {
        ParsedValue::Number(f64::from(value))
    }
}

impl From<bool> for ParsedValue {
    fn from(value: bool) -> Self {
        ParsedValue::Boolean(value)
    }
}

impl From<Vec<String>> for ParsedValue {
    fn from(value: Vec<String>) -> Self {
        ParsedValue::Array(value)
    }
}

/// Typed positional arguments and named options of a valid invocation.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ParsedArgs {
    /// Positional values, in schema order. Trailing optional arguments
    /// that were not supplied are absent.
    pub args: Vec<ParsedValue>,
    /// Named options that matched a schema rule.
    pub options: HashMap<String, ParsedValue>,
}

impl ParsedArgs {
    /// Positional value at `index`.
    pub fn arg(&self, index: usize) -> Option<&ParsedValue> {
        self.args.get(index)
    }

    /// Named option `name`.
    pub fn option(&self, name: &str) -> Option<&ParsedValue> {
        self.options.get(name)
    }
}
