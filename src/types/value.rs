//! Host values handed to the engine.
//!
//! A stylesheet evaluator has already typed every argument before it
//! reaches chroma; `Value` is that typed form. `Value::parse` is the
//! lightweight reader used for scheme files and the command line.

use std::fmt;

use crate::keyword;

use super::Colour;

/// A typed argument value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A colour literal: `#ff0000`
    Colour(Colour),
    /// An unquoted colour keyword token: `lightslategray`
    Keyword(String),
    /// A string, either a bare identifier or a quoted one.
    String { text: String, quoted: bool },
    /// A unitless number: `0.5`
    Number(f64),
    /// A percentage: `20%`
    Percent(f64),
    Bool(bool),
    Null,
}

impl Value {
    /// Create an unquoted string (how colour references are written).
    pub fn ident(text: impl Into<String>) -> Self {
        Value::String {
            text: text.into(),
            quoted: false,
        }
    }

    /// Create a quoted string.
    pub fn quoted(text: impl Into<String>) -> Self {
        Value::String {
            text: text.into(),
            quoted: true,
        }
    }

    /// Read a value from its source spelling.
    pub fn parse(input: &str) -> Self {
        let input = input.trim();

        if input.starts_with('#') {
            if let Ok(colour) = Colour::from_hex(input) {
                return Value::Colour(colour);
            }
        }

        for quote in ['\'', '"'] {
            if input.len() >= 2 && input.starts_with(quote) && input.ends_with(quote) {
                return Value::quoted(&input[1..input.len() - 1]);
            }
        }

        if let Some(num) = input.strip_suffix('%') {
            if let Ok(value) = num.trim().parse::<f64>() {
                return Value::Percent(value);
            }
        }

        let numeric = input.starts_with(|c: char| c.is_ascii_digit() || c == '.' || c == '-');
        if numeric {
            if let Ok(value) = input.parse::<f64>() {
                return Value::Number(value);
            }
        }

        match input {
            "true" => Value::Bool(true),
            "false" => Value::Bool(false),
            "null" => Value::Null,
            _ if keyword::is_keyword_name(input) => Value::Keyword(input.to_ascii_lowercase()),
            _ => Value::ident(input),
        }
    }

    /// The text of a string value, quoted or not.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String { text, .. } => Some(text),
            _ => None,
        }
    }

    /// Check if this value can stand as a colour in its own right.
    pub fn is_colour_like(&self) -> bool {
        match self {
            Value::Colour(_) | Value::Keyword(_) => true,
            Value::String { text, quoted: true } => keyword::is_keyword_name(text),
            _ => false,
        }
    }

    /// Convert a colour-like value into a literal.
    pub fn to_colour(&self) -> Option<Colour> {
        match self {
            Value::Colour(c) => Some(*c),
            Value::Keyword(name) | Value::String { text: name, .. } => keyword::lookup(name),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Colour(c) => write!(f, "{}", c),
            Value::Keyword(name) => write!(f, "{}", name),
            Value::String { text, .. } => write!(f, "{}", text),
            Value::Number(n) => write!(f, "{}", n),
            Value::Percent(p) => write!(f, "{}%", p),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Null => write!(f, "null"),
        }
    }
}

impl From<Colour> for Value {
    fn from(colour: Colour) -> Self {
        Value::Colour(colour)
    }
}
