use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::expr::CompareOp;

/// A data value or the result of evaluating an expression.
///
/// Form fields arrive as strings, booleans or nulls. Numbers appear as
/// literals in conditions and from programmatic callers.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// No value: an unset field, an unbound variable, or the `null` literal.
    #[default]
    Null,
    /// A boolean value.
    Bool(bool),
    /// A 64-bit floating-point number.
    Number(f64),
    /// A UTF-8 string.
    String(String),
}

impl Value {
    /// Whether this value counts as `true` when used as a condition.
    ///
    /// `null`, `false`, `0`, NaN and the empty string are falsy.
    #[must_use]
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Number(n) => *n != 0.0 && !n.is_nan(),
            Value::String(s) => !s.is_empty(),
        }
    }

    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Numeric interpretation used by relational operators and loose equality.
    ///
    /// `null` is 0, booleans are 0 or 1, blank strings are 0, and strings that
    /// are not a plain decimal number are NaN.
    #[must_use]
    pub fn to_number(&self) -> f64 {
        match self {
            Value::Null => 0.0,
            Value::Bool(b) => f64::from(u8::from(*b)),
            Value::Number(n) => *n,
            Value::String(s) => parse_number(s),
        }
    }

    /// Compare this value to another using the given operator.
    ///
    /// Never fails: operands that cannot be ordered make every relational
    /// comparison `false`.
    #[must_use]
    pub fn compare(&self, op: CompareOp, other: &Value) -> bool {
        match op {
            CompareOp::Eq => self.loose_eq(other),
            CompareOp::Neq => !self.loose_eq(other),
            CompareOp::StrictEq => self.strict_eq(other),
            CompareOp::StrictNeq => !self.strict_eq(other),
            CompareOp::Gt => self.relate(other) == Some(Ordering::Greater),
            CompareOp::Gte => matches!(
                self.relate(other),
                Some(Ordering::Greater | Ordering::Equal)
            ),
            CompareOp::Lt => self.relate(other) == Some(Ordering::Less),
            CompareOp::Lte => matches!(self.relate(other), Some(Ordering::Less | Ordering::Equal)),
        }
    }

    /// Same type and same value. NaN is not equal to itself.
    #[must_use]
    pub fn strict_eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            _ => false,
        }
    }

    /// Equality with type coercion: `null` only equals `null`, mixed
    /// number/string/boolean operands compare numerically.
    #[must_use]
    pub fn loose_eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Null, _) | (_, Value::Null) => false,
            (Value::Bool(_), Value::Bool(_))
            | (Value::Number(_), Value::Number(_))
            | (Value::String(_), Value::String(_)) => self.strict_eq(other),
            _ => self.to_number() == other.to_number(),
        }
    }

    fn relate(&self, other: &Value) -> Option<Ordering> {
        match (self, other) {
            (Value::String(a), Value::String(b)) => Some(a.as_str().cmp(b.as_str())),
            _ => self.to_number().partial_cmp(&other.to_number()),
        }
    }
}

/// String to number the way form scripts coerce it: surrounding whitespace
/// is ignored, blank is 0, `Infinity` and `0x`/`0o`/`0b` prefixes are
/// accepted, anything else that is not a plain decimal is NaN.
fn parse_number(s: &str) -> f64 {
    let trimmed = s.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}');
    match trimmed {
        "" => return 0.0,
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }
    let radix = match trimmed.get(..2) {
        Some("0x" | "0X") => Some(16),
        Some("0o" | "0O") => Some(8),
        Some("0b" | "0B") => Some(2),
        _ => None,
    };
    if let Some(radix) = radix {
        let digits = &trimmed[2..];
        if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
            return f64::NAN;
        }
        return digits
            .chars()
            .filter_map(|c| c.to_digit(radix))
            .fold(0.0, |acc, d| acc * f64::from(radix) + f64::from(d));
    }
    // Rust also accepts "inf" and "NaN" spellings, which are not numbers here.
    let plain = trimmed
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '.' | '-' | '+' | 'e' | 'E'));
    if !plain {
        return f64::NAN;
    }
    trimmed.parse().unwrap_or(f64::NAN)
}

impl From<i64> for Value {
    #[allow(clippy::cast_precision_loss)]
    fn from(v: i64) -> Self {
        Value::Number(v as f64)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Number(f64::from(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Number(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_owned())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

/// Formats the value as a condition literal, so the output parses back.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(v) => write!(f, "{v}"),
            Value::Number(v) => write!(f, "{v}"),
            Value::String(v) => {
                write!(f, "'")?;
                for c in v.chars() {
                    match c {
                        '\'' => write!(f, "\\'")?,
                        '\\' => write!(f, "\\\\")?,
                        '\n' => write!(f, "\\n")?,
                        '\t' => write!(f, "\\t")?,
                        '\r' => write!(f, "\\r")?,
                        c => write!(f, "{c}")?,
                    }
                }
                write!(f, "'")
            }
        }
    }
}
