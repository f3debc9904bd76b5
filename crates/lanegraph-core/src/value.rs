//! Tagged layer-argument values.
//!
//! Layer arguments arrive either as native YAML scalars or as stringified literals (`"None"`,
//! `"[1, 2]"`, `"True"`). Both are folded into [`ArgValue`]. Strings that do not parse as a
//! literal are kept verbatim; nothing is ever evaluated.

use serde::Serialize;
use serde_yaml::Value;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ArgValue {
    Int(i64),
    Float(f64),
    Bool(bool),
    Str(String),
    Seq(Vec<ArgValue>),
}

impl ArgValue {
    pub fn from_yaml(value: &Value) -> Self {
        match value {
            Value::Null => Self::Str("None".to_string()),
            Value::Bool(b) => Self::Bool(*b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => Self::Int(i),
                None => Self::Float(n.as_f64().unwrap_or(0.0)),
            },
            Value::String(s) => Self::parse_literal(s),
            Value::Sequence(items) => Self::Seq(items.iter().map(Self::from_yaml).collect()),
            Value::Tagged(tagged) => Self::from_yaml(&tagged.value),
            Value::Mapping(_) => Self::Str(
                serde_yaml::to_string(value)
                    .map(|s| s.trim().to_string())
                    .unwrap_or_default(),
            ),
        }
    }

    /// Interprets a stringified literal. Unparseable input stays a string.
    pub fn parse_literal(raw: &str) -> Self {
        let s = raw.trim();
        if let Ok(i) = s.parse::<i64>() {
            return Self::Int(i);
        }
        if looks_numeric(s) {
            if let Ok(f) = s.parse::<f64>() {
                if f.is_finite() {
                    return Self::Float(f);
                }
            }
        }
        match s {
            "True" | "true" => return Self::Bool(true),
            "False" | "false" => return Self::Bool(false),
            _ => {}
        }
        if let Some(inner) = strip_quotes(s) {
            return Self::Str(inner.to_string());
        }
        if let Some(inner) = s.strip_prefix('[').and_then(|r| r.strip_suffix(']')) {
            if let Some(parts) = split_top_level(inner) {
                return Self::Seq(parts.into_iter().map(Self::parse_literal).collect());
            }
        }
        Self::Str(raw.to_string())
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// True for the literal numeric value 2 (`2` or `2.0`).
    pub fn is_two(&self) -> bool {
        match self {
            Self::Int(i) => *i == 2,
            Self::Float(f) => *f == 2.0,
            _ => false,
        }
    }
}

fn looks_numeric(s: &str) -> bool {
    let body = s.strip_prefix(['-', '+']).unwrap_or(s);
    body.starts_with(|c: char| c.is_ascii_digit() || c == '.')
}

fn strip_quotes(s: &str) -> Option<&str> {
    if s.len() < 2 {
        return None;
    }
    s.strip_prefix('\'')
        .and_then(|r| r.strip_suffix('\''))
        .or_else(|| s.strip_prefix('"').and_then(|r| r.strip_suffix('"')))
}

/// Splits a list body on commas that are not nested in brackets or quotes.
/// Returns `None` for unbalanced input.
fn split_top_level(inner: &str) -> Option<Vec<&str>> {
    if inner.trim().is_empty() {
        return Some(Vec::new());
    }
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut start = 0usize;
    for (i, ch) in inner.char_indices() {
        match quote {
            Some(q) if ch == q => quote = None,
            Some(_) => {}
            None => match ch {
                '\'' | '"' => quote = Some(ch),
                '[' => depth += 1,
                ']' => depth = depth.checked_sub(1)?,
                ',' if depth == 0 => {
                    parts.push(&inner[start..i]);
                    start = i + 1;
                }
                _ => {}
            },
        }
    }
    if depth != 0 || quote.is_some() {
        return None;
    }
    parts.push(&inner[start..]);
    Some(parts)
}

impl fmt::Display for ArgValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(v) => {
                if v.fract() == 0.0 {
                    write!(f, "{v:.1}")
                } else {
                    write!(f, "{v}")
                }
            }
            Self::Bool(true) => f.write_str("True"),
            Self::Bool(false) => f.write_str("False"),
            Self::Str(s) if s == "None" => f.write_str("None"),
            Self::Str(s) => write!(f, "'{s}'"),
            Self::Seq(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
        }
    }
}
