//! Token value model
//!
//! Raw JSON values are parsed once into [`TokenValue`] so resolution can
//! match on the shape of a value instead of re-scanning strings:
//!
//! - `"#ff0000"`, `8`, `true` → [`TokenValue::Literal`]
//! - `"{color.brand.primary}"` → [`TokenValue::Alias`]
//! - `"2px solid {color.border}"` → [`TokenValue::Composite`]
//! - `{ "fontSize": 16, ... }` → [`TokenValue::Object`]
//! - `[ ... ]` → [`TokenValue::List`]
//!
//! After resolution every alias is gone and a [`ResolvedValue`] remains.

use std::fmt::{Display, Formatter};

use indexmap::IndexMap;
use serde_json::{Number, Value};

use crate::path::TokenPath;

/// A scalar that needs no further resolution
#[derive(Clone, Debug, PartialEq)]
pub enum Literal {
    String(String),
    Number(Number),
    Bool(bool),
}

impl Literal {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => n.as_f64(),
            _ => None,
        }
    }

    /// Textual form used when a literal is spliced into a composite string.
    pub fn to_text(&self) -> String {
        match self {
            Self::String(s) => s.clone(),
            Self::Number(n) => format_number(n),
            Self::Bool(b) => b.to_string(),
        }
    }
}

impl Display for Literal {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_text())
    }
}

/// Format a JSON number without a trailing `.0` on whole floats.
pub fn format_number(n: &Number) -> String {
    if n.is_f64() {
        if let Some(f) = n.as_f64() {
            if f.fract() == 0.0 && f.abs() < 1e15 {
                return format!("{}", f as i64);
            }
        }
    }
    n.to_string()
}

/// Format an `f64` the same way as [`format_number`].
pub fn format_f64(f: f64) -> String {
    if f.fract() == 0.0 && f.abs() < 1e15 {
        return format!("{}", f as i64);
    }
    let mut s = f.to_string();
    if s.contains('.') {
        while s.ends_with('0') {
            s.pop();
        }
        if s.ends_with('.') {
            s.pop();
        }
    }
    s
}

/// One piece of a composite string
#[derive(Clone, Debug, PartialEq)]
pub enum TemplatePart {
    Text(String),
    Ref(TokenPath),
}

/// A string mixing literal text with `{dot.path}` references
#[derive(Clone, Debug, PartialEq)]
pub struct Template {
    parts: Vec<TemplatePart>,
}

impl Template {
    pub fn parts(&self) -> &[TemplatePart] {
        &self.parts
    }

    pub fn references(&self) -> impl Iterator<Item = &TokenPath> {
        self.parts.iter().filter_map(|p| match p {
            TemplatePart::Ref(path) => Some(path),
            TemplatePart::Text(_) => None,
        })
    }

    /// Split `src` into text and reference parts.
    ///
    /// `{{` and `}}` are literal braces. A `{` without a closing brace, or
    /// whose contents are not a valid dot-path, stays literal text.
    pub fn parse(src: &str) -> Self {
        let mut parts = Vec::new();
        let mut text = String::new();
        let mut chars = src.chars().peekable();

        while let Some(c) = chars.next() {
            if c == '}' {
                if chars.peek() == Some(&'}') {
                    chars.next();
                }
                text.push('}');
                continue;
            }
            if c != '{' {
                text.push(c);
                continue;
            }
            if chars.peek() == Some(&'{') {
                chars.next();
                text.push('{');
                continue;
            }

            let mut inner = String::new();
            let mut closed = false;
            while let Some(&n) = chars.peek() {
                chars.next();
                if n == '}' {
                    closed = true;
                    break;
                }
                inner.push(n);
            }

            if !closed {
                text.push('{');
                text.push_str(&inner);
                break;
            }

            match reference_path(&inner) {
                Some(path) => {
                    if !text.is_empty() {
                        parts.push(TemplatePart::Text(std::mem::take(&mut text)));
                    }
                    parts.push(TemplatePart::Ref(path));
                }
                None => {
                    text.push('{');
                    text.push_str(&inner);
                    text.push('}');
                }
            }
        }

        if !text.is_empty() {
            parts.push(TemplatePart::Text(text));
        }
        Self { parts }
    }
}

fn reference_path(inner: &str) -> Option<TokenPath> {
    let inner = inner.trim();
    let valid = !inner.is_empty()
        && inner
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '$' | '@'));
    if !valid {
        return None;
    }
    TokenPath::parse(inner).ok()
}

/// A token value as authored, before alias resolution
#[derive(Clone, Debug, PartialEq)]
pub enum TokenValue {
    Literal(Literal),
    Alias(TokenPath),
    Composite(Template),
    Object(IndexMap<String, TokenValue>),
    List(Vec<TokenValue>),
}

impl TokenValue {
    /// Parse a JSON value. `null` has no token meaning and yields `None`,
    /// both at the top level and inside objects and arrays.
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Null => None,
            Value::Bool(b) => Some(Self::Literal(Literal::Bool(*b))),
            Value::Number(n) => Some(Self::Literal(Literal::Number(n.clone()))),
            Value::String(s) => Some(Self::parse_str(s)),
            Value::Array(items) => Some(Self::List(
                items.iter().filter_map(Self::from_json).collect(),
            )),
            Value::Object(map) => Some(Self::Object(
                map.iter()
                    .filter_map(|(k, v)| Self::from_json(v).map(|v| (k.clone(), v)))
                    .collect(),
            )),
        }
    }

    /// Classify a string as literal, alias, or composite.
    pub fn parse_str(src: &str) -> Self {
        if !src.contains('{') {
            return Self::Literal(Literal::String(src.to_string()));
        }
        let template = Template::parse(src);
        match template.parts() {
            [TemplatePart::Ref(path)] => Self::Alias(path.clone()),
            parts if parts.iter().any(|p| matches!(p, TemplatePart::Ref(_))) => {
                Self::Composite(template)
            }
            _ => Self::Literal(Literal::String(src.to_string())),
        }
    }

    pub fn is_alias(&self) -> bool {
        matches!(self, Self::Alias(_))
    }
}

/// A token value with every alias substituted
#[derive(Clone, Debug, PartialEq)]
pub enum ResolvedValue {
    Literal(Literal),
    Object(IndexMap<String, ResolvedValue>),
    List(Vec<ResolvedValue>),
}

impl ResolvedValue {
    pub fn as_literal(&self) -> Option<&Literal> {
        match self {
            Self::Literal(lit) => Some(lit),
            _ => None,
        }
    }
}

impl From<Literal> for ResolvedValue {
    fn from(lit: Literal) -> Self {
        Self::Literal(lit)
    }
}
