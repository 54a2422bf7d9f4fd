//! Flattened view of a merged token document

use std::collections::BTreeMap;

use serde_json::{Map, Value};
use tracing::debug;

use crate::path::TokenPath;
use crate::value::TokenValue;

/// A token as authored, keyed by its path
#[derive(Clone, Debug, PartialEq)]
pub struct RawToken {
    pub path: TokenPath,
    pub value: TokenValue,
    /// `type` / `$type` hint next to the value, if any
    pub kind: Option<String>,
}

/// Every token of a merged document, sorted by path
///
/// An object holding `value` (or `$value`) is a token and its other keys are
/// metadata. Any other object is a group. Scalars and arrays are bare tokens.
/// Keys starting with `_` are comments and keys starting with `$` are
/// metadata; neither is walked.
#[derive(Clone, Debug, Default)]
pub struct TokenTree {
    tokens: BTreeMap<TokenPath, RawToken>,
}

impl TokenTree {
    pub fn from_document(document: &Value) -> Self {
        let mut tree = Self::default();
        if let Value::Object(map) = document {
            tree.walk(map, None);
        }
        tree
    }

    fn walk(&mut self, map: &Map<String, Value>, prefix: Option<&TokenPath>) {
        for (key, value) in map {
            if key.starts_with('_') || key.starts_with('$') {
                continue;
            }
            let path = match prefix {
                Some(prefix) => prefix.child(key.as_str()),
                None => match TokenPath::from_segments([key.as_str()]) {
                    Ok(path) => path,
                    Err(_) => {
                        debug!("skipping empty top-level key");
                        continue;
                    }
                },
            };
            if key.is_empty() {
                debug!("skipping empty key under `{}`", path);
                continue;
            }

            match value {
                Value::Object(obj) => match token_value(obj) {
                    Some(raw) => {
                        let kind = obj
                            .get("type")
                            .or_else(|| obj.get("$type"))
                            .and_then(Value::as_str)
                            .map(str::to_string);
                        self.insert(path, raw, kind);
                    }
                    None => self.walk(obj, Some(&path)),
                },
                other => self.insert(path, other, None),
            }
        }
    }

    fn insert(&mut self, path: TokenPath, raw: &Value, kind: Option<String>) {
        match TokenValue::from_json(raw) {
            Some(value) => {
                self.tokens.insert(path.clone(), RawToken { path, value, kind });
            }
            None => debug!("token `{}` has a null value (ignored)", path),
        }
    }

    pub fn get(&self, path: &TokenPath) -> Option<&RawToken> {
        self.tokens.get(path)
    }

    pub fn contains(&self, path: &TokenPath) -> bool {
        self.tokens.contains_key(path)
    }

    pub fn iter(&self) -> impl Iterator<Item = &RawToken> {
        self.tokens.values()
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

fn token_value(obj: &Map<String, Value>) -> Option<&Value> {
    obj.get("value").or_else(|| obj.get("$value"))
}
