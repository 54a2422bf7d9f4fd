//! Alias resolution
//!
//! A [`Resolver`] is created per generation run and owns its cache, so two
//! runs (or two tests) never see each other's results. Resolution is depth
//! first: the path being resolved is pushed onto an in-progress chain, and
//! meeting a path that is already on the chain is a cycle.

use std::collections::BTreeMap;

use indexmap::IndexMap;
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::debug;

use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::error::TokenError;
use crate::path::TokenPath;
use crate::tree::TokenTree;
use crate::value::{Literal, ResolvedValue, TemplatePart, TokenValue};

/// A token after resolution
#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedToken {
    pub value: ResolvedValue,
    /// Own `type` hint, or the one inherited through its alias chain
    pub kind: Option<String>,
}

/// Fully resolved tokens in path order
pub type ResolvedTokens = BTreeMap<TokenPath, ResolvedToken>;

/// Output of [`resolve_all`]
#[derive(Clone, Debug, Default)]
pub struct Resolution {
    pub tokens: ResolvedTokens,
    /// Paths left out because they failed to resolve
    pub skipped: Vec<TokenPath>,
    pub diagnostics: Diagnostics,
}

/// Per-run alias resolver
pub struct Resolver<'a> {
    tree: &'a TokenTree,
    cache: FxHashMap<TokenPath, ResolvedValue>,
    in_progress: FxHashSet<TokenPath>,
    chain: Vec<TokenPath>,
}

impl<'a> Resolver<'a> {
    pub fn new(tree: &'a TokenTree) -> Self {
        Self {
            tree,
            cache: FxHashMap::default(),
            in_progress: FxHashSet::default(),
            chain: Vec::new(),
        }
    }

    /// Resolve the token at `path` to a value without aliases.
    pub fn resolve_path(&mut self, path: &TokenPath) -> Result<ResolvedValue, TokenError> {
        if let Some(value) = self.cache.get(path) {
            return Ok(value.clone());
        }

        if self.in_progress.contains(path) {
            let start = self.chain.iter().position(|p| p == path).unwrap_or(0);
            let mut chain = self.chain[start..].to_vec();
            chain.push(path.clone());
            return Err(TokenError::Cycle { chain });
        }

        let tree = self.tree;
        let Some(token) = tree.get(path) else {
            return Err(TokenError::MissingReference {
                token: self.chain.last().cloned().unwrap_or_else(|| path.clone()),
                reference: path.to_string(),
            });
        };

        self.in_progress.insert(path.clone());
        self.chain.push(path.clone());
        let result = self.resolve_value_of(path, &token.value);
        self.chain.pop();
        self.in_progress.remove(path);

        let value = result?;
        self.cache.insert(path.clone(), value.clone());
        Ok(value)
    }

    /// Resolve a value that belongs to the token at `owner`.
    pub fn resolve_value(
        &mut self,
        owner: &TokenPath,
        value: &TokenValue,
    ) -> Result<ResolvedValue, TokenError> {
        self.resolve_value_of(owner, value)
    }

    fn resolve_value_of(
        &mut self,
        owner: &TokenPath,
        value: &TokenValue,
    ) -> Result<ResolvedValue, TokenError> {
        match value {
            TokenValue::Literal(lit) => Ok(ResolvedValue::Literal(lit.clone())),
            TokenValue::Alias(target) => self.resolve_path(target),
            TokenValue::Composite(template) => {
                let mut out = String::new();
                for part in template.parts() {
                    match part {
                        TemplatePart::Text(text) => out.push_str(text),
                        TemplatePart::Ref(target) => match self.resolve_path(target)? {
                            ResolvedValue::Literal(lit) => out.push_str(&lit.to_text()),
                            ResolvedValue::Object(_) | ResolvedValue::List(_) => {
                                return Err(TokenError::UnsupportedValue {
                                    token: owner.clone(),
                                    reason: format!(
                                        "`{target}` resolves to a structured value and cannot be embedded in text"
                                    ),
                                });
                            }
                        },
                    }
                }
                Ok(ResolvedValue::Literal(Literal::String(out)))
            }
            TokenValue::Object(members) => {
                let mut resolved = IndexMap::with_capacity(members.len());
                for (key, member) in members {
                    resolved.insert(key.clone(), self.resolve_value_of(owner, member)?);
                }
                Ok(ResolvedValue::Object(resolved))
            }
            TokenValue::List(items) => items
                .iter()
                .map(|item| self.resolve_value_of(owner, item))
                .collect::<Result<Vec<_>, _>>()
                .map(ResolvedValue::List),
        }
    }
}

/// Resolve every token in `tree`.
///
/// Tokens that fail are left out and reported; the rest are unaffected.
/// Identical errors reached through several tokens are reported once.
pub fn resolve_all(tree: &TokenTree) -> Resolution {
    let mut resolver = Resolver::new(tree);
    let mut resolution = Resolution::default();
    let mut seen: FxHashSet<TokenError> = FxHashSet::default();

    for token in tree.iter() {
        match resolver.resolve_path(&token.path) {
            Ok(value) => {
                let kind = token
                    .kind
                    .clone()
                    .or_else(|| inherited_kind(tree, &token.value));
                resolution
                    .tokens
                    .insert(token.path.clone(), ResolvedToken { value, kind });
            }
            Err(err) => {
                debug!("skipping `{}`: {}", token.path, err);
                resolution.skipped.push(token.path.clone());
                if seen.insert(err.clone()) {
                    resolution.diagnostics.push(Diagnostic::new(err));
                }
            }
        }
    }

    resolution
}

/// Follow an alias chain to the first token carrying a `type` hint.
fn inherited_kind(tree: &TokenTree, value: &TokenValue) -> Option<String> {
    let mut current = value;
    for _ in 0..tree.len() {
        let TokenValue::Alias(target) = current else {
            return None;
        };
        let token = tree.get(target)?;
        if let Some(kind) = &token.kind {
            return Some(kind.clone());
        }
        current = &token.value;
    }
    None
}
