//! Diagnostics collected during a run
//!
//! Nothing here aborts a run. Each problem is recorded against the token
//! that caused it, the token is left out of the affected output, and the
//! caller prints a summary at the end.

use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

use crate::error::TokenError;

/// One recorded per-token problem
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagnostic {
    pub error: TokenError,
    /// Combination slug (`default_day`), if known
    pub combination: Option<String>,
    /// Output platform (`kotlin`, `xml`, `css`); `None` for resolution errors
    pub platform: Option<String>,
}

impl Diagnostic {
    pub fn new(error: TokenError) -> Self {
        Self {
            error,
            combination: None,
            platform: None,
        }
    }

    pub fn with_platform(mut self, platform: impl Into<String>) -> Self {
        self.platform = Some(platform.into());
        self
    }

    pub fn with_combination(mut self, combination: impl Into<String>) -> Self {
        self.combination = Some(combination.into());
        self
    }

    pub fn kind(&self) -> &'static str {
        self.error.kind()
    }
}

impl Display for Diagnostic {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match (&self.combination, &self.platform) {
            (Some(c), Some(p)) => write!(f, "[{c}/{p}] ")?,
            (Some(c), None) => write!(f, "[{c}] ")?,
            (None, Some(p)) => write!(f, "[{p}] ")?,
            (None, None) => {}
        }
        write!(f, "{}: {}", self.kind(), self.error)
    }
}

/// Ordered list of diagnostics
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Diagnostics {
    items: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.items.push(diagnostic);
    }

    pub fn extend(&mut self, other: Diagnostics) {
        self.items.extend(other.items);
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.items.iter()
    }

    /// Tag every entry that has no combination yet.
    pub fn tag_combination(&mut self, slug: &str) {
        for item in &mut self.items {
            if item.combination.is_none() {
                item.combination = Some(slug.to_string());
            }
        }
    }

    /// Count per error kind, sorted by kind name.
    pub fn counts_by_kind(&self) -> BTreeMap<&'static str, usize> {
        let mut counts = BTreeMap::new();
        for item in &self.items {
            *counts.entry(item.kind()).or_insert(0) += 1;
        }
        counts
    }

    /// True if any entry carries the given error kind.
    pub fn has_kind(&self, kind: &str) -> bool {
        self.items.iter().any(|d| d.kind() == kind)
    }
}

impl IntoIterator for Diagnostics {
    type Item = Diagnostic;
    type IntoIter = std::vec::IntoIter<Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl FromIterator<Diagnostic> for Diagnostics {
    fn from_iter<T: IntoIterator<Item = Diagnostic>>(iter: T) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}
