//! Error types
//!
//! [`TokenError`] is the per-token taxonomy: every variant is recoverable and
//! ends up in a [`Diagnostic`](crate::Diagnostic) rather than aborting a run.
//! [`LoadError`] covers structural failures that do abort.

use std::path::PathBuf;

use thiserror::Error;

use crate::path::TokenPath;

/// Invalid dot-path syntax
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PathError {
    #[error("empty token path")]
    Empty,

    #[error("token path `{path}` has an empty segment at position {index}")]
    EmptySegment { path: String, index: usize },
}

/// Per-token failures collected during resolution and emission
#[derive(Debug, Clone, Error, PartialEq, Eq, Hash)]
pub enum TokenError {
    /// Alias target does not exist (or names a group rather than a token)
    #[error("`{token}` references `{reference}`, which does not resolve to a token")]
    MissingReference {
        token: TokenPath,
        reference: String,
    },

    /// Alias chain revisits a path
    #[error("alias cycle: {}", format_chain(.chain))]
    Cycle { chain: Vec<TokenPath> },

    /// Distinct paths sanitize to the same output identifier
    #[error("identifier `{identifier}` is produced by {}", format_paths(.paths))]
    IdentifierCollision {
        identifier: String,
        paths: Vec<TokenPath>,
    },

    /// Value shape the target cannot represent
    #[error("`{token}` cannot be represented: {reason}")]
    UnsupportedValue { token: TokenPath, reason: String },
}

impl TokenError {
    /// Short stable name used to group the run summary.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MissingReference { .. } => "missing-reference",
            Self::Cycle { .. } => "cycle",
            Self::IdentifierCollision { .. } => "identifier-collision",
            Self::UnsupportedValue { .. } => "unsupported-value",
        }
    }
}

fn format_chain(chain: &[TokenPath]) -> String {
    chain
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" -> ")
}

fn format_paths(paths: &[TokenPath]) -> String {
    paths
        .iter()
        .map(|p| format!("`{p}`"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Structural failures while reading token documents
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("token directory {} does not exist", .0.display())]
    MissingRoot(PathBuf),

    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{} must contain a JSON object at the top level", .0.display())]
    NotAnObject(PathBuf),

    #[error("layer `{layer}` has an invalid path pattern: {msg}")]
    Pattern { layer: String, msg: String },
}

/// Result type for loading operations
pub type Result<T> = std::result::Result<T, LoadError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycle_message_lists_chain() {
        let err = TokenError::Cycle {
            chain: vec![
                TokenPath::parse("x").unwrap(),
                TokenPath::parse("y").unwrap(),
                TokenPath::parse("x").unwrap(),
            ],
        };
        assert_eq!(err.to_string(), "alias cycle: x -> y -> x");
        assert_eq!(err.kind(), "cycle");
    }

    #[test]
    fn collision_message_lists_paths() {
        let err = TokenError::IdentifierCollision {
            identifier: "borderRadius4".to_string(),
            paths: vec![
                TokenPath::parse("border-radius.4").unwrap(),
                TokenPath::parse("borderRadius4").unwrap(),
            ],
        };
        assert_eq!(
            err.to_string(),
            "identifier `borderRadius4` is produced by `border-radius.4`, `borderRadius4`"
        );
    }
}
