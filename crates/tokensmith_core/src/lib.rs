//! tokensmith core
//!
//! Loads layered design-token documents, merges them per (brand, theme)
//! combination, and resolves `{dot.path}` aliases.
//!
//! # Pipeline
//!
//! ```rust,ignore
//! use tokensmith_core::{default_layers, resolve_all, Combination, LayerStack, TokenTree};
//!
//! let combo = Combination::new("Default", "Day");
//! let stack = LayerStack::load(tokens_dir, &default_layers(), &combo)?;
//! let tree = TokenTree::from_document(&stack.merge());
//! let resolution = resolve_all(&tree);
//!
//! for diag in resolution.diagnostics.iter() {
//!     eprintln!("{diag}");
//! }
//! ```
//!
//! # Values
//!
//! Token values are parsed into [`TokenValue`]: literals, whole-string
//! aliases, composite strings mixing text with references, and structured
//! objects or lists. Resolution turns them into [`ResolvedValue`]s.
//!
//! # Errors
//!
//! Per-token problems ([`TokenError`]) never abort a run; they are collected
//! as [`Diagnostic`]s. Unreadable or malformed documents are [`LoadError`]s.

pub mod diagnostics;
pub mod error;
pub mod layer;
pub mod merge;
pub mod path;
pub mod resolve;
pub mod tree;
pub mod value;

pub use diagnostics::{Diagnostic, Diagnostics};
pub use error::{LoadError, PathError, TokenError};
pub use layer::{
    combinations, default_layers, read_document, Combination, LayerSpec, LayerStack, LoadedLayer,
};
pub use merge::{deep_merge, merge_layers};
pub use path::TokenPath;
pub use resolve::{resolve_all, Resolution, ResolvedToken, ResolvedTokens, Resolver};
pub use tree::{RawToken, TokenTree};
pub use value::{
    format_f64, format_number, Literal, ResolvedValue, Template, TemplatePart, TokenValue,
};
