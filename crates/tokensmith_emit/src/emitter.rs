//! Emitter trait and the shared rendering driver
//!
//! The driver does everything that is not syntax: routing tokens to
//! categories, flattening structured values, platform rules, composite
//! policy, and identifier collisions. An [`Emitter`] only decides what a
//! header, an entry, and a footer look like.

use std::collections::BTreeMap;

use tokensmith_core::{
    Combination, Diagnostic, Diagnostics, Literal, ResolvedToken, ResolvedTokens, ResolvedValue,
    TokenError, TokenPath,
};
use tracing::debug;

use crate::category::{Category, CategoryMap};
use crate::rules::{composite_policy, is_denied, CompositePolicy, Platform};
use crate::shape::{shape_of, Shape};

/// Per-combination settings shared by all emitters
#[derive(Clone, Debug)]
pub struct EmitContext {
    pub combination: Combination,
    /// Base Kotlin package; the combination slug is appended.
    pub kotlin_package: String,
}

impl EmitContext {
    pub fn new(combination: Combination, kotlin_package: impl Into<String>) -> Self {
        Self {
            combination,
            kotlin_package: kotlin_package.into(),
        }
    }

    /// Kotlin package of this combination's files
    pub fn package(&self) -> String {
        format!("{}.{}", self.kotlin_package, self.combination.slug())
    }

    /// One-line provenance note placed at the top of every file
    pub fn banner(&self, category: &str) -> String {
        format!(
            "{category}: generated by tokensmith for {}. Do not edit.",
            self.combination
        )
    }
}

/// A value ready to be written
#[derive(Clone, Debug, PartialEq)]
pub struct Entry {
    pub identifier: String,
    pub path: TokenPath,
    pub shape: Shape,
    /// Textual form of the source literal
    pub raw: String,
}

/// One rendered output file
#[derive(Clone, Debug, PartialEq)]
pub struct Document {
    /// `None` for aggregate files
    pub category: Option<Category>,
    pub file_name: String,
    pub content: String,
    /// Rendered entry lines, in output order
    pub lines: Vec<String>,
    /// The entry behind each line
    pub entries: Vec<Entry>,
}

impl Document {
    pub fn entry_count(&self) -> usize {
        self.lines.len()
    }
}

/// Every document one emitter produced for one combination
#[derive(Clone, Debug)]
pub struct Output {
    pub platform: Platform,
    pub documents: Vec<Document>,
    pub diagnostics: Diagnostics,
}

impl Output {
    pub fn entry_count(&self) -> usize {
        self.documents
            .iter()
            .filter(|d| d.category.is_some())
            .map(Document::entry_count)
            .sum()
    }
}

/// Platform syntax
pub trait Emitter {
    fn platform(&self) -> Platform;

    /// File written for `category`
    fn file_name(&self, category: Category) -> &'static str;

    /// Sanitized name for the entry at `path`
    fn identifier(&self, path: &TokenPath, category: Category) -> String;

    /// Text before the first entry; sees the entries so it can pick imports.
    fn category_header(&self, category: Category, entries: &[Entry], ctx: &EmitContext) -> String;

    /// One line for `entry`, or the reason it cannot be represented.
    fn entry(&self, category: Category, entry: &Entry) -> Result<String, String>;

    fn footer(&self, category: Category) -> String;

    /// Extra file built from the per-category documents
    fn aggregate(&self, _documents: &[Document], _ctx: &EmitContext) -> Option<Document> {
        None
    }

    /// Render every category for one combination.
    fn render(&self, tokens: &ResolvedTokens, categories: &CategoryMap, ctx: &EmitContext) -> Output {
        render_all(self, tokens, categories, ctx)
    }
}

/// Render all categories plus the emitter's aggregate, if any.
pub fn render_all<E: Emitter + ?Sized>(
    emitter: &E,
    tokens: &ResolvedTokens,
    categories: &CategoryMap,
    ctx: &EmitContext,
) -> Output {
    let mut by_category: BTreeMap<Category, Vec<(&TokenPath, &ResolvedToken)>> = BTreeMap::new();
    for (path, token) in tokens {
        match categories.classify(path) {
            Some(category) => by_category.entry(category).or_default().push((path, token)),
            None => debug!("`{}` has no output category (root `{}`)", path, path.root()),
        }
    }

    let mut diagnostics = Diagnostics::new();
    let mut documents = Vec::with_capacity(Category::ALL.len() + 1);
    for category in Category::ALL {
        let members = by_category.remove(&category).unwrap_or_default();
        documents.push(render_document(emitter, category, &members, ctx, &mut diagnostics));
    }
    let (sections, collisions) = shared_namespace(&documents);
    if let Some(aggregate) = emitter.aggregate(&sections, ctx) {
        for collision in collisions {
            diagnostics.push(collision);
        }
        documents.push(aggregate);
    }

    let platform = emitter.platform();
    let diagnostics = diagnostics
        .into_iter()
        .map(|d| d.with_platform(platform.as_str()))
        .collect();

    Output {
        platform,
        documents,
        diagnostics,
    }
}

/// A flattened literal position inside a token
enum Leaf {
    Literal(Literal),
    List(Vec<Literal>),
    Unsupported(String),
}

fn flatten(path: &TokenPath, value: &ResolvedValue, out: &mut Vec<(TokenPath, Leaf)>) {
    match value {
        ResolvedValue::Literal(lit) => out.push((path.clone(), Leaf::Literal(lit.clone()))),
        ResolvedValue::Object(members) => {
            for (key, member) in members {
                if key.is_empty() || key.starts_with('_') || key.starts_with('$') {
                    continue;
                }
                flatten(&path.child(key.as_str()), member, out);
            }
        }
        ResolvedValue::List(items) => {
            let literals: Option<Vec<Literal>> = items
                .iter()
                .map(|item| item.as_literal().cloned())
                .collect();
            let leaf = match literals {
                Some(literals) => Leaf::List(literals),
                None => Leaf::Unsupported("list holds structured values".to_string()),
            };
            out.push((path.clone(), leaf));
        }
    }
}

fn unsupported(path: &TokenPath, reason: impl Into<String>) -> Diagnostic {
    Diagnostic::new(TokenError::UnsupportedValue {
        token: path.clone(),
        reason: reason.into(),
    })
}

/// Render one category document.
pub fn render_document<E: Emitter + ?Sized>(
    emitter: &E,
    category: Category,
    tokens: &[(&TokenPath, &ResolvedToken)],
    ctx: &EmitContext,
    diagnostics: &mut Diagnostics,
) -> Document {
    let platform = emitter.platform();

    let mut leaves = Vec::new();
    for (path, token) in tokens {
        let mut flat = Vec::new();
        flatten(path, &token.value, &mut flat);
        // Only the token's own literal carries its type hint; members do not.
        let direct = matches!(token.value, ResolvedValue::Literal(_));
        for (leaf_path, leaf) in flat {
            let kind = if direct { token.kind.as_deref() } else { None };
            leaves.push((leaf_path, leaf, kind));
        }
    }
    leaves.sort_by(|a, b| a.0.cmp(&b.0));

    let mut candidates: Vec<Entry> = Vec::new();
    for (path, leaf, kind) in leaves {
        if is_denied(platform, category, &path) {
            debug!("`{}` is not emitted for {}", path, platform);
            continue;
        }

        let (shape, raw) = match leaf {
            Leaf::Literal(lit) => (shape_of(&path, category, kind, &lit), lit.to_text()),
            Leaf::List(items) => {
                if platform.is_android() {
                    diagnostics.push(unsupported(&path, format!("lists have no {platform} form")));
                    continue;
                }
                let joined = items
                    .iter()
                    .map(Literal::to_text)
                    .collect::<Vec<_>>()
                    .join(", ");
                (Shape::Composite(joined.clone()), joined)
            }
            Leaf::Unsupported(reason) => {
                diagnostics.push(unsupported(&path, reason));
                continue;
            }
        };

        if category == Category::Colors
            && platform.is_android()
            && !matches!(shape, Shape::Color(_))
        {
            diagnostics.push(unsupported(&path, format!("`{raw}` is not a hex color")));
            continue;
        }
        if shape.is_composite() && composite_policy(platform, category) == CompositePolicy::Skip {
            diagnostics.push(unsupported(
                &path,
                format!("composite value `{raw}` has no {platform} form in {category}"),
            ));
            continue;
        }

        candidates.push(Entry {
            identifier: emitter.identifier(&path, category),
            path,
            shape,
            raw,
        });
    }

    let entries = drop_collisions(candidates, diagnostics);

    let mut lines = Vec::with_capacity(entries.len());
    let mut written = Vec::with_capacity(entries.len());
    for entry in entries {
        match emitter.entry(category, &entry) {
            Ok(line) => {
                lines.push(line);
                written.push(entry);
            }
            Err(reason) => diagnostics.push(unsupported(&entry.path, reason)),
        }
    }

    let mut content = emitter.category_header(category, &written, ctx);
    for line in &lines {
        content.push_str(line);
        content.push('\n');
    }
    content.push_str(&emitter.footer(category));

    Document {
        category: Some(category),
        file_name: emitter.file_name(category).to_string(),
        content,
        lines,
        entries: written,
    }
}

/// Category documents seen as one namespace, for aggregate files.
///
/// An entry whose identifier an earlier category already uses is left out
/// of the returned sections, and one collision is reported per identifier.
fn shared_namespace(documents: &[Document]) -> (Vec<Document>, Vec<Diagnostic>) {
    let mut claimed: BTreeMap<String, Vec<TokenPath>> = BTreeMap::new();
    let mut sections = Vec::with_capacity(documents.len());

    for doc in documents {
        let mut section = Document {
            lines: Vec::with_capacity(doc.lines.len()),
            entries: Vec::with_capacity(doc.entries.len()),
            ..doc.clone()
        };
        for (line, entry) in doc.lines.iter().zip(&doc.entries) {
            let paths = claimed.entry(entry.identifier.clone()).or_default();
            paths.push(entry.path.clone());
            if paths.len() == 1 {
                section.lines.push(line.clone());
                section.entries.push(entry.clone());
            }
        }
        sections.push(section);
    }

    let collisions = claimed
        .into_iter()
        .filter(|(_, paths)| paths.len() > 1)
        .map(|(identifier, paths)| {
            Diagnostic::new(TokenError::IdentifierCollision { identifier, paths })
        })
        .collect();
    (sections, collisions)
}

/// Keep the first entry (in path order) for each identifier and report the rest.
fn drop_collisions(entries: Vec<Entry>, diagnostics: &mut Diagnostics) -> Vec<Entry> {
    let mut claimed: BTreeMap<String, Vec<TokenPath>> = BTreeMap::new();
    let mut kept = Vec::with_capacity(entries.len());

    for entry in entries {
        let paths = claimed.entry(entry.identifier.clone()).or_default();
        paths.push(entry.path.clone());
        if paths.len() == 1 {
            kept.push(entry);
        }
    }

    for (identifier, paths) in claimed {
        if paths.len() > 1 {
            diagnostics.push(Diagnostic::new(TokenError::IdentifierCollision { identifier, paths }));
        }
    }
    kept
}
