//! CSS custom properties

use tokensmith_core::{format_f64, TokenPath};

use crate::category::Category;
use crate::emitter::{Document, EmitContext, Emitter, Entry};
use crate::naming::css_name;
use crate::rules::Platform;
use crate::shape::{Shape, Unit};

/// Writes one `:root` block per category plus `tokens.css`
#[derive(Clone, Copy, Debug, Default)]
pub struct CssEmitter;

pub const AGGREGATE_FILE: &str = "tokens.css";

fn format_value(entry: &Entry) -> String {
    match &entry.shape {
        Shape::Color(_) => entry.raw.trim().to_ascii_lowercase(),
        Shape::Dimension { value, unit } => {
            let suffix = match unit {
                Unit::None | Unit::Px | Unit::Dp | Unit::Sp => "px",
                Unit::Em => "em",
                Unit::Rem => "rem",
                Unit::Percent => "%",
            };
            format!("{}{suffix}", format_f64(*value))
        }
        Shape::Duration(ms) => format!("{}ms", format_f64(*ms)),
        Shape::Number(n) => format_f64(*n),
        Shape::Bool(b) => b.to_string(),
        Shape::FontFamily(text) | Shape::Text(text) | Shape::Composite(text) => text.clone(),
    }
}

impl Emitter for CssEmitter {
    fn platform(&self) -> Platform {
        Platform::Css
    }

    fn file_name(&self, category: Category) -> &'static str {
        match category {
            Category::Colors => "colors.css",
            Category::Spacing => "spacing.css",
            Category::Radius => "radius.css",
            Category::Elevation => "elevation.css",
            Category::Typography => "typography.css",
            Category::Motion => "motion.css",
            Category::Accessibility => "accessibility.css",
            Category::Interactions => "interactions.css",
            Category::Components => "components.css",
            Category::Layout => "layout.css",
            Category::Platforms => "platforms.css",
        }
    }

    fn identifier(&self, path: &TokenPath, category: Category) -> String {
        css_name(path, category.prefix())
    }

    fn category_header(&self, category: Category, _entries: &[Entry], ctx: &EmitContext) -> String {
        format!("/* {} */\n:root {{\n", ctx.banner(category.title()))
    }

    fn entry(&self, _category: Category, entry: &Entry) -> Result<String, String> {
        Ok(format!("  {}: {};", entry.identifier, format_value(entry)))
    }

    fn footer(&self, _category: Category) -> String {
        "}\n".to_string()
    }

    /// Every category in one `:root` block, sectioned by comments.
    fn aggregate(&self, documents: &[Document], ctx: &EmitContext) -> Option<Document> {
        let mut content = format!("/* {} */\n:root {{\n", ctx.banner("All tokens"));
        let mut lines = Vec::new();
        let mut entries = Vec::new();
        let mut first = true;

        for doc in documents {
            let Some(category) = doc.category else {
                continue;
            };
            if doc.lines.is_empty() {
                continue;
            }
            if !first {
                content.push('\n');
            }
            first = false;
            content.push_str(&format!("  /* {} */\n", category.title()));
            for line in &doc.lines {
                content.push_str(line);
                content.push('\n');
                lines.push(line.clone());
            }
            entries.extend(doc.entries.iter().cloned());
        }
        content.push_str("}\n");

        Some(Document {
            category: None,
            file_name: AGGREGATE_FILE.to_string(),
            content,
            lines,
            entries,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::Rgba;
    use pretty_assertions::assert_eq;

    fn entry(path: &str, shape: Shape, raw: &str) -> Entry {
        let path = TokenPath::parse(path).unwrap();
        Entry {
            identifier: css_name(&path, "spacing"),
            path,
            shape,
            raw: raw.to_string(),
        }
    }

    #[test]
    fn colors_are_lowercase() {
        let e = entry(
            "color.brand.primary",
            Shape::Color(Rgba { r: 0xAB, g: 0xCD, b: 0xEF, a: 255 }),
            "#ABCDEF",
        );
        assert_eq!(
            CssEmitter.entry(Category::Colors, &e).unwrap(),
            "  --color-brand-primary: #abcdef;"
        );
    }

    #[test]
    fn units() {
        let zero = entry("spacing.0", Shape::Dimension { value: 0.0, unit: Unit::None }, "0");
        assert_eq!(format_value(&zero), "0px");
        let rem = entry("button.gap", Shape::Dimension { value: 1.5, unit: Unit::Rem }, "1.5rem");
        assert_eq!(format_value(&rem), "1.5rem");
        let fast = entry("motion.duration.fast", Shape::Duration(150.0), "150");
        assert_eq!(format_value(&fast), "150ms");
    }

    #[test]
    fn composites_are_verbatim() {
        let e = entry(
            "color.gradient",
            Shape::Composite("linear-gradient(90deg, #000, #fff)".to_string()),
            "linear-gradient(90deg, #000, #fff)",
        );
        assert_eq!(format_value(&e), "linear-gradient(90deg, #000, #fff)");
    }
}
