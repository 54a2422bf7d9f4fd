//! Jetpack Compose Kotlin objects

use tokensmith_core::{format_f64, TokenPath};

use crate::category::Category;
use crate::emitter::{EmitContext, Emitter, Entry};
use crate::naming::kotlin_name;
use crate::rules::Platform;
use crate::shape::{as_int, is_text_size, GenericFamily, Shape, Unit};

/// Writes one `object XxxTokens` per category
#[derive(Clone, Copy, Debug, Default)]
pub struct KotlinEmitter;

/// Name of the object holding `category`'s tokens
pub fn object_name(category: Category) -> &'static str {
    match category {
        Category::Colors => "ColorTokens",
        Category::Spacing => "SpacingTokens",
        Category::Radius => "BorderRadiusTokens",
        Category::Elevation => "ElevationTokens",
        Category::Typography => "TypographyTokens",
        Category::Motion => "MotionTokens",
        Category::Accessibility => "AccessibilityTokens",
        Category::Interactions => "InteractionTokens",
        Category::Components => "ComponentTokens",
        Category::Layout => "LayoutTokens",
        Category::Platforms => "PlatformTokens",
    }
}

/// Escape for a double-quoted Kotlin string literal.
pub fn escape(src: &str) -> String {
    let mut out = String::with_capacity(src.len());
    for c in src.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '$' => out.push_str("\\$"),
            '\n' => out.push_str("\\n"),
            other => out.push(other),
        }
    }
    out
}

/// Compose unit extension for a dimension, or why there is none
fn unit_suffix(path: &TokenPath, unit: Unit) -> Result<&'static str, String> {
    match unit {
        Unit::None | Unit::Px | Unit::Dp if is_text_size(path) => Ok("sp"),
        Unit::None | Unit::Px | Unit::Dp => Ok("dp"),
        Unit::Sp => Ok("sp"),
        Unit::Em => Ok("em"),
        Unit::Rem => Err("rem has no Compose unit".to_string()),
        Unit::Percent => Err("percentages have no Compose unit".to_string()),
    }
}

fn format_value(entry: &Entry) -> Result<String, String> {
    Ok(match &entry.shape {
        Shape::Color(rgba) => format!("Color(0x{})", rgba.to_argb_hex()),
        Shape::Dimension { value, unit } => {
            format!("{}.{}", format_f64(*value), unit_suffix(&entry.path, *unit)?)
        }
        Shape::Duration(ms) => as_int(ms.round())
            .ok_or_else(|| format!("duration {}ms does not fit in an Int", format_f64(*ms)))?
            .to_string(),
        Shape::Number(n) if n.fract() == 0.0 => as_int(*n)
            .ok_or_else(|| format!("{} does not fit in an Int", format_f64(*n)))?
            .to_string(),
        Shape::Number(n) => format!("{}f", format_f64(*n)),
        Shape::Bool(b) => b.to_string(),
        Shape::FontFamily(name) => GenericFamily::for_family(name).compose_name().to_string(),
        Shape::Text(text) | Shape::Composite(text) => format!("\"{}\"", escape(text)),
    })
}

impl Emitter for KotlinEmitter {
    fn platform(&self) -> Platform {
        Platform::Kotlin
    }

    fn file_name(&self, category: Category) -> &'static str {
        match category {
            Category::Colors => "Color.kt",
            Category::Spacing => "Spacing.kt",
            Category::Radius => "BorderRadius.kt",
            Category::Elevation => "Elevation.kt",
            Category::Typography => "Typography.kt",
            Category::Motion => "Motion.kt",
            Category::Accessibility => "Accessibility.kt",
            Category::Interactions => "Interactions.kt",
            Category::Components => "Components.kt",
            Category::Layout => "Layout.kt",
            Category::Platforms => "Platforms.kt",
        }
    }

    fn identifier(&self, path: &TokenPath, category: Category) -> String {
        kotlin_name(path, category.prefix())
    }

    fn category_header(&self, category: Category, entries: &[Entry], ctx: &EmitContext) -> String {
        let mut imports = Vec::new();
        if entries.iter().any(|e| matches!(e.shape, Shape::Color(_))) {
            imports.push("androidx.compose.ui.graphics.Color");
        }
        if entries.iter().any(|e| matches!(e.shape, Shape::FontFamily(_))) {
            imports.push("androidx.compose.ui.text.font.FontFamily");
        }
        for unit in ["dp", "em", "sp"] {
            let used = entries.iter().any(|e| match e.shape {
                Shape::Dimension { unit: u, .. } => unit_suffix(&e.path, u) == Ok(unit),
                _ => false,
            });
            if used {
                imports.push(match unit {
                    "dp" => "androidx.compose.ui.unit.dp",
                    "em" => "androidx.compose.ui.unit.em",
                    _ => "androidx.compose.ui.unit.sp",
                });
            }
        }

        let mut out = format!(
            "// {}\npackage {}\n\n",
            ctx.banner(category.title()),
            ctx.package()
        );
        for import in &imports {
            out.push_str(&format!("import {import}\n"));
        }
        if !imports.is_empty() {
            out.push('\n');
        }
        out.push_str(&format!("object {} {{\n", object_name(category)));
        out
    }

    fn entry(&self, _category: Category, entry: &Entry) -> Result<String, String> {
        Ok(format!("    val {} = {}", entry.identifier, format_value(entry)?))
    }

    fn footer(&self, _category: Category) -> String {
        "}\n".to_string()
    }
}
