//! Android resource XML

use tokensmith_core::{format_f64, TokenPath};

use crate::category::Category;
use crate::emitter::{EmitContext, Emitter, Entry};
use crate::naming::xml_name;
use crate::rules::Platform;
use crate::shape::{as_int, is_text_size, GenericFamily, Shape, Unit};

/// Writes one `<resources>` file per category
#[derive(Clone, Copy, Debug, Default)]
pub struct XmlEmitter;

/// Escape text content and attribute values.
pub fn escape(src: &str) -> String {
    let mut out = String::with_capacity(src.len());
    for c in src.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            other => out.push(other),
        }
    }
    out
}

/// Escape the body of a `<string>` resource.
pub fn escape_string(src: &str) -> String {
    escape(src).replace('\'', "\\'")
}

fn float_item(name: &str, value: f64) -> String {
    format!(
        "    <item name=\"{name}\" type=\"dimen\" format=\"float\">{}</item>",
        format_f64(value)
    )
}

fn format_entry(entry: &Entry) -> Result<String, String> {
    let name = &entry.identifier;
    Ok(match &entry.shape {
        Shape::Color(rgba) => {
            let hex = if rgba.is_opaque() {
                rgba.to_rgb_hex()
            } else {
                rgba.to_argb_hex()
            };
            format!("    <color name=\"{name}\">#{hex}</color>")
        }
        Shape::Dimension { value, unit } => {
            let suffix = match unit {
                Unit::None | Unit::Px | Unit::Dp if is_text_size(&entry.path) => "sp",
                Unit::None | Unit::Px | Unit::Dp => "dp",
                Unit::Sp => "sp",
                Unit::Em => return Ok(float_item(name, *value)),
                Unit::Rem => return Err("rem has no Android resource unit".to_string()),
                Unit::Percent => {
                    return Err("percentages have no Android resource unit".to_string())
                }
            };
            format!("    <dimen name=\"{name}\">{}{suffix}</dimen>", format_f64(*value))
        }
        Shape::Duration(ms) => {
            let ms = as_int(ms.round()).ok_or_else(|| {
                format!("duration {}ms does not fit in an <integer>", format_f64(*ms))
            })?;
            format!("    <integer name=\"{name}\">{ms}</integer>")
        }
        Shape::Number(n) if n.fract() == 0.0 => {
            let n = as_int(*n)
                .ok_or_else(|| format!("{} does not fit in an <integer>", format_f64(*n)))?;
            format!("    <integer name=\"{name}\">{n}</integer>")
        }
        Shape::Number(n) => float_item(name, *n),
        Shape::Bool(b) => format!("    <bool name=\"{name}\">{b}</bool>"),
        Shape::FontFamily(family) => format!(
            "    <string name=\"{name}\">{}</string>",
            GenericFamily::for_family(family).android_name()
        ),
        Shape::Text(text) | Shape::Composite(text) => {
            format!("    <string name=\"{name}\">{}</string>", escape_string(text))
        }
    })
}

impl Emitter for XmlEmitter {
    fn platform(&self) -> Platform {
        Platform::Xml
    }

    fn file_name(&self, category: Category) -> &'static str {
        match category {
            Category::Colors => "colors.xml",
            Category::Spacing => "dimens.xml",
            Category::Radius => "radius.xml",
            Category::Elevation => "elevation.xml",
            Category::Typography => "typography.xml",
            Category::Motion => "animations.xml",
            Category::Accessibility => "accessibility.xml",
            Category::Interactions => "interactions.xml",
            Category::Components => "components.xml",
            Category::Layout => "layout.xml",
            Category::Platforms => "platforms.xml",
        }
    }

    fn identifier(&self, path: &TokenPath, category: Category) -> String {
        xml_name(path, category.prefix())
    }

    fn category_header(&self, category: Category, _entries: &[Entry], ctx: &EmitContext) -> String {
        // `--` is not allowed inside XML comments
        let banner = ctx.banner(category.title()).replace("--", "- -");
        format!("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<!-- {banner} -->\n<resources>\n")
    }

    fn entry(&self, _category: Category, entry: &Entry) -> Result<String, String> {
        format_entry(entry)
    }

    fn footer(&self, _category: Category) -> String {
        "</resources>\n".to_string()
    }
}
