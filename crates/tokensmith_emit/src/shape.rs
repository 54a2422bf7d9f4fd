//! Value shaping
//!
//! Classifies a resolved literal into a [`Shape`] so emitters only deal with
//! syntax. Classification looks at the literal itself first (hex colors,
//! `16px`, `300ms`), then at the token's `type` hint, and finally at the path
//! and category for bare numbers.

use std::sync::OnceLock;

use regex::Regex;
use tokensmith_core::{Literal, TokenPath};

use crate::category::Category;
use crate::naming::{normalize_key, split_words};

/// An sRGB color with alpha
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    /// Parse CSS-order hex: `#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa`.
    pub fn parse_hex(src: &str) -> Option<Self> {
        let hex = src.trim().strip_prefix('#')?;
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        let nibble = |i: usize| u8::from_str_radix(&hex[i..=i], 16).ok().map(|v| v * 17);
        let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();

        match hex.len() {
            3 => Some(Self { r: nibble(0)?, g: nibble(1)?, b: nibble(2)?, a: 255 }),
            4 => Some(Self { r: nibble(0)?, g: nibble(1)?, b: nibble(2)?, a: nibble(3)? }),
            6 => Some(Self { r: byte(0)?, g: byte(2)?, b: byte(4)?, a: 255 }),
            8 => Some(Self { r: byte(0)?, g: byte(2)?, b: byte(4)?, a: byte(6)? }),
            _ => None,
        }
    }

    pub fn is_opaque(&self) -> bool {
        self.a == 255
    }

    /// `AARRGGBB`, uppercase
    pub fn to_argb_hex(&self) -> String {
        format!("{:02X}{:02X}{:02X}{:02X}", self.a, self.r, self.g, self.b)
    }

    /// `RRGGBB`, uppercase
    pub fn to_rgb_hex(&self) -> String {
        format!("{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

/// Unit of a dimension
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Unit {
    /// Bare number in a dimensional position; each platform picks its default.
    None,
    Px,
    Dp,
    Sp,
    Em,
    Rem,
    Percent,
}

impl Unit {
    fn from_suffix(suffix: &str) -> Option<Self> {
        match suffix {
            "" => Some(Unit::None),
            "px" => Some(Unit::Px),
            "dp" => Some(Unit::Dp),
            "sp" => Some(Unit::Sp),
            "em" => Some(Unit::Em),
            "rem" => Some(Unit::Rem),
            "%" => Some(Unit::Percent),
            _ => None,
        }
    }
}

/// Generic Android font family
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GenericFamily {
    SansSerif,
    Serif,
    Monospace,
}

impl GenericFamily {
    /// Pick the generic family closest to a font stack like `"Georgia, serif"`.
    pub fn for_family(name: &str) -> Self {
        let lower = name.to_ascii_lowercase();
        if lower.contains("mono") {
            GenericFamily::Monospace
        } else if (lower.contains("serif") && !lower.contains("sans-serif"))
            || lower.contains("georgia")
            || lower.contains("times")
        {
            GenericFamily::Serif
        } else {
            GenericFamily::SansSerif
        }
    }

    /// Android resource name (`sans-serif`, `serif`, `monospace`)
    pub fn android_name(&self) -> &'static str {
        match self {
            GenericFamily::SansSerif => "sans-serif",
            GenericFamily::Serif => "serif",
            GenericFamily::Monospace => "monospace",
        }
    }

    /// Compose `FontFamily` member
    pub fn compose_name(&self) -> &'static str {
        match self {
            GenericFamily::SansSerif => "FontFamily.SansSerif",
            GenericFamily::Serif => "FontFamily.Serif",
            GenericFamily::Monospace => "FontFamily.Monospace",
        }
    }
}

/// Classified literal
#[derive(Clone, Debug, PartialEq)]
pub enum Shape {
    Color(Rgba),
    Dimension { value: f64, unit: Unit },
    /// Milliseconds
    Duration(f64),
    Number(f64),
    Bool(bool),
    /// Font family name or stack
    FontFamily(String),
    /// Keyword or single-part string
    Text(String),
    /// Multi-part CSS value (`2px solid #000`, `linear-gradient(...)`)
    Composite(String),
}

impl Shape {
    pub fn is_composite(&self) -> bool {
        matches!(self, Shape::Composite(_))
    }
}

fn dimension_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(-?(?:\d+\.?\d*|\.\d+))(px|dp|sp|em|rem|%)?$").expect("Invalid regex pattern")
    })
}

fn duration_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(-?(?:\d+\.?\d*|\.\d+))(ms|s)$").expect("Invalid regex pattern")
    })
}

/// What a `type` hint says about a number
enum Hint {
    Dimension,
    Duration,
    Number,
}

fn hint(kind: Option<&str>) -> Option<Hint> {
    match normalize_key(kind?).as_str() {
        "dimension" | "spacing" | "sizing" | "borderradius" | "borderwidth" | "fontsizes"
        | "fontsize" | "lineheights" | "lineheight" | "letterspacing" => Some(Hint::Dimension),
        "duration" => Some(Hint::Duration),
        "number" | "opacity" | "fontweights" | "fontweight" => Some(Hint::Number),
        _ => None,
    }
}

const UNITLESS_WORDS: &[&str] = &[
    "weight", "weights", "opacity", "scale", "zindex", "ratio", "count",
];
const DURATION_WORDS: &[&str] = &["duration", "durations", "delay"];
const TEXT_SIZE_KEYS: &[&str] = &["fontsize", "lineheight", "letterspacing"];

fn has_key(path: &TokenPath, keys: &[&str]) -> bool {
    path.segments()
        .iter()
        .map(|s| normalize_key(s))
        .any(|s| keys.contains(&s.as_str()))
}

fn has_word(path: &TokenPath, words: &[&str]) -> bool {
    path.segments().iter().any(|segment| {
        let split = split_words(segment);
        split.iter().any(|w| words.contains(&w.as_str()))
            || split.windows(2).any(|pair| words.contains(&pair.concat().as_str()))
    })
}

/// `value` as a 32-bit integer, if it is whole and in range.
///
/// Android `<integer>` resources and Kotlin `Int` literals are both 32 bits.
pub fn as_int(value: f64) -> Option<i32> {
    let in_range = value >= f64::from(i32::MIN) && value <= f64::from(i32::MAX);
    (value.fract() == 0.0 && in_range).then_some(value as i32)
}

/// True for font sizes, line heights, and letter spacing.
pub fn is_text_size(path: &TokenPath) -> bool {
    has_key(path, TEXT_SIZE_KEYS)
}

fn is_font_family(path: &TokenPath) -> bool {
    has_key(path, &["fontfamily", "fontfamilies"])
}

/// Classify `literal`, the value of the token at `path`.
pub fn shape_of(path: &TokenPath, category: Category, kind: Option<&str>, literal: &Literal) -> Shape {
    // Platform settings are configuration strings on every target.
    if category == Category::Platforms {
        return Shape::Text(literal.to_text());
    }
    match literal {
        Literal::Bool(b) => Shape::Bool(*b),
        Literal::Number(n) => shape_number(path, category, kind, n.as_f64().unwrap_or(0.0)),
        Literal::String(s) => shape_string(path, category, kind, s),
    }
}

fn shape_number(path: &TokenPath, category: Category, kind: Option<&str>, value: f64) -> Shape {
    match hint(kind) {
        Some(Hint::Dimension) => return Shape::Dimension { value, unit: Unit::None },
        Some(Hint::Duration) => return Shape::Duration(value),
        Some(Hint::Number) => return Shape::Number(value),
        None => {}
    }

    if has_word(path, DURATION_WORDS) {
        Shape::Duration(value)
    } else if has_word(path, UNITLESS_WORDS) {
        Shape::Number(value)
    } else if category.is_dimensional()
        || is_text_size(path)
        || matches!(category, Category::Interactions | Category::Components)
    {
        Shape::Dimension { value, unit: Unit::None }
    } else {
        Shape::Number(value)
    }
}

fn shape_string(path: &TokenPath, category: Category, kind: Option<&str>, src: &str) -> Shape {
    let text = src.trim();

    if let Some(rgba) = Rgba::parse_hex(text) {
        return Shape::Color(rgba);
    }
    if is_font_family(path) {
        return Shape::FontFamily(text.to_string());
    }
    if let Some(caps) = duration_re().captures(text) {
        if let Ok(value) = caps[1].parse::<f64>() {
            let ms = if &caps[2] == "s" { value * 1000.0 } else { value };
            return Shape::Duration(ms);
        }
    }
    if let Some(caps) = dimension_re().captures(text) {
        let unit = caps.get(2).map_or("", |m| m.as_str());
        if let (Ok(value), Some(unit)) = (caps[1].parse::<f64>(), Unit::from_suffix(unit)) {
            if unit == Unit::None {
                return shape_number(path, category, kind, value);
            }
            return Shape::Dimension { value, unit };
        }
    }
    if text.contains(char::is_whitespace) || text.contains('(') || text.contains(',') {
        return Shape::Composite(src.to_string());
    }
    Shape::Text(src.to_string())
}
