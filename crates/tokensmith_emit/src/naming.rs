//! Identifier sanitization
//!
//! Paths are first split into words, then joined in the casing each target
//! expects. Word boundaries are:
//!
//! - any character that is not an ASCII letter or digit (`-`, `_`, `.`, space)
//! - a lowercase letter or digit followed by an uppercase letter (`borderRadius`)
//! - a letter followed by a digit (`radius4`)
//!
//! so `border-radius.4` and `borderRadius4` both become `border radius 4`.

use tokensmith_core::TokenPath;

/// Kotlin hard keywords; these need backticks to be used as names.
const KOTLIN_KEYWORDS: &[&str] = &[
    "as", "break", "class", "continue", "do", "else", "false", "for", "fun", "if", "in",
    "interface", "is", "null", "object", "package", "return", "super", "this", "throw", "true",
    "try", "typealias", "typeof", "val", "var", "when", "while",
];

/// Split one string into lowercase words.
pub fn split_words(src: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut prev: Option<char> = None;

    for c in src.chars() {
        if !c.is_ascii_alphanumeric() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            prev = None;
            continue;
        }
        if let Some(p) = prev {
            let lower_to_upper = (p.is_ascii_lowercase() || p.is_ascii_digit()) && c.is_ascii_uppercase();
            let letter_to_digit = p.is_ascii_alphabetic() && c.is_ascii_digit();
            if (lower_to_upper || letter_to_digit) && !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
        }
        current.push(c.to_ascii_lowercase());
        prev = Some(c);
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}

/// Words of every path segment, with `prefix` in front when the first word
/// would start with a digit.
pub fn path_words(path: &TokenPath, prefix: &str) -> Vec<String> {
    let mut words: Vec<String> = path
        .segments()
        .iter()
        .flat_map(|segment| split_words(segment))
        .collect();
    let leading_digit = words
        .first()
        .and_then(|w| w.chars().next())
        .map_or(true, |c| c.is_ascii_digit());
    if leading_digit {
        words.insert(0, prefix.to_string());
    }
    words
}

/// Key used to compare root names regardless of their spelling.
pub fn normalize_key(src: &str) -> String {
    split_words(src).concat()
}

pub fn lower_camel(words: &[String]) -> String {
    let mut out = String::new();
    for (i, word) in words.iter().enumerate() {
        if i == 0 {
            out.push_str(word);
        } else {
            out.push_str(&capitalize(word));
        }
    }
    out
}

pub fn pascal(words: &[String]) -> String {
    words.iter().map(|w| capitalize(w)).collect()
}

pub fn snake(words: &[String]) -> String {
    words.join("_")
}

pub fn kebab(words: &[String]) -> String {
    words.join("-")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}

/// lowerCamelCase Kotlin property name, backticked if it is a keyword
pub fn kotlin_name(path: &TokenPath, prefix: &str) -> String {
    let name = lower_camel(&path_words(path, prefix));
    if KOTLIN_KEYWORDS.contains(&name.as_str()) {
        format!("`{name}`")
    } else {
        name
    }
}

/// snake_case Android resource name
pub fn xml_name(path: &TokenPath, prefix: &str) -> String {
    snake(&path_words(path, prefix))
}

/// `--kebab-case` custom property name
pub fn css_name(path: &TokenPath, prefix: &str) -> String {
    format!("--{}", kebab(&path_words(path, prefix)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn path(s: &str) -> TokenPath {
        TokenPath::parse(s).unwrap()
    }

    #[test]
    fn word_boundaries() {
        assert_eq!(split_words("borderRadius4"), vec!["border", "radius", "4"]);
        assert_eq!(split_words("body-100"), vec!["body", "100"]);
        assert_eq!(split_words("Typography-Advanced"), vec!["typography", "advanced"]);
        assert_eq!(split_words("tt commons_pro"), vec!["tt", "commons", "pro"]);
        assert_eq!(split_words("h1Title"), vec!["h", "1", "title"]);
        assert_eq!(split_words("4xl"), vec!["4xl"]);
        assert!(split_words("--").is_empty());
    }

    #[test]
    fn casing_per_target() {
        let p = path("color.brand.primary-hover");
        assert_eq!(kotlin_name(&p, "color"), "colorBrandPrimaryHover");
        assert_eq!(xml_name(&p, "color"), "color_brand_primary_hover");
        assert_eq!(css_name(&p, "color"), "--color-brand-primary-hover");
    }

    #[test]
    fn leading_digit_gets_prefix() {
        let p = path("8.spacing");
        assert_eq!(kotlin_name(&p, "spacing"), "spacing8Spacing");
        assert_eq!(xml_name(&p, "spacing"), "spacing_8_spacing");
        assert_eq!(css_name(&p, "spacing"), "--spacing-8-spacing");
        for name in [kotlin_name(&p, "spacing"), xml_name(&p, "spacing")] {
            assert!(!name.starts_with(|c: char| c.is_ascii_digit()));
        }
    }

    #[test]
    fn separators_only_falls_back_to_prefix() {
        assert_eq!(xml_name(&path("-"), "radius"), "radius");
    }

    #[test]
    fn spellings_converge() {
        assert_eq!(
            kotlin_name(&path("border-radius.4"), "radius"),
            kotlin_name(&path("borderRadius4"), "radius")
        );
        assert_eq!(normalize_key("border-radius"), normalize_key("borderRadius"));
    }

    #[test]
    fn kotlin_keywords_are_escaped() {
        assert_eq!(kotlin_name(&path("in"), "motion"), "`in`");
        assert_eq!(kotlin_name(&path("motion.in"), "motion"), "motionIn");
    }

    #[test]
    fn pascal_case() {
        assert_eq!(pascal(&split_words("luxury_night")), "LuxuryNight");
    }
}
