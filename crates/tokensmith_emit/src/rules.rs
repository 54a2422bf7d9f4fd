//! Per-platform rules
//!
//! Which properties a platform drops, and what happens to composite values
//! in each category.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tokensmith_core::TokenPath;

use crate::category::Category;
use crate::naming::normalize_key;

/// Output target
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Kotlin,
    Xml,
    Css,
}

impl Platform {
    pub const ALL: [Platform; 3] = [Platform::Kotlin, Platform::Xml, Platform::Css];

    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Kotlin => "kotlin",
            Platform::Xml => "xml",
            Platform::Css => "css",
        }
    }

    /// Kotlin and XML both target Android.
    pub fn is_android(&self) -> bool {
        matches!(self, Platform::Kotlin | Platform::Xml)
    }
}

impl Display for Platform {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Platform::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown platform `{s}` (expected kotlin, xml, or css)"))
    }
}

/// Web-only properties with no Android meaning
const ANDROID_DENIED: &[&str] = &[
    "cursor",
    "pointerEvents",
    "userSelect",
    "outline",
    "outlineStyle",
    "backdropFilter",
];

/// What an emitter does with a composite value
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CompositePolicy {
    /// Emit the text unchanged (as a string constant on Android)
    Opaque,
    /// Leave the entry out and report it
    Skip,
}

/// Composite handling for `platform` in `category`.
pub fn composite_policy(platform: Platform, category: Category) -> CompositePolicy {
    if !platform.is_android() {
        return CompositePolicy::Opaque;
    }
    match category {
        Category::Typography
        | Category::Motion
        | Category::Interactions
        | Category::Components
        | Category::Platforms => CompositePolicy::Opaque,
        Category::Colors
        | Category::Spacing
        | Category::Radius
        | Category::Elevation
        | Category::Accessibility
        | Category::Layout => CompositePolicy::Skip,
    }
}

/// True if `platform` drops the property at `path`.
///
/// Every segment after the root is treated as a property name, so
/// `button.primary.cursor` and `interaction.focus.outline.width` are both
/// dropped on Android.
pub fn is_denied(platform: Platform, category: Category, path: &TokenPath) -> bool {
    if !platform.is_android() {
        return false;
    }
    path.segments().iter().skip(1).any(|segment| {
        let key = normalize_key(segment);
        ANDROID_DENIED.iter().any(|d| normalize_key(d) == key)
            || (key == "transition"
                && matches!(category, Category::Components | Category::Interactions))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(s: &str) -> TokenPath {
        TokenPath::parse(s).unwrap()
    }

    #[test]
    fn cursor_only_denied_on_android() {
        let p = path("button.primary.cursor");
        assert!(is_denied(Platform::Kotlin, Category::Components, &p));
        assert!(is_denied(Platform::Xml, Category::Components, &p));
        assert!(!is_denied(Platform::Css, Category::Components, &p));
    }

    #[test]
    fn transition_denied_only_in_components_and_interactions() {
        assert!(is_denied(
            Platform::Kotlin,
            Category::Interactions,
            &path("interaction.hover.transition")
        ));
        assert!(!is_denied(
            Platform::Kotlin,
            Category::Motion,
            &path("motion.transition.default")
        ));
    }

    #[test]
    fn root_is_not_a_property() {
        assert!(!is_denied(Platform::Kotlin, Category::Components, &path("outline")));
    }

    #[test]
    fn composite_policy_per_category() {
        assert_eq!(composite_policy(Platform::Css, Category::Colors), CompositePolicy::Opaque);
        assert_eq!(composite_policy(Platform::Kotlin, Category::Colors), CompositePolicy::Skip);
        assert_eq!(composite_policy(Platform::Xml, Category::Typography), CompositePolicy::Opaque);
    }

    #[test]
    fn parse_platform() {
        assert_eq!("CSS".parse::<Platform>(), Ok(Platform::Css));
        assert!("swift".parse::<Platform>().is_err());
    }
}
