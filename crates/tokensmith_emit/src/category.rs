//! Output categories
//!
//! Every token is routed to one output document by the first segment of its
//! path. Root keys are compared after normalization, so `border-radius`,
//! `borderRadius`, and `border_radius` land in the same place.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tokensmith_core::TokenPath;

use crate::naming::normalize_key;

/// One output document grouping
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Colors,
    Spacing,
    Radius,
    Elevation,
    Typography,
    Motion,
    Accessibility,
    Interactions,
    Components,
    Layout,
    Platforms,
}

impl Category {
    /// All categories in output order
    pub const ALL: [Category; 11] = [
        Category::Colors,
        Category::Spacing,
        Category::Radius,
        Category::Elevation,
        Category::Typography,
        Category::Motion,
        Category::Accessibility,
        Category::Interactions,
        Category::Components,
        Category::Layout,
        Category::Platforms,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Colors => "colors",
            Category::Spacing => "spacing",
            Category::Radius => "radius",
            Category::Elevation => "elevation",
            Category::Typography => "typography",
            Category::Motion => "motion",
            Category::Accessibility => "accessibility",
            Category::Interactions => "interactions",
            Category::Components => "components",
            Category::Layout => "layout",
            Category::Platforms => "platforms",
        }
    }

    /// Human readable title used in file headers
    pub fn title(&self) -> &'static str {
        match self {
            Category::Colors => "Colors",
            Category::Spacing => "Spacing",
            Category::Radius => "Border radius",
            Category::Elevation => "Elevation",
            Category::Typography => "Typography",
            Category::Motion => "Motion",
            Category::Accessibility => "Accessibility",
            Category::Interactions => "Interactions",
            Category::Components => "Components",
            Category::Layout => "Layout",
            Category::Platforms => "Platforms",
        }
    }

    /// Word prepended to identifiers that would otherwise start with a digit
    pub fn prefix(&self) -> &'static str {
        match self {
            Category::Colors => "color",
            Category::Spacing => "spacing",
            Category::Radius => "radius",
            Category::Elevation => "elevation",
            Category::Typography => "typography",
            Category::Motion => "motion",
            Category::Accessibility => "accessibility",
            Category::Interactions => "interaction",
            Category::Components => "component",
            Category::Layout => "layout",
            Category::Platforms => "platform",
        }
    }

    /// Bare numbers in these categories are dimensions.
    pub fn is_dimensional(&self) -> bool {
        matches!(
            self,
            Category::Spacing | Category::Radius | Category::Elevation | Category::Layout
        )
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                format!(
                    "unknown category `{s}` (expected one of {})",
                    Category::ALL.map(|c| c.as_str()).join(", ")
                )
            })
    }
}

const DEFAULT_ROOTS: &[(&str, Category)] = &[
    ("color", Category::Colors),
    ("color-primitives", Category::Colors),
    ("spacing", Category::Spacing),
    ("borderWidth", Category::Spacing),
    ("borderRadius", Category::Radius),
    ("radius", Category::Radius),
    ("elevation", Category::Elevation),
    ("shadow", Category::Elevation),
    ("fontSize", Category::Typography),
    ("lineHeight", Category::Typography),
    ("fontWeight", Category::Typography),
    ("fontFamily", Category::Typography),
    ("letterSpacing", Category::Typography),
    ("textCase", Category::Typography),
    ("Typography", Category::Typography),
    ("Typography-Advanced", Category::Typography),
    ("motion", Category::Motion),
    ("Accessibility", Category::Accessibility),
    ("interaction", Category::Interactions),
    ("button", Category::Components),
    ("input", Category::Components),
    ("card", Category::Components),
    ("notification", Category::Components),
    ("form", Category::Components),
    ("checkbox", Category::Components),
    ("radio", Category::Components),
    ("toggle", Category::Components),
    ("select", Category::Components),
    ("modal", Category::Components),
    ("layout", Category::Layout),
    ("platforms", Category::Platforms),
];

/// Root key → category table
#[derive(Clone, Debug)]
pub struct CategoryMap {
    roots: FxHashMap<String, Category>,
}

impl Default for CategoryMap {
    fn default() -> Self {
        let roots = DEFAULT_ROOTS
            .iter()
            .map(|(key, category)| (normalize_key(key), *category))
            .collect();
        Self { roots }
    }
}

impl CategoryMap {
    /// Default table with `overrides` applied on top.
    pub fn with_overrides<'a, I>(overrides: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, Category)>,
    {
        let mut map = Self::default();
        for (key, category) in overrides {
            map.insert(key, category);
        }
        map
    }

    pub fn insert(&mut self, root: &str, category: Category) {
        self.roots.insert(normalize_key(root), category);
    }

    /// Category of the token at `path`, if its root key is mapped.
    pub fn classify(&self, path: &TokenPath) -> Option<Category> {
        self.roots.get(&normalize_key(path.root())).copied()
    }
}
