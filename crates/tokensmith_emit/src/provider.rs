//! `TokenProvider.kt`: picks a combination's token objects at runtime

use tokensmith_core::Combination;

use crate::category::Category;
use crate::kotlin::{escape, object_name};
use crate::naming::{pascal, split_words};

pub const PROVIDER_FILE: &str = "TokenProvider.kt";

fn alias(combination: &Combination, category: Category) -> String {
    let mut words = split_words(&combination.brand);
    words.extend(split_words(&combination.theme));
    format!("{}{}", pascal(&words), object_name(category))
}

/// Render the provider for `combinations`.
///
/// Each `xxxTokens(brand, theme)` function matches names case-insensitively
/// and falls back to `fallback` for anything unknown.
pub fn render_provider(
    base_package: &str,
    combinations: &[Combination],
    fallback: &Combination,
) -> String {
    let mut out = String::new();
    out.push_str("// TokenProvider: generated by tokensmith. Do not edit.\n");
    out.push_str(&format!("package {base_package}\n\n"));

    for combination in combinations {
        for category in Category::ALL {
            out.push_str(&format!(
                "import {base_package}.{}.{} as {}\n",
                combination.slug(),
                object_name(category),
                alias(combination, category)
            ));
        }
    }
    if !combinations.is_empty() {
        out.push('\n');
    }

    out.push_str("object TokenProvider {\n");
    for (i, category) in Category::ALL.into_iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        let object = object_name(category);
        let function = format!("{}{}", object[..1].to_ascii_lowercase(), &object[1..]);
        out.push_str(&format!(
            "    fun {function}(brand: String, theme: String): Any = when {{\n"
        ));
        for combination in combinations {
            out.push_str(&format!(
                "        brand.equals(\"{}\", ignoreCase = true) && theme.equals(\"{}\", ignoreCase = true) -> {}\n",
                escape(&combination.brand),
                escape(&combination.theme),
                alias(combination, category)
            ));
        }
        out.push_str(&format!("        else -> {}\n", alias(fallback, category)));
        out.push_str("    }\n");
    }
    out.push_str("}\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_every_combination() {
        let combos = vec![
            Combination::new("Default", "Day"),
            Combination::new("Luxury", "Night"),
        ];
        let kt = render_provider("com.example.theme", &combos, &combos[0]);

        assert!(kt.contains(
            "import com.example.theme.luxury_night.ColorTokens as LuxuryNightColorTokens"
        ));
        assert!(kt.contains("    fun colorTokens(brand: String, theme: String): Any = when {"));
        assert!(kt.contains(
            "brand.equals(\"Luxury\", ignoreCase = true) && theme.equals(\"Night\", ignoreCase = true) -> LuxuryNightBorderRadiusTokens"
        ));
        assert!(kt.contains("        else -> DefaultDayComponentTokens"));
    }
}
