use pretty_assertions::assert_eq;
use serde_json::json;
use tokensmith_core::{resolve_all, Combination, ResolvedTokens, TokenError, TokenTree};
use tokensmith_emit::{
    emitter_for, Category, CategoryMap, CssEmitter, EmitContext, Emitter, KotlinEmitter, Output,
    Platform, XmlEmitter,
};

const PACKAGE: &str = "com.example.hmithemedemo.ui.theme";

fn resolved(doc: serde_json::Value) -> ResolvedTokens {
    let resolution = resolve_all(&TokenTree::from_document(&doc));
    assert!(resolution.diagnostics.is_empty(), "{:?}", resolution.diagnostics);
    resolution.tokens
}

fn ctx() -> EmitContext {
    EmitContext::new(Combination::new("Default", "Day"), PACKAGE)
}

fn document<'a>(output: &'a Output, file: &str) -> &'a str {
    output
        .documents
        .iter()
        .find(|d| d.file_name == file)
        .map(|d| d.content.as_str())
        .unwrap_or_else(|| panic!("{file} not rendered"))
}

#[test]
fn kotlin_color_file() {
    let tokens = resolved(json!({
        "color": {
            "brand": { "primary": { "value": "#ff0000" } },
            "text": { "value": "{color.brand.primary}" }
        }
    }));
    let output = KotlinEmitter.render(&tokens, &CategoryMap::default(), &ctx());

    assert_eq!(
        document(&output, "Color.kt"),
        "// Colors: generated by tokensmith for Brand=Default, Theme=Day. Do not edit.\n\
         package com.example.hmithemedemo.ui.theme.default_day\n\
         \n\
         import androidx.compose.ui.graphics.Color\n\
         \n\
         object ColorTokens {\n\
         \x20   val colorBrandPrimary = Color(0xFFFF0000)\n\
         \x20   val colorText = Color(0xFFFF0000)\n\
         }\n"
    );
    assert!(output.diagnostics.is_empty());
}

#[test]
fn every_category_gets_a_file() {
    let tokens = resolved(json!({}));
    for platform in Platform::ALL {
        let output = emitter_for(platform).render(&tokens, &CategoryMap::default(), &ctx());
        let expected = if platform == Platform::Css { 12 } else { 11 };
        assert_eq!(output.documents.len(), expected, "{platform}");
    }
}

#[test]
fn collision_names_both_paths() {
    let tokens = resolved(json!({
        "border-radius": { "4": { "value": 4 } },
        "borderRadius4": { "value": 6 }
    }));
    let categories = CategoryMap::with_overrides([("borderRadius4", Category::Radius)]);
    let output = KotlinEmitter.render(&tokens, &categories, &ctx());

    let collisions: Vec<_> = output
        .diagnostics
        .iter()
        .filter_map(|d| match &d.error {
            TokenError::IdentifierCollision { identifier, paths } => Some((
                identifier.clone(),
                paths.iter().map(ToString::to_string).collect::<Vec<_>>(),
            )),
            _ => None,
        })
        .collect();
    assert_eq!(
        collisions,
        vec![(
            "borderRadius4".to_string(),
            vec!["border-radius.4".to_string(), "borderRadius4".to_string()]
        )]
    );

    let radius = document(&output, "BorderRadius.kt");
    assert!(radius.contains("    val borderRadius4 = 4.dp\n"));
    assert!(!radius.contains("6.dp"));
    assert_eq!(output.diagnostics.iter().next().and_then(|d| d.platform.as_deref()), Some("kotlin"));
}

#[test]
fn leading_digit_identifiers_get_a_prefix() {
    let tokens = resolved(json!({ "8": { "spacing": { "value": 8 } } }));
    let categories = CategoryMap::with_overrides([("8", Category::Spacing)]);

    let kotlin = KotlinEmitter.render(&tokens, &categories, &ctx());
    assert!(document(&kotlin, "Spacing.kt").contains("    val spacing8Spacing = 8.dp\n"));
    let xml = XmlEmitter.render(&tokens, &categories, &ctx());
    assert!(document(&xml, "dimens.xml").contains("<dimen name=\"spacing_8_spacing\">8dp</dimen>"));
    let css = CssEmitter.render(&tokens, &categories, &ctx());
    assert!(document(&css, "spacing.css").contains("  --spacing-8-spacing: 8px;\n"));
}

#[test]
fn zero_keeps_its_unit_everywhere() {
    let tokens = resolved(json!({ "spacing": { "0": { "value": 0 } } }));
    let categories = CategoryMap::default();

    assert!(document(&KotlinEmitter.render(&tokens, &categories, &ctx()), "Spacing.kt")
        .contains("val spacing0 = 0.dp"));
    assert!(document(&XmlEmitter.render(&tokens, &categories, &ctx()), "dimens.xml")
        .contains(">0dp</dimen>"));
    assert!(document(&CssEmitter.render(&tokens, &categories, &ctx()), "spacing.css")
        .contains("--spacing-0: 0px;"));
}

#[test]
fn cursor_is_web_only() {
    let tokens = resolved(json!({
        "button": { "primary": { "value": {
            "height": 48,
            "cursor": "pointer",
            "transition": "all 150ms ease"
        } } }
    }));
    let categories = CategoryMap::default();

    let kotlin = KotlinEmitter.render(&tokens, &categories, &ctx());
    let components = document(&kotlin, "Components.kt");
    assert!(components.contains("val buttonPrimaryHeight = 48.dp"));
    assert!(!components.contains("cursor") && !components.contains("Cursor"));
    assert!(!components.contains("Transition"));
    assert!(kotlin.diagnostics.is_empty());

    let css = CssEmitter.render(&tokens, &categories, &ctx());
    let components = document(&css, "components.css");
    assert!(components.contains("  --button-primary-cursor: pointer;\n"));
    assert!(components.contains("  --button-primary-transition: all 150ms ease;\n"));
}

#[test]
fn composite_policy_differs_per_platform() {
    let tokens = resolved(json!({
        "color": {
            "base": { "value": "#000000" },
            "gradient": { "value": "linear-gradient(90deg, {color.base}, #ffffff)" }
        },
        "Typography": { "caption": { "value": { "fontFamily": "Inter, sans-serif", "fontSize": 12 } } }
    }));
    let categories = CategoryMap::default();

    let kotlin = KotlinEmitter.render(&tokens, &categories, &ctx());
    assert!(!document(&kotlin, "Color.kt").contains("gradient"));
    assert!(kotlin.diagnostics.has_kind("unsupported-value"));
    let typography = document(&kotlin, "Typography.kt");
    assert!(typography.contains("val typographyCaptionFontFamily = FontFamily.SansSerif"));
    assert!(typography.contains("val typographyCaptionFontSize = 12.sp"));
    assert!(typography.contains("import androidx.compose.ui.text.font.FontFamily"));

    let css = CssEmitter.render(&tokens, &categories, &ctx());
    assert!(document(&css, "colors.css")
        .contains("  --color-gradient: linear-gradient(90deg, #000000, #ffffff);\n"));
    assert!(css.diagnostics.is_empty());
}

#[test]
fn css_aggregate_collects_sections() {
    let tokens = resolved(json!({
        "color": { "primary": { "value": "#FF0000" } },
        "spacing": { "4": { "value": 4 } }
    }));
    let css = CssEmitter.render(&tokens, &CategoryMap::default(), &ctx());
    assert_eq!(
        document(&css, "tokens.css"),
        "/* All tokens: generated by tokensmith for Brand=Default, Theme=Day. Do not edit. */\n\
         :root {\n\
         \x20 /* Colors */\n\
         \x20 --color-primary: #ff0000;\n\
         \n\
         \x20 /* Spacing */\n\
         \x20 --spacing-4: 4px;\n\
         }\n"
    );
    assert_eq!(css.entry_count(), 2);
}

#[test]
fn css_aggregate_reports_names_shared_across_categories() {
    let tokens = resolved(json!({
        "spacing": { "4": { "value": 4 } },
        "spacing-4": { "value": 6 }
    }));
    let categories = CategoryMap::with_overrides([("spacing-4", Category::Radius)]);
    let css = CssEmitter.render(&tokens, &categories, &ctx());

    assert!(document(&css, "spacing.css").contains("  --spacing-4: 4px;\n"));
    assert!(document(&css, "radius.css").contains("  --spacing-4: 6px;\n"));
    let aggregate = document(&css, "tokens.css");
    assert!(aggregate.contains("  --spacing-4: 4px;\n"));
    assert!(!aggregate.contains("6px"));
    assert!(!aggregate.contains("/* Border radius */"));

    let collisions: Vec<_> = css
        .diagnostics
        .iter()
        .filter_map(|d| match &d.error {
            TokenError::IdentifierCollision { identifier, paths } => Some((
                identifier.clone(),
                paths.iter().map(ToString::to_string).collect::<Vec<_>>(),
            )),
            _ => None,
        })
        .collect();
    assert_eq!(
        collisions,
        vec![(
            "--spacing-4".to_string(),
            vec!["spacing.4".to_string(), "spacing-4".to_string()]
        )]
    );

    // Kotlin objects are separate namespaces
    let kotlin = KotlinEmitter.render(&tokens, &categories, &ctx());
    assert!(kotlin.diagnostics.is_empty());
}

#[test]
fn rendering_is_deterministic() {
    let doc = json!({
        "spacing": { "16": { "value": 16 }, "8": { "value": 8 }, "4": { "value": 4 } },
        "motion": { "duration": { "slow": { "value": "0.4s" }, "fast": { "value": "150ms" } } }
    });
    for platform in Platform::ALL {
        let emitter = emitter_for(platform);
        let first = emitter.render(&resolved(doc.clone()), &CategoryMap::default(), &ctx());
        let second = emitter.render(&resolved(doc.clone()), &CategoryMap::default(), &ctx());
        assert_eq!(first.documents, second.documents);
    }
}

#[test]
fn lists_only_survive_in_css() {
    let tokens = resolved(json!({ "fontFamily": { "stack": { "value": ["Inter", "Arial"] } } }));
    let categories = CategoryMap::default();

    let xml = XmlEmitter.render(&tokens, &categories, &ctx());
    assert!(xml.diagnostics.has_kind("unsupported-value"));
    let css = CssEmitter.render(&tokens, &categories, &ctx());
    assert!(document(&css, "typography.css").contains("  --font-family-stack: Inter, Arial;\n"));
}

#[test]
fn layout_and_platform_files() {
    let tokens = resolved(json!({
        "layout": {
            "breakpoint": { "md": { "value": 768 } },
            "touchTarget": { "min": { "value": "48px" } }
        },
        "platforms": {
            "android": { "minSdk": { "value": "24" } },
            "qnx": { "displayName": { "value": "Driver's cluster" } }
        }
    }));
    let categories = CategoryMap::default();

    let xml = XmlEmitter.render(&tokens, &categories, &ctx());
    let layout = document(&xml, "layout.xml");
    assert!(layout.contains("    <dimen name=\"layout_breakpoint_md\">768dp</dimen>\n"));
    assert!(layout.contains("    <dimen name=\"layout_touch_target_min\">48dp</dimen>\n"));
    let platforms = document(&xml, "platforms.xml");
    assert!(platforms.contains("    <string name=\"platforms_android_min_sdk\">24</string>\n"));
    assert!(platforms
        .contains("    <string name=\"platforms_qnx_display_name\">Driver\\'s cluster</string>\n"));

    let kotlin = KotlinEmitter.render(&tokens, &categories, &ctx());
    assert!(document(&kotlin, "Layout.kt").contains("object LayoutTokens {\n"));
    assert!(document(&kotlin, "Layout.kt").contains("    val layoutBreakpointMd = 768.dp\n"));
    assert!(document(&kotlin, "Platforms.kt").contains("    val platformsAndroidMinSdk = \"24\"\n"));

    let css = CssEmitter.render(&tokens, &categories, &ctx());
    assert!(document(&css, "layout.css").contains("  --layout-breakpoint-md: 768px;\n"));
    assert!(document(&css, "platforms.css").contains("  --platforms-android-min-sdk: 24;\n"));

    for output in [&xml, &kotlin, &css] {
        assert!(output.diagnostics.is_empty(), "{:?}", output.diagnostics);
    }
}
