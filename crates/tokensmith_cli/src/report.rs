//! End-of-run summary
//!
//! Printed to stdout, separately from the log stream, so it can be read (or
//! diffed) on its own.

use std::collections::BTreeMap;
use std::fmt::Write;

use tokensmith_emit::Platform;

use crate::pipeline::RunReport;

/// Render the summary for `report`.
pub fn render_summary(report: &RunReport) -> String {
    let mut out = String::new();
    let verb = if report.dry_run { "Checked" } else { "Generated" };
    let _ = writeln!(
        out,
        "{verb} {} combination(s)",
        report.combinations.len()
    );

    for combo in &report.combinations {
        let platforms: Vec<String> = combo
            .platforms
            .iter()
            .map(|p| format!("{} {}", p.platform, p.entries))
            .collect();
        let _ = write!(
            out,
            "  {}: {} tokens, {}/{} layers",
            combo.combination.slug(),
            combo.tokens,
            combo.layers_loaded,
            combo.layers_loaded + combo.layers_missing.len()
        );
        if !platforms.is_empty() {
            let _ = write!(out, " | {}", platforms.join(", "));
        }
        out.push('\n');
        if !combo.skipped.is_empty() {
            let skipped: Vec<String> = combo.skipped.iter().map(ToString::to_string).collect();
            let _ = writeln!(
                out,
                "    skipped {}: {}",
                combo.skipped.len(),
                skipped.join(", ")
            );
        }
    }

    let mut totals: BTreeMap<Platform, (usize, usize)> = BTreeMap::new();
    for platform in report.combinations.iter().flat_map(|c| c.platforms.iter()) {
        let total = totals.entry(platform.platform).or_default();
        total.0 += platform.entries;
        total.1 += platform.files;
    }
    if !totals.is_empty() {
        let _ = writeln!(out, "Totals:");
        for (platform, (entries, files)) in &totals {
            let _ = writeln!(out, "  {platform}: {entries} entries in {files} files");
        }
    }
    if let Some(provider) = &report.provider {
        let _ = writeln!(out, "Provider: {}", provider.display());
    }

    if report.diagnostics.is_empty() {
        let _ = writeln!(out, "No diagnostics");
        return out;
    }

    // combination → kind → count
    let mut grouped: BTreeMap<&str, BTreeMap<&'static str, usize>> = BTreeMap::new();
    for diag in report.diagnostics.iter() {
        let combo = diag.combination.as_deref().unwrap_or("-");
        *grouped.entry(combo).or_default().entry(diag.kind()).or_insert(0) += 1;
    }

    let _ = writeln!(out, "Diagnostics: {}", report.diagnostics.len());
    for (combo, kinds) in &grouped {
        let counts: Vec<String> = kinds.iter().map(|(k, n)| format!("{k} {n}")).collect();
        let _ = writeln!(out, "  {combo}: {}", counts.join(", "));
    }
    for diag in report.diagnostics.iter() {
        let _ = writeln!(out, "  {diag}");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::{CombinationReport, PlatformReport};
    use pretty_assertions::assert_eq;
    use tokensmith_core::{Combination, Diagnostic, TokenError, TokenPath};

    fn report() -> RunReport {
        RunReport {
            combinations: vec![CombinationReport {
                combination: Combination::new("Default", "Day"),
                layers_loaded: 5,
                layers_missing: vec!["components".to_string()],
                tokens: 12,
                skipped: Vec::new(),
                platforms: vec![
                    PlatformReport { platform: Platform::Kotlin, files: 9, entries: 11 },
                    PlatformReport { platform: Platform::Css, files: 10, entries: 12 },
                ],
                outputs: Vec::new(),
            }],
            ..RunReport::default()
        }
    }

    #[test]
    fn clean_summary() {
        assert_eq!(
            render_summary(&report()),
            "Generated 1 combination(s)\n\
             \x20 default_day: 12 tokens, 5/6 layers | kotlin 11, css 12\n\
             Totals:\n\
             \x20 kotlin: 11 entries in 9 files\n\
             \x20 css: 12 entries in 10 files\n\
             No diagnostics\n"
        );
    }

    #[test]
    fn diagnostics_grouped_by_combination_and_kind() {
        let mut report = report();
        let chain = vec![
            TokenPath::parse("x").unwrap(),
            TokenPath::parse("y").unwrap(),
            TokenPath::parse("x").unwrap(),
        ];
        report.diagnostics.push(
            Diagnostic::new(TokenError::Cycle { chain }).with_combination("default_day"),
        );
        let summary = render_summary(&report);
        assert!(summary.contains("Diagnostics: 1\n  default_day: cycle 1\n"));
        assert!(summary.contains("  [default_day] cycle: alias cycle: x -> y -> x\n"));
    }

    #[test]
    fn skipped_tokens_are_listed_per_combination() {
        let mut report = report();
        report.combinations[0].skipped = vec![
            TokenPath::parse("color.a").unwrap(),
            TokenPath::parse("color.b").unwrap(),
        ];
        assert!(render_summary(&report)
            .contains("| kotlin 11, css 12\n    skipped 2: color.a, color.b\nTotals:\n"));
    }
}
