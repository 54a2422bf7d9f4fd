//! Generation pipeline
//!
//! Each combination runs load → merge → resolve → emit on its own; nothing
//! is shared between combinations except the configuration.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tokensmith_core::{
    combinations, resolve_all, Combination, Diagnostics, LayerStack, TokenPath, TokenTree,
};
use tokensmith_emit::{emitter_for, render_provider, EmitContext, Platform, PROVIDER_FILE};
use tracing::{debug, info, warn};

use crate::config::Config;

/// Options for one `generate` or `check` run; `None` falls back to the config.
#[derive(Clone, Debug, Default)]
pub struct RunOptions {
    /// Export every brand × theme combination
    pub modes: bool,
    pub brand: Option<String>,
    pub theme: Option<String>,
    pub out: Option<PathBuf>,
    /// Empty means the configured platforms
    pub platforms: Vec<Platform>,
    /// Remove each combination's output directory before writing
    pub clean: bool,
    /// Render everything but write nothing
    pub dry_run: bool,
}

/// Per-platform result for one combination
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlatformReport {
    pub platform: Platform,
    pub files: usize,
    pub entries: usize,
}

/// Result of one combination
#[derive(Clone, Debug)]
pub struct CombinationReport {
    pub combination: Combination,
    pub layers_loaded: usize,
    pub layers_missing: Vec<String>,
    pub tokens: usize,
    /// Tokens left out because they, or something they reference, failed
    pub skipped: Vec<TokenPath>,
    pub platforms: Vec<PlatformReport>,
    /// Output directory per platform (not created in a dry run)
    pub outputs: Vec<PathBuf>,
}

/// Result of a whole run
#[derive(Clone, Debug, Default)]
pub struct RunReport {
    pub combinations: Vec<CombinationReport>,
    /// Provider file, once written
    pub provider: Option<PathBuf>,
    pub diagnostics: Diagnostics,
    pub dry_run: bool,
}

impl RunReport {
    pub fn files_written(&self) -> usize {
        let files: usize = self
            .combinations
            .iter()
            .flat_map(|c| c.platforms.iter())
            .map(|p| p.files)
            .sum();
        files + usize::from(self.provider.is_some())
    }
}

/// Combinations selected by the options.
///
/// Without `modes`, only the (default or requested) brand and theme. With
/// `modes`, every configured pair, narrowed by `--brand` / `--theme`.
pub fn select_combinations(config: &Config, options: &RunOptions) -> Vec<Combination> {
    let tokens = &config.tokens;
    if !options.modes {
        return vec![Combination::new(
            options.brand.clone().unwrap_or_else(|| tokens.default_brand.clone()),
            options.theme.clone().unwrap_or_else(|| tokens.default_theme.clone()),
        )];
    }

    let narrow = |all: &[String], pick: &Option<String>| -> Vec<String> {
        match pick {
            Some(name) => vec![name.clone()],
            None => all.to_vec(),
        }
    };
    combinations(
        &narrow(&tokens.brands, &options.brand),
        &narrow(&tokens.themes, &options.theme),
    )
}

/// Run the pipeline rooted at `root`.
///
/// Per-token problems end up in [`RunReport::diagnostics`]; only structural
/// failures (unreadable or malformed documents, write errors) return `Err`.
pub fn run(root: &Path, config: &Config, options: &RunOptions) -> Result<RunReport> {
    let tokens_dir = root.join(&config.tokens.dir);
    let out_dir = options
        .out
        .clone()
        .unwrap_or_else(|| root.join(&config.output.dir));
    let platforms = if options.platforms.is_empty() {
        config.output.platforms.clone()
    } else {
        options.platforms.clone()
    };
    let layers = config.layers();
    let categories = config.category_map();
    let selected = select_combinations(config, options);

    let mut report = RunReport {
        dry_run: options.dry_run,
        ..RunReport::default()
    };

    for combination in &selected {
        info!("Processing {}", combination);
        let slug = combination.slug();

        let stack = LayerStack::load(&tokens_dir, &layers, combination)
            .with_context(|| format!("Failed to load layers for {combination}"))?;
        let layers_missing: Vec<String> = stack.missing().map(|l| l.name.clone()).collect();
        info!(
            "  loaded {} of {} layers{}",
            stack.loaded_count(),
            stack.layers.len(),
            if layers_missing.is_empty() {
                String::new()
            } else {
                format!(" (missing: {})", layers_missing.join(", "))
            }
        );

        let tree = TokenTree::from_document(&stack.merge());
        let mut resolution = resolve_all(&tree);
        debug!(
            "  resolved {} of {} tokens",
            resolution.tokens.len(),
            tree.len()
        );
        let skipped = std::mem::take(&mut resolution.skipped);
        if !skipped.is_empty() {
            warn!("  {} token(s) skipped", skipped.len());
        }
        resolution.diagnostics.tag_combination(&slug);
        report.diagnostics.extend(resolution.diagnostics);

        let ctx = EmitContext::new(combination.clone(), config.kotlin.package.clone());
        let mut platform_reports = Vec::with_capacity(platforms.len());
        let mut outputs = Vec::with_capacity(platforms.len());

        for &platform in &platforms {
            let mut output = emitter_for(platform).render(&resolution.tokens, &categories, &ctx);
            output.diagnostics.tag_combination(&slug);

            let dir = out_dir.join(platform.as_str()).join(&slug);
            if !options.dry_run {
                if options.clean && dir.exists() {
                    debug!("  removing {}", dir.display());
                    fs::remove_dir_all(&dir)
                        .with_context(|| format!("Failed to clean {}", dir.display()))?;
                }
                fs::create_dir_all(&dir)
                    .with_context(|| format!("Failed to create {}", dir.display()))?;
                for document in &output.documents {
                    let file = dir.join(&document.file_name);
                    fs::write(&file, &document.content)
                        .with_context(|| format!("Failed to write {}", file.display()))?;
                }
            }

            for document in &output.documents {
                debug!(
                    "  {}/{}: {} entries",
                    platform,
                    document.file_name,
                    document.entry_count()
                );
            }
            info!(
                "  {}: {} entries in {} files",
                platform,
                output.entry_count(),
                output.documents.len()
            );

            platform_reports.push(PlatformReport {
                platform,
                files: output.documents.len(),
                entries: output.entry_count(),
            });
            outputs.push(dir);
            report.diagnostics.extend(output.diagnostics);
        }

        report.combinations.push(CombinationReport {
            combination: combination.clone(),
            layers_loaded: stack.loaded_count(),
            layers_missing,
            tokens: resolution.tokens.len(),
            skipped,
            platforms: platform_reports,
            outputs,
        });
    }

    if options.modes && platforms.contains(&Platform::Kotlin) {
        let fallback = selected
            .iter()
            .find(|c| {
                c.brand == config.tokens.default_brand && c.theme == config.tokens.default_theme
            })
            .or_else(|| selected.first());
        match fallback {
            Some(_) if options.dry_run => debug!("dry run; {} not written", PROVIDER_FILE),
            Some(fallback) => {
                let file = out_dir.join(Platform::Kotlin.as_str()).join(PROVIDER_FILE);
                let content = render_provider(&config.kotlin.package, &selected, fallback);
                fs::write(&file, content)
                    .with_context(|| format!("Failed to write {}", file.display()))?;
                info!("Wrote {}", file.display());
                report.provider = Some(file);
            }
            None => warn!("no combinations selected; {} not written", PROVIDER_FILE),
        }
    }

    Ok(report)
}
