//! tokensmith configuration file handling

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokensmith_core::{default_layers, LayerSpec};
use tokensmith_emit::{Category, CategoryMap, Platform};

pub const CONFIG_FILE: &str = "tokensmith.toml";

/// Top-level configuration (tokensmith.toml)
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub tokens: TokensConfig,
    /// Ordered layer list; empty means the built-in list
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub layers: Vec<LayerSpec>,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub kotlin: KotlinConfig,
    /// Extra or overriding root key → category mappings
    #[serde(default)]
    pub categories: BTreeMap<String, Category>,
}

/// Where token documents live and which combinations exist
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct TokensConfig {
    /// Token directory (relative to the project root)
    #[serde(default = "default_tokens_dir")]
    pub dir: String,
    #[serde(default = "default_brands")]
    pub brands: Vec<String>,
    #[serde(default = "default_themes")]
    pub themes: Vec<String>,
    #[serde(default = "default_brand")]
    pub default_brand: String,
    #[serde(default = "default_theme")]
    pub default_theme: String,
}

fn default_tokens_dir() -> String {
    "Tokens/New".to_string()
}

fn default_brands() -> Vec<String> {
    vec![
        "Default".to_string(),
        "Performance".to_string(),
        "Luxury".to_string(),
    ]
}

fn default_themes() -> Vec<String> {
    vec!["Day".to_string(), "Night".to_string()]
}

fn default_brand() -> String {
    "Default".to_string()
}

fn default_theme() -> String {
    "Day".to_string()
}

impl Default for TokensConfig {
    fn default() -> Self {
        Self {
            dir: default_tokens_dir(),
            brands: default_brands(),
            themes: default_themes(),
            default_brand: default_brand(),
            default_theme: default_theme(),
        }
    }
}

/// Output configuration
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct OutputConfig {
    /// Output directory (relative to the project root)
    #[serde(default = "default_output_dir")]
    pub dir: String,
    #[serde(default = "default_platforms")]
    pub platforms: Vec<Platform>,
}

fn default_output_dir() -> String {
    "_TransformedTokens".to_string()
}

fn default_platforms() -> Vec<Platform> {
    Platform::ALL.to_vec()
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
            platforms: default_platforms(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct KotlinConfig {
    /// Base package; each combination gets a `.<slug>` sub-package
    #[serde(default = "default_package")]
    pub package: String,
}

fn default_package() -> String {
    "com.example.hmithemedemo.ui.theme".to_string()
}

impl Default for KotlinConfig {
    fn default() -> Self {
        Self {
            package: default_package(),
        }
    }
}

/// Semantically invalid configuration
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("tokens.{0} must not be empty")]
    Empty(&'static str),

    #[error("tokens.default_{field} `{value}` is not listed in tokens.{field}s")]
    UnknownDefault { field: &'static str, value: String },

    #[error("layer `{0}` is defined more than once")]
    DuplicateLayer(String),

    #[error("output.platforms must name at least one platform")]
    NoPlatforms,

    #[error("kotlin.package `{0}` is not a valid package name")]
    InvalidPackage(String),
}

impl Config {
    /// Load configuration from a directory (looks for tokensmith.toml).
    ///
    /// A missing file is not an error; every section falls back to its defaults.
    pub fn load_from_dir(path: &Path) -> Result<Self> {
        let config_path = if path.is_file() {
            path.to_path_buf()
        } else {
            path.join(CONFIG_FILE)
        };

        if !config_path.exists() {
            tracing::debug!("no {} in {}, using defaults", CONFIG_FILE, path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read {}", config_path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", config_path.display()))?;

        config
            .validate()
            .with_context(|| format!("Invalid configuration in {}", config_path.display()))?;

        Ok(config)
    }

    /// Defaults with the built-in layer list spelled out, as written by `init`
    pub fn scaffold() -> Self {
        Self {
            layers: default_layers(),
            ..Self::default()
        }
    }

    /// Serialize to TOML string
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }

    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        let tokens = &self.tokens;
        if tokens.brands.is_empty() {
            return Err(ConfigError::Empty("brands"));
        }
        if tokens.themes.is_empty() {
            return Err(ConfigError::Empty("themes"));
        }
        if !tokens.brands.contains(&tokens.default_brand) {
            return Err(ConfigError::UnknownDefault {
                field: "brand",
                value: tokens.default_brand.clone(),
            });
        }
        if !tokens.themes.contains(&tokens.default_theme) {
            return Err(ConfigError::UnknownDefault {
                field: "theme",
                value: tokens.default_theme.clone(),
            });
        }

        let mut seen = Vec::with_capacity(self.layers.len());
        for layer in &self.layers {
            if seen.contains(&layer.name.as_str()) {
                return Err(ConfigError::DuplicateLayer(layer.name.clone()));
            }
            seen.push(layer.name.as_str());
        }

        if self.output.platforms.is_empty() {
            return Err(ConfigError::NoPlatforms);
        }

        let package = &self.kotlin.package;
        let valid_package = !package.is_empty()
            && package.split('.').all(|part| {
                part.chars().next().is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
                    && part.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
            });
        if !valid_package {
            return Err(ConfigError::InvalidPackage(package.clone()));
        }

        Ok(())
    }

    /// Layer list in effect
    pub fn layers(&self) -> Vec<LayerSpec> {
        if self.layers.is_empty() {
            default_layers()
        } else {
            self.layers.clone()
        }
    }

    /// Category table with the configured overrides applied
    pub fn category_map(&self) -> CategoryMap {
        CategoryMap::with_overrides(self.categories.iter().map(|(k, v)| (k.as_str(), *v)))
    }
}
