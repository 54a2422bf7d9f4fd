//! Layer definitions and loading
//!
//! A generation run reads the same ordered list of layers for every
//! (brand, theme) combination; only the files picked by `{brand}` and
//! `{theme}` placeholders differ. A layer whose file is absent contributes
//! nothing.

use std::fmt::{Display, Formatter};
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::error::{LoadError, Result};
use crate::merge::merge_layers;

/// One entry of the ordered layer list
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct LayerSpec {
    /// Display name (`base`, `brand`, `theme`, ...)
    pub name: String,
    /// File path relative to the tokens directory; may contain `{brand}` and `{theme}`
    pub path: String,
}

impl LayerSpec {
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }

    /// Substitute the combination into the path pattern.
    pub fn path_for(&self, combination: &Combination) -> Result<String> {
        let mut out = String::with_capacity(self.path.len() + 16);
        let mut rest = self.path.as_str();

        while let Some(open) = rest.find('{') {
            out.push_str(&rest[..open]);
            let after = &rest[open + 1..];
            let Some(close) = after.find('}') else {
                return Err(LoadError::Pattern {
                    layer: self.name.clone(),
                    msg: format!("unclosed `{{` in `{}`", self.path),
                });
            };
            match &after[..close] {
                "brand" => out.push_str(&combination.brand),
                "theme" => out.push_str(&combination.theme),
                other => {
                    return Err(LoadError::Pattern {
                        layer: self.name.clone(),
                        msg: format!("unknown placeholder `{{{other}}}` (expected brand or theme)"),
                    })
                }
            }
            rest = &after[close + 1..];
        }
        out.push_str(rest);
        Ok(out)
    }
}

/// The layer list used when no configuration overrides it.
///
/// Primitives first, then brand and theme overrides, then the shared
/// motion, interaction, and component documents.
pub fn default_layers() -> Vec<LayerSpec> {
    vec![
        LayerSpec::new("base", "_Base/Value.json"),
        LayerSpec::new("brand", "01_Brand/{brand}.json"),
        LayerSpec::new("theme", "03_Themes/{theme}.json"),
        LayerSpec::new("motion", "04_Motion/Animations.json"),
        LayerSpec::new("interactions", "05_Interactions/States.json"),
        LayerSpec::new("components", "07_Components/Compositions.json"),
    ]
}

/// A (brand, theme) pair selecting which override layers apply
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Combination {
    pub brand: String,
    pub theme: String,
}

impl Combination {
    pub fn new(brand: impl Into<String>, theme: impl Into<String>) -> Self {
        Self {
            brand: brand.into(),
            theme: theme.into(),
        }
    }

    /// Stable id used for output directories and package names, e.g. `default_day`.
    pub fn slug(&self) -> String {
        format!(
            "{}_{}",
            slug_part(&self.brand),
            slug_part(&self.theme)
        )
    }
}

fn slug_part(s: &str) -> String {
    s.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect()
}

impl Display for Combination {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Brand={}, Theme={}", self.brand, self.theme)
    }
}

/// Every brand × theme pair, brand-major.
pub fn combinations(brands: &[String], themes: &[String]) -> Vec<Combination> {
    brands
        .iter()
        .flat_map(|b| themes.iter().map(move |t| Combination::new(b.clone(), t.clone())))
        .collect()
}

/// A layer after loading
#[derive(Clone, Debug)]
pub struct LoadedLayer {
    pub name: String,
    pub file: PathBuf,
    /// `None` when the file does not exist
    pub document: Option<Value>,
}

/// All layers for one combination, in order
#[derive(Clone, Debug)]
pub struct LayerStack {
    pub combination: Combination,
    pub layers: Vec<LoadedLayer>,
}

impl LayerStack {
    /// Read every layer of `specs` for `combination` from `tokens_dir`.
    pub fn load(tokens_dir: &Path, specs: &[LayerSpec], combination: &Combination) -> Result<Self> {
        if !tokens_dir.is_dir() {
            return Err(LoadError::MissingRoot(tokens_dir.to_path_buf()));
        }

        let mut layers = Vec::with_capacity(specs.len());
        for spec in specs {
            let file = tokens_dir.join(spec.path_for(combination)?);
            let document = if file.is_file() {
                debug!("loading layer `{}` from {}", spec.name, file.display());
                Some(read_document(&file)?)
            } else {
                warn!("layer `{}` not found at {} (treated as empty)", spec.name, file.display());
                None
            };
            layers.push(LoadedLayer {
                name: spec.name.clone(),
                file,
                document,
            });
        }

        Ok(Self {
            combination: combination.clone(),
            layers,
        })
    }

    /// Number of layers whose file was present.
    pub fn loaded_count(&self) -> usize {
        self.layers.iter().filter(|l| l.document.is_some()).count()
    }

    pub fn missing(&self) -> impl Iterator<Item = &LoadedLayer> {
        self.layers.iter().filter(|l| l.document.is_none())
    }

    /// Merge all present documents in layer order.
    pub fn merge(&self) -> Value {
        let empty = Value::Object(Map::new());
        merge_layers(
            self.layers
                .iter()
                .map(|l| l.document.as_ref().unwrap_or(&empty)),
        )
    }
}

/// Read and parse one JSON document; the root must be an object.
pub fn read_document(path: &Path) -> Result<Value> {
    let content = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let value: Value = serde_json::from_str(&content).map_err(|source| LoadError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    if !value.is_object() {
        return Err(LoadError::NotAnObject(path.to_path_buf()));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_pattern_substitution() {
        let spec = LayerSpec::new("brand", "01_Brand/{brand}-{theme}.json");
        let combo = Combination::new("Luxury", "Night");
        assert_eq!(spec.path_for(&combo).unwrap(), "01_Brand/Luxury-Night.json");
    }

    #[test]
    fn unknown_placeholder_is_rejected() {
        let spec = LayerSpec::new("density", "02_Density/{density}.json");
        let err = spec.path_for(&Combination::new("Default", "Day")).unwrap_err();
        assert!(matches!(err, LoadError::Pattern { .. }));
    }

    #[test]
    fn slug_is_lowercase() {
        assert_eq!(Combination::new("Performance", "Night").slug(), "performance_night");
        assert_eq!(Combination::new("Dark Mode", "Day").slug(), "dark_mode_day");
    }

    #[test]
    fn combinations_are_brand_major() {
        let brands = vec!["Default".to_string(), "Luxury".to_string()];
        let themes = vec!["Day".to_string(), "Night".to_string()];
        let slugs: Vec<String> = combinations(&brands, &themes)
            .iter()
            .map(Combination::slug)
            .collect();
        assert_eq!(
            slugs,
            vec!["default_day", "default_night", "luxury_day", "luxury_night"]
        );
    }
}
