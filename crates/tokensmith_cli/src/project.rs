//! Project scaffolding

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

use crate::config::{Config, CONFIG_FILE};

/// Write a default tokensmith.toml into `root`.
///
/// Refuses to overwrite an existing file unless `force` is set.
pub fn init_project(root: &Path, force: bool) -> Result<PathBuf> {
    let config_path = root.join(CONFIG_FILE);
    if config_path.exists() && !force {
        bail!(
            "{} already exists. Pass --force to overwrite it.",
            config_path.display()
        );
    }

    fs::create_dir_all(root)
        .with_context(|| format!("Failed to create {}", root.display()))?;

    let config = Config::scaffold();
    let content = format!(
        "# tokensmith configuration\n#\n# Paths are relative to this file. Remove [[layers]] to use the built-in list.\n\n{}",
        config.to_toml()?
    );
    fs::write(&config_path, content)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;

    Ok(config_path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_loadable_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = init_project(dir.path(), false).unwrap();
        assert!(path.ends_with(CONFIG_FILE));
        assert_eq!(Config::load_from_dir(dir.path()).unwrap(), Config::scaffold());
    }

    #[test]
    fn refuses_to_overwrite_without_force() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILE), "[tokens]\n").unwrap();
        assert!(init_project(dir.path(), false).is_err());
        assert!(init_project(dir.path(), true).is_ok());
    }
}
