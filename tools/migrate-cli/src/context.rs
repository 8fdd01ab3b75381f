//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};

use crate::config::CliConfig;
use crate::output::Output;

/// Config file names searched for, in order.
pub const CONFIG_NAMES: [&str; 3] = ["migrate.toml", ".migrate.toml", "migrate.json"];

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration. Relative file paths in it are already anchored at
    /// the config file's directory.
    pub config: CliConfig,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
    /// File the config was read from, if any.
    pub config_path: Option<PathBuf>,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;
        Self::load_in(cwd, config_path, output)
    }

    /// Load context as if run from `cwd`.
    pub fn load_in(cwd: PathBuf, config_path: Option<&str>, output: Output) -> Result<Self> {
        let config_path = match config_path {
            Some(path) => Some(resolve_against(&cwd, Path::new(path))),
            None => find_config(&cwd),
        };

        let config = match &config_path {
            Some(path) => {
                let mut config = CliConfig::load(&path.to_string_lossy())?;
                if let Some(dir) = path.parent() {
                    config.rebase_paths(dir);
                }
                tracing::debug!(path = %path.display(), "Loaded config");
                config
            }
            None => CliConfig::default(),
        };

        Ok(Self {
            config,
            output,
            cwd,
            config_path,
        })
    }

    /// Resolve a path relative to the working directory.
    pub fn resolve_path(&self, path: &Path) -> PathBuf {
        resolve_against(&self.cwd, path)
    }
}

fn resolve_against(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

/// Find a config file in `start` or its ancestors.
pub fn find_config(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();
    loop {
        for name in &CONFIG_NAMES {
            let candidate = current.join(name);
            if candidate.is_file() {
                return Some(candidate);
            }
        }

        if !current.pop() {
            return None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{SourceSpec, TargetSpec};

    #[test]
    fn test_find_config_in_parent() {
        let root = tempfile::tempdir().unwrap();
        let nested = root.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(root.path().join(".migrate.toml"), "").unwrap();

        assert_eq!(find_config(&nested), Some(root.path().join(".migrate.toml")));
    }

    #[test]
    fn test_find_config_prefers_first_name() {
        let root = tempfile::tempdir().unwrap();
        std::fs::write(root.path().join("migrate.json"), "{}").unwrap();
        std::fs::write(root.path().join("migrate.toml"), "").unwrap();

        assert_eq!(find_config(root.path()), Some(root.path().join("migrate.toml")));
    }

    #[test]
    fn test_paths_from_parent_config_resolve_against_its_directory() {
        let root = tempfile::tempdir().unwrap();
        let nested = root.path().join("sub");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(
            root.path().join("migrate.toml"),
            "[source]\ninput = \"records.json\"\n\n[target]\noutput = \"out/products.json\"\n",
        )
        .unwrap();

        let ctx = Context::load_in(nested.clone(), None, Output::new(true)).unwrap();

        assert_eq!(ctx.config_path, Some(root.path().join("migrate.toml")));
        assert_eq!(
            ctx.config.source_spec().unwrap(),
            SourceSpec::File(root.path().join("records.json"))
        );
        assert_eq!(
            ctx.config.target_spec().unwrap(),
            TargetSpec::File(root.path().join("out/products.json"))
        );
        // Flag paths stay relative to the working directory.
        assert_eq!(ctx.resolve_path(Path::new("x.json")), nested.join("x.json"));
    }
}
