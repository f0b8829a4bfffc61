//! Canonical `.rota/` layout and scaffolding.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use tracing::info;

use super::config::{RotaConfig, write_config};
use super::store::write_atomic;

const ROTA_GITIGNORE: &str = "state/*.tmp\n";

/// All canonical paths within `.rota/` for a project root.
#[derive(Debug, Clone)]
pub struct RotaPaths {
    pub root: PathBuf,
    pub rota_dir: PathBuf,
    pub state_dir: PathBuf,
    pub config_path: PathBuf,
    pub gitignore_path: PathBuf,
}

impl RotaPaths {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let rota_dir = root.join(".rota");
        Self {
            root: root.clone(),
            state_dir: rota_dir.join("state"),
            config_path: rota_dir.join("config.toml"),
            gitignore_path: rota_dir.join(".gitignore"),
            rota_dir,
        }
    }
}

/// Options for `init_rota`.
#[derive(Debug, Clone)]
pub struct InitOptions {
    /// If true, overwrite the existing config.
    pub force: bool,
}

/// Create `.rota/` scaffolding in `root`.
///
/// Fails if `.rota/` already exists unless `options.force` is set. State
/// slots are never touched; a forced init only rewrites config files.
pub fn init_rota(root: &Path, options: &InitOptions) -> Result<RotaPaths> {
    let paths = RotaPaths::new(root);
    if paths.rota_dir.exists() && !options.force {
        return Err(anyhow!("rota init: .rota already exists (use --force to overwrite)"));
    }
    if paths.rota_dir.exists() && !paths.rota_dir.is_dir() {
        return Err(anyhow!("rota init: .rota exists but is not a directory"));
    }

    fs::create_dir_all(&paths.state_dir)
        .with_context(|| format!("create directory {}", paths.state_dir.display()))?;
    write_atomic(&paths.gitignore_path, ROTA_GITIGNORE)?;
    write_config(&paths.config_path, &RotaConfig::default())?;
    info!(root = %paths.root.display(), "initialized .rota");

    Ok(paths)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::config::load_config;

    #[test]
    fn init_creates_layout() {
        let temp = tempfile::tempdir().expect("tempdir");
        let paths = init_rota(temp.path(), &InitOptions { force: false }).expect("init");
        assert!(paths.state_dir.is_dir());
        assert_eq!(load_config(&paths.config_path).expect("config"), RotaConfig::default());
    }

    #[test]
    fn init_refuses_to_overwrite_without_force() {
        let temp = tempfile::tempdir().expect("tempdir");
        init_rota(temp.path(), &InitOptions { force: false }).expect("init");
        assert!(init_rota(temp.path(), &InitOptions { force: false }).is_err());
        init_rota(temp.path(), &InitOptions { force: true }).expect("forced init");
    }

    #[test]
    fn forced_init_keeps_state_slots() {
        let temp = tempfile::tempdir().expect("tempdir");
        let paths = init_rota(temp.path(), &InitOptions { force: false }).expect("init");
        let slot = paths.state_dir.join("players.json");
        fs::write(&slot, "[\"Ana\"]").expect("write slot");
        init_rota(temp.path(), &InitOptions { force: true }).expect("forced init");
        assert_eq!(fs::read_to_string(&slot).expect("read"), "[\"Ana\"]");
    }
}
