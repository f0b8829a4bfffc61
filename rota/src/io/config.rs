//! Rota configuration stored under `.rota/config.toml`.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};

use super::store::write_atomic;

/// Rota configuration (TOML).
///
/// Intended to be edited by humans. Missing fields default to sensible
/// values.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RotaConfig {
    /// Shown in status output and written into exports.
    pub team_name: String,

    /// chrono strftime format for the draw date.
    pub date_format: String,
}

impl Default for RotaConfig {
    fn default() -> Self {
        Self {
            team_name: "Team".to_string(),
            date_format: "%Y-%m-%d".to_string(),
        }
    }
}

impl RotaConfig {
    pub fn validate(&self) -> Result<()> {
        if self.team_name.trim().is_empty() {
            return Err(anyhow!("team_name must not be empty"));
        }
        if self.date_format.trim().is_empty() {
            return Err(anyhow!("date_format must not be empty"));
        }
        if StrftimeItems::new(&self.date_format).any(|item| matches!(item, Item::Error)) {
            return Err(anyhow!("date_format '{}' is not a valid strftime format", self.date_format));
        }
        Ok(())
    }
}

/// Load config from a TOML file.
///
/// If the file is missing, returns `RotaConfig::default()`.
pub fn load_config(path: &Path) -> Result<RotaConfig> {
    if !path.exists() {
        let cfg = RotaConfig::default();
        cfg.validate()?;
        return Ok(cfg);
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: RotaConfig =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    cfg.validate()?;
    Ok(cfg)
}

/// Atomically write config to disk (temp file + rename).
pub fn write_config(path: &Path, cfg: &RotaConfig) -> Result<()> {
    cfg.validate()?;
    let mut buf = toml::to_string_pretty(cfg).context("serialize config toml")?;
    buf.push('\n');
    write_atomic(path, &buf)
}
