//! Bulk export/import of the persisted collections as one JSON document.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use jsonschema::validator_for;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::ledger::HistoryLedger;
use crate::core::roster::Roster;
use crate::core::state::RotaState;
use crate::core::tracker::FairnessTracker;
use crate::core::types::{HistoryEntry, Player};

const EXCHANGE_SCHEMA: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../schemas/exchange/v1.schema.json"
));

/// Exchange document. Every collection is optional on import.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ExchangeDocument {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team: Option<String>,
    pub players: Vec<Player>,
    pub already_washed: Vec<Player>,
    pub history: Vec<HistoryEntry>,
    pub last_subs: Vec<Player>,
    pub selected_kader: Vec<Player>,
}

impl ExchangeDocument {
    pub fn from_state(state: &RotaState, team: Option<&str>) -> Self {
        Self {
            team: team.map(str::to_string),
            players: state.roster().players().to_vec(),
            already_washed: state.tracker().washed().iter().cloned().collect(),
            history: state.history().entries().to_vec(),
            last_subs: state.tracker().last_backups().to_vec(),
            selected_kader: state.roster().squad().iter().cloned().collect(),
        }
    }

    /// Split into the components an import replaces wholesale.
    pub fn into_parts(self) -> (Roster, FairnessTracker, HistoryLedger) {
        (
            Roster::from_parts(self.players, self.selected_kader.into_iter().collect()),
            FairnessTracker::from_parts(self.already_washed.into_iter().collect(), self.last_subs),
            HistoryLedger::from_entries(self.history),
        )
    }
}

/// Parse an exchange document, validating it against the v1 schema first.
pub fn parse_document(raw: &str) -> Result<ExchangeDocument> {
    let value: Value = serde_json::from_str(raw).context("parse exchange json")?;
    validate_schema(&value)?;
    serde_json::from_value(value).context("deserialize exchange document")
}

pub fn read_document(path: &Path) -> Result<ExchangeDocument> {
    let raw = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    parse_document(&raw).with_context(|| format!("import {}", path.display()))
}

/// Serialize `doc` to pretty-printed JSON with trailing newline.
pub fn write_document(path: &Path, doc: &ExchangeDocument) -> Result<()> {
    let mut payload = serde_json::to_string_pretty(doc).context("serialize exchange document")?;
    payload.push('\n');
    fs::write(path, payload).with_context(|| format!("write {}", path.display()))
}

fn validate_schema(instance: &Value) -> Result<()> {
    let schema: Value = serde_json::from_str(EXCHANGE_SCHEMA).context("parse exchange schema")?;
    let compiled = validator_for(&schema).map_err(|err| anyhow!("invalid schema: {}", err))?;
    if !compiled.is_valid(instance) {
        let messages = compiled
            .iter_errors(instance)
            .map(|err| err.to_string())
            .collect::<Vec<_>>();
        return Err(anyhow!(
            "exchange document validation failed: {}",
            messages.join("; ")
        ));
    }
    Ok(())
}
