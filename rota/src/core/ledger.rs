//! History ledger of confirmed draws, newest first.

use std::collections::BTreeMap;

use crate::core::error::RotaError;
use crate::core::types::{HistoryEntry, Player};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HistoryLedger {
    entries: Vec<HistoryEntry>,
}

/// Per-washer duty counts derived from the ledger.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WasherTally {
    /// Recorded duties per actual washer.
    pub duties: BTreeMap<Player, usize>,
    /// Entries where the actual washer was not the drawn primary.
    pub swaps: usize,
}

impl HistoryLedger {
    pub fn from_entries(entries: Vec<HistoryEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Insert at the head.
    pub fn record(&mut self, entry: HistoryEntry) {
        self.entries.insert(0, entry);
    }

    /// Overwrite the actual washer at `index`, returning the previous one.
    pub fn set_washer(&mut self, index: usize, washer: &str) -> Result<Player, RotaError> {
        self.check_index(index)?;
        let entry = &mut self.entries[index];
        Ok(std::mem::replace(&mut entry.actual_washer, washer.to_string()))
    }

    pub fn delete(&mut self, index: usize) -> Result<HistoryEntry, RotaError> {
        self.check_index(index)?;
        Ok(self.entries.remove(index))
    }

    pub fn tally(&self) -> WasherTally {
        let mut tally = WasherTally::default();
        for entry in &self.entries {
            *tally.duties.entry(entry.actual_washer.clone()).or_default() += 1;
            if entry.is_swap() {
                tally.swaps += 1;
            }
        }
        tally
    }

    fn check_index(&self, index: usize) -> Result<(), RotaError> {
        if index >= self.entries.len() {
            return Err(RotaError::IndexOutOfRange {
                index,
                len: self.entries.len(),
            });
        }
        Ok(())
    }
}
