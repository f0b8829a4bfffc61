//! Shared deterministic types for the rotation core.
//!
//! These types are the stable contracts between the roster, the rotation
//! engine, reconciliation and the history ledger. Their serialized form is
//! also the persisted slot format, so field names must not change.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// A player is identified by name; there is no separate id.
pub type Player = String;

/// Minimum squad size for a draw (one primary plus two backups).
pub const MIN_SQUAD_SIZE: usize = 3;

/// A draw awaiting real-world reconciliation.
///
/// `primary` and `backups` are fixed at draw time and never recomputed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingDraw {
    /// Calendar day the draw was made on.
    pub date: String,
    /// Active squad at draw time.
    pub squad_snapshot: BTreeSet<Player>,
    pub primary: Player,
    /// Ordered pair of backups, distinct from `primary` and each other.
    pub backups: [Player; 2],
}

impl PendingDraw {
    /// Players offered as "who actually washed": primary, backups, then the
    /// rest of the snapshot in sorted order.
    pub fn candidates(&self) -> Vec<Player> {
        let mut out = Vec::with_capacity(self.squad_snapshot.len() + 3);
        out.push(self.primary.clone());
        for backup in &self.backups {
            if !out.contains(backup) {
                out.push(backup.clone());
            }
        }
        for player in &self.squad_snapshot {
            if !out.contains(player) {
                out.push(player.clone());
            }
        }
        out
    }
}

/// A confirmed draw and who really did the washing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub date: String,
    pub squad_snapshot: BTreeSet<Player>,
    pub drawn_primary: Player,
    pub drawn_backups: [Player; 2],
    /// May differ from `drawn_primary`.
    pub actual_washer: Player,
}

impl HistoryEntry {
    pub fn from_pending(pending: PendingDraw, actual_washer: Player) -> Self {
        Self {
            date: pending.date,
            squad_snapshot: pending.squad_snapshot,
            drawn_primary: pending.primary,
            drawn_backups: pending.backups,
            actual_washer,
        }
    }

    /// True when someone other than the drawn primary did the duty.
    pub fn is_swap(&self) -> bool {
        self.actual_washer != self.drawn_primary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pending() -> PendingDraw {
        PendingDraw {
            date: "2024-03-01".to_string(),
            squad_snapshot: ["Ana", "Ben", "Cem", "Dora", "Eli"]
                .into_iter()
                .map(String::from)
                .collect(),
            primary: "Dora".to_string(),
            backups: ["Eli".to_string(), "Ana".to_string()],
        }
    }

    #[test]
    fn candidates_list_drawn_players_first() {
        let names = pending().candidates();
        assert_eq!(names, vec!["Dora", "Eli", "Ana", "Ben", "Cem"]);
    }

    #[test]
    fn pending_serializes_with_camel_case_fields() {
        let json = serde_json::to_value(pending()).expect("serialize");
        assert_eq!(json["squadSnapshot"][0], "Ana");
        assert_eq!(json["backups"][1], "Ana");
    }

    #[test]
    fn history_entry_tracks_swaps() {
        let entry = HistoryEntry::from_pending(pending(), "Ben".to_string());
        assert_eq!(entry.drawn_primary, "Dora");
        assert!(entry.is_swap());
    }
}
