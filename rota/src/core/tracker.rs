//! Fairness cycle tracker.
//!
//! `washed` is global across squad configurations; draws only look at its
//! intersection with the squad they draw from.

use std::collections::BTreeSet;

use crate::core::types::Player;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FairnessTracker {
    washed: BTreeSet<Player>,
    /// Backups of the most recent confirmed draw: empty or a pair.
    last_backups: Vec<Player>,
}

impl FairnessTracker {
    pub fn from_parts(washed: BTreeSet<Player>, last_backups: Vec<Player>) -> Self {
        Self {
            washed,
            last_backups,
        }
    }

    pub fn washed(&self) -> &BTreeSet<Player> {
        &self.washed
    }

    pub fn last_backups(&self) -> &[Player] {
        &self.last_backups
    }

    pub fn has_washed(&self, name: &str) -> bool {
        self.washed.contains(name)
    }

    /// Credit a duty. Returns false if `name` was already credited.
    pub fn credit(&mut self, name: &str) -> bool {
        self.washed.insert(name.to_string())
    }

    /// Drop `name` from the washed set (roster deletion cascade).
    pub fn forget(&mut self, name: &str) -> bool {
        self.washed.remove(name)
    }

    pub fn set_last_backups(&mut self, backups: &[Player]) {
        self.last_backups = backups.to_vec();
    }

    /// Squad members still waiting for their turn this cycle.
    pub fn eligible_in(&self, squad: &BTreeSet<Player>) -> Vec<Player> {
        squad
            .iter()
            .filter(|name| !self.washed.contains(*name))
            .cloned()
            .collect()
    }

    /// Start a new cycle for `squad` only. Players outside the squad keep
    /// their status. Returns how many credits were cleared.
    pub fn reset_for(&mut self, squad: &BTreeSet<Player>) -> usize {
        let before = self.washed.len();
        self.washed.retain(|name| !squad.contains(name));
        before - self.washed.len()
    }
}
