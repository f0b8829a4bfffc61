//! Roster store: every known player plus the active squad (kader).

use std::collections::BTreeSet;

use crate::core::types::Player;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Roster {
    /// Insertion-ordered, unique.
    players: Vec<Player>,
    /// Subset of `players`.
    squad: BTreeSet<Player>,
}

impl Roster {
    /// Build a roster from persisted collections as-is.
    ///
    /// No filtering happens here; stale squad entries are dropped by
    /// [`Roster::active_eligible_squad`] instead.
    pub fn from_parts(players: Vec<Player>, squad: BTreeSet<Player>) -> Self {
        Self { players, squad }
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn squad(&self) -> &BTreeSet<Player> {
        &self.squad
    }

    pub fn contains(&self, name: &str) -> bool {
        self.players.iter().any(|player| player == name)
    }

    /// Trim, drop empties, skip names already known, append in first-seen
    /// order. Returns the names that were added.
    pub fn import_names<I, S>(&mut self, raw_lines: I) -> Vec<Player>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut added = Vec::new();
        for line in raw_lines {
            let name = line.as_ref().trim();
            if name.is_empty() || self.contains(name) {
                continue;
            }
            self.players.push(name.to_string());
            added.push(name.to_string());
        }
        added
    }

    /// Remove `name` from the roster and the squad. Returns false if it was
    /// not a member.
    ///
    /// The caller is responsible for cascading the removal to the fairness
    /// tracker.
    pub fn remove_player(&mut self, name: &str) -> bool {
        let before = self.players.len();
        self.players.retain(|player| player != name);
        self.squad.remove(name);
        self.players.len() != before
    }

    /// Add or remove `name` from the squad. Unknown names are ignored.
    /// Returns true if membership changed.
    pub fn set_squad_membership(&mut self, name: &str, included: bool) -> bool {
        if !self.contains(name) {
            return false;
        }
        if included {
            self.squad.insert(name.to_string())
        } else {
            self.squad.remove(name)
        }
    }

    /// Squad members that are still on the roster.
    pub fn active_eligible_squad(&self) -> BTreeSet<Player> {
        self.squad
            .iter()
            .filter(|name| self.contains(name))
            .cloned()
            .collect()
    }
}
