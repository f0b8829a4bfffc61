//! The single in-memory state container.
//!
//! All roster, tracker, pending and history mutations go through
//! [`RotaState`] so that cross-component cascades (roster deletion, fairness
//! credit on correction) cannot be skipped.

use std::collections::BTreeSet;

use crate::core::error::RotaError;
use crate::core::ledger::HistoryLedger;
use crate::core::roster::Roster;
use crate::core::rotation::{DrawOutcome, draw};
use crate::core::shuffle::Shuffle;
use crate::core::tracker::FairnessTracker;
use crate::core::types::{HistoryEntry, PendingDraw, Player};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RotaState {
    pub(crate) roster: Roster,
    pub(crate) tracker: FairnessTracker,
    pub(crate) pending: Option<PendingDraw>,
    pub(crate) history: HistoryLedger,
}

impl RotaState {
    pub fn new(
        roster: Roster,
        tracker: FairnessTracker,
        pending: Option<PendingDraw>,
        history: HistoryLedger,
    ) -> Self {
        Self {
            roster,
            tracker,
            pending,
            history,
        }
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn tracker(&self) -> &FairnessTracker {
        &self.tracker
    }

    pub fn pending(&self) -> Option<&PendingDraw> {
        self.pending.as_ref()
    }

    pub fn history(&self) -> &HistoryLedger {
        &self.history
    }

    pub fn import_names<I, S>(&mut self, raw_lines: I) -> Vec<Player>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.roster.import_names(raw_lines)
    }

    /// Remove a player from the roster, the squad and the washed set.
    /// Returns true if anything changed.
    pub fn remove_player(&mut self, name: &str) -> bool {
        let removed = self.roster.remove_player(name);
        let forgotten = self.tracker.forget(name);
        removed || forgotten
    }

    pub fn set_squad_membership(&mut self, name: &str, included: bool) -> bool {
        self.roster.set_squad_membership(name, included)
    }

    pub fn active_squad(&self) -> BTreeSet<Player> {
        self.roster.active_eligible_squad()
    }

    /// Draw from the active squad and make the result the pending draw,
    /// replacing any earlier one.
    pub fn draw<S: Shuffle + ?Sized>(
        &mut self,
        today: &str,
        shuffle: &mut S,
    ) -> Result<DrawOutcome, RotaError> {
        let squad = self.active_squad();
        let outcome = draw(&squad, &mut self.tracker, today, shuffle)?;
        self.pending = Some(outcome.pending.clone());
        Ok(outcome)
    }

    /// Rewrite who washed for a history entry. The new washer is credited;
    /// the old one keeps any credit. Returns the previous washer.
    pub fn correct_washer(&mut self, index: usize, washer: &str) -> Result<Player, RotaError> {
        if !self.roster.contains(washer) {
            return Err(RotaError::UnknownPlayer(washer.to_string()));
        }
        let previous = self.history.set_washer(index, washer)?;
        self.tracker.credit(washer);
        Ok(previous)
    }

    /// Remove a history entry. Fairness credit is left alone.
    pub fn delete_entry(&mut self, index: usize) -> Result<HistoryEntry, RotaError> {
        self.history.delete(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{ScriptedShuffle, history_entry, state_with_squad};

    #[test]
    fn remove_player_cascades_to_squad_and_washed_set() {
        let mut state = state_with_squad(&["Ana", "Ben", "Cem"]);
        state.tracker.credit("Ben");

        assert!(state.remove_player("Ben"));
        let once = state.clone();
        assert!(!state.remove_player("Ben"));

        assert_eq!(state, once);
        assert!(!state.roster().contains("Ben"));
        assert!(!state.roster().squad().contains("Ben"));
        assert!(!state.tracker().has_washed("Ben"));
    }

    #[test]
    fn draw_sets_pending_and_replaces_previous() {
        let mut state = state_with_squad(&["Ana", "Ben", "Cem", "Dora"]);
        let mut shuffle = ScriptedShuffle::identity();
        state.draw("2024-02-01", &mut shuffle).expect("first draw");
        let second = state.draw("2024-02-02", &mut shuffle).expect("second draw");

        assert_eq!(state.pending(), Some(&second.pending));
        assert_eq!(state.pending().map(|p| p.date.as_str()), Some("2024-02-02"));
    }

    #[test]
    fn failed_draw_leaves_state_untouched() {
        let mut state = state_with_squad(&["Ana", "Ben"]);
        let before = state.clone();
        let mut shuffle = ScriptedShuffle::identity();
        assert!(state.draw("d", &mut shuffle).is_err());
        assert_eq!(state, before);
    }

    #[test]
    fn correct_washer_credits_new_washer_without_revoking_old() {
        let mut state = state_with_squad(&["Ana", "Ben", "Cem"]);
        state.history.record(history_entry("d", "Ana", "Ana"));
        state.tracker.credit("Ana");

        let previous = state.correct_washer(0, "Cem").expect("correct");

        assert_eq!(previous, "Ana");
        assert_eq!(state.history().entries()[0].actual_washer, "Cem");
        assert!(state.tracker().has_washed("Ana"));
        assert!(state.tracker().has_washed("Cem"));
    }

    #[test]
    fn correct_washer_rejects_unknown_player() {
        let mut state = state_with_squad(&["Ana", "Ben", "Cem"]);
        state.history.record(history_entry("d", "Ana", "Ana"));
        let before = state.clone();

        let err = state.correct_washer(0, "Unknown").expect_err("unknown");

        assert_eq!(err, RotaError::UnknownPlayer("Unknown".to_string()));
        assert_eq!(state, before);
    }

    #[test]
    fn correct_washer_rejects_stale_index_without_crediting() {
        let mut state = state_with_squad(&["Ana", "Ben", "Cem"]);
        let err = state.correct_washer(0, "Ben").expect_err("empty history");
        assert_eq!(err, RotaError::IndexOutOfRange { index: 0, len: 0 });
        assert!(!state.tracker().has_washed("Ben"));
    }

    #[test]
    fn delete_entry_keeps_fairness_credit() {
        let mut state = state_with_squad(&["Ana", "Ben", "Cem"]);
        state.history.record(history_entry("d", "Ana", "Ana"));
        state.tracker.credit("Ana");

        state.delete_entry(0).expect("delete");

        assert!(state.history().is_empty());
        assert!(state.tracker().has_washed("Ana"));
    }
}
