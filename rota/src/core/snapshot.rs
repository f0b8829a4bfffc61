//! Read-only views handed to the presentation layer.

use crate::core::ledger::WasherTally;
use crate::core::state::RotaState;
use crate::core::types::{HistoryEntry, PendingDraw, Player};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterRow {
    pub name: Player,
    pub in_squad: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SquadRow {
    pub name: Player,
    /// Already washed in the current cycle.
    pub washed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingView {
    pub draw: PendingDraw,
    /// Who may be recorded as the actual washer.
    pub candidates: Vec<Player>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub roster: Vec<RosterRow>,
    pub squad: Vec<SquadRow>,
    pub pending: Option<PendingView>,
    pub history: Vec<HistoryEntry>,
    pub tally: WasherTally,
}

impl Snapshot {
    pub fn capture(state: &RotaState) -> Self {
        let squad_members = state.roster().squad();
        let roster = state
            .roster()
            .players()
            .iter()
            .map(|name| RosterRow {
                name: name.clone(),
                in_squad: squad_members.contains(name),
            })
            .collect();
        let squad = state
            .active_squad()
            .into_iter()
            .map(|name| SquadRow {
                washed: state.tracker().has_washed(&name),
                name,
            })
            .collect();
        let pending = state.pending().map(|draw| PendingView {
            candidates: draw.candidates(),
            draw: draw.clone(),
        });
        Self {
            roster,
            squad,
            pending,
            history: state.history().entries().to_vec(),
            tally: state.history().tally(),
        }
    }

    /// Squad members not yet washed this cycle.
    pub fn open_count(&self) -> usize {
        self.squad.iter().filter(|row| !row.washed).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{ScriptedShuffle, state_with_squad};

    #[test]
    fn capture_reports_squad_status_and_candidates() {
        let mut state = state_with_squad(&["Ana", "Ben", "Cem", "Dora"]);
        state.import_names(["Bench"]);
        state.tracker.credit("Ana");
        let mut shuffle = ScriptedShuffle::identity();
        state.draw("d", &mut shuffle).expect("draw");

        let snapshot = Snapshot::capture(&state);

        assert_eq!(snapshot.roster.len(), 5);
        assert!(!snapshot.roster[4].in_squad);
        assert_eq!(snapshot.squad[0], SquadRow { name: "Ana".into(), washed: true });
        assert_eq!(snapshot.open_count(), 3);
        let pending = snapshot.pending.expect("pending");
        assert_eq!(pending.candidates, vec!["Ben", "Cem", "Dora", "Ana"]);
    }
}
