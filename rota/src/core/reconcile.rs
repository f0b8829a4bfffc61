//! Reconciliation: commit or discard the pending draw.

use crate::core::error::RotaError;
use crate::core::state::RotaState;
use crate::core::types::{HistoryEntry, PendingDraw};

/// Commit the pending draw with the player who actually washed.
///
/// All preconditions are checked before any mutation. On success the washer
/// is credited, the drawn backups become `last_backups` (whoever washed),
/// the entry is prepended to history and the pending draw is cleared.
pub fn confirm(state: &mut RotaState, actual_washer: &str) -> Result<HistoryEntry, RotaError> {
    let Some(pending) = state.pending.as_ref() else {
        return Err(RotaError::NoPendingDraw);
    };
    if !state.roster.contains(actual_washer) {
        return Err(RotaError::UnknownPlayer(actual_washer.to_string()));
    }
    let entry = HistoryEntry::from_pending(pending.clone(), actual_washer.to_string());
    state.pending = None;

    state.tracker.credit(actual_washer);
    state.tracker.set_last_backups(&entry.drawn_backups);
    state.history.record(entry.clone());
    Ok(entry)
}

/// Discard the pending draw. A cycle reset done while drawing stays.
pub fn cancel(state: &mut RotaState) -> Result<PendingDraw, RotaError> {
    state.pending.take().ok_or(RotaError::NoPendingDraw)
}
