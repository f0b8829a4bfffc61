//! Semantic invariants over loaded state.
//!
//! Persisted slots are loaded leniently, so nothing stops hand-edited or
//! imported data from breaking these. `rota validate` reports them.

use std::collections::HashSet;

use crate::core::state::RotaState;

/// Check state invariants:
/// - No duplicate players
/// - Squad members and credited players are on the roster
/// - `last_backups` is empty or a pair
/// - Pending primary and backups are distinct members of their snapshot
pub fn validate_invariants(state: &RotaState) -> Vec<String> {
    let mut errors = Vec::new();
    let roster = state.roster();

    let mut seen = HashSet::new();
    for name in roster.players() {
        if !seen.insert(name.as_str()) {
            errors.push(format!("duplicate player '{}'", name));
        }
    }

    for name in roster.squad() {
        if !roster.contains(name) {
            errors.push(format!("squad member '{}' is not on the roster", name));
        }
    }

    for name in state.tracker().washed() {
        if !roster.contains(name) {
            errors.push(format!("washed player '{}' is not on the roster", name));
        }
    }

    let last = state.tracker().last_backups();
    if !(last.is_empty() || last.len() == 2) {
        errors.push(format!("last backups must be empty or a pair, got {}", last.len()));
    }

    if let Some(pending) = state.pending() {
        let [first, second] = &pending.backups;
        if first == second || *first == pending.primary || *second == pending.primary {
            errors.push("pending draw: primary and backups must be distinct".to_string());
        }
        for name in std::iter::once(&pending.primary).chain(pending.backups.iter()) {
            if !pending.squad_snapshot.contains(name) {
                errors.push(format!("pending draw: '{}' is not in the squad snapshot", name));
            }
        }
    }

    errors
}
