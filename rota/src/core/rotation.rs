//! Rotation engine: pick a primary washer and two backups from the squad.

use std::collections::BTreeSet;

use crate::core::error::RotaError;
use crate::core::shuffle::Shuffle;
use crate::core::tracker::FairnessTracker;
use crate::core::types::{MIN_SQUAD_SIZE, PendingDraw, Player};

/// Result of [`draw`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawOutcome {
    pub pending: PendingDraw,
    /// True if the fairness cycle was reset for the squad. The reset stays
    /// in effect even if the draw is later cancelled.
    pub cycle_reset: bool,
}

/// Draw a primary and two backups from `squad`.
///
/// Players already credited this cycle are skipped. When fewer than three
/// squad members remain eligible the cycle is reset for the squad (and only
/// the squad) and everyone becomes eligible again. Backups avoid the
/// previous draw's backups unless that leaves fewer than two candidates, in
/// which case the unfiltered order is used.
pub fn draw<S: Shuffle + ?Sized>(
    squad: &BTreeSet<Player>,
    tracker: &mut FairnessTracker,
    today: &str,
    shuffle: &mut S,
) -> Result<DrawOutcome, RotaError> {
    if squad.len() < MIN_SQUAD_SIZE {
        return Err(RotaError::InsufficientSquadSize {
            required: MIN_SQUAD_SIZE,
            actual: squad.len(),
        });
    }

    let mut eligible = tracker.eligible_in(squad);
    let cycle_reset = eligible.len() < MIN_SQUAD_SIZE;
    if cycle_reset {
        tracker.reset_for(squad);
        eligible = squad.iter().cloned().collect();
    }

    shuffle.permute(&mut eligible);

    let Some((primary, rest)) = eligible.split_first() else {
        return Err(RotaError::InsufficientSquadSize {
            required: MIN_SQUAD_SIZE,
            actual: 0,
        });
    };
    let backups = pick_backups(rest, tracker.last_backups()).ok_or(
        RotaError::InsufficientSquadSize {
            required: MIN_SQUAD_SIZE,
            actual: eligible.len(),
        },
    )?;

    Ok(DrawOutcome {
        pending: PendingDraw {
            date: today.to_string(),
            squad_snapshot: squad.clone(),
            primary: primary.clone(),
            backups,
        },
        cycle_reset,
    })
}

/// First two candidates not among `last_backups`, falling back to the first
/// two overall when the filtered pool is too small.
fn pick_backups(candidates: &[Player], last_backups: &[Player]) -> Option<[Player; 2]> {
    let filtered: Vec<&Player> = candidates
        .iter()
        .filter(|name| !last_backups.contains(name))
        .collect();
    let pool: Vec<&Player> = if filtered.len() < 2 {
        candidates.iter().collect()
    } else {
        filtered
    };
    match pool.as_slice() {
        [first, second, ..] => Some([(*first).clone(), (*second).clone()]),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{ScriptedShuffle, names, squad};

    #[test]
    fn rejects_squads_smaller_than_three() {
        let mut tracker = FairnessTracker::default();
        let mut shuffle = ScriptedShuffle::identity();
        let err = draw(&squad(&["Ana", "Ben"]), &mut tracker, "d", &mut shuffle)
            .expect_err("too small");
        assert_eq!(
            err,
            RotaError::InsufficientSquadSize {
                required: 3,
                actual: 2
            }
        );
    }

    #[test]
    fn primary_and_backups_follow_permutation_order() {
        let mut tracker = FairnessTracker::default();
        let mut shuffle = ScriptedShuffle::new(vec![names(&["Cem", "Ana", "Dora", "Ben"])]);
        let outcome = draw(
            &squad(&["Ana", "Ben", "Cem", "Dora"]),
            &mut tracker,
            "2024-05-04",
            &mut shuffle,
        )
        .expect("draw");

        assert_eq!(outcome.pending.primary, "Cem");
        assert_eq!(outcome.pending.backups, ["Ana".to_string(), "Dora".to_string()]);
        assert_eq!(outcome.pending.date, "2024-05-04");
        assert_eq!(outcome.pending.squad_snapshot.len(), 4);
        assert!(!outcome.cycle_reset);
    }

    #[test]
    fn washed_players_are_not_drawn() {
        let mut tracker = FairnessTracker::from_parts(squad(&["Ana", "Ben"]), Vec::new());
        let mut shuffle = ScriptedShuffle::identity();
        let outcome = draw(
            &squad(&["Ana", "Ben", "Cem", "Dora", "Eli"]),
            &mut tracker,
            "d",
            &mut shuffle,
        )
        .expect("draw");

        assert_eq!(outcome.pending.primary, "Cem");
        assert_eq!(outcome.pending.backups, ["Dora".to_string(), "Eli".to_string()]);
        assert_eq!(shuffle.seen(), vec![names(&["Cem", "Dora", "Eli"])]);
    }

    #[test]
    fn backups_avoid_previous_backups_when_possible() {
        let mut tracker = FairnessTracker::from_parts(BTreeSet::new(), names(&["Ana", "Ben"]));
        let mut shuffle =
            ScriptedShuffle::new(vec![names(&["Cem", "Ana", "Dora", "Ben", "Eli"])]);
        let outcome = draw(
            &squad(&["Ana", "Ben", "Cem", "Dora", "Eli"]),
            &mut tracker,
            "d",
            &mut shuffle,
        )
        .expect("draw");

        assert_eq!(outcome.pending.backups, ["Dora".to_string(), "Eli".to_string()]);
    }

    #[test]
    fn backups_fall_back_to_unfiltered_order_when_pool_too_small() {
        let mut tracker = FairnessTracker::from_parts(BTreeSet::new(), names(&["A", "B"]));
        let mut shuffle = ScriptedShuffle::new(vec![names(&["C", "D", "A", "B"])]);
        let outcome = draw(&squad(&["A", "B", "C", "D"]), &mut tracker, "d", &mut shuffle)
            .expect("draw");

        assert_eq!(outcome.pending.primary, "C");
        assert_eq!(outcome.pending.backups, ["D".to_string(), "A".to_string()]);
    }

    #[test]
    fn reset_fires_when_everyone_has_washed() {
        let mut tracker = FairnessTracker::from_parts(squad(&["X", "Y", "Z"]), Vec::new());
        let mut shuffle = ScriptedShuffle::identity();
        let outcome =
            draw(&squad(&["X", "Y", "Z"]), &mut tracker, "d", &mut shuffle).expect("draw");

        assert!(outcome.cycle_reset);
        assert!(tracker.washed().is_empty());
        assert_eq!(outcome.pending.primary, "X");
        assert_eq!(outcome.pending.backups, ["Y".to_string(), "Z".to_string()]);
    }

    #[test]
    fn reset_fires_below_three_eligible_and_spares_outsiders() {
        let mut tracker =
            FairnessTracker::from_parts(squad(&["Ana", "Ben", "Outsider"]), Vec::new());
        let mut shuffle = ScriptedShuffle::identity();
        let outcome = draw(
            &squad(&["Ana", "Ben", "Cem", "Dora"]),
            &mut tracker,
            "d",
            &mut shuffle,
        )
        .expect("draw");

        assert!(outcome.cycle_reset);
        assert_eq!(tracker.washed(), &squad(&["Outsider"]));
        assert_eq!(shuffle.seen()[0].len(), 4);
    }

    #[test]
    fn draw_does_not_touch_last_backups() {
        let mut tracker = FairnessTracker::from_parts(BTreeSet::new(), names(&["Ana", "Ben"]));
        let mut shuffle = ScriptedShuffle::identity();
        draw(
            &squad(&["Ana", "Ben", "Cem", "Dora"]),
            &mut tracker,
            "d",
            &mut shuffle,
        )
        .expect("draw");
        assert_eq!(tracker.last_backups(), ["Ana", "Ben"]);
    }

    #[test]
    fn pick_backups_needs_two_candidates() {
        assert_eq!(pick_backups(&names(&["Ana"]), &[]), None);
    }
}
