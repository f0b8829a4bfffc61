//! Session: the single writer over persisted rotation state.
//!
//! A session loads every slot (falling back to empty values for missing or
//! malformed data), applies core operations to the in-memory [`RotaState`],
//! and saves exactly the slots each operation changed.

use anyhow::{Context, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use crate::core::ledger::HistoryLedger;
use crate::core::reconcile::{cancel, confirm};
use crate::core::roster::Roster;
use crate::core::rotation::DrawOutcome;
use crate::core::shuffle::Shuffle;
use crate::core::snapshot::Snapshot;
use crate::core::state::RotaState;
use crate::core::tracker::FairnessTracker;
use crate::core::types::{HistoryEntry, PendingDraw, Player};
use crate::io::clock::Clock;
use crate::io::exchange::ExchangeDocument;
use crate::io::store::{Slot, StateStore};

/// Slots replaced by a bulk import. The pending draw is not one of them.
const EXCHANGE_SLOTS: [Slot; 5] = [
    Slot::Players,
    Slot::AlreadyWashed,
    Slot::History,
    Slot::LastSubs,
    Slot::SelectedKader,
];

pub struct Session<S: StateStore> {
    store: S,
    state: RotaState,
}

impl<S: StateStore> Session<S> {
    /// Load state from `store`. Missing or malformed slots fall back to
    /// empty collections and no pending draw.
    pub fn open(store: S) -> Result<Self> {
        let players: Vec<Player> = load_slot(&store, Slot::Players)?;
        let squad = load_slot(&store, Slot::SelectedKader)?;
        let washed = load_slot(&store, Slot::AlreadyWashed)?;
        let last_backups = load_slot(&store, Slot::LastSubs)?;
        let history: Vec<HistoryEntry> = load_slot(&store, Slot::History)?;
        let pending: Option<PendingDraw> = load_slot(&store, Slot::PendingResult)?;
        debug!(
            players = players.len(),
            history = history.len(),
            pending = pending.is_some(),
            "session opened"
        );
        let state = RotaState::new(
            Roster::from_parts(players, squad),
            FairnessTracker::from_parts(washed, last_backups),
            pending,
            HistoryLedger::from_entries(history),
        );
        Ok(Self { store, state })
    }

    pub fn state(&self) -> &RotaState {
        &self.state
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(&self.state)
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    pub fn import_names<I, T>(&mut self, raw_lines: I) -> Result<Vec<Player>>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        let added = self.state.import_names(raw_lines);
        if !added.is_empty() {
            info!(added = added.len(), "players imported");
            self.persist(&[Slot::Players])?;
        }
        Ok(added)
    }

    pub fn remove_player(&mut self, name: &str) -> Result<bool> {
        let changed = self.state.remove_player(name);
        if changed {
            info!(player = name, "player removed");
            self.persist(&[Slot::Players, Slot::SelectedKader, Slot::AlreadyWashed])?;
        }
        Ok(changed)
    }

    pub fn set_squad_membership(&mut self, name: &str, included: bool) -> Result<bool> {
        let changed = self.state.set_squad_membership(name, included);
        if changed {
            debug!(player = name, included, "squad membership changed");
            self.persist(&[Slot::SelectedKader])?;
        }
        Ok(changed)
    }

    /// Draw from the active squad. A cycle reset is saved right away,
    /// independent of whether the draw is later confirmed.
    pub fn draw<C, R>(&mut self, clock: &C, shuffle: &mut R) -> Result<DrawOutcome>
    where
        C: Clock + ?Sized,
        R: Shuffle + ?Sized,
    {
        let today = clock.today();
        let outcome = self.state.draw(&today, shuffle)?;
        if outcome.cycle_reset {
            info!(squad = outcome.pending.squad_snapshot.len(), "fairness cycle reset");
            self.persist(&[Slot::AlreadyWashed])?;
        }
        info!(
            primary = %outcome.pending.primary,
            backups = ?outcome.pending.backups,
            "draw pending"
        );
        self.persist(&[Slot::PendingResult])?;
        Ok(outcome)
    }

    pub fn confirm(&mut self, actual_washer: &str) -> Result<HistoryEntry> {
        let entry = confirm(&mut self.state, actual_washer)?;
        info!(
            drawn = %entry.drawn_primary,
            washer = %entry.actual_washer,
            "draw confirmed"
        );
        self.persist(&[
            Slot::AlreadyWashed,
            Slot::LastSubs,
            Slot::History,
            Slot::PendingResult,
        ])?;
        Ok(entry)
    }

    pub fn cancel(&mut self) -> Result<PendingDraw> {
        let pending = cancel(&mut self.state)?;
        info!(primary = %pending.primary, "draw cancelled");
        self.persist(&[Slot::PendingResult])?;
        Ok(pending)
    }

    pub fn correct_washer(&mut self, index: usize, washer: &str) -> Result<Player> {
        let previous = self.state.correct_washer(index, washer)?;
        info!(index, from = %previous, to = washer, "history entry corrected");
        self.persist(&[Slot::History, Slot::AlreadyWashed])?;
        Ok(previous)
    }

    pub fn delete_entry(&mut self, index: usize) -> Result<HistoryEntry> {
        let removed = self.state.delete_entry(index)?;
        info!(index, date = %removed.date, "history entry deleted");
        self.persist(&[Slot::History])?;
        Ok(removed)
    }

    pub fn export(&self, team: Option<&str>) -> ExchangeDocument {
        ExchangeDocument::from_state(&self.state, team)
    }

    /// Replace roster, tracker and history wholesale and re-save all five
    /// exchange slots. A pending draw is kept as-is.
    pub fn import_document(&mut self, doc: ExchangeDocument) -> Result<()> {
        let (roster, tracker, history) = doc.into_parts();
        info!(
            players = roster.players().len(),
            history = history.len(),
            "importing exchange document"
        );
        self.state.roster = roster;
        self.state.tracker = tracker;
        self.state.history = history;
        self.persist(&EXCHANGE_SLOTS)
    }

    fn persist(&mut self, slots: &[Slot]) -> Result<()> {
        for &slot in slots {
            match slot {
                Slot::Players => save_slot(&mut self.store, slot, self.state.roster.players())?,
                Slot::SelectedKader => save_slot(&mut self.store, slot, self.state.roster.squad())?,
                Slot::AlreadyWashed => {
                    save_slot(&mut self.store, slot, self.state.tracker.washed())?;
                }
                Slot::LastSubs => {
                    save_slot(&mut self.store, slot, self.state.tracker.last_backups())?;
                }
                Slot::History => save_slot(&mut self.store, slot, self.state.history.entries())?,
                Slot::PendingResult => match &self.state.pending {
                    Some(pending) => save_slot(&mut self.store, slot, pending)?,
                    None => self
                        .store
                        .remove(slot)
                        .with_context(|| format!("clear slot {}", slot.key()))?,
                },
            }
        }
        Ok(())
    }
}

fn load_slot<S, T>(store: &S, slot: Slot) -> Result<T>
where
    S: StateStore + ?Sized,
    T: DeserializeOwned + Default,
{
    let Some(raw) = store
        .load(slot)
        .with_context(|| format!("load slot {}", slot.key()))?
    else {
        return Ok(T::default());
    };
    // Invalid UTF-8 surfaces as a JSON error and takes the same fallback.
    match serde_json::from_slice(&raw) {
        Ok(value) => Ok(value),
        Err(err) => {
            warn!(slot = slot.key(), error = %err, "malformed slot, using fallback");
            Ok(T::default())
        }
    }
}

fn save_slot<S, T>(store: &mut S, slot: Slot, value: &T) -> Result<()>
where
    S: StateStore + ?Sized,
    T: Serialize + ?Sized,
{
    let mut buf = serde_json::to_string_pretty(value)
        .with_context(|| format!("serialize slot {}", slot.key()))?;
    buf.push('\n');
    store
        .save(slot, &buf)
        .with_context(|| format!("save slot {}", slot.key()))
}
