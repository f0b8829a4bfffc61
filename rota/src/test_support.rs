//! Test-only helpers: scripted collaborators and state builders.

use std::collections::{BTreeMap, BTreeSet, VecDeque};
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tempfile::TempDir;

use crate::core::shuffle::Shuffle;
use crate::core::state::RotaState;
use crate::core::types::{HistoryEntry, Player};
use crate::io::clock::Clock;
use crate::io::paths::{InitOptions, RotaPaths, init_rota};
use crate::io::store::{FileStore, Slot, StateStore};
use crate::session::Session;

/// Owned player names, in the given order.
pub fn names(list: &[&str]) -> Vec<Player> {
    list.iter().map(|name| name.to_string()).collect()
}

/// A set of player names (squads, washed sets).
pub fn squad(list: &[&str]) -> BTreeSet<Player> {
    list.iter().map(|name| name.to_string()).collect()
}

/// State whose roster and active squad are exactly `list`.
pub fn state_with_squad(list: &[&str]) -> RotaState {
    let mut state = RotaState::default();
    state.import_names(list.iter().copied());
    for name in list {
        state.set_squad_membership(name, true);
    }
    state
}

/// A history entry drawn from a fixed four-player snapshot.
pub fn history_entry(date: &str, drawn: &str, washer: &str) -> HistoryEntry {
    let pool = ["Ana", "Ben", "Cem", "Dora"];
    let others: Vec<Player> = pool
        .iter()
        .filter(|name| **name != drawn)
        .map(|name| name.to_string())
        .collect();
    HistoryEntry {
        date: date.to_string(),
        squad_snapshot: squad(&pool),
        drawn_primary: drawn.to_string(),
        drawn_backups: [others[0].clone(), others[1].clone()],
        actual_washer: washer.to_string(),
    }
}

/// Shuffle that replays predetermined orders.
///
/// Each call consumes the next scripted order: the listed names move to the
/// front in that order, anything unlisted keeps its relative position after
/// them. With no script left the input order is kept.
#[derive(Debug, Default)]
pub struct ScriptedShuffle {
    orders: VecDeque<Vec<Player>>,
    seen: Vec<Vec<Player>>,
}

impl ScriptedShuffle {
    pub fn new(orders: Vec<Vec<Player>>) -> Self {
        Self {
            orders: orders.into(),
            seen: Vec::new(),
        }
    }

    pub fn identity() -> Self {
        Self::default()
    }

    /// Inputs received so far, before reordering.
    pub fn seen(&self) -> &[Vec<Player>] {
        &self.seen
    }
}

impl Shuffle for ScriptedShuffle {
    fn permute(&mut self, players: &mut [Player]) {
        self.seen.push(players.to_vec());
        let Some(order) = self.orders.pop_front() else {
            return;
        };
        players.sort_by_key(|name| {
            order
                .iter()
                .position(|scripted| scripted == name)
                .unwrap_or(order.len())
        });
    }
}

/// Clock pinned to one day.
#[derive(Debug, Clone)]
pub struct FixedClock(pub String);

impl FixedClock {
    pub fn new(day: &str) -> Self {
        Self(day.to_string())
    }
}

impl Clock for FixedClock {
    fn today(&self) -> String {
        self.0.clone()
    }
}

/// In-memory slot store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    slots: BTreeMap<Slot, Vec<u8>>,
    /// Slot keys in save order, for asserting what an operation persisted.
    pub saves: Vec<Slot>,
}

impl MemoryStore {
    pub fn with_slot(mut self, slot: Slot, contents: &str) -> Self {
        self.slots.insert(slot, contents.as_bytes().to_vec());
        self
    }

    /// Seed a slot with arbitrary bytes, e.g. a corrupted file.
    pub fn with_raw_slot(mut self, slot: Slot, contents: &[u8]) -> Self {
        self.slots.insert(slot, contents.to_vec());
        self
    }

    pub fn get(&self, slot: Slot) -> Option<&str> {
        self.slots
            .get(&slot)
            .and_then(|raw| std::str::from_utf8(raw).ok())
    }

    pub fn clear_saves(&mut self) {
        self.saves.clear();
    }
}

impl StateStore for MemoryStore {
    fn load(&self, slot: Slot) -> Result<Option<Vec<u8>>> {
        Ok(self.slots.get(&slot).cloned())
    }

    fn save(&mut self, slot: Slot, contents: &str) -> Result<()> {
        self.slots.insert(slot, contents.as_bytes().to_vec());
        self.saves.push(slot);
        Ok(())
    }

    fn remove(&mut self, slot: Slot) -> Result<()> {
        self.slots.remove(&slot);
        self.saves.push(slot);
        Ok(())
    }
}

/// Temporary project root with an initialized `.rota/`.
pub struct TestProject {
    dir: TempDir,
}

impl TestProject {
    pub fn new() -> Result<Self> {
        let dir = tempfile::tempdir().context("create temp dir")?;
        init_rota(dir.path(), &InitOptions { force: false })?;
        Ok(Self { dir })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn paths(&self) -> RotaPaths {
        RotaPaths::new(self.dir.path())
    }

    /// Write a roster file with one name per line.
    pub fn write_names(&self, names: &[&str]) -> Result<PathBuf> {
        let path = self.dir.path().join("names.txt");
        let mut contents = names.join("\n");
        contents.push('\n');
        fs::write(&path, contents).with_context(|| format!("write {}", path.display()))?;
        Ok(path)
    }

    /// Open a session over the project's state directory.
    pub fn session(&self) -> Result<Session<FileStore>> {
        Session::open(FileStore::new(self.paths().state_dir))
    }
}
