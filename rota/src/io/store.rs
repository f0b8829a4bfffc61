//! Slot storage for persisted state (`.rota/state/<slot>.json`).

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::debug;

/// Logical persistence keys. Each slot holds one JSON document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Slot {
    Players,
    AlreadyWashed,
    History,
    LastSubs,
    SelectedKader,
    /// Absent when no draw is pending.
    PendingResult,
}

impl Slot {
    pub const ALL: [Slot; 6] = [
        Slot::Players,
        Slot::AlreadyWashed,
        Slot::History,
        Slot::LastSubs,
        Slot::SelectedKader,
        Slot::PendingResult,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Slot::Players => "players",
            Slot::AlreadyWashed => "alreadyWashed",
            Slot::History => "history",
            Slot::LastSubs => "lastSubs",
            Slot::SelectedKader => "selectedKader",
            Slot::PendingResult => "pendingResult",
        }
    }
}

/// Persistence collaborator. Contents are opaque to the store; decoding
/// (and falling back on garbage) is the session's job.
pub trait StateStore {
    /// Returns `None` if the slot was never written or was removed.
    fn load(&self, slot: Slot) -> Result<Option<Vec<u8>>>;
    fn save(&mut self, slot: Slot, contents: &str) -> Result<()>;
    fn remove(&mut self, slot: Slot) -> Result<()>;
}

/// One file per slot inside a directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn slot_path(&self, slot: Slot) -> PathBuf {
        self.dir.join(format!("{}.json", slot.key()))
    }
}

impl StateStore for FileStore {
    fn load(&self, slot: Slot) -> Result<Option<Vec<u8>>> {
        let path = self.slot_path(slot);
        if !path.exists() {
            return Ok(None);
        }
        debug!(slot = slot.key(), path = %path.display(), "loading slot");
        let contents = fs::read(&path).with_context(|| format!("read slot {}", path.display()))?;
        Ok(Some(contents))
    }

    fn save(&mut self, slot: Slot, contents: &str) -> Result<()> {
        let path = self.slot_path(slot);
        debug!(slot = slot.key(), path = %path.display(), "writing slot");
        write_atomic(&path, contents)
    }

    fn remove(&mut self, slot: Slot) -> Result<()> {
        let path = self.slot_path(slot);
        if path.exists() {
            debug!(slot = slot.key(), path = %path.display(), "removing slot");
            fs::remove_file(&path).with_context(|| format!("remove slot {}", path.display()))?;
        }
        Ok(())
    }
}

/// Write via temp file + rename so a crash never leaves a half-written slot.
pub(crate) fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let parent = path
        .parent()
        .with_context(|| format!("path missing parent {}", path.display()))?;
    fs::create_dir_all(parent).with_context(|| format!("create directory {}", parent.display()))?;
    let mut tmp_name = path.as_os_str().to_owned();
    tmp_name.push(".tmp");
    let tmp_path = PathBuf::from(tmp_name);
    fs::write(&tmp_path, contents)
        .with_context(|| format!("write temp file {}", tmp_path.display()))?;
    fs::rename(&tmp_path, path).with_context(|| format!("replace {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_slot_loads_as_none() {
        let temp = tempfile::tempdir().expect("tempdir");
        let store = FileStore::new(temp.path());
        assert_eq!(store.load(Slot::History).expect("load"), None);
    }

    #[test]
    fn save_load_remove_cycle() {
        let temp = tempfile::tempdir().expect("tempdir");
        let mut store = FileStore::new(temp.path().join("state"));

        store.save(Slot::Players, "[\"Ana\"]").expect("save");
        assert!(temp.path().join("state/players.json").exists());
        assert_eq!(
            store.load(Slot::Players).expect("load").as_deref(),
            Some(b"[\"Ana\"]".as_slice())
        );

        store.remove(Slot::Players).expect("remove");
        store.remove(Slot::Players).expect("remove twice");
        assert_eq!(store.load(Slot::Players).expect("load"), None);
    }

    #[test]
    fn load_returns_raw_bytes_even_if_not_utf8() {
        let temp = tempfile::tempdir().expect("tempdir");
        let store = FileStore::new(temp.path());
        fs::write(store.slot_path(Slot::Players), [0xff, 0xfe, 0x00]).expect("write");
        assert_eq!(
            store.load(Slot::Players).expect("load"),
            Some(vec![0xff, 0xfe, 0x00])
        );
    }

    #[test]
    fn slot_keys_are_unique() {
        let keys: std::collections::HashSet<_> = Slot::ALL.iter().map(|slot| slot.key()).collect();
        assert_eq!(keys.len(), Slot::ALL.len());
    }
}
