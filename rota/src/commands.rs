//! CLI command implementations.
//!
//! Each command opens a session over `.rota/state/`, applies one operation
//! and renders the result to `out`.

use std::fs;
use std::io::{Read, Write};
use std::path::Path;

use anyhow::{Context, Result, anyhow, bail};
use tracing::debug;

use crate::core::invariants::validate_invariants;
use crate::core::shuffle::RandomShuffle;
use crate::core::snapshot::Snapshot;
use crate::core::types::{HistoryEntry, PendingDraw};
use crate::io::clock::SystemClock;
use crate::io::config::{RotaConfig, load_config};
use crate::io::exchange::{read_document, write_document};
use crate::io::paths::{InitOptions, RotaPaths, init_rota};
use crate::io::store::FileStore;
use crate::session::Session;

/// Config plus a session over the file-backed slots of `root`.
pub fn open(root: &Path) -> Result<(RotaConfig, Session<FileStore>)> {
    let paths = RotaPaths::new(root);
    let config = load_config(&paths.config_path)?;
    let session = Session::open(FileStore::new(&paths.state_dir)).context("open rota state")?;
    Ok((config, session))
}

pub fn cmd_init(root: &Path, force: bool, out: &mut dyn Write) -> Result<()> {
    let paths = init_rota(root, &InitOptions { force })?;
    writeln!(out, "initialized {}", paths.rota_dir.display())?;
    Ok(())
}

/// Import one name per line from `source` (`-` reads stdin).
pub fn cmd_import(root: &Path, source: &Path, out: &mut dyn Write) -> Result<()> {
    let raw = if source == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("read names from stdin")?;
        buf
    } else {
        fs::read_to_string(source).with_context(|| format!("read {}", source.display()))?
    };
    let (_, mut session) = open(root)?;
    let added = session.import_names(raw.lines())?;
    writeln!(
        out,
        "imported {} player(s), roster has {}",
        added.len(),
        session.state().roster().players().len()
    )?;
    Ok(())
}

pub fn cmd_remove(root: &Path, name: &str, out: &mut dyn Write) -> Result<()> {
    let (_, mut session) = open(root)?;
    if session.remove_player(name)? {
        writeln!(out, "removed {}", name)?;
    } else {
        writeln!(out, "{} is not on the roster", name)?;
    }
    Ok(())
}

pub fn cmd_squad(root: &Path, names: &[String], included: bool, out: &mut dyn Write) -> Result<()> {
    let (_, mut session) = open(root)?;
    for name in names {
        if !session.state().roster().contains(name) {
            writeln!(out, "skipped {} (not on the roster)", name)?;
            continue;
        }
        session.set_squad_membership(name, included)?;
    }
    writeln!(out, "squad has {} player(s)", session.state().active_squad().len())?;
    Ok(())
}

pub fn cmd_status(root: &Path, out: &mut dyn Write) -> Result<()> {
    let (config, session) = open(root)?;
    let snapshot = session.snapshot();
    writeln!(out, "team: {}", config.team_name)?;
    writeln!(
        out,
        "squad: {} (open {})",
        snapshot.squad.len(),
        snapshot.open_count()
    )?;
    for row in &snapshot.squad {
        let mark = if row.washed { "x" } else { " " };
        writeln!(out, "  [{}] {}", mark, row.name)?;
    }
    let bench: Vec<&str> = snapshot
        .roster
        .iter()
        .filter(|row| !row.in_squad)
        .map(|row| row.name.as_str())
        .collect();
    if !bench.is_empty() {
        writeln!(out, "not in squad: {}", bench.join(", "))?;
    }
    match &snapshot.pending {
        Some(view) => {
            render_pending(&view.draw, out)?;
            writeln!(out, "candidates: {}", view.candidates.join(", "))?;
        }
        None => writeln!(out, "pending: none")?,
    }
    Ok(())
}

/// Draw from the active squad. `seed` pins this one draw only.
pub fn cmd_draw(root: &Path, seed: Option<u64>, out: &mut dyn Write) -> Result<()> {
    let (config, mut session) = open(root)?;
    let clock = SystemClock::new(config.date_format.clone());
    let mut shuffle = match seed {
        Some(seed) => {
            debug!(seed, "seeded draw");
            RandomShuffle::seeded(seed)
        }
        None => RandomShuffle::from_entropy(),
    };
    let outcome = session.draw(&clock, &mut shuffle)?;
    if outcome.cycle_reset {
        writeln!(out, "new cycle: everyone in the squad is eligible again")?;
    }
    render_pending(&outcome.pending, out)?;
    Ok(())
}

pub fn cmd_confirm(root: &Path, washer: &str, out: &mut dyn Write) -> Result<()> {
    let (_, mut session) = open(root)?;
    let entry = session.confirm(washer).context("confirm draw")?;
    render_entry(0, &entry, out)?;
    Ok(())
}

pub fn cmd_cancel(root: &Path, out: &mut dyn Write) -> Result<()> {
    let (_, mut session) = open(root)?;
    let pending = session.cancel().context("cancel draw")?;
    writeln!(out, "cancelled draw of {} ({})", pending.primary, pending.date)?;
    Ok(())
}

pub fn cmd_history(root: &Path, stats: bool, out: &mut dyn Write) -> Result<()> {
    let (_, session) = open(root)?;
    let snapshot = session.snapshot();
    if snapshot.history.is_empty() {
        writeln!(out, "history: empty")?;
    }
    for (index, entry) in snapshot.history.iter().enumerate() {
        render_entry(index, entry, out)?;
    }
    if stats {
        render_tally(&snapshot, out)?;
    }
    Ok(())
}

pub fn cmd_correct(root: &Path, index: usize, washer: &str, out: &mut dyn Write) -> Result<()> {
    let (_, mut session) = open(root)?;
    let previous = session
        .correct_washer(index, washer)
        .context("correct history entry")?;
    writeln!(out, "#{}: {} -> {}", index, previous, washer)?;
    Ok(())
}

/// Delete a history entry. Destructive, so the caller must pass `yes`.
pub fn cmd_delete(root: &Path, index: usize, yes: bool, out: &mut dyn Write) -> Result<()> {
    if !yes {
        bail!("refusing to delete history entry #{} without --yes", index);
    }
    let (_, mut session) = open(root)?;
    let removed = session
        .delete_entry(index)
        .context("delete history entry")?;
    writeln!(out, "deleted #{} ({}, washed by {})", index, removed.date, removed.actual_washer)?;
    Ok(())
}

pub fn cmd_export(root: &Path, target: &Path, out: &mut dyn Write) -> Result<()> {
    let (config, session) = open(root)?;
    let doc = session.export(Some(&config.team_name));
    write_document(target, &doc)?;
    writeln!(out, "exported {} player(s) to {}", doc.players.len(), target.display())?;
    Ok(())
}

pub fn cmd_restore(root: &Path, source: &Path, out: &mut dyn Write) -> Result<()> {
    let doc = read_document(source)?;
    let (_, mut session) = open(root)?;
    session.import_document(doc)?;
    let state = session.state();
    writeln!(
        out,
        "restored {} player(s), {} history entr{}",
        state.roster().players().len(),
        state.history().len(),
        if state.history().len() == 1 { "y" } else { "ies" }
    )?;
    Ok(())
}

pub fn cmd_validate(root: &Path, out: &mut dyn Write) -> Result<()> {
    let (_, session) = open(root)?;
    let errors = validate_invariants(session.state());
    if !errors.is_empty() {
        return Err(anyhow!("invariant violations:\n- {}", errors.join("\n- ")));
    }
    writeln!(out, "ok")?;
    Ok(())
}

fn render_pending(pending: &PendingDraw, out: &mut dyn Write) -> Result<()> {
    writeln!(
        out,
        "pending: {} primary={} backups={}",
        pending.date,
        pending.primary,
        pending.backups.join(", ")
    )?;
    Ok(())
}

fn render_entry(index: usize, entry: &HistoryEntry, out: &mut dyn Write) -> Result<()> {
    let swap = if entry.is_swap() { " (swap)" } else { "" };
    writeln!(
        out,
        "#{} {} drawn={} washed={}{} backups={}",
        index,
        entry.date,
        entry.drawn_primary,
        entry.actual_washer,
        swap,
        entry.drawn_backups.join(", ")
    )?;
    Ok(())
}

fn render_tally(snapshot: &Snapshot, out: &mut dyn Write) -> Result<()> {
    writeln!(out, "duties:")?;
    for (name, count) in &snapshot.tally.duties {
        writeln!(out, "  {} {}", name, count)?;
    }
    writeln!(out, "swaps: {}", snapshot.tally.swaps)?;
    Ok(())
}
