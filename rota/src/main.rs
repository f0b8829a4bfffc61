//! Jersey-washing rotation.
//!
//! Keeps the roster, the active squad and the fairness cycle under
//! `.rota/state/`, draws a washer plus two backups, and records who actually
//! did the washing.

use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use rota::{commands, exit_codes, logging};

#[derive(Parser)]
#[command(name = "rota", version, about = "Fair jersey-washing rotation for a team")]
struct Cli {
    /// Project directory containing `.rota/`.
    #[arg(long, global = true, default_value = ".")]
    root: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create `.rota/` with a default config.
    Init {
        /// Overwrite existing config files.
        #[arg(short, long)]
        force: bool,
    },
    /// Add players from a file with one name per line (`-` for stdin).
    Import { file: PathBuf },
    /// Remove a player from the roster, the squad and the current cycle.
    Remove { name: String },
    /// Change who is in the active squad.
    Squad {
        #[command(subcommand)]
        action: SquadAction,
    },
    /// Show the squad, who washed this cycle and any pending draw.
    Status,
    /// Draw a washer and two backups from the active squad.
    Draw {
        /// Seed the shuffle for this draw only.
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Record who actually washed for the pending draw.
    Confirm { washer: String },
    /// Discard the pending draw.
    Cancel,
    /// List past draws, newest first.
    History {
        /// Also print duty counts per player.
        #[arg(long)]
        stats: bool,
    },
    /// Change who washed for a history entry.
    Correct { index: usize, washer: String },
    /// Delete a history entry.
    Delete {
        index: usize,
        /// Confirm the deletion.
        #[arg(long)]
        yes: bool,
    },
    /// Write all collections to a JSON document.
    Export { file: PathBuf },
    /// Replace all collections from a JSON document.
    Restore { file: PathBuf },
    /// Check persisted state for inconsistencies.
    Validate,
}

#[derive(Subcommand)]
enum SquadAction {
    Add { names: Vec<String> },
    Remove { names: Vec<String> },
}

fn main() {
    logging::init();
    let cli = Cli::parse();
    if let Err(err) = run(cli) {
        eprintln!("{:#}", err);
        std::process::exit(exit_codes::for_error(&err));
    }
}

fn run(cli: Cli) -> Result<()> {
    let root = cli.root.as_path();
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match cli.command {
        Command::Init { force } => commands::cmd_init(root, force, &mut out),
        Command::Import { file } => commands::cmd_import(root, &file, &mut out),
        Command::Remove { name } => commands::cmd_remove(root, &name, &mut out),
        Command::Squad { action } => match action {
            SquadAction::Add { names } => commands::cmd_squad(root, &names, true, &mut out),
            SquadAction::Remove { names } => commands::cmd_squad(root, &names, false, &mut out),
        },
        Command::Status => commands::cmd_status(root, &mut out),
        Command::Draw { seed } => commands::cmd_draw(root, seed, &mut out),
        Command::Confirm { washer } => commands::cmd_confirm(root, &washer, &mut out),
        Command::Cancel => commands::cmd_cancel(root, &mut out),
        Command::History { stats } => commands::cmd_history(root, stats, &mut out),
        Command::Correct { index, washer } => {
            commands::cmd_correct(root, index, &washer, &mut out)
        }
        Command::Delete { index, yes } => commands::cmd_delete(root, index, yes, &mut out),
        Command::Export { file } => commands::cmd_export(root, &file, &mut out),
        Command::Restore { file } => commands::cmd_restore(root, &file, &mut out),
        Command::Validate => commands::cmd_validate(root, &mut out),
    }?;
    out.flush()?;
    Ok(())
}
