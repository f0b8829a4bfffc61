//! Fair rotation of a team's jersey-washing duty.
//!
//! A roster of players, an active squad drawn from it, and a fairness cycle
//! that makes sure everyone in the squad washes once before anyone washes
//! twice. The architecture enforces a strict separation:
//!
//! - **[`core`]**: Pure, deterministic logic (roster, fairness tracker,
//!   rotation engine, reconciliation, history). No I/O; randomness comes in
//!   through the [`Shuffle`](crate::core::shuffle::Shuffle) trait.
//! - **[`io`]**: Side-effecting collaborators (slot storage, config, clock,
//!   exchange documents).
//!
//! [`session`] is the single writer that applies core operations and saves
//! the affected slots; [`commands`] renders them for the CLI.

pub mod commands;
pub mod core;
pub mod exit_codes;
pub mod io;
pub mod logging;
pub mod session;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
