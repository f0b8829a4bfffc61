//! Deterministic, pure logic of the rotation engine.
//!
//! Core modules must be free of I/O side effects. They operate on in-memory
//! data structures and return deterministic outputs given a shuffle.

pub mod error;
pub mod invariants;
pub mod ledger;
pub mod reconcile;
pub mod roster;
pub mod rotation;
pub mod shuffle;
pub mod snapshot;
pub mod state;
pub mod tracker;
pub mod types;
