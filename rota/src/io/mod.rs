//! I/O collaborators for the rotation core.

pub mod clock;
pub mod config;
pub mod exchange;
pub mod paths;
pub mod store;
