//! Domain errors raised by the rotation core.
//!
//! None of these leave state partially mutated: every operation checks its
//! preconditions before touching anything.

use thiserror::Error;

use crate::core::types::Player;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RotaError {
    #[error("squad has {actual} player(s), at least {required} are needed for a draw")]
    InsufficientSquadSize { required: usize, actual: usize },

    #[error("no pending draw")]
    NoPendingDraw,

    #[error("unknown player '{0}'")]
    UnknownPlayer(Player),

    #[error("history index {index} out of range (len {len})")]
    IndexOutOfRange { index: usize, len: usize },
}

impl RotaError {
    /// User-correctable errors are surfaced as messages; the rest point at a
    /// desynchronized caller.
    pub fn is_user_error(&self) -> bool {
        match self {
            RotaError::InsufficientSquadSize { .. } => true,
            RotaError::UnknownPlayer(_) => true,
            RotaError::NoPendingDraw => false,
            RotaError::IndexOutOfRange { .. } => false,
        }
    }
}
