//! Stable exit codes for rota CLI commands.

use crate::core::error::RotaError;

/// Command succeeded.
pub const OK: i32 = 0;
/// Invalid layout/config/state, I/O failure, or a desynchronized request
/// (nothing pending, stale history index).
pub const INVALID: i32 = 1;
/// User-correctable refusal: squad too small or unknown player.
pub const USER: i32 = 2;

/// Map a command error to its exit code.
pub fn for_error(err: &anyhow::Error) -> i32 {
    let domain = err
        .chain()
        .find_map(|cause| cause.downcast_ref::<RotaError>());
    match domain {
        Some(rota) if rota.is_user_error() => USER,
        _ => INVALID,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn user_errors_map_to_user_code_through_context() {
        let err = Err::<(), _>(RotaError::UnknownPlayer("Zed".to_string()))
            .context("confirm draw")
            .expect_err("error");
        assert_eq!(for_error(&err), USER);
    }

    #[test]
    fn desync_and_io_errors_are_invalid() {
        assert_eq!(for_error(&anyhow::Error::new(RotaError::NoPendingDraw)), INVALID);
        assert_eq!(for_error(&anyhow::anyhow!("disk full")), INVALID);
    }
}
