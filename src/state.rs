/*
 * Responsibility
 * - Shared context attached to the Router (AppState)
 *   - valid tans + status mode, both read-only after startup
 * - Clone is cheap (ValidTans is Arc inside)
 */
use crate::{config::StatusMode, services::valid_tans::ValidTans};

#[derive(Clone, Debug)]
pub struct AppState {
    pub valid_tans: ValidTans,
    pub status_mode: StatusMode,
}

impl AppState {
    pub fn new(valid_tans: ValidTans, status_mode: StatusMode) -> Self {
        Self {
            valid_tans,
            status_mode,
        }
    }
}
