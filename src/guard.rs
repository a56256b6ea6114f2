//! Reset-to-empty policy for state that cannot be trusted.

use log::warn;

use crate::error::SeatError;
use crate::state::HallState;
use crate::store::StateStore;

/// Clears `state` and deletes the stored image. Never fails; a delete error is logged.
pub(crate) fn reset<S: StateStore>(state: &mut HallState, store: &mut S, cause: &SeatError) {
    warn!("event=state_reset cause=\"{cause}\"");
    state.clear();
    if let Err(err) = store.discard() {
        warn!("event=state_discard_failed error=\"{err}\"");
    }
}
