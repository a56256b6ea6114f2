use thiserror::Error;

use crate::model::Roll;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SeatError {
    #[error("no hall configured; set rows and columns first")]
    NoHallConfigured,

    #[error("roll {roll} is already allocated")]
    DuplicateRoll { roll: Roll },

    #[error("hall is full")]
    HallFull,

    #[error("roll {roll} not found")]
    RollNotFound { roll: Roll },

    #[error("roll {roll} is not a positive number")]
    InvalidRoll { roll: Roll },

    #[error("hall dimensions {rows}x{cols} are out of bounds")]
    DimensionsOutOfBounds { rows: usize, cols: usize },

    #[error("persisted state is corrupt: {reason}")]
    CorruptPersistedState { reason: String },
}

impl SeatError {
    #[must_use]
    pub fn corrupt(reason: impl Into<String>) -> Self {
        Self::CorruptPersistedState {
            reason: reason.into(),
        }
    }

    /// Whether the hall was wiped back to empty before this error was returned.
    #[must_use]
    pub fn is_reset(&self) -> bool {
        matches!(
            self,
            Self::DimensionsOutOfBounds { .. } | Self::CorruptPersistedState { .. }
        )
    }
}
