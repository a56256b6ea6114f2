//! Seat allocation for a rectangular hall.
//!
//! A hall is `rows` x `cols` seats plus a roster of students. The roster is
//! authoritative; the seat grid is rebuilt from it whenever the hall is
//! resized or loaded, and patched in place on allocate/deallocate.
//!
//! # Public API Overview
//! - [`SeatHall`] runs the operations: [`SeatHall::load`], [`SeatHall::resize`],
//!   [`SeatHall::allocate`], [`SeatHall::deallocate`], [`SeatHall::find`],
//!   [`SeatHall::current_state`].
//! - [`StateStore`] and [`EventSink`] are the ports for the state image and the
//!   event log; [`MemoryStore`] and [`RecordingEvents`] are in-memory versions.
//! - [`codec`] reads and writes the flat binary state image.
//!
//! # Recovery
//! A state image with out-of-range dimensions or counts, or a resize beyond
//! [`MAX_ROWS`] x [`MAX_COLS`], wipes the hall back to empty and deletes the
//! stored image. Operation errors ([`SeatError::DuplicateRoll`],
//! [`SeatError::HallFull`], ...) leave the hall untouched.
//!
//! # Orphans
//! Shrinking the hall never evicts anyone. Students whose seat falls outside
//! the new grid stay on the roster with their old position, hold no seat, and
//! can still be deallocated by roll.

pub mod codec;
pub mod engine;
pub mod error;
pub mod model;
pub mod state;
pub mod store;

mod grid;
mod guard;

pub use crate::engine::{LoadOutcome, ResizeOutcome, SeatHall};
pub use crate::error::SeatError;
pub use crate::model::{
    truncate_name, Grid, HallSnapshot, Roll, Roster, Seat, Student, MAX_COLS, MAX_ROWS,
    MAX_STUDENTS, NAME_MAX_BYTES,
};
pub use crate::state::HallState;
pub use crate::store::{
    EventSink, MemoryStore, RecordingEvents, SeatAction, SeatEvent, StateStore,
};
