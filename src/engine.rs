//! Seat assignment operations over a [`HallState`] wired to its ports.
//!
//! Every mutating call re-encodes the whole hall and hands it to the
//! [`StateStore`] before returning. A failed save is logged and otherwise
//! ignored: the in-memory result stands, but the next invocation will not see it.

use std::io;

use log::{info, warn};

use crate::codec;
use crate::error::SeatError;
use crate::guard;
use crate::model::{HallSnapshot, Roll, Student};
use crate::state::HallState;
use crate::store::{EventSink, SeatEvent, StateStore};

/// What [`SeatHall::load`] found in the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Nothing stored (or unreadable); the hall starts empty.
    Fresh,
    Loaded {
        students: usize,
        orphaned: usize,
        /// Records the header promised but the file did not contain.
        dropped: usize,
    },
    /// The image was rejected and deleted; the hall starts empty.
    Reset(SeatError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeOutcome {
    /// Non-positive or identical dimensions; nothing happened.
    Unchanged,
    Resized {
        rows: usize,
        cols: usize,
        orphaned: usize,
    },
}

pub struct SeatHall<S, E> {
    state: HallState,
    store: S,
    events: E,
}

impl<S: StateStore, E: EventSink> SeatHall<S, E> {
    /// Empty hall that has not looked at `store` yet.
    #[must_use]
    pub fn new(store: S, events: E) -> Self {
        Self {
            state: HallState::empty(),
            store,
            events,
        }
    }

    /// Builds a hall from whatever `store` holds.
    pub fn load(store: S, events: E) -> (Self, LoadOutcome) {
        let mut hall = Self::new(store, events);
        let outcome = hall.reload();
        (hall, outcome)
    }

    /// Replaces the in-memory state with the stored one.
    pub fn reload(&mut self) -> LoadOutcome {
        self.state.clear();

        let bytes = match self.store.load() {
            Ok(Some(bytes)) => bytes,
            Ok(None) => return LoadOutcome::Fresh,
            Err(err) => {
                warn!("event=state_read_failed error=\"{err}\"");
                return LoadOutcome::Fresh;
            }
        };

        let decoded = match codec::decode(&bytes) {
            Ok(decoded) => decoded,
            Err(err) => {
                guard::reset(&mut self.state, &mut self.store, &err);
                return LoadOutcome::Reset(err);
            }
        };

        let dropped = decoded.declared_count - decoded.roster.len();
        if dropped > 0 {
            warn!(
                "event=state_truncated declared={} read={}",
                decoded.declared_count,
                decoded.roster.len()
            );
        }

        self.state = HallState::from_parts(decoded.rows, decoded.cols, decoded.roster);
        if let Err(err) = self.ensure_grid() {
            return LoadOutcome::Reset(err);
        }
        let orphaned = self.state.rebuild();

        info!(
            "event=state_loaded rows={} cols={} students={} orphaned={orphaned}",
            self.state.rows(),
            self.state.cols(),
            self.state.roster().len()
        );

        LoadOutcome::Loaded {
            students: self.state.roster().len(),
            orphaned,
            dropped,
        }
    }

    /// Allocates the grid if the dimensions allow one.
    ///
    /// # Errors
    ///
    /// [`SeatError::DimensionsOutOfBounds`]; the hall has been reset by then.
    pub fn ensure_grid(&mut self) -> Result<(), SeatError> {
        self.state.ensure_grid().inspect_err(|err| {
            guard::reset(&mut self.state, &mut self.store, err);
        })
    }

    /// Switches to `rows` x `cols`, re-seating the roster and saving right away.
    ///
    /// Students whose seat falls outside the new grid keep their roster entry
    /// and recorded position but hold no seat.
    ///
    /// # Errors
    ///
    /// [`SeatError::DimensionsOutOfBounds`]; the hall has been reset by then.
    pub fn resize(&mut self, rows: i32, cols: i32) -> Result<ResizeOutcome, SeatError> {
        let (Ok(rows), Ok(cols)) = (usize::try_from(rows), usize::try_from(cols)) else {
            return Ok(ResizeOutcome::Unchanged);
        };
        if rows == 0 || cols == 0 || (rows, cols) == (self.state.rows(), self.state.cols()) {
            return Ok(ResizeOutcome::Unchanged);
        }

        self.state.reshape(rows, cols);
        self.ensure_grid()?;
        let orphaned = self.state.rebuild();
        self.persist_or_warn();

        info!("event=hall_resized rows={rows} cols={cols} orphaned={orphaned}");
        self.debug_check();

        Ok(ResizeOutcome::Resized {
            rows,
            cols,
            orphaned,
        })
    }

    /// Seats `roll` in the first free seat, scanning row 0 first and columns ascending.
    ///
    /// # Errors
    ///
    /// [`SeatError::NoHallConfigured`], [`SeatError::InvalidRoll`],
    /// [`SeatError::DuplicateRoll`], or [`SeatError::HallFull`]. The hall is
    /// unchanged on any of these.
    pub fn allocate(&mut self, roll: Roll, name: &str) -> Result<(i32, i32), SeatError> {
        if !self.state.has_dimensions() {
            return Err(SeatError::NoHallConfigured);
        }
        self.ensure_grid()?;

        let (row, col) = self.state.place(roll, name)?;
        self.persist_or_warn();
        self.emit(SeatEvent::allocated(roll, row, col));

        info!("event=seat_allocated roll={roll} row={row} col={col}");
        self.debug_check();
        Ok((row, col))
    }

    /// Removes `roll` and frees its seat, returning the position it was recorded at.
    ///
    /// # Errors
    ///
    /// [`SeatError::RollNotFound`]; the hall is unchanged.
    pub fn deallocate(&mut self, roll: Roll) -> Result<(i32, i32), SeatError> {
        let (row, col) = self.state.vacate(roll)?;
        self.persist_or_warn();
        self.emit(SeatEvent::deallocated(roll, row, col));

        info!("event=seat_deallocated roll={roll} row={row} col={col}");
        self.debug_check();
        Ok((row, col))
    }

    #[must_use]
    pub fn find(&self, roll: Roll) -> Option<&Student> {
        self.state.find(roll)
    }

    #[must_use]
    pub fn find_occupant(&self, row: i32, col: i32) -> Option<Roll> {
        self.state.find_occupant(row, col)
    }

    #[must_use]
    pub fn current_state(&self) -> HallSnapshot {
        self.state.snapshot()
    }

    #[must_use]
    pub fn state(&self) -> &HallState {
        &self.state
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    #[must_use]
    pub fn events(&self) -> &E {
        &self.events
    }

    /// Gives up the ports and keeps the hall.
    #[must_use]
    pub fn into_state(self) -> HallState {
        self.state
    }

    pub fn into_parts(self) -> (HallState, S, E) {
        (self.state, self.store, self.events)
    }

    /// Writes the current state to the store.
    pub fn persist(&mut self) -> io::Result<()> {
        let bytes = codec::encode(self.state.rows(), self.state.cols(), self.state.roster());
        self.store.save(&bytes)
    }

    fn persist_or_warn(&mut self) {
        if let Err(err) = self.persist() {
            warn!("event=persist_failed error=\"{err}\"");
        }
    }

    fn emit(&mut self, event: SeatEvent) {
        if let Err(err) = self.events.record(&event) {
            warn!(
                "event=event_log_failed action={} roll={} error=\"{err}\"",
                event.action.as_str(),
                event.roll
            );
        }
    }

    fn debug_check(&self) {
        debug_assert_eq!(self.state.consistency_violation(), None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MemoryStore, RecordingEvents, SeatAction};

    fn hall() -> SeatHall<MemoryStore, RecordingEvents> {
        SeatHall::new(MemoryStore::new(), RecordingEvents::new())
    }

    #[test]
    fn allocate_persists_and_records_event() {
        let mut hall = hall();
        hall.resize(1, 2).expect("resize");

        assert_eq!(hall.allocate(4, "Dana"), Ok((0, 0)));
        assert_eq!(hall.store().saves(), 2);
        assert_eq!(hall.events().events(), &[SeatEvent::allocated(4, 0, 0)]);
    }

    #[test]
    fn failed_operations_do_not_persist_or_emit() {
        let mut hall = hall();
        assert_eq!(hall.allocate(1, "a"), Err(SeatError::NoHallConfigured));
        assert_eq!(hall.deallocate(1), Err(SeatError::RollNotFound { roll: 1 }));
        assert_eq!(hall.store().saves(), 0);
        assert!(hall.events().events().is_empty());
    }

    #[test]
    fn unwritable_store_does_not_fail_the_operation() {
        let mut hall = SeatHall::new(MemoryStore::read_only(None), RecordingEvents::new());
        hall.resize(1, 1).expect("resize still applies");

        assert_eq!(hall.allocate(2, "b"), Ok((0, 0)));
        assert_eq!(hall.find(2).map(|s| s.position()), Some((0, 0)));
        assert!(hall.store().bytes().is_none());
        assert_eq!(hall.events().events()[0].action, SeatAction::Allocated);
    }

    #[test]
    fn resize_ignores_non_positive_and_identical_dimensions() {
        let mut hall = hall();
        assert_eq!(hall.resize(0, 3), Ok(ResizeOutcome::Unchanged));
        assert_eq!(hall.resize(3, -1), Ok(ResizeOutcome::Unchanged));
        assert_eq!(
            hall.resize(2, 3),
            Ok(ResizeOutcome::Resized {
                rows: 2,
                cols: 3,
                orphaned: 0
            })
        );
        assert_eq!(hall.resize(2, 3), Ok(ResizeOutcome::Unchanged));
        assert_eq!(hall.store().saves(), 1);
    }

    #[test]
    fn into_state_keeps_the_roster() {
        let mut hall = hall();
        hall.resize(1, 1).expect("resize");
        hall.allocate(8, "h").expect("allocate");

        let state = hall.into_state();
        assert_eq!(state.find(8).map(Student::position), Some((0, 0)));
    }

    #[test]
    fn oversized_resize_resets_everything() {
        let mut hall = hall();
        hall.resize(2, 2).expect("resize");
        hall.allocate(1, "a").expect("allocate");

        let err = hall.resize(101, 2).expect_err("too many rows");
        assert_eq!(err, SeatError::DimensionsOutOfBounds { rows: 101, cols: 2 });
        assert!(err.is_reset());
        assert_eq!(hall.state(), &HallState::empty());
        assert!(hall.store().bytes().is_none());
    }
}
