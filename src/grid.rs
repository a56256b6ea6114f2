//! Grid lifecycle: allocating the seat grid and rebuilding occupancy from the roster.

use log::warn;

use crate::error::SeatError;
use crate::model::{Grid, Seat, MAX_COLS, MAX_ROWS};
use crate::state::HallState;

impl HallState {
    /// Allocates an all-free grid for the current dimensions.
    ///
    /// No-op when a grid already exists or when either dimension is zero.
    /// Oversized dimensions are reported and left for the caller to reset.
    pub fn ensure_grid(&mut self) -> Result<(), SeatError> {
        if self.grid.is_some() || !self.has_dimensions() {
            return Ok(());
        }
        if self.rows > MAX_ROWS || self.cols > MAX_COLS {
            return Err(SeatError::DimensionsOutOfBounds {
                rows: self.rows,
                cols: self.cols,
            });
        }

        self.grid = Some(Grid::empty(self.rows, self.cols));
        Ok(())
    }

    /// Switches to new dimensions and discards the grid. The roster is kept as-is.
    pub(crate) fn reshape(&mut self, rows: usize, cols: usize) {
        self.rows = rows;
        self.cols = cols;
        self.grid = None;
    }

    /// Re-derives every seat from the roster, in roster order.
    ///
    /// Students outside the grid stay in the roster with their old position.
    /// Returns how many students were left without a seat.
    pub fn rebuild(&mut self) -> usize {
        let Some(grid) = self.grid.as_mut() else {
            return self.roster.len();
        };

        grid.clear();

        let mut orphaned = 0;
        for student in &self.roster {
            match grid.get(student.row, student.col).copied() {
                Some(seat) if seat.occupied => {
                    warn!(
                        "event=seat_clash roll={} row={} col={} holder={}",
                        student.roll, student.row, student.col, seat.roll
                    );
                    orphaned += 1;
                }
                Some(_) => {
                    grid.set(student.row, student.col, Seat::taken_by(student.roll));
                }
                None => orphaned += 1,
            }
        }

        orphaned
    }
}
