//! The in-memory hall: dimensions, the roster, and the derived seat grid.
//!
//! The roster is the source of truth. The grid is an occupancy index that is
//! rebuilt from the roster whenever the dimensions change and patched in place
//! by [`HallState::place`] and [`HallState::vacate`].

use crate::error::SeatError;
use crate::model::{
    truncate_name, Grid, HallSnapshot, Roll, Roster, Seat, Student, MAX_STUDENTS,
};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HallState {
    pub(crate) rows: usize,
    pub(crate) cols: usize,
    pub(crate) grid: Option<Grid>,
    pub(crate) roster: Roster,
}

impl HallState {
    /// No dimensions, no grid, no students.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// State with dimensions and roster but no grid yet; see [`HallState::ensure_grid`].
    #[must_use]
    pub fn from_parts(rows: usize, cols: usize, roster: Roster) -> Self {
        Self {
            rows,
            cols,
            grid: None,
            roster,
        }
    }

    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[must_use]
    pub fn grid(&self) -> Option<&Grid> {
        self.grid.as_ref()
    }

    #[must_use]
    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    #[must_use]
    pub fn has_dimensions(&self) -> bool {
        self.rows > 0 && self.cols > 0
    }

    #[must_use]
    pub fn find(&self, roll: Roll) -> Option<&Student> {
        self.roster.find(roll)
    }

    /// Roll seated at `(row, col)`, if any.
    #[must_use]
    pub fn find_occupant(&self, row: i32, col: i32) -> Option<Roll> {
        self.grid.as_ref()?.get(row, col)?.occupant()
    }

    /// Students whose recorded seat is outside the current grid.
    pub fn orphans(&self) -> impl Iterator<Item = &Student> + '_ {
        self.roster
            .iter()
            .filter(move |student| !self.in_bounds(student.row, student.col))
    }

    #[must_use]
    pub fn snapshot(&self) -> HallSnapshot {
        HallSnapshot {
            rows: self.rows,
            cols: self.cols,
            grid: self.grid.clone(),
            roster: self.roster.as_slice().to_vec(),
        }
    }

    /// Wipes everything back to [`HallState::empty`].
    pub fn clear(&mut self) {
        self.rows = 0;
        self.cols = 0;
        self.grid = None;
        self.roster.clear();
    }

    pub(crate) fn in_bounds(&self, row: i32, col: i32) -> bool {
        usize::try_from(row).is_ok_and(|row| row < self.rows)
            && usize::try_from(col).is_ok_and(|col| col < self.cols)
    }

    /// Seats a new student in the first free seat, row-major.
    ///
    /// The grid must already exist. Leaves the state untouched on error.
    pub(crate) fn place(&mut self, roll: Roll, name: &str) -> Result<(i32, i32), SeatError> {
        if !self.has_dimensions() {
            return Err(SeatError::NoHallConfigured);
        }
        if roll <= 0 {
            return Err(SeatError::InvalidRoll { roll });
        }
        if self.roster.contains(roll) {
            return Err(SeatError::DuplicateRoll { roll });
        }
        if self.roster.len() >= MAX_STUDENTS {
            return Err(SeatError::HallFull);
        }

        let grid = self.grid.as_mut().ok_or(SeatError::NoHallConfigured)?;
        let (row, col) = grid.first_free().ok_or(SeatError::HallFull)?;
        grid.set(row, col, Seat::taken_by(roll));
        self.roster
            .push(Student::new(roll, truncate_name(name), row, col));

        Ok((row, col))
    }

    /// Removes `roll` from the roster and frees its seat when it has one.
    ///
    /// Returns the recorded position even for orphaned students.
    pub(crate) fn vacate(&mut self, roll: Roll) -> Result<(i32, i32), SeatError> {
        let student = self
            .roster
            .remove(roll)
            .ok_or(SeatError::RollNotFound { roll })?;

        if let Some(grid) = self.grid.as_mut() {
            grid.set(student.row, student.col, Seat::FREE);
        }

        Ok(student.position())
    }

    /// Describes the first broken link between roster and grid, if any.
    ///
    /// Every in-bounds student must own its seat, and every occupied seat must
    /// point back to exactly one student recorded at that seat.
    #[must_use]
    pub fn consistency_violation(&self) -> Option<String> {
        let Some(grid) = self.grid.as_ref() else {
            return self
                .roster
                .iter()
                .find(|student| self.in_bounds(student.row, student.col))
                .map(|student| format!("roll {} has no grid to sit in", student.roll));
        };

        if (grid.rows(), grid.cols()) != (self.rows, self.cols) {
            return Some(format!(
                "grid is {}x{} but hall is {}x{}",
                grid.rows(),
                grid.cols(),
                self.rows,
                self.cols
            ));
        }

        for student in &self.roster {
            if let Some(seat) = grid.get(student.row, student.col) {
                if seat.occupant() != Some(student.roll) {
                    return Some(format!(
                        "roll {} recorded at ({}, {}) but seat holds {:?}",
                        student.roll,
                        student.row,
                        student.col,
                        seat.occupant()
                    ));
                }
            }
        }

        for row in 0..grid.rows() {
            let Some(seats) = grid.row(row) else {
                continue;
            };
            for (col, seat) in seats.iter().enumerate() {
                let Some(roll) = seat.occupant() else {
                    continue;
                };
                let owners = self
                    .roster
                    .iter()
                    .filter(|s| s.roll == roll && s.position() == (row as i32, col as i32))
                    .count();
                if owners != 1 {
                    return Some(format!(
                        "seat ({row}, {col}) holds roll {roll} with {owners} matching roster entries"
                    ));
                }
            }
        }

        None
    }
}
