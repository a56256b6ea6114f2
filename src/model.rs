//! Record shapes and containers: [`Student`], [`Seat`], [`Roster`], [`Grid`].

use unicode_segmentation::UnicodeSegmentation;

/// Student identifier. Mirrors the int32 field of the state file.
pub type Roll = i32;

/// Largest accepted row count.
pub const MAX_ROWS: usize = 100;
/// Largest accepted column count.
pub const MAX_COLS: usize = 100;
/// Largest roster the state file may declare.
pub const MAX_STUDENTS: usize = 500;
/// Longest stored name in bytes; the on-disk field reserves one more byte for a terminator.
pub const NAME_MAX_BYTES: usize = 49;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Student {
    pub roll: Roll,
    pub name: String,
    /// Last seat the student was given. Stays as-is when a resize leaves it out of bounds.
    pub row: i32,
    pub col: i32,
}

impl Student {
    #[must_use]
    pub fn new(roll: Roll, name: impl Into<String>, row: i32, col: i32) -> Self {
        Self {
            roll,
            name: name.into(),
            row,
            col,
        }
    }

    #[must_use]
    pub fn position(&self) -> (i32, i32) {
        (self.row, self.col)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Seat {
    pub occupied: bool,
    /// Occupant roll; `0` when the seat is free.
    pub roll: Roll,
}

impl Seat {
    pub const FREE: Seat = Seat {
        occupied: false,
        roll: 0,
    };

    #[must_use]
    pub fn taken_by(roll: Roll) -> Self {
        Self {
            occupied: true,
            roll,
        }
    }

    #[must_use]
    pub fn occupant(&self) -> Option<Roll> {
        self.occupied.then_some(self.roll)
    }
}

/// Students in allocation order. Rolls are unique.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Roster {
    students: Vec<Student>,
}

impl Roster {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.students.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.students.is_empty()
    }

    #[must_use]
    pub fn find(&self, roll: Roll) -> Option<&Student> {
        self.students.iter().find(|student| student.roll == roll)
    }

    #[must_use]
    pub fn contains(&self, roll: Roll) -> bool {
        self.find(roll).is_some()
    }

    pub fn push(&mut self, student: Student) {
        self.students.push(student);
    }

    /// Removes the entry for `roll`, keeping the order of the survivors.
    pub fn remove(&mut self, roll: Roll) -> Option<Student> {
        let index = self
            .students
            .iter()
            .position(|student| student.roll == roll)?;
        Some(self.students.remove(index))
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Student> {
        self.students.iter()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Student] {
        &self.students
    }

    pub fn clear(&mut self) {
        self.students.clear();
    }
}

impl From<Vec<Student>> for Roster {
    fn from(students: Vec<Student>) -> Self {
        Self { students }
    }
}

impl<'a> IntoIterator for &'a Roster {
    type Item = &'a Student;
    type IntoIter = std::slice::Iter<'a, Student>;

    fn into_iter(self) -> Self::IntoIter {
        self.students.iter()
    }
}

/// Row-major seat matrix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    seats: Vec<Seat>,
}

impl Grid {
    /// Builds a grid with every seat free. Callers validate the dimensions.
    #[must_use]
    pub(crate) fn empty(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            seats: vec![Seat::FREE; rows * cols],
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
    pub fn contains(&self, row: i32, col: i32) -> bool {
        self.index(row, col).is_some()
    }

    #[must_use]
    pub fn get(&self, row: i32, col: i32) -> Option<&Seat> {
        self.index(row, col).map(|index| &self.seats[index])
    }

    pub(crate) fn set(&mut self, row: i32, col: i32, seat: Seat) -> bool {
        match self.index(row, col) {
            Some(index) => {
                self.seats[index] = seat;
                true
            }
            None => false,
        }
    }

    pub(crate) fn clear(&mut self) {
        self.seats.fill(Seat::FREE);
    }

    /// First free seat scanning row 0 first, columns ascending.
    #[must_use]
    pub fn first_free(&self) -> Option<(i32, i32)> {
        let index = self.seats.iter().position(|seat| !seat.occupied)?;
        Some(((index / self.cols) as i32, (index % self.cols) as i32))
    }

    /// Seats of one row, left to right. `None` past the last row.
    #[must_use]
    pub fn row(&self, row: usize) -> Option<&[Seat]> {
        if row >= self.rows {
            return None;
        }
        let start = row * self.cols;
        Some(&self.seats[start..start + self.cols])
    }

    #[must_use]
    pub fn seats(&self) -> &[Seat] {
        &self.seats
    }

    #[must_use]
    pub fn occupied_count(&self) -> usize {
        self.seats.iter().filter(|seat| seat.occupied).count()
    }

    fn index(&self, row: i32, col: i32) -> Option<usize> {
        let row = usize::try_from(row).ok()?;
        let col = usize::try_from(col).ok()?;
        (row < self.rows && col < self.cols).then(|| row * self.cols + col)
    }
}

/// Read-only copy of the hall handed to renderers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HallSnapshot {
    pub rows: usize,
    pub cols: usize,
    pub grid: Option<Grid>,
    pub roster: Vec<Student>,
}

impl HallSnapshot {
    #[must_use]
    pub fn occupant(&self, row: i32, col: i32) -> Option<&Student> {
        let roll = self.grid.as_ref()?.get(row, col)?.occupant()?;
        self.roster.iter().find(|student| student.roll == roll)
    }
}

/// Cuts `name` to at most [`NAME_MAX_BYTES`] bytes without splitting a grapheme cluster.
#[must_use]
pub fn truncate_name(name: &str) -> String {
    if name.len() <= NAME_MAX_BYTES {
        return name.to_string();
    }

    let mut out = String::with_capacity(NAME_MAX_BYTES);
    for grapheme in name.graphemes(true) {
        if out.len() + grapheme.len() > NAME_MAX_BYTES {
            break;
        }
        out.push_str(grapheme);
    }
    out
}
