//! Binary state file codec.
//!
//! Layout (little-endian, fixed width):
//!
//! ```text
//! [0..4]   rows  (i32)
//! [4..8]   cols  (i32)
//! [8..12]  count (i32)
//! then `count` records of 64 bytes:
//!   [0..4]    roll (i32)
//!   [4..54]   name (50 bytes, NUL padded)
//!   [54..56]  padding (zero)
//!   [56..60]  row  (i32)
//!   [60..64]  col  (i32)
//! ```
//!
//! Decoding never trusts occupancy: it yields dimensions and a roster, and the
//! grid is rebuilt from the roster by the caller.

use std::collections::HashSet;

use crate::error::SeatError;
use crate::model::{
    truncate_name, Roll, Roster, Student, MAX_COLS, MAX_ROWS, MAX_STUDENTS,
};

pub const HEADER_LEN: usize = 12;
pub const NAME_FIELD_LEN: usize = 50;
const NAME_PADDING_LEN: usize = 2;
pub const RECORD_LEN: usize = 4 + NAME_FIELD_LEN + NAME_PADDING_LEN + 4 + 4;

/// State recovered from a state file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded {
    pub rows: usize,
    pub cols: usize,
    pub roster: Roster,
    /// `count` as written in the header; larger than `roster.len()` when the file was cut short.
    pub declared_count: usize,
}

impl Decoded {
    #[must_use]
    pub fn was_truncated(&self) -> bool {
        self.declared_count > self.roster.len()
    }
}

#[must_use]
pub fn encode(rows: usize, cols: usize, roster: &Roster) -> Vec<u8> {
    let mut out = Vec::with_capacity(HEADER_LEN + roster.len() * RECORD_LEN);
    out.extend_from_slice(&(rows as i32).to_le_bytes());
    out.extend_from_slice(&(cols as i32).to_le_bytes());
    out.extend_from_slice(&(roster.len() as i32).to_le_bytes());

    for student in roster {
        out.extend_from_slice(&student.roll.to_le_bytes());

        let mut name = [0u8; NAME_FIELD_LEN];
        let stored = truncate_name(&student.name);
        name[..stored.len()].copy_from_slice(stored.as_bytes());
        out.extend_from_slice(&name);
        out.extend_from_slice(&[0u8; NAME_PADDING_LEN]);

        out.extend_from_slice(&student.row.to_le_bytes());
        out.extend_from_slice(&student.col.to_le_bytes());
    }

    out
}

/// Parses a state file image.
///
/// # Errors
///
/// Returns [`SeatError::CorruptPersistedState`] when the header is short or out of
/// bounds, or when the records contradict each other (non-positive or repeated
/// rolls, two students recorded at one seat).
pub fn decode(bytes: &[u8]) -> Result<Decoded, SeatError> {
    if bytes.len() < HEADER_LEN {
        return Err(SeatError::corrupt(format!(
            "file is {} bytes, shorter than the {HEADER_LEN}-byte header",
            bytes.len()
        )));
    }

    let rows = read_i32(bytes, 0);
    let cols = read_i32(bytes, 4);
    let count = read_i32(bytes, 8);

    let rows = checked_bound("rows", rows, MAX_ROWS)?;
    let cols = checked_bound("cols", cols, MAX_COLS)?;
    let declared_count = checked_bound("count", count, MAX_STUDENTS)?;

    let students = bytes[HEADER_LEN..]
        .chunks_exact(RECORD_LEN)
        .take(declared_count)
        .map(decode_record)
        .collect::<Vec<_>>();

    check_integrity(&students)?;

    Ok(Decoded {
        rows,
        cols,
        roster: Roster::from(students),
        declared_count,
    })
}

fn decode_record(record: &[u8]) -> Student {
    let roll = read_i32(record, 0);
    let field = &record[4..4 + NAME_FIELD_LEN];
    let end = field.iter().position(|&b| b == 0).unwrap_or(field.len());
    let name = truncate_name(&String::from_utf8_lossy(&field[..end]));
    let row = read_i32(record, 4 + NAME_FIELD_LEN + NAME_PADDING_LEN);
    let col = read_i32(record, 8 + NAME_FIELD_LEN + NAME_PADDING_LEN);
    Student::new(roll, name, row, col)
}

fn check_integrity(students: &[Student]) -> Result<(), SeatError> {
    let mut rolls: HashSet<Roll> = HashSet::with_capacity(students.len());
    let mut seats: HashSet<(i32, i32)> = HashSet::with_capacity(students.len());

    for (index, student) in students.iter().enumerate() {
        if student.roll <= 0 {
            return Err(SeatError::corrupt(format!(
                "record {index} has non-positive roll {}",
                student.roll
            )));
        }
        if !rolls.insert(student.roll) {
            return Err(SeatError::corrupt(format!(
                "record {index} repeats roll {}",
                student.roll
            )));
        }
        // Orphans included: growing the hall would seat both.
        if !seats.insert(student.position()) {
            return Err(SeatError::corrupt(format!(
                "record {index} (roll {}) repeats seat ({}, {})",
                student.roll, student.row, student.col
            )));
        }
    }

    Ok(())
}

fn checked_bound(field: &str, value: i32, max: usize) -> Result<usize, SeatError> {
    match usize::try_from(value) {
        Ok(value) if value <= max => Ok(value),
        _ => Err(SeatError::corrupt(format!(
            "{field} {value} outside 0..={max}"
        ))),
    }
}

fn read_i32(bytes: &[u8], offset: usize) -> i32 {
    let mut word = [0u8; 4];
    word.copy_from_slice(&bytes[offset..offset + 4]);
    i32::from_le_bytes(word)
}
