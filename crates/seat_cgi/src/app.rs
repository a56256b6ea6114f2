//! One invocation: load the hall, apply the request, describe the result.

use seat_hall::{
    EventSink, HallSnapshot, LoadOutcome, ResizeOutcome, SeatError, SeatHall, StateStore, Student,
};
use seat_store::{EventRecord, SeatStoreError};

use crate::request::{Action, Request};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchResult {
    Found(Student),
    NotFound,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogView {
    Empty,
    Records(Vec<EventRecord>),
    Unreadable(String),
}

/// Everything the renderer needs for one response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub action: Option<Action>,
    /// Reasons the hall was wiped during this invocation.
    pub resets: Vec<String>,
    pub message: String,
    pub hall: HallSnapshot,
    pub search: Option<SearchResult>,
    pub log: Option<LogView>,
}

/// Applies the resize and the allocate/deallocate carried by `request`.
///
/// Returns the reset notices and the result message.
pub fn apply<S: StateStore, E: EventSink>(
    hall: &mut SeatHall<S, E>,
    loaded: &LoadOutcome,
    request: &Request,
) -> (Vec<String>, String) {
    let mut resets = Vec::new();
    let mut message = String::new();

    if let LoadOutcome::Reset(err) = loaded {
        resets.push(reset_reason(err));
    }

    let rows = request.rows.unwrap_or(hall.state().rows() as i32);
    let cols = request.cols.unwrap_or(hall.state().cols() as i32);
    match hall.resize(rows, cols) {
        Ok(ResizeOutcome::Resized { .. }) => message.push_str("Hall dimensions updated. "),
        Ok(ResizeOutcome::Unchanged) => {}
        Err(err) => resets.push(reset_reason(&err)),
    }

    let Some(roll) = request.positive_roll() else {
        return (resets, message);
    };

    let result = match request.action {
        Some(Action::Allocate) => Some(hall.allocate(roll, &request.name).map(|(row, col)| {
            let name = hall.find(roll).map_or(request.name.as_str(), |s| s.name.as_str());
            format!("Allocated {name} ({roll}) at ({row}, {col})")
        })),
        Some(Action::Deallocate) => Some(
            hall.deallocate(roll)
                .map(|(row, col)| format!("Deallocated Roll {roll} from ({row}, {col}).")),
        ),
        _ => None,
    };

    match result {
        Some(Ok(text)) => message.push_str(&text),
        Some(Err(err)) if err.is_reset() => resets.push(reset_reason(&err)),
        Some(Err(err)) => message.push_str(&operation_message(&err)),
        None => {}
    }

    (resets, message)
}

/// Assembles the page after [`apply`]. `read_log` is only called for the log view.
pub fn build_page<S, E, F>(
    hall: &SeatHall<S, E>,
    request: &Request,
    resets: Vec<String>,
    message: String,
    read_log: F,
) -> Page
where
    S: StateStore,
    E: EventSink,
    F: FnOnce() -> Result<Vec<EventRecord>, SeatStoreError>,
{
    let search = match (request.action, request.roll) {
        (Some(Action::Search), Some(roll)) => Some(match hall.find(roll) {
            Some(student) => SearchResult::Found(student.clone()),
            None => SearchResult::NotFound,
        }),
        _ => None,
    };

    let log = (request.action == Some(Action::Log)).then(|| match read_log() {
        Ok(records) if records.is_empty() => LogView::Empty,
        Ok(records) => LogView::Records(records),
        Err(err) => LogView::Unreadable(err.to_string()),
    });

    Page {
        action: request.action,
        resets,
        message,
        hall: hall.current_state(),
        search,
        log,
    }
}

#[must_use]
pub fn operation_message(err: &SeatError) -> String {
    match err {
        SeatError::NoHallConfigured => "Please set Rows and Columns first.".to_string(),
        SeatError::DuplicateRoll { roll } => format!("Roll {roll} is already allocated!"),
        SeatError::HallFull => "Hall is full! Increase rows/cols to add more.".to_string(),
        SeatError::RollNotFound { .. } => "Roll number not found!".to_string(),
        other => other.to_string(),
    }
}

fn reset_reason(err: &SeatError) -> String {
    match err {
        SeatError::DimensionsOutOfBounds { rows, cols } => {
            format!("Dimensions {rows}x{cols} too large. Starting fresh.")
        }
        SeatError::CorruptPersistedState { reason } => {
            format!("Corrupt data detected in file ({reason}). Starting fresh.")
        }
        other => other.to_string(),
    }
}
