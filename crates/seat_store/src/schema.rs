use seat_hall::{Roll, SeatAction, SeatEvent};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventAction {
    Allocated,
    Deallocated,
}

impl From<SeatAction> for EventAction {
    fn from(action: SeatAction) -> Self {
        match action {
            SeatAction::Allocated => Self::Allocated,
            SeatAction::Deallocated => Self::Deallocated,
        }
    }
}

/// One line of the event log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EventRecord {
    pub ts: String,
    pub action: EventAction,
    pub roll: Roll,
    pub row: i32,
    pub col: i32,
}

impl EventRecord {
    #[must_use]
    pub fn new(ts: impl Into<String>, event: &SeatEvent) -> Self {
        Self {
            ts: ts.into(),
            action: event.action.into(),
            roll: event.roll,
            row: event.row,
            col: event.col,
        }
    }
}
