//! File-backed ports for `seat_hall`: the binary state file and the JSONL event log.

mod error;
mod event_log;
mod paths;
mod schema;
mod state_file;

pub use error::SeatStoreError;
pub use event_log::{now_rfc3339, EventLog};
pub use paths::{
    event_log_path, state_file_path, temp_path_for, DEFAULT_EVENT_LOG, DEFAULT_STATE_FILE,
};
pub use schema::{EventAction, EventRecord};
pub use state_file::StateFile;
