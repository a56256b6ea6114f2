use std::fs::{File, OpenOptions};
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use log::debug;
use seat_hall::{EventSink, SeatEvent};
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

use crate::error::SeatStoreError;
use crate::schema::EventRecord;

/// Append-only JSONL log of allocations and deallocations.
#[derive(Debug, Clone)]
pub struct EventLog {
    path: PathBuf,
}

impl EventLog {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn append(&self, record: &EventRecord) -> Result<(), SeatStoreError> {
        let mut line = serde_json::to_string(record)
            .map_err(|source| SeatStoreError::json_serialize(&self.path, source))?;
        line.push('\n');

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|source| {
                SeatStoreError::io("opening event log for append", &self.path, source)
            })?;
        file.write_all(line.as_bytes())
            .map_err(|source| SeatStoreError::io("appending to event log", &self.path, source))
    }

    /// Parses every line in order. A missing log reads as empty.
    pub fn read_all(&self) -> Result<Vec<EventRecord>, SeatStoreError> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => {
                return Err(SeatStoreError::io("opening event log", &self.path, source));
            }
        };

        let mut records = Vec::new();
        for (line_index, line_result) in BufReader::new(file).lines().enumerate() {
            let line_number = line_index + 1;
            let line = line_result
                .map_err(|source| SeatStoreError::io_line(&self.path, line_number, source))?;
            if line.trim().is_empty() {
                continue;
            }

            let record = parse_event_line(&self.path, line_number, &line)?;
            validate_rfc3339(&self.path, line_number, &record.ts)?;
            records.push(record);
        }

        Ok(records)
    }
}

impl EventSink for EventLog {
    fn record(&mut self, event: &SeatEvent) -> io::Result<()> {
        let ts = now_rfc3339()?;
        self.append(&EventRecord::new(ts, event))
            .map_err(io::Error::from)?;
        debug!(
            "event=event_appended path={} action={} roll={}",
            self.path.display(),
            event.action.as_str(),
            event.roll
        );
        Ok(())
    }
}

pub fn now_rfc3339() -> Result<String, SeatStoreError> {
    OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .map_err(SeatStoreError::ClockFormat)
}

pub(crate) fn parse_event_line(
    path: &Path,
    line_number: usize,
    line: &str,
) -> Result<EventRecord, SeatStoreError> {
    serde_json::from_str::<EventRecord>(line)
        .map_err(|source| SeatStoreError::json_line(path, line_number, source))
}

pub(crate) fn validate_rfc3339(
    path: &Path,
    line_number: usize,
    value: &str,
) -> Result<(), SeatStoreError> {
    if OffsetDateTime::parse(value, &Rfc3339).is_err() {
        return Err(SeatStoreError::InvalidTimestamp {
            path: path.to_path_buf(),
            line: line_number,
            value: value.to_string(),
        });
    }

    Ok(())
}
