//! Ports the engine talks to: where the state image lives and where events go.
//!
//! File-backed implementations live in the `seat_store` crate. The in-memory
//! ones here back tests and embedders that do not need durability.

use std::io;

use crate::model::Roll;

/// Durable home of the encoded hall state.
pub trait StateStore {
    /// Returns the stored image, or `None` when nothing has been stored yet.
    fn load(&mut self) -> io::Result<Option<Vec<u8>>>;

    /// Replaces the stored image.
    fn save(&mut self, bytes: &[u8]) -> io::Result<()>;

    /// Deletes the stored image. Deleting an absent image succeeds.
    fn discard(&mut self) -> io::Result<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeatAction {
    Allocated,
    Deallocated,
}

impl SeatAction {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Allocated => "ALLOCATED",
            Self::Deallocated => "DEALLOCATED",
        }
    }
}

/// One allocation or deallocation. The sink stamps the time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeatEvent {
    pub action: SeatAction,
    pub roll: Roll,
    pub row: i32,
    pub col: i32,
}

impl SeatEvent {
    #[must_use]
    pub fn allocated(roll: Roll, row: i32, col: i32) -> Self {
        Self {
            action: SeatAction::Allocated,
            roll,
            row,
            col,
        }
    }

    #[must_use]
    pub fn deallocated(roll: Roll, row: i32, col: i32) -> Self {
        Self {
            action: SeatAction::Deallocated,
            roll,
            row,
            col,
        }
    }
}

/// Append-only receiver of [`SeatEvent`]s. The engine never reads events back.
pub trait EventSink {
    fn record(&mut self, event: &SeatEvent) -> io::Result<()>;
}

/// Keeps the state image in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    bytes: Option<Vec<u8>>,
    reject_writes: bool,
    saves: usize,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with an image, as if a previous run had written it.
    #[must_use]
    pub fn with_bytes(bytes: Vec<u8>) -> Self {
        Self {
            bytes: Some(bytes),
            ..Self::default()
        }
    }

    /// Store whose `save` always fails, like an unwritable state file.
    #[must_use]
    pub fn read_only(bytes: Option<Vec<u8>>) -> Self {
        Self {
            bytes,
            reject_writes: true,
            saves: 0,
        }
    }

    #[must_use]
    pub fn bytes(&self) -> Option<&[u8]> {
        self.bytes.as_deref()
    }

    /// Number of successful saves.
    #[must_use]
    pub fn saves(&self) -> usize {
        self.saves
    }
}

impl StateStore for MemoryStore {
    fn load(&mut self) -> io::Result<Option<Vec<u8>>> {
        Ok(self.bytes.clone())
    }

    fn save(&mut self, bytes: &[u8]) -> io::Result<()> {
        if self.reject_writes {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                "memory store is read-only",
            ));
        }
        self.bytes = Some(bytes.to_vec());
        self.saves += 1;
        Ok(())
    }

    fn discard(&mut self) -> io::Result<()> {
        self.bytes = None;
        Ok(())
    }
}

/// Collects events in order.
#[derive(Debug, Clone, Default)]
pub struct RecordingEvents {
    events: Vec<SeatEvent>,
}

impl RecordingEvents {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn events(&self) -> &[SeatEvent] {
        &self.events
    }
}

impl EventSink for RecordingEvents {
    fn record(&mut self, event: &SeatEvent) -> io::Result<()> {
        self.events.push(*event);
        Ok(())
    }
}
