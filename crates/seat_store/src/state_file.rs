//! State image on disk.
//!
//! Saves go through `{path}.tmp`: write, `sync_all`, then rename over the real
//! file. A crash mid-save leaves the previous image in place instead of a torn
//! one that would load as corrupt and wipe the hall.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use log::{debug, info};
use seat_hall::StateStore;

use crate::error::SeatStoreError;
use crate::paths::temp_path_for;

#[derive(Debug, Clone)]
pub struct StateFile {
    path: PathBuf,
}

impl StateFile {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the image, `None` when the file does not exist.
    pub fn read(&self) -> Result<Option<Vec<u8>>, SeatStoreError> {
        match fs::read(&self.path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(SeatStoreError::io("reading state file", &self.path, source)),
        }
    }

    pub fn write(&self, bytes: &[u8]) -> Result<(), SeatStoreError> {
        atomic_write(&self.path, bytes)
    }

    /// Deletes the image; an absent file is fine.
    pub fn remove(&self) -> Result<(), SeatStoreError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(SeatStoreError::io("removing state file", &self.path, source)),
        }
    }
}

impl StateStore for StateFile {
    fn load(&mut self) -> io::Result<Option<Vec<u8>>> {
        self.read().map_err(io::Error::from)
    }

    fn save(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.write(bytes).map_err(io::Error::from)?;
        debug!(
            "event=state_file_saved path={} bytes={}",
            self.path.display(),
            bytes.len()
        );
        Ok(())
    }

    fn discard(&mut self) -> io::Result<()> {
        self.remove().map_err(io::Error::from)?;
        info!("event=state_file_removed path={}", self.path.display());
        Ok(())
    }
}

pub(crate) fn atomic_write(path: &Path, data: &[u8]) -> Result<(), SeatStoreError> {
    let tmp_path = temp_path_for(path);

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|source| {
                SeatStoreError::io("creating state directory", parent, source)
            })?;
        }
    }

    let mut file = File::create(&tmp_path)
        .map_err(|source| SeatStoreError::io("creating temp state file", &tmp_path, source))?;
    file.write_all(data)
        .map_err(|source| SeatStoreError::io("writing temp state file", &tmp_path, source))?;
    file.sync_all()
        .map_err(|source| SeatStoreError::io("syncing temp state file", &tmp_path, source))?;

    fs::rename(&tmp_path, path)
        .map_err(|source| SeatStoreError::io("renaming temp state file", path, source))
}
