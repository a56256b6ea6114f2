use std::ffi::OsString;
use std::path::{Path, PathBuf};

pub const DEFAULT_STATE_FILE: &str = "students.dat";
pub const DEFAULT_EVENT_LOG: &str = "allocation_log.jsonl";

#[must_use]
pub fn state_file_path(dir: &Path) -> PathBuf {
    dir.join(DEFAULT_STATE_FILE)
}

#[must_use]
pub fn event_log_path(dir: &Path) -> PathBuf {
    dir.join(DEFAULT_EVENT_LOG)
}

/// Sibling `{path}.tmp` used while a new state image is being written.
#[must_use]
pub fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".tmp");
    PathBuf::from(name)
}
