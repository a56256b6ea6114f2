use std::fs::{self, File};
use std::io::Write;
use std::path::PathBuf;

use seat_hall::codec;
use seat_hall::{EventSink, LoadOutcome, SeatEvent, SeatHall, StateStore};
use seat_store::{
    event_log_path, state_file_path, temp_path_for, EventAction, EventLog, EventRecord,
    SeatStoreError, StateFile,
};
use serde_json::json;
use tempfile::TempDir;

fn write_log_file(lines: &[String]) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("tempdir should be created");
    let path = event_log_path(dir.path());
    let mut file = File::create(&path).expect("log file should be created");

    for line in lines {
        writeln!(file, "{line}").expect("line should be written");
    }

    (dir, path)
}

fn event_line(ts: &str, action: &str, roll: i32) -> String {
    json!({
        "ts": ts,
        "action": action,
        "roll": roll,
        "row": 0,
        "col": 1,
    })
    .to_string()
}

#[test]
fn state_file_reads_none_when_missing() {
    let dir = tempfile::tempdir().expect("tempdir should be created");
    let mut file = StateFile::new(state_file_path(dir.path()));

    assert_eq!(file.load().expect("missing file is not an error"), None);
    file.discard().expect("discarding a missing file succeeds");
}

#[test]
fn state_file_save_replaces_contents_without_leaving_temp() {
    let dir = tempfile::tempdir().expect("tempdir should be created");
    let path = state_file_path(dir.path());
    let mut file = StateFile::new(&path);

    file.save(b"first").expect("first save should succeed");
    file.save(b"second").expect("second save should succeed");

    assert_eq!(fs::read(&path).expect("file exists"), b"second");
    assert!(!temp_path_for(&path).exists());
}

#[test]
fn state_file_save_creates_missing_parent_dirs() {
    let dir = tempfile::tempdir().expect("tempdir should be created");
    let path = dir.path().join("nested").join("hall").join("students.dat");
    let mut file = StateFile::new(&path);

    file.save(b"data").expect("save should create parents");
    assert_eq!(fs::read(&path).expect("file exists"), b"data");
}

#[test]
fn state_file_save_survives_stale_temp_file() {
    let dir = tempfile::tempdir().expect("tempdir should be created");
    let path = state_file_path(dir.path());
    fs::write(temp_path_for(&path), b"partial garbage").expect("stale temp written");

    let mut file = StateFile::new(&path);
    file.save(b"fresh").expect("save should succeed");

    assert_eq!(fs::read(&path).expect("file exists"), b"fresh");
    assert!(!temp_path_for(&path).exists());
}

#[test]
fn state_file_read_error_carries_path() {
    let dir = tempfile::tempdir().expect("tempdir should be created");
    // A directory where the file should be cannot be read as a file.
    let path = state_file_path(dir.path());
    fs::create_dir(&path).expect("directory created");

    let error = StateFile::new(&path).read().expect_err("reading a dir must fail");
    assert!(matches!(error, SeatStoreError::Io { path: ref p, .. } if *p == path));
}

#[test]
fn corrupt_state_file_is_deleted_on_load() {
    let dir = tempfile::tempdir().expect("tempdir should be created");
    let path = state_file_path(dir.path());
    let mut bytes = Vec::new();
    for value in [9999i32, 3, 0] {
        bytes.extend_from_slice(&value.to_le_bytes());
    }
    fs::write(&path, bytes).expect("corrupt image written");

    let (hall, outcome) = SeatHall::load(
        StateFile::new(&path),
        EventLog::new(event_log_path(dir.path())),
    );

    assert!(matches!(outcome, LoadOutcome::Reset(_)));
    assert_eq!(hall.state().rows(), 0);
    assert!(!path.exists());
}

#[test]
fn hall_state_survives_a_process_restart() {
    let dir = tempfile::tempdir().expect("tempdir should be created");
    let state_path = state_file_path(dir.path());
    let log_path = event_log_path(dir.path());

    {
        let (mut hall, outcome) =
            SeatHall::load(StateFile::new(&state_path), EventLog::new(&log_path));
        assert_eq!(outcome, LoadOutcome::Fresh);
        hall.resize(2, 3).expect("in bounds");
        hall.allocate(101, "Rivera").expect("free seat");
        hall.allocate(102, "Okafor").expect("free seat");
        hall.deallocate(101).expect("present");
    }

    let (hall, outcome) = SeatHall::load(StateFile::new(&state_path), EventLog::new(&log_path));
    assert!(matches!(outcome, LoadOutcome::Loaded { students: 1, .. }));
    assert_eq!((hall.state().rows(), hall.state().cols()), (2, 3));
    assert_eq!(hall.find_occupant(0, 1), Some(102));
    assert_eq!(hall.find_occupant(0, 0), None);

    let decoded = codec::decode(&fs::read(&state_path).expect("state file")).expect("valid image");
    assert_eq!(decoded.roster.len(), 1);

    let actions: Vec<(EventAction, i32)> = EventLog::new(&log_path)
        .read_all()
        .expect("log should parse")
        .into_iter()
        .map(|record| (record.action, record.roll))
        .collect();
    assert_eq!(
        actions,
        vec![
            (EventAction::Allocated, 101),
            (EventAction::Allocated, 102),
            (EventAction::Deallocated, 101),
        ]
    );
}

#[test]
fn event_log_records_screaming_case_actions_with_timestamp() {
    let dir = tempfile::tempdir().expect("tempdir should be created");
    let path = event_log_path(dir.path());
    let mut log = EventLog::new(&path);

    log.record(&SeatEvent::allocated(7, 1, 2))
        .expect("record should succeed");

    let text = fs::read_to_string(&path).expect("log exists");
    let value: serde_json::Value =
        serde_json::from_str(text.trim_end()).expect("line is JSON");
    assert_eq!(value["action"], "ALLOCATED");
    assert_eq!(value["roll"], 7);
    assert_eq!(value["row"], 1);
    assert_eq!(value["col"], 2);
    assert!(value["ts"].as_str().is_some_and(|ts| ts.ends_with('Z')));
}

#[test]
fn event_log_reads_missing_file_as_empty() {
    let dir = tempfile::tempdir().expect("tempdir should be created");
    let log = EventLog::new(event_log_path(dir.path()));
    assert!(log.read_all().expect("missing log is empty").is_empty());
}

#[test]
fn event_log_skips_blank_lines() {
    let (_dir, path) = write_log_file(&[
        event_line("2026-10-18T09:00:00Z", "ALLOCATED", 1),
        String::new(),
        event_line("2026-10-18T09:05:00Z", "DEALLOCATED", 1),
    ]);

    let records = EventLog::new(&path).read_all().expect("log should parse");
    assert_eq!(
        records,
        vec![
            EventRecord {
                ts: "2026-10-18T09:00:00Z".to_string(),
                action: EventAction::Allocated,
                roll: 1,
                row: 0,
                col: 1,
            },
            EventRecord {
                ts: "2026-10-18T09:05:00Z".to_string(),
                action: EventAction::Deallocated,
                roll: 1,
                row: 0,
                col: 1,
            },
        ]
    );
}

#[test]
fn event_log_rejects_malformed_json_with_line_context() {
    let (_dir, path) = write_log_file(&[
        event_line("2026-10-18T09:00:00Z", "ALLOCATED", 1),
        "{ this is invalid json".to_string(),
    ]);

    let error = EventLog::new(&path)
        .read_all()
        .expect_err("malformed line must fail");
    assert!(matches!(
        error,
        SeatStoreError::JsonLineParse { line: 2, .. }
    ));
}

#[test]
fn event_log_rejects_unknown_fields_and_actions() {
    let (_dir, path) = write_log_file(&[json!({
        "ts": "2026-10-18T09:00:00Z",
        "action": "ALLOCATED",
        "roll": 1,
        "row": 0,
        "col": 0,
        "extra": true,
    })
    .to_string()]);
    let error = EventLog::new(&path).read_all().expect_err("extra field");
    assert!(matches!(error, SeatStoreError::JsonLineParse { line: 1, .. }));

    let (_dir, path) = write_log_file(&[event_line("2026-10-18T09:00:00Z", "MOVED", 1)]);
    let error = EventLog::new(&path).read_all().expect_err("unknown action");
    assert!(matches!(error, SeatStoreError::JsonLineParse { line: 1, .. }));
}

#[test]
fn event_log_rejects_invalid_timestamp() {
    let (_dir, path) = write_log_file(&[event_line("yesterday", "ALLOCATED", 1)]);

    let error = EventLog::new(&path)
        .read_all()
        .expect_err("invalid ts must fail");
    assert!(matches!(
        error,
        SeatStoreError::InvalidTimestamp { line: 1, ref value, .. } if value == "yesterday"
    ));
}

#[test]
fn state_store_port_saves_then_discards_idempotently() {
    let dir = tempfile::tempdir().expect("tempdir should be created");
    let path = state_file_path(dir.path());
    let mut store = StateFile::new(&path);

    StateStore::save(&mut store, &[1, 2, 3]).expect("save should succeed");
    assert_eq!(
        StateStore::load(&mut store).expect("load should succeed"),
        Some(vec![1, 2, 3])
    );

    StateStore::discard(&mut store).expect("discard should succeed");
    assert!(!path.exists());
    StateStore::discard(&mut store).expect("discarding a missing file is fine");
}
