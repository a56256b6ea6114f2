use std::fs;
use std::path::Path;

use seat_cgi::{serve, EnvConfig};
use seat_store::EventLog;
use tempfile::TempDir;

fn config_in(dir: &Path) -> EnvConfig {
    EnvConfig {
        data_file: dir.join("students.dat"),
        event_log: dir.join("allocation_log.jsonl"),
        log_filter: None,
    }
}

#[test]
fn hall_survives_between_invocations() {
    let temp = TempDir::new().expect("tempdir");
    let config = config_in(temp.path());

    let page = serve(&config, "action=allocate&rows=2&cols=3&roll=7&name=Priya");
    assert!(page.contains("Hall dimensions updated. Allocated Priya (7) at (0, 0)"));
    assert!(config.data_file.exists());

    let page = serve(&config, "action=hall");
    assert!(page.contains("<h3>Hall (2 x 3)</h3>"));
    assert!(page.contains("<div class='seat occupied'>Priya<br>7</div>"));

    let page = serve(&config, "action=search&roll=7");
    assert!(page.contains("Found: Priya (Roll 7) at Row 0, Col 0"));
}

#[test]
fn log_view_shows_allocations_in_order() {
    let temp = TempDir::new().expect("tempdir");
    let config = config_in(temp.path());

    let page = serve(&config, "action=log");
    assert!(page.contains("Log empty!"));

    serve(&config, "action=allocate&rows=1&cols=2&roll=1&name=a");
    serve(&config, "action=deallocate&roll=1");

    let records = EventLog::new(&config.event_log)
        .read_all()
        .expect("read log");
    assert_eq!(records.len(), 2);

    let page = serve(&config, "action=log");
    let allocated = page.find("ALLOCATED: Roll=1 at (0,0)").expect("allocated line");
    let deallocated = page.find("DEALLOCATED: Roll=1 at (0,0)").expect("deallocated line");
    assert!(allocated < deallocated);
}

#[test]
fn corrupt_state_file_is_reported_and_removed() {
    let temp = TempDir::new().expect("tempdir");
    let config = config_in(temp.path());
    fs::write(&config.data_file, [1, 2, 3]).expect("write garbage");

    let page = serve(&config, "action=hall");
    assert!(page.contains("System Reset: Corrupt data detected in file"));
    assert!(page.contains("Hall not initialized"));
    assert!(!config.data_file.exists());

    let page = serve(&config, "action=hall");
    assert!(!page.contains("System Reset"));
}

#[test]
fn names_are_escaped_in_the_page() {
    let temp = TempDir::new().expect("tempdir");
    let config = config_in(temp.path());

    serve(&config, "action=allocate&rows=1&cols=1&roll=2&name=%3Cscript%3E");
    let page = serve(&config, "action=hall");
    assert!(page.contains("&lt;script&gt;"));
    assert!(!page.contains("<script>"));
}
