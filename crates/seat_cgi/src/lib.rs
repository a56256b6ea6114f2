//! CGI front end for the seat hall.
//!
//! Each invocation loads the state file, applies at most one resize and one
//! allocate/deallocate from `QUERY_STRING`, and answers with a full HTML page.

pub mod app;
pub mod config;
pub mod logging;
pub mod render;
pub mod request;

use log::debug;
use seat_hall::SeatHall;
use seat_store::{EventLog, StateFile};

pub use app::{apply, build_page, LogView, Page, SearchResult};
pub use config::EnvConfig;
pub use logging::init_logging;
pub use request::{Action, Request};

pub const CONTENT_TYPE_HEADER: &str = "Content-Type: text/html\n\n";

/// Handles one request against the files named in `config` and returns the page body.
pub fn serve(config: &EnvConfig, query: &str) -> String {
    let request = Request::parse(query);
    debug!(
        "event=request_parsed action={} rows={:?} cols={:?} roll={:?}",
        request.action.map_or("none", Action::as_str),
        request.rows,
        request.cols,
        request.roll
    );
    let (mut hall, loaded) = SeatHall::load(
        StateFile::new(&config.data_file),
        EventLog::new(&config.event_log),
    );

    let (resets, message) = apply(&mut hall, &loaded, &request);
    let page = build_page(&hall, &request, resets, message, || {
        EventLog::new(&config.event_log).read_all()
    });
    render::render_page(&page)
}
