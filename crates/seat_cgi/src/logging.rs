//! Diagnostic logging to stderr; stdout carries the HTTP response.

use std::io::Write;

use env_logger::{Env, Target};

pub const DEFAULT_LOG_FILTER: &str = "warn";

pub fn init_logging(filter: Option<&str>) {
    let env = Env::default().default_filter_or(DEFAULT_LOG_FILTER);
    let mut builder = env_logger::Builder::from_env(env);
    if let Some(filter) = filter {
        builder.parse_filters(filter);
    }
    builder.target(Target::Stderr);
    builder.format_timestamp_secs();
    builder.format(|buf, record| {
        let ts = buf.timestamp();
        writeln!(
            buf,
            "[{} {:<5} {}] {}",
            ts,
            record.level(),
            record.target(),
            record.args()
        )
    });
    let _ = builder.try_init();
}
