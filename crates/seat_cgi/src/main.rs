use std::env;
use std::io::{self, Write};

use seat_cgi::{init_logging, serve, EnvConfig, CONTENT_TYPE_HEADER};

fn main() -> io::Result<()> {
    let config = EnvConfig::from_env();
    init_logging(config.log_filter.as_deref());

    let query = env::var("QUERY_STRING").unwrap_or_default();
    let page = serve(&config, &query);

    let mut stdout = io::stdout().lock();
    stdout.write_all(CONTENT_TYPE_HEADER.as_bytes())?;
    stdout.write_all(page.as_bytes())?;
    stdout.flush()
}
