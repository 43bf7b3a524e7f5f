//! Logging initialization
//!
//! Logs are written to stderr so they never mix with the command listings
//! printed on stdout. `RUST_LOG` takes precedence over `--debug`.

use std::sync::Once;
use tracing_subscriber::EnvFilter;

static INIT_ONCE: Once = Once::new();

fn default_filter(debug: bool) -> &'static str {
    if debug {
        "xr_loopback=debug"
    } else {
        "xr_loopback=warn"
    }
}

pub fn init(debug: bool) {
    INIT_ONCE.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| EnvFilter::new(default_filter(debug))),
            )
            .with_writer(std::io::stderr)
            .with_target(false)
            .init();
    });
}
