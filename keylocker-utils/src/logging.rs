use std::{env, sync::Once};

use tracing_subscriber::EnvFilter;

static LOG_INIT: Once = Once::new();

/// Install the global tracing subscriber.
///
/// Honours `RUST_LOG` for filtering and `RUST_LOG_FORMAT=json` for machine
/// readable output. Later calls are no-ops, so tests may call this freely.
pub fn init_logging() {
    LOG_INIT.call_once(|| {
        let fmt = tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env());
        if json_output() {
            fmt.json().init()
        } else {
            fmt.with_ansi(use_color()).init()
        }
    });
}

fn json_output() -> bool {
    env::var("RUST_LOG_FORMAT").is_ok_and(|v| v == "json")
}

fn use_color() -> bool {
    env::var("NO_COLOR").map(|v| v.is_empty()).unwrap_or(true)
}
