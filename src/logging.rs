//! Debug tracing setup.
//!
//! stderr is unusable under the alternate-screen TUI, so tracing output goes
//! to a file instead, and only when `GEMTERM_DEBUG_LOG` names one. Filtering
//! follows `RUST_LOG` when set.

use std::fs::OpenOptions;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

pub fn init_debug_tracing() {
    let Ok(path) = std::env::var("GEMTERM_DEBUG_LOG") else {
        return;
    };
    let Ok(file) = OpenOptions::new().create(true).append(true).open(&path) else {
        return;
    };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("gemterm=debug"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init();
}
