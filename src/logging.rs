//! Global `tracing` subscriber setup.

use std::sync::OnceLock;
use tracing_subscriber::EnvFilter;

use crate::models::constants::env::LOG;

static LOGGING_INITIALIZED: OnceLock<()> = OnceLock::new();

/// Filter directive used when `TESTRA_LOG` is not set.
pub fn default_directive(debug: bool) -> &'static str {
    if debug {
        "testra=debug"
    } else {
        "testra=info"
    }
}

/// Install a stderr fmt subscriber. `TESTRA_LOG` takes precedence over the
/// debug toggle. Safe to call more than once; a subscriber installed by the
/// host test harness is left in place.
pub fn init(debug: bool) {
    if LOGGING_INITIALIZED.get().is_some() {
        return;
    }

    let filter = EnvFilter::try_from_env(LOG)
        .unwrap_or_else(|_| EnvFilter::new(default_directive(debug)));

    if let Err(error) = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
    {
        tracing::debug!(error = %error, "tracing subscriber already initialized");
    }

    let _ = LOGGING_INITIALIZED.set(());
}
