//! Logging and stage context.
//!
//! The crate only emits `tracing` events; [`init_tracing`] installs a
//! formatting subscriber for binaries, benches and tests that want to see
//! them. The filter comes from `COMPOSAD_LOG` when set.
//!
//! ```rust
//! composad::observability::init_tracing("warn");
//! composad::observability::init_tracing("debug"); // no-op
//! ```

pub mod context;

pub use context::{current_stage_path, enter_stage, stage_depth, StageGuard};

use std::sync::Once;
use tracing_subscriber::EnvFilter;

/// Environment variable holding a `tracing` filter directive.
pub const LOG_ENV: &str = "COMPOSAD_LOG";

static INIT: Once = Once::new();

/// Install a global fmt subscriber, once.
///
/// `default_level` is used when `COMPOSAD_LOG` is unset or invalid. Later
/// calls, or a subscriber installed elsewhere, leave things unchanged.
pub fn init_tracing(default_level: &str) {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV)
            .unwrap_or_else(|_| EnvFilter::new(default_level));

        let installed = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .with_writer(std::io::stderr)
            .try_init();

        if installed.is_err() {
            tracing::debug!("global subscriber already set");
        }
    });
}
