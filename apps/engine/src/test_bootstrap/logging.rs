#![cfg(test)]

//! Unit-test logging initialization.
//!
//! Delegates to the shared idempotent guard pattern: a one-time init that
//! never panics and cooperates with cargo/nextest output capture. Integration
//! tests use `engine_test_support::logging::init` instead.

use once_cell::sync::OnceCell;
use tracing_subscriber::{fmt, EnvFilter};

static INITIALIZED: OnceCell<()> = OnceCell::new();

/// Initialize structured logging for unit tests.
///
/// Level precedence: `TEST_LOG`, then `RUST_LOG`, then `"warn"`.
pub fn init() {
    INITIALIZED.get_or_init(|| {
        let filter = std::env::var("TEST_LOG")
            .or_else(|_| std::env::var("RUST_LOG"))
            .map(EnvFilter::new)
            .unwrap_or_else(|_| EnvFilter::new("warn"));

        fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .without_time()
            .try_init()
            .ok();
    });
}
