use once_cell::sync::OnceCell;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INITIALIZED: OnceCell<()> = OnceCell::new();

/// Initialize JSON tracing output for the embedding process.
///
/// Idempotent; honours `RUST_LOG` and defaults to `info` for the engine.
pub fn init_tracing() {
    INITIALIZED.get_or_init(|| {
        let env_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("info,engine=info"));

        let fmt_layer = fmt::layer()
            .with_target(false)
            .with_file(false)
            .with_line_number(false)
            .with_thread_ids(false)
            .with_thread_names(false)
            .with_ansi(false)
            .json();

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .init();
    });
}
