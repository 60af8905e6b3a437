//! Tracing setup for the terminal host
//!
//! The terminal is in raw mode while the editor runs, so logs go to
//! `fencematch.log` in the system temp directory instead of stderr.
//!
//! Configure via the RUST_LOG environment variable:
//! - `RUST_LOG=debug` - every selection change and highlight transition
//! - `RUST_LOG=fencematch::fence=debug` - only fence queries

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub const LOG_FILE: &str = "fencematch.log";

/// Initialize file logging; keep the returned guard alive until exit
pub fn init() -> WorkerGuard {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let file_appender = tracing_appender::rolling::never(std::env::temp_dir(), LOG_FILE);
    let (writer, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(true)
                .with_line_number(true),
        )
        .init();

    guard
}
