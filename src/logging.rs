//! Tracing setup.
//!
//! Logs go to stdout through a compact formatter, filtered by `RUST_LOG` (default `info`).
//! Setting `DOCSUM_LOG_FILE` additionally appends plain-text logs to that file through a
//! non-blocking writer held alive for the process lifetime.

use std::sync::OnceLock;

use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

static LOG_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

/// Install the global tracing subscriber.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let stdout = fmt::layer().with_target(false).compact();
    let registry = tracing_subscriber::registry().with(filter).with(stdout);

    match file_writer() {
        Some(writer) => registry
            .with(fmt::layer().with_writer(writer).with_ansi(false).compact())
            .init(),
        None => registry.init(),
    }
}

fn file_writer() -> Option<NonBlocking> {
    let path = std::env::var("DOCSUM_LOG_FILE").ok()?;
    match std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
    {
        Ok(file) => {
            let (writer, guard) = tracing_appender::non_blocking(file);
            let _ = LOG_GUARD.set(guard);
            Some(writer)
        }
        Err(err) => {
            eprintln!("Failed to open log file {path}: {err}");
            None
        }
    }
}
