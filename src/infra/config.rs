//! Centralized configuration (environment variables + defaults).

use std::path::PathBuf;

/// Address the API server binds to.
pub fn api_bind_addr() -> String {
    std::env::var("API_BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string())
}

/// Optional JSON document replacing the built-in track type table.
pub fn track_types_path() -> Option<PathBuf> {
    std::env::var("TRACK_TYPES_PATH")
        .ok()
        .filter(|v| !v.trim().is_empty())
        .map(PathBuf::from)
}

/// `tracing` filter directive, e.g. `info` or `tracklog=debug`.
pub fn log_filter() -> String {
    std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string())
}

/// Installs the global `tracing` subscriber. Safe to call more than once.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(log_filter())
        .with_target(false)
        .try_init();
}
