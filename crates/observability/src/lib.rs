//! Tracing/logging setup shared by hosting processes and test harnesses.
//!
//! The domain crates stay log-free; whatever process embeds them (API,
//! worker, test runner) calls [`init`] once.

/// Initialize process-wide observability (tracing/logging).
///
/// Safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init();
}

/// Tracing configuration (filters, layers).
pub mod tracing;
