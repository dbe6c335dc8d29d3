//! Tracing/logging setup shared by unitforge binaries.
//!
//! The engine crates only *emit* through `tracing`; subscriber wiring lives
//! here so library consumers can bring their own.

/// Tracing configuration (filters, output format).
pub mod tracing;

/// Initialize process-wide observability (tracing/logging).
///
/// Safe to call multiple times; subsequent calls are no-ops.
pub fn init() {
    tracing::init();
}
