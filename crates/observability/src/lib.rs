//! Shared tracing/logging setup for the credit backend.

/// Tracing configuration (filters, layers).
pub mod tracing;

/// Initialize process-wide observability (tracing/logging).
///
/// Safe to call multiple times; subsequent calls become no-ops, which
/// matters for test binaries that build the app repeatedly.
pub fn init() {
    tracing::init();
}
