//! Tracing and logging setup shared by storefront binaries.

/// Tracing configuration (filters, output format).
pub mod tracing;

pub use crate::tracing::ObservabilityConfig;

/// Initialize process-wide observability with JSON logs on stdout.
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init(&ObservabilityConfig::default());
}

/// Initialize process-wide observability with explicit options.
pub fn init_with(config: &ObservabilityConfig) {
    tracing::init(config);
}
