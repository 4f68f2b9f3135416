//! Tracing/logging initialization.

use tracing_subscriber::EnvFilter;

/// Logging options for a process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObservabilityConfig {
    /// Filter used when `RUST_LOG` is unset.
    pub default_filter: String,
    /// JSON lines (services) or human-readable output (CLIs).
    pub json: bool,
    /// Write to stderr so stdout stays clean for command output.
    pub stderr: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            default_filter: "info".to_string(),
            json: true,
            stderr: false,
        }
    }
}

impl ObservabilityConfig {
    /// Quiet, human-readable logs on stderr.
    pub fn cli() -> Self {
        Self {
            default_filter: "warn".to_string(),
            json: false,
            stderr: true,
        }
    }
}

/// Initialize tracing/logging for the process.
///
/// Safe to call multiple times (subsequent calls are no-ops).
pub fn init(config: &ObservabilityConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.default_filter));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_timer(tracing_subscriber::fmt::time::SystemTime)
        .with_target(false);

    // Each combination yields a distinct subscriber type.
    let _ = match (config.json, config.stderr) {
        (true, true) => builder.json().with_writer(std::io::stderr).try_init(),
        (true, false) => builder.json().try_init(),
        (false, true) => builder.with_writer(std::io::stderr).try_init(),
        (false, false) => builder.try_init(),
    };
}
