//! # Quorum-Cash Telemetry
//!
//! Logging and metrics shared by the client crates.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use qc_telemetry::{TelemetryConfig, init_telemetry};
//!
//! let _guard = init_telemetry(TelemetryConfig::from_env())?;
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `QC_LOG_LEVEL` / `RUST_LOG` | `info` | Log level filter |
//! | `QC_JSON_LOGS` | `false` | JSON log lines |
//! | `QC_CONSOLE_OUTPUT` | `true` | Emit logs at all |
//! | `QC_SERVICE_NAME` | `qc-client` | Service name in logs |

#![warn(missing_docs)]

mod config;
mod logging;
pub mod metrics;

pub use config::TelemetryConfig;
pub use logging::init_logging;
pub use metrics::{
    encode_metrics, record_play, register_metrics, BROADCAST_ABSENT, BROADCAST_ROUNDS,
    PLAYS_TOTAL, PLAY_DURATION,
};

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    /// Subscriber could not be installed
    #[error("Failed to initialize logger: {0}")]
    LoggerInit(String),

    /// Metrics registry rejected a collector
    #[error("Failed to initialize Prometheus metrics: {0}")]
    MetricsInit(String),

    /// Configuration could not be parsed
    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Initialize logging and metrics.
///
/// Returns a guard to hold for the lifetime of the application; dropping
/// it logs the final metric snapshot at `debug`.
pub fn init_telemetry(config: TelemetryConfig) -> Result<TelemetryGuard, TelemetryError> {
    register_metrics()?;
    init_logging(&config)?;
    Ok(TelemetryGuard { _config: config })
}

/// Guard that keeps telemetry active.
pub struct TelemetryGuard {
    _config: TelemetryConfig,
}

impl Drop for TelemetryGuard {
    fn drop(&mut self) {
        if let Ok(snapshot) = encode_metrics() {
            tracing::debug!(metrics = %snapshot, "Shutting down telemetry");
        }
    }
}
