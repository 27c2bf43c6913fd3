//! Prometheus metrics for the client engine.
//!
//! All metrics follow the naming convention: `qc_<subsystem>_<metric>_<unit>`

use lazy_static::lazy_static;
use prometheus::{
    exponential_buckets, Encoder, Histogram, HistogramOpts, IntCounter, IntCounterVec, Opts,
    Registry, TextEncoder,
};

use crate::TelemetryError;

lazy_static! {
    /// Global metrics registry
    pub static ref REGISTRY: Registry = Registry::new();

    // =========================================================================
    // PROTOCOL METRICS (Subsystem 5)
    // =========================================================================

    /// Transactions played, by terminal outcome
    pub static ref PLAYS_TOTAL: IntCounterVec = IntCounterVec::new(
        Opts::new("qc_protocol_plays_total", "Transactions played through Query/Commit"),
        &["outcome"]  // done, query_failed, commit_failed, invalid_signature, rejected
    ).expect("metric creation failed");

    /// Time from start of play to terminal state
    pub static ref PLAY_DURATION: Histogram = Histogram::with_opts(
        HistogramOpts::new(
            "qc_protocol_play_duration_seconds",
            "Time spent playing a transaction to a terminal state"
        ).buckets(exponential_buckets(0.001, 2.0, 15).expect("valid buckets"))
    ).expect("metric creation failed");

    // =========================================================================
    // BROADCAST METRICS (Subsystem 2)
    // =========================================================================

    /// Broadcast targets that produced no response
    pub static ref BROADCAST_ABSENT: IntCounter = IntCounter::new(
        "qc_broadcast_absent_responses_total",
        "Broadcast targets that failed to connect or answer"
    ).expect("metric creation failed");

    /// Broadcast rounds executed
    pub static ref BROADCAST_ROUNDS: IntCounter = IntCounter::new(
        "qc_broadcast_rounds_total",
        "Broadcast rounds executed"
    ).expect("metric creation failed");
}

/// Register all metrics with the global registry.
pub fn register_metrics() -> Result<(), TelemetryError> {
    let metrics: Vec<Box<dyn prometheus::core::Collector>> = vec![
        Box::new(PLAYS_TOTAL.clone()),
        Box::new(PLAY_DURATION.clone()),
        Box::new(BROADCAST_ABSENT.clone()),
        Box::new(BROADCAST_ROUNDS.clone()),
    ];

    for metric in metrics {
        REGISTRY
            .register(metric)
            .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;
    }
    Ok(())
}

/// Encode all metrics as Prometheus text format.
pub fn encode_metrics() -> Result<String, TelemetryError> {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder
        .encode(&metric_families, &mut buffer)
        .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;
    String::from_utf8(buffer).map_err(|e| TelemetryError::MetricsInit(e.to_string()))
}

/// Record a terminal play outcome.
pub fn record_play(outcome: &str, seconds: f64) {
    PLAYS_TOTAL.with_label_values(&[outcome]).inc();
    PLAY_DURATION.observe(seconds);
}
