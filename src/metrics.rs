//! Prometheus metrics for the service layer and wallet sessions.
//!
//! This module provides metrics for:
//! - Data service call latency, per operation
//! - Bet placements accepted and rejected
//! - Wallet connects, failures and restored sessions

use std::time::Instant;

use metrics::{counter, describe_counter, describe_histogram, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use tracing::{debug, warn};

// === Metric Name Constants ===

/// Service call latency metric name.
pub const METRIC_SERVICE_LATENCY: &str = "service_request_latency_ms";
/// Accepted bets counter metric name.
pub const METRIC_BETS_PLACED: &str = "bets_placed_total";
/// Rejected bets counter metric name.
pub const METRIC_BETS_REJECTED: &str = "bets_rejected_total";
/// Successful wallet connects counter metric name.
pub const METRIC_WALLET_CONNECTS: &str = "wallet_connects_total";
/// Failed wallet connects counter metric name.
pub const METRIC_WALLET_CONNECT_FAILURES: &str = "wallet_connect_failures_total";
/// Restored sessions counter metric name.
pub const METRIC_SESSIONS_RESTORED: &str = "wallet_sessions_restored_total";

/// Initialize all metric descriptions.
/// Call this once at startup to register metrics with descriptions.
pub fn init_metrics() {
    describe_histogram!(
        METRIC_SERVICE_LATENCY,
        "Market service call latency in milliseconds"
    );
    describe_counter!(METRIC_BETS_PLACED, "Total number of bets accepted");
    describe_counter!(METRIC_BETS_REJECTED, "Total number of bets rejected");
    describe_counter!(METRIC_WALLET_CONNECTS, "Total number of wallet connects");
    describe_counter!(
        METRIC_WALLET_CONNECT_FAILURES,
        "Total number of failed wallet connects"
    );
    describe_counter!(
        METRIC_SESSIONS_RESTORED,
        "Total number of wallet sessions restored on load"
    );

    debug!("Metrics initialized");
}

/// Install the Prometheus recorder and describe metrics.
///
/// Returns `None` if a recorder is already installed.
pub fn install_prometheus() -> Option<PrometheusHandle> {
    match PrometheusBuilder::new().install_recorder() {
        Ok(handle) => {
            init_metrics();
            Some(handle)
        }
        Err(e) => {
            warn!(error = %e, "Failed to install Prometheus recorder");
            None
        }
    }
}

/// Increment accepted bets counter.
pub fn inc_bets_placed() {
    counter!(METRIC_BETS_PLACED).increment(1);
}

/// Increment rejected bets counter.
pub fn inc_bets_rejected() {
    counter!(METRIC_BETS_REJECTED).increment(1);
}

/// Increment wallet connects counter.
pub fn inc_wallet_connects() {
    counter!(METRIC_WALLET_CONNECTS).increment(1);
}

/// Increment failed wallet connects counter.
pub fn inc_wallet_connect_failures() {
    counter!(METRIC_WALLET_CONNECT_FAILURES).increment(1);
}

/// Increment restored sessions counter.
pub fn inc_sessions_restored() {
    counter!(METRIC_SESSIONS_RESTORED).increment(1);
}

/// RAII guard for timing service calls.
/// Automatically records latency when dropped.
pub struct LatencyTimer {
    start: Instant,
    operation: &'static str,
}

impl LatencyTimer {
    /// Create a new latency timer for the given operation.
    pub fn new(operation: &'static str) -> Self {
        Self {
            start: Instant::now(),
            operation,
        }
    }

    /// Get elapsed time in milliseconds (without recording).
    pub fn elapsed_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }
}

impl Drop for LatencyTimer {
    fn drop(&mut self) {
        histogram!(METRIC_SERVICE_LATENCY, "operation" => self.operation).record(self.elapsed_ms());
    }
}
