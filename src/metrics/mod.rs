// Private module declaration
mod server;

use prometheus::{
    HistogramOpts, HistogramVec, IntCounterVec, IntGauge, IntGaugeVec, Opts, Registry,
};

use crate::actors::HealthStatus;

// Re-export for public API
pub use server::start_metrics_server;

// ============================================================================
// Metrics Module - Prometheus metrics for observability
// ============================================================================
//
// Provides metrics for:
// - Fetch cycles per source and outcome (success, failure, stale)
// - Fetch duration
// - Displayed record counts
// - Consecutive-failure counts and overall health status
//
// All metrics are registered with Prometheus and can be scraped via /metrics
// ============================================================================

/// Central metrics registry for the entire application
pub struct Metrics {
    registry: Registry,

    // Fetch Cycle Metrics
    pub fetch_cycles_total: IntCounterVec,
    pub fetch_duration_seconds: HistogramVec,

    // Display Metrics
    pub displayed_records: IntGaugeVec,

    // Health Metrics
    pub consecutive_failures: IntGaugeVec,
    pub system_health_status: IntGauge,
}

impl Metrics {
    pub fn new() -> anyhow::Result<Self> {
        let registry = Registry::new();

        // Fetch Cycle Metrics
        let fetch_cycles_total = IntCounterVec::new(
            Opts::new("fetch_cycles_total", "Completed fetch cycles"),
            &["source", "outcome"],
        )?;
        registry.register(Box::new(fetch_cycles_total.clone()))?;

        let fetch_duration_seconds = HistogramVec::new(
            HistogramOpts::new("fetch_duration_seconds", "Fetch cycle duration")
                .buckets(vec![0.005, 0.01, 0.05, 0.1, 0.5, 1.0, 5.0, 15.0]),
            &["source"],
        )?;
        registry.register(Box::new(fetch_duration_seconds.clone()))?;

        // Display Metrics
        let displayed_records = IntGaugeVec::new(
            Opts::new("displayed_records", "Records currently displayed per list"),
            &["source"],
        )?;
        registry.register(Box::new(displayed_records.clone()))?;

        // Health Metrics
        let consecutive_failures = IntGaugeVec::new(
            Opts::new(
                "consecutive_fetch_failures",
                "Consecutive failed fetch cycles per source",
            ),
            &["source"],
        )?;
        registry.register(Box::new(consecutive_failures.clone()))?;

        let system_health_status = IntGauge::new(
            "system_health_status",
            "Overall health (0=Unhealthy, 1=Degraded, 2=Healthy)",
        )?;
        registry.register(Box::new(system_health_status.clone()))?;

        Ok(Self {
            registry,
            fetch_cycles_total,
            fetch_duration_seconds,
            displayed_records,
            consecutive_failures,
            system_health_status,
        })
    }

    /// Get the Prometheus registry for exposing metrics via HTTP
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Helper to record an applied fetch cycle
    pub fn record_fetch_success(&self, source: &str, duration_secs: f64, count: usize) {
        self.fetch_cycles_total
            .with_label_values(&[source, "success"])
            .inc();
        self.fetch_duration_seconds
            .with_label_values(&[source])
            .observe(duration_secs);
        self.displayed_records
            .with_label_values(&[source])
            .set(count as i64);
    }

    /// Helper to record a failed fetch cycle
    pub fn record_fetch_failure(&self, source: &str, duration_secs: f64) {
        self.fetch_cycles_total
            .with_label_values(&[source, "failure"])
            .inc();
        self.fetch_duration_seconds
            .with_label_values(&[source])
            .observe(duration_secs);
    }

    /// Helper to record a successful fetch whose response was discarded as stale
    pub fn record_stale_response(&self, source: &str, duration_secs: f64) {
        self.fetch_cycles_total
            .with_label_values(&[source, "stale"])
            .inc();
        self.fetch_duration_seconds
            .with_label_values(&[source])
            .observe(duration_secs);
    }

    /// Helper to update the consecutive-failure gauge for a source
    pub fn set_consecutive_failures(&self, source: &str, count: i64) {
        self.consecutive_failures
            .with_label_values(&[source])
            .set(count);
    }

    /// Helper to update the overall health gauge
    pub fn set_system_health(&self, status: &HealthStatus) {
        self.system_health_status.set(status.as_gauge_value());
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new().expect("Failed to create metrics")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_creation() {
        let metrics = Metrics::new().unwrap();
        assert!(metrics.registry.gather().len() > 0);
    }

    #[test]
    fn test_record_fetch_success() {
        let metrics = Metrics::new().unwrap();
        metrics.record_fetch_success("recent_actors", 0.05, 20);

        let gathered = metrics.registry.gather();
        let cycles = gathered
            .iter()
            .find(|m| m.name() == "fetch_cycles_total")
            .unwrap();
        assert_eq!(cycles.metric[0].counter.value, Some(1.0));

        let displayed = gathered
            .iter()
            .find(|m| m.name() == "displayed_records")
            .unwrap();
        assert_eq!(displayed.metric[0].gauge.value, Some(20.0));
    }

    #[test]
    fn test_cycle_outcomes_are_labelled_separately() {
        let metrics = Metrics::new().unwrap();
        metrics.record_fetch_success("recent_actors", 0.01, 1);
        metrics.record_fetch_failure("recent_actors", 0.01);
        metrics.record_stale_response("recent_actors", 0.01);

        let gathered = metrics.registry.gather();
        let cycles = gathered
            .iter()
            .find(|m| m.name() == "fetch_cycles_total")
            .unwrap();
        assert_eq!(cycles.metric.len(), 3); // Three different outcome labels
    }

    #[test]
    fn test_health_gauges() {
        let metrics = Metrics::new().unwrap();
        metrics.set_consecutive_failures("recent_actors", 2);
        metrics.set_system_health(&HealthStatus::Degraded("2 consecutive fetch failures".into()));

        let gathered = metrics.registry.gather();
        let failures = gathered
            .iter()
            .find(|m| m.name() == "consecutive_fetch_failures")
            .unwrap();
        assert_eq!(failures.metric[0].gauge.value, Some(2.0));

        let health = gathered
            .iter()
            .find(|m| m.name() == "system_health_status")
            .unwrap();
        assert_eq!(health.metric[0].gauge.value, Some(1.0));
    }
}
