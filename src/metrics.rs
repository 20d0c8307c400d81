//! Performance metrics and statistics tracking for the prediction service.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;
use std::time::{Duration, Instant};
use tracing::info;

/// Width of one predicted-charge distribution bucket, in currency units.
const CHARGE_BUCKET_WIDTH: f64 = 5_000.0;

/// Metrics collector for the request pipeline
pub struct PipelineMetrics {
    /// Total prediction requests served successfully
    pub predictions_served: AtomicU64,
    /// Requests rejected by the schema validator
    pub validation_failures: AtomicU64,
    /// Requests failed inside the pipeline or model
    pub internal_failures: AtomicU64,
    /// Processing times (in microseconds)
    processing_times: RwLock<Vec<u64>>,
    /// Predicted charge distribution buckets (5k wide, last is open-ended)
    charge_buckets: RwLock<[u64; 10]>,
    /// Start time for rate calculation
    start_time: Instant,
}

impl PipelineMetrics {
    /// Create a new metrics collector
    pub fn new() -> Self {
        Self {
            predictions_served: AtomicU64::new(0),
            validation_failures: AtomicU64::new(0),
            internal_failures: AtomicU64::new(0),
            processing_times: RwLock::new(Vec::with_capacity(1000)),
            charge_buckets: RwLock::new([0; 10]),
            start_time: Instant::now(),
        }
    }

    /// Record a served prediction
    pub fn record_prediction(&self, processing_time: Duration, predicted_charge: f64) {
        self.predictions_served.fetch_add(1, Ordering::Relaxed);

        if let Ok(mut times) = self.processing_times.write() {
            times.push(processing_time.as_micros() as u64);
            // Keep only last 10000 for memory efficiency
            if times.len() > 10000 {
                times.drain(0..5000);
            }
        }

        let bucket = ((predicted_charge / CHARGE_BUCKET_WIDTH).max(0.0) as usize).min(9);
        if let Ok(mut buckets) = self.charge_buckets.write() {
            buckets[bucket] += 1;
        }
    }

    /// Record a request rejected by validation
    pub fn record_validation_failure(&self) {
        self.validation_failures.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a request that failed inside the pipeline
    pub fn record_internal_failure(&self) {
        self.internal_failures.fetch_add(1, Ordering::Relaxed);
    }

    /// Get processing time statistics
    pub fn get_processing_stats(&self) -> ProcessingStats {
        let times = self.processing_times.read().unwrap();
        if times.is_empty() {
            return ProcessingStats::default();
        }

        let mut sorted: Vec<u64> = times.clone();
        sorted.sort();

        let sum: u64 = sorted.iter().sum();
        let count = sorted.len();

        ProcessingStats {
            count: count as u64,
            mean_us: sum / count as u64,
            p50_us: sorted[count / 2],
            p95_us: sorted[(count as f64 * 0.95) as usize],
            p99_us: sorted[(count as f64 * 0.99) as usize],
            max_us: *sorted.last().unwrap_or(&0),
        }
    }

    /// Get current throughput (requests per second)
    pub fn get_throughput(&self) -> f64 {
        let elapsed = self.start_time.elapsed().as_secs_f64();
        if elapsed > 0.0 {
            self.predictions_served.load(Ordering::Relaxed) as f64 / elapsed
        } else {
            0.0
        }
    }

    /// Get predicted charge distribution
    pub fn get_charge_distribution(&self) -> [u64; 10] {
        *self.charge_buckets.read().unwrap()
    }

    /// Print summary statistics
    pub fn print_summary(&self) {
        let served = self.predictions_served.load(Ordering::Relaxed);
        let rejected = self.validation_failures.load(Ordering::Relaxed);
        let failed = self.internal_failures.load(Ordering::Relaxed);

        let processing = self.get_processing_stats();
        let throughput = self.get_throughput();
        let distribution = self.get_charge_distribution();

        info!("=== Prediction Service Metrics ===");
        info!(
            served = served,
            rejected = rejected,
            failed = failed,
            throughput = format!("{:.1} req/s", throughput),
            "Request totals"
        );
        info!(
            mean_us = processing.mean_us,
            p50_us = processing.p50_us,
            p95_us = processing.p95_us,
            p99_us = processing.p99_us,
            "Processing time"
        );

        let total: u64 = distribution.iter().sum();
        if total > 0 {
            for (i, &count) in distribution.iter().enumerate() {
                if count == 0 {
                    continue;
                }
                let lower = i as f64 * CHARGE_BUCKET_WIDTH;
                let pct = (count as f64 / total as f64) * 100.0;
                info!(
                    "Charges {:>7.0}-{}: {:>6} ({:>5.1}%)",
                    lower,
                    if i == 9 {
                        "+".to_string()
                    } else {
                        format!("{:.0}", lower + CHARGE_BUCKET_WIDTH)
                    },
                    count,
                    pct
                );
            }
        }
    }
}

impl Default for PipelineMetrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Processing time statistics
#[derive(Debug, Default)]
pub struct ProcessingStats {
    pub count: u64,
    pub mean_us: u64,
    pub p50_us: u64,
    pub p95_us: u64,
    pub p99_us: u64,
    pub max_us: u64,
}

/// Real-time metrics reporter that prints periodic summaries
pub struct MetricsReporter {
    metrics: std::sync::Arc<PipelineMetrics>,
    interval_secs: u64,
}

impl MetricsReporter {
    pub fn new(metrics: std::sync::Arc<PipelineMetrics>, interval_secs: u64) -> Self {
        Self {
            metrics,
            interval_secs,
        }
    }

    /// Start the periodic reporting task
    pub async fn start(self) {
        let mut interval = tokio::time::interval(Duration::from_secs(self.interval_secs));
        loop {
            interval.tick().await;
            self.metrics.print_summary();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_recording() {
        let metrics = PipelineMetrics::new();

        metrics.record_prediction(Duration::from_micros(100), 16884.92);
        metrics.record_prediction(Duration::from_micros(200), 1725.55);
        metrics.record_validation_failure();

        assert_eq!(metrics.predictions_served.load(Ordering::Relaxed), 2);
        assert_eq!(metrics.validation_failures.load(Ordering::Relaxed), 1);

        let stats = metrics.get_processing_stats();
        assert_eq!(stats.count, 2);
        assert_eq!(stats.mean_us, 150);
    }

    #[test]
    fn test_charge_distribution_buckets() {
        let metrics = PipelineMetrics::new();

        metrics.record_prediction(Duration::from_micros(50), 1725.55); // bucket 0
        metrics.record_prediction(Duration::from_micros(50), 16884.92); // bucket 3
        metrics.record_prediction(Duration::from_micros(50), 63770.43); // clamped to 9

        let distribution = metrics.get_charge_distribution();
        assert_eq!(distribution[0], 1);
        assert_eq!(distribution[3], 1);
        assert_eq!(distribution[9], 1);
    }
}
