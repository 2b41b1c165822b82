//! Metrics collection using Prometheus
//!
//! Counters and histograms for rating submissions, scoring and the score
//! cache. Exposition is text-only; nothing is served over the network.

use anyhow::Result;
use prometheus::{
    Encoder, Histogram, HistogramOpts, IntCounter, IntCounterVec, Opts, Registry, TextEncoder,
};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Main metrics collector for the rating service
#[derive(Clone)]
pub struct MetricsCollector {
    /// Prometheus registry
    registry: Arc<Registry>,

    /// Submission-related metrics
    submission_metrics: SubmissionMetrics,

    /// Scoring-related metrics
    scoring_metrics: ScoringMetrics,
}

/// Rating submission metrics
#[derive(Clone)]
pub struct SubmissionMetrics {
    /// Total accepted rating submissions
    pub submissions_total: IntCounter,

    /// Rejected submissions by reason
    pub rejections_total: IntCounterVec,
}

/// Scoring metrics
#[derive(Clone)]
pub struct ScoringMetrics {
    /// Scoring failures by error kind
    pub scoring_errors_total: IntCounterVec,

    /// Score cache lookups by result (hit/miss)
    pub cache_requests_total: IntCounterVec,

    /// Overall rating calculation time
    pub calculation_duration: Histogram,

    /// Distribution of calculated overall ratings
    pub overall_distribution: Histogram,
}

impl MetricsCollector {
    /// Create a new metrics collector with default registry
    pub fn new() -> Result<Self> {
        let registry = Arc::new(Registry::new());
        Self::with_registry(registry)
    }

    /// Create a new metrics collector with custom registry
    pub fn with_registry(registry: Arc<Registry>) -> Result<Self> {
        let submission_metrics = SubmissionMetrics::new(&registry)?;
        let scoring_metrics = ScoringMetrics::new(&registry)?;

        Ok(Self {
            registry,
            submission_metrics,
            scoring_metrics,
        })
    }

    /// Get the Prometheus registry
    pub fn registry(&self) -> Arc<Registry> {
        self.registry.clone()
    }

    pub fn submissions(&self) -> &SubmissionMetrics {
        &self.submission_metrics
    }

    pub fn scoring(&self) -> &ScoringMetrics {
        &self.scoring_metrics
    }

    /// Record an accepted submission and the overall it produced
    pub fn record_submission(&self, overall: i32) {
        self.submission_metrics.submissions_total.inc();
        self.scoring_metrics
            .overall_distribution
            .observe(f64::from(overall));
    }

    /// Record the time taken by one overall rating calculation
    pub fn record_calculation(&self, duration: Duration) {
        self.scoring_metrics
            .calculation_duration
            .observe(duration.as_secs_f64());
    }

    /// Record a rejected submission
    pub fn record_rejection(&self, reason: &str) {
        self.submission_metrics
            .rejections_total
            .with_label_values(&[reason])
            .inc();
    }

    /// Record a scoring failure
    pub fn record_scoring_error(&self, kind: &str) {
        self.scoring_metrics
            .scoring_errors_total
            .with_label_values(&[kind])
            .inc();
    }

    /// Record a score cache lookup
    pub fn record_cache_request(&self, hit: bool) {
        let result = if hit { "hit" } else { "miss" };
        self.scoring_metrics
            .cache_requests_total
            .with_label_values(&[result])
            .inc();
    }

    /// Current cache lookup count for `hit` or `miss`
    pub fn cache_requests(&self, result: &str) -> u64 {
        self.scoring_metrics
            .cache_requests_total
            .with_label_values(&[result])
            .get()
    }

    /// Render all metrics in the Prometheus text format
    pub fn render(&self) -> Result<String> {
        let encoder = TextEncoder::new();
        let mut buffer = Vec::new();
        encoder.encode(&self.registry.gather(), &mut buffer)?;
        Ok(String::from_utf8(buffer)?)
    }

    /// Create a timer for measuring operation duration
    pub fn start_timer(&self) -> MetricsTimer {
        MetricsTimer::new()
    }
}

/// Timer for measuring operation durations
pub struct MetricsTimer {
    start: Instant,
}

impl MetricsTimer {
    fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Get the elapsed duration
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Stop the timer and return the duration
    pub fn stop(self) -> Duration {
        self.elapsed()
    }
}

impl SubmissionMetrics {
    fn new(registry: &Registry) -> Result<Self> {
        let submissions_total = IntCounter::new(
            "roster_rating_submissions_total",
            "Total accepted rating submissions",
        )?;
        registry.register(Box::new(submissions_total.clone()))?;

        let rejections_total = IntCounterVec::new(
            Opts::new(
                "roster_rating_rejections_total",
                "Rejected rating submissions",
            ),
            &["reason"],
        )?;
        registry.register(Box::new(rejections_total.clone()))?;

        Ok(Self {
            submissions_total,
            rejections_total,
        })
    }
}

impl ScoringMetrics {
    fn new(registry: &Registry) -> Result<Self> {
        let scoring_errors_total = IntCounterVec::new(
            Opts::new(
                "roster_rating_scoring_errors_total",
                "Overall rating calculation failures",
            ),
            &["kind"],
        )?;
        registry.register(Box::new(scoring_errors_total.clone()))?;

        let cache_requests_total = IntCounterVec::new(
            Opts::new(
                "roster_rating_cache_requests_total",
                "Score cache lookups",
            ),
            &["result"],
        )?;
        registry.register(Box::new(cache_requests_total.clone()))?;

        let calculation_duration = Histogram::with_opts(
            HistogramOpts::new(
                "roster_rating_calculation_duration_seconds",
                "Time spent calculating one overall rating",
            )
            .buckets(vec![0.000_001, 0.000_01, 0.000_1, 0.001, 0.01]),
        )?;
        registry.register(Box::new(calculation_duration.clone()))?;

        let overall_distribution = Histogram::with_opts(
            HistogramOpts::new(
                "roster_rating_overall_distribution",
                "Distribution of calculated overall ratings",
            )
            .buckets(vec![60.0, 65.0, 70.0, 75.0, 80.0, 85.0, 90.0, 95.0, 99.0]),
        )?;
        registry.register(Box::new(overall_distribution.clone()))?;

        Ok(Self {
            scoring_errors_total,
            cache_requests_total,
            calculation_duration,
            overall_distribution,
        })
    }
}
