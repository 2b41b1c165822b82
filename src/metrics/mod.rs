//! Metrics for the roster rating service
//!
//! This module provides Prometheus counters and histograms for rating
//! submissions, scoring failures and score cache usage.

pub mod collector;

pub use collector::{MetricsCollector, MetricsTimer, ScoringMetrics, SubmissionMetrics};
