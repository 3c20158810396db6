//! Industry benchmark thresholds the advisory rules score against.
//!
//! Loaded once per invocation (defaults, optionally overridden by the
//! `[benchmarks]` config section) and treated as read-only from then on.

use serde::{Deserialize, Serialize};

/// An inclusive low/high band for a cost or rate metric.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Range {
    pub low: f64,
    pub high: f64,
}

impl Range {
    pub const fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }
}

/// The process-wide benchmark table.
///
/// Default values are the Facebook ads industry medians the original
/// dashboards shipped with.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Benchmarks {
    /// Median return on ad spend across verticals.
    pub roas_median: f64,
    /// ROAS above which a campaign counts as high-performing.
    pub roas_high: f64,
    /// Frequency above which a creative is considered fatigued.
    pub frequency_threshold: f64,
    /// Cost per 1,000 impressions, USD.
    pub cpm: Range,
    /// Cost per click, USD.
    pub cpc: Range,
    /// Click-through rate, percent.
    pub ctr: Range,
    /// Cost per action, USD.
    pub cpa: Range,
}

impl Default for Benchmarks {
    fn default() -> Self {
        Self {
            roas_median: 2.19,
            roas_high: 4.87,
            frequency_threshold: 3.0,
            cpm: Range::new(5.54, 35.23),
            cpc: Range::new(0.25, 0.58),
            ctr: Range::new(1.5, 5.0),
            cpa: Range::new(3.45, 15.20),
        }
    }
}
