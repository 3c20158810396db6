//! Fatigue and performance scoring.
//!
//! Both scores are heuristic weighted checklists, not statistical models:
//! each rule contributes independently and the sum is clamped to [0, 100].
//! Everything here is a pure function of its arguments.

use crate::advisor::benchmarks::Benchmarks;
use crate::model::{CreativeRecord, DeliveryMetrics, Metrics, RecordStatus};

// ---------------------------------------------------------------------------
// Fatigue score
// ---------------------------------------------------------------------------

/// Estimate audience fatigue for a creative, 0 (fresh) to 100 (exhausted).
///
/// Additive rules, order-insensitive:
/// - CTR below the benchmark low band +30, below the high band +10
/// - frequency above the fatigue threshold +40, above 2.0 +20
/// - CPA above the benchmark high band +20
/// - ROAS below the industry median +10
pub fn fatigue_score(
    metrics: &Metrics,
    delivery: &DeliveryMetrics,
    benchmarks: &Benchmarks,
) -> u8 {
    let mut score: u32 = 0;

    if metrics.ctr < benchmarks.ctr.low {
        score += 30;
    } else if metrics.ctr < benchmarks.ctr.high {
        score += 10;
    }

    if delivery.frequency > benchmarks.frequency_threshold {
        score += 40;
    } else if delivery.frequency > 2.0 {
        score += 20;
    }

    if metrics.cpa > benchmarks.cpa.high {
        score += 20;
    }

    if metrics.roas < benchmarks.roas_median {
        score += 10;
    }

    score.min(100) as u8
}

// ---------------------------------------------------------------------------
// Performance score
// ---------------------------------------------------------------------------

/// Quality tier derived from a performance score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Excellent,
    Good,
    Warning,
    Poor,
}

impl Tier {
    /// Tier boundaries: excellent >= 80, good >= 60, warning >= 40.
    pub fn from_score(score: u8) -> Self {
        match score {
            80.. => Self::Excellent,
            60..=79 => Self::Good,
            40..=59 => Self::Warning,
            _ => Self::Poor,
        }
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Excellent => write!(f, "excellent"),
            Self::Good => write!(f, "good"),
            Self::Warning => write!(f, "warning"),
            Self::Poor => write!(f, "poor"),
        }
    }
}

/// A creative's overall performance rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PerformanceRating {
    pub score: u8,
    pub tier: Tier,
}

/// Score a creative's overall performance, 0–100, from a base of 50.
///
/// CTR tiers (percent): >=5 +25, >=2 +15, >=1 +5, else -15.
/// CPC tiers (USD, only when cpc > 0): <=0.25 +15, <=0.5 +10, >1.0 -10 —
/// the (0.5, 1.0] band deliberately contributes nothing.
/// Status: active +10, anything else -20.
pub fn performance_score(creative: &CreativeRecord) -> PerformanceRating {
    let mut score: i32 = 50;

    let ctr = creative.metrics.ctr;
    if ctr >= 5.0 {
        score += 25;
    } else if ctr >= 2.0 {
        score += 15;
    } else if ctr >= 1.0 {
        score += 5;
    } else {
        score -= 15;
    }

    let cpc = creative.metrics.cpc;
    if cpc > 0.0 {
        if cpc <= 0.25 {
            score += 15;
        } else if cpc <= 0.5 {
            score += 10;
        } else if cpc > 1.0 {
            score -= 10;
        }
    }

    if creative.status == RecordStatus::Active {
        score += 10;
    } else {
        score -= 20;
    }

    let score = score.clamp(0, 100) as u8;
    PerformanceRating {
        score,
        tier: Tier::from_score(score),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CreativeRecord, Performance, Source};
    use chrono::Utc;

    fn creative(metrics: Metrics, status: RecordStatus) -> CreativeRecord {
        CreativeRecord {
            id: "ad1".to_string(),
            name: "Test Creative".to_string(),
            campaign_id: "c1".to_string(),
            adset_id: String::new(),
            adset_name: String::new(),
            source: Source::Csv,
            status,
            metrics,
            delivery: DeliveryMetrics::default(),
            performance: Performance::default(),
            date_added: Utc::now(),
        }
    }

    // --- fatigue_score ---

    #[test]
    fn fresh_creative_scores_zero() {
        let metrics = Metrics {
            ctr: 6.0,
            cpa: 5.0,
            roas: 3.0,
            ..Metrics::default()
        };
        let delivery = DeliveryMetrics {
            frequency: 1.0,
            reach: 10_000.0,
        };
        assert_eq!(
            fatigue_score(&metrics, &delivery, &Benchmarks::default()),
            0
        );
    }

    #[test]
    fn every_rule_firing_saturates_at_100() {
        // The documented worst case: ctr 0.8, frequency 4.0, cpa 20, roas 1.5
        // fires 30 + 40 + 20 + 10 = 100.
        let metrics = Metrics {
            ctr: 0.8,
            cpa: 20.0,
            roas: 1.5,
            ..Metrics::default()
        };
        let delivery = DeliveryMetrics {
            frequency: 4.0,
            ..DeliveryMetrics::default()
        };
        assert_eq!(
            fatigue_score(&metrics, &delivery, &Benchmarks::default()),
            100
        );
    }

    #[test]
    fn mid_band_ctr_contributes_ten() {
        let metrics = Metrics {
            ctr: 3.0,
            roas: 5.0,
            ..Metrics::default()
        };
        let delivery = DeliveryMetrics::default();
        assert_eq!(
            fatigue_score(&metrics, &delivery, &Benchmarks::default()),
            10
        );
    }

    #[test]
    fn monotone_in_frequency() {
        let metrics = Metrics {
            ctr: 3.0,
            roas: 5.0,
            ..Metrics::default()
        };
        let benchmarks = Benchmarks::default();
        let mut last = 0;
        for freq in [0.0, 1.5, 2.5, 3.5, 10.0, 1000.0] {
            let delivery = DeliveryMetrics {
                frequency: freq,
                ..DeliveryMetrics::default()
            };
            let score = fatigue_score(&metrics, &delivery, &benchmarks);
            assert!(score >= last, "score regressed at frequency {freq}");
            assert!(score <= 100);
            last = score;
        }
    }

    #[test]
    fn bounded_for_extreme_inputs() {
        let metrics = Metrics {
            ctr: 0.0,
            cpa: 1e9,
            roas: 0.0,
            ..Metrics::default()
        };
        let delivery = DeliveryMetrics {
            frequency: 1000.0,
            ..DeliveryMetrics::default()
        };
        let score = fatigue_score(&metrics, &delivery, &Benchmarks::default());
        assert_eq!(score, 100);
    }

    // --- performance_score ---

    #[test]
    fn strong_active_creative_is_excellent() {
        // 50 + 25 (ctr) + 15 (cpc) + 10 (active) = 100
        let metrics = Metrics {
            ctr: 5.5,
            cpc: 0.20,
            ..Metrics::default()
        };
        let rating = performance_score(&creative(metrics, RecordStatus::Active));
        assert_eq!(rating.score, 100);
        assert_eq!(rating.tier, Tier::Excellent);
    }

    #[test]
    fn middle_cpc_band_contributes_nothing() {
        let base = Metrics {
            ctr: 2.5,
            cpc: 0.75,
            ..Metrics::default()
        };
        // 50 + 15 (ctr) + 0 (cpc in (0.5, 1.0]) + 10 (active) = 75
        let rating = performance_score(&creative(base, RecordStatus::Active));
        assert_eq!(rating.score, 75);
        assert_eq!(rating.tier, Tier::Good);
    }

    #[test]
    fn zero_cpc_means_no_cpc_adjustment() {
        let metrics = Metrics {
            ctr: 2.5,
            cpc: 0.0,
            ..Metrics::default()
        };
        let rating = performance_score(&creative(metrics, RecordStatus::Active));
        assert_eq!(rating.score, 75);
    }

    #[test]
    fn paused_weak_creative_is_poor() {
        // 50 - 15 (ctr) - 10 (cpc) - 20 (paused) = 5
        let metrics = Metrics {
            ctr: 0.4,
            cpc: 1.8,
            ..Metrics::default()
        };
        let rating = performance_score(&creative(metrics, RecordStatus::Paused));
        assert_eq!(rating.score, 5);
        assert_eq!(rating.tier, Tier::Poor);
    }

    #[test]
    fn archived_status_counts_as_inactive() {
        let metrics = Metrics {
            ctr: 0.0,
            cpc: 5.0,
            ..Metrics::default()
        };
        let mut record = creative(metrics, RecordStatus::Paused);
        record.status = RecordStatus::Archived;
        let rating = performance_score(&record);
        assert_eq!(rating.score, 5); // 50 - 15 - 10 - 20
        assert_eq!(rating.tier, Tier::Poor);
    }

    #[test]
    fn tier_boundaries() {
        assert_eq!(Tier::from_score(100), Tier::Excellent);
        assert_eq!(Tier::from_score(80), Tier::Excellent);
        assert_eq!(Tier::from_score(79), Tier::Good);
        assert_eq!(Tier::from_score(60), Tier::Good);
        assert_eq!(Tier::from_score(59), Tier::Warning);
        assert_eq!(Tier::from_score(40), Tier::Warning);
        assert_eq!(Tier::from_score(39), Tier::Poor);
        assert_eq!(Tier::from_score(0), Tier::Poor);
    }
}
