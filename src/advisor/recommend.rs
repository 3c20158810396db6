//! Recommendation rules for a single creative, plus the account-level digest.
//!
//! Rules are a fixed declarative table evaluated independently in
//! declaration order — every rule that fires is emitted, nothing is
//! re-sorted by priority. When no rule fires the output is a single
//! low-priority "performing well" entry, so the result is never empty.

use crate::advisor::benchmarks::Benchmarks;
use crate::model::{CampaignRecord, CreativeRecord};

// ---------------------------------------------------------------------------
// Per-creative recommendations
// ---------------------------------------------------------------------------

/// Urgency of a recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::High => write!(f, "high"),
            Self::Medium => write!(f, "medium"),
            Self::Low => write!(f, "low"),
        }
    }
}

/// One advisory entry for a creative.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Recommendation {
    pub priority: Priority,
    pub text: String,
}

/// One condition → advice rule. Declaration order is emission order.
struct Rule {
    priority: Priority,
    text: &'static str,
    fires: fn(&CreativeRecord, &Benchmarks) -> bool,
}

const RULES: &[Rule] = &[
    Rule {
        priority: Priority::High,
        text: "CTR is below the benchmark range. Refresh the creative or test new \
               headlines and imagery.",
        fires: |c, b| c.metrics.ctr < b.ctr.low,
    },
    Rule {
        priority: Priority::High,
        text: "High frequency risks audience fatigue. Rotate in new creatives or \
               broaden the audience.",
        fires: |c, b| c.delivery.frequency > b.frequency_threshold,
    },
    Rule {
        priority: Priority::Medium,
        text: "ROAS is below the industry median. Optimize the landing page or \
               revisit the bidding strategy.",
        fires: |c, b| c.metrics.roas < b.roas_median,
    },
    Rule {
        priority: Priority::Medium,
        text: "Cost per click is above the benchmark range. Improve ad relevance \
               or tighten audience targeting.",
        fires: |c, b| c.metrics.cpc > b.cpc.high,
    },
    Rule {
        priority: Priority::High,
        text: "The creative shows signs of fatigue. Produce new variants now or \
               pause delivery.",
        fires: |c, _| c.performance.fatigue_score > 70,
    },
];

/// Evaluate the rule table against one creative.
///
/// Guaranteed non-empty: a creative that trips no rule gets a single
/// low-priority confirmation instead.
pub fn recommendations(creative: &CreativeRecord, benchmarks: &Benchmarks) -> Vec<Recommendation> {
    let mut out: Vec<Recommendation> = RULES
        .iter()
        .filter(|rule| (rule.fires)(creative, benchmarks))
        .map(|rule| Recommendation {
            priority: rule.priority,
            text: rule.text.to_string(),
        })
        .collect();

    if out.is_empty() {
        out.push(Recommendation {
            priority: Priority::Low,
            text: "The creative is performing well. Keep monitoring and consider \
                   scaling the budget."
                .to_string(),
        });
    }

    out
}

// ---------------------------------------------------------------------------
// Account-level digest
// ---------------------------------------------------------------------------

/// Account-wide advisory digest across all stored records.
///
/// Names the specific campaigns and creatives worth acting on, in the
/// order: scale winners, fix losers, refresh fatigued, retest low-CTR.
pub fn account_tips(
    campaigns: &[CampaignRecord],
    creatives: &[CreativeRecord],
    benchmarks: &Benchmarks,
) -> Vec<String> {
    let mut tips = Vec::new();

    let winners: Vec<&str> = campaigns
        .iter()
        .filter(|c| c.metrics.roas > benchmarks.roas_high)
        .map(|c| c.name.as_str())
        .collect();
    if !winners.is_empty() {
        tips.push(format!(
            "Increase budget on high-ROAS campaigns: {}",
            winners.join(", ")
        ));
    }

    let losers: Vec<&str> = campaigns
        .iter()
        .filter(|c| c.metrics.roas < benchmarks.roas_median)
        .map(|c| c.name.as_str())
        .collect();
    if !losers.is_empty() {
        tips.push(format!(
            "Optimize or pause low-ROAS campaigns: {}",
            losers.join(", ")
        ));
    }

    let fatigued: Vec<&str> = creatives
        .iter()
        .filter(|c| c.performance.fatigue_score > 70)
        .map(|c| c.name.as_str())
        .collect();
    if !fatigued.is_empty() {
        tips.push(format!("Refresh fatigued creatives: {}", fatigued.join(", ")));
    }

    let low_ctr: Vec<&str> = creatives
        .iter()
        .filter(|c| c.metrics.ctr < benchmarks.ctr.low)
        .map(|c| c.name.as_str())
        .collect();
    if !low_ctr.is_empty() {
        tips.push(format!(
            "Test new variants for low-CTR creatives: {}",
            low_ctr.join(", ")
        ));
    }

    if tips.is_empty() {
        tips.push("No account-level issues detected. Keep monitoring.".to_string());
    }

    tips
}
