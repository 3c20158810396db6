//! Canonical record shapes shared by the normalizer, the advisory engine,
//! and the store.
//!
//! All three input sources (UTM link, CSV export, API payload) converge on
//! these types. Once normalized, every metric field is present, finite, and
//! non-negative — consumers never see `NaN` or missing fields.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

// ---------------------------------------------------------------------------
// Provenance and status
// ---------------------------------------------------------------------------

/// Where a record came from. Fixed at creation, never mutated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Utm,
    Csv,
    Api,
}

impl std::fmt::Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Utm => write!(f, "utm"),
            Self::Csv => write!(f, "csv"),
            Self::Api => write!(f, "api"),
        }
    }
}

/// Delivery status of a campaign or creative.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordStatus {
    #[default]
    Active,
    Paused,
    Archived,
    InReview,
    Unknown,
}

impl RecordStatus {
    /// Lenient parse of the status strings seen in ad-platform exports
    /// (`"Active"`, `"ACTIVE"`, `"paused"`, `"In review"`, …).
    ///
    /// Unrecognized values map to [`RecordStatus::Unknown`] rather than
    /// failing the record.
    pub fn parse_lenient(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "active" | "delivering" => Self::Active,
            "paused" | "inactive" | "off" => Self::Paused,
            "archived" | "deleted" => Self::Archived,
            "in_review" | "in review" | "pending_review" | "pending review" => Self::InReview,
            "" => Self::Active,
            _ => Self::Unknown,
        }
    }
}

impl std::fmt::Display for RecordStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Active => write!(f, "active"),
            Self::Paused => write!(f, "paused"),
            Self::Archived => write!(f, "archived"),
            Self::InReview => write!(f, "in_review"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

// ---------------------------------------------------------------------------
// Metrics
// ---------------------------------------------------------------------------

/// The fixed set of numeric fields every record carries.
///
/// Fields the input did not supply default to 0 and may later be filled by
/// [`derive_missing_metrics`](crate::normalize::derive_missing_metrics) —
/// derivation never overwrites a directly supplied value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Metrics {
    pub spend: f64,
    pub impressions: f64,
    pub clicks: f64,
    pub conversions: f64,
    pub revenue: f64,
    pub cpm: f64,
    pub cpc: f64,
    pub ctr: f64,
    pub cpa: f64,
    pub roas: f64,
}

impl Metrics {
    /// Check the finite-non-negative invariant on every field.
    ///
    /// Coercion rules make a breach unreachable in practice; if one occurs
    /// anyway, the single record fails — never the batch.
    pub fn validate(&self) -> Result<(), ValidationError> {
        for (field, value) in self.fields() {
            if !value.is_finite() || value < 0.0 {
                return Err(ValidationError { field, value });
            }
        }
        Ok(())
    }

    /// Name/value pairs for every metric field, in declaration order.
    pub fn fields(&self) -> [(&'static str, f64); 10] {
        [
            ("spend", self.spend),
            ("impressions", self.impressions),
            ("clicks", self.clicks),
            ("conversions", self.conversions),
            ("revenue", self.revenue),
            ("cpm", self.cpm),
            ("cpc", self.cpc),
            ("ctr", self.ctr),
            ("cpa", self.cpa),
            ("roas", self.roas),
        ]
    }
}

/// Creative-only delivery metrics, on top of the shared [`Metrics`] set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeliveryMetrics {
    pub frequency: f64,
    pub reach: f64,
}

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// A normalized ad campaign.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CampaignRecord {
    pub id: String,
    pub name: String,
    pub source: Source,
    pub status: RecordStatus,
    pub metrics: Metrics,
    pub date_added: DateTime<Utc>,
}

/// Directional trend of a creative's performance.
///
/// The dashboards this replaces never computed a real trend — every creative
/// was tagged stable. Kept as an enum so a trend model can slot in later
/// without a record-format change.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trending {
    Up,
    #[default]
    Stable,
    Down,
}

/// Advisory-engine outputs attached to a creative at creation time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Performance {
    /// Heuristic audience-fatigue estimate, 0 (fresh) to 100 (exhausted).
    pub fatigue_score: u8,
    pub trending: Trending,
}

/// A normalized ad creative, owned by exactly one campaign via `campaign_id`.
///
/// Campaign deletion cascades to its creatives; the store enforces that,
/// not the normalizer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreativeRecord {
    pub id: String,
    pub name: String,
    pub campaign_id: String,
    #[serde(default)]
    pub adset_id: String,
    #[serde(default)]
    pub adset_name: String,
    pub source: Source,
    pub status: RecordStatus,
    pub metrics: Metrics,
    pub delivery: DeliveryMetrics,
    pub performance: Performance,
    pub date_added: DateTime<Utc>,
}
