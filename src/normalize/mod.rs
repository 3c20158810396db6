//! Record normalizer — turns heterogeneous raw rows into canonical records.
//!
//! All three inputs converge on the same path:
//!
//! 1. A source-specific front end ([`csv`], [`utm`], [`api`]) produces
//!    [`RawRow`] values — flat string-keyed mappings.
//! 2. [`normalize_rows`] resolves header aliases, coerces numbers (failing
//!    closed to 0), derives missing metrics, and scores creatives.
//!
//! The normalizer is pure: it never touches the store, and a bad row fails
//! alone — the batch continues and reports a skipped-row count.

pub mod aliases;
pub mod api;
pub mod csv;
pub mod derive;
pub mod utm;

use std::collections::BTreeMap;

use chrono::Utc;
use uuid::Uuid;

use crate::advisor::{self, Benchmarks};
use crate::error::ValidationError;
use crate::model::{
    CampaignRecord, CreativeRecord, DeliveryMetrics, Metrics, Performance, RecordStatus, Source,
};

pub use derive::derive_missing_metrics;

// ---------------------------------------------------------------------------
// Raw rows
// ---------------------------------------------------------------------------

/// One raw input row: arbitrary string keys to raw string values.
///
/// The common currency between the input front ends and the normalizer.
/// Lookups trim whitespace and treat empty values as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRow {
    fields: BTreeMap<String, String>,
}

impl RawRow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a row by zipping a header against one line of values.
    ///
    /// Extra values beyond the header are dropped; a short line simply
    /// leaves the trailing fields absent (callers decide whether that is
    /// acceptable — the CSV front end does not pass short lines here).
    pub fn from_header(header: &[String], values: &[String]) -> Self {
        let mut row = Self::new();
        for (key, value) in header.iter().zip(values) {
            row.insert(key, value);
        }
        row
    }

    pub fn insert(&mut self, key: &str, value: &str) {
        self.fields.insert(key.to_string(), value.to_string());
    }

    /// Look up one key. Whitespace-trimmed; empty values count as absent.
    pub fn get(&self, key: &str) -> Option<&str> {
        let value = self.fields.get(key)?.trim();
        if value.is_empty() { None } else { Some(value) }
    }

    /// Resolve an ordered alias list: the first alias with a non-empty
    /// value wins.
    pub fn first(&self, aliases: &[&str]) -> Option<&str> {
        aliases.iter().find_map(|key| self.get(key))
    }

    /// Resolve an alias list to a number, failing closed to 0.
    pub fn number(&self, aliases: &[&str]) -> f64 {
        self.first(aliases).map(coerce_number).unwrap_or(0.0)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }
}

// ---------------------------------------------------------------------------
// Numeric coercion
// ---------------------------------------------------------------------------

/// Tolerant numeric coercion for export values.
///
/// Strips currency symbols, thousands separators, percent signs, and inner
/// whitespace before parsing. Anything that still fails to parse — or
/// parses to NaN, infinity, or a negative — coerces to 0. Never panics,
/// never returns NaN.
pub fn coerce_number(raw: &str) -> f64 {
    let cleaned: String = raw
        .trim()
        .chars()
        .filter(|c| !matches!(c, '$' | '€' | '£' | ',' | '%' | ' '))
        .collect();

    match cleaned.parse::<f64>() {
        Ok(value) if value.is_finite() && value >= 0.0 => value,
        _ => 0.0,
    }
}

/// Generate an opaque record id for inputs that did not carry one.
pub fn generate_id() -> String {
    Uuid::new_v4().simple().to_string()
}

// ---------------------------------------------------------------------------
// Row → record
// ---------------------------------------------------------------------------

/// Resolve the shared metric fields from a raw row.
fn metrics_from_row(raw: &RawRow) -> Metrics {
    let mut metrics = Metrics {
        spend: raw.number(aliases::SPEND),
        impressions: raw.number(aliases::IMPRESSIONS),
        clicks: raw.number(aliases::CLICKS),
        conversions: raw.number(aliases::CONVERSIONS),
        revenue: raw.number(aliases::REVENUE),
        cpm: raw.number(aliases::CPM),
        cpc: raw.number(aliases::CPC),
        ctr: raw.number(aliases::CTR),
        cpa: raw.number(aliases::CPA),
        roas: raw.number(aliases::ROAS),
    };
    derive_missing_metrics(&mut metrics);
    metrics
}

/// Normalize one raw row into a campaign record.
///
/// A missing id gets a generated one; a missing name falls back to
/// `"Unnamed Campaign"`. The returned record always satisfies the
/// finite-non-negative metrics invariant.
pub fn normalize_campaign(raw: &RawRow, source: Source) -> Result<CampaignRecord, ValidationError> {
    let metrics = metrics_from_row(raw);
    metrics.validate()?;

    Ok(CampaignRecord {
        id: raw
            .first(aliases::CAMPAIGN_ID)
            .map(str::to_string)
            .unwrap_or_else(generate_id),
        name: raw
            .first(aliases::CAMPAIGN_NAME)
            .unwrap_or("Unnamed Campaign")
            .to_string(),
        source,
        status: raw
            .first(aliases::CAMPAIGN_STATUS)
            .map(RecordStatus::parse_lenient)
            .unwrap_or_default(),
        metrics,
        date_added: Utc::now(),
    })
}

/// Normalize one raw row into a creative record owned by `campaign_id`.
///
/// The fatigue score is computed eagerly here, not lazily at read time, so
/// a stored creative always carries its advisory state.
pub fn normalize_creative(
    raw: &RawRow,
    source: Source,
    campaign_id: &str,
    benchmarks: &Benchmarks,
) -> Result<CreativeRecord, ValidationError> {
    let metrics = metrics_from_row(raw);
    metrics.validate()?;

    let delivery = DeliveryMetrics {
        frequency: raw.number(aliases::FREQUENCY),
        reach: raw.number(aliases::REACH),
    };

    Ok(CreativeRecord {
        id: raw
            .first(aliases::AD_ID)
            .map(str::to_string)
            .unwrap_or_else(generate_id),
        name: raw
            .first(aliases::AD_NAME)
            .unwrap_or("Unnamed Creative")
            .to_string(),
        campaign_id: campaign_id.to_string(),
        adset_id: raw.first(aliases::ADSET_ID).unwrap_or("").to_string(),
        adset_name: raw.first(aliases::ADSET_NAME).unwrap_or("").to_string(),
        source,
        status: raw
            .first(aliases::AD_STATUS)
            .map(RecordStatus::parse_lenient)
            .unwrap_or_default(),
        performance: Performance {
            fatigue_score: advisor::fatigue_score(&metrics, &delivery, benchmarks),
            trending: Default::default(),
        },
        metrics,
        delivery,
        date_added: Utc::now(),
    })
}

// ---------------------------------------------------------------------------
// Batch normalization
// ---------------------------------------------------------------------------

/// The outcome of normalizing a batch of raw rows.
#[derive(Debug, Clone, Default)]
pub struct Batch {
    pub campaigns: Vec<CampaignRecord>,
    pub creatives: Vec<CreativeRecord>,
    /// Rows dropped for lacking a campaign-identifying column, a short
    /// field count, or (defensively) an invariant breach.
    pub skipped_rows: usize,
}

impl Batch {
    pub fn is_empty(&self) -> bool {
        self.campaigns.is_empty() && self.creatives.is_empty()
    }
}

/// Normalize a batch of rows, deduplicating campaigns by id within the
/// batch and extracting a creative from every row that carries ad columns.
///
/// Rows lacking any campaign-identifying column are skipped and counted,
/// never fatal — the partial-batch policy.
pub fn normalize_rows(rows: &[RawRow], source: Source, benchmarks: &Benchmarks) -> Batch {
    let mut batch = Batch::default();

    for raw in rows {
        if raw.first(aliases::CAMPAIGN_ID).is_none()
            && raw.first(aliases::CAMPAIGN_NAME).is_none()
        {
            batch.skipped_rows += 1;
            continue;
        }

        let campaign = match normalize_campaign(raw, source) {
            Ok(campaign) => campaign,
            Err(_) => {
                batch.skipped_rows += 1;
                continue;
            }
        };

        // Rows sharing a campaign id describe one campaign; keep the first.
        let campaign_id = campaign.id.clone();
        if !batch.campaigns.iter().any(|c| c.id == campaign_id) {
            batch.campaigns.push(campaign);
        }

        if raw.first(aliases::AD_ID).is_some() || raw.first(aliases::AD_NAME).is_some() {
            match normalize_creative(raw, source, &campaign_id, benchmarks) {
                Ok(creative) => batch.creatives.push(creative),
                Err(_) => batch.skipped_rows += 1,
            }
        }
    }

    batch
}

#[cfg(test)]
mod tests {
    use super::*;

    // --- coerce_number ---

    #[test]
    fn plain_numbers_parse() {
        assert_eq!(coerce_number("42"), 42.0);
        assert_eq!(coerce_number("3.14"), 3.14);
        assert_eq!(coerce_number("  250 "), 250.0);
    }

    #[test]
    fn formatted_export_values_parse() {
        assert_eq!(coerce_number("$1,234.56"), 1234.56);
        assert_eq!(coerce_number("2.5%"), 2.5);
        assert_eq!(coerce_number("€10,000"), 10_000.0);
        assert_eq!(coerce_number("1 234"), 1234.0);
    }

    #[test]
    fn garbage_coerces_to_zero_never_nan() {
        for raw in ["", "abc", "12abc", "--", "NaN", "nan", "inf", "-inf", "N/A"] {
            let value = coerce_number(raw);
            assert_eq!(value, 0.0, "input {raw:?} must coerce to 0");
            assert!(!value.is_nan());
        }
    }

    #[test]
    fn negative_values_fail_closed_to_zero() {
        assert_eq!(coerce_number("-5"), 0.0);
        assert_eq!(coerce_number("-0.01"), 0.0);
    }

    // --- RawRow ---

    #[test]
    fn row_lookup_trims_and_skips_empty() {
        let mut row = RawRow::new();
        row.insert("Campaign Name", "  Summer Sale  ");
        row.insert("Campaign ID", "   ");
        assert_eq!(row.get("Campaign Name"), Some("Summer Sale"));
        assert_eq!(row.get("Campaign ID"), None);
    }

    #[test]
    fn alias_resolution_takes_first_non_empty() {
        let mut row = RawRow::new();
        row.insert("Campaign Id", "fallback");
        row.insert("campaign_id", "last");
        assert_eq!(row.first(aliases::CAMPAIGN_ID), Some("fallback"));

        row.insert("Campaign ID", "primary");
        assert_eq!(row.first(aliases::CAMPAIGN_ID), Some("primary"));
    }

    // --- normalize_campaign ---

    #[test]
    fn campaign_defaults_apply_when_fields_absent() {
        let mut row = RawRow::new();
        row.insert("Campaign Name", "Summer Sale");
        let campaign = normalize_campaign(&row, Source::Csv).unwrap();

        assert_eq!(campaign.name, "Summer Sale");
        assert!(!campaign.id.is_empty(), "absent id must be generated");
        assert_eq!(campaign.status, RecordStatus::Active);
        assert_eq!(campaign.source, Source::Csv);
        assert_eq!(campaign.metrics, Metrics::default());
    }

    #[test]
    fn unnamed_campaign_fallback() {
        let mut row = RawRow::new();
        row.insert("Campaign ID", "c1");
        let campaign = normalize_campaign(&row, Source::Api).unwrap();
        assert_eq!(campaign.name, "Unnamed Campaign");
    }

    #[test]
    fn campaign_metrics_coerce_and_derive() {
        let mut row = RawRow::new();
        row.insert("Campaign ID", "c1");
        row.insert("Amount Spent", "$100.00");
        row.insert("Impressions", "10,000");
        row.insert("Link clicks", "250");
        row.insert("CTR", "not-a-number");

        let campaign = normalize_campaign(&row, Source::Csv).unwrap();
        assert_eq!(campaign.metrics.spend, 100.0);
        assert_eq!(campaign.metrics.impressions, 10_000.0);
        assert_eq!(campaign.metrics.clicks, 250.0);
        // malformed CTR coerced to 0, then derived from the counts
        assert_eq!(campaign.metrics.ctr, 2.5);
        assert_eq!(campaign.metrics.cpc, 0.4);
        assert!(campaign.metrics.validate().is_ok());
    }

    // --- normalize_creative ---

    #[test]
    fn creative_scores_fatigue_at_creation() {
        let mut row = RawRow::new();
        row.insert("Ad ID", "ad1");
        row.insert("Ad name", "Carousel v2");
        row.insert("CTR", "0.8");
        row.insert("Frequency", "4.0");
        row.insert("Cost per Action", "20");
        row.insert("ROAS", "1.5");

        let creative =
            normalize_creative(&row, Source::Csv, "c1", &Benchmarks::default()).unwrap();
        assert_eq!(creative.performance.fatigue_score, 100);
        assert_eq!(creative.campaign_id, "c1");
        assert_eq!(creative.delivery.frequency, 4.0);
    }

    // --- normalize_rows ---

    #[test]
    fn rows_without_campaign_identity_are_skipped_and_counted() {
        let mut good = RawRow::new();
        good.insert("Campaign Name", "Summer Sale");
        let mut bad = RawRow::new();
        bad.insert("Impressions", "1000");

        let batch = normalize_rows(
            &[good, bad],
            Source::Csv,
            &Benchmarks::default(),
        );
        assert_eq!(batch.campaigns.len(), 1);
        assert_eq!(batch.skipped_rows, 1);
    }

    #[test]
    fn batch_deduplicates_campaigns_by_id() {
        let mut row_a = RawRow::new();
        row_a.insert("Campaign ID", "c1");
        row_a.insert("Campaign Name", "Summer Sale");
        row_a.insert("Ad ID", "ad1");
        let mut row_b = RawRow::new();
        row_b.insert("Campaign ID", "c1");
        row_b.insert("Campaign Name", "Summer Sale");
        row_b.insert("Ad ID", "ad2");

        let batch = normalize_rows(&[row_a, row_b], Source::Csv, &Benchmarks::default());
        assert_eq!(batch.campaigns.len(), 1);
        assert_eq!(batch.creatives.len(), 2);
        assert_eq!(batch.skipped_rows, 0);
    }
}
