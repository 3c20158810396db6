//! Aggregate metrics across the stored campaign set.

use crate::model::CampaignRecord;

/// Account-wide totals and derived rates for the report view.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Summary {
    pub campaigns: usize,
    pub total_spend: f64,
    pub total_impressions: f64,
    pub total_clicks: f64,
    pub total_conversions: f64,
    pub total_revenue: f64,
    /// Overall CTR, percent.
    pub ctr: f64,
    /// Overall cost per click, USD.
    pub cpc: f64,
    /// Overall cost per 1,000 impressions, USD.
    pub cpm: f64,
    /// Overall return on ad spend.
    pub roas: f64,
}

/// Sum spend/impressions/clicks/conversions/revenue and derive the overall
/// rates from the totals.
///
/// The derived rates come from the summed numerators and denominators
/// (Σclicks / Σimpressions), not from averaging per-record rates — averaging
/// lets small-sample records skew the account view. Zero denominators yield
/// 0, never infinity.
pub fn aggregate(records: &[CampaignRecord]) -> Summary {
    let mut summary = Summary {
        campaigns: records.len(),
        ..Summary::default()
    };

    for record in records {
        summary.total_spend += record.metrics.spend;
        summary.total_impressions += record.metrics.impressions;
        summary.total_clicks += record.metrics.clicks;
        summary.total_conversions += record.metrics.conversions;
        summary.total_revenue += record.metrics.revenue;
    }

    summary.ctr = ratio(summary.total_clicks, summary.total_impressions) * 100.0;
    summary.cpc = ratio(summary.total_spend, summary.total_clicks);
    summary.cpm = ratio(summary.total_spend, summary.total_impressions) * 1000.0;
    summary.roas = ratio(summary.total_revenue, summary.total_spend);

    summary
}

/// Division guarded against a zero denominator.
fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}
