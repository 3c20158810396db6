//! Fill metrics the input omitted from the ones it supplied.

use crate::model::Metrics;

/// Derive ctr, cpc, cpm, and roas when they are zero/absent and the source
/// numbers to compute them exist.
///
/// A directly supplied metric is never overwritten — a zero check gates
/// every derivation. Zero denominators leave the field at 0 rather than
/// producing infinity.
pub fn derive_missing_metrics(metrics: &mut Metrics) {
    if metrics.ctr == 0.0 && metrics.impressions > 0.0 && metrics.clicks > 0.0 {
        metrics.ctr = metrics.clicks / metrics.impressions * 100.0;
    }

    if metrics.cpc == 0.0 && metrics.clicks > 0.0 {
        metrics.cpc = metrics.spend / metrics.clicks;
    }

    if metrics.cpm == 0.0 && metrics.impressions > 0.0 {
        metrics.cpm = metrics.spend / metrics.impressions * 1000.0;
    }

    if metrics.roas == 0.0 && metrics.spend > 0.0 {
        metrics.roas = metrics.revenue / metrics.spend;
    }
}
