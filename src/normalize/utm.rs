//! UTM link front end — extracts Facebook tracking parameters from a URL.
//!
//! Ad platforms fill link templates like `?utm_campaign={{campaign.name}}`
//! at delivery time. A value still containing `{{`/`}}` markers means the
//! template was never expanded — it is missing data, not a literal name,
//! and is treated as absent.

use url::Url;

use crate::advisor::Benchmarks;
use crate::error::ParseError;
use crate::model::Source;
use crate::normalize::{Batch, RawRow, aliases, normalize_campaign, normalize_creative};

/// The Facebook-style query parameters the normalizer recognizes. Anything
/// else in the query string is ignored.
pub const FACEBOOK_PARAMS: &[&str] = &[
    "utm_campaign",
    "utm_source",
    "utm_placement",
    "campaign_id",
    "adset_id",
    "ad_id",
    "adset_name",
    "ad_name",
];

/// Extract the recognized Facebook parameters from a URL's query string.
///
/// Returns a [`ParseError::InvalidUrl`] for a string that does not parse as
/// a URL; an empty row (valid URL, no recognized parameters) is not an
/// error — the caller decides how to present it.
pub fn extract_utm_parameters(raw_url: &str) -> Result<RawRow, ParseError> {
    let url =
        Url::parse(raw_url.trim()).map_err(|err| ParseError::InvalidUrl(err.to_string()))?;

    let mut row = RawRow::new();
    for (key, value) in url.query_pairs() {
        if !FACEBOOK_PARAMS.contains(&key.as_ref()) {
            continue;
        }
        // Unexpanded template placeholder — treat as absent.
        if value.contains("{{") || value.contains("}}") {
            continue;
        }
        row.insert(&key, &value);
    }

    Ok(row)
}

/// Parse a UTM-tagged link into normalized records.
///
/// Always yields at most one campaign; a creative is added only when the
/// link carries both `ad_id` and `ad_name`. A link with no recognized
/// parameters yields an empty batch.
pub fn import_utm(raw_url: &str, benchmarks: &Benchmarks) -> Result<Batch, ParseError> {
    let row = extract_utm_parameters(raw_url)?;

    let mut batch = Batch::default();
    if row.is_empty() {
        return Ok(batch);
    }

    // A creative record only makes sense with both an id and a name.
    let has_ad = row.first(aliases::AD_ID).is_some() && row.first(aliases::AD_NAME).is_some();

    match normalize_campaign(&row, Source::Utm) {
        Ok(campaign) => {
            if has_ad {
                match normalize_creative(&row, Source::Utm, &campaign.id, benchmarks) {
                    Ok(creative) => batch.creatives.push(creative),
                    Err(_) => batch.skipped_rows += 1,
                }
            }
            batch.campaigns.push(campaign);
        }
        Err(_) => batch.skipped_rows += 1,
    }

    Ok(batch)
}
