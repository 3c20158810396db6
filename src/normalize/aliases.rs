//! Declarative header alias tables.
//!
//! Ad-platform exports are wildly inconsistent about column naming — the
//! same field arrives as `"Campaign ID"`, `"Campaign Id"`, or `"campaign_id"`
//! depending on the export path and locale. Each logical field gets one
//! ordered alias list here, resolved by [`RawRow::first`](super::RawRow::first):
//! the first alias with a non-empty value wins.
//!
//! Order encodes precedence. Exact-header spellings from real exports come
//! first, snake_case API/UTM keys last.

// --- Campaign-level fields ---

pub const CAMPAIGN_ID: &[&str] = &["Campaign ID", "Campaign Id", "campaign_id"];

pub const CAMPAIGN_NAME: &[&str] = &[
    "Campaign name",
    "Campaign Name",
    "Campaign",
    "campaign_name",
    "utm_campaign",
];

pub const CAMPAIGN_STATUS: &[&str] = &["Campaign Status", "Delivery", "status"];

// --- Shared metric fields ---

pub const SPEND: &[&str] = &[
    "Amount spent (USD)",
    "Amount spent",
    "Amount Spent",
    "Spend",
    "spend",
];

pub const IMPRESSIONS: &[&str] = &["Impressions", "impressions"];

pub const CLICKS: &[&str] = &["Link clicks", "Clicks", "clicks"];

pub const CONVERSIONS: &[&str] = &["Results", "Conversions", "conversions"];

pub const REVENUE: &[&str] = &["Purchase conversion value", "Revenue", "revenue"];

pub const CTR: &[&str] = &["CTR (link click-through rate)", "CTR", "ctr"];

pub const CPC: &[&str] = &[
    "CPC (cost per link click) (USD)",
    "CPC (cost per link click)",
    "CPC",
    "cpc",
];

pub const CPM: &[&str] = &[
    "CPM (cost per 1,000 impressions) (USD)",
    "CPM (cost per 1,000 impressions)",
    "CPM",
    "cpm",
];

pub const CPA: &[&str] = &["Cost per result", "Cost per Action", "CPA", "cpa"];

pub const ROAS: &[&str] = &[
    "Purchase ROAS (return on ad spend)",
    "Return on ad spend (ROAS)",
    "ROAS",
    "roas",
];

// --- Ad / creative-level fields ---

pub const AD_ID: &[&str] = &["Ad ID", "Ad Id", "ad_id"];

pub const AD_NAME: &[&str] = &["Ad name", "Ad Name", "Ad", "ad_name"];

pub const AD_STATUS: &[&str] = &["Ad Status", "Delivery", "status"];

pub const ADSET_ID: &[&str] = &["Ad set ID", "Ad Set ID", "Adset ID", "adset_id"];

pub const ADSET_NAME: &[&str] = &["Ad set name", "Ad Set Name", "Adset name", "adset_name"];

pub const FREQUENCY: &[&str] = &["Frequency", "frequency"];

pub const REACH: &[&str] = &["Reach", "reach"];
