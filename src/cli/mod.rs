//! CLI command implementations.
//!
//! Thin presentation layer over the core: every subcommand loads the
//! workspace from the file store, drives the normalizer or the advisory
//! engine, prints, and saves. The core itself never does I/O.
//!
//! - `adlens utm <URL>` — import a UTM-tagged link
//! - `adlens import <FILE>` — import a CSV export
//! - `adlens api <FILE>` — import an API payload (JSON)
//! - `adlens report` — account summary and per-campaign table
//! - `adlens creatives` — creative listing with fatigue and tier
//! - `adlens recommend <ID>` — recommendations for one creative
//! - `adlens tips` — account-level advisory digest
//! - `adlens remove <ID>` — delete a campaign (cascades)
//! - `adlens export [PATH]` — write the export JSON document
//! - `adlens config show|init` — configuration management

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use colored::Colorize;

use crate::advisor::{self, Summary};
use crate::audit::{AuditLog, ImportEvent};
use crate::config;
use crate::model::{CreativeRecord, Source};
use crate::normalize::{Batch, api, csv, utm};
use crate::store::{FileStore, UpsertOutcome, Workspace};

/// Output format for report-style commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
}

impl OutputFormat {
    pub fn from_str_opt(s: Option<&str>) -> Self {
        match s {
            Some("json") => Self::Json,
            Some("csv") => Self::Csv,
            _ => Self::Table,
        }
    }
}

fn open_store() -> Result<FileStore> {
    FileStore::in_home()
}

/// Load configuration and honor its color toggle before any output.
fn load_settings() -> config::AdlensConfig {
    let cfg = config::load();
    if !cfg.output.color {
        colored::control::set_override(false);
    }
    cfg
}

// ---------------------------------------------------------------------------
// Imports
// ---------------------------------------------------------------------------

/// `adlens utm <URL>`
pub fn run_utm(raw_url: &str) -> Result<()> {
    let cfg = load_settings();
    let batch = utm::import_utm(raw_url, &cfg.benchmarks)
        .context("could not process the UTM link")?;

    if batch.is_empty() {
        println!(
            "{}",
            "No Facebook parameters found in that link.".yellow()
        );
        return Ok(());
    }

    apply_and_report(batch, Source::Utm)
}

/// `adlens import <FILE.csv>`
pub fn run_import(path: &Path) -> Result<()> {
    let cfg = load_settings();
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;

    let batch = csv::import_csv(&text, &cfg.benchmarks, cfg.import.strict_columns)
        .with_context(|| format!("could not import {}", path.display()))?;

    if batch.is_empty() {
        println!(
            "{}",
            format!(
                "No campaign rows recognized in {} ({} skipped).",
                path.display(),
                batch.skipped_rows
            )
            .yellow()
        );
        return Ok(());
    }

    apply_and_report(batch, Source::Csv)
}

/// `adlens api <FILE.json>`
pub fn run_api(path: &Path) -> Result<()> {
    let cfg = load_settings();
    let payload = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;

    let batch = api::import_api(&payload, &cfg.benchmarks)
        .with_context(|| format!("could not import {}", path.display()))?;

    if batch.is_empty() {
        println!("{}", "No campaign rows found in the payload.".yellow());
        return Ok(());
    }

    apply_and_report(batch, Source::Api)
}

/// Upsert a normalized batch into the stored workspace, log the import,
/// and print what happened.
fn apply_and_report(batch: Batch, source: Source) -> Result<()> {
    let mut store = open_store()?;
    let mut ws = Workspace::load(&store)?;

    let skipped = batch.skipped_rows;
    let mut event = ImportEvent::new(source);
    event.rows_skipped = skipped;

    for campaign in batch.campaigns {
        match ws.upsert_campaign(campaign) {
            UpsertOutcome::Inserted => event.campaigns_added += 1,
            UpsertOutcome::Updated => event.campaigns_updated += 1,
        }
    }
    for creative in batch.creatives {
        match ws.upsert_creative(creative) {
            UpsertOutcome::Inserted => event.creatives_added += 1,
            UpsertOutcome::Updated => event.creatives_updated += 1,
        }
    }

    ws.save(&mut store)?;
    if let Ok(log) = AuditLog::in_home() {
        log.record(&event);
    }

    println!(
        "{} {} campaigns added, {} updated; {} creatives added, {} updated.",
        "Import complete:".bold().green(),
        event.campaigns_added,
        event.campaigns_updated,
        event.creatives_added,
        event.creatives_updated,
    );
    if skipped > 0 {
        println!("{}", format!("  {skipped} row(s) skipped.").yellow());
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// adlens report
// ---------------------------------------------------------------------------

/// `adlens report`
pub fn run_report(format: OutputFormat) -> Result<()> {
    let cfg = load_settings();
    let store = open_store()?;
    let ws = Workspace::load(&store)?;

    if ws.campaigns.is_empty() {
        println!(
            "{}",
            "No data yet. Import a CSV export, UTM link, or API payload first.".yellow()
        );
        return Ok(());
    }

    let summary = advisor::aggregate(&ws.campaigns);

    match format {
        OutputFormat::Json => print_report_json(&summary, &ws)?,
        OutputFormat::Csv => print_report_csv(&ws),
        OutputFormat::Table => print_report_table(&summary, &ws, cfg.output.max_table_rows),
    }

    Ok(())
}

fn print_report_table(summary: &Summary, ws: &Workspace, max_rows: usize) {
    println!("{}", "Account Summary".bold().cyan());
    println!("{}", "=".repeat(60));
    println!("  {} {}", "Campaigns:   ".bold(), summary.campaigns);
    println!(
        "  {} {}",
        "Total spend: ".bold(),
        format_usd(summary.total_spend)
    );
    println!(
        "  {} {}",
        "Impressions: ".bold(),
        format_count(summary.total_impressions)
    );
    println!(
        "  {} {}",
        "Clicks:      ".bold(),
        format_count(summary.total_clicks)
    );
    println!(
        "  {} {}",
        "Conversions: ".bold(),
        format_count(summary.total_conversions)
    );
    println!(
        "  {} {:.2}%   {} {}   {} {:.2}",
        "CTR:".bold(),
        summary.ctr,
        "CPC:".bold(),
        format_usd(summary.cpc),
        "ROAS:".bold(),
        summary.roas,
    );
    println!();

    println!("{}", "Campaigns".bold().cyan());
    println!(
        "  {:<28} {:>10} {:>12} {:>8} {:>7} {:>7} Status",
        "Name", "Spend", "Impressions", "Clicks", "CTR%", "ROAS"
    );
    println!("  {}", "-".repeat(84));
    for (i, c) in ws.campaigns.iter().take(max_rows).enumerate() {
        let line = format!(
            "  {:<28} {:>10} {:>12} {:>8} {:>7.2} {:>7.2} {}",
            truncate(&c.name, 28),
            format_usd(c.metrics.spend),
            format_count(c.metrics.impressions),
            format_count(c.metrics.clicks),
            c.metrics.ctr,
            c.metrics.roas,
            c.status,
        );
        if i % 2 == 0 {
            println!("{line}");
        } else {
            println!("{}", line.dimmed());
        }
    }
    if ws.campaigns.len() > max_rows {
        println!(
            "  {}",
            format!("… and {} more", ws.campaigns.len() - max_rows).dimmed()
        );
    }

    let history = AuditLog::in_home()
        .map(|log| log.recent(5))
        .unwrap_or_default();
    if !history.is_empty() {
        println!();
        println!("{}", "Recent Imports".bold().cyan());
        for event in history {
            println!(
                "  {}  {:<4} +{} campaigns / +{} creatives ({} skipped)",
                event.timestamp.get(..10).unwrap_or("?"),
                event.source.to_string(),
                event.campaigns_added,
                event.creatives_added,
                event.rows_skipped,
            );
        }
    }
}

fn print_report_json(summary: &Summary, ws: &Workspace) -> Result<()> {
    let value = serde_json::json!({
        "summary": {
            "campaigns": summary.campaigns,
            "total_spend": summary.total_spend,
            "total_impressions": summary.total_impressions,
            "total_clicks": summary.total_clicks,
            "total_conversions": summary.total_conversions,
            "total_revenue": summary.total_revenue,
            "ctr": summary.ctr,
            "cpc": summary.cpc,
            "cpm": summary.cpm,
            "roas": summary.roas,
        },
        "campaigns": ws.campaigns,
    });
    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}

fn print_report_csv(ws: &Workspace) {
    println!("id,name,source,status,spend,impressions,clicks,conversions,ctr,cpc,cpm,roas");
    for c in &ws.campaigns {
        println!(
            "{},{},{},{},{},{},{},{},{},{},{},{}",
            c.id,
            csv_field(&c.name),
            c.source,
            c.status,
            c.metrics.spend,
            c.metrics.impressions,
            c.metrics.clicks,
            c.metrics.conversions,
            c.metrics.ctr,
            c.metrics.cpc,
            c.metrics.cpm,
            c.metrics.roas,
        );
    }
}

// ---------------------------------------------------------------------------
// adlens creatives
// ---------------------------------------------------------------------------

/// `adlens creatives [--campaign ID] [--fatigued]`
pub fn run_creatives(campaign: Option<&str>, fatigued_only: bool) -> Result<()> {
    let cfg = load_settings();
    let store = open_store()?;
    let ws = Workspace::load(&store)?;

    let mut creatives: Vec<&CreativeRecord> = ws
        .creatives
        .iter()
        .filter(|c| campaign.is_none_or(|id| c.campaign_id == id))
        .filter(|c| !fatigued_only || c.performance.fatigue_score > 70)
        .collect();
    creatives.sort_by(|a, b| b.performance.fatigue_score.cmp(&a.performance.fatigue_score));

    if creatives.is_empty() {
        println!("{}", "No matching creatives.".yellow());
        return Ok(());
    }

    println!("{}", "Creatives".bold().cyan());
    println!(
        "  {:<12} {:<24} {:>7} {:>6} {:>8} {:>6} {:<10} Status",
        "Id", "Name", "CTR%", "Freq", "Fatigue", "Score", "Tier"
    );
    println!("  {}", "-".repeat(88));
    for c in creatives.into_iter().take(cfg.output.max_table_rows) {
        let rating = advisor::performance_score(c);
        let fatigue = c.performance.fatigue_score;
        let fatigue_str = if fatigue > 70 {
            format!("{fatigue:>7}%").red().to_string()
        } else if fatigue > 40 {
            format!("{fatigue:>7}%").yellow().to_string()
        } else {
            format!("{fatigue:>7}%").green().to_string()
        };
        println!(
            "  {:<12} {:<24} {:>7.2} {:>6.1} {} {:>6} {:<10} {}",
            truncate(&c.id, 12),
            truncate(&c.name, 24),
            c.metrics.ctr,
            c.delivery.frequency,
            fatigue_str,
            rating.score,
            rating.tier.to_string(),
            c.status,
        );
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// adlens recommend / tips
// ---------------------------------------------------------------------------

/// `adlens recommend <CREATIVE_ID>`
pub fn run_recommend(creative_id: &str) -> Result<()> {
    let cfg = load_settings();
    let store = open_store()?;
    let ws = Workspace::load(&store)?;

    let creative = ws
        .creative(creative_id)
        .with_context(|| format!("no creative with id '{creative_id}'"))?;

    let rating = advisor::performance_score(creative);
    println!(
        "{} {} — fatigue {}%, performance {} ({})",
        "Creative".bold().cyan(),
        creative.name.bold(),
        creative.performance.fatigue_score,
        rating.score,
        rating.tier,
    );
    println!();

    for rec in advisor::recommendations(creative, &cfg.benchmarks) {
        let tag = match rec.priority {
            advisor::Priority::High => "[high]  ".red().bold(),
            advisor::Priority::Medium => "[medium]".yellow(),
            advisor::Priority::Low => "[low]   ".green(),
        };
        println!("  {tag} {}", rec.text);
    }

    Ok(())
}

/// `adlens tips`
pub fn run_tips() -> Result<()> {
    let cfg = load_settings();
    let store = open_store()?;
    let ws = Workspace::load(&store)?;

    if ws.campaigns.is_empty() {
        println!(
            "{}",
            "Add campaigns first to get account-level tips.".yellow()
        );
        return Ok(());
    }

    println!("{}", "Account Tips".bold().cyan());
    for tip in advisor::account_tips(&ws.campaigns, &ws.creatives, &cfg.benchmarks) {
        println!("  • {tip}");
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// adlens remove / export
// ---------------------------------------------------------------------------

/// `adlens remove <CAMPAIGN_ID>`
pub fn run_remove(campaign_id: &str) -> Result<()> {
    let mut store = open_store()?;
    let mut ws = Workspace::load(&store)?;

    let creatives_before = ws.creatives.len();
    if !ws.remove_campaign(campaign_id) {
        anyhow::bail!("no campaign with id '{campaign_id}'");
    }
    let cascaded = creatives_before - ws.creatives.len();

    ws.save(&mut store)?;
    println!(
        "{} campaign '{}' removed ({} creative(s) cascaded).",
        "Done:".bold().green(),
        campaign_id,
        cascaded,
    );

    Ok(())
}

/// `adlens export [PATH]`
pub fn run_export(path: Option<PathBuf>) -> Result<()> {
    let store = open_store()?;
    let ws = Workspace::load(&store)?;

    let doc = ws.export_document();
    let json = serde_json::to_string_pretty(&doc)?;

    let path = path.unwrap_or_else(|| {
        let date = chrono::Utc::now().format("%Y-%m-%d");
        PathBuf::from(format!("adlens_export_{date}.json"))
    });
    fs::write(&path, json).with_context(|| format!("failed to write {}", path.display()))?;

    println!(
        "{} {} campaigns and {} creatives exported to {}",
        "Done:".bold().green(),
        ws.campaigns.len(),
        ws.creatives.len(),
        path.display(),
    );

    Ok(())
}

// ---------------------------------------------------------------------------
// adlens config
// ---------------------------------------------------------------------------

/// `adlens config show`
pub fn run_config_show() -> Result<()> {
    print!("{}", config::show_effective_config()?);
    Ok(())
}

/// `adlens config init [--force]`
pub fn run_config_init(force: bool) -> Result<()> {
    let path = config::init_config(force)?;
    println!("{} wrote {}", "Done:".bold().green(), path.display());
    Ok(())
}

// ---------------------------------------------------------------------------
// Formatting helpers
// ---------------------------------------------------------------------------

fn format_usd(amount: f64) -> String {
    format!("${amount:.2}")
}

/// Whole-number counts with thousands separators.
fn format_count(value: f64) -> String {
    let n = value.round() as u64;
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{cut}…")
    }
}

/// Quote a CSV output field when it contains a comma or quote.
fn csv_field(s: &str) -> String {
    if s.contains(',') || s.contains('"') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}
