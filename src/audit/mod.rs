//! Import audit log — one JSONL line per import operation.
//!
//! Records what each import did (records added/updated, rows skipped) so
//! `adlens report` can show recent history. Best-effort: logging failures
//! never fail the import itself.
//!
//! Log file: `<root>/import-log.jsonl` (`~/.adlens/` in production).

use std::fs::{self, OpenOptions, create_dir_all};
use std::io::{BufRead, BufReader, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::model::Source;

/// One import operation, as recorded in the audit log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportEvent {
    pub timestamp: String,
    pub source: Source,
    pub campaigns_added: usize,
    pub campaigns_updated: usize,
    pub creatives_added: usize,
    pub creatives_updated: usize,
    #[serde(default)]
    pub rows_skipped: usize,
}

impl ImportEvent {
    pub fn new(source: Source) -> Self {
        Self {
            timestamp: Utc::now().to_rfc3339(),
            source,
            campaigns_added: 0,
            campaigns_updated: 0,
            creatives_added: 0,
            creatives_updated: 0,
            rows_skipped: 0,
        }
    }
}

/// Append-only JSONL event log rooted at a directory, like
/// [`FileStore`](crate::store::FileStore).
#[derive(Debug)]
pub struct AuditLog {
    path: PathBuf,
}

impl AuditLog {
    pub fn new(root: PathBuf) -> Self {
        Self {
            path: root.join("import-log.jsonl"),
        }
    }

    /// Log rooted at the user's data directory, `~/.adlens/`.
    pub fn in_home() -> Result<Self> {
        let home = dirs::home_dir().context("could not determine home directory")?;
        Ok(Self::new(home.join(".adlens")))
    }

    /// Append an import event. Failures are silently ignored.
    pub fn record(&self, event: &ImportEvent) {
        let _ = self.append(event);
    }

    /// Read the most recent `limit` import events, newest last.
    ///
    /// Malformed lines are skipped; a missing log yields an empty vec.
    pub fn recent(&self, limit: usize) -> Vec<ImportEvent> {
        let Ok(file) = fs::File::open(&self.path) else {
            return Vec::new();
        };

        let events: Vec<ImportEvent> = BufReader::new(file)
            .lines()
            .map_while(Result::ok)
            .filter_map(|line| serde_json::from_str(&line).ok())
            .collect();

        let start = events.len().saturating_sub(limit);
        events[start..].to_vec()
    }

    fn append(&self, event: &ImportEvent) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            create_dir_all(parent)?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        let json = serde_json::to_string(event)?;
        writeln!(file, "{json}")?;

        Ok(())
    }
}
