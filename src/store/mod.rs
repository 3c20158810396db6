//! Record storage — an injected key-value collaborator plus the in-memory
//! workspace that owns the record collections.
//!
//! The normalizer and advisory engine never touch persistence; the
//! presentation layer loads a [`Workspace`] from a [`KeyValue`] store,
//! applies upserts, and saves it back. Records persist as serialized JSON
//! arrays under fixed keys, so any get/set/remove-by-string-key backend
//! works — files on disk in production, a hash map in tests.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Utc;

use crate::model::{CampaignRecord, CreativeRecord};

/// Storage key for the serialized campaign array.
pub const CAMPAIGNS_KEY: &str = "campaigns";
/// Storage key for the serialized creative array.
pub const CREATIVES_KEY: &str = "creatives";

// ---------------------------------------------------------------------------
// Key-value collaborator
// ---------------------------------------------------------------------------

/// The persistence collaborator: string keys to string values.
///
/// `get` distinguishes "key absent" (`Ok(None)`) from "backend failed"
/// (`Err`) — a caller that treated an unreadable backend as empty would
/// overwrite the still-existing data on the next save.
pub trait KeyValue {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
    fn remove(&mut self, key: &str) -> Result<()>;
}

/// In-memory store for tests and dry runs.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValue for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}

/// File-backed store: one `<key>.json` file per key under a root directory
/// (`~/.adlens/` by default).
#[derive(Debug)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Store rooted at the user's data directory, `~/.adlens/`.
    pub fn in_home() -> Result<Self> {
        let home = dirs::home_dir().context("could not determine home directory")?;
        Ok(Self::new(home.join(".adlens")))
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.json"))
    }
}

impl KeyValue for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err).with_context(|| format!("failed to read {}", path.display())),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        fs::create_dir_all(&self.root)
            .with_context(|| format!("failed to create {}", self.root.display()))?;
        let path = self.path_for(key);
        fs::write(&path, value).with_context(|| format!("failed to write {}", path.display()))
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        let path = self.path_for(key);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err).with_context(|| format!("failed to remove {}", path.display())),
        }
    }
}

// ---------------------------------------------------------------------------
// Workspace
// ---------------------------------------------------------------------------

/// What an upsert did to the collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    Inserted,
    Updated,
}

/// The record collections, loaded into memory for one invocation.
///
/// Upserts are atomic with respect to the collection: an id lookup plus
/// replace-or-append happens as one step, so a re-import can never leave a
/// duplicate or a half-written entry behind.
#[derive(Debug, Clone, Default)]
pub struct Workspace {
    pub campaigns: Vec<CampaignRecord>,
    pub creatives: Vec<CreativeRecord>,
}

impl Workspace {
    /// Load both collections from the store. Missing or unreadable keys
    /// yield empty collections; corrupt JSON is an error the caller
    /// surfaces rather than silently discarding stored data.
    pub fn load(store: &dyn KeyValue) -> Result<Self> {
        let campaigns = match store.get(CAMPAIGNS_KEY)? {
            Some(json) => {
                serde_json::from_str(&json).context("stored campaign data is corrupt")?
            }
            None => Vec::new(),
        };
        let creatives = match store.get(CREATIVES_KEY)? {
            Some(json) => {
                serde_json::from_str(&json).context("stored creative data is corrupt")?
            }
            None => Vec::new(),
        };
        Ok(Self {
            campaigns,
            creatives,
        })
    }

    /// Serialize both collections back to the store.
    pub fn save(&self, store: &mut dyn KeyValue) -> Result<()> {
        store.set(CAMPAIGNS_KEY, &serde_json::to_string(&self.campaigns)?)?;
        store.set(CREATIVES_KEY, &serde_json::to_string(&self.creatives)?)?;
        Ok(())
    }

    pub fn campaign(&self, id: &str) -> Option<&CampaignRecord> {
        self.campaigns.iter().find(|c| c.id == id)
    }

    pub fn creative(&self, id: &str) -> Option<&CreativeRecord> {
        self.creatives.iter().find(|c| c.id == id)
    }

    /// Creatives owned by one campaign.
    pub fn creatives_of(&self, campaign_id: &str) -> Vec<&CreativeRecord> {
        self.creatives
            .iter()
            .filter(|c| c.campaign_id == campaign_id)
            .collect()
    }

    /// Insert or replace a campaign by id.
    pub fn upsert_campaign(&mut self, record: CampaignRecord) -> UpsertOutcome {
        match self.campaigns.iter_mut().find(|c| c.id == record.id) {
            Some(existing) => {
                *existing = record;
                UpsertOutcome::Updated
            }
            None => {
                self.campaigns.push(record);
                UpsertOutcome::Inserted
            }
        }
    }

    /// Insert or replace a creative by id.
    pub fn upsert_creative(&mut self, record: CreativeRecord) -> UpsertOutcome {
        match self.creatives.iter_mut().find(|c| c.id == record.id) {
            Some(existing) => {
                *existing = record;
                UpsertOutcome::Updated
            }
            None => {
                self.creatives.push(record);
                UpsertOutcome::Inserted
            }
        }
    }

    /// Remove a campaign and cascade to its creatives.
    ///
    /// Returns `false` (and removes nothing) when the id is unknown.
    pub fn remove_campaign(&mut self, id: &str) -> bool {
        let before = self.campaigns.len();
        self.campaigns.retain(|c| c.id != id);
        if self.campaigns.len() == before {
            return false;
        }
        self.creatives.retain(|c| c.campaign_id != id);
        true
    }

    pub fn remove_creative(&mut self, id: &str) -> bool {
        let before = self.creatives.len();
        self.creatives.retain(|c| c.id != id);
        self.creatives.len() != before
    }

    /// The export document: `{campaigns, creatives, exportDate}`.
    pub fn export_document(&self) -> serde_json::Value {
        serde_json::json!({
            "campaigns": self.campaigns,
            "creatives": self.creatives,
            "exportDate": Utc::now().to_rfc3339(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Metrics, RecordStatus, Source};

    fn campaign(id: &str, spend: f64) -> CampaignRecord {
        CampaignRecord {
            id: id.to_string(),
            name: format!("Campaign {id}"),
            source: Source::Csv,
            status: RecordStatus::Active,
            metrics: Metrics {
                spend,
                ..Metrics::default()
            },
            date_added: Utc::now(),
        }
    }

    fn creative(id: &str, campaign_id: &str) -> CreativeRecord {
        CreativeRecord {
            id: id.to_string(),
            name: format!("Creative {id}"),
            campaign_id: campaign_id.to_string(),
            adset_id: String::new(),
            adset_name: String::new(),
            source: Source::Csv,
            status: RecordStatus::Active,
            metrics: Metrics::default(),
            delivery: Default::default(),
            performance: Default::default(),
            date_added: Utc::now(),
        }
    }

    #[test]
    fn upsert_inserts_then_updates_in_place() {
        let mut ws = Workspace::default();
        assert_eq!(ws.upsert_campaign(campaign("c1", 100.0)), UpsertOutcome::Inserted);
        assert_eq!(ws.upsert_campaign(campaign("c1", 250.0)), UpsertOutcome::Updated);

        assert_eq!(ws.campaigns.len(), 1);
        assert_eq!(ws.campaign("c1").unwrap().metrics.spend, 250.0);
    }

    #[test]
    fn remove_campaign_cascades_to_creatives() {
        let mut ws = Workspace::default();
        ws.upsert_campaign(campaign("c1", 1.0));
        ws.upsert_campaign(campaign("c2", 2.0));
        ws.upsert_creative(creative("ad1", "c1"));
        ws.upsert_creative(creative("ad2", "c1"));
        ws.upsert_creative(creative("ad3", "c2"));

        assert!(ws.remove_campaign("c1"));
        assert_eq!(ws.campaigns.len(), 1);
        assert_eq!(ws.creatives.len(), 1);
        assert_eq!(ws.creatives[0].id, "ad3");
    }

    #[test]
    fn creatives_of_filters_by_owner() {
        let mut ws = Workspace::default();
        ws.upsert_creative(creative("ad1", "c1"));
        ws.upsert_creative(creative("ad2", "c2"));
        ws.upsert_creative(creative("ad3", "c1"));

        let owned = ws.creatives_of("c1");
        assert_eq!(owned.len(), 2);
        assert!(owned.iter().all(|c| c.campaign_id == "c1"));
    }

    #[test]
    fn remove_creative_leaves_the_campaign() {
        let mut ws = Workspace::default();
        ws.upsert_campaign(campaign("c1", 1.0));
        ws.upsert_creative(creative("ad1", "c1"));

        assert!(ws.remove_creative("ad1"));
        assert!(!ws.remove_creative("ad1"));
        assert_eq!(ws.campaigns.len(), 1);
    }

    #[test]
    fn remove_unknown_campaign_is_a_noop() {
        let mut ws = Workspace::default();
        ws.upsert_campaign(campaign("c1", 1.0));
        ws.upsert_creative(creative("ad1", "c1"));

        assert!(!ws.remove_campaign("nope"));
        assert_eq!(ws.campaigns.len(), 1);
        assert_eq!(ws.creatives.len(), 1);
    }

    #[test]
    fn save_load_roundtrip_through_memory_store() {
        let mut ws = Workspace::default();
        ws.upsert_campaign(campaign("c1", 100.0));
        ws.upsert_creative(creative("ad1", "c1"));

        let mut store = MemoryStore::new();
        ws.save(&mut store).unwrap();

        let loaded = Workspace::load(&store).unwrap();
        assert_eq!(loaded.campaigns, ws.campaigns);
        assert_eq!(loaded.creatives, ws.creatives);
    }

    #[test]
    fn load_from_empty_store_yields_empty_workspace() {
        let store = MemoryStore::new();
        let ws = Workspace::load(&store).unwrap();
        assert!(ws.campaigns.is_empty());
        assert!(ws.creatives.is_empty());
    }

    #[test]
    fn corrupt_stored_json_is_an_error_not_data_loss() {
        let mut store = MemoryStore::new();
        store.set(CAMPAIGNS_KEY, "{broken").unwrap();
        assert!(Workspace::load(&store).is_err());
    }

    #[test]
    fn export_document_has_the_agreed_shape() {
        let mut ws = Workspace::default();
        ws.upsert_campaign(campaign("c1", 100.0));

        let doc = ws.export_document();
        assert!(doc["campaigns"].is_array());
        assert!(doc["creatives"].is_array());
        assert!(doc["exportDate"].is_string());
        assert_eq!(doc["campaigns"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn file_store_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(dir.path().join("data"));

        assert_eq!(store.get("campaigns").unwrap(), None);
        store.set("campaigns", "[]").unwrap();
        assert_eq!(store.get("campaigns").unwrap().as_deref(), Some("[]"));

        store.remove("campaigns").unwrap();
        assert_eq!(store.get("campaigns").unwrap(), None);
        // removing a missing key is fine
        store.remove("campaigns").unwrap();
    }

    #[test]
    fn unreadable_state_file_is_an_error_not_an_empty_workspace() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().to_path_buf());

        // A directory where the state file should be: readable as a path,
        // not as a file. Missing would be Ok(None); this must be Err, or a
        // load-then-save cycle would wipe the data still on disk.
        std::fs::create_dir(dir.path().join("campaigns.json")).unwrap();

        assert!(store.get("campaigns").is_err());
        assert!(Workspace::load(&store).is_err());
    }
}
