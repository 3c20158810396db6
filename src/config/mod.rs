//! Layered configuration loading.
//!
//! Resolution order, later layers winning at the field level:
//!
//! 1. Built-in defaults ([`schema::AdlensConfig::default()`])
//! 2. User global config — `~/.adlens/config.toml`
//! 3. Environment variables — `ADLENS_*` (highest precedence)
//!
//! A malformed config file is ignored and the previous layer's values
//! remain in effect — a broken override must never take the tool down.

pub mod schema;

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};

pub use schema::AdlensConfig;

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

/// Load the fully resolved configuration: defaults → global TOML → env vars.
pub fn load() -> AdlensConfig {
    let mut config = AdlensConfig::default();

    if let Some(overlay) = load_toml_file(global_config_path()) {
        config = overlay;
    }

    apply_env_overrides(&mut config);

    config
}

/// Load a TOML config file if it exists and parses; `None` otherwise.
fn load_toml_file(path: Option<PathBuf>) -> Option<AdlensConfig> {
    let path = path?;
    let content = fs::read_to_string(&path).ok()?;
    toml::from_str(&content).ok()
}

/// Path to the user global config: `~/.adlens/config.toml`.
fn global_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".adlens").join("config.toml"))
}

// ---------------------------------------------------------------------------
// Environment variable overrides
// ---------------------------------------------------------------------------

/// Apply `ADLENS_*` overrides.
///
/// - `ADLENS_STRICT_COLUMNS` — strict CSV column checking (`1`/`true`/`yes`/`on`)
/// - `ADLENS_COLOR` — colored output
/// - `ADLENS_MAX_TABLE_ROWS` — row cap for table views
/// - `ADLENS_FREQUENCY_THRESHOLD` — fatigue frequency threshold
fn apply_env_overrides(config: &mut AdlensConfig) {
    if let Ok(val) = std::env::var("ADLENS_STRICT_COLUMNS") {
        config.import.strict_columns = is_truthy(&val);
    }
    if let Ok(val) = std::env::var("ADLENS_COLOR") {
        config.output.color = is_truthy(&val);
    }
    if let Ok(val) = std::env::var("ADLENS_MAX_TABLE_ROWS")
        && let Ok(rows) = val.parse::<usize>()
    {
        config.output.max_table_rows = rows;
    }
    if let Ok(val) = std::env::var("ADLENS_FREQUENCY_THRESHOLD")
        && let Ok(threshold) = val.parse::<f64>()
        && threshold.is_finite()
        && threshold > 0.0
    {
        config.benchmarks.frequency_threshold = threshold;
    }
}

/// Check if a string value represents a truthy boolean.
fn is_truthy(val: &str) -> bool {
    matches!(
        val.to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

// ---------------------------------------------------------------------------
// Config init / show
// ---------------------------------------------------------------------------

/// Write the annotated default config to `~/.adlens/config.toml`.
///
/// Returns an error if the file already exists, unless `force`.
pub fn init_config(force: bool) -> Result<PathBuf> {
    let path = global_config_path().context("could not determine home directory")?;

    if path.exists() && !force {
        anyhow::bail!(
            "config file already exists at {}. Use --force to overwrite.",
            path.display()
        );
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("failed to create ~/.adlens/ directory")?;
    }

    fs::write(&path, AdlensConfig::default_toml()).context("failed to write config file")?;

    Ok(path)
}

/// The effective (fully resolved) config as TOML, for `config show`.
pub fn show_effective_config() -> Result<String> {
    toml::to_string_pretty(&load()).context("failed to serialize effective config")
}
