//! Configuration schema and defaults.
//!
//! Maps directly to `~/.adlens/config.toml`. Every field has a built-in
//! default; users only set what they want to override. The `[benchmarks]`
//! section feeds the advisory engine's threshold table — configurable at
//! load time, never mutated after.

use serde::{Deserialize, Serialize};

use crate::advisor::Benchmarks;

/// Top-level adlens configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AdlensConfig {
    pub benchmarks: Benchmarks,
    pub import: ImportConfig,
    pub output: OutputConfig,
}

/// `[import]` — normalization behavior.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportConfig {
    /// Abort a CSV import on the first short row instead of skipping it.
    pub strict_columns: bool,
}

/// `[output]` — report rendering.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Colored terminal output.
    pub color: bool,
    /// Row cap for table views.
    pub max_table_rows: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            color: true,
            max_table_rows: 25,
        }
    }
}

impl AdlensConfig {
    /// The annotated default config written by `adlens config init`.
    pub fn default_toml() -> &'static str {
        r#"# adlens configuration
# Every value below is the built-in default; uncomment and edit to override.

[benchmarks]
# Industry benchmark bands the advisory engine scores against.
# roas_median = 2.19
# roas_high = 4.87
# frequency_threshold = 3.0
# cpm = { low = 5.54, high = 35.23 }
# cpc = { low = 0.25, high = 0.58 }
# ctr = { low = 1.5, high = 5.0 }
# cpa = { low = 3.45, high = 15.2 }

[import]
# Abort a CSV import on the first short row instead of skipping it.
# strict_columns = false

[output]
# Colored terminal output.
# color = true
# Row cap for table views.
# max_table_rows = 25
"#
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sane() {
        let config = AdlensConfig::default();
        assert!(!config.import.strict_columns);
        assert!(config.output.color);
        assert_eq!(config.output.max_table_rows, 25);
        assert_eq!(config.benchmarks, Benchmarks::default());
    }

    #[test]
    fn default_toml_parses_to_defaults() {
        let config: AdlensConfig = toml::from_str(AdlensConfig::default_toml()).unwrap();
        assert_eq!(config.benchmarks, Benchmarks::default());
        assert!(!config.import.strict_columns);
    }

    #[test]
    fn partial_toml_fills_the_rest_with_defaults() {
        let config: AdlensConfig = toml::from_str(
            r#"
[benchmarks]
frequency_threshold = 2.5

[import]
strict_columns = true
"#,
        )
        .unwrap();
        assert_eq!(config.benchmarks.frequency_threshold, 2.5);
        assert_eq!(config.benchmarks.roas_median, 2.19);
        assert!(config.import.strict_columns);
    }
}
