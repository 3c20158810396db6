use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use adlens::cli;

#[derive(Debug, Parser)]
#[command(name = "adlens")]
#[command(about = "Facebook Ads analytics: import, normalize, score, recommend")]
struct App {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Import campaign/creative data from a UTM-tagged Facebook link
    Utm {
        /// The full URL including utm_* and fb-prefixed parameters
        url: String,
    },
    /// Import a Facebook Ads Manager CSV export
    Import {
        /// Path to the CSV file
        file: PathBuf,
    },
    /// Import a Marketing-API-style JSON payload from a file
    Api {
        /// Path to the JSON file (array of rows, or {"data": [...]})
        file: PathBuf,
    },
    /// Show the account summary and per-campaign metrics
    Report {
        /// Output format: table (default), json, csv
        #[arg(long, default_value = "table")]
        format: String,
    },
    /// List creatives with fatigue scores and performance tiers
    Creatives {
        /// Only show creatives belonging to this campaign id
        #[arg(long)]
        campaign: Option<String>,
        /// Only show creatives with fatigue above 70
        #[arg(long)]
        fatigued: bool,
    },
    /// Show prioritized recommendations for one creative
    Recommend {
        /// The creative id
        id: String,
    },
    /// Show account-level optimization tips
    Tips,
    /// Remove a campaign and its creatives
    Remove {
        /// The campaign id
        id: String,
    },
    /// Write all stored data to a JSON export file
    Export {
        /// Output path (default: adlens_export_<date>.json)
        path: Option<PathBuf>,
    },
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Debug, Subcommand)]
enum ConfigAction {
    /// Print the effective configuration as TOML
    Show,
    /// Write an annotated default config file to ~/.adlens/config.toml
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
}

fn main() -> Result<()> {
    let app = App::parse();

    match app.command {
        Commands::Utm { url } => cli::run_utm(&url),
        Commands::Import { file } => cli::run_import(&file),
        Commands::Api { file } => cli::run_api(&file),
        Commands::Report { format } => {
            let fmt = cli::OutputFormat::from_str_opt(Some(&format));
            cli::run_report(fmt)
        }
        Commands::Creatives { campaign, fatigued } => {
            cli::run_creatives(campaign.as_deref(), fatigued)
        }
        Commands::Recommend { id } => cli::run_recommend(&id),
        Commands::Tips => cli::run_tips(),
        Commands::Remove { id } => cli::run_remove(&id),
        Commands::Export { path } => cli::run_export(path),
        Commands::Config { action } => match action {
            ConfigAction::Show => cli::run_config_show(),
            ConfigAction::Init { force } => cli::run_config_init(force),
        },
    }
}
