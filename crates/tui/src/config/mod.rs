use std::{path::PathBuf, time::Duration};

use clap::Parser;
use importer::ImportTarget;
use serde::Deserialize;

use crate::error::{AppError, Result};

const DEFAULT_CONFIG_PATH: &str = "config/importer.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub base_url: String,
    /// Importer shown first: `categories` or `transactions`.
    pub target: String,
    pub timeout_secs: u64,
    pub log_file: String,
    pub log_level: String,
    /// Set only from the command line: upload this file and exit.
    #[serde(skip)]
    pub file: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5000".to_string(),
            target: "categories".to_string(),
            timeout_secs: 30,
            log_file: "csv_import.log".to_string(),
            log_level: "info".to_string(),
            file: None,
        }
    }
}

impl AppConfig {
    pub fn target(&self) -> Result<ImportTarget> {
        self.target.parse().map_err(AppError::Import)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }
}

#[derive(Debug, Default, Parser)]
#[command(name = "csv_import", about = "Upload category and transaction CSV files")]
pub struct Args {
    /// Optional config file path (TOML).
    #[arg(long)]
    config: Option<String>,
    /// Override base URL (e.g. http://127.0.0.1:5000).
    #[arg(long)]
    base_url: Option<String>,
    /// Importer to open: categories or transactions.
    #[arg(long)]
    target: Option<String>,
    /// Maximum wait for an upload, in seconds.
    #[arg(long)]
    timeout_secs: Option<u64>,
    /// Override log file (TUI mode only).
    #[arg(long)]
    log_file: Option<String>,
    /// Upload this CSV without starting the terminal UI.
    #[arg(long)]
    file: Option<PathBuf>,
}

pub fn load() -> Result<AppConfig> {
    load_from(Args::parse())
}

pub fn load_from(args: Args) -> Result<AppConfig> {
    let config_path = args.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);
    let mut builder = config::Config::builder();
    builder = builder.add_source(config::File::with_name(config_path).required(false));
    builder = builder.add_source(config::Environment::with_prefix("CSV_IMPORT"));
    let mut settings: AppConfig = builder.build()?.try_deserialize()?;

    if let Some(base_url) = args.base_url {
        settings.base_url = base_url;
    }
    if let Some(target) = args.target {
        settings.target = target;
    }
    if let Some(timeout_secs) = args.timeout_secs {
        settings.timeout_secs = timeout_secs;
    }
    if let Some(log_file) = args.log_file {
        settings.log_file = log_file;
    }
    settings.file = args.file;

    // Fail early on a typo instead of when the UI opens.
    settings.target()?;

    Ok(settings)
}
