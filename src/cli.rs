use clap::Parser;
use std::path::PathBuf;

use crate::config::{CredentialsStrategy, PeersenseConfig};
use crate::observability::LogSettings;

#[derive(Parser, Debug, Default)]
#[command(name = "peersense")]
#[command(about = "Substance use risk prediction from survey answers", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Configuration file (defaults to the nearest .peersense.toml)
    #[arg(long, env = "PEERSENSE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Model artifact to load at startup
    #[arg(long, env = "PEERSENSE_MODEL")]
    pub model: Option<PathBuf>,

    /// Spreadsheet sharing URL or ID
    #[arg(long = "sheet-url", env = "PEERSENSE_SHEET_URL")]
    pub sheet_url: Option<String>,

    /// Worksheet holding the survey rows
    #[arg(long, env = "PEERSENSE_WORKSHEET")]
    pub worksheet: Option<String>,

    /// Where to read the service-account credential from
    #[arg(long, value_enum, env = "PEERSENSE_CREDENTIALS")]
    pub credentials: Option<CredentialsStrategy>,

    /// Key file or secrets file for the chosen credential source
    #[arg(long = "credentials-path", env = "PEERSENSE_CREDENTIALS_PATH")]
    pub credentials_path: Option<PathBuf>,

    /// Environment variable holding the credential JSON
    #[arg(long = "credentials-env", env = "PEERSENSE_CREDENTIALS_ENV")]
    pub credentials_env: Option<String>,

    /// Log file (defaults to the user cache directory)
    #[arg(long = "log-file", env = "PEERSENSE_LOG_FILE")]
    pub log_file: Option<PathBuf>,

    /// Increase verbosity level (can be repeated: -v, -vv, -vvv)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbosity: u8,
}

impl Cli {
    /// Layer command-line values over a loaded config.
    pub fn apply_overrides(&self, mut config: PeersenseConfig) -> PeersenseConfig {
        if let Some(model) = &self.model {
            config.model.path = model.clone();
        }
        if let Some(url) = &self.sheet_url {
            config.sheet.url = url.clone();
        }
        if let Some(worksheet) = &self.worksheet {
            config.sheet.worksheet = worksheet.clone();
        }
        if let Some(strategy) = self.credentials {
            config.credentials.source = strategy;
        }
        if let Some(path) = &self.credentials_path {
            config.credentials.path = Some(path.clone());
        }
        if let Some(var) = &self.credentials_env {
            config.credentials.env_var = var.clone();
        }
        if let Some(file) = &self.log_file {
            config.logging.file = Some(file.clone());
        }
        config
    }

    /// Logging settings from config plus `-v`.
    pub fn log_settings(&self, config: &PeersenseConfig) -> LogSettings {
        LogSettings {
            file: config
                .logging
                .file
                .clone()
                .or_else(crate::observability::tracing::default_log_file),
            level: config.logging.level.clone(),
            verbosity: self.verbosity,
        }
    }
}
