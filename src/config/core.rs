use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::advice::AdvicePolicy;
use crate::sheets::CredentialSource;

/// Root configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PeersenseConfig {
    pub model: ModelConfig,
    pub sheet: SheetConfig,
    pub credentials: CredentialsConfig,
    pub advice: AdvicePolicy,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Path to the exported tree-ensemble artifact
    pub path: PathBuf,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("model.json"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SheetConfig {
    /// Sharing URL or bare spreadsheet ID
    pub url: String,
    pub worksheet: String,
    /// Header of the column rows are keyed by
    pub id_column: String,
}

impl Default for SheetConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            worksheet: "IDS".to_string(),
            id_column: "ID".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum CredentialsStrategy {
    /// JSON key file on disk
    #[default]
    KeyFile,
    /// JSON document in an environment variable
    Env,
    /// TOML secrets file
    Secrets,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CredentialsConfig {
    pub source: CredentialsStrategy,
    /// Key file or secrets file, depending on `source`; defaults per strategy
    pub path: Option<PathBuf>,
    pub env_var: String,
}

impl Default for CredentialsConfig {
    fn default() -> Self {
        Self {
            source: CredentialsStrategy::KeyFile,
            path: None,
            env_var: "GOOGLE_SERVICE_ACCOUNT_JSON".to_string(),
        }
    }
}

impl CredentialsConfig {
    /// Resolve the configured strategy into a concrete source.
    pub fn source(&self) -> CredentialSource {
        match self.source {
            CredentialsStrategy::KeyFile => CredentialSource::KeyFile(
                self.path
                    .clone()
                    .unwrap_or_else(|| PathBuf::from("service_account_file.json")),
            ),
            CredentialsStrategy::Env => CredentialSource::Env(self.env_var.clone()),
            CredentialsStrategy::Secrets => CredentialSource::Secrets(
                self.path
                    .clone()
                    .unwrap_or_else(|| PathBuf::from(".streamlit").join("secrets.toml")),
            ),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub file: Option<PathBuf>,
    /// Filter directive such as `info` or `peersense=debug`
    pub level: Option<String>,
}
