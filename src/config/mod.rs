//! Session configuration: `.peersense.toml` plus command-line overrides.

pub mod core;
pub mod loader;
pub mod validation;

pub use self::core::{
    CredentialsConfig, CredentialsStrategy, LoggingConfig, ModelConfig, PeersenseConfig,
    SheetConfig,
};
pub use loader::{find_config_file, load_config, parse_config, CONFIG_FILE_NAME};
pub use validation::validate_config;
