use std::fs;
use std::path::{Path, PathBuf};

use super::core::PeersenseConfig;
use crate::errors::StartupError;

pub const CONFIG_FILE_NAME: &str = ".peersense.toml";
const MAX_TRAVERSAL_DEPTH: usize = 10;

/// Parse config from a TOML string
pub fn parse_config(contents: &str) -> Result<PeersenseConfig, String> {
    toml::from_str::<PeersenseConfig>(contents)
        .map_err(|e| format!("Failed to parse {}: {}", CONFIG_FILE_NAME, e))
}

/// Directories from `start` upwards, at most `max_depth` of them
pub fn directory_ancestors(start: PathBuf, max_depth: usize) -> impl Iterator<Item = PathBuf> {
    std::iter::successors(Some(start), |dir| {
        let mut parent = dir.clone();
        if parent.pop() {
            Some(parent)
        } else {
            None
        }
    })
    .take(max_depth)
}

/// First `.peersense.toml` found walking up from `start`
pub fn find_config_file(start: &Path) -> Option<PathBuf> {
    directory_ancestors(start.to_path_buf(), MAX_TRAVERSAL_DEPTH + 1)
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find(|path| path.is_file())
}

/// Load configuration.
///
/// An explicit path must exist and parse. Without one, the working directory
/// and its ancestors are searched; finding nothing means defaults.
pub fn load_config(explicit: Option<&Path>) -> Result<PeersenseConfig, StartupError> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => {
            let current = std::env::current_dir()?;
            match find_config_file(&current) {
                Some(path) => path,
                None => {
                    log::debug!(
                        "No {} found within {} directories. Using default config.",
                        CONFIG_FILE_NAME,
                        MAX_TRAVERSAL_DEPTH
                    );
                    return Ok(PeersenseConfig::default());
                }
            }
        }
    };

    let contents = fs::read_to_string(&path).map_err(|e| {
        StartupError::Configuration(format!("could not read {}: {}", path.display(), e))
    })?;
    let config = parse_config(&contents).map_err(StartupError::Configuration)?;
    log::debug!("Loaded config from {}", path.display());
    Ok(config)
}
