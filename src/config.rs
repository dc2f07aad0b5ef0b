use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Debrid mount as seen from inside the media containers
pub const DEFAULT_SOURCE: &str = "/data/remote/realdebrid";

/// Media library holding the symlinks
pub const DEFAULT_DESTINATION: &str = "/data/plex";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub source: PathBuf,
    pub destination: PathBuf,
    pub confirm: ConfirmMode,
    pub sweep: SweepConfig,
}

/// How deletions are confirmed when `--no-confirm` is not given
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfirmMode {
    #[default]
    Prompt,
    Auto,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SweepConfig {
    pub dir: PathBuf,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(DEFAULT_DESTINATION),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source: PathBuf::from(DEFAULT_SOURCE),
            destination: PathBuf::from(DEFAULT_DESTINATION),
            confirm: ConfirmMode::default(),
            sweep: SweepConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration with fallback chain
    ///
    /// An explicit path must load; the standard locations are tried in order and
    /// skipped with a warning when unreadable.
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        for candidate in Self::search_paths() {
            if !candidate.exists() {
                continue;
            }
            match Self::load_from_file(&candidate) {
                Ok(config) => return Ok(config),
                Err(e) => log::warn!("Failed to load config from {}: {}", candidate.display(), e),
            }
        }

        log::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// ~/.config/<project>/<project>.yml, then ./<project>.yml
    fn search_paths() -> Vec<PathBuf> {
        let project_name = env!("CARGO_PKG_NAME");
        let file_name = format!("{}.yml", project_name);

        let mut paths = Vec::new();
        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join(project_name).join(&file_name));
        }
        paths.push(PathBuf::from(file_name));
        paths
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;

        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;

        log::info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }
}
