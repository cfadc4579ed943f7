use crate::query::ScoringWeights;
use crate::query::parser::DEFAULT_LIMIT;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const APP_NAME: &str = "docdex";
const CONFIG_FILE: &str = "config.json";

/// Environment variable overriding the config file location
pub const CONFIG_ENV: &str = "DOCDEX_CONFIG";

/// User configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Relevance weights for search results
    #[serde(default)]
    pub scoring_weights: ScoringWeights,

    /// Result limit when neither `--limit` nor `top:` is given
    #[serde(default = "default_limit")]
    pub default_limit: usize,

    /// Colour terminal output
    #[serde(default = "default_color")]
    pub color: bool,

    /// Suffix appended to docnames when building links
    #[serde(default = "default_html_suffix")]
    pub html_suffix: String,
}

fn default_limit() -> usize {
    DEFAULT_LIMIT
}

fn default_color() -> bool {
    true
}

fn default_html_suffix() -> String {
    ".html".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            scoring_weights: ScoringWeights::default(),
            default_limit: default_limit(),
            color: default_color(),
            html_suffix: default_html_suffix(),
        }
    }
}

impl AppConfig {
    /// Load config from `$DOCDEX_CONFIG` or the user config directory, or
    /// return defaults if there is none
    pub fn load() -> Result<Self> {
        match get_config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load config from a file; a missing file gives the defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: AppConfig = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Save config, creating the parent directory
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }
        let content = serde_json::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(path, content).context("Failed to write config file")?;
        Ok(())
    }
}

/// Get the path to the config file
pub fn get_config_path() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os(CONFIG_ENV).filter(|p| !p.is_empty()) {
        return Some(PathBuf::from(path));
    }
    get_config_dir().map(|dir| dir.join(CONFIG_FILE))
}

/// Per-user configuration directory
pub fn get_config_dir() -> Option<PathBuf> {
    let base = if cfg!(target_os = "macos") {
        dirs::home_dir().map(|h| h.join("Library").join("Application Support"))
    } else {
        // Linux/Unix: XDG_CONFIG_HOME or ~/.config; Windows: roaming app data
        dirs::config_dir()
    };
    base.map(|b| b.join(APP_NAME))
}
