use anyhow::{ensure, Context, Result};
use dirs::config_dir;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const APP_NAME: &str = "carom";
const CONFIG_FILE: &str = "config.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Target moyenne for the projection table.
    pub target: f64,
    /// Increment between the stepped targets.
    pub target_step: f64,
    /// Number of turns ahead shown in the projection table.
    pub projection_turns: u32,
    /// Number of recent sessions the overall moyenne is taken over.
    pub history_window: usize,
    /// Match length used for the score target.
    pub match_turns: u32,
    /// Database location. Defaults to the platform data directory.
    pub database_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            target: 0.90,
            target_step: 0.10,
            projection_turns: 5,
            history_window: 20,
            match_turns: 25,
            database_path: None,
        }
    }
}

impl Config {
    /// Load configuration from the user's config directory.
    /// Falls back to defaults when the file is missing, unparsable or holds
    /// out-of-range settings.
    pub fn load() -> Self {
        match get_config_path().and_then(|path| Self::load_from(&path)) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Failed to load config, using defaults: {:#}", e);
                Self::default()
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).context("Failed to read config file")?;

        let config: Self =
            serde_json::from_str(&content).context("Failed to parse config file")?;
        config.validate()?;

        Ok(config)
    }

    /// Reject settings the statistics cannot work with.
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.target.is_finite() && self.target >= 0.0,
            "target must be a non-negative number, got {}",
            self.target
        );
        ensure!(
            self.target_step.is_finite() && self.target_step >= 0.0,
            "target_step must be a non-negative number, got {}",
            self.target_step
        );
        ensure!(self.projection_turns > 0, "projection_turns must be at least 1");
        ensure!(self.history_window > 0, "history_window must be at least 1");
        ensure!(self.match_turns > 0, "match_turns must be at least 1");
        Ok(())
    }

    /// Save the current configuration to the user's config directory.
    pub fn save(&self) -> Result<PathBuf> {
        let config_path = get_config_path()?;
        self.save_to(&config_path)?;
        Ok(config_path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        self.validate()?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let content = serde_json::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(path, content).context("Failed to write config file")?;

        Ok(())
    }
}

pub fn get_config_path() -> Result<PathBuf> {
    let mut path =
        config_dir().ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
    path.push(APP_NAME);
    path.push(CONFIG_FILE);
    Ok(path)
}
