use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

const REGISTRY_FILENAME: &str = "iso3.registry";

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Config {
    /// Overrides the registry file location. Relative paths resolve against
    /// the config directory.
    pub registry_path: Option<String>,
}

pub struct ConfigManager {
    config_path: PathBuf,
    pub config: Config,
}

impl ConfigManager {
    pub fn new() -> Result<Self> {
        let config_dir = dirs::home_dir()
            .ok_or_else(|| anyhow!("Could not find home directory"))?
            .join(".config")
            .join("geoviz");

        if !config_dir.exists() {
            std::fs::create_dir_all(&config_dir).context("Failed to create config directory")?;
        }

        let config_path = config_dir.join("config.toml");
        let config = if config_path.exists() {
            let content =
                std::fs::read_to_string(&config_path).context("Failed to read config.toml")?;
            toml::from_str(&content).context("Failed to parse config.toml")?
        } else {
            Config::default()
        };

        Ok(Self {
            config_path,
            config,
        })
    }

    pub fn save(&self) -> Result<()> {
        let content = toml::to_string(&self.config).context("Failed to serialize config")?;
        std::fs::write(&self.config_path, content).context("Failed to write config.toml")?;
        Ok(())
    }

    pub fn config_dir(&self) -> PathBuf {
        self.config_path.parent().unwrap().to_path_buf()
    }

    /// Effective registry file location: the configured override if set,
    /// otherwise `iso3.registry` next to the config file.
    pub fn registry_path(&self) -> PathBuf {
        match &self.config.registry_path {
            Some(custom) => {
                let custom = PathBuf::from(custom);
                if custom.is_absolute() {
                    custom
                } else {
                    self.config_dir().join(custom)
                }
            }
            None => self.config_dir().join(REGISTRY_FILENAME),
        }
    }
}
