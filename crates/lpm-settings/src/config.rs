use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;

use lpm_constants::DEFAULT_REPO;
use lpm_error::{LpmError, Result};
use lpm_utils::write_atomic;

pub const CONFIG_KEYS: &[&str] = &["firstRun", "debugMode", "repositoryUrl"];

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default)]
    pub first_run: bool,
    #[serde(default)]
    pub debug_mode: bool,
    /// Overrides the default package index location.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repository_url: Option<String>,
}

impl Config {
    /// Loads the config file, writing a default one if none exists yet.
    pub fn load(path: &Path) -> Result<Self> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                let config = Self::default();
                config.save(path)?;
                return Ok(config);
            }
            Err(e) => {
                return Err(LpmError::ConfigLoad(format!(
                    "cannot read {}: {e}",
                    path.display()
                )));
            }
        };

        serde_json::from_str(&content)
            .map_err(|e| LpmError::ConfigLoad(format!("cannot parse {}: {e}", path.display())))
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| LpmError::ConfigLoad(e.to_string()))?;
        write_atomic(path, content.as_bytes())
            .map_err(|e| LpmError::ConfigLoad(format!("cannot write {}: {e}", path.display())))
    }

    #[must_use]
    pub fn repository(&self) -> &str {
        self.repository_url.as_deref().unwrap_or(DEFAULT_REPO)
    }

    pub fn get(&self, key: &str) -> Result<String> {
        match key {
            "firstRun" => Ok(self.first_run.to_string()),
            "debugMode" => Ok(self.debug_mode.to_string()),
            "repositoryUrl" => Ok(self.repository().to_string()),
            _ => Err(unknown_key(key)),
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "firstRun" => self.first_run = parse_bool(key, value)?,
            "debugMode" => self.debug_mode = parse_bool(key, value)?,
            "repositoryUrl" => {
                self.repository_url = match value {
                    "" | "none" | "default" => None,
                    url => Some(url.to_string()),
                };
            }
            _ => return Err(unknown_key(key)),
        }
        Ok(())
    }
}

fn unknown_key(key: &str) -> LpmError {
    LpmError::InvalidSetting(
        key.to_string(),
        format!("unknown key, expected one of {}", CONFIG_KEYS.join(", ")),
    )
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "on" | "yes" | "1" => Ok(true),
        "false" | "off" | "no" | "0" => Ok(false),
        _ => Err(LpmError::InvalidSetting(
            key.to_string(),
            format!("'{value}' is not a boolean"),
        )),
    }
}
