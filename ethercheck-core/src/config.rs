//! Configuration management
//!
//! settings.json format:
//! ```json
//! {
//!   "app": { "demoMode": false, "network": "mainnet", "accessKey": "..." }
//! }
//! ```

use std::collections::HashMap;
use std::path::Path;

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Raw settings.json structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SettingsFile {
    #[serde(default)]
    app: AppSettings,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AppSettings {
    #[serde(default)]
    demo_mode: bool,
    #[serde(default)]
    network: Option<String>,
    #[serde(default)]
    access_key: Option<String>,
    #[serde(flatten)]
    other: HashMap<String, serde_json::Value>,
}

/// ethercheck configuration (simplified view of settings)
#[derive(Debug, Clone)]
pub struct Config {
    pub demo_mode: bool,
    /// Network name selecting the RPC endpoint
    pub network: String,
    /// Access key authorizing ledger requests
    pub access_key: Option<String>,
    // Keep the raw settings for preservation when saving
    _raw_settings: SettingsFile,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            demo_mode: false,
            network: "mainnet".to_string(),
            access_key: None,
            _raw_settings: SettingsFile::default(),
        }
    }
}

impl Config {
    /// Load config from the ethercheck directory
    ///
    /// Env vars override the settings file (for CI/testing):
    /// ETHERCHECK_DEMO_MODE, ETHERCHECK_NETWORK, ETHERCHECK_ACCESS_KEY.
    pub fn load(ethercheck_dir: &Path) -> Result<Self> {
        let settings_path = ethercheck_dir.join("settings.json");

        let raw: SettingsFile = if settings_path.exists() {
            let content = std::fs::read_to_string(&settings_path)?;
            serde_json::from_str(&content).unwrap_or_default()
        } else {
            SettingsFile::default()
        };

        let demo_mode = match std::env::var("ETHERCHECK_DEMO_MODE").ok().as_deref() {
            Some("true" | "1" | "yes" | "TRUE" | "YES") => true,
            Some("false" | "0" | "no" | "FALSE" | "NO") => false,
            _ => raw.app.demo_mode,
        };

        let network = std::env::var("ETHERCHECK_NETWORK")
            .ok()
            .or_else(|| raw.app.network.clone())
            .unwrap_or_else(|| "mainnet".to_string());

        let access_key = std::env::var("ETHERCHECK_ACCESS_KEY")
            .ok()
            .or_else(|| raw.app.access_key.clone());

        Ok(Self {
            demo_mode,
            network,
            access_key,
            _raw_settings: raw,
        })
    }

    /// Save config to the ethercheck directory
    /// Preserves settings fields the CLI doesn't manage
    pub fn save(&self, ethercheck_dir: &Path) -> Result<()> {
        let settings_path = ethercheck_dir.join("settings.json");

        let mut settings = if settings_path.exists() {
            let content = std::fs::read_to_string(&settings_path)?;
            serde_json::from_str::<SettingsFile>(&content).unwrap_or_default()
        } else {
            SettingsFile::default()
        };

        settings.app.demo_mode = self.demo_mode;
        settings.app.network = Some(self.network.clone());
        settings.app.access_key = self.access_key.clone();

        let content = serde_json::to_string_pretty(&settings)?;
        std::fs::write(&settings_path, content)?;
        Ok(())
    }

    /// Enable demo mode
    pub fn enable_demo_mode(&mut self) {
        self.demo_mode = true;
    }

    /// Disable demo mode
    pub fn disable_demo_mode(&mut self) {
        self.demo_mode = false;
    }
}
