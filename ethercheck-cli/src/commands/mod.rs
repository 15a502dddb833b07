//! CLI command implementations

pub mod balance;
pub mod demo;
pub mod session;
pub mod setup;
pub mod status;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use ethercheck_core::adapters::{DemoLedger, JsonRpcLedger};
use ethercheck_core::config::Config;
use ethercheck_core::ports::LedgerClient;

/// Get the ethercheck directory from environment or default
pub fn get_ethercheck_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("ETHERCHECK_DIR") {
        PathBuf::from(dir)
    } else {
        dirs::home_dir()
            .expect("Could not find home directory")
            .join(".ethercheck")
    }
}

/// Load configuration, creating the directory if needed
pub fn get_config() -> Result<Config> {
    let dir = get_ethercheck_dir();
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create ethercheck directory: {:?}", dir))?;
    Config::load(&dir).context("Failed to load configuration")
}

/// Build the configured ledger client (demo or JSON-RPC)
pub fn get_ledger(config: &Config) -> Result<Arc<dyn LedgerClient>> {
    if config.demo_mode {
        return Ok(Arc::new(DemoLedger::new()));
    }
    let access_key = config.access_key.as_deref().context(
        "no ledger access key configured; run 'ethc setup <network> --access-key <key>' \
        or 'ethc demo on'",
    )?;
    Ok(Arc::new(JsonRpcLedger::new(&config.network, access_key)?))
}
