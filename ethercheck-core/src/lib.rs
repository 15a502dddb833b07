//! Ethercheck Core - wallet session and balance logic
//!
//! This crate implements the core logic following hexagonal architecture:
//!
//! - **domain**: Core entities (Address, Session, balance conversion)
//! - **ports**: Trait definitions for external dependencies (WalletProvider, LedgerClient)
//! - **services**: The session state machine
//! - **adapters**: Concrete implementations (JSON-RPC ledger, demo ledger, mock wallet)

pub mod adapters;
pub mod config;
pub mod domain;
pub mod ports;
pub mod services;

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};

use adapters::{DemoLedger, JsonRpcLedger};
use config::Config;
use ports::{LedgerClient, WalletProvider};
use services::SessionService;

// Re-export commonly used types at crate root
pub use domain::result::Error;
pub use domain::{Address, Session, SessionStatus};
pub use services::{EventPumpHandle, INSTALL_PROMPT};

/// Main context for ethercheck operations
///
/// The wallet provider is injected rather than discovered from ambient
/// state, so the whole core runs against a scripted provider in tests and
/// demo mode. The ledger client is picked from configuration.
pub struct EthercheckContext {
    pub config: Config,
    pub session: Arc<SessionService>,
}

impl EthercheckContext {
    /// Create a new ethercheck context
    pub fn new(ethercheck_dir: &Path, provider: Arc<dyn WalletProvider>) -> Result<Self> {
        let config = Config::load(ethercheck_dir)?;

        let ledger: Arc<dyn LedgerClient> = if config.demo_mode {
            Arc::new(DemoLedger::new())
        } else {
            let access_key = config.access_key.as_deref().context(
                "no ledger access key configured; run 'ethc setup' or enable demo mode",
            )?;
            Arc::new(JsonRpcLedger::new(&config.network, access_key)?)
        };

        let session = Arc::new(SessionService::new(provider, ledger));

        Ok(Self { config, session })
    }
}
