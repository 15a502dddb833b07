//! Session service - the wallet connection state machine
//!
//! Owns the single `Session` and drives every transition: startup
//! initialization, the user's connect intent, external `accountsChanged`
//! deliveries, and the balance refresh each of those triggers.
//!
//! Concurrency model: methods suspend only on the two provider/ledger calls
//! (`request_accounts`, `get_balance`); the session mutex is never held
//! across an await. A second event can therefore start and finish while an
//! earlier balance fetch is still outstanding, which is why every refresh
//! result carries the address it was fetched for and is discarded when that
//! address is no longer the current account at resolution time.

use std::sync::{Arc, Mutex, MutexGuard};

use chrono::Utc;
use tracing::{debug, info, warn};

use crate::domain::result::{Error, Result};
use crate::domain::{Address, Session, SessionStatus};
use crate::ports::{LedgerClient, WalletProvider};

/// Message surfaced when no wallet capability is present
pub const INSTALL_PROMPT: &str = "Please install MetaMask! & Connect to the wallet";

/// The wallet session state machine
pub struct SessionService {
    provider: Arc<dyn WalletProvider>,
    ledger: Arc<dyn LedgerClient>,
    session: Mutex<Session>,
}

impl SessionService {
    pub fn new(provider: Arc<dyn WalletProvider>, ledger: Arc<dyn LedgerClient>) -> Self {
        Self {
            provider,
            ledger,
            session: Mutex::new(Session::new()),
        }
    }

    /// Read-only snapshot for the presentation layer
    pub fn snapshot(&self) -> Session {
        self.session_mut().clone()
    }

    /// Startup transition: adopt an already-authorized account if one exists
    ///
    /// Non-interactive. With no provider the session stays disconnected and
    /// surfaces the install prompt; with no granted accounts it simply stays
    /// disconnected.
    pub async fn initialize(&self) -> Session {
        if !self.provider.is_available() {
            debug!("no wallet provider available");
            let mut session = self.session_mut();
            session.last_error = Some(INSTALL_PROMPT.to_string());
            session.updated_at = Utc::now();
            return session.clone();
        }

        match self.provider.authorized_accounts().await {
            Ok(accounts) => match first_account(&accounts) {
                Ok(Some(address)) => {
                    info!(account = %address, "restored authorized account");
                    self.set_connected(address.clone());
                    self.refresh_balance(address).await;
                }
                Ok(None) => {
                    debug!("no authorized accounts found");
                }
                Err(e) => self.record_error(&e),
            },
            Err(e) => self.record_error(&e),
        }

        self.snapshot()
    }

    /// User intent: request wallet authorization
    ///
    /// A no-op while already connected or while a previous request is still
    /// pending; never re-prompts an authorized user.
    pub async fn connect(&self) -> Session {
        {
            let mut session = self.session_mut();
            match session.status {
                SessionStatus::Connected | SessionStatus::Connecting => {
                    debug!(status = ?session.status, "connect intent ignored");
                    return session.clone();
                }
                SessionStatus::Disconnected | SessionStatus::Error => {
                    session.status = SessionStatus::Connecting;
                    session.last_error = None;
                    session.updated_at = Utc::now();
                }
            }
        }

        match self.provider.request_accounts().await {
            Ok(accounts) => match first_account(&accounts) {
                Ok(Some(address)) => {
                    info!(account = %address, "wallet connected");
                    self.set_connected(address.clone());
                    self.refresh_balance(address).await;
                }
                Ok(None) => {
                    debug!("authorization returned no accounts");
                    self.set_disconnected(None);
                }
                Err(e) => self.record_error(&e),
            },
            Err(Error::UserRejected) => {
                info!("user rejected connection request");
                self.set_disconnected(Some(Error::UserRejected.to_string()));
            }
            Err(e) => {
                warn!(error = %e, "connection request failed");
                self.record_error(&e);
            }
        }

        self.snapshot()
    }

    /// External `accountsChanged` delivery
    ///
    /// A non-empty sequence is a silent account switch (possibly to a new
    /// address); an empty one means the wallet was disconnected or locked.
    pub async fn handle_accounts_changed(&self, accounts: Vec<String>) {
        match first_account(&accounts) {
            Ok(Some(address)) => {
                info!(account = %address, "account changed");
                self.set_connected(address.clone());
                self.refresh_balance(address).await;
            }
            Ok(None) => {
                info!("wallet disconnected or locked");
                self.set_disconnected(None);
            }
            Err(e) => {
                warn!(error = %e, "ignoring account change with malformed address");
                self.record_error(&e);
            }
        }
    }

    /// Pump `accountsChanged` deliveries into the state machine
    ///
    /// The returned handle aborts the pump task on drop, which also drops the
    /// provider subscription, so no handler survives teardown.
    pub fn spawn_event_pump(self: &Arc<Self>) -> Result<EventPumpHandle> {
        let mut events = self.provider.subscribe_accounts_changed()?;
        let service = Arc::clone(self);

        let task = tokio::spawn(async move {
            while let Some(accounts) = events.recv().await {
                service.handle_accounts_changed(accounts).await;
            }
        });

        Ok(EventPumpHandle { task })
    }

    /// Fetch and apply the balance for `address`
    ///
    /// The result is applied only if `address` is still the current account
    /// when the fetch resolves; superseded results are dropped. A failed
    /// fetch leaves the balance unset without touching the session status -
    /// a stale balance beats dropping the session.
    async fn refresh_balance(&self, address: Address) {
        {
            let mut session = self.session_mut();
            if session.account.as_ref() != Some(&address) {
                return;
            }
            // Pending marker
            session.balance = None;
            session.updated_at = Utc::now();
        }

        let result = self.ledger.get_balance(&address).await;

        let mut session = self.session_mut();
        if session.account.as_ref() != Some(&address) {
            debug!(account = %address, "discarding stale balance result");
            return;
        }

        match result {
            Ok(balance) => {
                debug!(account = %address, %balance, "balance refreshed");
                session.balance = Some(balance);
                session.last_error = None;
            }
            Err(e) => {
                warn!(account = %address, error = %e, "balance refresh failed");
                session.balance = None;
                session.last_error = Some(e.to_string());
            }
        }
        session.updated_at = Utc::now();
    }

    fn set_connected(&self, address: Address) {
        let mut session = self.session_mut();
        session.status = SessionStatus::Connected;
        session.account = Some(address);
        session.last_error = None;
        session.updated_at = Utc::now();
    }

    fn set_disconnected(&self, message: Option<String>) {
        let mut session = self.session_mut();
        session.status = SessionStatus::Disconnected;
        session.account = None;
        session.balance = None;
        session.last_error = message;
        session.updated_at = Utc::now();
    }

    fn record_error(&self, error: &Error) {
        let mut session = self.session_mut();
        session.status = SessionStatus::Error;
        session.account = None;
        session.balance = None;
        session.last_error = Some(error.to_string());
        session.updated_at = Utc::now();
    }

    fn session_mut(&self) -> MutexGuard<'_, Session> {
        // A poisoned lock means a panicked writer; the session data itself
        // is always left in a consistent state, so keep going.
        self.session
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Handle to the running event pump; aborts the task (and releases the
/// provider subscription) on drop
pub struct EventPumpHandle {
    task: tokio::task::JoinHandle<()>,
}

impl EventPumpHandle {
    pub fn stop(self) {
        self.task.abort();
    }
}

impl Drop for EventPumpHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Parse the first entry of an account sequence, if any
fn first_account(accounts: &[String]) -> Result<Option<Address>> {
    match accounts.first() {
        None => Ok(None),
        Some(raw) => Address::parse(raw).map(Some),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_account_empty() {
        assert!(first_account(&[]).unwrap().is_none());
    }

    #[test]
    fn test_first_account_takes_head() {
        let accounts = vec![
            "0xdadb0d80178819f2319190d340ce9a924f783711".to_string(),
            "0x1111111111111111111111111111111111111111".to_string(),
        ];
        let address = first_account(&accounts).unwrap().unwrap();
        assert_eq!(address.as_str(), "0xdadb0d80178819f2319190d340ce9a924f783711");
    }

    #[test]
    fn test_first_account_rejects_malformed() {
        let accounts = vec!["not-an-address".to_string()];
        assert!(first_account(&accounts).is_err());
    }
}
