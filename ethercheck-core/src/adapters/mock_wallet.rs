//! Scriptable wallet provider
//!
//! Stands in for the browser-injected wallet capability. Drives the session
//! state machine in tests and in the CLI demo walk, where approval, rejection
//! and account switches are scripted instead of coming from a real extension.

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::{mpsc, Notify};

use crate::domain::result::{Error, Result};
use crate::ports::{AccountsChangedEvents, WalletProvider};

/// What `request_accounts` should do when the user is "prompted"
#[derive(Debug, Clone)]
pub enum RequestBehavior {
    /// Approve and authorize these accounts
    Approve(Vec<String>),
    /// Decline the authorization prompt
    Reject,
    /// Fail as if the capability vanished mid-request
    Unavailable(String),
}

/// Scriptable wallet provider
pub struct MockWallet {
    available: bool,
    authorized: Mutex<Vec<String>>,
    request_behavior: Mutex<RequestBehavior>,
    subscribers: Arc<Mutex<Vec<(u64, mpsc::UnboundedSender<Vec<String>>)>>>,
    next_subscriber_id: AtomicU64,
    request_gate: Mutex<Option<Arc<Notify>>>,
    request_calls: AtomicUsize,
}

impl MockWallet {
    /// A present wallet with no authorized accounts
    pub fn new() -> Self {
        Self {
            available: true,
            authorized: Mutex::new(Vec::new()),
            request_behavior: Mutex::new(RequestBehavior::Reject),
            subscribers: Arc::new(Mutex::new(Vec::new())),
            next_subscriber_id: AtomicU64::new(0),
            request_gate: Mutex::new(None),
            request_calls: AtomicUsize::new(0),
        }
    }

    /// An environment with no wallet capability at all
    pub fn absent() -> Self {
        Self {
            available: false,
            ..Self::new()
        }
    }

    /// Pre-authorize accounts, as if the user granted access in the past
    pub fn with_authorized(self, accounts: Vec<&str>) -> Self {
        *self.authorized.lock().unwrap() = accounts.into_iter().map(String::from).collect();
        self
    }

    /// Script the outcome of the next authorization prompt
    pub fn with_request_behavior(self, behavior: RequestBehavior) -> Self {
        *self.request_behavior.lock().unwrap() = behavior;
        self
    }

    pub fn set_request_behavior(&self, behavior: RequestBehavior) {
        *self.request_behavior.lock().unwrap() = behavior;
    }

    /// Hold the next authorization prompt open until the returned notify
    /// fires, as if the user left the wallet popup sitting on screen
    pub fn hold_request(&self) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        *self.request_gate.lock().unwrap() = Some(gate.clone());
        gate
    }

    /// How many times `request_accounts` was called (prompt accounting)
    pub fn request_count(&self) -> usize {
        self.request_calls.load(Ordering::SeqCst)
    }

    /// Deliver an `accountsChanged` event to every live subscriber
    ///
    /// An empty sequence simulates the user disconnecting or locking the
    /// wallet.
    pub fn emit_accounts_changed(&self, accounts: Vec<String>) {
        let mut subscribers = self.subscribers.lock().unwrap();
        subscribers.retain(|(_, tx)| tx.send(accounts.clone()).is_ok());
    }

    /// Number of live subscriptions (teardown verification)
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.lock().unwrap().len()
    }
}

impl Default for MockWallet {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl WalletProvider for MockWallet {
    fn is_available(&self) -> bool {
        self.available
    }

    async fn authorized_accounts(&self) -> Result<Vec<String>> {
        if !self.available {
            return Ok(Vec::new());
        }
        Ok(self.authorized.lock().unwrap().clone())
    }

    async fn request_accounts(&self) -> Result<Vec<String>> {
        if !self.available {
            return Err(Error::ProviderUnavailable(
                "no wallet capability in this environment".to_string(),
            ));
        }

        self.request_calls.fetch_add(1, Ordering::SeqCst);

        let gate = self.request_gate.lock().unwrap().take();
        if let Some(gate) = gate {
            gate.notified().await;
        }

        let behavior = self.request_behavior.lock().unwrap().clone();
        match behavior {
            RequestBehavior::Approve(accounts) => {
                *self.authorized.lock().unwrap() = accounts.clone();
                Ok(accounts)
            }
            RequestBehavior::Reject => Err(Error::UserRejected),
            RequestBehavior::Unavailable(msg) => Err(Error::ProviderUnavailable(msg)),
        }
    }

    fn subscribe_accounts_changed(&self) -> Result<AccountsChangedEvents> {
        let (tx, rx) = mpsc::unbounded_channel();
        let id = self.next_subscriber_id.fetch_add(1, Ordering::Relaxed);
        self.subscribers.lock().unwrap().push((id, tx));

        let subscribers = Arc::clone(&self.subscribers);
        Ok(AccountsChangedEvents::new(rx, move || {
            subscribers.lock().unwrap().retain(|(sid, _)| *sid != id);
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ACCOUNT: &str = "0xdadb0d80178819f2319190d340ce9a924f783711";

    #[tokio::test]
    async fn test_absent_wallet_has_no_accounts() {
        let wallet = MockWallet::absent();
        assert!(!wallet.is_available());
        assert!(wallet.authorized_accounts().await.unwrap().is_empty());
        assert!(matches!(
            wallet.request_accounts().await,
            Err(Error::ProviderUnavailable(_))
        ));
    }

    #[tokio::test]
    async fn test_approve_authorizes_accounts() {
        let wallet = MockWallet::new()
            .with_request_behavior(RequestBehavior::Approve(vec![ACCOUNT.to_string()]));

        let accounts = wallet.request_accounts().await.unwrap();
        assert_eq!(accounts, vec![ACCOUNT.to_string()]);
        assert_eq!(wallet.authorized_accounts().await.unwrap(), accounts);
    }

    #[tokio::test]
    async fn test_reject_is_user_rejected() {
        let wallet = MockWallet::new();
        assert!(matches!(
            wallet.request_accounts().await,
            Err(Error::UserRejected)
        ));
    }

    #[tokio::test]
    async fn test_subscription_delivers_and_releases() {
        let wallet = MockWallet::new();
        let mut events = wallet.subscribe_accounts_changed().unwrap();
        assert_eq!(wallet.subscriber_count(), 1);

        wallet.emit_accounts_changed(vec![ACCOUNT.to_string()]);
        assert_eq!(events.recv().await.unwrap(), vec![ACCOUNT.to_string()]);

        drop(events);
        assert_eq!(wallet.subscriber_count(), 0);

        // Emitting after release must not panic or deliver anywhere
        wallet.emit_accounts_changed(vec![]);
    }
}
