//! Wallet provider port
//!
//! Defines the interface to the user's wallet capability. The session state
//! machine depends only on this trait, so the core stays testable without a
//! real injected provider.

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::domain::result::Result;

/// Wallet provider trait
///
/// Wire contract: `authorized_accounts` maps to the non-interactive
/// `eth_accounts` request, `request_accounts` to the interactive
/// `eth_requestAccounts` request, and the subscription to the
/// `accountsChanged` event. Account strings are lowercase hex addresses.
#[async_trait]
pub trait WalletProvider: Send + Sync {
    /// Whether the host environment exposes a wallet capability at all
    fn is_available(&self) -> bool;

    /// Already-authorized accounts; empty when none granted or no provider.
    /// Never prompts the user.
    async fn authorized_accounts(&self) -> Result<Vec<String>>;

    /// Request account authorization, prompting the user if needed
    ///
    /// Fails with `Error::ProviderUnavailable` when no provider is present
    /// and `Error::UserRejected` when the user declines.
    async fn request_accounts(&self) -> Result<Vec<String>>;

    /// Subscribe to `accountsChanged` notifications
    ///
    /// An empty delivered sequence means the user disconnected or locked the
    /// wallet. The subscription is released when the returned stream is
    /// dropped, so a torn-down listener can never observe further events.
    fn subscribe_accounts_changed(&self) -> Result<AccountsChangedEvents>;
}

/// Stream of `accountsChanged` deliveries with scoped release
pub struct AccountsChangedEvents {
    rx: mpsc::UnboundedReceiver<Vec<String>>,
    _release: SubscriptionGuard,
}

impl AccountsChangedEvents {
    /// Wrap a receiver together with a release action invoked on drop
    pub fn new(
        rx: mpsc::UnboundedReceiver<Vec<String>>,
        on_release: impl FnOnce() + Send + 'static,
    ) -> Self {
        Self {
            rx,
            _release: SubscriptionGuard::new(on_release),
        }
    }

    /// Receive the next account-change delivery
    ///
    /// Returns `None` once the provider side has gone away.
    pub async fn recv(&mut self) -> Option<Vec<String>> {
        self.rx.recv().await
    }
}

/// Runs a release action exactly once when dropped
pub struct SubscriptionGuard {
    release: Option<Box<dyn FnOnce() + Send>>,
}

impl SubscriptionGuard {
    pub fn new(release: impl FnOnce() + Send + 'static) -> Self {
        Self {
            release: Some(Box::new(release)),
        }
    }
}

impl Drop for SubscriptionGuard {
    fn drop(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}
