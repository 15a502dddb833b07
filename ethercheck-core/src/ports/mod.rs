//! Port definitions (hexagonal architecture)
//!
//! Ports define the interfaces for external dependencies. The core domain
//! depends only on these traits, not on concrete implementations.

mod ledger;
mod wallet_provider;

pub use ledger::LedgerClient;
pub use wallet_provider::{AccountsChangedEvents, SubscriptionGuard, WalletProvider};
