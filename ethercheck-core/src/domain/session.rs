//! Wallet session domain model

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::Address;

/// Connection status of the wallet session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    Disconnected,
    Connecting,
    Connected,
    Error,
}

/// A snapshot of the wallet session
///
/// Exactly one session exists per process. It is mutated only by the
/// `SessionService`; the presentation layer reads cloned snapshots.
///
/// Invariant: `status == Connected` iff `account` is present. `balance` is
/// only meaningful while connected, and is `None` while a refresh is in
/// flight or after a failed refresh.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub status: SessionStatus,
    pub account: Option<Address>,
    /// Current balance in ETH, `None` while unknown or pending
    pub balance: Option<Decimal>,
    /// Most recent surfaced error message, cleared by a successful transition
    pub last_error: Option<String>,
    pub updated_at: DateTime<Utc>,
}

impl Session {
    /// Create the initial (disconnected) session
    pub fn new() -> Self {
        Self {
            status: SessionStatus::Disconnected,
            account: None,
            balance: None,
            last_error: None,
            updated_at: Utc::now(),
        }
    }

    pub fn is_connected(&self) -> bool {
        self.status == SessionStatus::Connected
    }

    /// Check the status/account invariant
    pub fn is_consistent(&self) -> bool {
        (self.status == SessionStatus::Connected) == self.account.is_some()
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
