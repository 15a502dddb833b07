//! Ledger query port
//!
//! Defines the interface for fetching an account's on-chain balance from a
//! remote ledger endpoint (JSON-RPC, demo data, etc.)

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::domain::result::Result;
use crate::domain::Address;

/// Ledger client trait
///
/// Implementations resolve an address against a fixed remote ledger and
/// return the balance in ETH. No retry policy lives here; a failed fetch is
/// reported to the session state machine, which leaves the balance unset.
#[async_trait]
pub trait LedgerClient: Send + Sync {
    /// Client name (e.g., "json-rpc", "demo")
    fn name(&self) -> &str;

    /// Fetch the current balance for an address
    ///
    /// Fails with `Error::Network` on transport failure and
    /// `Error::InvalidAddress` on malformed input.
    async fn get_balance(&self, address: &Address) -> Result<Decimal>;
}
