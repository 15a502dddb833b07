//! Adapter implementations
//!
//! Adapters implement the port traits with concrete technologies:
//! - JSON-RPC HTTP client for the LedgerClient port
//! - Demo ledger with deterministic balances
//! - Scriptable mock wallet for the WalletProvider port

pub mod demo;
pub mod json_rpc;
pub mod mock_wallet;

#[cfg(test)]
pub mod json_rpc_mock;

pub use demo::DemoLedger;
pub use json_rpc::JsonRpcLedger;
pub use mock_wallet::{MockWallet, RequestBehavior};
