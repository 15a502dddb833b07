//! Demo ledger for demo mode
//!
//! Returns deterministic balances without touching the network, so the
//! session walk and the CLI can run with no access key configured.

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::domain::result::Result;
use crate::domain::Address;
use crate::ports::LedgerClient;

/// Demo ledger with deterministic per-address balances
#[derive(Debug, Default)]
pub struct DemoLedger;

impl DemoLedger {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl LedgerClient for DemoLedger {
    fn name(&self) -> &str {
        "demo"
    }

    async fn get_balance(&self, address: &Address) -> Result<Decimal> {
        // Derive a stable balance from the last address byte: 0.05 to 12.80
        // ETH depending on the account, so switches visibly change the figure.
        let last_byte = u8::from_str_radix(&address.as_str()[40..42], 16).unwrap_or(0);
        Ok(Decimal::new(5 * (i64::from(last_byte) + 1), 2))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_demo_balance_is_deterministic() {
        let ledger = DemoLedger::new();
        let addr = Address::parse("0xdadb0d80178819f2319190d340ce9a924f783711").unwrap();

        let first = ledger.get_balance(&addr).await.unwrap();
        let second = ledger.get_balance(&addr).await.unwrap();
        assert_eq!(first, second);
        assert!(first > Decimal::ZERO);
    }

    #[tokio::test]
    async fn test_demo_balance_varies_by_account() {
        let ledger = DemoLedger::new();
        let a = Address::parse("0xdadb0d80178819f2319190d340ce9a924f783711").unwrap();
        let b = Address::parse("0xdadb0d80178819f2319190d340ce9a924f783712").unwrap();

        assert_ne!(
            ledger.get_balance(&a).await.unwrap(),
            ledger.get_balance(&b).await.unwrap()
        );
    }
}
