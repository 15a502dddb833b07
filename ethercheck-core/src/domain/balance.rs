//! Native-token balance conversion
//!
//! The ledger reports balances as integer wei quantities in hex. Everything
//! user-facing works in ETH, derived through the fixed 18-decimal scaling.

use rust_decimal::Decimal;

use crate::domain::result::{Error, Result};

/// Number of decimal places between wei and ETH
pub const ETH_DECIMALS: u32 = 18;

/// Parse a JSON-RPC hex quantity (e.g. `"0x1b1ae4d6e2ef500000"`) into wei
pub fn parse_wei_hex(quantity: &str) -> Result<u128> {
    let digits = quantity
        .strip_prefix("0x")
        .or_else(|| quantity.strip_prefix("0X"))
        .ok_or_else(|| Error::network(format!("malformed hex quantity: {}", quantity)))?;

    if digits.is_empty() {
        return Err(Error::network(format!("empty hex quantity: {}", quantity)));
    }

    u128::from_str_radix(digits, 16)
        .map_err(|e| Error::network(format!("unparseable balance {}: {}", quantity, e)))
}

/// Convert a wei amount to a human-readable ETH decimal
pub fn wei_to_eth(wei: u128) -> Result<Decimal> {
    let wei = i128::try_from(wei)
        .map_err(|_| Error::network(format!("balance out of range: {} wei", wei)))?;

    Decimal::try_from_i128_with_scale(wei, ETH_DECIMALS)
        .map(|d| d.normalize())
        .map_err(|e| Error::network(format!("balance out of range: {}", e)))
}

/// Format an ETH amount for display, e.g. `1.2345 ETH`
pub fn format_eth(amount: Decimal) -> String {
    format!("{} ETH", amount.normalize())
}
