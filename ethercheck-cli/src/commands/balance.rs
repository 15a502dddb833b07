//! Balance command - one-shot ledger query for an address

use anyhow::Result;
use colored::Colorize;

use ethercheck_core::domain::balance::format_eth;
use ethercheck_core::Address;

use super::{get_config, get_ledger};
use crate::output;

pub async fn run(address: &str, json: bool) -> Result<()> {
    let config = get_config()?;
    let ledger = get_ledger(&config)?;

    let address = Address::parse(address)?;
    let balance = ledger.get_balance(&address).await?;

    if json {
        let result = serde_json::json!({
            "address": address.as_str(),
            "network": config.network,
            "balance": balance,
        });
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    println!(
        "{}  {}",
        address.to_string().dimmed(),
        output::eth_amount(&format_eth(balance))
    );

    Ok(())
}
