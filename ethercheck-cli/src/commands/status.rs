//! Status command - show configuration and ledger selection

use anyhow::Result;
use colored::Colorize;

use super::get_config;
use crate::output;

pub fn run(json: bool) -> Result<()> {
    let config = get_config()?;

    let ledger = if config.demo_mode { "demo" } else { "json-rpc" };
    let key_state = if config.access_key.is_some() {
        "configured"
    } else {
        "not set"
    };

    if json {
        let status = serde_json::json!({
            "network": config.network,
            "accessKey": key_state,
            "demoMode": config.demo_mode,
            "ledger": ledger,
        });
        println!("{}", serde_json::to_string_pretty(&status)?);
        return Ok(());
    }

    println!("{}", "Ethercheck Status".bold());
    println!();

    let mut table = output::create_table();
    table.add_row(vec!["Network", &config.network]);
    table.add_row(vec!["Access key", key_state]);
    table.add_row(vec!["Demo mode", if config.demo_mode { "on" } else { "off" }]);
    table.add_row(vec!["Ledger", ledger]);
    println!("{}", table);

    if !config.demo_mode && config.access_key.is_none() {
        println!();
        output::warning(
            "No access key configured. Run 'ethc setup <network> --access-key <key>' \
            or 'ethc demo on'.",
        );
    }

    Ok(())
}
