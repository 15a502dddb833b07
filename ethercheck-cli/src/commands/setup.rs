//! Setup command - configure the ledger endpoint

use anyhow::Result;

use ethercheck_core::adapters::JsonRpcLedger;

use super::{get_config, get_ethercheck_dir};
use crate::output;

pub fn run(network: &str, access_key: &str) -> Result<()> {
    // Validate before persisting anything
    JsonRpcLedger::new(network, access_key)?;

    let mut config = get_config()?;
    config.network = network.to_string();
    config.access_key = Some(access_key.to_string());
    config.save(&get_ethercheck_dir())?;

    output::success(&format!("Ledger configured for network '{}'", network));
    println!("Run 'ethc balance <address>' to query a balance.");

    Ok(())
}
