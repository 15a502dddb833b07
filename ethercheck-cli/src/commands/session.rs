//! Session command - interactive wallet session walk
//!
//! Plays the part of the browser page: initializes the session, asks the
//! user to approve the (scripted) wallet's connection prompt, then replays
//! an account switch and a wallet lock through the event subscription so
//! every transition is visible.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use colored::Colorize;
use dialoguer::Confirm;
use indicatif::ProgressBar;

use ethercheck_core::adapters::{MockWallet, RequestBehavior};
use ethercheck_core::domain::balance::format_eth;
use ethercheck_core::{EthercheckContext, Session, SessionStatus};

use super::get_ethercheck_dir;
use crate::output;

/// The account the scripted wallet approves with
const PRIMARY_ACCOUNT: &str = "0xdadb0d80178819f2319190d340ce9a924f783711";
/// The account it silently switches to mid-session
const SECONDARY_ACCOUNT: &str = "0x53d284357ec70ce289d6d64134dfac8e511c8a3d";

/// How long to give the event pump to process a delivery
const EVENT_SETTLE: Duration = Duration::from_millis(100);

pub async fn run(auto_approve: bool, json: bool) -> Result<()> {
    let dir = get_ethercheck_dir();
    std::fs::create_dir_all(&dir)?;

    let wallet = Arc::new(MockWallet::new());
    let ctx = EthercheckContext::new(&dir, wallet.clone())?;
    let service = ctx.session;

    let _pump = service.spawn_event_pump()?;

    let session = service.initialize().await;
    render(&session, json)?;

    if !session.is_connected() {
        let approve = if auto_approve || json {
            true
        } else {
            Confirm::new()
                .with_prompt("The wallet is asking to connect this site. Approve?")
                .default(true)
                .interact()?
        };

        wallet.set_request_behavior(if approve {
            RequestBehavior::Approve(vec![PRIMARY_ACCOUNT.to_string()])
        } else {
            RequestBehavior::Reject
        });

        let spinner = (!json).then(connecting_spinner);
        let session = service.connect().await;
        if let Some(spinner) = spinner {
            spinner.finish_and_clear();
        }

        render(&session, json)?;
        if !session.is_connected() {
            return Ok(());
        }
    }

    if !json {
        output::info("wallet event: account switched");
    }
    wallet.emit_accounts_changed(vec![SECONDARY_ACCOUNT.to_string()]);
    tokio::time::sleep(EVENT_SETTLE).await;
    render(&service.snapshot(), json)?;

    if !json {
        output::info("wallet event: wallet locked");
    }
    wallet.emit_accounts_changed(vec![]);
    tokio::time::sleep(EVENT_SETTLE).await;
    render(&service.snapshot(), json)?;

    Ok(())
}

fn connecting_spinner() -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_message("Requesting account authorization...");
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

fn render(session: &Session, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string(session)?);
        return Ok(());
    }

    let status = match session.status {
        SessionStatus::Disconnected => "disconnected".yellow(),
        SessionStatus::Connecting => "connecting".cyan(),
        SessionStatus::Connected => "connected".green(),
        SessionStatus::Error => "error".red(),
    };

    let mut table = output::create_table();
    table.add_row(vec!["Status".to_string(), status.to_string()]);
    table.add_row(vec![
        "Account".to_string(),
        session
            .account
            .as_ref()
            .map(|a| a.to_string())
            .unwrap_or_else(|| "-".to_string()),
    ]);
    table.add_row(vec![
        "Balance".to_string(),
        session
            .balance
            .map(format_eth)
            .unwrap_or_else(|| "-".to_string()),
    ]);
    if let Some(message) = &session.last_error {
        table.add_row(vec!["Message".to_string(), message.clone()]);
    }
    println!("{}", table);
    println!();

    Ok(())
}
