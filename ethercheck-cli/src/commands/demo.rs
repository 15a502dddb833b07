//! Demo command - manage demo mode

use anyhow::Result;
use clap::Subcommand;
use colored::Colorize;

use super::{get_config, get_ethercheck_dir};

#[derive(Subcommand)]
pub enum DemoCommands {
    /// Enable demo mode
    #[command(name = "on")]
    On,
    /// Disable demo mode
    #[command(name = "off")]
    Off,
    /// Show demo mode status
    Status,
}

pub fn run(command: Option<DemoCommands>) -> Result<()> {
    let mut config = get_config()?;

    match command {
        Some(DemoCommands::On) => {
            config.enable_demo_mode();
            config.save(&get_ethercheck_dir())?;
            println!("{}", "Demo mode enabled".green());
            println!("Balances now come from the demo ledger. Run 'ethc session' to try it.");
            Ok(())
        }
        Some(DemoCommands::Off) => {
            config.disable_demo_mode();
            config.save(&get_ethercheck_dir())?;
            println!("{}", "Demo mode disabled".yellow());
            Ok(())
        }
        Some(DemoCommands::Status) | None => {
            if config.demo_mode {
                println!("Demo mode is {}", "on".green());
            } else {
                println!("Demo mode is {}", "off".yellow());
            }
            Ok(())
        }
    }
}
