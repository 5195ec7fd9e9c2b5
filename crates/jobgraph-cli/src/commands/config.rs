//! Config command - view and manage configuration

use anyhow::{Context, Result};
use clap::Subcommand;
use jobgraph_config::ConfigLoader;

use super::{load_config, print_info};
use crate::GlobalOptions;

/// Configuration subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show the effective merged configuration
    Show,

    /// Create a local .jobgraph/config.toml with defaults
    Init,
}

/// Execute the config command
pub fn execute(cmd: ConfigCommand, global: GlobalOptions) -> Result<()> {
    let cwd = std::env::current_dir().context("Failed to get current directory")?;

    match cmd {
        ConfigCommand::Show => {
            let config = load_config(&global, &cwd)?;
            if global.quiet {
                // Machine-readable
                println!("{}", serde_json::to_string(&config)?);
            } else {
                print!("{}", toml::to_string_pretty(&config)?);
            }
            Ok(())
        }
        ConfigCommand::Init => {
            let path = ConfigLoader::new().init_local(&cwd)?;
            print_info(&format!("Created {}", path.display()), global.quiet);
            Ok(())
        }
    }
}
