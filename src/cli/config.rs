//! Config command handler
//!
//! View and modify configuration settings.

use crate::config::Config;
use crate::error::{Error, Result};
use clap::Args;

/// Config command arguments
#[derive(Args)]
pub struct ConfigArgs {
    /// Configuration key (e.g., "search.unit")
    pub key: Option<String>,

    /// Value to set (if not provided, shows current value)
    pub value: Option<String>,

    /// Show config file path
    #[arg(long)]
    pub path: bool,

    /// Reset config to defaults
    #[arg(long)]
    pub reset: bool,
}

/// Run the config command
pub fn run(args: ConfigArgs) -> Result<()> {
    if args.path {
        let path = Config::config_path()?;
        println!("{}", path.display());
        return Ok(());
    }

    if args.reset {
        Config::default().save()?;
        println!("Configuration reset to defaults");
        return Ok(());
    }

    let mut config = Config::load()?;

    match (&args.key, &args.value) {
        (None, None) => {
            let content = toml::to_string_pretty(&config)
                .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
            println!("{}", content.trim_end());
        }

        (Some(key), None) => match config.get(key) {
            Some(value) => println!("{}", value),
            None => {
                let keys = Config::available_keys().join("\n  ");
                return Err(Error::Config(format!(
                    "Unknown config key: {}\n\nAvailable keys:\n  {}",
                    key, keys
                )));
            }
        },

        (Some(key), Some(value)) => {
            config.set(key, value)?;
            config.save()?;
            println!("{} = {}", key, value);
        }

        (None, Some(_)) => {
            return Err(Error::Config(
                "Must specify a key to set a value".to_string(),
            ));
        }
    }

    Ok(())
}
