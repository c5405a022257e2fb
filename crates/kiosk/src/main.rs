// SPDX-FileCopyrightText: 2026 Kiosk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Kiosk - a Telegram storefront bot with conversational order intake.
//!
//! This is the binary entry point for the Kiosk bot.

mod serve;

use clap::{Parser, Subcommand};

/// Kiosk - a Telegram storefront bot.
#[derive(Parser, Debug)]
#[command(name = "kiosk", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the Kiosk bot.
    Serve,
    /// Manage Kiosk configuration.
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigAction {
    /// Print the effective configuration after merging all sources.
    Show,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Load and validate configuration at startup
    let config = match kiosk_config::load_and_validate() {
        Ok(config) => config,
        Err(errors) => {
            kiosk_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    match cli.command {
        Some(Commands::Serve) => {
            if let Err(e) = serve::run_serve(config).await {
                eprintln!("error: {e}");
                std::process::exit(1);
            }
        }
        Some(Commands::Config {
            action: ConfigAction::Show,
        }) => match toml::to_string_pretty(&config) {
            Ok(rendered) => print!("{rendered}"),
            Err(e) => {
                eprintln!("error: failed to render configuration: {e}");
                std::process::exit(1);
            }
        },
        None => {
            println!("kiosk: use --help for available commands");
        }
    }
}

#[cfg(test)]
mod tests {
    #[test]
    fn binary_loads_config_defaults() {
        // Verify config loads with defaults (no config file needed)
        let config = kiosk_config::load_and_validate_str("").expect("default config should be valid");
        assert_eq!(config.bot.name, "kiosk");
        assert_eq!(config.commerce.base_url, "http://localhost:8000");
    }

    #[test]
    fn effective_config_renders_as_toml() {
        let config = kiosk_config::load_and_validate_str("").unwrap();
        let rendered = toml::to_string_pretty(&config).unwrap();
        assert!(rendered.contains("[commerce]"));
        assert!(rendered.contains("base_url"));
    }
}
