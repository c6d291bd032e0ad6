// SPDX-FileCopyrightText: 2026 KisanMitra Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! KisanMitra developer CLI.
//!
//! Inspects and seeds a local KisanMitra data store.

mod doctor;
mod inspect;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use kisanmitra_config::KisanConfig;
use kisanmitra_core::{KisanError, UserId};
use tracing_subscriber::EnvFilter;

/// KisanMitra - inspect a farmer's local data store.
#[derive(Parser, Debug)]
#[command(name = "kisanmitra", version, about, long_about = None)]
struct Cli {
    /// Read configuration from this TOML file instead of the standard locations.
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Show dashboard statistics for a user.
    Stats {
        #[arg(long)]
        user: String,
        /// Print JSON instead of a table.
        #[arg(long)]
        json: bool,
    },
    /// Show a user's activity log, oldest first.
    Activity {
        #[arg(long)]
        user: String,
        /// Only show the most recent N entries.
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Show the shopping cart.
    Cart,
    /// Show the order history.
    Orders,
    /// Log in (creating the user if needed) and add sample data.
    Seed {
        #[arg(long)]
        phone: String,
        #[arg(long, default_value = "Demo Farmer")]
        name: String,
        #[arg(long, default_value = "Nashik")]
        location: String,
        #[arg(long, default_value = "Maharashtra")]
        state: String,
    },
    /// Run diagnostic checks on configuration and storage.
    Doctor {
        /// Disable colored output.
        #[arg(long)]
        plain: bool,
    },
    /// Print the effective configuration as TOML.
    Config,
}

fn load_config(path: Option<&PathBuf>) -> KisanConfig {
    let loaded = match path {
        Some(path) => kisanmitra_config::load_and_validate_path(path),
        None => kisanmitra_config::load_and_validate(),
    };
    match loaded {
        Ok(config) => config,
        Err(errors) => {
            kisanmitra_config::render_errors(&errors);
            std::process::exit(1);
        }
    }
}

fn init_tracing(config: &KisanConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(command: Commands, config: &KisanConfig) -> Result<(), KisanError> {
    match command {
        Commands::Stats { user, json } => inspect::run_stats(config, &UserId::new(user), json),
        Commands::Activity { user, limit } => {
            inspect::run_activity(config, &UserId::new(user), limit)
        }
        Commands::Cart => inspect::run_cart(config),
        Commands::Orders => inspect::run_orders(config),
        Commands::Seed {
            phone,
            name,
            location,
            state,
        } => inspect::run_seed(
            config,
            kisanmitra_storage::LoginRequest {
                phone,
                name,
                location,
                state,
            },
        ),
        Commands::Doctor { plain } => doctor::run_doctor(config, plain),
        Commands::Config => {
            let rendered = toml::to_string_pretty(config)
                .map_err(|e| KisanError::Internal(format!("failed to render config: {e}")))?;
            print!("{rendered}");
            Ok(())
        }
    }
}

fn main() {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_ref());
    init_tracing(&config);
    tracing::debug!(backend = %config.storage.backend, "configuration loaded");

    let Some(command) = cli.command else {
        println!("kisanmitra: use --help for available commands");
        return;
    };

    if let Err(e) = run(command, &config) {
        eprintln!("kisanmitra: {e}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_stats_with_global_config() {
        let cli = Cli::parse_from([
            "kisanmitra",
            "stats",
            "--user",
            "u1",
            "--json",
            "--config",
            "/tmp/k.toml",
        ]);
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/k.toml")));
        assert!(matches!(
            cli.command,
            Some(Commands::Stats { ref user, json: true }) if user == "u1"
        ));
    }

    #[test]
    fn seed_defaults_fill_profile() {
        let cli = Cli::parse_from(["kisanmitra", "seed", "--phone", "9800000000"]);
        match cli.command {
            Some(Commands::Seed { name, location, .. }) => {
                assert_eq!(name, "Demo Farmer");
                assert_eq!(location, "Nashik");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn default_config_renders_as_toml() {
        let rendered = toml::to_string_pretty(&KisanConfig::default()).expect("render");
        assert!(rendered.contains("[storage]"));
        assert!(rendered.contains("hariyali_mitra_cart"));
    }
}
