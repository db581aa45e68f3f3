//! Verity CLI - Fact-check claims from the terminal.

use clap::Parser;
use std::io::IsTerminal;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use verity_cli::commands::{self, RevealOptions};
use verity_cli::config::OutputFormat;
use verity_cli::{Cli, Command, Config, Formatter};
use verity_domain::TierTable;
use verity_sdk::VerityClient;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Log to stderr at a level chosen by `-v`, unless `RUST_LOG` is set.
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> verity_cli::Result<()> {
    // Load config, falling back to defaults if the default file is unreadable
    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load().unwrap_or_else(|e| {
            tracing::warn!("Ignoring unreadable config: {}", e);
            Config::default()
        }),
    };

    // Override profile if specified
    if let Some(profile_name) = cli.profile {
        config.switch_profile(profile_name)?;
    }

    // Determine output format
    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);

    // Determine color setting
    let color_enabled = !cli.no_color && config.settings.color;

    let formatter = Formatter::new(format, color_enabled);
    let tiers = TierTable::standard();

    match cli.command {
        Command::Profile(args) => commands::execute_profile(args, &mut config, &formatter)?,
        Command::Tier(args) => commands::execute_tier(args, &tiers, &formatter)?,
        Command::Tiers => commands::execute_tiers(&tiers, &formatter)?,
        cmd => {
            // Commands that talk to the API
            let profile = config.get_active_profile()?;
            let client = Arc::new(VerityClient::new(&profile.api_url)?);
            let options = RevealOptions {
                resolver: config.resolver_config(),
                share_base: profile.share_base(),
                animate: !cli.no_animation
                    && config.settings.animate
                    && format == OutputFormat::Table
                    && std::io::stdout().is_terminal(),
                tiers: tiers.clone(),
            };
            tracing::debug!("Using API at {}", client.base_url());

            match cmd {
                Command::Check(args) => {
                    commands::execute_check(args, client, &options, &formatter).await?;
                }
                Command::Show(args) => {
                    commands::execute_show(args, client, &options, &formatter).await?;
                }
                Command::Share(args) => {
                    commands::execute_share(args, client, &options.share_base, &formatter)
                        .await?;
                }
                Command::Leaderboard(args) => {
                    commands::execute_leaderboard(args, &client, &tiers, &formatter).await?;
                }
                Command::Me => {
                    commands::execute_me(&client, &tiers, &formatter).await?;
                }
                Command::Profile(_) | Command::Tier(_) | Command::Tiers => {}
            }
        }
    }

    Ok(())
}
