use std::{path::PathBuf, sync::Arc};

use {
    anyhow::{Context as _, Result},
    clap::Parser,
    gallows_config::{BotConfig, load_gamemodes},
    gallows_discord::{BotState, Handler, required_intents},
    secrecy::ExposeSecret,
    serenity::Client,
    tracing::{info, warn},
};

/// Discord hangman bot.
///
/// Loads the bot token and the gamemode files, connects to the Discord
/// gateway, and runs games started with `/play`.
#[derive(Parser, Debug)]
#[command(version)]
struct Args {
    /// Path to the bot config file.
    #[arg(long, default_value = "config.txt")]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let config = BotConfig::load(&args.config)
        .with_context(|| format!("failed to load config from {}", args.config.display()))?;
    let gamemodes = load_gamemodes(&config.gamemodes_dir).with_context(|| {
        format!(
            "failed to load gamemodes from {}",
            config.gamemodes_dir.display()
        )
    })?;

    let state = Arc::new(BotState::load(gamemodes));
    if state.gamemodes.is_empty() {
        warn!(
            dir = %config.gamemodes_dir.display(),
            "no playable gamemodes loaded; /play will have nothing to offer"
        );
    }
    info!(gamemodes = state.gamemodes.len(), "starting Discord client");

    let mut client = Client::builder(config.token.expose_secret(), required_intents())
        .event_handler(Handler { state })
        .await
        .context("failed to build Discord client")?;
    client.start().await.context("Discord client stopped")?;
    Ok(())
}
