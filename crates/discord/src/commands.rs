//! Slash command registration.
//!
//! The command set is built from the loaded gamemodes when the bot
//! connects, so the `/play` option offers exactly the gamemodes that
//! are playable.

use {
    crate::state::BotState,
    serenity::all::{Command, CommandOptionType, Context, CreateCommand, CreateCommandOption},
    tracing::{info, warn},
};

pub const PLAY: &str = "play";
pub const GAMEMODES: &str = "gamemodes";

/// Discord caps string-option choices at 25.
const MAX_CHOICES: usize = 25;

/// Build the global slash commands for the loaded gamemodes.
pub fn build_commands(state: &BotState) -> Vec<CreateCommand> {
    let mut gamemode = CreateCommandOption::new(
        CommandOptionType::String,
        "gamemode",
        "Which gamemode to play",
    )
    .required(true);
    for (name, mode) in state.gamemodes.iter().take(MAX_CHOICES) {
        gamemode = gamemode.add_string_choice(&mode.config.display_name, name);
    }

    vec![
        CreateCommand::new(PLAY)
            .description("Start a game of hangman")
            .add_option(gamemode),
        CreateCommand::new(GAMEMODES).description("List the available gamemodes"),
    ]
}

/// Register the global slash commands for the bot.
pub async fn register_global_commands(ctx: &Context, state: &BotState) {
    match Command::set_global_commands(&ctx, build_commands(state)).await {
        Ok(commands) => {
            let names: Vec<&str> = commands.iter().map(|c| c.name.as_str()).collect();
            info!(commands = ?names, "registered Discord slash commands");
        },
        Err(e) => {
            warn!("failed to register Discord slash commands: {e}");
        },
    }
}
