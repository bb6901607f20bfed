//! The serenity event handler: slash commands in, guesses in, game
//! state out.

use {
    crate::{commands, format, outbound, state::BotState},
    gallows_game::{ChatContext, Error as GameError, PlayerId, registry::SessionSettings},
    serenity::{
        all::{
            CommandInteraction, Context, CreateInteractionResponse,
            CreateInteractionResponseMessage, CreateThread, EventHandler, GatewayIntents,
            GuildChannel, Interaction, Message, PartialGuildChannel, Ready, ThreadMetadata,
        },
        async_trait,
    },
    std::sync::Arc,
    tracing::{debug, info, warn},
};

/// Required gateway intents for the bot.
///
/// `GUILDS` delivers thread lifecycle events; `MESSAGE_CONTENT` is
/// needed to read guesses.
pub fn required_intents() -> GatewayIntents {
    GatewayIntents::GUILDS
        | GatewayIntents::GUILD_MESSAGES
        | GatewayIntents::DIRECT_MESSAGES
        | GatewayIntents::MESSAGE_CONTENT
}

/// Serenity event handler for the hangman bot.
pub struct Handler {
    pub state: Arc<BotState>,
}

#[async_trait]
impl EventHandler for Handler {
    async fn ready(&self, ctx: Context, ready: Ready) {
        info!(
            bot_user = %ready.user.name,
            gamemodes = self.state.gamemodes.len(),
            "Discord bot connected"
        );
        commands::register_global_commands(&ctx, &self.state).await;
    }

    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        let Interaction::Command(command) = interaction else {
            return;
        };
        debug!(
            command = %command.data.name,
            user = %command.user.name,
            "slash command received"
        );
        match command.data.name.as_str() {
            commands::PLAY => self.handle_play(&ctx, &command).await,
            commands::GAMEMODES => self.handle_gamemodes(&ctx, &command).await,
            other => debug!(command = other, "ignoring unknown slash command"),
        }
    }

    async fn message(&self, ctx: Context, msg: Message) {
        // Ignore messages from bots (including ourselves).
        if msg.author.bot {
            return;
        }
        let context = ChatContext(msg.channel_id.get());
        if !self.state.registry.contains(context) {
            return;
        }

        let guesser = PlayerId(msg.author.id.get());
        match self.state.registry.guess(context, guesser, &msg.content).await {
            Ok(report) => {
                let finished = report.render.status.is_terminal();
                let reply = format::guess_reply(&report);
                if let Err(e) = outbound::send_text(&ctx.http, msg.channel_id, &reply).await {
                    warn!(context = context.0, "failed to send guess reply: {e}");
                }
                // The registry has already dropped a finished session;
                // all that is left is closing the game thread, off the
                // event path.
                if finished
                    && let Some((_, action)) = self.state.threads.remove(&context)
                {
                    let http = Arc::clone(&ctx.http);
                    let channel_id = msg.channel_id;
                    tokio::spawn(async move {
                        outbound::close_thread(&http, channel_id, action).await;
                    });
                }
            },
            Err(error @ GameError::InvalidGuess(_)) => {
                if let Err(e) =
                    outbound::send_text(&ctx.http, msg.channel_id, &error.to_string()).await
                {
                    warn!(context = context.0, "failed to send guess hint: {e}");
                }
            },
            // Non-owner messages in a private game are just chat, and a
            // NoActiveGame here means the game finished in a race with
            // this message.
            Err(error @ (GameError::NotAuthorized | GameError::NoActiveGame)) => {
                debug!(context = context.0, %error, "message did not count as a guess");
            },
            Err(error) => {
                warn!(context = context.0, %error, "guess handling failed");
            },
        }
    }

    async fn thread_update(&self, _ctx: Context, _old: Option<GuildChannel>, new: GuildChannel) {
        self.note_thread_state(ChatContext(new.id.get()), new.thread_metadata);
    }

    async fn thread_delete(
        &self,
        _ctx: Context,
        thread: PartialGuildChannel,
        _full_thread_data: Option<GuildChannel>,
    ) {
        self.abandon_session(ChatContext(thread.id.get()), "deleted");
    }
}

impl Handler {
    /// A moderator archiving a thread abandons its game just like
    /// deleting it; an update that leaves the thread open is ignored.
    fn note_thread_state(&self, context: ChatContext, metadata: Option<ThreadMetadata>) {
        if metadata.is_some_and(|m| m.archived) {
            self.abandon_session(context, "archived");
        }
    }

    fn abandon_session(&self, context: ChatContext, reason: &str) {
        if self.state.registry.contains(context) {
            info!(context = context.0, reason, "game thread gone, abandoning session");
        }
        self.state.registry.remove(context);
        self.state.threads.remove(&context);
    }

    async fn handle_play(&self, ctx: &Context, command: &CommandInteraction) {
        let requested = command
            .data
            .options
            .first()
            .and_then(|option| option.value.as_str())
            .unwrap_or_default();
        let Some(gamemode) = self.state.gamemode(requested) else {
            respond_ephemeral(ctx, command, &format!("Unknown gamemode '{requested}'.")).await;
            return;
        };

        // Without a thread the game runs in the invoking channel, so a
        // conflict is knowable before we announce anything. With a
        // thread the context does not exist yet; the registry still has
        // the final say either way.
        if !gamemode.config.create_thread
            && self.state.registry.contains(ChatContext(command.channel_id.get()))
        {
            respond_ephemeral(
                ctx,
                command,
                "A game is already running in this channel.",
            )
            .await;
            return;
        }

        let announcement = CreateInteractionResponseMessage::new()
            .content(format::start_message(&gamemode.config.display_name));
        if let Err(e) = command
            .create_response(&ctx, CreateInteractionResponse::Message(announcement))
            .await
        {
            warn!(gamemode = %gamemode.name, "failed to respond to /play: {e}");
            return;
        }

        let mut game_channel = command.channel_id;
        let mut created_thread = false;
        if gamemode.config.create_thread {
            match self.create_game_thread(ctx, command, &gamemode.config.display_name).await {
                Ok(thread) => {
                    game_channel = thread.id;
                    created_thread = true;
                },
                Err(e) => {
                    warn!(
                        gamemode = %gamemode.name,
                        "failed to create game thread, playing in the channel: {e}"
                    );
                },
            }
        }

        let context = ChatContext(game_channel.get());
        let settings = SessionSettings {
            lives: gamemode.config.lives,
            policy: gamemode.config.guessers,
        };
        let owner = PlayerId(command.user.id.get());
        match self.state.registry.start(context, owner, settings, &gamemode.words) {
            Ok(render) => {
                if created_thread {
                    self.state
                        .threads
                        .insert(context, gamemode.config.close_thread_action);
                }
                if let Err(e) =
                    outbound::send_text(&ctx.http, game_channel, &format::opening(&render)).await
                {
                    warn!(context = context.0, "failed to send opening board: {e}");
                }
            },
            Err(error) => {
                warn!(context = context.0, %error, "could not start game");
                if let Err(e) =
                    outbound::send_text(&ctx.http, game_channel, &format!("Cannot start: {error}."))
                        .await
                {
                    warn!(context = context.0, "failed to report start failure: {e}");
                }
            },
        }
    }

    /// Hang a game thread off the `/play` announcement message.
    async fn create_game_thread(
        &self,
        ctx: &Context,
        command: &CommandInteraction,
        display_name: &str,
    ) -> serenity::Result<GuildChannel> {
        let announcement = command.get_response(&ctx.http).await?;
        announcement
            .channel_id
            .create_thread_from_message(
                &ctx.http,
                announcement.id,
                CreateThread::new(format::thread_name(display_name)),
            )
            .await
    }

    async fn handle_gamemodes(&self, ctx: &Context, command: &CommandInteraction) {
        let listing = if self.state.gamemodes.is_empty() {
            "No gamemodes are loaded.".to_string()
        } else {
            self.state
                .gamemodes
                .values()
                .map(|mode| {
                    format::gamemode_line(
                        &mode.name,
                        &mode.config.display_name,
                        &mode.config.description,
                    )
                })
                .collect::<Vec<_>>()
                .join("\n")
        };
        respond_ephemeral(ctx, command, &listing).await;
    }
}

/// Send an ephemeral response to a slash command (only visible to the
/// invoker).
async fn respond_ephemeral(ctx: &Context, command: &CommandInteraction, text: &str) {
    let response = CreateInteractionResponseMessage::new()
        .content(text)
        .ephemeral(true);
    if let Err(e) = command
        .create_response(&ctx, CreateInteractionResponse::Message(response))
        .await
    {
        warn!(
            command = %command.data.name,
            "failed to respond to slash command: {e}"
        );
    }
}
