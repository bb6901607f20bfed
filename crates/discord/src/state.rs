//! Shared bot state handed to the serenity event handler.

use {
    dashmap::DashMap,
    gallows_config::{CloseThreadAction, GamemodeConfig},
    gallows_game::{ChatContext, SessionRegistry, WordSource},
    std::{collections::BTreeMap, sync::Arc},
    tracing::{info, warn},
};

/// A playable gamemode: its config plus the vocabulary loaded from its
/// word lists.
#[derive(Debug)]
pub struct Gamemode {
    /// The `/play` option name, taken from the config file stem.
    pub name: String,
    pub config: GamemodeConfig,
    pub words: WordSource,
}

/// Everything the event handler needs, shared across shards.
#[derive(Debug, Default)]
pub struct BotState {
    pub registry: SessionRegistry,
    /// Playable gamemodes keyed by `/play` option name.
    pub gamemodes: BTreeMap<String, Arc<Gamemode>>,
    /// Close-out action for each game thread the bot created, consumed
    /// when the game in it ends.
    pub threads: DashMap<ChatContext, CloseThreadAction>,
}

impl BotState {
    /// Build the bot state from parsed gamemode configs, loading each
    /// gamemode's word lists.
    ///
    /// A gamemode whose lists cannot be read is logged and left out
    /// rather than taking the whole bot down. An empty vocabulary is
    /// only warned about here; `/play` reports it to the user when a
    /// start actually fails on it.
    pub fn load(configs: Vec<(String, GamemodeConfig)>) -> Self {
        let mut gamemodes = BTreeMap::new();
        for (name, config) in configs {
            let words = match WordSource::load(&config.word_list_paths) {
                Ok(words) => words,
                Err(error) => {
                    warn!(gamemode = %name, %error, "disabling gamemode");
                    continue;
                },
            };
            if words.is_empty() {
                warn!(gamemode = %name, "gamemode has no playable words");
            }
            info!(gamemode = %name, words = words.len(), "gamemode loaded");
            gamemodes.insert(name.clone(), Arc::new(Gamemode { name, config, words }));
        }
        Self {
            registry: SessionRegistry::new(),
            gamemodes,
            threads: DashMap::new(),
        }
    }

    pub fn gamemode(&self, name: &str) -> Option<Arc<Gamemode>> {
        self.gamemodes.get(name).cloned()
    }
}
