//! Gamemode definitions loaded from `key=value` files.

use {
    crate::{ConfigError, Result, file},
    gallows_game::{GuesserPolicy, WordListSpec},
    std::path::{Path, PathBuf},
};

/// Which game variant a gamemode runs.
///
/// Only singleplayer exists today; the key stays in the file format so
/// adding a variant later doesn't break existing configs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GamemodeKind {
    #[default]
    Singleplayer,
}

impl GamemodeKind {
    fn parse(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "singleplayer" => Some(Self::Singleplayer),
            _ => None,
        }
    }
}

/// What happens to a game thread when its game ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CloseThreadAction {
    Nothing,
    Archive,
    #[default]
    Lock,
    Delete,
}

impl CloseThreadAction {
    fn parse(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "nothing" => Some(Self::Nothing),
            "archive" => Some(Self::Archive),
            "lock" => Some(Self::Lock),
            "delete" => Some(Self::Delete),
            _ => None,
        }
    }
}

/// A fully validated gamemode config.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GamemodeConfig {
    pub display_name: String,
    pub kind: GamemodeKind,
    pub description: String,
    pub lives: u32,
    pub word_list_paths: Vec<WordListSpec>,
    pub create_thread: bool,
    pub close_thread_action: CloseThreadAction,
    pub guessers: GuesserPolicy,
}

impl GamemodeConfig {
    /// Builds a config from parsed entries.
    ///
    /// `word_list_paths` is required; every other key falls back to a
    /// default. Unknown keys are logged and ignored so a newer config
    /// file still loads on an older bot.
    pub fn parse(file_name: &str, entries: &[file::Entry]) -> Result<Self> {
        let mut display_name = String::from("Hangman");
        let mut kind = GamemodeKind::default();
        let mut description = String::from("Just hangman");
        let mut lives = 8u32;
        let mut word_list_paths = None;
        let mut create_thread = true;
        let mut close_thread_action = CloseThreadAction::default();
        let mut guessers = GuesserPolicy::default();

        for entry in entries {
            let value = entry.value.as_str();
            match entry.key.as_str() {
                "display_name" => display_name = value.to_string(),
                "gamemode" => {
                    kind = GamemodeKind::parse(value).ok_or_else(|| {
                        invalid(file_name, "gamemode", value)
                    })?;
                },
                "description" => description = value.to_string(),
                "number_of_lives" => {
                    lives = value
                        .parse()
                        .ok()
                        .filter(|&n: &u32| n > 0)
                        .ok_or_else(|| invalid(file_name, "number_of_lives", value))?;
                },
                "word_list_paths" => {
                    word_list_paths = Some(WordListSpec::parse_list(value));
                },
                "create_thread" => {
                    create_thread = parse_bool(value).ok_or_else(|| {
                        invalid(file_name, "create_thread", value)
                    })?;
                },
                "close_thread_action" => {
                    close_thread_action =
                        CloseThreadAction::parse(value).ok_or_else(|| {
                            invalid(file_name, "close_thread_action", value)
                        })?;
                },
                "guessers" => {
                    guessers = match value.to_lowercase().as_str() {
                        "private" => GuesserPolicy::Private,
                        "public" => GuesserPolicy::Public,
                        _ => return Err(invalid(file_name, "guessers", value)),
                    };
                },
                other => {
                    tracing::warn!(
                        file = file_name,
                        line = entry.line,
                        key = other,
                        "ignoring unknown config key"
                    );
                },
            }
        }

        let word_list_paths = word_list_paths.ok_or(ConfigError::MissingKey {
            file: file_name.to_string(),
            key: "word_list_paths",
        })?;
        if word_list_paths.is_empty() {
            return Err(invalid(file_name, "word_list_paths", ""));
        }

        Ok(Self {
            display_name,
            kind,
            description,
            lives,
            word_list_paths,
            create_thread,
            close_thread_action,
            guessers,
        })
    }

    /// Reads and parses a gamemode file from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let entries = file::read_entries(path)?;
        Self::parse(&path.display().to_string(), &entries)
    }
}

fn invalid(file: &str, key: &'static str, value: &str) -> ConfigError {
    ConfigError::InvalidValue {
        file: file.to_string(),
        key,
        value: value.to_string(),
    }
}

/// Strict booleans: both the true and false spellings are enumerated,
/// anything else is an error rather than silently false.
fn parse_bool(value: &str) -> Option<bool> {
    match value.to_lowercase().as_str() {
        "true" | "yes" | "y" | "1" => Some(true),
        "false" | "no" | "n" | "0" => Some(false),
        _ => None,
    }
}

/// Loads every `*.txt` gamemode under `dir`, keyed by file stem.
///
/// A file that fails to parse is logged and skipped so one bad config
/// can't take the whole bot down. Results come back sorted by name.
pub fn load_gamemodes(dir: &Path) -> Result<Vec<(String, GamemodeConfig)>> {
    let mut gamemodes = Vec::new();
    let read = dir.read_dir().map_err(|source| ConfigError::Io {
        path: dir.to_path_buf(),
        source,
    })?;
    for entry in read {
        let entry = entry.map_err(|source| ConfigError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        if path.extension().is_none_or(|ext| ext != "txt") {
            continue;
        }
        let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };
        match GamemodeConfig::load(&path) {
            Ok(config) => gamemodes.push((stem.to_string(), config)),
            Err(error) => {
                tracing::warn!(path = %path.display(), %error, "skipping gamemode");
            },
        }
    }
    gamemodes.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(gamemodes)
}
