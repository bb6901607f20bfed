//! Bot credentials and top-level settings.

use {
    crate::{ConfigError, Result, file},
    secrecy::Secret,
    std::path::{Path, PathBuf},
};

/// The shipped config template carries this placeholder; treat it the
/// same as a missing token so a fresh checkout fails loudly instead of
/// hammering the gateway with a bogus credential.
const TOKEN_PLACEHOLDER: &str = "<TOKEN>";

/// Top-level bot configuration, read from a `key=value` file.
#[derive(Clone)]
pub struct BotConfig {
    /// Discord bot token.
    pub token: Secret<String>,

    /// Directory holding gamemode `*.txt` files.
    pub gamemodes_dir: PathBuf,
}

impl std::fmt::Debug for BotConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BotConfig")
            .field("token", &"[REDACTED]")
            .field("gamemodes_dir", &self.gamemodes_dir)
            .finish()
    }
}

impl BotConfig {
    /// Builds a config from parsed entries.
    pub fn parse(file_name: &str, entries: &[file::Entry]) -> Result<Self> {
        let mut token = None;
        let mut gamemodes_dir = PathBuf::from("./gamemodes");

        for entry in entries {
            match entry.key.as_str() {
                "discord_token" => token = Some(entry.value.clone()),
                "gamemodes_directory" => gamemodes_dir = PathBuf::from(&entry.value),
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

        let token = token.ok_or(ConfigError::MissingKey {
            file: file_name.to_string(),
            key: "discord_token",
        })?;
        if token.is_empty() || token == TOKEN_PLACEHOLDER {
            return Err(ConfigError::InvalidValue {
                file: file_name.to_string(),
                key: "discord_token",
                value: token,
            });
        }

        Ok(Self {
            token: Secret::new(token),
            gamemodes_dir,
        })
    }

    /// Reads and parses a bot config file from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let entries = file::read_entries(path)?;
        Self::parse(&path.display().to_string(), &entries)
    }
}
