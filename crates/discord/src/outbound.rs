//! Outbound Discord traffic: posting game text and closing threads.

use {
    crate::{Error, Result},
    gallows_config::CloseThreadAction,
    serenity::all::{ChannelId, CreateMessage, EditThread},
    tracing::{debug, warn},
};

/// Discord enforces a 2 000-character limit per message.
const DISCORD_MAX_MESSAGE_LEN: usize = 2000;

/// Send text to a channel, splitting at the Discord message limit.
pub async fn send_text(
    http: &serenity::http::Http,
    channel_id: ChannelId,
    text: &str,
) -> Result<()> {
    for chunk in chunk_message(text, DISCORD_MAX_MESSAGE_LEN) {
        channel_id
            .send_message(http, CreateMessage::new().content(chunk))
            .await
            .map_err(|e| Error::Send(e.to_string()))?;
    }
    Ok(())
}

/// Apply a gamemode's close-out action to a finished game thread.
///
/// Failures are logged and swallowed: the game is already over, and a
/// thread the moderators deleted first must not wedge the handler.
pub async fn close_thread(
    http: &serenity::http::Http,
    channel_id: ChannelId,
    action: CloseThreadAction,
) {
    let result = match action {
        CloseThreadAction::Nothing => return,
        CloseThreadAction::Archive => channel_id
            .edit_thread(http, EditThread::new().archived(true))
            .await
            .map(|_| ()),
        CloseThreadAction::Lock => channel_id
            .edit_thread(http, EditThread::new().archived(true).locked(true))
            .await
            .map(|_| ()),
        CloseThreadAction::Delete => channel_id.delete(http).await.map(|_| ()),
    };
    match result {
        Ok(()) => debug!(channel_id = channel_id.get(), ?action, "thread closed"),
        Err(e) => warn!(
            channel_id = channel_id.get(),
            ?action,
            "failed to close game thread: {e}"
        ),
    }
}

/// Split a message into chunks of at most `max_len` bytes, preferring
/// newline boundaries and never splitting inside a multi-byte character.
fn chunk_message(text: &str, max_len: usize) -> Vec<&str> {
    let mut chunks = Vec::new();
    let mut remaining = text;
    while remaining.len() > max_len {
        let mut end = max_len;
        while end > 0 && !remaining.is_char_boundary(end) {
            end -= 1;
        }
        let window = &remaining[..end];
        let split = window.rfind('\n').map_or(end, |pos| pos + 1);
        let (chunk, rest) = remaining.split_at(split);
        chunks.push(chunk);
        remaining = rest;
    }
    chunks.push(remaining);
    chunks
}
