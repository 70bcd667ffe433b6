//! Test factory for creating Serenity Message objects.

use serenity::all::{Message, User};

/// Creates a test Serenity Message posted in a guild text channel.
///
/// The author is a plain user named `author-<id>`. `timestamp` is an ISO 8601
/// string as Discord sends it, e.g. `2024-05-01T12:00:00.000000+00:00`.
///
/// # Panics
/// - If the JSON cannot be deserialized into a Message (indicates invalid test data)
pub fn create_test_message(
    message_id: u64,
    channel_id: u64,
    author_id: u64,
    timestamp: &str,
    mentions: Vec<User>,
) -> Message {
    let author = super::create_test_user(author_id, &format!("author-{}", author_id), false);

    serde_json::from_value(serde_json::json!({
        "id": message_id.to_string(),
        "channel_id": channel_id.to_string(),
        "author": author,
        "content": "",
        "timestamp": timestamp,
        "edited_timestamp": null,
        "tts": false,
        "mention_everyone": false,
        "mentions": mentions,
        "mention_roles": [],
        "mention_channels": [],
        "attachments": [],
        "embeds": [],
        "reactions": [],
        "pinned": false,
        "type": 0,
        "flags": 0,
        "components": [],
        "sticker_items": [],
        "guild_id": null,
    }))
    .expect("Failed to create test message - invalid JSON structure")
}
