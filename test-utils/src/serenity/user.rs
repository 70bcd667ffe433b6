//! Test factories for creating Serenity User and Member objects.

use serenity::all::{Member, User};

fn user_json(user_id: u64, name: &str, bot: bool) -> serde_json::Value {
    serde_json::json!({
        "id": user_id.to_string(),
        "username": name,
        "global_name": null,
        "avatar": null,
        "bot": bot,
        "system": false,
        "mfa_enabled": false,
        "flags": 0,
        "premium_type": 0,
        "public_flags": 0,
    })
}

/// Creates a test Serenity User without a global display name.
///
/// # Panics
/// - If the JSON cannot be deserialized into a User (indicates invalid test data)
pub fn create_test_user(user_id: u64, name: &str, bot: bool) -> User {
    serde_json::from_value(user_json(user_id, name, bot))
        .expect("Failed to create test user - invalid JSON structure")
}

/// Creates a test Serenity Member of `guild_id`.
///
/// # Arguments
/// - `guild_id` - Guild the member belongs to
/// - `user_id` - Discord user ID (snowflake)
/// - `name` - Account username
/// - `nick` - Server nickname, if any
/// - `role_ids` - Roles the member holds
/// - `bot` - Whether the account is a bot
///
/// # Panics
/// - If the JSON cannot be deserialized into a Member (indicates invalid test data)
///
/// # Examples
///
/// ```rust,ignore
/// use test_utils::serenity::create_test_member;
///
/// let member = create_test_member(1, 10, "alice", Some("Ali"), &[3], false);
/// assert_eq!(member.display_name(), "Ali");
/// ```
pub fn create_test_member(
    guild_id: u64,
    user_id: u64,
    name: &str,
    nick: Option<&str>,
    role_ids: &[u64],
    bot: bool,
) -> Member {
    let roles: Vec<String> = role_ids.iter().map(u64::to_string).collect();

    serde_json::from_value(serde_json::json!({
        "user": user_json(user_id, name, bot),
        "nick": nick,
        "avatar": null,
        "roles": roles,
        "joined_at": "2024-01-01T00:00:00.000000+00:00",
        "premium_since": null,
        "deaf": false,
        "mute": false,
        "flags": 0,
        "pending": false,
        "communication_disabled_until": null,
        "guild_id": guild_id.to_string(),
    }))
    .expect("Failed to create test member - invalid JSON structure")
}
