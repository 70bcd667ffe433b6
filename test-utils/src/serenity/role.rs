//! Test factory for creating Serenity Role objects.

use serenity::all::Role;

/// Creates a test Serenity Role.
///
/// The role is uncoloured, not hoisted, not managed, not mentionable and grants
/// no permissions. Only the id and name matter to the bot.
///
/// # Arguments
/// - `role_id` - Discord role ID (snowflake)
/// - `name` - Role name as shown in the configuration report
/// - `position` - Role position in the hierarchy
///
/// # Panics
/// - If the JSON cannot be deserialized into a Role (indicates invalid test data)
///
/// # Examples
///
/// ```rust,ignore
/// use test_utils::serenity::create_test_role;
///
/// let role = create_test_role(3, "Admins", 10);
/// assert_eq!(role.name, "Admins");
/// ```
pub fn create_test_role(role_id: u64, name: &str, position: i16) -> Role {
    serde_json::from_value(serde_json::json!({
        "id": role_id.to_string(),
        "name": name,
        "color": 0,
        "hoist": false,
        "icon": null,
        "unicode_emoji": null,
        "position": position,
        "permissions": "0",
        "managed": false,
        "mentionable": false,
    }))
    .expect("Failed to create test role - invalid JSON structure")
}
