use serenity::all::ChannelId;
use thiserror::Error;

/// Operator-facing inconsistencies between the configuration and the live guild.
///
/// These are not the invoking user's fault. They are reported with a hint to run
/// `/check_config`, which reports the same conditions proactively.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GuildSetupError {
    /// The configured guild is not in the bot's cache, usually because the bot
    /// is not a member of it or the gateway has not delivered it yet.
    #[error("The configured server is not available to the bot")]
    GuildUnavailable,

    /// No channel with the configured category id exists, or it is not a category.
    #[error("Couldn't find the category for statics ({0})")]
    MisconfiguredCategory(ChannelId),

    #[error("The bot needs explicit view_channel permissions on the statics category")]
    CategoryNotVisible,

    /// More than one channel in the category carries the same name.
    #[error("Found {count} channels named {name}, expected at most one")]
    DuplicateChannel { name: String, count: usize },
}
