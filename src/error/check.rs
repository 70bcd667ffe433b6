use thiserror::Error;

/// Short, user-facing reasons a command refused to run.
///
/// Raised by the precondition chain and by business rules inside the command
/// handlers. The `Display` text is exactly what the invoking user is shown, so
/// every message is written for them rather than for operators. These are never
/// logged as incidents.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CheckFailure {
    /// The command was invoked outside the configured guild (or in a DM).
    #[error("These commands are only allowed on the server")]
    WrongGuild,

    /// The invoking channel does not belong to the statics category.
    #[error("Only allowed in the private-statics category")]
    WrongCategory,

    #[error("That command is for admins only.")]
    NotAdmin,

    /// The author holds the deny role, or lacks the allow role.
    #[error("You are not allowed to use this bot.")]
    Forbidden,

    /// The author's roles could not be determined, typically because the
    /// command arrived without a guild member attached.
    #[error("Couldn't determine roles. Maybe you're using the command in a DM? It only works on the server.")]
    AmbiguousContext,

    #[error("Cannot accept that static name. It must only contain lowercase letters, numbers and the character '-' and start with a letter.")]
    InvalidName,

    #[error("Static names should not start with \"static\", that will be added automatically")]
    ReservedPrefix,

    #[error("Static with that name already exists, please pick another one")]
    NameCollision,

    #[error("Couldn't find channel {0}")]
    ChannelNotFound(String),

    #[error("Member {0} doesn't exist. Are they on the server?")]
    MemberNotFound(String),

    #[error("Not operating on bots")]
    BotTarget,

    #[error("That member is not in the channel")]
    NotAMember,

    /// The one-channel policy is active and the author already owns a static.
    #[error("You cannot create more than one channel. Ask a co-member to create it or an @admin to remove the restriction for you")]
    PolicyViolation,

    /// The channel's first message is missing or mentions nobody.
    #[error("Failed to determine creator of {0}")]
    CreatorUnknown(String),

    #[error("Only works in text channels in the static category")]
    NotATextChannel,

    #[error("Cannot delete {0} messages, pick a number between 1 and 100")]
    InvalidLimit(i64),

    #[error("No message selected")]
    MissingMessage,
}
