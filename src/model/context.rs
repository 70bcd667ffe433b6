//! Typed invocation context for a single command.

use serenity::all::{ChannelId, GuildId, MessageId, UserId};

use crate::{
    error::check::CheckFailure,
    model::{channel::ChannelKind, member::MemberView},
};

/// The channel a command was invoked in, as reported by the interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvokingChannel {
    pub id: ChannelId,
    pub kind: ChannelKind,
    pub parent_id: Option<ChannelId>,
}

/// Who invoked a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Author {
    pub user_id: UserId,
    pub name: String,
    /// Present only when the command was invoked inside a guild.
    pub member: Option<MemberView>,
}

/// Everything the precondition chain and the handlers know about an invocation.
///
/// Every reference is resolved up front from the interaction payload; nothing
/// is looked up lazily, so evaluating preconditions never touches the platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvocationContext {
    pub guild_id: Option<GuildId>,
    pub channel: Option<InvokingChannel>,
    pub author: Author,
    /// Target of a message context-menu command.
    pub target_message: Option<MessageId>,
}

impl InvocationContext {
    /// The author's guild membership, required by every role check.
    pub fn author_member(&self) -> Result<&MemberView, CheckFailure> {
        self.author
            .member
            .as_ref()
            .ok_or(CheckFailure::AmbiguousContext)
    }

    /// The invoking channel, provided it is a text channel.
    pub fn text_channel(&self) -> Result<ChannelId, CheckFailure> {
        match &self.channel {
            Some(channel) if channel.kind == ChannelKind::Text => Ok(channel.id),
            _ => Err(CheckFailure::NotATextChannel),
        }
    }

    pub fn target_message(&self) -> Result<MessageId, CheckFailure> {
        self.target_message.ok_or(CheckFailure::MissingMessage)
    }
}
