//! The host platform collaborator.
//!
//! Command handlers never call serenity directly. Every lookup and mutation goes
//! through [`Platform`], which the bot backs with Discord's HTTP API and gateway
//! cache ([`discord::DiscordPlatform`]) and tests back with an in-memory guild.
//!
//! Every method is a suspension point. No ordering is guaranteed between calls
//! made by concurrently running commands, and no method retries on failure.

pub mod discord;
#[cfg(test)]
pub mod memory;

use serenity::all::{ChannelId, GuildId, MessageId, RoleId, UserId};
use serenity::async_trait;

use crate::{
    error::AppError,
    model::{
        channel::ChannelView,
        member::{MemberView, RoleView},
        message::MessageView,
    },
};

#[async_trait]
pub trait Platform: Send + Sync {
    /// Whether the guild is currently reachable by the bot.
    async fn guild_available(&self, guild: GuildId) -> Result<bool, AppError>;

    /// Every channel of the guild, categories included.
    async fn guild_channels(&self, guild: GuildId) -> Result<Vec<ChannelView>, AppError>;

    /// Whether the bot's own member has `view_channel` on `channel`.
    async fn bot_can_view(&self, guild: GuildId, channel: ChannelId) -> Result<bool, AppError>;

    async fn guild_roles(&self, guild: GuildId) -> Result<Vec<RoleView>, AppError>;

    /// Looks a user up as a current guild member; `None` if they are not one.
    async fn member(&self, guild: GuildId, user: UserId) -> Result<Option<MemberView>, AppError>;

    /// Looks a member up by username, global name or nickname.
    async fn member_named(
        &self,
        guild: GuildId,
        name: &str,
    ) -> Result<Option<MemberView>, AppError>;

    /// Members able to see `channel`, bots included.
    async fn channel_members(
        &self,
        guild: GuildId,
        channel: ChannelId,
    ) -> Result<Vec<MemberView>, AppError>;

    /// Whether `channel` carries a member overwrite granting `user` `view_channel`.
    async fn has_view_overwrite(&self, channel: ChannelId, user: UserId)
        -> Result<bool, AppError>;

    /// The oldest message of the channel.
    async fn first_message(&self, channel: ChannelId) -> Result<Option<MessageView>, AppError>;

    /// The most recent message of the channel.
    async fn last_message(&self, channel: ChannelId) -> Result<Option<MessageView>, AppError>;

    async fn create_text_channel(
        &self,
        guild: GuildId,
        category: ChannelId,
        name: &str,
        reason: &str,
    ) -> Result<ChannelView, AppError>;

    async fn delete_channel(&self, channel: ChannelId, reason: &str) -> Result<(), AppError>;

    /// Sets a member overwrite allowing `user` to view `channel`.
    async fn allow_view(&self, channel: ChannelId, user: UserId) -> Result<(), AppError>;

    /// Removes the member overwrite for `user` on `channel`.
    async fn clear_overwrite(&self, channel: ChannelId, user: UserId) -> Result<(), AppError>;

    async fn add_role(
        &self,
        guild: GuildId,
        user: UserId,
        role: RoleId,
        reason: &str,
    ) -> Result<(), AppError>;

    async fn remove_role(
        &self,
        guild: GuildId,
        user: UserId,
        role: RoleId,
        reason: &str,
    ) -> Result<(), AppError>;

    async fn send_message(&self, channel: ChannelId, content: &str)
        -> Result<MessageView, AppError>;

    /// Deletes up to `limit` of the most recent messages; returns how many went.
    async fn purge(&self, channel: ChannelId, limit: u8) -> Result<usize, AppError>;

    async fn pin(&self, channel: ChannelId, message: MessageId) -> Result<(), AppError>;

    async fn unpin(&self, channel: ChannelId, message: MessageId) -> Result<(), AppError>;
}
