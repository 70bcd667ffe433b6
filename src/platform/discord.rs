//! Discord-backed implementation of the platform collaborator.
//!
//! Reads prefer the gateway cache where Discord's HTTP API has no equivalent
//! (computed permissions, channel visibility). Name lookups fall back to the
//! HTTP member search for members the cache has not seen yet. Everything else
//! goes through the HTTP client. Cache guards are always dropped before the
//! next await.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serenity::all::{
    Cache, ChannelId, ChannelType, CreateChannel, GetMessages, GuildChannel, GuildId, Member,
    Message, MessageId, PermissionOverwrite, PermissionOverwriteType, Permissions, Role, RoleId,
    Timestamp, User, UserId,
};
use serenity::async_trait;
use serenity::http::Http;

use crate::{
    error::{is_not_found, setup::GuildSetupError, AppError},
    model::{
        channel::{ChannelKind, ChannelView},
        member::{MemberView, RoleView, UserView},
        message::MessageView,
    },
    platform::Platform,
};

/// Discord refuses to bulk-delete messages older than this.
const BULK_DELETE_MAX_AGE_DAYS: i64 = 14;

/// Candidates fetched when a member is searched for over HTTP.
const MEMBER_SEARCH_LIMIT: u64 = 10;

/// Platform collaborator backed by serenity's HTTP client and cache.
///
/// Both handles are reference-counted, so building one per event is cheap.
pub struct DiscordPlatform {
    http: Arc<Http>,
    cache: Arc<Cache>,
}

impl DiscordPlatform {
    pub fn new(http: Arc<Http>, cache: Arc<Cache>) -> Self {
        Self { http, cache }
    }

    /// Clones a channel out of the cached guild.
    fn cached_channel(
        &self,
        guild: GuildId,
        channel: ChannelId,
    ) -> Result<Option<GuildChannel>, AppError> {
        let guild = self
            .cache
            .guild(guild)
            .ok_or(GuildSetupError::GuildUnavailable)?;

        Ok(guild.channels.get(&channel).cloned())
    }

    async fn newest_or_oldest(
        &self,
        channel: ChannelId,
        builder: GetMessages,
    ) -> Result<Option<MessageView>, AppError> {
        let messages = channel.messages(self.http.as_ref(), builder).await?;

        Ok(messages.first().map(MessageView::from))
    }
}

#[async_trait]
impl Platform for DiscordPlatform {
    async fn guild_available(&self, guild: GuildId) -> Result<bool, AppError> {
        Ok(self.cache.guild(guild).is_some())
    }

    async fn guild_channels(&self, guild: GuildId) -> Result<Vec<ChannelView>, AppError> {
        let channels = guild.channels(self.http.as_ref()).await?;

        Ok(channels.values().map(ChannelView::from).collect())
    }

    async fn bot_can_view(&self, guild: GuildId, channel: ChannelId) -> Result<bool, AppError> {
        let bot_id = self.cache.current_user().id;
        let bot = guild.member((&self.cache, self.http.as_ref()), bot_id).await?;

        let cached = self
            .cache
            .guild(guild)
            .ok_or(GuildSetupError::GuildUnavailable)?;
        let Some(channel) = cached.channels.get(&channel) else {
            return Ok(false);
        };

        Ok(cached.user_permissions_in(channel, &bot).view_channel())
    }

    async fn guild_roles(&self, guild: GuildId) -> Result<Vec<RoleView>, AppError> {
        let roles = guild.roles(self.http.as_ref()).await?;

        Ok(roles.values().map(RoleView::from).collect())
    }

    async fn member(&self, guild: GuildId, user: UserId) -> Result<Option<MemberView>, AppError> {
        match guild.member((&self.cache, self.http.as_ref()), user).await {
            Ok(member) => Ok(Some(MemberView::from(&member))),
            Err(err) if is_not_found(&err) => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    async fn member_named(
        &self,
        guild: GuildId,
        name: &str,
    ) -> Result<Option<MemberView>, AppError> {
        let cached = self
            .cache
            .guild(guild)
            .ok_or(GuildSetupError::GuildUnavailable)?
            .member_named(name)
            .map(MemberView::from);
        if cached.is_some() {
            return Ok(cached);
        }

        // Members not chunked into the cache yet are searched for over HTTP.
        let found = guild
            .search_members(self.http.as_ref(), name, Some(MEMBER_SEARCH_LIMIT))
            .await?;

        Ok(pick_named(found.iter().map(MemberView::from).collect(), name))
    }

    async fn channel_members(
        &self,
        guild: GuildId,
        channel: ChannelId,
    ) -> Result<Vec<MemberView>, AppError> {
        let Some(channel) = self.cached_channel(guild, channel)? else {
            return Ok(Vec::new());
        };
        let members = channel.members(&self.cache)?;

        Ok(members.iter().map(MemberView::from).collect())
    }

    async fn has_view_overwrite(
        &self,
        channel: ChannelId,
        user: UserId,
    ) -> Result<bool, AppError> {
        let Some(channel) = channel
            .to_channel((&self.cache, self.http.as_ref()))
            .await?
            .guild()
        else {
            return Ok(false);
        };

        Ok(grants_view(&channel.permission_overwrites, user))
    }

    async fn first_message(&self, channel: ChannelId) -> Result<Option<MessageView>, AppError> {
        // Asking for messages after the smallest possible id yields the oldest one.
        self.newest_or_oldest(
            channel,
            GetMessages::new().after(MessageId::new(1)).limit(1),
        )
        .await
    }

    async fn last_message(&self, channel: ChannelId) -> Result<Option<MessageView>, AppError> {
        self.newest_or_oldest(channel, GetMessages::new().limit(1))
            .await
    }

    async fn create_text_channel(
        &self,
        guild: GuildId,
        category: ChannelId,
        name: &str,
        reason: &str,
    ) -> Result<ChannelView, AppError> {
        let builder = CreateChannel::new(name)
            .kind(ChannelType::Text)
            .category(category)
            .audit_log_reason(reason);
        let channel = guild.create_channel(self.http.as_ref(), builder).await?;

        Ok(ChannelView::from(&channel))
    }

    async fn delete_channel(&self, channel: ChannelId, reason: &str) -> Result<(), AppError> {
        self.http.delete_channel(channel, Some(reason)).await?;

        Ok(())
    }

    async fn allow_view(&self, channel: ChannelId, user: UserId) -> Result<(), AppError> {
        let overwrite = PermissionOverwrite {
            allow: Permissions::VIEW_CHANNEL,
            deny: Permissions::empty(),
            kind: PermissionOverwriteType::Member(user),
        };
        channel
            .create_permission(self.http.as_ref(), overwrite)
            .await?;

        Ok(())
    }

    async fn clear_overwrite(&self, channel: ChannelId, user: UserId) -> Result<(), AppError> {
        channel
            .delete_permission(self.http.as_ref(), PermissionOverwriteType::Member(user))
            .await?;

        Ok(())
    }

    async fn add_role(
        &self,
        guild: GuildId,
        user: UserId,
        role: RoleId,
        reason: &str,
    ) -> Result<(), AppError> {
        self.http
            .add_member_role(guild, user, role, Some(reason))
            .await?;

        Ok(())
    }

    async fn remove_role(
        &self,
        guild: GuildId,
        user: UserId,
        role: RoleId,
        reason: &str,
    ) -> Result<(), AppError> {
        self.http
            .remove_member_role(guild, user, role, Some(reason))
            .await?;

        Ok(())
    }

    async fn send_message(
        &self,
        channel: ChannelId,
        content: &str,
    ) -> Result<MessageView, AppError> {
        let message = channel.say(self.http.as_ref(), content).await?;

        Ok(MessageView::from(&message))
    }

    async fn purge(&self, channel: ChannelId, limit: u8) -> Result<usize, AppError> {
        let messages = channel
            .messages(self.http.as_ref(), GetMessages::new().limit(limit))
            .await?;
        let ids: Vec<MessageId> = messages.iter().map(|m| m.id).collect();
        let (recent, old) = split_by_age(&ids, Utc::now());

        // Bulk deletion only accepts between 2 and 100 ids.
        match recent.as_slice() {
            [] => {}
            [id] => channel.delete_message(self.http.as_ref(), *id).await?,
            _ => {
                let map = serde_json::json!({ "messages": recent });
                self.http.delete_messages(channel, &map, None).await?
            }
        }
        for id in old {
            channel.delete_message(self.http.as_ref(), id).await?;
        }

        Ok(ids.len())
    }

    async fn pin(&self, channel: ChannelId, message: MessageId) -> Result<(), AppError> {
        channel.pin(self.http.as_ref(), message).await?;

        Ok(())
    }

    async fn unpin(&self, channel: ChannelId, message: MessageId) -> Result<(), AppError> {
        channel.unpin(self.http.as_ref(), message).await?;

        Ok(())
    }
}

/// Splits message ids into those Discord still bulk-deletes and older ones,
/// which have to be deleted one at a time.
fn split_by_age(ids: &[MessageId], now: DateTime<Utc>) -> (Vec<MessageId>, Vec<MessageId>) {
    let cutoff = now - Duration::days(BULK_DELETE_MAX_AGE_DAYS);

    ids.iter()
        .copied()
        .partition(|id| to_utc(id.created_at()) > cutoff)
}

/// The searched member whose username is `name`, else the first one with a
/// matching nickname or global name. Search matches prefixes, so every
/// candidate is checked for an exact name.
fn pick_named(members: Vec<MemberView>, name: &str) -> Option<MemberView> {
    let index = members
        .iter()
        .position(|m| m.name == name)
        .or_else(|| members.iter().position(|m| m.answers_to(name)))?;

    members.into_iter().nth(index)
}

/// Whether the overwrites contain a member overwrite allowing `user` to view.
fn grants_view(overwrites: &[PermissionOverwrite], user: UserId) -> bool {
    overwrites.iter().any(|overwrite| {
        overwrite.kind == PermissionOverwriteType::Member(user) && overwrite.allow.view_channel()
    })
}

fn to_utc(timestamp: Timestamp) -> DateTime<Utc> {
    DateTime::from_timestamp(timestamp.unix_timestamp(), 0).unwrap_or_default()
}

impl From<ChannelType> for ChannelKind {
    fn from(kind: ChannelType) -> Self {
        match kind {
            ChannelType::Text => ChannelKind::Text,
            ChannelType::Category => ChannelKind::Category,
            ChannelType::Voice => ChannelKind::Voice,
            _ => ChannelKind::Other,
        }
    }
}

impl From<&GuildChannel> for ChannelView {
    fn from(channel: &GuildChannel) -> Self {
        Self {
            id: channel.id,
            name: channel.name.clone(),
            kind: channel.kind.into(),
            parent_id: channel.parent_id,
            created_at: to_utc(channel.id.created_at()),
        }
    }
}

impl From<&Member> for MemberView {
    fn from(member: &Member) -> Self {
        Self {
            user_id: member.user.id,
            name: member.user.name.clone(),
            global_name: member.user.global_name.clone(),
            nick: member.nick.clone(),
            bot: member.user.bot,
            roles: member.roles.clone(),
        }
    }
}

impl From<&User> for UserView {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            bot: user.bot,
        }
    }
}

impl From<&Role> for RoleView {
    fn from(role: &Role) -> Self {
        Self {
            id: role.id,
            name: role.name.clone(),
        }
    }
}

impl From<&Message> for MessageView {
    fn from(message: &Message) -> Self {
        Self {
            id: message.id,
            author_id: message.author.id,
            created_at: to_utc(message.timestamp),
            mentions: message.mentions.iter().map(UserView::from).collect(),
        }
    }
}
