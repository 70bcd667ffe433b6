//! In-memory guild used to drive command handlers in tests.
//!
//! Behaves like the Discord collaborator for the operations the handlers use,
//! and records every mutation so tests can assert exactly which side effects a
//! command performed.

use std::{
    collections::{HashMap, HashSet},
    sync::Mutex,
};

use chrono::{DateTime, Duration, Utc};
use serenity::all::{ChannelId, GuildId, MessageId, RoleId, UserId};
use serenity::async_trait;

use crate::{
    error::{setup::GuildSetupError, AppError},
    model::{
        channel::{ChannelKind, ChannelView},
        member::{MemberView, RoleView, UserView},
        message::MessageView,
    },
    platform::Platform,
};

/// User id the in-memory bot posts as.
pub const BOT_USER_ID: u64 = 999;

/// A side effect performed through the platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    ChannelCreated(String),
    ChannelDeleted(ChannelId),
    ViewAllowed(ChannelId, UserId),
    OverwriteCleared(ChannelId, UserId),
    RoleAdded(UserId, RoleId),
    RoleRemoved(UserId, RoleId),
    MessageSent(ChannelId, String),
    Purged(ChannelId, usize),
    Pinned(MessageId),
    Unpinned(MessageId),
}

#[derive(Default)]
struct State {
    next_id: u64,
    unavailable: bool,
    fail_role_removal: bool,
    channels: Vec<ChannelView>,
    hidden_from_bot: HashSet<ChannelId>,
    roles: Vec<RoleView>,
    members: Vec<MemberView>,
    users: HashMap<UserId, UserView>,
    overwrites: HashMap<ChannelId, Vec<UserId>>,
    messages: HashMap<ChannelId, Vec<MessageView>>,
    pinned: HashSet<MessageId>,
    mutations: Vec<Mutation>,
}

impl State {
    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        1000 + self.next_id
    }

    fn clock(&self) -> DateTime<Utc> {
        epoch() + Duration::minutes(self.next_id as i64)
    }

    fn mentions(&self, content: &str) -> Vec<UserView> {
        content
            .split_whitespace()
            .filter_map(parse_mention)
            .map(|id| {
                self.users.get(&id).cloned().unwrap_or(UserView {
                    id,
                    name: format!("user-{}", id),
                    bot: false,
                })
            })
            .collect()
    }

    fn push_message(
        &mut self,
        channel: ChannelId,
        author: UserId,
        content: &str,
        at: DateTime<Utc>,
    ) -> MessageView {
        let message = MessageView {
            id: MessageId::new(self.next_id()),
            author_id: author,
            created_at: at,
            mentions: self.mentions(content),
        };
        self.messages
            .entry(channel)
            .or_default()
            .push(message.clone());
        message
    }
}

fn epoch() -> DateTime<Utc> {
    DateTime::from_timestamp(1_704_067_200, 0).unwrap_or_default()
}

/// Parses `<@id>` and `<@!id>` mentions.
fn parse_mention(token: &str) -> Option<UserId> {
    let inner = token.strip_prefix("<@")?.strip_suffix('>')?;
    let digits = inner.strip_prefix('!').unwrap_or(inner);
    digits.parse::<u64>().ok().filter(|id| *id != 0).map(UserId::new)
}

pub struct InMemoryPlatform {
    guild_id: GuildId,
    state: Mutex<State>,
}

impl InMemoryPlatform {
    pub fn new(guild_id: GuildId) -> Self {
        Self {
            guild_id,
            state: Mutex::new(State::default()),
        }
    }

    fn state(&self) -> std::sync::MutexGuard<'_, State> {
        self.state.lock().unwrap()
    }

    fn check_guild(&self, guild: GuildId) -> Result<(), AppError> {
        if guild != self.guild_id || self.state().unavailable {
            return Err(GuildSetupError::GuildUnavailable.into());
        }
        Ok(())
    }

    pub fn add_category(&self, id: ChannelId, name: &str) {
        self.state().channels.push(ChannelView {
            id,
            name: name.to_string(),
            kind: ChannelKind::Category,
            parent_id: None,
            created_at: epoch(),
        });
    }

    /// Adds a text channel filed under `parent`.
    pub fn add_channel(&self, name: &str, parent: Option<ChannelId>) -> ChannelId {
        self.add_channel_of_kind(name, ChannelKind::Text, parent)
    }

    pub fn add_channel_of_kind(
        &self,
        name: &str,
        kind: ChannelKind,
        parent: Option<ChannelId>,
    ) -> ChannelId {
        let mut state = self.state();
        let id = ChannelId::new(state.next_id());
        let created_at = state.clock();
        state.channels.push(ChannelView {
            id,
            name: name.to_string(),
            kind,
            parent_id: parent,
            created_at,
        });
        id
    }

    pub fn add_role(&self, id: RoleId, name: &str) {
        self.state().roles.push(RoleView {
            id,
            name: name.to_string(),
        });
    }

    pub fn add_member(&self, id: u64, name: &str, roles: &[RoleId]) -> MemberView {
        self.insert_member(id, name, roles, false)
    }

    pub fn add_bot(&self, id: u64, name: &str, roles: &[RoleId]) -> MemberView {
        self.insert_member(id, name, roles, true)
    }

    fn insert_member(&self, id: u64, name: &str, roles: &[RoleId], bot: bool) -> MemberView {
        let member = MemberView {
            user_id: UserId::new(id),
            name: name.to_string(),
            global_name: None,
            nick: None,
            bot,
            roles: roles.to_vec(),
        };
        let mut state = self.state();
        state.users.insert(
            member.user_id,
            UserView {
                id: member.user_id,
                name: name.to_string(),
                bot,
            },
        );
        state.members.push(member.clone());
        member
    }

    /// The member leaves the guild; their user stays known for mentions.
    pub fn remove_member(&self, user: UserId) {
        self.state().members.retain(|m| m.user_id != user);
    }

    /// Grants a view overwrite without recording a mutation.
    pub fn grant_view(&self, channel: ChannelId, user: UserId) {
        self.state().overwrites.entry(channel).or_default().push(user);
    }

    /// Posts a message as `author` at a fixed time without recording a mutation.
    pub fn post_message(
        &self,
        channel: ChannelId,
        author: UserId,
        content: &str,
        at: DateTime<Utc>,
    ) -> MessageId {
        self.state().push_message(channel, author, content, at).id
    }

    pub fn hide_from_bot(&self, channel: ChannelId) {
        self.state().hidden_from_bot.insert(channel);
    }

    pub fn set_unavailable(&self) {
        self.state().unavailable = true;
    }

    pub fn fail_role_removal(&self) {
        self.state().fail_role_removal = true;
    }

    pub fn mutations(&self) -> Vec<Mutation> {
        self.state().mutations.clone()
    }

    pub fn clear_mutations(&self) {
        self.state().mutations.clear();
    }

    pub fn channel(&self, id: ChannelId) -> Option<ChannelView> {
        self.state().channels.iter().find(|c| c.id == id).cloned()
    }

    pub fn channels_named(&self, name: &str) -> Vec<ChannelView> {
        self.state()
            .channels
            .iter()
            .filter(|c| c.name == name)
            .cloned()
            .collect()
    }

    pub fn has_overwrite(&self, channel: ChannelId, user: UserId) -> bool {
        self.state()
            .overwrites
            .get(&channel)
            .is_some_and(|users| users.contains(&user))
    }

    pub fn overwrite_count(&self) -> usize {
        self.state().overwrites.values().map(Vec::len).sum()
    }

    pub fn member_roles(&self, user: UserId) -> Vec<RoleId> {
        self.state()
            .members
            .iter()
            .find(|m| m.user_id == user)
            .map(|m| m.roles.clone())
            .unwrap_or_default()
    }

    pub fn message_count(&self, channel: ChannelId) -> usize {
        self.state().messages.get(&channel).map_or(0, Vec::len)
    }

    pub fn is_pinned(&self, message: MessageId) -> bool {
        self.state().pinned.contains(&message)
    }
}

#[async_trait]
impl Platform for InMemoryPlatform {
    async fn guild_available(&self, guild: GuildId) -> Result<bool, AppError> {
        Ok(guild == self.guild_id && !self.state().unavailable)
    }

    async fn guild_channels(&self, guild: GuildId) -> Result<Vec<ChannelView>, AppError> {
        self.check_guild(guild)?;
        Ok(self.state().channels.clone())
    }

    async fn bot_can_view(&self, guild: GuildId, channel: ChannelId) -> Result<bool, AppError> {
        self.check_guild(guild)?;
        let state = self.state();
        Ok(state.channels.iter().any(|c| c.id == channel)
            && !state.hidden_from_bot.contains(&channel))
    }

    async fn guild_roles(&self, guild: GuildId) -> Result<Vec<RoleView>, AppError> {
        self.check_guild(guild)?;
        Ok(self.state().roles.clone())
    }

    async fn member(&self, guild: GuildId, user: UserId) -> Result<Option<MemberView>, AppError> {
        self.check_guild(guild)?;
        Ok(self
            .state()
            .members
            .iter()
            .find(|m| m.user_id == user)
            .cloned())
    }

    async fn member_named(
        &self,
        guild: GuildId,
        name: &str,
    ) -> Result<Option<MemberView>, AppError> {
        self.check_guild(guild)?;
        Ok(self
            .state()
            .members
            .iter()
            .find(|m| m.answers_to(name))
            .cloned())
    }

    async fn channel_members(
        &self,
        guild: GuildId,
        channel: ChannelId,
    ) -> Result<Vec<MemberView>, AppError> {
        self.check_guild(guild)?;
        let state = self.state();
        let allowed = state.overwrites.get(&channel).cloned().unwrap_or_default();
        Ok(state
            .members
            .iter()
            .filter(|m| allowed.contains(&m.user_id))
            .cloned()
            .collect())
    }

    async fn has_view_overwrite(
        &self,
        channel: ChannelId,
        user: UserId,
    ) -> Result<bool, AppError> {
        Ok(self.has_overwrite(channel, user))
    }

    async fn first_message(&self, channel: ChannelId) -> Result<Option<MessageView>, AppError> {
        Ok(self
            .state()
            .messages
            .get(&channel)
            .and_then(|messages| messages.first().cloned()))
    }

    async fn last_message(&self, channel: ChannelId) -> Result<Option<MessageView>, AppError> {
        Ok(self
            .state()
            .messages
            .get(&channel)
            .and_then(|messages| messages.last().cloned()))
    }

    async fn create_text_channel(
        &self,
        guild: GuildId,
        category: ChannelId,
        name: &str,
        _reason: &str,
    ) -> Result<ChannelView, AppError> {
        self.check_guild(guild)?;
        let mut state = self.state();
        let channel = ChannelView {
            id: ChannelId::new(state.next_id()),
            name: name.to_string(),
            kind: ChannelKind::Text,
            parent_id: Some(category),
            created_at: state.clock(),
        };
        state.channels.push(channel.clone());
        state
            .mutations
            .push(Mutation::ChannelCreated(name.to_string()));
        Ok(channel)
    }

    async fn delete_channel(&self, channel: ChannelId, _reason: &str) -> Result<(), AppError> {
        let mut state = self.state();
        let before = state.channels.len();
        state.channels.retain(|c| c.id != channel);
        if state.channels.len() == before {
            return Err(AppError::InternalError(format!(
                "Unknown channel {}",
                channel
            )));
        }
        state.overwrites.remove(&channel);
        state.messages.remove(&channel);
        state.mutations.push(Mutation::ChannelDeleted(channel));
        Ok(())
    }

    async fn allow_view(&self, channel: ChannelId, user: UserId) -> Result<(), AppError> {
        let mut state = self.state();
        let users = state.overwrites.entry(channel).or_default();
        if !users.contains(&user) {
            users.push(user);
        }
        state.mutations.push(Mutation::ViewAllowed(channel, user));
        Ok(())
    }

    async fn clear_overwrite(&self, channel: ChannelId, user: UserId) -> Result<(), AppError> {
        let mut state = self.state();
        if let Some(users) = state.overwrites.get_mut(&channel) {
            users.retain(|u| *u != user);
        }
        state.mutations.push(Mutation::OverwriteCleared(channel, user));
        Ok(())
    }

    async fn add_role(
        &self,
        guild: GuildId,
        user: UserId,
        role: RoleId,
        _reason: &str,
    ) -> Result<(), AppError> {
        self.check_guild(guild)?;
        let mut state = self.state();
        let Some(member) = state.members.iter_mut().find(|m| m.user_id == user) else {
            return Err(AppError::InternalError(format!("Unknown member {}", user)));
        };
        if !member.roles.contains(&role) {
            member.roles.push(role);
        }
        state.mutations.push(Mutation::RoleAdded(user, role));
        Ok(())
    }

    async fn remove_role(
        &self,
        guild: GuildId,
        user: UserId,
        role: RoleId,
        _reason: &str,
    ) -> Result<(), AppError> {
        self.check_guild(guild)?;
        let mut state = self.state();
        if state.fail_role_removal {
            return Err(AppError::InternalError("role removal rejected".to_string()));
        }
        let Some(member) = state.members.iter_mut().find(|m| m.user_id == user) else {
            return Err(AppError::InternalError(format!("Unknown member {}", user)));
        };
        member.roles.retain(|r| *r != role);
        state.mutations.push(Mutation::RoleRemoved(user, role));
        Ok(())
    }

    async fn send_message(
        &self,
        channel: ChannelId,
        content: &str,
    ) -> Result<MessageView, AppError> {
        let mut state = self.state();
        let at = state.clock();
        let message = state.push_message(channel, UserId::new(BOT_USER_ID), content, at);
        state
            .mutations
            .push(Mutation::MessageSent(channel, content.to_string()));
        Ok(message)
    }

    async fn purge(&self, channel: ChannelId, limit: u8) -> Result<usize, AppError> {
        let mut state = self.state();
        let messages = state.messages.entry(channel).or_default();
        let removed = messages.len().min(limit as usize);
        messages.truncate(messages.len() - removed);
        state.mutations.push(Mutation::Purged(channel, removed));
        Ok(removed)
    }

    async fn pin(&self, _channel: ChannelId, message: MessageId) -> Result<(), AppError> {
        let mut state = self.state();
        state.pinned.insert(message);
        state.mutations.push(Mutation::Pinned(message));
        Ok(())
    }

    async fn unpin(&self, _channel: ChannelId, message: MessageId) -> Result<(), AppError> {
        let mut state = self.state();
        state.pinned.remove(&message);
        state.mutations.push(Mutation::Unpinned(message));
        Ok(())
    }
}
