use serenity::all::UserId;

use crate::{
    config::Config,
    error::{check::CheckFailure, AppError},
    model::{
        channel::ChannelView,
        member::{MemberView, UserView},
    },
    platform::Platform,
};

/// The user a static's welcome message was addressed to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Creator {
    /// Still a member of the guild.
    Member(MemberView),
    /// Mentioned in the welcome message but no longer on the server.
    Departed(UserView),
}

impl Creator {
    pub fn user_id(&self) -> UserId {
        match self {
            Creator::Member(member) => member.user_id,
            Creator::Departed(user) => user.id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Creator::Member(member) => member.display_name(),
            Creator::Departed(user) => &user.name,
        }
    }
}

/// Ownership bookkeeping for statics: who created a channel, and the
/// one-channel role that limits members to a single static.
pub struct MembershipLedger<'a> {
    platform: &'a dyn Platform,
    config: &'a Config,
}

impl<'a> MembershipLedger<'a> {
    pub fn new(platform: &'a dyn Platform, config: &'a Config) -> Self {
        Self { platform, config }
    }

    /// Resolves the creator of a static from its oldest message.
    ///
    /// The creator is the first user mentioned in the channel's first message,
    /// which is the welcome message posted on creation. The mentioned user is
    /// re-resolved as a current guild member by id; a user who has since left
    /// is returned as [`Creator::Departed`].
    ///
    /// # Returns
    /// - `Ok(Creator)` - The mentioned user, as a member when still on the server
    /// - `Err(AppError::CheckErr(CreatorUnknown))` - No first message, or it mentions nobody
    /// - `Err(AppError)` - Platform error while reading history or members
    pub async fn creator_of(&self, channel: &ChannelView) -> Result<Creator, AppError> {
        let unknown = || CheckFailure::CreatorUnknown(channel.name.clone());

        let first = self
            .platform
            .first_message(channel.id)
            .await?
            .ok_or_else(unknown)?;
        let mentioned = first.mentions.into_iter().next().ok_or_else(unknown)?;

        let creator = match self
            .platform
            .member(self.config.guild_id, mentioned.id)
            .await?
        {
            Some(member) => Creator::Member(member),
            None => Creator::Departed(mentioned),
        };

        Ok(creator)
    }

    /// Whether the member carries the one-channel role. Always false while the
    /// policy is inactive.
    pub fn has_one_channel_role(&self, member: &MemberView) -> bool {
        self.config
            .one_channel_role_id
            .is_some_and(|role| member.has_role(role))
    }

    /// Whether the one-channel policy forbids `member` from creating a static.
    pub fn blocks_creation(&self, member: &MemberView) -> bool {
        !member.has_role(self.config.admin_role_id) && self.has_one_channel_role(member)
    }

    /// Applies the one-channel role to `user`; a no-op while the policy is inactive.
    pub async fn grant_one_channel_role(&self, user: UserId, reason: &str) -> Result<(), AppError> {
        let Some(role) = self.config.one_channel_role_id else {
            return Ok(());
        };

        self.platform
            .add_role(self.config.guild_id, user, role, reason)
            .await?;
        tracing::info!("Granted one-channel role to {}", user);

        Ok(())
    }

    /// Removes the one-channel role from `user`; a no-op while the policy is inactive.
    pub async fn revoke_one_channel_role(&self, user: UserId, reason: &str) -> Result<(), AppError> {
        let Some(role) = self.config.one_channel_role_id else {
            return Ok(());
        };

        self.platform
            .remove_role(self.config.guild_id, user, role, reason)
            .await?;
        tracing::info!("Revoked one-channel role from {}", user);

        Ok(())
    }
}
