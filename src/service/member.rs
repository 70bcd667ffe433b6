use crate::{
    config::Config,
    error::{check::CheckFailure, AppError},
    middleware::precondition::{Precondition, PreconditionGuard},
    model::{context::InvocationContext, member::MemberView, reply::Reply},
    platform::Platform,
};

/// Adding, removing and listing the members of a static.
pub struct MemberService<'a> {
    platform: &'a dyn Platform,
    config: &'a Config,
}

impl<'a> MemberService<'a> {
    pub fn new(platform: &'a dyn Platform, config: &'a Config) -> Self {
        Self { platform, config }
    }

    /// Resolves a member by name, refusing bot accounts.
    ///
    /// A member counts as a bot when the account is flagged as one or holds the
    /// configured bots role.
    async fn target(&self, name: &str) -> Result<MemberView, AppError> {
        let member = self
            .platform
            .member_named(self.config.guild_id, name)
            .await?
            .ok_or_else(|| CheckFailure::MemberNotFound(name.to_string()))?;

        if member.bot || member.has_role(self.config.bots_role_id) {
            return Err(CheckFailure::BotTarget.into());
        }

        Ok(member)
    }

    /// Lets the named member see the invoking static.
    pub async fn add(&self, ctx: &InvocationContext, name: &str) -> Result<Reply, AppError> {
        PreconditionGuard::new(self.config).require(
            ctx,
            &[Precondition::OnConfiguredGuild, Precondition::InStaticsCategory],
        )?;
        let channel = ctx.text_channel()?;
        let member = self.target(name).await?;

        self.platform.allow_view(channel, member.user_id).await?;
        tracing::info!(
            "{} added {} to {}",
            ctx.author.name,
            member.name,
            channel
        );

        Ok(Reply::public(format!(
            "Folks, say welcome to {}!",
            member.display_name()
        )))
    }

    /// Removes the named member's access to the invoking static.
    ///
    /// Only members holding a view overwrite on the channel can be removed;
    /// anyone else fails with `NotAMember`.
    pub async fn remove(&self, ctx: &InvocationContext, name: &str) -> Result<Reply, AppError> {
        PreconditionGuard::new(self.config).require(
            ctx,
            &[Precondition::OnConfiguredGuild, Precondition::InStaticsCategory],
        )?;
        let channel = ctx.text_channel()?;
        let member = self.target(name).await?;

        if !self
            .platform
            .has_view_overwrite(channel, member.user_id)
            .await?
        {
            return Err(CheckFailure::NotAMember.into());
        }

        self.platform.clear_overwrite(channel, member.user_id).await?;
        tracing::info!(
            "{} removed {} from {}",
            ctx.author.name,
            member.name,
            channel
        );

        Ok(Reply::public(format!(
            "Folks, say goodbye to {}",
            member.display_name()
        )))
    }

    /// Lists the human members that can see the invoking channel.
    pub async fn list(&self, ctx: &InvocationContext) -> Result<Reply, AppError> {
        PreconditionGuard::new(self.config).require(ctx, &[Precondition::OnConfiguredGuild])?;
        let channel = ctx.text_channel()?;

        let members = self
            .platform
            .channel_members(self.config.guild_id, channel)
            .await?;

        let mut names: Vec<&str> = members
            .iter()
            .filter(|m| !m.bot)
            .map(MemberView::display_name)
            .collect();
        names.sort_unstable();

        let mut lines = vec!["The members of this channel are:".to_string()];
        lines.extend(names.into_iter().map(|name| format!("- {}", name)));

        Ok(Reply::ephemeral(lines.join("\n")))
    }
}
