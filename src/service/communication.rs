use crate::{
    config::Config,
    error::AppError,
    middleware::precondition::{Precondition, PreconditionGuard},
    model::{context::InvocationContext, reply::Reply},
    platform::Platform,
};

const DEFAULT_MENTION: &str = "Hey folks!";

/// Messaging helpers available inside statics.
pub struct CommunicationService<'a> {
    platform: &'a dyn Platform,
    config: &'a Config,
}

impl<'a> CommunicationService<'a> {
    pub fn new(platform: &'a dyn Platform, config: &'a Config) -> Self {
        Self { platform, config }
    }

    /// Connectivity check. Runs no preconditions.
    pub fn ping(&self) -> Reply {
        Reply::ephemeral("pong")
    }

    /// Mentions every human member of the invoking static in a single message,
    /// preceded by `message` or a default greeting.
    pub async fn mention(
        &self,
        ctx: &InvocationContext,
        message: Option<&str>,
    ) -> Result<Reply, AppError> {
        PreconditionGuard::new(self.config).require(
            ctx,
            &[Precondition::OnConfiguredGuild, Precondition::InStaticsCategory],
        )?;
        let channel = ctx.text_channel()?;

        let members = self
            .platform
            .channel_members(self.config.guild_id, channel)
            .await?;
        let mentions: Vec<String> = members
            .iter()
            .filter(|m| !m.bot)
            .map(|m| m.mention().to_string())
            .collect();

        let text = message
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .unwrap_or(DEFAULT_MENTION);

        Ok(Reply::public(format!("{}\n{}", text, mentions.join(" "))))
    }

    /// Pins the message the command was invoked on.
    pub async fn pin(&self, ctx: &InvocationContext) -> Result<Reply, AppError> {
        PreconditionGuard::new(self.config).require(ctx, &[Precondition::OnConfiguredGuild])?;
        let channel = ctx.text_channel()?;
        let message = ctx.target_message()?;

        self.platform.pin(channel, message).await?;
        tracing::info!("{} pinned {} in {}", ctx.author.name, message, channel);

        Ok(Reply::public("pinned it :)"))
    }

    /// Unpins the message the command was invoked on.
    pub async fn unpin(&self, ctx: &InvocationContext) -> Result<Reply, AppError> {
        PreconditionGuard::new(self.config).require(ctx, &[Precondition::OnConfiguredGuild])?;
        let channel = ctx.text_channel()?;
        let message = ctx.target_message()?;

        self.platform.unpin(channel, message).await?;
        tracing::info!("{} unpinned {} in {}", ctx.author.name, message, channel);

        Ok(Reply::public("unpinned it :)"))
    }
}
