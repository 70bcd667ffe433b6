use chrono::{DateTime, Utc};
use futures::future::join_all;

use crate::{
    config::Config,
    error::{check::CheckFailure, AppError},
    middleware::precondition::{Precondition, PreconditionGuard},
    model::{
        channel::ChannelView, context::InvocationContext, name::StaticName, reply::Reply,
    },
    platform::Platform,
    service::{
        ledger::{Creator, MembershipLedger},
        registry::{self, ChannelRegistry},
    },
};

/// Messages `clear` removes when no limit is given.
pub const DEFAULT_CLEAR_LIMIT: i64 = 100;

/// Largest batch the platform deletes in one call.
const MAX_CLEAR_LIMIT: i64 = 100;

const LIST_HEADER: &str = "These are the statics on the server";
const LIST_CAVEAT: &str = "Be aware that creator information might not be accurate if the welcome message has been deleted or modified";
const UNKNOWN_CREATOR: &str = "<unknown>";
const UNKNOWN_DATE: &str = "???";

/// One line of the statics report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticRow {
    pub name: String,
    pub creator: Option<String>,
    pub last_message: Option<DateTime<Utc>>,
}

impl StaticRow {
    fn render(&self) -> String {
        let date = self
            .last_message
            .map(|at| at.date_naive().to_string())
            .unwrap_or_else(|| UNKNOWN_DATE.to_string());
        let creator = self.creator.as_deref().unwrap_or(UNKNOWN_CREATOR);

        format!(
            "{} - Last message on {} - Creator: {}",
            self.name, date, creator
        )
    }
}

/// Orders rows by last activity, oldest first. Rows without a known last
/// message go last; ties are broken by name so the order is stable across runs.
pub fn sort_rows(rows: &mut [StaticRow]) {
    rows.sort_by(|a, b| {
        (a.last_message.is_none(), a.last_message, &a.name).cmp(&(
            b.last_message.is_none(),
            b.last_message,
            &b.name,
        ))
    });
}

/// Creation, deletion and auditing of static channels.
pub struct StaticService<'a> {
    platform: &'a dyn Platform,
    config: &'a Config,
}

impl<'a> StaticService<'a> {
    pub fn new(platform: &'a dyn Platform, config: &'a Config) -> Self {
        Self { platform, config }
    }

    /// Creates a static for the invoking member.
    ///
    /// Runs the one-channel policy, name and collision checks before touching
    /// anything, then grants the policy role, creates the channel, lets the
    /// creator see it and posts the welcome message that later identifies the
    /// creator. The steps are not atomic: a failure after the role grant leaves
    /// the role in place for an admin to clean up.
    ///
    /// # Arguments
    /// - `ctx` - The invocation
    /// - `raw_name` - Name as typed, without the `static-` prefix
    ///
    /// # Returns
    /// - `Ok(Reply)` - Ephemeral confirmation for the creator
    /// - `Err(AppError::CheckErr)` - A precondition or business rule refused the command
    /// - `Err(AppError::SetupErr)` - The statics category is misconfigured
    /// - `Err(AppError)` - Platform error part way through
    pub async fn create(&self, ctx: &InvocationContext, raw_name: &str) -> Result<Reply, AppError> {
        PreconditionGuard::new(self.config).require(ctx, &[Precondition::OnConfiguredGuild])?;
        let author = ctx.author_member()?;

        let registry = ChannelRegistry::new(self.platform, self.config);
        let ledger = MembershipLedger::new(self.platform, self.config);

        let category = registry.resolve_category().await?;

        if ledger.blocks_creation(author) {
            return Err(CheckFailure::PolicyViolation.into());
        }

        let name = StaticName::parse(raw_name)?;
        if registry::find_by_name(&category, name.as_str())?.is_some() {
            return Err(CheckFailure::NameCollision.into());
        }

        ledger
            .grant_one_channel_role(author.user_id, "created a static")
            .await?;

        let reason = format!("{} requested the channel", author.name);
        let channel = self
            .platform
            .create_text_channel(self.config.guild_id, category.id, name.as_str(), &reason)
            .await?;
        tracing::info!("Created {} ({}) for {}", channel.name, channel.id, author.name);

        self.platform.allow_view(channel.id, author.user_id).await?;

        self.platform
            .send_message(
                channel.id,
                &format!("Welcome to your new group {}", author.mention()),
            )
            .await?;

        Ok(Reply::ephemeral("Group created, take a look in the server!"))
    }

    /// Deletes a static by name. Admins only.
    ///
    /// While the one-channel policy is active the creator's role is revoked
    /// first. That step is best-effort: if the creator cannot be determined or
    /// the revocation fails, the channel is still deleted and the problem is
    /// added to the reply.
    pub async fn delete(&self, ctx: &InvocationContext, raw_name: &str) -> Result<Reply, AppError> {
        PreconditionGuard::new(self.config).require(
            ctx,
            &[Precondition::OnConfiguredGuild, Precondition::IsAdmin],
        )?;

        let registry = ChannelRegistry::new(self.platform, self.config);
        let category = registry.resolve_category().await?;

        let name = StaticName::parse(raw_name)?;
        let channel = registry::find_by_name(&category, name.as_str())?
            .ok_or_else(|| CheckFailure::ChannelNotFound(name.to_string()))?;

        let note = if self.config.one_channel_policy() {
            self.release_creator(channel).await
        } else {
            None
        };

        let reason = format!("{} asked to remove it", ctx.author.name);
        self.platform.delete_channel(channel.id, &reason).await?;
        tracing::info!("Deleted {} ({}) on behalf of {}", name, channel.id, ctx.author.name);

        let mut content = format!("Group {} deleted.", name);
        if let Some(note) = note {
            content.push('\n');
            content.push_str(&note);
        }

        Ok(Reply::ephemeral(content))
    }

    /// Revokes the one-channel role from the creator of `channel`.
    ///
    /// Returns a side note for the reply when that was not possible.
    async fn release_creator(&self, channel: &ChannelView) -> Option<String> {
        let ledger = MembershipLedger::new(self.platform, self.config);

        let creator = match ledger.creator_of(channel).await {
            Ok(creator) => creator,
            Err(AppError::CheckErr(failure)) => {
                tracing::warn!("Not revoking one-channel role for {}: {}", channel.name, failure);
                return Some(format!(
                    "Note: {}, remove their one-channel role manually.",
                    failure
                ));
            }
            Err(err) => {
                tracing::warn!("Failed to resolve creator of {}: {}", channel.name, err);
                return Some(format!(
                    "Note: failed to determine creator of {}, remove their one-channel role manually.",
                    channel.name
                ));
            }
        };

        if let Creator::Departed(user) = &creator {
            tracing::warn!("Creator {} of {} left the server", user.name, channel.name);
            return Some(format!(
                "Note: the creator {} couldn't be found on the server.",
                user.name
            ));
        }

        match ledger
            .revoke_one_channel_role(creator.user_id(), "their static was deleted")
            .await
        {
            Ok(()) => None,
            Err(err) => {
                tracing::warn!(
                    "Failed to revoke one-channel role from {}: {}",
                    creator.name(),
                    err
                );
                Some(format!(
                    "Note: couldn't remove the one-channel role from {}.",
                    creator.name()
                ))
            }
        }
    }

    /// Deletes up to `limit` recent messages from the invoking channel. Admins only.
    pub async fn clear(
        &self,
        ctx: &InvocationContext,
        limit: Option<i64>,
    ) -> Result<Reply, AppError> {
        PreconditionGuard::new(self.config).require(
            ctx,
            &[
                Precondition::OnConfiguredGuild,
                Precondition::IsAdmin,
                Precondition::InStaticsCategory,
            ],
        )?;
        let channel = ctx.text_channel()?;

        let limit = limit.unwrap_or(DEFAULT_CLEAR_LIMIT);
        let batch = u8::try_from(limit)
            .ok()
            .filter(|n| (1..=MAX_CLEAR_LIMIT).contains(&i64::from(*n)))
            .ok_or(CheckFailure::InvalidLimit(limit))?;

        let deleted = self.platform.purge(channel, batch).await?;
        tracing::info!("{} cleared {} messages in {}", ctx.author.name, deleted, channel);

        Ok(Reply::ephemeral(format!("Deleted {} messages", deleted)))
    }

    /// Reports every static with its creator and last activity. Admins only.
    ///
    /// Rows are resolved concurrently. A row whose creator or last message
    /// cannot be determined shows a placeholder instead of failing the command.
    pub async fn list(&self, ctx: &InvocationContext) -> Result<Reply, AppError> {
        PreconditionGuard::new(self.config).require(
            ctx,
            &[Precondition::OnConfiguredGuild, Precondition::IsAdmin],
        )?;

        let registry = ChannelRegistry::new(self.platform, self.config);
        let category = registry.resolve_category().await?;

        let mut rows = join_all(
            registry::statics(&category)
                .into_iter()
                .map(|channel| self.row(channel)),
        )
        .await;
        sort_rows(&mut rows);

        let mut lines = vec![LIST_HEADER.to_string()];
        if rows.is_empty() {
            lines.push("There are no statics yet".to_string());
        }
        lines.extend(rows.iter().map(StaticRow::render));
        for (name, count) in registry::duplicates(&category) {
            lines.push(format!(
                "Warning: found {} channels named {}, only one should exist",
                count, name
            ));
        }
        lines.push(String::new());
        lines.push(LIST_CAVEAT.to_string());

        Ok(Reply::ephemeral(lines.join("\n")))
    }

    async fn row(&self, channel: &ChannelView) -> StaticRow {
        let ledger = MembershipLedger::new(self.platform, self.config);

        let (creator, last) = futures::join!(
            ledger.creator_of(channel),
            self.platform.last_message(channel.id)
        );

        let creator = match creator {
            Ok(creator) => Some(creator.name().to_string()),
            Err(err) => {
                tracing::debug!("No creator for {}: {}", channel.name, err);
                None
            }
        };
        let last_message = match last {
            Ok(message) => message.map(|m| m.created_at),
            Err(err) => {
                tracing::debug!("No last message for {}: {}", channel.name, err);
                None
            }
        };

        StaticRow {
            name: channel.name.clone(),
            creator,
            last_message,
        }
    }
}
