use serenity::all::RoleId;

use crate::{
    config::Config,
    error::{setup::GuildSetupError, AppError},
    middleware::precondition::{Precondition, PreconditionGuard},
    model::{
        channel::ChannelKind,
        context::InvocationContext,
        member::RoleView,
        reply::Reply,
    },
    platform::Platform,
    service::registry::{self, ChannelRegistry},
};

/// One checked item of the configuration report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    pub ok: bool,
    pub text: String,
}

impl Finding {
    fn ok(text: impl Into<String>) -> Self {
        Self {
            ok: true,
            text: text.into(),
        }
    }

    fn problem(text: impl Into<String>) -> Self {
        Self {
            ok: false,
            text: text.into(),
        }
    }

    fn render(&self) -> String {
        let mark = if self.ok { "OK" } else { "PROBLEM" };
        format!("[{}] {}", mark, self.text)
    }
}

/// Checks the configuration against the live guild, so an admin can find
/// setup problems before users run into them.
pub struct DiagnosticService<'a> {
    platform: &'a dyn Platform,
    config: &'a Config,
}

impl<'a> DiagnosticService<'a> {
    pub fn new(platform: &'a dyn Platform, config: &'a Config) -> Self {
        Self { platform, config }
    }

    /// Runs every check and renders the report. Admins only.
    pub async fn check_config(&self, ctx: &InvocationContext) -> Result<Reply, AppError> {
        PreconditionGuard::new(self.config).require(
            ctx,
            &[Precondition::OnConfiguredGuild, Precondition::IsAdmin],
        )?;

        let findings = self.findings().await?;
        let problems = findings.iter().filter(|f| !f.ok).count();

        let mut lines = vec!["Configuration report".to_string()];
        lines.extend(findings.iter().map(Finding::render));
        lines.push(String::new());
        lines.push(match problems {
            0 => "Everything looks fine.".to_string(),
            1 => "Found 1 problem.".to_string(),
            n => format!("Found {} problems.", n),
        });

        Ok(Reply::ephemeral(lines.join("\n")))
    }

    /// Collects the findings in report order.
    ///
    /// Setup problems become findings; other platform errors abort the report.
    pub async fn findings(&self) -> Result<Vec<Finding>, AppError> {
        let guild_id = self.config.guild_id;
        let mut findings = Vec::new();

        if !self.platform.guild_available(guild_id).await? {
            findings.push(Finding::problem(format!(
                "Server {} is not available to the bot",
                guild_id
            )));
            return Ok(findings);
        }
        findings.push(Finding::ok(format!("Server {} is available", guild_id)));

        findings.extend(self.category_findings().await?);

        let roles = self.platform.guild_roles(guild_id).await?;
        let configured = [
            ("Admin role", Some(self.config.admin_role_id)),
            ("Bots role", Some(self.config.bots_role_id)),
            ("Deny role", self.config.blacklist_role_id),
            ("Allow role", self.config.whitelist_role_id),
            ("One-channel role", self.config.one_channel_role_id),
        ];
        for (label, role) in configured {
            findings.push(role_finding(&roles, label, role));
        }

        Ok(findings)
    }

    async fn category_findings(&self) -> Result<Vec<Finding>, AppError> {
        let category_id = self.config.category_id;
        let registry = ChannelRegistry::new(self.platform, self.config);

        let category = match registry.resolve_category().await {
            Ok(category) => category,
            Err(AppError::SetupErr(GuildSetupError::CategoryNotVisible)) => {
                return Ok(vec![
                    Finding::ok(format!("Statics category {} exists", category_id)),
                    Finding::problem(GuildSetupError::CategoryNotVisible.to_string()),
                ]);
            }
            Err(AppError::SetupErr(_)) => {
                let channels = self.platform.guild_channels(self.config.guild_id).await?;
                let text = match channels.iter().find(|c| c.id == category_id) {
                    Some(channel) if channel.kind != ChannelKind::Category => format!(
                        "Channel {} ({}) is configured as the statics category but is not a category",
                        channel.name, category_id
                    ),
                    _ => format!("No statics category with id {}", category_id),
                };
                return Ok(vec![Finding::problem(text)]);
            }
            Err(err) => return Err(err),
        };

        let mut findings = vec![
            Finding::ok(format!(
                "Statics category {} ({}) exists",
                category.name, category_id
            )),
            Finding::ok("The bot can view the statics category"),
        ];

        let duplicates = registry::duplicates(&category);
        if duplicates.is_empty() {
            findings.push(Finding::ok(format!(
                "{} statics, no duplicate names",
                registry::statics(&category).len()
            )));
        }
        for (name, count) in duplicates {
            findings.push(Finding::problem(
                GuildSetupError::DuplicateChannel { name, count }.to_string(),
            ));
        }

        Ok(findings)
    }
}

fn role_finding(roles: &[RoleView], label: &str, role: Option<RoleId>) -> Finding {
    let Some(role) = role else {
        return Finding::ok(format!("{} is not configured", label));
    };

    match roles.iter().find(|r| r.id == role) {
        Some(found) => Finding::ok(format!("{} {} ({}) exists", label, found.name, role)),
        None => Finding::problem(format!("{} {} does not exist on the server", label, role)),
    }
}
