//! Precondition chain evaluated before every command.
//!
//! Each [`Precondition`] is a pure predicate over the [`InvocationContext`] and
//! the [`Config`]. [`PreconditionGuard::require`] assembles the chain for a
//! command, puts it in evaluation order and stops at the first failure.
//!
//! Ordering rules:
//! - guild and category checks come before any role check, since role checks
//!   need a resolved guild member;
//! - the deny/allow list checks run for every guarded command, ahead of the
//!   command's own role checks.

use crate::{
    config::Config,
    error::check::CheckFailure,
    model::context::InvocationContext,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Precondition {
    /// The command was invoked on the configured guild.
    OnConfiguredGuild,
    /// The invoking channel is filed under the statics category.
    InStaticsCategory,
    /// The author does not hold the deny role. Passes when none is configured.
    NotDenylisted,
    /// The author holds the allow role. Passes when none is configured.
    OnAllowlist,
    /// The author holds the admin role.
    IsAdmin,
}

/// Outcome of evaluating a single precondition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Pass,
    Fail(CheckFailure),
}

impl Verdict {
    fn check(passed: bool, failure: CheckFailure) -> Self {
        if passed {
            Verdict::Pass
        } else {
            Verdict::Fail(failure)
        }
    }
}

/// Checks added to every guarded command.
const GLOBAL: [Precondition; 2] = [Precondition::NotDenylisted, Precondition::OnAllowlist];

impl Precondition {
    /// Position in the chain; lower stages are evaluated first.
    fn stage(self) -> u8 {
        match self {
            Precondition::OnConfiguredGuild => 0,
            Precondition::InStaticsCategory => 1,
            Precondition::NotDenylisted => 2,
            Precondition::OnAllowlist => 3,
            Precondition::IsAdmin => 4,
        }
    }

    /// Evaluates the predicate. Has no side effects.
    pub fn evaluate(self, config: &Config, ctx: &InvocationContext) -> Verdict {
        match self {
            Precondition::OnConfiguredGuild => Verdict::check(
                ctx.guild_id == Some(config.guild_id),
                CheckFailure::WrongGuild,
            ),
            Precondition::InStaticsCategory => Verdict::check(
                ctx.channel
                    .as_ref()
                    .and_then(|channel| channel.parent_id)
                    == Some(config.category_id),
                CheckFailure::WrongCategory,
            ),
            Precondition::NotDenylisted => match config.blacklist_role_id {
                None => Verdict::Pass,
                Some(role) => match ctx.author_member() {
                    Ok(member) => Verdict::check(!member.has_role(role), CheckFailure::Forbidden),
                    Err(failure) => Verdict::Fail(failure),
                },
            },
            Precondition::OnAllowlist => match config.whitelist_role_id {
                None => Verdict::Pass,
                Some(role) => match ctx.author_member() {
                    Ok(member) => Verdict::check(member.has_role(role), CheckFailure::Forbidden),
                    Err(failure) => Verdict::Fail(failure),
                },
            },
            Precondition::IsAdmin => match ctx.author_member() {
                Ok(member) => Verdict::check(
                    member.has_role(config.admin_role_id),
                    CheckFailure::NotAdmin,
                ),
                Err(failure) => Verdict::Fail(failure),
            },
        }
    }
}

/// The full, ordered chain for a command's own preconditions.
///
/// Adds the global deny/allow checks, drops duplicates and sorts by stage.
/// The sort is stable, so equal stages keep the order they were given in.
pub fn chain(command: &[Precondition]) -> Vec<Precondition> {
    let mut chain: Vec<Precondition> = Vec::with_capacity(command.len() + GLOBAL.len());
    for precondition in command.iter().chain(GLOBAL.iter()) {
        if !chain.contains(precondition) {
            chain.push(*precondition);
        }
    }
    chain.sort_by_key(|precondition| precondition.stage());
    chain
}

pub struct PreconditionGuard<'a> {
    config: &'a Config,
}

impl<'a> PreconditionGuard<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self { config }
    }

    /// Evaluates the chain for `preconditions` against `ctx`.
    ///
    /// # Returns
    /// - `Ok(())` - Every precondition passed; the command may run
    /// - `Err(CheckFailure)` - The first failing precondition's reason
    pub fn require(
        &self,
        ctx: &InvocationContext,
        preconditions: &[Precondition],
    ) -> Result<(), CheckFailure> {
        for precondition in chain(preconditions) {
            if let Verdict::Fail(failure) = precondition.evaluate(self.config, ctx) {
                tracing::debug!(
                    "Precondition {:?} failed for {} ({}): {}",
                    precondition,
                    ctx.author.name,
                    ctx.author.user_id,
                    failure
                );
                return Err(failure);
            }
        }

        Ok(())
    }
}
