//! Guild availability handler.
//!
//! Discord only sends a handful of members with `guild_create` for large
//! guilds. Member lookups by name and the member list of a channel read the
//! cache, so the full member list is requested over the gateway as soon as the
//! configured guild becomes available. The chunks land in the cache as they
//! arrive.

use serenity::all::{ChunkGuildFilter, Context, Guild};

use crate::config::Config;

/// Handles the guild_create event for the configured guild.
///
/// Fires on start-up, on joining and after an outage. Other guilds are ignored.
///
/// # Arguments
/// - `config` - Bot configuration naming the served guild
/// - `ctx` - Discord context providing the shard messenger
/// - `guild` - The guild that became available
pub fn handle_guild_create(config: &Config, ctx: &Context, guild: &Guild) {
    if guild.id != config.guild_id {
        tracing::debug!("Ignoring guild {} ({})", guild.name, guild.id);
        return;
    }

    tracing::info!(
        "Guild {} available with {} of {} members cached, requesting the rest",
        guild.name,
        guild.members.len(),
        guild.member_count
    );

    ctx.shard
        .chunk_guild(guild.id, None, false, ChunkGuildFilter::None, None);
}
