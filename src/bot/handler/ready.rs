//! Ready event handler for bot initialization.
//!
//! Fired once per connection after the gateway handshake. Registers the command
//! set on the configured guild; guild commands update immediately, unlike
//! global ones.

use serenity::all::{Context, Ready};

use crate::{bot::command, config::Config};

/// Handles the ready event when the bot connects to Discord.
///
/// A failed registration is logged rather than fatal: commands registered on a
/// previous run keep working.
///
/// # Arguments
/// - `config` - Bot configuration naming the guild to register commands on
/// - `ctx` - Discord context providing the HTTP client
/// - `ready` - Ready event data containing bot user information
pub async fn handle_ready(config: &Config, ctx: Context, ready: Ready) {
    tracing::info!("{} is connected to Discord", ready.user.name);

    match config
        .guild_id
        .set_commands(&ctx.http, command::definitions())
        .await
    {
        Ok(commands) => tracing::info!(
            "Registered {} commands on guild {}",
            commands.len(),
            config.guild_id
        ),
        Err(e) => tracing::error!(
            "Failed to register commands on guild {}: {:?}",
            config.guild_id,
            e
        ),
    }
}
