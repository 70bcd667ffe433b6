use std::sync::Arc;

use serenity::all::{Client, GatewayIntents};

use crate::{bot::handler::Handler, config::Config, error::AppError};

/// Builds the Discord client without connecting.
///
/// # Arguments
/// - `config` - Bot configuration, shared with the event handler
///
/// # Returns
/// - `Ok(Client)` - Client ready to be started with [`start_bot`]
/// - `Err(AppError)` - The client could not be built (e.g. malformed token)
pub async fn init_bot(config: Arc<Config>) -> Result<Client, AppError> {
    // GUILD_MEMBERS is a privileged intent - must be enabled in Discord Developer Portal
    let intents =
        GatewayIntents::GUILDS | GatewayIntents::GUILD_MESSAGES | GatewayIntents::GUILD_MEMBERS;

    let client = Client::builder(config.token(), intents)
        .event_handler(Handler::new(config.clone()))
        .await?;

    Ok(client)
}

/// Connects to the gateway and processes events until shutdown.
///
/// # Returns
/// - `Ok(())` - The client shut down cleanly
/// - `Err(AppError)` - Connecting failed or the gateway closed with an error
pub async fn start_bot(mut client: Client) -> Result<(), AppError> {
    tracing::info!("Starting Discord bot...");

    client.start().await?;

    Ok(())
}
