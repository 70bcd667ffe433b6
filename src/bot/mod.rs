//! Discord gateway integration.
//!
//! Connects to Discord, registers the slash commands on the configured guild
//! and turns every command interaction into a call into the service layer.
//!
//! # Gateway Intents
//!
//! The bot requires the following gateway intents:
//! - `GUILDS` - Guild, channel and role state for the cache
//! - `GUILD_MESSAGES` - Message events in guild channels
//! - `GUILD_MEMBERS` - Member state, so members can be found by name (privileged intent)
//!
//! Note: `GUILD_MEMBERS` is a privileged intent and must be explicitly enabled
//! in the Discord Developer Portal for the bot application.

pub mod command;
pub mod dispatch;
pub mod handler;
pub mod start;
