//! Command interaction handling.
//!
//! Resolves everything the checks need from the interaction up front, parses
//! the command, runs it and answers the interaction exactly once.

use serenity::all::{
    CommandData, CommandInteraction, CommandType, Context, CreateInteractionResponse,
    CreateInteractionResponseMessage, EditInteractionResponse, MessageId, ResolvedOption,
    ResolvedValue,
};

use crate::{
    bot::{
        command::{Command, CommandInput, OptionValue},
        dispatch::dispatch,
    },
    config::Config,
    model::{
        channel::ChannelKind,
        context::{Author, InvocationContext, InvokingChannel},
        member::MemberView,
        reply::Reply,
    },
    platform::discord::DiscordPlatform,
};

/// Handles a slash or message-context command.
///
/// Slow commands are deferred first and answered by editing the deferred
/// response. Failures to answer are logged; the user then sees Discord's own
/// "interaction failed" notice.
pub async fn handle_command(config: &Config, ctx: Context, command: CommandInteraction) {
    let input = command_input(&command.data);
    let invocation = invocation_context(&ctx, &command);
    tracing::debug!(
        "{} ({}) invoked /{}",
        invocation.author.name,
        invocation.author.user_id,
        input
    );

    let parsed = match Command::parse(&input) {
        Ok(parsed) => parsed,
        Err(err) => {
            respond(&ctx, &command, &input, err.reply()).await;
            return;
        }
    };

    if parsed.is_slow() {
        if let Err(e) = command.defer_ephemeral(&ctx.http).await {
            tracing::error!("Failed to defer /{}: {:?}", input, e);
            return;
        }
    }

    let platform = DiscordPlatform::new(ctx.http.clone(), ctx.cache.clone());
    let reply = dispatch(&platform, config, &invocation, &parsed).await;

    if parsed.is_slow() {
        let edit = EditInteractionResponse::new().content(reply.content_for_discord());
        if let Err(e) = command.edit_response(&ctx.http, edit).await {
            tracing::error!("Failed to answer /{}: {:?}", input, e);
        }
    } else {
        respond(&ctx, &command, &input, reply).await;
    }
}

async fn respond(ctx: &Context, command: &CommandInteraction, input: &CommandInput, reply: Reply) {
    let message = CreateInteractionResponseMessage::new()
        .content(reply.content_for_discord())
        .ephemeral(reply.ephemeral);

    if let Err(e) = command
        .create_response(&ctx.http, CreateInteractionResponse::Message(message))
        .await
    {
        tracing::error!("Failed to answer /{}: {:?}", input, e);
    }
}

/// Reduces the command data to names and plain option values.
fn command_input(data: &CommandData) -> CommandInput {
    let mut input = CommandInput::new(&data.name, None);

    for option in data.options() {
        match &option.value {
            ResolvedValue::SubCommand(options) => {
                input.subcommand = Some(option.name.to_string());
                input.options.extend(options.iter().filter_map(option_value));
            }
            _ => input.options.extend(option_value(&option)),
        }
    }

    input
}

fn option_value(option: &ResolvedOption<'_>) -> Option<(String, OptionValue)> {
    let value = match &option.value {
        ResolvedValue::String(value) => OptionValue::String(value.to_string()),
        ResolvedValue::Integer(value) => OptionValue::Integer(*value),
        _ => return None,
    };

    Some((option.name.to_string(), value))
}

/// Builds the typed context for the checks.
///
/// The invoking channel is taken from the cache, where its category is always
/// known, and falls back to the partial channel sent with the interaction.
fn invocation_context(ctx: &Context, command: &CommandInteraction) -> InvocationContext {
    let cached = command.guild_id.and_then(|guild_id| {
        let guild = ctx.cache.guild(guild_id)?;
        let channel = guild.channels.get(&command.channel_id)?;
        Some(InvokingChannel {
            id: channel.id,
            kind: ChannelKind::from(channel.kind),
            parent_id: channel.parent_id,
        })
    });
    let channel = cached.or_else(|| {
        command.channel.as_ref().map(|channel| InvokingChannel {
            id: channel.id,
            kind: ChannelKind::from(channel.kind),
            parent_id: channel.parent_id,
        })
    });

    let target_message = if command.data.kind == CommandType::Message {
        command.data.target_id.map(|id| MessageId::new(id.get()))
    } else {
        None
    };

    InvocationContext {
        guild_id: command.guild_id,
        channel,
        author: Author {
            user_id: command.user.id,
            name: command.user.name.clone(),
            member: command.member.as_deref().map(MemberView::from),
        },
        target_message,
    }
}
