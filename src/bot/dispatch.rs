use crate::{
    bot::command::Command,
    config::Config,
    error::AppError,
    model::{context::InvocationContext, reply::Reply},
    platform::Platform,
    service::{
        communication::CommunicationService, diagnostic::DiagnosticService,
        member::MemberService, statics::StaticService,
    },
};

/// Runs a parsed command against the platform.
pub async fn run(
    platform: &dyn Platform,
    config: &Config,
    ctx: &InvocationContext,
    command: &Command,
) -> Result<Reply, AppError> {
    let statics = StaticService::new(platform, config);
    let members = MemberService::new(platform, config);
    let communication = CommunicationService::new(platform, config);

    match command {
        Command::Ping => Ok(communication.ping()),
        Command::CheckConfig => DiagnosticService::new(platform, config).check_config(ctx).await,
        Command::Mention { message } => communication.mention(ctx, message.as_deref()).await,
        Command::Pin => communication.pin(ctx).await,
        Command::Unpin => communication.unpin(ctx).await,
        Command::StaticCreate { name } => statics.create(ctx, name).await,
        Command::StaticDelete { name } => statics.delete(ctx, name).await,
        Command::StaticClear { limit } => statics.clear(ctx, *limit).await,
        Command::StaticList => statics.list(ctx).await,
        Command::MemberAdd { name } => members.add(ctx, name).await,
        Command::MemberRemove { name } => members.remove(ctx, name).await,
        Command::MemberList => members.list(ctx).await,
    }
}

/// Runs a command and turns any error into the reply the user sees.
///
/// This is the single place where failures are mapped to responses; nothing
/// past here can fail the interaction except sending the reply itself.
pub async fn dispatch(
    platform: &dyn Platform,
    config: &Config,
    ctx: &InvocationContext,
    command: &Command,
) -> Reply {
    match run(platform, config, ctx, command).await {
        Ok(reply) => reply,
        Err(err) => err.reply(),
    }
}
