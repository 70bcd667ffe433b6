//! Error types and reply mapping.
//!
//! This module provides the application's error hierarchy and the single place
//! where errors are turned into what the invoking user sees. Check failures and
//! setup problems travel as typed values; anything unexpected from Discord is
//! logged with full detail and answered with a generic message.

pub mod check;
pub mod config;
pub mod setup;

use serenity::{http::HttpError, model::ModelError};
use thiserror::Error;

use crate::{
    error::{check::CheckFailure, config::ConfigError, setup::GuildSetupError},
    model::reply::Reply,
};

/// Top-level application error type.
///
/// Aggregates every error a command or start-up step can produce. Most variants
/// use `#[from]` so handlers can use `?` on check results, setup lookups and
/// serenity calls alike.
#[derive(Error, Debug)]
pub enum AppError {
    /// A precondition or business rule refused the command.
    ///
    /// Shown to the user verbatim as "Sorry: ...".
    #[error(transparent)]
    CheckErr(#[from] CheckFailure),

    /// Configuration error during start-up.
    #[error(transparent)]
    ConfigErr(#[from] ConfigError),

    /// The live guild does not match the configuration.
    ///
    /// Shown to the user with a hint to run the diagnostic command.
    #[error(transparent)]
    SetupErr(#[from] GuildSetupError),

    /// The gateway delivered a command this bot does not handle.
    #[error("Command '{0}' is not implemented")]
    NotImplemented(String),

    /// Discord API error from Serenity.
    ///
    /// Boxed due to large size. Permission failures get a dedicated reply,
    /// everything else the generic one.
    #[error(transparent)]
    DiscordErr(#[from] Box<serenity::Error>),

    /// Internal error with custom message.
    ///
    /// The message is logged but a generic reply is returned to the user.
    #[error("{0}")]
    InternalError(String),
}

/// Manual conversion from serenity::Error to AppError.
///
/// Boxes the error to reduce the size of the AppError enum, as serenity::Error
/// is very large and would make all AppError variants larger if not boxed.
impl From<serenity::Error> for AppError {
    fn from(err: serenity::Error) -> Self {
        AppError::DiscordErr(Box::new(err))
    }
}

const UNEXPECTED: &str = "Something unexpected happened. Please try again in a few minutes.";

impl AppError {
    /// Converts the error into the reply sent to the invoking user.
    ///
    /// Check failures are logged at debug level only. Setup problems and
    /// platform permission failures are logged as warnings since an operator
    /// has to act on them. Everything else is logged as an error while the
    /// user gets a generic message that leaks no internals.
    pub fn reply(&self) -> Reply {
        match self {
            Self::CheckErr(failure) => {
                tracing::debug!("Command refused: {}", failure);
                Reply::ephemeral(format!("Sorry: {}", failure))
            }
            Self::SetupErr(err) => {
                tracing::warn!("Guild setup problem: {}", err);
                Reply::ephemeral(format!(
                    "Configuration problem: {}. Ask an admin to run /check_config.",
                    err
                ))
            }
            Self::NotImplemented(command) => {
                tracing::debug!("Unhandled command '{}'", command);
                Reply::ephemeral(
                    "Sorry, that feature isn't implemented yet. We're working on it!",
                )
            }
            Self::DiscordErr(err) if is_permission_denied(err) => {
                tracing::warn!("Discord refused an action: {}", err);
                Reply::ephemeral(
                    "The bot doesn't have the permissions required for this action (@admin).",
                )
            }
            err => {
                tracing::error!("Unhandled error while running command: {:?}", err);
                Reply::ephemeral(UNEXPECTED)
            }
        }
    }
}

/// Whether Discord (or serenity's own pre-flight check) rejected a request for
/// lack of permissions.
fn is_permission_denied(err: &serenity::Error) -> bool {
    match err {
        serenity::Error::Http(HttpError::UnsuccessfulRequest(response)) => {
            response.status_code.as_u16() == 403
        }
        serenity::Error::Model(ModelError::InvalidPermissions { .. }) => true,
        _ => false,
    }
}

/// Whether an HTTP error is Discord's 404 for an unknown resource.
pub fn is_not_found(err: &serenity::Error) -> bool {
    matches!(
        err,
        serenity::Error::Http(HttpError::UnsuccessfulRequest(response))
            if response.status_code.as_u16() == 404
    )
}
