use std::{num::ParseIntError, path::PathBuf};

use thiserror::Error;

/// Errors raised while loading configuration at start-up.
///
/// Any of these aborts the process with a non-zero exit code before the bot
/// connects to Discord.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Required environment variable is not set.
    ///
    /// Every required field maps to `PREFIX_<FIELD>` in the environment, e.g.
    /// `STATIC_BOT_GUILD_ID`.
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    /// Required field is absent from the JSON configuration file.
    #[error("Missing required configuration field: {0}")]
    MissingField(String),

    /// The bot token is empty after trimming whitespace.
    #[error("The bot token is empty")]
    EmptyToken,

    /// An identifier is not a positive integer.
    #[error("Invalid id for '{field}': '{value}' ({source})")]
    InvalidId {
        /// The configuration field being parsed
        field: String,
        /// The raw value that failed to parse
        value: String,
        /// The underlying parse error
        #[source]
        source: ParseIntError,
    },

    /// An identifier has a JSON type that cannot hold an id.
    #[error("Invalid value for '{field}': expected an integer or a numeric string")]
    InvalidValue { field: String },

    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration file is not a JSON object: {0}")]
    Json(#[from] serde_json::Error),
}
