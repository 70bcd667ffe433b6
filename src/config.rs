use std::{collections::HashMap, fmt, path::Path};

use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;
use serenity::all::{ChannelId, GuildId, RoleId};

use crate::{error::config::ConfigError, util::parse::parse_id};

/// Environment variable prefix used when none is given on the command line.
pub const DEFAULT_ENV_PREFIX: &str = "STATIC_BOT";

const GUILD_ID: &str = "guild_id";
const CATEGORY_ID: &str = "category_id";
const ADMIN_ROLE_ID: &str = "admin_role_id";
const BOTS_ROLE_ID: &str = "bots_role_id";
const BLACKLIST_ROLE_ID: &str = "blacklist_role_id";
const WHITELIST_ROLE_ID: &str = "whitelist_role_id";
const ONE_CHANNEL_ROLE_ID: &str = "one_channel_role_id";

/// Static bot configuration.
///
/// Immutable once loaded. Every required id is validated at load time, so a
/// running bot never sees a partial configuration.
pub struct Config {
    /// Bot token, never logged.
    pub token: SecretString,
    /// The single guild the bot serves.
    pub guild_id: GuildId,
    /// Category all statics live in.
    pub category_id: ChannelId,
    pub admin_role_id: RoleId,
    /// Role carried by bot accounts; members holding it cannot be added to statics.
    pub bots_role_id: RoleId,
    /// Members holding this role may not use the bot.
    pub blacklist_role_id: Option<RoleId>,
    /// When set, only members holding this role may use the bot.
    pub whitelist_role_id: Option<RoleId>,
    /// When set, non-admin members may own at most one static at a time.
    pub one_channel_role_id: Option<RoleId>,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("token", &"[REDACTED]")
            .field("guild_id", &self.guild_id)
            .field("category_id", &self.category_id)
            .field("admin_role_id", &self.admin_role_id)
            .field("bots_role_id", &self.bots_role_id)
            .field("blacklist_role_id", &self.blacklist_role_id)
            .field("whitelist_role_id", &self.whitelist_role_id)
            .field("one_channel_role_id", &self.one_channel_role_id)
            .finish()
    }
}

impl Config {
    /// Loads the token from `token_file` and everything else from the JSON
    /// object in `config_file`.
    ///
    /// # Arguments
    /// - `token_file` - File holding the bot token; line breaks and surrounding
    ///   whitespace are stripped
    /// - `config_file` - JSON object with the id fields, keys matched
    ///   case-insensitively
    ///
    /// # Returns
    /// - `Ok(Config)` - Every required field is present and valid
    /// - `Err(ConfigError)` - A file is unreadable, malformed or incomplete
    pub fn load(token_file: &Path, config_file: &Path) -> Result<Self, ConfigError> {
        let token = read_file(token_file)?.replace('\n', "");
        let raw = read_file(config_file)?;

        Self::from_json(&token, &raw)
    }

    /// Builds a configuration from a token and the text of a JSON object.
    pub fn from_json(token: &str, raw: &str) -> Result<Self, ConfigError> {
        let object: serde_json::Map<String, Value> = serde_json::from_str(raw)?;
        let fields: HashMap<String, Value> = object
            .into_iter()
            .map(|(key, value)| (key.to_lowercase(), value))
            .collect();

        let lookup = |field: &str| -> Result<Option<String>, ConfigError> {
            match fields.get(field) {
                None | Some(Value::Null) => Ok(None),
                Some(Value::Number(number)) => Ok(Some(number.to_string())),
                Some(Value::String(text)) => Ok(Some(text.clone())),
                Some(_) => Err(ConfigError::InvalidValue {
                    field: field.to_string(),
                }),
            }
        };

        Self::build(token, lookup, |field| {
            ConfigError::MissingField(field.to_string())
        })
    }

    /// Reads the configuration from `PREFIX_<FIELD>` environment variables.
    ///
    /// The token comes from `PREFIX_TOKEN`.
    pub fn from_env(prefix: &str) -> Result<Self, ConfigError> {
        Self::from_lookup(prefix, |key| std::env::var(key).ok())
    }

    /// Reads the configuration through `lookup`, which resolves environment
    /// variable names to values.
    pub fn from_lookup(
        prefix: &str,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let var = |field: &str| format!("{}_{}", prefix, field.to_uppercase());

        let token = lookup(&var("token")).ok_or_else(|| ConfigError::MissingEnvVar(var("token")))?;

        Self::build(
            &token,
            |field| Ok(lookup(&var(field))),
            |field| ConfigError::MissingEnvVar(var(field)),
        )
    }

    fn build(
        token: &str,
        lookup: impl Fn(&str) -> Result<Option<String>, ConfigError>,
        missing: impl Fn(&str) -> ConfigError,
    ) -> Result<Self, ConfigError> {
        let token = token.trim();
        if token.is_empty() {
            return Err(ConfigError::EmptyToken);
        }

        let required = |field: &str| -> Result<u64, ConfigError> {
            let value = lookup(field)?.ok_or_else(|| missing(field))?;
            Ok(parse_id(field, &value)?.get())
        };
        // Blank optional values count as unset, matching an empty env var.
        let optional = |field: &str| -> Result<Option<RoleId>, ConfigError> {
            lookup(field)?
                .filter(|value| !value.trim().is_empty())
                .map(|value| parse_id(field, &value).map(|id| RoleId::new(id.get())))
                .transpose()
        };

        Ok(Self {
            token: SecretString::new(token.to_string()),
            guild_id: GuildId::new(required(GUILD_ID)?),
            category_id: ChannelId::new(required(CATEGORY_ID)?),
            admin_role_id: RoleId::new(required(ADMIN_ROLE_ID)?),
            bots_role_id: RoleId::new(required(BOTS_ROLE_ID)?),
            blacklist_role_id: optional(BLACKLIST_ROLE_ID)?,
            whitelist_role_id: optional(WHITELIST_ROLE_ID)?,
            one_channel_role_id: optional(ONE_CHANNEL_ROLE_ID)?,
        })
    }

    pub fn token(&self) -> &str {
        self.token.expose_secret()
    }

    /// Whether the one-channel policy is active.
    pub fn one_channel_policy(&self) -> bool {
        self.one_channel_role_id.is_some()
    }
}

fn read_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })
}
