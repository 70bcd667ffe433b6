//! Command surface registered with Discord.
//!
//! Interactions are reduced to a [`CommandInput`] (names and plain option
//! values) and parsed into a [`Command`]. Keeping the parse free of serenity
//! types lets it be tested without building interactions.

use serenity::all::{CommandOptionType, CommandType, CreateCommand, CreateCommandOption};

use crate::{error::AppError, service::statics::DEFAULT_CLEAR_LIMIT};

/// Every command the bot handles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Ping,
    CheckConfig,
    Mention { message: Option<String> },
    Pin,
    Unpin,
    StaticCreate { name: String },
    StaticDelete { name: String },
    StaticClear { limit: Option<i64> },
    StaticList,
    MemberAdd { name: String },
    MemberRemove { name: String },
    MemberList,
}

impl Command {
    /// Commands that talk to Discord more than a few times and are deferred
    /// before running, so the interaction does not time out.
    pub fn is_slow(&self) -> bool {
        matches!(self, Command::StaticList | Command::CheckConfig)
    }

    /// Parses an invocation.
    ///
    /// # Returns
    /// - `Ok(Command)` - A command this bot handles
    /// - `Err(AppError::NotImplemented)` - An unknown command, typically a stale registration
    /// - `Err(AppError::InternalError)` - A required option is missing
    pub fn parse(input: &CommandInput) -> Result<Self, AppError> {
        let command = match (input.name.as_str(), input.subcommand.as_deref()) {
            ("ping", None) => Command::Ping,
            ("check_config", None) => Command::CheckConfig,
            ("mention", None) => Command::Mention {
                message: input.string("message").map(str::to_string),
            },
            ("pin", None) => Command::Pin,
            ("unpin", None) => Command::Unpin,
            ("static", Some("create")) => Command::StaticCreate {
                name: input.required_string("name")?,
            },
            ("static", Some("delete")) => Command::StaticDelete {
                name: input.required_string("name")?,
            },
            ("static", Some("clear")) => Command::StaticClear {
                limit: input.integer("limit"),
            },
            ("static", Some("list")) => Command::StaticList,
            ("member", Some("add")) => Command::MemberAdd {
                name: input.required_string("name")?,
            },
            ("member", Some("remove")) => Command::MemberRemove {
                name: input.required_string("name")?,
            },
            ("member", Some("list")) => Command::MemberList,
            _ => return Err(AppError::NotImplemented(input.to_string())),
        };

        Ok(command)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionValue {
    String(String),
    Integer(i64),
}

/// A command invocation reduced to names and option values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandInput {
    pub name: String,
    pub subcommand: Option<String>,
    pub options: Vec<(String, OptionValue)>,
}

impl CommandInput {
    pub fn new(name: &str, subcommand: Option<&str>) -> Self {
        Self {
            name: name.to_string(),
            subcommand: subcommand.map(str::to_string),
            options: Vec::new(),
        }
    }

    pub fn with_option(mut self, name: &str, value: OptionValue) -> Self {
        self.options.push((name.to_string(), value));
        self
    }

    fn value(&self, name: &str) -> Option<&OptionValue> {
        self.options
            .iter()
            .find(|(option, _)| option == name)
            .map(|(_, value)| value)
    }

    fn string(&self, name: &str) -> Option<&str> {
        match self.value(name) {
            Some(OptionValue::String(value)) => Some(value),
            _ => None,
        }
    }

    fn required_string(&self, name: &str) -> Result<String, AppError> {
        self.string(name).map(str::to_string).ok_or_else(|| {
            AppError::InternalError(format!("Command '{}' is missing option '{}'", self, name))
        })
    }

    fn integer(&self, name: &str) -> Option<i64> {
        match self.value(name) {
            Some(OptionValue::Integer(value)) => Some(*value),
            _ => None,
        }
    }
}

impl std::fmt::Display for CommandInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.subcommand {
            Some(subcommand) => write!(f, "{} {}", self.name, subcommand),
            None => f.write_str(&self.name),
        }
    }
}

fn name_option(description: &str) -> CreateCommandOption {
    CreateCommandOption::new(CommandOptionType::String, "name", description).required(true)
}

/// Slash and message commands registered on the configured guild.
pub fn definitions() -> Vec<CreateCommand> {
    let statics = CreateCommand::new("static")
        .description("Manage channels for statics")
        .add_option(
            CreateCommandOption::new(
                CommandOptionType::SubCommand,
                "create",
                "Create a new channel for a private static",
            )
            .add_sub_option(name_option(
                "Name of the static to create (do not include \"static-\" at the start)",
            )),
        )
        .add_option(
            CreateCommandOption::new(CommandOptionType::SubCommand, "delete", "Delete a static")
                .add_sub_option(name_option(
                    "Name of the static to delete (do not include \"static-\" at the start)",
                )),
        )
        .add_option(
            CreateCommandOption::new(
                CommandOptionType::SubCommand,
                "clear",
                "Deletes recent messages from the channel",
            )
            .add_sub_option(
                CreateCommandOption::new(
                    CommandOptionType::Integer,
                    "limit",
                    format!(
                        "Delete this many recent messages (default {})",
                        DEFAULT_CLEAR_LIMIT
                    ),
                )
                .min_int_value(1)
                .max_int_value(100),
            ),
        )
        .add_option(CreateCommandOption::new(
            CommandOptionType::SubCommand,
            "list",
            "List all statics along with the time the last message was sent",
        ));

    let member = CreateCommand::new("member")
        .description("Manage members")
        .add_option(
            CreateCommandOption::new(CommandOptionType::SubCommand, "add", "Add a member to this static")
                .add_sub_option(name_option("Name of the server member to add")),
        )
        .add_option(
            CreateCommandOption::new(
                CommandOptionType::SubCommand,
                "remove",
                "Remove a member from this static",
            )
            .add_sub_option(name_option("Name of the static member to remove")),
        )
        .add_option(CreateCommandOption::new(
            CommandOptionType::SubCommand,
            "list",
            "List channel members",
        ));

    vec![
        CreateCommand::new("ping").description("Check if bot connection is working"),
        CreateCommand::new("check_config")
            .description("Check the bot configuration against the server"),
        CreateCommand::new("mention")
            .description("Mention everyone in the channel")
            .add_option(
                CreateCommandOption::new(
                    CommandOptionType::String,
                    "message",
                    "Optional message to send everyone",
                )
                .required(false),
            ),
        statics,
        member,
        CreateCommand::new("pin").kind(CommandType::Message),
        CreateCommand::new("unpin").kind(CommandType::Message),
    ]
}
