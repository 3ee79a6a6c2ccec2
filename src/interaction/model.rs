//! Inbound interaction payloads.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

use super::{Channel, Member, Role, Snowflake, User};

/// Interaction kinds understood by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub enum InteractionType {
    /// Liveness probe sent by the platform.
    Ping,
    /// A command invocation.
    ApplicationCommand,
    /// A follow-up from a message component such as a button.
    MessageComponent,
    /// A partially typed command asking for suggestions.
    Autocomplete,
    /// A submitted modal form.
    ModalSubmit,
    /// Any discriminant this engine does not know about.
    Other(u8),
}

impl From<u8> for InteractionType {
    fn from(value: u8) -> Self {
        match value {
            1 => Self::Ping,
            2 => Self::ApplicationCommand,
            3 => Self::MessageComponent,
            4 => Self::Autocomplete,
            5 => Self::ModalSubmit,
            other => Self::Other(other),
        }
    }
}

impl From<InteractionType> for u8 {
    fn from(value: InteractionType) -> Self {
        match value {
            InteractionType::Ping => 1,
            InteractionType::ApplicationCommand => 2,
            InteractionType::MessageComponent => 3,
            InteractionType::Autocomplete => 4,
            InteractionType::ModalSubmit => 5,
            InteractionType::Other(other) => other,
        }
    }
}

/// Wire type of a command option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub enum OptionType {
    /// Selects a subcommand; carries nested options.
    SubCommand,
    /// Selects a subcommand group; carries one nested subcommand.
    SubCommandGroup,
    /// Text value.
    String,
    /// Integer value.
    Integer,
    /// Boolean value.
    Boolean,
    /// User reference.
    User,
    /// Channel reference.
    Channel,
    /// Role reference.
    Role,
    /// User or role reference.
    Mentionable,
    /// Floating-point value.
    Number,
    /// Uploaded attachment reference.
    Attachment,
    /// Any discriminant this engine does not know about.
    Other(u8),
}

impl OptionType {
    /// Returns whether the option selects a path segment rather than carrying
    /// an argument value.
    #[must_use]
    pub const fn is_grouping(self) -> bool {
        matches!(self, Self::SubCommand | Self::SubCommandGroup)
    }
}

impl From<u8> for OptionType {
    fn from(value: u8) -> Self {
        match value {
            1 => Self::SubCommand,
            2 => Self::SubCommandGroup,
            3 => Self::String,
            4 => Self::Integer,
            5 => Self::Boolean,
            6 => Self::User,
            7 => Self::Channel,
            8 => Self::Role,
            9 => Self::Mentionable,
            10 => Self::Number,
            11 => Self::Attachment,
            other => Self::Other(other),
        }
    }
}

impl From<OptionType> for u8 {
    fn from(value: OptionType) -> Self {
        match value {
            OptionType::SubCommand => 1,
            OptionType::SubCommandGroup => 2,
            OptionType::String => 3,
            OptionType::Integer => 4,
            OptionType::Boolean => 5,
            OptionType::User => 6,
            OptionType::Channel => 7,
            OptionType::Role => 8,
            OptionType::Mentionable => 9,
            OptionType::Number => 10,
            OptionType::Attachment => 11,
            OptionType::Other(other) => other,
        }
    }
}

/// One inbound interaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interaction {
    /// Interaction identifier.
    pub id: Snowflake,
    /// Application the interaction targets.
    pub application_id: Snowflake,
    /// Interaction kind.
    #[serde(rename = "type")]
    pub kind: InteractionType,
    /// Command or component payload; absent for pings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<InteractionData>,
    /// Guild the interaction was sent from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guild_id: Option<Snowflake>,
    /// Channel the interaction was sent from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel_id: Option<Snowflake>,
    /// Invoking member, for guild interactions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub member: Option<Member>,
    /// Invoking user, for direct-message interactions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
    /// Continuation token for follow-up messages.
    #[serde(default)]
    pub token: String,
    /// Payload version.
    #[serde(default)]
    pub version: u8,
    /// Locale of the invoking user.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
}

impl Interaction {
    /// Creates an interaction of the given kind with no payload.
    #[must_use]
    pub fn new(id: Snowflake, application_id: Snowflake, kind: InteractionType) -> Self {
        Self {
            id,
            application_id,
            kind,
            data: None,
            guild_id: None,
            channel_id: None,
            member: None,
            user: None,
            token: String::new(),
            version: 1,
            locale: None,
        }
    }

    /// Attaches a payload.
    #[must_use]
    pub fn with_data(mut self, data: InteractionData) -> Self {
        self.data = Some(data);
        self
    }

    /// Sets the originating guild.
    #[must_use]
    pub fn with_guild(mut self, guild_id: Snowflake) -> Self {
        self.guild_id = Some(guild_id);
        self
    }

    /// Returns the invoking user, whether sent directly or via the member.
    #[must_use]
    pub fn invoker(&self) -> Option<&User> {
        self.member
            .as_ref()
            .and_then(|member| member.user.as_ref())
            .or(self.user.as_ref())
    }

    /// Returns the resolved objects embedded in the payload, if any.
    #[must_use]
    pub fn resolved(&self) -> Option<&ResolvedData> {
        self.data.as_ref().map(|data| &data.resolved)
    }
}

/// Command or component payload of an interaction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InteractionData {
    /// Registered command identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Snowflake>,
    /// Top-level command name.
    #[serde(default)]
    pub name: String,
    /// Command type discriminant.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub command_type: Option<u8>,
    /// Nested options carrying the subcommand path and argument values.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<DataOption>,
    /// Objects referenced by the options.
    #[serde(default)]
    pub resolved: ResolvedData,
    /// Component identifier for follow-up interactions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_id: Option<String>,
    /// Component type discriminant.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component_type: Option<u8>,
    /// Values selected in a select-menu component.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub values: Vec<String>,
    /// Target of a context-menu command.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_id: Option<Snowflake>,
}

impl InteractionData {
    /// Creates a command payload with the given top-level name.
    #[must_use]
    pub fn command(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Creates a component payload with the given custom identifier.
    #[must_use]
    pub fn component(custom_id: impl Into<String>) -> Self {
        Self {
            custom_id: Some(custom_id.into()),
            ..Self::default()
        }
    }

    /// Appends an option.
    #[must_use]
    pub fn with_option(mut self, option: DataOption) -> Self {
        self.options.push(option);
        self
    }
}

/// One option within a command payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataOption {
    /// Option name.
    pub name: String,
    /// Option wire type.
    #[serde(rename = "type")]
    pub kind: OptionType,
    /// Raw wire value for value-carrying options.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    /// Nested options for subcommands and groups.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<DataOption>,
    /// Whether the user is currently typing this option.
    #[serde(default)]
    pub focused: bool,
}

impl DataOption {
    /// Creates a value-carrying option.
    #[must_use]
    pub fn value(name: impl Into<String>, kind: OptionType, value: Value) -> Self {
        Self {
            name: name.into(),
            kind,
            value: Some(value),
            options: Vec::new(),
            focused: false,
        }
    }

    /// Creates a grouping option with nested options.
    #[must_use]
    pub fn group(name: impl Into<String>, kind: OptionType, options: Vec<Self>) -> Self {
        Self {
            name: name.into(),
            kind,
            value: None,
            options,
            focused: false,
        }
    }

    /// Marks the option as focused.
    #[must_use]
    pub fn with_focused(mut self) -> Self {
        self.focused = true;
        self
    }
}

/// Objects referenced by command options, keyed by identifier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedData {
    /// Referenced users.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub users: HashMap<Snowflake, User>,
    /// Referenced guild members.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub members: HashMap<Snowflake, Member>,
    /// Referenced roles.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub roles: HashMap<Snowflake, Role>,
    /// Referenced channels.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub channels: HashMap<Snowflake, Channel>,
}
