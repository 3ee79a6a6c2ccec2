//! Responses returned to the platform.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Response kinds the platform accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub enum CallbackType {
    /// Acknowledges a ping.
    Pong,
    /// Replies with a message.
    ChannelMessageWithSource,
    /// Acknowledges now and replies later.
    DeferredChannelMessageWithSource,
    /// Acknowledges a component without changing the message.
    DeferredUpdateMessage,
    /// Edits the message the component belongs to.
    UpdateMessage,
    /// Returns autocomplete suggestions.
    AutocompleteResult,
    /// Opens a modal form.
    Modal,
    /// Any discriminant this engine does not know about.
    Other(u8),
}

impl From<u8> for CallbackType {
    fn from(value: u8) -> Self {
        match value {
            1 => Self::Pong,
            4 => Self::ChannelMessageWithSource,
            5 => Self::DeferredChannelMessageWithSource,
            6 => Self::DeferredUpdateMessage,
            7 => Self::UpdateMessage,
            8 => Self::AutocompleteResult,
            9 => Self::Modal,
            other => Self::Other(other),
        }
    }
}

impl From<CallbackType> for u8 {
    fn from(value: CallbackType) -> Self {
        match value {
            CallbackType::Pong => 1,
            CallbackType::ChannelMessageWithSource => 4,
            CallbackType::DeferredChannelMessageWithSource => 5,
            CallbackType::DeferredUpdateMessage => 6,
            CallbackType::UpdateMessage => 7,
            CallbackType::AutocompleteResult => 8,
            CallbackType::Modal => 9,
            CallbackType::Other(other) => other,
        }
    }
}

/// A response to one interaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractionResponse {
    /// Response kind.
    #[serde(rename = "type")]
    pub kind: CallbackType,
    /// Response payload.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<CallbackData>,
}

impl InteractionResponse {
    /// The fixed acknowledgement for ping interactions.
    #[must_use]
    pub const fn pong() -> Self {
        Self {
            kind: CallbackType::Pong,
            data: None,
        }
    }

    /// A plain message reply.
    #[must_use]
    pub fn message(content: impl Into<String>) -> Self {
        Self {
            kind: CallbackType::ChannelMessageWithSource,
            data: Some(CallbackData::with_content(content)),
        }
    }

    /// An acknowledgement promising a later reply.
    #[must_use]
    pub const fn deferred() -> Self {
        Self {
            kind: CallbackType::DeferredChannelMessageWithSource,
            data: None,
        }
    }

    /// Autocomplete suggestions.
    #[must_use]
    pub fn autocomplete(choices: Vec<OptionChoice>) -> Self {
        Self {
            kind: CallbackType::AutocompleteResult,
            data: Some(CallbackData {
                choices,
                ..CallbackData::default()
            }),
        }
    }

    /// Returns the message content, if any.
    #[must_use]
    pub fn content(&self) -> Option<&str> {
        self.data.as_ref().and_then(|data| data.content.as_deref())
    }
}

/// Payload of an interaction response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CallbackData {
    /// Message text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Message flag bits.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flags: Option<u64>,
    /// Rich embeds, passed through untouched.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub embeds: Vec<Value>,
    /// Message components, passed through untouched.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub components: Vec<Value>,
    /// Autocomplete suggestions.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub choices: Vec<OptionChoice>,
    /// Modal identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_id: Option<String>,
    /// Modal title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl CallbackData {
    /// Flag bit hiding a reply from everyone but the invoker.
    pub const EPHEMERAL: u64 = 1 << 6;

    /// Creates a payload carrying message text.
    #[must_use]
    pub fn with_content(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            ..Self::default()
        }
    }

    /// Marks the reply as visible only to the invoker.
    #[must_use]
    pub fn ephemeral(mut self) -> Self {
        self.flags = Some(self.flags.unwrap_or_default() | Self::EPHEMERAL);
        self
    }
}

/// One autocomplete suggestion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionChoice {
    /// Label shown to the user.
    pub name: String,
    /// Value submitted when chosen.
    pub value: Value,
}

impl OptionChoice {
    /// Creates a suggestion.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}
